use leptos::prelude::*;

use crate::citations::SourceCitation;

/// Cited sources under a bot reply. Renders nothing at all when the reply
/// cited nothing, so replies without sources carry no empty header.
#[component]
pub fn SourcesList(
    citations: Vec<SourceCitation>,
    #[prop(into)] on_open: Callback<SourceCitation>,
) -> impl IntoView {
    (!citations.is_empty()).then(|| {
        view! {
            <div class="mt-4 pt-3 border-t border-gray-300">
                <div class="text-sm font-medium text-gray-600 mb-2 text-left">"Sources:"</div>
                <ul class="space-y-1 text-left">
                    <For
                        each=move || citations.clone()
                        key=|citation| (citation.index, citation.file_name.clone(), citation.page)
                        children=move |citation| {
                            let label = citation.to_string();
                            view! {
                                <li>
                                    <button
                                        class="text-sm text-blue-600 hover:text-blue-800 hover:underline text-left"
                                        on:click=move |_| on_open.run(citation.clone())
                                    >
                                        {label}
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        }
    })
}
