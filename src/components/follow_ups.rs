use leptos::prelude::*;

/// Suggested next questions, rendered as numbered buttons. The list is a
/// pure function of the current suggestions, so a new reply replaces the
/// buttons instead of stacking more under the old ones.
#[component]
pub fn FollowUpButtons(
    #[prop(into)] questions: Signal<Vec<String>>,
    #[prop(into)] on_pick: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="px-4">
            {move || {
                let list = questions.get();
                (!list.is_empty())
                    .then(|| {
                        view! {
                            <div class="flex flex-col gap-2 items-start pb-2">
                                {list
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, question)| {
                                        let label = format!("{}. {}", i + 1, question);
                                        view! {
                                            <button
                                                class="text-sm text-left px-3 py-2 rounded-md bg-gray-100 text-gray-700 hover:bg-gray-200 transition-colors"
                                                on:click=move |_| on_pick.run(question.clone())
                                            >
                                                {label}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                    })
            }}
        </div>
    }
}
