use leptos::prelude::*;

use crate::api;

#[derive(Debug, Clone, Copy, PartialEq)]
enum EmbedState {
    Checking,
    Ready,
    Failed,
}

/// Document pane of the split view. Probes the URL before embedding it and
/// falls back to a direct link when the document cannot be shown inline, so
/// a cited source stays reachable either way.
#[component]
pub fn ViewerPanel(
    #[prop(into)] url: Signal<Option<String>>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let (embed, set_embed) = signal(EmbedState::Checking);

    Effect::new(move |_| {
        let Some(current) = url.get() else { return };
        set_embed.set(EmbedState::Checking);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = api::probe_document(&current).await;
            // a newer document may have been opened while probing
            if url.get_untracked().as_deref() != Some(current.as_str()) {
                return;
            }
            match outcome {
                Ok(()) => set_embed.set(EmbedState::Ready),
                Err(e) => {
                    log::warn!("document probe failed: {}", e);
                    set_embed.set(EmbedState::Failed);
                }
            }
        });
    });

    view! {
        <div class="relative h-full bg-white">
            <button
                class="absolute top-2 right-2 z-10 px-2 py-1 text-sm rounded bg-gray-100 text-gray-600 hover:bg-gray-200"
                on:click=move |_| on_close.run(())
            >
                "✕"
            </button>
            {move || {
                match (url.get(), embed.get()) {
                    (Some(current), EmbedState::Ready) => {
                        view! {
                            <iframe
                                src=current
                                title="Cited document"
                                class="w-full h-full"
                                on:error=move |_| set_embed.set(EmbedState::Failed)
                            ></iframe>
                        }
                            .into_any()
                    }
                    (Some(current), EmbedState::Failed) => {
                        view! {
                            <div class="p-6 text-left">
                                <p class="text-gray-700 mb-2">
                                    "The document could not be displayed here."
                                </p>
                                <a
                                    href=current
                                    target="_blank"
                                    rel="noopener noreferrer"
                                    class="text-blue-600 hover:underline"
                                >
                                    "Open the document directly"
                                </a>
                            </div>
                        }
                            .into_any()
                    }
                    (Some(_), EmbedState::Checking) => {
                        view! { <div class="p-6 text-gray-500">"Loading document..."</div> }
                            .into_any()
                    }
                    (None, _) => view! { <div class="p-6"></div> }.into_any(),
                }
            }}
        </div>
    }
}
