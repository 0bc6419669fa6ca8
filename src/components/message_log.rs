use leptos::html::Div;
use leptos::leptos_dom::helpers::IntervalHandle;
use leptos::prelude::*;
use std::time::Duration;

use crate::citations::SourceCitation;
use crate::components::markdown::MarkdownRenderer;
use crate::components::sources::SourcesList;
use crate::config::{ChatConfig, RevealMode};
use crate::conversation::{Message, Sender};

/// Scrolling transcript. Keeps itself pinned to the latest message and
/// shows a single searching bubble while a reply is in flight; the bubble
/// renders from the pending flag, so resubmitting cannot stack a second one.
#[component]
pub fn MessageLog(
    #[prop(into)] messages: Signal<Vec<Message>>,
    #[prop(into)] pending: Signal<bool>,
    #[prop(into)] on_open: Callback<SourceCitation>,
) -> impl IntoView {
    let log_ref = NodeRef::<Div>::new();

    let scroll_to_bottom = move || {
        if let Some(el) = log_ref.get_untracked() {
            el.set_scroll_top(el.scroll_height());
        }
    };

    Effect::new(move |_| {
        messages.track();
        pending.track();
        scroll_to_bottom();
    });

    let on_advance = Callback::new(move |_: ()| scroll_to_bottom());

    view! {
        <div class="flex-1 overflow-y-auto p-4 space-y-4" node_ref=log_ref>
            {move || {
                (messages.get().is_empty() && !pending.get())
                    .then(|| {
                        view! {
                            <div class="flex justify-center items-center h-full">
                                <div class="text-center text-gray-500">
                                    <p class="text-lg mb-2">
                                        "Ask a question about the document library"
                                    </p>
                                    <p class="text-sm">
                                        "Answers cite their sources; click a source to open the document at the cited page."
                                    </p>
                                </div>
                            </div>
                        }
                    })
            }}
            <For
                each=move || messages.get()
                key=|message| message.id
                children=move |message| {
                    view! { <MessageBubble message=message on_open=on_open on_advance=on_advance /> }
                }
            />
            {move || pending.get().then(|| view! { <SearchingIndicator /> })}
        </div>
    }
}

#[component]
fn MessageBubble(
    message: Message,
    #[prop(into)] on_open: Callback<SourceCitation>,
    #[prop(into)] on_advance: Callback<()>,
) -> impl IntoView {
    let config = expect_context::<ChatConfig>();
    let Message {
        sender,
        text,
        citations,
        timestamp,
        ..
    } = message;
    let is_user = sender == Sender::User;

    let bubble_class = if is_user {
        "bg-blue-600 text-white rounded-lg p-4 ml-auto max-w-xl"
    } else {
        "bg-gray-100 text-gray-800 rounded-lg p-4 max-w-none"
    };

    let body = if is_user {
        view! { <div class="whitespace-pre-wrap text-left">{text}</div> }.into_any()
    } else {
        match config.reveal {
            RevealMode::Instant => {
                view! { <MarkdownRenderer content=text class="text-left" /> }.into_any()
            }
            RevealMode::Typewriter => {
                view! { <TypewriterText text=text on_advance=on_advance /> }.into_any()
            }
        }
    };

    view! {
        <div class="w-full">
            <div class=bubble_class>
                {body}
                <SourcesList citations=citations on_open=on_open />
                {(!timestamp.is_empty())
                    .then(|| {
                        view! { <div class="text-xs opacity-70 mt-2 text-left">{timestamp}</div> }
                    })}
            </div>
        </div>
    }
}

/// Plain-text reveal, one character per tick. Kept for parity with the
/// original widget behavior; the default mode renders instantly.
#[component]
fn TypewriterText(text: String, #[prop(into)] on_advance: Callback<()>) -> impl IntoView {
    let config = expect_context::<ChatConfig>();
    let every = Duration::from_millis(config.typewriter_interval_ms);
    let total = text.chars().count();

    let (shown, set_shown) = signal(0usize);
    let full_text = StoredValue::new(text);
    let interval_handle: StoredValue<Option<IntervalHandle>> = StoredValue::new(None);

    Effect::new(move |_| {
        if let Some(handle) = interval_handle.get_value() {
            handle.clear();
        }
        let handle = set_interval_with_handle(
            move || {
                set_shown.update(|n| {
                    if *n < total {
                        *n += 1;
                    }
                });
                on_advance.run(());
            },
            every,
        )
        .expect("Failed to set interval");
        interval_handle.set_value(Some(handle));
    });

    // stop ticking once the full text is out
    Effect::new(move |_| {
        if shown.get() >= total {
            if let Some(handle) = interval_handle.get_value() {
                handle.clear();
            }
        }
    });

    on_cleanup(move || {
        if let Some(handle) = interval_handle.get_value() {
            handle.clear();
        }
    });

    view! {
        <span class="whitespace-pre-wrap text-left">
            {move || full_text.with_value(|t| t.chars().take(shown.get()).collect::<String>())}
        </span>
    }
}

#[component]
fn SearchingIndicator() -> impl IntoView {
    view! {
        <div class="flex justify-start">
            <div class="bg-gray-100 rounded-lg p-4 flex items-center space-x-3">
                <span class="text-sm text-gray-500">"Searching"</span>
                <div class="flex space-x-1">
                    <div class="w-2 h-2 bg-gray-400 rounded-full animate-bounce"></div>
                    <div
                        class="w-2 h-2 bg-gray-400 rounded-full animate-bounce"
                        style="animation-delay: 0.1s"
                    ></div>
                    <div
                        class="w-2 h-2 bg-gray-400 rounded-full animate-bounce"
                        style="animation-delay: 0.2s"
                    ></div>
                </div>
            </div>
        </div>
    }
}
