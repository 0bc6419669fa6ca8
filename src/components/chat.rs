use leptos::html::{Div, Input};
use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::prelude::*;
use std::time::Duration;

use crate::api;
use crate::citations::{self, SourceCitation};
use crate::components::follow_ups::FollowUpButtons;
use crate::components::message_log::MessageLog;
use crate::components::pdf_viewer::ViewerPanel;
use crate::components::status_indicator::StatusBulb;
use crate::config::ChatConfig;
use crate::conversation::Conversation;
use crate::layout::PanelLayout;

/// The whole widget: transcript, follow-ups, input row, and the split-pane
/// document viewer. Owns the conversation and layout state; children render
/// from it and report events back up.
#[component]
pub fn ChatWidget() -> impl IntoView {
    let config = expect_context::<ChatConfig>();

    let conversation = RwSignal::new(Conversation::new());
    let layout = RwSignal::new(PanelLayout::new());
    let (input, set_input) = signal(String::new());
    let (dragging, set_dragging) = signal(false);
    let (viewer_url, set_viewer_url) = signal(Option::<String>::None);

    let follow_up_timer: StoredValue<Option<TimeoutHandle>> = StoredValue::new(None);
    let close_timer: StoredValue<Option<TimeoutHandle>> = StoredValue::new(None);
    let container_ref = NodeRef::<Div>::new();
    let input_ref = NodeRef::<Input>::new();

    let messages = Signal::derive(move || conversation.with(|c| c.messages.clone()));
    let pending = Signal::derive(move || conversation.with(|c| c.pending));
    let follow_ups = Signal::derive(move || conversation.with(|c| c.follow_ups.clone()));

    // hand focus back to the input once a request settles and it re-enables
    Effect::new(move |was_pending: Option<bool>| {
        let pending_now = pending.get();
        if was_pending == Some(true) && !pending_now {
            if let Some(el) = input_ref.get_untracked() {
                let _ = el.focus();
            }
        }
        pending_now
    });

    let ask_url = config.ask_url.clone();
    let follow_up_delay = Duration::from_millis(config.follow_up_delay_ms);
    let follow_up_limit = config.follow_up_limit;

    let submit = Callback::new(move |question: String| {
        let mut request = None;
        conversation.update(|c| request = c.begin_question(&question, now_label()));
        let Some(request) = request else { return };

        set_input.set(String::new());
        if let Some(handle) = follow_up_timer.get_value() {
            handle.clear();
        }

        let url = ask_url.clone();
        let question = question.trim().to_string();
        wasm_bindgen_futures::spawn_local(async move {
            match api::post_ask(&url, &question).await {
                Ok(reply) => {
                    let cited = reply.citations();
                    let applied = conversation
                        .try_update(|c| {
                            c.answer_arrived(request, reply.response, cited, now_label())
                        })
                        .unwrap_or(false);
                    if applied {
                        let questions = reply.follow_up_questions;
                        let handle = set_timeout_with_handle(
                            move || {
                                conversation.update(|c| {
                                    c.set_follow_ups(request, questions, follow_up_limit);
                                });
                            },
                            follow_up_delay,
                        )
                        .expect("Failed to set timeout");
                        follow_up_timer.set_value(Some(handle));
                    }
                }
                Err(e) => {
                    log::error!("ask request failed: {}", e);
                    conversation.update(|c| {
                        c.answer_failed(request, now_label());
                    });
                }
            }
        });
    });

    // a follow-up click goes through the same path as a typed question
    let pick_follow_up = Callback::new(move |question: String| {
        set_input.set(question.clone());
        submit.run(question);
    });

    let data_prefix = config.data_prefix.clone();
    let open_citation = Callback::new(move |citation: SourceCitation| {
        if let Some(handle) = close_timer.get_value() {
            handle.clear();
        }
        set_viewer_url.set(Some(citations::document_url(
            &data_prefix,
            &citation.file_name,
            citation.page,
        )));
        layout.update(|l| l.open());
    });

    let close_animation = Duration::from_millis(config.close_animation_ms);
    let close_viewer = Callback::new(move |_: ()| {
        layout.update(|l| l.begin_close());
        let handle = set_timeout_with_handle(
            move || {
                layout.update(|l| l.finish_close());
                set_viewer_url.set(None);
            },
            close_animation,
        )
        .expect("Failed to set timeout");
        close_timer.set_value(Some(handle));
    });

    let start_drag = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        set_dragging.set(true);
    };
    let drag_move = move |ev: web_sys::MouseEvent| {
        if !dragging.get() {
            return;
        }
        if let Some(container) = container_ref.get() {
            let rect = container.get_bounding_client_rect();
            let x = ev.client_x() as f64 - rect.left();
            layout.update(|l| {
                l.drag(x, rect.width());
            });
        }
    };
    let end_drag = move |_: web_sys::MouseEvent| set_dragging.set(false);

    let handle_key_press = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            submit.run(input.get());
        }
    };

    view! {
        <div class="flex flex-col h-screen bg-gray-50">
            <header class="flex items-center justify-between px-4 py-3 bg-white border-b border-gray-200">
                <h1 class="text-lg font-semibold text-gray-800">"Semiconductor Document Chat"</h1>
                <StatusBulb />
            </header>
            <div
                class="flex flex-1 min-h-0"
                node_ref=container_ref
                on:mousemove=drag_move
                on:mouseup=end_drag
                on:mouseleave=end_drag
            >
                <div
                    class="flex flex-col min-w-0 transition-all duration-300"
                    style:width=move || format!("{}%", layout.get().chat_pct)
                >
                    <MessageLog messages=messages pending=pending on_open=open_citation />
                    <FollowUpButtons questions=follow_ups on_pick=pick_follow_up />
                    <div class="p-4 bg-white border-t border-gray-200">
                        <div class="flex space-x-3">
                            <input
                                type="text"
                                class="flex-1 px-4 py-2 border border-gray-300 rounded-lg
                                focus:outline-none focus:ring-2 focus:ring-blue-500
                                disabled:bg-gray-100"
                                placeholder="Ask about the semiconductor industry..."
                                node_ref=input_ref
                                prop:value=input
                                on:input=move |ev| set_input.set(event_target_value(&ev))
                                on:keydown=handle_key_press
                                prop:disabled=pending
                            />
                            <button
                                class="px-6 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700
                                transition-colors disabled:bg-gray-400 disabled:cursor-not-allowed"
                                on:click=move |_| submit.run(input.get())
                                prop:disabled=move || {
                                    pending.get() || input.get().trim().is_empty()
                                }
                            >
                                "Send"
                            </button>
                        </div>
                    </div>
                </div>
                {move || {
                    layout.get()
                        .visible
                        .then(|| {
                            view! {
                                <div
                                    class="w-1 shrink-0 cursor-col-resize bg-gray-300 hover:bg-gray-400"
                                    on:mousedown=start_drag
                                ></div>
                                <div
                                    class="min-w-0 transition-all duration-300"
                                    style:width=move || format!("{}%", layout.get().viewer_pct)
                                >
                                    <ViewerPanel url=viewer_url on_close=close_viewer />
                                </div>
                            }
                        })
                }}
            </div>
        </div>
    }
}

fn now_label() -> String {
    js_sys::Date::new_0().to_locale_time_string("en-US").into()
}
