use leptos::leptos_dom::helpers::IntervalHandle;
use leptos::prelude::*;
use std::time::Duration;

use crate::api;
use crate::config::ChatConfig;
use crate::types::ConnectivityStatus;

/// Colored dot reporting whether the search backend is reachable. Polls the
/// status endpoint on an interval; a failed poll renders as disconnected
/// rather than killing the loop.
#[component]
pub fn StatusBulb() -> impl IntoView {
    let config = expect_context::<ChatConfig>();
    let (status, set_status) = signal(ConnectivityStatus::default());

    let status_url = config.status_url.clone();
    let poll = move || {
        let url = status_url.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_status(&url).await {
                Ok(latest) => set_status.set(latest),
                Err(e) => {
                    log::warn!("status poll failed: {}", e);
                    set_status.set(ConnectivityStatus {
                        status: "Disconnected".to_string(),
                    });
                }
            }
        });
    };

    let every = Duration::from_millis(config.status_poll_interval_ms);
    let interval_handle: StoredValue<Option<IntervalHandle>> = StoredValue::new(None);

    Effect::new(move |_| {
        if let Some(handle) = interval_handle.get_value() {
            handle.clear();
        }
        poll();
        let handle =
            set_interval_with_handle(poll.clone(), every).expect("Failed to set interval");
        interval_handle.set_value(Some(handle));
    });

    on_cleanup(move || {
        if let Some(handle) = interval_handle.get_value() {
            handle.clear();
        }
    });

    view! {
        <span
            class=move || {
                format!(
                    "inline-block w-3 h-3 rounded-full {}",
                    if status.get().is_connected() { "bg-green-500" } else { "bg-red-500" },
                )
            }
            title=move || status.get().status
        ></span>
    }
}
