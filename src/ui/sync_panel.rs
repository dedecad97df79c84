use crate::app::AppState;
use dioxus::prelude::*;

/// Manual sync, auto-sync toggle and last sync status
#[component]
pub fn SyncPanel() -> Element {
    let app_state = use_context::<AppState>();
    let status = app_state.sync_status.read().label();
    let running = app_state.auto_sync_running();
    let (endpoint, interval) = {
        let config = app_state.config.read();
        (config.endpoint.clone(), config.sync_interval_secs)
    };
    let available = app_state.remote.is_some();

    let app_state_sync = app_state.clone();
    let app_state_toggle = app_state.clone();

    rsx! {
        div {
            class: "card",

            h3 { "Server sync" }

            p { class: "muted", "{status}" }

            div {
                class: "row",
                button {
                    disabled: !available,
                    onclick: move |_| app_state_sync.sync_now(),
                    "Sync now"
                }
                button {
                    class: "secondary",
                    disabled: !available,
                    onclick: move |_| {
                        let enabled = !app_state_toggle.auto_sync_running();
                        app_state_toggle.set_auto_sync(enabled);
                    },
                    if running { "Pause auto-sync" } else { "Resume auto-sync" }
                }
            }

            p {
                class: "muted",
                if running {
                    "Auto-sync every {interval}s with {endpoint}"
                } else {
                    "Auto-sync paused"
                }
            }
        }
    }
}
