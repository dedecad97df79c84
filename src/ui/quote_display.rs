use crate::app::AppState;
use dioxus::prelude::*;

/// Current quote plus the "Show New Quote" button
#[component]
pub fn QuoteDisplay() -> Element {
    let app_state = use_context::<AppState>();
    let current = app_state.current_quote.read().clone();

    rsx! {
        div {
            class: "card",

            match current {
                Some(quote) => rsx! {
                    p { class: "quote-text", "\"{quote.text}\"" }
                    p { class: "muted", "Category: {quote.category}" }
                },
                None => rsx! {
                    p { class: "muted", "No quotes available for this category." }
                },
            }

            div {
                class: "row",
                button {
                    onclick: move |_| app_state.show_random(),
                    "Show New Quote"
                }
            }
        }
    }
}
