use crate::app::AppState;
use dioxus::prelude::*;

/// Category select; the choice is persisted and narrows random picks
#[component]
pub fn CategoryFilter() -> Element {
    let app_state = use_context::<AppState>();
    // Subscribe to collection changes so new categories show up
    let _revision = *app_state.revision.read();

    let (categories, selected) = {
        let controller = app_state.controller.lock().expect("controller mutex poisoned");
        (
            controller.book().categories(),
            controller.book().selected_category().to_string(),
        )
    };

    let on_change = {
        let app_state = app_state.clone();
        move |evt: FormEvent| {
            let category = evt.value();
            let result = app_state
                .controller
                .lock()
                .expect("controller mutex poisoned")
                .select_category(&category);

            match result {
                Ok(()) => {
                    app_state.show_current_or_random();
                    app_state.refresh();
                }
                Err(e) => app_state.report_error("Failed to change category", &e),
            }
        }
    };

    rsx! {
        div {
            class: "card",

            h3 { "Filter by category" }

            select {
                value: "{selected}",
                onchange: on_change,
                for category in categories {
                    option {
                        key: "{category}",
                        value: "{category}",
                        selected: category == selected,
                        if category == crate::types::ALL_CATEGORIES { "All Categories" } else { "{category}" }
                    }
                }
            }
        }
    }
}

/// Every quote in the active category
#[component]
pub fn FilteredQuotes() -> Element {
    let app_state = use_context::<AppState>();
    let _revision = *app_state.revision.read();

    let (quotes, selected) = {
        let controller = app_state.controller.lock().expect("controller mutex poisoned");
        let quotes: Vec<_> = controller.book().filtered().into_iter().cloned().collect();
        (quotes, controller.book().selected_category().to_string())
    };
    let count = quotes.len();

    rsx! {
        div {
            class: "card",

            h3 { "Quotes in \"{selected}\" ({count})" }

            if quotes.is_empty() {
                p { class: "muted", "No quotes in this category yet." }
            } else {
                ul {
                    class: "quotes",
                    for (index, quote) in quotes.into_iter().enumerate() {
                        li {
                            key: "{index}",
                            "{quote.text} "
                            span { class: "muted", "({quote.category})" }
                        }
                    }
                }
            }
        }
    }
}
