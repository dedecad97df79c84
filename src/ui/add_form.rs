use crate::app::AppState;
use dioxus::prelude::*;

#[component]
pub fn AddQuoteForm() -> Element {
    let app_state = use_context::<AppState>();
    let mut text = use_signal(String::new);
    let mut category = use_signal(String::new);

    let handle_add = move |_: MouseEvent| {
        let result = app_state
            .controller
            .lock()
            .expect("controller mutex poisoned")
            .add_quote(&text(), &category());

        match result {
            Ok(quote) => {
                let mut current_quote = app_state.current_quote;
                current_quote.set(Some(quote));
                text.set(String::new());
                category.set(String::new());
                app_state.refresh();
                app_state.notify("New quote added and displayed!");
            }
            Err(e) => app_state.report_error("Failed to add quote", &e),
        }
    };

    rsx! {
        div {
            class: "card",

            h3 { "Add a quote" }

            div {
                class: "row",
                input {
                    r#type: "text",
                    placeholder: "Enter a new quote",
                    value: "{text}",
                    oninput: move |evt| text.set(evt.value()),
                }
                input {
                    r#type: "text",
                    placeholder: "Enter quote category",
                    value: "{category}",
                    oninput: move |evt| category.set(evt.value()),
                }
                button {
                    onclick: handle_add,
                    "Add Quote"
                }
            }
        }
    }
}
