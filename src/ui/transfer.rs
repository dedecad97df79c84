//! Export and import controls

use crate::app::AppState;
use crate::book::transfer::read_import_file;
use dioxus::prelude::*;
use std::path::PathBuf;

#[component]
pub fn TransferControls() -> Element {
    let app_state = use_context::<AppState>();
    let default_dir = app_state
        .data_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();
    let mut export_dir = use_signal(move || default_dir);
    let mut import_path = use_signal(String::new);

    let handle_export = {
        let app_state = app_state.clone();
        move |_: MouseEvent| {
            let dir = export_dir().trim().to_string();
            if dir.is_empty() {
                app_state.notify("Enter a folder to export into");
                return;
            }

            let result = app_state
                .controller
                .lock()
                .expect("controller mutex poisoned")
                .export_to_dir(&PathBuf::from(dir));

            match result {
                Ok(path) => app_state.notify(format!("Exported quotes to {}", path.display())),
                Err(e) => app_state.report_error("Failed to export quotes", &e),
            }
        }
    };

    let handle_import = {
        let app_state = app_state.clone();
        move |_: MouseEvent| {
            let path = import_path().trim().to_string();
            if path.is_empty() {
                app_state.notify("Enter the path of a JSON file to import");
                return;
            }

            let app_state = app_state.clone();
            let mut import_path = import_path;
            spawn(async move {
                let quotes = match read_import_file(&PathBuf::from(&path)).await {
                    Ok(quotes) => quotes,
                    Err(e) => {
                        app_state.report_error("Failed to import quotes", &e);
                        return;
                    }
                };

                let result = app_state
                    .controller
                    .lock()
                    .expect("controller mutex poisoned")
                    .merge_quotes(quotes);

                match result {
                    Ok(report) => {
                        tracing::info!("Imported {}: {}", path, report);
                        import_path.set(String::new());
                        app_state.refresh();
                        app_state.notify(format!("Quotes imported successfully: {}", report));
                    }
                    Err(e) => app_state.report_error("Failed to import quotes", &e),
                }
            });
        }
    };

    rsx! {
        div {
            class: "card",

            h3 { "Import / Export" }

            div {
                class: "row",
                input {
                    r#type: "text",
                    placeholder: "Export folder",
                    value: "{export_dir}",
                    oninput: move |evt| export_dir.set(evt.value()),
                }
                button {
                    onclick: handle_export,
                    "Export Quotes"
                }
            }

            div {
                class: "row",
                style: "margin-top: 8px;",
                input {
                    r#type: "text",
                    placeholder: "Path to a quotes .json file",
                    value: "{import_path}",
                    oninput: move |evt| import_path.set(evt.value()),
                }
                button {
                    class: "secondary",
                    onclick: handle_import,
                    "Import Quotes"
                }
            }
        }
    }
}
