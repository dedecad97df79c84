//! UI components for QuoteDeck
//!
//! This module contains all user interface components built with Dioxus.

#![allow(non_snake_case)]

pub mod add_form;
pub mod category_filter;
pub mod quote_display;
pub mod sync_panel;
pub mod transfer;

use crate::app::{AppState, NoticeKind};
use crate::ui::add_form::AddQuoteForm;
use crate::ui::category_filter::{CategoryFilter, FilteredQuotes};
use crate::ui::quote_display::QuoteDisplay;
use crate::ui::sync_panel::SyncPanel;
use crate::ui::transfer::TransferControls;
use dioxus::prelude::*;

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #14161a; color: #f2ede7; }
.page { max-width: 760px; margin: 0 auto; padding: 24px; display: flex; flex-direction: column; gap: 16px; }
.card { padding: 16px 20px; border-radius: 14px; background: rgba(242,237,231,0.04); border: 1px solid rgba(242,237,231,0.08); }
.card h3 { margin: 0 0 12px 0; font-size: 15px; }
.row { display: flex; gap: 8px; align-items: center; flex-wrap: wrap; }
input, select { flex: 1; min-width: 160px; padding: 8px 10px; border-radius: 8px; border: 1px solid rgba(242,237,231,0.15); background: transparent; color: inherit; }
button { padding: 8px 14px; border-radius: 8px; border: none; background: #2a6b7c; color: #f2ede7; cursor: pointer; }
button.secondary { background: rgba(242,237,231,0.08); }
.quote-text { font-size: 20px; line-height: 1.4; margin: 0 0 8px 0; }
.muted { opacity: 0.6; font-size: 13px; }
.notice { padding: 10px 14px; border-radius: 10px; font-size: 14px; }
.notice.info { background: rgba(42,107,124,0.25); }
.notice.error { background: rgba(200,60,60,0.25); }
ul.quotes { margin: 0; padding-left: 18px; display: flex; flex-direction: column; gap: 6px; }
"#;

pub fn Layout() -> Element {
    let app_state = use_context::<AppState>();
    let notice = app_state.notice.read().clone();

    rsx! {
        style { "{STYLE}" }
        div {
            class: "page",

            h2 { "Dynamic Quote Generator" }

            if let Some(notice) = notice {
                div {
                    class: match notice.kind {
                        NoticeKind::Info => "notice info",
                        NoticeKind::Error => "notice error",
                    },
                    "{notice.message}"
                }
            }

            QuoteDisplay {}
            CategoryFilter {}
            AddQuoteForm {}
            TransferControls {}
            SyncPanel {}
            FilteredQuotes {}
        }
    }
}
