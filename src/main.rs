use dioxus::desktop::{Config, WindowBuilder};
use quotedeck::app::App;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting QuoteDeck {}", env!("CARGO_PKG_VERSION"));

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title("QuoteDeck")
                    .with_resizable(true),
            ),
        )
        .launch(App);
}
