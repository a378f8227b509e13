// The desktop page; the browser front end is the library's `web` module
#[cfg(not(target_arch = "wasm32"))]
mod ui;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> iced::Result {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("portfolio_images=info")),
        )
        .init();

    ui::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
