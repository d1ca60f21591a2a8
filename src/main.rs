//! Audioshelf - Audiobook Shelf
//!
//! This is the main entry point for the Audioshelf application.
//! It installs logging, initializes Libadwaita and starts the main loop.

use {
    anyhow::{Context, Result},
    audioshelf::ui::AudioshelfApplication,
    tracing_subscriber::EnvFilter,
};

/// Default log filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "audioshelf=info";

/// Main entry point for the Audioshelf application.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    libadwaita::init().context("Failed to initialize Libadwaita")?;

    let app = AudioshelfApplication::new()
        .await
        .context("Failed to start Audioshelf")?;
    app.run();

    Ok(())
}
