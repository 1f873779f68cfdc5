//! Terminal front end for the Productos AMMA manager.
//!
//! # Overview
//! Drives `amma_core::ProductScreen` in a ratatui event loop. The core
//! decides what to request and how outcomes change the screen; this crate
//! supplies the terminal, the keystrokes, and the HTTP execution (each
//! request on its own thread, reporting back over a channel).
//!
//! Logs go to a file under the system temp directory; the terminal itself
//! belongs to the UI while the application runs.

pub mod app;
pub mod transport;
pub mod ui;

use std::fs::File;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use app::App;

const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Entry point: configure logging, resolve the API base URL, run the app.
pub fn run() -> Result<()> {
    init_logging()?;
    let base_url = std::env::var("AMMA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    tracing::info!(%base_url, "starting");
    App::new(&base_url).run()
}

fn init_logging() -> Result<()> {
    let path = std::env::temp_dir().join("amma-tui.log");
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
