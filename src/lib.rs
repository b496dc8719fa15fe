pub mod assistant;
pub mod chat;
pub mod config;
pub mod console;
pub mod errors;
pub mod guide;
pub mod surface;
pub mod tour;

use std::path::PathBuf;

use crate::chat::session::ChatSession;
use crate::config::AppConfig;
use crate::console::Console;
use crate::errors::{GuideError, GuideResult};
use crate::surface::tree::UiTree;

/// Binary entry point: `uiguide <page.json>`.
pub async fn run() -> GuideResult<()> {
    // Load .env file if present (ignore error if not found)
    let _ = dotenvy::dotenv();

    let loaded = config::load_config();
    let default_filter = loaded
        .as_ref()
        .map(|cfg| cfg.log_filter.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load config; using defaults");
            AppConfig::default()
        }
    };

    let page_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| GuideError::Config("usage: uiguide <page.json>".into()))?;
    let page = UiTree::load(&page_path)?;

    let chat = ChatSession::from_config(&config);
    tracing::info!(session = %chat.session_id(), "chat session started");

    Console::new(chat, page).run().await
}
