//! Movie Search Tauri Integration
//!
//! This crate provides Tauri commands that drive a [`SearchSession`] from a
//! webview front end. Every command returns the full [`ViewModel`] to render.
//!
//! # Usage
//!
//! ```rust,ignore
//! use moviesearch_tauri::SessionState;
//! use tauri::Manager;
//!
//! fn main() {
//!     moviesearch_tauri::init_tracing();
//!     tauri::Builder::default()
//!         .setup(|app| {
//!             app.manage(SessionState::new()?);
//!             Ok(())
//!         })
//!         .invoke_handler(tauri::generate_handler![
//!             moviesearch_tauri::commands::search_movies,
//!             moviesearch_tauri::commands::go_to_page,
//!             moviesearch_tauri::commands::next_page,
//!             moviesearch_tauri::commands::previous_page,
//!             moviesearch_tauri::commands::load_more,
//!             moviesearch_tauri::commands::retry_search,
//!             moviesearch_tauri::commands::select_movie,
//!             moviesearch_tauri::commands::close_movie,
//!             moviesearch_tauri::commands::current_view,
//!             moviesearch_tauri::commands::take_notices,
//!         ])
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! # Commands
//! - `search_movies` - Submit search text
//! - `go_to_page` / `next_page` / `previous_page` - Paged navigation
//! - `load_more` - Append the next page
//! - `retry_search` - Refetch after a failure
//! - `select_movie` / `close_movie` - Detail overlay
//! - `current_view` - Current view model
//! - `take_notices` - Pending toast notifications

pub mod commands;

use std::sync::Arc;

use moviesearch_core::{ClientConfig, SearchSession};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Shared search session managed by Tauri.
///
/// The session serializes state changes internally, so commands share it
/// through an `Arc` without an outer lock.
pub struct SessionState {
    session: Arc<SearchSession>,
}

impl SessionState {
    /// Create a SessionState from environment configuration.
    ///
    /// # Errors
    /// Returns an error string if the session cannot be created.
    pub fn new() -> Result<Self, String> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Create a SessionState with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, String> {
        info!(mode = %config.mode, base_url = %config.base_url, "starting search session");
        let session = SearchSession::with_config(config).map_err(|e| e.to_string())?;
        Ok(Self {
            session: Arc::new(session),
        })
    }

    /// Get a reference to the inner session.
    pub fn session(&self) -> &Arc<SearchSession> {
        &self.session
    }
}

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
