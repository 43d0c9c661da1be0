//! Search session: controller plus remote client
//!
//! This module provides the high-level API a front end talks to. Each
//! operation applies a controller transition, performs the fetch it asked
//! for (if any) without holding the lock, resolves the outcome and returns
//! a fresh [`ViewModel`]. Fetches overtaken by newer navigation resolve as
//! stale and never change what is on screen.

use tokio::sync::Mutex;
use tracing::debug;

use crate::client::TmdbClient;
use crate::config::ClientConfig;
use crate::controller::{Notice, Resolution, SearchController};
use crate::error::Result;
use crate::types::QueryKey;
use crate::view::ViewModel;

/// Main search API
///
/// # Example
/// ```no_run
/// use moviesearch_core::SearchSession;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let session = SearchSession::new()?;
///
///     let view = session.submit_query("batman").await;
///     println!("{} movies on page {}", view.movies.len(), view.page);
///
///     Ok(())
/// }
/// ```
pub struct SearchSession {
    client: TmdbClient,
    controller: Mutex<SearchController>,
}

impl SearchSession {
    /// Create a session from environment configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Create a session with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let controller = SearchController::from_config(&config);
        let client = TmdbClient::with_config(config)?;
        Ok(Self {
            client,
            controller: Mutex::new(controller),
        })
    }

    /// Submit search text.
    pub async fn submit_query(&self, text: &str) -> ViewModel {
        let request = self.controller.lock().await.submit_query(text);
        self.run(request).await
    }

    /// Jump to a page (paged mode).
    ///
    /// # Errors
    /// `ModeMismatch` in load-more mode, `InvalidPage` outside the pagination bound.
    pub async fn go_to_page(&self, page: u32) -> Result<ViewModel> {
        let request = self.controller.lock().await.go_to_page(page)?;
        Ok(self.run(request).await)
    }

    /// Advance one page (paged mode).
    pub async fn next_page(&self) -> Result<ViewModel> {
        let request = self.controller.lock().await.next_page()?;
        Ok(self.run(request).await)
    }

    /// Go back one page (paged mode).
    pub async fn previous_page(&self) -> Result<ViewModel> {
        let request = self.controller.lock().await.previous_page()?;
        Ok(self.run(request).await)
    }

    /// Append the next page (load-more mode).
    pub async fn load_more(&self) -> Result<ViewModel> {
        let request = self.controller.lock().await.load_more()?;
        Ok(self.run(request).await)
    }

    /// Refetch the current page after a failure.
    pub async fn retry(&self) -> ViewModel {
        let request = self.controller.lock().await.retry();
        self.run(request).await
    }

    /// Open the detail overlay for a visible movie.
    pub async fn select_movie(&self, movie_id: u64) -> ViewModel {
        let mut controller = self.controller.lock().await;
        controller.select(movie_id);
        ViewModel::from_controller(&controller)
    }

    /// Close the detail overlay.
    pub async fn close_movie(&self) -> ViewModel {
        let mut controller = self.controller.lock().await;
        controller.dismiss();
        ViewModel::from_controller(&controller)
    }

    /// Current view without changing any state.
    pub async fn view(&self) -> ViewModel {
        ViewModel::from_controller(&*self.controller.lock().await)
    }

    /// Drain pending notices (e.g. "no results").
    pub async fn take_notices(&self) -> Vec<Notice> {
        self.controller.lock().await.take_notices()
    }

    async fn run(&self, request: Option<QueryKey>) -> ViewModel {
        if let Some(key) = request {
            let outcome = self.client.fetch_page(&key.query, key.page).await;
            let mut controller = self.controller.lock().await;
            if controller.resolve(&key, outcome) == Resolution::Stale {
                debug!(query = %key.query, page = key.page, "fetch superseded");
            }
            return ViewModel::from_controller(&controller);
        }
        self.view().await
    }
}
