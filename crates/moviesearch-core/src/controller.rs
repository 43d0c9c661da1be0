//! Query/pagination state controller
//!
//! [`SearchController`] owns the search text, the current page, the query
//! cache and the data currently on screen. Every state change is an explicit
//! method call; methods that need remote data return the [`QueryKey`] to
//! fetch, and the caller reports the outcome through [`SearchController::resolve`].
//!
//! The controller never performs I/O itself, which keeps it synchronous and
//! lets [`crate::session::SearchSession`] drop its lock while a fetch is pending.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cache::{FetchStatus, QueryCache};
use crate::config::{ClientConfig, PaginationMode};
use crate::error::{MovieSearchError, Result};
use crate::types::{MovieSummary, QueryKey, ResultPage};

/// Observable state of the current (query, page) key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    /// No search active, nothing fetched
    Idle,
    /// Fetch in flight, no data yet for this key
    Loading,
    /// Data present for this key
    Ready,
    /// Last fetch for this key failed
    Errored,
}

/// Transient message for the user, consumed once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A search resolved with no matching movies
    NoResults { query: String },
}

/// What `resolve` did with a fetch outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The outcome belongs to the current key and is now visible
    Applied,
    /// The user moved on; the outcome was only cached
    Stale,
}

/// State machine over search text, page and fetched results
#[derive(Debug)]
pub struct SearchController {
    mode: PaginationMode,
    query: String,
    page: u32,
    cache: QueryCache,
    /// Last page applied to the screen, kept while newer data loads
    displayed: Option<(QueryKey, ResultPage)>,
    /// Results gathered by "load more" for the current query
    accumulated: Vec<MovieSummary>,
    selected: Option<MovieSummary>,
    notices: VecDeque<Notice>,
}

impl SearchController {
    /// Create an idle controller.
    ///
    /// # Arguments
    /// * `mode` - Paged or load-more presentation, fixed for the controller's lifetime
    /// * `cache_ttl` - How long fetched pages are served from the cache
    pub fn new(mode: PaginationMode, cache_ttl: Duration) -> Self {
        Self {
            mode,
            query: String::new(),
            page: 1,
            cache: QueryCache::new(cache_ttl),
            displayed: None,
            accumulated: Vec::new(),
            selected: None,
            notices: VecDeque::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.mode, config.cache_ttl())
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    /// Current search text; empty when no search is active
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current page (1-based)
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Key of the data the screen should show, `None` while idle
    pub fn current_key(&self) -> Option<QueryKey> {
        if self.query.is_empty() {
            None
        } else {
            Some(QueryKey::new(self.query.clone(), self.page))
        }
    }

    /// Submit search text from the search box.
    ///
    /// Returns the key to fetch, or `None` when nothing needs fetching:
    /// the text equals the current query, the text is blank (search cleared),
    /// the page is cached, or the same key is already in flight.
    pub fn submit_query(&mut self, text: &str) -> Option<QueryKey> {
        let query = text.trim();
        if query == self.query {
            debug!(%query, "identical query ignored");
            return None;
        }

        self.query = query.to_string();
        self.page = 1;
        self.accumulated.clear();
        if self.mode == PaginationMode::LoadMore || query.is_empty() {
            self.displayed = None;
        }

        if query.is_empty() {
            info!("search cleared");
            return None;
        }

        let evicted = self.cache.evict_expired();
        if evicted > 0 {
            debug!(evicted, "expired cache entries dropped");
        }

        info!(%query, "new search");
        self.request(QueryKey::new(query, 1))
    }

    /// Jump to a page (paged mode).
    ///
    /// # Errors
    /// - `MovieSearchError::ModeMismatch` in load-more mode
    /// - `MovieSearchError::InvalidPage` for page 0 or pages past the pagination bound
    ///
    /// No-op until the current query has data, since its bound is unknown.
    pub fn go_to_page(&mut self, page: u32) -> Result<Option<QueryKey>> {
        self.require_mode(PaginationMode::Paged, "go_to_page")?;
        if page == 0 {
            return Err(MovieSearchError::InvalidPage(page));
        }
        let Some(limit) = self.current_data().map(ResultPage::page_count) else {
            debug!(page, "no data for the current query yet, navigation ignored");
            return Ok(None);
        };
        if page > limit {
            warn!(page, limit, "page out of range");
            return Err(MovieSearchError::InvalidPage(page));
        }
        if page == self.page {
            return Ok(None);
        }

        self.page = page;
        Ok(self.request(QueryKey::new(self.query.clone(), page)))
    }

    /// Advance one page (paged mode); no-op on the last page.
    pub fn next_page(&mut self) -> Result<Option<QueryKey>> {
        self.require_mode(PaginationMode::Paged, "next_page")?;
        match self.current_data() {
            Some(data) if self.page < data.page_count() => self.go_to_page(self.page + 1),
            _ => Ok(None),
        }
    }

    /// Go back one page (paged mode); no-op on the first page.
    pub fn previous_page(&mut self) -> Result<Option<QueryKey>> {
        self.require_mode(PaginationMode::Paged, "previous_page")?;
        if self.page <= 1 {
            return Ok(None);
        }
        self.go_to_page(self.page - 1)
    }

    /// Request the next page to append (load-more mode).
    ///
    /// No-op while a fetch is in flight or when the last page is reached.
    /// After a failed fetch the failed page is requested again.
    ///
    /// # Errors
    /// - `MovieSearchError::ModeMismatch` in paged mode
    pub fn load_more(&mut self) -> Result<Option<QueryKey>> {
        self.require_mode(PaginationMode::LoadMore, "load_more")?;
        match self.status() {
            QueryStatus::Idle | QueryStatus::Loading => Ok(None),
            QueryStatus::Errored => Ok(self.retry()),
            QueryStatus::Ready if !self.has_more() => Ok(None),
            QueryStatus::Ready => {
                self.page += 1;
                Ok(self.request(QueryKey::new(self.query.clone(), self.page)))
            }
        }
    }

    /// Fetch the current key again after a failure.
    pub fn retry(&mut self) -> Option<QueryKey> {
        if self.status() != QueryStatus::Errored {
            return None;
        }
        let key = self.current_key()?;
        info!(query = %key.query, page = key.page, "retrying search");
        self.request(key)
    }

    /// Record the outcome of a fetch started for `key`.
    ///
    /// The cache is always updated. Visible state changes only when `key` is
    /// still the current key; outcomes for keys the user has left are stale.
    pub fn resolve(&mut self, key: &QueryKey, outcome: Result<ResultPage>) -> Resolution {
        let current = self.current_key().as_ref() == Some(key);

        match outcome {
            Ok(page) => {
                self.cache.complete(key.clone(), page.clone());
                if !current {
                    debug!(query = %key.query, page = key.page, "stale result cached");
                    return Resolution::Stale;
                }

                let empty = page.is_empty();
                self.apply(key.clone(), page);
                if empty && key.page == 1 {
                    info!(query = %key.query, "search returned no results");
                    self.notices.push_back(Notice::NoResults {
                        query: key.query.clone(),
                    });
                }
                Resolution::Applied
            }
            Err(e) => {
                self.cache.fail(key.clone(), e.to_string());
                if !current {
                    debug!(query = %key.query, page = key.page, error = %e, "stale failure cached");
                    return Resolution::Stale;
                }
                warn!(query = %key.query, page = key.page, error = %e, "search failed");
                Resolution::Applied
            }
        }
    }

    /// Observable state of the current key
    pub fn status(&self) -> QueryStatus {
        let Some(key) = self.current_key() else {
            return QueryStatus::Idle;
        };
        match self.cache.get(&key).map(|entry| entry.status) {
            Some(FetchStatus::Loading) => QueryStatus::Loading,
            Some(FetchStatus::Success) => QueryStatus::Ready,
            Some(FetchStatus::Error) => QueryStatus::Errored,
            None if self.displayed_key() == Some(&key) => QueryStatus::Ready,
            None => QueryStatus::Idle,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.status() == QueryStatus::Loading
    }

    /// Error message of the current key, if its last fetch failed
    pub fn error(&self) -> Option<&str> {
        let key = self.current_key()?;
        let entry = self.cache.get(&key)?;
        match entry.status {
            FetchStatus::Error => entry.error.as_deref(),
            _ => None,
        }
    }

    /// Movies to render: the accumulated list in load-more mode, the displayed
    /// page otherwise. Empty while idle or errored.
    pub fn visible_movies(&self) -> &[MovieSummary] {
        match self.status() {
            QueryStatus::Idle | QueryStatus::Errored => &[],
            QueryStatus::Loading | QueryStatus::Ready => match self.mode {
                PaginationMode::LoadMore => &self.accumulated,
                PaginationMode::Paged => self
                    .displayed
                    .as_ref()
                    .map(|(_, page)| page.items.as_slice())
                    .unwrap_or(&[]),
            },
        }
    }

    /// Page bound offered to the user: `min(total_pages, 500)`, 0 when nothing is shown
    pub fn page_count(&self) -> u32 {
        match self.status() {
            QueryStatus::Idle | QueryStatus::Errored => 0,
            _ => self.current_data().map(ResultPage::page_count).unwrap_or(0),
        }
    }

    /// Total matches reported for the current query
    pub fn total_results(&self) -> u32 {
        match self.status() {
            QueryStatus::Idle | QueryStatus::Errored => 0,
            _ => self.current_data().map(|page| page.total_results).unwrap_or(0),
        }
    }

    /// Whether another page can be appended (load-more mode)
    pub fn has_more(&self) -> bool {
        self.current_data().is_some_and(|page| self.page < page.page_count())
    }

    /// Open the detail overlay for a visible movie.
    ///
    /// Returns `None` and leaves the selection unchanged when no visible movie
    /// has this id.
    pub fn select(&mut self, movie_id: u64) -> Option<&MovieSummary> {
        let movie = self
            .visible_movies()
            .iter()
            .find(|movie| movie.id == movie_id)
            .cloned();
        match movie {
            Some(movie) => {
                debug!(movie_id, title = %movie.title, "movie selected");
                self.selected = Some(movie);
                self.selected.as_ref()
            }
            None => {
                warn!(movie_id, "selected movie is not on screen");
                None
            }
        }
    }

    /// Close the detail overlay. Query and page are left untouched.
    pub fn dismiss(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&MovieSummary> {
        self.selected.as_ref()
    }

    /// Drain pending notices in the order they were raised.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    fn require_mode(&self, mode: PaginationMode, operation: &'static str) -> Result<()> {
        if self.mode == mode {
            Ok(())
        } else {
            Err(MovieSearchError::ModeMismatch {
                operation,
                mode: self.mode,
            })
        }
    }

    fn displayed_key(&self) -> Option<&QueryKey> {
        self.displayed.as_ref().map(|(key, _)| key)
    }

    /// Displayed page, if it belongs to the current query
    fn current_data(&self) -> Option<&ResultPage> {
        match &self.displayed {
            Some((key, page)) if key.query == self.query => Some(page),
            _ => None,
        }
    }

    /// Serve `key` from the cache or mark it as in flight.
    fn request(&mut self, key: QueryKey) -> Option<QueryKey> {
        let cached = self
            .cache
            .fresh(&key)
            .map(|entry| (entry.is_loading(), entry.success().cloned()));

        match cached {
            Some((true, _)) => {
                debug!(query = %key.query, page = key.page, "request already in flight");
                None
            }
            Some((false, Some(page))) => {
                debug!(query = %key.query, page = key.page, "served from cache");
                self.apply(key, page);
                None
            }
            _ => {
                self.cache.begin(key.clone());
                Some(key)
            }
        }
    }

    fn apply(&mut self, key: QueryKey, page: ResultPage) {
        if self.mode == PaginationMode::LoadMore {
            if key.page <= 1 {
                self.accumulated = page.items.clone();
            } else {
                let fresh: Vec<MovieSummary> = page
                    .items
                    .iter()
                    .filter(|movie| !self.accumulated.iter().any(|seen| seen.id == movie.id))
                    .cloned()
                    .collect();
                self.accumulated.extend(fresh);
            }
        }
        self.displayed = Some((key, page));
    }
}
