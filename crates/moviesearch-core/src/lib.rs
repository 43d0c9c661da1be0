//! Movie Search Core Library
//!
//! This crate provides the search client and state controller behind a
//! movie search front end backed by The Movie Database (TMDB).
//!
//! # Features
//! - Fetch pages of movie search results from TMDB
//! - Query cache keyed by (query, page) with stale-result discarding
//! - Paged or "load more" presentation, chosen per deployment
//! - Renderable view model: loader, error, grid, pagination, detail overlay

pub mod cache;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod types;
pub mod view;

// Re-export main types for convenience
pub use cache::{CacheEntry, FetchStatus, QueryCache};
pub use client::TmdbClient;
pub use config::{ClientConfig, PaginationMode};
pub use controller::{Notice, QueryStatus, Resolution, SearchController};
pub use error::{MovieSearchError, Result};
pub use session::SearchSession;
pub use types::{MovieSummary, QueryKey, ResultPage, MAX_PAGES};
pub use view::{LoadMoreControl, MovieCard, MovieDetail, PageItem, PaginationControl, ViewModel};
