//! Data types for movie search
//!
//! This module contains the core data structures used throughout the library.
//! All types implement Serialize and Deserialize for JSON compatibility with Tauri.

use serde::{Deserialize, Serialize};

/// Hard ceiling on navigable pages imposed by the TMDB search endpoint
pub const MAX_PAGES: u32 = 500;

/// Base URL for TMDB image assets
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Movie item as returned by the TMDB search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Unique TMDB identifier
    pub id: u64,
    /// Localized title
    pub title: String,
    /// Title in the original language
    #[serde(default)]
    pub original_title: Option<String>,
    /// Plot overview (may be empty)
    #[serde(default)]
    pub overview: String,
    /// Poster image path (e.g. "/abc.jpg")
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD, sometimes empty)
    #[serde(default)]
    pub release_date: Option<String>,
    /// Average vote (0.0 - 10.0)
    #[serde(default)]
    pub vote_average: f64,
    /// Number of votes
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score
    #[serde(default)]
    pub popularity: f64,
    /// Original language (ISO 639-1)
    #[serde(default)]
    pub original_language: Option<String>,
    /// Genre IDs
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag
    #[serde(default)]
    pub adult: bool,
}

impl MovieSummary {
    /// Absolute poster URL for the given size (e.g. "w500"), if the movie has one.
    ///
    /// # Example
    /// ```
    /// use moviesearch_core::MovieSummary;
    ///
    /// let movie: MovieSummary =
    ///     serde_json::from_str(r#"{"id": 1, "title": "Heat", "poster_path": "/heat.jpg"}"#)
    ///         .unwrap();
    /// assert_eq!(
    ///     movie.poster_url("w500").as_deref(),
    ///     Some("https://image.tmdb.org/t/p/w500/heat.jpg")
    /// );
    /// ```
    pub fn poster_url(&self, size: &str) -> Option<String> {
        image_url(self.poster_path.as_deref(), size)
    }

    /// Absolute backdrop URL for the given size (e.g. "original").
    pub fn backdrop_url(&self, size: &str) -> Option<String> {
        image_url(self.backdrop_path.as_deref(), size)
    }

    /// Release year taken from `release_date`.
    pub fn release_year(&self) -> Option<u16> {
        let date = self.release_date.as_deref()?;
        date.get(..4)?.parse().ok()
    }
}

fn image_url(path: Option<&str>, size: &str) -> Option<String> {
    match path {
        Some(path) if !path.is_empty() => Some(format!("{}/{}{}", IMAGE_BASE_URL, size, path)),
        _ => None,
    }
}

/// One fetched batch of movies plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Page number this batch belongs to (1-based)
    pub page: u32,
    /// Movies on this page, in remote order
    pub items: Vec<MovieSummary>,
    /// Total pages reported by the remote service
    pub total_pages: u32,
    /// Total matching movies reported by the remote service
    pub total_results: u32,
}

impl ResultPage {
    /// Create a new result page
    pub fn new(page: u32, items: Vec<MovieSummary>, total_pages: u32, total_results: u32) -> Self {
        Self {
            page,
            items,
            total_pages,
            total_results,
        }
    }

    /// Create an empty first page
    pub fn empty() -> Self {
        Self::new(1, Vec::new(), 0, 0)
    }

    /// Number of pages a pagination control may offer.
    pub fn page_count(&self) -> u32 {
        self.total_pages.min(MAX_PAGES)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cache key: one entry per (query, page) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    pub query: String,
    pub page: u32,
}

impl QueryKey {
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page,
        }
    }
}
