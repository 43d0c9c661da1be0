//! HTTP client for the TMDB movie search endpoint
//!
//! One GET per (query, page). The client neither retries nor validates page
//! numbers; memoization and pagination bounds belong to the controller.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{MovieSearchError, Result};
use crate::types::{MovieSummary, ResultPage};

/// Path of the movie search endpoint, relative to the API root
const SEARCH_MOVIE_PATH: &str = "/search/movie";

/// Wire format of `GET /search/movie`
#[derive(Debug, Deserialize)]
struct SearchMovieResponse {
    #[serde(default = "first_page")]
    page: u32,
    results: Vec<MovieSummary>,
    total_pages: u32,
    total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl From<SearchMovieResponse> for ResultPage {
    fn from(response: SearchMovieResponse) -> Self {
        ResultPage::new(
            response.page,
            response.results,
            response.total_pages,
            response.total_results,
        )
    }
}

/// Error body returned by TMDB on failure
#[derive(Debug, Deserialize)]
struct ErrorBody {
    status_message: Option<String>,
}

/// HTTP client for TMDB
///
/// Sends `Accept: application/json` on every request and, when a token is
/// configured, `Authorization: Bearer <token>`.
pub struct TmdbClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Endpoint, credential and query parameter settings
    config: ClientConfig,
}

impl TmdbClient {
    /// Create a new client from environment configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Create a new client with custom configuration
    ///
    /// # Arguments
    /// * `config` - Client configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client, config })
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch one page of movie search results.
    ///
    /// # Arguments
    /// * `query` - Free-text search query, sent as-is
    /// * `page` - Page number (1-based)
    ///
    /// # Errors
    /// - `MovieSearchError::HttpError` - the request could not be completed
    /// - `MovieSearchError::ServerError` - non-2xx status (401 when the token is missing)
    /// - `MovieSearchError::DecodeError` - the body is not a search response
    ///
    /// # Example
    /// ```no_run
    /// use moviesearch_core::TmdbClient;
    ///
    /// # async fn example() -> Result<(), moviesearch_core::MovieSearchError> {
    /// let client = TmdbClient::new()?;
    /// let page = client.fetch_page("batman", 1).await?;
    /// println!("{} of {} results", page.items.len(), page.total_results);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_page(&self, query: &str, page: u32) -> Result<ResultPage> {
        let url = format!("{}{}", self.config.base_url, SEARCH_MOVIE_PATH);
        let include_adult = self.config.include_adult.to_string();
        let page_param = page.to_string();

        let mut request = self.client.get(&url).query(&[
            ("query", query),
            ("include_adult", include_adult.as_str()),
            ("language", self.config.language.as_str()),
            ("page", page_param.as_str()),
        ]);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        info!(%query, page, "searching movies");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.status_message)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_default();
            warn!(%query, page, status = status.as_u16(), %message, "search request failed");
            return Err(MovieSearchError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SearchMovieResponse = serde_json::from_str(&body)
            .map_err(|e| MovieSearchError::DecodeError(e.to_string()))?;
        debug!(
            %query,
            page,
            items = parsed.results.len(),
            total_pages = parsed.total_pages,
            "search page received"
        );

        Ok(parsed.into())
    }
}
