//! Runtime configuration
//!
//! Settings come from the process environment, optionally seeded from a
//! `.env` file. Nothing is validated at startup: a missing API token only
//! shows up as an authorization error on the first fetch.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default TMDB API root
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default response language
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// How result pages are presented, fixed per deployment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaginationMode {
    /// Each page replaces the previous one (numbered pagination)
    #[default]
    Paged,
    /// Each page is appended to the results so far ("load more")
    LoadMore,
}

impl fmt::Display for PaginationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaginationMode::Paged => f.write_str("paged"),
            PaginationMode::LoadMore => f.write_str("load-more"),
        }
    }
}

impl FromStr for PaginationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paged" | "pages" => Ok(PaginationMode::Paged),
            "load-more" | "loadmore" | "load_more" | "infinite" => Ok(PaginationMode::LoadMore),
            other => Err(format!("unknown pagination mode: {other}")),
        }
    }
}

/// Configuration for the TMDB client and search controller
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without trailing slash (default: TMDB v3)
    pub base_url: String,
    /// Bearer token for the API; `None` leaves requests unauthenticated
    pub api_token: Option<String>,
    /// Response language (default: "en-US")
    pub language: String,
    /// Whether adult titles are included (default: false)
    pub include_adult: bool,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// How long a fetched page is reused from the cache (default: 300)
    pub cache_ttl_secs: u64,
    /// Presentation of consecutive pages (default: paged)
    pub mode: PaginationMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            language: DEFAULT_LANGUAGE.to_string(),
            include_adult: false,
            timeout_secs: 30,
            cache_ttl_secs: 300,
            mode: PaginationMode::Paged,
        }
    }
}

impl ClientConfig {
    /// Build configuration from the environment, loading `.env` first if present.
    ///
    /// Recognized variables:
    /// - `TMDB_TOKEN` (or `VITE_TMDB_TOKEN`): API bearer token
    /// - `TMDB_BASE_URL`, `TMDB_LANGUAGE`, `TMDB_TIMEOUT_SECS`
    /// - `MOVIE_SEARCH_CACHE_TTL_SECS`, `MOVIE_SEARCH_MODE` (`paged` | `load-more`)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_token = non_empty("TMDB_TOKEN").or_else(|| non_empty("VITE_TMDB_TOKEN"));
        if api_token.is_none() {
            warn!("TMDB_TOKEN is not set; searches will be rejected by the API");
        }

        Self {
            base_url: non_empty("TMDB_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            api_token,
            language: non_empty("TMDB_LANGUAGE").unwrap_or(defaults.language),
            include_adult: defaults.include_adult,
            timeout_secs: parse_or(
                "TMDB_TIMEOUT_SECS",
                non_empty("TMDB_TIMEOUT_SECS"),
                defaults.timeout_secs,
            ),
            cache_ttl_secs: parse_or(
                "MOVIE_SEARCH_CACHE_TTL_SECS",
                non_empty("MOVIE_SEARCH_CACHE_TTL_SECS"),
                defaults.cache_ttl_secs,
            ),
            mode: parse_or("MOVIE_SEARCH_MODE", non_empty("MOVIE_SEARCH_MODE"), defaults.mode),
        }
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Cache lifetime as a `Duration`
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(%key, value = %raw, fallback = %default, "ignoring unparseable setting");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.language, "en-US");
        assert!(!config.include_adult);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.mode, PaginationMode::Paged);
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_from_lookup_reads_all_settings() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TMDB_TOKEN", "secret"),
            ("TMDB_BASE_URL", "http://localhost:8080/3/"),
            ("TMDB_LANGUAGE", "uk-UA"),
            ("TMDB_TIMEOUT_SECS", "5"),
            ("MOVIE_SEARCH_CACHE_TTL_SECS", "60"),
            ("MOVIE_SEARCH_MODE", "load-more"),
        ]));

        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.base_url, "http://localhost:8080/3");
        assert_eq!(config.language, "uk-UA");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.mode, PaginationMode::LoadMore);
    }

    #[test]
    fn test_from_lookup_token_fallback() {
        let config = ClientConfig::from_lookup(lookup(&[("VITE_TMDB_TOKEN", "vite-secret")]));
        assert_eq!(config.api_token.as_deref(), Some("vite-secret"));

        let config = ClientConfig::from_lookup(lookup(&[("TMDB_TOKEN", "   ")]));
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_from_lookup_invalid_values_use_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TMDB_TIMEOUT_SECS", "soon"),
            ("MOVIE_SEARCH_MODE", "sideways"),
        ]));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.mode, PaginationMode::Paged);
    }

    #[test]
    fn test_pagination_mode_parse_and_display() {
        assert_eq!("paged".parse::<PaginationMode>(), Ok(PaginationMode::Paged));
        assert_eq!("Load-More".parse::<PaginationMode>(), Ok(PaginationMode::LoadMore));
        assert!("".parse::<PaginationMode>().is_err());
        assert_eq!(PaginationMode::LoadMore.to_string(), "load-more");
    }

    #[test]
    fn test_pagination_mode_serialization() {
        let json = serde_json::to_string(&PaginationMode::LoadMore).unwrap();
        assert_eq!(json, "\"load-more\"");
    }
}
