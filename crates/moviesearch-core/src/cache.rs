//! In-memory query cache keyed by (query, page)
//!
//! Holds the fetch status of every key the controller has requested. A key
//! that is `Loading` has exactly one authoritative request in flight.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::types::{QueryKey, ResultPage};

/// Fetch state of a single cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Loading,
    Success,
    Error,
}

/// Cached state of one (query, page) key
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub status: FetchStatus,
    /// Last successful page; kept while the entry is refetched
    pub data: Option<ResultPage>,
    /// Message of the last failure, cleared on success
    pub error: Option<String>,
    pub updated_at: Instant,
}

impl CacheEntry {
    fn loading(previous: Option<ResultPage>) -> Self {
        Self {
            status: FetchStatus::Loading,
            data: previous,
            error: None,
            updated_at: Instant::now(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// Successful data, if this entry currently holds it
    pub fn success(&self) -> Option<&ResultPage> {
        match self.status {
            FetchStatus::Success => self.data.as_ref(),
            _ => None,
        }
    }
}

/// Query cache with time-based expiry of settled entries
#[derive(Debug)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    ttl: Duration,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Entry for `key`, ignoring successful entries older than the TTL.
    ///
    /// Loading and errored entries are always returned: a loading entry marks
    /// an in-flight request, an errored one is refetched by the caller anyway.
    pub fn fresh(&self, key: &QueryKey) -> Option<&CacheEntry> {
        self.entries.get(key).filter(|entry| {
            entry.status != FetchStatus::Success || entry.updated_at.elapsed() < self.ttl
        })
    }

    /// Entry for `key` regardless of age
    pub fn get(&self, key: &QueryKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Mark `key` as having a request in flight.
    pub fn begin(&mut self, key: QueryKey) {
        let previous = self.entries.remove(&key).and_then(|entry| entry.data);
        self.entries.insert(key, CacheEntry::loading(previous));
    }

    /// Store a successful response for `key`.
    pub fn complete(&mut self, key: QueryKey, page: ResultPage) {
        self.entries.insert(
            key,
            CacheEntry {
                status: FetchStatus::Success,
                data: Some(page),
                error: None,
                updated_at: Instant::now(),
            },
        );
    }

    /// Store a failure for `key`, keeping any earlier data.
    pub fn fail(&mut self, key: QueryKey, message: String) {
        let previous = self.entries.remove(&key).and_then(|entry| entry.data);
        self.entries.insert(
            key,
            CacheEntry {
                status: FetchStatus::Error,
                data: previous,
                error: Some(message),
                updated_at: Instant::now(),
            },
        );
    }

    /// Drop settled entries older than the TTL. Returns how many were removed.
    pub fn evict_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.is_loading() || entry.updated_at.elapsed() < ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
