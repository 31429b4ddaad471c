use crate::error::{Result, SearchError};
use crate::filter::filter_candidates;
use crate::query::Query;
use crate::rank::{rank, RankedResults, ScoredResult};
use hostel_catalog::{CatalogRecord, RecordStore};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub default_limit: usize,
    /// Upper bound on a single store fetch
    pub fetch_timeout: Duration,
    /// Example queries offered when the query box is empty
    pub suggestions: Vec<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            default_limit: 10,
            fetch_timeout: Duration::from_secs(10),
            suggestions: default_suggestions(),
        }
    }
}

impl SearchOptions {
    /// Missing or zero limits fall back to the default. Any other limit is
    /// honored as given.
    #[must_use]
    pub fn resolve_limit(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(0) | None => self.default_limit,
            Some(limit) => limit,
        }
    }
}

#[must_use]
pub fn default_suggestions() -> Vec<String> {
    [
        "girls hostel",
        "boys hostel",
        "ac rooms",
        "cheap",
        "2nd year",
        "attached washroom",
        "single room",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Blank query: nothing was fetched or scored
    EmptyQuery { suggestions: Vec<String> },
    Ranked(SearchResults),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub search_term: String,
    pub results: Vec<ScoredResult>,
    pub total_matches: usize,
}

impl SearchResults {
    #[must_use]
    pub fn returned_count(&self) -> usize {
        self.results.len()
    }
}

/// Filter then rank one snapshot. Pure and synchronous.
#[must_use]
pub fn search_records(query: &Query, records: Vec<CatalogRecord>, limit: usize) -> RankedResults {
    let candidates = filter_candidates(query, records);
    rank(query, candidates, limit)
}

/// Full-scan search over a store snapshot fetched per call. Holds no state
/// between calls, so one instance can serve concurrent requests.
#[derive(Clone)]
pub struct HostelSearch {
    store: Arc<dyn RecordStore>,
    options: SearchOptions,
}

impl HostelSearch {
    pub fn new(store: Arc<dyn RecordStore>, options: SearchOptions) -> Self {
        Self { store, options }
    }

    #[must_use]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    #[must_use]
    pub fn store_description(&self) -> String {
        self.store.describe()
    }

    /// Dropping the returned future abandons an in-flight fetch; no partial
    /// scoring happens.
    pub async fn search(&self, raw_query: &str, limit: Option<usize>) -> Result<SearchOutcome> {
        let Some(query) = Query::parse(raw_query) else {
            log::debug!("Empty query, returning suggestions");
            return Ok(SearchOutcome::EmptyQuery {
                suggestions: self.options.suggestions.clone(),
            });
        };
        let limit = self.options.resolve_limit(limit);

        let timeout = self.options.fetch_timeout;
        let records = tokio::time::timeout(timeout, self.store.fetch_all_records())
            .await
            .map_err(|_| SearchError::StoreTimeout(timeout))??;
        log::debug!(
            "Fetched {} records from {}",
            records.len(),
            self.store.describe()
        );

        let ranked = search_records(&query, records, limit);
        log::info!(
            "Search '{}' completed: {} matches, {} returned",
            query.term(),
            ranked.total_matches,
            ranked.results.len()
        );

        Ok(SearchOutcome::Ranked(SearchResults {
            search_term: query.term().to_string(),
            results: ranked.results,
            total_matches: ranked.total_matches,
        }))
    }
}
