//! # Hostel Search
//!
//! Free-text search over a hostel catalog snapshot.
//!
//! ```text
//! raw query
//!     │
//!     ├──> Query::parse      (trim, lower-case, keyword tables)
//!     ├──> filter_candidates (any signal or text hit keeps a record)
//!     └──> rank              (sum signal weights, stable sort, truncate)
//! ```

mod engine;
mod error;
mod filter;
mod payload;
mod query;
mod rank;
mod signals;

pub use engine::{
    default_suggestions, search_records, HostelSearch, SearchOptions, SearchOutcome,
    SearchResults,
};
pub use error::{Result, SearchError};
pub use filter::{filter_candidates, is_candidate};
pub use payload::{build_response, summarize_rooms, unix_ms_now};
pub use query::{
    normalize, Amenity, PriceTier, Query, AMENITY_KEYWORDS, CHEAP_MAX_PRICE, GENDER_SYNONYMS,
    PREMIUM_MIN_PRICE, PRICE_TIER_KEYWORDS,
};
pub use rank::{rank, score_record, RankedResults, ScoredResult};
pub use signals::{
    Haystack, MatchContext, MatchFlag, Signal, SignalHit, SignalRule, SIGNAL_RULES,
};
