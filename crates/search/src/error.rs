use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(#[from] hostel_catalog::CatalogError),

    #[error("Record store did not respond within {}ms", .0.as_millis())]
    StoreTimeout(Duration),
}

impl SearchError {
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::StoreTimeout(_))
    }
}
