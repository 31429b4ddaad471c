use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const GENERIC_FAILURE_MESSAGE: &str = "Search is temporarily unavailable. Please try again.";
pub const EMPTY_QUERY_MESSAGE: &str = "Enter a search term to find hostels.";

/// Body of every search reply. `success:false` with an empty `hostels` list
/// is a failure, never a zero-match search.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct SearchResponse {
    pub success: bool,
    pub hostels: Vec<HostelHit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Underlying failure detail, only populated outside production mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SearchMetadata>,
}

impl SearchResponse {
    #[must_use]
    pub fn results(hostels: Vec<HostelHit>, metadata: SearchMetadata) -> Self {
        Self {
            success: true,
            hostels,
            suggestions: None,
            message: None,
            error: None,
            metadata: Some(metadata),
        }
    }

    #[must_use]
    pub fn empty_query(suggestions: Vec<String>) -> Self {
        Self {
            success: true,
            hostels: Vec::new(),
            suggestions: Some(suggestions),
            message: Some(EMPTY_QUERY_MESSAGE.to_string()),
            error: None,
            metadata: None,
        }
    }

    #[must_use]
    pub fn failure(detail: Option<String>) -> Self {
        Self {
            success: false,
            hostels: Vec::new(),
            suggestions: None,
            message: Some(GENERIC_FAILURE_MESSAGE.to_string()),
            error: detail,
            metadata: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct SearchMetadata {
    /// Candidates that passed the filter, before truncation
    pub total_matches: usize,
    pub returned_results: usize,
    pub search_term: String,
    /// Unix epoch milliseconds
    pub timestamp: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct HostelHit {
    pub id: String,
    pub name: String,
    pub description: String,
    pub gender: String,
    pub branch: String,
    pub year_of_study: String,
    pub warden: WardenPayload,
    pub pricing: PricingPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocode: Option<String>,
    pub amenities: AmenitiesSummary,
    #[serde(rename = "relevanceScore")]
    pub relevance_score: u32,
    #[serde(rename = "matchContext")]
    pub match_context: MatchContextPayload,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct WardenPayload {
    pub name: String,
    pub contact: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub struct PricingPayload {
    pub min_price: u64,
    pub max_price: u64,
    pub mess_fees: u64,
    pub laundry_fees: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct AmenitiesSummary {
    pub ac_available: bool,
    /// Distinct washroom categories, e.g. `["attached", "common"]`
    pub washroom_types: Vec<String>,
    /// Distinct occupancies, ascending
    pub occupancies: Vec<u32>,
    pub room_count: usize,
    pub room_price_min: Option<u64>,
    pub room_price_max: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchContextPayload {
    pub name_match: bool,
    pub description_match: bool,
    pub gender_match: bool,
    pub branch_match: bool,
    pub warden_match: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct HealthReport {
    pub status: String,
    pub store: String,
    pub version: String,
}

/// JSON schema of [`SearchResponse`], pretty-printed.
pub fn response_schema() -> Result<String> {
    let schema = schemars::schema_for!(SearchResponse);
    serde_json::to_string_pretty(&schema).map_err(Into::into)
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}
