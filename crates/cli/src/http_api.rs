use axum::{
    body::Body,
    extract::{Query, State},
    http::{Response as HttpResponse, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use hostel_protocol::{serialize_json, HealthReport, SearchResponse};
use hostel_search::{build_response, unix_ms_now, HostelSearch, SearchError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct HttpState {
    pub search: HostelSearch,
    pub expose_errors: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
    q: Option<String>,
    limit: Option<String>,
}

impl SearchParams {
    /// Non-numeric limits are ignored rather than rejected.
    fn limit(&self) -> Option<usize> {
        self.limit.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}

pub(crate) fn router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/api/search", get(http_search))
        .route("/health", get(http_health))
        .with_state(state)
}

/// Runs one search and converts the outcome, including store failures, into
/// a reply and the status it should be sent with.
pub(crate) async fn execute_search(
    search: &HostelSearch,
    raw_query: &str,
    limit: Option<usize>,
    expose_errors: bool,
) -> (StatusCode, SearchResponse) {
    match search.search(raw_query, limit).await {
        Ok(outcome) => (StatusCode::OK, build_response(&outcome, unix_ms_now())),
        Err(err) => {
            log::warn!("Search '{}' failed: {err}", raw_query.trim());
            let status = failure_status(&err);
            let detail = expose_errors.then(|| err.to_string());
            (status, SearchResponse::failure(detail))
        }
    }
}

fn failure_status(err: &SearchError) -> StatusCode {
    if err.is_timeout() {
        StatusCode::GATEWAY_TIMEOUT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub(crate) async fn http_search(
    Query(params): Query<SearchParams>,
    State(state): State<Arc<HttpState>>,
) -> Result<Response, StatusCode> {
    let raw_query = params.q.as_deref().unwrap_or_default();
    let (status, response) =
        execute_search(&state.search, raw_query, params.limit(), state.expose_errors).await;
    build_json_response(status, &response)
}

pub(crate) async fn http_health(
    State(state): State<Arc<HttpState>>,
) -> Result<Response, StatusCode> {
    let report = HealthReport {
        status: "ok".to_string(),
        store: state.search.store_description(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    build_json_response(StatusCode::OK, &report)
}

pub(crate) fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
) -> Result<Response, StatusCode> {
    let bytes = serialize_json(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .into_bytes();

    HttpResponse::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(bytes))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostel_catalog::{AcType, CatalogRecord, Gender, JsonFileStore, MemoryStore, RoomOffering, WashroomType};
    use hostel_search::SearchOptions;
    use serde_json::{json, Value};

    fn state_with(store: Arc<dyn hostel_catalog::RecordStore>, expose_errors: bool) -> Arc<HttpState> {
        Arc::new(HttpState {
            search: HostelSearch::new(store, SearchOptions::default()),
            expose_errors,
        })
    }

    fn memory_state() -> Arc<HttpState> {
        let records = vec![
            CatalogRecord::new("1", "Lotus Residency")
                .gender(Gender::Female)
                .price_range(12000, 15000)
                .room(RoomOffering::new(WashroomType::Attached, 2, AcType::Ac, 15000)),
            CatalogRecord::new("2", "Oak Lodge")
                .gender(Gender::Male)
                .price_range(30000, 34000)
                .room(RoomOffering::new(WashroomType::Common, 3, AcType::NonAc, 30000)),
        ];
        state_with(Arc::new(MemoryStore::new(records)), false)
    }

    async fn call(state: Arc<HttpState>, q: Option<&str>, limit: Option<&str>) -> (StatusCode, Value) {
        let params = SearchParams {
            q: q.map(String::from),
            limit: limit.map(String::from),
        };
        let response = http_search(Query(params), State(state)).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn search_returns_ranked_hostels() {
        let (status, body) = call(memory_state(), Some("ac"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["hostels"].as_array().unwrap().len(), 1);
        assert_eq!(body["hostels"][0]["name"], json!("Lotus Residency"));
        assert_eq!(body["hostels"][0]["relevanceScore"], json!(45));
        assert_eq!(body["metadata"]["total_matches"], json!(1));
        assert_eq!(body["metadata"]["returned_results"], json!(1));
        assert_eq!(body["metadata"]["search_term"], json!("ac"));
    }

    #[tokio::test]
    async fn missing_query_returns_suggestions() {
        for q in [None, Some(""), Some("   ")] {
            let (status, body) = call(memory_state(), q, Some("10")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["success"], json!(true));
            assert_eq!(body["hostels"], json!([]));
            assert!(!body["suggestions"].as_array().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn bad_limits_fall_back_to_default() {
        let (_, body) = call(memory_state(), Some("hostel lodge residency"), Some("abc")).await;
        assert_eq!(body["success"], json!(true));

        let (_, body) = call(memory_state(), Some("e"), Some("1")).await;
        assert_eq!(body["metadata"]["total_matches"], json!(2));
        assert_eq!(body["metadata"]["returned_results"], json!(1));

        let (_, body) = call(memory_state(), Some("e"), Some("0")).await;
        assert_eq!(body["metadata"]["returned_results"], json!(2));
    }

    #[tokio::test]
    async fn store_failure_is_not_an_empty_success() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = Arc::new(JsonFileStore::new(temp.path().join("missing.json")));

        let (status, body) = call(state_with(store.clone(), false), Some("girls"), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["hostels"], json!([]));
        assert!(body["message"].is_string());
        assert!(body.get("error").is_none());

        let (_, body) = call(state_with(store, true), Some("girls"), None).await;
        assert!(body["error"].as_str().unwrap().contains("unavailable"));
    }

    #[tokio::test]
    async fn health_reports_store() {
        let response = http_health(State(memory_state())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["store"], json!("memory (2 records)"));
    }
}
