use crate::error::{CatalogError, Result};
use crate::row::decode_rows;
use crate::store::RecordStore;
use crate::types::CatalogRecord;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    pub api_key: Option<String>,
    pub table: String,
    pub rooms_table: String,
    pub timeout: Duration,
}

impl RestStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            table: "hostels".to_string(),
            rooms_table: "rooms".to_string(),
            timeout: Duration::from_secs(8),
        }
    }

    /// Bulk-select URL with the rooms relation embedded.
    #[must_use]
    pub fn select_url(&self) -> String {
        format!(
            "{}/rest/v1/{}?select=*,rooms:{}(*)",
            self.base_url.trim_end_matches('/'),
            self.table,
            self.rooms_table
        )
    }
}

/// Hosted relational table exposed through a PostgREST-style query API.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    config: RestStoreConfig,
}

impl RestStore {
    pub fn new(config: RestStoreConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(CatalogError::InvalidConfig("store url is empty".to_string()));
        }
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(CatalogError::InvalidConfig(format!(
                "store url must be http(s): {}",
                config.base_url
            )));
        }
        if config.table.trim().is_empty() || config.rooms_table.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(
                "table names must be non-empty".to_string(),
            ));
        }

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn fetch_all_records(&self) -> Result<Vec<CatalogRecord>> {
        let url = self.config.select_url();
        let mut request = self.client.get(&url).header("accept", "application/json");
        if let Some(key) = &self.config.api_key {
            request = request
                .header("apikey", key)
                .header("authorization", format!("Bearer {key}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let bytes = response.bytes().await?;
        let rows = decode_rows(&bytes)?;
        log::debug!("Fetched {} rows from {}", rows.len(), self.config.table);
        Ok(rows.into_iter().map(CatalogRecord::from).collect())
    }

    fn describe(&self) -> String {
        format!(
            "rest {} (table {})",
            self.config.base_url.trim_end_matches('/'),
            self.config.table
        )
    }
}
