//! Supabase (PostgREST) station directory client.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use tokio::sync::Semaphore;

use crate::domain::{PollingStation, PostalCode};

use super::StationDirectory;
use super::error::DirectoryError;
use super::row::{DecodedRows, decode_rows};

/// Default table holding polling stations.
const DEFAULT_TABLE: &str = "polling_stations";

/// Default number of rows fetched per page.
const DEFAULT_ROW_LIMIT: u32 = 25;

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the Supabase directory client.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// Anon (public) API key
    pub api_key: String,
    /// Table holding the station rows
    pub table: String,
    /// Rows fetched per page
    pub row_limit: u32,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectoryConfig {
    /// Create a new config for the given project URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            row_limit: DEFAULT_ROW_LIMIT,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 10,
        }
    }

    /// Set the table name.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Set the page size.
    pub fn with_row_limit(mut self, n: u32) -> Self {
        self.row_limit = n;
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Station directory backed by a Supabase PostgREST table.
///
/// Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct SupabaseDirectory {
    http: reqwest::Client,
    endpoint: String,
    row_limit: u32,
    semaphore: Arc<Semaphore>,
}

impl SupabaseDirectory {
    /// Create a new client with the given configuration.
    pub fn new(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let invalid_key = |_| DirectoryError::Config {
            message: "invalid API key format".to_string(),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("apikey"),
            HeaderValue::from_str(&config.api_key).map_err(invalid_key)?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(invalid_key)?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        let endpoint = format!(
            "{}/rest/v1/{}",
            config.base_url.trim_end_matches('/'),
            config.table
        );

        Ok(Self {
            http,
            endpoint,
            row_limit: config.row_limit,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Run a single-column filter query, e.g. `postal_code=eq.1052`.
    ///
    /// Pages through the result in `row_limit` steps and stops at the first
    /// page holding an eligible record, or at a short page. Rows without
    /// coordinates never hide an eligible record further down the table.
    async fn query(
        &self,
        column: &str,
        filter: String,
    ) -> Result<Vec<PollingStation>, DirectoryError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| DirectoryError::Config {
                message: "semaphore closed".to_string(),
            })?;

        let page_size = self.row_limit.max(1);
        let mut stations = Vec::new();
        let mut offset: u64 = 0;

        loop {
            tracing::debug!(column, %filter, offset, "querying station directory");

            let page = self.fetch_page(column, &filter, page_size, offset).await?;
            let found_eligible = page.stations.iter().any(PollingStation::is_eligible);
            stations.extend(page.stations);

            if found_eligible || page.received < page_size as usize {
                return Ok(stations);
            }

            offset += u64::from(page_size);
        }
    }

    async fn fetch_page(
        &self,
        column: &str,
        filter: &str,
        limit: u32,
        offset: u64,
    ) -> Result<DecodedRows, DirectoryError> {
        let limit = limit.to_string();
        let offset = offset.to_string();
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                (column, filter),
                ("select", "*"),
                ("order", "id.asc"),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DirectoryError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DirectoryError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        decode_rows(&body)
    }
}

impl StationDirectory for SupabaseDirectory {
    async fn find_by_postal_code(
        &self,
        code: &PostalCode,
    ) -> Result<Vec<PollingStation>, DirectoryError> {
        self.query("postal_code", format!("eq.{code}")).await
    }

    async fn find_by_settlement_contains(
        &self,
        text: &str,
    ) -> Result<Vec<PollingStation>, DirectoryError> {
        self.query("settlement", format!("ilike.*{}*", escape_like(text)))
            .await
    }

    async fn find_by_address_contains(
        &self,
        text: &str,
    ) -> Result<Vec<PollingStation>, DirectoryError> {
        self.query("address", format!("ilike.*{}*", escape_like(text)))
            .await
    }
}

/// Make user text match literally inside an `ilike` pattern.
///
/// `%` and `_` are LIKE wildcards and are backslash-escaped. PostgREST
/// turns `*` into `%` before the database sees it, so it cannot be escaped
/// and is dropped instead.
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            '*' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = DirectoryConfig::new("http://localhost:54321", "test-key")
            .with_table("stations_2026")
            .with_row_limit(5)
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.base_url, "http://localhost:54321");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.table, "stations_2026");
        assert_eq!(config.row_limit, 5);
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = DirectoryConfig::new("http://localhost:54321", "test-key");

        assert_eq!(config.table, DEFAULT_TABLE);
        assert_eq!(config.row_limit, DEFAULT_ROW_LIMIT);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn client_creation() {
        let config = DirectoryConfig::new("http://localhost:54321/", "test-key");
        let client = SupabaseDirectory::new(config).unwrap();
        assert_eq!(
            client.endpoint,
            "http://localhost:54321/rest/v1/polling_stations"
        );
    }

    #[test]
    fn invalid_api_key_rejected() {
        let config = DirectoryConfig::new("http://localhost:54321", "bad\nkey");
        let result = SupabaseDirectory::new(config);
        assert!(matches!(result, Err(DirectoryError::Config { .. })));
    }

    #[test]
    fn escape_like_passes_plain_text() {
        assert_eq!(escape_like("budapest"), "budapest");
        assert_eq!(escape_like("petőfi utca 10."), "petőfi utca 10.");
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn escape_like_drops_stars() {
        assert_eq!(escape_like("*buda*"), "buda");
    }
}
