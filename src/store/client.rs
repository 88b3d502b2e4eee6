//! Remote table store client.
//!
//! # Responsibilities
//! - Address tables on a PostgREST-style REST endpoint
//! - Attach the project key to every request
//! - Translate select/insert/update/delete into HTTP calls
//! - Decode returned rows and surface store error messages
//!
//! # Wire Format
//! ```text
//! GET    {url}/{rest_path}/{table}?select=*
//! POST   {url}/{rest_path}/{table}              Prefer: return=representation
//! PATCH  {url}/{rest_path}/{table}?{col}=eq.{v} Prefer: return=representation
//! DELETE {url}/{rest_path}/{table}?{col}=eq.{v} Prefer: return=representation
//! ```

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::StoreConfig;
use crate::store::types::{StoreError, StoreResult};

const APIKEY: HeaderName = HeaderName::from_static("apikey");
const PREFER: HeaderName = HeaderName::from_static("prefer");
const RETURN_REPRESENTATION: &str = "return=representation";

/// Error payload returned by the store on failure.
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: Option<String>,
}

/// HTTP client for the hosted table store.
#[derive(Clone)]
pub struct StoreClient {
    client: Client,
    rest_base: String,
}

impl StoreClient {
    /// Create a client from the store configuration.
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let rest_base = rest_base_url(&config.url, &config.rest_path)?;

        let mut apikey = HeaderValue::from_str(&config.key)?;
        apikey.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.key))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(APIKEY, apikey);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, rest_base })
    }

    /// Get a query handle on `table`.
    pub fn table(&self, table: &str) -> TableQuery<'_> {
        TableQuery {
            client: &self.client,
            url: format!("{}/{}", self.rest_base, table),
        }
    }
}

/// Operations against a single table.
pub struct TableQuery<'a> {
    client: &'a Client,
    url: String,
}

impl TableQuery<'_> {
    /// Fetch every row of the table.
    pub async fn select_all<T: DeserializeOwned>(&self) -> StoreResult<Vec<T>> {
        let request = self.client.get(&self.url).query(&[("select", "*")]);
        execute(request).await
    }

    /// Insert `row` and return the created rows.
    pub async fn insert<B, T>(&self, row: &B) -> StoreResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .post(&self.url)
            .header(PREFER, RETURN_REPRESENTATION)
            .json(row);
        execute(request).await
    }

    /// Update rows where `column` equals `value`, returning the new rows.
    pub async fn update_eq<B, T>(&self, column: &str, value: &str, row: &B) -> StoreResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .patch(&self.url)
            .query(&[(column, eq_filter(value))])
            .header(PREFER, RETURN_REPRESENTATION)
            .json(row);
        execute(request).await
    }

    /// Delete rows where `column` equals `value`, returning the removed rows.
    pub async fn delete_eq<T: DeserializeOwned>(&self, column: &str, value: &str) -> StoreResult<Vec<T>> {
        let request = self
            .client
            .delete(&self.url)
            .query(&[(column, eq_filter(value))])
            .header(PREFER, RETURN_REPRESENTATION);
        execute(request).await
    }
}

async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> StoreResult<Vec<T>> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(StoreError::Status {
            status,
            message: error_message(&body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<StoreErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| body.to_string())
}

fn eq_filter(value: &str) -> String {
    format!("eq.{}", value)
}

/// Join the project URL and REST path, rejecting unusable URLs.
fn rest_base_url(url: &str, rest_path: &str) -> StoreResult<String> {
    let parsed = Url::parse(url).map_err(|e| StoreError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if parsed.cannot_be_a_base() {
        return Err(StoreError::InvalidUrl {
            url: url.to_string(),
            reason: "URL cannot be a base".to_string(),
        });
    }

    let base = url.trim_end_matches('/');
    let path = rest_path.trim_matches('/');
    if path.is_empty() {
        Ok(base.to_string())
    } else {
        Ok(format!("{}/{}", base, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_base_url_joins_segments() {
        assert_eq!(
            rest_base_url("https://abc.supabase.co/", "/rest/v1/").unwrap(),
            "https://abc.supabase.co/rest/v1"
        );
        assert_eq!(
            rest_base_url("http://127.0.0.1:3000", "").unwrap(),
            "http://127.0.0.1:3000"
        );
    }

    #[test]
    fn test_rest_base_url_rejects_garbage() {
        let err = rest_base_url("not a url", "rest/v1").unwrap_err();
        assert!(matches!(err, StoreError::InvalidUrl { .. }));
    }

    #[test]
    fn test_error_message_prefers_store_message() {
        assert_eq!(
            error_message(r#"{"code":"42P01","message":"relation does not exist"}"#),
            "relation does not exist"
        );
        assert_eq!(error_message("upstream down"), "upstream down");
    }

    #[test]
    fn test_client_rejects_key_with_newline() {
        let config = StoreConfig {
            url: "https://abc.supabase.co".into(),
            key: "bad\nkey".into(),
            ..StoreConfig::default()
        };
        assert!(matches!(StoreClient::new(&config), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_table_url() {
        let config = StoreConfig {
            url: "https://abc.supabase.co".into(),
            key: "key".into(),
            ..StoreConfig::default()
        };
        let client = StoreClient::new(&config).unwrap();
        assert_eq!(client.table("products").url, "https://abc.supabase.co/rest/v1/products");
    }
}
