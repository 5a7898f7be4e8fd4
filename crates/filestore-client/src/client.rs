//! HTTP façade over the remote JSON file store

use std::time::Duration;

use json_ttl_cache::DocumentCache;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{FilestoreError, Result};
use crate::retry::backoff_delay;
use crate::types::{ListResponse, ReadResponse, WriteRequest, WriteResponse};

/// Per-attempt timeout on write requests.
const WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of write retries after the initial attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// What a read from the remote store produced, before the default-value
/// contract is applied at the public boundary.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FetchOutcome {
    Found(Value),
    NotFound,
}

/// Client for a remote JSON file store, with a read-through TTL cache and
/// retry-on-write.
///
/// The remote store is authoritative; the cache is an invalidatable replica
/// that lives for the life of this client. Public operations never return
/// errors: failures are logged and collapsed into a fallback value.
pub struct FilestoreClient {
    http: reqwest::Client,
    base_url: String,
    cache: DocumentCache,
}

impl FilestoreClient {
    /// Create a client with a fresh cache (5-minute TTL).
    pub fn new(base_url: &str) -> Self {
        Self::with_cache(base_url, DocumentCache::new())
    }

    /// Create a client around an existing cache. Lets tests inject a cache
    /// with a controlled clock or TTL.
    pub fn with_cache(base_url: &str, cache: DocumentCache) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    /// The cache behind the read path. Exposes validity checks
    /// ([`DocumentCache::is_valid`]) and explicit invalidation
    /// ([`DocumentCache::remove`], [`DocumentCache::clear`]).
    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    fn document_url(&self, name: &str) -> String {
        format!("{}/data/{}", self.base_url, urlencoding::encode(name))
    }

    fn collection_url(&self) -> String {
        format!("{}/data", self.base_url)
    }

    async fn fetch_document(&self, name: &str) -> Result<FetchOutcome> {
        let response = self.http.get(self.document_url(name)).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(FetchOutcome::NotFound);
        }
        if !response.status().is_success() {
            return Err(FilestoreError::Status(response.status()));
        }

        let body: ReadResponse = response.json().await?;
        Ok(FetchOutcome::Found(body.data))
    }

    /// Read the document called `name`, or `default` when it is absent or
    /// the request fails. Never raises.
    ///
    /// With `use_cache`, a fresh cached copy short-circuits the network call
    /// and a successful read refreshes the cache. A missing document is not
    /// an error and is not cached; the caller's default stands in for it.
    pub async fn fetch_data(&self, name: &str, default: Value, use_cache: bool) -> Value {
        if use_cache {
            if let Some(cached) = self.cache.get(name) {
                debug!(document = name, "serving document from cache");
                return cached;
            }
        }

        match self.fetch_document(name).await {
            Ok(FetchOutcome::Found(value)) => {
                debug!(document = name, "fetched document");
                if use_cache {
                    self.cache.set(name, value.clone());
                }
                value
            }
            Ok(FetchOutcome::NotFound) => {
                debug!(document = name, "document not found, using default");
                default
            }
            Err(e) => {
                warn!(document = name, error = %e, "fetch failed, using default");
                default
            }
        }
    }

    async fn write_document(&self, name: &str, value: &Value) -> Result<bool> {
        let response = self
            .http
            .post(self.collection_url())
            .timeout(WRITE_TIMEOUT)
            .json(&WriteRequest {
                filename: name,
                data: value,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FilestoreError::Status(response.status()));
        }

        // An undecodable body reads as an unacknowledged write.
        let body: WriteResponse = response.json().await.unwrap_or_default();
        Ok(body.success)
    }

    /// Write `value` as the document called `name`, retrying transient
    /// failures with capped exponential backoff. Returns whether the store
    /// acknowledged the write.
    ///
    /// `max_retries` bounds the retries after the initial attempt
    /// ([`DEFAULT_MAX_RETRIES`] gives 3 attempts total). An empty `name` or a
    /// null `value` is rejected before any network attempt and consumes no
    /// retries. With `update_cache`, an acknowledged write refreshes the
    /// cached copy.
    pub async fn save_data(
        &self,
        name: &str,
        value: &Value,
        update_cache: bool,
        max_retries: u32,
    ) -> bool {
        if name.is_empty() {
            warn!("rejecting write with empty document name");
            return false;
        }
        if value.is_null() {
            warn!(document = name, "rejecting write with null payload");
            return false;
        }

        let attempts = max_retries.saturating_add(1);
        for attempt in 1..=attempts {
            match self.write_document(name, value).await {
                Ok(true) => {
                    debug!(document = name, attempt, "write acknowledged");
                    if update_cache {
                        self.cache.set(name, value.clone());
                    }
                    return true;
                }
                Ok(false) => {
                    warn!(document = name, attempt, "store did not acknowledge write");
                }
                Err(e) => {
                    warn!(document = name, attempt, error = %e, "write failed");
                }
            }

            if attempt < attempts {
                let delay = backoff_delay(attempt);
                debug!(document = name, delay_ms = delay.as_millis() as u64, "retrying write");
                tokio::time::sleep(delay).await;
            }
        }

        warn!(document = name, attempts, "write gave up");
        false
    }

    /// Delete the document called `name`. Returns whether the store accepted
    /// the deletion. A successful delete always drops the cached copy; there
    /// is no retry.
    pub async fn delete_data(&self, name: &str) -> bool {
        match self.http.delete(self.document_url(name)).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(document = name, "deleted document");
                self.cache.remove(name);
                true
            }
            Ok(response) => {
                warn!(document = name, status = %response.status(), "delete failed");
                false
            }
            Err(e) => {
                warn!(document = name, error = %e, "delete request failed");
                false
            }
        }
    }

    /// List the document names in the store, or empty when the request
    /// fails. Results are never cached.
    pub async fn list_data_files(&self) -> Vec<String> {
        let response = match self.http.get(self.collection_url()).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(status = %response.status(), "list failed");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "list request failed");
                return Vec::new();
            }
        };

        match response.json::<ListResponse>().await {
            Ok(body) => body.files,
            Err(e) => {
                warn!(error = %e, "list response decode failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_document_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/settings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"a": 1}})))
            .mount(&server)
            .await;

        let client = FilestoreClient::new(&server.uri());
        let outcome = client.fetch_document("settings").await.unwrap();
        assert_eq!(outcome, FetchOutcome::Found(json!({"a": 1})));
    }

    #[tokio::test]
    async fn test_fetch_document_not_found_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = FilestoreClient::new(&server.uri());
        let outcome = client.fetch_document("missing").await.unwrap();
        assert_eq!(outcome, FetchOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_document_server_error_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = FilestoreClient::new(&server.uri());
        let err = client.fetch_document("broken").await.unwrap_err();
        assert!(matches!(
            err,
            FilestoreError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
        ));
    }

    #[tokio::test]
    async fn test_fetch_document_undecodable_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/garbled"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = FilestoreClient::new(&server.uri());
        let err = client.fetch_document("garbled").await.unwrap_err();
        assert!(matches!(err, FilestoreError::Http(_)));
    }

    #[test]
    fn test_document_url_percent_encodes_names() {
        let client = FilestoreClient::new("http://localhost:3000");
        assert_eq!(
            client.document_url("user settings/v2"),
            "http://localhost:3000/data/user%20settings%2Fv2"
        );
    }
}
