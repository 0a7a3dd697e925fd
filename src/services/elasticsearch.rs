use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::ElasticsearchSettings;

/// Errors that can occur when talking to Elasticsearch
#[derive(Debug, Error)]
pub enum EsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Elasticsearch returned error: {0}")]
    Api(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// One terms-aggregation bucket as reported by Elasticsearch.
#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub doc_count: u64,
}

/// Elasticsearch client
///
/// Owns the HTTP session to the cluster and exposes the four operations the
/// handlers need: liveness probing, document counting, searching and
/// aggregating. All settings are fixed at construction. Transient transport
/// failures are retried a bounded number of times; backend-reported errors
/// never are.
pub struct EsClient {
    host: String,
    username: String,
    password: String,
    max_retries: u32,
    retry_on_timeout: bool,
    client: Client,
}

impl EsClient {
    /// Create a new Elasticsearch client
    pub fn new(settings: &ElasticsearchSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            host: settings.host.trim_end_matches('/').to_string(),
            username: settings.username.clone(),
            password: settings.password.clone(),
            max_retries: settings.max_retries,
            retry_on_timeout: settings.retry_on_timeout,
            client,
        }
    }

    /// Host URL this client was configured with.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Liveness probe. Swallows every error and reports reachability only.
    pub async fn probe(&self) -> bool {
        let request = self
            .client
            .get(&self.host)
            .basic_auth(&self.username, Some(&self.password));

        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Elasticsearch probe failed: {}", e);
                false
            }
        }
    }

    /// Count documents matching the index pattern.
    pub async fn count(&self, index_pattern: &str) -> Result<u64, EsError> {
        let url = format!(
            "{}/{}/_count",
            self.host,
            urlencoding::encode(index_pattern)
        );

        let request = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password));

        let response = self.send_with_retry(request).await?;

        if !response.status().is_success() {
            return Err(EsError::Api(format!(
                "Count request failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        json.get("count")
            .and_then(|c| c.as_u64())
            .ok_or_else(|| EsError::InvalidResponse("Missing count field".into()))
    }

    /// Execute a search query document, returning the raw `_source` of each
    /// hit. The result size is governed by the query document itself.
    pub async fn search(
        &self,
        index_pattern: &str,
        query: &Value,
    ) -> Result<Vec<Value>, EsError> {
        let json = self.execute(index_pattern, query).await?;

        let hits = json
            .get("hits")
            .and_then(|h| h.get("hits"))
            .and_then(|h| h.as_array())
            .ok_or_else(|| EsError::InvalidResponse("Missing hits array".into()))?;

        Ok(hits
            .iter()
            .filter_map(|hit| hit.get("_source").cloned())
            .collect())
    }

    /// Execute an aggregation query document and extract the buckets of the
    /// named terms aggregation.
    pub async fn aggregate(
        &self,
        index_pattern: &str,
        query: &Value,
        aggregation: &str,
    ) -> Result<Vec<Bucket>, EsError> {
        let json = self.execute(index_pattern, query).await?;

        let buckets = json
            .get("aggregations")
            .and_then(|a| a.get(aggregation))
            .and_then(|a| a.get("buckets"))
            .ok_or_else(|| {
                EsError::InvalidResponse(format!("Missing {} aggregation buckets", aggregation))
            })?;

        serde_json::from_value(buckets.clone())
            .map_err(|e| EsError::InvalidResponse(format!("Failed to parse buckets: {}", e)))
    }

    /// POST a query document to `_search` and return the parsed body.
    async fn execute(&self, index_pattern: &str, query: &Value) -> Result<Value, EsError> {
        let url = format!(
            "{}/{}/_search",
            self.host,
            urlencoding::encode(index_pattern)
        );

        tracing::debug!("Executing search against: {}", url);

        let request = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(query);

        let response = self.send_with_retry(request).await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Search request failed: {} - {}", status, body);
            return Err(EsError::Api(format!("Search request failed: {}", status)));
        }

        Ok(response.json().await?)
    }

    /// Send a request, retrying transient connect/timeout failures up to
    /// the configured attempt count. Backend-reported errors (any HTTP
    /// status) are returned to the caller on the first attempt.
    async fn send_with_retry(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, EsError> {
        let mut attempt: u32 = 0;
        loop {
            let cloned = request
                .try_clone()
                .ok_or_else(|| EsError::InvalidResponse("Request body not replayable".into()))?;

            match cloned.send().await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    let transient = e.is_connect() || (e.is_timeout() && self.retry_on_timeout);
                    if transient && attempt < self.max_retries {
                        attempt += 1;
                        tracing::warn!(
                            "Transient Elasticsearch failure (attempt {}/{}): {}",
                            attempt,
                            self.max_retries,
                            e
                        );
                        continue;
                    }
                    return Err(EsError::Request(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_normalizes_host() {
        let settings = ElasticsearchSettings {
            host: "http://es.test:9200/".to_string(),
            username: "user".to_string(),
            password: "pass".to_string(),
            timeout_secs: 5,
            max_retries: 2,
            retry_on_timeout: false,
        };

        let client = EsClient::new(&settings);
        assert_eq!(client.host(), "http://es.test:9200");
        assert_eq!(client.max_retries, 2);
        assert!(!client.retry_on_timeout);
    }
}
