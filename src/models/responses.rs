use serde::{Deserialize, Serialize};
use crate::models::domain::Person;

/// Response for all person search endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub success: bool,
    pub count: usize,
    pub results: Vec<Person>,
    pub query_time_ms: f64,
}

impl SearchResult {
    /// Build a successful result; `count` is always derived from the
    /// results themselves.
    pub fn new(results: Vec<Person>, query_time_ms: f64) -> Self {
        Self {
            success: true,
            count: results.len(),
            results,
            query_time_ms,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub elasticsearch_connected: bool,
    pub elasticsearch_host: String,
    pub api_version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// One aggregation bucket in the stats response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderBucket {
    pub gender: String,
    pub count: u64,
}

/// Response for the stats endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub total_documents: u64,
    pub genders: Vec<GenderBucket>,
}

/// Service descriptor returned by the root endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub message: String,
    pub version: String,
    pub docs: String,
    pub health: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_count_matches_results() {
        let result = SearchResult::new(vec![Person::default(), Person::default()], 1.25);
        assert!(result.success);
        assert_eq!(result.count, 2);
        assert_eq!(result.count, result.results.len());
    }

    #[test]
    fn test_empty_search_result() {
        let result = SearchResult::new(vec![], 0.4);
        assert!(result.success);
        assert_eq!(result.count, 0);
    }
}
