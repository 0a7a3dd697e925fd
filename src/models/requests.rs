use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for the batch uid search endpoint.
///
/// The length bounds are enforced before any backend call; an oversized
/// batch is rejected, never truncated.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UidBatchRequest {
    #[validate(length(min = 1, max = 1000))]
    pub uids: Vec<i64>,
    #[serde(default)]
    pub index_pattern: Option<String>,
}

/// Optional query parameters shared by the GET search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexPatternQuery {
    #[serde(default)]
    pub index_pattern: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_within_bounds_is_valid() {
        let request = UidBatchRequest {
            uids: vec![1, 2, 3],
            index_pattern: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let request = UidBatchRequest {
            uids: vec![],
            index_pattern: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_oversized_batch_is_rejected() {
        let request = UidBatchRequest {
            uids: (0..1001).collect(),
            index_pattern: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_maximum_batch_is_valid() {
        let request = UidBatchRequest {
            uids: (0..1000).collect(),
            index_pattern: Some("people*".to_string()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_index_pattern_defaults_to_none() {
        let request: UidBatchRequest = serde_json::from_str(r#"{"uids": [7]}"#).unwrap();
        assert!(request.index_pattern.is_none());
    }
}
