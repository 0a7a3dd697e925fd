//! People Search API
//!
//! A thin HTTP façade over Elasticsearch for looking up person records by
//! uid, uid batch or email. Requests are translated into fixed query
//! documents and the resulting hits are reshaped into a normalized,
//! partial-field-tolerant response model.

pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::auth::ApiCredentials;
pub use crate::core::{normalize_hits, person_from_hit, HitError};
pub use crate::error::ApiError;
pub use crate::models::{Person, SearchResult, UidBatchRequest};
pub use crate::services::{EsClient, EsError};

#[cfg(test)]
mod tests {
    #[test]
    fn test_library_exports() {
        let query = crate::core::query::by_uid(1);
        assert_eq!(query["query"]["term"]["uid"], 1);
    }
}
