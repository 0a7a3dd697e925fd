use actix_web::{web, HttpResponse};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

use crate::auth::Authenticated;
use crate::core::{normalize_hits, query};
use crate::error::ApiError;
use crate::models::{
    GenderBucket, HealthResponse, IndexPatternQuery, SearchResult, ServiceDescriptor,
    StatsResponse, UidBatchRequest,
};
use crate::services::EsClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub es: Arc<EsClient>,
    pub default_index_pattern: String,
    pub strict_hits: bool,
}

/// Configure all search-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/search/uid/{uid}", web::get().to(search_by_uid))
        .route("/search/uids", web::post().to(search_by_uids))
        .route("/search/email/{email}", web::get().to(search_by_email))
        .route("/stats", web::get().to(stats));
}

/// Service descriptor endpoint
async fn root() -> HttpResponse {
    HttpResponse::Ok().json(ServiceDescriptor {
        message: "People Search API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs: "/docs".to_string(),
        health: "/health".to_string(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let connected = state.es.probe().await;
    let status = if connected { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        elasticsearch_connected: connected,
        elasticsearch_host: state.es.host().to_string(),
        api_version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search by a single uid
///
/// GET /search/uid/{uid}?index_pattern=...
async fn search_by_uid(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    params: web::Query<IndexPatternQuery>,
    _auth: Authenticated,
) -> Result<HttpResponse, ApiError> {
    let uid = path.into_inner();
    tracing::info!("Searching for uid: {}", uid);

    check_backend(&state).await?;

    let query = query::by_uid(uid);
    let index = resolve_index(&state, params.into_inner().index_pattern);
    let result = timed_search(&state, &index, &query).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Search by a batch of uids
///
/// POST /search/uids
///
/// Request body:
/// ```json
/// {
///   "uids": [1, 2, 3],
///   "index_pattern": "people*"
/// }
/// ```
async fn search_by_uids(
    state: web::Data<AppState>,
    body: web::Json<UidBatchRequest>,
    _auth: Authenticated,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    if let Err(errors) = request.validate() {
        tracing::info!("Validation failed for uid batch: {}", errors);
        return Err(ApiError::Validation(errors.to_string()));
    }

    tracing::info!("Searching for {} uids", request.uids.len());

    check_backend(&state).await?;

    let query = query::by_uids(&request.uids);
    let index = resolve_index(&state, request.index_pattern);
    let result = timed_search(&state, &index, &query).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Search by email
///
/// GET /search/email/{email}?index_pattern=...
async fn search_by_email(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<IndexPatternQuery>,
    _auth: Authenticated,
) -> Result<HttpResponse, ApiError> {
    let email = path.into_inner();
    tracing::info!("Searching for email: {}", email);

    check_backend(&state).await?;

    let query = query::by_email(&email);
    let index = resolve_index(&state, params.into_inner().index_pattern);
    let result = timed_search(&state, &index, &query).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Index statistics
///
/// GET /stats?index_pattern=...
///
/// Performs two sequential backend calls (count, then the gender
/// aggregation); both must succeed or the whole request fails.
async fn stats(
    state: web::Data<AppState>,
    params: web::Query<IndexPatternQuery>,
    _auth: Authenticated,
) -> Result<HttpResponse, ApiError> {
    check_backend(&state).await?;

    let index = resolve_index(&state, params.into_inner().index_pattern);

    let total_documents = state.es.count(&index).await?;
    let buckets = state
        .es
        .aggregate(&index, &query::gender_stats(), "genders")
        .await?;

    let genders = buckets
        .into_iter()
        .map(|b| GenderBucket {
            gender: b.key,
            count: b.doc_count,
        })
        .collect();

    Ok(HttpResponse::Ok().json(StatsResponse {
        success: true,
        total_documents,
        genders,
    }))
}

/// Probe the backend once before issuing any query.
async fn check_backend(state: &AppState) -> Result<(), ApiError> {
    if state.es.probe().await {
        Ok(())
    } else {
        tracing::warn!("Elasticsearch unreachable, rejecting request");
        Err(ApiError::BackendUnavailable)
    }
}

fn resolve_index(state: &AppState, requested: Option<String>) -> String {
    requested.unwrap_or_else(|| state.default_index_pattern.clone())
}

/// Execute the query and normalize the hits, measuring wall-clock time
/// strictly around those two steps.
async fn timed_search(
    state: &AppState,
    index: &str,
    query: &Value,
) -> Result<SearchResult, ApiError> {
    let start = Instant::now();

    let hits = state.es.search(index, query).await?;
    let people = normalize_hits(&hits, state.strict_hits)?;

    let query_time_ms = round2(start.elapsed().as_secs_f64() * 1000.0);

    tracing::debug!(
        "Query returned {} hits in {} ms",
        people.len(),
        query_time_ms
    );

    Ok(SearchResult::new(people, query_time_ms))
}

fn round2(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(1.235), 1.24);
        assert_eq!(round2(0.0), 0.0);
    }
}
