use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use common::{Job, JobId};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use thiserror::Error;

use crate::store::JobStore;

/// Query parameters for the listing endpoint
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(rename = "_limit")]
    limit: Option<usize>,
}

/// Errors surfaced to API callers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("job {0} not found")]
    NotFound(JobId),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Builds the `/api/jobs` router over `store`
pub fn app(store: JobStore) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/jobs", get(list_handler).post(create_handler))
        .route(
            "/api/jobs/{id}",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .with_state(store)
}

/// Binds `addr` and serves the API until the listener fails
pub async fn serve(addr: SocketAddr, store: JobStore) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Jobs API listening");
    axum::serve(listener, app(store)).await
}

/// Handler for GET / (root)
async fn root_handler() -> &'static str {
    "Jobs API\n\nEndpoints:\n  GET    /api/jobs[?_limit=n]\n  GET    /api/jobs/{id}\n  POST   /api/jobs\n  PUT    /api/jobs/{id}\n  DELETE /api/jobs/{id}\n"
}

/// Handler for GET /api/jobs
async fn list_handler(State(store): State<JobStore>, Query(params): Query<ListParams>) -> Json<Vec<Job>> {
    let jobs = store.list(params.limit).await;
    tracing::debug!(limit = ?params.limit, returned = jobs.len(), "Listed jobs");
    Json(jobs)
}

/// Handler for GET /api/jobs/{id}
async fn get_handler(
    State(store): State<JobStore>,
    Path(id): Path<String>,
) -> Result<Json<Job>, ApiError> {
    let id = JobId::from(id);
    store.get(&id).await.map(Json).ok_or(ApiError::NotFound(id))
}

/// Handler for POST /api/jobs
async fn create_handler(State(store): State<JobStore>, Json(job): Json<Job>) -> impl IntoResponse {
    let created = store.insert(job).await;
    tracing::info!(id = ?created.id, title = %created.title, "Created job");
    (StatusCode::CREATED, Json(created))
}

/// Handler for PUT /api/jobs/{id}
async fn update_handler(
    State(store): State<JobStore>,
    Path(id): Path<String>,
    Json(job): Json<Job>,
) -> Result<Json<Job>, ApiError> {
    let id = JobId::from(id);
    match store.replace(&id, job).await {
        Some(updated) => {
            tracing::info!(id = %id, "Replaced job");
            Ok(Json(updated))
        }
        None => Err(ApiError::NotFound(id)),
    }
}

/// Handler for DELETE /api/jobs/{id}
async fn delete_handler(
    State(store): State<JobStore>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = JobId::from(id);
    match store.remove(&id).await {
        Some(_) => {
            tracing::info!(id = %id, "Deleted job");
            Ok(Json(json!({})))
        }
        None => Err(ApiError::NotFound(id)),
    }
}
