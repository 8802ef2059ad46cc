use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::error::WorkerError;
use crate::service::WorkerNode;

/// Form (or query string) of a shorten request.
#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub url: Option<String>,
}

/// The `url` a shorten request asks for: the form body field if present,
/// otherwise the query string one. Missing or unreadable reads as empty.
pub fn requested_url(
    query: Result<Query<ShortenForm>, QueryRejection>,
    form: Result<Form<ShortenForm>, FormRejection>,
) -> String {
    form.ok()
        .and_then(|Form(form)| form.url)
        .or_else(|| query.ok().and_then(|Query(query)| query.url))
        .unwrap_or_default()
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// `POST /shorten` (form body) or `GET /shorten?url=`; answers with the
/// bare code.
async fn shorten_handler(
    State(node): State<WorkerNode>,
    query: Result<Query<ShortenForm>, QueryRejection>,
    form: Result<Form<ShortenForm>, FormRejection>,
) -> Result<String, WorkerError> {
    let url = requested_url(query, form);
    let code = node.handle_shorten(&url).await?;
    Ok(code.to_string())
}

/// Internal router of a worker node. Not meant to be exposed to clients.
pub fn router(node: WorkerNode) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/shorten", get(shorten_handler).post(shorten_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(node)
}
