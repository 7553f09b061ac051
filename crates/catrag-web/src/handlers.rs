use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use tracing::{error, info};

use catrag_core::Category;

use crate::page::index_page;
use crate::server::AppState;

#[derive(serde::Deserialize)]
pub(crate) struct QueryRequest {
    pub category: String,
    pub question: String,
}

#[derive(serde::Serialize)]
struct QueryResponse {
    category: &'static str,
    answer: String,
}

#[derive(serde::Serialize)]
struct CategoryInfo {
    name: &'static str,
    slug: &'static str,
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

pub(crate) async fn index_handler() -> Html<String> {
    Html(index_page())
}

pub(crate) async fn categories_handler() -> impl IntoResponse {
    let categories: Vec<CategoryInfo> =
        Category::ALL.iter().map(|c| CategoryInfo { name: c.display_name(), slug: c.slug() }).collect();
    Json(categories)
}

pub(crate) async fn query_handler(State(state): State<AppState>, Json(req): Json<QueryRequest>) -> Response {
    let category = match req.category.parse::<Category>() {
        Ok(c) => c,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };
    let question = req.question.trim();
    if question.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "question must not be empty".to_string());
    }
    info!(category = %category, "question received");
    match state.service.answer(category, question).await {
        Ok(answer) => Json(QueryResponse { category: category.display_name(), answer }).into_response(),
        Err(e) => {
            error!("query failed for {}: {:#}", category, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))
        }
    }
}

pub(crate) async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse { status: "ok", uptime_secs: state.started_at.elapsed().as_secs() })
}
