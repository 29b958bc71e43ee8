use crate::domain::model::PassengerForm;
use crate::server::page::PageView;
use crate::server::state::AppState;
use crate::utils::error::AppError;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .route("/health", get(health))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

#[tracing::instrument(name = "GET /", skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = state.page.render(&PageView::initial())?;
    Ok(Html(html))
}

/// 只有明確送出表單時才執行推論
#[tracing::instrument(name = "POST /predict", skip(state, form))]
pub async fn predict(
    State(state): State<AppState>,
    Form(form): Form<PassengerForm>,
) -> Result<Html<String>, AppError> {
    let submission = state.pipeline.submit(form);
    let html = state.page.render(&PageView::from_submission(&submission))?;
    Ok(Html(html))
}

#[tracing::instrument(name = "GET /health", skip(state))]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.model_name().to_string(),
    })
}
