pub mod page;
pub mod routes;
pub mod state;

pub use state::AppState;

use crate::utils::error::{AppError, Result};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.category() == crate::utils::error::ErrorCategory::Input {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        tracing::error!("❌ Request failed: {} (Category: {:?})", self, self.category());
        (status, self.user_friendly_message()).into_response()
    }
}

pub fn construct_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the page until the listener fails.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let app = construct_router(state);
    axum::serve(listener, app).await?;
    Ok(())
}
