pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::estimation::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Estimation API
        .route("/api/v1/predict", post(handlers::handle_predict))
        .route("/api/v1/predict/batch", post(handlers::handle_predict_batch))
        .route(
            "/api/v1/negotiation-score",
            post(handlers::handle_negotiation_score),
        )
        .route("/api/v1/skills/roi", post(handlers::handle_skills_roi))
        // Reference data
        .route("/api/v1/reference", get(handlers::handle_reference))
        .route("/api/v1/companies", get(handlers::handle_companies))
        .fallback(not_found)
        .with_state(state)
}
