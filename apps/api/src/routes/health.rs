use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, and which reference data is loaded.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "salary-api",
        "estimator": state.estimator.backend(),
        "reference": {
            "cities": state.tables.cities.len(),
            "companies": state.tables.companies.len(),
            "skills": state.tables.skills.len(),
        },
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
