//! Axum route handlers for the Estimation API.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::estimation::format::FormattedPrediction;
use crate::estimation::insights::{derive_insights, Insights};
use crate::estimation::negotiation::{score_negotiation, NegotiationLevel};
use crate::estimation::skills_roi::{skills_roi, top_skills, SkillsRoiReport};
use crate::models::prediction::{CompanyContext, PredictionResult};
use crate::models::profile::Profile;
use crate::reference::{CompanyTier, ReferenceTables};
use crate::state::AppState;

const ROI_RECOMMENDATION_COUNT: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub estimator: String,
    pub result: PredictionResult,
    pub insights: Insights,
    pub formatted: FormattedPrediction,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub predictions: Vec<Value>,
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize)]
pub struct NegotiationResponse {
    pub negotiation_score: u8,
    pub level: NegotiationLevel,
    pub advice: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillsRoiRequest {
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillsRoiResponse {
    #[serde(flatten)]
    pub report: SkillsRoiReport,
    /// Highest-impact skills the caller does not already have.
    pub recommended: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    pub tier: Option<CompanyTier>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

fn predict_one(state: &AppState, profile: &Profile) -> Result<PredictResponse, AppError> {
    let result = state.estimator.estimate(profile, &state.tables)?;
    let insights = derive_insights(&result, profile, &state.tables);
    let formatted = FormattedPrediction::new(&result, insights.monthly_estimate);

    Ok(PredictResponse {
        prediction_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        estimator: state.estimator.backend().to_string(),
        result,
        insights,
        formatted,
    })
}

/// POST /api/v1/predict
///
/// Estimates salary, range, and negotiation score for a single profile.
/// A profile without city or experience band is refused with INVALID_PROFILE.
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<Json<PredictResponse>, AppError> {
    let response = predict_one(&state, &profile)?;
    info!(
        prediction_id = %response.prediction_id,
        point_estimate = response.result.point_estimate,
        negotiation_score = response.result.negotiation_score,
        "Prediction computed"
    );
    Ok(Json(response))
}

/// POST /api/v1/predict/batch
///
/// One entry per input record, in input order. A record that is malformed or
/// refused yields an error entry; it does not fail the whole batch.
pub async fn handle_predict_batch(
    State(state): State<AppState>,
    Json(records): Json<Vec<Value>>,
) -> Result<Json<BatchResponse>, AppError> {
    if records.is_empty() {
        return Err(AppError::Validation(
            "batch must contain at least one profile".to_string(),
        ));
    }
    if records.len() > state.config.max_batch_size {
        return Err(AppError::Validation(format!(
            "batch of {} exceeds the limit of {} profiles",
            records.len(),
            state.config.max_batch_size
        )));
    }

    let total = records.len();
    let mut predictions = Vec::with_capacity(total);
    let mut failed = 0;
    for (index, record) in records.into_iter().enumerate() {
        let outcome = serde_json::from_value::<Profile>(record)
            .map_err(|e| AppError::Validation(format!("malformed profile: {e}")))
            .and_then(|profile| predict_one(&state, &profile));
        match outcome {
            Ok(response) => predictions.push(json!(response)),
            Err(e) => {
                failed += 1;
                debug!(index, error = %e, "Batch record refused");
                predictions.push(json!({
                    "index": index,
                    "error": { "code": e.code(), "message": e.to_string() }
                }));
            }
        }
    }

    info!(total, failed, "Batch prediction computed");
    Ok(Json(BatchResponse {
        succeeded: total - failed,
        failed,
        predictions,
    }))
}

/// POST /api/v1/negotiation-score
///
/// Scores negotiation leverage alone. Never refuses a profile.
pub async fn handle_negotiation_score(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Json<NegotiationResponse> {
    let negotiation_score = score_negotiation(&profile, &state.tables);
    let level = NegotiationLevel::from_score(negotiation_score);
    Json(NegotiationResponse {
        negotiation_score,
        level,
        advice: level.advice().to_string(),
    })
}

/// POST /api/v1/skills/roi
pub async fn handle_skills_roi(
    State(state): State<AppState>,
    Json(request): Json<SkillsRoiRequest>,
) -> Json<SkillsRoiResponse> {
    let report = skills_roi(&request.skills, &state.tables);
    let recommended = top_skills(&state.tables, state.tables.skills.len())
        .into_iter()
        .filter(|s| !report.breakdown.iter().any(|owned| owned.skill == s.skill))
        .take(ROI_RECOMMENDATION_COUNT)
        .map(|s| s.skill)
        .collect();

    Json(SkillsRoiResponse {
        report,
        recommended,
    })
}

/// GET /api/v1/reference
pub async fn handle_reference(State(state): State<AppState>) -> Json<ReferenceTables> {
    Json(state.tables.as_ref().clone())
}

/// GET /api/v1/companies?tier=unicorn
///
/// Companies ordered by average salary, highest first.
pub async fn handle_companies(
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
) -> Json<Vec<CompanyContext>> {
    let mut companies: Vec<CompanyContext> = state
        .tables
        .companies
        .iter()
        .filter(|(_, info)| query.tier.map_or(true, |t| info.tier == t))
        .map(|(name, info)| CompanyContext {
            name: name.clone(),
            info: info.clone(),
        })
        .collect();
    companies.sort_by(|a, b| b.info.average_salary.cmp(&a.info.average_salary));
    Json(companies)
}
