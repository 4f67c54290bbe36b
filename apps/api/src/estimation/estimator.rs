//! Salary Estimator: pluggable, trait-based estimator over the reference tables.
//!
//! Default: `FormulaEstimator` (pure, deterministic, no I/O).
//!
//! Formula, applied in this order:
//! 1. base = city base pay (fallback base pay for an unknown city)
//! 2. base *= experience multiplier
//! 3. base += education bonus
//! 4. base *= job role multiplier (1.0 for an unknown or absent role)
//! 5. base *= (1 + impact/100) for each distinct known skill, in profile order
//! 6. base += company flat bonus
//! 7. round to whole rupees; display range is [point, point × (1 + spread/100)]

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::estimation::negotiation::score_negotiation;
use crate::models::prediction::{CityContext, CompanyContext, PredictionResult, SkillImpact};
use crate::models::profile::Profile;
use crate::reference::{ReferenceTables, SkillInfo};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("Invalid profile: missing required field '{0}'")]
    InvalidProfile(&'static str),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap estimation backends without touching the handlers.
///
/// Carried in `AppState` as `Arc<dyn SalaryEstimator>`.
pub trait SalaryEstimator: Send + Sync {
    fn estimate(
        &self,
        profile: &Profile,
        tables: &ReferenceTables,
    ) -> Result<PredictionResult, EstimateError>;

    /// Short label surfaced in responses.
    fn backend(&self) -> &'static str;
}

pub struct FormulaEstimator;

impl SalaryEstimator for FormulaEstimator {
    fn estimate(
        &self,
        profile: &Profile,
        tables: &ReferenceTables,
    ) -> Result<PredictionResult, EstimateError> {
        estimate_salary(profile, tables)
    }

    fn backend(&self) -> &'static str {
        "formula"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core formula
// ────────────────────────────────────────────────────────────────────────────

/// Resolves the profile's skills against the tables: unknown names are
/// dropped, and names that resolve to the same entry count once.
pub(crate) fn resolve_skills<'t>(
    profile: &Profile,
    tables: &'t ReferenceTables,
) -> Vec<(&'t str, &'t SkillInfo)> {
    let mut applied = HashSet::new();
    let mut resolved = Vec::new();
    for name in profile.distinct_skills() {
        match tables.skill(name) {
            Some((canonical, info)) => {
                if applied.insert(canonical) {
                    resolved.push((canonical, info));
                }
            }
            None => debug!(skill = name, "Unknown skill; no salary impact applied"),
        }
    }
    resolved
}

pub fn estimate_salary(
    profile: &Profile,
    tables: &ReferenceTables,
) -> Result<PredictionResult, EstimateError> {
    let city_name = profile
        .city_name()
        .ok_or(EstimateError::InvalidProfile("city"))?;
    let band = profile
        .experience
        .ok_or(EstimateError::InvalidProfile("experience"))?;

    let city = tables.city(city_name);
    let mut salary = match city {
        Some((_, info)) => info.base_pay as f64,
        None => {
            debug!(
                city = city_name,
                fallback = tables.fallback_base_pay,
                "Unknown city; using fallback base pay"
            );
            tables.fallback_base_pay as f64
        }
    };

    salary *= tables.experience_multiplier(band);

    if let Some(level) = profile.education {
        salary += tables.education_bonus(level) as f64;
    }

    if let Some(role) = profile.job_role_name() {
        match tables.role(role) {
            Some((_, multiplier)) => salary *= multiplier,
            None => debug!(role, "Unknown job role; no multiplier applied"),
        }
    }

    let skills = resolve_skills(profile, tables);
    let mut skill_breakdown = Vec::with_capacity(skills.len());
    for (name, info) in &skills {
        salary *= 1.0 + info.impact_percent / 100.0;
        skill_breakdown.push(SkillImpact {
            skill: name.to_string(),
            impact_percent: info.impact_percent,
            demand: info.demand,
            market_value: info.market_value,
        });
    }
    skill_breakdown.sort_by(|a, b| b.impact_percent.total_cmp(&a.impact_percent));

    let company_context = match profile.company_name() {
        Some(name) => match tables.company(name) {
            Some((canonical, info)) => {
                salary += info.flat_bonus as f64;
                Some(CompanyContext {
                    name: canonical.to_string(),
                    info: info.clone(),
                })
            }
            None => {
                debug!(company = name, "Unknown company; no bonus applied");
                None
            }
        },
        None => None,
    };

    let point_estimate = salary.round().max(0.0) as u64;
    let (display_range_low, display_range_high) =
        display_range(point_estimate, tables.range_spread_percent);

    Ok(PredictionResult {
        point_estimate,
        display_range_low,
        display_range_high,
        negotiation_score: score_negotiation(profile, tables),
        skill_breakdown,
        city_context: city.map(|(name, info)| CityContext {
            name: name.to_string(),
            info: info.clone(),
        }),
        company_context,
    })
}

/// One-sided range: the point estimate is the floor, the ceiling is widened
/// by `spread_percent`.
pub fn display_range(point: u64, spread_percent: f64) -> (u64, u64) {
    let high = (point as f64 * (1.0 + spread_percent.max(0.0) / 100.0)).round() as u64;
    (point, high.max(point))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
