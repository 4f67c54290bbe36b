use serde::{Deserialize, Serialize};

use crate::reference::{CityInfo, CompanyInfo, DemandLevel};

/// One known skill's contribution to an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillImpact {
    pub skill: String,
    pub impact_percent: f64,
    pub demand: DemandLevel,
    pub market_value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityContext {
    pub name: String,
    #[serde(flatten)]
    pub info: CityInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyContext {
    pub name: String,
    #[serde(flatten)]
    pub info: CompanyInfo,
}

/// Output of a single estimate. Amounts are whole rupees.
///
/// Invariant: `display_range_low <= point_estimate <= display_range_high`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub point_estimate: u64,
    pub display_range_low: u64,
    pub display_range_high: u64,
    /// Negotiation leverage, 0 to 100.
    pub negotiation_score: u8,
    pub skill_breakdown: Vec<SkillImpact>,
    /// `None` when the city is not in the reference tables (fallback base pay used).
    pub city_context: Option<CityContext>,
    pub company_context: Option<CompanyContext>,
}
