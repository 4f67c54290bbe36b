//! Presentation-neutral insights derived from a finished `PredictionResult`.

use serde::{Deserialize, Serialize};

use crate::estimation::negotiation::NegotiationLevel;
use crate::models::prediction::PredictionResult;
use crate::models::profile::{ExperienceBand, Profile};
use crate::reference::ReferenceTables;

const TOP_TEN_THRESHOLD: u64 = 2_000_000;
const TOP_TWENTY_FIVE_THRESHOLD: u64 = 1_200_000;
const BASE_GROWTH_PERCENT: u32 = 12;
const GROWTH_PER_SKILL_PERCENT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPosition {
    TopTen,
    TopTwentyFive,
    Average,
}

impl MarketPosition {
    pub fn from_estimate(point: u64) -> Self {
        if point > TOP_TEN_THRESHOLD {
            MarketPosition::TopTen
        } else if point > TOP_TWENTY_FIVE_THRESHOLD {
            MarketPosition::TopTwentyFive
        } else {
            MarketPosition::Average
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerStep {
    pub next_band: ExperienceBand,
    /// Rounded increase of the next band's multiplier over the current one.
    pub multiplier_jump_percent: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub market_position: MarketPosition,
    pub growth_potential_percent: u32,
    pub negotiation_level: NegotiationLevel,
    pub negotiation_advice: String,
    pub monthly_estimate: u64,
    pub next_career_step: Option<CareerStep>,
}

pub fn derive_insights(
    result: &PredictionResult,
    profile: &Profile,
    tables: &ReferenceTables,
) -> Insights {
    let negotiation_level = NegotiationLevel::from_score(result.negotiation_score);

    Insights {
        market_position: MarketPosition::from_estimate(result.point_estimate),
        growth_potential_percent: BASE_GROWTH_PERCENT
            + GROWTH_PER_SKILL_PERCENT * result.skill_breakdown.len() as u32,
        negotiation_level,
        negotiation_advice: negotiation_level.advice().to_string(),
        monthly_estimate: (result.point_estimate as f64 / 12.0).round() as u64,
        next_career_step: profile
            .experience
            .and_then(|band| next_career_step(band, tables)),
    }
}

fn next_career_step(band: ExperienceBand, tables: &ReferenceTables) -> Option<CareerStep> {
    let next_band = band.next()?;
    let current = tables.experience_multiplier(band);
    let next = tables.experience_multiplier(next_band);
    Some(CareerStep {
        next_band,
        multiplier_jump_percent: ((next / current - 1.0) * 100.0).round() as i64,
    })
}
