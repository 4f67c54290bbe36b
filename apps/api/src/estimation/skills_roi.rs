//! Skills ROI: what a set of skills is worth on its own, independent of a
//! full profile.

use serde::{Deserialize, Serialize};

use crate::estimation::estimator::resolve_skills;
use crate::models::prediction::SkillImpact;
use crate::models::profile::Profile;
use crate::reference::ReferenceTables;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsRoiReport {
    /// Plain sum of impact percentages.
    pub total_impact_percent: f64,
    /// Product of `(1 + impact/100)`, i.e. what the estimator actually applies.
    pub compounded_multiplier: f64,
    pub total_market_value: u64,
    pub breakdown: Vec<SkillImpact>,
    pub unknown_skills: Vec<String>,
}

pub fn skills_roi(skills: &[String], tables: &ReferenceTables) -> SkillsRoiReport {
    let profile = Profile {
        skills: skills.to_vec(),
        ..Default::default()
    };

    let unknown_skills = profile
        .distinct_skills()
        .into_iter()
        .filter(|s| tables.skill(s).is_none())
        .map(str::to_string)
        .collect();

    let mut breakdown: Vec<SkillImpact> = resolve_skills(&profile, tables)
        .into_iter()
        .map(|(name, info)| SkillImpact {
            skill: name.to_string(),
            impact_percent: info.impact_percent,
            demand: info.demand,
            market_value: info.market_value,
        })
        .collect();
    breakdown.sort_by(|a, b| b.impact_percent.total_cmp(&a.impact_percent));

    SkillsRoiReport {
        total_impact_percent: breakdown.iter().fold(0.0, |acc, s| acc + s.impact_percent),
        compounded_multiplier: breakdown
            .iter()
            .map(|s| 1.0 + s.impact_percent / 100.0)
            .product(),
        total_market_value: breakdown.iter().map(|s| s.market_value).sum(),
        breakdown,
        unknown_skills,
    }
}

/// The `limit` highest-impact skills in the tables.
pub fn top_skills(tables: &ReferenceTables, limit: usize) -> Vec<SkillImpact> {
    let mut all: Vec<SkillImpact> = tables
        .skills
        .iter()
        .map(|(name, info)| SkillImpact {
            skill: name.clone(),
            impact_percent: info.impact_percent,
            demand: info.demand,
            market_value: info.market_value,
        })
        .collect();
    all.sort_by(|a, b| b.impact_percent.total_cmp(&a.impact_percent));
    all.truncate(limit);
    all
}
