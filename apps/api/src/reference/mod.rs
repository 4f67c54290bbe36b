//! Reference tables: the constant market data every estimate is computed from.
//!
//! Tables are built once at startup (bundled defaults or a JSON file) and are
//! read-only afterwards; `AppState` shares them behind an `Arc`.
//!
//! Lookups never fail: an unknown city, company, or skill simply resolves to
//! `None` and the estimator applies its zero/default contribution.

pub mod defaults;
pub mod loader;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::profile::{EducationLevel, ExperienceBand};

// ────────────────────────────────────────────────────────────────────────────
// Table entry types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandLevel {
    Low,
    Medium,
    High,
    VeryHigh,
    Extreme,
}

impl DemandLevel {
    /// Skills at or above `VeryHigh` count towards negotiation leverage.
    pub fn is_high_demand(self) -> bool {
        matches!(self, DemandLevel::VeryHigh | DemandLevel::Extreme)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyTier {
    Services,
    Startup,
    Unicorn,
    Tier1,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityInfo {
    pub base_pay: u64,
    pub demand: DemandLevel,
    pub active_companies: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub average_salary: u64,
    pub tier: CompanyTier,
    pub yearly_growth_percent: i32,
    /// Flat amount added to an estimate for this employer.
    #[serde(default)]
    pub flat_bonus: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillInfo {
    pub impact_percent: f64,
    pub demand: DemandLevel,
    pub market_value: u64,
}

/// Knobs for the negotiation heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationRules {
    pub base_score: i32,
    pub experience_bonus: BTreeMap<ExperienceBand, i32>,
    pub high_demand_skill_bonus: i32,
    pub high_demand_cities: Vec<String>,
    pub city_bonus: i32,
    pub relocation_bonus: i32,
}

/// The full set of lookup data the estimator consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub cities: BTreeMap<String, CityInfo>,
    pub companies: BTreeMap<String, CompanyInfo>,
    pub skills: BTreeMap<String, SkillInfo>,
    pub experience_multipliers: BTreeMap<ExperienceBand, f64>,
    pub education_bonus: BTreeMap<EducationLevel, u64>,
    /// Multiplier per job role, applied after the education bonus.
    #[serde(default)]
    pub role_multipliers: BTreeMap<String, f64>,
    /// Base pay used when the profile's city is not in `cities`.
    pub fallback_base_pay: u64,
    /// Upper display bound = point estimate widened by this percentage.
    pub range_spread_percent: f64,
    pub negotiation: NegotiationRules,
}

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("experience multiplier for '{band}' must be at least 1.0, got {value}")]
    MultiplierBelowOne { band: ExperienceBand, value: f64 },

    #[error("experience multipliers must not decrease ('{lower}' > '{higher}')")]
    MultiplierNotMonotonic {
        lower: ExperienceBand,
        higher: ExperienceBand,
    },

    #[error("education bonuses must not decrease with level ('{0:?}')")]
    EducationNotMonotonic(EducationLevel),

    #[error("skill '{0}' has a negative or non-finite impact percentage")]
    InvalidSkillImpact(String),

    #[error("range spread must be a non-negative finite percentage, got {0}")]
    InvalidRangeSpread(f64),

    #[error("negotiation base score must be within 0..=100, got {0}")]
    InvalidBaseScore(i32),

    #[error("negotiation {name} must be within -100..=100, got {value}")]
    BonusOutOfRange { name: String, value: i32 },

    #[error("role multiplier for '{0}' must be a finite value of at least 1.0")]
    InvalidRoleMultiplier(String),
}

/// Bounds for every negotiation bonus; the score is clamped to 0..=100 anyway.
const BONUS_RANGE: std::ops::RangeInclusive<i32> = -100..=100;

// ────────────────────────────────────────────────────────────────────────────
// Lookups
// ────────────────────────────────────────────────────────────────────────────

/// Exact key match first, then ASCII case-insensitive.
fn lookup<'a, V>(map: &'a BTreeMap<String, V>, key: &str) -> Option<(&'a str, &'a V)> {
    let key = key.trim();
    if let Some((k, v)) = map.get_key_value(key) {
        return Some((k.as_str(), v));
    }
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(k, v)| (k.as_str(), v))
}

impl ReferenceTables {
    pub fn city(&self, name: &str) -> Option<(&str, &CityInfo)> {
        lookup(&self.cities, name)
    }

    pub fn company(&self, name: &str) -> Option<(&str, &CompanyInfo)> {
        lookup(&self.companies, name)
    }

    pub fn skill(&self, name: &str) -> Option<(&str, &SkillInfo)> {
        lookup(&self.skills, name)
    }

    /// Multiplier for a band; a band missing from the table is a no-op (1.0).
    pub fn experience_multiplier(&self, band: ExperienceBand) -> f64 {
        self.experience_multipliers
            .get(&band)
            .copied()
            .unwrap_or(1.0)
    }

    pub fn education_bonus(&self, level: EducationLevel) -> u64 {
        self.education_bonus.get(&level).copied().unwrap_or(0)
    }

    pub fn role(&self, name: &str) -> Option<(&str, f64)> {
        lookup(&self.role_multipliers, name).map(|(k, m)| (k, *m))
    }

    pub fn is_high_demand_city(&self, name: &str) -> bool {
        let name = name.trim();
        self.negotiation
            .high_demand_cities
            .iter()
            .any(|c| c.eq_ignore_ascii_case(name))
    }

    /// Checks the ordering and range guarantees the estimator relies on.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut previous: Option<(ExperienceBand, f64)> = None;
        for (&band, &value) in &self.experience_multipliers {
            if !value.is_finite() || value < 1.0 {
                return Err(TableError::MultiplierBelowOne { band, value });
            }
            if let Some((lower, prev)) = previous {
                if value < prev {
                    return Err(TableError::MultiplierNotMonotonic {
                        lower,
                        higher: band,
                    });
                }
            }
            previous = Some((band, value));
        }

        let mut prev_bonus = 0_u64;
        for (&level, &bonus) in &self.education_bonus {
            if bonus < prev_bonus {
                return Err(TableError::EducationNotMonotonic(level));
            }
            prev_bonus = bonus;
        }

        for (name, skill) in &self.skills {
            if !skill.impact_percent.is_finite() || skill.impact_percent < 0.0 {
                return Err(TableError::InvalidSkillImpact(name.clone()));
            }
        }

        for (role, &multiplier) in &self.role_multipliers {
            if !multiplier.is_finite() || multiplier < 1.0 {
                return Err(TableError::InvalidRoleMultiplier(role.clone()));
            }
        }

        if !self.range_spread_percent.is_finite() || self.range_spread_percent < 0.0 {
            return Err(TableError::InvalidRangeSpread(self.range_spread_percent));
        }

        if !(0..=100).contains(&self.negotiation.base_score) {
            return Err(TableError::InvalidBaseScore(self.negotiation.base_score));
        }

        let rules = &self.negotiation;
        let bonuses = rules
            .experience_bonus
            .iter()
            .map(|(band, &value)| (format!("experience bonus for '{band}'"), value))
            .chain([
                ("high-demand skill bonus".to_string(), rules.high_demand_skill_bonus),
                ("city bonus".to_string(), rules.city_bonus),
                ("relocation bonus".to_string(), rules.relocation_bonus),
            ]);
        for (name, value) in bonuses {
            if !BONUS_RANGE.contains(&value) {
                return Err(TableError::BonusOutOfRange { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_valid() {
        assert_eq!(ReferenceTables::builtin().validate(), Ok(()));
    }

    #[test]
    fn test_lookup_exact_then_case_insensitive() {
        let tables = ReferenceTables::builtin();
        let (name, city) = tables.city("bangalore").unwrap();
        assert_eq!(name, "Bangalore");
        assert_eq!(city.base_pay, 850_000);
        assert!(tables.skill("Node.js").is_some());
        assert!(tables.company("Atlantis Corp").is_none());
    }

    #[test]
    fn test_missing_band_multiplier_is_noop() {
        let mut tables = ReferenceTables::builtin();
        tables
            .experience_multipliers
            .remove(&ExperienceBand::TenPlus);
        assert_eq!(tables.experience_multiplier(ExperienceBand::TenPlus), 1.0);
    }

    #[test]
    fn test_validate_rejects_decreasing_multipliers() {
        let mut tables = ReferenceTables::builtin();
        tables
            .experience_multipliers
            .insert(ExperienceBand::FiveToTen, 1.5);
        assert_eq!(
            tables.validate(),
            Err(TableError::MultiplierNotMonotonic {
                lower: ExperienceBand::ThreeToFive,
                higher: ExperienceBand::FiveToTen,
            })
        );
    }

    #[test]
    fn test_validate_rejects_multiplier_below_one() {
        let mut tables = ReferenceTables::builtin();
        tables
            .experience_multipliers
            .insert(ExperienceBand::ZeroToOne, 0.9);
        assert!(matches!(
            tables.validate(),
            Err(TableError::MultiplierBelowOne { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_decreasing_education_bonus() {
        let mut tables = ReferenceTables::builtin();
        tables.education_bonus.insert(EducationLevel::Phd, 10_000);
        assert_eq!(
            tables.validate(),
            Err(TableError::EducationNotMonotonic(EducationLevel::Phd))
        );
    }

    #[test]
    fn test_validate_rejects_negative_skill_impact() {
        let mut tables = ReferenceTables::builtin();
        if let Some(skill) = tables.skills.get_mut("Java") {
            skill.impact_percent = -5.0;
        }
        assert_eq!(
            tables.validate(),
            Err(TableError::InvalidSkillImpact("Java".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_bad_spread_and_base_score() {
        let mut tables = ReferenceTables::builtin();
        tables.range_spread_percent = -1.0;
        assert!(matches!(
            tables.validate(),
            Err(TableError::InvalidRangeSpread(_))
        ));

        let mut tables = ReferenceTables::builtin();
        tables.negotiation.base_score = 120;
        assert_eq!(tables.validate(), Err(TableError::InvalidBaseScore(120)));
    }

    #[test]
    fn test_validate_rejects_oversized_negotiation_bonuses() {
        let mut tables = ReferenceTables::builtin();
        tables.negotiation.relocation_bonus = i32::MAX;
        assert_eq!(
            tables.validate(),
            Err(TableError::BonusOutOfRange {
                name: "relocation bonus".to_string(),
                value: i32::MAX,
            })
        );

        let mut tables = ReferenceTables::builtin();
        tables
            .negotiation
            .experience_bonus
            .insert(ExperienceBand::TenPlus, -101);
        assert!(matches!(
            tables.validate(),
            Err(TableError::BonusOutOfRange { value: -101, .. })
        ));

        let mut tables = ReferenceTables::builtin();
        tables.negotiation.high_demand_skill_bonus = 100;
        tables.negotiation.city_bonus = -100;
        assert_eq!(tables.validate(), Ok(()));
    }

    #[test]
    fn test_role_lookup_ignores_case() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.role("Data Scientist"), Some(("Data Scientist", 1.8)));
        assert_eq!(tables.role("product manager"), Some(("Product Manager", 2.0)));
        assert_eq!(tables.role("Astronaut"), None);
    }

    #[test]
    fn test_validate_rejects_role_multiplier_below_one() {
        let mut tables = ReferenceTables::builtin();
        tables.role_multipliers.insert("Intern".to_string(), 0.5);
        assert_eq!(
            tables.validate(),
            Err(TableError::InvalidRoleMultiplier("Intern".to_string()))
        );
    }

    #[test]
    fn test_high_demand_city_match_ignores_case() {
        let tables = ReferenceTables::builtin();
        assert!(tables.is_high_demand_city("mumbai"));
        assert!(!tables.is_high_demand_city("Chennai"));
    }

    #[test]
    fn test_demand_level_high_demand() {
        assert!(DemandLevel::Extreme.is_high_demand());
        assert!(DemandLevel::VeryHigh.is_high_demand());
        assert!(!DemandLevel::High.is_high_demand());
    }
}
