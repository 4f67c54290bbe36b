use serde::{Deserialize, Serialize};

use crate::estimation::estimator::resolve_skills;
use crate::models::profile::Profile;
use crate::reference::ReferenceTables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationLevel {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl NegotiationLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 80 => NegotiationLevel::Excellent,
            s if s >= 60 => NegotiationLevel::Good,
            s if s >= 40 => NegotiationLevel::Average,
            _ => NegotiationLevel::NeedsImprovement,
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            NegotiationLevel::Excellent => {
                "You're in an excellent position to negotiate. Consider asking for 15-20% above the offered salary."
            }
            NegotiationLevel::Good => "You have good leverage. Aim for 10-15% above the initial offer.",
            NegotiationLevel::Average | NegotiationLevel::NeedsImprovement => {
                "Focus on skill development and experience building before major negotiations."
            }
        }
    }
}

/// Heuristic 0–100 negotiation confidence. Independent of the salary figure
/// and never fails; absent fields simply earn no bonus.
///
/// score = base
///       + experience bonus for the band
///       + per-skill bonus × distinct known skills at VeryHigh/Extreme demand
///       + city bonus for a high-demand city
///       + relocation bonus
pub fn score_negotiation(profile: &Profile, tables: &ReferenceTables) -> u8 {
    let rules = &tables.negotiation;
    let mut score = rules.base_score;

    if let Some(band) = profile.experience {
        let bonus = rules.experience_bonus.get(&band).copied().unwrap_or(0);
        score = score.saturating_add(bonus);
    }

    let high_demand_skills = resolve_skills(profile, tables)
        .into_iter()
        .filter(|(_, info)| info.demand.is_high_demand())
        .count();
    let high_demand_skills = i32::try_from(high_demand_skills).unwrap_or(i32::MAX);
    score = score.saturating_add(
        rules
            .high_demand_skill_bonus
            .saturating_mul(high_demand_skills),
    );

    if profile
        .city_name()
        .is_some_and(|c| tables.is_high_demand_city(c))
    {
        score = score.saturating_add(rules.city_bonus);
    }

    if profile.willing_to_relocate {
        score = score.saturating_add(rules.relocation_bonus);
    }

    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::ExperienceBand;

    fn base_profile() -> Profile {
        Profile {
            city: Some("Chennai".to_string()),
            experience: Some(ExperienceBand::ZeroToOne),
            ..Default::default()
        }
    }

    #[test]
    fn test_base_score_is_fifty() {
        let tables = ReferenceTables::builtin();
        assert_eq!(score_negotiation(&base_profile(), &tables), 50);
    }

    #[test]
    fn test_experience_bonus_tiers() {
        let tables = ReferenceTables::builtin();
        let mut p = base_profile();

        p.experience = Some(ExperienceBand::ThreeToFive);
        assert_eq!(score_negotiation(&p, &tables), 60);
        p.experience = Some(ExperienceBand::FiveToTen);
        assert_eq!(score_negotiation(&p, &tables), 70);
        p.experience = Some(ExperienceBand::TenPlus);
        assert_eq!(score_negotiation(&p, &tables), 70);
    }

    #[test]
    fn test_only_high_demand_skills_count() {
        let tables = ReferenceTables::builtin();
        let mut p = base_profile();
        // AI = Extreme, AWS = VeryHigh, Java = High, Vue.js = Medium
        p.skills = vec!["AI", "AWS", "Java", "Vue.js", "Unknown"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(score_negotiation(&p, &tables), 60);
    }

    #[test]
    fn test_city_and_relocation_bonus() {
        let tables = ReferenceTables::builtin();
        let mut p = base_profile();
        p.city = Some("Bangalore".to_string());
        assert_eq!(score_negotiation(&p, &tables), 60);
        p.willing_to_relocate = true;
        assert_eq!(score_negotiation(&p, &tables), 75);
    }

    #[test]
    fn test_score_is_clamped_to_100() {
        let tables = ReferenceTables::builtin();
        let p = Profile {
            city: Some("Mumbai".to_string()),
            experience: Some(ExperienceBand::TenPlus),
            willing_to_relocate: true,
            skills: tables.skills.keys().cloned().collect(),
            ..Default::default()
        };
        assert_eq!(score_negotiation(&p, &tables), 100);
    }

    #[test]
    fn test_score_is_clamped_to_zero() {
        let mut tables = ReferenceTables::builtin();
        tables.negotiation.base_score = 0;
        tables.negotiation.relocation_bonus = -40;
        let mut p = base_profile();
        p.willing_to_relocate = true;
        assert_eq!(score_negotiation(&p, &tables), 0);
    }

    #[test]
    fn test_extreme_bonuses_saturate_instead_of_overflowing() {
        let mut tables = ReferenceTables::builtin();
        tables.negotiation.relocation_bonus = i32::MAX;
        tables.negotiation.high_demand_skill_bonus = i32::MAX;
        let p = Profile {
            city: Some("Bangalore".to_string()),
            willing_to_relocate: true,
            skills: vec!["AI".to_string(), "AWS".to_string()],
            ..base_profile()
        };
        assert_eq!(score_negotiation(&p, &tables), 100);

        tables.negotiation.relocation_bonus = i32::MIN;
        tables.negotiation.high_demand_skill_bonus = i32::MIN;
        assert_eq!(score_negotiation(&p, &tables), 0);
    }

    #[test]
    fn test_missing_fields_do_not_fail() {
        let tables = ReferenceTables::builtin();
        assert_eq!(score_negotiation(&Profile::default(), &tables), 50);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(NegotiationLevel::from_score(80), NegotiationLevel::Excellent);
        assert_eq!(NegotiationLevel::from_score(79), NegotiationLevel::Good);
        assert_eq!(NegotiationLevel::from_score(40), NegotiationLevel::Average);
        assert_eq!(
            NegotiationLevel::from_score(39),
            NegotiationLevel::NeedsImprovement
        );
        assert!(NegotiationLevel::Excellent.advice().contains("15-20%"));
    }
}
