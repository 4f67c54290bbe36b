//! Bundled Indian-market reference data. Amounts are annual INR.

use std::collections::BTreeMap;

use super::{
    CityInfo, CompanyInfo, CompanyTier, DemandLevel, NegotiationRules, ReferenceTables, SkillInfo,
};
use crate::models::profile::{EducationLevel, ExperienceBand};

use CompanyTier::{Services, Startup, Tier1, Unicorn};
use DemandLevel::{Extreme, High, Medium, VeryHigh};

pub const FALLBACK_BASE_PAY: u64 = 600_000;
pub const RANGE_SPREAD_PERCENT: f64 = 20.0;

// (name, base pay, demand, active companies)
const CITIES: &[(&str, u64, DemandLevel, u32)] = &[
    ("Bangalore", 850_000, VeryHigh, 120),
    ("Mumbai", 900_000, High, 85),
    ("Delhi/NCR", 800_000, High, 95),
    ("Pune", 750_000, High, 75),
    ("Chennai", 720_000, Medium, 60),
    ("Hyderabad", 780_000, High, 70),
    ("Kolkata", 650_000, Medium, 45),
    ("Ahmedabad", 680_000, Medium, 40),
];

// (name, average salary, tier, yearly growth %, flat bonus)
const COMPANIES: &[(&str, u64, CompanyTier, i32, u64)] = &[
    ("Google", 3_500_000, Tier1, 25, 800_000),
    ("Microsoft", 3_200_000, Tier1, 23, 750_000),
    ("Amazon", 2_800_000, Tier1, 20, 700_000),
    ("Meta", 3_800_000, Tier1, 28, 0),
    ("Apple", 3_600_000, Tier1, 26, 0),
    ("Flipkart", 2_200_000, Unicorn, 18, 0),
    ("Zomato", 1_800_000, Unicorn, 15, 0),
    ("Paytm", 1_900_000, Unicorn, 16, 0),
    ("Swiggy", 1_850_000, Unicorn, 15, 0),
    ("Ola", 1_750_000, Unicorn, 14, 0),
    ("Byju's", 1_600_000, Unicorn, 12, 0),
    ("Unacademy", 1_550_000, Unicorn, 13, 0),
    ("Razorpay", 2_000_000, Startup, 17, 0),
    ("Freshworks", 1_900_000, Startup, 16, 0),
    ("Zoho", 1_400_000, Startup, 12, 0),
    ("Chargebee", 1_800_000, Startup, 15, 0),
    ("TCS", 800_000, Services, 8, 100_000),
    ("Infosys", 850_000, Services, 9, 120_000),
    ("Wipro", 780_000, Services, 7, 0),
    ("HCL", 750_000, Services, 8, 0),
    ("Accenture", 950_000, Services, 10, 0),
    ("Capgemini", 900_000, Services, 9, 0),
    ("IBM", 1_100_000, Services, 11, 0),
];

// (name, salary impact %, demand, market value)
const SKILLS: &[(&str, f64, DemandLevel, u64)] = &[
    ("React", 15.0, VeryHigh, 150_000),
    ("Node.js", 12.0, High, 120_000),
    ("Python", 18.0, VeryHigh, 180_000),
    ("Java", 10.0, High, 100_000),
    ("JavaScript", 14.0, VeryHigh, 140_000),
    ("AWS", 25.0, VeryHigh, 250_000),
    ("Azure", 22.0, High, 220_000),
    ("Google Cloud", 20.0, High, 200_000),
    ("Docker", 16.0, High, 160_000),
    ("Kubernetes", 24.0, VeryHigh, 240_000),
    ("Machine Learning", 30.0, VeryHigh, 300_000),
    ("Data Science", 28.0, VeryHigh, 280_000),
    ("AI", 35.0, Extreme, 350_000),
    ("DevOps", 20.0, VeryHigh, 200_000),
    ("Angular", 13.0, High, 130_000),
    ("Vue.js", 11.0, Medium, 110_000),
];

const EXPERIENCE_MULTIPLIERS: &[(ExperienceBand, f64)] = &[
    (ExperienceBand::ZeroToOne, 1.0),
    (ExperienceBand::OneToThree, 1.4),
    (ExperienceBand::ThreeToFive, 2.1),
    (ExperienceBand::FiveToTen, 3.2),
    (ExperienceBand::TenPlus, 4.8),
];

const EDUCATION_BONUS: &[(EducationLevel, u64)] = &[
    (EducationLevel::Diploma, 0),
    (EducationLevel::Bachelors, 50_000),
    (EducationLevel::Masters, 150_000),
    (EducationLevel::Phd, 250_000),
];

const ROLE_MULTIPLIERS: &[(&str, f64)] = &[
    ("Software Engineer", 1.2),
    ("Data Scientist", 1.8),
    ("Product Manager", 2.0),
    ("Machine Learning Engineer", 1.9),
    ("DevOps Engineer", 1.4),
    ("Full Stack Developer", 1.3),
];

const NEGOTIATION_EXPERIENCE_BONUS: &[(ExperienceBand, i32)] = &[
    (ExperienceBand::ThreeToFive, 10),
    (ExperienceBand::FiveToTen, 20),
    (ExperienceBand::TenPlus, 20),
];

const HIGH_DEMAND_CITIES: &[&str] = &["Bangalore", "Mumbai"];

impl ReferenceTables {
    /// The bundled market data set.
    pub fn builtin() -> Self {
        let cities = CITIES
            .iter()
            .map(|&(name, base_pay, demand, active_companies)| {
                (
                    name.to_string(),
                    CityInfo {
                        base_pay,
                        demand,
                        active_companies,
                    },
                )
            })
            .collect();

        let companies = COMPANIES
            .iter()
            .map(|&(name, average_salary, tier, growth, flat_bonus)| {
                (
                    name.to_string(),
                    CompanyInfo {
                        average_salary,
                        tier,
                        yearly_growth_percent: growth,
                        flat_bonus,
                    },
                )
            })
            .collect();

        let skills = SKILLS
            .iter()
            .map(|&(name, impact_percent, demand, market_value)| {
                (
                    name.to_string(),
                    SkillInfo {
                        impact_percent,
                        demand,
                        market_value,
                    },
                )
            })
            .collect();

        ReferenceTables {
            cities,
            companies,
            skills,
            experience_multipliers: EXPERIENCE_MULTIPLIERS.iter().copied().collect(),
            education_bonus: EDUCATION_BONUS.iter().copied().collect(),
            role_multipliers: ROLE_MULTIPLIERS
                .iter()
                .map(|&(role, multiplier)| (role.to_string(), multiplier))
                .collect(),
            fallback_base_pay: FALLBACK_BASE_PAY,
            range_spread_percent: RANGE_SPREAD_PERCENT,
            negotiation: NegotiationRules {
                base_score: 50,
                experience_bonus: NEGOTIATION_EXPERIENCE_BONUS
                    .iter()
                    .copied()
                    .collect::<BTreeMap<_, _>>(),
                high_demand_skill_bonus: 5,
                high_demand_cities: HIGH_DEMAND_CITIES.iter().map(|c| c.to_string()).collect(),
                city_bonus: 10,
                relocation_bonus: 15,
            },
        }
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_sizes() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.cities.len(), 8);
        assert_eq!(tables.companies.len(), 23);
        assert_eq!(tables.skills.len(), 16);
        assert_eq!(tables.experience_multipliers.len(), 5);
        assert_eq!(tables.role_multipliers.len(), 6);
    }

    #[test]
    fn test_fallback_base_pay_is_below_every_city() {
        let tables = ReferenceTables::builtin();
        assert!(tables
            .cities
            .values()
            .all(|c| c.base_pay > tables.fallback_base_pay));
    }

    #[test]
    fn test_flat_bonus_only_for_listed_employers() {
        let tables = ReferenceTables::builtin();
        let with_bonus: Vec<&str> = tables
            .companies
            .iter()
            .filter(|(_, c)| c.flat_bonus > 0)
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(
            with_bonus,
            vec!["Amazon", "Google", "Infosys", "Microsoft", "TCS"]
        );
    }
}
