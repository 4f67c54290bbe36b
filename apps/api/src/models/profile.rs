use std::collections::HashSet;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Years-of-experience bracket. Variant order is the ranking order used by
/// the multiplier table and the monotonicity guarantees of the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExperienceBand {
    #[serde(rename = "0-1 years", alias = "0-1")]
    ZeroToOne,
    #[serde(rename = "1-3 years", alias = "1-3")]
    OneToThree,
    #[serde(rename = "3-5 years", alias = "3-5")]
    ThreeToFive,
    #[serde(rename = "5-10 years", alias = "5-10")]
    FiveToTen,
    #[serde(rename = "10+ years", alias = "10+")]
    TenPlus,
}

impl ExperienceBand {
    pub const ALL: [ExperienceBand; 5] = [
        ExperienceBand::ZeroToOne,
        ExperienceBand::OneToThree,
        ExperienceBand::ThreeToFive,
        ExperienceBand::FiveToTen,
        ExperienceBand::TenPlus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExperienceBand::ZeroToOne => "0-1 years",
            ExperienceBand::OneToThree => "1-3 years",
            ExperienceBand::ThreeToFive => "3-5 years",
            ExperienceBand::FiveToTen => "5-10 years",
            ExperienceBand::TenPlus => "10+ years",
        }
    }

    /// The next bracket up, or `None` for the top bracket.
    pub fn next(self) -> Option<ExperienceBand> {
        let idx = Self::ALL.iter().position(|b| *b == self)?;
        Self::ALL.get(idx + 1).copied()
    }
}

impl fmt::Display for ExperienceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "Diploma", alias = "diploma")]
    Diploma,
    #[serde(rename = "Bachelor's", alias = "bachelors")]
    Bachelors,
    #[serde(rename = "Master's", alias = "masters")]
    Masters,
    #[serde(rename = "PhD", alias = "phd")]
    Phd,
}

/// Reads an optional label field, mapping anything unrecognised to `None`
/// instead of rejecting the whole profile.
fn lenient_label<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match T::deserialize(&value) {
        Ok(label) => Some(label),
        Err(_) => {
            debug!(%value, "Unrecognised label, treating as missing");
            None
        }
    }))
}

/// A submitted salary profile. Only `city` and `experience` are required;
/// everything else contributes nothing when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub age_band: Option<String>,
    pub gender: Option<String>,
    #[serde(deserialize_with = "lenient_label")]
    pub education: Option<EducationLevel>,
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient_label")]
    pub experience: Option<ExperienceBand>,
    pub job_role: Option<String>,
    pub company: Option<String>,
    pub current_salary: Option<u64>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub work_preference: Option<String>,
    pub company_type: Option<String>,
    pub willing_to_relocate: bool,
    pub expected_growth: Option<String>,
}

impl Profile {
    /// Skills with blanks dropped and duplicates collapsed, keeping first-seen order.
    pub fn distinct_skills(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// City name if present and non-blank.
    pub fn city_name(&self) -> Option<&str> {
        self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    pub fn job_role_name(&self) -> Option<&str> {
        self.job_role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_experience_band_accepts_long_and_short_labels() {
        let long: ExperienceBand = serde_json::from_value(json!("5-10 years")).unwrap();
        let short: ExperienceBand = serde_json::from_value(json!("5-10")).unwrap();
        assert_eq!(long, ExperienceBand::FiveToTen);
        assert_eq!(short, ExperienceBand::FiveToTen);
        assert_eq!(serde_json::to_value(long).unwrap(), json!("5-10 years"));
    }

    #[test]
    fn test_experience_band_ordering_and_next() {
        assert!(ExperienceBand::ZeroToOne < ExperienceBand::TenPlus);
        assert_eq!(
            ExperienceBand::ThreeToFive.next(),
            Some(ExperienceBand::FiveToTen)
        );
        assert_eq!(ExperienceBand::TenPlus.next(), None);
    }

    #[test]
    fn test_profile_defaults_missing_fields() {
        let profile: Profile = serde_json::from_value(json!({
            "city": "Pune",
            "experience": "1-3 years"
        }))
        .unwrap();
        assert_eq!(profile.city_name(), Some("Pune"));
        assert!(profile.skills.is_empty());
        assert!(!profile.willing_to_relocate);
        assert!(profile.education.is_none());
    }

    #[test]
    fn test_distinct_skills_keeps_first_occurrence() {
        let profile = Profile {
            skills: vec![
                "AWS".to_string(),
                "Python".to_string(),
                " AWS ".to_string(),
                "".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(profile.distinct_skills(), vec!["AWS", "Python"]);
    }

    #[test]
    fn test_blank_city_is_treated_as_missing() {
        let profile = Profile {
            city: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.city_name(), None);
    }

    #[test]
    fn test_unrecognised_labels_read_as_missing() {
        let profile: Profile = serde_json::from_value(json!({
            "city": "Pune",
            "experience": "7 years",
            "education": "High School"
        }))
        .unwrap();
        assert_eq!(profile.city_name(), Some("Pune"));
        assert!(profile.experience.is_none());
        assert!(profile.education.is_none());

        let profile: Profile =
            serde_json::from_value(json!({ "experience": 3, "education": null })).unwrap();
        assert!(profile.experience.is_none());
        assert!(profile.education.is_none());
    }

    #[test]
    fn test_education_level_labels() {
        let level: EducationLevel = serde_json::from_value(json!("Master's")).unwrap();
        assert_eq!(level, EducationLevel::Masters);
        assert!(EducationLevel::Diploma < EducationLevel::Phd);
    }
}
