use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A named capability a posting can require or a resume can list; the level
/// is informational and never compared during screening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capability {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenderRule {
    All,
    Male,
    Female,
}

impl GenderRule {
    /// Unknown labels fall back to `All`, the store's column default.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Male" => GenderRule::Male,
            "Female" => GenderRule::Female,
            _ => GenderRule::All,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            GenderRule::All => "All",
            GenderRule::Male => "Male",
            GenderRule::Female => "Female",
        }
    }
}

impl Default for GenderRule {
    fn default() -> Self {
        GenderRule::All
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Posting {
    pub id: Uuid,
    pub job_id: Uuid,
    pub description: String,
    pub quota: Option<i32>,
    pub status: String,
    pub deadline: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub qualification: String,
    pub experience_min: Option<i32>,
    pub experience_max: Option<i32>,
    pub languages: Json<Vec<Capability>>,
    pub technical_skills: Json<Vec<Capability>>,
    pub soft_skills: Json<Vec<Capability>>,
    pub gender: String,
    pub created_at: DateTime<Utc>,
}

/// Lower-cased capability names, the form every screening comparison uses.
pub fn capability_names_lowercase(capabilities: &[Capability]) -> Vec<String> {
    capabilities
        .iter()
        .map(|capability| capability.name.to_lowercase())
        .collect()
}
