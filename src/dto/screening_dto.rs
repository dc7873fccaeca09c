use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::posting::GenderRule;
use crate::models::resume::ResumeSnapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceRange {
    pub min: i64,
    pub max: i64,
}

/// Year/month eligibility gate. Both fields must be present for the gate to
/// apply; months are calendar months 1-12.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateCutoff {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl DateCutoff {
    pub fn active(&self) -> Option<(i32, u32)> {
        match (self.year, self.month) {
            (Some(year), Some(month)) if (1..=12).contains(&month) => Some((year, month)),
            _ => None,
        }
    }
}

/// The criteria one screening run compares every application against.
/// Every field carries a neutral default, so a partial caller override
/// degrades instead of erroring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequirementSet {
    pub qualification: String,
    pub experience: ExperienceRange,
    pub languages: Vec<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub gender: GenderRule,
    pub rejected_applications: Vec<Uuid>,
    pub date: DateCutoff,
}

impl RequirementSet {
    /// Name comparisons are case-insensitive throughout; the set owns that
    /// invariant rather than trusting the caller's casing.
    pub fn normalize(&mut self) {
        for list in [
            &mut self.languages,
            &mut self.technical_skills,
            &mut self.soft_skills,
        ] {
            for name in list.iter_mut() {
                *name = name.to_lowercase();
            }
        }
    }
}

/// Per-dimension signed scores: -1 fails the requirement, 0 meets it,
/// +1 exceeds it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreVector {
    pub qualification: i8,
    pub experience: i8,
    pub gender: i8,
    pub languages: i8,
    pub technical_skills: i8,
    pub soft_skills: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Overqualified,
    Qualified,
    Underqualified,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenedApplicant {
    pub id: Uuid,
    pub resume: Option<ResumeSnapshot>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenedApplication {
    pub id: Uuid,
    pub applicant: ScreenedApplicant,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub languages: Vec<String>,
    pub experience: ExperienceRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResponse {
    pub overqualified: Vec<ScreenedApplication>,
    pub underqualified: Vec<ScreenedApplication>,
    pub qualified: Vec<ScreenedApplication>,
    pub rejected: Vec<ScreenedApplication>,
    pub probable: Vec<ScreenedApplication>,
    pub requirements: RequirementSet,
    pub options: FilterOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterPayload {
    pub requirements: Option<RequirementSet>,
}
