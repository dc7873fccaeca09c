use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::job::Job;
use crate::models::posting::{Capability, Posting};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryRangePayload {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceRangePayload {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostingPayload {
    pub company_id: Uuid,
    #[validate(length(min = 1))]
    pub title: String,
    /// Employment type of the underlying job.
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1))]
    pub environment: String,
    #[validate(length(min = 1))]
    pub industry: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub quota: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub salary_range: SalaryRangePayload,
    #[validate(length(min = 1))]
    pub qualification: String,
    #[serde(default)]
    pub experience: ExperienceRangePayload,
    #[serde(default)]
    pub languages: Vec<Capability>,
    #[serde(default)]
    pub technical_skills: Vec<Capability>,
    #[serde(default)]
    pub soft_skills: Vec<Capability>,
    #[serde(default = "default_gender")]
    pub gender: String,
}

fn default_gender() -> String {
    "All".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostingPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1))]
    pub environment: String,
    #[validate(length(min = 1))]
    pub industry: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub quota: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub salary_range: SalaryRangePayload,
    #[validate(length(min = 1))]
    pub qualification: String,
    #[serde(default)]
    pub experience: ExperienceRangePayload,
    #[serde(default)]
    pub languages: Vec<Capability>,
    #[serde(default)]
    pub technical_skills: Vec<Capability>,
    #[serde(default)]
    pub soft_skills: Vec<Capability>,
    #[serde(default = "default_gender")]
    pub gender: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingDetail {
    #[serde(flatten)]
    pub posting: Posting,
    pub job: Job,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingSummary {
    #[serde(flatten)]
    pub posting: Posting,
    pub job: Job,
    pub applications: i64,
}
