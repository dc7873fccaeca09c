use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TurnoverQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnoverResponse {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub left: i64,
    pub headcount_start: i64,
    pub headcount_end: i64,
    /// `null` when the average headcount over the window is zero.
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusQuery {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTitleOption {
    pub id: Uuid,
    pub job_title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationsOptionsResponse {
    pub years: Vec<String>,
    pub employment_types: Vec<String>,
    pub job_titles: Vec<JobTitleOption>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletedApplicationsPayload {
    pub years: Vec<String>,
    pub employment_types: Vec<String>,
    pub job_titles: Vec<JobTitleOption>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthCount {
    pub month: String,
    pub value: i64,
}
