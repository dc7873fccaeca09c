use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusType {
    New,
    Viewed,
    Interview,
    Rejected,
    Accepted,
    Withdrawn,
    Other,
    Closed,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasonCategory {
    Overqualified,
    Underqualified,
    #[serde(rename = "Not a good fit")]
    NotAGoodFit,
    #[serde(rename = "Not interested")]
    NotInterested,
    #[serde(rename = "Not available")]
    NotAvailable,
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusReason {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ReasonCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatus {
    pub status_type: StatusType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<StatusReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_date: Option<DateTime<Utc>>,
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        Self {
            status_type: StatusType::New,
            reason: None,
            status_date: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Interview {
    pub interviewer: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<JsonValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Offer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offerletter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub posting_id: Uuid,
    pub applicant_id: Uuid,
    pub status: Json<ApplicationStatus>,
    pub interviews: Json<Vec<Interview>>,
    pub offer: Option<Json<Offer>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
