use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const EMPLOYMENT_TYPES: [&str; 5] =
    ["full-time", "part-time", "internship", "contract", "freelance"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub employment_type: String,
    pub environment: String,
    pub industry: String,
    pub created_at: DateTime<Utc>,
}
