use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::resume::ResumeSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Applicant {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Option<String>,
    pub resume: Option<Json<ResumeSnapshot>>,
    pub created_at: DateTime<Utc>,
}
