use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub job_title: String,
    pub salary: Decimal,
    pub hire_date: NaiveDate,
    pub termination_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
