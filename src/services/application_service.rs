use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::application_dto::{ApplicantView, ApplicationView};
use crate::error::{Error, Result};
use crate::models::applicant::Applicant;
use crate::models::application::{Application, ApplicationStatus};
use crate::models::resume::ResumeSnapshot;
use crate::utils::time;

#[derive(Debug, FromRow)]
struct ApplicationJoinRow {
    id: Uuid,
    status: Json<ApplicationStatus>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    applicant_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    gender: Option<String>,
    resume: Option<Json<ResumeSnapshot>>,
}

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, posting_id: Uuid, applicant_id: Uuid) -> Result<Application> {
        let posting_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM postings WHERE id = $1)")
                .bind(posting_id)
                .fetch_one(&self.pool)
                .await?;
        if !posting_exists {
            return Err(Error::NotFound(format!("Posting {} not found", posting_id)));
        }

        sqlx::query_as::<_, Applicant>("SELECT * FROM applicants WHERE id = $1")
            .bind(applicant_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Applicant {} not found", applicant_id)))?;

        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (posting_id, applicant_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(posting_id)
        .bind(applicant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(application)
    }

    pub async fn list_by_posting(&self, posting_id: Uuid) -> Result<Vec<ApplicationView>> {
        let rows = sqlx::query_as::<_, ApplicationJoinRow>(
            r#"
            SELECT a.id, a.status, a.created_at, a.updated_at,
                   ap.id AS applicant_id, ap.first_name, ap.last_name, ap.email,
                   ap.gender, ap.resume
            FROM applications a
            JOIN applicants ap ON ap.id = a.applicant_id
            WHERE a.posting_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(posting_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ApplicationView {
                id: row.id,
                applicant: ApplicantView {
                    id: row.applicant_id,
                    first_name: row.first_name,
                    last_name: row.last_name,
                    email: row.email,
                    gender: row.gender,
                    resume: row.resume.map(|Json(snapshot)| snapshot),
                },
                status: row.status.0,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
            .collect())
    }

    /// Replaces the lifecycle status; a missing status date is stamped with
    /// the transition time.
    pub async fn update_status(
        &self,
        application_id: Uuid,
        mut status: ApplicationStatus,
    ) -> Result<Application> {
        if status.status_date.is_none() {
            status.status_date = Some(time::now());
        }

        let application = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(Json(&status))
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Application {} not found", application_id)))?;

        Ok(application)
    }
}
