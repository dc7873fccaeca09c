use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::posting_dto::{
    CreatePostingPayload, PostingDetail, PostingSummary, UpdatePostingPayload,
};
use crate::error::{Error, Result};
use crate::models::job::{Job, EMPLOYMENT_TYPES};
use crate::models::posting::Posting;

fn check_employment_type(category: &str) -> Result<()> {
    if EMPLOYMENT_TYPES.contains(&category) {
        Ok(())
    } else {
        Err(Error::BadRequest(format!(
            "Unknown employment type: {}",
            category
        )))
    }
}

#[derive(Clone)]
pub struct PostingService {
    pool: PgPool,
}

impl PostingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the underlying job record, then the posting that publishes it.
    pub async fn create(&self, payload: CreatePostingPayload) -> Result<PostingDetail> {
        check_employment_type(&payload.category)?;
        let mut tx = self.pool.begin().await?;

        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (company_id, title, employment_type, environment, industry)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(payload.company_id)
        .bind(&payload.title)
        .bind(&payload.category)
        .bind(&payload.environment)
        .bind(&payload.industry)
        .fetch_one(&mut *tx)
        .await?;

        let posting = sqlx::query_as::<_, Posting>(
            r#"
            INSERT INTO postings (
                job_id, description, quota, tags, salary_min, salary_max,
                qualification, experience_min, experience_max,
                languages, technical_skills, soft_skills, gender
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(job.id)
        .bind(&payload.description)
        .bind(payload.quota)
        .bind(&payload.tags)
        .bind(payload.salary_range.min)
        .bind(payload.salary_range.max)
        .bind(&payload.qualification)
        .bind(payload.experience.min)
        .bind(payload.experience.max)
        .bind(Json(&payload.languages))
        .bind(Json(&payload.technical_skills))
        .bind(Json(&payload.soft_skills))
        .bind(&payload.gender)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(PostingDetail { posting, job })
    }

    pub async fn update(
        &self,
        posting_id: Uuid,
        payload: UpdatePostingPayload,
    ) -> Result<PostingDetail> {
        check_employment_type(&payload.category)?;
        let existing = self.get(posting_id).await?;
        let mut tx = self.pool.begin().await?;

        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET title = $1, employment_type = $2, environment = $3, industry = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.category)
        .bind(&payload.environment)
        .bind(&payload.industry)
        .bind(existing.job.id)
        .fetch_one(&mut *tx)
        .await?;

        let posting = sqlx::query_as::<_, Posting>(
            r#"
            UPDATE postings
            SET description = $1, quota = $2, tags = $3, salary_min = $4, salary_max = $5,
                qualification = $6, experience_min = $7, experience_max = $8,
                languages = $9, technical_skills = $10, soft_skills = $11, gender = $12
            WHERE id = $13
            RETURNING *
            "#,
        )
        .bind(&payload.description)
        .bind(payload.quota)
        .bind(&payload.tags)
        .bind(payload.salary_range.min)
        .bind(payload.salary_range.max)
        .bind(&payload.qualification)
        .bind(payload.experience.min)
        .bind(payload.experience.max)
        .bind(Json(&payload.languages))
        .bind(Json(&payload.technical_skills))
        .bind(Json(&payload.soft_skills))
        .bind(&payload.gender)
        .bind(posting_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(PostingDetail { posting, job })
    }

    pub async fn get(&self, posting_id: Uuid) -> Result<PostingDetail> {
        let posting = sqlx::query_as::<_, Posting>("SELECT * FROM postings WHERE id = $1")
            .bind(posting_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Posting {} not found", posting_id)))?;

        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(posting.job_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(PostingDetail { posting, job })
    }

    /// Company postings with their job context and application counts.
    pub async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<PostingSummary>> {
        let jobs = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE company_id = $1")
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;

        let postings = sqlx::query_as::<_, Posting>(
            r#"
            SELECT p.*
            FROM postings p
            JOIN jobs j ON j.id = p.job_id
            WHERE j.company_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        let posting_ids: Vec<Uuid> = postings.iter().map(|posting| posting.id).collect();
        let counts = sqlx::query_as::<_, (Uuid, i64)>(
            r#"
            SELECT posting_id, COUNT(*)
            FROM applications
            WHERE posting_id = ANY($1)
            GROUP BY posting_id
            "#,
        )
        .bind(&posting_ids)
        .fetch_all(&self.pool)
        .await?;

        let summaries = postings
            .into_iter()
            .filter_map(|posting| {
                let job = jobs.iter().find(|job| job.id == posting.job_id)?.clone();
                let applications = counts
                    .iter()
                    .find(|(posting_id, _)| *posting_id == posting.id)
                    .map(|(_, count)| *count)
                    .unwrap_or(0);
                Some(PostingSummary {
                    posting,
                    job,
                    applications,
                })
            })
            .collect();

        Ok(summaries)
    }
}
