use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::screening_dto::{
    ExperienceRange, FilterOptions, FilterResponse, RequirementSet, ScreenedApplicant,
    ScreenedApplication, Tier,
};
use crate::error::{Error, Result};
use crate::models::posting::{capability_names_lowercase, GenderRule, Posting};
use crate::models::resume::ResumeSnapshot;
use crate::services::classifier_service::{CandidateProfile, ClassifierService};
use crate::utils::time;

/// One `New` application joined with its applicant, as the screening pass
/// consumes it.
#[derive(Debug, Clone)]
pub struct CandidateRecord {
    pub application_id: Uuid,
    pub applicant_id: Uuid,
    pub gender: Option<String>,
    pub resume: Option<ResumeSnapshot>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct CandidateRow {
    application_id: Uuid,
    applicant_id: Uuid,
    gender: Option<String>,
    resume: Option<Json<ResumeSnapshot>>,
    created_at: DateTime<Utc>,
}

impl From<CandidateRow> for CandidateRecord {
    fn from(row: CandidateRow) -> Self {
        CandidateRecord {
            application_id: row.application_id,
            applicant_id: row.applicant_id,
            gender: row.gender,
            resume: row.resume.map(|Json(snapshot)| snapshot),
            created_at: row.created_at,
        }
    }
}

/// Fields derived from a resume snapshot ahead of scoring. Computed on a
/// working copy; the stored record is never touched.
#[derive(Debug, Clone, Default)]
pub struct ApplicantProjection {
    pub total_experience: i64,
    pub highest_degree: Option<String>,
    pub languages: Vec<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
}

impl ApplicantProjection {
    pub fn from_resume(resume: Option<&ResumeSnapshot>, today: NaiveDate) -> Self {
        let Some(resume) = resume else {
            return Self::default();
        };
        Self {
            total_experience: total_experience_years(resume, today),
            highest_degree: highest_degree(resume, today),
            languages: resume.language_names_lowercase(),
            technical_skills: resume.technical_skill_names_lowercase(),
            soft_skills: resume.soft_skill_names_lowercase(),
        }
    }
}

/// Sum of whole-year spans over the experience entries. Entries with an
/// unparseable boundary are skipped; inverted ranges contribute zero.
fn total_experience_years(resume: &ResumeSnapshot, today: NaiveDate) -> i64 {
    resume
        .experience_entries()
        .iter()
        .filter_map(|entry| {
            let date = entry.date.as_ref()?;
            let from = time::parse_resume_date(date.from.as_deref()?)?;
            let to = time::resolve_range_end(date.to.as_deref()?, today)?;
            Some(time::whole_years_between(from, to))
        })
        .sum()
}

/// The education entry with the latest effective end date ("Present" counts
/// as today). Entries without a parseable end date are excluded; ties keep
/// the first encountered entry.
fn highest_degree(resume: &ResumeSnapshot, today: NaiveDate) -> Option<String> {
    resume
        .education_entries()
        .iter()
        .filter_map(|entry| {
            let end = entry
                .date
                .as_ref()
                .and_then(|date| date.to.as_deref())
                .and_then(|to| time::resolve_range_end(to, today))?;
            Some((entry.degree.clone()?, end))
        })
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
        .map(|(degree, _)| degree)
}

#[derive(Clone)]
pub struct ScreeningService {
    pool: PgPool,
}

impl ScreeningService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Screens every `New` application on a posting into qualification tiers.
    pub async fn filter_applications(
        &self,
        posting_id: Uuid,
        override_requirements: Option<RequirementSet>,
    ) -> Result<FilterResponse> {
        let posting = sqlx::query_as::<_, Posting>("SELECT * FROM postings WHERE id = $1")
            .bind(posting_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Posting {} not found", posting_id)))?;

        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT a.id AS application_id, ap.id AS applicant_id, ap.gender, ap.resume, a.created_at
            FROM applications a
            JOIN applicants ap ON ap.id = a.applicant_id
            WHERE a.posting_id = $1 AND a.status ->> 'statusType' = 'New'
            ORDER BY a.created_at
            "#,
        )
        .bind(posting_id)
        .fetch_all(&self.pool)
        .await?;

        let records = rows.into_iter().map(CandidateRecord::from).collect();
        let requirements = resolve_requirements(&posting, override_requirements);
        Ok(screen(&posting, requirements, records, time::now()))
    }
}

/// Effective requirement set for one screening run: the caller's override
/// verbatim when supplied, otherwise defaults derived from the posting.
pub fn resolve_requirements(
    posting: &Posting,
    override_requirements: Option<RequirementSet>,
) -> RequirementSet {
    let mut requirements = override_requirements.unwrap_or_else(|| RequirementSet {
        qualification: posting.qualification.clone(),
        experience: ExperienceRange {
            min: i64::from(posting.experience_min.unwrap_or(0)),
            max: i64::from(posting.experience_max.unwrap_or(0)),
        },
        languages: capability_names_lowercase(&posting.languages),
        technical_skills: capability_names_lowercase(&posting.technical_skills),
        soft_skills: capability_names_lowercase(&posting.soft_skills),
        gender: GenderRule::from_label(&posting.gender),
        rejected_applications: Vec::new(),
        date: Default::default(),
    });
    requirements.normalize();
    requirements
}

/// Pure screening pass over an already-loaded candidate pool: project,
/// classify, bucket, then derive the probable set and the UI filter options.
pub fn screen(
    posting: &Posting,
    requirements: RequirementSet,
    records: Vec<CandidateRecord>,
    now: DateTime<Utc>,
) -> FilterResponse {
    let today = now.date_naive();

    let mut overqualified = Vec::new();
    let mut underqualified = Vec::new();
    let mut qualified = Vec::new();
    let mut rejected = Vec::new();

    let mut pool_experience: Vec<i64> = Vec::with_capacity(records.len());
    let mut seen_languages: Vec<String> = Vec::new();
    let mut seen_technical_skills: Vec<String> = Vec::new();
    let mut seen_soft_skills: Vec<String> = Vec::new();

    for record in &records {
        let projection = ApplicantProjection::from_resume(record.resume.as_ref(), today);
        pool_experience.push(projection.total_experience);
        extend_unique(&mut seen_languages, &projection.languages);
        extend_unique(&mut seen_technical_skills, &projection.technical_skills);
        extend_unique(&mut seen_soft_skills, &projection.soft_skills);

        let profile = CandidateProfile {
            application_id: record.application_id,
            created_at: record.created_at,
            gender: record.gender.as_deref(),
            total_experience: projection.total_experience,
            highest_degree: projection.highest_degree.as_deref(),
            languages: &projection.languages,
            technical_skills: &projection.technical_skills,
            soft_skills: &projection.soft_skills,
        };
        let classification = ClassifierService::classify(&profile, &requirements);

        let entry = ScreenedApplication {
            id: record.application_id,
            applicant: ScreenedApplicant {
                id: record.applicant_id,
                resume: record.resume.as_ref().map(ResumeSnapshot::sans_template),
                gender: record.gender.clone(),
            },
            created_at: record.created_at,
        };

        match classification.tier {
            Tier::Overqualified => overqualified.push(entry),
            Tier::Qualified => qualified.push(entry),
            Tier::Underqualified => underqualified.push(entry),
            Tier::Rejected => rejected.push(entry),
        }
    }

    // exactly one candidate left across the scored tiers gets the probable
    // highlight; it stays in its tier as well
    let mut probable = Vec::new();
    if overqualified.len() + underqualified.len() + qualified.len() == 1 {
        probable.extend(qualified.iter().cloned());
        probable.extend(underqualified.iter().cloned());
        probable.extend(overqualified.iter().cloned());
    }

    extend_unique(
        &mut seen_languages,
        &capability_names_lowercase(&posting.languages),
    );
    extend_unique(
        &mut seen_technical_skills,
        &capability_names_lowercase(&posting.technical_skills),
    );
    extend_unique(
        &mut seen_soft_skills,
        &capability_names_lowercase(&posting.soft_skills),
    );

    let options = FilterOptions {
        technical_skills: seen_technical_skills,
        soft_skills: seen_soft_skills,
        languages: seen_languages,
        experience: ExperienceRange {
            min: pool_experience.iter().copied().min().unwrap_or(0),
            max: pool_experience.iter().copied().max().unwrap_or(0),
        },
    };

    FilterResponse {
        overqualified,
        underqualified,
        qualified,
        rejected,
        probable,
        requirements,
        options,
    }
}

fn extend_unique(target: &mut Vec<String>, names: &[String]) {
    for name in names {
        if !target.iter().any(|existing| existing == name) {
            target.push(name.clone());
        }
    }
}
