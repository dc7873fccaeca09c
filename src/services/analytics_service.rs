use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::analytics_dto::{
    ApplicationsOptionsResponse, CompletedApplicationsPayload, JobTitleOption, MonthCount,
    TurnoverResponse,
};
use crate::error::Result;
use crate::utils::time;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The `Completed` pseudo-status groups every terminal lifecycle state.
pub fn expand_status_filter(status: &str) -> Vec<String> {
    if status == "Completed" {
        ["Accepted", "Rejected", "Withdrawn", "Closed"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        vec![status.to_string()]
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct EmploymentSpan {
    pub hire_date: NaiveDate,
    pub termination_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ApplicationFact {
    pub created_at: DateTime<Utc>,
    pub employment_type: String,
    pub job_title: String,
    pub posting_id: Uuid,
}

#[derive(Clone)]
pub struct AnalyticsService {
    pool: PgPool,
}

impl AnalyticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Turnover rate over a date window, defaulting to the trailing year.
    pub async fn get_turn_over(
        &self,
        company_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<TurnoverResponse> {
        let to = to.unwrap_or_else(|| time::now().date_naive());
        let from = from.unwrap_or_else(|| to.checked_sub_months(Months::new(12)).unwrap_or(to));

        let spans = sqlx::query_as::<_, EmploymentSpan>(
            r#"
            SELECT hire_date, termination_date
            FROM employees
            WHERE company_id = $1
              AND (termination_date IS NULL OR termination_date >= $2)
            "#,
        )
        .bind(company_id)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        Ok(compute_turnover(&spans, from, to))
    }

    pub async fn application_options(
        &self,
        company_id: Uuid,
        status: Option<&str>,
    ) -> Result<ApplicationsOptionsResponse> {
        let facts = self.load_application_facts(company_id, status).await?;
        Ok(application_options(&facts))
    }

    pub async fn completed_applications(
        &self,
        company_id: Uuid,
        payload: &CompletedApplicationsPayload,
    ) -> Result<Vec<MonthCount>> {
        let facts = self
            .load_application_facts(company_id, payload.status.as_deref())
            .await?;
        let posting_ids: Vec<Uuid> = payload.job_titles.iter().map(|job| job.id).collect();
        Ok(monthly_series(
            &facts,
            &payload.years,
            &payload.employment_types,
            &posting_ids,
        ))
    }

    async fn load_application_facts(
        &self,
        company_id: Uuid,
        status: Option<&str>,
    ) -> Result<Vec<ApplicationFact>> {
        let statuses = status.map(expand_status_filter);

        let mut sql = String::from(
            r#"
            SELECT a.created_at, j.employment_type, j.title AS job_title, p.id AS posting_id
            FROM applications a
            JOIN postings p ON p.id = a.posting_id
            JOIN jobs j ON j.id = p.job_id
            WHERE j.company_id = $1
            "#,
        );
        if statuses.is_some() {
            sql.push_str(" AND a.status ->> 'statusType' = ANY($2)");
        }

        let mut query = sqlx::query_as::<_, ApplicationFact>(&sql).bind(company_id);
        if let Some(statuses) = statuses {
            query = query.bind(statuses);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}

fn active_at(span: &EmploymentSpan, at: NaiveDate) -> bool {
    span.hire_date <= at && span.termination_date.map_or(true, |date| date >= at)
}

/// left / ceil((start-count + end-count) / 2) × 100, to 2 decimal places.
/// A zero average headcount reports no rate rather than NaN.
pub fn compute_turnover(
    spans: &[EmploymentSpan],
    from: NaiveDate,
    to: NaiveDate,
) -> TurnoverResponse {
    let left = spans
        .iter()
        .filter(|span| {
            span.termination_date
                .map_or(false, |date| date >= from && date <= to)
        })
        .count() as i64;
    let headcount_start = spans.iter().filter(|span| active_at(span, from)).count() as i64;
    let headcount_end = spans.iter().filter(|span| active_at(span, to)).count() as i64;

    let average = (headcount_start + headcount_end + 1) / 2;
    let rate = if average > 0 {
        Some((left as f64 / average as f64 * 100.0 * 100.0).round() / 100.0)
    } else {
        None
    };

    TurnoverResponse {
        from,
        to,
        left,
        headcount_start,
        headcount_end,
        rate,
    }
}

/// Distinct chart axes observed in the pool, in first-seen order.
pub fn application_options(facts: &[ApplicationFact]) -> ApplicationsOptionsResponse {
    let mut years: Vec<String> = Vec::new();
    let mut employment_types: Vec<String> = Vec::new();
    let mut job_titles: Vec<JobTitleOption> = Vec::new();

    for fact in facts {
        let year = fact.created_at.year().to_string();
        if !years.contains(&year) {
            years.push(year);
        }
        if !employment_types.contains(&fact.employment_type) {
            employment_types.push(fact.employment_type.clone());
        }
        if !job_titles.iter().any(|job| job.id == fact.posting_id) {
            job_titles.push(JobTitleOption {
                id: fact.posting_id,
                job_title: fact.job_title.clone(),
            });
        }
    }

    ApplicationsOptionsResponse {
        years,
        employment_types,
        job_titles,
    }
}

/// Per-calendar-month counts of the facts matching every selected axis.
pub fn monthly_series(
    facts: &[ApplicationFact],
    years: &[String],
    employment_types: &[String],
    posting_ids: &[Uuid],
) -> Vec<MonthCount> {
    let mut counts = [0i64; 12];
    for fact in facts {
        let year = fact.created_at.year().to_string();
        if years.contains(&year)
            && employment_types.contains(&fact.employment_type)
            && posting_ids.contains(&fact.posting_id)
        {
            counts[fact.created_at.month0() as usize] += 1;
        }
    }

    counts
        .iter()
        .enumerate()
        .map(|(index, &value)| MonthCount {
            month: MONTH_NAMES[index].to_string(),
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn span(hire: NaiveDate, termination: Option<NaiveDate>) -> EmploymentSpan {
        EmploymentSpan {
            hire_date: hire,
            termination_date: termination,
        }
    }

    #[test]
    fn turnover_matches_the_reference_scenario() {
        let from = d(2025, 1, 1);
        let to = d(2025, 12, 31);
        let mut spans = Vec::new();
        // ten employees on board at window start, three leave inside it
        for _ in 0..7 {
            spans.push(span(d(2020, 1, 1), None));
        }
        for _ in 0..3 {
            spans.push(span(d(2020, 1, 1), Some(d(2025, 6, 30))));
        }
        // one mid-window hire brings the end headcount to eight
        spans.push(span(d(2025, 9, 1), None));

        let turnover = compute_turnover(&spans, from, to);
        assert_eq!(turnover.left, 3);
        assert_eq!(turnover.headcount_start, 10);
        assert_eq!(turnover.headcount_end, 8);
        assert_eq!(turnover.rate, Some(33.33));
    }

    #[test]
    fn zero_average_headcount_reports_no_rate() {
        let turnover = compute_turnover(&[], d(2025, 1, 1), d(2025, 12, 31));
        assert_eq!(turnover.rate, None);
        assert_eq!(turnover.left, 0);
    }

    #[test]
    fn termination_on_the_window_edge_counts_as_left() {
        let from = d(2025, 1, 1);
        let to = d(2025, 12, 31);
        let spans = vec![
            span(d(2020, 1, 1), Some(from)),
            span(d(2020, 1, 1), Some(to)),
            span(d(2020, 1, 1), Some(d(2026, 1, 1))),
        ];
        let turnover = compute_turnover(&spans, from, to);
        assert_eq!(turnover.left, 2);
    }

    #[test]
    fn completed_expands_to_every_terminal_status() {
        assert_eq!(
            expand_status_filter("Completed"),
            vec!["Accepted", "Rejected", "Withdrawn", "Closed"]
        );
        assert_eq!(expand_status_filter("Interview"), vec!["Interview"]);
    }

    fn fact(created: DateTime<Utc>, employment_type: &str, posting_id: Uuid) -> ApplicationFact {
        ApplicationFact {
            created_at: created,
            employment_type: employment_type.into(),
            job_title: "Backend Engineer".into(),
            posting_id,
        }
    }

    #[test]
    fn options_deduplicate_in_first_seen_order() {
        let posting_a = Uuid::new_v4();
        let posting_b = Uuid::new_v4();
        let facts = vec![
            fact(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(), "full-time", posting_a),
            fact(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(), "full-time", posting_a),
            fact(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(), "contract", posting_b),
        ];
        let options = application_options(&facts);
        assert_eq!(options.years, vec!["2025", "2026"]);
        assert_eq!(options.employment_types, vec!["full-time", "contract"]);
        assert_eq!(options.job_titles.len(), 2);
        assert_eq!(options.job_titles[0].id, posting_a);
    }

    #[test]
    fn series_counts_only_matching_facts_per_month() {
        let posting = Uuid::new_v4();
        let other = Uuid::new_v4();
        let facts = vec![
            fact(Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap(), "full-time", posting),
            fact(Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap(), "full-time", posting),
            fact(Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap(), "full-time", posting),
            // filtered out: wrong year, wrong type, wrong posting
            fact(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(), "full-time", posting),
            fact(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(), "contract", posting),
            fact(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(), "full-time", other),
        ];
        let series = monthly_series(
            &facts,
            &["2025".to_string()],
            &["full-time".to_string()],
            &[posting],
        );
        assert_eq!(series.len(), 12);
        assert_eq!(series[2].month, "March");
        assert_eq!(series[2].value, 2);
        assert_eq!(series[4].value, 1);
        assert_eq!(series.iter().map(|m| m.value).sum::<i64>(), 3);
    }
}
