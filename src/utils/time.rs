use chrono::{DateTime, Datelike, NaiveDate, Utc};

pub const PRESENT: &str = "Present";

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn to_rfc3339(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

pub fn from_rfc3339(s: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

/// Parses the loosely formatted date strings resume builders emit:
/// RFC 3339, `YYYY-MM-DD`, `YYYY-MM`, bare `YYYY` and `Month YYYY`.
pub fn parse_resume_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d") {
        return Some(date);
    }
    for fmt in ["%d %b %Y", "%d %B %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("1 {}", raw), fmt) {
            return Some(date);
        }
    }
    if let Ok(year) = raw.parse::<i32>() {
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}

/// Resolves the end of a date range. The literal sentinel `Present` (any
/// casing) means the span is still running at `today`.
pub fn resolve_range_end(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    if raw.trim().eq_ignore_ascii_case(PRESENT) {
        Some(today)
    } else {
        parse_resume_date(raw)
    }
}

/// Whole years elapsed from `from` to `to`; the count ticks only once the
/// anniversary has passed. Inverted ranges contribute zero.
pub fn whole_years_between(from: NaiveDate, to: NaiveDate) -> i64 {
    if to <= from {
        return 0;
    }
    let mut years = i64::from(to.year()) - i64::from(from.year());
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_common_resume_date_shapes() {
        assert_eq!(parse_resume_date("2020-05-17"), Some(d(2020, 5, 17)));
        assert_eq!(parse_resume_date("2020-05"), Some(d(2020, 5, 1)));
        assert_eq!(parse_resume_date("2020"), Some(d(2020, 1, 1)));
        assert_eq!(parse_resume_date("May 2020"), Some(d(2020, 5, 1)));
        assert_eq!(parse_resume_date("2020-05-17T08:00:00Z"), Some(d(2020, 5, 17)));
        assert_eq!(parse_resume_date("sometime"), None);
        assert_eq!(parse_resume_date(""), None);
    }

    #[test]
    fn present_resolves_to_today() {
        let today = d(2026, 8, 1);
        assert_eq!(resolve_range_end("Present", today), Some(today));
        assert_eq!(resolve_range_end("present", today), Some(today));
        assert_eq!(resolve_range_end("2024-01", today), Some(d(2024, 1, 1)));
    }

    #[test]
    fn whole_years_respect_the_anniversary() {
        assert_eq!(whole_years_between(d(2020, 6, 1), d(2023, 6, 1)), 3);
        assert_eq!(whole_years_between(d(2020, 6, 1), d(2023, 5, 31)), 2);
        assert_eq!(whole_years_between(d(2020, 6, 1), d(2020, 12, 1)), 0);
    }

    #[test]
    fn inverted_ranges_are_clamped_to_zero() {
        assert_eq!(whole_years_between(d(2023, 1, 1), d(2020, 1, 1)), 0);
        assert_eq!(whole_years_between(d(2020, 1, 1), d(2020, 1, 1)), 0);
    }
}
