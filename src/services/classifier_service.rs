use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use crate::dto::screening_dto::{RequirementSet, ScoreVector, Tier};
use crate::models::posting::GenderRule;

/// Qualification labels grouped into ordinal tiers, lowest first. A degree
/// string is matched by case-insensitive substring containment; the first
/// tier containing a matching label wins.
pub const QUALIFICATION_LADDER: [&[&str]; 5] = [
    &["SPM"],
    &["STPM", "A-Level", "Matriculation", "Diploma"],
    &["Degree", "Bachelor"],
    &["Master"],
    &["PhD"],
];

/// Everything the classifier needs to know about one application, already
/// projected out of the stored records.
#[derive(Debug, Clone)]
pub struct CandidateProfile<'a> {
    pub application_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub gender: Option<&'a str>,
    pub total_experience: i64,
    pub highest_degree: Option<&'a str>,
    pub languages: &'a [String],
    pub technical_skills: &'a [String],
    pub soft_skills: &'a [String],
}

#[derive(Debug, Clone, Copy)]
pub struct Classification {
    pub tier: Tier,
    pub scores: ScoreVector,
}

pub struct ClassifierService;

impl ClassifierService {
    pub fn qualification_tier(text: &str) -> Option<usize> {
        let lowercased = text.to_lowercase();
        QUALIFICATION_LADDER.iter().position(|labels| {
            labels
                .iter()
                .any(|label| lowercased.contains(&label.to_lowercase()))
        })
    }

    /// Maps one candidate profile to a tier plus its score vector.
    ///
    /// Precedence is fixed: a hard rejection override wins outright, then the
    /// date eligibility gate, then the dimension walk in the order
    /// qualification, experience, gender, languages, technical skills, soft
    /// skills. Within the walk the first dimension with a nonzero score
    /// decides: -1 buckets underqualified, +1 overqualified.
    pub fn classify(profile: &CandidateProfile<'_>, requirements: &RequirementSet) -> Classification {
        if requirements
            .rejected_applications
            .contains(&profile.application_id)
        {
            return Classification {
                tier: Tier::Rejected,
                scores: ScoreVector::default(),
            };
        }

        let scores = Self::score(profile, requirements);

        if let Some((year, month)) = requirements.date.active() {
            if predates(profile.created_at, year, month) {
                return Classification {
                    tier: Tier::Underqualified,
                    scores,
                };
            }
        }

        let ordered = [
            scores.qualification,
            scores.experience,
            scores.gender,
            scores.languages,
            scores.technical_skills,
            scores.soft_skills,
        ];
        let tier = ordered
            .into_iter()
            .find_map(|score| match score {
                -1 => Some(Tier::Underqualified),
                1 => Some(Tier::Overqualified),
                _ => None,
            })
            .unwrap_or(Tier::Qualified);

        Classification { tier, scores }
    }

    fn score(profile: &CandidateProfile<'_>, requirements: &RequirementSet) -> ScoreVector {
        ScoreVector {
            qualification: Self::qualification_score(
                profile.highest_degree,
                &requirements.qualification,
            ),
            experience: Self::experience_score(profile.total_experience, requirements),
            gender: Self::gender_score(profile.gender, requirements.gender),
            languages: Self::coverage_score(&requirements.languages, profile.languages),
            technical_skills: Self::coverage_score(
                &requirements.technical_skills,
                profile.technical_skills,
            ),
            soft_skills: Self::coverage_score(&requirements.soft_skills, profile.soft_skills),
        }
    }

    /// No recognizable qualification is a hard miss (-1), not neutral. A
    /// requirement label matching no ladder tier imposes no qualification
    /// bar on candidates that have one.
    fn qualification_score(highest_degree: Option<&str>, required: &str) -> i8 {
        let Some(candidate_tier) = highest_degree.and_then(Self::qualification_tier) else {
            return -1;
        };
        let Some(required_tier) = Self::qualification_tier(required) else {
            return 0;
        };
        match candidate_tier.cmp(&required_tier) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => 1,
        }
    }

    fn experience_score(total_years: i64, requirements: &RequirementSet) -> i8 {
        if total_years < requirements.experience.min {
            -1
        } else if total_years > requirements.experience.max {
            1
        } else {
            0
        }
    }

    /// Gender never scores +1; there is no overqualified direction.
    fn gender_score(gender: Option<&str>, rule: GenderRule) -> i8 {
        match rule {
            GenderRule::All => 0,
            constrained => {
                if gender == Some(constrained.as_label()) {
                    0
                } else {
                    -1
                }
            }
        }
    }

    /// Required-name coverage. The met count is bounded by the requirement
    /// list by construction, so this dimension can never score +1.
    fn coverage_score(required: &[String], held: &[String]) -> i8 {
        if required.is_empty() {
            return 0;
        }
        let met = required
            .iter()
            .filter(|name| held.iter().any(|candidate| candidate == *name))
            .count();
        if met == required.len() {
            0
        } else {
            -1
        }
    }
}

fn predates(created_at: DateTime<Utc>, year: i32, month: u32) -> bool {
    let created_year = created_at.year();
    created_year < year || (created_year == year && created_at.month() < month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::screening_dto::{DateCutoff, ExperienceRange};
    use chrono::TimeZone;

    fn requirements() -> RequirementSet {
        RequirementSet {
            qualification: "Degree".into(),
            experience: ExperienceRange { min: 2, max: 5 },
            languages: vec!["english".into()],
            ..Default::default()
        }
    }

    fn profile<'a>(
        degree: Option<&'a str>,
        experience: i64,
        languages: &'a [String],
    ) -> CandidateProfile<'a> {
        CandidateProfile {
            application_id: Uuid::nil(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
            gender: Some("Female"),
            total_experience: experience,
            highest_degree: degree,
            languages,
            technical_skills: &[],
            soft_skills: &[],
        }
    }

    #[test]
    fn ladder_matches_by_substring_lowest_tier_first() {
        assert_eq!(
            ClassifierService::qualification_tier("Bachelor of Computer Science (Hons)"),
            Some(2)
        );
        assert_eq!(ClassifierService::qualification_tier("PhD in Physics"), Some(4));
        assert_eq!(ClassifierService::qualification_tier("spm leaver"), Some(0));
        assert_eq!(ClassifierService::qualification_tier("Street sweeper"), None);
        // "Masterful Diploma" contains labels from two tiers; the lower wins
        assert_eq!(
            ClassifierService::qualification_tier("Masterful Diploma"),
            Some(1)
        );
    }

    #[test]
    fn equal_tiers_score_zero_ordering_is_monotone() {
        for (i, lower) in ["SPM", "Diploma", "Degree", "Master", "PhD"]
            .iter()
            .enumerate()
        {
            for (j, higher) in ["SPM", "Diploma", "Degree", "Master", "PhD"]
                .iter()
                .enumerate()
            {
                let langs = vec!["english".to_string()];
                let mut reqs = requirements();
                reqs.qualification = higher.to_string();
                let classification =
                    ClassifierService::classify(&profile(Some(lower), 3, &langs), &reqs);
                let score = classification.scores.qualification;
                if i < j {
                    assert!(score <= 0, "{lower} vs {higher}");
                }
                if i > j {
                    assert!(score >= 0, "{lower} vs {higher}");
                }
                if i == j {
                    assert_eq!(score, 0, "{lower} vs {higher}");
                }
            }
        }
    }

    #[test]
    fn fully_matching_candidate_is_qualified() {
        let langs = vec!["english".to_string(), "malay".to_string()];
        let classification = ClassifierService::classify(
            &profile(Some("Bachelor of Computer Science"), 3, &langs),
            &requirements(),
        );
        assert_eq!(classification.tier, Tier::Qualified);
        assert_eq!(classification.scores, ScoreVector::default());
    }

    #[test]
    fn exceeding_qualification_and_experience_is_overqualified() {
        let classification =
            ClassifierService::classify(&profile(Some("PhD in Physics"), 10, &[]), &requirements());
        assert_eq!(classification.scores.qualification, 1);
        assert_eq!(classification.scores.experience, 1);
        assert_eq!(classification.tier, Tier::Overqualified);
    }

    #[test]
    fn qualification_misses_are_checked_before_experience() {
        let classification =
            ClassifierService::classify(&profile(Some("SPM"), 1, &[]), &requirements());
        assert_eq!(classification.scores.qualification, -1);
        assert_eq!(classification.scores.experience, -1);
        assert_eq!(classification.tier, Tier::Underqualified);
    }

    #[test]
    fn no_recognizable_qualification_is_a_hard_miss() {
        let langs = vec!["english".to_string()];
        let classification =
            ClassifierService::classify(&profile(None, 3, &langs), &requirements());
        assert_eq!(classification.scores.qualification, -1);
        assert_eq!(classification.tier, Tier::Underqualified);

        let classification = ClassifierService::classify(
            &profile(Some("Certificate of attendance"), 3, &langs),
            &requirements(),
        );
        assert_eq!(classification.scores.qualification, -1);
    }

    #[test]
    fn unrecognized_required_qualification_imposes_no_bar() {
        let langs = vec!["english".to_string()];
        let mut reqs = requirements();
        reqs.qualification = "Certified Wizard".into();
        let classification =
            ClassifierService::classify(&profile(Some("Bachelor of CS"), 3, &langs), &reqs);
        assert_eq!(classification.scores.qualification, 0);
        assert_eq!(classification.tier, Tier::Qualified);
    }

    #[test]
    fn rejection_override_bypasses_scoring_entirely() {
        let id = Uuid::new_v4();
        let langs = vec!["english".to_string()];
        let mut reqs = requirements();
        reqs.rejected_applications.push(id);

        // a perfect-match profile is still rejected
        let mut perfect = profile(Some("Bachelor of CS"), 3, &langs);
        perfect.application_id = id;
        let classification = ClassifierService::classify(&perfect, &reqs);
        assert_eq!(classification.tier, Tier::Rejected);
        assert_eq!(classification.scores, ScoreVector::default());
    }

    #[test]
    fn gender_mismatch_fails_and_never_exceeds() {
        let langs = vec!["english".to_string()];
        let mut reqs = requirements();
        reqs.gender = GenderRule::Male;
        let classification =
            ClassifierService::classify(&profile(Some("Bachelor of CS"), 3, &langs), &reqs);
        assert_eq!(classification.scores.gender, -1);
        assert_eq!(classification.tier, Tier::Underqualified);

        reqs.gender = GenderRule::Female;
        let classification =
            ClassifierService::classify(&profile(Some("Bachelor of CS"), 3, &langs), &reqs);
        assert_eq!(classification.scores.gender, 0);

        reqs.gender = GenderRule::All;
        let mut unknown = profile(Some("Bachelor of CS"), 3, &langs);
        unknown.gender = None;
        let classification = ClassifierService::classify(&unknown, &reqs);
        assert_eq!(classification.scores.gender, 0);
    }

    #[test]
    fn empty_requirement_lists_always_score_zero() {
        let mut reqs = requirements();
        reqs.languages.clear();
        let classification =
            ClassifierService::classify(&profile(Some("Bachelor of CS"), 3, &[]), &reqs);
        assert_eq!(classification.scores.languages, 0);
        assert_eq!(classification.scores.technical_skills, 0);
        assert_eq!(classification.scores.soft_skills, 0);
    }

    #[test]
    fn coverage_never_scores_plus_one() {
        // sweep every subset relation between required and held sets
        let held_variants: [&[&str]; 4] = [
            &[],
            &["english"],
            &["english", "malay"],
            &["english", "malay", "mandarin", "tamil"],
        ];
        for required_len in 1..=3usize {
            let required: Vec<String> = ["english", "malay", "mandarin"][..required_len]
                .iter()
                .map(|s| s.to_string())
                .collect();
            for held in held_variants {
                let held: Vec<String> = held.iter().map(|s| s.to_string()).collect();
                let score = ClassifierService::coverage_score(&required, &held);
                assert!(score <= 0, "required={required:?} held={held:?}");
            }
        }
    }

    #[test]
    fn missing_language_list_fails_a_nonempty_requirement() {
        let classification = ClassifierService::classify(
            &profile(Some("Bachelor of CS"), 3, &[]),
            &requirements(),
        );
        assert_eq!(classification.scores.languages, -1);
        assert_eq!(classification.tier, Tier::Underqualified);
    }

    #[test]
    fn date_cutoff_gates_older_applications() {
        let langs = vec!["english".to_string()];
        let mut reqs = requirements();
        reqs.date = DateCutoff {
            year: Some(2026),
            month: Some(2),
        };

        let mut early = profile(Some("Bachelor of CS"), 3, &langs);
        early.created_at = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(
            ClassifierService::classify(&early, &reqs).tier,
            Tier::Underqualified
        );

        let mut on_month = profile(Some("Bachelor of CS"), 3, &langs);
        on_month.created_at = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(
            ClassifierService::classify(&on_month, &reqs).tier,
            Tier::Qualified
        );

        let mut prior_year = profile(Some("Bachelor of CS"), 3, &langs);
        prior_year.created_at = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(
            ClassifierService::classify(&prior_year, &reqs).tier,
            Tier::Underqualified
        );
    }
}
