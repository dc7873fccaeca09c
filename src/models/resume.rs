use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Resume snapshot as the resume builder stores it: named sections whose
/// payload sits under `value`. Sections the screening core never reads are
/// kept as raw JSON so display payloads round-trip untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_detail: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<Section<ExperienceEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Section<EducationEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awards: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Section<SkillEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_skills: Option<Section<SkillEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_skills: Option<Section<SkillEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voluntering: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<JsonValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Section<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: Vec<T>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub company: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub date: Option<DateRange>,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub date: Option<DateRange>,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillEntry {
    pub name: Option<String>,
    pub level: Option<String>,
}

impl ResumeSnapshot {
    pub fn experience_entries(&self) -> &[ExperienceEntry] {
        self.experience
            .as_ref()
            .map(|section| section.value.as_slice())
            .unwrap_or(&[])
    }

    pub fn education_entries(&self) -> &[EducationEntry] {
        self.education
            .as_ref()
            .map(|section| section.value.as_slice())
            .unwrap_or(&[])
    }

    pub fn language_names_lowercase(&self) -> Vec<String> {
        skill_names_lowercase(&self.languages)
    }

    pub fn technical_skill_names_lowercase(&self) -> Vec<String> {
        skill_names_lowercase(&self.technical_skills)
    }

    pub fn soft_skill_names_lowercase(&self) -> Vec<String> {
        skill_names_lowercase(&self.soft_skills)
    }

    /// Display-safe copy with the styling sub-object stripped. A fresh value
    /// is built instead of deleting fields off a shared clone, so nothing
    /// aliases the stored record.
    pub fn sans_template(&self) -> ResumeSnapshot {
        let mut stripped = self.clone();
        stripped.template = None;
        stripped
    }
}

fn skill_names_lowercase(section: &Option<Section<SkillEntry>>) -> Vec<String> {
    section
        .as_ref()
        .map(|section| {
            section
                .value
                .iter()
                .filter_map(|entry| entry.name.as_deref())
                .map(str::to_lowercase)
                .collect()
        })
        .unwrap_or_default()
}
