use serde::{Deserialize, Serialize};

/// Normalized resume fields handed over by the form layer.
///
/// Every field is optional. Empty and whitespace-only values count as absent:
/// composition and text formatting go through the accessors below, never the raw
/// `Option`s, so both paths agree on what "present" means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,

    pub institution: Option<String>,
    pub degree: Option<String>,
    pub year: Option<String>,

    pub job_title: Option<String>,
    pub company: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,

    /// Free text, comma-separated.
    pub skills: Option<String>,
}

/// Returns the trimmed value if it has any visible content.
fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl ResumeRecord {
    pub fn name(&self) -> Option<&str> {
        present(&self.name)
    }

    pub fn email(&self) -> Option<&str> {
        present(&self.email)
    }

    pub fn phone(&self) -> Option<&str> {
        present(&self.phone)
    }

    pub fn address(&self) -> Option<&str> {
        present(&self.address)
    }

    pub fn institution(&self) -> Option<&str> {
        present(&self.institution)
    }

    pub fn degree(&self) -> Option<&str> {
        present(&self.degree)
    }

    pub fn year(&self) -> Option<&str> {
        present(&self.year)
    }

    pub fn job_title(&self) -> Option<&str> {
        present(&self.job_title)
    }

    pub fn company(&self) -> Option<&str> {
        present(&self.company)
    }

    pub fn duration(&self) -> Option<&str> {
        present(&self.duration)
    }

    pub fn description(&self) -> Option<&str> {
        present(&self.description)
    }

    /// Education is shown when either the institution or the degree is known.
    pub fn has_education(&self) -> bool {
        self.institution().is_some() || self.degree().is_some()
    }

    /// Experience is shown when either the job title or the company is known.
    pub fn has_experience(&self) -> bool {
        self.job_title().is_some() || self.company().is_some()
    }

    pub fn has_contact(&self) -> bool {
        self.email().is_some() || self.phone().is_some() || self.address().is_some()
    }

    /// Splits the skills string on commas, trimming each token and dropping empty ones.
    ///
    /// `"Java,,Python, "` yields `["Java", "Python"]`. Order is preserved.
    pub fn skill_tags(&self) -> Vec<&str> {
        present(&self.skills)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// True when no field carries any content at all.
    pub fn is_empty(&self) -> bool {
        self.name().is_none()
            && !self.has_contact()
            && self.institution().is_none()
            && self.degree().is_none()
            && self.year().is_none()
            && self.job_title().is_none()
            && self.company().is_none()
            && self.duration().is_none()
            && self.description().is_none()
            && self.skill_tags().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_tags_drops_empty_tokens() {
        let record = ResumeRecord {
            skills: Some("Java,,Python, ".to_string()),
            ..Default::default()
        };
        assert_eq!(record.skill_tags(), vec!["Java", "Python"]);
    }

    #[test]
    fn test_skill_tags_only_commas_is_empty() {
        let record = ResumeRecord {
            skills: Some(" , ,, ".to_string()),
            ..Default::default()
        };
        assert!(record.skill_tags().is_empty());
    }

    #[test]
    fn test_whitespace_field_counts_as_absent() {
        let record = ResumeRecord {
            name: Some("   ".to_string()),
            degree: Some("".to_string()),
            ..Default::default()
        };
        assert_eq!(record.name(), None);
        assert!(!record.has_education());
        assert!(record.is_empty());
    }

    #[test]
    fn test_sibling_field_keeps_section() {
        let record = ResumeRecord {
            company: Some("Acme".to_string()),
            ..Default::default()
        };
        assert!(record.has_experience());
        assert!(!record.has_education());
        assert!(!record.is_empty());
    }

    #[test]
    fn test_record_deserializes_with_missing_fields() {
        let record: ResumeRecord =
            serde_json::from_str(r#"{"name":"Ada Lovelace","skills":"Math"}"#).unwrap();
        assert_eq!(record.name(), Some("Ada Lovelace"));
        assert_eq!(record.email(), None);
        assert_eq!(record.skill_tags(), vec!["Math"]);
    }
}
