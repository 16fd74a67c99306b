//! Plain-text resume templates.
//!
//! Pure string formatting straight from the record, no layout involved. A field's
//! line (and its label) appears only when the field has content; a section heading
//! appears only when at least one of its fields does. Skills become one bullet line
//! per non-empty token, in input order.

use serde::{Deserialize, Serialize};

use crate::models::ResumeRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TemplateKind {
    Modern,
    Classic,
    Creative,
    Professional,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Modern,
        TemplateKind::Classic,
        TemplateKind::Creative,
        TemplateKind::Professional,
    ];

    /// Stable identifier, as listed by [`available_templates`].
    pub fn name(self) -> &'static str {
        match self {
            TemplateKind::Modern => "MODERN",
            TemplateKind::Classic => "CLASSIC",
            TemplateKind::Creative => "CREATIVE",
            TemplateKind::Professional => "PROFESSIONAL",
        }
    }

    fn banner(self) -> &'static [&'static str] {
        match self {
            TemplateKind::Modern => &[
                "╔═══════════════════════════════════════╗",
                "║          RESUME - MODERN STYLE        ║",
                "╚═══════════════════════════════════════╝",
            ],
            TemplateKind::Classic => &[
                "==========================================",
                "                RESUME",
                "==========================================",
            ],
            TemplateKind::Creative => &[
                "╭───────────────────────────────────────╮",
                "│         ✨ CREATIVE RESUME ✨         │",
                "╰───────────────────────────────────────╯",
            ],
            TemplateKind::Professional => {
                &["RESUME", "═══════════════════════════════════════════"]
            }
        }
    }

    fn title(self, section: Section) -> Option<&'static str> {
        use Section::*;
        match (self, section) {
            (TemplateKind::Modern | TemplateKind::Classic, Contact) => Some("PERSONAL INFORMATION"),
            (TemplateKind::Creative | TemplateKind::Professional, Contact) => None,
            (TemplateKind::Creative, Education) => Some("🎓 EDUCATION"),
            (TemplateKind::Creative, Experience) => Some("💼 EXPERIENCE"),
            (TemplateKind::Creative, Skills) => Some("🛠️  SKILLS"),
            (TemplateKind::Professional, Experience) => Some("PROFESSIONAL EXPERIENCE"),
            (TemplateKind::Professional, Skills) => Some("CORE COMPETENCIES"),
            (_, Education) => Some("EDUCATION"),
            (_, Experience) => Some("EXPERIENCE"),
            (_, Skills) => Some("SKILLS"),
        }
    }

    fn heading(self, title: &str) -> Vec<String> {
        match self {
            TemplateKind::Modern => vec![
                "━".repeat(40),
                title.to_string(),
                "━".repeat(40),
            ],
            TemplateKind::Classic => vec![title.to_string(), "-".repeat(42)],
            TemplateKind::Creative => vec![title.to_string()],
            TemplateKind::Professional => vec![title.to_string(), "─".repeat(41)],
        }
    }

    fn field_line(self, field: Field, value: &str) -> String {
        match self {
            TemplateKind::Modern => format!("{}: {value}", field.label()),
            TemplateKind::Classic => match field {
                Field::Year => format!("Graduated: {value}"),
                _ => value.to_string(),
            },
            TemplateKind::Creative => match field.icon() {
                Some(icon) => format!("{icon} {value}"),
                None => format!("   • {value}"),
            },
            TemplateKind::Professional => match field {
                Field::Name => value.to_uppercase(),
                _ => value.to_string(),
            },
        }
    }

    fn bullet(self) -> &'static str {
        match self {
            TemplateKind::Modern => "• ",
            TemplateKind::Classic => "- ",
            TemplateKind::Creative => "   • ",
            TemplateKind::Professional => "▪ ",
        }
    }
}

/// Identifiers of every text template, in declaration order.
pub fn available_templates() -> Vec<&'static str> {
    TemplateKind::ALL.iter().map(|t| t.name()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Contact,
    Education,
    Experience,
    Skills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Email,
    Phone,
    Address,
    Degree,
    Institution,
    Year,
    JobTitle,
    Company,
    Duration,
    Description,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Address => "Address",
            Field::Degree => "Degree",
            Field::Institution => "Institution",
            Field::Year => "Year",
            Field::JobTitle => "Job Title",
            Field::Company => "Company",
            Field::Duration => "Duration",
            Field::Description => "Description",
        }
    }

    /// Contact fields carry an icon in the creative template.
    fn icon(self) -> Option<&'static str> {
        match self {
            Field::Name => Some("👤"),
            Field::Email => Some("📧"),
            Field::Phone => Some("📱"),
            Field::Address => Some("📍"),
            _ => None,
        }
    }
}

/// Renders `record` with `template`. Never fails; an empty record yields the banner only.
pub fn format_resume(record: &ResumeRecord, template: TemplateKind) -> String {
    let mut lines: Vec<String> = template.banner().iter().map(|l| l.to_string()).collect();

    let sections = [
        (
            Section::Contact,
            vec![
                (Field::Name, record.name()),
                (Field::Email, record.email()),
                (Field::Phone, record.phone()),
                (Field::Address, record.address()),
            ],
        ),
        (
            Section::Education,
            vec![
                (Field::Degree, record.degree()),
                (Field::Institution, record.institution()),
                (Field::Year, record.year()),
            ],
        ),
        (
            Section::Experience,
            vec![
                (Field::JobTitle, record.job_title()),
                (Field::Company, record.company()),
                (Field::Duration, record.duration()),
                (Field::Description, record.description()),
            ],
        ),
    ];

    for (section, fields) in sections {
        let present: Vec<(Field, &str)> = fields
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect();
        if present.is_empty() {
            continue;
        }
        lines.push(String::new());
        if let Some(title) = template.title(section) {
            lines.extend(template.heading(title));
        }
        lines.extend(
            present
                .into_iter()
                .map(|(field, value)| template.field_line(field, value)),
        );
    }

    let skills = record.skill_tags();
    if !skills.is_empty() {
        lines.push(String::new());
        if let Some(title) = template.title(Section::Skills) {
            lines.extend(template.heading(title));
        }
        lines.extend(skills.iter().map(|skill| format!("{}{skill}", template.bullet())));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ResumeRecord {
        ResumeRecord {
            name: Some("Linus Torvalds".to_string()),
            email: Some("linus@example.org".to_string()),
            degree: Some("MSc Computer Science".to_string()),
            year: Some("1996".to_string()),
            job_title: Some("Maintainer".to_string()),
            skills: Some("C, Git,, Kernels ".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_modern_labels_only_present_fields() {
        let text = format_resume(&record(), TemplateKind::Modern);
        assert!(text.contains("Name: Linus Torvalds\n"));
        assert!(text.contains("Email: linus@example.org\n"));
        assert!(!text.contains("Phone:"));
        assert!(!text.contains("Address:"));
        assert!(!text.contains("Institution:"));
        assert!(!text.contains("Company:"));
    }

    #[test]
    fn test_skills_are_one_bullet_per_token_in_order() {
        for template in TemplateKind::ALL {
            let text = format_resume(&record(), template);
            let bullet = template.bullet();
            let skills: Vec<&str> = text
                .lines()
                .filter_map(|line| line.strip_prefix(bullet))
                .filter(|rest| ["C", "Git", "Kernels"].contains(rest))
                .collect();
            assert_eq!(skills, vec!["C", "Git", "Kernels"], "{template:?}");
            assert!(text.ends_with("Kernels\n"), "{template:?} should end with the last skill");
        }
    }

    #[test]
    fn test_empty_sections_have_no_heading() {
        let only_name = ResumeRecord {
            name: Some("Ken".to_string()),
            ..Default::default()
        };
        for template in TemplateKind::ALL {
            let text = format_resume(&only_name, template);
            assert!(!text.contains("EDUCATION"), "{template:?}");
            assert!(!text.contains("EXPERIENCE"), "{template:?}");
            assert!(!text.contains("SKILLS"), "{template:?}");
            assert!(!text.contains("COMPETENCIES"), "{template:?}");
        }
    }

    #[test]
    fn test_empty_record_is_banner_only() {
        let text = format_resume(&ResumeRecord::default(), TemplateKind::Classic);
        assert_eq!(text.lines().count(), TemplateKind::Classic.banner().len());
    }

    #[test]
    fn test_professional_uppercases_name_and_renames_sections() {
        let text = format_resume(&record(), TemplateKind::Professional);
        assert!(text.contains("LINUS TORVALDS\n"));
        assert!(text.contains("PROFESSIONAL EXPERIENCE\n"));
        assert!(text.contains("CORE COMPETENCIES\n"));
        assert!(text.contains("▪ Git\n"));
    }

    #[test]
    fn test_classic_and_creative_field_styles() {
        let classic = format_resume(&record(), TemplateKind::Classic);
        assert!(classic.contains("Graduated: 1996\n"));
        let creative = format_resume(&record(), TemplateKind::Creative);
        assert!(creative.contains("👤 Linus Torvalds\n"));
        assert!(creative.contains("   • Maintainer\n"));
        assert!(!creative.contains("📱"));
    }

    #[test]
    fn test_available_templates_lists_all() {
        assert_eq!(
            available_templates(),
            vec!["MODERN", "CLASSIC", "CREATIVE", "PROFESSIONAL"]
        );
    }
}
