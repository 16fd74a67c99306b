//! Theme presets and the user-customizable style profile.
//!
//! A profile is a base theme tag plus an explicit struct of overridable fields.
//! Selecting a base theme rewrites every field with that theme's defaults, so
//! customizations must be re-applied after a theme switch.

use serde::{Deserialize, Serialize};
use tracing::warn;

// ────────────────────────────────────────────────────────────────────────────
// Enumerations
// ────────────────────────────────────────────────────────────────────────────

/// The four fixed theme presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseTheme {
    Classic,
    Modern,
    Professional,
    Creative,
}

impl BaseTheme {
    pub const ALL: [BaseTheme; 4] = [
        BaseTheme::Classic,
        BaseTheme::Modern,
        BaseTheme::Professional,
        BaseTheme::Creative,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            BaseTheme::Classic => "Classic",
            BaseTheme::Modern => "Modern",
            BaseTheme::Professional => "Professional",
            BaseTheme::Creative => "Creative",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BaseTheme::Classic => "Traditional and timeless design",
            BaseTheme::Modern => "Clean and contemporary style",
            BaseTheme::Professional => "Corporate and formal layout",
            BaseTheme::Creative => "Bold and artistic presentation",
        }
    }

    /// Separator placed between contact items in the header row.
    pub fn contact_separator(self) -> &'static str {
        match self {
            BaseTheme::Classic => " | ",
            BaseTheme::Modern => "  •  ",
            BaseTheme::Professional => "     ",
            BaseTheme::Creative => "  ◆  ",
        }
    }

    pub fn experience_title(self) -> &'static str {
        match self {
            BaseTheme::Professional => "PROFESSIONAL EXPERIENCE",
            _ => "EXPERIENCE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Solid,
    Dashed,
    None,
}

/// Which accent color of the profile a section header uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentSlot {
    Primary,
    Secondary,
    Tertiary,
}

/// Section → accent slot mapping carried by the theme configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionAccents {
    pub education: AccentSlot,
    pub experience: AccentSlot,
    pub skills: AccentSlot,
}

impl Default for SectionAccents {
    fn default() -> Self {
        SectionAccents {
            education: AccentSlot::Primary,
            experience: AccentSlot::Secondary,
            skills: AccentSlot::Tertiary,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Colors
// ────────────────────────────────────────────────────────────────────────────

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };
    /// Substituted for any text or accent color that fails to parse.
    pub const NEUTRAL: Rgb = Rgb { r: 0x55, g: 0x55, b: 0x55 };

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A hex-RGB color string as stored in the profile (`#rrggbb` or `#rgb`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(pub String);

impl HexColor {
    pub fn new(value: impl Into<String>) -> Self {
        HexColor(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses `#rrggbb` / `#rgb` (leading `#` optional, case-insensitive).
    pub fn parse(&self) -> Option<Rgb> {
        let digits = self.0.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            6 => Some(Rgb {
                r: channel(&digits[0..2])?,
                g: channel(&digits[2..4])?,
                b: channel(&digits[4..6])?,
            }),
            3 => {
                let expand = |s: &str| channel(s).map(|v| v * 17);
                Some(Rgb {
                    r: expand(&digits[0..1])?,
                    g: expand(&digits[1..2])?,
                    b: expand(&digits[2..3])?,
                })
            }
            _ => None,
        }
    }

    /// Parses the color or substitutes `fallback`, logging the substitution.
    pub fn resolve_or(&self, fallback: Rgb) -> Rgb {
        self.parse().unwrap_or_else(|| {
            warn!(
                color = %self.0,
                fallback = %fallback.to_hex(),
                "Invalid color in style profile, using fallback"
            );
            fallback
        })
    }
}

impl From<&str> for HexColor {
    fn from(value: &str) -> Self {
        HexColor(value.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Style fields and profile
// ────────────────────────────────────────────────────────────────────────────

/// Every field a user may override on top of a base theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleFields {
    pub header_font: String,
    pub body_font: String,
    pub header_font_size: u32,
    pub section_font_size: u32,
    pub body_font_size: u32,

    pub primary_color: HexColor,
    pub secondary_color: HexColor,
    pub tertiary_color: HexColor,
    pub header_text_color: HexColor,
    pub body_text_color: HexColor,
    pub background_color: HexColor,
    pub divider_color: HexColor,

    /// Paper (content) width in layout units.
    pub paper_width: f32,
    pub padding: f32,
    pub section_spacing: f32,

    pub use_icons: bool,
    pub use_borders: bool,
    pub border_style: BorderStyle,

    pub section_accents: SectionAccents,
}

impl StyleFields {
    /// The full default field set for a theme: shared defaults overlaid by the theme's own.
    pub fn defaults_for(theme: BaseTheme) -> Self {
        let mut fields = StyleFields {
            header_font: "Georgia".to_string(),
            body_font: "Segoe UI".to_string(),
            header_font_size: 32,
            section_font_size: 14,
            body_font_size: 12,
            primary_color: "#3498db".into(),
            secondary_color: "#e74c3c".into(),
            tertiary_color: "#27ae60".into(),
            header_text_color: "#2c3e50".into(),
            body_text_color: "#555555".into(),
            background_color: "#ffffff".into(),
            divider_color: "#3498db".into(),
            paper_width: 650.0,
            padding: 50.0,
            section_spacing: 25.0,
            use_icons: true,
            use_borders: true,
            border_style: BorderStyle::Solid,
            section_accents: SectionAccents::default(),
        };

        match theme {
            BaseTheme::Classic => {
                fields.header_font = "Times New Roman".to_string();
                fields.body_font = "Times New Roman".to_string();
                fields.header_font_size = 28;
                fields.primary_color = "#8B7355".into();
                fields.secondary_color = "#5d4e37".into();
                fields.background_color = "#faf8f3".into();
                fields.divider_color = "#8B7355".into();
            }
            BaseTheme::Modern => {
                fields.header_font = "Segoe UI".to_string();
                fields.body_font = "Segoe UI".to_string();
                fields.header_font_size = 36;
                fields.primary_color = "#667eea".into();
                fields.secondary_color = "#764ba2".into();
                fields.background_color = "#ffffff".into();
                fields.divider_color = "#667eea".into();
            }
            BaseTheme::Creative => {
                fields.header_font = "Arial Black".to_string();
                fields.body_font = "Segoe UI".to_string();
                fields.header_font_size = 30;
                fields.primary_color = "#e74c3c".into();
                fields.secondary_color = "#f39c12".into();
                fields.background_color = "#fff5f5".into();
                fields.divider_color = "#e74c3c".into();
            }
            // Professional is the shared default set.
            BaseTheme::Professional => {}
        }

        fields
    }
}

/// The resolved visual configuration for one export session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    base_theme: BaseTheme,
    pub fields: StyleFields,
}

impl Default for StyleProfile {
    fn default() -> Self {
        StyleProfile::new(BaseTheme::Professional)
    }
}

impl StyleProfile {
    pub fn new(theme: BaseTheme) -> Self {
        StyleProfile {
            base_theme: theme,
            fields: StyleFields::defaults_for(theme),
        }
    }

    pub fn base_theme(&self) -> BaseTheme {
        self.base_theme
    }

    /// Switches the base theme. All fields are reset to the new theme's defaults.
    pub fn set_base_theme(&mut self, theme: BaseTheme) {
        self.base_theme = theme;
        self.fields = StyleFields::defaults_for(theme);
    }

    pub fn accent(&self, slot: AccentSlot) -> &HexColor {
        match slot {
            AccentSlot::Primary => &self.fields.primary_color,
            AccentSlot::Secondary => &self.fields.secondary_color,
            AccentSlot::Tertiary => &self.fields.tertiary_color,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
