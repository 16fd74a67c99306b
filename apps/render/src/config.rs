use anyhow::{bail, Context, Result};

use crate::export::PageSize;
use crate::layout::LayoutSettings;

/// Export configuration loaded from environment variables.
/// Every variable is optional; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub page_size: PageSize,
    /// Raster pixels per layout unit.
    pub raster_scale: f32,
    pub min_height: f32,
    pub settle_passes: u32,
    pub rust_log: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            page_size: PageSize::A4,
            raster_scale: 1.0,
            min_height: 900.0,
            settle_passes: 3,
            rust_log: "info".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = ExportConfig::default();
        let var = |key: &str, default: String| lookup(key).unwrap_or(default);

        let page_size = var("RESUME_PAGE_SIZE", "a4".to_string())
            .parse::<PageSize>()
            .context("RESUME_PAGE_SIZE must be 'a4' or 'letter'")?;

        let raster_scale = var("RESUME_RASTER_SCALE", defaults.raster_scale.to_string())
            .parse::<f32>()
            .context("RESUME_RASTER_SCALE must be a number")?;
        if !(raster_scale > 0.0 && raster_scale <= 4.0) {
            bail!("RESUME_RASTER_SCALE must be in (0, 4], got {raster_scale}");
        }

        let min_height = var("RESUME_MIN_HEIGHT", defaults.min_height.to_string())
            .parse::<f32>()
            .context("RESUME_MIN_HEIGHT must be a number")?;
        if !min_height.is_finite() || min_height < 0.0 {
            bail!("RESUME_MIN_HEIGHT must be a non-negative number, got {min_height}");
        }

        let settle_passes = var("RESUME_SETTLE_PASSES", defaults.settle_passes.to_string())
            .parse::<u32>()
            .context("RESUME_SETTLE_PASSES must be a positive integer")?;
        if settle_passes == 0 {
            bail!("RESUME_SETTLE_PASSES must be at least 1");
        }

        Ok(ExportConfig {
            page_size,
            raster_scale,
            min_height,
            settle_passes,
            rust_log: var("RUST_LOG", defaults.rust_log),
        })
    }

    pub fn layout_settings(&self) -> LayoutSettings {
        LayoutSettings {
            min_height: self.min_height,
            settle_passes: self.settle_passes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = ExportConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ExportConfig::default());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = ExportConfig::from_lookup(lookup(&[
            ("RESUME_PAGE_SIZE", "Letter"),
            ("RESUME_RASTER_SCALE", "2"),
            ("RESUME_MIN_HEIGHT", "1100"),
            ("RESUME_SETTLE_PASSES", "5"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.page_size, PageSize::Letter);
        assert_eq!(config.raster_scale, 2.0);
        assert_eq!(config.layout_settings().min_height, 1100.0);
        assert_eq!(config.layout_settings().settle_passes, 5);
        assert_eq!(config.rust_log, "debug");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(ExportConfig::from_lookup(lookup(&[("RESUME_PAGE_SIZE", "tabloid")])).is_err());
        assert!(ExportConfig::from_lookup(lookup(&[("RESUME_RASTER_SCALE", "0")])).is_err());
        assert!(ExportConfig::from_lookup(lookup(&[("RESUME_RASTER_SCALE", "8")])).is_err());
        assert!(ExportConfig::from_lookup(lookup(&[("RESUME_MIN_HEIGHT", "-1")])).is_err());
        assert!(ExportConfig::from_lookup(lookup(&[("RESUME_SETTLE_PASSES", "0")])).is_err());
    }
}
