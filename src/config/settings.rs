//! Demo settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use flow_gauge_core::{GaugeFrame, DEFAULT_ANIMATION_DURATION};
use flow_gauge_render::FlowRenderer;
use flow_gauge_types::GaugeStyle;

/// Settings for the demo window, stored as JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemoSettings {
    /// Version of the settings format
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub style: GaugeStyle,
    #[serde(default = "default_breakpoints")]
    pub breakpoints: Vec<f64>,
    /// Labels for the break-points; empty means no labels
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
    #[serde(default)]
    pub ticks_between: usize,
    #[serde(default = "default_info")]
    pub info: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: u64,
    #[serde(default = "default_true")]
    pub animate: bool,
    #[serde(default = "default_true")]
    pub reset_from_zero: bool,
    #[serde(default = "default_window_size")]
    pub window_width: i32,
    #[serde(default = "default_window_size")]
    pub window_height: i32,
}

fn default_version() -> u32 {
    1
}

fn default_breakpoints() -> Vec<f64> {
    vec![350.0, 550.0, 600.0, 650.0, 700.0, 950.0]
}

fn default_labels() -> Vec<String> {
    ["较差", "中等", "良好", "优秀", "极好"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_info() -> String {
    "已使用".to_string()
}

fn default_unit() -> String {
    "MB".to_string()
}

fn default_animation_duration_ms() -> u64 {
    DEFAULT_ANIMATION_DURATION.as_millis() as u64
}

fn default_true() -> bool {
    true
}

fn default_window_size() -> i32 {
    480
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            style: GaugeStyle::default(),
            breakpoints: default_breakpoints(),
            labels: default_labels(),
            ticks_between: 0,
            info: default_info(),
            unit: default_unit(),
            animation_duration_ms: default_animation_duration_ms(),
            animate: true,
            reset_from_zero: true,
            window_width: default_window_size(),
            window_height: default_window_size(),
        }
    }
}

impl DemoSettings {
    /// Load settings from the default location, or defaults if none were saved
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&path)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_path()?)
    }

    /// Get the settings file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "github.flow_gauge", "flow-gauge")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("settings.json"))
    }

    /// Load settings from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(settings)
    }

    /// Save settings to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Labels as passed to the gauge: `None` when there are none.
    pub fn calibration_labels(&self) -> Option<Vec<String>> {
        (!self.labels.is_empty()).then(|| self.labels.clone())
    }

    /// Build a gauge configured from these settings.
    pub fn build_gauge(&self) -> Result<GaugeFrame<FlowRenderer>> {
        let mut frame = GaugeFrame::new(FlowRenderer::new(self.style.clone()));
        frame.set_animation_duration(self.animation_duration());
        frame
            .set_calibration(
                self.breakpoints.clone(),
                self.calibration_labels(),
                self.ticks_between,
            )
            .context("Invalid calibration in settings")?;
        frame.set_info(self.info.as_str());
        frame.set_unit_info(self.unit.as_str());
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("flow-gauge-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: DemoSettings =
            serde_json::from_str(r#"{ "unit": "GB", "style": { "arc_spacing": 12.0 } }"#).unwrap();
        assert_eq!(settings.unit, "GB");
        assert_eq!(settings.style.arc_spacing, 12.0);
        assert_eq!(settings.style.outer_arc_width, 6.0);
        assert_eq!(settings.breakpoints, default_breakpoints());
        assert_eq!(settings.info, "已使用");
        assert!(settings.animate);
    }

    #[test]
    fn test_save_and_load_path() {
        let path = temp_path("nested/settings.json");
        let mut settings = DemoSettings::default();
        settings.labels.clear();
        settings.ticks_between = 4;
        settings.save_to_path(&path).unwrap();

        let loaded = DemoSettings::load_from_path(&path).unwrap();
        assert_eq!(loaded, settings);
        assert!(loaded.calibration_labels().is_none());

        let _ = std::fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(DemoSettings::load_from_path(&temp_path("missing.json")).is_err());
    }

    #[test]
    fn test_build_gauge_applies_calibration() {
        let frame = DemoSettings::default().build_gauge().unwrap();
        assert_eq!(frame.min(), 350.0);
        assert_eq!(frame.max(), 950.0);
        assert_eq!(frame.unit_info(), "MB");
        assert_eq!(frame.info(), Some("已使用"));
        assert_eq!(frame.calibration().total_ticks(), 6);
    }

    #[test]
    fn test_build_gauge_rejects_unsorted_breakpoints() {
        let settings = DemoSettings {
            breakpoints: vec![10.0, 5.0],
            ..DemoSettings::default()
        };
        assert!(settings.build_gauge().is_err());
    }
}
