//! @ai:module:intent Configuration structs for report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportConfig, LayoutConfig, ChartConfig, ScoringConfig, DeliveryConfig, OutputConfig
//! @ai:module:stateless true

use crate::layout::{FitBox, PageSpec};
use crate::scoring::MissingCategoryPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Main configuration for the report engine
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub page: PageSpec,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// @ai:intent Text metrics and image boxes used when building blocks
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_line_height")]
    pub line_height_pt: f64,
    #[serde(default = "default_title_line_height")]
    pub title_line_height_pt: f64,
    #[serde(default = "default_heading_line_height")]
    pub heading_line_height_pt: f64,
    /// Characters per wrapped line.
    #[serde(default = "default_wrap_chars")]
    pub wrap_chars: usize,
    /// Space kept free below a section heading.
    #[serde(default = "default_section_reserve")]
    pub section_reserve_pt: f64,
    #[serde(default = "default_category_chart_box")]
    pub category_chart_box: FitBox,
    #[serde(default = "default_summary_chart_box")]
    pub summary_chart_box: FitBox,
}

/// @ai:intent Raster size and drawing options for charts
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width")]
    pub width_px: u32,
    #[serde(default = "default_chart_height")]
    pub height_px: u32,
    /// Captions and axis labels need a system font.
    #[serde(default = "default_true")]
    pub draw_labels: bool,
}

/// @ai:intent Overall score options
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub missing_category: MissingCategoryPolicy,
}

/// @ai:intent Report delivery options
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryConfig {
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default = "default_message")]
    pub message: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// @ai:intent Where generated files go
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_true")]
    pub write_charts: bool,
    #[serde(default = "default_true")]
    pub write_json: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_height_pt: default_line_height(),
            title_line_height_pt: default_title_line_height(),
            heading_line_height_pt: default_heading_line_height(),
            wrap_chars: default_wrap_chars(),
            section_reserve_pt: default_section_reserve(),
            category_chart_box: default_category_chart_box(),
            summary_chart_box: default_summary_chart_box(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width_px: default_chart_width(),
            height_px: default_chart_height(),
            draw_labels: true,
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            subject: default_subject(),
            message: default_message(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            write_charts: true,
            write_json: true,
        }
    }
}

fn default_line_height() -> f64 {
    14.0
}

fn default_title_line_height() -> f64 {
    24.0
}

fn default_heading_line_height() -> f64 {
    18.0
}

fn default_wrap_chars() -> usize {
    90
}

fn default_section_reserve() -> f64 {
    60.0
}

fn default_category_chart_box() -> FitBox {
    FitBox {
        max_width_pt: 451.28,
        max_height_pt: 280.0,
    }
}

fn default_summary_chart_box() -> FitBox {
    FitBox {
        max_width_pt: 451.28,
        max_height_pt: 260.0,
    }
}

fn default_chart_width() -> u32 {
    800
}

fn default_chart_height() -> u32 {
    500
}

fn default_true() -> bool {
    true
}

fn default_subject() -> String {
    "Your Environmental Test Report".to_string()
}

fn default_message() -> String {
    "Please find attached your environmental test report.".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl ReportConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Describe settings that cannot produce a sensible report
    /// @ai:effects pure
    pub fn issues(&self) -> Vec<String> {
        let mut issues = self.page.issues();
        if self.layout.line_height_pt <= 0.0 {
            issues.push("layout.line_height_pt must be positive".to_string());
        }
        if self.layout.wrap_chars == 0 {
            issues.push("layout.wrap_chars must be positive".to_string());
        }
        if self.chart.width_px == 0 || self.chart.height_px == 0 {
            issues.push("chart size must be non-zero".to_string());
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_default_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("envreport.toml");

        let config = ReportConfig::default();
        config.save(&path).unwrap();

        let loaded = ReportConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ReportConfig = toml::from_str(
            r#"
[scoring]
missing_category = "zero"

[chart]
draw_labels = false
"#,
        )
        .unwrap();

        assert_eq!(config.scoring.missing_category, MissingCategoryPolicy::Zero);
        assert!(!config.chart.draw_labels);
        assert_eq!(config.chart.width_px, 800);
        assert_eq!(config.page, PageSpec::a4());
        assert_eq!(config.delivery.subject, "Your Environmental Test Report");
    }

    #[test]
    fn test_default_config_has_no_issues() {
        assert!(ReportConfig::default().issues().is_empty());
    }
}
