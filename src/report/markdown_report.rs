//! @ai:module:intent Markdown rendering of a report analysis
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter, MarkdownReporterTrait
//! @ai:module:stateless true

use crate::analysis::CategoryAnalysis;
use crate::error::Result;
use crate::report::assembler::{
    ReportAnalysis, RECOMMENDATIONS, RECOMMENDATIONS_HEADING, REPORT_TITLE,
};
use crate::report::write_atomic;
use crate::scoring::ScoreBand;
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Write the Markdown report for an analysis
    fn generate(
        &self,
        analysis: &ReportAnalysis,
        chart_files: &HashMap<String, String>,
        output_path: &Path,
    ) -> Result<()>;
}

/// @ai:intent Renders report analyses as Markdown
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Render the whole report; chart_files maps chart ids to image file names
    /// @ai:effects pure
    pub fn render(analysis: &ReportAnalysis, chart_files: &HashMap<String, String>) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = Self::write_report(&mut output, analysis, chart_files);
        output
    }

    fn write_report(
        out: &mut String,
        analysis: &ReportAnalysis,
        chart_files: &HashMap<String, String>,
    ) -> std::fmt::Result {
        writeln!(out, "# {}", REPORT_TITLE)?;
        writeln!(out)?;
        Self::write_client(out, analysis)?;

        writeln!(out, "## Overall Health Score")?;
        writeln!(out)?;
        writeln!(
            out,
            "**{:.1} / 100** ({})",
            analysis.overall_score, analysis.overall_band
        )?;
        writeln!(out)?;
        writeln!(out, "| Category | Score | Rating |")?;
        writeln!(out, "|----------|-------|--------|")?;
        for category in &analysis.categories {
            match analysis.scores.get(category.category) {
                Some(score) => writeln!(
                    out,
                    "| {} | {:.1} | {} |",
                    category.category.short_label(),
                    score,
                    ScoreBand::from_score(score)
                )?,
                None => writeln!(out, "| {} | - | No data |", category.category.short_label())?,
            }
        }
        writeln!(out)?;
        if let Some(file) = chart_files.get("summary") {
            writeln!(out, "![Category Health Scores]({})", file)?;
            writeln!(out)?;
        }

        for category in &analysis.categories {
            Self::write_category(out, category, chart_files)?;
        }

        writeln!(out, "## {}", RECOMMENDATIONS_HEADING)?;
        writeln!(out)?;
        for (_, title, body) in &RECOMMENDATIONS {
            writeln!(out, "- **{}:** {}", title, body)?;
        }

        Ok(())
    }

    fn write_client(out: &mut String, analysis: &ReportAnalysis) -> std::fmt::Result {
        let client = &analysis.client;
        writeln!(out, "| Field | Value |")?;
        writeln!(out, "|-------|-------|")?;
        writeln!(out, "| Client | {} |", escape_cell(&client.name))?;
        for (label, value) in [
            ("Email", &client.email),
            ("Address", &client.address),
            ("Phone", &client.phone_number),
        ] {
            if !value.trim().is_empty() {
                writeln!(out, "| {} | {} |", label, escape_cell(value))?;
            }
        }
        writeln!(
            out,
            "| Report date | {} |",
            analysis.report_date.format("%Y-%m-%d")
        )?;
        writeln!(out)
    }

    fn write_category(
        out: &mut String,
        category: &CategoryAnalysis,
        chart_files: &HashMap<String, String>,
    ) -> std::fmt::Result {
        writeln!(out, "## {}", category.category.title())?;
        writeln!(out)?;

        if category.results.is_empty() && category.unavailable.is_empty() {
            writeln!(out, "_No measurements submitted._")?;
            writeln!(out)?;
            return Ok(());
        }

        if !category.results.is_empty() {
            writeln!(out, "| Metric | Value | Level | Reference | Notes |")?;
            writeln!(out, "|--------|-------|-------|-----------|-------|")?;
            for outcome in category.results.iter() {
                writeln!(
                    out,
                    "| {} | {} {} | {} | {} | {} |",
                    outcome.label,
                    outcome.result.value,
                    outcome.unit,
                    outcome.result.level.as_str().to_uppercase(),
                    escape_cell(outcome.reference),
                    escape_cell(outcome.result.message)
                )?;
            }
            writeln!(out)?;
        }

        for outcome in category.results.iter() {
            if let Some(guidance) = &outcome.guidance {
                writeln!(out, "**{}**", outcome.label)?;
                writeln!(out)?;
                writeln!(out, "- Typical range: {}", guidance.typical_range)?;
                writeln!(out, "- Likely causes: {}", guidance.causes)?;
                writeln!(out, "- Recommended actions: {}", guidance.actions)?;
                writeln!(out)?;
            }
        }

        if !category.unavailable.is_empty() {
            writeln!(out, "Unavailable: {}", category.unavailable.join(", "))?;
            writeln!(out)?;
        }

        if let Some(file) = chart_files.get(category.category.as_str()) {
            writeln!(out, "![{}]({})", category.category.title(), file)?;
            writeln!(out)?;
        }

        Ok(())
    }
}

/// @ai:intent Keep pipes inside a table cell from splitting the row
/// @ai:effects pure
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:intent Render and write Markdown to file
    /// @ai:effects fs:write
    fn generate(
        &self,
        analysis: &ReportAnalysis,
        chart_files: &HashMap<String, String>,
        output_path: &Path,
    ) -> Result<()> {
        write_atomic(output_path, Self::render(analysis, chart_files).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::config::ReportConfig;
    use crate::input::{ClientInfo, Measurements, ReportRequest};
    use crate::report::assembler::ReportAssembler;
    use crate::report::charts::MockChartRenderer;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn analysis() -> ReportAnalysis {
        let measurements = Measurements::new()
            .with(Category::Air, "carbonDioxide", 2500.0)
            .with(Category::Dust, "windowSill", 50.0)
            .with(Category::Dust, "asbestos", "yes");
        let mut client = ClientInfo::named("Jane | Doe");
        client.email = "jane@example.com".to_string();
        let request = ReportRequest::new(client, measurements);

        ReportAssembler::new(MockChartRenderer::new(1, 1), &ReportConfig::default())
            .analyze(&request, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())
    }

    #[test]
    fn test_render_sections() {
        let markdown = MarkdownReporter::render(&analysis(), &HashMap::new());

        assert!(markdown.starts_with("# Environmental Test Report"));
        assert!(markdown.contains("| Client | Jane \\| Doe |"));
        assert!(markdown.contains("| Report date | 2026-03-14 |"));
        assert!(markdown.contains("## Air Quality Tests"));
        assert!(markdown.contains("| Carbon Dioxide | 2500 ppm | HIGH |"));
        assert!(markdown.contains("- Likely causes: Occupant density, ventilation, combustion sources"));
        assert!(markdown.contains("| Water | - | No data |"));
        assert!(markdown.contains("Unavailable: asbestos"));
        assert!(markdown.contains("## Care Notes & Recommendations"));
    }

    #[test]
    fn test_render_links_chart_files() {
        let mut files = HashMap::new();
        files.insert("air".to_string(), "report-air.png".to_string());
        let markdown = MarkdownReporter::render(&analysis(), &files);
        assert!(markdown.contains("![Air Quality Tests](report-air.png)"));
        assert!(!markdown.contains("![Category Health Scores]"));
    }

    #[test]
    fn test_generate_markdown_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("report.md");

        MarkdownReporter::new()
            .generate(&analysis(), &HashMap::new(), &output)
            .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("Overall Health Score"));
    }
}
