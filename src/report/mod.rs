//! @ai:module:intent Report assembly and the files written for a finished report
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportAssembler, ReportGenerator, JsonReporter, MarkdownReporter, PlottersChartRenderer, report_file_name

pub mod assembler;
pub mod charts;
pub mod json_report;
pub mod markdown_report;

pub use assembler::{AssembledReport, ReportAnalysis, ReportAssembler};
pub use charts::{
    ChartBar, ChartDataset, ChartImage, ChartRenderError, ChartRendererTrait,
    FailingChartRenderer, MockChartRenderer, PlottersChartRenderer,
};
pub use json_report::{JsonReporter, JsonReporterTrait};
pub use markdown_report::{MarkdownReporter, MarkdownReporterTrait};

use crate::config::ReportConfig;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// @ai:intent Lowercase, hyphen-separated form of a client name
/// @ai:post only [a-z0-9-]; "client" when nothing remains
/// @ai:effects pure
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in name.trim().to_lowercase().chars() {
        if c.is_whitespace() {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
    }

    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "client".to_string()
    } else {
        slug
    }
}

/// @ai:intent Shared stem of every file produced for one report
/// @ai:effects pure
pub fn report_file_stem(client_name: &str, date: NaiveDate) -> String {
    format!(
        "environmental-report-{}-{}",
        slugify(client_name),
        date.format("%Y-%m-%d")
    )
}

/// @ai:intent environmental-report-<slug>-<YYYY-MM-DD>.<ext>
/// @ai:effects pure
pub fn report_file_name(client_name: &str, date: NaiveDate, extension: &str) -> String {
    format!("{}.{}", report_file_stem(client_name, date), extension)
}

/// @ai:intent Write a file through a temp file in the same directory, then rename
/// @ai:effects fs:write
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// @ai:intent Paths written by one generate_all call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedFiles {
    pub markdown: PathBuf,
    pub json: Option<PathBuf>,
    pub charts: Vec<PathBuf>,
}

impl GeneratedFiles {
    /// @ai:effects pure
    pub fn all(&self) -> Vec<&Path> {
        let mut paths = vec![self.markdown.as_path()];
        paths.extend(self.json.as_deref());
        paths.extend(self.charts.iter().map(|p| p.as_path()));
        paths
    }
}

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    markdown: MarkdownReporter,
    charts: PlottersChartRenderer,
    write_charts: bool,
    write_json: bool,
}

impl ReportGenerator {
    /// @ai:intent Create a report generator from configuration
    /// @ai:effects pure
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            json: JsonReporter::new(),
            markdown: MarkdownReporter::new(),
            charts: PlottersChartRenderer::from_config(&config.chart),
            write_charts: config.output.write_charts,
            write_json: config.output.write_json,
        }
    }

    /// @ai:intent Generate all reports
    /// @ai:post chart failures are logged and skipped; markdown is always written
    /// @ai:effects fs:write
    pub fn generate_all(&self, report: &AssembledReport, output_dir: &Path) -> Result<GeneratedFiles> {
        std::fs::create_dir_all(output_dir)?;

        let analysis = &report.analysis;
        let stem = report_file_stem(&analysis.client.name, analysis.report_date);
        let mut files = GeneratedFiles::default();
        let mut chart_files = HashMap::new();

        if self.write_charts {
            for dataset in &report.charts {
                let file_name = format!("{}-{}.png", stem, dataset.id);
                let path = output_dir.join(&file_name);
                match self.charts.render_to_file(dataset, &path) {
                    Ok(()) => {
                        chart_files.insert(dataset.id.clone(), file_name);
                        files.charts.push(path);
                    }
                    Err(err) => tracing::warn!("Skipping chart file {}: {}", file_name, err),
                }
            }
        }

        files.markdown = output_dir.join(format!("{}.md", stem));
        self.markdown
            .generate(analysis, &chart_files, &files.markdown)?;

        if self.write_json {
            let path = output_dir.join(format!("{}.json", stem));
            self.json.generate(report, &path)?;
            files.json = Some(path);
        }

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(files)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(&ReportConfig::default())
    }
}
