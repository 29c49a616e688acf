//! @ai:module:intent JSON rendering of a report analysis and its page layout
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter, JsonReporterTrait
//! @ai:module:stateless true

use crate::error::Result;
use crate::layout::Document;
use crate::report::assembler::{AssembledReport, ReportAnalysis};
use crate::report::write_atomic;
use serde::Serialize;
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Write analysis and layout as JSON
    fn generate(&self, report: &AssembledReport, output_path: &Path) -> Result<()>;
}

/// Image bytes are left out; placements keep their size and label.
#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    analysis: &'a ReportAnalysis,
    page_count: usize,
    layout: &'a Document,
}

/// @ai:intent Generates JSON reports
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Serialize a report to pretty JSON
    /// @ai:effects time
    pub fn render(report: &AssembledReport) -> Result<String> {
        let json = JsonReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            analysis: &report.analysis,
            page_count: report.document.page_count(),
            layout: &report.document,
        };
        Ok(serde_json::to_string_pretty(&json)?)
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:intent Generate JSON report to file
    /// @ai:effects fs:write
    fn generate(&self, report: &AssembledReport, output_path: &Path) -> Result<()> {
        let json = Self::render(report)?;
        write_atomic(output_path, json.as_bytes())
    }
}
