//! @ai:module:intent Format evaluations, the catalog and report summaries for the terminal
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_evaluation, format_catalog, format_report_summary
//! @ai:module:depends_on analysis, catalog, report
//! @ai:module:stateless true

use crate::analysis::AnalysisResult;
use crate::catalog::{Category, MetricCatalog, MetricDefinition, RiskLevel, TierBound};
use crate::report::{GeneratedFiles, ReportAnalysis};
use crate::scoring::ScoreBand;
use colored::{ColoredString, Colorize};
use serde::Serialize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

fn level_label(level: RiskLevel) -> ColoredString {
    let text = level.as_str().to_uppercase();
    match level {
        RiskLevel::Normal => text.green().bold(),
        RiskLevel::Warning => text.yellow().bold(),
        RiskLevel::High => text.red().bold(),
    }
}

fn band_label(band: ScoreBand) -> ColoredString {
    match band {
        ScoreBand::Good => band.label().green(),
        ScoreBand::Moderate => band.label().yellow(),
        ScoreBand::Poor => band.label().red(),
    }
}

#[derive(Serialize)]
struct EvaluationView<'a> {
    key: &'a str,
    label: &'a str,
    category: Category,
    unit: &'a str,
    #[serde(flatten)]
    result: &'a AnalysisResult,
}

/// @ai:intent Format a single metric evaluation
/// @ai:effects pure
pub fn format_evaluation(
    metric: &MetricDefinition,
    result: &AnalysisResult,
    format: OutputFormat,
) -> String {
    let view = EvaluationView {
        key: metric.key,
        label: metric.label,
        category: metric.category,
        unit: metric.unit,
        result,
    };

    match format {
        OutputFormat::Json => to_json(&view, false),
        OutputFormat::JsonPretty => to_json(&view, true),
        OutputFormat::Text => format!(
            "{} {} {} {} - {}\n  {} {}\n",
            level_label(result.level),
            metric.label.bold(),
            result.value,
            metric.unit,
            result.message,
            "reference:".cyan(),
            metric.reference
        ),
    }
}

fn describe_bound(bound: Option<TierBound>) -> String {
    match bound {
        Some(TierBound::AtMost(v)) => format!("<= {}", v),
        Some(TierBound::Below(v)) => format!("< {}", v),
        None => "otherwise".to_string(),
    }
}

/// @ai:intent Format the catalog, optionally limited to one category
/// @ai:effects pure
pub fn format_catalog(
    catalog: &MetricCatalog,
    category: Option<Category>,
    format: OutputFormat,
) -> String {
    let metrics: Vec<&MetricDefinition> = catalog
        .all()
        .iter()
        .filter(|m| category.map(|c| m.category == c).unwrap_or(true))
        .collect();

    match format {
        OutputFormat::Json => to_json(&metrics, false),
        OutputFormat::JsonPretty => to_json(&metrics, true),
        OutputFormat::Text => {
            let mut output = String::new();

            for cat in Category::ALL {
                let in_category: Vec<_> = metrics.iter().filter(|m| m.category == cat).collect();
                if in_category.is_empty() {
                    continue;
                }

                output.push_str(&format!("{}\n", cat.title().bold()));
                for metric in in_category {
                    output.push_str(&format!(
                        "  {} {} ({})\n",
                        metric.key.cyan(),
                        metric.label,
                        metric.unit.dimmed()
                    ));
                    for tier in metric.tiers {
                        output.push_str(&format!(
                            "    {:<12} {}\n",
                            describe_bound(tier.bound),
                            level_label(tier.level)
                        ));
                    }
                }
                output.push('\n');
            }

            output.push_str(&format!("{} metrics\n", metrics.len()));
            output
        }
    }
}

/// @ai:intent Format the outcome of a generate run
/// @ai:effects pure
pub fn format_report_summary(
    analysis: &ReportAnalysis,
    files: &GeneratedFiles,
    page_count: usize,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}\n",
        "Report for".bold(),
        analysis.client.name.bold()
    ));
    output.push_str(&format!(
        "  Overall health score: {:.1} ({})\n",
        analysis.overall_score,
        band_label(analysis.overall_band)
    ));

    for category in &analysis.categories {
        let score = match analysis.scores.get(category.category) {
            Some(score) => format!("{:.1}", score),
            None => "no data".dimmed().to_string(),
        };
        output.push_str(&format!(
            "  {:<8} {}",
            category.category.short_label(),
            score
        ));
        if let Some(worst) = category.worst_level() {
            if worst != RiskLevel::Normal {
                output.push_str(&format!(" (worst: {})", level_label(worst)));
            }
        }
        if !category.unavailable.is_empty() {
            output.push_str(&format!(
                " {} {}",
                "unavailable:".yellow(),
                category.unavailable.join(", ")
            ));
        }
        output.push('\n');
    }

    output.push_str(&format!("  Pages: {}\n", page_count));
    for path in files.all() {
        output.push_str(&format!("  {} {}\n", "wrote".green(), path.display()));
    }

    output
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}
