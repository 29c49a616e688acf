//! @ai:module:intent Turn submitted measurements into per-category analysis results
//! @ai:module:layer domain
//! @ai:module:public_api RiskEvaluator, AnalysisResult, CategoryResult, CategoryAnalysis, analyze_category, analyze_all
//! @ai:module:stateless true

pub mod evaluator;
pub mod guidance;
pub mod resolver;

pub use evaluator::{AnalysisResult, RiskEvaluator, RiskEvaluatorTrait};
pub use guidance::{guidance_for, Guidance};
pub use resolver::{resolve_category, Resolution, ResolvedMetric, ValueSource};

use crate::catalog::{Category, RiskLevel};
use crate::input::{Measurements, RawValue};
use serde::Serialize;
use std::collections::BTreeMap;

/// @ai:intent One evaluated metric with its display metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricOutcome {
    pub key: &'static str,
    pub label: &'static str,
    pub short_label: &'static str,
    pub unit: &'static str,
    pub reference: &'static str,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub source: ValueSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<Guidance>,
}

/// @ai:intent Ordered metric results for one category, in display order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryResult {
    entries: Vec<MetricOutcome>,
}

impl CategoryResult {
    /// @ai:intent Create an empty result set
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Append a result, keeping insertion order
    /// @ai:effects state:write
    pub fn push(&mut self, outcome: MetricOutcome) {
        self.entries.push(outcome);
    }

    /// @ai:effects pure
    pub fn iter(&self) -> impl Iterator<Item = &MetricOutcome> {
        self.entries.iter()
    }

    /// @ai:effects pure
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// @ai:effects pure
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// @ai:intent Result for a metric key, if it was evaluated
    /// @ai:effects pure
    pub fn get(&self, key: &str) -> Option<&MetricOutcome> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// @ai:intent Risk levels of all results in order
    /// @ai:effects pure
    pub fn levels(&self) -> impl Iterator<Item = RiskLevel> + '_ {
        self.entries.iter().map(|e| e.result.level)
    }
}

/// @ai:intent Everything known about one category after evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAnalysis {
    pub category: Category,
    pub results: CategoryResult,
    /// Submitted field names that could not be evaluated.
    pub unavailable: Vec<String>,
}

impl CategoryAnalysis {
    /// @ai:intent Check whether any evaluated value is non-zero (chart worth drawing)
    /// @ai:effects pure
    pub fn has_nonzero_data(&self) -> bool {
        self.results.iter().any(|e| e.result.value != 0.0)
    }

    /// @ai:intent Worst level among the category's results
    /// @ai:effects pure
    pub fn worst_level(&self) -> Option<RiskLevel> {
        self.results.levels().max()
    }
}

/// @ai:intent Resolve and evaluate one category's submitted fields
/// @ai:post results follow catalog order; unknown fields land in `unavailable`
/// @ai:effects pure
pub fn analyze_category(
    evaluator: &RiskEvaluator,
    category: Category,
    input: &BTreeMap<String, RawValue>,
) -> CategoryAnalysis {
    let catalog = evaluator.catalog();
    let resolution = resolve_category(catalog, category, input);

    let mut results = CategoryResult::new();
    let mut unavailable = resolution.unknown;

    for resolved in resolution.metrics {
        let Some(metric) = catalog.get(resolved.key) else {
            unavailable.push(resolved.key.to_string());
            continue;
        };

        match evaluator.evaluate(resolved.key, &resolved.raw) {
            Ok(result) => {
                let guidance = if result.level == RiskLevel::Normal {
                    None
                } else {
                    guidance_for(metric.key, Some(result.value))
                };
                results.push(MetricOutcome {
                    key: metric.key,
                    label: metric.label,
                    short_label: metric.short_label,
                    unit: metric.unit,
                    reference: metric.reference,
                    result,
                    source: resolved.source,
                    guidance,
                });
            }
            Err(err) => {
                tracing::warn!("Skipping {}: {}", resolved.key, err);
                unavailable.push(resolved.key.to_string());
            }
        }
    }

    CategoryAnalysis {
        category,
        results,
        unavailable,
    }
}

/// @ai:intent Analyze all four categories in report order
/// @ai:effects pure
pub fn analyze_all(evaluator: &RiskEvaluator, measurements: &Measurements) -> Vec<CategoryAnalysis> {
    Category::ALL
        .iter()
        .map(|&category| analyze_category(evaluator, category, measurements.category(category)))
        .collect()
}
