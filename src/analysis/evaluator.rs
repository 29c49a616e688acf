//! @ai:module:intent Classify a single raw measurement into its risk tier
//! @ai:module:layer domain
//! @ai:module:public_api RiskEvaluator, RiskEvaluatorTrait, AnalysisResult
//! @ai:module:stateless true

use crate::catalog::{MetricCatalog, RiskLevel};
use crate::error::{Error, Result};
use crate::input::RawValue;
use serde::Serialize;

/// @ai:intent Outcome of evaluating one metric value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub value: f64,
    pub level: RiskLevel,
    pub message: &'static str,
}

/// @ai:intent Trait for metric evaluation
pub trait RiskEvaluatorTrait: Send + Sync {
    /// @ai:intent Classify a raw value for the given metric key
    fn evaluate(&self, metric_key: &str, raw: &RawValue) -> Result<AnalysisResult>;
}

/// @ai:intent Evaluates raw values against a metric catalog
#[derive(Debug, Clone, Copy)]
pub struct RiskEvaluator {
    catalog: &'static MetricCatalog,
}

impl RiskEvaluator {
    /// @ai:intent Create an evaluator over the built-in catalog
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::with_catalog(MetricCatalog::builtin())
    }

    /// @ai:intent Create an evaluator over a specific catalog
    /// @ai:effects pure
    pub fn with_catalog(catalog: &'static MetricCatalog) -> Self {
        Self { catalog }
    }

    /// @ai:intent Catalog this evaluator reads
    /// @ai:effects pure
    pub fn catalog(&self) -> &'static MetricCatalog {
        self.catalog
    }
}

impl Default for RiskEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskEvaluatorTrait for RiskEvaluator {
    /// @ai:intent Coerce the value and return the first tier that admits it
    /// @ai:pre catalog tiers are exhaustive
    /// @ai:post unknown keys fail with UnknownMetric; invalid values read as 0
    /// @ai:effects pure
    fn evaluate(&self, metric_key: &str, raw: &RawValue) -> Result<AnalysisResult> {
        let metric = self
            .catalog
            .get(metric_key)
            .ok_or_else(|| Error::UnknownMetric {
                key: metric_key.to_string(),
            })?;

        let value = match raw.parse() {
            Some(value) => value,
            None => {
                tracing::debug!(
                    "Invalid measurement for {}: {:?}, reading as 0",
                    metric_key,
                    raw
                );
                0.0
            }
        };

        let tier = metric
            .classify(value)
            .or_else(|| metric.tiers.last())
            .ok_or_else(|| Error::UnknownMetric {
                key: metric_key.to_string(),
            })?;

        Ok(AnalysisResult {
            value,
            level: tier.level,
            message: tier.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(key: &str, raw: impl Into<RawValue>) -> RiskLevel {
        RiskEvaluator::new().evaluate(key, &raw.into()).unwrap().level
    }

    #[test]
    fn test_carbon_dioxide_tiers() {
        assert_eq!(level("carbonDioxide", 800.0), RiskLevel::Normal);
        assert_eq!(level("carbonDioxide", 1500.0), RiskLevel::Warning);
        assert_eq!(level("carbonDioxide", 2500.0), RiskLevel::High);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(level("carbonDioxide", 1000.0), RiskLevel::Normal);
        assert_eq!(level("carbonDioxide", 2000.0), RiskLevel::Warning);
        assert_eq!(level("carbonDioxide", 2000.01), RiskLevel::High);
    }

    #[test]
    fn test_string_values_are_parsed() {
        assert_eq!(level("pm25", "35"), RiskLevel::Warning);
        assert_eq!(level("pm25", "36 µg/m³"), RiskLevel::High);
    }

    #[test]
    fn test_invalid_value_reads_as_zero() {
        let result = RiskEvaluator::new()
            .evaluate("lead", &RawValue::from("n/a"))
            .unwrap();
        assert_eq!(result.value, 0.0);
        assert_eq!(result.level, RiskLevel::Normal);
        assert_eq!(result.message, "Safe for daily consumption.");
    }

    #[test]
    fn test_humidity_band() {
        assert_eq!(level("relativeHumidity", 25.0), RiskLevel::High);
        assert_eq!(level("relativeHumidity", 30.0), RiskLevel::Warning);
        assert_eq!(level("relativeHumidity", 35.0), RiskLevel::Warning);
        assert_eq!(level("relativeHumidity", 39.0), RiskLevel::Warning);
        assert_eq!(level("relativeHumidity", 40.0), RiskLevel::Normal);
        assert_eq!(level("relativeHumidity", 55.0), RiskLevel::Normal);
        assert_eq!(level("relativeHumidity", 56.0), RiskLevel::Warning);
        assert_eq!(level("relativeHumidity", 60.0), RiskLevel::Warning);
        assert_eq!(level("relativeHumidity", 65.0), RiskLevel::Warning);
        assert_eq!(level("relativeHumidity", 70.0), RiskLevel::High);
    }

    #[test]
    fn test_humidity_between_ranges_is_high() {
        assert_eq!(level("relativeHumidity", 39.5), RiskLevel::High);
        assert_eq!(level("relativeHumidity", 55.5), RiskLevel::High);
    }

    #[test]
    fn test_unknown_metric_fails() {
        let err = RiskEvaluator::new()
            .evaluate("radon", &RawValue::from(4.0))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownMetric { key } if key == "radon"));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let evaluator = RiskEvaluator::new();
        let raw = RawValue::from("0.7");
        let first = evaluator.evaluate("leadPaintXRF", &raw).unwrap();
        let second = evaluator.evaluate("leadPaintXRF", &raw).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.level, RiskLevel::Warning);
    }
}
