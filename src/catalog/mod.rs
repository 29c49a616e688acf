//! @ai:module:intent Static catalog of metric definitions and their risk tiers
//! @ai:module:layer domain
//! @ai:module:public_api MetricCatalog, MetricDefinition, Tier, TierBound, RiskLevel, Category, AliasRule
//! @ai:module:stateless true

pub mod aliases;
pub mod metric;
pub mod table;

pub use aliases::{aliases_for, is_alias_key, AliasRule};
pub use metric::{Category, MetricDefinition, RiskLevel, Tier, TierBound};

use std::collections::HashSet;

/// @ai:intent Read-only lookup table over metric definitions
#[derive(Debug, Clone, Copy)]
pub struct MetricCatalog {
    metrics: &'static [MetricDefinition],
}

static BUILTIN: MetricCatalog = MetricCatalog::new(&table::BUILTIN_METRICS);

impl MetricCatalog {
    /// @ai:intent Wrap a static definition table
    /// @ai:effects pure
    pub const fn new(metrics: &'static [MetricDefinition]) -> Self {
        Self { metrics }
    }

    /// @ai:intent The process-wide built-in catalog
    /// @ai:effects pure
    pub fn builtin() -> &'static MetricCatalog {
        &BUILTIN
    }

    /// @ai:intent Look up a metric by its canonical key
    /// @ai:effects pure
    pub fn get(&self, key: &str) -> Option<&'static MetricDefinition> {
        self.metrics.iter().find(|m| m.key == key)
    }

    /// @ai:intent All metrics in display order
    /// @ai:effects pure
    pub fn all(&self) -> &'static [MetricDefinition] {
        self.metrics
    }

    /// @ai:intent Metrics of one category in display order
    /// @ai:effects pure
    pub fn for_category(
        &self,
        category: Category,
    ) -> impl Iterator<Item = &'static MetricDefinition> {
        self.metrics.iter().filter(move |m| m.category == category)
    }

    /// @ai:intent Check every definition and the key set for structural problems
    /// @ai:post empty result means every metric has exhaustive, ascending tiers
    /// @ai:effects pure
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for metric in self.metrics {
            if !seen.insert(metric.key) {
                issues.push(format!("{}: duplicate metric key", metric.key));
            }
            issues.extend(metric.tier_issues());
        }

        for category in Category::ALL {
            for rule in aliases_for(category) {
                for target in rule.target_keys() {
                    match self.get(target) {
                        Some(m) if m.category == category => {}
                        _ => issues.push(format!(
                            "{}: alias target is not a {} metric",
                            target, category
                        )),
                    }
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dense sample of the real line, including negatives and extremes.
    fn sample_values() -> Vec<f64> {
        let mut values: Vec<f64> = (-200..=4000).map(|i| i as f64 * 0.5).collect();
        values.extend([
            f64::MIN,
            -1e12,
            -0.0,
            0.0,
            1e-9,
            1.9,
            3.9,
            0.4,
            0.9,
            1e12,
            f64::MAX,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ]);
        values
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let issues = MetricCatalog::builtin().validate();
        assert!(issues.is_empty(), "catalog issues: {:?}", issues);
    }

    #[test]
    fn test_every_value_matches_exactly_one_tier() {
        for metric in MetricCatalog::builtin().all() {
            for value in sample_values() {
                let tier = metric.classify(value);
                assert!(tier.is_some(), "{} has no tier for {}", metric.key, value);

                let first_index = metric
                    .tiers
                    .iter()
                    .position(|t| t.admits(value))
                    .unwrap();
                assert_eq!(
                    tier.unwrap() as *const Tier,
                    &metric.tiers[first_index] as *const Tier
                );
            }
        }
    }

    #[test]
    fn test_levels_never_decrease_for_monotonic_metrics() {
        for metric in MetricCatalog::builtin().all() {
            if !metric.is_monotonic() {
                continue;
            }

            let mut previous = RiskLevel::Normal;
            let mut values = sample_values();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap());

            for value in values {
                let level = metric.classify(value).unwrap().level;
                assert!(
                    level >= previous,
                    "{} drops from {} to {} at {}",
                    metric.key,
                    previous,
                    level,
                    value
                );
                previous = level;
            }
        }
    }

    #[test]
    fn test_relative_humidity_is_the_only_band_metric() {
        let bands: Vec<_> = MetricCatalog::builtin()
            .all()
            .iter()
            .filter(|m| !m.is_monotonic())
            .map(|m| m.key)
            .collect();
        assert_eq!(bands, vec!["relativeHumidity"]);
    }

    #[test]
    fn test_category_grouping() {
        let catalog = MetricCatalog::builtin();
        assert_eq!(catalog.for_category(Category::Air).count(), 8);
        assert_eq!(catalog.for_category(Category::Water).count(), 7);
        assert_eq!(catalog.for_category(Category::Surface).count(), 2);
        assert_eq!(catalog.for_category(Category::Dust).count(), 3);
    }

    #[test]
    fn test_lookup_unknown_key() {
        assert!(MetricCatalog::builtin().get("radon").is_none());
        assert!(MetricCatalog::builtin().get("carbonDioxide").is_some());
    }
}
