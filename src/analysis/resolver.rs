//! @ai:module:intent Map submitted field names onto canonical metric keys
//! @ai:module:layer domain
//! @ai:module:public_api resolve_category, Resolution, ResolvedMetric, ValueSource
//! @ai:module:stateless true

use crate::catalog::{aliases_for, is_alias_key, AliasRule, Category, MetricCatalog};
use crate::input::RawValue;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// @ai:intent Where a resolved value came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueSource {
    Direct,
    Alias { fields: Vec<&'static str> },
}

/// @ai:intent A submitted value bound to a catalog metric
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMetric {
    pub key: &'static str,
    pub raw: RawValue,
    pub source: ValueSource,
}

/// @ai:intent Resolution result for one category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Catalog display order.
    pub metrics: Vec<ResolvedMetric>,
    /// Submitted fields that no metric or alias of the category accepts.
    pub unknown: Vec<String>,
}

/// @ai:intent Bind one category's submitted fields to catalog metrics
/// @ai:post blank submissions are treated as absent
/// @ai:post a canonical key with a non-zero reading beats every alias for it
/// @ai:post a canonical reading of zero gives way to the first alias with a non-zero reading
/// @ai:effects pure
pub fn resolve_category(
    catalog: &MetricCatalog,
    category: Category,
    input: &BTreeMap<String, RawValue>,
) -> Resolution {
    let submitted = |key: &str| input.get(key).filter(|raw| !raw.is_blank());

    let mut bound = Bindings::default();
    for metric in catalog.for_category(category) {
        if let Some(raw) = submitted(metric.key) {
            if raw.coerce() == 0.0 {
                bound.placeholders.insert(metric.key);
            }
            bound.values.insert(metric.key, (raw.clone(), ValueSource::Direct));
        }
    }

    let mut unknown = Vec::new();

    for rule in aliases_for(category) {
        match *rule {
            AliasRule::Rename { from, to } => {
                if let Some(raw) = submitted(from) {
                    bound.offer(to, raw.clone(), alias(&[from]));
                }
            }
            AliasRule::MaxOf { sources, to } => {
                let readings: Vec<f64> = sources
                    .iter()
                    .filter_map(|key| submitted(*key))
                    .map(|raw| raw.coerce())
                    .collect();
                if let Some(max) = readings.into_iter().reduce(f64::max) {
                    bound.offer(to, RawValue::Number(max), alias(sources));
                }
            }
            AliasRule::Selector {
                value_key,
                selector_key,
                cases,
            } => {
                let Some(raw) = submitted(value_key) else {
                    continue;
                };
                let selector = submitted(selector_key)
                    .map(|s| s.as_text().trim().to_lowercase())
                    .unwrap_or_default();

                match cases.iter().find(|(case, _)| *case == selector) {
                    Some((_, target)) => {
                        bound.offer(*target, raw.clone(), alias(&[value_key, selector_key]));
                    }
                    None => {
                        tracing::debug!(
                            "No target for {} with {} = {:?}",
                            value_key,
                            selector_key,
                            selector
                        );
                        unknown.push(value_key.to_string());
                    }
                }
            }
        }
    }

    let metrics = catalog
        .for_category(category)
        .filter_map(|metric| {
            bound.values.remove(metric.key).map(|(raw, source)| ResolvedMetric {
                key: metric.key,
                raw,
                source,
            })
        })
        .collect();

    for (key, raw) in input {
        if raw.is_blank() {
            continue;
        }
        let is_metric = catalog
            .get(key)
            .is_some_and(|metric| metric.category == category);
        if !is_metric && !is_alias_key(category, key) {
            unknown.push(key.clone());
        }
    }

    Resolution { metrics, unknown }
}

/// Values bound so far. Keys in `placeholders` hold a zero reading that an
/// alias with a real reading may still replace.
#[derive(Default)]
struct Bindings {
    values: HashMap<&'static str, (RawValue, ValueSource)>,
    placeholders: HashSet<&'static str>,
}

impl Bindings {
    /// @ai:intent Bind an alias value unless the target already holds a real reading
    /// @ai:effects state:write
    fn offer(&mut self, target: &'static str, raw: RawValue, source: ValueSource) {
        if !self.values.contains_key(target) {
            if raw.coerce() == 0.0 {
                self.placeholders.insert(target);
            }
            self.values.insert(target, (raw, source));
        } else if self.placeholders.contains(target) && raw.coerce() != 0.0 {
            self.placeholders.remove(target);
            self.values.insert(target, (raw, source));
        }
    }
}

fn alias(fields: &[&'static str]) -> ValueSource {
    ValueSource::Alias {
        fields: fields.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn input(pairs: &[(&str, RawValue)]) -> BTreeMap<String, RawValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn resolve(category: Category, pairs: &[(&str, RawValue)]) -> Resolution {
        resolve_category(MetricCatalog::builtin(), category, &input(pairs))
    }

    #[test]
    fn test_metrics_follow_catalog_order() {
        let resolution = resolve(
            Category::Air,
            &[("pm25", 5.0.into()), ("carbonDioxide", 700.0.into())],
        );
        let keys: Vec<_> = resolution.metrics.iter().map(|m| m.key).collect();
        assert_eq!(keys, vec!["carbonDioxide", "pm25"]);
    }

    #[test]
    fn test_blank_values_are_absent() {
        let resolution = resolve(
            Category::Air,
            &[("pm25", "".into()), ("pcbs", "  ".into())],
        );
        assert!(resolution.metrics.is_empty());
        assert!(resolution.unknown.is_empty());
    }

    #[test]
    fn test_rename_alias_and_canonical_precedence() {
        let resolution = resolve(Category::Air, &[("tvocs", 700.0.into())]);
        assert_eq!(resolution.metrics[0].key, "tvoc");
        assert_eq!(
            resolution.metrics[0].source,
            ValueSource::Alias {
                fields: vec!["tvocs"]
            }
        );

        let resolution = resolve(
            Category::Air,
            &[("tvoc", 100.0.into()), ("tvocs", 700.0.into())],
        );
        assert_eq!(resolution.metrics.len(), 1);
        assert_eq!(resolution.metrics[0].raw, RawValue::Number(100.0));
        assert_eq!(resolution.metrics[0].source, ValueSource::Direct);
    }

    #[test]
    fn test_zero_canonical_reading_gives_way_to_alias() {
        let resolution = resolve(
            Category::Surface,
            &[
                ("leadPaintXRF", "0".into()),
                ("leadPaintRoom1", 1.2.into()),
                ("surfaceMold", "0".into()),
                ("mold", 600.0.into()),
            ],
        );
        assert_eq!(resolution.metrics.len(), 2);
        assert_eq!(resolution.metrics[0].key, "leadPaintXRF");
        assert_eq!(resolution.metrics[0].raw, RawValue::Number(1.2));
        assert_eq!(
            resolution.metrics[0].source,
            ValueSource::Alias {
                fields: vec!["leadPaintRoom1", "leadPaintRoom2"]
            }
        );
        assert_eq!(resolution.metrics[1].key, "surfaceMold");
        assert_eq!(resolution.metrics[1].raw, RawValue::Number(600.0));

        let resolution = resolve(
            Category::Dust,
            &[
                ("floorDust", "0".into()),
                ("leadDust", 50.0.into()),
                ("surfaceType", "floor".into()),
            ],
        );
        assert_eq!(resolution.metrics.len(), 1);
        assert_eq!(resolution.metrics[0].key, "floorDust");
        assert_eq!(resolution.metrics[0].raw, RawValue::Number(50.0));
    }

    #[test]
    fn test_nonzero_canonical_reading_beats_alias() {
        let resolution = resolve(
            Category::Surface,
            &[("leadPaintXRF", 0.3.into()), ("leadPaintRoom1", 1.2.into())],
        );
        assert_eq!(resolution.metrics[0].raw, RawValue::Number(0.3));
        assert_eq!(resolution.metrics[0].source, ValueSource::Direct);
    }

    #[test]
    fn test_zero_everywhere_keeps_canonical_reading() {
        let resolution = resolve(
            Category::Surface,
            &[("leadPaintXRF", "0".into()), ("leadPaintRoom1", 0.0.into())],
        );
        assert_eq!(resolution.metrics[0].raw, RawValue::Text("0".to_string()));
        assert_eq!(resolution.metrics[0].source, ValueSource::Direct);
    }

    #[test]
    fn test_lead_paint_takes_worst_room() {
        let resolution = resolve(
            Category::Surface,
            &[
                ("leadPaintRoom1", "0.3".into()),
                ("leadPaintRoom2", 1.2.into()),
            ],
        );
        assert_eq!(resolution.metrics[0].key, "leadPaintXRF");
        assert_eq!(resolution.metrics[0].raw, RawValue::Number(1.2));
    }

    #[test]
    fn test_dust_selector_routes_value() {
        let resolution = resolve(
            Category::Dust,
            &[("leadDust", 120.0.into()), ("surfaceType", " Window Sill ".into())],
        );
        assert_eq!(resolution.metrics.len(), 1);
        assert_eq!(resolution.metrics[0].key, "windowSill");
        assert!(resolution.unknown.is_empty());
    }

    #[test]
    fn test_dust_selector_without_match_is_unknown() {
        let resolution = resolve(
            Category::Dust,
            &[("leadDust", 120.0.into()), ("surfaceType", "door".into())],
        );
        assert!(resolution.metrics.is_empty());
        assert_eq!(resolution.unknown, vec!["leadDust".to_string()]);
    }

    #[test]
    fn test_unknown_and_foreign_keys() {
        let resolution = resolve(
            Category::Water,
            &[
                ("selenium", 3.0.into()),
                ("carbonDioxide", 800.0.into()),
                ("lead", 2.0.into()),
            ],
        );
        assert_eq!(resolution.metrics.len(), 1);
        assert_eq!(
            resolution.unknown,
            vec!["carbonDioxide".to_string(), "selenium".to_string()]
        );
    }
}
