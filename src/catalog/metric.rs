//! @ai:module:intent Metric definition types: categories, risk levels and tiers
//! @ai:module:layer domain
//! @ai:module:public_api Category, RiskLevel, TierBound, Tier, MetricDefinition
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Measurement domain a metric belongs to
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Air,
    Water,
    Surface,
    Dust,
}

impl Category {
    /// Report order of the four categories.
    pub const ALL: [Category; 4] = [
        Category::Air,
        Category::Water,
        Category::Surface,
        Category::Dust,
    ];

    /// @ai:intent Convert category to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Air => "air",
            Category::Water => "water",
            Category::Surface => "surface",
            Category::Dust => "dust",
        }
    }

    /// @ai:intent Human-readable section title
    /// @ai:effects pure
    pub fn title(&self) -> &'static str {
        match self {
            Category::Air => "Air Quality Tests",
            Category::Water => "Water Quality Tests",
            Category::Surface => "Surface Quality Tests",
            Category::Dust => "Dust Quality Tests",
        }
    }

    /// @ai:intent Short label used on the summary chart
    /// @ai:effects pure
    pub fn short_label(&self) -> &'static str {
        match self {
            Category::Air => "Air",
            Category::Water => "Water",
            Category::Surface => "Surface",
            Category::Dust => "Dust",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Risk tier severity, ordered normal < warning < high
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Normal,
    Warning,
    High,
}

impl RiskLevel {
    /// @ai:intent Convert level to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Normal => "normal",
            RiskLevel::Warning => "warning",
            RiskLevel::High => "high",
        }
    }

    /// @ai:intent Health points contributed to a category score
    /// @ai:effects pure
    pub fn points(&self) -> f64 {
        match self {
            RiskLevel::Normal => 100.0,
            RiskLevel::Warning => 60.0,
            RiskLevel::High => 20.0,
        }
    }

    /// @ai:intent RGB color used for this level in charts
    /// @ai:effects pure
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            RiskLevel::Normal => (34, 197, 94),
            RiskLevel::Warning => (234, 179, 8),
            RiskLevel::High => (239, 68, 68),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Upper edge of a tier
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum TierBound {
    /// Admits values `<= bound`.
    AtMost(f64),
    /// Admits values `< bound`. Only needed for band-shaped metrics.
    Below(f64),
}

impl TierBound {
    /// @ai:intent Check whether a value falls at or under this edge
    /// @ai:effects pure
    pub fn admits(&self, value: f64) -> bool {
        match *self {
            TierBound::AtMost(bound) => value <= bound,
            TierBound::Below(bound) => value < bound,
        }
    }

    /// @ai:intent Numeric position of the edge
    /// @ai:effects pure
    pub fn value(&self) -> f64 {
        match *self {
            TierBound::AtMost(bound) | TierBound::Below(bound) => bound,
        }
    }

    /// @ai:intent Strict ordering key: a `Below` edge sorts before an `AtMost` edge at the same value
    /// @ai:effects pure
    fn rank(&self) -> (f64, u8) {
        match *self {
            TierBound::Below(bound) => (bound, 0),
            TierBound::AtMost(bound) => (bound, 1),
        }
    }

    /// @ai:intent Check that `next` lies strictly above `self`
    /// @ai:effects pure
    pub fn precedes(&self, next: &TierBound) -> bool {
        let (a, ka) = self.rank();
        let (b, kb) = next.rank();
        a < b || (a == b && ka < kb)
    }
}

/// @ai:intent One bounded range of a metric mapped to a risk level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tier {
    /// `None` only on the last tier, which catches everything above.
    pub bound: Option<TierBound>,
    pub level: RiskLevel,
    pub message: &'static str,
}

impl Tier {
    pub const fn at_most(bound: f64, level: RiskLevel, message: &'static str) -> Self {
        Self {
            bound: Some(TierBound::AtMost(bound)),
            level,
            message,
        }
    }

    pub const fn below(bound: f64, level: RiskLevel, message: &'static str) -> Self {
        Self {
            bound: Some(TierBound::Below(bound)),
            level,
            message,
        }
    }

    pub const fn above(level: RiskLevel, message: &'static str) -> Self {
        Self {
            bound: None,
            level,
            message,
        }
    }

    /// @ai:intent Check whether this tier admits a value
    /// @ai:effects pure
    pub fn admits(&self, value: f64) -> bool {
        self.bound.map(|b| b.admits(value)).unwrap_or(true)
    }
}

/// @ai:intent Static definition of one measurable metric
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricDefinition {
    pub key: &'static str,
    pub label: &'static str,
    /// Bar label used on charts.
    pub short_label: &'static str,
    pub category: Category,
    pub unit: &'static str,
    /// Reference threshold shown next to chart bars, e.g. "<=1000 ppm (EPA indoor guideline)".
    pub reference: &'static str,
    pub tiers: &'static [Tier],
}

impl MetricDefinition {
    /// @ai:intent Find the tier matching a value by linear scan in ascending order
    /// @ai:pre tiers are exhaustive (last tier unbounded)
    /// @ai:post returns the first tier whose bound admits the value
    /// @ai:effects pure
    pub fn classify(&self, value: f64) -> Option<&'static Tier> {
        let value = if value.is_nan() { 0.0 } else { value };
        self.tiers.iter().find(|tier| tier.admits(value))
    }

    /// @ai:intent Check whether tier levels never decrease as the value grows
    /// @ai:effects pure
    pub fn is_monotonic(&self) -> bool {
        self.tiers.windows(2).all(|pair| pair[0].level <= pair[1].level)
    }

    /// @ai:intent Check the tier table for exhaustiveness and ordering
    /// @ai:effects pure
    pub fn tier_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let Some(last) = self.tiers.last() else {
            issues.push(format!("{}: no tiers defined", self.key));
            return issues;
        };

        if last.bound.is_some() {
            issues.push(format!("{}: last tier must be unbounded", self.key));
        }

        let bounded = &self.tiers[..self.tiers.len() - 1];

        for (index, tier) in bounded.iter().enumerate() {
            match tier.bound {
                None => issues.push(format!(
                    "{}: tier {} is unbounded but not last",
                    self.key, index
                )),
                Some(bound) if !bound.value().is_finite() => issues.push(format!(
                    "{}: tier {} has a non-finite bound",
                    self.key, index
                )),
                Some(_) => {}
            }
        }

        for (index, pair) in bounded.windows(2).enumerate() {
            if let (Some(a), Some(b)) = (pair[0].bound, pair[1].bound) {
                if !a.precedes(&b) {
                    issues.push(format!(
                        "{}: tier {} bound does not ascend",
                        self.key,
                        index + 1
                    ));
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static BAND: [Tier; 3] = [
        Tier::below(30.0, RiskLevel::High, "dry"),
        Tier::at_most(60.0, RiskLevel::Normal, "ok"),
        Tier::above(RiskLevel::High, "wet"),
    ];

    fn band_metric() -> MetricDefinition {
        MetricDefinition {
            key: "band",
            label: "Band",
            short_label: "B",
            category: Category::Air,
            unit: "%",
            reference: "30-60%",
            tiers: &BAND,
        }
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Normal < RiskLevel::Warning);
        assert!(RiskLevel::Warning < RiskLevel::High);
    }

    #[test]
    fn test_risk_level_points() {
        assert_eq!(RiskLevel::Normal.points(), 100.0);
        assert_eq!(RiskLevel::Warning.points(), 60.0);
        assert_eq!(RiskLevel::High.points(), 20.0);
    }

    #[test]
    fn test_below_bound_excludes_edge() {
        let metric = band_metric();
        assert_eq!(metric.classify(29.99).unwrap().level, RiskLevel::High);
        assert_eq!(metric.classify(30.0).unwrap().level, RiskLevel::Normal);
        assert_eq!(metric.classify(60.0).unwrap().level, RiskLevel::Normal);
        assert_eq!(metric.classify(60.01).unwrap().level, RiskLevel::High);
    }

    #[test]
    fn test_band_metric_is_not_monotonic() {
        assert!(!band_metric().is_monotonic());
        assert!(band_metric().tier_issues().is_empty());
    }

    #[test]
    fn test_tier_issues_detects_descending_bounds() {
        static BAD: [Tier; 3] = [
            Tier::at_most(10.0, RiskLevel::Normal, "a"),
            Tier::at_most(5.0, RiskLevel::Warning, "b"),
            Tier::above(RiskLevel::High, "c"),
        ];
        let metric = MetricDefinition {
            tiers: &BAD,
            ..band_metric()
        };
        let issues = metric.tier_issues();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("does not ascend"));
    }

    #[test]
    fn test_tier_issues_detects_bounded_last_tier() {
        static BAD: [Tier; 1] = [Tier::at_most(10.0, RiskLevel::Normal, "a")];
        let metric = MetricDefinition {
            tiers: &BAD,
            ..band_metric()
        };
        assert!(metric.classify(11.0).is_none());
        assert!(!metric.tier_issues().is_empty());
    }

    #[test]
    fn test_nan_classifies_as_zero() {
        let metric = band_metric();
        assert_eq!(metric.classify(f64::NAN), metric.classify(0.0));
    }
}
