//! @ai:module:intent Reduce a category's risk levels into a 0-100 health score
//! @ai:module:layer domain
//! @ai:module:public_api CategoryAggregator, CategoryAggregatorTrait, ScoreBand
//! @ai:module:stateless true

use crate::analysis::CategoryResult;
use crate::catalog::RiskLevel;
use serde::{Deserialize, Serialize};

/// @ai:intent Trait for category score aggregation
pub trait CategoryAggregatorTrait: Send + Sync {
    /// @ai:intent Score one category's results
    fn score_category(&self, results: &CategoryResult) -> Option<f64>;
}

/// @ai:intent Averages health points over the metrics present in a category
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryAggregator;

impl CategoryAggregator {
    /// @ai:intent Create a new category aggregator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Mean health points for a sequence of levels
    /// @ai:post None for an empty sequence, otherwise within [20, 100]
    /// @ai:effects pure
    pub fn score_levels<I: IntoIterator<Item = RiskLevel>>(levels: I) -> Option<f64> {
        average(levels.into_iter().map(|level| level.points()))
    }
}

impl CategoryAggregatorTrait for CategoryAggregator {
    /// @ai:intent normal=100, warning=60, high=20, averaged; None for no metrics
    /// @ai:effects pure
    fn score_category(&self, results: &CategoryResult) -> Option<f64> {
        Self::score_levels(results.levels())
    }
}

/// @ai:intent Calculate average of an iterator of f64, None when empty
/// @ai:effects pure
fn average<I: Iterator<Item = f64>>(iter: I) -> Option<f64> {
    let (sum, count) = iter.fold((0.0, 0u32), |(s, c), v| (s + v, c + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// @ai:intent Qualitative band for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Moderate,
    Poor,
}

impl ScoreBand {
    /// @ai:intent Band a score: >=80 good, >=50 moderate, otherwise poor
    /// @ai:effects pure
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreBand::Good
        } else if score >= 50.0 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Poor
        }
    }

    /// @ai:effects pure
    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Good => "Good",
            ScoreBand::Moderate => "Moderate",
            ScoreBand::Poor => "Poor",
        }
    }

    /// @ai:intent Summary chart color for this band: blue, orange or red
    /// @ai:effects pure
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ScoreBand::Good => (59, 130, 246),
            ScoreBand::Moderate => (249, 115, 22),
            ScoreBand::Poor => (239, 68, 68),
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RiskLevel::{High, Normal, Warning};

    #[test]
    fn test_all_normal_scores_100() {
        assert_eq!(
            CategoryAggregator::score_levels([Normal, Normal, Normal]),
            Some(100.0)
        );
    }

    #[test]
    fn test_mixed_levels_average() {
        assert_eq!(
            CategoryAggregator::score_levels([Normal, Warning, High]),
            Some(60.0)
        );
    }

    #[test]
    fn test_no_metrics_is_undefined() {
        assert_eq!(CategoryAggregator::score_levels(Vec::<RiskLevel>::new()), None);
        assert_eq!(
            CategoryAggregator::new().score_category(&CategoryResult::new()),
            None
        );
    }

    #[test]
    fn test_score_stays_in_bounds() {
        for combo in [[High; 4], [Normal; 4], [High, Normal, Warning, High]] {
            let score = CategoryAggregator::score_levels(combo).unwrap();
            assert!((0.0..=100.0).contains(&score));
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(80.0), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(79.9), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(50.0), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(49.9), ScoreBand::Poor);
    }

    #[test]
    fn test_band_colors_differ_from_risk_colors() {
        assert_eq!(ScoreBand::Good.rgb(), (59, 130, 246));
        assert_eq!(ScoreBand::Moderate.rgb(), (249, 115, 22));
        assert_eq!(ScoreBand::Poor.rgb(), (239, 68, 68));
        assert_ne!(ScoreBand::Good.rgb(), Normal.rgb());
        assert_ne!(ScoreBand::Moderate.rgb(), Warning.rgb());
    }
}
