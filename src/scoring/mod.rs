//! @ai:module:intent Category and overall health scoring
//! @ai:module:layer domain
//! @ai:module:public_api CategoryAggregator, WeightedScorer, CategoryScores, ScoreBand, score_analyses

pub mod aggregator;
pub mod weighted;

pub use aggregator::{CategoryAggregator, CategoryAggregatorTrait, ScoreBand};
pub use weighted::{CategoryScores, CategoryWeights, MissingCategoryPolicy, WeightedScorer};

use crate::analysis::CategoryAnalysis;

/// @ai:intent Score every analyzed category
/// @ai:effects pure
pub fn score_analyses(
    aggregator: &impl CategoryAggregatorTrait,
    analyses: &[CategoryAnalysis],
) -> CategoryScores {
    let mut scores = CategoryScores::default();
    for analysis in analyses {
        scores.set(analysis.category, aggregator.score_category(&analysis.results));
    }
    scores
}
