//! @ai:module:intent Combine category scores into one weighted overall score
//! @ai:module:layer domain
//! @ai:module:public_api WeightedScorer, CategoryScores, CategoryWeights, MissingCategoryPolicy
//! @ai:module:stateless true

use crate::catalog::Category;
use serde::{Deserialize, Serialize};

/// @ai:intent Fixed contribution of each category to the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryWeights {
    pub air: f64,
    pub water: f64,
    pub surface: f64,
    pub dust: f64,
}

impl CategoryWeights {
    /// Sums to 1.0.
    pub const STANDARD: CategoryWeights = CategoryWeights {
        air: 0.3,
        water: 0.3,
        surface: 0.2,
        dust: 0.2,
    };

    /// @ai:effects pure
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Air => self.air,
            Category::Water => self.water,
            Category::Surface => self.surface,
            Category::Dust => self.dust,
        }
    }

    /// @ai:effects pure
    pub fn total(&self) -> f64 {
        self.air + self.water + self.surface + self.dust
    }
}

/// @ai:intent How categories without data take part in the overall score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingCategoryPolicy {
    /// Drop missing categories and renormalize the remaining weights.
    #[default]
    Exclude,
    /// Missing categories contribute 0 at their full weight.
    Zero,
}

/// @ai:intent Optional score for each of the four categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryScores {
    pub air: Option<f64>,
    pub water: Option<f64>,
    pub surface: Option<f64>,
    pub dust: Option<f64>,
}

impl CategoryScores {
    /// @ai:effects pure
    pub fn get(&self, category: Category) -> Option<f64> {
        match category {
            Category::Air => self.air,
            Category::Water => self.water,
            Category::Surface => self.surface,
            Category::Dust => self.dust,
        }
    }

    /// @ai:effects state:write
    pub fn set(&mut self, category: Category, score: Option<f64>) {
        let slot = match category {
            Category::Air => &mut self.air,
            Category::Water => &mut self.water,
            Category::Surface => &mut self.surface,
            Category::Dust => &mut self.dust,
        };
        *slot = score;
    }
}

/// @ai:intent Weighted overall scorer with a configurable missing-data policy
#[derive(Debug, Clone, Copy)]
pub struct WeightedScorer {
    weights: CategoryWeights,
    policy: MissingCategoryPolicy,
}

impl WeightedScorer {
    /// @ai:intent Create a scorer with the standard weights
    /// @ai:effects pure
    pub fn new(policy: MissingCategoryPolicy) -> Self {
        Self {
            weights: CategoryWeights::STANDARD,
            policy,
        }
    }

    /// @ai:effects pure
    pub fn policy(&self) -> MissingCategoryPolicy {
        self.policy
    }

    /// @ai:intent Weighted combination of the category scores
    /// @ai:post result within [0, 100]; 0 when every category is missing
    /// @ai:effects pure
    pub fn score(&self, scores: &CategoryScores) -> f64 {
        let mut weighted_sum = 0.0;
        let mut weight_used = 0.0;

        for category in Category::ALL {
            let weight = self.weights.get(category);
            match (scores.get(category), self.policy) {
                (Some(score), _) => {
                    weighted_sum += weight * score.clamp(0.0, 100.0);
                    weight_used += weight;
                }
                (None, MissingCategoryPolicy::Zero) => weight_used += weight,
                (None, MissingCategoryPolicy::Exclude) => {}
            }
        }

        if weight_used <= 0.0 {
            return 0.0;
        }

        (weighted_sum / weight_used).clamp(0.0, 100.0)
    }
}

impl Default for WeightedScorer {
    fn default() -> Self {
        Self::new(MissingCategoryPolicy::default())
    }
}
