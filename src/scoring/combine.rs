use tracing::debug;

use super::round2;
use crate::config::BlendWeights;
use crate::product::{CombinedScore, Product, Scoring, WeightBreakdown};

/// Rule score at which the normalized rule score saturates at 1.0
pub const RULE_SCORE_CEILING: f64 = 20.0;

/// Blends the rule score and the semantic score into the final sort key.
///
/// `final = round2(normalized_rule * rule_weight + semantic * semantic_weight)`
/// where `normalized_rule = min(rule / 20, 1)` for positive rule scores and 0
/// otherwise. The weights are used as given, without normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCombiner {
    rule_weight: f64,
    semantic_weight: f64,
}

impl Default for ScoreCombiner {
    fn default() -> Self {
        Self::from_weights(&BlendWeights::default())
    }
}

impl ScoreCombiner {
    pub fn new(rule_weight: f64, semantic_weight: f64) -> Self {
        Self {
            rule_weight,
            semantic_weight,
        }
    }

    pub fn from_weights(weights: &BlendWeights) -> Self {
        Self::new(weights.rule_weight, weights.semantic_weight)
    }

    /// Negative rule scores clamp to 0, so the final score is never negative
    pub fn normalize_rule_score(rule_score: f64) -> f64 {
        if rule_score > 0.0 {
            (rule_score / RULE_SCORE_CEILING).min(1.0)
        } else {
            0.0
        }
    }

    /// Missing rule or semantic parts count as 0
    pub fn combine_scores(&self, scoring: &Scoring) -> CombinedScore {
        let normalized_rule = Self::normalize_rule_score(scoring.rule_score());
        let final_score = normalized_rule * self.rule_weight
            + scoring.semantic_score() * self.semantic_weight;

        CombinedScore {
            final_score: round2(final_score),
            weights: WeightBreakdown {
                rule_weight: self.rule_weight,
                semantic_weight: self.semantic_weight,
                normalized_rule_score: normalized_rule,
            },
        }
    }

    pub fn combine(&self, products: Vec<Product>) -> Vec<Product> {
        debug!(
            "Combining scores for {} products (rule_weight={}, semantic_weight={})",
            products.len(),
            self.rule_weight,
            self.semantic_weight
        );

        products
            .into_iter()
            .map(|mut product| {
                product.scoring.combined = Some(self.combine_scores(&product.scoring));
                product
            })
            .collect()
    }
}
