use std::cmp::Ordering;
use tracing::{debug, info};

use crate::config::{BlendWeights, CategoryConfig};
use crate::error::{RankError, RankResult};
use crate::product::Product;
use crate::scoring::{
    validate_category, validate_weights, KeywordScorer, ProductScorer, ScoreCombiner,
    SemanticScorer,
};

/// Runs the scoring stages in order, blends their scores and sorts the
/// products by final score.
pub struct Pipeline {
    stages: Vec<Box<dyn ProductScorer>>,
    combiner: ScoreCombiner,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn ProductScorer>>, combiner: ScoreCombiner) -> Self {
        Self { stages, combiner }
    }

    /// Build the standard [rule-based, semantic] pipeline for a category.
    ///
    /// The configuration is validated first; every problem found is returned
    /// in a single `InvalidConfig` error.
    pub fn from_config(category: &CategoryConfig, weights: &BlendWeights) -> RankResult<Self> {
        let mut errors = Vec::new();
        if let Err(category_errors) = validate_category(category) {
            errors.extend(category_errors);
        }
        if let Err(weight_errors) = validate_weights(weights) {
            errors.extend(weight_errors);
        }
        if !errors.is_empty() {
            return Err(RankError::InvalidConfig(errors));
        }

        let keyword_scorer = KeywordScorer::from_config(category);
        let kind = keyword_scorer.kind();
        debug!(
            "Building pipeline for category '{}' ({:?})",
            category.category_name, kind
        );

        let stages: Vec<Box<dyn ProductScorer>> = vec![
            Box::new(keyword_scorer),
            Box::new(SemanticScorer::for_category(kind)),
        ];

        Ok(Self::new(stages, ScoreCombiner::from_weights(weights)))
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    pub fn process(&self, products: Vec<Product>) -> Vec<Product> {
        info!("Ranking {} products", products.len());

        let mut products = products;
        for stage in &self.stages {
            debug!("Running stage: {}", stage.name());
            products = stage.score(products);
        }

        let mut products = self.combiner.combine(products);

        // Stable: equal scores keep their input order
        products.sort_by(|a, b| {
            b.scoring
                .final_score()
                .partial_cmp(&a.scoring.final_score())
                .unwrap_or(Ordering::Equal)
        });

        if let Some(top) = products.first() {
            debug!(
                "Top product: '{}' (final score {})",
                top.name(),
                top.scoring.final_score()
            );
        }

        products
    }
}
