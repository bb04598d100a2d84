use tracing::debug;

use super::category::CategoryKind;
use super::ProductScorer;
use crate::product::{Product, SemanticAssessment, SemanticBreakdown};

/// Stand-in for an embedding similarity model.
///
/// The score is the share of target concepts that appear as substrings of the
/// lower-cased product text. A real model can replace `similarity` without
/// changing what the stage reads or writes.
#[derive(Debug, Clone)]
pub struct SemanticScorer {
    target_concepts: Vec<String>,
}

impl SemanticScorer {
    pub fn new(target_concepts: Vec<String>) -> Self {
        Self { target_concepts }
    }

    pub fn for_category(kind: CategoryKind) -> Self {
        Self::new(
            kind.target_concepts()
                .iter()
                .map(|c| c.to_string())
                .collect(),
        )
    }

    pub fn target_concepts(&self) -> &[String] {
        &self.target_concepts
    }

    /// Similarity in 0..=1; 0 when there are no target concepts
    pub fn similarity(&self, text: &str) -> SemanticAssessment {
        let text = text.to_lowercase();
        let matched: Vec<String> = self
            .target_concepts
            .iter()
            .filter(|concept| text.contains(concept.as_str()))
            .cloned()
            .collect();

        let score = if self.target_concepts.is_empty() {
            0.0
        } else {
            matched.len() as f64 / self.target_concepts.len() as f64
        };

        SemanticAssessment {
            score,
            breakdown: SemanticBreakdown {
                target_concepts: self.target_concepts.clone(),
                matched_concepts: matched,
                similarity_score: score,
            },
        }
    }
}

impl ProductScorer for SemanticScorer {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn score(&self, products: Vec<Product>) -> Vec<Product> {
        debug!("Processing {} products with semantic scorer", products.len());

        products
            .into_iter()
            .map(|mut product| {
                product.scoring.semantic = Some(self.similarity(&product.combined_text()));
                product
            })
            .collect()
    }
}
