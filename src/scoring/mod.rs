pub mod category;
pub mod combine;
pub mod price;
pub mod rules;
pub mod semantic;
pub mod validation;

pub use category::{CategoryKind, NameBonus};
pub use combine::ScoreCombiner;
pub use price::{extract_price, price_per_oz};
pub use rules::KeywordScorer;
pub use semantic::SemanticScorer;
pub use validation::{validate_category, validate_weights};

use crate::product::Product;

/// A pipeline stage that annotates products with one kind of score.
///
/// Stages never drop products: the returned list has the same products in
/// the same order, each with the stage's part of `Scoring` filled in.
pub trait ProductScorer {
    fn name(&self) -> &'static str;
    fn score(&self, products: Vec<Product>) -> Vec<Product>;
}

/// Round to 2 decimal places (half away from zero)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
