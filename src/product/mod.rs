pub mod scoring;

pub use scoring::{
    BonusMatch, CombinedScore, OriginMatch, RoleMatch, RuleAssessment, RuleBreakdown, Scoring,
    SemanticAssessment, SemanticBreakdown, WeightBreakdown,
};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{RankError, RankResult};

pub const NAME_FIELD: &str = "Name";
pub const TEXT_FIELD: &str = "CleanedText";
pub const SCORING_FIELD: &str = "Scoring";
pub const PRICE_PER_OZ_FIELD: &str = "PricePerOZ";

/// A product listing.
///
/// The original record is kept as-is; scoring results live next to it and
/// are only merged into the record when it is converted back to JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    fields: Map<String, Value>,
    pub scoring: Scoring,
    pub price_per_oz: Option<f64>,
}

impl Product {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            scoring: Scoring::default(),
            price_per_oz: None,
        }
    }

    /// Build a product from one element of the input array
    pub fn from_value(value: Value, index: usize) -> RankResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self::new(fields)),
            other => Err(RankError::MalformedInput(format!(
                "product at index {} is not an object (found {})",
                index,
                json_kind(&other)
            ))),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// `Name`, or "" when absent or not a string
    pub fn name(&self) -> &str {
        self.text_field(NAME_FIELD)
    }

    /// `CleanedText`, or "" when absent or not a string
    pub fn cleaned_text(&self) -> &str {
        self.text_field(TEXT_FIELD)
    }

    /// Lower-cased "name text", the haystack every keyword rule searches
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.name(), self.cleaned_text()).to_lowercase()
    }

    fn text_field(&self, key: &str) -> &str {
        match self.fields.get(key) {
            Some(Value::String(s)) => s.as_str(),
            Some(Value::Null) | None => "",
            Some(other) => {
                debug!("Ignoring non-string {} field ({})", key, json_kind(other));
                ""
            }
        }
    }

    /// Convert back to a JSON record with `Scoring` and `PricePerOZ` added.
    /// An existing `Scoring` object keeps its other entries; score entries
    /// are written into it key by key.
    pub fn into_value(self) -> serde_json::Result<Value> {
        let mut fields = self.fields;
        let scores = match serde_json::to_value(&self.scoring)? {
            Value::Object(scores) => scores,
            _ => Map::new(),
        };
        match fields.get_mut(SCORING_FIELD) {
            Some(Value::Object(existing)) => existing.extend(scores),
            _ => {
                fields.insert(SCORING_FIELD.to_string(), Value::Object(scores));
            }
        }
        fields.insert(PRICE_PER_OZ_FIELD.to_string(), Value::from(self.price_per_oz));
        Ok(Value::Object(fields))
    }
}

/// Parse a batch. The top level must be an array of objects; any other
/// shape rejects the whole batch.
pub fn products_from_json(value: Value) -> RankResult<Vec<Product>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| Product::from_value(item, index))
            .collect(),
        other => Err(RankError::MalformedInput(format!(
            "input must be a JSON array (found {})",
            json_kind(&other)
        ))),
    }
}

pub fn products_to_json(products: Vec<Product>) -> serde_json::Result<Value> {
    products
        .into_iter()
        .map(Product::into_value)
        .collect::<serde_json::Result<Vec<_>>>()
        .map(Value::Array)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
