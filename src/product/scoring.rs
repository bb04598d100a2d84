use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Per-product scoring record, written under the product's `Scoring` key.
///
/// Each pipeline stage fills its own part; parts that were never computed
/// are left out of the serialized record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scoring {
    pub rule: Option<RuleAssessment>,
    pub semantic: Option<SemanticAssessment>,
    pub combined: Option<CombinedScore>,
}

impl Scoring {
    pub fn rule_score(&self) -> f64 {
        self.rule.as_ref().map_or(0.0, |r| r.score)
    }

    pub fn semantic_score(&self) -> f64 {
        self.semantic.as_ref().map_or(0.0, |s| s.score)
    }

    pub fn final_score(&self) -> f64 {
        self.combined.as_ref().map_or(0.0, |c| c.final_score)
    }
}

impl Serialize for Scoring {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(rule) = &self.rule {
            map.serialize_entry("rule_score", &rule.score)?;
            map.serialize_entry("rule_reasoning", &rule.reasoning)?;
            map.serialize_entry("rule_breakdown", &rule.breakdown)?;
            map.serialize_entry("extracted_price", &rule.extracted_price)?;
            map.serialize_entry("price_per_oz", &rule.price_per_oz)?;
        }
        if let Some(semantic) = &self.semantic {
            map.serialize_entry("semantic_score", &semantic.score)?;
            map.serialize_entry("semantic_breakdown", &semantic.breakdown)?;
        }
        if let Some(combined) = &self.combined {
            map.serialize_entry("final_score", &combined.final_score)?;
            map.serialize_entry("weights", &combined.weights)?;
        }
        map.end()
    }
}

/// Output of the keyword scorer
#[derive(Debug, Clone, PartialEq)]
pub struct RuleAssessment {
    /// Unbounded, may be negative
    pub score: f64,
    /// Semicolon-joined trace of every rule that fired, in evaluation order
    pub reasoning: String,
    pub breakdown: RuleBreakdown,
    pub extracted_price: Option<f64>,
    pub price_per_oz: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleBreakdown {
    pub roles: Vec<RoleMatch>,
    pub bonuses: Vec<BonusMatch>,
    pub ocean_origin: Option<OriginMatch>,
}

impl RuleBreakdown {
    pub fn role(&self, role: &str) -> Option<&RoleMatch> {
        self.roles.iter().find(|m| m.role == role)
    }

    pub fn bonus(&self, key: &str) -> Option<&BonusMatch> {
        self.bonuses.iter().find(|b| b.key == key)
    }
}

/// Keywords of one role found in the product text
#[derive(Debug, Clone, PartialEq)]
pub struct RoleMatch {
    pub role: String,
    pub score: f64,
    pub keywords: Vec<String>,
}

/// A category name bonus; recorded with score 0 when it did not apply
#[derive(Debug, Clone, PartialEq)]
pub struct BonusMatch {
    pub key: &'static str,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OriginMatch {
    pub primary_origin: Option<String>,
    pub found_keywords: Vec<String>,
}

#[derive(Serialize)]
struct RoleEntry<'a> {
    score: f64,
    keywords: &'a [String],
}

#[derive(Serialize)]
struct BonusEntry {
    score: f64,
}

impl Serialize for RuleBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for role in &self.roles {
            map.serialize_entry(
                &format!("{}_keywords", role.role),
                &RoleEntry {
                    score: role.score,
                    keywords: &role.keywords,
                },
            )?;
        }
        for bonus in &self.bonuses {
            map.serialize_entry(bonus.key, &BonusEntry { score: bonus.score })?;
        }
        if let Some(origin) = &self.ocean_origin {
            map.serialize_entry("ocean_origin", origin)?;
        }
        map.end()
    }
}

/// Output of the semantic scorer
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticAssessment {
    /// In 0..=1
    pub score: f64,
    pub breakdown: SemanticBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticBreakdown {
    pub target_concepts: Vec<String>,
    pub matched_concepts: Vec<String>,
    pub similarity_score: f64,
}

/// Output of the score combiner
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedScore {
    /// Rounded to 2 decimals, never negative
    pub final_score: f64,
    pub weights: WeightBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightBreakdown {
    pub rule_weight: f64,
    pub semantic_weight: f64,
    pub normalized_rule_score: f64,
}
