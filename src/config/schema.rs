use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::keywords::KeywordTable;

/// Main configuration file.
///
/// Example YAML:
/// ```yaml
/// output:
///   format: json
///   indent: 2
/// scoring:
///   rule_weight: 0.7
///   semantic_weight: 0.3
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub scoring: BlendWeights,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,

    /// Spaces per JSON nesting level; 0 writes compact JSON
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            indent: default_indent(),
        }
    }
}

fn default_indent() -> usize {
    2
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
    Tsv,
}

/// Weights used to blend the rule score and the semantic score.
/// They are not required to sum to 1.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BlendWeights {
    #[serde(default = "default_rule_weight")]
    pub rule_weight: f64,

    #[serde(default = "default_semantic_weight")]
    pub semantic_weight: f64,
}

fn default_rule_weight() -> f64 {
    0.7
}

fn default_semantic_weight() -> f64 {
    0.3
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            rule_weight: default_rule_weight(),
            semantic_weight: default_semantic_weight(),
        }
    }
}

impl BlendWeights {
    /// Apply command-line overrides on top of the configured weights
    pub fn with_overrides(self, rule_weight: Option<f64>, semantic_weight: Option<f64>) -> Self {
        Self {
            rule_weight: rule_weight.unwrap_or(self.rule_weight),
            semantic_weight: semantic_weight.unwrap_or(self.semantic_weight),
        }
    }
}

/// Resolved configuration for one product category.
///
/// Built once per run, either from the compiled-in defaults or from a
/// category file layered over them, and never mutated afterwards.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    pub category_name: String,

    /// Selects category-specific behaviour: "salmon", "peanuts", anything else is generic
    #[serde(default = "default_filter_type")]
    pub filter_type: String,

    /// Keyword lists by role (positive, negative, somewhat_negative, preferred, ...)
    #[serde(default)]
    pub keywords: KeywordTable,

    /// Role multipliers (`<role>_multiplier`) and category bonuses (e.g. `name_salmon_bonus`)
    #[serde(default)]
    pub scoring: BTreeMap<String, f64>,

    /// Origin tag to keyword list; only salmon ships with one
    #[serde(default)]
    pub ocean_origins: KeywordTable,

    #[serde(default)]
    pub consumption: ConsumptionRules,
}

fn default_filter_type() -> String {
    "generic".to_string()
}

impl CategoryConfig {
    /// Empty generic bundle, the base layer for categories without built-in defaults
    pub fn named(name: &str) -> Self {
        Self {
            category_name: name.to_string(),
            filter_type: default_filter_type(),
            keywords: KeywordTable::new(),
            scoring: BTreeMap::new(),
            ocean_origins: KeywordTable::new(),
            consumption: ConsumptionRules::default(),
        }
    }

    /// Layer an override on top of this bundle.
    ///
    /// Scalars replace. Keyword and origin tables merge per entry, so an
    /// overlay naming `negative` replaces only that list. Scoring values
    /// replace per key. Consumption rules replace as a whole.
    pub fn merge(mut self, overlay: CategoryOverride) -> Self {
        if let Some(name) = overlay.category_name {
            self.category_name = name;
        }
        if let Some(filter_type) = overlay.filter_type {
            self.filter_type = filter_type;
        }
        if let Some(keywords) = overlay.keywords {
            self.keywords.merge(keywords);
        }
        if let Some(scoring) = overlay.scoring {
            self.scoring.extend(scoring);
        }
        if let Some(origins) = overlay.ocean_origins {
            self.ocean_origins.merge(origins);
        }
        if let Some(consumption) = overlay.consumption {
            self.consumption = consumption;
        }
        self
    }
}

/// A category file: every field optional, layered over the defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CategoryOverride {
    #[serde(default)]
    pub category_name: Option<String>,

    #[serde(default)]
    pub filter_type: Option<String>,

    #[serde(default)]
    pub keywords: Option<KeywordTable>,

    #[serde(default)]
    pub scoring: Option<BTreeMap<String, f64>>,

    #[serde(default)]
    pub ocean_origins: Option<KeywordTable>,

    #[serde(default)]
    pub consumption: Option<ConsumptionRules>,
}

/// Consumption adjustments: a bonus for each required keyword present and
/// a penalty for each negative keyword present.
///
/// Example YAML:
/// ```yaml
/// consumption:
///   frozen_requirements:
///     required_keywords: ["frozen"]
///     negative_keywords: ["fresh", "never frozen"]
///   scoring_adjustments:
///     frozen_bonus: 3
///     fresh_penalty: -5
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConsumptionRules {
    #[serde(default)]
    pub frozen_requirements: FrozenRequirements,

    #[serde(default)]
    pub scoring_adjustments: ScoringAdjustments,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FrozenRequirements {
    #[serde(default)]
    pub required_keywords: Vec<String>,

    #[serde(default)]
    pub negative_keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringAdjustments {
    #[serde(default)]
    pub frozen_bonus: f64,

    /// Usually negative
    #[serde(default)]
    pub fresh_penalty: f64,
}

impl ConsumptionRules {
    pub fn is_empty(&self) -> bool {
        self.frozen_requirements.required_keywords.is_empty()
            && self.frozen_requirements.negative_keywords.is_empty()
    }

    pub fn to_lowercase(&self) -> Self {
        let lower = |list: &[String]| -> Vec<String> { list.iter().map(|k| k.to_lowercase()).collect() };
        Self {
            frozen_requirements: FrozenRequirements {
                required_keywords: lower(&self.frozen_requirements.required_keywords),
                negative_keywords: lower(&self.frozen_requirements.negative_keywords),
            },
            scoring_adjustments: self.scoring_adjustments.clone(),
        }
    }
}
