use std::collections::BTreeMap;
use tracing::debug;

use super::category::CategoryKind;
use super::price::{extract_price, price_per_oz};
use super::ProductScorer;
use crate::config::{CategoryConfig, ConsumptionRules, KeywordTable};
use crate::product::{BonusMatch, OriginMatch, Product, RoleMatch, RuleAssessment, RuleBreakdown};

/// Rule-based scorer: counts configured keywords in the product text and
/// weights each role by its multiplier.
///
/// Evaluation order, which is also the order of the reasoning trace:
/// keyword roles, consumption adjustments, category name bonuses, ocean origin.
#[derive(Debug, Clone)]
pub struct KeywordScorer {
    kind: CategoryKind,
    keywords: KeywordTable,
    scoring: BTreeMap<String, f64>,
    consumption: ConsumptionRules,
    ocean_origins: KeywordTable,
}

impl KeywordScorer {
    pub fn new(kind: CategoryKind, keywords: KeywordTable, scoring: BTreeMap<String, f64>) -> Self {
        Self {
            kind,
            keywords: keywords.to_lowercase(),
            scoring,
            consumption: ConsumptionRules::default(),
            ocean_origins: KeywordTable::new(),
        }
    }

    pub fn with_consumption(mut self, consumption: &ConsumptionRules) -> Self {
        self.consumption = consumption.to_lowercase();
        self
    }

    pub fn with_ocean_origins(mut self, origins: &KeywordTable) -> Self {
        self.ocean_origins = origins.to_lowercase();
        self
    }

    pub fn from_config(config: &CategoryConfig) -> Self {
        Self::new(
            CategoryKind::from_filter_type(&config.filter_type),
            config.keywords.clone(),
            config.scoring.clone(),
        )
        .with_consumption(&config.consumption)
        .with_ocean_origins(&config.ocean_origins)
    }

    pub fn kind(&self) -> CategoryKind {
        self.kind
    }

    /// Multiplier for a keyword role; 1 when not configured
    fn multiplier(&self, role: &str) -> f64 {
        self.scoring
            .get(&format!("{}_multiplier", role))
            .copied()
            .unwrap_or(1.0)
    }

    fn scoring_value(&self, key: &str) -> f64 {
        self.scoring.get(key).copied().unwrap_or(0.0)
    }

    /// Score a single product
    pub fn assess(&self, product: &Product) -> RuleAssessment {
        let combined = product.combined_text();
        let name = product.name().to_lowercase();

        let mut score = 0.0;
        let mut reasons = Vec::new();
        let mut breakdown = RuleBreakdown::default();

        for (role, keywords) in self.keywords.iter() {
            let found: Vec<String> = keywords
                .iter()
                .filter(|kw| combined.contains(kw.as_str()))
                .cloned()
                .collect();
            // No matches scores 0, not -0 for negative multipliers
            let role_score = if found.is_empty() {
                0.0
            } else {
                found.len() as f64 * self.multiplier(role)
            };
            score += role_score;

            if !found.is_empty() {
                reasons.push(format!("{} ({}): [{}]", role, found.len(), found.join(", ")));
            }
            breakdown.roles.push(RoleMatch {
                role: role.to_string(),
                score: role_score,
                keywords: found,
            });
        }

        if !self.consumption.is_empty() {
            score += self.apply_consumption(&combined, &mut reasons);
        }

        for bonus in self.kind.name_bonuses() {
            let mut value = 0.0;
            if name.contains(bonus.needle) {
                value = self.scoring_value(bonus.scoring_key);
                score += value;
                reasons.push(bonus.reason.to_string());
            }
            breakdown.bonuses.push(BonusMatch {
                key: bonus.breakdown_key,
                score: value,
            });
        }

        if !self.ocean_origins.is_empty() {
            let origin = self.extract_ocean_origin(&combined);
            if let Some(primary) = &origin.primary_origin {
                reasons.push(format!("Ocean origin: {}", primary));
            }
            breakdown.ocean_origin = Some(origin);
        }

        let extracted_price = extract_price(product.cleaned_text());
        let per_oz = price_per_oz(product, extracted_price);

        RuleAssessment {
            score,
            reasoning: reasons.join("; "),
            breakdown,
            extracted_price,
            price_per_oz: per_oz,
        }
    }

    /// Frozen bonus per required keyword present, fresh penalty per negative keyword present
    fn apply_consumption(&self, combined: &str, reasons: &mut Vec<String>) -> f64 {
        let requirements = &self.consumption.frozen_requirements;
        let adjustments = &self.consumption.scoring_adjustments;
        let mut adjustment = 0.0;

        for keyword in &requirements.required_keywords {
            if combined.contains(keyword.as_str()) {
                adjustment += adjustments.frozen_bonus;
                reasons.push(format!("Frozen requirement met: +{}", adjustments.frozen_bonus));
            }
        }

        for keyword in &requirements.negative_keywords {
            if combined.contains(keyword.as_str()) {
                adjustment += adjustments.fresh_penalty;
                reasons.push(format!("Fresh penalty: {}", adjustments.fresh_penalty));
            }
        }

        adjustment
    }

    /// All origin keywords present in the text, and the first origin tag
    /// (in config order) that had a match
    fn extract_ocean_origin(&self, combined: &str) -> OriginMatch {
        let mut origin = OriginMatch::default();

        for (tag, keywords) in self.ocean_origins.iter() {
            for keyword in keywords {
                if combined.contains(keyword.as_str()) {
                    origin.found_keywords.push(keyword.clone());
                    if origin.primary_origin.is_none() {
                        origin.primary_origin = Some(tag.to_string());
                    }
                }
            }
        }

        origin
    }
}

impl ProductScorer for KeywordScorer {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    fn score(&self, products: Vec<Product>) -> Vec<Product> {
        debug!("Processing {} products with rule-based scorer", products.len());

        products
            .into_iter()
            .map(|mut product| {
                let assessment = self.assess(&product);
                debug!(
                    "rule score {} for '{}': {}",
                    assessment.score,
                    product.name(),
                    assessment.reasoning
                );
                product.price_per_oz = assessment.price_per_oz;
                product.scoring.rule = Some(assessment);
                product
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{builtin_category, FrozenRequirements, ScoringAdjustments};
    use serde_json::json;

    fn product(name: &str, text: &str) -> Product {
        Product::from_value(json!({"Name": name, "CleanedText": text}), 0).unwrap()
    }

    fn scoring(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn generic_scorer(keywords: &[(&str, &[&str])], entries: &[(&str, f64)]) -> KeywordScorer {
        KeywordScorer::new(
            CategoryKind::Generic,
            KeywordTable::from_static(keywords),
            scoring(entries),
        )
    }

    #[test]
    fn test_filter_with_positive_keywords() {
        let scorer = generic_scorer(
            &[
                ("positive", &["salmon", "fillet"]),
                ("negative", &["canned"]),
                ("preferred", &["fresh"]),
            ],
            &[
                ("positive_multiplier", 3.0),
                ("negative_multiplier", -10.0),
                ("preferred_multiplier", 2.0),
            ],
        );

        let result = scorer.score(vec![product(
            "Fresh Salmon Fillet",
            "Current price: $12.99 Fresh salmon fillet 1 lb",
        )]);

        assert_eq!(result.len(), 1);
        let rule = result[0].scoring.rule.as_ref().unwrap();
        assert_eq!(rule.score, 8.0);
        assert!(rule.score > 0.0);
        assert!(rule.reasoning.contains("salmon"));
        assert_eq!(
            rule.reasoning,
            "positive (2): [salmon, fillet]; preferred (1): [fresh]"
        );
        assert_eq!(rule.extracted_price, Some(12.99));
        assert_eq!(rule.price_per_oz, Some(0.81));
        assert_eq!(result[0].price_per_oz, Some(0.81));
    }

    #[test]
    fn test_filter_with_negative_keywords() {
        let scorer = generic_scorer(
            &[
                ("positive", &["salmon"]),
                ("negative", &["canned", "processed"]),
                ("preferred", &[]),
            ],
            &[
                ("positive_multiplier", 3.0),
                ("negative_multiplier", -10.0),
                ("preferred_multiplier", 2.0),
            ],
        );

        let result = scorer.score(vec![product(
            "Canned Salmon",
            "Current price: $3.99 Canned salmon 6 oz",
        )]);

        assert_eq!(result.len(), 1);
        let rule = result[0].scoring.rule.as_ref().unwrap();
        assert!(rule.score < 0.0);
        assert_eq!(rule.score, -7.0);
    }

    #[test]
    fn test_negative_only_scores_below_zero() {
        let scorer = generic_scorer(
            &[("positive", &["salmon"]), ("negative", &["canned"])],
            &[("positive_multiplier", 3.0), ("negative_multiplier", -10.0)],
        );
        let rule = scorer.assess(&product("Canned Tuna", "chunk light"));
        assert_eq!(rule.score, -10.0);
        assert_eq!(rule.reasoning, "negative (1): [canned]");
    }

    #[test]
    fn test_empty_products_list() {
        let scorer = generic_scorer(&[("positive", &["salmon"])], &[("positive_multiplier", 3.0)]);
        assert!(scorer.score(vec![]).is_empty());
    }

    #[test]
    fn test_multiplier_defaults_to_one() {
        let scorer = generic_scorer(&[("origin", &["alaska", "wild"])], &[]);
        let rule = scorer.assess(&product("Wild Alaska Salmon", ""));
        assert_eq!(rule.score, 2.0);
        assert_eq!(rule.breakdown.role("origin").unwrap().score, 2.0);
    }

    #[test]
    fn test_keywords_match_once_and_case_insensitive() {
        let scorer = generic_scorer(&[("positive", &["Salmon"])], &[("positive_multiplier", 3.0)]);
        let rule = scorer.assess(&product("SALMON", "salmon salmon salmon"));
        assert_eq!(rule.score, 3.0);
        assert_eq!(rule.breakdown.role("positive").unwrap().keywords, vec!["salmon"]);
    }

    #[test]
    fn test_substring_matching() {
        let scorer = generic_scorer(&[("negative", &["farm"])], &[("negative_multiplier", -10.0)]);
        let rule = scorer.assess(&product("Farmed Salmon", ""));
        assert_eq!(rule.score, -10.0);
    }

    #[test]
    fn test_breakdown_records_roles_without_matches() {
        let scorer = generic_scorer(
            &[("positive", &["salmon"]), ("negative", &["canned"])],
            &[],
        );
        let rule = scorer.assess(&product("Salmon", ""));
        let negative = rule.breakdown.role("negative").unwrap();
        assert_eq!(negative.score, 0.0);
        assert!(negative.keywords.is_empty());
        assert!(rule.breakdown.bonuses.is_empty());
        assert!(rule.breakdown.ocean_origin.is_none());
    }

    #[test]
    fn test_missing_fields_score_zero() {
        let scorer = generic_scorer(&[("positive", &["salmon"])], &[("positive_multiplier", 3.0)]);
        let p = Product::from_value(json!({"Sku": "123"}), 0).unwrap();
        let rule = scorer.assess(&p);
        assert_eq!(rule.score, 0.0);
        assert_eq!(rule.reasoning, "");
        assert_eq!(rule.extracted_price, None);
        assert_eq!(rule.price_per_oz, None);
    }

    #[test]
    fn test_salmon_name_bonuses() {
        let scorer = KeywordScorer::new(
            CategoryKind::Salmon,
            KeywordTable::from_static(&[("positive", &["salmon"])]),
            scoring(&[
                ("positive_multiplier", 3.0),
                ("name_salmon_bonus", 4.0),
                ("name_fillet_bonus", 3.0),
            ]),
        );
        let rule = scorer.assess(&product("Salmon Fillet", ""));

        assert_eq!(rule.score, 10.0);
        assert_eq!(
            rule.reasoning,
            "positive (1): [salmon]; Salmon in product name; Fillet in product name"
        );
        assert_eq!(rule.breakdown.bonus("salmon_in_name").unwrap().score, 4.0);
        assert_eq!(rule.breakdown.bonus("fillet_in_name").unwrap().score, 3.0);
    }

    #[test]
    fn test_bonus_recorded_as_zero_when_not_in_name() {
        let scorer = KeywordScorer::new(
            CategoryKind::Salmon,
            KeywordTable::new(),
            scoring(&[("name_salmon_bonus", 4.0), ("name_fillet_bonus", 3.0)]),
        );
        // "fillet" in the text does not count, only the name
        let rule = scorer.assess(&product("Salmon Portions", "boneless fillet"));
        assert_eq!(rule.score, 4.0);
        assert_eq!(rule.breakdown.bonus("fillet_in_name").unwrap().score, 0.0);
        assert_eq!(rule.breakdown.bonuses.len(), 2);
    }

    #[test]
    fn test_peanuts_name_bonuses() {
        let config = builtin_category("peanuts").unwrap();
        let scorer = KeywordScorer::from_config(&config);
        assert_eq!(scorer.kind(), CategoryKind::Peanuts);

        let rule = scorer.assess(&product("Raw Peanuts", ""));
        assert_eq!(rule.breakdown.bonus("peanut_in_name").unwrap().score, 4.0);
        assert_eq!(rule.breakdown.bonus("raw_in_name").unwrap().score, 5.0);
        // positive: peanuts, peanut (2 * 3); preferred: raw (1 * 3); bonuses 4 + 5
        assert_eq!(rule.score, 18.0);
        assert!(rule.breakdown.ocean_origin.is_none());
    }

    #[test]
    fn test_consumption_adjustments_apply_independently() {
        let rules = ConsumptionRules {
            frozen_requirements: FrozenRequirements {
                required_keywords: vec!["frozen".to_string()],
                negative_keywords: vec!["fresh".to_string()],
            },
            scoring_adjustments: ScoringAdjustments {
                frozen_bonus: 3.0,
                fresh_penalty: -5.0,
            },
        };
        let scorer = generic_scorer(&[], &[]).with_consumption(&rules);

        let both = scorer.assess(&product("Salmon", "frozen at sea, tastes fresh"));
        assert_eq!(both.score, -2.0);
        assert_eq!(both.reasoning, "Frozen requirement met: +3; Fresh penalty: -5");

        let frozen_only = scorer.assess(&product("Salmon", "Frozen"));
        assert_eq!(frozen_only.score, 3.0);

        let neither = scorer.assess(&product("Salmon", ""));
        assert_eq!(neither.score, 0.0);
    }

    #[test]
    fn test_ocean_origin_primary_is_first_configured_tag() {
        let config = builtin_category("salmon").unwrap();
        let scorer = KeywordScorer::from_config(&config);

        let rule = scorer.assess(&product("Salmon", "from norway, farmed in the atlantic"));
        let origin = rule.breakdown.ocean_origin.as_ref().unwrap();
        assert_eq!(origin.primary_origin.as_deref(), Some("atlantic"));
        assert_eq!(origin.found_keywords, vec!["atlantic", "norway"]);
        assert!(rule.reasoning.ends_with("Ocean origin: atlantic"));
    }

    #[test]
    fn test_ocean_origin_records_all_keywords() {
        let config = builtin_category("salmon").unwrap();
        let scorer = KeywordScorer::from_config(&config);

        let rule = scorer.assess(&product("Wild Alaskan Sockeye", "pacific catch"));
        let origin = rule.breakdown.ocean_origin.as_ref().unwrap();
        assert_eq!(origin.primary_origin.as_deref(), Some("pacific"));
        assert_eq!(origin.found_keywords, vec!["pacific", "alaska", "alaskan"]);
    }

    #[test]
    fn test_ocean_origin_without_match() {
        let config = builtin_category("salmon").unwrap();
        let scorer = KeywordScorer::from_config(&config);

        let rule = scorer.assess(&product("Salmon", "fresh"));
        let origin = rule.breakdown.ocean_origin.as_ref().unwrap();
        assert!(origin.primary_origin.is_none());
        assert!(origin.found_keywords.is_empty());
        assert!(!rule.reasoning.contains("Ocean origin"));
    }

    #[test]
    fn test_salmon_defaults_prefer_fresh_fillet_over_smoked() {
        let config = builtin_category("salmon").unwrap();
        let scorer = KeywordScorer::from_config(&config);

        let fillet = scorer.assess(&product("Wild Sockeye Salmon Fillet", "Fresh, boneless"));
        let smoked = scorer.assess(&product("Smoked Salmon", "cold smoked, seasoned"));
        assert!(fillet.score > 0.0);
        assert!(smoked.score < 0.0);
    }
}
