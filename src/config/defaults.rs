use std::collections::BTreeMap;

use super::keywords::KeywordTable;
use super::schema::{CategoryConfig, ConsumptionRules};

/// Categories that ship with a compiled-in configuration
pub const BUILTIN_CATEGORIES: &[&str] = &["salmon", "peanuts"];

/// Compiled-in configuration for a category, if one exists
pub fn builtin_category(name: &str) -> Option<CategoryConfig> {
    match name {
        "salmon" => Some(salmon()),
        "peanuts" => Some(peanuts()),
        _ => None,
    }
}

fn scoring_table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect()
}

pub fn salmon() -> CategoryConfig {
    CategoryConfig {
        category_name: "salmon".to_string(),
        filter_type: "salmon".to_string(),
        keywords: KeywordTable::from_static(&[
            (
                "positive",
                &["salmon", "sockeye", "pacific", "alaska", "coho", "chinook", "keta"],
            ),
            (
                "negative",
                &[
                    "anchovies",
                    "atlantic",
                    "battered",
                    "biscuit",
                    "blackened",
                    "color added",
                    "sesame",
                    "bourbon",
                    "broccoli",
                    "burger",
                    "caesar salad",
                    "caviar",
                    "cedar plank",
                    "char",
                    "chicken",
                    "cod",
                    "cottage cheese",
                    "crusted",
                    "cubes",
                    "farm",
                    "farmed",
                    "garlic herb",
                    "grilled",
                    "guacamole",
                    "halibut",
                    "honey chipotle",
                    "juice",
                    "mahi mahi",
                    "marinated",
                    "mocktail",
                    "onion rings",
                    "peaches",
                    "plant based",
                    "pollock",
                    "previously frozen",
                    "rub",
                    "raised",
                    "sablefish",
                    "salad",
                    "sardines",
                    "seasoned",
                    "seasoning",
                    "shrimp",
                    "smoke",
                    "pacific cod",
                    "smoked",
                    "steak",
                    "stuffed",
                    "breaded",
                    "sweet potatoes",
                    "tilapia",
                    "tortillas",
                    "trout",
                    "tuna",
                    "vegan",
                ],
            ),
            (
                "somewhat_negative",
                &[
                    "canned",
                    "creations",
                    "servings",
                    "nuggets",
                    "poke bowl",
                    "pouch",
                    "teriyaki",
                ],
            ),
            (
                "preferred",
                &[
                    "fillet",
                    "fillets",
                    "frozen",
                    "fresh",
                    "wild",
                    "portion",
                    "portions",
                    "skinless",
                    "boneless",
                    "skin-on",
                    "never frozen",
                ],
            ),
        ]),
        scoring: scoring_table(&[
            ("positive_multiplier", 3.0),
            ("negative_multiplier", -10.0),
            ("somewhat_negative_multiplier", -2.0),
            ("preferred_multiplier", 2.0),
            ("name_salmon_bonus", 4.0),
            ("name_fillet_bonus", 3.0),
        ]),
        ocean_origins: KeywordTable::from_static(&[
            ("atlantic", &["atlantic"]),
            ("pacific", &["pacific", "alaska", "alaskan"]),
            ("arctic", &["arctic"]),
            ("north_sea", &["north sea", "norwegian", "norway"]),
            (
                "other",
                &["canadian", "scottish", "faroese", "chilean", "tasmanian"],
            ),
        ]),
        consumption: ConsumptionRules::default(),
    }
}

pub fn peanuts() -> CategoryConfig {
    CategoryConfig {
        category_name: "peanuts".to_string(),
        filter_type: "peanuts".to_string(),
        keywords: KeywordTable::from_static(&[
            (
                "positive",
                &[
                    "peanuts",
                    "peanut",
                    "groundnuts",
                    "spanish grade",
                    "valencia",
                    "runner",
                    "virginia",
                ],
            ),
            (
                "negative",
                &[
                    "peanut butter",
                    "chocolate",
                    "candy",
                    "bird feed",
                    "bird food",
                    "wildlife food",
                    "pet food",
                    "roasted",
                    "salted",
                    "seasoned",
                    "flavored",
                    "honey",
                    "caramel",
                    "cocktail mix",
                ],
            ),
            ("somewhat_negative", &["blanched", "skinless", "shelled"]),
            (
                "preferred",
                &[
                    "raw",
                    "uncooked",
                    "unsalted",
                    "organic",
                    "with skin",
                    "in shell",
                    "natural",
                ],
            ),
        ]),
        scoring: scoring_table(&[
            ("positive_multiplier", 3.0),
            ("negative_multiplier", -8.0),
            ("somewhat_negative_multiplier", -1.0),
            ("preferred_multiplier", 3.0),
            ("name_peanut_bonus", 4.0),
            ("raw_bonus", 5.0),
        ]),
        ocean_origins: KeywordTable::new(),
        consumption: ConsumptionRules::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        for name in BUILTIN_CATEGORIES {
            let config = builtin_category(name).unwrap();
            assert_eq!(config.category_name, *name);
            assert_eq!(config.filter_type, *name);
        }
        assert!(builtin_category("tea").is_none());
    }

    #[test]
    fn test_salmon_multipliers() {
        let config = salmon();
        assert_eq!(config.scoring.get("positive_multiplier"), Some(&3.0));
        assert_eq!(config.scoring.get("negative_multiplier"), Some(&-10.0));
        assert_eq!(config.scoring.get("somewhat_negative_multiplier"), Some(&-2.0));
        assert_eq!(config.scoring.get("preferred_multiplier"), Some(&2.0));
        assert_eq!(config.scoring.get("name_salmon_bonus"), Some(&4.0));
        assert_eq!(config.scoring.get("name_fillet_bonus"), Some(&3.0));
    }

    #[test]
    fn test_peanuts_multipliers() {
        let config = peanuts();
        assert_eq!(config.scoring.get("positive_multiplier"), Some(&3.0));
        assert_eq!(config.scoring.get("negative_multiplier"), Some(&-8.0));
        assert_eq!(config.scoring.get("somewhat_negative_multiplier"), Some(&-1.0));
        assert_eq!(config.scoring.get("preferred_multiplier"), Some(&3.0));
        assert_eq!(config.scoring.get("name_peanut_bonus"), Some(&4.0));
        assert_eq!(config.scoring.get("raw_bonus"), Some(&5.0));
    }

    #[test]
    fn test_salmon_keyword_lists() {
        let config = salmon();
        let roles: Vec<&str> = config.keywords.names().collect();
        assert_eq!(roles, vec!["positive", "negative", "somewhat_negative", "preferred"]);
        assert_eq!(config.keywords.get("positive").unwrap().len(), 7);
        assert_eq!(config.keywords.get("negative").unwrap().len(), 55);
        assert_eq!(config.keywords.get("somewhat_negative").unwrap().len(), 7);
        assert_eq!(config.keywords.get("preferred").unwrap().len(), 11);

        let origins: Vec<&str> = config.ocean_origins.names().collect();
        assert_eq!(origins, vec!["atlantic", "pacific", "arctic", "north_sea", "other"]);
    }

    #[test]
    fn test_peanuts_keyword_lists() {
        let config = peanuts();
        assert_eq!(config.keywords.get("positive").unwrap().len(), 7);
        assert_eq!(config.keywords.get("negative").unwrap().len(), 14);
        assert_eq!(config.keywords.get("somewhat_negative").unwrap(), ["blanched", "skinless", "shelled"]);
        assert_eq!(config.keywords.get("preferred").unwrap().len(), 7);
        assert!(config.ocean_origins.is_empty());
        assert!(config.consumption.is_empty());
    }
}
