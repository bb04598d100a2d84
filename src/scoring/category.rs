/// Category-specific scoring behaviour, chosen from the config's `filter_type`.
///
/// New categories are added as a variant with its own bonus table and
/// concept list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Salmon,
    Peanuts,
    Generic,
}

/// A bonus granted when the product name contains `needle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameBonus {
    pub needle: &'static str,
    /// Key of the bonus value in the category's `scoring` table
    pub scoring_key: &'static str,
    /// Key the bonus is recorded under in the rule breakdown
    pub breakdown_key: &'static str,
    pub reason: &'static str,
}

const SALMON_BONUSES: &[NameBonus] = &[
    NameBonus {
        needle: "salmon",
        scoring_key: "name_salmon_bonus",
        breakdown_key: "salmon_in_name",
        reason: "Salmon in product name",
    },
    NameBonus {
        needle: "fillet",
        scoring_key: "name_fillet_bonus",
        breakdown_key: "fillet_in_name",
        reason: "Fillet in product name",
    },
];

const PEANUTS_BONUSES: &[NameBonus] = &[
    NameBonus {
        needle: "peanut",
        scoring_key: "name_peanut_bonus",
        breakdown_key: "peanut_in_name",
        reason: "Peanut in product name",
    },
    NameBonus {
        needle: "raw",
        scoring_key: "raw_bonus",
        breakdown_key: "raw_in_name",
        reason: "Raw in product name",
    },
];

const SALMON_CONCEPTS: &[&str] = &["salmon", "fillet", "fresh", "frozen", "fish", "seafood"];
const PEANUTS_CONCEPTS: &[&str] = &["peanuts", "raw", "uncooked", "natural", "nuts"];

impl CategoryKind {
    /// Unrecognised filter types fall back to `Generic`
    pub fn from_filter_type(filter_type: &str) -> Self {
        let filter_type = filter_type.trim();
        if filter_type.eq_ignore_ascii_case("salmon") {
            CategoryKind::Salmon
        } else if filter_type.eq_ignore_ascii_case("peanuts") {
            CategoryKind::Peanuts
        } else {
            CategoryKind::Generic
        }
    }

    pub fn name_bonuses(self) -> &'static [NameBonus] {
        match self {
            CategoryKind::Salmon => SALMON_BONUSES,
            CategoryKind::Peanuts => PEANUTS_BONUSES,
            CategoryKind::Generic => &[],
        }
    }

    /// Concepts the semantic scorer looks for
    pub fn target_concepts(self) -> &'static [&'static str] {
        match self {
            CategoryKind::Salmon => SALMON_CONCEPTS,
            CategoryKind::Peanuts => PEANUTS_CONCEPTS,
            CategoryKind::Generic => &[],
        }
    }
}
