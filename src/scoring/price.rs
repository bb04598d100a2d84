//! Price and unit-price extraction from free product text.
//!
//! Every pattern list is ordered by priority. The first pattern that matches
//! anywhere in the text wins and later patterns are not consulted, so the
//! order decides which reading of ambiguous text is used.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::round2;
use crate::product::Product;

const OUNCES_PER_POUND: f64 = 16.0;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("price pattern"))
        .collect()
}

/// Listed price, matched case-insensitively
static PRICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\$\s*([0-9]+\.[0-9]{2})",                // $10.99
        r"(?i)\$\s*([0-9]+)\s*\.\s*([0-9]{2})",         // $10 . 99
        r"(?i)price:\s*\$\s*([0-9]+\.[0-9]{2})",        // price: $10.99
        r"(?i)([0-9]+\.[0-9]{2})\s*/\s*ea",             // 10.99 / ea
    ])
});

/// Stated price per ounce (matched against lower-cased text)
static PER_OUNCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\$\s*([0-9]+\.[0-9]{2})/oz",
        r"\$\s*([0-9]+\.[0-9]{2})\s*/\s*oz",
        r"\(\$\s*([0-9]+\.[0-9]{2})/ounce\)",
        r"\(\$\s*([0-9]+\.[0-9]{2})\s*/\s*ounce\)",
        r"([0-9]+\.[0-9]{2})\s*/\s*oz",
        r"\$\s*([0-9]+\.[0-9]{2})\s*/\s*oz",
    ])
});

/// Stated price per pound (matched against lower-cased text)
static PER_POUND_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\$([0-9]+\.[0-9]{2})/lb",
        r"\$([0-9]+\.[0-9]{2})\s*/\s*lb",
        r"\$\s*([0-9]+\.[0-9]{2})\s*/\s*lb",
        r"\$\s*([0-9]+)\s*\.\s*([0-9]{2})\s*/\s*lb",
        r"([0-9]+\.[0-9]{2})\s*/\s*lb",
        r"\$([0-9]+\.[0-9]{2})\s*per\s*pound",
        r"price:\s*\$([0-9]+\.[0-9]{2})\s*per\s*pound",
    ])
});

/// Package weight with the factor converting it to ounces
static WEIGHT_PATTERNS: LazyLock<Vec<(Regex, f64)>> = LazyLock::new(|| {
    let patterns = [
        (r"([0-9]+(?:\.[0-9]+)?)\s*oz", 1.0),
        (r"([0-9]+(?:\.[0-9]+)?)\s*ounce", 1.0),
        (r"([0-9]+(?:\.[0-9]+)?)\s*lb", OUNCES_PER_POUND),
        (r"([0-9]+(?:\.[0-9]+)?)\s*pound", OUNCES_PER_POUND),
    ];
    patterns
        .iter()
        .map(|(p, factor)| (Regex::new(p).expect("weight pattern"), *factor))
        .collect()
});

/// Read an amount from a match. Patterns with separate dollar and cent
/// groups are joined back into one decimal number.
fn capture_amount(caps: &Captures) -> Option<f64> {
    match (caps.get(1), caps.get(2)) {
        (Some(dollars), Some(cents)) => format!("{}.{}", dollars.as_str(), cents.as_str())
            .parse()
            .ok(),
        (Some(amount), None) => amount.as_str().parse().ok(),
        _ => None,
    }
}

/// First amount matched by the highest-priority pattern that matches at all
fn first_amount(patterns: &[Regex], text: &str) -> Option<f64> {
    patterns
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| capture_amount(&caps))
}

/// Extract the listed price from product text.
///
/// Returns `None` when no pattern matches.
pub fn extract_price(text: &str) -> Option<f64> {
    first_amount(&PRICE_PATTERNS, text)
}

/// Price per ounce for a product.
///
/// Tries, in order: a stated per-ounce price (returned as written), a stated
/// per-pound price (divided by 16), and finally `price` divided by a package
/// weight found in the text. Returns `None` if nothing applies.
pub fn price_per_oz(product: &Product, price: Option<f64>) -> Option<f64> {
    let combined = product.combined_text();

    if let Some(per_oz) = first_amount(&PER_OUNCE_PATTERNS, &combined) {
        return Some(per_oz);
    }

    if let Some(per_lb) = first_amount(&PER_POUND_PATTERNS, &combined) {
        return Some(round2(per_lb / OUNCES_PER_POUND));
    }

    // A zero price carries no information about unit cost
    let price = price.filter(|p| *p != 0.0)?;

    let (weight, factor) = WEIGHT_PATTERNS.iter().find_map(|(re, factor)| {
        re.captures(&combined)
            .and_then(|caps| capture_amount(&caps))
            .map(|w| (w, *factor))
    })?;

    let ounces = weight * factor;
    if ounces == 0.0 {
        return None;
    }
    Some(round2(price / ounces))
}
