use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::product::Product;

/// Serialize ranked records as JSON. `indent` spaces per level; 0 is compact.
pub fn format_json(value: &Value, indent: usize) -> Result<String> {
    if indent == 0 {
        return serde_json::to_string(value).context("Failed to serialize output");
    }

    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize output")?;

    String::from_utf8(buffer).context("Serialized output is not valid UTF-8")
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Final scores are always shown with two decimals ("0.85", "0.00")
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// "$0.81/oz", or "-" when no unit price could be derived
pub fn format_price_per_oz(price_per_oz: Option<f64>) -> String {
    match price_per_oz {
        Some(price) => format!("${:.2}/oz", price),
        None => "-".to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
pub fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format ranked products as a table with columns: Index, Score, Price/oz, Name
/// No headers. Names are truncated to the terminal width when there is one.
pub fn format_ranked_table(products: &[Product], use_colors: bool) -> String {
    format_table_with_width(products, use_colors, get_terminal_width())
}

fn format_table_with_width(
    products: &[Product],
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if products.is_empty() {
        return "No products found.".to_string();
    }

    // Index: "99." (3), score: "0.85" (4), price: "$12.34/oz" (9)
    let index_width = 3;
    let score_width = 5;
    let price_width = 10;
    let separator = "  ";
    let fixed_width = index_width + 1 + score_width + price_width + separator.len() * 2;

    products
        .iter()
        .enumerate()
        .map(|(idx, product)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!(
                "{:>width$}",
                format_score(product.scoring.final_score()),
                width = score_width
            );
            let price_str = format!(
                "{:>width$}",
                format_price_per_oz(product.price_per_oz),
                width = price_width
            );

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(product.name(), width - fixed_width)
                }
                // Very narrow terminal
                Some(_) => truncate_name(product.name(), 20),
                None => product.name().to_string(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    price_str.green(),
                    separator,
                    name
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_str, separator, price_str, separator, name
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked products as tab-separated values for scripting
/// Columns: final_score, rule_score, semantic_score, price_per_oz, name
/// (no headers, no colors; a missing price is an empty field)
pub fn format_tsv(products: &[Product]) -> String {
    products
        .iter()
        .map(|product| {
            let price = product
                .price_per_oz
                .map(|p| format!("{:.2}", p))
                .unwrap_or_default();
            // Tabs and newlines in names would break the columns
            let name: String = product
                .name()
                .chars()
                .map(|c| if c == '\t' || c == '\n' || c == '\r' { ' ' } else { c })
                .collect();
            format!(
                "{}\t{}\t{:.2}\t{}\t{}",
                format_score(product.scoring.final_score()),
                product.scoring.rule_score(),
                product.scoring.semantic_score(),
                price,
                name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{builtin_category, BlendWeights};
    use crate::pipeline::Pipeline;
    use crate::product::products_from_json;
    use serde_json::json;

    fn ranked() -> Vec<Product> {
        let config = builtin_category("peanuts").unwrap();
        let pipeline = Pipeline::from_config(&config, &BlendWeights::default()).unwrap();
        pipeline.process(
            products_from_json(json!([
                {"Name": "Honey Roasted Peanuts", "CleanedText": "$3.49 16 oz"},
                {"Name": "Raw Peanuts", "CleanedText": "natural $4.00 16 oz"}
            ]))
            .unwrap(),
        )
    }

    #[test]
    fn test_format_json_indent() {
        let value = json!([{"Name": "Salmon"}]);
        let output = format_json(&value, 4).unwrap();
        assert_eq!(output, "[\n    {\n        \"Name\": \"Salmon\"\n    }\n]");
    }

    #[test]
    fn test_format_json_compact() {
        let value = json!([{"Name": "Salmon", "PricePerOZ": null}]);
        let output = format_json(&value, 0).unwrap();
        assert_eq!(output, r#"[{"Name":"Salmon","PricePerOZ":null}]"#);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.85), "0.85");
        assert_eq!(format_score(0.0), "0.00");
        assert_eq!(format_score(1.0), "1.00");
    }

    #[test]
    fn test_format_price_per_oz() {
        assert_eq!(format_price_per_oz(Some(0.81)), "$0.81/oz");
        assert_eq!(format_price_per_oz(Some(1.0)), "$1.00/oz");
        assert_eq!(format_price_per_oz(None), "-");
    }

    #[test]
    fn test_truncate_name_short() {
        assert_eq!(truncate_name("Raw Peanuts", 20), "Raw Peanuts");
    }

    #[test]
    fn test_truncate_name_long() {
        assert_eq!(truncate_name("Wild Alaskan Sockeye Salmon", 10), "Wild Al...");
    }

    #[test]
    fn test_truncate_name_unicode() {
        assert_eq!(truncate_name("Saumon fumé écossais", 8), "Saumo...");
    }

    #[test]
    fn test_truncate_name_tiny_width() {
        assert_eq!(truncate_name("Salmon", 2), "Sa");
    }

    #[test]
    fn test_table_empty() {
        assert_eq!(format_ranked_table(&[], false), "No products found.");
    }

    #[test]
    fn test_table_rows() {
        let output = format_table_with_width(&ranked(), false, None);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].ends_with("Raw Peanuts"));
        assert!(lines[0].contains("$0.25/oz"));
        assert!(lines[1].starts_with(" 2."));
        assert!(lines[1].ends_with("Honey Roasted Peanuts"));
    }

    #[test]
    fn test_table_truncates_to_terminal_width() {
        let output = format_table_with_width(&ranked(), false, Some(40));
        for line in output.lines() {
            assert!(line.chars().count() <= 40, "line too long: {}", line);
        }
    }

    #[test]
    fn test_tsv_columns() {
        let output = format_tsv(&ranked());
        let first: Vec<&str> = output.lines().next().unwrap().split('\t').collect();
        assert_eq!(first.len(), 5);
        assert_eq!(first[3], "0.25");
        assert_eq!(first[4], "Raw Peanuts");
    }

    #[test]
    fn test_tsv_missing_price_and_tab_in_name() {
        let products = products_from_json(json!([{"Name": "Salmon\tFillet"}])).unwrap();
        let output = format_tsv(&products);
        assert_eq!(output, "0.00\t0\t0.00\t\tSalmon Fillet");
    }

    #[test]
    fn test_tsv_empty() {
        assert_eq!(format_tsv(&[]), "");
    }
}
