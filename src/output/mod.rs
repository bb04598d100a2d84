pub mod formatter;

pub use formatter::{
    format_json, format_price_per_oz, format_ranked_table, format_score, format_tsv,
    should_use_colors, truncate_name,
};

use anyhow::{Context, Result};

use crate::config::{OutputFormat, OutputSettings};
use crate::product::{products_to_json, Product};

/// Render ranked products in the configured output format
pub fn render(products: Vec<Product>, settings: &OutputSettings) -> Result<String> {
    match settings.format {
        OutputFormat::Json => {
            let value = products_to_json(products).context("Failed to convert products to JSON")?;
            format_json(&value, settings.indent)
        }
        OutputFormat::Table => Ok(format_ranked_table(&products, should_use_colors())),
        OutputFormat::Tsv => Ok(format_tsv(&products)),
    }
}
