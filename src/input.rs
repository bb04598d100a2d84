use anyhow::{Context, Result};
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::Path;
use tracing::debug;

use crate::error::{RankError, RankResult};
use crate::product::{products_from_json, Product};

/// True when stdin is an interactive terminal rather than a pipe or file
pub fn stdin_is_terminal() -> bool {
    std::io::stdin().is_terminal()
}

/// Parse a JSON array of product records
pub fn parse_products(json: &str) -> RankResult<Vec<Product>> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| RankError::MalformedInput(format!("invalid JSON: {}", e)))?;
    products_from_json(value)
}

/// Load products from a file, or from stdin when `path` is None or "-"
pub fn load_products(path: Option<&Path>) -> Result<Vec<Product>> {
    let contents = match path {
        Some(p) if p != Path::new("-") => {
            debug!("Reading products from {}", p.display());
            fs::read_to_string(p)
                .with_context(|| format!("Failed to read input file: {}", p.display()))?
        }
        _ => {
            debug!("Reading products from stdin");
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read products from stdin")?;
            buffer
        }
    };

    let products = parse_products(&contents)?;
    debug!("Loaded {} products", products.len());
    Ok(products)
}
