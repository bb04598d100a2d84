mod defaults;
mod keywords;
mod schema;

pub use defaults::{builtin_category, BUILTIN_CATEGORIES};
pub use keywords::KeywordTable;
pub use schema::{
    BlendWeights, CategoryConfig, CategoryOverride, ConsumptionRules, FrozenRequirements,
    OutputFormat, OutputSettings, ScoringAdjustments, Settings,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{RankError, RankResult};

/// Get the config directory path (~/.config/product-rank/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("product-rank"))
}

/// Get the default config file path (~/.config/product-rank/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Category files live next to the main config: `<dir>/category/<name>.yaml`
pub fn get_category_path(config_dir: &Path, category: &str) -> PathBuf {
    config_dir.join("category").join(format!("{}.yaml", category))
}

/// Load the main configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/product-rank/config.yaml) and falls back to built-in
///   settings when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p.to_path_buf()
        }
        None => match get_config_path() {
            Some(p) if p.exists() => p,
            _ => {
                debug!("No config file found, using default settings");
                return Ok(Settings::default());
            }
        },
    };

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let settings: Settings = serde_saphyr::from_str(&content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    debug!("Loaded settings from {}", config_path.display());
    Ok(settings)
}

/// Load a category override file. A missing file is not an error.
pub fn load_category_override(path: &Path) -> Result<Option<CategoryOverride>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read category file at {}", path.display()))?;

    let overlay: CategoryOverride = serde_saphyr::from_str(&content).with_context(|| {
        format!("Failed to parse category config: invalid YAML in {}", path.display())
    })?;

    Ok(Some(overlay))
}

/// Resolve a category name to its configuration bundle.
///
/// Built-in categories use their compiled-in bundle with the overlay (if any)
/// layered on top. Other names need an overlay, which is layered over an
/// empty generic bundle.
pub fn resolve_category(
    category: &str,
    overlay: Option<CategoryOverride>,
) -> RankResult<CategoryConfig> {
    match (builtin_category(category), overlay) {
        (Some(base), Some(overlay)) => {
            debug!("Using external config layered over defaults for category: {}", category);
            Ok(base.merge(overlay))
        }
        (Some(base), None) => {
            debug!("Using built-in config for category: {}", category);
            Ok(base)
        }
        (None, Some(overlay)) => {
            debug!("Using external config for category: {}", category);
            Ok(CategoryConfig::named(category).merge(overlay))
        }
        (None, None) => Err(RankError::Config(format!(
            "Unknown category: {} (built-in categories: {})",
            category,
            BUILTIN_CATEGORIES.join(", ")
        ))),
    }
}

/// Load and resolve a category.
///
/// `category_file` overrides the conventional location under `config_dir`.
/// An explicitly named file must exist.
pub fn load_category(
    category: &str,
    category_file: Option<&Path>,
    config_dir: Option<&Path>,
) -> Result<CategoryConfig> {
    let overlay = match (category_file, config_dir) {
        (Some(path), _) => {
            if !path.exists() {
                anyhow::bail!("Category file not found at {}", path.display());
            }
            load_category_override(path)?
        }
        (None, Some(dir)) => load_category_override(&get_category_path(dir, category))?,
        (None, None) => None,
    };

    Ok(resolve_category(category, overlay)?)
}
