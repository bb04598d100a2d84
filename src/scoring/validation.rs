use crate::config::{BlendWeights, CategoryConfig, KeywordTable};

/// Validate a resolved category configuration before scoring.
/// Returns all validation errors at once (not just the first).
pub fn validate_category(config: &CategoryConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.category_name.trim().is_empty() {
        errors.push("category_name: must not be empty".to_string());
    }

    check_table("keywords", &config.keywords, &mut errors);
    check_table("ocean_origins", &config.ocean_origins, &mut errors);

    for (key, value) in &config.scoring {
        if !value.is_finite() {
            errors.push(format!("scoring.{}: must be a finite number, got {}", key, value));
        }
    }

    let requirements = &config.consumption.frozen_requirements;
    check_list(
        "consumption.frozen_requirements.required_keywords",
        &requirements.required_keywords,
        &mut errors,
    );
    check_list(
        "consumption.frozen_requirements.negative_keywords",
        &requirements.negative_keywords,
        &mut errors,
    );

    let adjustments = &config.consumption.scoring_adjustments;
    if !adjustments.frozen_bonus.is_finite() {
        errors.push("consumption.scoring_adjustments.frozen_bonus: must be a finite number".to_string());
    }
    if !adjustments.fresh_penalty.is_finite() {
        errors.push("consumption.scoring_adjustments.fresh_penalty: must be a finite number".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Blend weights must be finite and non-negative. They need not sum to 1.
pub fn validate_weights(weights: &BlendWeights) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (name, value) in [
        ("rule_weight", weights.rule_weight),
        ("semantic_weight", weights.semantic_weight),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!(
                "scoring.{}: must be a non-negative number, got {}",
                name, value
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_table(section: &str, table: &KeywordTable, errors: &mut Vec<String>) {
    for (name, keywords) in table.iter() {
        check_list(&format!("{}.{}", section, name), keywords, errors);
    }
}

// An empty keyword is a substring of every text
fn check_list(path: &str, keywords: &[String], errors: &mut Vec<String>) {
    for (i, keyword) in keywords.iter().enumerate() {
        if keyword.trim().is_empty() {
            errors.push(format!("{}[{}]: keyword must not be empty", path, i));
        }
    }
}
