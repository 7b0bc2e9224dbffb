//! Classify ad-hoc reason strings.
//!
//! Useful for checking a vocabulary change before running it over a full
//! export.
//!
//! # Usage
//!
//! ```bash
//! lpr-audit classify "stolen vehicle WHP25009165" btmv "" 12345678
//! lpr-audit classify --config my-vocabulary.toml "personal errand"
//! ```

use crate::audit::classifier::ReasonClassifier;
use crate::audit::types::ReasonCategory;
use crate::config::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Category of each reason, in input order.
pub fn classify_all(reasons: &[String], config: &Config) -> Result<Vec<ReasonCategory>> {
    let classifier = ReasonClassifier::from_config(&config.classifier)
        .context("Failed to build reason classifier")?;
    Ok(reasons
        .iter()
        .map(|r| classifier.classify(Some(r.as_str())))
        .collect())
}

pub fn run(reasons: &[String], config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    let categories = classify_all(reasons, &config)?;

    for (reason, category) in reasons.iter().zip(categories) {
        println!("{:<16} {:?}", category.as_str(), reason);
    }
    Ok(())
}
