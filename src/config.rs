//! Run configuration: input/output paths and classifier vocabularies.
//!
//! Defaults are embedded from `config/default.toml` at compile time. A user
//! file only needs the keys it changes; each key it sets replaces the whole
//! default value for that key.
//!
//! ```toml
//! [paths]
//! input = "data/access_logs"
//!
//! [classifier]
//! concerning = ["protest", "background check", "personal"]
//! ```

use crate::audit::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration baked into the binary.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory (or file) of exported access-log CSVs.
    pub input: Option<PathBuf>,
    /// Directory report files are written to.
    pub output: Option<PathBuf>,
}

/// Vocabulary lists and thresholds for the reason classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub legitimate: Vec<String>,
    pub case_number_prefixes: Vec<String>,
    pub concerning: Vec<String>,
    pub ambiguous: Vec<String>,
    pub cryptic_max_len: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigOverride {
    paths: PathsOverride,
    classifier: ClassifierOverride,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PathsOverride {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ClassifierOverride {
    legitimate: Option<Vec<String>>,
    case_number_prefixes: Option<Vec<String>>,
    concerning: Option<Vec<String>>,
    ambiguous: Option<Vec<String>>,
    cryptic_max_len: Option<usize>,
}

impl Config {
    /// The embedded default configuration.
    pub fn builtin() -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TOML)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, overlaid with the file at `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::builtin()?;
        if let Some(path) = path {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            config.apply_overrides(&text)?;
            log::info!("Loaded configuration overrides from {}", path.display());
        }
        Ok(config)
    }

    /// Overlay the keys present in `text` onto this configuration.
    ///
    /// Nothing changes unless the merged result validates.
    pub fn apply_overrides(&mut self, text: &str) -> Result<(), ConfigError> {
        let overrides: ConfigOverride = toml::from_str(text)?;
        let mut merged = self.clone();

        if overrides.paths.input.is_some() {
            merged.paths.input = overrides.paths.input;
        }
        if overrides.paths.output.is_some() {
            merged.paths.output = overrides.paths.output;
        }

        let c = overrides.classifier;
        let target = &mut merged.classifier;
        if let Some(v) = c.legitimate {
            target.legitimate = v;
        }
        if let Some(v) = c.case_number_prefixes {
            target.case_number_prefixes = v;
        }
        if let Some(v) = c.concerning {
            target.concerning = v;
        }
        if let Some(v) = c.ambiguous {
            target.ambiguous = v;
        }
        if let Some(v) = c.cryptic_max_len {
            target.cryptic_max_len = v;
        }

        merged.validate()?;
        *self = merged;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.classifier;
        for (name, terms) in [
            ("legitimate", &c.legitimate),
            ("concerning", &c.concerning),
            ("ambiguous", &c.ambiguous),
        ] {
            if terms.iter().any(|t| t.trim().is_empty()) {
                return Err(vocabulary_error(name, "contains an empty term"));
            }
        }

        if c.case_number_prefixes.is_empty() {
            return Err(vocabulary_error(
                "case_number_prefixes",
                "at least one prefix is required",
            ));
        }
        if let Some(bad) = c
            .case_number_prefixes
            .iter()
            .find(|p| p.is_empty() || !p.chars().all(|ch| ch.is_ascii_alphabetic()))
        {
            return Err(vocabulary_error(
                "case_number_prefixes",
                &format!("prefix '{}' must be non-empty letters only", bad),
            ));
        }
        Ok(())
    }
}

fn vocabulary_error(list: &str, message: &str) -> ConfigError {
    ConfigError::Vocabulary {
        list: list.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_config_parses() {
        let config = Config::builtin().unwrap();
        assert_eq!(config.classifier.cryptic_max_len, 5);
        assert!(config.classifier.legitimate.contains(&"warrant".to_string()));
        assert!(config.classifier.case_number_prefixes.contains(&"whp".to_string()));
        assert!(config.classifier.concerning.contains(&"background check".to_string()));
        assert!(config.classifier.ambiguous.contains(&"btmv".to_string()));
        assert_eq!(config.paths, PathsConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let mut config = Config::builtin().unwrap();
        let defaults = config.clone();
        config
            .apply_overrides(
                r#"
                [paths]
                output = "out"

                [classifier]
                concerning = ["personal"]
                "#,
            )
            .unwrap();

        assert_eq!(config.classifier.concerning, vec!["personal".to_string()]);
        assert_eq!(config.classifier.legitimate, defaults.classifier.legitimate);
        assert_eq!(config.paths.output, Some(PathBuf::from("out")));
        assert_eq!(config.paths.input, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut config = Config::builtin().unwrap();
        let result = config.apply_overrides("[classifier]\nlegit = [\"x\"]\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        let mut config = Config::builtin().unwrap();
        let result = config.apply_overrides("[classifier]\ncase_number_prefixes = [\"wh-p\"]\n");
        assert!(matches!(result, Err(ConfigError::Vocabulary { .. })));

        let result = config.apply_overrides("[classifier]\ncase_number_prefixes = []\n");
        assert!(matches!(result, Err(ConfigError::Vocabulary { .. })));
    }

    #[test]
    fn test_rejected_override_leaves_config_unchanged() {
        let mut config = Config::builtin().unwrap();
        let before = config.clone();
        let result = config.apply_overrides(
            "[paths]\noutput = \"out\"\n[classifier]\nlegitimate = [\"x\"]\ncase_number_prefixes = []\n",
        );
        assert!(matches!(result, Err(ConfigError::Vocabulary { .. })));
        assert_eq!(config, before);
    }

    #[test]
    fn test_empty_term_rejected() {
        let mut config = Config::builtin().unwrap();
        let result = config.apply_overrides("[classifier]\nambiguous = [\"btmv\", \"  \"]\n");
        assert!(matches!(result, Err(ConfigError::Vocabulary { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "[classifier]\ncryptic_max_len = 3").unwrap();
        temp.flush().unwrap();

        let config = Config::load(Some(temp.path())).unwrap();
        assert_eq!(config.classifier.cryptic_max_len, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/lpr-audit.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
