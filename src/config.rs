//! Configuration loaded from `tagmatter.toml`
//!
//! Every field has a default, so the file is optional and may set only the
//! values that differ. Command-line flags take precedence over the file.

use crate::error::{Result, TagMatterError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "tagmatter.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the problem notes
    pub problem_dir: Option<PathBuf>,
    /// JSON file with the known-tag vocabulary
    pub vocabulary_path: PathBuf,
    /// JSON file with the processed document names
    pub processed_path: PathBuf,
    /// Only fenced blocks in this language count as the solution
    pub language: Option<String>,
    pub suggest: SuggestConfig,
}

/// Settings for the chat-completions tag suggestion service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            problem_dir: None,
            vocabulary_path: PathBuf::from("topics.json"),
            processed_path: PathBuf::from("processed_files.json"),
            language: None,
            suggest: SuggestConfig::default(),
        }
    }
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_tokens: 256,
            timeout_secs: 60,
        }
    }
}

impl Config {
    /// Load a config file; a missing file is an error
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            TagMatterError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&contents).map_err(|e| {
            TagMatterError::config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load `explicit` if given, else `tagmatter.toml` in `dir` if it
    /// exists, else the defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            log::debug!("Using configuration from {}", candidate.display());
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| TagMatterError::config(format!("Failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.vocabulary_path, PathBuf::from("topics.json"));
        assert_eq!(config.processed_path, PathBuf::from("processed_files.json"));
        assert_eq!(config.suggest.model, "gpt-4o-mini");
        assert_eq!(config.suggest.max_tokens, 256);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "problem_dir = \"notes\"\nlanguage = \"python\"\n\n[suggest]\nmodel = \"gpt-4o\"\n",
        )
        .unwrap();

        let config = Config::discover(None, temp_dir.path()).unwrap();
        assert_eq!(config.problem_dir, Some(PathBuf::from("notes")));
        assert_eq!(config.language.as_deref(), Some("python"));
        assert_eq!(config.suggest.model, "gpt-4o");
        assert_eq!(config.suggest.temperature, 0.3);
        assert_eq!(config.vocabulary_path, PathBuf::from("topics.json"));
    }

    #[test]
    fn test_discover_without_file() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(Config::discover(None, temp_dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("custom.toml");
        let err = Config::discover(Some(&missing), temp_dir.path()).unwrap_err();
        assert!(matches!(err, TagMatterError::Config { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "problem_dir = [").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            problem_dir: Some(PathBuf::from("/notes")),
            ..Default::default()
        };
        let parsed: Config = toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
