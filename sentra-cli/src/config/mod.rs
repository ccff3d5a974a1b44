//! Configuration module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Analysis configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Translation service configuration
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Trend execution configuration
    #[serde(default)]
    pub trend: TrendSettings,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Analysis-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Default scoring method (`lexicon` or `rule-based`)
    pub method: String,

    /// Custom lexicon table replacing the built-in one of its kind
    pub lexicon: Option<PathBuf>,

    /// Document format (`auto`, `pdf` or `text`)
    pub document_format: String,

    /// Seed fixed into the language detector
    pub detector_seed: u64,

    /// Translate non-English text before rule-based scoring too
    pub translate_rule_based: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            method: "lexicon".to_string(),
            lexicon: None,
            document_format: "auto".to_string(),
            detector_seed: 0,
            translate_rule_based: false,
        }
    }
}

/// Translation-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TranslationConfig {
    /// Translation endpoint
    pub endpoint: String,

    /// Request timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: sentra_engine::translate::DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Trend-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TrendSettings {
    /// Execution mode (`sequential`, `parallel` or `adaptive`)
    pub mode: String,

    /// Minimum page count for parallel scoring in adaptive mode
    pub parallel_threshold: usize,

    /// Number of worker threads (0 = one per CPU)
    pub threads: usize,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            mode: "adaptive".to_string(),
            parallel_threshold: 8,
            threads: 0,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load the file when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
