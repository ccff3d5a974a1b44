//! Configuration types for the engine

use crate::error::{EngineError, Result};
use crate::executor::ExecutionMode;
use crate::language::LanguageDetector;

/// Trend execution settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendConfig {
    /// Execution mode selector
    pub execution_mode: ExecutionMode,
    /// Minimum page count for parallel scoring in adaptive mode
    pub parallel_threshold: usize,
    /// Number of threads for parallel execution (None = rayon default)
    pub threads: Option<usize>,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Adaptive,
            parallel_threshold: 8,
            threads: None,
        }
    }
}

impl TrendConfig {
    /// Always score pages on the calling thread
    pub fn sequential() -> Self {
        Self {
            execution_mode: ExecutionMode::Sequential,
            ..Self::default()
        }
    }

    /// Always score pages in parallel
    pub fn parallel(threads: Option<usize>) -> Self {
        Self {
            execution_mode: ExecutionMode::Parallel,
            threads,
            ..Self::default()
        }
    }

    /// Check the settings
    pub fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(EngineError::ConfigError(
                "thread count must be at least 1".to_string(),
            ));
        }
        if self.parallel_threshold == 0 {
            return Err(EngineError::ConfigError(
                "parallel threshold must be at least 1 page".to_string(),
            ));
        }
        #[cfg(not(feature = "parallel"))]
        if self.execution_mode == ExecutionMode::Parallel {
            return Err(EngineError::ConfigError(
                "parallel execution requires the `parallel` feature".to_string(),
            ));
        }
        Ok(())
    }
}

/// Pipeline settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Seed fixed into the language detector
    pub detector_seed: u64,
    /// Translate non-English text before rule-based scoring too
    ///
    /// Off by default: the rule-based scorer runs on its input as given.
    pub translate_rule_based: bool,
    /// Trend execution settings
    pub trend: TrendConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            detector_seed: LanguageDetector::DEFAULT_SEED,
            translate_rule_based: false,
            trend: TrendConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Check the settings
    pub fn validate(&self) -> Result<()> {
        self.trend.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
        assert!(TrendConfig::sequential().validate().is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = TrendConfig {
            threads: Some(0),
            ..TrendConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = TrendConfig {
            parallel_threshold: 0,
            ..TrendConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
