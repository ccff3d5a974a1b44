//! Core error types (deterministic only)

use thiserror::Error;

/// Core errors: lexicon loading and the formatter/extraction contract
#[derive(Error, Debug)]
pub enum CoreError {
    /// A rendered sentiment string does not have the `<Label> (<percentage>%)` shape
    #[error("cannot extract score from {rendered:?}: {reason}")]
    Extraction {
        /// The rendered string that failed to parse
        rendered: String,
        /// What was wrong with it
        reason: &'static str,
    },

    /// The number re-derived from a rendered string disagrees with the score it was built from
    #[error("extracted {extracted} from {rendered:?} but the formatted score was {carried}")]
    ExtractionMismatch {
        /// The rendered string
        rendered: String,
        /// Signed percentage carried alongside the rendered string
        carried: f64,
        /// Signed percentage parsed back out of the rendered string
        extracted: f64,
    },

    /// Lexicon table failed validation
    #[error("invalid lexicon: {0}")]
    InvalidLexicon(String),

    /// Built-in tokenizer pattern failed to compile
    #[error("invalid token pattern: {0}")]
    Tokenizer(String),

    /// Lexicon file could not be parsed
    #[error("failed to parse lexicon: {0}")]
    LexiconParse(#[from] toml::de::Error),

    /// Lexicon file could not be read
    #[error("failed to read lexicon {path}: {source}")]
    LexiconIo {
        /// Path of the lexicon file
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl CoreError {
    /// Whether this error signals a broken formatter/aggregator contract
    /// rather than bad input
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            CoreError::Extraction { .. } | CoreError::ExtractionMismatch { .. }
        )
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_error_display() {
        let err = CoreError::Extraction {
            rendered: "Positive 50%".to_string(),
            reason: "missing '('",
        };
        assert_eq!(
            err.to_string(),
            "cannot extract score from \"Positive 50%\": missing '('"
        );
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_lexicon_errors_are_not_contract_violations() {
        let err = CoreError::InvalidLexicon("no words".to_string());
        assert!(!err.is_contract_violation());
        assert_eq!(err.to_string(), "invalid lexicon: no words");
    }
}
