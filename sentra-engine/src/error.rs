//! Layered error types
//!
//! `TranslationError` and `DocumentFormatError` describe failures of the two
//! external collaborators. `EngineError` wraps them together with core
//! errors and records which pipeline stage, and which page, failed.

use sentra_core::CoreError;
use std::fmt;
use thiserror::Error;

/// Pipeline stage a surfaced failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Language detection
    Detection,
    /// Translation to English
    Translation,
    /// Page segmentation
    Segmentation,
    /// Scoring, formatting and extraction
    Scoring,
}

impl Stage {
    /// Lowercase stage name
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Detection => "detection",
            Stage::Translation => "translation",
            Stage::Segmentation => "segmentation",
            Stage::Scoring => "scoring",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translation service failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// The source language cannot be translated
    #[error("language '{code}' is not supported by the translation service")]
    UnsupportedLanguage {
        /// The rejected source code
        code: String,
    },

    /// The service is throttling requests
    #[error("translation service rate limit exceeded")]
    RateLimited,

    /// The service could not be reached
    #[error("translation service unreachable: {0}")]
    Network(String),

    /// The service answered with a non-success status
    #[error("translation service returned HTTP {status}: {message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The service answered with a payload that could not be read
    #[error("unexpected translation response: {0}")]
    InvalidResponse(String),

    /// The text exceeds the per-request limit
    #[error("text of {len} characters exceeds the {max} character translation limit")]
    TooLong {
        /// Length of the submitted text in characters
        len: usize,
        /// Maximum accepted length in characters
        max: usize,
    },
}

/// Unreadable document bytes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentFormatError {
    /// The bytes are not a readable PDF
    #[error("malformed PDF: {0}")]
    MalformedPdf(String),

    /// Text could not be extracted from a page of an otherwise readable PDF
    #[error("failed to extract text from page {page}: {reason}")]
    PageExtraction {
        /// 1-indexed page number
        page: usize,
        /// Extraction error reported by the PDF engine
        reason: String,
    },

    /// Paged text input is not valid UTF-8
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(String),
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Translation failed; no sentiment was produced
    #[error("translation failed: {0}")]
    Translation(#[from] TranslationError),

    /// Document segmentation failed; no pages were produced
    #[error("segmentation failed: {0}")]
    Segmentation(#[from] DocumentFormatError),

    /// Scoring, formatting or extraction failed on one page of a trend
    #[error("scoring failed on page {page}: {source}")]
    PageScoring {
        /// 1-indexed page number
        page: usize,
        /// Underlying core error
        #[source]
        source: CoreError,
    },

    /// Scoring, formatting or lexicon loading failed
    #[error("scoring failed: {0}")]
    Scoring(#[from] CoreError),

    /// Parallel execution error
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    ParallelError(String),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),
}

impl EngineError {
    /// Stage that failed, when the error belongs to one
    pub fn stage(&self) -> Option<Stage> {
        match self {
            EngineError::Translation(_) => Some(Stage::Translation),
            EngineError::Segmentation(_) => Some(Stage::Segmentation),
            EngineError::PageScoring { .. } | EngineError::Scoring(_) => Some(Stage::Scoring),
            _ => None,
        }
    }

    /// Page that failed, for page-level errors
    pub fn page(&self) -> Option<usize> {
        match self {
            EngineError::PageScoring { page, .. } => Some(*page),
            EngineError::Segmentation(DocumentFormatError::PageExtraction { page, .. }) => {
                Some(*page)
            }
            _ => None,
        }
    }

    /// Whether this is an internal formatter/aggregator contract violation
    pub fn is_contract_violation(&self) -> bool {
        match self {
            EngineError::PageScoring { source, .. } | EngineError::Scoring(source) => {
                source.is_contract_violation()
            }
            _ => false,
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
