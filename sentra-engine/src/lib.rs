//! Application orchestration for Sentra
//!
//! This crate adds everything around the pure scoring core: language
//! detection, translation to English, page segmentation, per-page trend
//! execution strategies and the [`Pipeline`] that ties them together.
//!
//! # Example
//!
//! ```no_run
//! use sentra_engine::{Pipeline, ScoringMethod};
//!
//! let pipeline = Pipeline::builder().build()?;
//! let analysis = pipeline.analyze("Me encanta este producto", ScoringMethod::Lexicon)?;
//! println!("{} {}", analysis.language, analysis.sentiment);
//! # Ok::<(), sentra_engine::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod document;
pub mod error;
pub mod executor;
pub mod language;
pub mod pipeline;
pub mod translate;
pub mod trend;

// Re-export key types
pub use config::{PipelineConfig, TrendConfig};
pub use document::{DocumentFormat, PageSegmenter};
pub use error::{DocumentFormatError, EngineError, Result, Stage, TranslationError};
pub use executor::{ExecutionMode, Executor};
pub use language::{LanguageCandidate, LanguageDetector};
pub use pipeline::{Analysis, Pipeline, PipelineBuilder};
pub use translate::{HttpTranslationService, TranslationService, Translator};
pub use trend::{PageSentiment, TrendAggregator};

// Re-export from core for convenience
pub use sentra_core::{
    AnalysisRecord, FormattedSentiment, LanguageCode, PageText, ScoringMethod, SentimentResult,
    SourceDocument, TrendSeries,
};
