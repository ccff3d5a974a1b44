//! Deterministic core of the Sentra sentiment pipeline
//!
//! Everything in this crate is pure: lexicon tables, the two scoring
//! strategies, score formatting and the extraction contract that trend
//! aggregation relies on. Language detection, translation, document
//! segmentation and orchestration live in `sentra-engine`.
//!
//! # Example
//!
//! ```rust
//! use sentra_core::{ScoreFormatter, Scorers, ScoringMethod};
//!
//! let scorers = Scorers::builtin().unwrap();
//! let result = scorers.get(ScoringMethod::Lexicon).score("I love this!");
//! let formatted = ScoreFormatter::new().format(&result);
//!
//! assert_eq!(formatted.rendered(), "Positive (62.50%)");
//! assert_eq!(formatted.round_trip().unwrap(), 62.5);
//! ```

pub mod error;
pub mod format;
pub mod lexicon;
pub mod scorer;
pub mod types;

pub use error::{CoreError, Result};
pub use format::{
    extract_percentage, extract_signed_percentage, FormattedSentiment, ScoreFormatter,
    SentimentLabel,
};
pub use lexicon::{Lexicon, LexiconKind, PolarityLexicon, ValenceLexicon};
pub use scorer::{LexiconScorer, PolarityScores, RuleBasedScorer, Scorers, SentimentScorer};
pub use types::{
    AnalysisRecord, LanguageCode, PageText, ScoringMethod, SentimentResult, SourceDocument,
    TrendSeries,
};
