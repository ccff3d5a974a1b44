//! Value types shared by every layer of the pipeline

use crate::format::FormattedSentiment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scoring strategy selector
///
/// Chosen by the caller for each call; scorers are never picked by content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMethod {
    /// Lexicon/grammar heuristics producing polarity and subjectivity
    Lexicon,
    /// Rule-based valence heuristics producing a compound score
    RuleBased,
}

impl ScoringMethod {
    /// Every available method, in presentation order
    pub const ALL: [ScoringMethod; 2] = [ScoringMethod::Lexicon, ScoringMethod::RuleBased];

    /// Stable identifier used in configuration files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMethod::Lexicon => "lexicon",
            ScoringMethod::RuleBased => "rule-based",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ScoringMethod::Lexicon => "Lexicon",
            ScoringMethod::RuleBased => "Rule-Based",
        }
    }

    /// One-line description of the strategy
    pub fn description(&self) -> &'static str {
        match self {
            ScoringMethod::Lexicon => {
                "TextBlob-style polarity/subjectivity averaged over lexicon hits (English)"
            }
            ScoringMethod::RuleBased => {
                "VADER-style compound valence tuned for short, informal text"
            }
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexicon" | "textblob" => Ok(ScoringMethod::Lexicon),
            "rule-based" | "rule_based" | "rulebased" | "vader" => Ok(ScoringMethod::RuleBased),
            other => Err(format!("unknown scoring method: {other}")),
        }
    }
}

/// Normalized language code, or the `unknown` sentinel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Sentinel returned when detection cannot classify a text
    pub const UNKNOWN: &'static str = "unknown";

    /// Normalize a raw code: trimmed, lowercase, `_` replaced by `-`
    ///
    /// An empty code becomes the `unknown` sentinel.
    pub fn new(code: &str) -> Self {
        let normalized = code.trim().to_ascii_lowercase().replace('_', "-");
        if normalized.is_empty() {
            Self::unknown()
        } else {
            Self(normalized)
        }
    }

    /// The `unknown` sentinel
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    /// English, the pivot language
    pub fn english() -> Self {
        Self("en".to_string())
    }

    /// The code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether detection gave up on this text
    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    /// Whether this is the pivot language
    pub fn is_english(&self) -> bool {
        self.0 == "en"
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single page of a source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-indexed position in the document
    pub number: usize,
    /// Extracted text of the page
    pub text: String,
}

impl PageText {
    /// Create a page
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Ordered pages of a document, in reading order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pages: Vec<PageText>,
}

impl SourceDocument {
    /// Build a document from page texts in reading order; pages are numbered from 1
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages = texts
            .into_iter()
            .enumerate()
            .map(|(idx, text)| PageText::new(idx + 1, text))
            .collect();
        Self { pages }
    }

    /// An empty document
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pages in reading order
    pub fn pages(&self) -> &[PageText] {
        &self.pages
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the document has no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All pages joined with a single space, for whole-document analysis
    pub fn joined_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Consume the document and return its pages
    pub fn into_pages(self) -> Vec<PageText> {
        self.pages
    }
}

/// Structured output of a scorer, tagged with the strategy that produced it
///
/// Scores are already normalized: polarity and compound lie in [-1, 1],
/// subjectivity in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum SentimentResult {
    /// Lexicon strategy output
    Lexicon {
        /// Signed polarity
        polarity: f64,
        /// Objective (0.0) to subjective (1.0)
        subjectivity: f64,
    },
    /// Rule-based strategy output
    RuleBased {
        /// Normalized compound valence
        compound: f64,
    },
}

impl SentimentResult {
    /// The zero result of a strategy, used for empty input
    pub fn neutral(method: ScoringMethod) -> Self {
        match method {
            ScoringMethod::Lexicon => SentimentResult::Lexicon {
                polarity: 0.0,
                subjectivity: 0.0,
            },
            ScoringMethod::RuleBased => SentimentResult::RuleBased { compound: 0.0 },
        }
    }

    /// Strategy that produced this result
    pub fn method(&self) -> ScoringMethod {
        match self {
            SentimentResult::Lexicon { .. } => ScoringMethod::Lexicon,
            SentimentResult::RuleBased { .. } => ScoringMethod::RuleBased,
        }
    }

    /// The signed headline score in [-1, 1]
    pub fn score(&self) -> f64 {
        match *self {
            SentimentResult::Lexicon { polarity, .. } => polarity,
            SentimentResult::RuleBased { compound } => compound,
        }
    }
}

/// Exportable unit of a single-text analysis
///
/// Flat by construction: every field is a scalar or an optional string, so
/// row-oriented writers need no further transformation. At most one of the
/// two sentiment columns is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Text exactly as submitted, before any translation
    pub original_text: String,
    /// Language detected for the original text
    pub detected_language: LanguageCode,
    /// Rendered lexicon sentiment, when that method was selected
    pub lexicon_sentiment: Option<String>,
    /// Rendered rule-based sentiment, when that method was selected
    pub rule_based_sentiment: Option<String>,
}

impl AnalysisRecord {
    /// Column headers for tabular export
    pub const COLUMNS: [&'static str; 4] = [
        "Original Text",
        "Detected Language",
        "Lexicon Sentiment",
        "Rule-Based Sentiment",
    ];

    /// Build a record, filling the column that matches the formatted result's method
    pub fn new(
        original_text: impl Into<String>,
        detected_language: LanguageCode,
        sentiment: &FormattedSentiment,
    ) -> Self {
        let rendered = Some(sentiment.rendered().to_string());
        let (lexicon_sentiment, rule_based_sentiment) = match sentiment.method() {
            ScoringMethod::Lexicon => (rendered, None),
            ScoringMethod::RuleBased => (None, rendered),
        };
        Self {
            original_text: original_text.into(),
            detected_language,
            lexicon_sentiment,
            rule_based_sentiment,
        }
    }

    /// Method whose column is populated
    pub fn method(&self) -> Option<ScoringMethod> {
        match (&self.lexicon_sentiment, &self.rule_based_sentiment) {
            (Some(_), _) => Some(ScoringMethod::Lexicon),
            (None, Some(_)) => Some(ScoringMethod::RuleBased),
            (None, None) => None,
        }
    }

    /// Row values in [`Self::COLUMNS`] order; absent sentiments are empty strings
    pub fn to_row(&self) -> [String; 4] {
        [
            self.original_text.clone(),
            self.detected_language.to_string(),
            self.lexicon_sentiment.clone().unwrap_or_default(),
            self.rule_based_sentiment.clone().unwrap_or_default(),
        ]
    }
}

/// Per-page signed percentages, index-aligned with the document's pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    method: ScoringMethod,
    values: Vec<f64>,
}

impl TrendSeries {
    /// Wrap values computed with `method`
    pub fn new(method: ScoringMethod, values: Vec<f64>) -> Self {
        Self { method, values }
    }

    /// Strategy used for every page
    pub fn method(&self) -> ScoringMethod {
        self.method
    }

    /// Values in page order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of pages covered
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(page number, value)` pairs with 1-indexed page numbers
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(idx, value)| (idx + 1, *value))
    }

    /// Mean of all page values, or `None` for an empty series
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
        }
    }
}
