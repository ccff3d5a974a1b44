//! Human-readable rendering of sentiment results and the numeric
//! extraction contract used by trend aggregation.
//!
//! A result renders as `"<Label> (<percentage>%)"`, where the percentage is
//! `|score| × 100` with two decimals. The number inside the parentheses is
//! unsigned; the sign lives in the label. Extraction therefore reads both.

use crate::error::{CoreError, Result};
use crate::types::{ScoringMethod, SentimentResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance when comparing an extracted percentage with the carried one
const ROUND_TRIP_TOLERANCE: f64 = 0.0051;

/// Sentiment class derived from the sign of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    /// score > 0
    Positive,
    /// score < 0
    Negative,
    /// score == 0
    Neutral,
}

impl SentimentLabel {
    /// Classify a score; exactly zero is neutral
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            SentimentLabel::Positive
        } else if score < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Label text as rendered
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }

    /// Multiplier that restores the sign of a rendered percentage
    pub fn sign(&self) -> f64 {
        match self {
            SentimentLabel::Positive => 1.0,
            SentimentLabel::Negative => -1.0,
            SentimentLabel::Neutral => 0.0,
        }
    }

    fn parse(label: &str) -> Option<Self> {
        match label {
            "Positive" => Some(SentimentLabel::Positive),
            "Negative" => Some(SentimentLabel::Negative),
            "Neutral" => Some(SentimentLabel::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display form of one scoring call
///
/// Immutable once built. The signed score travels with the rendered string
/// so internal consumers never have to parse text to get a number back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedSentiment {
    method: ScoringMethod,
    label: SentimentLabel,
    percentage: f64,
    score: f64,
    rendered: String,
}

impl FormattedSentiment {
    /// Strategy that produced the underlying result
    pub fn method(&self) -> ScoringMethod {
        self.method
    }

    /// Positive / Negative / Neutral
    pub fn label(&self) -> SentimentLabel {
        self.label
    }

    /// `|score| × 100`, unrounded
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// The signed score in [-1, 1] this was formatted from
    pub fn score(&self) -> f64 {
        self.score
    }

    /// `score × 100`, unrounded
    pub fn signed_percentage(&self) -> f64 {
        self.label.sign() * self.percentage
    }

    /// `"<Label> (<percentage>%)"`
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Re-derive the signed percentage from the rendered string and check it
    /// against the carried score, allowing for two-decimal rounding
    pub fn round_trip(&self) -> Result<f64> {
        let extracted = extract_signed_percentage(&self.rendered)?;
        let carried = self.signed_percentage();
        if (extracted - carried).abs() > ROUND_TRIP_TOLERANCE {
            return Err(CoreError::ExtractionMismatch {
                rendered: self.rendered.clone(),
                carried,
                extracted,
            });
        }
        Ok(extracted)
    }
}

impl fmt::Display for FormattedSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

/// Renders [`SentimentResult`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreFormatter;

impl ScoreFormatter {
    /// Create a formatter
    pub fn new() -> Self {
        Self
    }

    /// Classify and render a result
    pub fn format(&self, result: &SentimentResult) -> FormattedSentiment {
        let raw = result.score();
        let score = if raw.is_finite() {
            raw.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let label = SentimentLabel::from_score(score);
        let percentage = score.abs() * 100.0;
        let rendered = format!("{} ({:.2}%)", label, percentage);

        FormattedSentiment {
            method: result.method(),
            label,
            percentage,
            score,
            rendered,
        }
    }
}

/// Unsigned percentage between the last `(` and the trailing `%)`
pub fn extract_percentage(rendered: &str) -> Result<f64> {
    let (_, number) = split_rendered(rendered)?;
    Ok(number)
}

/// Signed percentage: the parenthesized magnitude with the label's sign
pub fn extract_signed_percentage(rendered: &str) -> Result<f64> {
    let (label, magnitude) = split_rendered(rendered)?;
    let label = SentimentLabel::parse(label).ok_or_else(|| CoreError::Extraction {
        rendered: rendered.to_string(),
        reason: "label is not Positive, Negative or Neutral",
    })?;

    if label == SentimentLabel::Neutral && magnitude != 0.0 {
        return Err(CoreError::Extraction {
            rendered: rendered.to_string(),
            reason: "neutral label with a non-zero percentage",
        });
    }

    Ok(label.sign() * magnitude)
}

fn split_rendered(rendered: &str) -> Result<(&str, f64)> {
    let fail = |reason| CoreError::Extraction {
        rendered: rendered.to_string(),
        reason,
    };

    let body = rendered
        .strip_suffix("%)")
        .ok_or_else(|| fail("missing trailing '%)'"))?;
    let open = body.rfind('(').ok_or_else(|| fail("missing '('"))?;
    let number: f64 = body[open + 1..]
        .trim()
        .parse()
        .map_err(|_| fail("percentage is not a number"))?;

    if !number.is_finite() || number < 0.0 {
        return Err(fail("percentage is not a finite non-negative number"));
    }

    Ok((body[..open].trim(), number))
}
