//! Lexicon-averaging scorer
//!
//! Each word found in the polarity table is an assessment. An intensifier
//! scales the next assessment, a negation flips and dampens one of the next
//! few assessments, and every `!` boosts the assessment it follows. The
//! result is the mean of all assessments.

use super::tokens::{word_pattern, words_and_exclamations, Token};
use super::SentimentScorer;
use crate::error::Result;
use crate::lexicon::PolarityLexicon;
use crate::types::{ScoringMethod, SentimentResult};
use regex::Regex;
use std::sync::Arc;

/// Words a negation may skip before it lapses ("not a good idea")
const NEGATION_REACH: usize = 3;

#[derive(Debug, Clone, Copy)]
struct Assessment {
    polarity: f64,
    subjectivity: f64,
}

/// Polarity/subjectivity scorer over a [`PolarityLexicon`]
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: Arc<PolarityLexicon>,
    words: &'static Regex,
}

impl LexiconScorer {
    /// Scorer over the built-in English table
    pub fn builtin() -> Result<Self> {
        Self::new(PolarityLexicon::builtin()?)
    }

    /// Scorer over a custom table
    pub fn new(lexicon: Arc<PolarityLexicon>) -> Result<Self> {
        Ok(Self {
            lexicon,
            words: word_pattern()?,
        })
    }

    /// Table in use
    pub fn lexicon(&self) -> &PolarityLexicon {
        &self.lexicon
    }

    fn assess(&self, text: &str) -> Vec<Assessment> {
        let modifiers = &self.lexicon.modifiers;
        let mut assessments: Vec<Assessment> = Vec::new();
        let mut intensity: Option<f64> = None;
        let mut negation_left = 0usize;

        for token in words_and_exclamations(self.words, text) {
            let word = match token {
                Token::Exclamation => {
                    if let Some(last) = assessments.last_mut() {
                        last.polarity =
                            (last.polarity * modifiers.exclamation_boost).clamp(-1.0, 1.0);
                    }
                    continue;
                }
                Token::Word(word) => word,
            };

            if self.lexicon.is_negation(&word) {
                negation_left = NEGATION_REACH;
                continue;
            }

            if let Some(factor) = self.lexicon.intensifier(&word) {
                intensity = Some(intensity.unwrap_or(1.0) * factor);
                continue;
            }

            match self.lexicon.word(&word) {
                Some(entry) => {
                    let mut polarity = entry.polarity;
                    let mut subjectivity = entry.subjectivity;
                    if let Some(factor) = intensity.take() {
                        polarity = (polarity * factor).clamp(-1.0, 1.0);
                        subjectivity = (subjectivity * factor).clamp(0.0, 1.0);
                    }
                    if negation_left > 0 {
                        polarity *= modifiers.negation_factor;
                        negation_left = 0;
                    }
                    assessments.push(Assessment {
                        polarity,
                        subjectivity,
                    });
                }
                None => {
                    intensity = None;
                    negation_left = negation_left.saturating_sub(1);
                }
            }
        }

        assessments
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentResult {
        let assessments = self.assess(text);
        if assessments.is_empty() {
            return SentimentResult::neutral(ScoringMethod::Lexicon);
        }

        let n = assessments.len() as f64;
        let polarity = assessments.iter().map(|a| a.polarity).sum::<f64>() / n;
        let subjectivity = assessments.iter().map(|a| a.subjectivity).sum::<f64>() / n;

        SentimentResult::Lexicon {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }

    fn method(&self) -> ScoringMethod {
        ScoringMethod::Lexicon
    }
}
