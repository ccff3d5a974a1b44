//! Pluggable sentiment scoring strategies
//!
//! Both strategies implement [`SentimentScorer`]. Callers pick one with a
//! [`ScoringMethod`] and resolve it through [`Scorers`] once per call.

mod polarity;
mod tokens;
mod valence;

pub use polarity::LexiconScorer;
pub use valence::{PolarityScores, RuleBasedScorer};

use crate::error::Result;
use crate::types::{ScoringMethod, SentimentResult};

/// A sentiment scoring strategy
pub trait SentimentScorer: Send + Sync {
    /// Score a text. Never fails; empty or whitespace-only text is neutral.
    fn score(&self, text: &str) -> SentimentResult;

    /// The strategy this scorer implements
    fn method(&self) -> ScoringMethod;
}

/// One scorer per [`ScoringMethod`]
#[derive(Debug, Clone)]
pub struct Scorers {
    lexicon: LexiconScorer,
    rule_based: RuleBasedScorer,
}

impl Scorers {
    /// Scorers backed by the built-in English tables
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            lexicon: LexiconScorer::builtin()?,
            rule_based: RuleBasedScorer::builtin()?,
        })
    }

    /// Assemble from explicit scorers
    pub fn new(lexicon: LexiconScorer, rule_based: RuleBasedScorer) -> Self {
        Self {
            lexicon,
            rule_based,
        }
    }

    /// Replace the lexicon strategy
    pub fn with_lexicon_scorer(mut self, scorer: LexiconScorer) -> Self {
        self.lexicon = scorer;
        self
    }

    /// Replace the rule-based strategy
    pub fn with_rule_based_scorer(mut self, scorer: RuleBasedScorer) -> Self {
        self.rule_based = scorer;
        self
    }

    /// Strategy for a method
    pub fn get(&self, method: ScoringMethod) -> &dyn SentimentScorer {
        match method {
            ScoringMethod::Lexicon => &self.lexicon,
            ScoringMethod::RuleBased => &self.rule_based,
        }
    }

    /// The lexicon strategy
    pub fn lexicon(&self) -> &LexiconScorer {
        &self.lexicon
    }

    /// The rule-based strategy
    pub fn rule_based(&self) -> &RuleBasedScorer {
        &self.rule_based
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_resolves_each_method() {
        let scorers = Scorers::builtin().unwrap();
        for method in ScoringMethod::ALL {
            let scorer = scorers.get(method);
            assert_eq!(scorer.method(), method);
            assert_eq!(scorer.score("").method(), method);
        }
    }

    #[test]
    fn test_empty_and_whitespace_are_neutral() {
        let scorers = Scorers::builtin().unwrap();
        for method in ScoringMethod::ALL {
            for text in ["", "   ", "\n\t"] {
                assert_eq!(scorers.get(method).score(text).score(), 0.0);
            }
        }
    }
}
