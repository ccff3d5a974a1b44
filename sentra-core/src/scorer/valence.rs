//! Rule-based valence scorer
//!
//! Sums per-word valences adjusted by boosters, capitalization, negations
//! and a contrastive "but", amplifies the sum by `!`/`?` punctuation, then
//! normalizes it into a compound score in [-1, 1].

use super::tokens::{is_all_caps, words_and_emoticons};
use super::SentimentScorer;
use crate::error::Result;
use crate::lexicon::ValenceLexicon;
use crate::types::{ScoringMethod, SentimentResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Normalization constant approximating the maximum expected sum
const ALPHA: f64 = 15.0;
/// Decay of a booster two and three words back
const BOOST_DECAY: [f64; 3] = [1.0, 0.95, 0.9];
const EXCLAMATION_STEP: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_STEP: f64 = 0.18;
const MAX_QUESTION_BOOST: f64 = 0.96;
const EMPHATIC_NEGATION: f64 = 1.25;
const BEFORE_BUT: f64 = 0.5;
const AFTER_BUT: f64 = 1.5;

/// Proportions of negative, neutral and positive content plus the
/// normalized compound score
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Share of negative content
    pub neg: f64,
    /// Share of neutral content
    pub neu: f64,
    /// Share of positive content
    pub pos: f64,
    /// Normalized sum in [-1, 1]
    pub compound: f64,
}

/// Valence scorer over a [`ValenceLexicon`]
#[derive(Debug, Clone)]
pub struct RuleBasedScorer {
    lexicon: Arc<ValenceLexicon>,
}

impl RuleBasedScorer {
    /// Scorer over the built-in English table
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(ValenceLexicon::builtin()?))
    }

    /// Scorer over a custom table
    pub fn new(lexicon: Arc<ValenceLexicon>) -> Self {
        Self { lexicon }
    }

    /// Table in use
    pub fn lexicon(&self) -> &ValenceLexicon {
        &self.lexicon
    }

    /// Full breakdown for a text
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let words = words_and_emoticons(text);
        if words.is_empty() {
            return PolarityScores::default();
        }
        let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

        let caps = words.iter().filter(|w| is_all_caps(w)).count();
        let cap_differential = caps > 0 && caps < words.len();

        let mut sentiments = Vec::with_capacity(words.len());
        for i in 0..words.len() {
            let is_kind_of =
                lower[i] == "kind" && lower.get(i + 1).map(String::as_str) == Some("of");
            if self.lexicon.booster(&lower[i]).is_some() || is_kind_of {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.word_valence(&words, &lower, i, cap_differential));
        }

        but_check(&lower, &mut sentiments);
        score_valence(&sentiments, text)
    }

    fn word_valence(&self, words: &[&str], lower: &[String], i: usize, cap_diff: bool) -> f64 {
        let Some(mut valence) = self.lexicon.valence(&lower[i]) else {
            return 0.0;
        };

        // "no" directly before another rated word is a determiner, not a rating
        if lower[i] == "no"
            && lower
                .get(i + 1)
                .is_some_and(|next| self.lexicon.valence(next).is_some())
        {
            valence = 0.0;
        }
        if i > 0 && lower[i - 1] == "no" && lower[i] != "no" {
            valence *= self.lexicon.modifiers.negation_scalar;
        }

        if cap_diff && is_all_caps(words[i]) {
            valence += valence.signum() * self.lexicon.modifiers.cap_increment;
        }

        for (distance, decay) in BOOST_DECAY.iter().enumerate() {
            if i <= distance {
                break;
            }
            let prev = i - (distance + 1);
            if self.lexicon.valence(&lower[prev]).is_none() {
                let scalar = self.booster_scalar(words[prev], &lower[prev], valence, cap_diff);
                valence += scalar * decay;
                valence = self.negation_check(valence, lower, distance, i);
            }
        }

        self.least_check(valence, lower, i)
    }

    fn booster_scalar(&self, word: &str, lower: &str, valence: f64, cap_diff: bool) -> f64 {
        let Some(mut scalar) = self.lexicon.booster(lower) else {
            return 0.0;
        };
        if valence < 0.0 {
            scalar = -scalar;
        }
        if cap_diff && is_all_caps(word) {
            let cap = self.lexicon.modifiers.cap_increment;
            scalar += if valence > 0.0 { cap } else { -cap };
        }
        scalar
    }

    fn negated(&self, word: &str) -> bool {
        let bare: String = word.chars().filter(|c| *c != '\'' && *c != '’').collect();
        word.contains("n't") || self.lexicon.is_negation(&bare)
    }

    fn negation_check(&self, valence: f64, lower: &[String], distance: usize, i: usize) -> f64 {
        let scalar = self.lexicon.modifiers.negation_scalar;
        let word = |back: usize| lower[i - back].as_str();

        match distance {
            0 => {
                if self.negated(word(1)) {
                    return valence * scalar;
                }
            }
            1 => {
                if word(2) == "never" && matches!(word(1), "so" | "this") {
                    return valence * EMPHATIC_NEGATION;
                }
                if word(2) == "without" && word(1) == "doubt" {
                    return valence;
                }
                if self.negated(word(2)) {
                    return valence * scalar;
                }
            }
            _ => {
                if word(3) == "never"
                    && (matches!(word(2), "so" | "this") || matches!(word(1), "so" | "this"))
                {
                    return valence * EMPHATIC_NEGATION;
                }
                if word(3) == "without" && (word(2) == "doubt" || word(1) == "doubt") {
                    return valence;
                }
                if self.negated(word(3)) {
                    return valence * scalar;
                }
            }
        }
        valence
    }

    fn least_check(&self, valence: f64, lower: &[String], i: usize) -> f64 {
        if i == 0 || lower[i - 1] != "least" || self.lexicon.valence(&lower[i - 1]).is_some() {
            return valence;
        }
        if i > 1 && matches!(lower[i - 2].as_str(), "at" | "very") {
            return valence;
        }
        valence * self.lexicon.modifiers.negation_scalar
    }
}

impl SentimentScorer for RuleBasedScorer {
    fn score(&self, text: &str) -> SentimentResult {
        SentimentResult::RuleBased {
            compound: self.polarity_scores(text).compound,
        }
    }

    fn method(&self) -> ScoringMethod {
        ScoringMethod::RuleBased
    }
}

/// Dampen everything before the first "but" and emphasize everything after
fn but_check(lower: &[String], sentiments: &mut [f64]) {
    let Some(pivot) = lower.iter().position(|w| w == "but") else {
        return;
    };
    for (i, sentiment) in sentiments.iter_mut().enumerate() {
        if i < pivot {
            *sentiment *= BEFORE_BUT;
        } else if i > pivot {
            *sentiment *= AFTER_BUT;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();
    let question_boost = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_STEP,
        _ => MAX_QUESTION_BOOST,
    };
    exclamations as f64 * EXCLAMATION_STEP + question_boost
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
    if sentiments.is_empty() {
        return PolarityScores::default();
    }

    let emphasis = punctuation_emphasis(text);
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize(sum);

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neutral = 0usize;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neutral += 1;
        }
    }
    if pos_sum > neg_sum.abs() {
        pos_sum += emphasis;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= emphasis;
    }

    let total = pos_sum + neg_sum.abs() + neutral as f64;
    if total == 0.0 {
        return PolarityScores::default();
    }

    PolarityScores {
        neg: round_to((neg_sum / total).abs(), 3),
        neu: round_to(neutral as f64 / total, 3),
        pos: round_to((pos_sum / total).abs(), 3),
        compound: round_to(compound, 4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> RuleBasedScorer {
        RuleBasedScorer::builtin().unwrap()
    }

    fn compound(text: &str) -> f64 {
        scorer().polarity_scores(text).compound
    }

    #[test]
    fn test_simple_positive_with_exclamation() {
        assert_eq!(compound("I love this!"), 0.6696);
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let scores = scorer().polarity_scores("The food was great but the service was bad");
        let total = scores.neg + scores.neu + scores.pos;
        assert!((total - 1.0).abs() < 0.01);
        assert!(scores.pos > 0.0);
        assert!(scores.neg > 0.0);
    }

    #[test]
    fn test_negation_flips_sign() {
        assert!(compound("The movie is good") > 0.0);
        assert!(compound("The movie is not good") < 0.0);
        assert!(compound("The movie isn't good") < 0.0);
    }

    #[test]
    fn test_booster_and_caps_increase_magnitude() {
        assert!(compound("The movie is extremely good") > compound("The movie is good"));
        assert!(compound("The movie is GOOD") > compound("The movie is good"));
    }

    #[test]
    fn test_but_shifts_weight_to_second_clause() {
        assert!(compound("The food was great but the service was terrible") < 0.0);
    }

    #[test]
    fn test_exclamations_are_capped() {
        assert_eq!(compound("good!!!!"), compound("good!!!!!!!!"));
        assert!(compound("good!!") > compound("good"));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(scorer().polarity_scores(""), PolarityScores::default());
        assert_eq!(scorer().score("   ").score(), 0.0);
    }

    #[test]
    fn test_compound_in_range() {
        let c = compound("LOVE LOVE LOVE amazing wonderful excellent great!!!!");
        assert!((-1.0..=1.0).contains(&c));
    }
}
