//! Property tests for the rendered-string contract

use proptest::prelude::*;
use regex::Regex;
use sentra_core::{
    extract_signed_percentage, ScoreFormatter, Scorers, ScoringMethod, SentimentLabel,
    SentimentResult,
};

fn rendered_shape() -> Regex {
    Regex::new(r"^(Positive|Negative|Neutral) \([0-9]+\.[0-9]{2}%\)$").unwrap()
}

proptest! {
    #[test]
    fn rendered_strings_always_match_shape(score in -1.0f64..=1.0, rule_based in any::<bool>()) {
        let result = if rule_based {
            SentimentResult::RuleBased { compound: score }
        } else {
            SentimentResult::Lexicon { polarity: score, subjectivity: 0.5 }
        };
        let formatted = ScoreFormatter::new().format(&result);
        prop_assert!(rendered_shape().is_match(formatted.rendered()), "{}", formatted.rendered());
    }

    #[test]
    fn extraction_recovers_signed_percentage(score in -1.0f64..=1.0) {
        let formatted = ScoreFormatter::new().format(&SentimentResult::RuleBased { compound: score });
        let extracted = extract_signed_percentage(formatted.rendered()).unwrap();
        prop_assert!((extracted - score * 100.0).abs() <= 0.005 + 1e-9);
        prop_assert_eq!(formatted.round_trip().unwrap(), extracted);
    }

    #[test]
    fn label_agrees_with_sign(score in -1.0f64..=1.0) {
        let formatted = ScoreFormatter::new().format(&SentimentResult::RuleBased { compound: score });
        let expected = SentimentLabel::from_score(score);
        prop_assert_eq!(formatted.label(), expected);
    }

    #[test]
    fn scoring_arbitrary_text_stays_in_range(text in "\\PC{0,200}") {
        let scorers = Scorers::builtin().unwrap();
        for method in ScoringMethod::ALL {
            let score = scorers.get(method).score(&text).score();
            prop_assert!((-1.0..=1.0).contains(&score));
            let formatted = ScoreFormatter::new().format(&scorers.get(method).score(&text));
            prop_assert!(rendered_shape().is_match(formatted.rendered()));
        }
    }
}
