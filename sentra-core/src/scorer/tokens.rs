//! Tokenizers shared by the scorers

use crate::error::{CoreError, Result};
use regex::Regex;
use std::sync::OnceLock;

const WORD_OR_BANG_PATTERN: &str = r"[\p{L}\p{N}]+(?:['’][\p{L}]+)*|!";

static WORD_OR_BANG: OnceLock<std::result::Result<Regex, String>> = OnceLock::new();

/// Compiled word-or-`!` pattern, built once
pub(crate) fn word_pattern() -> Result<&'static Regex> {
    WORD_OR_BANG
        .get_or_init(|| Regex::new(WORD_OR_BANG_PATTERN).map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| CoreError::Tokenizer(e.clone()))
}

/// Token seen by the lexicon scorer
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Lowercased word, contractions kept whole ("don't")
    Word(String),
    /// A single `!`
    Exclamation,
}

/// Words and exclamation marks, in order
pub(crate) fn words_and_exclamations(pattern: &Regex, text: &str) -> Vec<Token> {
    pattern
        .find_iter(text)
        .map(|m| match m.as_str() {
            "!" => Token::Exclamation,
            word => Token::Word(word.replace('’', "'").to_lowercase()),
        })
        .collect()
}

/// Whitespace-split tokens with surrounding punctuation removed, unless
/// stripping would leave two characters or fewer (keeps emoticons like `:)`)
pub(crate) fn words_and_emoticons(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token
            } else {
                stripped
            }
        })
        .collect()
}

/// Whether a token has cased letters and all of them are uppercase
pub(crate) fn is_all_caps(token: &str) -> bool {
    let mut cased = token.chars().filter(|c| c.is_lowercase() || c.is_uppercase());
    let mut any = false;
    let all_upper = cased.all(|c| {
        any = true;
        c.is_uppercase()
    });
    any && all_upper
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_and_exclamations() {
        let tokens = words_and_exclamations(word_pattern().unwrap(), "I don’t LOVE this!!");
        assert_eq!(
            tokens,
            vec![
                Token::Word("i".to_string()),
                Token::Word("don't".to_string()),
                Token::Word("love".to_string()),
                Token::Word("this".to_string()),
                Token::Exclamation,
                Token::Exclamation,
            ]
        );
    }

    #[test]
    fn test_words_and_emoticons_strips_only_long_tokens() {
        assert_eq!(
            words_and_emoticons("Great!! :) ok! (fine)"),
            vec!["Great", ":)", "ok!", "fine"]
        );
    }

    #[test]
    fn test_is_all_caps() {
        assert!(is_all_caps("GREAT"));
        assert!(is_all_caps("I"));
        assert!(!is_all_caps("Great"));
        assert!(!is_all_caps("123"));
    }
}
