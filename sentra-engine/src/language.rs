//! Language detection from embedded per-language profiles
//!
//! Detection runs in two steps. A script census picks the dominant writing
//! system; languages that are alone in their script are identified by the
//! census. Languages sharing a script (Latin, Cyrillic, Arabic) are then
//! scored on stop words, distinctive letters and typical letter sequences.
//! Equal scores are ordered by a key derived from the detector seed, so a
//! given seed always resolves a tie the same way.

use crate::error::{EngineError, Result};
use sentra_core::LanguageCode;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

static BUILTIN_PROFILES: OnceLock<std::result::Result<Arc<Vec<LanguageProfile>>, String>> =
    OnceLock::new();

/// Weight of one stop word hit relative to one distinctive letter
const STOPWORD_WEIGHT: f64 = 2.0;

/// Writing system of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Latin alphabet, including accented letters
    Latin,
    /// Cyrillic
    Cyrillic,
    /// Greek
    Greek,
    /// Arabic, including Persian letters
    Arabic,
    /// Hebrew
    Hebrew,
    /// Devanagari
    Devanagari,
    /// Thai
    Thai,
    /// Hangul
    Hangul,
    /// Hiragana and katakana
    Kana,
    /// CJK ideographs
    Han,
}

impl Script {
    const ALL: [Script; 10] = [
        Script::Latin,
        Script::Cyrillic,
        Script::Greek,
        Script::Arabic,
        Script::Hebrew,
        Script::Devanagari,
        Script::Thai,
        Script::Hangul,
        Script::Kana,
        Script::Han,
    ];

    /// Script of a single character, if it belongs to a known one
    pub fn of(c: char) -> Option<Script> {
        let script = match c as u32 {
            0x0041..=0x005A | 0x0061..=0x007A | 0x00C0..=0x024F | 0x1E00..=0x1EFF => {
                Script::Latin
            }
            0x0370..=0x03FF | 0x1F00..=0x1FFF => Script::Greek,
            0x0400..=0x04FF => Script::Cyrillic,
            0x0590..=0x05FF => Script::Hebrew,
            0x0600..=0x06FF | 0x0750..=0x077F | 0xFB50..=0xFDFF | 0xFE70..=0xFEFF => {
                Script::Arabic
            }
            0x0900..=0x097F => Script::Devanagari,
            0x0E00..=0x0E7F => Script::Thai,
            0x1100..=0x11FF | 0x3130..=0x318F | 0xAC00..=0xD7AF => Script::Hangul,
            0x3040..=0x30FF | 0x31F0..=0x31FF => Script::Kana,
            0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF => Script::Han,
            _ => return None,
        };
        // Latin-1 symbols such as × and ÷ sit inside the letter range
        if script == Script::Latin && !c.is_alphabetic() {
            return None;
        }
        Some(script)
    }

    fn index(self) -> usize {
        Script::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

#[derive(Debug, Deserialize)]
struct ProfileFile {
    language: Vec<ProfileConfig>,
}

#[derive(Debug, Deserialize)]
struct ProfileConfig {
    code: String,
    name: String,
    script: Script,
    #[serde(default)]
    stopwords: Vec<String>,
    #[serde(default)]
    letters: String,
    #[serde(default)]
    sequences: Vec<String>,
}

/// Detection profile of one language
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    code: LanguageCode,
    name: String,
    script: Script,
    stopwords: HashSet<String>,
    letters: HashSet<char>,
    sequences: Vec<String>,
}

impl LanguageProfile {
    /// Normalized language code
    pub fn code(&self) -> &LanguageCode {
        &self.code
    }

    /// English name of the language
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Script the language is written in
    pub fn script(&self) -> Script {
        self.script
    }

    fn evidence(&self, words: &[String], text: &str) -> f64 {
        let stopword_hits = words.iter().filter(|w| self.stopwords.contains(*w)).count();
        let letter_hits = text
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| self.letters.contains(c))
            .count();
        let sequence_hits: usize = words
            .iter()
            .flat_map(|w| self.sequences.iter().map(move |s| w.matches(s.as_str()).count()))
            .sum();
        stopword_hits as f64 * STOPWORD_WEIGHT + (letter_hits + sequence_hits) as f64
    }
}

/// A ranked detection candidate
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageCandidate {
    /// Candidate language
    pub code: LanguageCode,
    /// Share of the total evidence, in (0, 1]
    pub probability: f64,
}

/// Deterministic language detector
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    seed: u64,
    profiles: Arc<Vec<LanguageProfile>>,
}

impl LanguageDetector {
    /// Seed used when none is configured
    pub const DEFAULT_SEED: u64 = 0;

    /// Detector over the built-in profiles with a fixed seed
    pub fn new(seed: u64) -> Result<Self> {
        let profiles = BUILTIN_PROFILES
            .get_or_init(|| {
                parse_profiles(include_str!("../configs/languages/profiles.toml"))
                    .map(Arc::new)
                    .map_err(|e| e.to_string())
            })
            .clone()
            .map_err(EngineError::ConfigError)?;
        Ok(Self { seed, profiles })
    }

    /// Detector over custom profiles in the built-in TOML schema
    pub fn from_toml_str(seed: u64, toml_str: &str) -> Result<Self> {
        Ok(Self {
            seed,
            profiles: Arc::new(parse_profiles(toml_str)?),
        })
    }

    /// Seed fixed at construction
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Known profiles, in file order
    pub fn profiles(&self) -> &[LanguageProfile] {
        &self.profiles
    }

    /// Most likely language, or `unknown` when nothing can be concluded
    pub fn detect(&self, text: &str) -> LanguageCode {
        match self.detect_ranked(text).into_iter().next() {
            Some(best) => best.code,
            None => {
                tracing::debug!(chars = text.chars().count(), "language detection fell back to unknown");
                LanguageCode::unknown()
            }
        }
    }

    /// Every candidate with evidence, most likely first
    pub fn detect_ranked(&self, text: &str) -> Vec<LanguageCandidate> {
        let Some((script, script_chars)) = dominant_script(text) else {
            return Vec::new();
        };

        let candidates: Vec<&LanguageProfile> =
            self.profiles.iter().filter(|p| p.script == script).collect();

        let mut scored: Vec<(&LanguageProfile, f64)> = if candidates.len() == 1 {
            vec![(candidates[0], script_chars as f64)]
        } else {
            let words = words(text);
            candidates
                .into_iter()
                .map(|profile| (profile, profile.evidence(&words, text)))
                .filter(|(_, score)| *score > 0.0)
                .collect()
        };

        let total: f64 = scored.iter().map(|(_, score)| score).sum();
        if total <= 0.0 {
            return Vec::new();
        }

        scored.sort_by(|(a, sa), (b, sb)| {
            sb.total_cmp(sa)
                .then_with(|| self.tie_key(&a.code).cmp(&self.tie_key(&b.code)))
        });

        scored
            .into_iter()
            .map(|(profile, score)| LanguageCandidate {
                code: profile.code.clone(),
                probability: score / total,
            })
            .collect()
    }

    /// FNV-1a over the seed and the code
    fn tie_key(&self, code: &LanguageCode) -> u64 {
        const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0100_0000_01b3;
        self.seed
            .to_le_bytes()
            .iter()
            .chain(code.as_str().as_bytes())
            .fold(OFFSET, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(PRIME))
    }
}

fn parse_profiles(toml_str: &str) -> Result<Vec<LanguageProfile>> {
    let file: ProfileFile = toml::from_str(toml_str)
        .map_err(|e| EngineError::ConfigError(format!("failed to parse language profiles: {e}")))?;
    if file.language.is_empty() {
        return Err(EngineError::ConfigError(
            "no language profiles defined".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    file.language
        .into_iter()
        .map(|config| {
            let code = LanguageCode::new(&config.code);
            if code.is_unknown() || !seen.insert(code.clone()) {
                return Err(EngineError::ConfigError(format!(
                    "invalid or duplicate language code '{}'",
                    config.code
                )));
            }
            Ok(LanguageProfile {
                code,
                name: config.name,
                script: config.script,
                stopwords: config.stopwords.iter().map(|w| w.to_lowercase()).collect(),
                letters: config.letters.chars().flat_map(char::to_lowercase).collect(),
                sequences: config
                    .sequences
                    .iter()
                    .map(|s| s.to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect(),
            })
        })
        .collect()
}

/// Script with the most letters, and its letter count
///
/// Han characters count towards Japanese whenever kana are present.
fn dominant_script(text: &str) -> Option<(Script, usize)> {
    let mut counts = [0usize; Script::ALL.len()];
    for script in text.chars().filter_map(Script::of) {
        counts[script.index()] += 1;
    }

    let kana = Script::Kana.index();
    let han = Script::Han.index();
    if counts[kana] > 0 {
        counts[kana] += counts[han];
        counts[han] = 0;
    }

    Script::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .fold(None, |best: Option<(Script, usize)>, (script, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((*script, count)),
        })
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> String {
        LanguageDetector::new(LanguageDetector::DEFAULT_SEED)
            .unwrap()
            .detect(text)
            .to_string()
    }

    #[test]
    fn test_latin_languages() {
        assert_eq!(detect("I love this product, it is really good"), "en");
        assert_eq!(detect("Este producto es muy bueno y el precio es justo"), "es");
        assert_eq!(detect("Ce produit est très bon et le prix est juste"), "fr");
        assert_eq!(detect("Dieses Produkt ist sehr gut und der Preis ist fair"), "de");
    }

    #[test]
    fn test_french_sentences_sharing_articles_with_spanish() {
        for text in [
            "La nourriture de la maison",
            "J'adore la musique de la ville",
            "La chambre était sale",
            "C'est la vie",
            "Que la fête commence",
            "La vie est belle",
        ] {
            assert_eq!(detect(text), "fr", "{text}");
        }
    }

    #[test]
    fn test_italian_and_portuguese_articles() {
        assert_eq!(detect("La pizza è molto buona e il servizio è veloce"), "it");
        assert_eq!(detect("A comida é muito boa e o serviço foi rápido"), "pt");
        assert_eq!(detect("La comida de la casa es muy buena"), "es");
    }

    #[test]
    fn test_script_census() {
        assert_eq!(detect("Это очень хороший продукт"), "ru");
        assert_eq!(detect("これは素晴らしい製品です"), "ja");
        assert_eq!(detect("这个产品非常好"), "zh-cn");
        assert_eq!(detect("이 제품은 정말 좋아요"), "ko");
        assert_eq!(detect("Αυτό είναι υπέροχο"), "el");
    }

    #[test]
    fn test_unknown_fallback() {
        assert_eq!(detect(""), "unknown");
        assert_eq!(detect("   "), "unknown");
        assert_eq!(detect("12345 !!! ..."), "unknown");
        assert_eq!(detect("xkcd qwrt zzz"), "unknown");
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let detector = LanguageDetector::new(7).unwrap();
        let tied = "de";
        let first = detector.detect(tied);
        for _ in 0..10 {
            assert_eq!(detector.detect(tied), first);
        }
        assert_eq!(
            LanguageDetector::new(7).unwrap().detect_ranked(tied),
            detector.detect_ranked(tied)
        );
    }

    #[test]
    fn test_ranked_probabilities_sum_to_one() {
        let detector = LanguageDetector::new(0).unwrap();
        let ranked = detector.detect_ranked("de la casa en el campo");
        assert!(ranked.len() > 1);
        let total: f64 = ranked.iter().map(|c| c.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(ranked[0].code.as_str(), "es");
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].probability >= pair[1].probability));
    }

    #[test]
    fn test_custom_profiles_reject_duplicates() {
        let toml = r#"
            [[language]]
            code = "en"
            name = "English"
            script = "latin"

            [[language]]
            code = "EN"
            name = "Again"
            script = "latin"
        "#;
        assert!(LanguageDetector::from_toml_str(0, toml).is_err());
    }
}
