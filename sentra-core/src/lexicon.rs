//! Lexicon tables for both scoring strategies
//!
//! Tables are TOML documents. The built-in English tables are embedded at
//! compile time and parsed once on first use; custom tables in the same
//! schema can be loaded from disk.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

static BUILTIN_POLARITY: OnceLock<std::result::Result<Arc<PolarityLexicon>, String>> =
    OnceLock::new();
static BUILTIN_VALENCE: OnceLock<std::result::Result<Arc<ValenceLexicon>, String>> =
    OnceLock::new();

/// Which scorer a lexicon table feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LexiconKind {
    /// Polarity/subjectivity table for the lexicon scorer
    Polarity,
    /// Valence table for the rule-based scorer
    Valence,
}

/// Lexicon metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Language code of the words in the table
    pub code: String,
    /// Display name of the table
    pub name: String,
    /// Which scorer the table feeds
    pub kind: LexiconKind,
}

/// Polarity and subjectivity of a single word
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Polarity in [-1, 1]
    pub polarity: f64,
    /// Subjectivity in [0, 1]
    #[serde(default)]
    pub subjectivity: f64,
}

/// Negation, emphasis and intensifier settings of a polarity table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolarityModifiers {
    /// Words that flip the polarity of the next assessed word
    #[serde(default)]
    pub negations: Vec<String>,
    /// Multiplier applied to a negated polarity
    #[serde(default = "default_negation_factor")]
    pub negation_factor: f64,
    /// Multiplier applied to the last assessed word per `!`
    #[serde(default = "default_exclamation_boost")]
    pub exclamation_boost: f64,
    /// Multipliers applied to the next assessed word
    #[serde(default)]
    pub intensifiers: HashMap<String, f64>,
}

/// Negation, capitalization and booster settings of a valence table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValenceModifiers {
    /// Words that negate the valence of the following words
    #[serde(default)]
    pub negations: Vec<String>,
    /// Multiplier applied to a negated valence
    #[serde(default = "default_negation_scalar")]
    pub negation_scalar: f64,
    /// Increment for an all-caps word in mixed-case text
    #[serde(default = "default_cap_increment")]
    pub cap_increment: f64,
    /// Signed increments: positive boosters, negative dampeners
    #[serde(default)]
    pub boosters: HashMap<String, f64>,
}

impl Default for PolarityModifiers {
    fn default() -> Self {
        Self {
            negations: Vec::new(),
            negation_factor: default_negation_factor(),
            exclamation_boost: default_exclamation_boost(),
            intensifiers: HashMap::new(),
        }
    }
}

impl Default for ValenceModifiers {
    fn default() -> Self {
        Self {
            negations: Vec::new(),
            negation_scalar: default_negation_scalar(),
            cap_increment: default_cap_increment(),
            boosters: HashMap::new(),
        }
    }
}

fn default_negation_factor() -> f64 {
    -0.5
}

fn default_exclamation_boost() -> f64 {
    1.25
}

fn default_negation_scalar() -> f64 {
    -0.74
}

fn default_cap_increment() -> f64 {
    0.733
}

/// Word table for the lexicon scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolarityLexicon {
    /// Table metadata
    pub metadata: Metadata,
    /// Negation and emphasis settings
    #[serde(default)]
    pub modifiers: PolarityModifiers,
    /// Lowercased words and their entries
    pub words: HashMap<String, WordEntry>,
}

/// Word table for the rule-based scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValenceLexicon {
    /// Table metadata
    pub metadata: Metadata,
    /// Negation, capitalization and booster settings
    #[serde(default)]
    pub modifiers: ValenceModifiers,
    /// Lowercased words and their valence in [-4, 4]
    pub words: HashMap<String, f64>,
}

impl PolarityLexicon {
    /// Built-in English table
    pub fn builtin() -> Result<Arc<Self>> {
        BUILTIN_POLARITY
            .get_or_init(|| {
                Self::from_toml_str(include_str!("../configs/lexicons/polarity.toml"))
                    .map(Arc::new)
                    .map_err(|e| e.to_string())
            })
            .clone()
            .map_err(CoreError::InvalidLexicon)
    }

    /// Parse and validate a table from TOML
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let table: Self = toml::from_str(toml_str)?;
        table.validated()
    }

    /// Read, parse and validate a table from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_toml_str(&read_table(path)?)
    }

    /// Entry for a lowercased word
    pub fn word(&self, word: &str) -> Option<&WordEntry> {
        self.words.get(word)
    }

    /// Intensifier multiplier for a lowercased word
    pub fn intensifier(&self, word: &str) -> Option<f64> {
        self.modifiers.intensifiers.get(word).copied()
    }

    /// Whether a lowercased word negates the next assessment
    pub fn is_negation(&self, word: &str) -> bool {
        word.ends_with("n't") || self.modifiers.negations.iter().any(|n| n == word)
    }

    fn validated(mut self) -> Result<Self> {
        expect_kind(&self.metadata, LexiconKind::Polarity)?;
        if self.words.is_empty() {
            return Err(CoreError::InvalidLexicon("no words defined".to_string()));
        }
        for (word, entry) in &self.words {
            if !(-1.0..=1.0).contains(&entry.polarity) {
                return Err(CoreError::InvalidLexicon(format!(
                    "polarity of '{word}' must be within [-1, 1]"
                )));
            }
            if !(0.0..=1.0).contains(&entry.subjectivity) {
                return Err(CoreError::InvalidLexicon(format!(
                    "subjectivity of '{word}' must be within [0, 1]"
                )));
            }
        }
        if let Some((word, _)) = self
            .modifiers
            .intensifiers
            .iter()
            .find(|(_, factor)| !(factor.is_finite() && **factor > 0.0))
        {
            return Err(CoreError::InvalidLexicon(format!(
                "intensifier '{word}' must be a positive multiplier"
            )));
        }

        self.words = lowercase_keys(self.words);
        self.modifiers.intensifiers = lowercase_keys(self.modifiers.intensifiers);
        lowercase_all(&mut self.modifiers.negations);
        Ok(self)
    }
}

impl ValenceLexicon {
    /// Built-in English table
    pub fn builtin() -> Result<Arc<Self>> {
        BUILTIN_VALENCE
            .get_or_init(|| {
                Self::from_toml_str(include_str!("../configs/lexicons/valence.toml"))
                    .map(Arc::new)
                    .map_err(|e| e.to_string())
            })
            .clone()
            .map_err(CoreError::InvalidLexicon)
    }

    /// Parse and validate a table from TOML
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let table: Self = toml::from_str(toml_str)?;
        table.validated()
    }

    /// Read, parse and validate a table from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_toml_str(&read_table(path)?)
    }

    /// Valence of a lowercased word
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.words.get(word).copied()
    }

    /// Booster increment of a lowercased word
    pub fn booster(&self, word: &str) -> Option<f64> {
        self.modifiers.boosters.get(word).copied()
    }

    /// Whether a lowercased word is a negation
    pub fn is_negation(&self, word: &str) -> bool {
        word.ends_with("n't") || self.modifiers.negations.iter().any(|n| n == word)
    }

    fn validated(mut self) -> Result<Self> {
        expect_kind(&self.metadata, LexiconKind::Valence)?;
        if self.words.is_empty() {
            return Err(CoreError::InvalidLexicon("no words defined".to_string()));
        }
        if let Some((word, _)) = self
            .words
            .iter()
            .find(|(_, valence)| !(-4.0..=4.0).contains(*valence))
        {
            return Err(CoreError::InvalidLexicon(format!(
                "valence of '{word}' must be within [-4, 4]"
            )));
        }

        self.words = lowercase_keys(self.words);
        self.modifiers.boosters = lowercase_keys(self.modifiers.boosters);
        lowercase_all(&mut self.modifiers.negations);
        Ok(self)
    }
}

/// A lexicon table of either kind, as found in a file
#[derive(Debug, Clone)]
pub enum Lexicon {
    /// Table for the lexicon scorer
    Polarity(PolarityLexicon),
    /// Table for the rule-based scorer
    Valence(ValenceLexicon),
}

impl Lexicon {
    /// Parse a table, dispatching on `metadata.kind`
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct Header {
            metadata: Metadata,
        }

        let header: Header = toml::from_str(toml_str)?;
        match header.metadata.kind {
            LexiconKind::Polarity => PolarityLexicon::from_toml_str(toml_str).map(Lexicon::Polarity),
            LexiconKind::Valence => ValenceLexicon::from_toml_str(toml_str).map(Lexicon::Valence),
        }
    }

    /// Read a table of either kind from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_toml_str(&read_table(path)?)
    }

    /// Metadata of the table
    pub fn metadata(&self) -> &Metadata {
        match self {
            Lexicon::Polarity(table) => &table.metadata,
            Lexicon::Valence(table) => &table.metadata,
        }
    }

    /// Number of scored words
    pub fn word_count(&self) -> usize {
        match self {
            Lexicon::Polarity(table) => table.words.len(),
            Lexicon::Valence(table) => table.words.len(),
        }
    }
}

fn read_table(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CoreError::LexiconIo {
        path: path.display().to_string(),
        source,
    })
}

fn expect_kind(metadata: &Metadata, expected: LexiconKind) -> Result<()> {
    if metadata.code.trim().is_empty() {
        return Err(CoreError::InvalidLexicon(
            "metadata.code must not be empty".to_string(),
        ));
    }
    if metadata.kind != expected {
        return Err(CoreError::InvalidLexicon(format!(
            "expected a {expected:?} lexicon, found {:?}",
            metadata.kind
        )));
    }
    Ok(())
}

fn lowercase_keys<V>(map: HashMap<String, V>) -> HashMap<String, V> {
    map.into_iter()
        .map(|(key, value)| (key.to_lowercase(), value))
        .collect()
}

fn lowercase_all(words: &mut [String]) {
    for word in words.iter_mut() {
        *word = word.to_lowercase();
    }
}
