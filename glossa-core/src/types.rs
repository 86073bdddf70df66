//! Core value types shared across the pipeline

use crate::special::SpecialCategory;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::Range;

/// Languages with loaded rule tables.
///
/// Variant order is the tie-break order used when two languages score the
/// same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    English,
    /// French
    French,
}

impl Language {
    /// Every supported language, in tie-break order
    pub const ALL: [Language; 2] = [Language::English, Language::French];

    /// Look a language up by ISO code or English name
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Some(Language::English),
            "fr" | "fra" | "fre" | "french" => Some(Language::French),
            _ => None,
        }
    }

    /// Get the language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
        }
    }

    /// Get the full language name
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "French",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Language reported by detection.
///
/// Hypothesis sources may name languages without a rule table; those are
/// kept as `Other` so the dominant language is never misreported. Supported
/// languages sort before other codes, so they win ties.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum DetectedLanguage {
    /// Language with a rule table
    Supported(Language),
    /// Lower-cased code of a language without one
    Other(String),
}

impl DetectedLanguage {
    /// Resolve a hypothesis code; `None` for a blank code
    pub fn from_code(code: &str) -> Option<Self> {
        if let Some(language) = Language::from_code(code) {
            return Some(DetectedLanguage::Supported(language));
        }
        let code = code.trim().to_lowercase();
        (!code.is_empty()).then_some(DetectedLanguage::Other(code))
    }

    pub fn code(&self) -> &str {
        match self {
            DetectedLanguage::Supported(language) => language.code(),
            DetectedLanguage::Other(code) => code,
        }
    }

    /// The rule-table language, if there is one
    pub fn supported(&self) -> Option<Language> {
        match self {
            DetectedLanguage::Supported(language) => Some(*language),
            DetectedLanguage::Other(_) => None,
        }
    }
}

impl From<Language> for DetectedLanguage {
    fn from(language: Language) -> Self {
        DetectedLanguage::Supported(language)
    }
}

impl PartialEq<Language> for DetectedLanguage {
    fn eq(&self, other: &Language) -> bool {
        self.supported() == Some(*other)
    }
}

impl fmt::Display for DetectedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectedLanguage::Supported(language) => write!(f, "{language}"),
            DetectedLanguage::Other(code) => f.write_str(code),
        }
    }
}

impl<'de> Deserialize<'de> for DetectedLanguage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        DetectedLanguage::from_code(&code).ok_or_else(|| de::Error::custom("empty language code"))
    }
}

/// Coarse part of speech reported by a lexical tagger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LexicalClass {
    /// Noun
    Noun,
    /// Verb
    Verb,
    /// Adjective
    Adjective,
    /// Adverb
    Adverb,
    /// Pronoun
    Pronoun,
    /// Determiner
    Determiner,
    /// Particle
    Particle,
    /// Preposition
    Preposition,
    /// Number
    Number,
    /// Conjunction
    Conjunction,
    /// Interjection
    Interjection,
}

/// Type assigned to a token in the final token stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LexicalType {
    /// Noun
    Noun,
    /// Verb
    Verb,
    /// Adjective
    Adjective,
    /// Adverb
    Adverb,
    /// Pronoun
    Pronoun,
    /// Determiner
    Determiner,
    /// Particle
    Particle,
    /// Preposition
    Preposition,
    /// Numeric literal
    Number,
    /// Conjunction
    Conjunction,
    /// Interjection
    Interjection,
    /// Word the tagger could not place in a class
    Word,
    /// Run of whitespace
    Whitespace,
    /// Punctuation or symbol run
    Punctuation,
    /// Email address
    Email,
    /// URL
    Url,
    /// Date expression
    DateTime,
    /// Emoji sequence
    Emoji,
    /// Not classified (no tagger, or the tagger failed)
    Unknown,
}

impl LexicalType {
    /// Whether the token carries lexical content (as opposed to layout)
    pub fn is_lexical(&self) -> bool {
        !matches!(self, LexicalType::Whitespace | LexicalType::Punctuation)
    }

    /// Whether a tagger assigned this type
    pub fn is_tagged_class(&self) -> bool {
        matches!(
            self,
            LexicalType::Noun
                | LexicalType::Verb
                | LexicalType::Adjective
                | LexicalType::Adverb
                | LexicalType::Pronoun
                | LexicalType::Determiner
                | LexicalType::Particle
                | LexicalType::Preposition
                | LexicalType::Conjunction
                | LexicalType::Interjection
        )
    }

    /// Serialized name
    pub fn as_str(&self) -> &'static str {
        match self {
            LexicalType::Noun => "noun",
            LexicalType::Verb => "verb",
            LexicalType::Adjective => "adjective",
            LexicalType::Adverb => "adverb",
            LexicalType::Pronoun => "pronoun",
            LexicalType::Determiner => "determiner",
            LexicalType::Particle => "particle",
            LexicalType::Preposition => "preposition",
            LexicalType::Number => "number",
            LexicalType::Conjunction => "conjunction",
            LexicalType::Interjection => "interjection",
            LexicalType::Word => "word",
            LexicalType::Whitespace => "whitespace",
            LexicalType::Punctuation => "punctuation",
            LexicalType::Email => "email",
            LexicalType::Url => "url",
            LexicalType::DateTime => "dateTime",
            LexicalType::Emoji => "emoji",
            LexicalType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LexicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LexicalClass> for LexicalType {
    fn from(class: LexicalClass) -> Self {
        match class {
            LexicalClass::Noun => LexicalType::Noun,
            LexicalClass::Verb => LexicalType::Verb,
            LexicalClass::Adjective => LexicalType::Adjective,
            LexicalClass::Adverb => LexicalType::Adverb,
            LexicalClass::Pronoun => LexicalType::Pronoun,
            LexicalClass::Determiner => LexicalType::Determiner,
            LexicalClass::Particle => LexicalType::Particle,
            LexicalClass::Preposition => LexicalType::Preposition,
            LexicalClass::Number => LexicalType::Number,
            LexicalClass::Conjunction => LexicalType::Conjunction,
            LexicalClass::Interjection => LexicalType::Interjection,
        }
    }
}

/// Half-open range `[start, end)` into a source string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start
    pub start: usize,
    /// Exclusive end
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} after end {end}");
        Self { start, end }
    }

    /// Length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether two spans share at least one position
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely inside this span
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// As a `Range` for slicing
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

/// Typed metadata attached to a token
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Dictionary form reported by the tagger
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    /// Special-token category that covers the whole token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<SpecialCategory>,
}

/// Minimal unit of text with its position in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Exact source text
    pub text: String,
    /// Assigned type
    #[serde(rename = "type")]
    pub kind: LexicalType,
    /// Byte range in the source
    pub span: Span,
    /// Character (Unicode scalar) range in the source
    pub char_span: Span,
    /// Lemma and special-token data
    #[serde(default)]
    pub metadata: TokenMetadata,
}

impl Token {
    /// Whether the token is whitespace only
    pub fn is_whitespace(&self) -> bool {
        self.kind == LexicalType::Whitespace
    }

    /// Lemma, if the tagger reported one
    pub fn lemma(&self) -> Option<&str> {
        self.metadata.lemma.as_deref()
    }
}
