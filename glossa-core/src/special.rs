//! Special-token detection
//!
//! Pattern tables for spans that word segmentation gets wrong or that carry
//! meaning of their own: URLs, emails, dates, repeated terminal punctuation,
//! currency amounts, numbers and emoji. The classifier does not depend on
//! part-of-speech tagging.

use crate::error::ConfigError;
use crate::rules::SPECIAL_TOKENS_CONFIG;
use crate::types::{LexicalType, Span};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

/// Kind of special span
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialCategory {
    /// Integer, decimal or scientific-notation number
    Number,
    /// Email address
    Email,
    /// http(s) URL
    Url,
    /// Calendar date with ASCII or CJK separators
    DateTime,
    /// Two or more consecutive `!`/`?`
    RepeatedPunctuation,
    /// Emoji sequence
    Emoji,
    /// Currency symbol followed by an amount
    Currency,
}

impl SpecialCategory {
    /// Token type used when this category covers a whole token
    pub fn lexical_type(&self) -> LexicalType {
        match self {
            SpecialCategory::Number | SpecialCategory::Currency => LexicalType::Number,
            SpecialCategory::Email => LexicalType::Email,
            SpecialCategory::Url => LexicalType::Url,
            SpecialCategory::DateTime => LexicalType::DateTime,
            SpecialCategory::RepeatedPunctuation => LexicalType::Punctuation,
            SpecialCategory::Emoji => LexicalType::Emoji,
        }
    }

    /// Name as written in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialCategory::Number => "number",
            SpecialCategory::Email => "email",
            SpecialCategory::Url => "url",
            SpecialCategory::DateTime => "dateTime",
            SpecialCategory::RepeatedPunctuation => "repeatedPunctuation",
            SpecialCategory::Emoji => "emoji",
            SpecialCategory::Currency => "currency",
        }
    }
}

impl fmt::Display for SpecialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialMatch {
    pub category: SpecialCategory,
    pub span: Span,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct SpecialTokensConfig {
    patterns: Vec<SpecialPatternEntry>,
}

#[derive(Debug, Deserialize)]
struct SpecialPatternEntry {
    category: SpecialCategory,
    pattern: String,
    #[serde(default)]
    atomic: bool,
}

#[derive(Debug, Clone)]
struct SpecialPattern {
    category: SpecialCategory,
    regex: Regex,
    // Full-token variant used by `classify`
    anchored: Regex,
    atomic: bool,
}

/// Compiled special-token tables.
///
/// Table order is precedence: when matches of two categories overlap, the
/// one listed first is kept.
#[derive(Debug, Clone)]
pub struct SpecialTokenClassifier {
    patterns: Vec<SpecialPattern>,
}

impl SpecialTokenClassifier {
    /// Classifier over the embedded tables
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(SPECIAL_TOKENS_CONFIG, "embedded special token config")
    }

    /// Parse and compile a table
    pub fn from_toml_str(content: &str, source_name: &str) -> Result<Self, ConfigError> {
        let config: SpecialTokensConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;

        let patterns = config
            .patterns
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let invalid = |e: regex::Error| ConfigError::InvalidPattern {
                    table: "special_tokens".to_string(),
                    index,
                    pattern: entry.pattern.clone(),
                    source: Box::new(e),
                };
                let regex = Regex::new(&entry.pattern).map_err(invalid)?;
                let anchored = Regex::new(&format!("^(?:{})$", entry.pattern)).map_err(invalid)?;
                Ok(SpecialPattern {
                    category: entry.category,
                    regex,
                    anchored,
                    atomic: entry.atomic,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self { patterns })
    }

    /// Load a table from disk
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// All special spans in `text`, ordered by position.
    ///
    /// A match overlapping one from an earlier table entry is dropped, so a
    /// date is not also reported as three numbers.
    pub fn scan(&self, text: &str) -> Vec<SpecialMatch> {
        // Accepted matches are disjoint, keyed by start offset
        let mut accepted: BTreeMap<usize, SpecialMatch> = BTreeMap::new();
        for pattern in &self.patterns {
            for m in pattern.regex.find_iter(text) {
                if m.as_str().is_empty() {
                    continue;
                }
                let span = Span::new(m.start(), m.end());
                // Only the last match starting before `span.end` can overlap it
                let blocked = accepted
                    .range(..span.end)
                    .next_back()
                    .is_some_and(|(_, a)| a.span.overlaps(&span));
                if blocked {
                    continue;
                }
                accepted.insert(
                    span.start,
                    SpecialMatch {
                        category: pattern.category,
                        span,
                        text: m.as_str().to_string(),
                    },
                );
            }
        }
        accepted.into_values().collect()
    }

    /// Set of categories present anywhere in `text`
    pub fn categories(&self, text: &str) -> BTreeSet<SpecialCategory> {
        self.scan(text).into_iter().map(|m| m.category).collect()
    }

    /// Category whose pattern covers the whole of `token`, by table order
    pub fn classify(&self, token: &str) -> Option<SpecialCategory> {
        if token.is_empty() {
            return None;
        }
        self.patterns
            .iter()
            .find(|p| p.anchored.is_match(token))
            .map(|p| p.category)
    }

    /// Non-overlapping matches the tokenizer must keep whole
    pub fn atomic_matches(&self, text: &str) -> Vec<SpecialMatch> {
        let atomic: BTreeSet<SpecialCategory> = self
            .patterns
            .iter()
            .filter(|p| p.atomic)
            .map(|p| p.category)
            .collect();
        self.scan(text)
            .into_iter()
            .filter(|m| atomic.contains(&m.category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> SpecialTokenClassifier {
        SpecialTokenClassifier::builtin().expect("embedded special token table")
    }

    #[test]
    fn test_email_and_url_in_sentence() {
        let text = "Contact me at a@b.com or see https://x.com today.";
        let matches = classifier().scan(text);

        let emails: Vec<_> = matches
            .iter()
            .filter(|m| m.category == SpecialCategory::Email)
            .collect();
        let urls: Vec<_> = matches
            .iter()
            .filter(|m| m.category == SpecialCategory::Url)
            .collect();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].text, "a@b.com");
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].text, "https://x.com");
    }

    #[test]
    fn test_url_does_not_swallow_trailing_period() {
        let matches = classifier().scan("Visit https://example.org/docs.");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "https://example.org/docs");
    }

    #[test]
    fn test_numbers_with_scientific_notation() {
        let matches = classifier().scan("Values: 42, -3.5 and 6.02e23");
        let texts: Vec<_> = matches.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["42", "-3.5", "6.02e23"]);
        assert!(matches.iter().all(|m| m.category == SpecialCategory::Number));
    }

    #[test]
    fn test_dates_shadow_numbers() {
        let c = classifier();
        let matches = c.scan("Due 2024-03-15 or 2024年3月15日");
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.category == SpecialCategory::DateTime));
        assert_eq!(matches[1].text, "2024年3月15日");
    }

    #[test]
    fn test_scan_many_matches_in_order() {
        let c = classifier();
        let text = "1 ".repeat(100_000);
        let matches = c.scan(&text);
        assert_eq!(matches.len(), 100_000);
        assert!(matches.iter().all(|m| m.category == SpecialCategory::Number));
        assert!(matches.windows(2).all(|w| w[0].span.end <= w[1].span.start));
        assert_eq!(matches[99_999].span, Span::new(199_998, 199_999));
    }

    #[test]
    fn test_scan_keeps_earlier_pattern_on_overlap() {
        let c = classifier();
        let text = "See https://x.io/a1 and 2024-03-15, then 7.";
        let matches = c.scan(text);
        let cats: Vec<_> = matches.iter().map(|m| m.category).collect();
        assert_eq!(
            cats,
            vec![
                SpecialCategory::Url,
                SpecialCategory::DateTime,
                SpecialCategory::Number
            ]
        );
        assert_eq!(matches[2].text, "7");
    }

    #[test]
    fn test_repeated_punctuation() {
        let c = classifier();
        assert_eq!(
            c.categories("Really?!"),
            BTreeSet::from([SpecialCategory::RepeatedPunctuation])
        );
        assert!(c.categories("Really?").is_empty());
        assert_eq!(c.classify("！？"), Some(SpecialCategory::RepeatedPunctuation));
    }

    #[test]
    fn test_emoji_and_currency() {
        let cats = classifier().categories("It costs €12.50 🎉");
        assert!(cats.contains(&SpecialCategory::Currency));
        assert!(cats.contains(&SpecialCategory::Emoji));
        assert!(!cats.contains(&SpecialCategory::Number));
    }

    #[test]
    fn test_classify_requires_full_cover() {
        let c = classifier();
        assert_eq!(c.classify("3.14"), Some(SpecialCategory::Number));
        assert_eq!(c.classify("a@b.com"), Some(SpecialCategory::Email));
        assert_eq!(c.classify("abc3"), None);
        assert_eq!(c.classify(""), None);
    }

    #[test]
    fn test_atomic_matches_exclude_numbers() {
        let text = "Mail a@b.com 42 times!!";
        let matches = classifier().atomic_matches(text);
        let texts: Vec<_> = matches.iter().map(|m| &text[m.span.range()]).collect();
        assert_eq!(texts, vec!["a@b.com", "!!"]);
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let toml = "[[patterns]]\ncategory = \"number\"\npattern = '[0-9'\n";
        assert!(matches!(
            SpecialTokenClassifier::from_toml_str(toml, "inline"),
            Err(ConfigError::InvalidPattern { index: 0, .. })
        ));
    }
}
