//! Lexical tagger boundary
//!
//! The engine does not tag parts of speech itself. Callers plug in a
//! [`LexicalTagger`]; two simple ones ship here, a lexicon lookup and a
//! table of precomputed answers for callers whose tagger is asynchronous.

use crate::error::{CollaboratorError, ConfigError};
use crate::rules::{LanguageRules, LexiconEntry};
use crate::types::{LexicalClass, LexicalType, Span, Token};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Answer for one token
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagResult {
    pub class: Option<LexicalClass>,
    pub lemma: Option<String>,
}

impl TagResult {
    /// Result with a class and optional lemma
    pub fn new(class: LexicalClass, lemma: Option<&str>) -> Self {
        Self {
            class: Some(class),
            lemma: lemma.map(str::to_string),
        }
    }
}

/// Externally supplied part-of-speech capability
pub trait LexicalTagger: Send + Sync {
    /// Tag the token `text` found at `span` of the analyzed source
    fn tag(&self, text: &str, span: Span) -> Result<TagResult, CollaboratorError>;
}

/// Outcome of running the adapter over a token stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaggingReport {
    pub tagged: usize,
    pub failures: usize,
}

impl TaggingReport {
    /// Whether any tagger call failed
    pub fn degraded(&self) -> bool {
        self.failures > 0
    }
}

/// Apply `tagger` to every word token in place.
///
/// Only tokens the tokenizer typed as `word` are sent. Without a tagger,
/// and for every token whose tagger call fails or answers with no class,
/// the token becomes `unknown`. Failures are logged, never propagated.
pub fn apply_tagger(tokens: &mut [Token], tagger: Option<&dyn LexicalTagger>) -> TaggingReport {
    let mut report = TaggingReport::default();
    for token in tokens.iter_mut().filter(|t| t.kind == LexicalType::Word) {
        let Some(tagger) = tagger else {
            token.kind = LexicalType::Unknown;
            continue;
        };
        match tagger.tag(&token.text, token.span) {
            Ok(TagResult { class, lemma }) => {
                token.kind = class.map_or(LexicalType::Unknown, LexicalType::from);
                token.metadata.lemma = lemma;
                report.tagged += 1;
            }
            Err(e) => {
                log::warn!(
                    "Tagger failed on `{}` at {}..{}: {e}",
                    token.text,
                    token.span.start,
                    token.span.end
                );
                token.kind = LexicalType::Unknown;
                report.failures += 1;
            }
        }
    }
    report
}

/// Case-insensitive word list tagger
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    entries: HashMap<String, LexiconEntry>,
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    lexicon: BTreeMap<String, LexiconEntry>,
}

impl LexiconTagger {
    /// Tagger over explicit entries
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, LexiconEntry)>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(word, entry)| (word.as_ref().to_lowercase(), entry))
                .collect(),
        }
    }

    /// Tagger over the `[lexicon]` section of a language table
    pub fn from_rules(rules: &LanguageRules) -> Self {
        Self::new(rules.lexicon().iter().map(|(w, e)| (w.as_str(), e.clone())))
    }

    /// Parse a TOML document with a `[lexicon]` table
    pub fn from_toml_str(content: &str, source_name: &str) -> Result<Self, ConfigError> {
        let file: LexiconFile = toml::from_str(content).map_err(|e| ConfigError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::new(file.lexicon))
    }

    /// Load a lexicon file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Add entries; later ones override earlier ones
    pub fn extend(&mut self, other: LexiconTagger) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LexicalTagger for LexiconTagger {
    fn tag(&self, text: &str, _span: Span) -> Result<TagResult, CollaboratorError> {
        let key = text.to_lowercase();
        Ok(match self.entries.get(&key) {
            Some(entry) => TagResult {
                class: Some(entry.class),
                lemma: Some(entry.lemma.clone().unwrap_or(key)),
            },
            None => TagResult::default(),
        })
    }
}

/// Answers collected ahead of time, keyed by byte span.
///
/// Lets a caller await an out-of-process tagger first and then run the
/// synchronous engine over the results.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedTags {
    tags: HashMap<Span, TagResult>,
}

impl PrecomputedTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the answer for `span`
    pub fn insert(&mut self, span: Span, result: TagResult) {
        self.tags.insert(span, result);
    }
}

impl FromIterator<(Span, TagResult)> for PrecomputedTags {
    fn from_iter<I: IntoIterator<Item = (Span, TagResult)>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl LexicalTagger for PrecomputedTags {
    fn tag(&self, _text: &str, span: Span) -> Result<TagResult, CollaboratorError> {
        Ok(self.tags.get(&span).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special::SpecialTokenClassifier;
    use crate::tokenizer::Tokenizer;

    struct FailingTagger;

    impl LexicalTagger for FailingTagger {
        fn tag(&self, text: &str, _span: Span) -> Result<TagResult, CollaboratorError> {
            if text == "boom" {
                Err(CollaboratorError::TimedOut)
            } else {
                Ok(TagResult::new(LexicalClass::Noun, None))
            }
        }
    }

    fn tokens(text: &str) -> Vec<Token> {
        let special = SpecialTokenClassifier::builtin().unwrap();
        Tokenizer::new(&special).tokenize(text).collect()
    }

    #[test]
    fn test_no_tagger_marks_words_unknown() {
        let mut toks = tokens("two cats, 3 dogs");
        let report = apply_tagger(&mut toks, None);
        assert_eq!(report, TaggingReport::default());
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LexicalType::Unknown,
                LexicalType::Whitespace,
                LexicalType::Unknown,
                LexicalType::Punctuation,
                LexicalType::Whitespace,
                LexicalType::Number,
                LexicalType::Whitespace,
                LexicalType::Unknown,
            ]
        );
    }

    #[test]
    fn test_failure_degrades_single_token() {
        let mut toks = tokens("boom table");
        let report = apply_tagger(&mut toks, Some(&FailingTagger));
        assert_eq!(report.failures, 1);
        assert_eq!(report.tagged, 1);
        assert!(report.degraded());
        assert_eq!(toks[0].kind, LexicalType::Unknown);
        assert_eq!(toks[2].kind, LexicalType::Noun);
    }

    #[test]
    fn test_lexicon_tagger_lookup_is_case_insensitive() {
        let tagger = LexiconTagger::new([(
            "Suis",
            LexiconEntry {
                class: LexicalClass::Verb,
                lemma: Some("être".to_string()),
            },
        )]);
        let hit = tagger.tag("SUIS", Span::new(0, 4)).unwrap();
        assert_eq!(hit, TagResult::new(LexicalClass::Verb, Some("être")));
        assert_eq!(tagger.tag("xyz", Span::new(0, 3)).unwrap(), TagResult::default());
    }

    #[test]
    fn test_lexicon_tagger_from_toml() {
        let tagger = LexiconTagger::from_toml_str(
            "[lexicon]\nchats = { class = \"noun\", lemma = \"chat\" }\nrouge = { class = \"adjective\" }\n",
            "inline",
        )
        .unwrap();
        assert_eq!(tagger.len(), 2);
        let rouge = tagger.tag("rouge", Span::new(0, 5)).unwrap();
        assert_eq!(rouge.lemma.as_deref(), Some("rouge"));
    }

    #[test]
    fn test_precomputed_tags_by_span() {
        let mut toks = tokens("il parle");
        let tags: PrecomputedTags = [(
            Span::new(3, 8),
            TagResult::new(LexicalClass::Verb, Some("parler")),
        )]
        .into_iter()
        .collect();
        apply_tagger(&mut toks, Some(&tags));
        assert_eq!(toks[0].kind, LexicalType::Unknown);
        assert_eq!(toks[2].kind, LexicalType::Verb);
        assert_eq!(toks[2].lemma(), Some("parler"));
    }
}
