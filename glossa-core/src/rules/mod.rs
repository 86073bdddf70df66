//! Ordered pattern rule tables
//!
//! A [`RuleTable`] is a list of `(pattern, outcome)` pairs evaluated in order;
//! the first pattern that matches decides the outcome. There is no best or
//! longest match search, so tables are written most specific first.
//!
//! Tables are append-only while a [`RuleSetBuilder`] is being filled and
//! immutable once [`RuleSetBuilder::build`] returns. A built [`RuleSet`] is
//! meant to be wrapped in an `Arc` and shared by every analysis call.

mod config;
mod loader;

pub use config::{
    DetectionConfig, LanguageConfig, LexiconEntry, MetadataConfig, MorphologyConfig,
    PhraseEntry, RuleEntry, TokenizerConfig,
};
pub use loader::{embedded_source, list_available_languages, load_embedded_config};
pub(crate) use loader::SPECIAL_TOKENS_CONFIG;

use crate::error::ConfigError;
use crate::morphology::{AdjectiveFeatures, NominalFeatures, VerbFeatures};
use crate::patterns::PatternCategory;
use crate::types::Language;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, OnceLock};

static BUILTIN_RULES: OnceLock<Arc<RuleSet>> = OnceLock::new();

/// A compiled pattern and the outcome it assigns
#[derive(Debug, Clone)]
pub struct Rule<T> {
    pattern: Regex,
    outcome: T,
}

impl<T> Rule<T> {
    /// Source text of the pattern
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Outcome assigned on a match
    pub fn outcome(&self) -> &T {
        &self.outcome
    }
}

/// Result of evaluating a table
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch<'a, T> {
    /// Position of the winning rule
    pub index: usize,
    /// Outcome of the winning rule
    pub outcome: &'a T,
    /// Distinct outcomes of later rules with the identical pattern
    pub alternatives: Vec<&'a T>,
}

/// Ordered, first-match-wins rule list
#[derive(Debug, Clone)]
pub struct RuleTable<T> {
    name: String,
    rules: Vec<Rule<T>>,
    // rule index -> later rules sharing its exact pattern text
    same_pattern: Vec<Vec<usize>>,
}

impl<T: PartialEq> RuleTable<T> {
    /// Create an empty table; `name` appears in error messages
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            same_pattern: Vec::new(),
        }
    }

    /// Compile every entry in order
    pub fn from_entries<I>(name: impl Into<String>, entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, T)>,
    {
        let mut table = Self::new(name);
        for (pattern, outcome) in entries {
            table.push(&pattern, outcome)?;
        }
        Ok(table)
    }

    /// Append a rule at the end of the table
    pub fn push(&mut self, pattern: &str, outcome: T) -> Result<&mut Self, ConfigError> {
        let index = self.rules.len();
        let compiled = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            table: self.name.clone(),
            index,
            pattern: pattern.to_string(),
            source: Box::new(e),
        })?;

        for (earlier, rule) in self.rules.iter().enumerate() {
            if rule.pattern.as_str() == pattern {
                self.same_pattern[earlier].push(index);
            }
        }
        self.rules.push(Rule {
            pattern: compiled,
            outcome,
        });
        self.same_pattern.push(Vec::new());
        Ok(self)
    }

    /// First rule matching `candidate`, if any
    pub fn first_match(&self, candidate: &str) -> Option<RuleMatch<'_, T>> {
        let index = self
            .rules
            .iter()
            .position(|rule| rule.pattern.is_match(candidate))?;
        Some(self.build_match(index))
    }

    /// Every matching rule in table order
    pub fn matches<'a>(&'a self, candidate: &'a str) -> impl Iterator<Item = RuleMatch<'a, T>> + 'a {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, rule)| rule.pattern.is_match(candidate))
            .map(move |(index, _)| self.build_match(index))
    }

    fn build_match(&self, index: usize) -> RuleMatch<'_, T> {
        let outcome = &self.rules[index].outcome;
        let mut alternatives: Vec<&T> = Vec::new();
        for &later in &self.same_pattern[index] {
            let candidate = &self.rules[later].outcome;
            if candidate != outcome && !alternatives.contains(&candidate) {
                alternatives.push(candidate);
            }
        }
        RuleMatch {
            index,
            outcome,
            alternatives,
        }
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = &Rule<T>> {
        self.rules.iter()
    }
}

/// Grammatical category a table classifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Verbs
    Verb,
    /// Nouns and pronouns
    Noun,
    /// Adjectives
    Adjective,
}

/// Outcome of [`RuleSet::evaluate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Verb features
    Verb(VerbFeatures),
    /// Noun features
    Nominal(NominalFeatures),
    /// Adjective features
    Adjective(AdjectiveFeatures),
}

/// Compiled idiom or common-phrase matcher
#[derive(Debug, Clone)]
pub struct PhraseRule {
    pub label: String,
    pub category: PatternCategory,
    pub pattern: Regex,
}

/// All compiled tables for one language
#[derive(Debug, Clone)]
pub struct LanguageRules {
    language: Language,
    name: String,
    verbs: RuleTable<VerbFeatures>,
    nouns: RuleTable<NominalFeatures>,
    adjectives: RuleTable<AdjectiveFeatures>,
    phrases: Vec<PhraseRule>,
    irregular_verbs: HashSet<String>,
    regular_suffixes: Vec<String>,
    elisions: Vec<String>,
    indicators: HashSet<String>,
    bonus_chars: Vec<char>,
    lexicon: HashMap<String, LexiconEntry>,
}

impl LanguageRules {
    /// Compile a parsed configuration
    pub fn from_config(config: &LanguageConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let language = config.language()?;
        let code = language.code();

        let verbs = RuleTable::from_entries(
            format!("{code}.verbs"),
            config.verbs.iter().map(|e| (e.pattern.clone(), e.features)),
        )?;
        let nouns = RuleTable::from_entries(
            format!("{code}.nouns"),
            config.nouns.iter().map(|e| (e.pattern.clone(), e.features)),
        )?;
        let adjectives = RuleTable::from_entries(
            format!("{code}.adjectives"),
            config.adjectives.iter().map(|e| (e.pattern.clone(), e.features)),
        )?;

        let phrases = config
            .phrases
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Regex::new(&entry.pattern)
                    .map(|pattern| PhraseRule {
                        label: entry.label.clone(),
                        category: entry.category,
                        pattern,
                    })
                    .map_err(|e| ConfigError::InvalidPattern {
                        table: format!("{code}.phrases"),
                        index,
                        pattern: entry.pattern.clone(),
                        source: Box::new(e),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Longest prefix first so `qu'` is tried before shorter elisions
        let mut elisions: Vec<String> = config
            .tokenizer
            .elisions
            .iter()
            .map(|e| e.to_lowercase())
            .collect();
        elisions.sort_by_key(|e| std::cmp::Reverse(e.chars().count()));

        let rules = Self {
            language,
            name: config.metadata.name.clone(),
            verbs,
            nouns,
            adjectives,
            phrases,
            irregular_verbs: config
                .morphology
                .irregular_verbs
                .iter()
                .map(|v| v.to_lowercase())
                .collect(),
            regular_suffixes: config.morphology.regular_suffixes.clone(),
            elisions,
            indicators: config
                .detection
                .indicators
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            bonus_chars: config.detection.bonus_chars.chars().collect(),
            lexicon: config
                .lexicon
                .iter()
                .map(|(word, entry)| (word.to_lowercase(), entry.clone()))
                .collect(),
        };

        log::debug!(
            "Compiled {} rules: {} verb, {} noun, {} adjective, {} phrase",
            rules.name,
            rules.verbs.len(),
            rules.nouns.len(),
            rules.adjectives.len(),
            rules.phrases.len()
        );
        Ok(rules)
    }

    /// Parse and compile a TOML rule table
    pub fn from_toml_str(content: &str, source_name: &str) -> Result<Self, ConfigError> {
        Self::from_config(&LanguageConfig::from_toml_str(content, source_name)?)
    }

    /// Load and compile a TOML rule table from disk
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Compile the embedded table for `language`
    pub fn embedded(language: Language) -> Result<Self, ConfigError> {
        Self::from_config(&load_embedded_config(language)?)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn verbs(&self) -> &RuleTable<VerbFeatures> {
        &self.verbs
    }

    pub fn nouns(&self) -> &RuleTable<NominalFeatures> {
        &self.nouns
    }

    pub fn adjectives(&self) -> &RuleTable<AdjectiveFeatures> {
        &self.adjectives
    }

    pub fn phrases(&self) -> &[PhraseRule] {
        &self.phrases
    }

    /// Elision prefixes, longest first
    pub fn elisions(&self) -> &[String] {
        &self.elisions
    }

    pub fn lexicon(&self) -> &HashMap<String, LexiconEntry> {
        &self.lexicon
    }

    pub fn is_indicator(&self, word: &str) -> bool {
        self.indicators.contains(word)
    }

    pub fn is_bonus_char(&self, c: char) -> bool {
        self.bonus_chars.contains(&c)
    }

    /// Whether `lemma` is on the curated irregular list
    pub fn is_irregular(&self, lemma: &str) -> bool {
        self.irregular_verbs.contains(&lemma.to_lowercase())
    }

    /// Regularity heuristic.
    ///
    /// A verb counts as regular when its lemma is known, ends in one of the
    /// language's regular endings (any ending when none are configured) and
    /// is absent from the irregular list. This approximates conjugation
    /// class from spelling; it is not a grammatical test.
    pub fn is_regular_lemma(&self, lemma: Option<&str>) -> bool {
        let Some(lemma) = lemma.map(str::trim).filter(|l| !l.is_empty()) else {
            return false;
        };
        let lemma = lemma.to_lowercase();
        let suffix_ok = self.regular_suffixes.is_empty()
            || self.regular_suffixes.iter().any(|s| lemma.ends_with(s.as_str()));
        suffix_ok && !self.irregular_verbs.contains(&lemma)
    }
}

/// Rule tables for every configured language
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    languages: BTreeMap<Language, LanguageRules>,
}

impl RuleSet {
    /// Start an empty builder
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::new()
    }

    /// The embedded English and French tables.
    ///
    /// Compiled on first use and shared afterwards.
    pub fn builtin() -> Result<Arc<RuleSet>, ConfigError> {
        if let Some(rules) = BUILTIN_RULES.get() {
            return Ok(Arc::clone(rules));
        }
        let rules = Arc::new(RuleSetBuilder::with_builtin()?.build());
        log::info!(
            "Loaded built-in rule tables for {} languages",
            rules.languages.len()
        );
        Ok(Arc::clone(BUILTIN_RULES.get_or_init(|| rules)))
    }

    /// Tables for `language`, if loaded
    pub fn get(&self, language: Language) -> Option<&LanguageRules> {
        self.languages.get(&language)
    }

    /// Loaded languages in tie-break order
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.languages.keys().copied()
    }

    /// Evaluate `candidate` against the (language, category) table.
    ///
    /// Returns `None` when the language has no tables or no rule matches.
    pub fn evaluate(
        &self,
        language: Language,
        category: Category,
        candidate: &str,
    ) -> Option<Classification> {
        let rules = self.get(language)?;
        match category {
            Category::Verb => rules
                .verbs
                .first_match(candidate)
                .map(|m| Classification::Verb(*m.outcome)),
            Category::Noun => rules
                .nouns
                .first_match(candidate)
                .map(|m| Classification::Nominal(*m.outcome)),
            Category::Adjective => rules
                .adjectives
                .first_match(candidate)
                .map(|m| Classification::Adjective(*m.outcome)),
        }
    }
}

/// Collects language tables before freezing them into a [`RuleSet`]
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    languages: BTreeMap<Language, LanguageRules>,
}

impl RuleSetBuilder {
    /// Empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded with every embedded table
    pub fn with_builtin() -> Result<Self, ConfigError> {
        let mut builder = Self::new();
        for language in list_available_languages() {
            builder = builder.language(LanguageRules::embedded(language)?);
        }
        Ok(builder)
    }

    /// Add tables, replacing any already present for the same language
    pub fn language(mut self, rules: LanguageRules) -> Self {
        if self.languages.contains_key(&rules.language) {
            log::info!("Replacing {} rule tables", rules.name);
        }
        self.languages.insert(rules.language, rules);
        self
    }

    /// Load a TOML table from disk and add it
    pub fn language_file(self, path: &Path) -> Result<Self, ConfigError> {
        Ok(self.language(LanguageRules::from_file(path)?))
    }

    /// Freeze the tables
    pub fn build(self) -> RuleSet {
        RuleSet {
            languages: self.languages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::{Gender, Mood, Number, Person, Tense};

    fn verb(tense: Tense, person: Person, number: Number) -> VerbFeatures {
        VerbFeatures {
            tense,
            person,
            number,
            mood: Mood::Indicative,
        }
    }

    #[test]
    fn test_first_match_wins_over_longer_match() {
        let mut table = RuleTable::new("test");
        table
            .push(r"(\w+)s$", verb(Tense::Present, Person::First, Number::Singular))
            .unwrap();
        table
            .push(r"(\w+)ons$", verb(Tense::Present, Person::First, Number::Plural))
            .unwrap();

        let m = table.first_match("parlons").unwrap();
        assert_eq!(m.index, 0);
        assert_eq!(m.outcome.number, Number::Singular);
    }

    #[test]
    fn test_reordering_changes_result_predictably() {
        let a = verb(Tense::Present, Person::First, Number::Singular);
        let b = verb(Tense::Present, Person::First, Number::Plural);
        let forward =
            RuleTable::from_entries("fwd", [(r"(\w+)s$".to_string(), a), (r"(\w+)ons$".to_string(), b)])
                .unwrap();
        let reversed =
            RuleTable::from_entries("rev", [(r"(\w+)ons$".to_string(), b), (r"(\w+)s$".to_string(), a)])
                .unwrap();

        assert_eq!(forward.first_match("parlons").unwrap().outcome, &a);
        assert_eq!(reversed.first_match("parlons").unwrap().outcome, &b);
        // Only one rule applies, so order does not matter
        assert_eq!(forward.first_match("parlais").unwrap().outcome, &a);
        assert_eq!(reversed.first_match("parlais").unwrap().outcome, &a);
    }

    #[test]
    fn test_no_match_returns_none() {
        let table =
            RuleTable::from_entries("t", [(r"(\w+)ez$".to_string(), Gender::Feminine)]).unwrap();
        assert!(table.first_match("maison").is_none());
        assert_eq!(table.matches("maison").count(), 0);
    }

    #[test]
    fn test_identical_patterns_become_alternatives() {
        let first = verb(Tense::Present, Person::First, Number::Singular);
        let second = verb(Tense::Present, Person::Second, Number::Singular);
        let table = RuleTable::from_entries(
            "t",
            [
                (r"(\w+)$".to_string(), first),
                (r"(\w+)s$".to_string(), second),
                (r"(\w+)$".to_string(), second),
                (r"(\w+)$".to_string(), first),
            ],
        )
        .unwrap();

        let m = table.first_match("walk").unwrap();
        assert_eq!(m.index, 0);
        assert_eq!(m.alternatives, vec![&second]);
        assert_eq!(table.matches("walks").count(), 4);
    }

    #[test]
    fn test_invalid_pattern_reports_table_and_index() {
        let mut table = RuleTable::new("fr.nouns");
        table.push(r"(\w+)e$", Gender::Feminine).unwrap();
        match table.push(r"(\w+", Gender::Masculine) {
            Err(ConfigError::InvalidPattern { table, index, .. }) => {
                assert_eq!(table, "fr.nouns");
                assert_eq!(index, 1);
            }
            other => panic!("Expected InvalidPattern, got {other:?}"),
        }
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = RuleSet::builtin().unwrap();
        let b = RuleSet::builtin().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.get(Language::English).is_some());
        assert!(a.get(Language::French).is_some());
    }

    #[test]
    fn test_evaluate_french_tables() {
        let rules = RuleSet::builtin().unwrap();
        assert_eq!(
            rules.evaluate(Language::French, Category::Noun, "tables"),
            Some(Classification::Nominal(NominalFeatures {
                gender: Gender::Feminine,
                number: Number::Plural,
                case: crate::morphology::Case::Nominative,
            }))
        );
        match rules.evaluate(Language::French, Category::Verb, "parlerons") {
            Some(Classification::Verb(f)) => {
                assert_eq!(f.tense, Tense::Future);
                assert_eq!(f.person, Person::First);
                assert_eq!(f.number, Number::Plural);
            }
            other => panic!("Expected verb classification, got {other:?}"),
        }
    }

    #[test]
    fn test_evaluate_unloaded_language() {
        let rules = RuleSet::builder().build();
        assert!(rules
            .evaluate(Language::French, Category::Verb, "parle")
            .is_none());
    }

    #[test]
    fn test_regularity_heuristic() {
        let fr = LanguageRules::embedded(Language::French).unwrap();
        assert!(fr.is_regular_lemma(Some("parler")));
        assert!(fr.is_regular_lemma(Some("finir")));
        assert!(!fr.is_regular_lemma(Some("être")));
        assert!(!fr.is_regular_lemma(Some("prendre")));
        assert!(!fr.is_regular_lemma(Some("venir")));
        assert!(!fr.is_regular_lemma(None));

        let en = LanguageRules::embedded(Language::English).unwrap();
        assert!(en.is_regular_lemma(Some("walk")));
        assert!(!en.is_regular_lemma(Some("be")));
        assert!(!en.is_regular_lemma(Some("")));
    }

    #[test]
    fn test_builder_replaces_language() {
        let custom = LanguageRules::from_toml_str(
            "[metadata]\ncode = \"en\"\nname = \"Tiny English\"\n",
            "inline",
        )
        .unwrap();
        let rules = RuleSetBuilder::with_builtin().unwrap().language(custom).build();
        let en = rules.get(Language::English).unwrap();
        assert_eq!(en.name(), "Tiny English");
        assert!(en.verbs().is_empty());
        assert!(rules.get(Language::French).is_some());
    }
}
