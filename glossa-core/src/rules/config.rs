//! TOML schema for per-language rule tables

use crate::error::ConfigError;
use crate::morphology::{AdjectiveFeatures, NominalFeatures, VerbFeatures};
use crate::patterns::PatternCategory;
use crate::types::{Language, LexicalClass};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub tokenizer: TokenizerConfig,
    #[serde(default)]
    pub morphology: MorphologyConfig,
    #[serde(default)]
    pub verbs: Vec<RuleEntry<VerbFeatures>>,
    #[serde(default)]
    pub nouns: Vec<RuleEntry<NominalFeatures>>,
    #[serde(default)]
    pub adjectives: Vec<RuleEntry<AdjectiveFeatures>>,
    #[serde(default)]
    pub phrases: Vec<PhraseEntry>,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub lexicon: BTreeMap<String, LexiconEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Clitic prefixes split off the front of a word, apostrophe included
    #[serde(default)]
    pub elisions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MorphologyConfig {
    /// Lemma endings of the regular conjugation; empty means unconstrained
    #[serde(default)]
    pub regular_suffixes: Vec<String>,
    #[serde(default)]
    pub irregular_verbs: Vec<String>,
}

/// One ordered rule: a pattern and the features it assigns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEntry<T> {
    pub pattern: String,
    #[serde(flatten)]
    pub features: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseEntry {
    pub label: String,
    pub category: PatternCategory,
    pub pattern: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionConfig {
    #[serde(default)]
    pub indicators: Vec<String>,
    /// Characters that count as extra evidence for the language
    #[serde(default)]
    pub bonus_chars: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub class: LexicalClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
}

impl LanguageConfig {
    /// Parse a rule table from TOML text
    pub fn from_toml_str(content: &str, source_name: &str) -> Result<Self, ConfigError> {
        let config: LanguageConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Language the table is for
    pub fn language(&self) -> Result<Language, ConfigError> {
        Language::from_code(&self.metadata.code)
            .ok_or_else(|| ConfigError::UnsupportedLanguage(self.metadata.code.clone()))
    }

    /// Check the table for problems that do not need pattern compilation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metadata.code.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "metadata.code must not be empty".to_string(),
            ));
        }
        if self.metadata.name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "metadata.name must not be empty".to_string(),
            ));
        }
        self.language()?;

        for (index, entry) in self.phrases.iter().enumerate() {
            if entry.label.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "phrase #{index} has an empty label"
                )));
            }
            if matches!(
                entry.category,
                PatternCategory::Grammar | PatternCategory::Collocation
            ) {
                return Err(ConfigError::Invalid(format!(
                    "phrase `{}` must be an idiom or commonPhrase",
                    entry.label
                )));
            }
        }

        if let Some(elision) = self
            .tokenizer
            .elisions
            .iter()
            .find(|e| !e.ends_with(['\'', '’']))
        {
            return Err(ConfigError::Invalid(format!(
                "elision `{elision}` must end with an apostrophe"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::{Mood, Tense};

    const MINIMAL: &str = r#"
        [metadata]
        code = "fr"
        name = "French"

        [[verbs]]
        pattern = '(\w+)ons$'
        tense = "present"
        person = "first"
        number = "plural"
        mood = "indicative"

        [lexicon]
        suis = { class = "verb", lemma = "être" }
    "#;

    #[test]
    fn test_language_config_deserialize() {
        let config = LanguageConfig::from_toml_str(MINIMAL, "inline").unwrap();
        assert_eq!(config.metadata.code, "fr");
        assert_eq!(config.verbs.len(), 1);
        assert_eq!(config.verbs[0].features.tense, Tense::Present);
        assert_eq!(config.verbs[0].features.mood, Mood::Indicative);
        assert!(config.nouns.is_empty());
        assert_eq!(
            config.lexicon["suis"],
            LexiconEntry {
                class: LexicalClass::Verb,
                lemma: Some("être".to_string())
            }
        );
    }

    #[test]
    fn test_unknown_feature_value_is_parse_error() {
        let bad = MINIMAL.replace("\"present\"", "\"aorist\"");
        match LanguageConfig::from_toml_str(&bad, "inline") {
            Err(ConfigError::Parse { source_name, .. }) => assert_eq!(source_name, "inline"),
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_language_code() {
        let bad = MINIMAL.replace("code = \"fr\"", "code = \"de\"");
        assert!(matches!(
            LanguageConfig::from_toml_str(&bad, "inline"),
            Err(ConfigError::UnsupportedLanguage(code)) if code == "de"
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let bad = MINIMAL.replace("name = \"French\"", "name = \"\"");
        assert!(matches!(
            LanguageConfig::from_toml_str(&bad, "inline"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_phrase_category_restricted() {
        let bad = format!(
            "{MINIMAL}\n[[phrases]]\nlabel = \"x\"\ncategory = \"grammar\"\npattern = 'x'\n"
        );
        // `[[phrases]]` after `[lexicon]` is still a top-level array of tables
        assert!(matches!(
            LanguageConfig::from_toml_str(&bad, "inline"),
            Err(ConfigError::Invalid(_))
        ));
    }
}
