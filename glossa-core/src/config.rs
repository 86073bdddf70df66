//! Engine configuration

use crate::error::ConfigError;
use crate::types::Language;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration constants
pub mod defaults {
    use crate::confidence;

    /// Confidence reported for the default language
    pub const MIN_CONFIDENCE: f64 = confidence::DEFAULT_MIN_CONFIDENCE;

    /// Runner-up languages kept in a [`LanguageConfidence`](crate::LanguageConfidence)
    pub const MAX_ALTERNATIVES: usize = confidence::DEFAULT_MAX_ALTERNATIVES;

    /// Occurrences before a grammar trigram is reported
    pub const MIN_PATTERN_FREQUENCY: usize = 2;
}

/// Analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Analyze as this language instead of detecting one
    pub(crate) language: Option<Language>,
    /// Language assumed when detection has nothing to go on
    pub(crate) default_language: Language,
    pub(crate) min_confidence: f64,
    pub(crate) max_alternatives: usize,
    /// Use keyword detection when the caller supplies no hypothesis source
    pub(crate) builtin_detection: bool,
    /// Tag with the rule table lexicon when the caller supplies no tagger
    pub(crate) builtin_lexicon: bool,
    pub(crate) min_pattern_frequency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            language: None,
            default_language: Language::default(),
            min_confidence: defaults::MIN_CONFIDENCE,
            max_alternatives: defaults::MAX_ALTERNATIVES,
            builtin_detection: true,
            builtin_lexicon: true,
            min_pattern_frequency: defaults::MIN_PATTERN_FREQUENCY,
        }
    }
}

impl EngineConfig {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str, source_name: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::Invalid(format!(
                "min_confidence must be within [0, 1], got {}",
                self.min_confidence
            )));
        }
        if self.min_pattern_frequency == 0 {
            return Err(ConfigError::Invalid(
                "min_pattern_frequency must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Override the forced language; `None` re-enables detection
    pub fn with_language(mut self, language: Option<Language>) -> Self {
        self.language = language;
        self
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    pub fn max_alternatives(&self) -> usize {
        self.max_alternatives
    }

    pub fn builtin_detection(&self) -> bool {
        self.builtin_detection
    }

    pub fn builtin_lexicon(&self) -> bool {
        self.builtin_lexicon
    }

    pub fn min_pattern_frequency(&self) -> usize {
        self.min_pattern_frequency
    }
}

/// Fluent builder for configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    language: Option<Language>,
    default_language: Option<Language>,
    min_confidence: Option<f64>,
    max_alternatives: Option<usize>,
    builtin_detection: Option<bool>,
    builtin_lexicon: Option<bool>,
    min_pattern_frequency: Option<usize>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the analysis language by code ("auto" re-enables detection)
    pub fn language(mut self, code: &str) -> Result<Self, ConfigError> {
        self.language = if code.eq_ignore_ascii_case("auto") {
            None
        } else {
            Some(
                Language::from_code(code)
                    .ok_or_else(|| ConfigError::UnsupportedLanguage(code.to_string()))?,
            )
        };
        Ok(self)
    }

    pub fn default_language(mut self, language: Language) -> Self {
        self.default_language = Some(language);
        self
    }

    pub fn min_confidence(mut self, confidence: f64) -> Self {
        self.min_confidence = Some(confidence);
        self
    }

    pub fn max_alternatives(mut self, count: usize) -> Self {
        self.max_alternatives = Some(count);
        self
    }

    pub fn builtin_detection(mut self, enabled: bool) -> Self {
        self.builtin_detection = Some(enabled);
        self
    }

    pub fn builtin_lexicon(mut self, enabled: bool) -> Self {
        self.builtin_lexicon = Some(enabled);
        self
    }

    pub fn min_pattern_frequency(mut self, count: usize) -> Self {
        self.min_pattern_frequency = Some(count);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let defaults = EngineConfig::default();
        let config = EngineConfig {
            language: self.language.or(defaults.language),
            default_language: self.default_language.unwrap_or(defaults.default_language),
            min_confidence: self.min_confidence.unwrap_or(defaults.min_confidence),
            max_alternatives: self.max_alternatives.unwrap_or(defaults.max_alternatives),
            builtin_detection: self.builtin_detection.unwrap_or(defaults.builtin_detection),
            builtin_lexicon: self.builtin_lexicon.unwrap_or(defaults.builtin_lexicon),
            min_pattern_frequency: self
                .min_pattern_frequency
                .unwrap_or(defaults.min_pattern_frequency),
        };
        config.validate()?;
        Ok(config)
    }
}
