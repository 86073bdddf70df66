//! Analysis entry point
//!
//! [`TextAnalyzer`] wires the components together. It holds only immutable
//! tables, so one instance can serve any number of concurrent calls.

use crate::confidence::{HypothesisSource, KeywordHypotheses, LanguageConfidence, LanguageConfidenceModel};
use crate::config::EngineConfig;
use crate::difficulty::{DifficultyInput, DifficultyScorer, LearningDifficulty};
use crate::error::{ConfigError, Result};
use crate::morphology::{MorphologicalAnalyzer, MorphologyEntry};
use crate::patterns::{LanguagePattern, PatternAnalyzer};
use crate::rules::{LanguageRules, RuleSet};
use crate::special::{SpecialMatch, SpecialTokenClassifier};
use crate::structure::{SentenceStructure, SentenceStructures};
use crate::tagger::{apply_tagger, LexicalTagger, LexiconTagger};
use crate::tokenizer::Tokenizer;
use crate::types::{Language, Token};
use crate::vocabulary::{VocabularyAnalyzer, VocabularyItem};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// External capabilities for one call. Anything left out falls back to
/// the built-in lexicon and keyword detection, as configured.
#[derive(Clone, Copy, Default)]
pub struct Collaborators<'a> {
    pub tagger: Option<&'a dyn LexicalTagger>,
    pub hypotheses: Option<&'a dyn HypothesisSource>,
}

impl<'a> Collaborators<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_tagger(mut self, tagger: &'a dyn LexicalTagger) -> Self {
        self.tagger = Some(tagger);
        self
    }

    pub fn with_hypotheses(mut self, source: &'a dyn HypothesisSource) -> Self {
        self.hypotheses = Some(source);
        self
    }
}

/// Full result of one analysis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    pub language: LanguageConfidence,
    pub tokens: Vec<Token>,
    pub special_tokens: Vec<SpecialMatch>,
    pub morphology: Vec<MorphologyEntry>,
    pub sentences: Vec<SentenceStructure>,
    pub patterns: Vec<LanguagePattern>,
    /// Distinct words in order of first occurrence
    pub vocabulary: Vec<VocabularyItem>,
    pub difficulty: LearningDifficulty,
    /// Set when a collaborator failed and a fallback was used
    pub degraded: bool,
}

impl TextAnalysis {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

struct Detection {
    confidence: LanguageConfidence,
    degraded: bool,
}

/// Rule-based text analyzer
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    rules: Arc<RuleSet>,
    special: Arc<SpecialTokenClassifier>,
    config: EngineConfig,
    scorer: DifficultyScorer,
    morphology: MorphologicalAnalyzer,
    model: LanguageConfidenceModel,
    keywords: KeywordHypotheses,
    lexicons: BTreeMap<Language, LexiconTagger>,
}

impl TextAnalyzer {
    /// Analyzer over the embedded tables with default settings
    pub fn new() -> std::result::Result<Self, ConfigError> {
        Self::builder().build()
    }

    /// Analyzer over the embedded tables
    pub fn with_config(config: EngineConfig) -> std::result::Result<Self, ConfigError> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> TextAnalyzerBuilder {
        TextAnalyzerBuilder::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }

    /// Rank languages for `text`, or report the forced language
    pub fn detect_language(&self, text: &str, source: Option<&dyn HypothesisSource>) -> LanguageConfidence {
        self.detect(text, source).confidence
    }

    fn detect(&self, text: &str, source: Option<&dyn HypothesisSource>) -> Detection {
        if let Some(language) = self.config.language() {
            return Detection {
                confidence: LanguageConfidence {
                    language: language.into(),
                    confidence: 1.0,
                    alternatives: SmallVec::new(),
                },
                degraded: false,
            };
        }

        let source: &dyn HypothesisSource = match source {
            Some(source) => source,
            None if self.config.builtin_detection() => &self.keywords,
            None => {
                return Detection {
                    confidence: self.model.fallback(),
                    degraded: false,
                }
            }
        };
        match source.hypotheses(text) {
            Ok(hypotheses) => Detection {
                confidence: self.model.evaluate(&hypotheses),
                degraded: false,
            },
            Err(e) => {
                log::warn!("Language detection failed, assuming {}: {e}", self.config.default_language());
                Detection {
                    confidence: self.model.fallback(),
                    degraded: true,
                }
            }
        }
    }

    /// Untagged tokens of `text`, using the dominant language's elisions.
    ///
    /// Detection goes through the same hypothesis source `analyze` would use,
    /// so spans collected here can key a [`PrecomputedTags`](crate::tagger::PrecomputedTags)
    /// for a later `analyze` call.
    pub fn tokenize(&self, text: &str, collaborators: Collaborators<'_>) -> Vec<Token> {
        let language = self.detect(text, collaborators.hypotheses).confidence.language;
        self.tokenizer(language.supported()).tokenize(text).collect()
    }

    /// Special-token matches of `text`
    pub fn special_tokens(&self, text: &str) -> Vec<SpecialMatch> {
        self.special.scan(text)
    }

    /// Lazily analyzed sentences of `text`
    pub fn sentences<'t>(&self, text: &'t str, collaborators: Collaborators<'_>) -> SentenceStructures<'t> {
        let language = self.detect(text, collaborators.hypotheses).confidence.language;
        let (tokens, _) = self.tagged_tokens(text, language.supported(), collaborators.tagger);
        SentenceStructures::new(text, tokens)
    }

    /// Distinct words of `text` with frequency, context and level
    pub fn vocabulary(&self, text: &str, collaborators: Collaborators<'_>) -> Vec<VocabularyItem> {
        let language = self.detect(text, collaborators.hypotheses).confidence.language;
        let (tokens, _) = self.tagged_tokens(text, language.supported(), collaborators.tagger);
        let sentences: Vec<_> = SentenceStructures::new(text, tokens.as_slice()).collect();
        VocabularyAnalyzer::new().extract(&tokens, &sentences)
    }

    /// Run every component over `text`
    pub fn analyze(&self, text: &str, collaborators: Collaborators<'_>) -> TextAnalysis {
        let detection = self.detect(text, collaborators.hypotheses);
        let language = &detection.confidence.language;
        let supported = language.supported();
        let rules = self.language_rules(supported);

        let (tokens, tagger_degraded) = self.tagged_tokens(text, supported, collaborators.tagger);
        let morphology = self.morphology.classify_detected(language, &tokens);
        let sentences: Vec<_> = SentenceStructures::new(text, tokens.as_slice()).collect();
        let special_tokens = self.special.scan(text);
        let patterns = PatternAnalyzer::new(self.config.min_pattern_frequency()).analyze(text, &tokens, rules);
        let vocabulary = VocabularyAnalyzer::new().extract(&tokens, &sentences);
        let difficulty = self
            .scorer
            .score(&DifficultyInput::new(&tokens, &sentences, special_tokens.len()));

        log::debug!(
            "Analyzed {} bytes as {language}: {} tokens, {} sentences, level {}",
            text.len(),
            tokens.len(),
            sentences.len(),
            difficulty.level.code()
        );

        TextAnalysis {
            language: detection.confidence,
            tokens,
            special_tokens,
            morphology,
            sentences,
            patterns,
            vocabulary,
            difficulty,
            degraded: detection.degraded || tagger_degraded,
        }
    }

    /// Analyze independent texts, in parallel with the `parallel` feature
    pub fn analyze_batch<S>(&self, texts: &[S], collaborators: Collaborators<'_>) -> Vec<TextAnalysis>
    where
        S: AsRef<str> + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            texts
                .par_iter()
                .map(|text| self.analyze(text.as_ref(), collaborators))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            texts
                .iter()
                .map(|text| self.analyze(text.as_ref(), collaborators))
                .collect()
        }
    }

    fn language_rules(&self, language: Option<Language>) -> Option<&LanguageRules> {
        language.and_then(|language| self.rules.get(language))
    }

    fn tokenizer(&self, language: Option<Language>) -> Tokenizer<'_> {
        Tokenizer::for_language(&self.special, self.language_rules(language))
    }

    fn tagged_tokens(
        &self,
        text: &str,
        language: Option<Language>,
        tagger: Option<&dyn LexicalTagger>,
    ) -> (Vec<Token>, bool) {
        let mut tokens: Vec<Token> = self.tokenizer(language).tokenize(text).collect();
        let tagger = tagger.or_else(|| {
            language
                .and_then(|language| self.lexicons.get(&language))
                .map(|lexicon| lexicon as &dyn LexicalTagger)
        });
        let report = apply_tagger(&mut tokens, tagger);
        (tokens, report.degraded())
    }
}

/// Builder for [`TextAnalyzer`]
#[derive(Debug, Default)]
pub struct TextAnalyzerBuilder {
    rules: Option<Arc<RuleSet>>,
    special: Option<Arc<SpecialTokenClassifier>>,
    config: Option<EngineConfig>,
    scorer: Option<DifficultyScorer>,
}

impl TextAnalyzerBuilder {
    /// Use these rule tables instead of the embedded ones
    pub fn rules(mut self, rules: Arc<RuleSet>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Use this special-token table instead of the embedded one
    pub fn special_tokens(mut self, special: Arc<SpecialTokenClassifier>) -> Self {
        self.special = Some(special);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn scorer(mut self, scorer: DifficultyScorer) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn build(self) -> std::result::Result<TextAnalyzer, ConfigError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let rules = match self.rules {
            Some(rules) => rules,
            None => RuleSet::builtin()?,
        };
        let special = match self.special {
            Some(special) => special,
            None => Arc::new(SpecialTokenClassifier::builtin()?),
        };
        let lexicons = if config.builtin_lexicon() {
            rules
                .languages()
                .filter_map(|language| {
                    rules
                        .get(language)
                        .map(|r| (language, LexiconTagger::from_rules(r)))
                })
                .collect()
        } else {
            BTreeMap::new()
        };

        Ok(TextAnalyzer {
            morphology: MorphologicalAnalyzer::new(Arc::clone(&rules)),
            model: LanguageConfidenceModel::new(
                config.default_language(),
                config.min_confidence(),
                config.max_alternatives(),
            ),
            keywords: KeywordHypotheses::new(Arc::clone(&rules)),
            lexicons,
            rules,
            special,
            scorer: self.scorer.unwrap_or_default(),
            config,
        })
    }
}
