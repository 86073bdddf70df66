//! Dominant-language selection
//!
//! The model ranks languages from a probability hypothesis map produced by
//! an external [`HypothesisSource`]. [`KeywordHypotheses`] is the built-in
//! source, scoring indicator words from each language's rule table.

use crate::error::CollaboratorError;
use crate::rules::RuleSet;
use crate::types::{DetectedLanguage, Language};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Confidence reported when no hypothesis survives filtering
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.3;

/// Runner-up languages kept by default
pub const DEFAULT_MAX_ALTERNATIVES: usize = 3;

/// Externally supplied language probabilities for a text
pub trait HypothesisSource: Send + Sync {
    /// Map of language code to probability. Values should sum to at most 1.
    fn hypotheses(&self, text: &str) -> Result<HashMap<String, f64>, CollaboratorError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageScore {
    pub language: DetectedLanguage,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageConfidence {
    /// Dominant language; may lack a rule table
    pub language: DetectedLanguage,
    pub confidence: f64,
    /// Other candidates, highest first
    pub alternatives: SmallVec<[LanguageScore; DEFAULT_MAX_ALTERNATIVES]>,
}

/// Ranks hypotheses into a [`LanguageConfidence`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanguageConfidenceModel {
    default_language: Language,
    min_confidence: f64,
    max_alternatives: usize,
}

impl Default for LanguageConfidenceModel {
    fn default() -> Self {
        Self::new(Language::default(), DEFAULT_MIN_CONFIDENCE, DEFAULT_MAX_ALTERNATIVES)
    }
}

impl LanguageConfidenceModel {
    pub fn new(default_language: Language, min_confidence: f64, max_alternatives: usize) -> Self {
        Self {
            default_language,
            min_confidence,
            max_alternatives,
        }
    }

    /// Result used when nothing can be ranked
    pub fn fallback(&self) -> LanguageConfidence {
        LanguageConfidence {
            language: self.default_language.into(),
            confidence: self.min_confidence,
            alternatives: SmallVec::new(),
        }
    }

    /// Rank a hypothesis map.
    ///
    /// Non-finite, non-positive and blank-code entries are dropped; codes
    /// naming the same language keep their highest value. Languages without
    /// a rule table are ranked like any other. Ties go to the language that
    /// sorts first.
    pub fn evaluate(&self, hypotheses: &HashMap<String, f64>) -> LanguageConfidence {
        let mut best: BTreeMap<DetectedLanguage, f64> = BTreeMap::new();
        for (code, &probability) in hypotheses {
            if !probability.is_finite() || probability <= 0.0 {
                continue;
            }
            let Some(language) = DetectedLanguage::from_code(code) else {
                log::debug!("Ignoring hypothesis with blank language code");
                continue;
            };
            let probability = probability.min(1.0);
            best.entry(language)
                .and_modify(|p| *p = p.max(probability))
                .or_insert(probability);
        }

        let mut ranked: Vec<LanguageScore> = best
            .into_iter()
            .map(|(language, confidence)| LanguageScore {
                language,
                confidence,
            })
            .collect();
        // Stable sort keeps language order among equal scores
        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });

        let mut ranked = ranked.into_iter();
        let Some(dominant) = ranked.next() else {
            log::debug!("No usable hypotheses, defaulting to {}", self.default_language);
            return self.fallback();
        };
        log::debug!(
            "Dominant language {} ({:.3})",
            dominant.language,
            dominant.confidence
        );
        LanguageConfidence {
            language: dominant.language,
            confidence: dominant.confidence,
            alternatives: ranked.take(self.max_alternatives).collect(),
        }
    }

    /// Query `source` and rank its answer; a failing source yields the
    /// fallback
    pub fn detect(&self, text: &str, source: &dyn HypothesisSource) -> LanguageConfidence {
        match source.hypotheses(text) {
            Ok(hypotheses) => self.evaluate(&hypotheses),
            Err(e) => {
                log::warn!("Language hypothesis source failed: {e}");
                self.fallback()
            }
        }
    }
}

/// Built-in hypothesis source over the `[detection]` tables.
///
/// Each language scores one point per indicator word, one per word starting
/// with one of its elisions, and half a point per bonus character. Scores
/// are normalised to sum to 1.
#[derive(Debug, Clone)]
pub struct KeywordHypotheses {
    rules: Arc<RuleSet>,
}

impl KeywordHypotheses {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    fn raw_scores(&self, text: &str) -> Vec<(Language, f64)> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower.unicode_words().collect();
        self.rules
            .languages()
            .filter_map(|language| self.rules.get(language).map(|rules| (language, rules)))
            .map(|(language, rules)| {
                let indicators = words.iter().filter(|w| rules.is_indicator(w)).count();
                let elided = words
                    .iter()
                    .filter(|w| rules.elisions().iter().any(|e| w.starts_with(e.as_str()) && w.len() > e.len()))
                    .count();
                let bonus = lower.chars().filter(|c| rules.is_bonus_char(*c)).count();
                let score = (indicators + elided) as f64 + bonus as f64 / 2.0;
                (language, score)
            })
            .collect()
    }
}

impl HypothesisSource for KeywordHypotheses {
    fn hypotheses(&self, text: &str) -> Result<HashMap<String, f64>, CollaboratorError> {
        let scores = self.raw_scores(text);
        let total: f64 = scores.iter().map(|(_, s)| s).sum();
        if total <= 0.0 {
            return Ok(HashMap::new());
        }
        Ok(scores
            .into_iter()
            .map(|(language, score)| (language.code().to_string(), score / total))
            .collect())
    }
}
