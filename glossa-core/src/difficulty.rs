//! CEFR difficulty estimation
//!
//! Four factor scorers each produce a score in `[0, 1]`. The unweighted mean
//! is bucketed into a CEFR level with fixed thresholds.

use crate::structure::{Complexity, SentenceStructure};
use crate::types::Token;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Upper bounds (inclusive) of the A1..C1 buckets; anything above is C2
pub const CEFR_THRESHOLDS: [(f64, CefrLevel); 5] = [
    (0.2, CefrLevel::A1),
    (0.4, CefrLevel::A2),
    (0.6, CefrLevel::B1),
    (0.8, CefrLevel::B2),
    (0.9, CefrLevel::C1),
];

/// Words at least this many letters long count as long
pub const LONG_WORD_LETTERS: usize = 7;

/// Sentence length, in words, that saturates the structure factor
pub const SATURATING_SENTENCE_WORDS: f64 = 25.0;

/// Common European Framework of Reference level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    /// Bucket an average score. NaN is treated as 0.
    pub fn from_score(score: f64) -> Self {
        let score = clamp_unit(score);
        CEFR_THRESHOLDS
            .iter()
            .find(|(upper, _)| score <= *upper)
            .map_or(CefrLevel::C2, |(_, level)| *level)
    }

    pub fn code(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }

    /// Descriptive name of the level
    pub fn description(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "Beginner",
            CefrLevel::A2 => "Elementary",
            CefrLevel::B1 => "Intermediate",
            CefrLevel::B2 => "Upper intermediate",
            CefrLevel::C1 => "Advanced",
            CefrLevel::C2 => "Mastery",
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DifficultyFactorType {
    Vocabulary,
    Grammar,
    SentenceStructure,
    ContextualComplexity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyFactor {
    #[serde(rename = "type")]
    pub kind: DifficultyFactorType,
    /// Always within `[0, 1]`
    pub score: f64,
    pub rationale: String,
}

impl DifficultyFactor {
    /// Build a factor, clamping `score` into `[0, 1]`
    pub fn new(kind: DifficultyFactorType, score: f64, rationale: impl Into<String>) -> Self {
        Self {
            kind,
            score: clamp_unit(score),
            rationale: rationale.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningDifficulty {
    pub level: CefrLevel,
    pub average: f64,
    pub factors: Vec<DifficultyFactor>,
}

/// What factor scorers see of an analyzed text
#[derive(Debug, Clone, Copy)]
pub struct DifficultyInput<'a> {
    pub tokens: &'a [Token],
    pub sentences: &'a [SentenceStructure],
    /// Number of special-token matches in the text
    pub special_count: usize,
}

impl<'a> DifficultyInput<'a> {
    pub fn new(tokens: &'a [Token], sentences: &'a [SentenceStructure], special_count: usize) -> Self {
        Self {
            tokens,
            sentences,
            special_count,
        }
    }

    /// Tokens containing at least one letter
    pub fn words(&self) -> impl Iterator<Item = &'a Token> + 'a {
        self.tokens
            .iter()
            .filter(|t| t.kind.is_lexical() && t.text.chars().any(char::is_alphabetic))
    }
}

/// One replaceable difficulty factor
pub trait FactorScorer: Send + Sync {
    fn factor_type(&self) -> DifficultyFactorType;

    fn score(&self, input: &DifficultyInput<'_>) -> DifficultyFactor;
}

/// Lexical diversity: distinct lower-cased words over total words
#[derive(Debug, Clone, Copy, Default)]
pub struct VocabularyScorer;

impl FactorScorer for VocabularyScorer {
    fn factor_type(&self) -> DifficultyFactorType {
        DifficultyFactorType::Vocabulary
    }

    fn score(&self, input: &DifficultyInput<'_>) -> DifficultyFactor {
        let words: Vec<String> = input.words().map(|t| t.text.to_lowercase()).collect();
        if words.is_empty() {
            return DifficultyFactor::new(self.factor_type(), 0.0, "No words");
        }
        let distinct = words.iter().collect::<HashSet<_>>().len();
        let diversity = distinct as f64 / words.len() as f64;
        DifficultyFactor::new(
            self.factor_type(),
            bucket(diversity),
            format!(
                "{distinct} distinct of {} words (diversity {diversity:.2})",
                words.len()
            ),
        )
    }
}

/// Variety of part-of-speech trigrams
#[derive(Debug, Clone, Copy, Default)]
pub struct GrammarScorer;

impl FactorScorer for GrammarScorer {
    fn factor_type(&self) -> DifficultyFactorType {
        DifficultyFactorType::Grammar
    }

    fn score(&self, input: &DifficultyInput<'_>) -> DifficultyFactor {
        let classes: Vec<_> = input
            .tokens
            .iter()
            .filter(|t| t.kind.is_tagged_class())
            .map(|t| t.kind)
            .collect();
        let distinct = classes.windows(3).collect::<HashSet<_>>().len();
        let variety = distinct as f64 / 10.0;
        let score = if distinct == 0 { 0.0 } else { bucket(variety) };
        DifficultyFactor::new(
            self.factor_type(),
            score,
            format!("{distinct} distinct part-of-speech trigrams"),
        )
    }
}

/// Sentence length and share of non-simple sentences
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceStructureScorer;

impl FactorScorer for SentenceStructureScorer {
    fn factor_type(&self) -> DifficultyFactorType {
        DifficultyFactorType::SentenceStructure
    }

    fn score(&self, input: &DifficultyInput<'_>) -> DifficultyFactor {
        let count = input.sentences.len();
        if count == 0 {
            return DifficultyFactor::new(self.factor_type(), 0.0, "No sentences");
        }
        let words: usize = input.sentences.iter().map(SentenceStructure::word_count).sum();
        let mean = words as f64 / count as f64;
        let non_simple = input
            .sentences
            .iter()
            .filter(|s| s.complexity != Complexity::Simple)
            .count();
        let share = non_simple as f64 / count as f64;
        let base = (mean / SATURATING_SENTENCE_WORDS).min(1.0);
        DifficultyFactor::new(
            self.factor_type(),
            base + (1.0 - base) * share * 0.5,
            format!("{mean:.1} words per sentence, {non_simple} of {count} not simple"),
        )
    }
}

/// Long words and special tokens relative to text length
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextualComplexityScorer;

impl FactorScorer for ContextualComplexityScorer {
    fn factor_type(&self) -> DifficultyFactorType {
        DifficultyFactorType::ContextualComplexity
    }

    fn score(&self, input: &DifficultyInput<'_>) -> DifficultyFactor {
        let (total, long) = input.words().fold((0usize, 0usize), |(total, long), t| {
            let letters = t.text.chars().filter(|c| c.is_alphabetic()).count();
            (total + 1, long + usize::from(letters >= LONG_WORD_LETTERS))
        });
        if total == 0 {
            return DifficultyFactor::new(self.factor_type(), 0.0, "No words");
        }
        let share = (long + input.special_count) as f64 / total as f64;
        DifficultyFactor::new(
            self.factor_type(),
            share * 2.0,
            format!("{long} long words and {} special tokens in {total} words", input.special_count),
        )
    }
}

/// Runs the factor scorers and buckets their mean
#[derive(Clone)]
pub struct DifficultyScorer {
    scorers: Vec<Arc<dyn FactorScorer>>,
}

impl Default for DifficultyScorer {
    fn default() -> Self {
        Self {
            scorers: vec![
                Arc::new(VocabularyScorer),
                Arc::new(GrammarScorer),
                Arc::new(SentenceStructureScorer),
                Arc::new(ContextualComplexityScorer),
            ],
        }
    }
}

impl fmt::Debug for DifficultyScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.scorers.iter().map(|s| s.factor_type()))
            .finish()
    }
}

impl DifficultyScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scorer for the same factor type, or append it
    pub fn with_scorer(mut self, scorer: Arc<dyn FactorScorer>) -> Self {
        match self
            .scorers
            .iter()
            .position(|s| s.factor_type() == scorer.factor_type())
        {
            Some(i) => self.scorers[i] = scorer,
            None => self.scorers.push(scorer),
        }
        self
    }

    pub fn score(&self, input: &DifficultyInput<'_>) -> LearningDifficulty {
        let factors = self.scorers.iter().map(|s| s.score(input)).collect();
        Self::from_factors(factors)
    }

    /// Combine precomputed factors
    pub fn from_factors(factors: Vec<DifficultyFactor>) -> LearningDifficulty {
        let average = if factors.is_empty() {
            0.0
        } else {
            factors.iter().map(|f| f.score).sum::<f64>() / factors.len() as f64
        };
        let level = CefrLevel::from_score(average);
        log::debug!("Difficulty average {average:.3} -> {}", level.code());
        LearningDifficulty {
            level,
            average,
            factors,
        }
    }
}

fn bucket(ratio: f64) -> f64 {
    if ratio < 0.3 {
        0.1
    } else if ratio < 0.5 {
        0.3
    } else if ratio < 0.8 {
        0.5
    } else {
        0.85
    }
}

pub(crate) fn clamp_unit(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
