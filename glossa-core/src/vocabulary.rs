//! Vocabulary extraction
//!
//! Collects the distinct words of a tagged text, each with its frequency,
//! the sentence it first appears in, and an estimated CEFR level of its own.

use crate::difficulty::{clamp_unit, CefrLevel, LONG_WORD_LETTERS};
use crate::structure::SentenceStructure;
use crate::types::{LexicalType, Token};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Share of each signal in the per-word score
const LENGTH_WEIGHT: f64 = 0.5;
const RARITY_WEIGHT: f64 = 0.25;
const UNTAGGED_WEIGHT: f64 = 0.25;

/// One distinct word of an analyzed text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyItem {
    /// Surface form of the first occurrence
    pub word: String,
    /// Type assigned to the first occurrence
    #[serde(rename = "type")]
    pub kind: LexicalType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    /// Occurrences, compared case-insensitively
    pub frequency: usize,
    /// Sentence holding the first occurrence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Within `[0, 1]`
    pub score: f64,
    pub difficulty: CefrLevel,
}

/// Word list builder.
///
/// A word's score mixes its length (saturating at twice
/// [`LONG_WORD_LETTERS`] letters), how rarely it recurs in the text, and
/// whether the tagger failed to place it in a class.
#[derive(Debug, Clone, Copy, Default)]
pub struct VocabularyAnalyzer;

impl VocabularyAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Distinct words of `tokens` in order of first occurrence.
    ///
    /// Numbers, URLs, emails, dates, emoji and detached elision prefixes
    /// such as `l'` are not vocabulary.
    pub fn extract(&self, tokens: &[Token], sentences: &[SentenceStructure]) -> Vec<VocabularyItem> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut items: Vec<VocabularyItem> = Vec::new();
        for token in tokens.iter().filter(|t| is_vocabulary(t)) {
            let key = token.text.to_lowercase();
            if let Some(&i) = index.get(&key) {
                items[i].frequency += 1;
                continue;
            }
            index.insert(key, items.len());
            items.push(VocabularyItem {
                word: token.text.clone(),
                kind: token.kind,
                lemma: token.lemma().map(str::to_string),
                frequency: 1,
                context: containing_sentence(sentences, token).map(|s| s.text.clone()),
                score: 0.0,
                difficulty: CefrLevel::A1,
            });
        }

        for item in &mut items {
            item.score = word_score(item);
            item.difficulty = CefrLevel::from_score(item.score);
        }
        log::debug!("Extracted {} vocabulary items", items.len());
        items
    }
}

fn is_vocabulary(token: &Token) -> bool {
    let eligible =
        token.kind.is_tagged_class() || matches!(token.kind, LexicalType::Word | LexicalType::Unknown);
    eligible
        && token.text.chars().any(char::is_alphabetic)
        && !token.text.ends_with(['\'', '’'])
}

fn containing_sentence<'s>(sentences: &'s [SentenceStructure], token: &Token) -> Option<&'s SentenceStructure> {
    // Sentences are disjoint and in text order
    let i = sentences.partition_point(|s| s.span.end <= token.span.start);
    sentences
        .get(i)
        .filter(|s| s.span.start <= token.span.start)
}

fn word_score(item: &VocabularyItem) -> f64 {
    let letters = item.word.chars().filter(|c| c.is_alphabetic()).count();
    let length = letters as f64 / (2 * LONG_WORD_LETTERS) as f64;
    let rarity = 1.0 / item.frequency as f64;
    let untagged = if item.kind.is_tagged_class() { 0.0 } else { 1.0 };
    clamp_unit(LENGTH_WEIGHT * length.min(1.0) + RARITY_WEIGHT * rarity + UNTAGGED_WEIGHT * untagged)
}
