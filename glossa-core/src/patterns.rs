//! Recurring language patterns
//!
//! Aggregates, per analysis call, the grammar shapes (part-of-speech
//! trigrams), verb-noun collocations, and idioms or common phrases from the
//! language's phrase table that a text contains.

use crate::rules::LanguageRules;
use crate::structure::is_terminator;
use crate::types::{LexicalType, Token};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Examples kept per pattern
pub const MAX_EXAMPLES: usize = 3;

/// Kind of recurring pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternCategory {
    Grammar,
    Collocation,
    Idiom,
    CommonPhrase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePattern {
    /// Human-readable label, e.g. `determiner adjective noun`
    pub pattern: String,
    pub category: PatternCategory,
    pub frequency: usize,
    /// Up to [`MAX_EXAMPLES`] source substrings, in text order
    pub examples: Vec<String>,
}

#[derive(Default)]
struct Tally {
    frequency: usize,
    examples: Vec<String>,
}

impl Tally {
    fn record(&mut self, example: &str) {
        self.frequency += 1;
        if self.examples.len() < MAX_EXAMPLES {
            self.examples.push(example.to_string());
        }
    }
}

/// Pattern aggregator
#[derive(Debug, Clone, Copy)]
pub struct PatternAnalyzer {
    min_grammar_frequency: usize,
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new(2)
    }
}

impl PatternAnalyzer {
    /// Grammar trigrams seen fewer than `min_grammar_frequency` times are
    /// not reported
    pub fn new(min_grammar_frequency: usize) -> Self {
        Self {
            min_grammar_frequency: min_grammar_frequency.max(1),
        }
    }

    /// All patterns in `text`, ordered by category, descending frequency,
    /// then label
    pub fn analyze(&self, text: &str, tokens: &[Token], rules: Option<&LanguageRules>) -> Vec<LanguagePattern> {
        let mut patterns = Vec::new();
        patterns.extend(self.grammar_patterns(text, tokens));
        patterns.extend(collocations(text, tokens));
        if let Some(rules) = rules {
            patterns.extend(phrase_patterns(text, rules));
        }
        patterns.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(b.frequency.cmp(&a.frequency))
                .then_with(|| a.pattern.cmp(&b.pattern))
        });
        patterns
    }

    /// Part-of-speech trigrams within sentences
    fn grammar_patterns(&self, text: &str, tokens: &[Token]) -> Vec<LanguagePattern> {
        let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
        for sentence in tokens.split(is_terminator) {
            let tagged: Vec<&Token> = sentence.iter().filter(|t| t.kind.is_tagged_class()).collect();
            for window in tagged.windows(3) {
                let label = window
                    .iter()
                    .map(|t| t.kind.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let example = &text[window[0].span.start..window[2].span.end];
                tallies.entry(label).or_default().record(example);
            }
        }
        into_patterns(tallies, PatternCategory::Grammar, self.min_grammar_frequency)
    }
}

/// Verb followed by a noun, optionally through one determiner
fn collocations(text: &str, tokens: &[Token]) -> Vec<LanguagePattern> {
    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
    for sentence in tokens.split(is_terminator) {
        let words: Vec<&Token> = sentence.iter().filter(|t| t.kind.is_lexical()).collect();
        for (i, verb) in words.iter().enumerate() {
            if verb.kind != LexicalType::Verb {
                continue;
            }
            let noun = match words.get(i + 1) {
                Some(next) if next.kind == LexicalType::Determiner => words.get(i + 2),
                other => other,
            };
            let Some(noun) = noun.filter(|t| t.kind == LexicalType::Noun) else {
                continue;
            };
            let verb_key = verb.lemma().map_or_else(|| verb.text.to_lowercase(), str::to_lowercase);
            let label = format!("{} + {}", verb_key, noun.text.to_lowercase());
            tallies
                .entry(label)
                .or_default()
                .record(&text[verb.span.start..noun.span.end]);
        }
    }
    into_patterns(tallies, PatternCategory::Collocation, 1)
}

/// Matches of the language's idiom and common-phrase table
fn phrase_patterns(text: &str, rules: &LanguageRules) -> Vec<LanguagePattern> {
    rules
        .phrases()
        .iter()
        .filter_map(|phrase| {
            let mut tally = Tally::default();
            for m in phrase.pattern.find_iter(text) {
                tally.record(m.as_str());
            }
            (tally.frequency > 0).then(|| LanguagePattern {
                pattern: phrase.label.clone(),
                category: phrase.category,
                frequency: tally.frequency,
                examples: tally.examples,
            })
        })
        .collect()
}

fn into_patterns(
    tallies: BTreeMap<String, Tally>,
    category: PatternCategory,
    min_frequency: usize,
) -> Vec<LanguagePattern> {
    tallies
        .into_iter()
        .filter(|(_, tally)| tally.frequency >= min_frequency)
        .map(|(pattern, tally)| LanguagePattern {
            pattern,
            category,
            frequency: tally.frequency,
            examples: tally.examples,
        })
        .collect()
}
