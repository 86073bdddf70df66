//! Sentence segmentation and coarse structure
//!
//! Sentences end at terminal punctuation tokens. Because URLs, emails,
//! dates and decimals are single tokens, the dots inside them never split a
//! sentence. Each sentence is cut into a subject (everything before the first
//! verb) and a predicate (the rest); no deeper parse is attempted.

use crate::types::{LexicalType, Span, Token};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Characters that end a sentence
pub const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?', '。', '！', '？', '…'];

/// Role of a component within its sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentType {
    Subject,
    Predicate,
    Object,
    Complement,
    Modifier,
}

impl ComponentType {
    /// Variants the analyzer actually emits. Object, complement and modifier
    /// are part of the data model but never produced by the two-phase split.
    pub const PRODUCED: [ComponentType; 2] = [ComponentType::Subject, ComponentType::Predicate];

    /// Whether the analyzer can emit this variant
    pub fn is_produced(&self) -> bool {
        Self::PRODUCED.contains(self)
    }
}

/// Sentence complexity bucket, from component count alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Complexity {
    Simple,
    Compound,
    Complex,
}

impl Complexity {
    /// At most 2 components is simple, at most 4 compound, more is complex
    pub fn from_component_count(count: usize) -> Self {
        match count {
            0..=2 => Complexity::Simple,
            3..=4 => Complexity::Compound,
            _ => Complexity::Complex,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceComponent {
    pub text: String,
    pub span: Span,
    #[serde(rename = "type")]
    pub kind: ComponentType,
    /// Non-whitespace tokens of the component
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceStructure {
    /// Sentence text, trimmed, terminator excluded
    pub text: String,
    pub span: Span,
    pub components: Vec<SentenceComponent>,
    pub complexity: Complexity,
}

impl SentenceStructure {
    /// Number of word-like tokens across all components
    pub fn word_count(&self) -> usize {
        self.components
            .iter()
            .flat_map(|c| &c.tokens)
            .filter(|t| t.kind.is_lexical())
            .count()
    }
}

/// Whether `token` ends a sentence
pub fn is_terminator(token: &Token) -> bool {
    token.kind == LexicalType::Punctuation
        && !token.text.is_empty()
        && token.text.chars().all(|c| SENTENCE_TERMINATORS.contains(&c))
}

/// Lazy sentence-by-sentence analysis over a tagged token stream.
///
/// Dropping the iterator early stops the work.
pub struct SentenceStructures<'a> {
    text: &'a str,
    tokens: Cow<'a, [Token]>,
    pos: usize,
}

impl<'a> SentenceStructures<'a> {
    /// `tokens` must be the token stream of `text`
    pub fn new(text: &'a str, tokens: impl Into<Cow<'a, [Token]>>) -> Self {
        Self {
            text,
            tokens: tokens.into(),
            pos: 0,
        }
    }

    fn build(&self, tokens: &[Token]) -> Option<SentenceStructure> {
        let first = tokens.iter().position(|t| !t.is_whitespace())?;
        let last = tokens.iter().rposition(|t| !t.is_whitespace())?;
        let tokens = &tokens[first..=last];
        let span = Span::new(tokens[0].span.start, tokens[tokens.len() - 1].span.end);

        let mut components = Vec::new();
        let mut current: Vec<Token> = Vec::new();
        let mut phase = ComponentType::Subject;
        for token in tokens.iter().filter(|t| !t.is_whitespace()) {
            if phase == ComponentType::Subject && token.kind == LexicalType::Verb {
                if let Some(component) = self.component(phase, std::mem::take(&mut current)) {
                    components.push(component);
                }
                phase = ComponentType::Predicate;
            }
            current.push(token.clone());
        }
        if let Some(component) = self.component(phase, current) {
            components.push(component);
        }

        Some(SentenceStructure {
            text: self.text[span.range()].to_string(),
            span,
            complexity: Complexity::from_component_count(components.len()),
            components,
        })
    }

    fn component(&self, kind: ComponentType, tokens: Vec<Token>) -> Option<SentenceComponent> {
        let span = Span::new(tokens.first()?.span.start, tokens.last()?.span.end);
        Some(SentenceComponent {
            text: self.text[span.range()].to_string(),
            span,
            kind,
            tokens,
        })
    }
}

impl Iterator for SentenceStructures<'_> {
    type Item = SentenceStructure;

    fn next(&mut self) -> Option<SentenceStructure> {
        while self.pos < self.tokens.len() {
            let rest = &self.tokens[self.pos..];
            let len = rest.iter().position(is_terminator).unwrap_or(rest.len());
            // Skip the terminator along with the segment
            self.pos += (len + 1).min(rest.len());
            if let Some(sentence) = self.build(&rest[..len]) {
                return Some(sentence);
            }
        }
        None
    }
}
