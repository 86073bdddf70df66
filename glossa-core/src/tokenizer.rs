//! Lossless tokenizer
//!
//! Splits text on UAX #29 word boundaries, keeps special spans (URLs, emails,
//! dates, repeated `!?`) whole, and splits elided clitics such as French
//! `l'` off the word they are attached to. Every byte of the input lands in
//! exactly one token, whitespace and punctuation included, so concatenating
//! the token texts gives back the input.

use crate::rules::LanguageRules;
use crate::special::{SpecialMatch, SpecialTokenClassifier};
use crate::types::{LexicalType, Span, Token, TokenMetadata};
use unicode_segmentation::{UWordBoundIndices, UnicodeSegmentation};

/// Tokenizer configured for one language
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    special: &'a SpecialTokenClassifier,
    elisions: &'a [String],
}

impl<'a> Tokenizer<'a> {
    /// Tokenizer without language-specific refinements
    pub fn new(special: &'a SpecialTokenClassifier) -> Self {
        Self {
            special,
            elisions: &[],
        }
    }

    /// Use the elision prefixes of `rules`
    pub fn for_language(special: &'a SpecialTokenClassifier, rules: Option<&'a LanguageRules>) -> Self {
        Self {
            special,
            elisions: rules.map(LanguageRules::elisions).unwrap_or(&[]),
        }
    }

    /// Lazily tokenize `text`
    pub fn tokenize<'t>(&self, text: &'t str) -> Tokens<'a, 't> {
        let mut atomic = self.special.atomic_matches(text).into_iter();
        let next_atomic = atomic.next();
        Tokens {
            text,
            special: self.special,
            elisions: self.elisions,
            atomic,
            next_atomic,
            pos: 0,
            char_pos: 0,
            segments: None,
            pending: None,
        }
    }
}

/// Iterator over the tokens of one text
pub struct Tokens<'a, 't> {
    text: &'t str,
    special: &'a SpecialTokenClassifier,
    elisions: &'a [String],
    atomic: std::vec::IntoIter<SpecialMatch>,
    next_atomic: Option<SpecialMatch>,
    pos: usize,
    char_pos: usize,
    // Word segments of the gap before the next atomic span, with its offset
    segments: Option<(usize, UWordBoundIndices<'t>)>,
    // Remainder of a word whose elided prefix was just emitted
    pending: Option<(usize, &'t str)>,
}

impl<'a, 't> Tokens<'a, 't> {
    fn emit(&mut self, start: usize, piece: &'t str, special: Option<&SpecialMatch>) -> Token {
        debug_assert_eq!(start, self.pos, "tokens must be contiguous");
        let char_len = piece.chars().count();
        let category = match special {
            Some(m) => Some(m.category),
            None => self.special.classify(piece),
        };
        let kind = match category {
            Some(category) => category.lexical_type(),
            None => default_kind(piece),
        };

        let token = Token {
            text: piece.to_string(),
            kind,
            span: Span::new(start, start + piece.len()),
            char_span: Span::new(self.char_pos, self.char_pos + char_len),
            metadata: TokenMetadata {
                lemma: None,
                special: category,
            },
        };
        self.pos = start + piece.len();
        self.char_pos += char_len;
        token
    }

    /// Byte length of an elided prefix at the start of `segment`
    fn elision_len(&self, segment: &str) -> Option<usize> {
        self.elisions.iter().find_map(|elision| {
            let prefix_chars = elision.chars().count();
            let (split, _) = segment.char_indices().nth(prefix_chars)?;
            (segment[..split].to_lowercase() == *elision).then_some(split)
        })
    }
}

impl<'a, 't> Iterator for Tokens<'a, 't> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some((start, rest)) = self.pending.take() {
                return Some(self.emit(start, rest, None));
            }

            let segment = self
                .segments
                .as_mut()
                .and_then(|(offset, iter)| iter.next().map(|(i, s)| (*offset + i, s)));
            match segment {
                Some((start, piece)) => {
                    if let Some(split) = self.elision_len(piece) {
                        self.pending = Some((start + split, &piece[split..]));
                        return Some(self.emit(start, &piece[..split], None));
                    }
                    return Some(self.emit(start, piece, None));
                }
                None => self.segments = None,
            }

            if self.pos >= self.text.len() {
                return None;
            }

            let text: &'t str = self.text;
            let at_atomic = matches!(&self.next_atomic, Some(m) if m.span.start == self.pos);
            if at_atomic {
                if let Some(m) = self.next_atomic.take() {
                    self.next_atomic = self.atomic.next();
                    return Some(self.emit(m.span.start, &text[m.span.range()], Some(&m)));
                }
            }
            let gap_end = self
                .next_atomic
                .as_ref()
                .map_or(text.len(), |m| m.span.start);
            self.segments = Some((self.pos, text[self.pos..gap_end].split_word_bound_indices()));
        }
    }
}

fn default_kind(piece: &str) -> LexicalType {
    if piece.chars().all(char::is_whitespace) {
        LexicalType::Whitespace
    } else if !piece.chars().any(char::is_alphanumeric) {
        LexicalType::Punctuation
    } else if piece.chars().any(|c| c.is_numeric()) && !piece.chars().any(char::is_alphabetic) {
        LexicalType::Number
    } else {
        LexicalType::Word
    }
}
