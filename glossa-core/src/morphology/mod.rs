//! Morphological classification
//!
//! Routes tagged tokens to the verb, nominal or adjective table of the
//! dominant language and turns the winning rule into a typed record.

mod forms;

pub use forms::{
    AdjectiveFeatures, AdjectiveForm, Case, Degree, Gender, MorphologicalForm, Mood,
    NominalFeatures, NominalForm, Number, Person, Tense, VerbFeatures, VerbForm,
};

use crate::rules::{LanguageRules, RuleSet};
use crate::types::{DetectedLanguage, Language, LexicalType, Token};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Words of left context used for adjective phrase rules
const ADJECTIVE_CONTEXT_WORDS: usize = 2;

/// Form attached to a position in the token stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphologyEntry {
    pub token_index: usize,
    pub form: MorphologicalForm,
}

#[derive(Debug, Clone)]
pub struct MorphologicalAnalyzer {
    rules: Arc<RuleSet>,
}

impl MorphologicalAnalyzer {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    fn language_rules(&self, language: Language) -> Option<&LanguageRules> {
        let rules = self.rules.get(language);
        if rules.is_none() {
            log::debug!("No rule tables for {language}, skipping morphology");
        }
        rules
    }

    /// Classify a verb form
    pub fn analyze_verb(&self, language: Language, surface: &str, lemma: Option<&str>) -> Option<VerbForm> {
        let rules = self.language_rules(language)?;
        let candidate = surface.to_lowercase();
        let m = rules.verbs().first_match(&candidate)?;
        log::trace!("{language} verb `{surface}` matched rule #{}", m.index);
        Some(VerbForm {
            text: surface.to_string(),
            lemma: lemma.map(str::to_string),
            tense: m.outcome.tense,
            person: m.outcome.person,
            number: m.outcome.number,
            mood: m.outcome.mood,
            language,
            is_regular: rules.is_regular_lemma(lemma),
            alternatives: m.alternatives.into_iter().copied().collect(),
        })
    }

    /// Classify a noun or pronoun
    pub fn analyze_nominal(&self, language: Language, surface: &str, lemma: Option<&str>) -> Option<NominalForm> {
        let rules = self.language_rules(language)?;
        let candidate = surface.to_lowercase();
        let m = rules.nouns().first_match(&candidate)?;
        Some(NominalForm {
            text: surface.to_string(),
            lemma: lemma.map(str::to_string),
            gender: m.outcome.gender,
            number: m.outcome.number,
            case: m.outcome.case,
            language,
            alternatives: m.alternatives.into_iter().copied().collect(),
        })
    }

    /// Classify an adjective.
    ///
    /// `context` holds the words immediately before it, oldest first; only
    /// the last two are used, so `la plus belle` can match a superlative rule.
    pub fn analyze_adjective(
        &self,
        language: Language,
        surface: &str,
        lemma: Option<&str>,
        context: &[&str],
    ) -> Option<AdjectiveForm> {
        let rules = self.language_rules(language)?;
        let skip = context.len().saturating_sub(ADJECTIVE_CONTEXT_WORDS);
        let mut candidate = String::new();
        for word in &context[skip..] {
            candidate.push_str(word);
            candidate.push(' ');
        }
        candidate.push_str(surface);
        let candidate = candidate.to_lowercase();

        let m = rules.adjectives().first_match(&candidate)?;
        Some(AdjectiveForm {
            text: surface.to_string(),
            lemma: lemma.map(str::to_string),
            gender: m.outcome.gender,
            number: m.outcome.number,
            degree: m.outcome.degree,
            language,
            alternatives: m.alternatives.into_iter().copied().collect(),
        })
    }

    /// Dispatch one token by its lexical type
    pub fn classify(&self, language: Language, token: &Token, context: &[&str]) -> Option<MorphologicalForm> {
        match token.kind {
            LexicalType::Verb => self
                .analyze_verb(language, &token.text, token.lemma())
                .map(MorphologicalForm::Verb),
            LexicalType::Noun | LexicalType::Pronoun => self
                .analyze_nominal(language, &token.text, token.lemma())
                .map(MorphologicalForm::Nominal),
            LexicalType::Adjective => self
                .analyze_adjective(language, &token.text, token.lemma(), context)
                .map(MorphologicalForm::Adjective),
            _ => None,
        }
    }

    /// Classify a stream in a detected language; languages without a rule
    /// table get no entries
    pub fn classify_detected(&self, language: &DetectedLanguage, tokens: &[Token]) -> Vec<MorphologyEntry> {
        match language.supported() {
            Some(language) => self.classify_tokens(language, tokens),
            None => {
                log::debug!("No rule tables for `{language}`, skipping morphology");
                Vec::new()
            }
        }
    }

    /// Classify every eligible token of a tagged stream.
    ///
    /// Adjective context is the run of words since the last punctuation
    /// mark. Tokens without a matching rule are left out.
    pub fn classify_tokens(&self, language: Language, tokens: &[Token]) -> Vec<MorphologyEntry> {
        if self.language_rules(language).is_none() {
            return Vec::new();
        }

        let mut entries = Vec::new();
        let mut context: Vec<&str> = Vec::new();
        for (token_index, token) in tokens.iter().enumerate() {
            match token.kind {
                LexicalType::Whitespace => continue,
                LexicalType::Punctuation => {
                    context.clear();
                    continue;
                }
                _ => {}
            }
            if let Some(form) = self.classify(language, token, &context) {
                entries.push(MorphologyEntry { token_index, form });
            }
            if context.len() == ADJECTIVE_CONTEXT_WORDS {
                context.remove(0);
            }
            context.push(&token.text);
        }
        entries
    }
}
