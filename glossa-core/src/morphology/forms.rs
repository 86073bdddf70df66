//! Morphological feature enums and result records

use crate::types::Language;
use serde::{Deserialize, Serialize};

/// Verb tense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tense {
    /// Present
    Present,
    /// Imperfect
    Imperfect,
    /// Future
    Future,
    /// Simple past
    PastSimple,
    /// Past participle
    PastParticiple,
    /// Present participle
    PresentParticiple,
    /// Conditional
    Conditional,
    /// Pluperfect
    Pluperfect,
    /// Future perfect
    FuturePerfect,
}

/// Grammatical person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Person {
    /// First person
    First,
    /// Second person
    Second,
    /// Third person
    Third,
}

/// Grammatical number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Number {
    /// Singular
    Singular,
    /// Plural
    Plural,
}

/// Verb mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mood {
    /// Indicative
    Indicative,
    /// Subjunctive
    Subjunctive,
    /// Conditional
    Conditional,
    /// Imperative
    Imperative,
}

/// Grammatical gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gender {
    /// Masculine
    Masculine,
    /// Feminine
    Feminine,
    /// Neuter
    Neuter,
}

/// Grammatical case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Case {
    /// Nominative
    Nominative,
    /// Accusative
    Accusative,
    /// Genitive
    Genitive,
    /// Dative
    Dative,
}

/// Adjective degree of comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Degree {
    /// Positive
    Positive,
    /// Comparative
    Comparative,
    /// Superlative
    Superlative,
}

/// Features a verb rule assigns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerbFeatures {
    pub tense: Tense,
    pub person: Person,
    pub number: Number,
    pub mood: Mood,
}

/// Features a noun or pronoun rule assigns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NominalFeatures {
    pub gender: Gender,
    pub number: Number,
    pub case: Case,
}

/// Features an adjective rule assigns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdjectiveFeatures {
    pub gender: Gender,
    pub number: Number,
    pub degree: Degree,
}

/// Classified verb token.
///
/// `alternatives` holds the other readings of the winning rule's pattern; an
/// English bare stem is first person singular here but may equally be second
/// person or any plural.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerbForm {
    pub text: String,
    pub lemma: Option<String>,
    pub tense: Tense,
    pub person: Person,
    pub number: Number,
    pub mood: Mood,
    pub language: Language,
    /// Heuristic: see [`LanguageRules::is_regular_lemma`](crate::rules::LanguageRules::is_regular_lemma)
    pub is_regular: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<VerbFeatures>,
}

impl VerbForm {
    /// Features of the winning reading
    pub fn features(&self) -> VerbFeatures {
        VerbFeatures {
            tense: self.tense,
            person: self.person,
            number: self.number,
            mood: self.mood,
        }
    }

    /// Whether the surface form has other readings without more context
    pub fn is_ambiguous(&self) -> bool {
        !self.alternatives.is_empty()
    }
}

/// Classified noun or pronoun token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NominalForm {
    pub text: String,
    pub lemma: Option<String>,
    pub gender: Gender,
    pub number: Number,
    pub case: Case,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<NominalFeatures>,
}

impl NominalForm {
    /// Whether the surface form has other readings without more context
    pub fn is_ambiguous(&self) -> bool {
        !self.alternatives.is_empty()
    }
}

/// Classified adjective token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjectiveForm {
    pub text: String,
    pub lemma: Option<String>,
    pub gender: Gender,
    pub number: Number,
    pub degree: Degree,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<AdjectiveFeatures>,
}

impl AdjectiveForm {
    /// Whether the surface form has other readings without more context
    pub fn is_ambiguous(&self) -> bool {
        !self.alternatives.is_empty()
    }
}

/// Any of the three record kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "camelCase")]
pub enum MorphologicalForm {
    /// Verb reading
    Verb(VerbForm),
    /// Noun or pronoun reading
    Nominal(NominalForm),
    /// Adjective reading
    Adjective(AdjectiveForm),
}

impl MorphologicalForm {
    /// Surface text the form was built from
    pub fn text(&self) -> &str {
        match self {
            MorphologicalForm::Verb(form) => &form.text,
            MorphologicalForm::Nominal(form) => &form.text,
            MorphologicalForm::Adjective(form) => &form.text,
        }
    }
}
