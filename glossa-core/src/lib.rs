//! Rule-based English/French text analysis
//!
//! This crate tokenizes text, detects its dominant language, classifies verb,
//! noun and adjective forms against ordered regex rule tables, cuts sentences
//! into coarse subject/predicate components and estimates a CEFR difficulty
//! level. Everything is deterministic: ambiguous forms are resolved by rule
//! order, with competing readings reported as alternatives.
//!
//! # Architecture
//!
//! - **Tables**: language rule tables and special-token patterns are TOML
//!   files embedded at build time (`configs/`), compiled once and shared
//!   read-only through [`Arc`](std::sync::Arc)
//! - **Components**: [`Tokenizer`], [`SpecialTokenClassifier`],
//!   [`MorphologicalAnalyzer`], [`SentenceStructures`], [`PatternAnalyzer`],
//!   [`VocabularyAnalyzer`], [`DifficultyScorer`] and [`LanguageConfidenceModel`]
//! - **Collaborators**: part-of-speech tagging and language probabilities
//!   are supplied through the [`LexicalTagger`] and [`HypothesisSource`]
//!   traits; built-in lexicon and keyword implementations are used otherwise
//!
//! # Example
//!
//! ```rust
//! use glossa_core::{CefrLevel, Collaborators, Language, TextAnalyzer};
//!
//! let analyzer = TextAnalyzer::new().unwrap();
//! let analysis = analyzer.analyze("Je suis content. Il parle avec les amis.", Collaborators::none());
//!
//! assert_eq!(analysis.language.language, Language::French);
//! assert_eq!(analysis.sentences.len(), 2);
//! assert!(analysis.difficulty.level >= CefrLevel::A1);
//! ```

pub mod confidence;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod morphology;
pub mod patterns;
pub mod rules;
pub mod special;
pub mod structure;
pub mod tagger;
pub mod tokenizer;
pub mod types;
pub mod vocabulary;

pub use confidence::{
    HypothesisSource, KeywordHypotheses, LanguageConfidence, LanguageConfidenceModel, LanguageScore,
};
pub use config::{ConfigBuilder, EngineConfig};
pub use difficulty::{
    CefrLevel, DifficultyFactor, DifficultyFactorType, DifficultyInput, DifficultyScorer,
    FactorScorer, LearningDifficulty,
};
pub use engine::{Collaborators, TextAnalysis, TextAnalyzer, TextAnalyzerBuilder};
pub use error::{CollaboratorError, ConfigError, Error, Result};
pub use morphology::{
    AdjectiveForm, MorphologicalAnalyzer, MorphologicalForm, MorphologyEntry, NominalForm, VerbForm,
};
pub use patterns::{LanguagePattern, PatternAnalyzer, PatternCategory};
pub use rules::{LanguageRules, RuleSet, RuleSetBuilder};
pub use special::{SpecialCategory, SpecialMatch, SpecialTokenClassifier};
pub use structure::{ComponentType, Complexity, SentenceComponent, SentenceStructure, SentenceStructures};
pub use tagger::{apply_tagger, LexicalTagger, LexiconTagger, PrecomputedTags, TagResult};
pub use tokenizer::Tokenizer;
pub use types::{DetectedLanguage, Language, LexicalClass, LexicalType, Span, Token, TokenMetadata};
pub use vocabulary::{VocabularyAnalyzer, VocabularyItem};
