//! End-to-end tests for the complete analysis pipeline

use glossa_core::morphology::{Case, Degree, Gender, Mood, Number, Person, Tense};
use glossa_core::{
    CefrLevel, Collaborators, ComponentType, DifficultyFactor, DifficultyFactorType,
    DifficultyScorer, Language, LexicalClass, LexicalType, MorphologicalAnalyzer,
    MorphologicalForm, PatternCategory, PrecomputedTags, RuleSet, SpecialCategory, Span,
    TagResult, TextAnalyzer,
};

fn analyzer() -> TextAnalyzer {
    TextAnalyzer::new().unwrap()
}

#[test]
fn test_regular_french_verb() {
    let morphology = MorphologicalAnalyzer::new(RuleSet::builtin().unwrap());
    let form = morphology
        .analyze_verb(Language::French, "parle", Some("parler"))
        .unwrap();
    assert_eq!(
        (form.tense, form.person, form.number, form.mood),
        (Tense::Present, Person::First, Number::Singular, Mood::Indicative)
    );
    assert!(form.is_regular);
}

#[test]
fn test_irregular_french_verb() {
    let morphology = MorphologicalAnalyzer::new(RuleSet::builtin().unwrap());
    let form = morphology
        .analyze_verb(Language::French, "suis", Some("être"))
        .unwrap();
    assert_eq!(
        (form.tense, form.person, form.number, form.mood),
        (Tense::Present, Person::First, Number::Singular, Mood::Indicative)
    );
    assert!(!form.is_regular);
}

#[test]
fn test_english_third_person() {
    let morphology = MorphologicalAnalyzer::new(RuleSet::builtin().unwrap());
    let form = morphology.analyze_verb(Language::English, "speaks", None).unwrap();
    assert_eq!(
        (form.tense, form.person, form.number),
        (Tense::Present, Person::Third, Number::Singular)
    );
}

#[test]
fn test_french_feminine_plural_noun() {
    let morphology = MorphologicalAnalyzer::new(RuleSet::builtin().unwrap());
    let form = morphology
        .analyze_nominal(Language::French, "tables", Some("table"))
        .unwrap();
    assert_eq!(form.gender, Gender::Feminine);
    assert_eq!(form.number, Number::Plural);
    assert_eq!(form.case, Case::Nominative);
}

#[test]
fn test_email_and_url_detection() {
    let text = "Contact me at a@b.com or see https://x.com today.";
    let matches = analyzer().special_tokens(text);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].category, SpecialCategory::Email);
    assert_eq!(matches[0].text, "a@b.com");
    assert_eq!(matches[1].category, SpecialCategory::Url);
    assert_eq!(matches[1].text, "https://x.com");
}

#[test]
fn test_intermediate_difficulty() {
    let factors = [
        (DifficultyFactorType::Vocabulary, 0.4),
        (DifficultyFactorType::Grammar, 0.5),
        (DifficultyFactorType::SentenceStructure, 0.4),
        (DifficultyFactorType::ContextualComplexity, 0.5),
    ]
    .into_iter()
    .map(|(kind, score)| DifficultyFactor::new(kind, score, "fixed"))
    .collect();
    let difficulty = DifficultyScorer::from_factors(factors);
    assert_eq!(difficulty.level, CefrLevel::B1);
    assert_eq!(difficulty.level.description(), "Intermediate");
}

#[test]
fn test_full_english_analysis() {
    let text = "The old cat walks in the park. The small dog sees the cat! \
                It was a piece of cake.";
    let analysis = analyzer().analyze(text, Collaborators::none());

    assert_eq!(analysis.language.language, Language::English);
    assert!(!analysis.degraded);
    assert_eq!(analysis.sentences.len(), 3);

    let first = &analysis.sentences[0];
    assert_eq!(first.components[0].kind, ComponentType::Subject);
    assert_eq!(first.components[0].text, "The old cat");
    assert_eq!(first.components[1].kind, ComponentType::Predicate);

    let grammar: Vec<_> = analysis
        .patterns
        .iter()
        .filter(|p| p.category == PatternCategory::Grammar)
        .map(|p| (p.pattern.as_str(), p.frequency))
        .collect();
    assert_eq!(
        grammar,
        vec![("adjective noun verb", 2), ("determiner adjective noun", 2)]
    );

    assert!(analysis
        .patterns
        .iter()
        .any(|p| p.category == PatternCategory::Idiom && p.pattern == "piece of cake"));

    let walks = analysis
        .morphology
        .iter()
        .find_map(|e| match &e.form {
            MorphologicalForm::Verb(v) if v.text == "walks" => Some(v),
            _ => None,
        })
        .unwrap();
    assert_eq!(walks.person, Person::Third);
    assert_eq!(walks.lemma.as_deref(), Some("walk"));
}

#[test]
fn test_full_french_analysis() {
    let text = "L'homme parle avec les enfants. Elle est la plus belle.";
    let analysis = analyzer().analyze(text, Collaborators::none());

    assert_eq!(analysis.language.language, Language::French);
    // Elision splits the article from its noun
    assert_eq!(analysis.tokens[0].text, "L'");
    assert_eq!(analysis.tokens[1].text, "homme");

    let superlative = analysis.morphology.iter().any(|e| match &e.form {
        MorphologicalForm::Adjective(a) => a.text == "belle" && a.degree == Degree::Superlative,
        _ => false,
    });
    assert!(superlative);
}

#[test]
fn test_precomputed_tags_from_async_tagger() {
    let text = "Paul mange";
    // Answers gathered ahead of time from an out-of-process tagger
    let tags: PrecomputedTags = [
        (Span::new(0, 4), TagResult::new(LexicalClass::Noun, None)),
        (Span::new(5, 10), TagResult::new(LexicalClass::Verb, Some("manger"))),
    ]
    .into_iter()
    .collect();
    let config = glossa_core::EngineConfig::builder()
        .language("fr")
        .unwrap()
        .build()
        .unwrap();
    let analysis = TextAnalyzer::with_config(config)
        .unwrap()
        .analyze(text, Collaborators::none().with_tagger(&tags));

    assert_eq!(analysis.tokens[0].kind, LexicalType::Noun);
    assert_eq!(analysis.tokens[2].kind, LexicalType::Verb);
    let mange = analysis
        .morphology
        .iter()
        .find_map(|e| match &e.form {
            MorphologicalForm::Verb(v) => Some(v),
            _ => None,
        })
        .unwrap();
    assert!(mange.is_regular);
    assert_eq!(mange.tense, Tense::Present);
}

#[test]
fn test_token_spans_cover_input() {
    let text = "Héllo, wörld! 2024-01-15 🎉 l’été";
    let tokens = analyzer().tokenize(text, Collaborators::none());
    let mut offset = 0;
    for token in &tokens {
        assert!(!token.span.is_empty());
        assert_eq!(token.span.start, offset);
        assert_eq!(&text[token.span.range()], token.text);
        offset = token.span.end;
    }
    assert_eq!(offset, text.len());
    assert!(tokens.iter().any(|t| t.kind == LexicalType::DateTime));
    assert!(tokens.iter().any(|t| t.kind == LexicalType::Emoji));
}

#[test]
fn test_empty_and_whitespace_input() {
    let a = analyzer();
    for text in ["", "   \n\t "] {
        let analysis = a.analyze(text, Collaborators::none());
        assert!(analysis.sentences.is_empty());
        assert!(analysis.morphology.is_empty());
        assert!(analysis.special_tokens.is_empty());
        assert_eq!(analysis.difficulty.level, CefrLevel::A1);
    }
}
