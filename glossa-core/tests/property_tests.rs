//! Property-based tests for pipeline invariants

use glossa_core::morphology::{Mood, Number, Person, Tense, VerbFeatures};
use glossa_core::rules::RuleTable;
use glossa_core::{
    CefrLevel, DifficultyFactor, DifficultyFactorType, Language, LanguageConfidenceModel,
    RuleSet, SpecialTokenClassifier, Tokenizer,
};
use proptest::prelude::*;
use std::collections::HashMap;

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[a-zA-Zéèàç' .,!?0-9@:/-]{0,80}",
        proptest::collection::vec(
            prop_oneof![
                Just("l'ami".to_string()),
                Just("qu’il".to_string()),
                Just("https://x.com/a.b".to_string()),
                Just("a@b.com".to_string()),
                Just("2024-01-15".to_string()),
                Just("3.14".to_string()),
                Just("!!?".to_string()),
                Just("🎉".to_string()),
                "[a-z]{1,8}",
                "[ \t\n]{1,3}",
            ],
            0..20,
        )
        .prop_map(|parts| parts.concat()),
    ]
}

proptest! {
    #[test]
    fn prop_tokens_reconstruct_input(text in text_strategy()) {
        let special = SpecialTokenClassifier::builtin().unwrap();
        let rules = RuleSet::builtin().unwrap();
        for language in Language::ALL {
            let tokenizer = Tokenizer::for_language(&special, rules.get(language));
            let tokens: Vec<_> = tokenizer.tokenize(&text).collect();
            let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
            prop_assert_eq!(&rebuilt, &text);
            for token in &tokens {
                prop_assert!(!token.span.is_empty());
                prop_assert!(token.span.end <= text.len());
                prop_assert_eq!(&text[token.span.range()], token.text.as_str());
            }
        }
    }

    #[test]
    fn prop_rule_evaluation_is_deterministic(word in "[a-zéèêàç]{1,12}") {
        let morphology = glossa_core::MorphologicalAnalyzer::new(RuleSet::builtin().unwrap());
        for language in Language::ALL {
            let first = morphology.analyze_verb(language, &word, None);
            let second = morphology.analyze_verb(language, &word, None);
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn prop_reordering_changes_winner_predictably(word in "[a-z]{1,6}s") {
        let singular = VerbFeatures {
            tense: Tense::Present,
            person: Person::Third,
            number: Number::Singular,
            mood: Mood::Indicative,
        };
        let plural = VerbFeatures {
            number: Number::Plural,
            ..singular
        };
        let mut forward = RuleTable::new("forward");
        forward.push(r"(\w+)s$", singular).unwrap();
        forward.push(r"(\w+)$", plural).unwrap();
        let mut backward = RuleTable::new("backward");
        backward.push(r"(\w+)$", plural).unwrap();
        backward.push(r"(\w+)s$", singular).unwrap();

        prop_assert_eq!(*forward.first_match(&word).unwrap().outcome, singular);
        prop_assert_eq!(*backward.first_match(&word).unwrap().outcome, plural);
    }

    #[test]
    fn prop_cefr_levels_are_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(CefrLevel::from_score(low) <= CefrLevel::from_score(high));
    }

    #[test]
    fn prop_factor_scores_stay_in_unit_range(score in proptest::num::f64::ANY) {
        let factor = DifficultyFactor::new(DifficultyFactorType::Grammar, score, "");
        prop_assert!((0.0..=1.0).contains(&factor.score));
    }

    #[test]
    fn prop_dominant_language_outranks_alternatives(
        en in proptest::option::of(-0.5f64..1.0),
        fr in proptest::option::of(-0.5f64..1.0),
        other in proptest::option::of(0.0f64..1.0),
    ) {
        let mut hypotheses = HashMap::new();
        if let Some(p) = en { hypotheses.insert("en".to_string(), p); }
        if let Some(p) = fr { hypotheses.insert("fr".to_string(), p); }
        if let Some(p) = other { hypotheses.insert("de".to_string(), p); }

        let result = LanguageConfidenceModel::default().evaluate(&hypotheses);
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        for alt in &result.alternatives {
            prop_assert!(result.confidence >= alt.confidence);
            prop_assert_ne!(&alt.language, &result.language);
        }
        for pair in result.alternatives.windows(2) {
            prop_assert!(pair[0].confidence >= pair[1].confidence);
        }

        // Every positive hypothesis is ranked, unsupported codes included
        let positive: Vec<(&String, f64)> = hypotheses
            .iter()
            .filter(|(_, p)| **p > 0.0)
            .map(|(code, p)| (code, *p))
            .collect();
        if positive.is_empty() {
            prop_assert_eq!(result.language, Language::English);
        } else {
            prop_assert_eq!(result.alternatives.len() + 1, positive.len());
            let top = positive.iter().map(|(_, p)| *p).fold(0.0, f64::max);
            prop_assert_eq!(result.confidence, top);
            if let Some(p) = other.filter(|p| *p > 0.0) {
                let ranked_de = result.language.code() == "de"
                    || result.alternatives.iter().any(|a| a.language.code() == "de");
                prop_assert!(ranked_de);
                if positive.iter().all(|(code, q)| code.as_str() == "de" || *q < p) {
                    prop_assert_eq!(result.language.code(), "de");
                }
            }
        }
    }
}

#[test]
fn test_regularity_heuristic_is_stable() {
    let rules = RuleSet::builtin().unwrap();
    let fr = rules.get(Language::French).unwrap();
    for _ in 0..3 {
        assert!(!fr.is_regular_lemma(Some("être")));
        assert!(fr.is_regular_lemma(Some("parler")));
    }
}
