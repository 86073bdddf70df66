//! Plain text output formatter

use super::{label, OutputFormatter};
use anyhow::Result;
use glossa_core::{MorphologicalForm, TextAnalysis};
use std::io::{self, Write};

/// Plain text formatter - a sectioned report per input
pub struct TextFormatter<W: Write> {
    writer: W,
    include_tokens: bool,
    written: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            include_tokens: false,
            written: 0,
        }
    }

    /// List every token after the report
    pub fn include_tokens(mut self, include: bool) -> Self {
        self.include_tokens = include;
        self
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

/// One-line summary of a morphological form
pub(crate) fn describe_form(form: &MorphologicalForm) -> String {
    let (lemma, features, ambiguous) = match form {
        MorphologicalForm::Verb(v) => (
            &v.lemma,
            format!(
                "verb {} {} {} {}{}",
                label(&v.tense),
                label(&v.person),
                label(&v.number),
                label(&v.mood),
                if v.is_regular { "" } else { " irregular" }
            ),
            v.is_ambiguous(),
        ),
        MorphologicalForm::Nominal(n) => (
            &n.lemma,
            format!(
                "nominal {} {} {}",
                label(&n.gender),
                label(&n.number),
                label(&n.case)
            ),
            n.is_ambiguous(),
        ),
        MorphologicalForm::Adjective(a) => (
            &a.lemma,
            format!(
                "adjective {} {} {}",
                label(&a.gender),
                label(&a.number),
                label(&a.degree)
            ),
            a.is_ambiguous(),
        ),
    };
    let mut line = match lemma {
        Some(lemma) => format!("{} ({lemma}): {features}", form.text()),
        None => format!("{}: {features}", form.text()),
    };
    if ambiguous {
        line.push_str(" [ambiguous]");
    }
    line
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_analysis(&mut self, source: &str, analysis: &TextAnalysis) -> Result<()> {
        if self.written > 0 {
            writeln!(self.writer)?;
        }
        self.written += 1;
        let w = &mut self.writer;

        writeln!(w, "== {source} ==")?;
        write!(
            w,
            "Language: {} ({:.2})",
            analysis.language.language, analysis.language.confidence
        )?;
        if analysis.degraded {
            write!(w, " [degraded]")?;
        }
        writeln!(w)?;
        for alt in &analysis.language.alternatives {
            writeln!(w, "  also: {} ({:.2})", alt.language, alt.confidence)?;
        }

        let difficulty = &analysis.difficulty;
        writeln!(
            w,
            "Difficulty: {} {} ({:.2})",
            difficulty.level,
            difficulty.level.description(),
            difficulty.average
        )?;
        for factor in &difficulty.factors {
            writeln!(
                w,
                "  {}: {:.2} - {}",
                label(&factor.kind),
                factor.score,
                factor.rationale
            )?;
        }

        writeln!(w, "Sentences: {}", analysis.sentences.len())?;
        for (i, sentence) in analysis.sentences.iter().enumerate() {
            writeln!(
                w,
                "  {}. [{}] {}",
                i + 1,
                label(&sentence.complexity),
                sentence.text
            )?;
            for component in &sentence.components {
                writeln!(w, "     {}: {}", label(&component.kind), component.text)?;
            }
        }

        if !analysis.special_tokens.is_empty() {
            writeln!(w, "Special tokens:")?;
            for special in &analysis.special_tokens {
                writeln!(
                    w,
                    "  {} {}..{} {}",
                    special.category, special.span.start, special.span.end, special.text
                )?;
            }
        }

        if !analysis.morphology.is_empty() {
            writeln!(w, "Morphology:")?;
            for entry in &analysis.morphology {
                writeln!(w, "  {}", describe_form(&entry.form))?;
            }
        }

        if !analysis.patterns.is_empty() {
            writeln!(w, "Patterns:")?;
            for pattern in &analysis.patterns {
                writeln!(
                    w,
                    "  {} \"{}\" x{}",
                    label(&pattern.category),
                    pattern.pattern,
                    pattern.frequency
                )?;
            }
        }

        if !analysis.vocabulary.is_empty() {
            writeln!(w, "Vocabulary: {}", analysis.vocabulary.len())?;
            for item in &analysis.vocabulary {
                writeln!(
                    w,
                    "  {} [{} {}] x{}",
                    item.word,
                    item.kind,
                    item.difficulty.code(),
                    item.frequency
                )?;
            }
        }

        if self.include_tokens {
            writeln!(w, "Tokens:")?;
            for token in analysis.tokens.iter().filter(|t| !t.text.trim().is_empty()) {
                writeln!(
                    w,
                    "  {}..{} {} {:?}",
                    token.span.start, token.span.end, token.kind, token.text
                )?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
