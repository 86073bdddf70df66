//! Markdown output formatter

use super::text::describe_form;
use super::{label, OutputFormatter};
use anyhow::Result;
use glossa_core::TextAnalysis;
use std::io::Write;

/// Markdown formatter - one section per input with tables for factors and patterns
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    include_tokens: bool,
    document_count: usize,
    sentence_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            include_tokens: false,
            document_count: 0,
            sentence_count: 0,
        }
    }

    /// Append a token table to each section
    pub fn include_tokens(mut self, include: bool) -> Self {
        self.include_tokens = include;
        self
    }
}

/// Escape the characters that break a table cell
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_analysis(&mut self, source: &str, analysis: &TextAnalysis) -> Result<()> {
        self.document_count += 1;
        self.sentence_count += analysis.sentences.len();
        let w = &mut self.writer;

        writeln!(w, "## {source}")?;
        writeln!(w)?;
        writeln!(
            w,
            "- **Language:** {} ({:.2})",
            analysis.language.language, analysis.language.confidence
        )?;
        writeln!(
            w,
            "- **Level:** {} ({})",
            analysis.difficulty.level,
            analysis.difficulty.level.description()
        )?;
        if analysis.degraded {
            writeln!(w, "- **Degraded:** a collaborator failed")?;
        }
        writeln!(w)?;

        writeln!(w, "| Factor | Score | Rationale |")?;
        writeln!(w, "|---|---|---|")?;
        for factor in &analysis.difficulty.factors {
            writeln!(
                w,
                "| {} | {:.2} | {} |",
                label(&factor.kind),
                factor.score,
                cell(&factor.rationale)
            )?;
        }
        writeln!(w)?;

        writeln!(w, "### Sentences")?;
        writeln!(w)?;
        for (i, sentence) in analysis.sentences.iter().enumerate() {
            writeln!(
                w,
                "{}. {} *({})*",
                i + 1,
                sentence.text,
                label(&sentence.complexity)
            )?;
            for component in &sentence.components {
                writeln!(w, "   - {}: {}", label(&component.kind), component.text)?;
            }
        }
        writeln!(w)?;

        if !analysis.special_tokens.is_empty() {
            writeln!(w, "### Special tokens")?;
            writeln!(w)?;
            for special in &analysis.special_tokens {
                writeln!(w, "- `{}` ({})", special.text, special.category)?;
            }
            writeln!(w)?;
        }

        if !analysis.morphology.is_empty() {
            writeln!(w, "### Morphology")?;
            writeln!(w)?;
            for entry in &analysis.morphology {
                writeln!(w, "- {}", describe_form(&entry.form))?;
            }
            writeln!(w)?;
        }

        if !analysis.patterns.is_empty() {
            writeln!(w, "### Patterns")?;
            writeln!(w)?;
            writeln!(w, "| Category | Pattern | Frequency | Examples |")?;
            writeln!(w, "|---|---|---|---|")?;
            for pattern in &analysis.patterns {
                writeln!(
                    w,
                    "| {} | {} | {} | {} |",
                    label(&pattern.category),
                    cell(&pattern.pattern),
                    pattern.frequency,
                    cell(&pattern.examples.join("; "))
                )?;
            }
            writeln!(w)?;
        }

        if !analysis.vocabulary.is_empty() {
            writeln!(w, "### Vocabulary")?;
            writeln!(w)?;
            writeln!(w, "| Word | Type | Level | Frequency | Context |")?;
            writeln!(w, "|---|---|---|---|---|")?;
            for item in &analysis.vocabulary {
                writeln!(
                    w,
                    "| {} | {} | {} | {} | {} |",
                    cell(&item.word),
                    item.kind,
                    item.difficulty.code(),
                    item.frequency,
                    cell(item.context.as_deref().unwrap_or(""))
                )?;
            }
            writeln!(w)?;
        }

        if self.include_tokens {
            writeln!(w, "### Tokens")?;
            writeln!(w)?;
            writeln!(w, "| Span | Type | Text |")?;
            writeln!(w, "|---|---|---|")?;
            for token in analysis.tokens.iter().filter(|t| !t.text.trim().is_empty()) {
                writeln!(
                    w,
                    "| {}..{} | {} | {} |",
                    token.span.start,
                    token.span.end,
                    token.kind,
                    cell(&token.text)
                )?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Documents: {}, sentences: {}*",
            self.document_count, self.sentence_count
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
