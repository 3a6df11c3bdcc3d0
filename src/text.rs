use once_cell::sync::Lazy;
use regex::Regex;

use crate::connectives::count_connectives;
use crate::{Statistics, HP};

static PARAGRAPH_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

pub fn paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK_RE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Converts a byte offset produced by the regex engine into a char offset.
pub(crate) fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

pub fn compute_statistics(text: &str) -> Statistics {
    let words_count = word_count(text);
    Statistics {
        connectives_count: count_connectives(text),
        paragraphs_count: paragraphs(text).len().max(1),
        words_count,
        characters_count: char_len(text),
        lines_count: text.lines().filter(|l| !l.trim().is_empty()).count(),
        estimated_lines: words_count.div_ceil(HP.words_per_line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_collapse_runs_of_blank_lines() {
        let text = "Primeiro.\n\n\n  \nSegundo.\r\n\r\nTerceiro.\n";
        assert_eq!(paragraphs(text), vec!["Primeiro.", "Segundo.", "Terceiro."]);
    }

    #[test]
    fn char_offset_counts_accented_letters_once() {
        let text = "ação educacao";
        let byte = text.find("educacao").unwrap();
        assert_eq!(char_offset(text, byte), 5);
    }

    #[test]
    fn empty_text_floors_paragraphs_at_one() {
        let stats = compute_statistics("");
        assert_eq!(stats.paragraphs_count, 1);
        assert_eq!(stats.words_count, 0);
        assert_eq!(stats.characters_count, 0);
        assert_eq!(stats.lines_count, 0);
        assert_eq!(stats.estimated_lines, 0);
        assert_eq!(stats.connectives_count, 0);
    }
}
