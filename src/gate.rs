use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::char_len;
use crate::{Statistics, ZeroReason, HP};

static PUNCT_STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\w]+|[^\w]+$").unwrap());

pub(crate) fn theme_keywords(theme: &str) -> Vec<String> {
    theme
        .split_whitespace()
        .map(|w| PUNCT_STRIP_RE.replace_all(w, "").to_lowercase())
        .filter(|w| char_len(w) > HP.theme_keyword_min_chars)
        .collect()
}

fn evades_theme(text: &str, theme: &str) -> bool {
    let keywords = theme_keywords(theme);
    if keywords.len() < HP.theme_min_keywords {
        return false;
    }
    let lower = text.to_lowercase();
    let found = keywords.iter().filter(|k| lower.contains(k.as_str())).count();
    (found as f64 / keywords.len() as f64) < HP.theme_min_coverage
}

// Every condition runs; the last one that holds supplies the reason.
pub fn check_disqualification(
    text: &str,
    theme: &str,
    statistics: &Statistics,
) -> Option<ZeroReason> {
    let mut reason = None;

    if statistics.estimated_lines < HP.min_estimated_lines {
        reason = Some(ZeroReason::InsufficientLines);
    }
    if statistics.words_count < HP.min_words {
        reason = Some(ZeroReason::InsufficientWords);
    }
    if evades_theme(text, theme) {
        reason = Some(ZeroReason::ThemeEvasion);
    }

    reason
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_drop_short_words_and_punctuation() {
        assert_eq!(
            theme_keywords("Desafios da educação no Brasil: caminhos"),
            vec!["desafios", "educação", "brasil", "caminhos"]
        );
    }

    #[test]
    fn short_themes_never_trigger_evasion() {
        assert!(!evades_theme("texto sobre futebol", "educação no Brasil"));
    }
}
