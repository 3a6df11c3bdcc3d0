use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::text::char_offset;
use crate::{Correction, CorrectionType, Position, Severity};

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

struct CorrectionRule {
    pattern: Regex,
    /// Replacement template; `$1`, `$2` expand capture groups.
    suggested: &'static str,
    kind: CorrectionType,
    severity: Severity,
    explanation: &'static str,
}

fn rule(
    pattern: &str,
    suggested: &'static str,
    kind: CorrectionType,
    severity: Severity,
    explanation: &'static str,
) -> CorrectionRule {
    CorrectionRule {
        pattern: Regex::new(pattern).unwrap(),
        suggested,
        kind,
        severity,
        explanation,
    }
}

const ACCENT_EXPLANATION: &str = "Palavra sem acentuação gráfica obrigatória.";

const ACCENT_DICTIONARY: &[(&str, &str)] = &[
    ("educacao", "educação"),
    ("pais", "país"),
    ("importancia", "importância"),
    ("nivel", "nível"),
    ("politica", "política"),
    ("politicas", "políticas"),
    ("saude", "saúde"),
    ("historia", "história"),
    ("analise", "análise"),
    ("publico", "público"),
    ("publica", "pública"),
    ("individuos", "indivíduos"),
    ("necessario", "necessário"),
    ("tambem", "também"),
    ("violencia", "violência"),
    ("economica", "econômica"),
    ("cidadaos", "cidadãos"),
    ("familia", "família"),
    ("populacao", "população"),
];

static RULES: Lazy<Vec<CorrectionRule>> = Lazy::new(|| {
    use CorrectionType::*;

    let mut rules: Vec<CorrectionRule> = ACCENT_DICTIONARY
        .iter()
        .map(|&(wrong, right)| {
            rule(
                &format!(r"(?i)\b{wrong}\b"),
                right,
                Spelling,
                Severity::Medium,
                ACCENT_EXPLANATION,
            )
        })
        .collect();

    rules.extend([
        // Ortografia
        rule(
            r"(?i)\bconcerteza\b",
            "com certeza",
            Spelling,
            Severity::Medium,
            "A locução é escrita separadamente.",
        ),
        rule(
            r"(?i)\bporisso\b",
            "por isso",
            Spelling,
            Severity::Medium,
            "A locução é escrita separadamente.",
        ),
        rule(
            r"(?i)\bapartir\b",
            "a partir",
            Spelling,
            Severity::Medium,
            "A locução é escrita separadamente.",
        ),
        rule(
            r"(?i)\bnescess(á|a)rio\b",
            "necessário",
            Spelling,
            Severity::Medium,
            "Grafia correta: necessário.",
        ),
        rule(
            r"(?i)\bexcess(ã|a)o\b",
            "exceção",
            Spelling,
            Severity::Medium,
            "Grafia correta: exceção.",
        ),
        rule(
            r"(?i)\bprevil(é|e)gio\b",
            "privilégio",
            Spelling,
            Severity::Medium,
            "Grafia correta: privilégio.",
        ),
        // Gramática
        rule(
            r"(?i)\bmal\s+(uso|exemplo|desempenho|hábito|caráter)\b",
            "mau $1",
            Grammar,
            Severity::Medium,
            "\"Mau\" é adjetivo (oposto de bom); \"mal\" é advérbio (oposto de bem).",
        ),
        rule(
            r"(?i)\bdevido\s+que\b",
            "visto que",
            Grammar,
            Severity::Medium,
            "A locução \"devido que\" não pertence à norma padrão.",
        ),
        rule(
            r"(?i)\bem\s+vista\s+que\b",
            "tendo em vista que",
            Grammar,
            Severity::Medium,
            "A locução correta é \"tendo em vista que\".",
        ),
        // Concordância
        rule(
            r"(?i)\bhouveram\b",
            "houve",
            Agreement,
            Severity::High,
            "O verbo haver no sentido de existir é impessoal e fica no singular.",
        ),
        rule(
            r"(?i)\bfazem\s+(\d+)\s+anos\b",
            "faz $1 anos",
            Agreement,
            Severity::High,
            "O verbo fazer indicando tempo decorrido é impessoal.",
        ),
        // Sintaxe
        rule(
            r"(?i)\bentrar\s+para\s+dentro\b",
            "entrar",
            Syntax,
            Severity::Low,
            "Pleonasmo vicioso.",
        ),
        rule(
            r"(?i)\bsubir\s+para\s+cima\b",
            "subir",
            Syntax,
            Severity::Low,
            "Pleonasmo vicioso.",
        ),
        // Estilo
        rule(
            r"(?i)\bhá\s+(\d+|dois|três|muitos)\s+(dias|meses|anos)\s+atrás\b",
            "há $1 $2",
            Style,
            Severity::Low,
            "Redundância: \"há\" já indica tempo passado.",
        ),
        // Registro informal
        rule(
            r"(?i)\btava\b",
            "estava",
            Formality,
            Severity::High,
            "Forma coloquial; use a forma completa do verbo.",
        ),
        rule(
            r"(?i)\btá\b",
            "está",
            Formality,
            Severity::High,
            "Forma coloquial; use a forma completa do verbo.",
        ),
        rule(
            r"(?i)\bpra\b",
            "para",
            Formality,
            Severity::High,
            "Contração informal inadequada ao texto dissertativo.",
        ),
        rule(
            r"(?i)\bpro\b",
            "para o",
            Formality,
            Severity::High,
            "Contração informal inadequada ao texto dissertativo.",
        ),
        rule(
            r"(?i)\bcabeça-dura\b",
            "obstinado",
            Formality,
            Severity::Low,
            "Expressão coloquial.",
        ),
        // Conectivos
        rule(
            r"(?i)\bentretato\b",
            "entretanto",
            Connective,
            Severity::Medium,
            "Grafia incorreta do conectivo.",
        ),
        rule(
            r"(?i)\bafim\s+de\b",
            "a fim de",
            Connective,
            Severity::Medium,
            "A locução final \"a fim de\" é escrita separadamente.",
        ),
        // Pontuação
        rule(
            r"[ \t]+([,.;:!?])",
            "$1",
            Punctuation,
            Severity::Low,
            "Não se usa espaço antes de sinal de pontuação.",
        ),
        rule(
            r"([,;!?])(\p{L})",
            "$1 $2",
            Punctuation,
            Severity::Low,
            "Falta espaço depois do sinal de pontuação.",
        ),
    ]);

    rules
});

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn match_case(original: &str, suggested: String) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return suggested;
    }
    let mut chars = suggested.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => suggested,
    }
}

fn build_correction(text: &str, rule: &CorrectionRule, caps: &Captures<'_>) -> Option<Correction> {
    let whole = caps.get(0)?;
    let original = whole.as_str();

    let mut suggested = String::new();
    caps.expand(rule.suggested, &mut suggested);
    let suggested = match_case(original, suggested);

    let start = char_offset(text, whole.start());
    Some(Correction {
        original: original.to_string(),
        suggested,
        correction_type: rule.kind,
        position: Position {
            start,
            end: start + original.chars().count(),
        },
        explanation: Some(rule.explanation.to_string()),
        severity: Some(rule.severity),
    })
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn find_corrections(text: &str) -> Vec<Correction> {
    let mut corrections = Vec::new();
    for rule in RULES.iter() {
        for caps in rule.pattern.captures_iter(text) {
            if let Some(correction) = build_correction(text, rule, &caps) {
                corrections.push(correction);
            }
        }
    }
    tracing::debug!(count = corrections.len(), "correction pass finished");
    corrections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_keeps_leading_capital() {
        let found = find_corrections("Educacao de qualidade.");
        assert_eq!(found[0].suggested, "Educação");
    }

    #[test]
    fn capture_groups_expand_into_suggestion() {
        let found = find_corrections("Fazem 10 anos que isso mudou.");
        let agreement = found
            .iter()
            .find(|c| c.correction_type == CorrectionType::Agreement)
            .unwrap();
        assert_eq!(agreement.suggested, "Faz 10 anos");
    }

    #[test]
    fn spacing_rules_report_punctuation() {
        let found = find_corrections("Primeiro ,depois");
        let kinds: Vec<_> = found.iter().map(|c| c.correction_type).collect();
        assert_eq!(
            kinds,
            vec![CorrectionType::Punctuation, CorrectionType::Punctuation]
        );
    }
}
