use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

// ---------------------------------------------------------------------------
// Word lists
// ---------------------------------------------------------------------------

/// Discourse connectives by semantic group. Entries containing `...` are
/// correlative pairs matched as two anchors on the same line.
const CONNECTIVES: &[&str] = &[
    // Aditivos
    "além disso",
    "ademais",
    "também",
    "além do mais",
    "ainda",
    "e",
    "não só... mas também",
    "tanto... quanto",
    "não apenas... como também",
    "inclusive",
    "até mesmo",
    "igualmente",
    "do mesmo modo",
    "bem como",
    // Adversativos
    "mas",
    "porém",
    "todavia",
    "contudo",
    "entretanto",
    "no entanto",
    "apesar de",
    "embora",
    "ainda que",
    "mesmo que",
    "posto que",
    "conquanto",
    "se bem que",
    "não obstante",
    "por outro lado",
    // Causais
    "porque",
    "pois",
    "já que",
    "uma vez que",
    "visto que",
    "devido a",
    "por causa de",
    "como",
    "sendo assim",
    "dado que",
    "considerando que",
    "tendo em vista que",
    "em virtude de",
    "haja vista",
    // Conclusivos
    "portanto",
    "logo",
    "por conseguinte",
    "por isso",
    "assim",
    "dessa forma",
    "desse modo",
    "então",
    "em conclusão",
    "consequentemente",
    "destarte",
    "em suma",
    "diante do exposto",
    "por fim",
    "enfim",
    // Explicativos
    "ou seja",
    "isto é",
    "a saber",
    "em outras palavras",
    "quer dizer",
    "por exemplo",
    "vale ressaltar",
    "vale lembrar",
    "em especial",
    "com efeito",
    "naturalmente",
    "cabe destacar",
    // Temporais
    "quando",
    "enquanto",
    "antes que",
    "depois que",
    "logo que",
    "desde que",
    "até que",
    "sempre que",
    "assim que",
    "à medida que",
    "ao passo que",
    "no momento em que",
    "concomitantemente",
    "simultaneamente",
    // Conformativos
    "conforme",
    "segundo",
    "consoante",
    "de acordo com",
    "em conformidade com",
    "em consonância com",
    "em harmonia com",
    // Comparativos
    "mais que",
    "menos que",
    "assim como",
    "tal qual",
    "tanto quanto",
    "do mesmo modo que",
    "da mesma maneira que",
    "à semelhança de",
    // Concessivos
    "malgrado",
    "em que pese",
    "por mais que",
    // Finais
    "para que",
    "a fim de que",
    "com o intuito de",
    "com o propósito de",
    "para",
    "a fim de",
    "com o objetivo de",
    "visando a",
    "de modo a",
    "com vistas a",
    "objetivando",
    "intencionando",
    "tencionando",
    // Alternância
    "ou",
    "ora... ora",
    "quer... quer",
    "seja... seja",
    "nem... nem",
    "já... já",
    "alternativamente",
    "em alternativa",
    // Propostas de intervenção
    "é necessário",
    "é preciso",
    "deve-se",
    "cabe ao",
    "cabe à",
    "é fundamental",
    "urge que",
    "faz-se necessário",
    "torna-se essencial",
];

pub(crate) const COMMON_CONNECTIVES: &[&str] = &[
    "portanto",
    "assim",
    "dessa forma",
    "logo",
    "por fim",
    "primeiramente",
    "além disso",
    "ademais",
    "outrossim",
    "entretanto",
    "contudo",
    "porém",
    "todavia",
    "no entanto",
    "por exemplo",
    "como",
    "tal qual",
    "conforme",
];

pub(crate) const ADVERSATIVE_CONNECTIVES: &[&str] = &[
    "entretanto",
    "contudo",
    "porém",
    "todavia",
    "no entanto",
    "apesar de",
    "embora",
    "por outro lado",
];

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

pub(crate) fn word_pattern(phrase: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase))).unwrap()
}

fn connective_pattern(connective: &str) -> Regex {
    match connective.split_once("...") {
        Some((first, second)) => Regex::new(&format!(
            r"(?i)\b{}\b[^.\n]*?\b{}\b",
            regex::escape(first.trim()),
            regex::escape(second.trim())
        ))
        .unwrap(),
        None => word_pattern(connective),
    }
}

static CONNECTIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let mut seen = HashSet::new();
    CONNECTIVES
        .iter()
        .filter(|c| seen.insert(**c))
        .map(|c| connective_pattern(c))
        .collect()
});

pub(crate) static COMMON_CONNECTIVE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| {
        COMMON_CONNECTIVES
            .iter()
            .map(|c| (*c, word_pattern(c)))
            .collect()
    });

pub(crate) static ADVERSATIVE_RE: Lazy<Regex> = Lazy::new(|| {
    let alt = ADVERSATIVE_CONNECTIVES
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b({alt})\b")).unwrap()
});

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn count_connectives(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    CONNECTIVE_PATTERNS
        .iter()
        .map(|re| re.find_iter(text).count())
        .sum()
}

pub(crate) fn common_connectives_in(text: &str) -> Vec<&'static str> {
    COMMON_CONNECTIVE_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(c, _)| *c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlative_pairs_need_both_anchors_on_one_line() {
        let re = connective_pattern("não só... mas também");
        assert!(re.is_match("Não só a escola, mas também a família"));
        assert!(!re.is_match("não só a escola.\nmas também a família"));
    }

    #[test]
    fn single_words_respect_boundaries() {
        let re = word_pattern("como");
        assert!(re.is_match("Como afirma o autor"));
        assert!(!re.is_match("uma comoção nacional"));
    }
}
