use once_cell::sync::Lazy;
use regex::Regex;

use crate::{RepertoireQuality, SocioculturalReferences, HP};

const NOT_IDENTIFIED: &str = "não identificado";

struct RepertoireCategory {
    label: &'static str,
    generic_example: &'static str,
    patterns: Vec<Regex>,
}

fn alternation(words: &[&str]) -> Regex {
    let alt = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b({alt})\b")).unwrap()
}

static CATEGORIES: Lazy<Vec<RepertoireCategory>> = Lazy::new(|| {
    vec![
        RepertoireCategory {
            label: "filosófico",
            generic_example: "conceitos filosóficos",
            patterns: vec![
                alternation(&[
                    "platão", "aristóteles", "sócrates", "kant", "nietzsche", "sartre",
                    "foucault", "marx", "hegel", "schopenhauer", "rousseau", "descartes",
                    "locke", "hume", "spinoza", "heidegger", "voltaire", "hobbes", "bacon",
                    "hannah arendt", "bauman", "bourdieu",
                ]),
                alternation(&[
                    "ética", "moral", "epistemologia", "metafísica", "existencialismo",
                    "empirismo", "racionalismo", "positivismo", "fenomenologia", "dialética",
                    "idealismo", "materialismo", "utilitarismo", "ontologia",
                    "modernidade líquida", "contrato social",
                ]),
            ],
        },
        RepertoireCategory {
            label: "histórico",
            generic_example: "referências históricas",
            patterns: vec![
                alternation(&[
                    "segunda guerra", "guerra fria", "revolução industrial",
                    "revolução francesa", "idade média", "renascimento", "iluminismo",
                    "colonização", "ditadura", "república", "império", "escravidão",
                    "independência", "era vargas", "abolição",
                ]),
                alternation(&[
                    "getúlio vargas", "dom pedro", "princesa isabel", "napoleão", "hitler",
                    "martin luther king", "gandhi", "mandela", "churchill", "abraham lincoln",
                    "zumbi dos palmares", "tiradentes",
                ]),
            ],
        },
        RepertoireCategory {
            label: "literário",
            generic_example: "referências literárias",
            patterns: vec![
                alternation(&[
                    "machado de assis", "clarice lispector", "guimarães rosa",
                    "cecília meireles", "carlos drummond", "shakespeare", "dostoiévski",
                    "kafka", "camus", "orwell", "saramago", "graciliano ramos", "jorge amado",
                    "camões", "monteiro lobato", "aluísio azevedo",
                ]),
                alternation(&[
                    "dom casmurro", "grande sertão", "cem anos de solidão", "memórias póstumas",
                    "vidas secas", "morte e vida severina", "1984", "crime e castigo",
                    "a metamorfose", "o cortiço", "capitães da areia", "ensaio sobre a cegueira",
                ]),
            ],
        },
        RepertoireCategory {
            label: "jurídico",
            generic_example: "referências jurídicas",
            patterns: vec![
                alternation(&[
                    "constituição federal", "código civil", "código penal",
                    "estatuto da criança", "estatuto do idoso", "lei maria da penha",
                    "declaração universal dos direitos humanos", "carta magna",
                    "lei de diretrizes e bases", "marco civil da internet",
                ]),
                alternation(&[
                    "direito constitucional", "direitos humanos", "direitos fundamentais",
                    "estado democrático de direito", "princípio da dignidade",
                    "hermenêutica jurídica", "devido processo legal",
                ]),
            ],
        },
        RepertoireCategory {
            label: "científico",
            generic_example: "referências científicas e estatísticas",
            patterns: vec![
                alternation(&[
                    "ibge", "ipea", "onu", "unicef", "oms", "pnud", "unesco", "ocde", "fmi",
                    "banco mundial", "datafolha", "fiocruz",
                ]),
                alternation(&[
                    "método científico", "estudo longitudinal", "amostragem estatística",
                    "correlação", "causalidade", "pesquisa quantitativa",
                    "pesquisa qualitativa", "revisão sistemática",
                ]),
            ],
        },
    ]
});

/// Framing phrase, then a recognized keyword, up to the end of the sentence.
static EXAMPLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(?:conforme|segundo|como afirma|como defende|de acordo com)\b[^.]{0,80}?\b(?:platão|aristóteles|sócrates|kant|nietzsche|sartre|foucault|marx|bauman|hannah arendt)\b[^.]*\.",
        r"(?i)\b(?:como ocorreu|durante|no período|desde)\b[^.]{0,80}?\b(?:segunda guerra|revolução francesa|revolução industrial|ditadura|era vargas|escravidão)\b[^.]*\.",
        r"(?i)\b(?:como retratado|como escreveu|na obra|no livro|no romance)\b[^.]{0,80}?\b(?:machado de assis|clarice lispector|dom casmurro|vidas secas|graciliano ramos|1984)\b[^.]*\.",
        r"(?i)\b(?:segundo a|conforme a|de acordo com a|prevista na|previsto na|garantido pela)\b[^.]{0,80}?\b(?:constituição federal|carta magna|código civil|estatuto|declaração universal)\b[^.]*\.",
        r"(?i)\b(?:dados do|dados da|pesquisa do|pesquisa da|segundo o|segundo a|relatório da|relatório do)\b[^.]{0,80}?\b(?:ibge|ipea|onu|unicef|oms|unesco|ocde|fiocruz)\b[^.]*\.",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

fn quality_for(total_refs: usize, distinct_types: usize) -> RepertoireQuality {
    if total_refs == 0 {
        RepertoireQuality::Poor
    } else if distinct_types >= 3 && total_refs >= 4 {
        RepertoireQuality::Excellent
    } else if distinct_types >= 2 && total_refs >= 3 {
        RepertoireQuality::Good
    } else {
        RepertoireQuality::Average
    }
}

fn framed_examples(text: &str) -> Vec<String> {
    EXAMPLE_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(text))
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .take(HP.repertoire_example_cap)
        .collect()
}

pub fn detect_repertoire(text: &str) -> SocioculturalReferences {
    let per_category: Vec<(&RepertoireCategory, usize)> = CATEGORIES
        .iter()
        .map(|cat| {
            let refs: usize = cat.patterns.iter().map(|re| re.find_iter(text).count()).sum();
            (cat, refs)
        })
        .collect();

    let matched: Vec<&RepertoireCategory> = per_category
        .iter()
        .filter(|(_, refs)| *refs > 0)
        .map(|(cat, _)| *cat)
        .collect();
    let total_refs: usize = per_category.iter().map(|(_, refs)| refs).sum();
    let quality = quality_for(total_refs, matched.len());

    let kind = if matched.is_empty() {
        NOT_IDENTIFIED.to_string()
    } else {
        matched.iter().map(|c| c.label).collect::<Vec<_>>().join(" ")
    };

    let mut examples = framed_examples(text);
    if examples.is_empty() {
        examples = matched
            .iter()
            .map(|c| c.generic_example.to_string())
            .collect();
    }
    if examples.is_empty() {
        examples.push(NOT_IDENTIFIED.to_string());
    }

    tracing::debug!(total_refs, types = matched.len(), ?quality, "repertoire detected");

    SocioculturalReferences {
        present: total_refs > 0,
        examples,
        quality,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_ladder() {
        assert_eq!(quality_for(0, 0), RepertoireQuality::Poor);
        assert_eq!(quality_for(1, 1), RepertoireQuality::Average);
        assert_eq!(quality_for(5, 1), RepertoireQuality::Average);
        assert_eq!(quality_for(3, 2), RepertoireQuality::Good);
        assert_eq!(quality_for(4, 3), RepertoireQuality::Excellent);
        assert_eq!(quality_for(3, 3), RepertoireQuality::Good);
    }

    #[test]
    fn framed_citation_becomes_example() {
        let refs = detect_repertoire("Segundo dados do IBGE, o analfabetismo persiste no país.");
        assert_eq!(
            refs.examples,
            vec!["dados do IBGE, o analfabetismo persiste no país."]
        );
        assert_eq!(refs.kind, "científico");
    }
}
