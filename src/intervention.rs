use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::{char_len, paragraphs};
use crate::{DetailLevel, InterventionAnalysis, HP};

static AGENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(governo|governos|estado|ministério|ministério da educação|prefeitura|prefeituras",
        r"|congresso|sociedade|sociedade civil|cidadãos|população|autoridades|instituições",
        r"|empresas|escola|escolas|universidades|comunidade|mídia|família|famílias|ongs)\b",
    ))
    .unwrap()
});

static ACTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(implementar|criar|desenvolver|estabelecer|promover|incentivar|fomentar",
        r"|garantir|assegurar|proporcionar|investir|fiscalizar|ampliar|intensificar|realizar",
        r"|implemente|crie|desenvolva|promova|invista|garanta|amplie)\b",
    ))
    .unwrap()
});

static MEANS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(por meio de|por meio da|por meio do|através de|através da|através do",
        r"|a partir de|mediante|utilizando|com base em|com apoio de|com o apoio de",
        r"|em parceria com|por intermédio de)\b",
    ))
    .unwrap()
});

static EFFECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(a fim de|para que|com o intuito de|com o objetivo de|visando|objetivando",
        r"|de modo a|com vistas a|no sentido de|dessa forma|desse modo|dessa maneira|com isso",
        r"|por conseguinte)\b",
    ))
    .unwrap()
});

static HUMAN_RIGHTS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(direitos humanos|direitos fundamentais|dignidade|cidadania|igualdade",
        r"|equidade|respeito|inclusão)\b",
    ))
    .unwrap()
});

static PROPOSAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(é necessário|é preciso|deve-se|devem|deve|faz-se necessário|propõe-se",
        r"|sugere-se|urge que|cabe ao|cabe à|cabe aos|cabe às|compete ao|compete à)\b",
    ))
    .unwrap()
});

fn detail_level(elements: usize) -> DetailLevel {
    if elements >= HP.detail_high_min {
        DetailLevel::High
    } else if elements >= HP.detail_medium_min {
        DetailLevel::Medium
    } else {
        DetailLevel::Low
    }
}

pub fn analyze_intervention(text: &str) -> InterventionAnalysis {
    let paras = paragraphs(text);
    let Some(last) = paras.last() else {
        return InterventionAnalysis::default();
    };

    let mut analysis = InterventionAnalysis {
        has_intervention: PROPOSAL_RE.is_match(last),
        has_agent: AGENT_RE.is_match(last),
        has_action: ACTION_RE.is_match(last),
        has_means: MEANS_RE.is_match(last),
        has_effect: EFFECT_RE.is_match(last),
        respects_human_rights: HUMAN_RIGHTS_RE.is_match(last),
        detail_level: DetailLevel::Low,
        final_paragraph_length: char_len(last),
    };
    analysis.detail_level = detail_level(analysis.element_count());
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_elements() {
        let analysis = analyze_intervention("   \n\n  ");
        assert_eq!(analysis, InterventionAnalysis::default());
    }

    #[test]
    fn only_the_final_paragraph_counts() {
        let text = "O governo deve investir por meio de parcerias.\n\nNada mais a declarar aqui.";
        let analysis = analyze_intervention(text);
        assert!(!analysis.has_agent);
        assert!(!analysis.has_means);
        assert_eq!(analysis.detail_level, DetailLevel::Low);
    }
}
