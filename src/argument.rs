use once_cell::sync::Lazy;
use regex::Regex;

use crate::connectives::{common_connectives_in, word_pattern, ADVERSATIVE_RE};
use crate::text::paragraphs;
use crate::{ArgumentAnalysis, HP};

static THESIS_MARKERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        "importante",
        "fundamental",
        "essencial",
        "necessário",
        "primordial",
        "indubitável",
        "inegável",
    ]
    .iter()
    .map(|w| word_pattern(w))
    .collect()
});

static CONCLUSION_MARKERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        "portanto",
        "assim",
        "dessa forma",
        "por fim",
        "em suma",
        "diante do exposto",
        "conclui-se",
    ]
    .iter()
    .map(|w| word_pattern(w))
    .collect()
});

pub(crate) fn has_conclusion_marker(paragraph: &str) -> bool {
    CONCLUSION_MARKERS.iter().any(|re| re.is_match(paragraph))
}

fn coherence(distinct_common: usize, density: f64) -> u32 {
    let mut score = HP.coherence_base;

    if distinct_common > HP.coherence_variety_high {
        score += HP.coherence_variety_high_bonus;
    } else if distinct_common > HP.coherence_variety_low {
        score += HP.coherence_variety_low_bonus;
    }

    if density >= HP.coherence_density_high {
        score += HP.coherence_density_high_bonus;
    } else if density >= HP.coherence_density_low {
        score += HP.coherence_density_low_bonus;
    }

    score
}

pub fn analyze_argumentation(text: &str, connectives_count: usize) -> ArgumentAnalysis {
    let paras = paragraphs(text);
    let (first, last) = match (paras.first(), paras.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return ArgumentAnalysis::default(),
    };

    let has_thesis = THESIS_MARKERS.iter().any(|re| re.is_match(first));
    let has_conclusion = has_conclusion_marker(last);
    let argument_count = paras.len().saturating_sub(2);
    let counter_argument_present = ADVERSATIVE_RE.is_match(text);

    let common = common_connectives_in(text);
    let density = connectives_count as f64 / paras.len() as f64;
    let topic_coherence = coherence(common.len(), density);

    let paragraph_progression =
        paras.len() >= HP.progression_min_paragraphs && has_thesis && has_conclusion;

    tracing::debug!(
        has_thesis,
        has_conclusion,
        argument_count,
        topic_coherence,
        "argumentation analyzed"
    );

    ArgumentAnalysis {
        has_thesis,
        has_conclusion,
        argument_count,
        counter_argument_present,
        connectives_used: common
            .into_iter()
            .take(HP.connectives_used_cap)
            .map(str::to_string)
            .collect(),
        topic_coherence,
        paragraph_progression,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coherence_tops_out_at_ninety() {
        assert_eq!(coherence(0, 0.0), 50);
        assert_eq!(coherence(4, 1.0), 70);
        assert_eq!(coherence(6, 2.5), 90);
    }
}
