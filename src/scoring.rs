use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::argument::has_conclusion_marker;
use crate::text::char_len;
use crate::{
    ArgumentAnalysis, InterventionAnalysis, RepertoireQuality, ScoreCategories,
    SocioculturalReferences, Statistics, HP,
};

#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub text: &'a str,
    pub paragraphs: &'a [&'a str],
    pub statistics: &'a Statistics,
    pub repertoire: &'a SocioculturalReferences,
    pub argument: &'a ArgumentAnalysis,
    pub intervention: &'a InterventionAnalysis,
}

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static LANGUAGE_ERROR_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\b(concerteza|porisso|apartir|entretato|cabeça-dura)\b").unwrap(),
        Regex::new(r"(?i)\b(há\s+dois\s+dias\s+atrás|entrar\s+para\s+dentro)\b").unwrap(),
        Regex::new(r"(?i)\b(ansioso\s+com|em\s+vista\s+que|devido\s+que)\b").unwrap(),
        Regex::new(r"(?i)\b(fazem\s+\d+\s+anos|houveram\s+problemas)\b").unwrap(),
        // Missing space after punctuation
        Regex::new(r"[,.!?]\p{L}").unwrap(),
        // Space before punctuation
        Regex::new(r"\s[,.!?]").unwrap(),
        // Informal register
        Regex::new(r"(?i)\b(tava|tá|pra|pro)\b").unwrap(),
    ]
});

static VARIETY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(portanto|entretanto|contudo|assim|além disso|dessa forma",
        r"|por outro lado|por fim|primeiramente|ademais)\b",
    ))
    .unwrap()
});

const LANGUAGE_NORM_LADDER: &[(f64, u32)] = &[
    (0.1, 200),
    (0.5, 160),
    (2.0, 120),
    (4.0, 80),
    (6.0, 40),
];

// ---------------------------------------------------------------------------
// Scale
// ---------------------------------------------------------------------------

/// Snaps raw points onto the ENEM scale {0, 40, 80, 120, 160, 200}.
pub fn quantize_to_enem_scale(raw: i32) -> u32 {
    match raw {
        r if r >= 180 => 200,
        r if r >= 140 => 160,
        r if r >= 100 => 120,
        r if r >= 60 => 80,
        r if r >= 20 => 40,
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// Competency scorers
// ---------------------------------------------------------------------------

fn language_norm(text: &str, words: usize) -> u32 {
    if words == 0 {
        return 0;
    }
    let errors: usize = LANGUAGE_ERROR_PATTERNS
        .iter()
        .map(|re| re.find_iter(text).count())
        .sum();
    let density = errors as f64 / words as f64 * 100.0;

    let score = LANGUAGE_NORM_LADDER
        .iter()
        .find(|(ceiling, _)| density <= *ceiling)
        .map_or(0, |(_, score)| *score);
    tracing::debug!(errors, density, score, "competency 1");
    score
}

fn repertoire_points(quality: RepertoireQuality) -> i32 {
    match quality {
        RepertoireQuality::Excellent => 120,
        RepertoireQuality::Good => 100,
        RepertoireQuality::Average => 80,
        RepertoireQuality::Poor => 60,
    }
}

fn theme_and_structure(paragraphs: &[&str], repertoire: &SocioculturalReferences) -> u32 {
    let n = paragraphs.len();
    let structured = n >= HP.progression_min_paragraphs;

    let has_intro = structured && char_len(paragraphs[0]) > HP.intro_min_chars;
    let has_development = structured
        && paragraphs[1..n - 1]
            .iter()
            .all(|p| char_len(p) > HP.development_min_chars);
    let has_conclusion = paragraphs.last().is_some_and(|p| has_conclusion_marker(p));

    let mut points = if has_intro && has_development && has_conclusion {
        80
    } else if has_intro && has_development {
        60
    } else if has_intro || has_conclusion {
        40
    } else {
        0
    };

    if repertoire.present {
        points += repertoire_points(repertoire.quality);
    } else {
        points = points.min(80);
    }

    tracing::debug!(has_intro, has_development, has_conclusion, points, "competency 2");
    quantize_to_enem_scale(points)
}

fn argument_organization(argument: &ArgumentAnalysis) -> u32 {
    let mut points = if argument.argument_count >= 3 && argument.has_thesis {
        80
    } else if argument.argument_count >= 2 && argument.has_thesis {
        60
    } else if argument.argument_count >= 1 {
        40
    } else {
        0
    };

    points += if argument.topic_coherence > 80 && argument.paragraph_progression {
        80
    } else if argument.topic_coherence > 60 {
        60
    } else if argument.topic_coherence > 40 {
        40
    } else {
        0
    };

    if argument.counter_argument_present {
        points += 40;
    }

    tracing::debug!(points, "competency 3");
    quantize_to_enem_scale(points)
}

fn paragraph_length_variation(paragraphs: &[&str]) -> f64 {
    if paragraphs.is_empty() {
        return 0.0;
    }
    let lengths: Vec<f64> = paragraphs.iter().map(|p| char_len(p) as f64).collect();
    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    if mean <= 0.0 {
        return 0.0;
    }
    let mean_deviation =
        lengths.iter().map(|l| (l - mean).abs()).sum::<f64>() / lengths.len() as f64;
    mean_deviation / mean * 100.0
}

fn cohesion(text: &str, paragraphs: &[&str], statistics: &Statistics) -> u32 {
    let density = statistics.connectives_count as f64 / statistics.paragraphs_count.max(1) as f64;
    let mut points = if density >= 3.0 {
        80
    } else if density >= 2.0 {
        60
    } else if density >= 1.0 {
        40
    } else {
        0
    };

    let variety = VARIETY_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect::<HashSet<_>>()
        .len();
    points += if variety >= 5 {
        80
    } else if variety >= 3 {
        60
    } else if variety >= 1 {
        40
    } else {
        0
    };

    let cv = paragraph_length_variation(paragraphs);
    if cv > HP.paragraph_cv_threshold {
        points -= HP.paragraph_cv_penalty;
    }

    tracing::debug!(density, variety, cv, points, "competency 4");
    quantize_to_enem_scale(points)
}

fn intervention_proposal(intervention: &InterventionAnalysis) -> u32 {
    let mut points = intervention.element_count() as i32 * HP.intervention_element_points;
    if intervention.final_paragraph_length < HP.intervention_min_chars {
        points = (points - HP.intervention_short_penalty).max(0);
    }
    tracing::debug!(points, "competency 5");
    quantize_to_enem_scale(points)
}

fn is_exceptional(input: &ScoringInput<'_>) -> bool {
    input.statistics.words_count > HP.bonus_min_words
        && input.statistics.paragraphs_count >= HP.bonus_min_paragraphs
        && input.statistics.connectives_count >= HP.bonus_min_connectives
        && input.repertoire.quality == RepertoireQuality::Excellent
        && input.argument.argument_count >= HP.bonus_min_arguments
        && input.argument.counter_argument_present
        && input.intervention.is_complete()
}

fn with_bonus(score: u32) -> u32 {
    (score + HP.bonus_points).min(HP.category_max)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn score_competencies(input: &ScoringInput<'_>) -> ScoreCategories {
    let mut categories = ScoreCategories {
        competencia1: language_norm(input.text, input.statistics.words_count),
        competencia2: theme_and_structure(input.paragraphs, input.repertoire),
        competencia3: argument_organization(input.argument),
        competencia4: cohesion(input.text, input.paragraphs, input.statistics),
        competencia5: intervention_proposal(input.intervention),
    };

    if is_exceptional(input) {
        tracing::debug!("exceptional essay, applying bonus");
        categories = ScoreCategories {
            competencia1: with_bonus(categories.competencia1),
            competencia2: with_bonus(categories.competencia2),
            competencia3: with_bonus(categories.competencia3),
            competencia4: with_bonus(categories.competencia4),
            competencia5: with_bonus(categories.competencia5),
        };
    }

    categories
}
