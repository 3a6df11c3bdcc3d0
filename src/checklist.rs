use std::collections::HashSet;

use crate::{
    ArgumentAnalysis, ArgumentationChecklist, CohesionChecklist, DetailLevel, ErrorCounts,
    EvaluationChecklist, InterventionAnalysis, InterventionChecklist, LanguageNormChecklist,
    ScoreCategories, SocioculturalReferences, Statistics, ThemeChecklist,
};

const MAX_SPELLING_ERRORS: usize = 2;
const MAX_AGREEMENT_ERRORS: usize = 1;
const MAX_PUNCTUATION_ERRORS: usize = 2;
const MAX_SYNTAX_ERRORS: usize = 1;
const MIN_PARAGRAPHS: usize = 3;
const MIN_CONNECTIVES: usize = 5;
const MIN_DISTINCT_CONNECTIVES: usize = 3;
const MIN_COHESION_SCORE: u32 = 120;

pub fn build_checklist(
    categories: &ScoreCategories,
    statistics: &Statistics,
    error_counts: &ErrorCounts,
    repertoire: &SocioculturalReferences,
    argument: &ArgumentAnalysis,
    intervention: &InterventionAnalysis,
) -> EvaluationChecklist {
    let enough_connectives = statistics.connectives_count >= MIN_CONNECTIVES;
    let distinct_connectives = argument
        .connectives_used
        .iter()
        .map(|c| c.to_lowercase())
        .collect::<HashSet<_>>()
        .len();

    EvaluationChecklist {
        competencia1: LanguageNormChecklist {
            correct_spelling: error_counts.spelling <= MAX_SPELLING_ERRORS,
            proper_agreement: error_counts.agreement <= MAX_AGREEMENT_ERRORS,
            good_punctuation: error_counts.punctuation <= MAX_PUNCTUATION_ERRORS,
            formal_language: error_counts.formality == 0,
            syntax_coherence: error_counts.syntax <= MAX_SYNTAX_ERRORS,
        },
        competencia2: ThemeChecklist {
            follows_topic: true,
            uses_knowledge: repertoire.present,
            has_essay_structure: statistics.paragraphs_count >= MIN_PARAGRAPHS,
        },
        competencia3: ArgumentationChecklist {
            has_thesis: argument.has_thesis,
            has_arguments: argument.argument_count >= 1,
            uses_connectives: enough_connectives,
            topic_progression: argument.paragraph_progression,
            counter_argument: argument.counter_argument_present,
        },
        competencia4: CohesionChecklist {
            uses_connectives: enough_connectives,
            varied_vocabulary: distinct_connectives >= MIN_DISTINCT_CONNECTIVES,
            paragraph_cohesion: categories.competencia4 >= MIN_COHESION_SCORE,
        },
        competencia5: InterventionChecklist {
            has_solution: intervention.has_agent && intervention.has_action,
            detailed_solution: intervention.detail_level == DetailLevel::High,
            feasible_solution: intervention.has_means,
            respects_human_rights: intervention.respects_human_rights,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RepertoireQuality;

    fn no_repertoire() -> SocioculturalReferences {
        SocioculturalReferences {
            present: false,
            examples: vec!["não identificado".to_string()],
            quality: RepertoireQuality::Poor,
            kind: "não identificado".to_string(),
        }
    }

    #[test]
    fn bare_records_fail_most_items() {
        let checklist = build_checklist(
            &ScoreCategories::default(),
            &Statistics::default(),
            &ErrorCounts::default(),
            &no_repertoire(),
            &ArgumentAnalysis::default(),
            &InterventionAnalysis::default(),
        );
        assert!(checklist.competencia1.correct_spelling);
        assert!(checklist.competencia2.follows_topic);
        assert!(!checklist.competencia2.uses_knowledge);
        assert!(!checklist.competencia3.has_arguments);
        assert!(!checklist.competencia4.paragraph_cohesion);
        assert!(!checklist.competencia5.has_solution);
    }

    #[test]
    fn informal_register_fails_formal_language() {
        let counts = ErrorCounts {
            formality: 1,
            spelling: 3,
            ..ErrorCounts::default()
        };
        let checklist = build_checklist(
            &ScoreCategories::default(),
            &Statistics::default(),
            &counts,
            &no_repertoire(),
            &ArgumentAnalysis::default(),
            &InterventionAnalysis::default(),
        );
        assert!(!checklist.competencia1.formal_language);
        assert!(!checklist.competencia1.correct_spelling);
        assert!(checklist.competencia1.proper_agreement);
    }

    #[test]
    fn complete_proposal_is_detailed() {
        let intervention = InterventionAnalysis {
            has_intervention: true,
            has_agent: true,
            has_action: true,
            has_means: true,
            has_effect: true,
            respects_human_rights: false,
            detail_level: DetailLevel::High,
            final_paragraph_length: 250,
        };
        let checklist = build_checklist(
            &ScoreCategories::default(),
            &Statistics::default(),
            &ErrorCounts::default(),
            &no_repertoire(),
            &ArgumentAnalysis::default(),
            &intervention,
        );
        assert!(checklist.competencia5.has_solution);
        assert!(checklist.competencia5.detailed_solution);
        assert!(checklist.competencia5.feasible_solution);
        assert!(!checklist.competencia5.respects_human_rights);
    }
}
