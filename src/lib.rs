//! Heuristic ENEM-rubric analyzer for Portuguese essays.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

mod argument;
mod checklist;
mod connectives;
mod corrections;
mod error;
mod feedback;
mod gate;
mod intervention;
mod repertoire;
mod scoring;
mod text;

pub use argument::analyze_argumentation;
pub use checklist::build_checklist;
pub use connectives::count_connectives;
pub use corrections::find_corrections;
pub use error::{read_input_file, read_stdin, Error, Result};
pub use feedback::format_feedback;
pub use gate::check_disqualification;
pub use intervention::analyze_intervention;
pub use repertoire::detect_repertoire;
pub use scoring::{quantize_to_enem_scale, score_competencies, ScoringInput};
pub use text::{compute_statistics, paragraphs};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub text: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl AnalysisInput {
    pub fn new(text: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            theme: theme.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(Error::EmptyText);
        }
        if self.theme.trim().is_empty() {
            return Err(Error::EmptyTheme);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionType {
    Spelling,
    Grammar,
    Punctuation,
    Agreement,
    Syntax,
    Formality,
    Connective,
    Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Span of a correction, in character (not byte) offsets into the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub original: String,
    pub suggested: String,
    #[serde(rename = "type")]
    pub correction_type: CorrectionType,
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreCategories {
    pub competencia1: u32,
    pub competencia2: u32,
    pub competencia3: u32,
    pub competencia4: u32,
    pub competencia5: u32,
}

impl ScoreCategories {
    pub fn as_array(&self) -> [u32; 5] {
        [
            self.competencia1,
            self.competencia2,
            self.competencia3,
            self.competencia4,
            self.competencia5,
        ]
    }

    pub fn total(&self) -> u32 {
        self.as_array().iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisScore {
    pub total: u32,
    pub categories: ScoreCategories,
}

impl From<ScoreCategories> for AnalysisScore {
    fn from(categories: ScoreCategories) -> Self {
        Self {
            total: categories.total(),
            categories,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub connectives_count: usize,
    pub paragraphs_count: usize,
    pub words_count: usize,
    pub characters_count: usize,
    pub lines_count: usize,
    pub estimated_lines: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepertoireQuality {
    Poor,
    Average,
    Good,
    Excellent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocioculturalReferences {
    pub present: bool,
    pub examples: Vec<String>,
    pub quality: RepertoireQuality,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentAnalysis {
    pub has_thesis: bool,
    pub has_conclusion: bool,
    pub argument_count: usize,
    pub counter_argument_present: bool,
    pub connectives_used: Vec<String>,
    /// Base 50 plus two bonuses of at most 20 each, so 50..=90 whenever the
    /// text has a paragraph.
    pub topic_coherence: u32,
    pub paragraph_progression: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionAnalysis {
    pub has_intervention: bool,
    pub has_agent: bool,
    pub has_action: bool,
    pub has_means: bool,
    pub has_effect: bool,
    pub respects_human_rights: bool,
    pub detail_level: DetailLevel,
    pub final_paragraph_length: usize,
}

impl InterventionAnalysis {
    pub fn element_count(&self) -> usize {
        [
            self.has_agent,
            self.has_action,
            self.has_means,
            self.has_effect,
            self.respects_human_rights,
        ]
        .iter()
        .filter(|flag| **flag)
        .count()
    }

    pub fn is_complete(&self) -> bool {
        self.element_count() == 5
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ErrorCounts {
    pub spelling: usize,
    pub grammar: usize,
    pub punctuation: usize,
    pub agreement: usize,
    pub syntax: usize,
    pub formality: usize,
}

impl ErrorCounts {
    pub fn from_corrections(corrections: &[Correction]) -> Self {
        let mut counts = Self::default();
        for c in corrections {
            match c.correction_type {
                CorrectionType::Spelling => counts.spelling += 1,
                CorrectionType::Grammar => counts.grammar += 1,
                CorrectionType::Punctuation => counts.punctuation += 1,
                CorrectionType::Agreement => counts.agreement += 1,
                CorrectionType::Syntax => counts.syntax += 1,
                CorrectionType::Formality => counts.formality += 1,
                CorrectionType::Connective | CorrectionType::Style => {}
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageNormChecklist {
    pub correct_spelling: bool,
    pub proper_agreement: bool,
    pub good_punctuation: bool,
    pub formal_language: bool,
    pub syntax_coherence: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeChecklist {
    pub follows_topic: bool,
    pub uses_knowledge: bool,
    pub has_essay_structure: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentationChecklist {
    pub has_thesis: bool,
    pub has_arguments: bool,
    pub uses_connectives: bool,
    pub topic_progression: bool,
    pub counter_argument: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohesionChecklist {
    pub uses_connectives: bool,
    pub varied_vocabulary: bool,
    pub paragraph_cohesion: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionChecklist {
    pub has_solution: bool,
    pub detailed_solution: bool,
    pub feasible_solution: bool,
    pub respects_human_rights: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EvaluationChecklist {
    pub competencia1: LanguageNormChecklist,
    pub competencia2: ThemeChecklist,
    pub competencia3: ArgumentationChecklist,
    pub competencia4: CohesionChecklist,
    pub competencia5: InterventionChecklist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroReason {
    InsufficientLines,
    InsufficientWords,
    ThemeEvasion,
}

impl ZeroReason {
    pub fn message(&self) -> &'static str {
        match self {
            ZeroReason::InsufficientLines => "Texto com menos de 7 linhas (estimativa)",
            ZeroReason::InsufficientWords => "Texto com menos de 30 palavras",
            ZeroReason::ThemeEvasion => "Possível fuga ao tema",
        }
    }
}

impl fmt::Display for ZeroReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for ZeroReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub text: String,
    pub corrections: Vec<Correction>,
    pub score: AnalysisScore,
    pub statistics: Statistics,
    pub theme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub zero_reason: Option<ZeroReason>,
    pub feedback: String,
    pub error_counts: ErrorCounts,
    pub sociocultural_references: SocioculturalReferences,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument_analysis: Option<ArgumentAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervention_analysis: Option<InterventionAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checklist: Option<EvaluationChecklist>,
}

impl AnalysisResult {
    pub fn is_disqualified(&self) -> bool {
        self.zero_reason.is_some()
    }

    pub fn sorted_corrections(&self) -> Vec<&Correction> {
        let mut sorted: Vec<&Correction> = self.corrections.iter().collect();
        sorted.sort_by_key(|c| (c.position.start, c.position.end));
        sorted
    }
}

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

pub(crate) struct Hyperparameters {
    pub words_per_line: usize,
    pub min_estimated_lines: usize,
    pub min_words: usize,
    pub theme_keyword_min_chars: usize,
    pub theme_min_keywords: usize,
    pub theme_min_coverage: f64,
    pub scale_step: u32,
    pub category_max: u32,
    pub repertoire_example_cap: usize,
    pub connectives_used_cap: usize,
    pub coherence_base: u32,
    pub coherence_variety_high: usize,
    pub coherence_variety_low: usize,
    pub coherence_variety_high_bonus: u32,
    pub coherence_variety_low_bonus: u32,
    pub coherence_density_high: f64,
    pub coherence_density_low: f64,
    pub coherence_density_high_bonus: u32,
    pub coherence_density_low_bonus: u32,
    pub progression_min_paragraphs: usize,
    pub intro_min_chars: usize,
    pub development_min_chars: usize,
    pub paragraph_cv_threshold: f64,
    pub paragraph_cv_penalty: i32,
    pub intervention_element_points: i32,
    pub intervention_min_chars: usize,
    pub intervention_short_penalty: i32,
    pub detail_high_min: usize,
    pub detail_medium_min: usize,
    pub bonus_min_words: usize,
    pub bonus_min_paragraphs: usize,
    pub bonus_min_connectives: usize,
    pub bonus_min_arguments: usize,
    pub bonus_points: u32,
    pub band_excellent_min: u32,
    pub band_very_good_min: u32,
    pub band_above_average_min: u32,
    pub band_average_min: u32,
    pub band_needs_work_min: u32,
}

pub(crate) static HP: Hyperparameters = Hyperparameters {
    words_per_line: 10,
    min_estimated_lines: 7,
    min_words: 30,
    theme_keyword_min_chars: 3,
    theme_min_keywords: 3,
    theme_min_coverage: 0.2,
    scale_step: 40,
    category_max: 200,
    repertoire_example_cap: 3,
    connectives_used_cap: 5,
    coherence_base: 50,
    coherence_variety_high: 5,
    coherence_variety_low: 3,
    coherence_variety_high_bonus: 20,
    coherence_variety_low_bonus: 10,
    coherence_density_high: 2.0,
    coherence_density_low: 1.0,
    coherence_density_high_bonus: 20,
    coherence_density_low_bonus: 10,
    progression_min_paragraphs: 3,
    intro_min_chars: 100,
    development_min_chars: 150,
    paragraph_cv_threshold: 50.0,
    paragraph_cv_penalty: 20,
    intervention_element_points: 40,
    intervention_min_chars: 200,
    intervention_short_penalty: 40,
    detail_high_min: 4,
    detail_medium_min: 2,
    bonus_min_words: 350,
    bonus_min_paragraphs: 4,
    bonus_min_connectives: 15,
    bonus_min_arguments: 3,
    bonus_points: 20,
    band_excellent_min: 900,
    band_very_good_min: 800,
    band_above_average_min: 700,
    band_average_min: 600,
    band_needs_work_min: 500,
};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyzes one essay against its theme.
pub fn analyze(text: &str, theme: &str, title: Option<&str>) -> AnalysisResult {
    let statistics = compute_statistics(text);
    tracing::debug!(
        words = statistics.words_count,
        paragraphs = statistics.paragraphs_count,
        connectives = statistics.connectives_count,
        estimated_lines = statistics.estimated_lines,
        "computed statistics"
    );

    let corrections = find_corrections(text);
    let error_counts = ErrorCounts::from_corrections(&corrections);
    let sociocultural_references = detect_repertoire(text);

    let zero_reason = check_disqualification(text, theme, &statistics);

    let (categories, argument_analysis, intervention_analysis, checklist) = match zero_reason {
        Some(reason) => {
            tracing::debug!(%reason, "essay disqualified, skipping competency scorers");
            (ScoreCategories::default(), None, None, None)
        }
        None => {
            let paras = paragraphs(text);
            let argument = analyze_argumentation(text, statistics.connectives_count);
            let intervention = analyze_intervention(text);
            let categories = score_competencies(&ScoringInput {
                text,
                paragraphs: &paras,
                statistics: &statistics,
                repertoire: &sociocultural_references,
                argument: &argument,
                intervention: &intervention,
            });
            let checklist = build_checklist(
                &categories,
                &statistics,
                &error_counts,
                &sociocultural_references,
                &argument,
                &intervention,
            );
            (categories, Some(argument), Some(intervention), Some(checklist))
        }
    };

    let score = AnalysisScore::from(categories);
    let feedback = format_feedback(
        &score.categories,
        score.total,
        zero_reason.as_ref().map(ZeroReason::message),
        title,
    );

    AnalysisResult {
        text: text.to_string(),
        corrections,
        score,
        statistics,
        theme: theme.to_string(),
        title: title.map(str::to_string),
        zero_reason,
        feedback,
        error_counts,
        sociocultural_references,
        argument_analysis,
        intervention_analysis,
        checklist,
    }
}

pub fn analyze_input(input: &AnalysisInput) -> AnalysisResult {
    analyze(&input.text, &input.theme, input.title.as_deref())
}

pub fn try_analyze(input: &AnalysisInput) -> Result<AnalysisResult> {
    input.validate()?;
    Ok(analyze_input(input))
}
