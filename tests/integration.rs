use std::io::Write;

use redacao_guard::{
    analyze, paragraphs, read_input_file, score_competencies, try_analyze, AnalysisInput,
    CorrectionType, Error, RepertoireQuality, ScoringInput, ZeroReason,
};

const THEME: &str = "Os desafios da educação pública no Brasil";

const SCALE: [u32; 6] = [0, 40, 80, 120, 160, 200];

fn full_essay() -> String {
    [
        "A educação pública é fundamental para o desenvolvimento de qualquer nação democrática. \
         No Brasil, a Constituição Federal de 1988 estabelece que o acesso ao ensino é um direito \
         de todos e um dever do Estado. Entretanto, a realidade das escolas brasileiras ainda \
         revela profundas desigualdades entre regiões e grupos sociais, o que compromete o futuro \
         de milhões de jovens.",
        "Em primeiro lugar, convém destacar a falta de investimento na formação de professores. \
         Segundo dados do IBGE, uma parcela significativa dos docentes da rede pública não possui \
         formação específica na disciplina que leciona. Além disso, os baixos salários afastam \
         profissionais qualificados da carreira, o que reduz a qualidade das aulas oferecidas aos \
         estudantes. Dessa maneira, o ciclo de precariedade se perpetua de geração em geração.",
        "Em segundo lugar, a infraestrutura precária das escolas agrava o problema. Muitas \
         unidades não contam com bibliotecas, laboratórios ou acesso à internet, recursos \
         indispensáveis para um ensino de qualidade. Por outro lado, algumas iniciativas locais \
         mostram que a gestão eficiente dos recursos pode transformar a realidade de comunidades \
         inteiras. Contudo, tais experiências ainda são exceções e não alcançam a maior parte da \
         população.",
        "Ademais, a evasão escolar representa outro obstáculo relevante. Jovens de famílias de \
         baixa renda frequentemente abandonam os estudos para trabalhar e complementar o \
         orçamento doméstico. Conforme relatório da UNESCO, o abandono escolar está diretamente \
         ligado à pobreza e à ausência de políticas de permanência estudantil. Assim, a exclusão \
         educacional reforça a desigualdade social já existente no país.",
        "Portanto, é necessário que o governo federal, em parceria com estados e municípios, \
         implemente um plano nacional de valorização docente e de modernização da infraestrutura \
         escolar. Essa medida deve ocorrer por meio de investimentos permanentes, bolsas de \
         permanência para estudantes de baixa renda e programas de formação continuada, a fim de \
         garantir uma educação pública de qualidade, capaz de promover a cidadania e o respeito \
         aos direitos humanos em todo o território nacional.",
    ]
    .join("\n\n")
}

// Adds a philosophical citation and enough words to clear every bonus threshold.
fn exceptional_essay() -> String {
    let mut paras: Vec<String> = full_essay().split("\n\n").map(str::to_string).collect();
    paras[1].push_str(
        " Como afirma a filósofa Hannah Arendt, a educação é o ponto em que decidimos se \
         amamos o mundo o bastante para assumir a responsabilidade por ele.",
    );
    paras[2].push_str(
        " Nesse cenário, estudantes de regiões periféricas permanecem em desvantagem diante \
         de colegas que frequentam escolas privadas bem equipadas.",
    );
    paras.join("\n\n")
}

fn off_topic_text() -> String {
    "O campeonato de futebol deste ano teve partidas emocionantes e torcidas animadas nos estádios. "
        .repeat(6)
}

#[test]
fn short_text_is_zeroed_for_word_count() {
    let text = "Um texto curto demais que fala sobre a educação mas não chega perto do mínimo \
                exigido pela prova e por isso recebe nota zero automaticamente.";
    assert_eq!(text.split_whitespace().count(), 25);

    let result = analyze(text, "educação", None);
    assert_eq!(result.zero_reason, Some(ZeroReason::InsufficientWords));
    assert_eq!(result.score.total, 0);
    assert_eq!(result.score.categories.as_array(), [0; 5]);
    assert!(result.argument_analysis.is_none());
    assert!(result.intervention_analysis.is_none());
    assert!(result.checklist.is_none());
    assert!(
        result.feedback.contains("# REDAÇÃO COM NOTA ZERO"),
        "feedback should carry the zero notice, got:\n{}",
        result.feedback
    );
    assert!(result.feedback.contains("Texto com menos de 30 palavras"));
}

#[test]
fn misspelled_educacao_is_corrected_with_char_offsets() {
    let text = "Ação e educacao caminham juntas na construção do país.";
    let result = analyze(text, "educação", None);

    let correction = result
        .corrections
        .iter()
        .find(|c| c.original == "educacao")
        .expect("educacao should be flagged");
    assert_eq!(correction.suggested, "educação");
    assert_eq!(correction.correction_type, CorrectionType::Spelling);
    assert_eq!(correction.position.start, 7);
    assert_eq!(correction.position.end, 15);

    let span: String = text
        .chars()
        .skip(correction.position.start)
        .take(correction.position.end - correction.position.start)
        .collect();
    assert_eq!(span, correction.original);
}

#[test]
fn complete_essay_scores_full_intervention() {
    let essay = full_essay();
    let result = analyze(&essay, THEME, None);

    assert!(
        result.zero_reason.is_none(),
        "essay should pass the gate, got {:?}",
        result.zero_reason
    );
    assert_eq!(result.statistics.paragraphs_count, 5);
    assert_eq!(
        result.score.categories.competencia5, 200,
        "intervention: {:?}",
        result.intervention_analysis
    );
    assert!(
        result.sociocultural_references.quality >= RepertoireQuality::Good,
        "repertoire: {:?}",
        result.sociocultural_references
    );
    assert!(result.sociocultural_references.present);

    let argument = result.argument_analysis.as_ref().expect("argument analysis");
    assert!(argument.has_thesis);
    assert!(argument.has_conclusion);
    assert_eq!(argument.argument_count, 3);
    assert!(argument.counter_argument_present);
    assert!(argument.connectives_used.len() >= 3);

    let checklist = result.checklist.expect("checklist");
    assert!(checklist.competencia2.has_essay_structure);
    assert!(checklist.competencia5.has_solution);
    assert!(checklist.competencia5.respects_human_rights);
}

#[test]
fn exceptional_essay_gets_bonus_on_quantized_scores() {
    let essay = exceptional_essay();
    let result = analyze(&essay, THEME, None);

    assert!(result.zero_reason.is_none(), "{:?}", result.zero_reason);
    assert!(
        result.statistics.words_count > 350,
        "words: {}",
        result.statistics.words_count
    );
    assert!(result.statistics.connectives_count >= 15);
    assert_eq!(
        result.sociocultural_references.quality,
        RepertoireQuality::Excellent,
        "repertoire: {:?}",
        result.sociocultural_references
    );
    let argument = result.argument_analysis.clone().expect("argument analysis");
    assert!(argument.argument_count >= 3);
    assert!(argument.counter_argument_present);
    let intervention = result.intervention_analysis.expect("intervention analysis");
    assert!(intervention.is_complete(), "{intervention:?}");

    // Same records with the word count one short of the threshold.
    let paras = paragraphs(&essay);
    let mut statistics = result.statistics;
    statistics.words_count = 350;
    let plain = score_competencies(&ScoringInput {
        text: &essay,
        paragraphs: &paras,
        statistics: &statistics,
        repertoire: &result.sociocultural_references,
        argument: &argument,
        intervention: &intervention,
    });

    for (bonus, base) in result
        .score
        .categories
        .as_array()
        .into_iter()
        .zip(plain.as_array())
    {
        assert!(SCALE.contains(&base), "{base} is off the ENEM scale");
        assert_eq!(bonus, (base + 20).min(200), "base {base}");
    }
    assert_eq!(result.score.categories.competencia4, 180);
    assert_eq!(result.score.total, result.score.categories.total());
}

#[test]
fn near_exceptional_essay_gets_no_bonus() {
    // Good repertoire and 317 words: two thresholds missed.
    let result = analyze(&full_essay(), THEME, None);
    assert!(result.statistics.words_count <= 350);
    for score in result.score.categories.as_array() {
        assert!(SCALE.contains(&score), "{score} carries a bonus");
    }
}

#[test]
fn theme_evasion_is_detected() {
    let result = analyze(&off_topic_text(), THEME, None);
    assert_eq!(result.zero_reason, Some(ZeroReason::ThemeEvasion));
    assert_eq!(result.score.total, 0);
    assert!(result.feedback.contains("fugas ao tema"));
}

#[test]
fn last_failing_condition_supplies_the_reason() {
    // Too short on every count and off topic: theme evasion is checked last.
    let result = analyze("Futebol é paixão nacional.", THEME, None);
    assert_eq!(result.zero_reason, Some(ZeroReason::ThemeEvasion));
}

#[test]
fn total_is_sum_of_categories_on_the_scale() {
    let essay = full_essay();
    let result = analyze(&essay, THEME, None);
    let categories = result.score.categories;
    assert_eq!(result.score.total, categories.as_array().iter().sum::<u32>());
    for score in categories.as_array() {
        assert!(SCALE.contains(&score), "{score} is off the ENEM scale");
    }
}

#[test]
fn estimated_lines_round_up() {
    let result = analyze(&full_essay(), THEME, None);
    let stats = result.statistics;
    assert_eq!(stats.estimated_lines, stats.words_count.div_ceil(10));
    assert_eq!(stats.lines_count, 5);
}

#[test]
fn analysis_is_deterministic() {
    let essay = full_essay();
    let first = serde_json::to_string(&analyze(&essay, THEME, Some("Educar para incluir"))).unwrap();
    let second =
        serde_json::to_string(&analyze(&essay, THEME, Some("Educar para incluir"))).unwrap();
    assert_eq!(first, second);
}

#[test]
fn json_uses_camel_case_field_names() {
    let text = "Ação e educacao caminham juntas na construção do país.";
    let value = serde_json::to_value(analyze(text, "educação", None)).unwrap();

    assert!(value["zeroReason"].is_string());
    assert!(value["statistics"]["wordsCount"].is_u64());
    assert!(value["statistics"]["estimatedLines"].is_u64());
    assert!(value["score"]["categories"]["competencia1"].is_u64());
    assert!(value["socioculturalReferences"]["type"].is_string());
    assert!(value["errorCounts"]["spelling"].is_u64());
    assert_eq!(value["corrections"][0]["type"], "spelling");
    assert!(value.get("argumentAnalysis").is_none());
    assert!(value.get("title").is_none());
}

#[test]
fn passing_essay_serializes_null_zero_reason() {
    let value = serde_json::to_value(analyze(&full_essay(), THEME, None)).unwrap();
    assert!(value["zeroReason"].is_null());
    assert!(value["argumentAnalysis"]["topicCoherence"].is_u64());
    assert!(value["interventionAnalysis"]["hasAgent"].as_bool().unwrap());
}

#[test]
fn feedback_includes_title_and_final_score() {
    let result = analyze(&full_essay(), THEME, Some("Educar para incluir"));
    assert!(result.feedback.starts_with("# ANÁLISE DA REDAÇÃO - CRITÉRIOS ENEM"));
    assert!(result.feedback.contains("## Título: Educar para incluir"));
    let expected = format!("# Nota Final: {}/1000 pontos", result.score.total);
    assert!(
        result.feedback.contains(&expected),
        "missing '{expected}' in:\n{}",
        result.feedback
    );
    assert_eq!(result.feedback.matches("## Competência").count(), 5);
}

#[test]
fn sorted_corrections_follow_text_order() {
    let result = analyze("Tava tarde e a educacao sofre.", "educação", None);
    let sorted = result.sorted_corrections();
    assert_eq!(sorted.len(), 2);
    assert_eq!(sorted[0].original, "Tava");
    assert!(sorted
        .windows(2)
        .all(|w| w[0].position.start <= w[1].position.start));

    assert_eq!(result.error_counts.spelling, 1);
    assert_eq!(result.error_counts.formality, 1);
}

#[test]
fn empty_input_is_rejected() {
    let err = try_analyze(&AnalysisInput::new("   ", THEME)).unwrap_err();
    assert!(matches!(err, Error::EmptyText));

    let err = try_analyze(&AnalysisInput::new("Algum texto.", "")).unwrap_err();
    assert!(matches!(err, Error::EmptyTheme));
}

#[test]
fn json_input_document_round_trips_title() {
    let doc = serde_json::json!({
        "text": full_essay(),
        "theme": THEME,
        "title": "Educar para incluir",
    });
    let input: AnalysisInput = serde_json::from_value(doc).unwrap();
    let result = try_analyze(&input).unwrap();
    assert_eq!(result.title.as_deref(), Some("Educar para incluir"));
}

#[test]
fn essay_file_is_read_and_analyzed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(full_essay().as_bytes()).unwrap();

    let text = read_input_file(file.path()).unwrap();
    let result = analyze(&text, THEME, None);
    assert!(!result.is_disqualified());
}
