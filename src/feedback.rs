use std::fmt::Write;

use crate::{ScoreCategories, HP};

// ---------------------------------------------------------------------------
// Rubric tables
// ---------------------------------------------------------------------------

struct CompetencyRubric {
    heading: &'static str,
    /// Level descriptions indexed by level, 0 through 5.
    levels: [&'static str; 6],
    /// Improvement bullets shown below 160, below 120 and below 80.
    advice: [[&'static str; 2]; 3],
}

const ADVICE_CEILINGS: [u32; 3] = [160, 120, 80];

static RUBRICS: [CompetencyRubric; 5] = [
    CompetencyRubric {
        heading: "Competência 1 - Demonstrar domínio da norma padrão da língua escrita",
        levels: [
            "Demonstra desconhecimento da modalidade escrita formal da língua portuguesa.",
            "Demonstra domínio precário da modalidade escrita formal da língua portuguesa, de forma sistemática, com diversificados e frequentes desvios gramaticais, de escolha de registro e de convenções da escrita.",
            "Demonstra domínio insuficiente da modalidade escrita formal da língua portuguesa, com muitos desvios gramaticais, de escolha de registro e de convenções da escrita.",
            "Demonstra domínio mediano da modalidade escrita formal da língua portuguesa e de escolha de registro, com alguns desvios gramaticais e de convenções da escrita.",
            "Demonstra bom domínio da modalidade escrita formal da língua portuguesa e de escolha de registro, com poucos desvios gramaticais e de convenções da escrita.",
            "Demonstra excelente domínio da modalidade escrita formal da língua portuguesa e de escolha de registro. Desvios gramaticais ou de convenções da escrita serão aceitos somente como excepcionalidade e quando não caracterizarem reincidência.",
        ],
        advice: [
            [
                "Revise as regras de concordância verbal e nominal.",
                "Atente-se à pontuação, principalmente ao uso de vírgulas.",
            ],
            [
                "Evite expressões coloquiais e gírias.",
                "Cuide da ortografia e da acentuação.",
            ],
            [
                "Estude as regras básicas de sintaxe da língua portuguesa.",
                "Consulte um dicionário em caso de dúvidas na grafia das palavras.",
            ],
        ],
    },
    CompetencyRubric {
        heading: "Competência 2 - Compreender a proposta e aplicar conceitos das várias áreas de conhecimento",
        levels: [
            "Fuga ao tema/não atendimento à estrutura dissertativo-argumentativa.",
            "Apresenta o assunto, tangenciando o tema, ou demonstra domínio precário do texto dissertativo-argumentativo, com traços constantes de outros tipos textuais.",
            "Desenvolve o tema recorrendo à cópia de trechos dos textos motivadores ou apresenta domínio insuficiente do texto dissertativo-argumentativo, não atendendo à estrutura com proposição, argumentação e conclusão.",
            "Desenvolve o tema por meio de argumentação previsível e apresenta domínio mediano do texto dissertativo-argumentativo, com proposição, argumentação e conclusão.",
            "Desenvolve o tema por meio de argumentação consistente e apresenta bom domínio do texto dissertativo-argumentativo, com proposição, argumentação e conclusão.",
            "Desenvolve o tema por meio de argumentação consistente, a partir de um repertório sociocultural produtivo e apresenta excelente domínio do texto dissertativo-argumentativo.",
        ],
        advice: [
            [
                "Enriqueça seu texto com repertório sociocultural (filosofia, literatura, história, ciências, etc.).",
                "Certifique-se de abordar o tema de forma direta, sem tangenciamentos.",
            ],
            [
                "Estruture melhor seu texto em introdução, desenvolvimento e conclusão.",
                "Evite copiar trechos dos textos motivadores.",
            ],
            [
                "Estude a estrutura do texto dissertativo-argumentativo.",
                "Leia sobre o tema antes de escrever, para ampliar seu repertório.",
            ],
        ],
    },
    CompetencyRubric {
        heading: "Competência 3 - Selecionar, relacionar, organizar e interpretar informações",
        levels: [
            "Apresenta informações, fatos e opiniões não relacionados ao tema e sem defesa de um ponto de vista.",
            "Apresenta informações, fatos e opiniões pouco relacionados ao tema ou incoerentes e sem defesa de um ponto de vista.",
            "Apresenta informações, fatos e opiniões relacionados ao tema, mas desorganizados ou contraditórios e limitados aos argumentos dos textos motivadores, em defesa de um ponto de vista.",
            "Apresenta informações, fatos e opiniões relacionados ao tema, limitados aos argumentos dos textos motivadores e pouco organizados, em defesa de um ponto de vista.",
            "Apresenta informações, fatos e opiniões relacionados ao tema, de forma organizada, com indícios de autoria, em defesa de um ponto de vista.",
            "Apresenta informações, fatos e opiniões relacionados ao tema proposto, de forma consistente e organizada, configurando autoria, em defesa de um ponto de vista.",
        ],
        advice: [
            [
                "Organize melhor seus argumentos, desenvolvendo-os de forma mais aprofundada.",
                "Apresente exemplos concretos para fundamentar seus argumentos.",
            ],
            [
                "Articule melhor as informações, evitando contradições entre seus argumentos.",
                "Vá além dos textos motivadores, trazendo informações de seu conhecimento.",
            ],
            [
                "Defina claramente seu ponto de vista logo na introdução.",
                "Selecione informações relevantes e pertinentes ao tema.",
            ],
        ],
    },
    CompetencyRubric {
        heading: "Competência 4 - Demonstrar conhecimento dos mecanismos linguísticos",
        levels: [
            "Não articula as informações.",
            "Articula as partes do texto de forma precária e apresenta repertório limitado de recursos coesivos.",
            "Articula as partes do texto, de forma insuficiente, com muitas inadequações, e apresenta repertório limitado de recursos coesivos.",
            "Articula as partes do texto, de forma mediana, com inadequações, e apresenta repertório pouco diversificado de recursos coesivos.",
            "Articula as partes do texto com poucas inadequações e apresenta repertório diversificado de recursos coesivos.",
            "Articula bem as partes do texto e apresenta repertório diversificado de recursos coesivos.",
        ],
        advice: [
            [
                "Utilize mais conectivos para articular ideias (portanto, entretanto, além disso, etc.).",
                "Evite repetições desnecessárias, usando pronomes e sinônimos.",
            ],
            [
                "Dê mais atenção às transições entre parágrafos.",
                "Diversifique o vocabulário e os recursos coesivos.",
            ],
            [
                "Estude os mecanismos de coesão textual.",
                "Revise a estrutura dos períodos, preferindo frases mais claras e diretas.",
            ],
        ],
    },
    CompetencyRubric {
        heading: "Competência 5 - Elaborar proposta de intervenção para o problema",
        levels: [
            "Não apresenta proposta de intervenção ou apresenta proposta não relacionada ao tema ou ao assunto.",
            "Apresenta proposta de intervenção vaga, precária ou relacionada apenas ao assunto.",
            "Elabora, de forma insuficiente, proposta de intervenção relacionada ao tema, ou não articulada com a discussão desenvolvida no texto.",
            "Elabora, de forma mediana, proposta de intervenção relacionada ao tema e articulada à discussão desenvolvida no texto.",
            "Elabora bem proposta de intervenção relacionada ao tema e articulada à discussão desenvolvida no texto.",
            "Elabora muito bem proposta de intervenção, detalhada, relacionada ao tema e articulada à discussão desenvolvida no texto.",
        ],
        advice: [
            [
                "Detalhe mais sua proposta de intervenção, especificando agentes, ações, meios e efeitos.",
                "Articule melhor a proposta com os argumentos desenvolvidos no texto.",
            ],
            [
                "Desenvolva uma proposta viável e específica, não genérica.",
                "Explique como sua proposta poderia ser implementada na prática.",
            ],
            [
                "Sempre inclua uma proposta de intervenção na conclusão.",
                "Mencione explicitamente os agentes responsáveis pela intervenção.",
            ],
        ],
    },
];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Rubric level 0..=5, floored rather than matched exactly, so a bonus score
/// such as 180 reads as Nível 4 instead of Nível 0.
fn level_for(score: u32) -> usize {
    (score / HP.scale_step).min(5) as usize
}

fn overall_remark(total: u32) -> &'static str {
    if total >= HP.band_excellent_min {
        "Sua redação está excelente! Você demonstra ótimo domínio da escrita formal, argumentação consistente, repertório sociocultural produtivo e proposta de intervenção bem detalhada. Continue assim para manter esse alto nível de desempenho."
    } else if total >= HP.band_very_good_min {
        "Sua redação está muito boa! Você demonstra bom domínio da escrita formal, argumentação bem desenvolvida e proposta de intervenção adequada. Com alguns ajustes pontuais, poderá alcançar a faixa de excelência."
    } else if total >= HP.band_above_average_min {
        "Sua redação está acima da média! Você demonstra domínio adequado da escrita formal e boa compreensão do tema. Para melhorar, enriqueça seu repertório sociocultural e torne sua proposta de intervenção mais detalhada."
    } else if total >= HP.band_average_min {
        "Sua redação está na média. Você compreende a estrutura dissertativa-argumentativa, mas ainda há aspectos a melhorar, como coesão textual, desenvolvimento dos argumentos e elaboração da proposta de intervenção."
    } else if total >= HP.band_needs_work_min {
        "Sua redação precisa de aprimoramento. Há fragilidades na argumentação, uso dos recursos coesivos e domínio da norma padrão. Recomenda-se mais leitura e prática de escrita."
    } else {
        "Sua redação apresenta diversos pontos críticos que precisam ser trabalhados. Recomenda-se revisar a estrutura dissertativa-argumentativa, estudar a norma padrão e praticar mais a escrita."
    }
}

fn format_zero_feedback(reason: &str) -> String {
    let mut out = String::from("# REDAÇÃO COM NOTA ZERO\n\n");
    let _ = write!(out, "## Motivo\n{reason}\n\n");

    out.push_str("## Considerações\n");
    out.push_str("De acordo com os critérios do ENEM, sua redação recebeu nota zero pelo motivo indicado acima. ");

    let too_short = reason.contains("linhas") || reason.contains("palavras");
    let off_topic = reason.contains("tema");

    if too_short {
        out.push_str("Redações com menos de 7 linhas são consideradas \"textos insuficientes\" e recebem automaticamente nota zero em todas as competências.");
    } else if off_topic {
        out.push_str("Redações que não abordam o tema proposto são consideradas \"fugas ao tema\" e recebem automaticamente nota zero em todas as competências.");
    }

    out.push_str("\n\n## Recomendações\n");
    out.push_str("Para melhorar em futuras produções, observe as seguintes recomendações:\n\n");

    let recommendations: &[&str] = if too_short {
        &[
            "Desenvolva seu texto com pelo menos 20-25 linhas (equivalente a cerca de 200-250 palavras)",
            "Distribua adequadamente suas ideias em introdução, desenvolvimento (com pelo menos 2 parágrafos) e conclusão",
            "Desenvolva seus argumentos com exemplos e explicações",
        ]
    } else if off_topic {
        &[
            "Leia atentamente a proposta de redação e os textos motivadores",
            "Identifique claramente o tema antes de começar a escrever",
            "Elabore uma tese relacionada diretamente ao tema proposto",
            "Desenvolva argumentos que sustentem sua tese e estejam conectados ao tema",
        ]
    } else {
        &[
            "Estude a estrutura do texto dissertativo-argumentativo (introdução, desenvolvimento e conclusão)",
            "Apresente um ponto de vista claro sobre o tema",
            "Elabore uma proposta de intervenção para o problema abordado",
        ]
    };
    let bullets: Vec<String> = recommendations.iter().map(|r| format!("- {r}")).collect();
    out.push_str(&bullets.join("\n"));

    out
}

fn push_competency(out: &mut String, rubric: &CompetencyRubric, score: u32) {
    let level = level_for(score);
    let _ = writeln!(out, "## {}", rubric.heading);
    let _ = write!(out, "Nota: {score}/200 pontos\n\n");
    let _ = write!(out, "**Nível {level}:** {}\n\n", rubric.levels[level]);

    out.push_str("### Recomendações para melhorar:");
    for (ceiling, bullets) in ADVICE_CEILINGS.iter().zip(rubric.advice.iter()) {
        if score < *ceiling {
            for bullet in bullets {
                let _ = write!(out, "\n- {bullet}");
            }
        }
    }
    out.push_str("\n\n");
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn format_feedback(
    categories: &ScoreCategories,
    total: u32,
    zero_reason: Option<&str>,
    title: Option<&str>,
) -> String {
    if let Some(reason) = zero_reason {
        return format_zero_feedback(reason);
    }

    let mut out = String::from("# ANÁLISE DA REDAÇÃO - CRITÉRIOS ENEM\n\n");
    if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
        let _ = write!(out, "## Título: {title}\n\n");
    }

    for (rubric, score) in RUBRICS.iter().zip(categories.as_array()) {
        push_competency(&mut out, rubric, score);
    }

    let _ = write!(out, "# Nota Final: {total}/1000 pontos\n\n");
    out.push_str("## Avaliação Geral\n");
    out.push_str(overall_remark(total));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_follow_the_scale() {
        assert_eq!(level_for(0), 0);
        assert_eq!(level_for(40), 1);
        assert_eq!(level_for(120), 3);
        assert_eq!(level_for(180), 4);
        assert_eq!(level_for(200), 5);
    }

    #[test]
    fn top_scores_get_no_advice_bullets() {
        let mut out = String::new();
        push_competency(&mut out, &RUBRICS[0], 200);
        assert!(!out.contains("\n- "));
    }

    #[test]
    fn low_scores_accumulate_every_advice_tier() {
        let mut out = String::new();
        push_competency(&mut out, &RUBRICS[3], 40);
        assert_eq!(out.matches("\n- ").count(), 6);
    }
}
