use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use redacao_guard::{read_input_file, read_stdin, try_analyze, AnalysisInput, AnalysisResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Full analysis result as JSON
    Json,
    /// Only the generated feedback report
    Feedback,
    /// One line per essay with the scores
    Summary,
}

#[derive(Parser)]
#[command(
    name = "redacao-guard",
    about = "Score Portuguese essays against the ENEM rubric",
    version
)]
struct Cli {
    /// Essay files to analyze (reads stdin if none provided)
    files: Vec<PathBuf>,

    /// Essay theme (proposta de redação)
    #[arg(short, long, env = "REDACAO_THEME", required_unless_present = "json_input")]
    theme: Option<String>,

    /// Essay title
    #[arg(long, env = "REDACAO_TITLE")]
    title: Option<String>,

    /// Treat each input as a JSON document with text, theme and title
    #[arg(long)]
    json_input: bool,

    #[arg(long, value_enum, env = "REDACAO_FORMAT", default_value = "json")]
    format: OutputFormat,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,
}

impl Cli {
    fn to_input(&self, raw: String, source: &str) -> Result<AnalysisInput> {
        if self.json_input {
            let mut input: AnalysisInput = serde_json::from_str(&raw)
                .map_err(redacao_guard::Error::from)
                .with_context(|| format!("parsing {source}"))?;
            if input.theme.trim().is_empty() {
                if let Some(theme) = &self.theme {
                    input.theme = theme.clone();
                }
            }
            if input.title.is_none() {
                input.title = self.title.clone();
            }
            return Ok(input);
        }

        let theme = self
            .theme
            .clone()
            .context("--theme is required for plain-text input")?;
        let mut input = AnalysisInput::new(raw, theme);
        input.title = self.title.clone();
        Ok(input)
    }

    fn render(&self, source: &str, result: &AnalysisResult) -> Result<String> {
        let out = match self.format {
            OutputFormat::Json if self.compact => serde_json::to_string(result)?,
            OutputFormat::Json => serde_json::to_string_pretty(result)?,
            OutputFormat::Feedback => result.feedback.clone(),
            OutputFormat::Summary => {
                let c = &result.score.categories;
                let mut line = format!(
                    "{source}\t{}\tC1={} C2={} C3={} C4={} C5={}",
                    result.score.total,
                    c.competencia1,
                    c.competencia2,
                    c.competencia3,
                    c.competencia4,
                    c.competencia5,
                );
                if let Some(reason) = &result.zero_reason {
                    line.push('\t');
                    line.push_str(reason.message());
                }
                line
            }
        };
        Ok(out)
    }
}

fn run(cli: &Cli, source: &str, raw: String) -> Result<()> {
    let input = cli.to_input(raw, source)?;
    let result = try_analyze(&input).with_context(|| format!("analyzing {source}"))?;

    if let Some(reason) = &result.zero_reason {
        tracing::warn!(source, %reason, "essay scored zero");
    } else {
        tracing::info!(
            source,
            words = result.statistics.words_count,
            total = result.score.total,
            "essay analyzed"
        );
    }

    println!("{}", cli.render(source, &result)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if cli.files.is_empty() {
        let raw = read_stdin()?;
        return run(&cli, "<stdin>", raw);
    }

    for path in &cli.files {
        let raw = read_input_file(path)?;
        run(&cli, &path.display().to_string(), raw)?;
    }
    Ok(())
}
