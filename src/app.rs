use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};

use crate::application::{analyze_colors, extract_colors, fibonacci_sum, DEFAULT_FIBONACCI_TERMS};
use crate::domain::color::ColorAnalysis;
use crate::domain::error::Result;
use crate::infrastructure::config::ConfigService;
use crate::infrastructure::db::ColorRepository;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// HTML file whose table cells hold the colors
    #[arg(default_value = "python_class_question.html")]
    pub input: PathBuf,

    /// Number of Fibonacci terms to sum
    #[arg(short, long, default_value_t = DEFAULT_FIBONACCI_TERMS)]
    pub terms: u32,

    /// TOML file with database settings (DB_* variables take precedence)
    #[arg(short, long, env = "COLORFREQ_CONFIG", default_value = crate::infrastructure::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Create the `colors` table before saving
    #[arg(long)]
    pub create_table: bool,

    /// Do not write to the database
    #[arg(long, conflicts_with = "create_table")]
    pub skip_db: bool,
}

/// Run the whole pipeline, printing the report to stdout.
///
/// Only input problems abort the run; a bad database setting is reported
/// as a failed save.
pub async fn run(cli: Cli) -> Result<()> {
    let repository = open_repository(&cli);
    execute(&cli, repository, &mut std::io::stdout()).await
}

fn open_repository(cli: &Cli) -> Option<Result<ColorRepository>> {
    if cli.skip_db {
        return None;
    }
    Some(
        ConfigService::with_config_file(&cli.config)
            .load()
            .map(ColorRepository::new),
    )
}

pub(crate) async fn execute<W: Write>(
    cli: &Cli,
    repository: Option<Result<ColorRepository>>,
    out: &mut W,
) -> Result<()> {
    let colors = extract_colors(&cli.input)?;
    info!(input = %cli.input.display(), tokens = colors.len(), "Extracted colors");

    let analysis = analyze_colors(&colors)?;
    write_statistics(out, &analysis)?;

    match repository {
        Some(repo) => match save(repo, cli.create_table, &analysis).await {
            Ok(rows) => {
                info!(rows, "Persisted frequency table");
                writeln!(out, "Colors saved to PostgreSQL successfully.")?;
            }
            Err(err) => {
                error!(error = %err, "Failed to persist colors");
                writeln!(out, "Error saving to PostgreSQL: {}", err)?;
            }
        },
        None => {
            warn!("Database write skipped");
            writeln!(out, "Saving to PostgreSQL skipped.")?;
        }
    }

    match fibonacci_sum(cli.terms) {
        Some(sum) => writeln!(out, "Fibonacci sum ({} terms): {}", cli.terms, sum)?,
        None => writeln!(
            out,
            "Fibonacci sum ({} terms): too large for a 128-bit integer",
            cli.terms
        )?,
    }
    Ok(())
}

async fn save(
    repo: Result<ColorRepository>,
    create_table: bool,
    analysis: &ColorAnalysis,
) -> Result<u64> {
    let repo = repo?;
    if create_table {
        repo.ensure_schema().await?;
    }
    repo.save_frequencies(&analysis.frequencies).await
}

fn write_statistics<W: Write>(out: &mut W, analysis: &ColorAnalysis) -> Result<()> {
    let (top_color, top_count) = &analysis.most_common;

    writeln!(out, "Mean color: {}", analysis.mean_color)?;
    writeln!(out, "Most worn color: ({:?}, {})", top_color, top_count)?;
    writeln!(out, "Median color(s): {:?}", analysis.median_colors)?;
    writeln!(out, "Variance: {}", analysis.variance)?;
    writeln!(out, "Probability of red: {}", analysis.prob_red)?;
    Ok(())
}
