// Matchday rankings entry point.
//
// Startup sequence:
// 1. Parse command-line arguments
// 2. Load config
// 3. Initialize tracing (stderr, so stdout carries only the report)
// 4. Open the match data file
// 5. Feed every line to the ranking engine
// 6. Write the report to stdout

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use matchday_core::config::{self, Config};
use matchday_core::ingest::ingest;
use matchday_core::report::ReportFormat;
use matchday_core::RankingEngine;

#[derive(Parser)]
#[command(name = "matchday")]
#[command(about = "Read soccer match results and print the top teams for each match day", long_about = None)]
struct Cli {
    /// Path to a matchday.toml (defaults to ./matchday.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read and parse match data to produce rankings.
    ///
    /// Each line is one match: "<team name> <score>, <team name> <score>".
    /// A win is worth 3 points, a tie 1 point each, a loss nothing. Lines
    /// must be in date order: when a team appears a second time the current
    /// match day is over and a new one begins.
    Parse {
        /// Match data file
        file: PathBuf,

        /// Output format (text or json); overrides the config file
        #[arg(long)]
        format: Option<ReportFormat>,

        /// Standings shown per match day; overrides the config file
        #[arg(long)]
        top: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    // 1. Parse command-line arguments
    let cli = Cli::parse();

    // 2. Load config
    let config = config::load_config(cli.config.as_deref()).context("failed to load configuration")?;

    // 3. Initialize tracing
    init_tracing(&config)?;

    match cli.command {
        Commands::Parse { file, format, top } => {
            let mut config = config;
            if let Some(format) = format {
                config.report.format = format;
            }
            if let Some(top) = top {
                if top == 0 {
                    bail!("--top must be greater than 0");
                }
                config.report.top_n = top;
            }
            run_parse(&file, &config)
        }
    }
}

fn run_parse(path: &Path, config: &Config) -> anyhow::Result<()> {
    // 4. Open the match data file
    let reader = open_match_data(path)?;
    info!("Reading match data from {}", path.display());

    // 5. Feed every line to the ranking engine
    let mut engine = RankingEngine::with_config(config);
    let applied = ingest(&mut engine, reader.lines())?;
    info!(
        "Applied {} matches over {} match days",
        applied,
        engine.current_day_number()
    );

    // 6. Write the report to stdout
    let report = match config.report.format {
        ReportFormat::Text => engine.render_report(),
        ReportFormat::Json => engine
            .snapshot()
            .render(ReportFormat::Json)
            .context("failed to serialize report")?,
    };
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(report.as_bytes())
        .context("failed to write report")?;
    stdout.flush().context("failed to write report")?;
    Ok(())
}

fn open_match_data(path: &Path) -> anyhow::Result<BufReader<File>> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            bail!("file {} does not exist", path.display())
        }
        Err(e) => {
            return Err(e).with_context(|| format!("unable to read {}", path.display()));
        }
    };
    if metadata.is_dir() {
        bail!("given path is a directory, need a file");
    }
    let file = File::open(path).context("unable to open file")?;
    Ok(BufReader::new(file))
}

/// Initialize tracing to log to stderr; `RUST_LOG` overrides the config filter.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
