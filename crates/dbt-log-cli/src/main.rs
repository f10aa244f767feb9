//! dbt log status CLI
//!
//! The `dbt-log-status` command reads a dbt console log, keeps the per-model
//! event lines and prints:
//!
//! - the model lines with escape sequences removed
//! - one parsed record per line
//! - one consolidated record per model
//! - the models with the longest runtime
//!
//! A cleaned copy of the whole log is written next to the input as
//! `printable_<file name>` unless `--no-printable` is given.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use dbt_log_core::{
    analyze_lines, printable_path, read_log_lines, render_json, render_text, write_printable_log,
    AnalyzerConfig, RankPolicy, DEFAULT_LOG_FILE, DEFAULT_TOP_N,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "dbt-log-status")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Per-model status and slowest models from a dbt console log", long_about = None)]
struct Cli {
    /// dbt console log to analyse
    #[arg(long = "dbt-log", alias = "dbt_log", env = "DBT_LOG", default_value = DEFAULT_LOG_FILE)]
    dbt_log: PathBuf,

    /// Highest rank position shown in the runtime table
    #[arg(long, env = "DBT_LOG_TOP_N", default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Include the single slowest model in the runtime table
    #[arg(long)]
    include_slowest: bool,

    /// Do not write the cleaned printable_<log> copy
    #[arg(long)]
    no_printable: bool,

    /// Console output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn analyzer_config(&self) -> AnalyzerConfig {
        let policy = if self.include_slowest {
            RankPolicy::IncludeSlowest
        } else {
            RankPolicy::SkipSlowest
        };
        AnalyzerConfig::default()
            .with_top_n(self.top_n)
            .with_rank_policy(policy)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    dbt_log_core::init_tracing(cli.log_json, level);

    let output = run(&cli)?;
    print!("{}", output);
    Ok(())
}

/// Read, analyse and render; returns what goes to stdout.
fn run(cli: &Cli) -> Result<String> {
    let config = cli.analyzer_config();
    config.validate().context("Invalid options")?;

    let lines = read_log_lines(&cli.dbt_log)
        .with_context(|| format!("Failed to read dbt log: {:?}", cli.dbt_log))?;

    if !cli.no_printable {
        write_printable(&cli.dbt_log, &lines, &config)?;
    }

    let analysis = analyze_lines(&lines, &config).context("Failed to analyse dbt log")?;
    info!(
        event = "cli.report",
        models = analysis.consolidated.len(),
        ranked = analysis.top_runtime.len()
    );

    match cli.format {
        OutputFormat::Text => Ok(render_text(&analysis)),
        OutputFormat::Json => {
            let mut json = render_json(&analysis).context("Failed to serialize report")?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn write_printable(log_path: &Path, lines: &[String], config: &AnalyzerConfig) -> Result<()> {
    let out = printable_path(log_path, &config.printable_prefix);
    write_printable_log(&out, lines)
        .with_context(|| format!("Failed to write cleaned log: {:?}", out))
}
