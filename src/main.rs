use analytics::fixtures::mock_sales;
use analytics::{MarketReport, TrendEngine};
use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use configuration::{load_config, LoggingConfig};
use core_types::{CardQuery, RawSale};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod output;

use output::OutputFormat;

/// The main entry point for the Cardpulse market analyzer.
fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Must stay alive until exit so the file writer can flush.
    let _log_guard = init_tracing(&config.logging)?;

    let engine = TrendEngine::new(config.analysis);

    // Execute the appropriate command
    match cli.command {
        Commands::Analyze(args) => handle_analyze(args, &engine, cli.format),
        Commands::Demo(args) => handle_demo(args, &engine, cli.format),
        Commands::Batch(args) => handle_batch(args, &engine, cli.format),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Trend, volatility, liquidity and an investment rating from a card's sale history.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. A missing file means built-in defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// How to print the results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the sales of one card from a JSON file.
    Analyze(AnalyzeArgs),
    /// Analyze the built-in sample sale history.
    Demo(DemoArgs),
    /// Analyze many cards from one JSON file in parallel.
    Batch(BatchArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// JSON array of sales, e.g. [{"price": 100.0, "date": "2024-01-01"}].
    #[arg(long)]
    input: PathBuf,

    #[command(flatten)]
    card: CardArgs,
}

#[derive(Args)]
struct DemoArgs {
    #[command(flatten)]
    card: CardArgs,
}

#[derive(Args)]
struct BatchArgs {
    /// JSON array of {"card": {...}, "sales": [...]} entries.
    #[arg(long)]
    input: PathBuf,
}

/// Optional description of the card, used to label the report.
#[derive(Args)]
struct CardArgs {
    /// The player on the card (e.g., "Mike Trout").
    #[arg(long)]
    player: Option<String>,

    /// The card's year (e.g., "2011").
    #[arg(long)]
    year: Option<String>,

    /// The card set (e.g., "Topps Update").
    #[arg(long = "set")]
    card_set: Option<String>,

    /// Parallel, refractor or other variation.
    #[arg(long)]
    variation: Option<String>,

    /// The number printed on the card.
    #[arg(long = "number")]
    card_number: Option<String>,

    /// Grading condition (e.g., "raw", "PSA 9").
    #[arg(long, default_value = "raw")]
    condition: String,
}

impl CardArgs {
    /// Returns `None` if no player was given; the other fields only refine a player.
    fn into_query(self) -> Option<CardQuery> {
        let player_name = self.player?;
        Some(CardQuery {
            player_name,
            year: self.year,
            card_set: self.card_set,
            variation: self.variation,
            card_number: self.card_number,
            condition: self.condition,
        })
    }
}

/// One entry of a batch file.
#[derive(Debug, Deserialize)]
struct CardSales {
    card: CardQuery,
    #[serde(default)]
    sales: Vec<RawSale>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_analyze(args: AnalyzeArgs, engine: &TrendEngine, format: OutputFormat) -> anyhow::Result<()> {
    let sales: Vec<RawSale> = read_json(&args.input)?;
    tracing::info!(records = sales.len(), input = %args.input.display(), "Analyzing sale history.");

    let report = analyze_card(engine, args.card.into_query(), &sales);
    output::render(&[report], format)
}

fn handle_demo(args: DemoArgs, engine: &TrendEngine, format: OutputFormat) -> anyhow::Result<()> {
    let sales = mock_sales();
    tracing::info!(records = sales.len(), "Analyzing built-in sample history.");

    let report = analyze_card(engine, args.card.into_query(), &sales);
    output::render(&[report], format)
}

fn handle_batch(args: BatchArgs, engine: &TrendEngine, format: OutputFormat) -> anyhow::Result<()> {
    let cards: Vec<CardSales> = read_json(&args.input)?;
    tracing::info!(
        cards = cards.len(),
        threads = rayon::current_num_threads(),
        "Starting batch analysis."
    );

    // Set up the progress bar
    let progress_bar = ProgressBar::new(cards.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    // Each card is independent, so the engine is shared read-only across threads.
    let reports: Vec<MarketReport> = cards
        .par_iter()
        .map(|entry| {
            let report = analyze_card(engine, Some(entry.card.clone()), &entry.sales);
            progress_bar.inc(1);
            report
        })
        .collect();

    progress_bar.finish_and_clear();
    tracing::info!(cards = reports.len(), "Batch analysis complete.");

    output::render(&reports, format)
}

/// Runs the engine and stamps the result with the current time.
fn analyze_card(engine: &TrendEngine, card: Option<CardQuery>, sales: &[RawSale]) -> MarketReport {
    let analysis = engine.analyze_detailed(sales);
    if analysis.diagnostics.dropped > 0 {
        tracing::warn!(
            card = card.as_ref().map(|c| c.player_name.as_str()).unwrap_or("-"),
            accepted = analysis.diagnostics.accepted,
            dropped = analysis.diagnostics.dropped,
            "Some sale records were malformed and ignored."
        );
    }
    analysis.result.stamp(card, Utc::now())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global subscriber: stderr always, plus a daily rolling file if configured.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level))?;
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "cardpulse.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{InvestmentRating, Trend};

    #[test]
    fn cli_parses_a_full_card_description() {
        let cli = Cli::try_parse_from([
            "cardpulse",
            "--format",
            "json",
            "analyze",
            "--input",
            "sales.json",
            "--player",
            "Mike Trout",
            "--year",
            "2011",
            "--set",
            "Topps Update",
            "--number",
            "US175",
            "--condition",
            "PSA 9",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.input, PathBuf::from("sales.json"));
        let query = args.card.into_query().unwrap();
        assert_eq!(query.label(), "2011 Topps Update Mike Trout #US175 (PSA 9)");
    }

    #[test]
    fn card_is_omitted_without_a_player() {
        let cli = Cli::try_parse_from(["cardpulse", "demo", "--year", "2011"]).unwrap();
        let Commands::Demo(args) = cli.command else {
            panic!("expected demo");
        };
        assert!(args.card.into_query().is_none());
    }

    #[test]
    fn batch_entries_parse_with_defaults() {
        let entries: Vec<CardSales> = serde_json::from_str(
            r#"[
                {"card": {"player_name": "Mike Trout"}, "sales": [{"price": 10.0, "date": "2024-01-01"}]},
                {"card": {"player_name": "Shohei Ohtani", "condition": "PSA 10"}}
            ]"#,
        )
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].card.condition, "raw");
        assert!(entries[1].sales.is_empty());

        let report = analyze_card(&TrendEngine::default(), Some(entries[1].card.clone()), &entries[1].sales);
        assert_eq!(report.analysis.trend, Trend::InsufficientData);
        assert_eq!(report.analysis.investment_rating, InvestmentRating::Unknown);
    }

    #[test]
    fn one_unreadable_price_does_not_abort_the_batch() {
        let entries: Vec<CardSales> = serde_json::from_str(
            r#"[
                {"card": {"player_name": "Mike Trout"}, "sales": [
                    {"price": "n/a", "date": "2024-01-01"},
                    {"price": 100.0, "date": "2024-01-02"},
                    {"price": 100.0, "date": "2024-01-03"},
                    {"price": 100.0, "date": "2024-01-04"}
                ]},
                {"card": {"player_name": "Shohei Ohtani"}, "sales": [{"price": 1e40, "date": "2024-01-01"}]}
            ]"#,
        )
        .unwrap();

        let engine = TrendEngine::default();
        let trout = engine.analyze_detailed(&entries[0].sales);
        assert_eq!(trout.diagnostics.accepted, 3);
        assert_eq!(trout.diagnostics.dropped, 1);
        assert_eq!(trout.result.trend, Trend::Stable);

        let ohtani = analyze_card(&engine, Some(entries[1].card.clone()), &entries[1].sales);
        assert_eq!(ohtani.analysis.trend, Trend::InsufficientData);
    }
}
