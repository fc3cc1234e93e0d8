use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use configuration::{Settings, WindowParams};
use database::{bulk_load, connect, read_csv_file, run_migrations, DbRepository, InMemoryStore, ObservationStore};
use engine::{Evaluation, StrategyEngine};
use indicatif::{ProgressBar, ProgressStyle};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use web_server::AppState;

/// The main entry point for the crossover application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => configuration::load_settings_from(path)?,
        None => configuration::load_settings()?,
    };

    // The guard flushes buffered log lines on exit and must outlive every command.
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log.filter)),
        )
        .with_writer(writer)
        .init();

    match cli.command {
        Commands::Serve => handle_serve(&settings).await,
        Commands::LoadCsv(args) => handle_load_csv(args, &settings).await,
        Commands::Evaluate(args) => handle_evaluate(args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Moving-average crossover signals and returns over OHLCV history.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a settings file. Defaults to `config.toml` in the working directory.
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API against PostgreSQL.
    Serve,
    /// Replace the stored history with the rows of a CSV file.
    LoadCsv(LoadCsvArgs),
    /// Evaluate the crossover over a CSV file without touching the database.
    Evaluate(EvaluateArgs),
}

#[derive(Parser)]
struct LoadCsvArgs {
    /// CSV file with a `datetime,open,high,low,close,volume` header.
    #[arg(long)]
    path: PathBuf,

    /// Rows per insert batch. Defaults to `loader.chunk_size`.
    #[arg(long)]
    chunk_size: Option<usize>,
}

#[derive(Parser)]
struct EvaluateArgs {
    /// CSV file with a `datetime,open,high,low,close,volume` header.
    #[arg(long)]
    path: PathBuf,

    #[command(flatten)]
    windows: WindowParams,

    /// Print the result as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn connect_repository(settings: &Settings) -> anyhow::Result<DbRepository> {
    let pool = connect(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.acquire_timeout(),
    )
    .await
    .context("Failed to connect to the database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(DbRepository::new(pool))
}

async fn handle_serve(settings: &Settings) -> anyhow::Result<()> {
    tracing::info!(address = %settings.server.address(), "Starting web server");
    let repository = connect_repository(settings).await?;
    let state = Arc::new(AppState::new(Arc::new(repository), settings.strategy));

    let addr: SocketAddr = settings
        .server
        .address()
        .parse()
        .with_context(|| format!("Invalid listen address {}", settings.server.address()))?;
    web_server::run_server(addr, state).await
}

async fn handle_load_csv(args: LoadCsvArgs, settings: &Settings) -> anyhow::Result<()> {
    tracing::info!(path = %args.path.display(), "Starting CSV bulk load");
    let report = read_csv_file(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    println!(
        "{} valid rows ready for insertion ({} skipped).",
        report.valid(),
        report.skipped
    );

    let repository = connect_repository(settings).await?;
    let chunk_size = args.chunk_size.unwrap_or(settings.loader.chunk_size).max(1);

    let progress_bar = ProgressBar::new(report.valid() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );

    let inserted = bulk_load(&repository, &report.records, chunk_size, |n| {
        progress_bar.set_position(n)
    })
    .await?;
    progress_bar.finish_with_message("done");
    tracing::info!(inserted, skipped = report.skipped, "CSV bulk load finished");

    if inserted == 0 {
        println!("No valid rows found. Please check the CSV format.");
    } else {
        println!("Inserted {} rows.", inserted);
    }
    Ok(())
}

async fn handle_evaluate(args: EvaluateArgs) -> anyhow::Result<()> {
    let report = read_csv_file(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;

    tracing::info!(
        path = %args.path.display(),
        short_window = args.windows.short_window,
        long_window = args.windows.long_window,
        "Evaluating crossover offline"
    );
    let store = InMemoryStore::new();
    store.insert_many(&report.records).await?;
    let series = store.snapshot().await?;

    let evaluation = StrategyEngine::new().analyze(
        &series,
        args.windows.short_window,
        args.windows.long_window,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation.result)?);
    } else {
        println!("{}", summary_table(&evaluation, report.skipped));
    }
    Ok(())
}

fn summary_table(evaluation: &Evaluation, skipped: usize) -> Table {
    let fmt_ma = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Observations".to_string(), evaluation.closes.len().to_string()]);
    table.add_row(vec!["Skipped rows".to_string(), skipped.to_string()]);
    table.add_row(vec!["Short window".to_string(), evaluation.result.short_window.to_string()]);
    table.add_row(vec!["Long window".to_string(), evaluation.result.long_window.to_string()]);
    table.add_row(vec!["Last short MA".to_string(), fmt_ma(evaluation.short_ma.last())]);
    table.add_row(vec!["Last long MA".to_string(), fmt_ma(evaluation.long_ma.last())]);
    table.add_row(vec![
        "Total return".to_string(),
        format!("{:.2}%", evaluation.result.total_return),
    ]);
    table.add_row(vec![
        "Last signal".to_string(),
        evaluation.result.last_signal.value().to_string(),
    ]);
    table
}
