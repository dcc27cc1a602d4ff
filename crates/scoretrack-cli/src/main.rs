use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod collect;
mod plot;

#[derive(Debug, Parser)]
#[command(name = "scoretrack")]
#[command(about = "Scrape per-nick scores into SQLite and chart them per platform")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "example.yaml")]
    config: PathBuf,

    /// Fetch and log scores without writing to the database
    #[arg(short, long)]
    dryrun: bool,

    /// Provide verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Plot a chart instead of collecting
    #[arg(short, long)]
    plot: bool,

    /// Trailing window in days
    #[arg(short, long, default_value_t = 7)]
    time: u32,

    /// Output chart file
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Platform to chart
    #[arg(short = 'P', long, default_value = "rootme")]
    platform: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = scoretrack_core::load_config(&cli.config)?;

    let pool = scoretrack_db::connect_pool(&config.sqlite.db).await?;
    let applied = scoretrack_db::run_migrations(&pool).await?;
    if applied > 0 {
        tracing::info!(applied, "applied database migrations");
    }

    if cli.plot {
        plot::run_plot(&pool, &cli.platform, cli.time, &cli.output).await?;
    } else {
        let totals = collect::run_collect(&pool, &config, cli.dryrun).await?;
        tracing::info!(
            attempted = totals.attempted,
            succeeded = totals.succeeded,
            missing = totals.missing,
            failed = totals.failed,
            "collection finished"
        );
    }

    Ok(())
}
