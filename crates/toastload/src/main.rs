use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use toastload_core::config::{DatabaseConfig, ExportBundle};
use toastload_core::report::LoadSummary;
use toastload_core::{db, run};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Load point-of-sale exports (menus, orders, checks, time entries) into
/// the reporting database.
#[derive(Parser, Debug)]
#[command(author, version, about = "Point-of-sale export loader", long_about = None)]
struct Cli {
    /// Directory containing the export files to load
    #[arg(default_value = "./exports")]
    export_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = DatabaseConfig::from_env()?;
    let pool = db::connect(&config).await?;

    let exports = ExportBundle::discover(&cli.export_dir)?;
    let report = run::run(&pool, &exports).await?;

    println!("\n--- Load Summary ---");
    print_phase("Menus", &report.menus);
    print_phase("Orders", &report.orders);
    print_phase("Checks", &report.checks);
    print_phase("Time entries", &report.time_entries);

    info!("Load finished");
    Ok(())
}

fn print_phase(name: &str, summary: &LoadSummary) {
    println!(
        "  {name}: {} inserted, {} skipped, {} errors",
        summary.inserted, summary.skipped, summary.errors
    );
}
