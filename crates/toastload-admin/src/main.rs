use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use toastload_core::config::DatabaseConfig;
use toastload_core::{db, schema};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Toastload administrative tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drop the managed warehouse tables (dry-run unless --apply)
    DropTables(DropTablesArgs),
    /// Create any missing warehouse tables
    EnsureSchema,
}

#[derive(Args, Debug, Default)]
struct DropTablesArgs {
    /// Actually drop the tables instead of listing them
    #[arg(long)]
    apply: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::DropTables(args) => handle_drop_tables(args).await,
        Command::EnsureSchema => handle_ensure_schema().await,
    }
}

async fn connect() -> Result<db::DbPool> {
    dotenvy::dotenv().ok();
    let config = DatabaseConfig::from_env()?;
    db::connect(&config).await
}

async fn handle_drop_tables(args: DropTablesArgs) -> Result<()> {
    if !args.apply {
        println!("Would drop the following tables:");
        for table in schema::managed_tables() {
            println!("  {table}");
        }
        println!("Run again with --apply to drop them.");
        return Ok(());
    }

    let pool = connect().await?;
    schema::drop_tables(&pool).await?;
    info!("All managed tables dropped");
    Ok(())
}

async fn handle_ensure_schema() -> Result<()> {
    let pool = connect().await?;
    schema::ensure_schema(&pool).await?;
    info!("Schema ensured");
    Ok(())
}
