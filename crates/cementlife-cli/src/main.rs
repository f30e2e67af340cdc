mod order;
mod regions;
mod shop;

use cementlife_core::{load_catalog, AppConfig, Catalog, Environment};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::order::OrderCommands;
use crate::regions::RegionsCommands;

#[derive(Debug, Parser)]
#[command(name = "cementlife")]
#[command(about = "Cement Life storefront command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every container, plant, and topping with its price
    Catalog,
    /// Price a configuration and show its preview image
    Quote {
        #[arg(long)]
        container: Option<String>,
        #[arg(long)]
        plant: Option<String>,
        #[arg(long)]
        topping: Option<String>,
    },
    /// Query the province/district/ward lookup providers
    Regions {
        #[command(subcommand)]
        command: RegionsCommands,
    },
    /// Place and manage orders
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("cementlife: run with --help to list commands");
        return Ok(());
    };

    let config = cementlife_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    let styled = styled_logs(&config.env);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(styled)
        .with_target(styled)
        .init();

    match command {
        Commands::Catalog => shop::run_catalog(&catalog_for(&config)?),
        Commands::Quote {
            container,
            plant,
            topping,
        } => shop::run_quote(
            &catalog_for(&config)?,
            container.as_deref(),
            plant.as_deref(),
            topping.as_deref(),
        )?,
        Commands::Regions { command } => regions::run(&config, command).await?,
        Commands::Order { command } => {
            let catalog = catalog_for(&config)?;
            order::run(&config, catalog, command).await?;
        }
        Commands::Db { command } => run_db(&config, command).await?,
    }

    Ok(())
}

/// Colors and module targets for interactive use; plain lines in production
/// where stderr goes to a log collector.
fn styled_logs(env: &Environment) -> bool {
    !matches!(env, Environment::Production)
}

/// The catalog file named by `CEMENTLIFE_CATALOG_PATH`, or the built-in one.
fn catalog_for(config: &AppConfig) -> anyhow::Result<Catalog> {
    match &config.catalog_path {
        Some(path) => Ok(load_catalog(path)?),
        None => Ok(Catalog::builtin()),
    }
}

async fn run_db(config: &AppConfig, command: DbCommands) -> anyhow::Result<()> {
    let pool = cementlife_db::connect_pool_from_config(config).await?;
    match command {
        DbCommands::Ping => {
            cementlife_db::health_check(&pool).await?;
            println!("database reachable");
        }
        DbCommands::Migrate => {
            let applied = cementlife_db::run_migrations(&pool).await?;
            tracing::info!(applied, "migrations complete");
            println!("applied {applied} migration(s)");
        }
    }
    Ok(())
}
