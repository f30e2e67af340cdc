//! Order command handlers for the CLI.
//!
//! `place` drives a full storefront session (wizard, address cascade,
//! checkout) against the live region providers. With `--dry-run` the order
//! goes to an in-memory store instead of the database. The remaining
//! subcommands read or update the `orders` table directly.

mod place;
mod query;

use cementlife_core::{AppConfig, Catalog, OrderStatus, PaymentMethod};
use clap::{Args, Subcommand};

/// Sub-commands available under `order`.
#[derive(Debug, Subcommand)]
pub enum OrderCommands {
    /// Configure an item and check it out
    Place(PlaceArgs),
    /// Set the status of an order
    Status {
        #[arg(long)]
        id: i64,
        /// PENDING, COMPLETED, or CANCELED
        #[arg(long)]
        status: OrderStatus,
    },
    /// Show one order with its line items
    Show {
        #[arg(long)]
        id: i64,
    },
    /// List recent orders
    List {
        /// Only orders with this status
        #[arg(long)]
        status: Option<OrderStatus>,
        /// Maximum number of orders to show
        #[arg(long, default_value = "20")]
        limit: u32,
    },
}

#[derive(Debug, Args)]
pub struct PlaceArgs {
    #[arg(long)]
    pub container: Option<String>,
    #[arg(long)]
    pub plant: Option<String>,
    #[arg(long)]
    pub topping: Option<String>,
    /// Name shown on the finished piece
    #[arg(long)]
    pub creation_name: Option<String>,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: String,
    /// House number and street
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub province: String,
    #[arg(long)]
    pub district: String,
    #[arg(long)]
    pub ward: String,
    /// cod or bank_transfer
    #[arg(long, default_value = "cod")]
    pub payment: PaymentMethod,
    /// Validate and print the order without writing to the database
    #[arg(long)]
    pub dry_run: bool,
}

pub(crate) async fn run(
    config: &AppConfig,
    catalog: Catalog,
    command: OrderCommands,
) -> anyhow::Result<()> {
    match command {
        OrderCommands::Place(args) => place::run_order_place(config, catalog, args).await,
        OrderCommands::Status { id, status } => {
            let pool = cementlife_db::connect_pool_from_config(config).await?;
            let store = cementlife_db::PgOrderStore::new(pool);
            query::run_order_status(&store, id, status).await
        }
        OrderCommands::Show { id } => {
            let pool = cementlife_db::connect_pool_from_config(config).await?;
            query::run_order_show(&pool, id).await
        }
        OrderCommands::List { status, limit } => {
            let pool = cementlife_db::connect_pool_from_config(config).await?;
            query::run_order_list(&pool, status, i64::from(limit)).await
        }
    }
}
