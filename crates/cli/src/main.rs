//! Tamarind CLI - Catalog seeding and administration tools.
//!
//! Talks JSON to a running storefront with administrator identity headers.
//!
//! # Usage
//!
//! ```bash
//! # Seed the demo catalog
//! tam-cli --caller root-1 seed
//!
//! # Create a product
//! tam-cli --caller root-1 product create -n "Walnut Desk Lamp" -p 4500 -c home -s 12
//!
//! # List products at or below a stock threshold
//! tam-cli --caller root-1 product low-stock --threshold 3
//!
//! # Move an order through fulfillment
//! tam-cli --caller root-1 order set-status <order-id> shipped
//!
//! # Promote a user
//! tam-cli --caller root-1 role assign <user-id> admin
//! ```
//!
//! The identity proxy secret is read from `TAMARIND_IDENTITY_SECRET`
//! (a `.env` file is honored).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::Client;

#[derive(Parser)]
#[command(name = "tam-cli")]
#[command(author, version, about = "Tamarind Market CLI tools")]
struct Cli {
    /// Storefront base URL
    #[arg(long, default_value = "http://127.0.0.1:3000", global = true)]
    endpoint: String,

    /// Caller user id asserted on every request
    #[arg(long, global = true)]
    caller: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the catalog with demo products
    Seed,
    /// Manage catalog products
    Product {
        #[command(subcommand)]
        action: commands::products::ProductAction,
    },
    /// Inspect and progress orders
    Order {
        #[command(subcommand)]
        action: commands::orders::OrderAction,
    },
    /// Manage user roles
    Role {
        #[command(subcommand)]
        action: RoleAction,
    },
}

#[derive(Subcommand)]
enum RoleAction {
    /// Assign a role to a user
    Assign {
        /// Target user id
        user: String,

        /// Role (`admin`, `user`, `guest`)
        role: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::from_env(cli.endpoint, cli.caller)?;

    match cli.command {
        Commands::Seed => commands::seed::run(&client).await?,
        Commands::Product { action } => commands::products::run(&client, action).await?,
        Commands::Order { action } => commands::orders::run(&client, action).await?,
        Commands::Role { action } => match action {
            RoleAction::Assign { user, role } => {
                commands::assign_role(&client, &user, &role).await?;
            }
        },
    }
    Ok(())
}
