//! ShopPrime CLI - terminal storefront and admin tools.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! shopprime products list --search shoes
//! shopprime products show <product-id>
//!
//! # Sign in, then export the printed token as SHOPPRIME_API_TOKEN
//! shopprime login -e user@example.com
//!
//! # Cart and checkout
//! shopprime cart show
//! shopprime cart add <product-id> --quantity 2
//! shopprime checkout --line1 "1 Main St" --city Springfield \
//!     --state IL --pincode 62704
//!
//! # Admin back-office
//! shopprime admin dashboard
//! shopprime admin orders set-status <order-id> shipped
//! ```
//!
//! The CLI is a thin consumer of `shopprime-client`: it surfaces the cart
//! store's failure messages and owns any retry decision, exactly like the
//! browser views it replaces.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shopprime")]
#[command(author, version, about = "ShopPrime storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: commands::products::ProductsAction,
    },
    /// Manage the shopping cart (requires sign-in)
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Place an order for the current cart
    Checkout(commands::orders::CheckoutArgs),
    /// Show your order history
    Orders,
    /// Sign in and print a session token
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Create an account and print a session token
    Register {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,
    },
    /// Show or update your profile
    Profile {
        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Admin back-office (requires an admin account)
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
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
    let ctx = commands::Context::from_env()?;

    match cli.command {
        Commands::Products { action } => commands::products::run(&ctx, action).await?,
        Commands::Cart { action } => commands::cart::run(&ctx, action).await?,
        Commands::Checkout(args) => commands::orders::checkout(&ctx, args).await?,
        Commands::Orders => commands::orders::history(&ctx).await?,
        Commands::Login { email } => commands::auth::login(&ctx, &email).await?,
        Commands::Register { email, name } => {
            commands::auth::register(&ctx, &email, &name).await?;
        }
        Commands::Profile { name, phone } => {
            commands::auth::profile(&ctx, name, phone).await?;
        }
        Commands::Admin { action } => commands::admin::run(&ctx, action).await?,
    }
    Ok(())
}
