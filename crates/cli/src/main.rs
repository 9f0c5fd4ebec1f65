//! SwiftMart CLI - backend management and inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Load the demo catalogue into the backend
//! sm-cli seed
//!
//! # List products, optionally filtered by name
//! sm-cli products --search chips
//!
//! # Inspect and change a user's cart
//! sm-cli cart show --user-id 1
//! sm-cli cart add --user-id 1 --product-id 4
//! sm-cli cart remove --user-id 1 --product-id 4
//!
//! # Check credentials against the backend
//! sm-cli login --email shopper@swiftmart.in --password secret
//! ```
//!
//! # Commands
//!
//! - `seed` - Load the demo catalogue
//! - `products` - List or search products
//! - `cart` - Show, add to or remove from a user's cart
//! - `login` - Log in and print the user id

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use swiftmart_core::{ProductId, UserId};
use swiftmart_storefront::api::ApiClient;
use swiftmart_storefront::config::BackendConfig;
use swiftmart_storefront::services::CartManager;

mod commands;

#[derive(Parser)]
#[command(name = "sm-cli")]
#[command(author, version, about = "SwiftMart CLI tools")]
struct Cli {
    /// SwiftMart backend base URL
    #[arg(long, env = "SWIFTMART_API_URL", default_value = "http://127.0.0.1:8000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the demo catalogue into the backend
    Seed,
    /// List products
    Products {
        /// Only show products whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Inspect or change a user's cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Log in and print the user id
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "SWIFTMART_PASSWORD")]
        password: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart with its total
    Show {
        #[arg(short, long)]
        user_id: i32,
    },
    /// Add one unit of a product
    Add {
        #[arg(short, long)]
        user_id: i32,
        #[arg(short, long)]
        product_id: i32,
    },
    /// Remove one unit of a product
    Remove {
        #[arg(short, long)]
        user_id: i32,
        #[arg(short, long)]
        product_id: i32,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

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
    let api = ApiClient::new(&BackendConfig::from_url(&cli.api_url)?);

    match cli.command {
        Commands::Seed => commands::catalog::seed(&api).await?,
        Commands::Products { search } => {
            commands::catalog::list(&api, search.as_deref()).await?;
        }
        Commands::Cart { action } => {
            // One command touches one cart.
            let carts = CartManager::new(api, 1);
            match action {
                CartAction::Show { user_id } => {
                    commands::cart::show(&carts, UserId::new(user_id)).await?;
                }
                CartAction::Add {
                    user_id,
                    product_id,
                } => {
                    commands::cart::add(&carts, UserId::new(user_id), ProductId::new(product_id))
                        .await?;
                }
                CartAction::Remove {
                    user_id,
                    product_id,
                } => {
                    commands::cart::remove(
                        &carts,
                        UserId::new(user_id),
                        ProductId::new(product_id),
                    )
                    .await?;
                }
            }
        }
        Commands::Login { email, password } => {
            commands::auth::login(&api, &email, password).await?;
        }
    }
    Ok(())
}
