//! CLI administration tool for the storefront database.
//!
//! Provides commands for maintaining catalog data and checking the database
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection / apply migrations / seed an empty database
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! cargo run --bin admin -- db seed
//!
//! # Record a new Bitcoin price
//! cargo run --bin admin -- bitcoin set-price --price 51234.56 --change -1.20
//!
//! # Add a category
//! cargo run --bin admin -- category add --name "Toys" --slug toys
//!
//! # Look up a newsletter subscriber
//! cargo run --bin admin -- newsletter check fan@example.com
//!
//! # Row counts
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! Same database settings as the server (`DATABASE_URL` or `DB_*` components).

use giftbit_storefront::config::{self, mask_connection_string};
use giftbit_storefront::domain::entities::{NewBitcoinPriceUpdate, NewGiftCardCategory};
use giftbit_storefront::domain::storage::Storage;
use giftbit_storefront::infrastructure::persistence::PgStorage;
use giftbit_storefront::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use regex::Regex;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::{Arc, LazyLock};

static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[a-z0-9-]+$").unwrap()
});

/// CLI tool for managing the storefront database.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Bitcoin price snapshots
    Bitcoin {
        #[command(subcommand)]
        action: BitcoinAction,
    },

    /// Gift card categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Newsletter subscribers
    Newsletter {
        #[command(subcommand)]
        action: NewsletterAction,
    },

    /// Show row counts
    Stats,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,

    /// Insert seed data if the catalog is empty
    Seed,
}

#[derive(Subcommand)]
enum BitcoinAction {
    /// Show the latest price
    Show,

    /// Record a new price snapshot stamped with the current time
    SetPrice {
        /// Price in USD (e.g. 51234.56)
        #[arg(short, long, allow_hyphen_values = true)]
        price: Decimal,

        /// 24h change in percent (e.g. -1.20)
        #[arg(short, long, allow_hyphen_values = true)]
        change: Decimal,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List all categories
    List,

    /// Add a category
    Add {
        /// Display name (e.g. "Toys")
        #[arg(short, long)]
        name: Option<String>,

        /// URL slug, lowercase letters, digits and hyphens
        #[arg(short, long)]
        slug: Option<String>,
    },
}

#[derive(Subcommand)]
enum NewsletterAction {
    /// Check whether an email address is subscribed
    Check { email: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::Config::from_env()?;
    config.db_connect_retries = 1;
    let pool = server::connect(&config).await?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool, &config).await?,
        Commands::Bitcoin { action } => handle_bitcoin_action(action, storage(&pool)).await?,
        Commands::Category { action } => handle_category_action(action, storage(&pool)).await?,
        Commands::Newsletter { action } => {
            handle_newsletter_action(action, storage(&pool)).await?
        }
        Commands::Stats => handle_stats(&pool).await?,
    }

    Ok(())
}

fn storage(pool: &PgPool) -> PgStorage {
    PgStorage::new(Arc::new(pool.clone()))
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, config: &config::Config) -> Result<()> {
    match action {
        DbAction::Check => {
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await
                .context("Database query failed")?;

            println!("{}", "✅ Database connection OK".green().bold());
            if let Some(ref url) = config.database_url {
                println!("  URL:     {}", mask_connection_string(url).bright_black());
            }
            println!("  Version: {}", version.bright_black());
        }
        DbAction::Migrate => {
            server::migrate(pool).await?;
            println!("{}", "✅ Migrations applied".green().bold());
        }
        DbAction::Seed => {
            let seeded = storage(pool)
                .seed_if_empty()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to seed: {}", e))?;

            if seeded {
                println!("{}", "✅ Seed data inserted".green().bold());
            } else {
                println!(
                    "{}",
                    "⚠️  Catalog already has categories, nothing seeded".yellow()
                );
            }
        }
    }

    Ok(())
}

/// Dispatches Bitcoin price commands.
async fn handle_bitcoin_action(action: BitcoinAction, storage: PgStorage) -> Result<()> {
    match action {
        BitcoinAction::Show => {
            let latest = storage
                .get_latest_bitcoin_price_update()
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            match latest {
                Some(update) => {
                    println!("{}", "₿ Latest Bitcoin price".bright_blue().bold());
                    println!("  Price:   {}", format!("${}", update.price).bright_white().bold());
                    println!("  Change:  {}", format_change(update.change_percentage));
                    println!("  Updated: {}", update.updated_at.bright_black());
                }
                None => println!("{}", "  No Bitcoin price recorded yet".yellow()),
            }
        }
        BitcoinAction::SetPrice { price, change, yes } => {
            if price <= Decimal::ZERO {
                anyhow::bail!("Price must be positive, got {}", price);
            }

            let update = NewBitcoinPriceUpdate::now(price, change);

            println!("  Price:  {}", format!("${}", update.price).bright_white().bold());
            println!("  Change: {}", format_change(update.change_percentage));
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Record this price?")
                    .default(true)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let created = storage
                .create_bitcoin_price_update(update)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to record price: {}", e))?;

            println!(
                "{} (id {})",
                "✅ Price recorded".green().bold(),
                created.id.to_string().bright_black()
            );
        }
    }

    Ok(())
}

fn format_change(change: Decimal) -> ColoredString {
    let text = format!("{}%", change);
    if change.is_sign_negative() {
        text.red()
    } else {
        text.green()
    }
}

/// Dispatches category commands.
async fn handle_category_action(action: CategoryAction, storage: PgStorage) -> Result<()> {
    match action {
        CategoryAction::List => {
            let categories = storage
                .get_all_gift_card_categories()
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            if categories.is_empty() {
                println!("{}", "  No categories found".yellow());
                return Ok(());
            }

            println!(
                "  {:<4} {:<24} {:<20}",
                "ID".bright_white().bold(),
                "Name".bright_white().bold(),
                "Slug".bright_white().bold()
            );
            println!("  {}", "─".repeat(50).bright_black());

            for category in &categories {
                println!(
                    "  {:<4} {:<24} {}",
                    category.id.to_string().bright_black(),
                    category.name.cyan(),
                    category.slug
                );
            }
        }
        CategoryAction::Add { name, slug } => {
            let name = match name {
                Some(n) => n,
                None => Input::new().with_prompt("Category name").interact_text()?,
            };
            let name = name.trim().to_string();
            if name.is_empty() {
                anyhow::bail!("Category name must not be empty");
            }

            let slug = match slug {
                Some(s) => s,
                None => Input::new()
                    .with_prompt("Slug")
                    .with_initial_text(name.to_lowercase().replace(' ', "-"))
                    .interact_text()?,
            };
            if !SLUG_REGEX.is_match(&slug) {
                anyhow::bail!(
                    "Slug may contain only lowercase letters, digits and hyphens, got '{}'",
                    slug
                );
            }

            let created = storage
                .create_gift_card_category(NewGiftCardCategory::new(name, slug))
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create category: {}", e))?;

            println!(
                "{} {} (id {})",
                "✅ Category created:".green().bold(),
                created.name.cyan(),
                created.id.to_string().bright_black()
            );
        }
    }

    Ok(())
}

/// Dispatches newsletter commands.
async fn handle_newsletter_action(action: NewsletterAction, storage: PgStorage) -> Result<()> {
    match action {
        NewsletterAction::Check { email } => {
            let subscriber = storage
                .get_newsletter_subscriber_by_email(&email)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            match subscriber {
                Some(s) => println!(
                    "{} {} (id {})",
                    "✅ Subscribed:".green().bold(),
                    s.email.cyan(),
                    s.id.to_string().bright_black()
                ),
                None => println!("{} {}", "❌ Not subscribed:".red(), email),
            }
        }
    }

    Ok(())
}

/// Displays row counts for every storefront table.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let tables = [
        ("Categories", "gift_card_categories"),
        ("Gift cards", "gift_cards"),
        ("Bitcoin prices", "bitcoin_price_updates"),
        ("FAQ items", "faq_items"),
        ("Testimonials", "testimonials"),
        ("Subscribers", "newsletter_subscribers"),
        ("Users", "users"),
    ];

    for (label, table) in tables {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await?;

        println!(
            "  {:<16} {}",
            label,
            count.to_string().bright_white().bold()
        );
    }

    println!();
    Ok(())
}
