//! CLI administration tool for url-minter.
//!
//! Works directly against the database, without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # List every mapping
//! cargo run --bin admin -- list
//!
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com
//!
//! # Show where a code points (no click counted)
//! cargo run --bin admin -- show dZKKhLUIf
//!
//! # Resolve a code (counts a click)
//! cargo run --bin admin -- resolve dZKKhLUIf
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`url_minter::config`].

use url_minter::config;
use url_minter::infrastructure::persistence::connect;
use url_minter::server::build_state;
use url_minter::state::AppState;
use url_minter::utils::number_format::format_clicks;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::SqlitePool;

/// CLI tool for managing url-minter.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// List all short links
    List,

    /// Shorten a URL
    Shorten {
        /// URL to shorten (http or https)
        url: String,
    },

    /// Show the target of a short code without counting a visit
    Show {
        /// Short code
        code: String,
    },

    /// Resolve a short code and count the visit
    Resolve {
        /// Short code
        code: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = connect(&config.database_url, &config.pool_settings())
        .await
        .context("Failed to connect to database")?;
    let state = build_state(pool.clone(), &config);

    match cli.command {
        Commands::List => list_links(&state).await?,
        Commands::Shorten { url } => shorten(&state, &url).await?,
        Commands::Show { code } => show(&state, &code).await?,
        Commands::Resolve { code } => resolve(&state, &code).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;

    Ok(())
}

/// Prints every mapping.
///
/// # Output Format
///
/// ```text
/// 🔗 Short Links
///
///   Code       Clicks     Original URL
///   ─────────────────────────────────────────────────────
///   dZKKhLUIf  1,204      https://example.com/
/// ```
async fn list_links(state: &AppState) -> Result<()> {
    println!("{}", "🔗 Short Links".bright_blue().bold());
    println!();

    let mappings = state
        .link_service
        .list_recent()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if mappings.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin shorten <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<10} {:<10} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        println!(
            "  {:<10} {:<10} {}",
            mapping.shortened_code.cyan(),
            format_clicks(mapping.click_count).bright_green(),
            mapping.original_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        mappings.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Verifies and shortens `url`.
async fn shorten(state: &AppState, url: &str) -> Result<()> {
    let verified = state
        .verifier
        .verify(url)
        .await
        .map_err(|e| anyhow::anyhow!("Refusing to shorten '{}': {}", url, e))?;

    let mapping = state
        .link_service
        .shorten(&verified)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("{}", "✅ Link created".green().bold());
    println!("  Code: {}", mapping.shortened_code.bright_yellow().bold());
    println!("  URL:  {}", mapping.original_url.cyan());

    Ok(())
}

/// Prints the target of `code` without touching its click count.
async fn show(state: &AppState, code: &str) -> Result<()> {
    match state.link_service.lookup(code).await {
        Ok(url) => {
            println!("{} → {}", code.cyan(), url.bright_white());
            Ok(())
        }
        Err(url_minter::AppError::NotFound { .. }) => {
            println!("{}", format!("❌ No link with code '{}'", code).red());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Database error: {}", e)),
    }
}

/// Resolves `code`, counting one click.
async fn resolve(state: &AppState, code: &str) -> Result<()> {
    match state.link_service.resolve(code).await {
        Ok(url) => {
            println!("{} → {}", code.cyan(), url.bright_white());
            Ok(())
        }
        Err(url_minter::AppError::NotFound { .. }) => {
            println!("{}", format!("❌ No link with code '{}'", code).red());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Database error: {}", e)),
    }
}

/// Displays link and click totals.
async fn handle_stats(pool: &SqlitePool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links_count, clicks_count): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(clicks), 0) FROM urls")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:  {}",
        format_clicks(links_count).bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        format_clicks(clicks_count).bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  SQLite: {}", version.bright_white());
        }
    }

    Ok(())
}
