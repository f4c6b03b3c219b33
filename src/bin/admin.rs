//! CLI administration tool for shortlink.
//!
//! Manages user accounts and inspects stored links directly against the
//! database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for the password)
//! cargo run --bin admin -- user create alice
//!
//! # List the links a user created
//! cargo run --bin admin -- user links alice
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use shortlink::application::services::credential_service::{derive_user_id, hash_password};
use shortlink::config::mask_connection_string;
use shortlink::domain::entities::User;
use shortlink::domain::repositories::{LinkRepository, UserRepository};
use shortlink::infrastructure::persistence::{PgLinkRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a user account
    Create {
        /// Username (prompted if omitted)
        username: Option<String>,
    },

    /// List links created by a user
    Links {
        username: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    let result = match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await,
        Commands::Stats => handle_stats(&pool).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    };

    pool.close().await;
    result
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let shared = Arc::new(pool.clone());
    let users = PgUserRepository::new(shared.clone());

    match action {
        UserAction::Create { username } => create_user(&users, username).await,
        UserAction::Links { username } => {
            let links = PgLinkRepository::new(shared);
            list_user_links(&users, &links, &username).await
        }
    }
}

/// Creates an account with the same hashing and id derivation as `/register`.
async fn create_user(users: &PgUserRepository, username: Option<String>) -> Result<()> {
    println!("{}", "Create user".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::<String>::new()
            .with_prompt("Username")
            .interact_text()?,
    };

    let username = username.trim().to_string();
    anyhow::ensure!(!username.is_empty(), "Username must not be blank");

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;
    anyhow::ensure!(!password.trim().is_empty(), "Password must not be blank");

    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("Hashing task failed")?
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let user = User::new(derive_user_id(&username), username, password_hash);

    let user = users
        .create(user)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "User created".green().bold());
    println!("  Username: {}", user.username.cyan());
    println!("  ID:       {}", user.id.bright_black());
    println!();

    Ok(())
}

/// Prints a user's links, newest first.
async fn list_user_links(
    users: &PgUserRepository,
    links: &PgLinkRepository,
    username: &str,
) -> Result<()> {
    let user = users
        .find_by_username(username)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("User '{}' not found", username))?;

    let owned = links
        .list_by_owner(&user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    println!(
        "{} {}",
        "Links of".bright_blue().bold(),
        user.username.cyan().bold()
    );
    println!();

    if owned.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<18} {}",
        "Code".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for link in &owned {
        println!(
            "  {:<10} {:<18} {}",
            link.short_code.bright_yellow(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!("  Total: {}", owned.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays link and user counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    let shared = Arc::new(pool.clone());
    let links = PgLinkRepository::new(shared.clone());
    let users = PgUserRepository::new(shared);

    let links_count = links
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
    let users_count = users
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;

    println!("{}", "Statistics".bright_blue().bold());
    println!();
    println!(
        "  Links: {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Users: {}",
        users_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Migrate => {
            println!("{}", "Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Migration failed")?;

            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(())
}
