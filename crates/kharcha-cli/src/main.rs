//! Kharcha CLI - Personal expense tracker
//!
//! Usage:
//!   kharcha init                    Initialize database
//!   kharcha add -a 450 -c Food      Record an expense
//!   kharcha scan --file ocr.txt     Infer amount/category from receipt text
//!   kharcha ask "biggest expense?"  Ask the advisor
//!   kharcha serve --port 3000       Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Add {
            amount,
            category,
            description,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_add(&db, &cli.user, amount, &category, description.as_deref())
        }
        Commands::List { limit, category } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_list(&db, &cli.user, limit, category.as_deref())
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_delete(&db, &cli.user, id)
        }
        Commands::Summary { from, to } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_summary(&db, &cli.user, from.as_deref(), to.as_deref())
        }
        Commands::Scan { file } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_scan(&db, &cli.user, &file)
        }
        Commands::Ask { question } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_ask(&db, &cli.user, &question).await
        }
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
            allowed_origins,
        } => {
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                no_auth,
                cli.no_encrypt,
                static_dir.as_deref(),
                allowed_origins,
            )
            .await
        }
        Commands::Status => commands::cmd_status(&cli.db, cli.no_encrypt),
    }
}
