//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kharcha - Track expenses, scan receipts, ask where the money went
#[derive(Parser)]
#[command(name = "kharcha")]
#[command(about = "Self-hosted personal expense tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "kharcha.db", global = true)]
    pub db: PathBuf,

    /// User the command acts as (expenses are scoped per user)
    #[arg(long, default_value = "local", global = true)]
    pub user: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set KHARCHA_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record an expense
    Add {
        /// Amount spent (must be positive)
        #[arg(short, long)]
        amount: f64,

        /// Category (preset name or custom, 2-20 characters)
        #[arg(short, long)]
        category: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List expenses
    List {
        /// Maximum rows to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete an expense by id
    Delete {
        /// Expense id
        id: i64,
    },

    /// Show spending summary
    Summary {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Infer amount and category from a recognized-text file
    Scan {
        /// File containing the recognized (OCR) text of a receipt
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Ask the advisor about your spending
    Ask {
        /// The question, e.g. "what was my biggest expense?"
        question: String,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires the upstream auth layer's user header.
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Allowed CORS origin (repeatable), e.g. http://localhost:5173
        #[arg(long = "allow-origin")]
        allowed_origins: Vec<String>,
    },

    /// Show database status (encryption, size, counts)
    Status,
}
