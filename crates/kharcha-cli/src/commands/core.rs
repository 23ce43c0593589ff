//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show database status

use std::path::Path;

use anyhow::{Context, Result};
use kharcha_core::db::Database;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path.to_str().context("Database path must be valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: kharcha add --amount 450 --category Food");
    println!("  2. Start web UI: kharcha serve");

    Ok(())
}

pub fn cmd_status(db_path: &Path, no_encrypt: bool) -> Result<()> {
    let db = open_db(db_path, no_encrypt)?;

    let size = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let encrypted = db.is_encrypted().unwrap_or(false);

    let conn = db.conn()?;
    let expenses: i64 = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
    let scans: i64 = conn.query_row("SELECT COUNT(*) FROM receipt_scans", [], |row| row.get(0))?;
    let users: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT user_id) FROM expenses",
        [],
        |row| row.get(0),
    )?;

    println!("📊 Database Status");
    println!("   ─────────────────────────────");
    println!("   Path: {}", db_path.display());
    println!("   Size: {} KB", size / 1024);
    println!(
        "   Encryption: {}",
        if encrypted { "🔒 enabled" } else { "⚠️  disabled" }
    );
    println!("   Expenses: {}", expenses);
    println!("   Receipt scans: {}", scans);
    println!("   Users: {}", users);

    Ok(())
}
