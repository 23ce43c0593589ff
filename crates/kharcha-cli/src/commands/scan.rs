//! Receipt-text extraction command
//!
//! Reads a file of recognized (OCR) text, runs the extraction pipeline, and
//! prints the suggestion. Nothing is committed as an expense; the user
//! records it with `kharcha add` if the guess looks right.

use std::path::Path;

use anyhow::{Context, Result};
use kharcha_core::db::{content_hash, Database};
use kharcha_core::extract::ReceiptExtractor;
use kharcha_core::models::NewReceiptScan;

pub fn cmd_scan(db: &Database, user: &str, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let extractor = ReceiptExtractor::load().context("Failed to build receipt extractor")?;
    let result = extractor.extract(&text);

    db.insert_scan(
        user,
        &NewReceiptScan {
            content_hash: content_hash(&text),
            amount: result.amount_value(),
            confidence: result.confidence,
            category: result.category.map(|c| c.as_str().to_string()),
        },
    )?;

    println!("🧾 Receipt scan: {}", file.display());
    println!("   ─────────────────────────────");
    match &result.amount {
        Some(amount) => {
            println!("   Amount: ₹{}", amount);
            println!("   Confidence: {}/100", result.confidence);
        }
        None => {
            println!("   Amount: not found - please enter manually");
        }
    }
    match result.category {
        Some(category) => println!("   Category: {} {}", category.glyph(), category),
        None => println!("   Category: no guess"),
    }

    if let Some(amount) = &result.amount {
        println!();
        let category = result
            .category
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| "<category>".to_string());
        println!(
            "   To record: kharcha add --amount {} --category {}",
            amount, category
        );
    }

    Ok(())
}
