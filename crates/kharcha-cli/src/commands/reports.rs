//! Spending summary command

use anyhow::{Context, Result};
use chrono::NaiveDate;
use kharcha_core::db::Database;

pub fn cmd_summary(
    db: &Database,
    user: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let from_date = from
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("Invalid --from date format (use YYYY-MM-DD)")?;
    let to_date = to
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("Invalid --to date format (use YYYY-MM-DD)")?;

    let summary = db.get_spending_summary(user, from_date, to_date)?;

    if summary.count == 0 {
        println!("No expenses in this period.");
        return Ok(());
    }

    println!("📊 Spending Summary");
    println!("   ─────────────────────────────");
    println!("   Total spent: ₹{:.2}", summary.total);
    println!("   Expenses: {}", summary.count);
    println!("   Average: ₹{:.2}", summary.average);

    if let Some(largest) = &summary.largest {
        println!(
            "   Biggest: ₹{:.2} ({})",
            largest.amount, largest.category
        );
    }

    println!();
    println!("   By category:");
    for cat in &summary.categories {
        println!(
            "   {:<16} ₹{:>10.2}  ({} expense{})",
            cat.category,
            cat.amount,
            cat.count,
            if cat.count == 1 { "" } else { "s" }
        );
    }

    Ok(())
}
