//! Expense commands (add, list, delete)

use anyhow::Result;
use kharcha_core::db::Database;
use kharcha_core::extract::CategoryClassifier;
use kharcha_core::models::{CategoryGuess, NewExpense};
use kharcha_core::validate::validate_new_expense;

use super::truncate;

pub fn cmd_add(
    db: &Database,
    user: &str,
    amount: f64,
    category: &str,
    description: Option<&str>,
) -> Result<()> {
    // Map the typed category onto a preset where the keyword table matches;
    // anything else stays a custom category with the default glyph
    let classifier = CategoryClassifier::load();
    let guess = classifier.classify(category);
    let (category_name, icon) = match &guess {
        CategoryGuess::Preset(preset) => (
            preset.as_str().to_string(),
            Some(preset.glyph().to_string()),
        ),
        CategoryGuess::Custom(text) => (text.clone(), None),
    };

    let expense = NewExpense {
        amount,
        category: category_name,
        description: description.map(str::to_string),
        icon,
    };

    validate_new_expense(&expense)?;

    if let CategoryGuess::Preset(preset) = &guess {
        if preset.as_str() != category.trim() {
            println!("   (\"{}\" recorded under {})", category.trim(), preset);
        }
    }

    let id = db.insert_expense(user, &expense)?;
    let stored = db
        .get_expense(user, id)?
        .expect("expense exists after insert");

    println!(
        "✅ Recorded expense #{}: {} ₹{:.2} ({})",
        id,
        stored.icon.as_deref().unwrap_or(""),
        stored.amount,
        stored.category
    );

    Ok(())
}

pub fn cmd_list(db: &Database, user: &str, limit: i64, category: Option<&str>) -> Result<()> {
    let expenses = db.list_expenses(user, category, limit, 0)?;
    let total = db.count_expenses(user, category)?;

    if expenses.is_empty() {
        println!("No expenses recorded yet. Try: kharcha add --amount 450 --category Food");
        return Ok(());
    }

    println!("💸 Expenses ({} of {})", expenses.len(), total);
    println!("   ──────────────────────────────────────────────────");
    for expense in &expenses {
        println!(
            "   #{:<5} {}  ₹{:>10.2}  {:<14} {}  {}",
            expense.id,
            expense.created_at.format("%Y-%m-%d"),
            expense.amount,
            truncate(&expense.category, 14),
            expense.icon.as_deref().unwrap_or(" "),
            truncate(expense.description.as_deref().unwrap_or(""), 30),
        );
    }

    Ok(())
}

pub fn cmd_delete(db: &Database, user: &str, id: i64) -> Result<()> {
    db.delete_expense(user, id)?;
    println!("🗑️  Deleted expense #{}", id);
    Ok(())
}
