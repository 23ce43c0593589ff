//! Templated local analysis
//!
//! Rule-based answer generation over locally computed aggregates, used
//! whenever the hosted model is unavailable or fails. The question is routed
//! by intent keywords and every answer carries the same three sections the
//! remote model is prompted to produce.

use std::collections::HashMap;

use crate::models::Expense;

const BIGGEST_WORDS: &[&str] = &["biggest", "highest", "largest", "most"];
const TOTAL_WORDS: &[&str] = &["total", "sum", "all"];
const CATEGORY_WORDS: &[&str] = &["category", "categories"];
const SAVINGS_WORDS: &[&str] = &["save", "reduce", "cut", "budget"];

/// Generate a templated answer for a question over the user's expenses
pub fn local_analysis(question: &str, expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found to analyze.".to_string();
    }

    let total: f64 = expenses.iter().map(|e| e.amount).sum();

    let mut category_totals: HashMap<&str, f64> = HashMap::new();
    for expense in expenses {
        *category_totals.entry(expense.category.as_str()).or_insert(0.0) += expense.amount;
    }

    let (top_category, top_amount) = category_totals
        .iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(cat, amount)| (cat.to_string(), *amount))
        .unwrap_or_default();

    let biggest = expenses
        .iter()
        .max_by(|a, b| {
            a.amount
                .partial_cmp(&b.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("expenses is non-empty");

    let question_lower = question.to_lowercase();
    let asks = |words: &[&str]| words.iter().any(|w| question_lower.contains(w));

    if asks(BIGGEST_WORDS) {
        let mut details = Vec::new();
        if let Some(desc) = biggest.description.as_deref() {
            if !desc.trim().is_empty() {
                details.push(format!("• Description: {}", desc));
            }
        }
        details.push(format!("• Date: {}", biggest.created_at.format("%B %d, %Y")));

        format!(
            "Your biggest expense is ₹{:.2} for {}.\n\n\
             Supporting Details:\n{}\n\n\
             Actionable Recommendations:\n\
             • Review if this expense was necessary\n\
             • Consider setting a budget limit for {} category\n\
             • Look for ways to reduce similar expenses in the future",
            biggest.amount,
            biggest.category,
            details.join("\n"),
            biggest.category
        )
    } else if asks(TOTAL_WORDS) {
        format!(
            "Your total expenses are ₹{:.2}.\n\n\
             Supporting Details:\n\
             • Number of expenses: {}\n\
             • Top spending category: {} (₹{:.2})\n\
             • Average expense: ₹{:.2}\n\n\
             Actionable Recommendations:\n\
             • Track your spending patterns\n\
             • Set monthly budget goals\n\
             • Focus on reducing expenses in {} category",
            total,
            expenses.len(),
            top_category,
            top_amount,
            total / expenses.len() as f64,
            top_category
        )
    } else if asks(CATEGORY_WORDS) {
        let mut sorted: Vec<(&str, f64)> = category_totals.into_iter().collect();
        sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        let breakdown = sorted
            .iter()
            .map(|(cat, amount)| format!("• {}: ₹{:.2}", cat, amount))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Your spending by category:\n\n\
             Supporting Details:\n{}\n\n\
             Actionable Recommendations:\n\
             • Focus on reducing expenses in {} category\n\
             • Consider setting category-specific budgets\n\
             • Review if all categories are necessary",
            breakdown, top_category
        )
    } else if asks(SAVINGS_WORDS) {
        format!(
            "Here are ways to save money based on your spending:\n\n\
             Supporting Details:\n\
             • Your biggest expense category: {} (₹{:.2})\n\
             • Your biggest single expense: ₹{:.2} for {}\n\n\
             Actionable Recommendations:\n\
             • Reduce spending in {} category\n\
             • Set a daily/weekly budget limit\n\
             • Track all expenses to identify patterns\n\
             • Consider alternatives for expensive items\n\
             • Review recurring expenses regularly",
            top_category, top_amount, biggest.amount, biggest.category, top_category
        )
    } else {
        format!(
            "Here's a summary of your expenses:\n\n\
             Supporting Details:\n\
             • Total spent: ₹{:.2}\n\
             • Number of expenses: {}\n\
             • Top category: {} (₹{:.2})\n\
             • Biggest expense: ₹{:.2} for {}\n\n\
             Actionable Recommendations:\n\
             • Monitor your spending patterns\n\
             • Set realistic budget goals\n\
             • Focus on reducing expenses in {} category\n\
             • Review expenses regularly to stay on track",
            total,
            expenses.len(),
            top_category,
            top_amount,
            biggest.amount,
            biggest.category,
            top_category
        )
    }
}
