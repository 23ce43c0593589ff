//! Advisor command

use anyhow::Result;
use kharcha_core::advisor::{Advisor, AnswerSource};
use kharcha_core::db::Database;

/// How many recent expenses feed the advisor context
const CONTEXT_EXPENSE_LIMIT: i64 = 100;

pub async fn cmd_ask(db: &Database, user: &str, question: &str) -> Result<()> {
    let expenses = db.list_expenses(user, None, CONTEXT_EXPENSE_LIMIT, 0)?;

    if expenses.is_empty() {
        println!("No expenses recorded yet - nothing to analyze.");
        println!("Record one first: kharcha add --amount 450 --category Food");
        return Ok(());
    }

    let advisor = Advisor::from_env();
    if !advisor.is_configured() {
        println!("💡 Tip: Set ADVISOR_API_URL and ADVISOR_API_TOKEN for model-generated answers");
    }

    let answer = advisor.answer(question, &expenses).await?;

    println!();
    println!("{}", answer.answer);
    println!();
    match answer.source {
        AnswerSource::Remote => {
            println!(
                "   (answered by {} over {} expenses)",
                answer.model.as_deref().unwrap_or("model"),
                expenses.len()
            );
        }
        AnswerSource::Local => {
            println!("   (local analysis over {} expenses)", expenses.len());
        }
    }

    Ok(())
}
