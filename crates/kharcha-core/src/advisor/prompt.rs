//! Prompt construction for the hosted advisor model

use crate::models::Expense;

/// Render one expense per line for the prompt context block
///
/// `Date: August 05, 2026, Amount: ₹450.00, Category: Food, Description: Dinner`
pub fn format_context(expenses: &[Expense]) -> String {
    expenses
        .iter()
        .map(|expense| {
            let mut parts = vec![
                format!("Date: {}", expense.created_at.format("%B %d, %Y")),
                format!("Amount: ₹{:.2}", expense.amount),
                format!("Category: {}", expense.category),
            ];
            if let Some(desc) = expense.description.as_deref() {
                if !desc.trim().is_empty() {
                    parts.push(format!("Description: {}", desc));
                }
            }
            parts.join(", ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prepare the prompt text sent to the advisor model
pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        r#"
**Role:** You are a financial analysis AI specialized in expense tracking and budgeting.

**Objective:** Analyze user spending data and provide accurate, simple-to-understand answers strictly using the given context.

**Context:**
{context}

**Instructions:**
**Instruction 1:** Answer only based on context.
**Instruction 2:** Explain in simple language for non-experts.
**Instruction 3:** Use bullet points if suitable.
**Instruction 4:** If context is insufficient, state "Not enough information to answer."
**Instruction 5:** Provide your output in 3 short sections:
   - Direct Answer
   - Supporting Details
   - Actionable Recommendations

**Notes:**
- Do not hallucinate information.
- Be concise and actionable.
- Explain financial terms briefly if used.
- Use bullet points for clarity.

Question:
{question}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn expense(amount: f64, category: &str, description: Option<&str>) -> Expense {
        Expense {
            id: 1,
            user_id: "alice".to_string(),
            amount,
            category: category.to_string(),
            description: description.map(str::to_string),
            icon: None,
            created_at: Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_context_includes_description_when_present() {
        let context = format_context(&[
            expense(450.0, "Food", Some("Dinner")),
            expense(120.0, "Transport", None),
        ]);
        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(
            lines[0],
            "Date: August 05, 2026, Amount: ₹450.00, Category: Food, Description: Dinner"
        );
        assert_eq!(lines[1], "Date: August 05, 2026, Amount: ₹120.00, Category: Transport");
    }

    #[test]
    fn test_build_prompt_embeds_question_and_context() {
        let prompt = build_prompt("What did I spend the most on?", "ctx-line");
        assert!(prompt.contains("ctx-line"));
        assert!(prompt.contains("What did I spend the most on?"));
        assert!(prompt.contains("Direct Answer"));
    }
}
