//! Spending report operations

use chrono::NaiveDate;
use rusqlite::OptionalExtension;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{CategorySpending, DailySpending, Expense, SpendingSummary};

impl Database {
    /// Spending aggregates for a user over an optional date range
    pub fn get_spending_summary(
        &self,
        user_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<SpendingSummary> {
        let conn = self.conn()?;

        let (date_clause, from_s, to_s) = match (from, to) {
            (Some(f), Some(t)) => (
                " AND date(created_at) BETWEEN ? AND ?",
                f.to_string(),
                t.to_string(),
            ),
            _ => ("", String::new(), String::new()),
        };

        let range_params: Vec<&dyn rusqlite::ToSql> = if date_clause.is_empty() {
            vec![&user_id]
        } else {
            vec![&user_id, &from_s, &to_s]
        };

        // Totals
        let (total, count): (f64, i64) = conn.query_row(
            &format!(
                "SELECT COALESCE(SUM(amount), 0), COUNT(*) FROM expenses WHERE user_id = ?{}",
                date_clause
            ),
            range_params.as_slice(),
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        // Per-category totals, largest first
        let mut stmt = conn.prepare(&format!(
            "SELECT category, SUM(amount), COUNT(*) FROM expenses
             WHERE user_id = ?{}
             GROUP BY category ORDER BY SUM(amount) DESC",
            date_clause
        ))?;
        let categories = stmt
            .query_map(range_params.as_slice(), |row| {
                Ok(CategorySpending {
                    category: row.get(0)?,
                    amount: row.get(1)?,
                    count: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        // Per-day totals, oldest first
        let mut stmt = conn.prepare(&format!(
            "SELECT date(created_at), SUM(amount) FROM expenses
             WHERE user_id = ?{}
             GROUP BY date(created_at) ORDER BY date(created_at) ASC",
            date_clause
        ))?;
        let by_day = stmt
            .query_map(range_params.as_slice(), |row| {
                let date_str: String = row.get(0)?;
                Ok((date_str, row.get::<_, f64>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?
            .into_iter()
            .filter_map(|(date_str, amount)| {
                NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                    .ok()
                    .map(|date| DailySpending { date, amount })
            })
            .collect();

        // Single largest expense
        let mut stmt = conn.prepare(&format!(
            "SELECT id, user_id, amount, category, description, icon, created_at, updated_at
             FROM expenses WHERE user_id = ?{}
             ORDER BY amount DESC, id ASC LIMIT 1",
            date_clause
        ))?;
        let largest = stmt
            .query_row(range_params.as_slice(), |row| {
                let created_at_str: String = row.get(6)?;
                let updated_at_str: String = row.get(7)?;
                Ok(Expense {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    amount: row.get(2)?,
                    category: row.get(3)?,
                    description: row.get(4)?,
                    icon: row.get(5)?,
                    created_at: parse_datetime(&created_at_str),
                    updated_at: parse_datetime(&updated_at_str),
                })
            })
            .optional()?;

        let average = if count > 0 { total / count as f64 } else { 0.0 };

        Ok(SpendingSummary {
            total,
            count,
            average,
            categories,
            by_day,
            largest,
        })
    }
}
