//! Expense operations
//!
//! Every read and delete is scoped by the owning user id. There is no update
//! flow: expenses are created and deleted only.

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{default_icon_for, Expense, NewExpense};

impl Database {
    /// Insert an expense for a user, returning the new row id
    ///
    /// When no icon is supplied, the category's default glyph is stored.
    pub fn insert_expense(&self, user_id: &str, expense: &NewExpense) -> Result<i64> {
        let conn = self.conn()?;

        let icon = expense
            .icon
            .clone()
            .unwrap_or_else(|| default_icon_for(&expense.category).to_string());

        conn.execute(
            "INSERT INTO expenses (user_id, amount, category, description, icon)
             VALUES (?, ?, ?, ?, ?)",
            params![
                user_id,
                expense.amount,
                expense.category.trim(),
                expense.description,
                icon,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a single expense, scoped to the owning user
    pub fn get_expense(&self, user_id: &str, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, amount, category, description, icon, created_at, updated_at
             FROM expenses WHERE id = ? AND user_id = ?",
        )?;

        let expense = stmt
            .query_row(params![id, user_id], |row| Self::row_to_expense(row))
            .optional()?;

        Ok(expense)
    }

    /// List a user's expenses, newest first, with optional category filter
    pub fn list_expenses(
        &self,
        user_id: &str,
        category: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        let mut conditions = vec!["user_id = ?".to_string()];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id.to_string())];

        if let Some(cat) = category {
            if !cat.trim().is_empty() {
                conditions.push("category = ? COLLATE NOCASE".to_string());
                params.push(Box::new(cat.trim().to_string()));
            }
        }

        let sql = format!(
            "SELECT id, user_id, amount, category, description, icon, created_at, updated_at
             FROM expenses
             WHERE {}
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?",
            conditions.join(" AND ")
        );

        params.push(Box::new(limit));
        params.push(Box::new(offset));

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let expenses = stmt
            .query_map(params_refs.as_slice(), |row| Self::row_to_expense(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Count a user's expenses with optional category filter
    pub fn count_expenses(&self, user_id: &str, category: Option<&str>) -> Result<i64> {
        let conn = self.conn()?;

        let count = match category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(cat) => conn.query_row(
                "SELECT COUNT(*) FROM expenses WHERE user_id = ? AND category = ? COLLATE NOCASE",
                params![user_id, cat],
                |row| row.get(0),
            )?,
            None => conn.query_row(
                "SELECT COUNT(*) FROM expenses WHERE user_id = ?",
                params![user_id],
                |row| row.get(0),
            )?,
        };

        Ok(count)
    }

    /// Delete an expense, scoped to the owning user
    ///
    /// Returns `NotFound` when the expense does not exist or belongs to
    /// another user; the two cases are indistinguishable to the caller.
    pub fn delete_expense(&self, user_id: &str, id: i64) -> Result<()> {
        let conn = self.conn()?;

        let deleted = conn.execute(
            "DELETE FROM expenses WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;

        if deleted == 0 {
            return Err(Error::NotFound(format!("Expense {} not found", id)));
        }

        Ok(())
    }

    /// Helper to convert a row to Expense
    fn row_to_expense(row: &rusqlite::Row) -> rusqlite::Result<Expense> {
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
    }
}
