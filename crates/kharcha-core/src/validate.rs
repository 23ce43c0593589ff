//! Form-boundary validation for new expenses
//!
//! Rejections here carry the exact message shown to the user; nothing is
//! partially written when validation fails.

use crate::error::{Error, Result};
use crate::models::NewExpense;

/// User-supplied category length bounds (inclusive)
pub const CATEGORY_MIN_LEN: usize = 2;
pub const CATEGORY_MAX_LEN: usize = 20;

/// Validate a new expense before insertion
pub fn validate_new_expense(expense: &NewExpense) -> Result<()> {
    if !expense.amount.is_finite() || expense.amount <= 0.0 {
        return Err(Error::Validation(
            "Amount must be greater than zero".to_string(),
        ));
    }

    let category = expense.category.trim();
    if category.is_empty() {
        return Err(Error::Validation("Category is required".to_string()));
    }

    let len = category.chars().count();
    if !(CATEGORY_MIN_LEN..=CATEGORY_MAX_LEN).contains(&len) {
        return Err(Error::Validation(format!(
            "Category must be between {} and {} characters",
            CATEGORY_MIN_LEN, CATEGORY_MAX_LEN
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(amount: f64, category: &str) -> NewExpense {
        NewExpense {
            amount,
            category: category.to_string(),
            description: None,
            icon: None,
        }
    }

    #[test]
    fn test_valid_expense() {
        assert!(validate_new_expense(&expense(120.0, "Food")).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        assert!(validate_new_expense(&expense(0.0, "Food")).is_err());
        assert!(validate_new_expense(&expense(-5.0, "Food")).is_err());
        assert!(validate_new_expense(&expense(f64::NAN, "Food")).is_err());
    }

    #[test]
    fn test_rejects_missing_category() {
        let err = validate_new_expense(&expense(10.0, "  ")).unwrap_err();
        assert_eq!(err.to_string(), "Category is required");
    }

    #[test]
    fn test_category_length_bounds() {
        // Both bounds are inclusive
        assert!(validate_new_expense(&expense(10.0, "Tv")).is_ok());
        assert!(validate_new_expense(&expense(10.0, &"x".repeat(20))).is_ok());
        assert!(validate_new_expense(&expense(10.0, "X")).is_err());
        assert!(validate_new_expense(&expense(10.0, &"x".repeat(21))).is_err());
    }
}
