//! Expense handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{get_user_id, AppError, AppState, MAX_PAGE_LIMIT};
use kharcha_core::models::{CategoryGuess, Expense, NewExpense, SpendingSummary};
use kharcha_core::validate::validate_new_expense;

/// Query parameters for listing expenses
#[derive(Debug, Deserialize)]
pub struct ExpenseQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    /// Filter by category name (case-insensitive exact match)
    pub category: Option<String>,
}

fn default_limit() -> i64 {
    50
}

#[derive(Serialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// GET /api/expenses - List the caller's expenses
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExpenseQuery>,
    headers: HeaderMap,
) -> Result<Json<ExpenseListResponse>, AppError> {
    let user_id = get_user_id(&headers);

    // Input validation: clamp pagination parameters
    let limit = params.limit.clamp(1, MAX_PAGE_LIMIT);
    let offset = params.offset.max(0);
    let category = params.category.as_deref();

    let expenses = state.db.list_expenses(&user_id, category, limit, offset)?;
    let total = state.db.count_expenses(&user_id, category)?;

    Ok(Json(ExpenseListResponse {
        expenses,
        total,
        limit,
        offset,
    }))
}

/// Request body for creating an expense
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// POST /api/expenses - Create an expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<Json<Expense>, AppError> {
    let user_id = get_user_id(&headers);

    let new_expense = NewExpense {
        amount: req.amount,
        category: req.category,
        description: req.description,
        icon: req.icon,
    };

    // Rejected submissions never reach the database
    validate_new_expense(&new_expense)?;

    let id = state.db.insert_expense(&user_id, &new_expense)?;
    let expense = state
        .db
        .get_expense(&user_id, id)?
        .ok_or_else(|| AppError::internal("Expense vanished after insert"))?;

    Ok(Json(expense))
}

/// DELETE /api/expenses/:id - Delete the caller's expense
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let user_id = get_user_id(&headers);

    state.db.delete_expense(&user_id, id)?;

    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// Request body for category classification
#[derive(Debug, Deserialize)]
pub struct ClassifyCategoryRequest {
    /// User-typed category phrase
    pub text: String,
}

#[derive(Serialize)]
pub struct ClassifyCategoryResponse {
    /// Preset name, or the original text when nothing matched
    pub category: String,
    pub glyph: String,
    /// Whether a preset matched; false means a custom category
    pub preset: bool,
}

/// POST /api/categories/classify - Map a typed phrase to a category
///
/// The form calls this while the user types to suggest a preset category and
/// glyph; an unmatched phrase stays a custom category with the default glyph.
pub async fn classify_category(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyCategoryRequest>,
) -> Json<ClassifyCategoryResponse> {
    let guess = state.extractor.classifier().classify(&req.text);
    Json(ClassifyCategoryResponse {
        preset: matches!(guess, CategoryGuess::Preset(_)),
        glyph: guess.glyph().to_string(),
        category: guess.name().to_string(),
    })
}

/// Query parameters for the spending summary
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Start date (YYYY-MM-DD)
    pub from: Option<String>,
    /// End date (YYYY-MM-DD)
    pub to: Option<String>,
}

/// GET /api/expenses/summary - Spending aggregates for the caller
pub async fn spending_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummaryQuery>,
    headers: HeaderMap,
) -> Result<Json<SpendingSummary>, AppError> {
    let user_id = get_user_id(&headers);

    let parse_date = |value: Option<&str>, name: &str| -> Result<Option<NaiveDate>, AppError> {
        value
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                    AppError::bad_request(&format!("Invalid {} date (use YYYY-MM-DD)", name))
                })
            })
            .transpose()
    };

    let from = parse_date(params.from.as_deref(), "from")?;
    let to = parse_date(params.to.as_deref(), "to")?;

    let summary = state.db.get_spending_summary(&user_id, from, to)?;

    Ok(Json(summary))
}
