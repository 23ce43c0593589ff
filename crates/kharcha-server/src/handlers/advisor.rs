//! Advisor handlers

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{get_user_id, AppError, AppState};
use kharcha_core::advisor::AnswerSource;

/// How many recent expenses feed the advisor context
const CONTEXT_EXPENSE_LIMIT: i64 = 100;

/// Request body for an advisor query
#[derive(Debug, Deserialize)]
pub struct AdvisorQueryRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct AdvisorQueryResponse {
    pub answer: String,
    pub context_used: String,
    pub source: AnswerSource,
    pub model: Option<String>,
    pub num_expenses: usize,
}

/// POST /api/advisor/query - Ask the advisor about the caller's spending
///
/// The context is assembled server-side from the caller's own stored
/// expenses; advisor backend failures degrade to the templated local
/// analysis rather than surfacing as errors.
pub async fn query_advisor(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<AdvisorQueryRequest>,
) -> Result<Json<AdvisorQueryResponse>, AppError> {
    let user_id = get_user_id(&headers);

    info!(user = %user_id, "Advisor query received");

    let expenses = state
        .db
        .list_expenses(&user_id, None, CONTEXT_EXPENSE_LIMIT, 0)?;

    let answer = state.advisor.answer(&req.question, &expenses).await?;

    Ok(Json(AdvisorQueryResponse {
        answer: answer.answer,
        context_used: answer.context_used,
        source: answer.source,
        model: answer.model,
        num_expenses: expenses.len(),
    }))
}
