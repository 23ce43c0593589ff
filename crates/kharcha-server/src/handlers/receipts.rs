//! Receipt extraction handlers
//!
//! OCR runs in the client; only recognized text reaches this API. The
//! extraction result is a pre-filled suggestion for the expense form - it is
//! recorded in scan history but never committed as an expense.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{get_user_id, AppError, AppState};
use kharcha_core::db::content_hash;
use kharcha_core::extract::ExtractionResult;
use kharcha_core::models::{NewReceiptScan, PresetCategory, ReceiptScan};

/// Cap on recognized-text size; OCR of a single receipt is far smaller
const MAX_TEXT_LEN: usize = 64 * 1024;

/// Request body for receipt extraction
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// Recognized (OCR) text of the receipt
    pub text: String,
}

#[derive(Serialize)]
pub struct ExtractResponse {
    pub amount: Option<String>,
    pub confidence: u8,
    pub category: Option<PresetCategory>,
    /// Whether this exact text had been scanned before
    pub cached: bool,
}

/// POST /api/receipts/extract - Infer amount and category from recognized text
pub async fn extract_receipt(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let user_id = get_user_id(&headers);

    if req.text.len() > MAX_TEXT_LEN {
        return Err(AppError::bad_request("Receipt text too large"));
    }

    let hash = content_hash(&req.text);

    // Identical text was scanned before: answer from history
    if let Some(scan) = state.db.get_scan_by_hash(&user_id, &hash)? {
        debug!(user = %user_id, "Receipt scan served from history");
        return Ok(Json(ExtractResponse {
            amount: scan.amount.map(|a| format!("{:.2}", a)),
            confidence: scan.confidence,
            category: scan.category.as_deref().and_then(|c| c.parse().ok()),
            cached: true,
        }));
    }

    let result: ExtractionResult = state.extractor.extract(&req.text);

    state.db.insert_scan(
        &user_id,
        &NewReceiptScan {
            content_hash: hash,
            amount: result.amount_value(),
            confidence: result.confidence,
            category: result.category.map(|c| c.as_str().to_string()),
        },
    )?;

    Ok(Json(ExtractResponse {
        amount: result.amount,
        confidence: result.confidence,
        category: result.category,
        cached: false,
    }))
}

/// Query parameters for listing scans
#[derive(Debug, Deserialize)]
pub struct ScanQuery {
    #[serde(default = "default_scan_limit")]
    pub limit: i64,
}

fn default_scan_limit() -> i64 {
    20
}

/// GET /api/receipts/scans - List the caller's scan history
pub async fn list_scans(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScanQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<ReceiptScan>>, AppError> {
    let user_id = get_user_id(&headers);
    let limit = params.limit.clamp(1, crate::MAX_PAGE_LIMIT);

    let scans = state.db.list_scans(&user_id, limit)?;
    Ok(Json(scans))
}
