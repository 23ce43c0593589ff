//! Kharcha Core Library
//!
//! Shared functionality for the Kharcha expense tracker:
//! - Database access and migrations
//! - Receipt-text amount and category inference pipeline
//! - Keyword category classifier
//! - Spending reports and aggregates
//! - AI advisor with a hosted backend and templated local fallback
//! - Form-boundary validation for new expenses

pub mod advisor;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod validate;

pub use advisor::{
    Advisor, AdvisorAnswer, AdvisorBackend, AdvisorClient, AdvisorConfig, AnswerSource,
};
pub use db::Database;
pub use error::{Error, Result};
pub use extract::{CategoryClassifier, ExtractionResult, ReceiptExtractor};
