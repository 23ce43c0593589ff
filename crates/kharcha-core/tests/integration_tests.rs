//! Integration tests for kharcha-core
//!
//! These tests exercise the full store → report → scan → advise workflow.

use kharcha_core::{
    advisor::{Advisor, AdvisorClient, AnswerSource, MockBackend},
    db::{content_hash, Database},
    extract::ReceiptExtractor,
    models::{NewExpense, NewReceiptScan, PresetCategory},
    validate::validate_new_expense,
};

fn new_expense(amount: f64, category: &str, description: Option<&str>) -> NewExpense {
    NewExpense {
        amount,
        category: category.to_string(),
        description: description.map(str::to_string),
        icon: None,
    }
}

/// A realistic fuel receipt as recognized text
const FUEL_RECEIPT: &str = "HP Petrol Pump\n\
    Vehicle No: KA 01 AB 1234\n\
    Nozzle 4  Density 742.1\n\
    Petrol 2.45 Ltr\n\
    Rate 102.50\n\
    Total: 2000.00\n\
    Thank you, visit again";

#[test]
fn test_store_and_report_workflow() {
    let db = Database::in_memory().unwrap();

    for (amount, category, desc) in [
        (450.0, "Food", Some("Dinner")),
        (2000.0, "Transport", Some("Fuel")),
        (150.0, "Food", None),
    ] {
        let expense = new_expense(amount, category, desc);
        validate_new_expense(&expense).unwrap();
        db.insert_expense("alice", &expense).unwrap();
    }

    let summary = db.get_spending_summary("alice", None, None).unwrap();
    assert_eq!(summary.total, 2600.0);
    assert_eq!(summary.count, 3);
    assert_eq!(summary.categories[0].category, "Transport");
    assert_eq!(summary.largest.as_ref().unwrap().amount, 2000.0);
}

#[test]
fn test_scan_then_prefill_workflow() {
    let db = Database::in_memory().unwrap();
    let extractor = ReceiptExtractor::load().unwrap();

    // Run extraction over the recognized text
    let result = extractor.extract(FUEL_RECEIPT);
    assert_eq!(result.amount.as_deref(), Some("2000.00"));
    assert_eq!(result.confidence, 95);
    assert_eq!(result.category, Some(PresetCategory::Transport));

    // Record the scan; the suggestion pre-fills the form but is never
    // committed automatically
    let hash = content_hash(FUEL_RECEIPT);
    db.insert_scan(
        "alice",
        &NewReceiptScan {
            content_hash: hash.clone(),
            amount: result.amount_value(),
            confidence: result.confidence,
            category: result.category.map(|c| c.as_str().to_string()),
        },
    )
    .unwrap();

    // Re-scanning identical text is answered from history
    let cached = db.get_scan_by_hash("alice", &hash).unwrap().unwrap();
    assert_eq!(cached.amount, Some(2000.0));
    assert_eq!(cached.confidence, 95);
    assert_eq!(cached.category.as_deref(), Some("Transport"));

    // The user accepts the suggestion and submits the form
    let expense = new_expense(2000.0, "Transport", Some("Fuel"));
    validate_new_expense(&expense).unwrap();
    let id = db.insert_expense("alice", &expense).unwrap();
    assert!(db.get_expense("alice", id).unwrap().is_some());
}

#[test]
fn test_extraction_is_deterministic_across_instances() {
    let a = ReceiptExtractor::load().unwrap().extract(FUEL_RECEIPT);
    let b = ReceiptExtractor::load().unwrap().extract(FUEL_RECEIPT);
    assert_eq!(a.amount, b.amount);
    assert_eq!(a.confidence, b.confidence);
    assert_eq!(a.category, b.category);
}

#[tokio::test]
async fn test_advise_over_stored_expenses() {
    let db = Database::in_memory().unwrap();
    db.insert_expense("alice", &new_expense(450.0, "Food", Some("Dinner")))
        .unwrap();
    db.insert_expense("alice", &new_expense(2000.0, "Transport", Some("Fuel")))
        .unwrap();

    let expenses = db.list_expenses("alice", None, 100, 0).unwrap();

    // Remote path
    let advisor = Advisor::new(Some(AdvisorClient::mock()));
    let answer = advisor
        .answer("Where does my money go?", &expenses)
        .await
        .unwrap();
    assert_eq!(answer.source, AnswerSource::Remote);
    assert!(answer.context_used.contains("Category: Transport"));

    // Remote failure degrades to the templated local analysis
    let advisor = Advisor::new(Some(AdvisorClient::Mock(MockBackend::failing())));
    let answer = advisor
        .answer("What was my biggest expense?", &expenses)
        .await
        .unwrap();
    assert_eq!(answer.source, AnswerSource::Local);
    assert!(answer.answer.contains("₹2000.00"));
}

#[test]
fn test_validation_rejects_before_any_write() {
    let db = Database::in_memory().unwrap();

    let bad = new_expense(-10.0, "Food", None);
    assert!(validate_new_expense(&bad).is_err());

    let bad = new_expense(100.0, "X", None);
    assert!(validate_new_expense(&bad).is_err());

    assert_eq!(db.count_expenses("alice", None).unwrap(), 0);
}
