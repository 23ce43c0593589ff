//! Receipt amount and category inference
//!
//! Given recognized receipt text (OCR happens upstream), this pipeline makes
//! a best-effort guess at the bill total and an expense category:
//!
//! ```text
//! raw text -> normalize -> labeled match -> trailing scan
//!          -> scored candidates -> largest-value fallback
//!          -> (amount, confidence, category guess)
//! ```
//!
//! The result is a pre-filled suggestion for the expense form, never an
//! automatic commit. The whole pipeline is pure: identical input text always
//! produces the identical result, and malformed input degrades to "no amount
//! found" rather than an error.

mod classify;
mod normalize;
mod strategy;

pub use classify::CategoryClassifier;
pub use normalize::RecognizedDocument;
pub use strategy::{
    AmountCandidate, ExtractionStrategy, LabeledTotalMatcher, LargestValueFallback,
    ScoredCandidateSearch, TrailingScanner,
};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::PresetCategory;

/// A strategy result at or above this confidence ends the cascade early
const HIGH_CONFIDENCE: u8 = 90;

/// Outcome of one extraction run
///
/// `amount` is a decimal string ("1200.00") ready for form pre-fill;
/// `confidence` is the ranking integer of the winning strategy (0 when no
/// amount was found); `category` is the keyword classifier's guess over the
/// whole document, absent when nothing matched.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub amount: Option<String>,
    pub confidence: u8,
    pub category: Option<PresetCategory>,
}

impl ExtractionResult {
    fn empty() -> Self {
        Self {
            amount: None,
            confidence: 0,
            category: None,
        }
    }

    /// The winning amount as a number, if any
    pub fn amount_value(&self) -> Option<f64> {
        self.amount.as_deref().and_then(|a| a.parse().ok())
    }
}

/// The composed extraction pipeline
///
/// Owns the ordered strategy list and the injected category classifier.
/// Construct once (regex tables compile at load time) and reuse across
/// calls; extraction itself holds no state.
pub struct ReceiptExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    classifier: CategoryClassifier,
}

impl ReceiptExtractor {
    /// Build the pipeline with a freshly loaded classifier
    pub fn load() -> Result<Self> {
        Self::with_classifier(CategoryClassifier::load())
    }

    /// Build the pipeline around an injected classifier
    pub fn with_classifier(classifier: CategoryClassifier) -> Result<Self> {
        if !classifier.is_ready() {
            return Err(Error::InvalidData(
                "Category classifier is not ready".to_string(),
            ));
        }

        let strategies: Vec<Box<dyn ExtractionStrategy>> = vec![
            Box::new(LabeledTotalMatcher::new()?),
            Box::new(TrailingScanner::new()?),
            Box::new(ScoredCandidateSearch::new()?),
            Box::new(LargestValueFallback::new()?),
        ];

        Ok(Self {
            strategies,
            classifier,
        })
    }

    /// The injected classifier, for classifying user-typed phrases outside
    /// the document pipeline
    pub fn classifier(&self) -> &CategoryClassifier {
        &self.classifier
    }

    /// Run the full pipeline over recognized text
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let doc = RecognizedDocument::new(text);
        if doc.is_empty() {
            return ExtractionResult::empty();
        }

        let mut best: Option<AmountCandidate> = None;

        for strategy in &self.strategies {
            let floor = best.as_ref().map(|c| c.confidence).unwrap_or(0);
            if let Some(candidate) = strategy.attempt(&doc, floor) {
                debug!(
                    strategy = candidate.strategy,
                    value = candidate.value,
                    confidence = candidate.confidence,
                    "extraction candidate"
                );
                let improves = best
                    .as_ref()
                    .map(|b| candidate.confidence > b.confidence)
                    .unwrap_or(true);
                if improves {
                    best = Some(candidate);
                }
            }

            if best
                .as_ref()
                .map(|c| c.confidence >= HIGH_CONFIDENCE)
                .unwrap_or(false)
            {
                break;
            }
        }

        let category = self.classifier.classify_document(text);

        match best {
            Some(candidate) => ExtractionResult {
                amount: Some(format!("{:.2}", candidate.value)),
                confidence: candidate.confidence,
                category,
            },
            None => ExtractionResult {
                amount: None,
                confidence: 0,
                category,
            },
        }
    }
}
