//! Amount extraction strategies
//!
//! The pipeline runs these in a fixed order and stops at the first
//! high-confidence result:
//!
//! 1. `LabeledTotalMatcher` - explicit "total"/"amount" labels (confidence 95)
//! 2. `TrailingScanner` - "total: N" near the end of the document (90)
//! 3. `ScoredCandidateSearch` - heuristically scored numeric tokens (up to 85)
//! 4. `LargestValueFallback` - largest plausible value anywhere (25)
//!
//! Confidence is an ad hoc ranking integer, not a probability. Every
//! strategy degrades to "no candidate" on malformed input; none of them
//! return errors once constructed.

use regex::Regex;

use super::normalize::RecognizedDocument;
use crate::error::Result;

/// Broad plausibility band (labeled matcher, whole-document fallback).
/// Lower bound inclusive, upper bound exclusive.
pub const PLAUSIBLE_BROAD_MIN: f64 = 10.0;
pub const PLAUSIBLE_BROAD_MAX: f64 = 1_000_000.0;

/// Narrow plausibility band (trailing scanner, candidate scorer)
pub const PLAUSIBLE_NARROW_MIN: f64 = 50.0;
pub const PLAUSIBLE_NARROW_MAX: f64 = 100_000.0;

/// How many trailing lines are assumed to contain the total
pub const TRAILING_WINDOW: usize = 15;

/// Currency-like token: optional thousands separators, optional paise,
/// tolerant of zero padding ("0120.00")
const AMOUNT: &str = r"(\d[\d,]*(?:\.\d{1,2})?)";

/// Line-level keywords that mark a line as non-monetary (phone numbers, tax
/// registration ids, fuel-pump metadata). Matched against the lowercased line.
const DENYLIST: &[&str] = &[
    "phone",
    "ph:",
    "ph.",
    "tel:",
    "mobile",
    "fax",
    "gst",
    "tin no",
    "vat",
    "fssai",
    "invoice no",
    "invoice #",
    "bill no",
    "receipt no",
    "order no",
    "token no",
    "vehicle",
    "nozzle",
    "pump no",
    "density",
    "odometer",
    "cashier",
];

/// A numeric candidate produced by one strategy
#[derive(Debug, Clone)]
pub struct AmountCandidate {
    pub value: f64,
    pub confidence: u8,
    /// The line the value was found on (evidence for debugging)
    pub line: String,
    /// Which strategy produced it
    pub strategy: &'static str,
}

/// One step of the extraction cascade
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Attempt extraction. `best_confidence` is the highest confidence any
    /// earlier strategy achieved (0 when none matched); strategies that only
    /// improve on weaker results use it as their acceptance floor.
    fn attempt(&self, doc: &RecognizedDocument, best_confidence: u8) -> Option<AmountCandidate>;
}

/// Parse a matched token: strip thousands separators, tolerate zero padding
fn parse_amount(token: &str) -> Option<f64> {
    token.replace(',', "").parse::<f64>().ok()
}

fn in_band(value: f64, min: f64, max: f64) -> bool {
    value >= min && value < max
}

fn is_denylisted(line: &str) -> bool {
    let lower = line.to_lowercase();
    DENYLIST.iter().any(|word| lower.contains(word))
}

fn is_subtotal(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("subtotal") || lower.contains("sub total") || lower.contains("sub-total")
}

// ---------------------------------------------------------------------------
// Labeled-total matcher
// ---------------------------------------------------------------------------

/// Matches explicit total labels in fixed priority order
///
/// Scans the raw lines followed by the normalized lines, so a label mangled
/// by OCR punctuation still matches on the cleaned variant. Sub-total lines
/// never count: a "Sub Total" above the real total must not win.
pub struct LabeledTotalMatcher {
    patterns: Vec<Regex>,
}

impl LabeledTotalMatcher {
    /// Label phrases in decreasing priority. Ties within one line are broken
    /// by this order, not by value.
    const LABELS: &'static [&'static str] = &[
        r"grand\s*total",
        r"net\s*total",
        r"total\s*amount",
        r"amount\s*payable",
        r"bill\s*amount",
        r"total\s*due",
        r"amount\s*due",
        r"balance\s*due",
        r"\btotal\b",
        r"\bamount\b",
    ];

    pub fn new() -> Result<Self> {
        let patterns = Self::LABELS
            .iter()
            .map(|label| {
                Regex::new(&format!(
                    r"(?i){}\s*[:\-]?\s*(?:rs\.?|inr|₹)?\s*{}",
                    label, AMOUNT
                ))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }
}

impl ExtractionStrategy for LabeledTotalMatcher {
    fn name(&self) -> &'static str {
        "labeled_total"
    }

    fn attempt(&self, doc: &RecognizedDocument, _best_confidence: u8) -> Option<AmountCandidate> {
        for pattern in &self.patterns {
            for line in doc.all_lines() {
                if is_subtotal(line) {
                    continue;
                }
                if let Some(caps) = pattern.captures(line) {
                    if let Some(value) = parse_amount(&caps[1]) {
                        if in_band(value, PLAUSIBLE_BROAD_MIN, PLAUSIBLE_BROAD_MAX) {
                            return Some(AmountCandidate {
                                value,
                                confidence: 95,
                                line: line.to_string(),
                                strategy: self.name(),
                            });
                        }
                    }
                }
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Trailing scanner
// ---------------------------------------------------------------------------

/// Scans the trailing lines for a line-level "total: N"
///
/// Totals are conventionally near the end of a receipt. Denylisted lines and
/// sub-totals are skipped so a phone number or an itemized sub-total does not
/// masquerade as the amount due.
pub struct TrailingScanner {
    total_line: Regex,
}

impl TrailingScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            total_line: Regex::new(&format!(
                r"(?i)\btotal\b\s*[:\-]?\s*(?:rs\.?|inr|₹)?\s*{}",
                AMOUNT
            ))?,
        })
    }
}

impl ExtractionStrategy for TrailingScanner {
    fn name(&self) -> &'static str {
        "trailing_scan"
    }

    fn attempt(&self, doc: &RecognizedDocument, _best_confidence: u8) -> Option<AmountCandidate> {
        for line in doc.trailing_raw_lines(TRAILING_WINDOW) {
            if is_denylisted(line) || is_subtotal(line) {
                continue;
            }
            if let Some(caps) = self.total_line.captures(line) {
                if let Some(value) = parse_amount(&caps[1]) {
                    if in_band(value, PLAUSIBLE_NARROW_MIN, PLAUSIBLE_NARROW_MAX) {
                        return Some(AmountCandidate {
                            value,
                            confidence: 90,
                            line: line.to_string(),
                            strategy: self.name(),
                        });
                    }
                }
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Scored candidate search
// ---------------------------------------------------------------------------

/// Scores every currency-like token in the trailing window by independent
/// additive signals and accepts the best one when it beats what earlier
/// strategies achieved
pub struct ScoredCandidateSearch {
    token: Regex,
    total_colon: Regex,
}

/// Score cap: a scored guess never outranks the labeled or positional
/// strategies
const SCORE_CAP: u8 = 85;

impl ScoredCandidateSearch {
    pub fn new() -> Result<Self> {
        Ok(Self {
            token: Regex::new(AMOUNT)?,
            total_colon: Regex::new(r"(?i)\btotal\s*:")?,
        })
    }

    fn score_token(&self, line: &str, value: f64, has_decimal: bool, is_last: bool) -> u8 {
        let lower = line.to_lowercase();
        let mut score: u32 = 0;

        if has_decimal {
            score += 15;
        }
        if is_last {
            score += 10;
        }

        // Larger values are more likely to be the bill total than a quantity
        // or unit price
        if value >= 100.0 {
            score += 10;
        }
        if value >= 500.0 {
            score += 10;
        }
        if value >= 1000.0 {
            score += 10;
        }
        if value >= 5000.0 {
            score += 5;
        }

        if lower.contains("total") {
            score += 30;
        } else if lower.contains("amount") || lower.contains("bill") {
            score += 15;
        }
        if self.total_colon.is_match(line) {
            score += 10;
        }

        score.min(SCORE_CAP as u32) as u8
    }
}

impl ExtractionStrategy for ScoredCandidateSearch {
    fn name(&self) -> &'static str {
        "scored_candidates"
    }

    fn attempt(&self, doc: &RecognizedDocument, best_confidence: u8) -> Option<AmountCandidate> {
        let mut candidates: Vec<AmountCandidate> = Vec::new();

        for line in doc.trailing_raw_lines(TRAILING_WINDOW) {
            if is_denylisted(line) || is_subtotal(line) {
                continue;
            }

            let matches: Vec<_> = self.token.find_iter(line).collect();
            let last_end = matches.last().map(|m| m.end());

            for m in &matches {
                let Some(value) = parse_amount(m.as_str()) else {
                    continue;
                };
                if !in_band(value, PLAUSIBLE_NARROW_MIN, PLAUSIBLE_NARROW_MAX) {
                    continue;
                }

                let has_decimal = m.as_str().contains('.');
                let is_last = Some(m.end()) == last_end;
                let score = self.score_token(line, value, has_decimal, is_last);

                candidates.push(AmountCandidate {
                    value,
                    confidence: score,
                    line: line.to_string(),
                    strategy: self.name(),
                });
            }
        }

        // Stable sort keeps earlier tokens ahead on score ties
        candidates.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        candidates
            .into_iter()
            .next()
            .filter(|c| c.confidence > best_confidence)
    }
}

// ---------------------------------------------------------------------------
// Largest-value fallback
// ---------------------------------------------------------------------------

/// Last resort: the largest plausible value anywhere in the document
///
/// Absent structural cues, the total is statistically likely to be among the
/// largest monetary figures present. Only runs when nothing else matched.
pub struct LargestValueFallback {
    token: Regex,
}

impl LargestValueFallback {
    pub fn new() -> Result<Self> {
        Ok(Self {
            token: Regex::new(AMOUNT)?,
        })
    }
}

impl ExtractionStrategy for LargestValueFallback {
    fn name(&self) -> &'static str {
        "largest_value"
    }

    fn attempt(&self, doc: &RecognizedDocument, best_confidence: u8) -> Option<AmountCandidate> {
        if best_confidence > 0 {
            return None;
        }

        let mut best: Option<AmountCandidate> = None;
        for line in doc.raw_lines() {
            for m in self.token.find_iter(line) {
                let Some(value) = parse_amount(m.as_str()) else {
                    continue;
                };
                if !in_band(value, PLAUSIBLE_BROAD_MIN, PLAUSIBLE_BROAD_MAX) {
                    continue;
                }
                if best.as_ref().map(|b| value > b.value).unwrap_or(true) {
                    best = Some(AmountCandidate {
                        value,
                        confidence: 25,
                        line: line.to_string(),
                        strategy: self.name(),
                    });
                }
            }
        }
        best
    }
}
