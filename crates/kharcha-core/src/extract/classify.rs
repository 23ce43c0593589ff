//! Keyword category classifier
//!
//! A fixed, ordered keyword table maps text to one of the eight preset
//! expense categories. Matching walks the table top to bottom; the first
//! category with any keyword hit wins, so ties resolve by table order and
//! nothing else. No learning, no persisted weights.
//!
//! The classifier is constructed explicitly via [`CategoryClassifier::load`]
//! and injected into whatever composes the pipeline; there is no process-wide
//! instance.

use crate::models::{CategoryGuess, PresetCategory};

/// Keyword table in priority order. One entry per preset category.
const KEYWORD_TABLE: &[(PresetCategory, &[&str])] = &[
    (
        PresetCategory::Food,
        &[
            "food", "restaurant", "cafe", "coffee", "tea", "pizza", "burger", "biryani", "meal",
            "lunch", "dinner", "breakfast", "snack", "grocery", "groceries", "swiggy", "zomato",
            "bakery", "sweets", "juice", "dhaba", "tiffin", "dairy", "milk",
        ],
    ),
    (
        PresetCategory::Transport,
        &[
            "transport", "fuel", "petrol", "diesel", "cng", "taxi", "cab", "uber", "ola",
            "rickshaw", "bus", "train", "metro", "flight", "parking", "toll", "travel",
        ],
    ),
    (
        PresetCategory::Shopping,
        &[
            "shopping", "mall", "store", "mart", "amazon", "flipkart", "myntra", "clothes",
            "clothing", "shoes", "dress", "electronics", "gadget",
        ],
    ),
    (
        PresetCategory::Entertainment,
        &[
            "entertainment", "movie", "cinema", "film", "netflix", "hotstar", "spotify", "game",
            "gaming", "concert", "party",
        ],
    ),
    (
        PresetCategory::Bills,
        &[
            "bill", "bills", "electricity", "water", "recharge", "wifi", "broadband", "internet",
            "rent", "emi", "insurance", "subscription", "postpaid", "dth",
        ],
    ),
    (
        PresetCategory::Health,
        &[
            "health", "pharmacy", "medical", "medicine", "hospital", "doctor", "clinic", "gym",
            "fitness",
        ],
    ),
    (
        PresetCategory::Education,
        &[
            "education", "school", "college", "tuition", "course", "exam", "book", "books",
            "stationery", "library",
        ],
    ),
    (
        PresetCategory::Other,
        &["other", "misc", "miscellaneous", "general"],
    ),
];

/// Rule-based category classifier over the fixed keyword table
pub struct CategoryClassifier {
    table: &'static [(PresetCategory, &'static [&'static str])],
    ready: bool,
}

impl CategoryClassifier {
    /// Build the classifier. Cheap, but callers treat it as a loadable
    /// resource with an explicit lifecycle so a heavier implementation can
    /// slot in behind the same surface.
    pub fn load() -> Self {
        Self {
            table: KEYWORD_TABLE,
            ready: true,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Classify a short user-typed phrase
    ///
    /// Returns the first preset whose keywords match; otherwise a custom
    /// category preserving the original text.
    pub fn classify(&self, phrase: &str) -> CategoryGuess {
        let trimmed = phrase.trim();
        let lower = trimmed.to_lowercase();

        for (category, keywords) in self.table {
            if keywords_match(&lower, keywords) {
                return CategoryGuess::Preset(*category);
            }
        }

        CategoryGuess::Custom(trimmed.to_string())
    }

    /// Classify a full recognized document
    ///
    /// Returns nothing when no keyword appears anywhere; the caller treats
    /// an absent category as "no guess".
    pub fn classify_document(&self, text: &str) -> Option<PresetCategory> {
        let lower = text.to_lowercase();

        for (category, keywords) in self.table {
            if keywords_match(&lower, keywords) {
                return Some(*category);
            }
        }

        None
    }
}

/// A keyword matches on exact equality, substring containment in either
/// direction, or against any individual whitespace-split word of the input.
/// Words shorter than 3 characters skip the containment checks: "at" sits
/// inside too many keywords to be a signal.
fn keywords_match(input: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| {
        if *kw == input || input.contains(kw) || (input.len() >= 3 && kw.contains(input)) {
            return true;
        }
        input
            .split_whitespace()
            .any(|word| word == *kw || (word.len() >= 3 && (word.contains(kw) || kw.contains(word))))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_maps_to_preset() {
        let classifier = CategoryClassifier::load();
        assert!(classifier.is_ready());

        assert_eq!(
            classifier.classify("I bought fuel at the petrol pump"),
            CategoryGuess::Preset(PresetCategory::Transport)
        );
        assert_eq!(
            classifier.classify("lunch with friends"),
            CategoryGuess::Preset(PresetCategory::Food)
        );
        assert_eq!(
            classifier.classify("electricity recharge"),
            CategoryGuess::Preset(PresetCategory::Bills)
        );
    }

    #[test]
    fn test_unknown_phrase_becomes_custom() {
        let classifier = CategoryClassifier::load();
        assert_eq!(
            classifier.classify("xyz123 made-up activity"),
            CategoryGuess::Custom("xyz123 made-up activity".to_string())
        );
    }

    #[test]
    fn test_table_order_breaks_ties() {
        // "water bill" mentions Bills keywords only; "restaurant bill"
        // mentions both Food and Bills, and Food sits higher in the table
        let classifier = CategoryClassifier::load();
        assert_eq!(
            classifier.classify("water bill"),
            CategoryGuess::Preset(PresetCategory::Bills)
        );
        assert_eq!(
            classifier.classify("restaurant bill"),
            CategoryGuess::Preset(PresetCategory::Food)
        );
    }

    #[test]
    fn test_substring_matches_both_directions() {
        let classifier = CategoryClassifier::load();
        // Input contained in keyword
        assert_eq!(
            classifier.classify("grocer"),
            CategoryGuess::Preset(PresetCategory::Food)
        );
        // Keyword contained in input word
        assert_eq!(
            classifier.classify("hypermart"),
            CategoryGuess::Preset(PresetCategory::Shopping)
        );
    }

    #[test]
    fn test_short_words_do_not_trigger_containment() {
        let classifier = CategoryClassifier::load();
        // "at" is inside "water" but must not map to Bills
        assert_eq!(
            classifier.classify("at"),
            CategoryGuess::Custom("at".to_string())
        );
    }

    #[test]
    fn test_document_classification() {
        let classifier = CategoryClassifier::load();
        let receipt = "HP Petrol Pump\nNozzle 4\nTotal: 2000.00";
        assert_eq!(
            classifier.classify_document(receipt),
            Some(PresetCategory::Transport)
        );

        assert_eq!(classifier.classify_document("zzz 123"), None);
    }
}
