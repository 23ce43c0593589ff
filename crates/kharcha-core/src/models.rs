//! Domain models for Kharcha

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Default glyph for user-defined categories that match no preset
pub const CUSTOM_CATEGORY_GLYPH: &str = "💰";

/// The eight preset expense categories
///
/// Order matters: the keyword classifier walks this table top to bottom and
/// the first category with any keyword match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetCategory {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    Health,
    Education,
    Other,
}

impl PresetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }

    /// Glyph shown next to expenses in this category
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Food => "🍔",
            Self::Transport => "🚗",
            Self::Shopping => "🛍️",
            Self::Entertainment => "🎬",
            Self::Bills => "🧾",
            Self::Health => "💊",
            Self::Education => "📚",
            Self::Other => "💳",
        }
    }

    /// All presets in classifier table order
    pub fn all() -> &'static [PresetCategory] {
        &[
            Self::Food,
            Self::Transport,
            Self::Shopping,
            Self::Entertainment,
            Self::Bills,
            Self::Health,
            Self::Education,
            Self::Other,
        ]
    }
}

impl std::str::FromStr for PresetCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "transport" => Ok(Self::Transport),
            "shopping" => Ok(Self::Shopping),
            "entertainment" => Ok(Self::Entertainment),
            "bills" => Ok(Self::Bills),
            "health" => Ok(Self::Health),
            "education" => Ok(Self::Education),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for PresetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of classifying a user-typed category phrase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum CategoryGuess {
    /// Matched one of the preset categories
    Preset(PresetCategory),
    /// No preset matched; the original text is kept as a custom category
    Custom(String),
}

impl CategoryGuess {
    pub fn name(&self) -> &str {
        match self {
            Self::Preset(p) => p.as_str(),
            Self::Custom(s) => s,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Preset(p) => p.glyph(),
            Self::Custom(_) => CUSTOM_CATEGORY_GLYPH,
        }
    }
}

/// Glyph for a category name: the preset glyph when the name is a preset,
/// the custom default otherwise
pub fn default_icon_for(category: &str) -> &'static str {
    category
        .parse::<PresetCategory>()
        .map(|p| p.glyph())
        .unwrap_or(CUSTOM_CATEGORY_GLYPH)
}

/// A stored expense, owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: String,
    /// Always positive; validated at the form boundary
    pub amount: f64,
    /// Preset name or user-defined custom category (2-20 chars)
    pub category: String,
    pub description: Option<String>,
    /// Glyph reference shown in lists
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A new expense to be stored (before DB insertion)
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// A recorded extraction run over recognized receipt text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptScan {
    pub id: i64,
    pub user_id: String,
    /// SHA-256 of the recognized text, hex encoded
    pub content_hash: String,
    pub amount: Option<f64>,
    pub confidence: u8,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A new receipt scan to be recorded
#[derive(Debug, Clone)]
pub struct NewReceiptScan {
    pub content_hash: String,
    pub amount: Option<f64>,
    pub confidence: u8,
    pub category: Option<String>,
}

/// Per-category spending totals
#[derive(Debug, Clone, Serialize)]
pub struct CategorySpending {
    pub category: String,
    pub amount: f64,
    pub count: i64,
}

/// Per-day spending totals
#[derive(Debug, Clone, Serialize)]
pub struct DailySpending {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Spending aggregates over a user's expenses
///
/// Feeds both the advisor fallback and the summary report surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct SpendingSummary {
    pub total: f64,
    pub count: i64,
    pub average: f64,
    /// Sorted descending by amount
    pub categories: Vec<CategorySpending>,
    /// Sorted ascending by date
    pub by_day: Vec<DailySpending>,
    /// The single largest expense, if any
    pub largest: Option<Expense>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_category_round_trip() {
        for cat in PresetCategory::all() {
            let parsed: PresetCategory = cat.as_str().parse().unwrap();
            assert_eq!(parsed, *cat);
        }
        assert!("groceries".parse::<PresetCategory>().is_err());
    }

    #[test]
    fn test_default_icon_for() {
        assert_eq!(default_icon_for("Transport"), "🚗");
        assert_eq!(default_icon_for("transport"), "🚗");
        assert_eq!(default_icon_for("Gym membership"), CUSTOM_CATEGORY_GLYPH);
    }

    #[test]
    fn test_category_guess_accessors() {
        let preset = CategoryGuess::Preset(PresetCategory::Food);
        assert_eq!(preset.name(), "Food");
        assert_eq!(preset.glyph(), "🍔");

        let custom = CategoryGuess::Custom("Trekking gear".into());
        assert_eq!(custom.name(), "Trekking gear");
        assert_eq!(custom.glyph(), CUSTOM_CATEGORY_GLYPH);
    }
}
