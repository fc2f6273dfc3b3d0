//! Visual type categories

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::PreferenceError;

/// The eight coarse aesthetic archetypes a profile can be tagged with.
///
/// Declaration order is the canonical order: it drives `ALL`, the score
/// table layout and ranking tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Athletic,
    Artistic,
    Professional,
    Casual,
    Alternative,
    Classic,
    Trendy,
    Outdoorsy,
}

impl Category {
    /// All categories in canonical order
    pub const ALL: [Category; 8] = [
        Category::Athletic,
        Category::Artistic,
        Category::Professional,
        Category::Casual,
        Category::Alternative,
        Category::Classic,
        Category::Trendy,
        Category::Outdoorsy,
    ];

    /// Position in the canonical order
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Athletic => "athletic",
            Category::Artistic => "artistic",
            Category::Professional => "professional",
            Category::Casual => "casual",
            Category::Alternative => "alternative",
            Category::Classic => "classic",
            Category::Trendy => "trendy",
            Category::Outdoorsy => "outdoorsy",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Category::Athletic => "People with an active lifestyle and fitness focus",
            Category::Artistic => "Creative individuals with unique style and expression",
            Category::Professional => "Career-focused people with polished appearance",
            Category::Casual => "Relaxed, down-to-earth individuals",
            Category::Alternative => "People with unconventional style and interests",
            Category::Classic => "Timeless, traditional appearance and style",
            Category::Trendy => "Fashion-forward individuals following current styles",
            Category::Outdoorsy => "Nature lovers with an adventurous spirit",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PreferenceError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_index() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Outdoorsy".parse::<Category>().unwrap(), Category::Outdoorsy);
        assert_eq!(" trendy ".parse::<Category>().unwrap(), Category::Trendy);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "goth".parse::<Category>().unwrap_err();
        assert_eq!(err.code(), "E102_UNKNOWN_CATEGORY");
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Category::Professional).unwrap();
        assert_eq!(json, "\"professional\"");
        let back: Category = serde_json::from_str("\"classic\"").unwrap();
        assert_eq!(back, Category::Classic);
    }
}
