//! Display-oriented views of a preference model

use serde::{Deserialize, Serialize};

use crate::types::{Category, Feature};
use crate::{INSIGHT_SCORE_RANGE, STRONG_PREFERENCE_SCORE};

/// Verbal bucket for a raw score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreferenceStrength {
    StrongPreference,
    MildPreference,
    Neutral,
    MildDislike,
    StrongDislike,
}

impl PreferenceStrength {
    pub fn from_score(score: f64) -> Self {
        if score > STRONG_PREFERENCE_SCORE {
            Self::StrongPreference
        } else if score > 0.0 {
            Self::MildPreference
        } else if score < -STRONG_PREFERENCE_SCORE {
            Self::StrongDislike
        } else if score < 0.0 {
            Self::MildDislike
        } else {
            Self::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::StrongPreference => "Strong preference",
            Self::MildPreference => "Mild preference",
            Self::Neutral => "Neutral",
            Self::MildDislike => "Mild dislike",
            Self::StrongDislike => "Strong dislike",
        }
    }
}

impl std::fmt::Display for PreferenceStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Maps a score in [-5, 5] onto [0, 100], clamped outside that range
pub fn score_percentage(score: f64) -> f64 {
    ((score + INSIGHT_SCORE_RANGE) * 10.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInsight {
    pub category: Category,
    pub description: String,
    pub score: f64,
    pub percentage: f64,
    pub strength: PreferenceStrength,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueInsight {
    pub value: String,
    pub score: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureInsight {
    pub feature: Feature,
    pub description: String,
    pub top_values: Vec<ValueInsight>,
}

/// Everything the insights panel renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceInsights {
    pub user_id: String,
    pub total_swipes: usize,
    pub confidence: u8,
    /// All eight categories, best first
    pub categories: Vec<CategoryInsight>,
    /// One entry per feature, canonical order
    pub features: Vec<FeatureInsight>,
}
