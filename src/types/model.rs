//! The per-user preference model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Category, Feature};
use crate::{CONFIDENCE_FULL_SWIPES, CONFIDENCE_MAX, UNKNOWN_FEATURE};

/// Observed value -> running score, for one feature
pub type ValueScores = BTreeMap<String, f64>;

/// Fixed record of the seven per-feature score tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureScores {
    pub hair_color: ValueScores,
    pub hair_style: ValueScores,
    pub eye_color: ValueScores,
    pub face_shape: ValueScores,
    pub body_type: ValueScores,
    pub style: ValueScores,
    pub visual_type: ValueScores,
}

impl FeatureScores {
    pub fn get(&self, feature: Feature) -> &ValueScores {
        match feature {
            Feature::HairColor => &self.hair_color,
            Feature::HairStyle => &self.hair_style,
            Feature::EyeColor => &self.eye_color,
            Feature::FaceShape => &self.face_shape,
            Feature::BodyType => &self.body_type,
            Feature::Style => &self.style,
            Feature::VisualType => &self.visual_type,
        }
    }

    pub fn get_mut(&mut self, feature: Feature) -> &mut ValueScores {
        match feature {
            Feature::HairColor => &mut self.hair_color,
            Feature::HairStyle => &mut self.hair_style,
            Feature::EyeColor => &mut self.eye_color,
            Feature::FaceShape => &mut self.face_shape,
            Feature::BodyType => &mut self.body_type,
            Feature::Style => &mut self.style,
            Feature::VisualType => &mut self.visual_type,
        }
    }

    /// Recorded score for one value
    pub fn score(&self, feature: Feature, value: &str) -> Option<f64> {
        self.get(feature).get(value).copied()
    }

    /// Remove keys that can never be learned: the unknown sentinel and blanks
    pub(crate) fn drop_unscorable(&mut self) {
        for feature in Feature::ALL {
            self.get_mut(feature).retain(|value, _| is_scorable_value(value));
        }
    }
}

/// A feature value that may carry a score
pub(crate) fn is_scorable_value(value: &str) -> bool {
    !value.trim().is_empty() && value != UNKNOWN_FEATURE
}

/// Score per category; always carries all eight keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryScores {
    pub athletic: f64,
    pub artistic: f64,
    pub professional: f64,
    pub casual: f64,
    pub alternative: f64,
    pub classic: f64,
    pub trendy: f64,
    pub outdoorsy: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Athletic => self.athletic,
            Category::Artistic => self.artistic,
            Category::Professional => self.professional,
            Category::Casual => self.casual,
            Category::Alternative => self.alternative,
            Category::Classic => self.classic,
            Category::Trendy => self.trendy,
            Category::Outdoorsy => self.outdoorsy,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut f64 {
        match category {
            Category::Athletic => &mut self.athletic,
            Category::Artistic => &mut self.artistic,
            Category::Professional => &mut self.professional,
            Category::Casual => &mut self.casual,
            Category::Alternative => &mut self.alternative,
            Category::Classic => &mut self.classic,
            Category::Trendy => &mut self.trendy,
            Category::Outdoorsy => &mut self.outdoorsy,
        }
    }

    /// (category, score) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

/// Accumulated swipe evidence for one user.
///
/// Owned by the caller; every update consumes the model and returns the
/// next state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PreferenceModelRecord")]
pub struct PreferenceModel {
    user_id: String,
    pub(crate) liked_profile_ids: Vec<String>,
    pub(crate) disliked_profile_ids: Vec<String>,
    pub(crate) feature_scores: FeatureScores,
    pub(crate) category_scores: CategoryScores,
    confidence: u8,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

impl PreferenceModel {
    /// Fresh all-zero model
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            liked_profile_ids: Vec::new(),
            disliked_profile_ids: Vec::new(),
            feature_scores: FeatureScores::default(),
            category_scores: CategoryScores::default(),
            confidence: 0,
            updated_at: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn liked_profile_ids(&self) -> &[String] {
        &self.liked_profile_ids
    }

    pub fn disliked_profile_ids(&self) -> &[String] {
        &self.disliked_profile_ids
    }

    pub fn feature_scores(&self) -> &FeatureScores {
        &self.feature_scores
    }

    pub fn category_scores(&self) -> &CategoryScores {
        &self.category_scores
    }

    /// Confidence in [0, 100]
    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    /// When the last swipe was recorded
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn total_swipes(&self) -> usize {
        self.liked_profile_ids.len() + self.disliked_profile_ids.len()
    }

    /// Has this profile id been swiped before (either direction)?
    pub fn has_swiped(&self, profile_id: &str) -> bool {
        self.liked_profile_ids.iter().any(|id| id == profile_id)
            || self.disliked_profile_ids.iter().any(|id| id == profile_id)
    }

    pub(crate) fn recompute_confidence(&mut self) {
        self.confidence = confidence_for(self.total_swipes());
    }
}

/// `min(100, floor(total / 20 * 100))`
pub fn confidence_for(total_swipes: usize) -> u8 {
    let pct = total_swipes.saturating_mul(CONFIDENCE_MAX as usize) / CONFIDENCE_FULL_SWIPES;
    pct.min(CONFIDENCE_MAX as usize) as u8
}

/// Stored shape of a model. Confidence is derived, so any stored value is
/// ignored and recomputed on load. Unscorable feature keys are dropped.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferenceModelRecord {
    user_id: String,
    #[serde(default)]
    liked_profile_ids: Vec<String>,
    #[serde(default)]
    disliked_profile_ids: Vec<String>,
    #[serde(default)]
    feature_scores: FeatureScores,
    #[serde(default)]
    category_scores: CategoryScores,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<PreferenceModelRecord> for PreferenceModel {
    fn from(record: PreferenceModelRecord) -> Self {
        let mut model = PreferenceModel {
            user_id: record.user_id,
            liked_profile_ids: record.liked_profile_ids,
            disliked_profile_ids: record.disliked_profile_ids,
            feature_scores: record.feature_scores,
            category_scores: record.category_scores,
            confidence: 0,
            updated_at: record.updated_at,
        };
        model.feature_scores.drop_unscorable();
        model.recompute_confidence();
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_curve() {
        assert_eq!(confidence_for(0), 0);
        assert_eq!(confidence_for(1), 5);
        assert_eq!(confidence_for(3), 15);
        assert_eq!(confidence_for(4), 20);
        assert_eq!(confidence_for(19), 95);
        assert_eq!(confidence_for(20), 100);
        assert_eq!(confidence_for(500), 100);
    }

    #[test]
    fn test_new_model_is_zeroed() {
        let model = PreferenceModel::new("u1");
        assert_eq!(model.user_id(), "u1");
        assert_eq!(model.total_swipes(), 0);
        assert_eq!(model.confidence(), 0);
        assert!(model.category_scores().iter().all(|(_, s)| s == 0.0));
        for feature in Feature::ALL {
            assert!(model.feature_scores().get(feature).is_empty());
        }
    }

    #[test]
    fn test_serialized_shape_has_all_keys() {
        let model = PreferenceModel::new("u1");
        let json = serde_json::to_value(&model).unwrap();

        assert_eq!(json["featureScores"].as_object().unwrap().len(), 7);
        assert!(json["featureScores"]["hairColor"].is_object());
        assert_eq!(json["categoryScores"].as_object().unwrap().len(), 8);
        assert_eq!(json["categoryScores"]["outdoorsy"], 0.0);
    }

    #[test]
    fn test_stored_confidence_is_recomputed() {
        let json = r#"{
            "userId": "u9",
            "likedProfileIds": ["a", "b", "c", "d"],
            "dislikedProfileIds": [],
            "confidence": 99
        }"#;
        let model: PreferenceModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.confidence(), 20);
        assert_eq!(model.category_scores().athletic, 0.0);
    }

    #[test]
    fn test_stored_unknown_keys_are_dropped() {
        let json = r#"{
            "userId": "u9",
            "likedProfileIds": ["a"],
            "featureScores": {
                "hairColor": {"unknown": 3.0, "red": 1.0},
                "style": {" ": 2.0},
                "visualType": {"unknown": -0.5}
            }
        }"#;
        let model: PreferenceModel = serde_json::from_str(json).unwrap();
        let scores = model.feature_scores();

        assert_eq!(scores.score(Feature::HairColor, UNKNOWN_FEATURE), None);
        assert_eq!(scores.score(Feature::HairColor, "red"), Some(1.0));
        assert!(scores.get(Feature::Style).is_empty());
        assert!(scores.get(Feature::VisualType).is_empty());
    }
}
