//! Predictor: how much a user is expected to like an unseen profile
//!
//! score = clamp(0.5 + sum / (matched * 2), 0, 1)
//!
//! An average matched score of +1 lands at 0.75, -1 at 0.25.

use crate::core::extractor::extract_features;
use crate::types::{PreferenceModel, Profile};
use crate::{NEUTRAL_PREDICTION, PREDICTION_MIN_CONFIDENCE};

/// Preference estimate in [0, 1]; 0.5 while the model has too little data
pub fn predict(model: &PreferenceModel, profile: &Profile) -> f64 {
    if model.confidence() < PREDICTION_MIN_CONFIDENCE {
        return NEUTRAL_PREDICTION;
    }

    let mut sum = 0.0;
    let mut matched = 0usize;

    for (feature, value) in extract_features(profile).iter_known() {
        // A zero score counts as no evidence
        if let Some(score) = model.feature_scores().score(feature, value).filter(|s| *s != 0.0) {
            sum += score;
            matched += 1;
        }
    }

    if let Some(category) = profile.visual_type {
        let score = model.category_scores().get(category);
        if score != 0.0 {
            sum += score;
            matched += 1;
        }
    }

    if matched == 0 {
        return NEUTRAL_PREDICTION;
    }

    (NEUTRAL_PREDICTION + sum / (matched as f64 * 2.0)).clamp(0.0, 1.0)
}
