//! Preference updater: folds one swipe into a model
//!
//! - like: every known feature value and the visual type gain +1
//! - dislike: the same keys lose 0.5
//! - confidence follows the total swipe count

use chrono::Utc;
use tracing::trace;

use crate::core::extractor::{extract_features, validate_profile};
use crate::core::ranker::top_categories;
use crate::types::{PreferenceError, PreferenceModel, Profile, ReasonCode, SwipeOutcome};
use crate::{
    CONFIDENCE_MAX, DEFAULT_TOP_CATEGORIES, DISLIKE_DELTA, LIKE_DELTA, PREDICTION_MIN_CONFIDENCE,
};

/// Fresh model for a user
pub fn initialize_model(user_id: &str) -> PreferenceModel {
    PreferenceModel::new(user_id)
}

/// Record a swipe and return the next model state.
///
/// The id is appended verbatim; nothing is validated or de-duplicated.
pub fn record_swipe(mut model: PreferenceModel, profile: &Profile, liked: bool) -> PreferenceModel {
    if liked {
        model.liked_profile_ids.push(profile.id.clone());
    } else {
        model.disliked_profile_ids.push(profile.id.clone());
    }

    let delta = if liked { LIKE_DELTA } else { DISLIKE_DELTA };

    for (feature, value) in extract_features(profile).iter_known() {
        *model
            .feature_scores
            .get_mut(feature)
            .entry(value.to_string())
            .or_insert(0.0) += delta;
    }

    if let Some(category) = profile.visual_type {
        *model.category_scores.get_mut(category) += delta;
    }

    model.recompute_confidence();
    model.updated_at = Some(Utc::now());

    trace!(
        user_id = model.user_id(),
        profile_id = %profile.id,
        liked,
        confidence = model.confidence(),
        "swipe recorded"
    );
    model
}

/// Like `record_swipe`, but rejects malformed profile ids first
pub fn try_record_swipe(
    model: PreferenceModel,
    profile: &Profile,
    liked: bool,
) -> Result<PreferenceModel, PreferenceError> {
    validate_profile(profile)?;
    Ok(record_swipe(model, profile, liked))
}

/// Validated swipe that also reports what changed
pub fn record_swipe_with_outcome(
    model: PreferenceModel,
    profile: &Profile,
    liked: bool,
) -> Result<(PreferenceModel, SwipeOutcome), PreferenceError> {
    validate_profile(profile)?;

    let repeat = model.has_swiped(&profile.id);
    let confidence_before = model.confidence();
    let model = record_swipe(model, profile, liked);

    let mut reasons = vec![if liked {
        ReasonCode::R100_SWIPE_LIKED
    } else {
        ReasonCode::R101_SWIPE_DISLIKED
    }];
    if repeat {
        reasons.push(ReasonCode::R102_REPEAT_SWIPE);
    }
    if extract_features(profile).is_blank() {
        reasons.push(ReasonCode::R103_NO_VISUAL_METADATA);
    }
    reasons.push(confidence_reason(confidence_before, model.confidence()));

    let outcome = SwipeOutcome {
        timestamp: model.updated_at().unwrap_or_else(Utc::now),
        profile_id: profile.id.clone(),
        liked,
        confidence: model.confidence(),
        total_swipes: model.total_swipes(),
        top_categories: top_categories(&model, DEFAULT_TOP_CATEGORIES),
        reasons,
    };
    Ok((model, outcome))
}

fn confidence_reason(before: u8, after: u8) -> ReasonCode {
    if after >= CONFIDENCE_MAX {
        ReasonCode::R202_CONFIDENCE_FULL
    } else if before < PREDICTION_MIN_CONFIDENCE && after >= PREDICTION_MIN_CONFIDENCE {
        ReasonCode::R201_CONFIDENCE_GATE_OPENED
    } else {
        ReasonCode::R200_CONFIDENCE_LEARNING
    }
}

// =============================================================================
// TESTS
// =============================================================================
