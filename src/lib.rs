//! Sparq: visual preference learning for the Sparq dating demo
//!
//! Swipe → PreferenceModel update → prediction / ranking / insights

pub mod core;
pub mod types;

// =============================================================================
// SWIPE WEIGHTS [C]
// =============================================================================

/// Score delta applied for a like
pub const LIKE_DELTA: f64 = 1.0;

/// Score delta applied for a dislike (half the magnitude of a like)
pub const DISLIKE_DELTA: f64 = -0.5;

// =============================================================================
// CONFIDENCE [C]
// =============================================================================

/// Total swipes at which confidence saturates at 100
pub const CONFIDENCE_FULL_SWIPES: usize = 20;

/// Upper bound of the confidence scale
pub const CONFIDENCE_MAX: u8 = 100;

/// Below this confidence the predictor answers neutral
pub const PREDICTION_MIN_CONFIDENCE: u8 = 20;

/// Neutral prediction
pub const NEUTRAL_PREDICTION: f64 = 0.5;

// =============================================================================
// RANKING / INSIGHTS [C]
// =============================================================================

/// Default number of categories returned by the ranker
pub const DEFAULT_TOP_CATEGORIES: usize = 3;

/// Number of values shown per feature in insights
pub const INSIGHT_TOP_VALUES: usize = 3;

/// Score magnitude that maps to the ends of the insight percentage scale
pub const INSIGHT_SCORE_RANGE: f64 = 5.0;

/// Scores above this (or below its negation) are "strong"
pub const STRONG_PREFERENCE_SCORE: f64 = 2.0;

/// Sentinel for a missing visual feature
pub const UNKNOWN_FEATURE: &str = "unknown";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "0.3.0";
