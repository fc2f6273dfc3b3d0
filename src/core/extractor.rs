//! Feature extraction and rule-based visual type classification
//!
//! Feature values come from metadata tagged on the profile; nothing is
//! derived from images.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{Category, FeatureValues, PreferenceError, Profile};
use crate::UNKNOWN_FEATURE;

lazy_static! {
    static ref RE_PROFILE_ID: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

/// Tagged value with surrounding whitespace removed; blank counts as untagged
fn tagged(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn or_unknown(value: &Option<String>) -> &str {
    tagged(value).unwrap_or(UNKNOWN_FEATURE)
}

/// Map a profile onto its seven feature values. Missing fields become
/// `"unknown"`. Never fails.
pub fn extract_features(profile: &Profile) -> FeatureValues<'_> {
    FeatureValues::new([
        or_unknown(&profile.hair_color),
        or_unknown(&profile.hair_style),
        or_unknown(&profile.eye_color),
        or_unknown(&profile.face_shape),
        or_unknown(&profile.body_type),
        or_unknown(&profile.style),
        profile.visual_type.map(|c| c.as_str()).unwrap_or(UNKNOWN_FEATURE),
    ])
}

/// Reject profile ids that are empty or not `[A-Za-z0-9_-]+`
pub fn validate_profile(profile: &Profile) -> Result<(), PreferenceError> {
    if RE_PROFILE_ID.is_match(&profile.id) {
        Ok(())
    } else {
        Err(PreferenceError::InvalidProfile(profile.id.clone()))
    }
}

/// Classify a profile into a visual type from its style, body type and
/// hair style. First matching rule wins; falls back to casual.
pub fn determine_visual_type(profile: &Profile) -> Category {
    let style = tagged(&profile.style).unwrap_or("");
    let body = tagged(&profile.body_type).unwrap_or("");
    let hair = tagged(&profile.hair_style).unwrap_or("");

    if matches!(body, "athletic" | "muscular") {
        return Category::Athletic;
    }
    if style == "creative" || hair == "colorful" {
        return Category::Artistic;
    }
    if matches!(style, "formal" | "business") {
        return Category::Professional;
    }
    if matches!(style, "casual" | "relaxed") {
        return Category::Casual;
    }
    if style == "alternative" || hair == "unconventional" {
        return Category::Alternative;
    }
    if matches!(style, "classic" | "elegant") {
        return Category::Classic;
    }
    if matches!(style, "trendy" | "fashionable") {
        return Category::Trendy;
    }
    if style == "outdoorsy" || body == "fit" {
        return Category::Outdoorsy;
    }
    Category::Casual
}
