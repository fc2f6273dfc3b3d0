//! Visual feature definitions

use serde::{Deserialize, Serialize};

use crate::UNKNOWN_FEATURE;

/// One categorical visual attribute of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    HairColor,
    HairStyle,
    EyeColor,
    FaceShape,
    BodyType,
    Style,
    VisualType,
}

impl Feature {
    /// All features in canonical order
    pub const ALL: [Feature; 7] = [
        Feature::HairColor,
        Feature::HairStyle,
        Feature::EyeColor,
        Feature::FaceShape,
        Feature::BodyType,
        Feature::Style,
        Feature::VisualType,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Wire name (camelCase, as stored in JSON)
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::HairColor => "hairColor",
            Feature::HairStyle => "hairStyle",
            Feature::EyeColor => "eyeColor",
            Feature::FaceShape => "faceShape",
            Feature::BodyType => "bodyType",
            Feature::Style => "style",
            Feature::VisualType => "visualType",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Feature::HairColor => "Hair color preference",
            Feature::HairStyle => "Hair style preference",
            Feature::EyeColor => "Eye color preference",
            Feature::FaceShape => "Face shape preference",
            Feature::BodyType => "Body type preference",
            Feature::Style => "Style and fashion preference",
            Feature::VisualType => "Overall visual type preference",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extracted feature values of one profile, one slot per `Feature`.
///
/// Missing fields hold `UNKNOWN_FEATURE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureValues<'a> {
    values: [&'a str; 7],
}

impl<'a> FeatureValues<'a> {
    pub(crate) fn new(values: [&'a str; 7]) -> Self {
        Self { values }
    }

    /// Value for a feature (may be the unknown sentinel)
    pub fn get(&self, feature: Feature) -> &'a str {
        self.values[feature.index()]
    }

    /// Value for a feature, `None` for the unknown sentinel
    pub fn known(&self, feature: Feature) -> Option<&'a str> {
        let value = self.get(feature);
        (value != UNKNOWN_FEATURE).then_some(value)
    }

    /// All seven pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Feature, &'a str)> + '_ {
        Feature::ALL.iter().map(move |&f| (f, self.values[f.index()]))
    }

    /// Only the pairs with a known value
    pub fn iter_known(&self) -> impl Iterator<Item = (Feature, &'a str)> + '_ {
        self.iter().filter(|(_, v)| *v != UNKNOWN_FEATURE)
    }

    /// True when no feature is known
    pub fn is_blank(&self) -> bool {
        self.iter_known().next().is_none()
    }
}
