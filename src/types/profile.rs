//! Profile records consumed by the engine

use serde::{Deserialize, Serialize};

use crate::types::Category;

/// Gender as tagged on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    Other,
}

/// What a profile is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookingFor {
    Casual,
    Serious,
    Friendship,
}

/// A dating profile. Read-only to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Option<Gender>,
    pub location: String,
    pub bio: String,
    pub interests: Vec<String>,
    pub image: String,

    // Visual features (pre-tagged metadata)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hair_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hair_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_shape: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_type: Option<Category>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    /// Height in cm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub looking_for: Vec<LookingFor>,
}

impl Profile {
    /// Bare profile with only an id, handy for tests and callers that
    /// tag features themselves
    pub fn with_id(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    pub fn visual_type(mut self, category: Category) -> Self {
        self.visual_type = Some(category);
        self
    }

    pub fn hair_color(mut self, value: &str) -> Self {
        self.hair_color = Some(value.to_string());
        self
    }

    pub fn hair_style(mut self, value: &str) -> Self {
        self.hair_style = Some(value.to_string());
        self
    }

    pub fn eye_color(mut self, value: &str) -> Self {
        self.eye_color = Some(value.to_string());
        self
    }

    pub fn body_type(mut self, value: &str) -> Self {
        self.body_type = Some(value.to_string());
        self
    }

    pub fn style(mut self, value: &str) -> Self {
        self.style = Some(value.to_string());
        self
    }
}
