//! Profile catalog: the mock profiles swiped through by the demo, with the
//! gender / visual type / age filters the screens use

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

use crate::core::predictor::predict;
use crate::types::{Category, Gender, PreferenceModel, Profile, Result};

const BUILTIN_PROFILES_JSON: &str = include_str!("../../data/profiles.json");

lazy_static! {
    static ref BUILTIN_PROFILES: Vec<Profile> =
        serde_json::from_str(BUILTIN_PROFILES_JSON).expect("bundled profiles.json is valid");
}

/// Gender selector of the discover screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderFilter {
    Male,
    Female,
    All,
}

/// Criteria for `ProfileCatalog::filtered`; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileFilter {
    pub gender: Option<Gender>,
    pub visual_type: Option<Category>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
}

impl ProfileFilter {
    pub fn matches(&self, profile: &Profile) -> bool {
        if let Some(gender) = self.gender {
            if profile.gender != Some(gender) {
                return false;
            }
        }
        if let Some(category) = self.visual_type {
            if profile.visual_type != Some(category) {
                return false;
            }
        }
        if self.min_age.is_some_and(|min| profile.age < min) {
            return false;
        }
        if self.max_age.is_some_and(|max| profile.age > max) {
            return false;
        }
        true
    }
}

/// A candidate with its predicted preference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProfile {
    #[serde(flatten)]
    pub profile: Profile,
    pub score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileCatalog {
    profiles: Vec<Profile>,
}

impl ProfileCatalog {
    /// Catalog of the bundled demo profiles
    pub fn builtin() -> Self {
        Self::from_profiles(BUILTIN_PROFILES.clone())
    }

    pub fn from_profiles(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_profiles(serde_json::from_str(json)?))
    }

    /// Load a catalog from a JSON array on disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn by_gender(&self, gender: GenderFilter) -> Vec<&Profile> {
        let wanted = match gender {
            GenderFilter::Male => Some(Gender::Male),
            GenderFilter::Female => Some(Gender::Female),
            GenderFilter::All => None,
        };
        self.filtered(&ProfileFilter {
            gender: wanted,
            ..Default::default()
        })
    }

    pub fn by_visual_type(&self, category: Category) -> Vec<&Profile> {
        self.filtered(&ProfileFilter {
            visual_type: Some(category),
            ..Default::default()
        })
    }

    /// Profiles matching every set criterion, in catalog order
    pub fn filtered(&self, filter: &ProfileFilter) -> Vec<&Profile> {
        self.profiles.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Unswiped profiles matching `filter`, best predicted first.
    /// Equal scores keep catalog order.
    pub fn rank_candidates(&self, model: &PreferenceModel, filter: &ProfileFilter) -> Vec<RankedProfile> {
        let mut ranked: Vec<RankedProfile> = self
            .filtered(filter)
            .into_iter()
            .filter(|p| !model.has_swiped(&p.id))
            .map(|p| RankedProfile {
                profile: p.clone(),
                score: predict(model, p),
            })
            .collect();
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked
    }
}
