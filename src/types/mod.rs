//! Core types for Sparq

mod category;
mod error;
mod feature;
mod insight;
mod model;
mod output;
mod profile;
mod reason;

pub use category::Category;
pub use error::{PreferenceError, Result};
pub use feature::{Feature, FeatureValues};
pub use insight::{score_percentage, CategoryInsight, FeatureInsight, PreferenceInsights, PreferenceStrength, ValueInsight};
pub(crate) use model::is_scorable_value;
pub use model::{confidence_for, CategoryScores, FeatureScores, PreferenceModel, ValueScores};
pub use output::SwipeOutcome;
pub use profile::{Gender, LookingFor, Profile};
pub use reason::ReasonCode;
