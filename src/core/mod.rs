//! Core modules for Sparq

pub mod extractor;
pub mod updater;
pub mod predictor;
pub mod ranker;
pub mod insights;
pub mod catalog;
pub mod repository;
pub mod api;

pub use extractor::{extract_features, determine_visual_type, validate_profile};
pub use updater::{initialize_model, record_swipe, try_record_swipe, record_swipe_with_outcome};
pub use predictor::predict;
pub use ranker::{top_categories, ranked_categories, top_feature_values};
pub use insights::build_insights;
pub use catalog::{ProfileCatalog, ProfileFilter, GenderFilter, RankedProfile};
pub use repository::{PreferenceRepository, InMemoryRepository, JsonFileRepository, user_key};
pub use api::{create_router, create_router_with, run_server};
