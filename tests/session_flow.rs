//! Integration tests for a hosted swipe session
//!
//! catalog → swipe → save → reload → predict / rank / insights

use pretty_assertions::assert_eq;
use sparq::core::{
    build_insights, determine_visual_type, predict, record_swipe_with_outcome, top_categories,
    GenderFilter, JsonFileRepository, PreferenceRepository, ProfileCatalog, ProfileFilter,
};
use sparq::types::{Category, ReasonCode};

#[test]
fn test_model_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = ProfileCatalog::builtin();

    {
        let repo = JsonFileRepository::new(dir.path());
        let mut model = repo.load("carol").unwrap();
        for profile in catalog.by_visual_type(Category::Casual) {
            let (next, _) = record_swipe_with_outcome(model, profile, true).unwrap();
            model = next;
            repo.save(&model).unwrap();
        }
    }

    let repo = JsonFileRepository::new(dir.path());
    let model = repo.load("carol").unwrap();
    assert_eq!(model.total_swipes(), 4);
    assert_eq!(model.confidence(), 20);
    assert_eq!(top_categories(&model, 1), vec![Category::Casual]);

    let other = repo.load("dave").unwrap();
    assert_eq!(other.total_swipes(), 0);
}

#[test]
fn test_recommendations_follow_learned_taste() {
    let catalog = ProfileCatalog::builtin();
    let mut model = sparq::core::initialize_model("erin");

    for profile in catalog.by_gender(GenderFilter::Female) {
        let liked = profile.visual_type == Some(Category::Professional);
        let (next, outcome) = record_swipe_with_outcome(model, profile, liked).unwrap();
        assert!(!outcome.has_reason(ReasonCode::R102_REPEAT_SWIPE));
        model = next;
    }

    assert_eq!(top_categories(&model, 1), vec![Category::Professional]);

    let ranked = catalog.rank_candidates(
        &model,
        &ProfileFilter {
            visual_type: Some(Category::Professional),
            ..Default::default()
        },
    );
    assert_eq!(ranked.len(), 2);
    assert!(ranked.iter().all(|r| r.score > 0.5));

    let athletic_man = catalog.get("m1").unwrap();
    let professional_man = catalog.get("m5").unwrap();
    assert!(predict(&model, professional_man) > predict(&model, athletic_man));

    let insights = build_insights(&model);
    assert_eq!(insights.total_swipes, 8);
    assert_eq!(insights.categories[0].category, Category::Professional);
    assert_eq!(insights.categories[7].score, -1.0);
}

#[test]
fn test_classifier_agrees_with_tagged_athletes() {
    let catalog = ProfileCatalog::builtin();
    for profile in catalog.by_visual_type(Category::Athletic) {
        assert_eq!(determine_visual_type(profile), Category::Athletic, "profile {}", profile.id);
    }
}
