//! Ranker: learned categories and feature values, best first

use std::cmp::Ordering;

use crate::types::{is_scorable_value, Category, Feature, PreferenceModel};

/// Top `n` categories by score, descending. Ties keep canonical order.
pub fn top_categories(model: &PreferenceModel, n: usize) -> Vec<Category> {
    ranked_categories(model)
        .into_iter()
        .take(n)
        .map(|(category, _)| category)
        .collect()
}

/// All eight categories with their scores, best first
pub fn ranked_categories(model: &PreferenceModel) -> Vec<(Category, f64)> {
    let mut ranked: Vec<(Category, f64)> = model.category_scores().iter().collect();
    // sort_by is stable, so equal scores stay in canonical order
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked
}

/// Top `n` observed values of one feature, descending; ties by value
pub fn top_feature_values(model: &PreferenceModel, feature: Feature, n: usize) -> Vec<(String, f64)> {
    // BTreeMap iteration is already sorted by value name
    let mut ranked: Vec<(String, f64)> = model
        .feature_scores()
        .get(feature)
        .iter()
        .filter(|(value, _)| is_scorable_value(value))
        .map(|(value, score)| (value.clone(), *score))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::updater::{initialize_model, record_swipe};
    use crate::types::Profile;
    use crate::DEFAULT_TOP_CATEGORIES;

    #[test]
    fn test_fresh_model_uses_canonical_order() {
        let model = initialize_model("u1");
        assert_eq!(
            top_categories(&model, DEFAULT_TOP_CATEGORIES),
            vec![Category::Athletic, Category::Artistic, Category::Professional]
        );
    }

    #[test]
    fn test_scores_drive_order() {
        let mut model = initialize_model("u1");
        model = record_swipe(model, &Profile::with_id("a").visual_type(Category::Outdoorsy), true);
        model = record_swipe(model, &Profile::with_id("b").visual_type(Category::Athletic), false);

        assert_eq!(
            top_categories(&model, 3),
            vec![Category::Outdoorsy, Category::Artistic, Category::Professional]
        );
        let ranked = ranked_categories(&model);
        assert_eq!(ranked.len(), 8);
        assert_eq!(ranked.last().unwrap(), &(Category::Athletic, -0.5));
    }

    #[test]
    fn test_n_larger_than_eight() {
        assert_eq!(top_categories(&initialize_model("u1"), 20).len(), 8);
        assert!(top_categories(&initialize_model("u1"), 0).is_empty());
    }

    #[test]
    fn test_top_feature_values() {
        let mut model = initialize_model("u1");
        model = record_swipe(model, &Profile::with_id("a").hair_color("red"), true);
        model = record_swipe(model, &Profile::with_id("b").hair_color("red"), true);
        model = record_swipe(model, &Profile::with_id("c").hair_color("black"), true);
        model = record_swipe(model, &Profile::with_id("d").hair_color("blonde"), true);
        model = record_swipe(model, &Profile::with_id("e").hair_color("brown"), false);

        let top = top_feature_values(&model, Feature::HairColor, 3);
        assert_eq!(
            top,
            vec![
                ("red".to_string(), 2.0),
                ("black".to_string(), 1.0),
                ("blonde".to_string(), 1.0),
            ]
        );
    }

    #[test]
    fn test_top_feature_values_skip_sentinel() {
        let mut model = record_swipe(initialize_model("u1"), &Profile::with_id("a").eye_color("blue"), true);
        model
            .feature_scores
            .eye_color
            .insert(crate::UNKNOWN_FEATURE.to_string(), 5.0);

        assert_eq!(
            top_feature_values(&model, Feature::EyeColor, 3),
            vec![("blue".to_string(), 1.0)]
        );
    }
}
