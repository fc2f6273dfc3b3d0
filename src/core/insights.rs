//! Builds the insights view of a model

use crate::core::ranker::{ranked_categories, top_feature_values};
use crate::types::{
    score_percentage, CategoryInsight, Feature, FeatureInsight, PreferenceInsights, PreferenceModel,
    PreferenceStrength, ValueInsight,
};
use crate::INSIGHT_TOP_VALUES;

pub fn build_insights(model: &PreferenceModel) -> PreferenceInsights {
    let categories = ranked_categories(model)
        .into_iter()
        .map(|(category, score)| CategoryInsight {
            category,
            description: category.description().to_string(),
            score,
            percentage: score_percentage(score),
            strength: PreferenceStrength::from_score(score),
        })
        .collect();

    let features = Feature::ALL
        .iter()
        .map(|&feature| FeatureInsight {
            feature,
            description: feature.description().to_string(),
            top_values: top_feature_values(model, feature, INSIGHT_TOP_VALUES)
                .into_iter()
                .map(|(value, score)| ValueInsight {
                    value,
                    score,
                    percentage: score_percentage(score),
                })
                .collect(),
        })
        .collect();

    PreferenceInsights {
        user_id: model.user_id().to_string(),
        total_swipes: model.total_swipes(),
        confidence: model.confidence(),
        categories,
        features,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::updater::{initialize_model, record_swipe};
    use crate::types::{Category, Profile};

    #[test]
    fn test_insights_for_fresh_model() {
        let insights = build_insights(&initialize_model("u1"));

        assert_eq!(insights.total_swipes, 0);
        assert_eq!(insights.categories.len(), 8);
        assert!(insights.categories.iter().all(|c| c.percentage == 50.0));
        assert!(insights.categories.iter().all(|c| c.strength == PreferenceStrength::Neutral));
        assert_eq!(insights.features.len(), 7);
        assert!(insights.features.iter().all(|f| f.top_values.is_empty()));
    }

    #[test]
    fn test_insights_reflect_swipes() {
        let profile = Profile::with_id("w1")
            .style("sporty")
            .visual_type(Category::Athletic);
        let mut model = initialize_model("u1");
        for _ in 0..3 {
            model = record_swipe(model, &profile, true);
        }

        let insights = build_insights(&model);
        let first = &insights.categories[0];
        assert_eq!(first.category, Category::Athletic);
        assert_eq!(first.score, 3.0);
        assert_eq!(first.percentage, 80.0);
        assert_eq!(first.strength, PreferenceStrength::StrongPreference);

        let style = insights.features.iter().find(|f| f.feature == Feature::Style).unwrap();
        assert_eq!(style.top_values.len(), 1);
        assert_eq!(style.top_values[0].value, "sporty");
    }
}
