use super::ScoringAlgorithm;
use crate::models::{CandidateItem, ScoreBreakdown, UserPreferences, UserProfile};

pub const CATEGORY_MATCH_WEIGHT: f64 = 3.0;
pub const TAG_MATCH_WEIGHT: f64 = 2.0;
pub const RATING_WEIGHT: f64 = 0.5;
pub const PRICE_FIT_WEIGHT: f64 = 1.0;

/// Additive rule-based scorer over stated preferences.
///
/// Purchase and view history on the profile are deliberately not read.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedScorer;

impl RuleBasedScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn breakdown_for(&self, preferences: &UserPreferences, item: &CandidateItem) -> ScoreBreakdown {
        let category = if preferences.categories().contains(&item.category) {
            CATEGORY_MATCH_WEIGHT
        } else {
            0.0
        };

        let matching_tags = preferences.tags().intersection(&item.tags).count();
        let tags = matching_tags as f64 * TAG_MATCH_WEIGHT;

        let rating = item.rating * RATING_WEIGHT;

        let price = match preferences.price_range() {
            Some(range) if range.contains(item.price) => PRICE_FIT_WEIGHT,
            _ => 0.0,
        };

        ScoreBreakdown {
            category,
            tags,
            rating,
            price,
        }
    }
}

impl ScoringAlgorithm for RuleBasedScorer {
    fn breakdown(&self, profile: &UserProfile, item: &CandidateItem) -> ScoreBreakdown {
        self.breakdown_for(&profile.preferences, item)
    }

    fn name(&self) -> &'static str {
        "rule_based"
    }
}
