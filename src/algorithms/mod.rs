pub mod ranker;
pub mod scorer;

pub use ranker::Ranker;
pub use scorer::RuleBasedScorer;

use crate::models::{CandidateItem, ScoreBreakdown, UserProfile};

/// A scoring function over one (profile, item) pair.
///
/// Implementations must be pure: the same inputs always give the same score,
/// and nothing outside the arguments is read or written. The ranker relies on
/// this to score candidates in parallel.
pub trait ScoringAlgorithm: Send + Sync {
    fn breakdown(&self, profile: &UserProfile, item: &CandidateItem) -> ScoreBreakdown;

    fn score(&self, profile: &UserProfile, item: &CandidateItem) -> f64 {
        self.breakdown(profile, item).total()
    }

    fn name(&self) -> &'static str;
}
