use super::{RuleBasedScorer, ScoringAlgorithm};
use crate::models::{CandidateItem, ScoredItem, UserProfile};
use rayon::prelude::*;
use std::cmp::Ordering;

pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2048;

/// Scores a candidate slice and keeps the best `top_n`, highest first.
///
/// Sorting is stable: equal scores keep their input order. A NaN score (only
/// reachable through hand-built items with NaN ratings or prices) ranks below
/// every finite score. Candidate sets at or above `parallel_threshold` are
/// scored on the rayon pool; the indexed collect keeps the same order as the
/// sequential path.
#[derive(Debug, Clone)]
pub struct Ranker<S = RuleBasedScorer> {
    scorer: S,
    parallel_threshold: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(RuleBasedScorer::new())
    }
}

impl<S: ScoringAlgorithm> Ranker<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn rank(&self, profile: &UserProfile, candidates: &[CandidateItem], top_n: usize) -> Vec<ScoredItem> {
        if top_n == 0 || candidates.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f64)> = if candidates.len() >= self.parallel_threshold {
            candidates
                .par_iter()
                .enumerate()
                .map(|(index, item)| (index, self.scorer.score(profile, item)))
                .collect()
        } else {
            candidates
                .iter()
                .enumerate()
                .map(|(index, item)| (index, self.scorer.score(profile, item)))
                .collect()
        };

        scored.sort_by(|a, b| descending(a.1, b.1));
        scored.truncate(top_n);

        scored
            .into_iter()
            .map(|(index, score)| {
                let item = &candidates[index];
                ScoredItem {
                    item: item.clone(),
                    score,
                    breakdown: self.scorer.breakdown(profile, item),
                }
            })
            .collect()
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    sort_key(b).total_cmp(&sort_key(a))
}

// NaN sinks to the bottom; `+ 0.0` folds -0.0 into 0.0 so they tie.
fn sort_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score + 0.0
    }
}
