use crate::algorithms::{Ranker, RuleBasedScorer};
use crate::config::RecommendationConfig;
use crate::error::RecommendResult;
use crate::models::*;
use crate::services::catalog::CatalogProvider;
use crate::utils::validation;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Single entry point for producing recommendations.
///
/// Every call validates the request, fetches a fresh candidate set from the
/// injected catalog, and ranks it with a newly built [`Ranker`]. Nothing is
/// cached between calls.
pub struct RecommendationService {
    catalog: Arc<dyn CatalogProvider>,
    config: RecommendationConfig,
}

impl RecommendationService {
    pub fn new(catalog: Arc<dyn CatalogProvider>, config: RecommendationConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog_name(&self) -> &'static str {
        self.catalog.name()
    }

    /// Runs the full pipeline and keeps each result's score and breakdown.
    ///
    /// Returns the validated user id alongside the ranked items.
    #[instrument(skip(self, request), fields(user_id = %request.user.user_id))]
    pub async fn rank_scored(&self, request: RecommendationRequest) -> RecommendResult<(String, Vec<ScoredItem>)> {
        let top_n = match request.top_n {
            Some(requested) => validation::validate_top_n(requested)?,
            None => self.config.default_top_n,
        };
        let profile = UserProfile::try_from(request.user)?;

        let candidates = self.catalog.fetch_candidates().await?;

        let ranker = Ranker::new(RuleBasedScorer).with_parallel_threshold(self.config.parallel_scoring_threshold);
        let ranked = ranker.rank(&profile, &candidates, top_n);

        debug!(
            catalog = self.catalog.name(),
            candidate_count = candidates.len(),
            returned = ranked.len(),
            top_score = ranked.first().map(|s| s.score),
            "Ranked candidates"
        );

        info!(
            top_n,
            returned = ranked.len(),
            "Generated recommendations"
        );

        Ok((profile.user_id, ranked))
    }

    pub async fn recommend(&self, request: RecommendationRequest) -> RecommendResult<RecommendationResponse> {
        let (user_id, ranked) = self.rank_scored(request).await?;

        Ok(RecommendationResponse {
            user_id,
            recommendations: ranked.into_iter().map(|scored| scored.item).collect(),
            timestamp: Utc::now(),
        })
    }
}
