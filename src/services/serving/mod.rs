use crate::error::RecommendResult;
use crate::models::*;
use crate::services::recommendation::RecommendationService;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

/// Request accounting around the recommendation facade.
pub struct ServingService {
    recommendation_service: Arc<RecommendationService>,
    serving_stats: Arc<DashMap<String, u64>>,
}

impl ServingService {
    pub fn new(recommendation_service: Arc<RecommendationService>) -> Self {
        Self {
            recommendation_service,
            serving_stats: Arc::new(DashMap::new()),
        }
    }

    pub async fn serve_recommendations(&self, request: RecommendationRequest) -> RecommendResult<RecommendationResponse> {
        self.increment_stat("total_requests");

        let start_time = Instant::now();
        let user_id = request.user.user_id.clone();

        let result = self.recommendation_service.recommend(request).await;

        let latency = elapsed_ms(start_time);
        self.add_to_stat("total_latency_ms", latency);

        match &result {
            Ok(response) => {
                self.increment_stat("successful_requests");
                info!(
                    user_id = %user_id,
                    count = response.recommendations.len(),
                    latency_ms = latency,
                    "Served recommendations"
                );
            }
            Err(e) => {
                self.increment_stat("failed_requests");
                error!(user_id = %user_id, error = %e, "Failed to serve recommendations");
            }
        }

        result
    }

    /// Serves each request independently; one failure does not affect the others.
    pub async fn batch_serve(
        &self,
        requests: Vec<RecommendationRequest>,
    ) -> Vec<RecommendResult<RecommendationResponse>> {
        self.increment_stat("batch_requests");

        let batch_id = Uuid::new_v4();
        let start_time = Instant::now();
        let request_count = requests.len();

        let mut results = Vec::with_capacity(request_count);
        for request in requests {
            results.push(self.serve_recommendations(request).await);
        }

        info!(
            batch_id = %batch_id,
            request_count,
            latency_ms = elapsed_ms(start_time),
            "Batch served recommendations"
        );
        results
    }

    pub fn stats(&self) -> HashMap<String, u64> {
        self.serving_stats
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    pub fn average_latency_ms(&self) -> f64 {
        let total = self.stat("total_latency_ms");
        let requests = self.stat("total_requests");
        if requests == 0 {
            0.0
        } else {
            total as f64 / requests as f64
        }
    }

    fn stat(&self, key: &str) -> u64 {
        self.serving_stats.get(key).map_or(0, |value| *value)
    }

    fn increment_stat(&self, key: &str) {
        self.add_to_stat(key, 1);
    }

    fn add_to_stat(&self, key: &str, amount: u64) {
        *self.serving_stats.entry(key.to_string()).or_insert(0) += amount;
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
