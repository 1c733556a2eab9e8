//! Thin HTTP surface over the recommendation facade.
use crate::error::RecommendError;
use crate::models::{Acknowledgement, RecommendationRequest, RecommendationResponse, UserData};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::HashMap;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

impl IntoResponse for RecommendError {
    fn into_response(self) -> Response {
        let status = match &self {
            RecommendError::Validation(_) => StatusCode::BAD_REQUEST,
            RecommendError::CatalogUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, RecommendError> {
    let response = state.serving_service.serve_recommendations(request).await?;
    Ok(Json(response))
}

async fn train(State(state): State<AppState>, Json(data): Json<Value>) -> Json<Acknowledgement> {
    Json(state.training_service.train(&data))
}

async fn import_user_data(
    State(state): State<AppState>,
    Json(data): Json<UserData>,
) -> Result<Json<Acknowledgement>, RecommendError> {
    let ack = state.training_service.import_user_data(data)?;
    Ok(Json(ack))
}

async fn serving_stats(State(state): State<AppState>) -> Json<HashMap<String, u64>> {
    Json(state.serving_service.stats())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/recommend", post(recommend))
        .route("/train", post(train))
        .route("/user-data/import", post(import_user_data))
        .route("/stats", get(serving_stats))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
