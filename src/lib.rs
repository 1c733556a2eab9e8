pub mod algorithms;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{Config, ConfigOrigin};
pub use error::{CatalogError, RecommendError, RecommendResult, ValidationError};
pub use models::*;

use anyhow::Result;
use services::catalog::{self, CatalogProvider};
use services::recommendation::RecommendationService;
use services::serving::ServingService;
use services::training::TrainingService;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub serving_service: Arc<ServingService>,
    pub training_service: Arc<TrainingService>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let catalog = catalog::from_config(&config.catalog)?;
        Ok(Self::with_catalog(config, catalog))
    }

    pub fn with_catalog(config: Config, catalog: Arc<dyn CatalogProvider>) -> Self {
        let config = Arc::new(config);

        let recommendation_service = Arc::new(RecommendationService::new(
            catalog,
            config.recommendation.clone(),
        ));

        let serving_service = Arc::new(ServingService::new(recommendation_service));

        Self {
            config,
            serving_service,
            training_service: Arc::new(TrainingService::new()),
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
