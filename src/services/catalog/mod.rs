//! Candidate catalog sources.
//!
//! The recommendation facade never knows where candidates come from; it is
//! handed an `Arc<dyn CatalogProvider>` at construction time.
use crate::config::{CatalogConfig, CatalogSource};
use crate::error::CatalogError;
use crate::models::CandidateItem;
use reqwest::Client as HttpClient;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Supplies the already-filtered candidate set for one recommendation call.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_candidates(&self) -> Result<Vec<CandidateItem>, CatalogError>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// Fixed in-memory candidate list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<CandidateItem>,
}

impl StaticCatalog {
    pub fn new(items: Vec<CandidateItem>) -> Self {
        Self { items }
    }

    /// Loads a JSON array of catalog items.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let items: Vec<CandidateItem> = serde_json::from_str(&raw)?;

        info!(path = %path.display(), item_count = items.len(), "Loaded static catalog");
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait::async_trait]
impl CatalogProvider for StaticCatalog {
    async fn fetch_candidates(&self) -> Result<Vec<CandidateItem>, CatalogError> {
        Ok(self.items.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Catalog service reached over HTTP. `GET <url>` must return a JSON array of items.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http_client: HttpClient,
    url: String,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl CatalogProvider for HttpCatalog {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_candidates(&self) -> Result<Vec<CandidateItem>, CatalogError> {
        let response = self.http_client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Catalog request failed");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let items: Vec<CandidateItem> = serde_json::from_slice(&bytes)?;

        debug!(item_count = items.len(), "Fetched candidates from catalog service");
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Builds the provider described by configuration.
pub fn from_config(config: &CatalogConfig) -> Result<Arc<dyn CatalogProvider>, CatalogError> {
    let provider: Arc<dyn CatalogProvider> = match &config.source {
        CatalogSource::Static { path } => Arc::new(StaticCatalog::from_json_file(path)?),
        CatalogSource::Http { url, timeout_secs } => {
            info!(url = %url, timeout_secs, "Using HTTP catalog");
            Arc::new(HttpCatalog::new(url.clone(), Duration::from_secs(*timeout_secs))?)
        }
    };
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_catalog(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("rankwise-{}-{}.json", name, uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_static_catalog_returns_items_in_order() {
        let catalog = StaticCatalog::new(vec![
            CandidateItem::new("1", "food"),
            CandidateItem::new("2", "hotel"),
        ]);

        let items = tokio_test::block_on(catalog.fetch_candidates()).unwrap();
        assert_eq!(items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), vec!["1", "2"]);
        assert_eq!(catalog.name(), "static");
    }

    #[test]
    fn test_static_catalog_from_json_file() {
        let path = temp_catalog(
            "ok",
            r#"[
                {"_id": "a1", "name": "Old Town Walk", "category": "attraction", "tags": ["history"], "price": 0, "rating": 4.2},
                {"id": "f7", "category": "food", "price": 18.5}
            ]"#,
        );

        let catalog = StaticCatalog::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(catalog.len(), 2);
        let items = tokio_test::block_on(catalog.fetch_candidates()).unwrap();
        assert_eq!(items[0].id, "a1");
        assert_eq!(items[1].rating, 0.0);
    }

    #[test]
    fn test_static_catalog_missing_file_is_io_error() {
        let err = StaticCatalog::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_static_catalog_bad_json_is_decode_error() {
        let path = temp_catalog("bad", r#"{"not": "an array"}"#);
        let err = StaticCatalog::from_json_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[test]
    fn test_from_config_builds_http_catalog() {
        let config = CatalogConfig {
            source: CatalogSource::Http {
                url: "http://localhost:5000/api/items".to_string(),
                timeout_secs: 2,
            },
        };
        let provider = from_config(&config).unwrap();
        assert_eq!(provider.name(), "http");
    }

    #[tokio::test]
    async fn test_http_catalog_unreachable_is_error() {
        let catalog = HttpCatalog::new("http://127.0.0.1:9/items", Duration::from_millis(500)).unwrap();
        let err = catalog.fetch_candidates().await.unwrap_err();
        assert!(matches!(err, CatalogError::Http(_)));
    }

    async fn spawn_catalog_service() -> String {
        use axum::{http::StatusCode, routing::get, Json, Router};
        use serde_json::json;

        let router = Router::new()
            .route(
                "/items",
                get(|| async {
                    Json(json!([
                        {"_id": "att-9", "name": "West Lake", "category": "attraction", "tags": ["lake"], "price": 0, "rating": 4.8},
                        {"_id": "food-3", "category": "food", "price": null}
                    ]))
                }),
            )
            .route("/down", get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance window") }))
            .route("/garbage", get(|| async { Json(json!({"not": "array"})) }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_http_catalog_decodes_items() {
        let base = spawn_catalog_service().await;
        let catalog = HttpCatalog::new(format!("{}/items", base), Duration::from_secs(5)).unwrap();

        let items = catalog.fetch_candidates().await.unwrap();
        assert_eq!(items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), vec!["att-9", "food-3"]);
        assert_eq!(items[0].name.as_deref(), Some("West Lake"));
        assert_eq!(items[1].price, 0.0);
    }

    #[tokio::test]
    async fn test_http_catalog_error_status_keeps_body() {
        let base = spawn_catalog_service().await;
        let catalog = HttpCatalog::new(format!("{}/down", base), Duration::from_secs(5)).unwrap();

        let err = catalog.fetch_candidates().await.unwrap_err();
        match err {
            CatalogError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance window");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_catalog_non_array_body_is_decode_error() {
        let base = spawn_catalog_service().await;
        let catalog = HttpCatalog::new(format!("{}/garbage", base), Duration::from_secs(5)).unwrap();

        let err = catalog.fetch_candidates().await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }
}
