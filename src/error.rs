use thiserror::Error;

/// Reasons a recommendation input is rejected before any ranking happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("User ID cannot be empty")]
    EmptyUserId,

    #[error("topN must be zero or greater, got {0}")]
    NegativeTopN(i64),

    #[error("priceRange must have exactly two bounds, got {0}")]
    PriceRangeArity(usize),

    #[error("priceRange bounds must be finite and non-negative, got [{min}, {max}]")]
    PriceRangeBounds { min: f64, max: f64 },

    #[error("priceRange minimum {min} exceeds maximum {max}")]
    PriceRangeInverted { min: f64, max: f64 },

    #[error("purchase of item {item_id} has invalid price {price}")]
    InvalidPurchasePrice { item_id: String, price: f64 },
}

/// Failures of a catalog provider.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode catalog payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors surfaced by the recommendation facade.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(#[from] CatalogError),
}

pub type RecommendResult<T> = Result<T, RecommendError>;
