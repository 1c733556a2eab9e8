use crate::error::ValidationError;
use crate::utils::validation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Preferences exactly as they arrive on the wire, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPayload {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub price_range: Option<Vec<f64>>,
}

/// Inclusive acceptable price interval. Both bounds are finite, non-negative and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Result<Self, ValidationError> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max < 0.0 {
            return Err(ValidationError::PriceRangeBounds { min, max });
        }
        if min > max {
            return Err(ValidationError::PriceRangeInverted { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// A user's declared interests, normalised into sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPreferences {
    categories: BTreeSet<String>,
    tags: BTreeSet<String>,
    price_range: Option<PriceRange>,
}

impl UserPreferences {
    pub fn new<C, T>(categories: C, tags: T) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            tags: tags.into_iter().map(Into::into).collect(),
            price_range: None,
        }
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn price_range(&self) -> Option<PriceRange> {
        self.price_range
    }
}

impl TryFrom<&PreferencesPayload> for UserPreferences {
    type Error = ValidationError;

    fn try_from(payload: &PreferencesPayload) -> Result<Self, Self::Error> {
        let price_range = validation::validate_price_range(payload.price_range.as_deref())?;
        let mut preferences = Self::new(payload.categories.iter().cloned(), payload.tags.iter().cloned());
        preferences.price_range = price_range;
        Ok(preferences)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub item_id: String,
    pub item_name: String,
    pub category: String,
    pub price: f64,
    pub purchase_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRecord {
    pub item_id: String,
    pub view_date: DateTime<Utc>,
    /// Seconds spent on the item page.
    pub duration: u64,
}

/// Raw user fields shared by recommendation and import requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub user_id: String,
    #[serde(default)]
    pub preferences: PreferencesPayload,
    #[serde(default)]
    pub purchase_history: Vec<PurchaseRecord>,
    #[serde(default)]
    pub view_history: Vec<ViewRecord>,
}

/// Request-scoped view of a user. Purchase and view history are carried but
/// do not contribute to scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user_id: String,
    pub preferences: UserPreferences,
    pub purchase_history: Vec<PurchaseRecord>,
    pub view_history: Vec<ViewRecord>,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>, preferences: UserPreferences) -> Self {
        Self {
            user_id: user_id.into(),
            preferences,
            purchase_history: Vec::new(),
            view_history: Vec::new(),
        }
    }

    pub fn with_purchase_history(mut self, history: Vec<PurchaseRecord>) -> Self {
        self.purchase_history = history;
        self
    }

    pub fn with_view_history(mut self, history: Vec<ViewRecord>) -> Self {
        self.view_history = history;
        self
    }
}

impl TryFrom<UserData> for UserProfile {
    type Error = ValidationError;

    fn try_from(data: UserData) -> Result<Self, Self::Error> {
        validation::validate_user_id(&data.user_id)?;
        let preferences = UserPreferences::try_from(&data.preferences)?;
        for record in &data.purchase_history {
            validation::validate_purchase_record(record)?;
        }

        Ok(Self::new(data.user_id, preferences)
            .with_purchase_history(data.purchase_history)
            .with_view_history(data.view_history))
    }
}

/// A catalog entry eligible for recommendation.
///
/// Attributes the ranker does not read are kept in `attributes` and written
/// back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub category: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub rating: f64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

impl CandidateItem {
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            category: category.into(),
            tags: BTreeSet::new(),
            price: 0.0,
            rating: 0.0,
            attributes: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }
}

/// Per-signal contributions to an item's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub category: f64,
    pub tags: f64,
    pub rating: f64,
    pub price: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.category + self.tags + self.rating + self.price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem {
    pub item: CandidateItem,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(flatten)]
    pub user: UserData,
    #[serde(default)]
    pub top_n: Option<i64>,
}

impl RecommendationRequest {
    pub fn new(user: UserData) -> Self {
        Self { user, top_n: None }
    }

    pub fn with_top_n(mut self, top_n: i64) -> Self {
        self.top_n = Some(top_n);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub user_id: String,
    pub recommendations: Vec<CandidateItem>,
    pub timestamp: DateTime<Utc>,
}

/// Reply of the training and import collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Acknowledgement {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
