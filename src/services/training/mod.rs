use crate::error::RecommendResult;
use crate::models::{Acknowledgement, UserData, UserProfile};
use tracing::{debug, info};

/// Placeholder for the model lifecycle.
///
/// Scoring is rule-based, so there is nothing to train and imported user data
/// is not stored. Both operations only acknowledge receipt; the recommendation
/// path never depends on them.
#[derive(Debug, Clone, Default)]
pub struct TrainingService;

impl TrainingService {
    pub fn new() -> Self {
        Self
    }

    pub fn train(&self, data: &serde_json::Value) -> Acknowledgement {
        let field_count = data.as_object().map_or(0, |fields| fields.len());
        info!(field_count, "Received training request");
        Acknowledgement::success("Model training completed")
    }

    /// Validates an export of user data destined for offline training.
    pub fn import_user_data(&self, data: UserData) -> RecommendResult<Acknowledgement> {
        let profile = UserProfile::try_from(data)?;

        debug!(
            user_id = %profile.user_id,
            purchases = profile.purchase_history.len(),
            views = profile.view_history.len(),
            "Accepted user data import"
        );

        Ok(Acknowledgement::success(format!(
            "User data imported for {}",
            profile.user_id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecommendError;
    use crate::models::PreferencesPayload;
    use serde_json::json;

    #[test]
    fn test_train_acknowledges() {
        let ack = TrainingService::new().train(&json!({ "epochs": 3 }));
        assert_eq!(ack.status, "success");
        assert_eq!(ack.message, "Model training completed");
    }

    #[test]
    fn test_import_acknowledges_valid_data() {
        let data = UserData {
            user_id: "u-11".to_string(),
            ..UserData::default()
        };
        let ack = TrainingService::new().import_user_data(data).unwrap();
        assert_eq!(ack.message, "User data imported for u-11");
    }

    #[test]
    fn test_import_rejects_bad_preferences() {
        let data = UserData {
            user_id: "u-11".to_string(),
            preferences: PreferencesPayload {
                price_range: Some(vec![10.0]),
                ..PreferencesPayload::default()
            },
            ..UserData::default()
        };
        let err = TrainingService::new().import_user_data(data).unwrap_err();
        assert!(matches!(err, RecommendError::Validation(_)));
    }
}
