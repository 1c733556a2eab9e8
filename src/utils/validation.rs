use crate::error::ValidationError;
use crate::models::{PriceRange, PurchaseRecord};

pub fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if user_id.trim().is_empty() {
        return Err(ValidationError::EmptyUserId);
    }
    Ok(())
}

/// Converts a caller-supplied count into a usable truncation length.
pub fn validate_top_n(top_n: i64) -> Result<usize, ValidationError> {
    usize::try_from(top_n).map_err(|_| ValidationError::NegativeTopN(top_n))
}

pub fn validate_price_range(bounds: Option<&[f64]>) -> Result<Option<PriceRange>, ValidationError> {
    match bounds {
        None => Ok(None),
        Some(&[min, max]) => PriceRange::new(min, max).map(Some),
        Some(other) => Err(ValidationError::PriceRangeArity(other.len())),
    }
}

pub fn validate_purchase_record(record: &PurchaseRecord) -> Result<(), ValidationError> {
    if !record.price.is_finite() || record.price < 0.0 {
        return Err(ValidationError::InvalidPurchasePrice {
            item_id: record.item_id.clone(),
            price: record.price,
        });
    }
    Ok(())
}
