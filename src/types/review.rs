use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{wire, CatalogError};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Accepts star ratings in `1..=5`.
pub fn validate_rating(rating: i64) -> Result<u8, CatalogError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        u8::try_from(rating).map_err(|_| CatalogError::InvalidRating(rating))
    } else {
        Err(CatalogError::InvalidRating(rating))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(deserialize_with = "wire::id")]
    pub review_id: String,
    #[serde(deserialize_with = "wire::id")]
    pub course_id: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub reviewer_name: String,
    pub rating: u8,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub pros: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub cons: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub comment: String,
    #[serde(default, deserialize_with = "wire::flag")]
    pub is_senior: bool,
    pub created_at: DateTime<Utc>,
}

/// A review as submitted to the backend, before it has an id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewReview {
    pub course_id: i64,
    pub user_id: Option<String>,
    pub reviewer_name: Option<String>,
    pub rating: u8,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub comment: Option<String>,
    pub is_senior: bool,
}

/// A senior review shipped inside `electives.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BundledReview {
    pub user: String,
    pub rating: u8,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub pros: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub cons: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub comment: String,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub avg_rating: f64,
    pub rating_count: u32,
}
