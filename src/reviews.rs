//! Review aggregation: merge the senior reviews bundled with the catalog
//! with reviews students submitted locally and keep a running average.

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::{validate_rating, BundledReview, CatalogError, Review, User};

/// Parses the `date` field of a bundled review, which is either a plain
/// `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_review_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub fn from_bundled(target_id: &str, bundled: &[BundledReview], now: DateTime<Utc>) -> Vec<Review> {
    bundled
        .iter()
        .enumerate()
        .map(|(idx, r)| Review {
            review_id: format!("json_{target_id}_{idx}"),
            course_id: target_id.to_string(),
            reviewer_name: r.user.clone(),
            rating: r.rating,
            pros: r.pros.clone(),
            cons: r.cons.clone(),
            comment: r.comment.clone(),
            is_senior: true,
            created_at: r.date.as_deref().and_then(parse_review_date).unwrap_or(now),
        })
        .collect()
}

/// Mean rating, or `listed` when there is nothing to average.
pub fn average_rating(reviews: &[Review], listed: f64) -> f64 {
    if reviews.is_empty() {
        return listed;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    f64::from(sum) / reviews.len() as f64
}

pub fn reviews_by_author(reviews: &[Review], reviewer_name: &str) -> Vec<Review> {
    reviews
        .iter()
        .filter(|r| r.reviewer_name == reviewer_name)
        .cloned()
        .collect()
}

/// What a student fills in on a review form.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewDraft {
    pub rating: i64,
    pub pros: String,
    pub cons: String,
    pub comment: String,
    pub is_senior: bool,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            rating: 5,
            pros: String::new(),
            cons: String::new(),
            comment: String::new(),
            is_senior: false,
        }
    }
}

impl ReviewDraft {
    pub fn into_review(
        self,
        author: &User,
        target_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Review, CatalogError> {
        let rating = validate_rating(self.rating)?;
        Ok(Review {
            review_id: now.timestamp_millis().to_string(),
            course_id: target_id.to_string(),
            reviewer_name: author.name.clone(),
            rating,
            pros: self.pros,
            cons: self.cons,
            comment: self.comment,
            is_senior: self.is_senior,
            created_at: now,
        })
    }
}

/// All reviews shown for one course, elective, basket or subject.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewThread {
    pub target_id: String,
    pub reviews: Vec<Review>,
    listed_avg: f64,
}

impl ReviewThread {
    /// Bundled reviews come first, followed by the local ones for the same target.
    pub fn merged(
        target_id: &str,
        bundled: &[BundledReview],
        local: &[Review],
        listed_avg: f64,
        now: DateTime<Utc>,
    ) -> Self {
        let mut reviews = from_bundled(target_id, bundled, now);
        reviews.extend(local.iter().filter(|r| r.course_id == target_id).cloned());
        Self {
            target_id: target_id.to_string(),
            reviews,
            listed_avg,
        }
    }

    pub fn average(&self) -> f64 {
        average_rating(&self.reviews, self.listed_avg)
    }

    /// Appends the review and returns the new average.
    pub fn add(&mut self, review: Review) -> f64 {
        self.reviews.push(review);
        self.average()
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}
