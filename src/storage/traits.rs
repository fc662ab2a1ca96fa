use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::types::{Course, Difficulty, Interaction, NewReview, RatingSummary, Review};

/// A catalog entry before it has been assigned an id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCourse {
    pub title: String,
    pub provider: String,
    pub description: String,
    pub tags: Vec<String>,
    pub min_cgpa: f64,
    pub difficulty: Difficulty,
    pub duration_weeks: u32,
    pub url: String,
    pub source: String,
}

pub trait StorageRead {
    /// All courses, newest first, with their rating aggregates filled in.
    fn list_courses(&self) -> Result<Vec<Course>>;
    fn load_course(&self, course_id: i64) -> Result<Option<Course>>;
    /// Reviews for one course, newest first.
    fn list_reviews(&self, course_id: i64) -> Result<Vec<Review>>;
    fn rating_summary(&self, course_id: i64) -> Result<RatingSummary>;
    fn list_interactions(&self, user_id: &str) -> Result<Vec<Interaction>>;
}

pub trait StorageWrite {
    fn insert_course(&self, course: &NewCourse, created_at: DateTime<Utc>) -> Result<i64>;
    fn mark_elective(&self, course_id: i64) -> Result<()>;
    fn insert_review(&self, review: &NewReview, created_at: DateTime<Utc>) -> Result<i64>;
    fn record_interaction(&self, interaction: &Interaction) -> Result<()>;
    fn clear_all(&self) -> Result<()>;
}

pub trait StorageTx: StorageRead + StorageWrite {
    fn commit(self) -> Result<()>;
}

pub trait Storage: StorageRead {
    type Tx: StorageTx;

    fn begin_tx(&self) -> Result<Self::Tx>;
}
