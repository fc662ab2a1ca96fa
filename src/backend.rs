//! Operations behind the REST endpoints, written against the storage traits.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::{
    recommend,
    storage::{Storage, StorageRead, StorageTx, StorageWrite},
    types::{Course, EventType, Interaction, NewReview, RatingSummary, Review},
};

pub const ANONYMOUS_USER: &str = "anon";

pub struct CourseDetail {
    pub course: Course,
    pub summary: RatingSummary,
    pub reviews: Vec<Review>,
}

pub fn course_detail<S: StorageRead>(storage: &S, course_id: i64) -> Result<Option<CourseDetail>> {
    let Some(course) = storage.load_course(course_id)? else {
        return Ok(None);
    };
    let summary = storage.rating_summary(course_id)?;
    let reviews = storage.list_reviews(course_id)?;
    Ok(Some(CourseDetail {
        course,
        summary,
        reviews,
    }))
}

/// Stores the review and the matching `rating` interaction atomically.
pub fn submit_review<S: Storage>(storage: &S, review: &NewReview) -> Result<i64> {
    let tx = storage.begin_tx()?;
    let review_id = tx
        .insert_review(review, Utc::now())
        .with_context(|| format!("inserting review for course {}", review.course_id))?;
    tx.record_interaction(&Interaction::new(
        review.user_id.as_deref().unwrap_or(ANONYMOUS_USER),
        review.course_id.to_string(),
        EventType::Rating,
        format!("rating={}", review.rating),
    ))?;
    tx.commit()?;
    Ok(review_id)
}

pub fn record_event<S: Storage>(storage: &S, interaction: &Interaction) -> Result<()> {
    let tx = storage.begin_tx()?;
    tx.record_interaction(interaction)?;
    tx.commit()
}

pub fn recommend<S: StorageRead>(
    storage: &S,
    cgpa: f64,
    interests: &[String],
    top_k: usize,
) -> Result<Vec<Course>> {
    let courses = storage.list_courses().context("loading courses")?;
    Ok(recommend::rank_courses(courses, cgpa, interests, top_k))
}
