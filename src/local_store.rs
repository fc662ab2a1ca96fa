//! File-backed key-value store holding what a student keeps on their own
//! device: the profile, a cached course list, submitted reviews and
//! interactions. Every write rewrites the whole file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::{Course, Interaction, Review, User};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(default)]
    reviews: Vec<Review>,
    #[serde(default)]
    interactions: Vec<Interaction>,
}

#[derive(Clone, Debug)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreData> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(StoreData::default()),
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("parsing local store {}", self.path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(StoreData::default()),
            Err(e) => Err(e).with_context(|| format!("reading local store {}", self.path.display())),
        }
    }

    fn save(&self, data: &StoreData) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let raw = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing local store {}", self.path.display()))
    }

    fn update<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut StoreData) -> T,
    {
        let mut data = self.load()?;
        let out = f(&mut data);
        self.save(&data)?;
        Ok(out)
    }

    pub fn set_user(&self, user: &User) -> Result<()> {
        self.update(|data| data.user = Some(user.clone()))
    }

    pub fn get_user(&self) -> Result<Option<User>> {
        Ok(self.load()?.user)
    }

    pub fn set_courses(&self, courses: &[Course]) -> Result<()> {
        self.update(|data| data.courses = courses.to_vec())
    }

    pub fn get_courses(&self) -> Result<Vec<Course>> {
        Ok(self.load()?.courses)
    }

    pub fn add_review(&self, review: &Review) -> Result<()> {
        self.update(|data| data.reviews.push(review.clone()))
    }

    pub fn get_reviews(&self) -> Result<Vec<Review>> {
        Ok(self.load()?.reviews)
    }

    pub fn get_reviews_by_course(&self, course_id: &str) -> Result<Vec<Review>> {
        Ok(self
            .get_reviews()?
            .into_iter()
            .filter(|r| r.course_id == course_id)
            .collect())
    }

    /// Replaces the stored review with the same id. Returns whether one was found.
    pub fn update_review(&self, review: &Review) -> Result<bool> {
        self.update(|data| {
            match data
                .reviews
                .iter_mut()
                .find(|r| r.review_id == review.review_id)
            {
                Some(slot) => {
                    *slot = review.clone();
                    true
                }
                None => false,
            }
        })
    }

    /// Returns whether a review was removed.
    pub fn delete_review(&self, review_id: &str) -> Result<bool> {
        self.update(|data| {
            let before = data.reviews.len();
            data.reviews.retain(|r| r.review_id != review_id);
            data.reviews.len() != before
        })
    }

    pub fn add_interaction(&self, interaction: &Interaction) -> Result<()> {
        self.update(|data| data.interactions.push(interaction.clone()))
    }

    pub fn get_interactions(&self) -> Result<Vec<Interaction>> {
        Ok(self.load()?.interactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventType;
    use chrono::Utc;
    use tempfile::TempDir;

    fn review(id: &str, course_id: &str, rating: u8) -> Review {
        Review {
            review_id: id.to_string(),
            course_id: course_id.to_string(),
            reviewer_name: "Ravi".to_string(),
            rating,
            pros: String::new(),
            cons: String::new(),
            comment: String::new(),
            is_senior: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path().join("nested/store.json"));
        assert!(store.get_user().unwrap().is_none());
        assert!(store.get_courses().unwrap().is_empty());
        assert!(store.get_reviews().unwrap().is_empty());
        assert!(store.get_interactions().unwrap().is_empty());
    }

    #[test]
    fn user_is_persisted() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path().join("nested/store.json"));
        let user = User {
            user_id: "u1".to_string(),
            name: "Ravi".to_string(),
            email: "ravi@example.edu".to_string(),
            cgpa: 7.4,
            interests: vec!["ml".to_string()],
        };
        store.set_user(&user).unwrap();

        let reopened = LocalStore::new(store.path());
        assert_eq!(reopened.get_user().unwrap(), Some(user));
    }

    #[test]
    fn reviews_can_be_filtered_edited_and_deleted() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path().join("store.json"));
        store.add_review(&review("1", "C1", 4)).unwrap();
        store.add_review(&review("2", "C2", 2)).unwrap();

        let c1 = store.get_reviews_by_course("C1").unwrap();
        assert_eq!(c1.len(), 1);
        assert_eq!(c1[0].review_id, "1");

        let mut edited = review("2", "C2", 5);
        edited.comment = "grew on me".to_string();
        assert!(store.update_review(&edited).unwrap());
        assert!(!store.update_review(&review("9", "C9", 1)).unwrap());
        assert_eq!(store.get_reviews_by_course("C2").unwrap()[0].rating, 5);

        assert!(store.delete_review("1").unwrap());
        assert!(!store.delete_review("1").unwrap());
        assert_eq!(store.get_reviews().unwrap().len(), 1);
    }

    #[test]
    fn interactions_append() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path().join("store.json"));
        store
            .add_interaction(&Interaction::new("u1", "C1", EventType::CourseCompleted, "Completed ML"))
            .unwrap();
        store
            .add_interaction(&Interaction::new("u1", "C2", EventType::PaymentCompleted, "paid"))
            .unwrap();
        let events = store.get_interactions().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].event_type, EventType::PaymentCompleted);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = LocalStore::new(&path);
        assert!(store.get_user().is_err());
    }
}
