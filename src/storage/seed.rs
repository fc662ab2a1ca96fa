use anyhow::{Context, Result};
use chrono::Utc;

use super::traits::{NewCourse, Storage, StorageTx, StorageWrite};
use crate::types::Difficulty;

pub struct SeedCourse {
    pub title: &'static str,
    pub provider: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub min_cgpa: f64,
    pub difficulty: Difficulty,
    pub duration_weeks: u32,
    pub source: &'static str,
    pub is_elective: bool,
}

pub const SEED_COURSES: &[SeedCourse] = &[
    SeedCourse {
        title: "Machine Learning Basics",
        provider: "Coursera",
        description: "Introductory ML course covering regression, classification and clustering.",
        tags: &["ml", "ai", "python"],
        min_cgpa: 6.0,
        difficulty: Difficulty::Intermediate,
        duration_weeks: 8,
        source: "seed",
        is_elective: false,
    },
    SeedCourse {
        title: "Web Development with React",
        provider: "Udemy",
        description: "Front-end development using React and modern JS.",
        tags: &["web", "frontend", "react"],
        min_cgpa: 0.0,
        difficulty: Difficulty::Beginner,
        duration_weeks: 6,
        source: "seed",
        is_elective: false,
    },
    SeedCourse {
        title: "College Elective: Data Mining",
        provider: "CSE Dept",
        description: "Department elective on data mining techniques and applications.",
        tags: &["data mining", "ml", "elective"],
        min_cgpa: 7.0,
        difficulty: Difficulty::Advanced,
        duration_weeks: 12,
        source: "college",
        is_elective: true,
    },
    SeedCourse {
        title: "College Elective: Cloud Computing",
        provider: "CSE Dept",
        description: "Elective covering AWS, Azure basics and cloud architectures.",
        tags: &["cloud", "elective", "systems"],
        min_cgpa: 6.5,
        difficulty: Difficulty::Intermediate,
        duration_weeks: 12,
        source: "college",
        is_elective: true,
    },
];

impl From<&SeedCourse> for NewCourse {
    fn from(seed: &SeedCourse) -> Self {
        NewCourse {
            title: seed.title.to_string(),
            provider: seed.provider.to_string(),
            description: seed.description.to_string(),
            tags: seed.tags.iter().map(|t| t.to_string()).collect(),
            min_cgpa: seed.min_cgpa,
            difficulty: seed.difficulty,
            duration_weeks: seed.duration_weeks,
            url: String::new(),
            source: seed.source.to_string(),
        }
    }
}

/// Wipes every table and loads the sample catalog. Returns the number of
/// courses inserted.
pub fn seed<S: Storage>(storage: &S) -> Result<usize> {
    let tx = storage.begin_tx().context("opening seed transaction")?;
    tx.clear_all().context("clearing tables")?;

    let now = Utc::now();
    for course in SEED_COURSES {
        let id = tx
            .insert_course(&NewCourse::from(course), now)
            .with_context(|| format!("inserting course {}", course.title))?;
        if course.is_elective {
            tx.mark_elective(id)?;
        }
    }

    tx.commit().context("committing seed")?;
    log::info!("🌱 Seeded {} courses", SEED_COURSES.len());
    Ok(SEED_COURSES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{SqliteStorage, StorageRead};
    use tempfile::TempDir;

    #[test]
    fn seed_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let repo = SqliteStorage::new(dir.path().join("seed.sqlite"));
        repo.init().unwrap();

        assert_eq!(seed(&repo).unwrap(), 4);
        assert_eq!(seed(&repo).unwrap(), 4);

        let courses = repo.list_courses().unwrap();
        assert_eq!(courses.len(), 4);
        // same timestamp, so the highest id comes first
        assert_eq!(courses[0].title, "College Elective: Cloud Computing");
        assert!(courses.iter().all(|c| c.rating_count == 0));
    }
}
