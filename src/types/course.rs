use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{wire, CatalogError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownDifficulty(s.to_string()))
    }
}

/// A course or elective as listed in the catalog, with its aggregated rating.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(deserialize_with = "wire::id")]
    pub course_id: String,
    pub title: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub provider: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "wire::tags")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub min_cgpa: f64,
    pub difficulty: Difficulty,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub duration_weeks: u32,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub url: String,
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub rating_count: u32,
}

impl Course {
    pub fn parse_tags(csv: &str) -> Vec<String> {
        wire::split_tags(csv)
    }

    pub fn is_eligible(&self, cgpa: f64) -> bool {
        self.min_cgpa <= cgpa
    }
}

/// Backend course ids are integers; clients may send them as strings.
pub fn parse_course_id(raw: &str) -> Result<i64, CatalogError> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::InvalidCourseId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!(
            "advanced".parse::<Difficulty>().unwrap(),
            Difficulty::Advanced
        );
        assert_eq!(
            " Beginner ".parse::<Difficulty>().unwrap(),
            Difficulty::Beginner
        );
        assert!(matches!(
            "expert".parse::<Difficulty>(),
            Err(CatalogError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn course_deserializes_backend_row_shape() {
        let course: Course = serde_json::from_str(
            r#"{
                "course_id": 3,
                "title": "College Elective: Data Mining",
                "provider": "CSE Dept",
                "description": null,
                "tags": "data mining,ml,elective",
                "min_cgpa": 7.0,
                "difficulty": "Advanced",
                "duration_weeks": 12
            }"#,
        )
        .unwrap();
        assert_eq!(course.course_id, "3");
        assert_eq!(course.tags, vec!["data mining", "ml", "elective"]);
        assert_eq!(course.description, "");
        assert_eq!(course.avg_rating, 0.0);
        assert_eq!(course.rating_count, 0);
        assert!(course.is_eligible(7.0));
        assert!(!course.is_eligible(6.9));
    }

    #[test]
    fn course_id_accepts_numeric_text_only() {
        assert_eq!(parse_course_id("4").unwrap(), 4);
        assert_eq!(parse_course_id(" 12 ").unwrap(), 12);
        assert!(matches!(
            parse_course_id("abc"),
            Err(CatalogError::InvalidCourseId(id)) if id == "abc"
        ));
    }
}
