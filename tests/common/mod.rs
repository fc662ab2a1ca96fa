#![allow(dead_code)]

use std::path::PathBuf;

/// Nothing listens on the discard port, so requests fail fast.
pub const OFFLINE_URL: &str = "http://127.0.0.1:9";

pub fn bundled_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn course_json(id: &str, title: &str, tags: &[&str], min_cgpa: f64, avg: f64) -> serde_json::Value {
    serde_json::json!({
        "course_id": id,
        "title": title,
        "provider": "Test Provider",
        "description": "",
        "tags": tags,
        "min_cgpa": min_cgpa,
        "difficulty": "Beginner",
        "duration_weeks": 4,
        "url": "",
        "avg_rating": avg,
        "rating_count": 1
    })
}
