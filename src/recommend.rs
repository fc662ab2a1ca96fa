//! Course recommendation: the backend's rule-based scorer and the client's
//! fallback filter used when the backend cannot be reached.

use std::collections::BTreeSet;

use crate::types::Course;

pub const DEFAULT_TOP_K: usize = 10;

const NEUTRAL_RATING: f64 = 3.0;
const RATING_WEIGHT: f64 = 0.3;

/// Trimmed, lower-cased, de-duplicated interests with blanks removed.
pub fn normalize_interests(interests: &[String]) -> BTreeSet<String> {
    interests
        .iter()
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .collect()
}

/// Tag overlap with the interests plus a small nudge for well rated courses.
pub fn score_course(course: &Course, interests: &BTreeSet<String>) -> f64 {
    let tags: BTreeSet<String> = course
        .tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    let overlap = tags.intersection(interests).count();
    overlap as f64 + (course.avg_rating - NEUTRAL_RATING) * RATING_WEIGHT
}

/// Drops courses above the student's CGPA, scores the rest and keeps the
/// best `top_k`. Ties keep catalog order.
pub fn rank_courses(courses: Vec<Course>, cgpa: f64, interests: &[String], top_k: usize) -> Vec<Course> {
    let interests = normalize_interests(interests);

    let mut scored: Vec<(f64, Course)> = courses
        .into_iter()
        .filter(|c| c.is_eligible(cgpa))
        .map(|c| (score_course(&c, &interests), c))
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(top_k).map(|(_, c)| c).collect()
}

/// Eligible courses sharing at least one tag with the interests, best rated
/// first. When nothing matches, the head of the catalog is returned instead.
pub fn fallback_recommendations(
    courses: &[Course],
    cgpa: f64,
    interests: &[String],
    top_k: usize,
) -> Vec<Course> {
    let mut matched: Vec<Course> = courses
        .iter()
        .filter(|c| c.is_eligible(cgpa))
        .filter(|c| c.tags.iter().any(|tag| interests.contains(tag)))
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.avg_rating.total_cmp(&a.avg_rating));
    matched.truncate(top_k);

    if matched.is_empty() {
        courses.iter().take(top_k).cloned().collect()
    } else {
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;

    fn course(id: &str, tags: &[&str], min_cgpa: f64, avg_rating: f64) -> Course {
        Course {
            course_id: id.to_string(),
            title: format!("Course {id}"),
            provider: "Dept".to_string(),
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            min_cgpa,
            difficulty: Difficulty::Beginner,
            duration_weeks: 4,
            url: String::new(),
            avg_rating,
            rating_count: 1,
        }
    }

    fn ids(courses: &[Course]) -> Vec<&str> {
        courses.iter().map(|c| c.course_id.as_str()).collect()
    }

    fn interests(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize_interests_cleans_input() {
        let set = normalize_interests(&interests(&[" ML ", "", "ml", "Web"]));
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["ml", "web"]);
    }

    #[test]
    fn score_combines_overlap_and_rating() {
        let set = normalize_interests(&interests(&["ml", "python"]));
        let c = course("1", &["ML", "ai", "python"], 0.0, 4.0);
        assert!((score_course(&c, &set) - 2.3).abs() < 1e-9);

        let unrated = course("2", &["web"], 0.0, 0.0);
        assert!((score_course(&unrated, &set) + 0.9).abs() < 1e-9);
    }

    #[test]
    fn rank_filters_by_cgpa_and_orders_by_score() {
        let courses = vec![
            course("a", &["web"], 0.0, 5.0),
            course("b", &["ml", "ai"], 6.0, 3.0),
            course("c", &["ml"], 9.0, 5.0),
            course("d", &["ml"], 5.0, 3.0),
        ];
        let ranked = rank_courses(courses, 7.0, &interests(&["ml", "ai"]), 10);
        assert_eq!(ids(&ranked), vec!["b", "d", "a"]);
    }

    #[test]
    fn rank_respects_top_k_and_keeps_tie_order() {
        let courses = vec![
            course("a", &["x"], 0.0, 3.0),
            course("b", &["x"], 0.0, 3.0),
            course("c", &["x"], 0.0, 3.0),
        ];
        let ranked = rank_courses(courses, 10.0, &[], 2);
        assert_eq!(ids(&ranked), vec!["a", "b"]);
    }

    #[test]
    fn fallback_matches_tags_exactly_and_sorts_by_rating() {
        let courses = vec![
            course("a", &["ml"], 0.0, 3.5),
            course("b", &["ML"], 0.0, 5.0),
            course("c", &["ml", "web"], 0.0, 4.5),
            course("d", &["web"], 9.5, 5.0),
        ];
        let picked = fallback_recommendations(&courses, 8.0, &interests(&["ml", "web"]), 10);
        assert_eq!(ids(&picked), vec!["c", "a"]);
    }

    #[test]
    fn fallback_returns_catalog_head_when_nothing_matches() {
        let courses = vec![
            course("a", &["ml"], 0.0, 3.5),
            course("b", &["web"], 0.0, 5.0),
            course("c", &["cloud"], 0.0, 4.5),
        ];
        let picked = fallback_recommendations(&courses, 8.0, &interests(&["art"]), 2);
        assert_eq!(ids(&picked), vec!["a", "b"]);
    }
}
