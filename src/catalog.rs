//! Search and filter over the course list and the electives catalog.

use crate::types::{Course, Difficulty, Elective};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CourseFilter {
    pub search: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Only keep courses whose minimum CGPA this value satisfies.
    pub eligible_for: Option<f64>,
}

impl CourseFilter {
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn eligible_for(mut self, cgpa: f64) -> Self {
        self.eligible_for = Some(cgpa);
        self
    }

    pub fn matches(&self, course: &Course) -> bool {
        if let Some(query) = self.search.as_deref().map(str::to_lowercase) {
            if !query.is_empty() {
                let hit = course.title.to_lowercase().contains(&query)
                    || course.provider.to_lowercase().contains(&query)
                    || course
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&query));
                if !hit {
                    return false;
                }
            }
        }
        if let Some(difficulty) = self.difficulty {
            if course.difficulty != difficulty {
                return false;
            }
        }
        if let Some(cgpa) = self.eligible_for {
            if !course.is_eligible(cgpa) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, courses: &[Course]) -> Vec<Course> {
        courses.iter().filter(|c| self.matches(c)).cloned().collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElectiveFilter {
    pub search: String,
    pub semester: Option<String>,
}

impl ElectiveFilter {
    pub fn matches(&self, elective: &Elective) -> bool {
        let query = self.search.to_lowercase();
        let match_search = elective.name.to_lowercase().contains(&query)
            || elective.department.to_lowercase().contains(&query);
        let match_semester = self
            .semester
            .as_deref()
            .map_or(true, |s| elective.semester == s);
        match_search && match_semester
    }

    pub fn apply<'a>(&self, electives: &'a [Elective]) -> Vec<&'a Elective> {
        electives.iter().filter(|e| self.matches(e)).collect()
    }
}

pub fn find_course<'a>(courses: &'a [Course], course_id: &str) -> Option<&'a Course> {
    courses.iter().find(|c| c.course_id == course_id)
}
