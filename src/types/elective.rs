use serde::{Deserialize, Serialize};

use super::{wire, BundledReview};

/// Contents of the bundled `electives.json`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectivesCatalog {
    #[serde(default)]
    pub electives: Vec<Elective>,
    #[serde(default)]
    pub basket_electives: Vec<Basket>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Elective {
    #[serde(deserialize_with = "wire::id")]
    pub elective_id: String,
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub semester: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub reviews: Vec<BundledReview>,
}

/// A group of electives a student picks one subject from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    pub basket_id: String,
    pub basket_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub courses: Vec<BasketSubject>,
    #[serde(default)]
    pub reviews: Vec<BundledReview>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BasketSubject {
    pub elective_id: String,
    #[serde(default)]
    pub course_no: String,
    pub name: String,
    /// Lecture, tutorial and practical hours per week.
    #[serde(default)]
    pub l: u32,
    #[serde(default)]
    pub t: u32,
    #[serde(default)]
    pub p: u32,
    #[serde(default)]
    pub credits: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub outcomes: Vec<String>,
    #[serde(default)]
    pub books: Vec<String>,
    #[serde(default)]
    pub lab_work: Option<String>,
    #[serde(default)]
    pub self_learning: Option<String>,
    #[serde(default)]
    pub evaluation: Option<Evaluation>,
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub reviews: Vec<BundledReview>,
}

/// Mid-semester and end-semester test weights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(rename = "MST")]
    pub mst: u32,
    #[serde(rename = "EST")]
    pub est: u32,
}

impl ElectivesCatalog {
    pub fn find_elective(&self, elective_id: &str) -> Option<&Elective> {
        self.electives.iter().find(|e| e.elective_id == elective_id)
    }

    pub fn find_basket(&self, basket_id: &str) -> Option<&Basket> {
        self.basket_electives
            .iter()
            .find(|b| b.basket_id == basket_id)
    }

    pub fn find_subject(&self, basket_id: &str, subject_id: &str) -> Option<(&Basket, &BasketSubject)> {
        let basket = self.find_basket(basket_id)?;
        basket
            .courses
            .iter()
            .find(|s| s.elective_id == subject_id)
            .map(|subject| (basket, subject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ElectivesCatalog {
        serde_json::from_str(
            r#"{
                "electives": [
                    {"elective_id": "E1", "name": "Data Mining", "department": "CSE", "semester": "7th"}
                ],
                "basket_electives": [
                    {
                        "basket_id": "B1",
                        "basket_name": "Basket I",
                        "avg_rating": 4.2,
                        "courses": [
                            {"elective_id": "S1", "course_no": "CS401", "name": "Compilers", "l": 3, "t": 0, "p": 2, "credits": 4,
                             "evaluation": {"MST": 30, "EST": 70}}
                        ],
                        "reviews": [{"user": "senior", "rating": 5, "date": "2024-05-01"}]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn lookups_find_nested_subjects() {
        let catalog = catalog();
        assert_eq!(catalog.find_elective("E1").unwrap().name, "Data Mining");
        assert!(catalog.find_elective("E2").is_none());

        let (basket, subject) = catalog.find_subject("B1", "S1").unwrap();
        assert_eq!(basket.basket_name, "Basket I");
        assert_eq!(subject.course_no, "CS401");
        assert_eq!(subject.evaluation, Some(Evaluation { mst: 30, est: 70 }));
        assert!(catalog.find_subject("B1", "S9").is_none());
        assert!(catalog.find_subject("B9", "S1").is_none());
    }
}
