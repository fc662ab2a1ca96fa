use serde::{Deserialize, Serialize};

use crate::{
    recommend::DEFAULT_TOP_K,
    types::{Course, Review},
};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

#[derive(Serialize, Deserialize)]
pub struct CoursesResponse {
    pub courses: Vec<Course>,
}

#[derive(Serialize, Deserialize)]
pub struct CourseDetailResponse {
    pub course: Course,
    pub avg_rating: f64,
    pub rating_count: u32,
    pub reviews: Vec<Review>,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

#[derive(Serialize, Deserialize)]
pub struct RecommendRequest {
    pub cgpa: f64,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

#[derive(Serialize, Deserialize)]
pub struct RecommendResponse {
    pub results: Vec<Course>,
}

#[derive(Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Integer id, or its decimal string as listed by `/api/courses`.
    #[serde(deserialize_with = "crate::types::deserialize_id")]
    pub course_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub reviewer_name: Option<String>,
    pub rating: i64,
    #[serde(default)]
    pub pros: Option<String>,
    #[serde(default)]
    pub cons: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "crate::types::deserialize_flag")]
    pub is_senior: bool,
}

#[derive(Serialize, Deserialize)]
pub struct CompleteRequest {
    /// Integer id, or its decimal string as listed by `/api/courses`.
    #[serde(deserialize_with = "crate::types::deserialize_id")]
    pub course_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct PayRequest {
    /// Integer id, or its decimal string as listed by `/api/courses`.
    #[serde(deserialize_with = "crate::types::deserialize_id")]
    pub course_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct PayResponse {
    pub redirect: String,
}

#[derive(Deserialize)]
pub struct PaymentPageQuery {
    pub course_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct PaymentSubmitForm {
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(default)]
    pub cvv: Option<String>,
}
