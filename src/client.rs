//! Client for the catalog backend. Every call tries the REST API first and
//! falls back to the JSON files bundled in the data directory.

use std::{
    path::PathBuf,
    time::Duration,
};

use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use crate::{
    catalog,
    recommend,
    types::{CatalogError, Course, ElectivesCatalog},
};

pub const COURSES_FILE: &str = "courses.json";
pub const ELECTIVES_FILE: &str = "electives.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Deserialize)]
#[serde(untagged)]
enum CoursesPayload {
    Wrapped { courses: Vec<Course> },
    Bare(Vec<Course>),
}

impl From<CoursesPayload> for Vec<Course> {
    fn from(payload: CoursesPayload) -> Self {
        match payload {
            CoursesPayload::Wrapped { courses } => courses,
            CoursesPayload::Bare(courses) => courses,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CourseDetailPayload {
    Detail {
        course: Course,
        #[serde(default)]
        avg_rating: Option<f64>,
        #[serde(default)]
        rating_count: Option<u32>,
    },
    Bare(Course),
}

impl From<CourseDetailPayload> for Course {
    fn from(payload: CourseDetailPayload) -> Self {
        match payload {
            CourseDetailPayload::Detail {
                mut course,
                avg_rating,
                rating_count,
            } => {
                if let Some(avg) = avg_rating {
                    course.avg_rating = avg;
                }
                if let Some(count) = rating_count {
                    course.rating_count = count;
                }
                course
            }
            CourseDetailPayload::Bare(course) => course,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecommendPayload {
    Wrapped { results: Vec<Course> },
    Bare(Vec<Course>),
}

impl From<RecommendPayload> for Vec<Course> {
    fn from(payload: RecommendPayload) -> Self {
        match payload {
            RecommendPayload::Wrapped { results } => results,
            RecommendPayload::Bare(courses) => courses,
        }
    }
}

#[derive(Serialize)]
struct RecommendBody<'a> {
    cgpa: f64,
    interests: &'a [String],
    top_k: usize,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    base: Url,
    http: Client,
    data_dir: PathBuf,
}

impl ApiClient {
    pub fn new(base_url: &str, data_dir: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base,
            http,
            data_dir: data_dir.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Sends the request and decodes a successful JSON body. Any failure is
    /// logged and reported as `None` so the caller can fall back.
    async fn try_backend<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Option<T> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                log::warn!("Backend unavailable for {}: {}", what, err);
                return None;
            }
        };
        if !response.status().is_success() {
            log::warn!("Backend returned {} for {}", response.status(), what);
            return None;
        }
        match response.json::<T>().await {
            Ok(body) => Some(body),
            Err(err) => {
                log::warn!("Backend sent an unreadable body for {}: {}", what, err);
                None
            }
        }
    }

    fn endpoint(&self, path: &str) -> Option<Url> {
        match self.base.join(path) {
            Ok(url) => Some(url),
            Err(err) => {
                log::warn!("Cannot build backend url for {}: {}", path, err);
                None
            }
        }
    }

    async fn read_bundled<T: DeserializeOwned>(&self, file: &str) -> Result<T, CatalogError> {
        let path = self.data_dir.join(file);
        let raw = tokio::fs::read(&path)
            .await
            .map_err(|source| CatalogError::BundledData {
                path: path.clone(),
                source,
            })?;
        serde_json::from_slice(&raw).map_err(|source| CatalogError::BundledJson { path, source })
    }

    pub async fn get_all_courses(&self) -> Result<Vec<Course>, CatalogError> {
        if let Some(url) = self.endpoint("api/courses") {
            if let Some(payload) = self
                .try_backend::<CoursesPayload>(self.http.get(url), "course list")
                .await
            {
                return Ok(payload.into());
            }
        }

        log::info!("📦 Loading courses from bundled data");
        let payload: CoursesPayload = self.read_bundled(COURSES_FILE).await?;
        Ok(payload.into())
    }

    pub async fn get_course_by_id(&self, course_id: &str) -> Result<Option<Course>, CatalogError> {
        if let Some(url) = self.endpoint(&format!("api/course/{course_id}")) {
            if let Some(payload) = self
                .try_backend::<CourseDetailPayload>(self.http.get(url), "course detail")
                .await
            {
                return Ok(Some(payload.into()));
            }
        }

        log::info!("📦 Searching bundled data for course {}", course_id);
        let courses = self.get_all_courses().await?;
        Ok(catalog::find_course(&courses, course_id).cloned())
    }

    pub async fn get_recommended_courses(
        &self,
        cgpa: f64,
        interests: &[String],
        top_k: usize,
    ) -> Result<Vec<Course>, CatalogError> {
        if let Some(url) = self.endpoint("api/recommend") {
            let body = RecommendBody {
                cgpa,
                interests,
                top_k,
            };
            if let Some(payload) = self
                .try_backend::<RecommendPayload>(self.http.post(url).json(&body), "recommendations")
                .await
            {
                return Ok(payload.into());
            }
        }

        log::info!("📦 Using local recommendation fallback");
        let courses = self.get_all_courses().await?;
        Ok(recommend::fallback_recommendations(
            &courses, cgpa, interests, top_k,
        ))
    }

    /// Electives only ship as bundled data.
    pub async fn load_electives(&self) -> Result<ElectivesCatalog, CatalogError> {
        self.read_bundled(ELECTIVES_FILE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/prefix", "data").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/prefix/");
        assert_eq!(
            client.endpoint("api/courses").unwrap().as_str(),
            "http://localhost:8000/prefix/api/courses"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url", "data"),
            Err(CatalogError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn detail_payload_overlays_aggregates() {
        let payload: CourseDetailPayload = serde_json::from_str(
            r#"{
                "course": {"course_id": 1, "title": "ML", "difficulty": "Beginner", "tags": "ml"},
                "avg_rating": 4.5,
                "rating_count": 2,
                "reviews": []
            }"#,
        )
        .unwrap();
        let course: Course = payload.into();
        assert_eq!(course.course_id, "1");
        assert_eq!(course.avg_rating, 4.5);
        assert_eq!(course.rating_count, 2);
    }

    #[test]
    fn course_list_accepts_both_shapes() {
        let wrapped: CoursesPayload = serde_json::from_str(
            r#"{"courses": [{"course_id": "a", "title": "A", "difficulty": "Advanced"}]}"#,
        )
        .unwrap();
        let bare: CoursesPayload =
            serde_json::from_str(r#"[{"course_id": "a", "title": "A", "difficulty": "Advanced"}]"#)
                .unwrap();
        assert_eq!(Vec::<Course>::from(wrapped), Vec::<Course>::from(bare));
    }
}
