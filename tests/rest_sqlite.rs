use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use coursewise::{
    rest::{router, AppState},
    storage::{seed, SqliteStorage, StorageRead},
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

fn seeded_app() -> (TempDir, SqliteStorage, Router) {
    let dir = TempDir::new().unwrap();
    let storage = SqliteStorage::new(dir.path().join("coursewise.sqlite"));
    storage.init().unwrap();
    seed(&storage).unwrap();
    let app = router(AppState {
        storage: storage.clone(),
        started_at: std::time::SystemTime::now(),
    });
    (dir, storage, app)
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn seeded_catalog_is_listed_newest_first() {
    let (_dir, _storage, app) = seeded_app();

    let (status, body) = call(&app, get("/api/courses")).await;
    assert_eq!(status, StatusCode::OK);
    let courses = body["courses"].as_array().unwrap();
    assert_eq!(courses.len(), 4);
    assert_eq!(courses[0]["title"], "College Elective: Cloud Computing");
    assert_eq!(courses[0]["avg_rating"], 0.0);
    assert_eq!(courses[0]["rating_count"], 0);
}

#[tokio::test]
async fn reviews_update_course_detail() {
    let (_dir, storage, app) = seeded_app();

    for rating in [4, 5] {
        let (status, body) = call(
            &app,
            post_json(
                "/api/review",
                serde_json::json!({"course_id": 1, "rating": rating, "pros": "clear"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    let (status, body) = call(&app, get("/api/course/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["course"]["title"], "Machine Learning Basics");
    assert_eq!(body["avg_rating"], 4.5);
    assert_eq!(body["rating_count"], 2);
    assert_eq!(body["reviews"].as_array().unwrap().len(), 2);

    let interactions = storage.list_interactions("anon").unwrap();
    assert_eq!(interactions.len(), 2);
    assert!(interactions.iter().any(|i| i.details == "rating=5"));
}

#[tokio::test]
async fn out_of_range_rating_is_rejected() {
    let (_dir, storage, app) = seeded_app();

    let (status, body) = call(
        &app,
        post_json("/api/review", serde_json::json!({"course_id": 1, "rating": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
    assert!(storage.list_reviews(1).unwrap().is_empty());
}

#[tokio::test]
async fn ratings_move_recommendations() {
    let (_dir, _storage, app) = seeded_app();

    let (status, body) = call(
        &app,
        post_json(
            "/api/recommend",
            serde_json::json!({"cgpa": 7.0, "interests": ["ML"], "top_k": 2}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let mut titles: Vec<String> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap().to_string())
        .collect();
    titles.sort();
    assert_eq!(
        titles,
        vec!["College Elective: Data Mining", "Machine Learning Basics"]
    );

    // a 5-star rating outweighs a single tag match
    call(
        &app,
        post_json("/api/review", serde_json::json!({"course_id": 2, "rating": 5})),
    )
    .await;
    let (_, body) = call(
        &app,
        post_json("/api/recommend", serde_json::json!({"cgpa": 7.0, "interests": ["ml"]})),
    )
    .await;
    assert_eq!(body["results"][0]["title"], "Web Development with React");
    assert_eq!(body["results"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn low_cgpa_filters_out_demanding_courses() {
    let (_dir, _storage, app) = seeded_app();

    let (_, body) = call(
        &app,
        post_json("/api/recommend", serde_json::json!({"cgpa": 5.0, "interests": []})),
    )
    .await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], "Web Development with React");
}

#[tokio::test]
async fn listed_ids_can_be_posted_back() {
    let (_dir, storage, app) = seeded_app();

    let (_, body) = call(&app, get("/api/courses")).await;
    let course_id = body["courses"][0]["course_id"].clone();
    assert!(course_id.is_string());

    let (status, _) = call(
        &app,
        post_json(
            "/api/review",
            serde_json::json!({"course_id": course_id, "rating": 4, "user_id": "u7"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        &app,
        post_json(
            "/api/complete",
            serde_json::json!({"course_id": course_id, "user_id": "u7"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &app,
        post_json(
            "/api/pay",
            serde_json::json!({"course_id": course_id, "user_id": "u7"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirect"], "/payment_page?course_id=4");

    let events = storage.list_interactions("u7").unwrap();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.course_id == "4"));
    assert_eq!(storage.list_reviews(4).unwrap().len(), 1);
}

#[tokio::test]
async fn checkout_redirects_to_payment_page() {
    let (_dir, storage, app) = seeded_app();

    let (status, body) = call(
        &app,
        post_json("/api/pay", serde_json::json!({"course_id": 3, "user_id": "u1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirect"], "/payment_page?course_id=3");

    let purchases = storage.list_interactions("u1").unwrap();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].details, "fake payment");
}
