use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};

use crate::{
    backend::{self, ANONYMOUS_USER},
    payment,
    storage::Storage,
    types::{parse_course_id, validate_rating, EventType, Interaction, NewReview},
};

use super::{
    models::{
        CompleteRequest, CourseDetailResponse, CoursesResponse, ErrorResponse, HealthResponse,
        PayRequest, PayResponse, PaymentPageQuery, PaymentSubmitForm, RecommendRequest,
        RecommendResponse, ReviewRequest, StatusResponse,
    },
    AppState,
};

fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
        .into_response()
}

fn internal_error() -> Response {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}

pub async fn health<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
        }),
    )
}

pub async fn list_courses<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Response {
    match state.storage.list_courses() {
        Ok(courses) => Json(CoursesResponse { courses }).into_response(),
        Err(err) => {
            log::error!("Failed to list courses: {:?}", err);
            internal_error()
        }
    }
}

pub async fn get_course<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Response {
    let course_id = match parse_course_id(&id) {
        Ok(course_id) => course_id,
        Err(err) => {
            log::warn!("{}", err);
            return error_response(StatusCode::BAD_REQUEST, err.to_string());
        }
    };

    match backend::course_detail(&state.storage, course_id) {
        Ok(Some(detail)) => Json(CourseDetailResponse {
            course: detail.course,
            avg_rating: detail.summary.avg_rating,
            rating_count: detail.summary.rating_count,
            reviews: detail.reviews,
        })
        .into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Course not found"),
        Err(err) => {
            log::error!("Failed to load course {}: {:?}", course_id, err);
            internal_error()
        }
    }
}

pub async fn add_review<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Json(req): Json<ReviewRequest>,
) -> Response {
    let course_id = match parse_course_id(&req.course_id) {
        Ok(course_id) => course_id,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
    };
    let rating = match validate_rating(req.rating) {
        Ok(rating) => rating,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
    };

    match state.storage.load_course(course_id) {
        Ok(Some(_)) => {}
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Course not found"),
        Err(err) => {
            log::error!("Failed to load course {}: {:?}", course_id, err);
            return internal_error();
        }
    }

    let review = NewReview {
        course_id,
        user_id: req.user_id,
        reviewer_name: req.reviewer_name,
        rating,
        pros: req.pros,
        cons: req.cons,
        comment: req.comment,
        is_senior: req.is_senior,
    };
    match backend::submit_review(&state.storage, &review) {
        Ok(review_id) => {
            log::info!(
                "📝 Review {} stored for course {} (rating {})",
                review_id,
                review.course_id,
                rating
            );
            Json(StatusResponse::ok()).into_response()
        }
        Err(err) => {
            log::error!("Failed to store review: {:?}", err);
            internal_error()
        }
    }
}

pub async fn mark_complete<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Json(req): Json<CompleteRequest>,
) -> Response {
    let course_id = match parse_course_id(&req.course_id) {
        Ok(course_id) => course_id,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
    };
    let interaction = Interaction::new(
        req.user_id.as_deref().unwrap_or(ANONYMOUS_USER),
        course_id.to_string(),
        EventType::Complete,
        "user completed course",
    );
    match backend::record_event(&state.storage, &interaction) {
        Ok(()) => Json(StatusResponse::ok()).into_response(),
        Err(err) => {
            log::error!("Failed to record completion: {:?}", err);
            internal_error()
        }
    }
}

pub async fn recommend<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Json(req): Json<RecommendRequest>,
) -> Response {
    match backend::recommend(&state.storage, req.cgpa, &req.interests, req.top_k) {
        Ok(results) => Json(RecommendResponse { results }).into_response(),
        Err(err) => {
            log::error!("Failed to compute recommendations: {:?}", err);
            internal_error()
        }
    }
}

pub async fn pay<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Json(req): Json<PayRequest>,
) -> Response {
    let course_id = match parse_course_id(&req.course_id) {
        Ok(course_id) => course_id,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
    };
    let interaction = Interaction::new(
        req.user_id.as_deref().unwrap_or(ANONYMOUS_USER),
        course_id.to_string(),
        EventType::Purchase,
        "fake payment",
    );
    match backend::record_event(&state.storage, &interaction) {
        Ok(()) => Json(PayResponse {
            redirect: payment::redirect_for(course_id),
        })
        .into_response(),
        Err(err) => {
            log::error!("Failed to record payment: {:?}", err);
            internal_error()
        }
    }
}

pub async fn payment_page(Query(query): Query<PaymentPageQuery>) -> Html<String> {
    Html(payment::payment_page_html(query.course_id))
}

pub async fn payment_submit<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Form(form): Form<PaymentSubmitForm>,
) -> Response {
    let course_id = form
        .course_id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .unwrap_or(-1);
    let interaction = Interaction::new(
        ANONYMOUS_USER,
        course_id.to_string(),
        EventType::Purchase,
        "fake payment submit",
    );
    match backend::record_event(&state.storage, &interaction) {
        Ok(()) => Html(payment::PAYMENT_DONE_HTML).into_response(),
        Err(err) => {
            log::error!("Failed to record payment submit: {:?}", err);
            internal_error()
        }
    }
}

pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not Found")
}
