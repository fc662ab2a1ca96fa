use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CatalogError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Rating,
    Complete,
    Purchase,
    CourseCompleted,
    PaymentCompleted,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Rating => "rating",
            EventType::Complete => "complete",
            EventType::Purchase => "purchase",
            EventType::CourseCompleted => "course_completed",
            EventType::PaymentCompleted => "payment_completed",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rating" => Ok(EventType::Rating),
            "complete" => Ok(EventType::Complete),
            "purchase" => Ok(EventType::Purchase),
            "course_completed" => Ok(EventType::CourseCompleted),
            "payment_completed" => Ok(EventType::PaymentCompleted),
            other => Err(CatalogError::UnknownEventType(other.to_string())),
        }
    }
}

/// Something a user did with a course: rated it, bought it, finished it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: String,
    pub course_id: String,
    pub event_type: EventType,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    pub fn new(
        user_id: impl Into<String>,
        course_id: impl Into<String>,
        event_type: EventType,
        details: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            course_id: course_id.into(),
            event_type,
            details: details.into(),
            created_at: Utc::now(),
        }
    }
}
