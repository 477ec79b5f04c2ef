use serde::Deserialize;
use time::OffsetDateTime;

use crate::tasks::repo::{Category, Priority, Status};

/// Free-form query parameters for task listing.
#[derive(Debug, Default, Deserialize)]
pub struct TaskQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

/// Request body for task creation.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub due_date: Option<OffsetDateTime>,
}

/// Request body for task updates; absent fields stay unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub due_date: Option<OffsetDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_fills_defaults() {
        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"title": "Buy milk"}"#).unwrap();
        assert_eq!(req.title, "Buy milk");
        assert_eq!(req.description, None);
        assert_eq!(req.category, None);
        assert_eq!(req.priority, None);
        assert_eq!(req.status, None);
        assert_eq!(req.due_date, None);
    }

    #[test]
    fn create_request_accepts_full_body() {
        let req: CreateTaskRequest = serde_json::from_str(
            r#"{
                "title": "Buy milk",
                "description": "2 liters",
                "category": "shopping",
                "priority": "low",
                "status": "pending",
                "due_date": "2026-08-10T12:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(req.category, Some(Category::Shopping));
        assert_eq!(req.priority, Some(Priority::Low));
        assert_eq!(req.status, Some(Status::Pending));
        assert!(req.due_date.is_some());
    }

    #[test]
    fn update_request_treats_absent_fields_as_unchanged() {
        let req: UpdateTaskRequest =
            serde_json::from_str(r#"{"status": "completed"}"#).unwrap();
        assert_eq!(req.title, None);
        assert_eq!(req.status, Some(Status::Completed));
    }
}
