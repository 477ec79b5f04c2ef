use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::tasks::filter::TaskFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "task_category", rename_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
    Shopping,
    Health,
    Other,
}

impl Category {
    /// Parse a query-string value; unknown values mean "no constraint".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "work" => Some(Self::Work),
            "personal" => Some(Self::Personal),
            "shopping" => Some(Self::Shopping),
            "health" => Some(Self::Health),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "task_status", rename_all = "lowercase")]
pub enum Status {
    Pending,
    Completed,
}

impl Status {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Task record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub due_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Field set for inserting a task.
#[derive(Debug)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    pub due_date: Option<OffsetDateTime>,
}

/// Partial update; absent fields leave the stored value unchanged.
#[derive(Debug, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub due_date: Option<OffsetDateTime>,
}

pub async fn create(db: &PgPool, user_id: Uuid, new: NewTask) -> anyhow::Result<Task> {
    let task = sqlx::query_as::<_, Task>(
        r#"
        INSERT INTO tasks (user_id, title, description, category, priority, status, due_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, user_id, title, description, category, priority, status, due_date,
                  created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(new.title)
    .bind(new.description)
    .bind(new.category)
    .bind(new.priority)
    .bind(new.status)
    .bind(new.due_date)
    .fetch_one(db)
    .await?;
    Ok(task)
}

/// Run the predicate. Owner scoping is baked into the statement; the optional
/// arms collapse to no-ops when their parameter is NULL.
pub async fn find(db: &PgPool, filter: &TaskFilter) -> anyhow::Result<Vec<Task>> {
    let rows = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, user_id, title, description, category, priority, status, due_date,
               created_at, updated_at
        FROM tasks
        WHERE user_id = $1
          AND ($2::text IS NULL
               OR title ILIKE '%' || $2 || '%'
               OR description ILIKE '%' || $2 || '%')
          AND ($3::task_category IS NULL OR category = $3)
          AND ($4::task_status IS NULL OR status = $4)
        ORDER BY created_at DESC
        "#,
    )
    .bind(filter.owner)
    .bind(filter.search.as_deref())
    .bind(filter.category)
    .bind(filter.status)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(db: &PgPool, user_id: Uuid, task_id: Uuid) -> anyhow::Result<Option<Task>> {
    let task = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, user_id, title, description, category, priority, status, due_date,
               created_at, updated_at
        FROM tasks
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(task_id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(task)
}

/// Apply a patch to an owned task. Returns None when no row matches id+owner.
pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    task_id: Uuid,
    patch: TaskPatch,
) -> anyhow::Result<Option<Task>> {
    let task = sqlx::query_as::<_, Task>(
        r#"
        UPDATE tasks
        SET title = COALESCE($3, title),
            description = COALESCE($4, description),
            category = COALESCE($5, category),
            priority = COALESCE($6, priority),
            status = COALESCE($7, status),
            due_date = COALESCE($8, due_date),
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, title, description, category, priority, status, due_date,
                  created_at, updated_at
        "#,
    )
    .bind(task_id)
    .bind(user_id)
    .bind(patch.title)
    .bind(patch.description)
    .bind(patch.category)
    .bind(patch.priority)
    .bind(patch.status)
    .bind(patch.due_date)
    .fetch_optional(db)
    .await?;
    Ok(task)
}

/// Delete an owned task. Returns false when no row matches id+owner.
pub async fn delete(db: &PgPool, user_id: Uuid, task_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod enum_tests {
    use super::*;

    #[test]
    fn category_parses_known_values_only() {
        assert_eq!(Category::parse("shopping"), Some(Category::Shopping));
        assert_eq!(Category::parse("work"), Some(Category::Work));
        assert_eq!(Category::parse("groceries"), None);
        assert_eq!(Category::parse("all"), None);
    }

    #[test]
    fn status_parses_known_values_only() {
        assert_eq!(Status::parse("pending"), Some(Status::Pending));
        assert_eq!(Status::parse("completed"), Some(Status::Completed));
        assert_eq!(Status::parse("done"), None);
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Shopping).unwrap(), r#""shopping""#);
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), r#""high""#);
        assert_eq!(serde_json::to_string(&Status::Pending).unwrap(), r#""pending""#);
    }
}
