//! Book model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Book record. `author_id` references an author without owning it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub page_count: Option<i32>,
    pub author_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
}

impl Book {
    pub fn new(title: &str, author_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            publish_date: None,
            page_count: None,
            author_id,
            created_at: Some(Utc::now()),
        }
    }
}
