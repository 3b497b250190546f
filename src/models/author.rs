//! Author model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Author record.
///
/// `id` is `None` until the store has persisted the author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Author {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Author {
    /// Unsaved author carrying the given name, as submitted
    pub fn new(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            created_at: None,
        }
    }

    /// Case-insensitive substring match used by the author search
    pub fn name_matches(&self, filter: &str) -> bool {
        self.name.to_lowercase().contains(&filter.to_lowercase())
    }
}

/// Create / update author form body
#[derive(Debug, Default, Deserialize)]
pub struct AuthorForm {
    #[serde(default)]
    pub name: String,
}

/// Author search query string
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AuthorQuery {
    pub name: Option<String>,
}

impl AuthorQuery {
    /// Non-empty name filter, matched verbatim
    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
