//! Postgres-backed stores

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::{AuthorStore, BookStore};
use crate::{
    error::{AppError, AppResult, ErrorKind},
    models::{Author, AuthorQuery, Book},
};

/// Escape LIKE metacharacters so the filter matches literally
fn like_pattern(filter: &str) -> String {
    let mut escaped = String::with_capacity(filter.len() + 2);
    escaped.push('%');
    for c in filter.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorStore for PgStore {
    async fn find(&self, query: &AuthorQuery, limit: i64) -> AppResult<Vec<Author>> {
        let pattern = query.name_filter().map(like_pattern);

        let rows = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, name, created_at
            FROM authors
            WHERE $1::text IS NULL OR name ILIKE $1 ESCAPE '\'
            ORDER BY lower(name), name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT id, name, created_at FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    async fn save(&self, author: &Author) -> AppResult<Author> {
        match author.id {
            Some(id) => sqlx::query_as::<_, Author>(
                "UPDATE authors SET name = $2 WHERE id = $1 RETURNING id, name, created_at",
            )
            .bind(id)
            .bind(&author.name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id))),
            None => {
                let row = sqlx::query_as::<_, Author>(
                    "INSERT INTO authors (id, name) VALUES ($1, $2) RETURNING id, name, created_at",
                )
                .bind(Uuid::new_v4())
                .bind(&author.name)
                .fetch_one(&self.pool)
                .await?;
                Ok(row)
            }
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)
            .map_err(|e| match e.kind() {
                ErrorKind::Conflict => {
                    AppError::Conflict(format!("Author {} still has books", id))
                }
                _ => e,
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Unavailable(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl BookStore for PgStore {
    async fn find_by_author(&self, author_id: Uuid, limit: Option<i64>) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, description, publish_date, page_count, author_id, created_at
            FROM books
            WHERE author_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(author_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_by_author(&self, author_id: Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
