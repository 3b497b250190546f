//! In-process store, used for `database.backend = "memory"` and tests.
//!
//! Enforces the same rule as the Postgres foreign key: an author that is
//! still referenced by a book cannot be deleted.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AuthorStore, BookStore};
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorQuery, Book},
};

#[derive(Default)]
struct Collections {
    authors: HashMap<Uuid, Author>,
    books: HashMap<Uuid, Book>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a book; its author must exist
    pub async fn insert_book(&self, book: Book) -> AppResult<Book> {
        let mut inner = self.inner.write().await;
        if !inner.authors.contains_key(&book.author_id) {
            return Err(AppError::Validation(format!(
                "Author {} does not exist",
                book.author_id
            )));
        }
        inner.books.insert(book.id, book.clone());
        Ok(book)
    }

    pub async fn remove_book(&self, id: Uuid) -> AppResult<Book> {
        self.inner
            .write()
            .await
            .books
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn find(&self, query: &AuthorQuery, limit: i64) -> AppResult<Vec<Author>> {
        let inner = self.inner.read().await;
        let mut authors: Vec<Author> = inner
            .authors
            .values()
            .filter(|author| query.name_filter().map_or(true, |f| author.name_matches(f)))
            .cloned()
            .collect();
        authors.sort_by_cached_key(|author| (author.name.to_lowercase(), author.name.clone()));
        authors.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(authors)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Author> {
        self.inner
            .read()
            .await
            .authors
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    async fn save(&self, author: &Author) -> AppResult<Author> {
        let mut inner = self.inner.write().await;
        match author.id {
            Some(id) => {
                let stored = inner
                    .authors
                    .get_mut(&id)
                    .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))?;
                stored.name = author.name.clone();
                Ok(stored.clone())
            }
            None => {
                let id = Uuid::new_v4();
                let created = Author {
                    id: Some(id),
                    name: author.name.clone(),
                    created_at: Some(Utc::now()),
                };
                inner.authors.insert(id, created.clone());
                Ok(created)
            }
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if inner.books.values().any(|book| book.author_id == id) {
            return Err(AppError::Conflict(format!("Author {} still has books", id)));
        }
        inner
            .authors
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn find_by_author(&self, author_id: Uuid, limit: Option<i64>) -> AppResult<Vec<Book>> {
        let inner = self.inner.read().await;
        let mut books: Vec<Book> = inner
            .books
            .values()
            .filter(|book| book.author_id == author_id)
            .cloned()
            .collect();
        books.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            books.truncate(usize::try_from(limit).unwrap_or(0));
        }
        Ok(books)
    }

    async fn count_by_author(&self, author_id: Uuid) -> AppResult<i64> {
        let inner = self.inner.read().await;
        let count = inner
            .books
            .values()
            .filter(|book| book.author_id == author_id)
            .count();
        Ok(count as i64)
    }
}
