//! Repository layer for persistence operations
//!
//! Handlers and services only see the [`AuthorStore`] and [`BookStore`]
//! traits; the concrete backend is picked at startup.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, AuthorQuery, Book},
};

/// Persistence operations on authors
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// Authors matching the query's name filter, ordered by name
    async fn find(&self, query: &AuthorQuery, limit: i64) -> AppResult<Vec<Author>>;

    /// Fails with `NotFound` when no author has this id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Author>;

    /// Insert (no id yet) or update (existing id) an author
    async fn save(&self, author: &Author) -> AppResult<Author>;

    /// Fails with `NotFound` when nothing was deleted and `Conflict`
    /// when books still reference the author
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn ping(&self) -> AppResult<()>;
}

/// Read-only queries on books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn find_by_author(&self, author_id: Uuid, limit: Option<i64>) -> AppResult<Vec<Book>>;

    async fn count_by_author(&self, author_id: Uuid) -> AppResult<i64>;
}

/// Main repository struct holding the store handles
#[derive(Clone)]
pub struct Repository {
    pub authors: Arc<dyn AuthorStore>,
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    pub fn new(authors: Arc<dyn AuthorStore>, books: Arc<dyn BookStore>) -> Self {
        Self { authors, books }
    }

    /// Create a repository backed by the given Postgres pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        let store = Arc::new(postgres::PgStore::new(pool));
        Self::new(store.clone(), store)
    }

    /// Create a repository backed by an in-process store
    pub fn memory(store: memory::MemoryStore) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store)
    }
}
