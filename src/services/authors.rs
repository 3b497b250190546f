//! Author catalog service

use uuid::Uuid;
use validator::Validate;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{Author, AuthorQuery, Book},
    repository::Repository,
};

/// Result of a delete request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Books still reference the author; nothing was deleted
    HasBooks,
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
    config: CatalogConfig,
}

impl AuthorsService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    /// Search authors by name (case-insensitive substring)
    pub async fn list(&self, query: &AuthorQuery) -> AppResult<Vec<Author>> {
        self.repository
            .authors
            .find(query, self.config.list_limit)
            .await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Author> {
        self.repository.authors.find_by_id(id).await
    }

    /// Author plus the first few books referencing it
    pub async fn get_with_books(&self, id: Uuid) -> AppResult<(Author, Vec<Book>)> {
        let author = self.repository.authors.find_by_id(id).await?;
        let books = self
            .repository
            .books
            .find_by_author(id, Some(self.config.books_per_author))
            .await?;
        Ok((author, books))
    }

    /// Insert or update an author after the presence check on its name
    pub async fn save(&self, author: &Author) -> AppResult<Author> {
        author.validate()?;
        let saved = self.repository.authors.save(author).await?;
        tracing::debug!("Saved author id={:?} name={}", saved.id, saved.name);
        Ok(saved)
    }

    /// Delete an author unless books still reference it
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome> {
        self.repository.authors.find_by_id(id).await?;

        let books = self.repository.books.count_by_author(id).await?;
        if books > 0 {
            tracing::info!("Refusing to delete author {}: {} dependent book(s)", id, books);
            return Ok(DeleteOutcome::HasBooks);
        }

        match self.repository.authors.delete(id).await {
            Ok(()) => {
                tracing::info!("Deleted author {}", id);
                Ok(DeleteOutcome::Deleted)
            }
            // A book was added between the check and the delete
            Err(AppError::Conflict(msg)) => {
                tracing::info!("Refusing to delete author {}: {}", id, msg);
                Ok(DeleteOutcome::HasBooks)
            }
            Err(e) => Err(e),
        }
    }
}
