//! Business logic services

pub mod authors;

use crate::{config::CatalogConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, catalog_config: CatalogConfig) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone(), catalog_config),
            repository,
        }
    }

    /// Check the backing store answers
    pub async fn ping(&self) -> crate::AppResult<()> {
        self.repository.authors.ping().await
    }
}
