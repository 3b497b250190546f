//! Bookshelf Library Catalog
//!
//! A server-rendered web application for managing the authors of a
//! library catalog, refusing to delete authors that books still reference.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
    pub views: views::Views,
}

impl AppState {
    pub fn new(config: AppConfig, repository: repository::Repository) -> AppResult<Self> {
        let services = services::Services::new(repository, config.catalog);
        Ok(Self {
            services: Arc::new(services),
            views: views::Views::new()?,
        })
    }
}
