//! Data models for Bookshelf

pub mod author;
pub mod book;

// Re-export commonly used types
pub use author::{Author, AuthorForm, AuthorQuery};
pub use book::Book;
