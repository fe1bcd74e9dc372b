//! Repository Module
//!
//! CRUD and query operations over the SQLite tables, one repository per
//! aggregate.

pub mod catalogo;
pub mod extras;
pub mod fornecedor;

pub use catalogo::{CatalogFilter, CatalogRepository};
pub use extras::ExtrasRepository;
pub use fornecedor::FornecedorRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
