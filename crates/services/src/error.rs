//! Shared error types for the services crate.

use thiserror::Error;

use course_core::model::CatalogError;
use storage::repository::StorageError;

/// Errors emitted by `CourseSeeder`.
///
/// Any error aborts the whole reseed; the store keeps its previous content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
