//! Repository layer over the document store.
//!
//! # Responsibility
//! - Own one collection per repository and map documents to models.
//! - Classify store failures into read and write errors.
//!
//! # Invariants
//! - Repository deletes are unconditional; cross-entity guards live in
//!   the service layer.
//! - Read paths reject documents that cannot be decoded instead of
//!   masking them.

pub mod article_repo;
pub mod category_repo;
mod error;

pub use error::{RepoError, RepoResult};

pub(crate) const FIELD_CREATED_AT: &str = "createdAt";
pub(crate) const FIELD_UPDATED_AT: &str = "updatedAt";
