//! Content domain model.
//!
//! # Responsibility
//! - Define article and category records as callers see them.
//! - Define write payloads (`New*`) and partial updates (`*Patch`).
//!
//! # Invariants
//! - Persisted records always carry a store-assigned id.
//! - Articles reference categories by name only; there is no foreign key.

pub mod article;
pub mod category;
pub mod validation;
