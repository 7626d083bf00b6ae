//! Content use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into management-view level APIs.
//! - Host the cross-entity guards repositories deliberately do not enforce.

pub mod article_service;
pub mod category_service;
