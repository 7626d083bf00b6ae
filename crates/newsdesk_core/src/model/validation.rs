//! Write-payload validation errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a write payload is rejected before reaching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    BlankTitle,
    BlankCategory,
    BlankName,
    BlankNameHindi,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "article title must not be blank"),
            Self::BlankCategory => write!(f, "article category must not be blank"),
            Self::BlankName => write!(f, "category name must not be blank"),
            Self::BlankNameHindi => write!(f, "category Hindi name must not be blank"),
        }
    }
}

impl Error for ValidationError {}
