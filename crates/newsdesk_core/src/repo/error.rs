use crate::store::StoreError;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for content persistence and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// List, get or count query failed.
    Read(StoreError),
    /// Create, update or delete failed.
    Write(StoreError),
    /// A stored document could not be decoded.
    InvalidData(String),
}

impl RepoError {
    /// Returns whether the failure came from a read path.
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read(_))
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write(_))
    }

    pub(crate) fn read(event: &'static str, err: StoreError) -> Self {
        error!("event={event} module=repo status=error kind=read error={err}");
        Self::Read(err)
    }

    pub(crate) fn write(event: &'static str, err: StoreError) -> Self {
        error!("event={event} module=repo status=error kind=write error={err}");
        Self::Write(err)
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "store read failed: {err}"),
            Self::Write(err) => write!(f, "store write failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid stored document: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) | Self::Write(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}
