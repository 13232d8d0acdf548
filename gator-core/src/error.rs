use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("File {0} already added")]
    AlreadyTracked(String),

    #[error("File {0} not tracked")]
    NotTracked(String),

    #[error("Message must contain \"{marker}\"")]
    InvalidMessage { marker: &'static str },

    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    #[error("Not a gator repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("Repository already initialized")]
    AlreadyInitialized(PathBuf),

    #[error("Corrupt repository: {0}")]
    CorruptRepository(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptRepository(reason.into())
    }

    /// Process exit code for this error kind. `0` is never returned.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::AlreadyTracked(_) => 3,
            Error::NotTracked(_) | Error::InvalidMessage { .. } => 1,
            Error::CorruptRepository(_) => 70,
            Error::InvalidPath(_)
            | Error::CommitNotFound(_)
            | Error::NotARepository(_)
            | Error::AlreadyInitialized(_)
            | Error::Io(_) => 2,
        }
    }

    /// Whether the failure left the repository untouched and can be fixed by
    /// the user re-running with different input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::CorruptRepository(_) | Error::Io(_))
    }
}
