use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no git repository found at or above {}", .0.display())]
    RepositoryUnavailable(PathBuf),

    #[error("unknown reference: no remote tracking branch origin/{0}")]
    UnknownReference(String),

    #[error("malformed status line: {0:?}")]
    MalformedStatus(String),

    #[error("git status failed: {0}")]
    StatusCommand(String),

    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error("failed to run git: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
