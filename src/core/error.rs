//! Error types for the sweep engine

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("could not determine the home directory; pass --path explicitly")]
    HomeDirUnavailable,

    #[error("failed to read repository configuration {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`git {command}` failed: {message}")]
    GitCommand { command: String, message: String },

    #[error("failed to launch git: {0}")]
    Spawn(#[from] io::Error),

    #[error("repository walk aborted unexpectedly")]
    WalkerPanicked,
}

pub type Result<T> = std::result::Result<T, SweepError>;
