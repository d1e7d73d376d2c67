use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures at the file boundary. The pipeline itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
}
