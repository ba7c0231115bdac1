use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Batch-level failures. Per-candidate DNS failures never show up here.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("input file '{}' not found", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("failed to read input file '{}': {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no IPv4 addresses found in '{}'", .path.display())]
    EmptyInput { path: PathBuf },

    #[error("failed to write output file '{}': {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LookupError {
    /// `EmptyInput` aborts the run but is not treated as a failure.
    pub fn is_failure(&self) -> bool {
        !matches!(self, LookupError::EmptyInput { .. })
    }
}
