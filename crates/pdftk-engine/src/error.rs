//! Error types for toolkit operations

use std::path::PathBuf;

use thiserror::Error;

/// Failures while driving the external toolkit
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to execute {}: {source}", binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} failed (exit code {}): {stderr}", binary.display(), code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    Toolkit {
        binary: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    #[error("toolkit timeout after {0}ms")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
