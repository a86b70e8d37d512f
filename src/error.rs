use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building or configuring a similarity pipeline.
///
/// Malformed input (an empty corpus, a corpus that tokenizes to nothing) is
/// reported as one generic `ConstructionFailed`; there are no dedicated
/// recovery paths.
#[derive(Debug, Error)]
pub enum Error {
    /// A dictionary, model or index could not be built from the given input.
    #[error("construction failed: {0}")]
    ConstructionFailed(String),

    /// The configuration file could not be read.
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for `PipelineConfig`.
    #[error("invalid config {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
