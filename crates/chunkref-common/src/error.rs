//! Error types for chunkref

use std::path::PathBuf;

use miette::Diagnostic;

/// Errors from the fallible edges of chunkref: files, registry JSON and config.
///
/// Reference resolution itself never fails.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum ChunkRefError {
    /// Could not read or write a file
    #[error("failed to access {}", path.display())]
    #[diagnostic(code(chunkref::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Registry JSON did not deserialize into a list of chunk records
    #[error("invalid chunk registry: {0}")]
    #[diagnostic(
        code(chunkref::registry),
        help("expected a JSON array of objects with `id`, `chunk_type` and `number` fields")
    )]
    Registry(#[from] serde_json::Error),

    /// KDL syntax error in a config file
    #[error("config parse error: {0}")]
    #[diagnostic(code(chunkref::config::parse))]
    ConfigParse(#[from] kdl::KdlError),

    /// Config parsed but holds a value of the wrong shape
    #[error("invalid config: {0}")]
    #[diagnostic(code(chunkref::config))]
    InvalidConfig(String),
}

impl ChunkRefError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChunkRefError::Io {
            path: path.into(),
            source,
        }
    }
}
