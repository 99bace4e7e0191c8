use thiserror::Error;

/// Error type for dictionary compilation and configuration failures.
///
/// The pipeline itself has no fatal path: per-record problems become audit
/// rows, never errors.
#[derive(Debug, Error)]
pub enum HarmonizerError {
    #[error("dictionary rule {index} ('{pattern}') failed to compile: {reason}")]
    Dictionary {
        index: usize,
        pattern: String,
        reason: String,
    },
    #[error("value dictionary rule {index} maps to unknown scale tag '{tag}'")]
    UnknownScaleTag { index: usize, tag: String },
    #[error("configuration error: {0}")]
    Configuration(String),
}
