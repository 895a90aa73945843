//! Errors reported by the command-line tool.

use std::path::PathBuf;

use crate::config::ConfigLoadError;

/// Error that ends a run of the command-line tool.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// The script could not be read.
    #[error("failed to read script: {0}")]
    ReadScript(#[source] std::io::Error),

    /// A configuration file given explicitly could not be loaded.
    #[error("{}: {source}", path.display())]
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// What went wrong.
        source: ConfigLoadError,
    },

    /// The script could not be parsed, or the cursor lies outside it.
    #[error(transparent)]
    Completion(#[from] reef_complete::CompletionError),

    /// Results could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Results could not be serialized.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}
