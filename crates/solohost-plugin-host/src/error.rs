use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or managing the hosted plugin.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no registered plugin format recognizes {0}")]
    FormatNotRecognized(PathBuf),
    #[error("matched format failed to instantiate plugin from {path}")]
    InstantiationFailed {
        path: PathBuf,
        #[source]
        source: Box<HostError>,
    },
    #[error("plugin binary not found at {0}")]
    MissingBinary(PathBuf),
    #[error("{path}: missing entry point `{symbol}`")]
    MissingEntryPoint { path: PathBuf, symbol: &'static str },
    #[error("failed to load plugin library: {0}")]
    LibraryLoad(#[from] libloading::Error),
}

impl HostError {
    pub(crate) fn missing_entry(path: PathBuf, symbol: &'static str) -> Self {
        HostError::MissingEntryPoint { path, symbol }
    }
}
