//! Errors raised while loading report inputs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{source_name} is not a valid analysis result: {source}")]
    InvalidResult {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ReportError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
