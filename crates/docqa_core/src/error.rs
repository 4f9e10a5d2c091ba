use std::path::PathBuf;

use thiserror::Error;

/// Persisted store artifacts exist but cannot be trusted.
///
/// A missing store is not an error anywhere in this workspace; loading one
/// that is present but inconsistent is, and is never silently ignored.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("corrupt store at {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("store io at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure talking to an external embedding or synthesis provider.
///
/// Callers recover locally by falling back to the offline path; this never
/// escapes `embed` or `answer`.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("missing credential for {provider}")]
    MissingCredential { provider: String },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed provider payload: {0}")]
    MalformedResponse(String),
}

/// A single document could not be turned into text. Ingestion skips the
/// document with a warning and continues with the rest of the corpus.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("pdf extraction failed for {}: {reason}", path.display())]
    Pdf { path: PathBuf, reason: String },

    #[error("unsupported document type: {}", path.display())]
    Unsupported { path: PathBuf },
}
