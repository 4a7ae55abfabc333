use std::path::PathBuf;
use thiserror::Error;

/// Failures that end a tagging or organizing run
#[derive(Debug, Error)]
pub enum OrganizerError {
    /// A collaborator reply lacks the structure we expect
    #[error("Malformed response: {reason}")]
    MalformedResponse { reason: String },

    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The inference service could not be reached or refused the request
    #[error("Inference service error: {reason}")]
    Service { reason: String },

    #[error("Unsafe folder name {name:?}: {reason}")]
    UnsafeFolderName { name: String, reason: String },

    #[error("Destination already exists: {}", .path.display())]
    DestinationOccupied { path: PathBuf },
}

impl OrganizerError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    pub fn service(reason: impl Into<String>) -> Self {
        Self::Service {
            reason: reason.into(),
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}
