use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::remote_url::RemoteUrlError;
use crate::infrastructure::vcs::VcsError;

#[derive(Error, Debug)]
pub enum GroveError {
    #[error("{} is not under any known root", path.display())]
    RootMismatch { path: PathBuf },

    #[error("Invalid repository path {}: {message}", path.display())]
    InvalidRepositoryPath { message: String, path: PathBuf },

    #[error("Invalid remote URL: {source}")]
    InvalidUrl {
        #[from]
        source: RemoteUrlError,
    },

    #[error("Unknown VCS: {0}")]
    UnknownVcs(String),

    #[error(transparent)]
    Vcs(#[from] VcsError),

    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl GroveError {
    pub fn root_mismatch(path: impl Into<PathBuf>) -> Self {
        Self::RootMismatch { path: path.into() }
    }

    pub fn invalid_repository_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::InvalidRepositoryPath {
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn serialization_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Whether the error was raised before any external process was spawned
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::RootMismatch { .. }
                | Self::InvalidRepositoryPath { .. }
                | Self::InvalidUrl { .. }
                | Self::UnknownVcs(_)
                | Self::Vcs(VcsError::UnsupportedOperation { .. })
        )
    }
}

impl From<serde_yaml::Error> for GroveError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::serialization_error_with_source("YAML serialization failed", error)
    }
}

impl From<serde_json::Error> for GroveError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization_error_with_source("JSON serialization failed", error)
    }
}
