//! Content loading errors.

use std::path::PathBuf;

use ironhold_core::error::DomainError;
use thiserror::Error;

/// Why a content table could not be loaded.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The table file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file (or directory) that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The table text is not well-formed JSON or YAML for its record type.
    #[error("failed to parse {table}: {message}")]
    Parse {
        /// Table name, e.g. `locations`.
        table: &'static str,
        /// Parser message.
        message: String,
    },

    /// The table parsed but breaks a content rule.
    #[error("invalid {table}: {message}")]
    Invalid {
        /// Table name, e.g. `npcs`.
        table: &'static str,
        /// What is wrong.
        message: String,
    },
}

impl ContentError {
    pub(crate) fn invalid(table: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            table,
            message: message.into(),
        }
    }
}

impl From<ContentError> for DomainError {
    fn from(err: ContentError) -> Self {
        Self::DataUnavailable(err.to_string())
    }
}
