use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeclutterError {
    #[error("Input playlist {0} not found or not readable")]
    InputNotFound(PathBuf),

    #[error("Failed to read input playlist {input}: {source}")]
    InputRead {
        input: String,
        #[source]
        source: io::Error,
    },

    #[error("Input playlist is not valid UTF-8 (line {line})")]
    InvalidEncoding { line: usize },

    #[error("Failed to write output playlist {output}: {source}")]
    OutputWrite {
        output: String,
        #[source]
        source: io::Error,
    },
}

impl DeclutterError {
    pub(crate) fn from_read(input: &Path, source: io::Error) -> Self {
        match source.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied | ErrorKind::IsADirectory => {
                Self::InputNotFound(input.to_path_buf())
            }
            _ => Self::InputRead {
                input: input.display().to_string(),
                source,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::InputNotFound(_))
    }

    pub fn is_output_failure(&self) -> bool {
        matches!(self, Self::OutputWrite { .. })
    }

    /// Faults that are neither a missing input nor an output failure
    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::InputRead { .. } | Self::InvalidEncoding { .. })
    }
}
