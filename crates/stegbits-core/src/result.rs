use std::path::PathBuf;

use crate::StegError;

pub type Result<T, E = StegError> = std::result::Result<T, E>;

/// Outcome of a [`commands`](crate::commands) call, never an error.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OperationResult {
    pub status: bool,
    pub message: String,
    pub output_file_path: Option<PathBuf>,
}

impl OperationResult {
    pub fn success(message: impl Into<String>, output_file_path: Option<PathBuf>) -> Self {
        Self {
            status: true,
            message: message.into(),
            output_file_path,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            output_file_path: None,
        }
    }
}

impl From<StegError> for OperationResult {
    fn from(e: StegError) -> Self {
        log::error!("{e}");
        Self::failure(e.to_string())
    }
}
