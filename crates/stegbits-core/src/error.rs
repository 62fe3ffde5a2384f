use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`StegError`], stable for callers that only
/// care about what went wrong and not about the details.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    CapacityExceeded,
    UnsupportedFormat,
    Io,
    ExternalTool,
    CorruptMedium,
    NotFound,
    InvalidInput,
}

#[derive(Error, Debug)]
pub enum StegError {
    /// Represents a bit depth outside of `1..=8`
    #[error("Bit depth must be between 1 and 8, got {0}")]
    InvalidBitDepth(u8),

    /// Represents a payload that does not fit into the carrier at the given depth
    #[error("Capacity Error: {needed} bytes are needed but the carrier only holds {available} bytes at this bit depth")]
    CapacityExceeded { needed: usize, available: usize },

    /// Represents a GIF frame that would need more colors than a GIF palette can hold
    #[error("Capacity Error: frame {frame} would need {colors} colors after hiding, a GIF frame holds at most 256")]
    PaletteExhausted { frame: usize, colors: usize },

    /// Represents an unsupported carrier media. For example, a text file
    #[error("Media format is not supported: {0}")]
    UnsupportedMedia(String),

    /// Represents a carrier that exists but cannot be parsed, for example a broken PNG file
    #[error("Media is corrupt or cannot be parsed: {0}")]
    CorruptMedium(String),

    /// Represents an unveil of no secret data
    #[error("No hidden message found")]
    NoSecretData,

    /// Represents a failure to read from input.
    #[error("Read error on {path:?}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Represents a failure to write target file.
    #[error("Write error on {path:?}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Represents a failing or missing transcoding tool
    #[error("External tool `{tool}` failed: {reason}")]
    ExternalTool { tool: String, reason: String },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No output folder set")]
    TargetNotSet,

    #[error("API Error: Missing payload")]
    MissingPayload,
}

impl StegError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StegError::CapacityExceeded { .. } | StegError::PaletteExhausted { .. } => {
                ErrorKind::CapacityExceeded
            }
            StegError::UnsupportedMedia(_) => ErrorKind::UnsupportedFormat,
            StegError::CorruptMedium(_) => ErrorKind::CorruptMedium,
            StegError::NoSecretData => ErrorKind::NotFound,
            StegError::ReadError { .. } | StegError::WriteError { .. } | StegError::IoError(_) => {
                ErrorKind::Io
            }
            StegError::ExternalTool { .. } => ErrorKind::ExternalTool,
            StegError::InvalidBitDepth(_)
            | StegError::CarrierNotSet
            | StegError::TargetNotSet
            | StegError::MissingPayload => ErrorKind::InvalidInput,
        }
    }

    pub(crate) fn external(tool: impl AsRef<std::path::Path>, reason: impl Into<String>) -> Self {
        StegError::ExternalTool {
            tool: tool.as_ref().display().to_string(),
            reason: reason.into(),
        }
    }
}

impl From<image::ImageError> for StegError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(e) => StegError::IoError(e),
            image::ImageError::Unsupported(e) => StegError::UnsupportedMedia(e.to_string()),
            other => StegError::CorruptMedium(other.to_string()),
        }
    }
}

impl From<hound::Error> for StegError {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(e) => StegError::IoError(e),
            hound::Error::Unsupported => {
                StegError::UnsupportedMedia("unsupported WAV sample format".to_string())
            }
            other => StegError::CorruptMedium(other.to_string()),
        }
    }
}
