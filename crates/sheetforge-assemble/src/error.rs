//! Errors produced by an assembly run.

use std::path::PathBuf;

use thiserror::Error;

/// Coarse error category, stable across releases for machine-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input folder structure or parameters.
    Configuration,
    /// A frame file could not be decoded.
    ImageLoad,
    /// An output directory or file could not be written.
    Io,
    /// Nothing to lay out.
    Layout,
    /// The run was cancelled between rows.
    Cancelled,
}

impl ErrorKind {
    /// Returns the error code string (e.g., "A001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "A001",
            ErrorKind::ImageLoad => "A002",
            ErrorKind::Io => "A003",
            ErrorKind::Layout => "A004",
            ErrorKind::Cancelled => "A005",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that abort an assembly run.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// Input folder structure or parameters are unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A frame exists but could not be opened or decoded.
    #[error("failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Filesystem failure while creating or writing outputs.
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding a canvas failed.
    #[error("failed to encode '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// No rows were produced from the input folder.
    #[error("layout error: {0}")]
    Layout(String),

    /// The cancellation token fired.
    #[error("assembly cancelled")]
    Cancelled,
}

impl AssembleError {
    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssembleError::Configuration(_) => ErrorKind::Configuration,
            AssembleError::ImageLoad { .. } => ErrorKind::ImageLoad,
            AssembleError::Io { .. } | AssembleError::Encode { .. } => ErrorKind::Io,
            AssembleError::Layout(_) => ErrorKind::Layout,
            AssembleError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

/// Result alias for assembly operations.
pub type AssembleResult<T> = Result<T, AssembleError>;
