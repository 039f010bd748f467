//! Error types and context management for mosaic operations

use image::ColorType;
use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to decode an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Image carries an alpha channel where plain RGB or grayscale is required
    UnsupportedImageFormat {
        /// Image the pixels came from, when known
        path: Option<PathBuf>,
        /// Color layout that was rejected
        color_type: ColorType,
    },

    /// Run configuration cannot produce a valid mosaic
    InvalidConfiguration {
        /// Name of the offending setting
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// No tile survived loading and profiling
    EmptyTileSet {
        /// Directory the tiles were read from
        directory: PathBuf,
    },

    /// Failed to save the composed mosaic to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::UnsupportedImageFormat { path, color_type } => match path {
                Some(path) => write!(
                    f,
                    "Unsupported image format in '{}': {color_type:?} has an alpha channel, image must be RGB",
                    path.display()
                ),
                None => write!(
                    f,
                    "Unsupported image format: {color_type:?} has an alpha channel, image must be RGB"
                ),
            },
            Self::InvalidConfiguration {
                parameter,
                value,
                reason,
            } => {
                write!(
                    f,
                    "Invalid configuration '{parameter}' = '{value}': {reason}"
                )
            }
            Self::EmptyTileSet { directory } => {
                write!(
                    f,
                    "No usable tile images found in '{}'",
                    directory.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Attaches the file being processed to errors raised without one
pub trait WithContext<T> {
    /// Record `path` on errors that do not already name a file
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<MosaicError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| match e.into() {
            MosaicError::UnsupportedImageFormat {
                path: None,
                color_type,
            } => MosaicError::UnsupportedImageFormat {
                path: Some(path.to_path_buf()),
                color_type,
            },
            MosaicError::ImageLoad { path: unknown, source } if unknown.as_os_str().is_empty() => {
                MosaicError::ImageLoad {
                    path: path.to_path_buf(),
                    source,
                }
            }
            other => other,
        })
    }
}

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid configuration error
pub fn invalid_configuration(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidConfiguration {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> MosaicError {
    MosaicError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
