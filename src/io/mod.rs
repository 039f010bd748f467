//! Input/output operations and error handling

/// Command-line parsing and the end-to-end mosaic run
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Image decoding, normalization and export
pub mod image;
/// Progress reporting for long-running phases
pub mod progress;
