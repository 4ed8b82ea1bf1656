//! Error types for target descriptor operations.

use std::path::PathBuf;

/// Errors that can occur while building, expanding, or loading targets.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// A name that does not belong to the axis's declared value set.
    #[error("unknown {axis} value: '{value}'")]
    UnknownValue {
        /// Axis the value was parsed for (e.g., "optimization").
        axis: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A template declares no bit on a flag axis, so it cannot be expanded.
    #[error("template {template} has no {axis} value set")]
    EmptyFlagAxis {
        /// The empty flag axis.
        axis: &'static str,
        /// Summary of the offending template.
        template: String,
    },

    /// Two distinct concrete targets resolve to the same directory name.
    #[error("targets {first} and {second} share directory '{directory}'")]
    DirectoryCollision {
        /// The shared directory name.
        directory: String,
        /// First target claiming the directory.
        first: String,
        /// Second target claiming the directory.
        second: String,
    },

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading a manifest.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest file not found.
    #[error("manifest not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Validation error in a manifest entry.
    #[error("validation error: {detail}")]
    Validation {
        /// Description of the validation failure.
        detail: String,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
