//! Error types for the Cycles exporter.

use thiserror::Error;

/// Result type alias using ExportError.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Main error type for scene export operations.
///
/// Problems inside a shader graph (unknown node types, unsupported default
/// values) are not errors: the translator degrades per element and logs.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Failed to parse JSON scene data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read or encode an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Camera with a projection type outside the known set.
    #[error("Camera type {0:?} unknown")]
    UnknownCameraType(String),

    /// Light with a type outside the known set.
    #[error("Light type {0:?} unknown")]
    UnknownLightType(String),

    /// Object kind that cannot be written as geometry or light.
    #[error("Unsupported object type: {0}")]
    UnsupportedObjectType(String),

    /// Texture could not be embedded.
    #[error("Texture error: {0}")]
    Texture(String),
}
