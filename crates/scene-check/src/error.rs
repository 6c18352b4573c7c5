//! Error types for check operations.

use thiserror::Error;

/// Result type alias for check operations.
pub type CheckResult<T> = Result<T, CheckError>;

/// Errors that can occur while querying or mutating scene geometry.
///
/// The validators have no recovery strategy for these: they propagate
/// to the caller uncaught, and objects mutated earlier in a selection
/// loop stay mutated.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The selection named an object the scene does not contain.
    #[error("unknown object: {name:?}")]
    UnknownObject { name: String },

    /// A face index was out of range for the object's mesh.
    #[error("face index {face} out of range for {object:?} ({count} faces)")]
    FaceOutOfRange {
        object: String,
        face: usize,
        count: usize,
    },

    /// A vertex index was out of range for the object's mesh.
    #[error("vertex index {vertex} out of range for {object:?} ({count} vertices)")]
    VertexOutOfRange {
        object: String,
        vertex: usize,
        count: usize,
    },
}
