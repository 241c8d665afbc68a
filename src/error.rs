//! Error types for dualmesh.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during triangulation queries.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A half-edge id lies outside `[0, 3T)`.
    #[error("half-edge {id} is out of range (mesh has {len} half-edges)")]
    HalfEdgeOutOfRange {
        /// The offending id.
        id: usize,
        /// Number of half-edges in the mesh.
        len: usize,
    },

    /// A triangle id lies outside `[0, T)`.
    #[error("triangle {id} is out of range (mesh has {len} triangles)")]
    TriangleOutOfRange {
        /// The offending id.
        id: usize,
        /// Number of triangles in the mesh.
        len: usize,
    },

    /// A point id lies outside `[0, N)`.
    #[error("point {id} is out of range (mesh has {len} points)")]
    PointOutOfRange {
        /// The offending id.
        id: usize,
        /// Number of points in the mesh.
        len: usize,
    },

    /// Circulation around a point did not close or reach the boundary
    /// within the triangle-count bound. The half-edge array is malformed.
    #[error("circulation from half-edge {start} exceeded {bound} steps (malformed twins)")]
    CirculationOverflow {
        /// The half-edge the walk started from.
        start: usize,
        /// The step bound that was exceeded.
        bound: usize,
    },

    /// The raw arrays do not describe a triangle list.
    #[error("invalid array shape: {details}")]
    ArrayShape {
        /// Description of the shape mismatch.
        details: String,
    },

    /// An input value does not fit in the chosen index type.
    #[error("value {value} does not fit the index type (max {max})")]
    IndexOverflow {
        /// The value that overflowed.
        value: usize,
        /// Largest representable index.
        max: usize,
    },

    /// Two half-edges disagree about being each other's twin.
    #[error("half-edge {halfedge} names {twin} as twin, but the pair is not mutual")]
    InconsistentTwin {
        /// The half-edge being checked.
        halfedge: usize,
        /// The twin it names.
        twin: usize,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading a triangulation from a file.
    #[error("failed to load triangulation from {path} (line {line}): {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// 1-based line number, or 0 when not tied to a line.
        line: usize,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create an array shape error.
    pub(crate) fn shape(details: impl Into<String>) -> Self {
        MeshError::ArrayShape {
            details: details.into(),
        }
    }
}
