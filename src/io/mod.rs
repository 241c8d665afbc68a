//! Triangulation file I/O.
//!
//! This module loads and saves the raw output of a triangulation engine: the
//! point list plus the `triangles` and `halfedges` arrays. It is plumbing for the
//! command-line tool and tests; the traversal API never touches files.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | Plain text | `.tri` | ✓ | ✓ | `v`/`t`/`h` records, see [`tri`] |
//!
//! # Usage
//!
//! ```no_run
//! use dualmesh::io::{load, save};
//! use dualmesh::mesh::Triangulation;
//!
//! let tri: Triangulation = load("points.tri").unwrap();
//! save(&tri, "copy.tri").unwrap();
//! ```

pub mod tri;

use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::{MeshIndex, Triangulation};

/// Supported triangulation file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Plain-text `v`/`t`/`h` records.
    Tri,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "tri" | "txt" => Some(Format::Tri),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

fn detect(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a triangulation with automatic format detection.
///
/// The format is determined by the file extension.
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<Triangulation<I>> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Tri => tri::load(path),
    }
}

/// Save a triangulation with automatic format detection.
///
/// The format is determined by the file extension.
pub fn save<P: AsRef<Path>, I: MeshIndex>(tri: &Triangulation<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Tri => tri::save(tri, path),
    }
}
