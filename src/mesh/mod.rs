//! Core triangulation data structures.
//!
//! This module provides the compact half-edge representation of a planar
//! triangulation as produced by a Delaunay triangulation engine, together with
//! per-triangle geometry.
//!
//! # Overview
//!
//! The primary type is [`Triangulation`], a read-only view over three arrays:
//! points, `triangles` (start point of every half-edge) and `halfedges` (twin of
//! every half-edge). All adjacency is index arithmetic, so every query is O(1).
//!
//! # Index Types
//!
//! Elements are identified by type-safe index wrappers:
//! - [`PointId`] - Identifies an input point
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`TriangleId`] - Identifies a triangle
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! ```
//! use dualmesh::mesh::Triangulation;
//! use nalgebra::Point2;
//!
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let triangles = vec![0, 1, 2, 0, 2, 3];
//! let halfedges = vec![None, None, Some(3), Some(2), None, None];
//!
//! let tri: Triangulation = Triangulation::new(points, triangles, halfedges).unwrap();
//! assert_eq!(tri.num_triangles(), 2);
//! ```

mod geometry;
mod halfedge;
mod index;

#[cfg(test)]
pub(crate) mod fixtures;

pub use geometry::{centroid, circumcenter, incenter, DualPoint};
pub use halfedge::Triangulation;
pub use index::{HalfEdgeId, MeshIndex, PointId, TriangleId};
