//! # dualmesh
//!
//! Traversal and dual construction for planar triangulations in compact
//! half-edge form.
//!
//! A Delaunay triangulation engine typically hands back three arrays: the input
//! points, `triangles` (three point ids per triangle) and `halfedges` (the
//! opposite half-edge of each half-edge, or a boundary marker). dualmesh wraps
//! those arrays without copying them into a richer structure and derives:
//!
//! - **Half-edge arithmetic**: `next`, `prev`, `twin`, `triangle_of`, `point_of`
//! - **Triangle geometry**: corners and a dual point (circumcenter, centroid or incenter)
//! - **Edges**: every undirected edge exactly once
//! - **Circulation**: the half-edges and triangles around a point, stopping at the boundary
//! - **Voronoi diagram**: Voronoi edges and one cell polygon per point
//!
//! The triangulation itself is not computed here.
//!
//! ## Quick Start
//!
//! ```
//! use dualmesh::prelude::*;
//! use nalgebra::Point2;
//!
//! // Two triangles forming a unit square, as a triangulation engine reports them.
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let tri: Triangulation =
//!     Triangulation::from_signed(points, &[0, 1, 2, 0, 2, 3], &[-1, -1, 3, 2, -1, -1]).unwrap();
//!
//! // Half-edge arithmetic
//! let e = HalfEdgeId::new(2);
//! assert_eq!(tri.next(e).unwrap(), HalfEdgeId::new(0));
//! assert_eq!(tri.twin(e).unwrap(), Some(HalfEdgeId::new(3)));
//!
//! // Each undirected edge once
//! let mut count = 0;
//! for_each_edge(&tri, |_, _| count += 1).unwrap();
//! assert_eq!(count, 5);
//!
//! // Voronoi cells
//! let cells = voronoi_cells(&tri, &VoronoiOptions::default()).unwrap();
//! assert_eq!(cells.len(), 4);
//! ```
//!
//! ## Circulation
//!
//! ```
//! use dualmesh::prelude::*;
//! use nalgebra::Point2;
//!
//! # let points = vec![
//! #     Point2::new(0.0, 0.0),
//! #     Point2::new(1.0, 0.0),
//! #     Point2::new(1.0, 1.0),
//! #     Point2::new(0.0, 1.0),
//! # ];
//! # let tri: Triangulation =
//! #     Triangulation::from_signed(points, &[0, 1, 2, 0, 2, 3], &[-1, -1, 3, 2, -1, -1]).unwrap();
//! let index = PointIndex::build(&tri).unwrap();
//! let start = index.get(PointId::new(0)).unwrap();
//!
//! let fan = edges_around_point(&tri, start).unwrap();
//! assert!(!fan.is_closed()); // point 0 is on the boundary
//! assert_eq!(fan.triangles(&tri).unwrap().len(), 2);
//! ```
//!
//! ## Errors
//!
//! Every query validates its ids and returns [`MeshError`] instead of panicking.
//! A circulation that neither closes nor reaches the boundary within the
//! triangle count reports [`MeshError::CirculationOverflow`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use dualmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::circulate::{
        circulate, edges_around_point, triangles_around_point, Fan, PointIndex, Termination,
    };
    pub use crate::algo::edges::{edges, for_each_edge, for_each_edge_segment, Edge};
    pub use crate::algo::voronoi::{
        for_each_cell, for_each_voronoi_edge, voronoi_cells, VoronoiCell, VoronoiOptions,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{DualPoint, HalfEdgeId, MeshIndex, PointId, TriangleId, Triangulation};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
