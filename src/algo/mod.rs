//! Traversal algorithms over a triangulation.
//!
//! - **Edges**: every undirected edge exactly once
//! - **Circulation**: the half-edges and triangles around a point, in rotational order
//! - **Voronoi**: dual points, Voronoi edges and Voronoi cells
//!
//! All functions take the triangulation by shared reference and keep no state
//! between calls.

pub mod circulate;
pub mod edges;
pub mod progress;
pub mod voronoi;

pub use progress::Progress;
