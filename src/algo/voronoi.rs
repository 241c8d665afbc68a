//! Voronoi diagram as the dual of a triangulation.
//!
//! Each triangle contributes one dual point (its circumcenter by default). The
//! Voronoi cell of an input point is the polygon formed by the dual points of the
//! triangles around it, in rotational order. Each interior edge contributes one
//! Voronoi edge between the dual points of its two triangles.
//!
//! Points on the boundary of the triangulation have unbounded Voronoi cells. Their
//! polygon is returned open ([`VoronoiCell::closed`] is false) and covers only the
//! finite part; clipping against a bounding region is left to the caller.
//!
//! # Example
//!
//! ```
//! use dualmesh::algo::voronoi::{voronoi_cells, VoronoiOptions};
//! use dualmesh::mesh::Triangulation;
//! use nalgebra::Point2;
//!
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let tri: Triangulation =
//!     Triangulation::from_signed(points, &[0, 1, 2, 0, 2, 3], &[-1, -1, 3, 2, -1, -1]).unwrap();
//!
//! let cells = voronoi_cells(&tri, &VoronoiOptions::default()).unwrap();
//! assert_eq!(cells.len(), 4);
//! assert!(cells.iter().all(|c| !c.closed));
//! ```

use std::time::Instant;

use nalgebra::Point2;
use rayon::prelude::*;

use super::circulate::{edges_around_point, PointIndex};
use super::edges::edges;
use super::Progress;
use crate::error::Result;
use crate::mesh::{DualPoint, HalfEdgeId, MeshIndex, PointId, TriangleId, Triangulation};

/// Points handled between two progress reports.
const PROGRESS_CHUNK: usize = 4096;

/// Options for Voronoi construction.
///
/// One options value is used for every cell of a construction, so adjacent cells
/// always agree on the shared dual points.
#[derive(Debug, Clone)]
pub struct VoronoiOptions {
    /// Formula for the per-triangle dual point (default: circumcenter).
    pub dual: DualPoint,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for VoronoiOptions {
    fn default() -> Self {
        Self {
            dual: DualPoint::Circumcenter,
            parallel: true,
        }
    }
}

impl VoronoiOptions {
    /// Use the given dual point formula.
    pub fn with_dual(mut self, dual: DualPoint) -> Self {
        self.dual = dual;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// The Voronoi cell of one input point.
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell<I: MeshIndex = u32> {
    /// The input point this cell belongs to.
    pub point: PointId<I>,
    /// Polygon vertices (dual points), in rotational order.
    pub vertices: Vec<Point2<f64>>,
    /// The triangle each vertex comes from.
    pub triangles: Vec<TriangleId<I>>,
    /// False for boundary points, whose polygon is open.
    pub closed: bool,
}

impl<I: MeshIndex> VoronoiCell<I> {
    /// Number of polygon vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if the cell has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Build the cell of a single point from a half-edge ending at it.
pub fn cell_from_halfedge<I: MeshIndex>(
    tri: &Triangulation<I>,
    incoming: HalfEdgeId<I>,
    dual: DualPoint,
) -> Result<VoronoiCell<I>> {
    let fan = edges_around_point(tri, incoming)?;
    let triangles = fan.triangles(tri)?;
    let vertices = triangles
        .iter()
        .map(|&t| tri.dual_point_of(t, dual))
        .collect::<Result<Vec<_>>>()?;

    Ok(VoronoiCell {
        point: tri.end_point_of(incoming)?,
        vertices,
        triangles,
        closed: fan.is_closed(),
    })
}

fn build_cell<I: MeshIndex>(
    tri: &Triangulation<I>,
    index: &PointIndex<I>,
    dual: DualPoint,
    p: usize,
) -> Result<Option<VoronoiCell<I>>> {
    index
        .get(PointId::new(p))
        .map(|incoming| cell_from_halfedge(tri, incoming, dual))
        .transpose()
}

fn build_range<I: MeshIndex>(
    tri: &Triangulation<I>,
    index: &PointIndex<I>,
    options: &VoronoiOptions,
    range: std::ops::Range<usize>,
) -> Result<Vec<Option<VoronoiCell<I>>>> {
    if options.parallel {
        range
            .into_par_iter()
            .map(|p| build_cell(tri, index, options.dual, p))
            .collect()
    } else {
        range
            .map(|p| build_cell(tri, index, options.dual, p))
            .collect()
    }
}

/// Call `visit(point, cell)` for every point that has at least one incident
/// triangle, in increasing point order. Runs sequentially.
pub fn for_each_cell<I, F>(
    tri: &Triangulation<I>,
    options: &VoronoiOptions,
    mut visit: F,
) -> Result<()>
where
    I: MeshIndex,
    F: FnMut(PointId<I>, &VoronoiCell<I>),
{
    let index = PointIndex::build(tri)?;
    for p in tri.point_ids() {
        if let Some(cell) = build_cell(tri, &index, options.dual, p.index())? {
            visit(p, &cell);
        }
    }
    Ok(())
}

/// Compute the Voronoi cells of all points that have at least one incident
/// triangle, ordered by point id.
pub fn voronoi_cells<I: MeshIndex>(
    tri: &Triangulation<I>,
    options: &VoronoiOptions,
) -> Result<Vec<VoronoiCell<I>>> {
    voronoi_cells_with_progress(tri, options, &Progress::none())
}

/// Compute the Voronoi cells with progress reporting.
pub fn voronoi_cells_with_progress<I: MeshIndex>(
    tri: &Triangulation<I>,
    options: &VoronoiOptions,
    progress: &Progress,
) -> Result<Vec<VoronoiCell<I>>> {
    let start = Instant::now();
    let n = tri.num_points();
    let index = PointIndex::build(tri)?;

    let mut cells = Vec::with_capacity(n);
    for range in progress.chunks(n, PROGRESS_CHUNK, "Building Voronoi cells") {
        cells.extend(build_range(tri, &index, options, range)?.into_iter().flatten());
    }

    log::debug!(
        "built {} Voronoi cells ({} closed) from {} points in {:.2?}",
        cells.len(),
        cells.iter().filter(|c| c.closed).count(),
        n,
        start.elapsed()
    );
    Ok(cells)
}

/// Call `visit(e, a, b)` once per interior edge, where `a` and `b` are the dual
/// points of the triangles on either side of half-edge `e`.
pub fn for_each_voronoi_edge<I, F>(
    tri: &Triangulation<I>,
    options: &VoronoiOptions,
    mut visit: F,
) -> Result<()>
where
    I: MeshIndex,
    F: FnMut(HalfEdgeId<I>, Point2<f64>, Point2<f64>),
{
    for edge in edges(tri) {
        let edge = edge?;
        let Some(twin) = edge.twin else {
            continue;
        };
        let a = tri.dual_point_of(tri.triangle_of(edge.halfedge)?, options.dual)?;
        let b = tri.dual_point_of(tri.triangle_of(twin)?, options.dual)?;
        visit(edge.halfedge, a, b);
    }
    Ok(())
}

/// Call `visit(t, point)` with the dual point of every triangle.
pub fn for_each_dual_point<I, F>(
    tri: &Triangulation<I>,
    options: &VoronoiOptions,
    mut visit: F,
) -> Result<()>
where
    I: MeshIndex,
    F: FnMut(TriangleId<I>, Point2<f64>),
{
    for t in tri.triangle_ids() {
        visit(t, tri.dual_point_of(t, options.dual)?);
    }
    Ok(())
}

/// Dual points of all triangles, indexed by triangle id.
pub fn dual_points<I: MeshIndex>(
    tri: &Triangulation<I>,
    options: &VoronoiOptions,
) -> Result<Vec<Point2<f64>>> {
    if options.parallel {
        (0..tri.num_triangles())
            .into_par_iter()
            .map(|t| tri.dual_point_of(TriangleId::new(t), options.dual))
            .collect()
    } else {
        tri.triangle_ids()
            .map(|t| tri.dual_point_of(t, options.dual))
            .collect()
    }
}
