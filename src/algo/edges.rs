//! Undirected edge enumeration.
//!
//! Every interior edge of a half-edge triangulation is stored twice, once per
//! adjacent triangle. The enumerator keeps exactly one representative per edge:
//! a half-edge is kept if it has no twin, or if its id is strictly smaller than its
//! twin's. A half-edge recorded as its own twin is therefore never emitted.
//! The choice depends only on ids, so the output order and representatives are
//! reproducible.
//!
//! A triangulation with `T` triangles and `B` boundary half-edges has
//! `(3T + B) / 2` undirected edges.

use nalgebra::Point2;

use crate::error::Result;
use crate::mesh::{HalfEdgeId, MeshIndex, Triangulation};

/// One undirected edge, named by its representative half-edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<I: MeshIndex = u32> {
    /// The representative half-edge.
    pub halfedge: HalfEdgeId<I>,
    /// The other half of the edge, absent on the boundary.
    pub twin: Option<HalfEdgeId<I>>,
}

impl<I: MeshIndex> Edge<I> {
    /// Check if the edge lies on the boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.twin.is_none()
    }
}

/// Iterator over the undirected edges of a triangulation.
pub struct EdgeIter<'a, I: MeshIndex = u32> {
    tri: &'a Triangulation<I>,
    current: usize,
}

impl<'a, I: MeshIndex> Iterator for EdgeIter<'a, I> {
    type Item = Result<Edge<I>>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current < self.tri.num_halfedges() {
            let halfedge = HalfEdgeId::new(self.current);
            self.current += 1;

            let twin = match self.tri.twin(halfedge) {
                Ok(twin) => twin,
                Err(e) => return Some(Err(e)),
            };
            match twin {
                Some(t) if t.index() <= halfedge.index() => continue,
                _ => return Some(Ok(Edge { halfedge, twin })),
            }
        }
        None
    }
}

/// Iterate over every undirected edge exactly once, in increasing order of the
/// representative half-edge.
pub fn edges<I: MeshIndex>(tri: &Triangulation<I>) -> EdgeIter<'_, I> {
    EdgeIter { tri, current: 0 }
}

/// Call `visit(e, twin)` once per undirected edge.
pub fn for_each_edge<I, F>(tri: &Triangulation<I>, mut visit: F) -> Result<()>
where
    I: MeshIndex,
    F: FnMut(HalfEdgeId<I>, Option<HalfEdgeId<I>>),
{
    for edge in edges(tri) {
        let edge = edge?;
        visit(edge.halfedge, edge.twin);
    }
    Ok(())
}

/// Call `visit(e, p, q)` once per undirected edge with the coordinates of its
/// start and end points.
pub fn for_each_edge_segment<I, F>(tri: &Triangulation<I>, mut visit: F) -> Result<()>
where
    I: MeshIndex,
    F: FnMut(HalfEdgeId<I>, Point2<f64>, Point2<f64>),
{
    for edge in edges(tri) {
        let e = edge?.halfedge;
        let p = tri.point(tri.point_of(e)?)?;
        let q = tri.point(tri.end_point_of(e)?)?;
        visit(e, p, q);
    }
    Ok(())
}

/// Number of undirected edges.
pub fn edge_count<I: MeshIndex>(tri: &Triangulation<I>) -> Result<usize> {
    let mut count = 0;
    for edge in edges(tri) {
        edge?;
        count += 1;
    }
    Ok(count)
}
