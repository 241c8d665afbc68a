//! Circulation around a point.
//!
//! Given a half-edge `e` that ends at point `p`, `next(e)` leaves `p` inside the
//! same triangle and `twin(next(e))` enters `p` again from the neighbouring
//! triangle. Repeating that step visits every triangle around `p` in rotational
//! order. The walk stops when:
//!
//! - it comes back to the starting half-edge: `p` is interior and the fan is closed;
//! - `next(e)` has no twin: `p` is on the boundary and the fan is open.
//!
//! Starting a boundary point's walk from its incoming boundary half-edge (one with
//! no twin) makes the open fan cover every incident triangle; [`PointIndex`] picks
//! such a start for each point.
//!
//! A point of a well-formed triangulation touches at most `T` triangles, so a walk
//! longer than `T` steps proves the half-edge array is malformed. The circulation
//! then yields [`MeshError::CirculationOverflow`] and stops.
//!
//! # Example
//!
//! ```
//! use dualmesh::algo::circulate::edges_around_point;
//! use dualmesh::mesh::{HalfEdgeId, Triangulation};
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
//! // Half-edge 5 runs 3 -> 0 along the boundary.
//! let fan = edges_around_point(&tri, HalfEdgeId::new(5)).unwrap();
//! assert!(!fan.is_closed());
//! assert_eq!(fan.halfedges(), &[HalfEdgeId::new(5), HalfEdgeId::new(2)]);
//! ```

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeId, MeshIndex, PointId, TriangleId, Triangulation};

/// How a circulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The walk returned to its start; the point is interior.
    Closed,
    /// The walk reached a half-edge without twin; the point is on the boundary.
    Boundary,
}

/// Lazy walk over the half-edges entering one point.
///
/// Each item is a half-edge ending at the circulated point. Dropping the iterator
/// early is fine; nothing is shared between walks.
pub struct Circulation<'a, I: MeshIndex = u32> {
    tri: &'a Triangulation<I>,
    start: HalfEdgeId<I>,
    current: Option<HalfEdgeId<I>>,
    steps: usize,
    termination: Option<Termination>,
}

impl<'a, I: MeshIndex> Circulation<'a, I> {
    /// Start a walk from `start`, a half-edge ending at the point of interest.
    pub fn new(tri: &'a Triangulation<I>, start: HalfEdgeId<I>) -> Result<Self> {
        tri.next(start)?;
        Ok(Self {
            tri,
            start,
            current: Some(start),
            steps: 0,
            termination: None,
        })
    }

    /// How the walk ended, once it has.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Maximum number of half-edges a walk may yield.
    #[inline]
    fn bound(&self) -> usize {
        self.tri.num_triangles()
    }

    fn advance(&self, incoming: HalfEdgeId<I>) -> Result<Option<HalfEdgeId<I>>> {
        let outgoing = self.tri.next(incoming)?;
        self.tri.twin(outgoing)
    }
}

impl<'a, I: MeshIndex> Iterator for Circulation<'a, I> {
    type Item = Result<HalfEdgeId<I>>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;

        if self.steps == self.bound() {
            log::warn!(
                "circulation from half-edge {} did not terminate within {} steps",
                self.start,
                self.bound()
            );
            return Some(Err(MeshError::CirculationOverflow {
                start: self.start.index(),
                bound: self.bound(),
            }));
        }
        self.steps += 1;

        match self.advance(current) {
            Err(e) => return Some(Err(e)),
            Ok(None) => self.termination = Some(Termination::Boundary),
            Ok(Some(e)) if e == self.start => self.termination = Some(Termination::Closed),
            Ok(Some(e)) => self.current = Some(e),
        }
        Some(Ok(current))
    }
}

/// A fully walked circulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fan<I: MeshIndex = u32> {
    halfedges: Vec<HalfEdgeId<I>>,
    closed: bool,
}

impl<I: MeshIndex> Fan<I> {
    /// The incoming half-edges, in rotational order.
    pub fn halfedges(&self) -> &[HalfEdgeId<I>] {
        &self.halfedges
    }

    /// True if the walk returned to its start (interior point).
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of triangles around the point.
    pub fn len(&self) -> usize {
        self.halfedges.len()
    }

    /// Always false for a fan produced by a walk.
    pub fn is_empty(&self) -> bool {
        self.halfedges.is_empty()
    }

    /// The triangles around the point, in the same order.
    pub fn triangles(&self, tri: &Triangulation<I>) -> Result<Vec<TriangleId<I>>> {
        self.halfedges.iter().map(|&e| tri.triangle_of(e)).collect()
    }

    /// The outgoing half-edges (each `next` of an incoming one); these start at
    /// the circulated point.
    pub fn outgoing(&self, tri: &Triangulation<I>) -> Result<Vec<HalfEdgeId<I>>> {
        self.halfedges.iter().map(|&e| tri.next(e)).collect()
    }

    /// The point the fan surrounds.
    pub fn point(&self, tri: &Triangulation<I>) -> Result<Option<PointId<I>>> {
        self.halfedges
            .first()
            .map(|&e| tri.end_point_of(e))
            .transpose()
    }
}

/// Start a lazy circulation from a half-edge ending at the point of interest.
pub fn circulate<I: MeshIndex>(
    tri: &Triangulation<I>,
    start: HalfEdgeId<I>,
) -> Result<Circulation<'_, I>> {
    Circulation::new(tri, start)
}

/// Walk all the way around the point `start` ends at.
///
/// # Errors
/// Returns [`MeshError::HalfEdgeOutOfRange`] for a bad start or dangling twin, and
/// [`MeshError::CirculationOverflow`] if the walk exceeds the triangle count.
pub fn edges_around_point<I: MeshIndex>(
    tri: &Triangulation<I>,
    start: HalfEdgeId<I>,
) -> Result<Fan<I>> {
    let mut walk = Circulation::new(tri, start)?;
    let halfedges = walk.by_ref().collect::<Result<Vec<_>>>()?;
    Ok(Fan {
        halfedges,
        closed: walk.termination() == Some(Termination::Closed),
    })
}

/// Find a half-edge ending at `p`, preferring one without twin.
///
/// This is a linear scan; use [`PointIndex`] when circulating many points.
/// Returns `None` for a point that no triangle uses.
pub fn incoming_halfedge<I: MeshIndex>(
    tri: &Triangulation<I>,
    p: PointId<I>,
) -> Result<Option<HalfEdgeId<I>>> {
    tri.point(p)?;
    let mut found = None;
    for e in tri.halfedge_ids() {
        if tri.end_point_of(e)? == p {
            if tri.is_boundary(e)? {
                return Ok(Some(e));
            }
            found.get_or_insert(e);
        }
    }
    Ok(found)
}

/// Triangles around a point in rotational order; empty for an unused point.
pub fn triangles_around_point<I: MeshIndex>(
    tri: &Triangulation<I>,
    p: PointId<I>,
) -> Result<Vec<TriangleId<I>>> {
    match incoming_halfedge(tri, p)? {
        Some(start) => edges_around_point(tri, start)?.triangles(tri),
        None => Ok(Vec::new()),
    }
}

/// Point-to-half-edge lookup table for starting circulations.
///
/// For each point, stores one half-edge ending at it. When the point is on the
/// boundary the stored half-edge is the one without twin, so a walk from it sweeps
/// the whole open fan.
#[derive(Debug, Clone)]
pub struct PointIndex<I: MeshIndex = u32> {
    incoming: Vec<HalfEdgeId<I>>,
}

impl<I: MeshIndex> PointIndex<I> {
    /// Build the table in one pass over the half-edges.
    pub fn build(tri: &Triangulation<I>) -> Result<Self> {
        let mut incoming = vec![HalfEdgeId::invalid(); tri.num_points()];
        for e in tri.halfedge_ids() {
            let p = tri.end_point_of(e)?;
            let slot = incoming
                .get_mut(p.index())
                .ok_or(MeshError::PointOutOfRange {
                    id: p.index(),
                    len: tri.num_points(),
                })?;
            if !slot.is_valid() || tri.is_boundary(e)? {
                *slot = e;
            }
        }
        Ok(Self { incoming })
    }

    /// A half-edge ending at `p`, or `None` if no triangle uses the point.
    #[inline]
    pub fn get(&self, p: PointId<I>) -> Option<HalfEdgeId<I>> {
        self.incoming
            .get(p.index())
            .copied()
            .filter(|e| e.is_valid())
    }

    /// Number of points covered by the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.incoming.len()
    }

    /// True if the triangulation has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.incoming.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures;
    use std::collections::HashSet;

    fn he(i: usize) -> HalfEdgeId {
        HalfEdgeId::new(i)
    }

    #[test]
    fn test_interior_point_closes() {
        let tri = fixtures::hexagon_fan();
        let fan = edges_around_point(&tri, he(2)).unwrap();

        assert!(fan.is_closed());
        assert_eq!(fan.len(), 6);
        assert_eq!(
            fan.halfedges(),
            &[he(2), he(17), he(14), he(11), he(8), he(5)]
        );
        assert_eq!(fan.point(&tri).unwrap(), Some(PointId::new(0)));
        for e in fan.outgoing(&tri).unwrap() {
            assert_eq!(tri.point_of(e).unwrap(), PointId::new(0));
        }
    }

    #[test]
    fn test_interior_from_any_start() {
        let tri = fixtures::hexagon_fan();
        for i in 0..6 {
            let start = he(3 * i + 2);
            let fan = edges_around_point(&tri, start).unwrap();
            assert!(fan.is_closed());
            assert_eq!(fan.len(), 6);
            assert_eq!(fan.halfedges()[0], start);
            assert!(fan.len() <= tri.num_triangles());
        }
    }

    #[test]
    fn test_square_corners_off_shared_edge() {
        let tri = fixtures::square();
        let index = PointIndex::build(&tri).unwrap();

        for p in [1, 3] {
            let start = index.get(PointId::new(p)).unwrap();
            let mut walk = circulate(&tri, start).unwrap();
            let visited: Vec<_> = walk.by_ref().collect::<Result<_>>().unwrap();
            assert_eq!(visited.len(), 1);
            assert_eq!(walk.termination(), Some(Termination::Boundary));
        }
    }

    #[test]
    fn test_square_corners_on_shared_edge() {
        let tri = fixtures::square();
        let index = PointIndex::build(&tri).unwrap();

        let fan = edges_around_point(&tri, index.get(PointId::new(0)).unwrap()).unwrap();
        assert!(!fan.is_closed());
        assert_eq!(fan.halfedges(), &[he(5), he(2)]);
        assert_eq!(
            fan.triangles(&tri).unwrap(),
            vec![TriangleId::new(1), TriangleId::new(0)]
        );

        let fan = edges_around_point(&tri, index.get(PointId::new(2)).unwrap()).unwrap();
        assert_eq!(fan.halfedges(), &[he(1), he(3)]);

        // The walk ends on a half-edge whose next has no twin.
        let last = *fan.halfedges().last().unwrap();
        assert!(tri.is_boundary(tri.next(last).unwrap()).unwrap());
    }

    #[test]
    fn test_single_triangle_open_fans() {
        let tri = fixtures::single_triangle();
        for e in tri.halfedge_ids() {
            let fan = edges_around_point(&tri, e).unwrap();
            assert!(!fan.is_closed());
            assert_eq!(fan.halfedges(), &[e]);
        }
    }

    #[test]
    fn test_boundary_point_no_revisits() {
        let tri = fixtures::hexagon_fan();
        let index = PointIndex::build(&tri).unwrap();
        for p in 1..=6 {
            let start = index.get(PointId::new(p)).unwrap();
            assert!(tri.is_boundary(start).unwrap());

            let fan = edges_around_point(&tri, start).unwrap();
            assert!(!fan.is_closed());
            assert_eq!(fan.len(), 2);
            let distinct: HashSet<_> = fan.halfedges().iter().collect();
            assert_eq!(distinct.len(), fan.len());
        }
    }

    #[test]
    fn test_boundary_point_mid_fan_start() {
        // Half-edge 0 runs 0 -> 1 inside triangle 0. Starting there skips
        // triangle 5 but still stops at the rim.
        let tri = fixtures::hexagon_fan();
        let mut walk = circulate(&tri, he(0)).unwrap();
        let visited: Vec<_> = walk.by_ref().collect::<Result<_>>().unwrap();
        assert_eq!(visited, vec![he(0)]);
        assert_eq!(walk.termination(), Some(Termination::Boundary));

        let fan = edges_around_point(&tri, he(0)).unwrap();
        assert!(!fan.is_closed());
        assert_eq!(fan.point(&tri).unwrap(), Some(PointId::new(1)));
        assert_eq!(fan.triangles(&tri).unwrap(), vec![TriangleId::new(0)]);
        let last = *fan.halfedges().last().unwrap();
        assert!(tri.is_boundary(tri.next(last).unwrap()).unwrap());
    }

    #[test]
    fn test_early_stop() {
        let tri = fixtures::hexagon_fan();
        let first_two: Vec<_> = circulate(&tri, he(2))
            .unwrap()
            .take(2)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(first_two, vec![he(2), he(17)]);
    }

    #[test]
    fn test_malformed_overflows() {
        let tri = fixtures::malformed();
        let err = edges_around_point(&tri, he(0)).unwrap_err();
        assert!(matches!(err, MeshError::CirculationOverflow { start: 0, bound: 2 }));

        // The walk stops after reporting.
        let mut walk = circulate(&tri, he(0)).unwrap();
        assert!(walk.by_ref().any(|r| r.is_err()));
        assert!(walk.next().is_none());
        assert_eq!(walk.termination(), None);
    }

    #[test]
    fn test_bad_start() {
        let tri = fixtures::square();
        assert!(matches!(
            edges_around_point(&tri, he(6)),
            Err(MeshError::HalfEdgeOutOfRange { id: 6, .. })
        ));
    }

    #[test]
    fn test_incoming_lookup() {
        let tri = fixtures::hexagon_fan();
        assert_eq!(incoming_halfedge(&tri, PointId::new(1)).unwrap(), Some(he(16)));
        assert_eq!(
            triangles_around_point(&tri, PointId::new(1)).unwrap(),
            vec![TriangleId::new(5), TriangleId::new(0)]
        );
        assert_eq!(triangles_around_point(&tri, PointId::new(0)).unwrap().len(), 6);
    }

    #[test]
    fn test_unused_point() {
        let mut points = fixtures::square().points().to_vec();
        points.push(nalgebra::Point2::new(5.0, 5.0));
        let tri: Triangulation =
            Triangulation::from_signed(points, &[0, 1, 2, 0, 2, 3], &[-1, -1, 3, 2, -1, -1])
                .unwrap();

        let index = PointIndex::build(&tri).unwrap();
        assert_eq!(index.len(), 5);
        assert_eq!(index.get(PointId::new(4)), None);
        assert!(triangles_around_point(&tri, PointId::new(4)).unwrap().is_empty());
    }
}
