//! Compact half-edge triangulation.
//!
//! This module wraps the output of a planar triangulation engine: a point list plus
//! two parallel arrays, `triangles` and `halfedges`, each of length `3T`.
//!
//! # Structure
//!
//! - Half-edge `e` belongs to triangle `e / 3`; the three half-edges of triangle `t`
//!   are `3t`, `3t + 1`, `3t + 2`, counter-clockwise
//! - `triangles[e]` is the point half-edge `e` **starts** at
//! - `halfedges[e]` is the opposite half-edge on the neighbouring triangle, or nothing
//!   when `e` lies on the outer boundary (the convex hull for a Delaunay triangulation)
//!
//! Nothing is stored beyond these arrays; `next`, `prev` and `triangle_of` are index
//! arithmetic.
//!
//! # Validation
//!
//! Construction only checks array shapes. Index ranges are checked on access, and
//! every accessor returns an error for ids outside the mesh. A full consistency pass
//! is available through [`Triangulation::validate`].

use nalgebra::Point2;

use super::index::{HalfEdgeId, MeshIndex, PointId, TriangleId};
use crate::error::{MeshError, Result};

/// A planar triangulation in compact half-edge form.
///
/// Immutable once constructed. The type is `Send + Sync`, so any number of threads
/// can traverse one instance.
#[derive(Debug, Clone)]
pub struct Triangulation<I: MeshIndex = u32> {
    /// Input points; a point's identity is its position in this list.
    pub(crate) points: Vec<Point2<f64>>,

    /// Start point of each half-edge.
    pub(crate) triangles: Vec<PointId<I>>,

    /// Twin of each half-edge, or the storage sentinel on the boundary.
    pub(crate) halfedges: Vec<HalfEdgeId<I>>,
}

impl<I: MeshIndex> Triangulation<I> {
    /// Create a triangulation from the engine's output arrays.
    ///
    /// `halfedges[e]` is `None` for boundary half-edges.
    ///
    /// # Errors
    /// Returns [`MeshError::ArrayShape`] if `triangles.len()` is not a multiple of 3
    /// or differs from `halfedges.len()`, and [`MeshError::IndexOverflow`] if a value
    /// does not fit the index type `I`.
    pub fn new(
        points: Vec<Point2<f64>>,
        triangles: Vec<usize>,
        halfedges: Vec<Option<usize>>,
    ) -> Result<Self> {
        check_shape::<I>(points.len(), triangles.len(), halfedges.len())?;

        let triangles = triangles
            .into_iter()
            .map(|p| to_index::<I>(p).map(|_| PointId::new(p)))
            .collect::<Result<Vec<_>>>()?;
        let halfedges = halfedges
            .into_iter()
            .map(|h| match h {
                Some(e) => to_index::<I>(e).map(|_| HalfEdgeId::new(e)),
                None => Ok(HalfEdgeId::invalid()),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            points,
            triangles,
            halfedges,
        })
    }

    /// Create a triangulation from arrays using the engine's signed convention,
    /// where any negative `halfedges` entry (conventionally `-1`) marks a boundary.
    ///
    /// # Example
    /// ```
    /// use dualmesh::mesh::Triangulation;
    /// use nalgebra::Point2;
    ///
    /// let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)];
    /// let tri: Triangulation =
    ///     Triangulation::from_signed(points, &[0, 1, 2], &[-1, -1, -1]).unwrap();
    /// assert_eq!(tri.num_triangles(), 1);
    /// ```
    pub fn from_signed(
        points: Vec<Point2<f64>>,
        triangles: &[usize],
        halfedges: &[i64],
    ) -> Result<Self> {
        let halfedges = halfedges
            .iter()
            .map(|&h| usize::try_from(h).ok())
            .collect();
        Self::new(points, triangles.to_vec(), halfedges)
    }

    // ==================== Sizes ====================

    /// Number of input points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Number of half-edges (three per triangle).
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.triangles.len()
    }

    /// All input points.
    #[inline]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Coordinates of a point.
    #[inline]
    pub fn point(&self, p: PointId<I>) -> Result<Point2<f64>> {
        self.points
            .get(p.index())
            .copied()
            .ok_or(MeshError::PointOutOfRange {
                id: p.index(),
                len: self.points.len(),
            })
    }

    // ==================== Half-edge arithmetic ====================

    #[inline]
    fn check_halfedge(&self, e: HalfEdgeId<I>) -> Result<usize> {
        let i = e.index();
        if e.is_valid() && i < self.triangles.len() {
            Ok(i)
        } else {
            Err(MeshError::HalfEdgeOutOfRange {
                id: i,
                len: self.triangles.len(),
            })
        }
    }

    #[inline]
    fn check_triangle(&self, t: TriangleId<I>) -> Result<usize> {
        let i = t.index();
        if t.is_valid() && i < self.num_triangles() {
            Ok(i)
        } else {
            Err(MeshError::TriangleOutOfRange {
                id: i,
                len: self.num_triangles(),
            })
        }
    }

    /// The next half-edge counter-clockwise within `e`'s triangle.
    #[inline]
    pub fn next(&self, e: HalfEdgeId<I>) -> Result<HalfEdgeId<I>> {
        let i = self.check_halfedge(e)?;
        Ok(HalfEdgeId::new(if i % 3 == 2 { i - 2 } else { i + 1 }))
    }

    /// The previous half-edge within `e`'s triangle (`next` applied twice).
    #[inline]
    pub fn prev(&self, e: HalfEdgeId<I>) -> Result<HalfEdgeId<I>> {
        let i = self.check_halfedge(e)?;
        Ok(HalfEdgeId::new(if i % 3 == 0 { i + 2 } else { i - 1 }))
    }

    /// The opposite half-edge, or `None` if `e` is on the boundary.
    #[inline]
    pub fn twin(&self, e: HalfEdgeId<I>) -> Result<Option<HalfEdgeId<I>>> {
        let i = self.check_halfedge(e)?;
        let twin = self.halfedges[i];
        Ok(twin.is_valid().then_some(twin))
    }

    /// Check if a half-edge has no twin.
    #[inline]
    pub fn is_boundary(&self, e: HalfEdgeId<I>) -> Result<bool> {
        Ok(self.twin(e)?.is_none())
    }

    /// The triangle a half-edge belongs to.
    #[inline]
    pub fn triangle_of(&self, e: HalfEdgeId<I>) -> Result<TriangleId<I>> {
        let i = self.check_halfedge(e)?;
        Ok(TriangleId::new(i / 3))
    }

    /// The point a half-edge starts at.
    #[inline]
    pub fn point_of(&self, e: HalfEdgeId<I>) -> Result<PointId<I>> {
        let i = self.check_halfedge(e)?;
        Ok(self.triangles[i])
    }

    /// The point a half-edge ends at.
    #[inline]
    pub fn end_point_of(&self, e: HalfEdgeId<I>) -> Result<PointId<I>> {
        self.point_of(self.next(e)?)
    }

    // ==================== Triangles ====================

    /// The three half-edges of a triangle.
    pub fn halfedges_of_triangle(&self, t: TriangleId<I>) -> Result<[HalfEdgeId<I>; 3]> {
        let i = self.check_triangle(t)?;
        Ok([
            HalfEdgeId::new(3 * i),
            HalfEdgeId::new(3 * i + 1),
            HalfEdgeId::new(3 * i + 2),
        ])
    }

    /// The three corner point ids of a triangle, counter-clockwise.
    pub fn points_of_triangle(&self, t: TriangleId<I>) -> Result<[PointId<I>; 3]> {
        let i = self.check_triangle(t)?;
        Ok([
            self.triangles[3 * i],
            self.triangles[3 * i + 1],
            self.triangles[3 * i + 2],
        ])
    }

    /// Triangles sharing an edge with `t`. Boundary edges contribute nothing, so the
    /// result has between zero and three entries.
    pub fn triangles_adjacent_to_triangle(&self, t: TriangleId<I>) -> Result<Vec<TriangleId<I>>> {
        let mut adjacent = Vec::with_capacity(3);
        for e in self.halfedges_of_triangle(t)? {
            if let Some(twin) = self.twin(e)? {
                adjacent.push(self.triangle_of(twin)?);
            }
        }
        Ok(adjacent)
    }

    // ==================== Iteration ====================

    /// Iterate over all point IDs.
    pub fn point_ids(&self) -> impl Iterator<Item = PointId<I>> + '_ {
        (0..self.points.len()).map(PointId::new)
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.triangles.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all triangle IDs.
    pub fn triangle_ids(&self) -> impl Iterator<Item = TriangleId<I>> + '_ {
        (0..self.num_triangles()).map(TriangleId::new)
    }

    /// Iterate over the half-edges that have no twin.
    pub fn hull_halfedges(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .filter(|(_, twin)| !twin.is_valid())
            .map(|(i, _)| HalfEdgeId::new(i))
    }

    // ==================== Validation ====================

    /// Check the whole triangulation for consistency.
    ///
    /// Verifies that every corner names an existing point, every twin is in range
    /// and mutual, and that twins join the same two points in opposite directions.
    /// Queries never require this; it exists for callers that want malformed engine
    /// output rejected up front.
    pub fn validate(&self) -> Result<()> {
        for (i, p) in self.triangles.iter().enumerate() {
            if p.index() >= self.points.len() {
                log::debug!("half-edge {} starts at missing point {}", i, p.index());
                return Err(MeshError::PointOutOfRange {
                    id: p.index(),
                    len: self.points.len(),
                });
            }
        }

        for e in self.halfedge_ids() {
            let Some(twin) = self.twin(e)? else {
                continue;
            };
            let inconsistent = MeshError::InconsistentTwin {
                halfedge: e.index(),
                twin: twin.index(),
            };
            if self.twin(twin)? != Some(e) {
                return Err(inconsistent);
            }
            if self.point_of(e)? != self.end_point_of(twin)?
                || self.end_point_of(e)? != self.point_of(twin)?
            {
                return Err(inconsistent);
            }
        }

        log::debug!(
            "validated triangulation: {} points, {} triangles",
            self.num_points(),
            self.num_triangles()
        );
        Ok(())
    }
}

fn check_shape<I: MeshIndex>(
    num_points: usize,
    num_corners: usize,
    num_halfedges: usize,
) -> Result<()> {
    if num_corners % 3 != 0 {
        return Err(MeshError::shape(format!(
            "triangles has length {}, which is not a multiple of 3",
            num_corners
        )));
    }
    if num_corners != num_halfedges {
        return Err(MeshError::shape(format!(
            "triangles has length {} but halfedges has length {}",
            num_corners, num_halfedges
        )));
    }
    // Every point and half-edge id must be representable.
    for count in [num_points, num_corners] {
        if count > 0 {
            to_index::<I>(count - 1)?;
        }
    }
    Ok(())
}

fn to_index<I: MeshIndex>(value: usize) -> Result<I> {
    I::try_from_usize(value).ok_or(MeshError::IndexOverflow {
        value,
        max: I::MAX.to_usize(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures;

    #[test]
    fn test_next_stays_in_triangle() {
        let tri = fixtures::hexagon_fan();
        for e in tri.halfedge_ids() {
            let n = tri.next(e).unwrap();
            assert_eq!(tri.triangle_of(e).unwrap(), tri.triangle_of(n).unwrap());
            let nnn = tri.next(tri.next(n).unwrap()).unwrap();
            assert_eq!(nnn, e);
            assert_eq!(tri.prev(n).unwrap(), e);
        }
    }

    #[test]
    fn test_twin_is_mutual() {
        let tri = fixtures::hexagon_fan();
        let mut interior = 0;
        for e in tri.halfedge_ids() {
            if let Some(t) = tri.twin(e).unwrap() {
                assert_eq!(tri.twin(t).unwrap(), Some(e));
                interior += 1;
            }
        }
        assert_eq!(interior, 12);
        assert_eq!(tri.hull_halfedges().count(), 6);
        assert!(tri.validate().is_ok());
    }

    #[test]
    fn test_square_accessors() {
        let tri = fixtures::square();
        assert_eq!(tri.num_points(), 4);
        assert_eq!(tri.num_triangles(), 2);
        assert_eq!(tri.num_halfedges(), 6);

        let shared: HalfEdgeId = HalfEdgeId::new(2);
        assert_eq!(tri.twin(shared).unwrap(), Some(HalfEdgeId::new(3)));
        assert_eq!(tri.point_of(shared).unwrap(), PointId::new(2));
        assert_eq!(tri.end_point_of(shared).unwrap(), PointId::new(0));
        assert!(!tri.is_boundary(shared).unwrap());
        assert!(tri.is_boundary(HalfEdgeId::new(0)).unwrap());

        assert_eq!(
            tri.points_of_triangle(TriangleId::new(1)).unwrap(),
            [PointId::new(0), PointId::new(2), PointId::new(3)]
        );
        assert_eq!(
            tri.triangles_adjacent_to_triangle(TriangleId::new(0)).unwrap(),
            vec![TriangleId::new(1)]
        );
    }

    #[test]
    fn test_out_of_range() {
        let tri = fixtures::square();
        assert!(matches!(
            tri.next(HalfEdgeId::new(6)),
            Err(MeshError::HalfEdgeOutOfRange { id: 6, len: 6 })
        ));
        assert!(matches!(
            tri.twin(HalfEdgeId::new(100)),
            Err(MeshError::HalfEdgeOutOfRange { .. })
        ));
        assert!(matches!(
            tri.halfedges_of_triangle(TriangleId::new(2)),
            Err(MeshError::TriangleOutOfRange { id: 2, len: 2 })
        ));
        assert!(matches!(
            tri.point(PointId::new(4)),
            Err(MeshError::PointOutOfRange { id: 4, len: 4 })
        ));
    }

    #[test]
    fn test_shape_errors() {
        let points = vec![Point2::new(0.0, 0.0); 3];
        let err = Triangulation::<u32>::new(points.clone(), vec![0, 1], vec![None, None]);
        assert!(matches!(err, Err(MeshError::ArrayShape { .. })));

        let err = Triangulation::<u32>::new(points.clone(), vec![0, 1, 2], vec![None]);
        assert!(matches!(err, Err(MeshError::ArrayShape { .. })));

        let err = Triangulation::<u16>::new(points, vec![0, 1, 70_000], vec![None, None, None]);
        assert!(matches!(err, Err(MeshError::IndexOverflow { value: 70_000, .. })));
    }

    #[test]
    fn test_lazy_validation() {
        // A twin beyond the half-edge range is accepted at construction and
        // reported when followed.
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)];
        let tri: Triangulation =
            Triangulation::from_signed(points, &[0, 1, 2], &[9, -1, -1]).unwrap();
        let twin = tri.twin(HalfEdgeId::new(0)).unwrap().unwrap();
        assert!(matches!(tri.next(twin), Err(MeshError::HalfEdgeOutOfRange { id: 9, .. })));
        assert!(tri.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_mutual_twins() {
        let tri = fixtures::malformed();
        assert!(matches!(
            tri.validate(),
            Err(MeshError::InconsistentTwin { halfedge: 1, twin: 3 })
        ));
    }

    #[test]
    fn test_small_index_type() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)];
        let tri: Triangulation<u16> =
            Triangulation::from_signed(points, &[0, 1, 2], &[-1, -1, -1]).unwrap();
        assert_eq!(tri.hull_halfedges().count(), 3);
        assert_eq!(tri.next(HalfEdgeId::new(2)).unwrap(), HalfEdgeId::new(0));
    }

    #[test]
    fn test_oversized_id_is_out_of_range() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)];
        let tri: Triangulation<u16> =
            Triangulation::from_signed(points, &[0, 1, 2], &[-1, -1, -1]).unwrap();

        let result = std::panic::catch_unwind(|| tri.next(HalfEdgeId::new(70_000)));
        assert!(matches!(
            result,
            Ok(Err(MeshError::HalfEdgeOutOfRange { len: 3, .. }))
        ));
        assert!(matches!(
            tri.point(PointId::new(1 << 20)),
            Err(MeshError::PointOutOfRange { len: 3, .. })
        ));
        assert!(matches!(
            tri.corners_of(TriangleId::new(usize::MAX)),
            Err(MeshError::TriangleOutOfRange { len: 1, .. })
        ));
    }
}
