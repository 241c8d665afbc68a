//! Per-triangle geometry: corner positions and dual points.
//!
//! A dual point is one representative location per triangle. The Voronoi diagram
//! uses the circumcenter: adjacent triangles of a Delaunay triangulation then place
//! their dual points on the perpendicular bisector of their shared edge, so cell
//! boundaries line up exactly. Centroid and incenter are offered for callers that
//! want a point guaranteed to lie inside its triangle; they do not yield a true
//! Voronoi diagram.
//!
//! Degenerate (collinear) triangles are not special-cased. Their circumcenter lies
//! far away or is non-finite, and that value is returned unchanged.

use nalgebra::Point2;

use super::halfedge::Triangulation;
use super::index::{MeshIndex, TriangleId};
use crate::error::Result;

/// Formula used to place a triangle's dual point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DualPoint {
    /// Center of the circumscribed circle. Produces the Voronoi diagram.
    #[default]
    Circumcenter,
    /// Average of the three corners.
    Centroid,
    /// Center of the inscribed circle.
    Incenter,
}

impl DualPoint {
    /// Compute the dual point of the triangle `(a, b, c)`.
    pub fn compute(self, a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Point2<f64> {
        match self {
            DualPoint::Circumcenter => circumcenter(a, b, c),
            DualPoint::Centroid => centroid(a, b, c),
            DualPoint::Incenter => incenter(a, b, c),
        }
    }
}

/// Center of the circle through `a`, `b` and `c`.
///
/// Computed relative to `a` to keep the products small. Collinear input divides by
/// zero and yields infinite or NaN coordinates.
pub fn circumcenter(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Point2<f64> {
    let ab = b - a;
    let ac = c - a;
    let bl = ab.norm_squared();
    let cl = ac.norm_squared();
    let d = 0.5 / (ab.x * ac.y - ab.y * ac.x);

    Point2::new(
        a.x + (ac.y * bl - ab.y * cl) * d,
        a.y + (ab.x * cl - ac.x * bl) * d,
    )
}

/// Average of the three corners.
pub fn centroid(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Point2<f64> {
    Point2::from((a.coords + b.coords + c.coords) / 3.0)
}

/// Center of the inscribed circle: corners weighted by the length of the
/// opposite side.
pub fn incenter(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Point2<f64> {
    let wa = (c - b).norm();
    let wb = (a - c).norm();
    let wc = (b - a).norm();
    let perimeter = wa + wb + wc;
    Point2::from((a.coords * wa + b.coords * wb + c.coords * wc) / perimeter)
}

impl<I: MeshIndex> Triangulation<I> {
    /// Coordinates of the three corners of a triangle, counter-clockwise.
    pub fn corners_of(&self, t: TriangleId<I>) -> Result<[Point2<f64>; 3]> {
        let [p0, p1, p2] = self.points_of_triangle(t)?;
        Ok([self.point(p0)?, self.point(p1)?, self.point(p2)?])
    }

    /// Dual point of a triangle using the given formula.
    pub fn dual_point_of(&self, t: TriangleId<I>, dual: DualPoint) -> Result<Point2<f64>> {
        let [a, b, c] = self.corners_of(t)?;
        Ok(dual.compute(a, b, c))
    }

    /// Call `visit(t, corners)` for every triangle.
    pub fn for_each_triangle<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(TriangleId<I>, [Point2<f64>; 3]),
    {
        for t in self.triangle_ids() {
            visit(t, self.corners_of(t)?);
        }
        Ok(())
    }

    /// Signed area of a triangle; positive for counter-clockwise corners.
    pub fn triangle_area(&self, t: TriangleId<I>) -> Result<f64> {
        let [a, b, c] = self.corners_of(t)?;
        Ok(0.5 * (b - a).perp(&(c - a)))
    }
}
