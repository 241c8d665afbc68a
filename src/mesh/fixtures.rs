//! Hand-built triangulations shared by the unit tests.

use nalgebra::Point2;

use super::Triangulation;

/// Unit square split along the diagonal 0-2.
///
/// ```text
/// 3 ---- 2
/// |    / |
/// |  /   |
/// 0 ---- 1
/// ```
///
/// Triangle 0 is `[0, 1, 2]`, triangle 1 is `[0, 2, 3]`. Half-edges 2 (2->0) and
/// 3 (0->2) are twins; the other four are boundary.
pub(crate) fn square() -> Triangulation {
    let points = vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(0.0, 1.0),
    ];
    Triangulation::from_signed(points, &[0, 1, 2, 0, 2, 3], &[-1, -1, 3, 2, -1, -1])
        .expect("square fixture is well-formed")
}

/// A lone right triangle; all three half-edges are boundary.
pub(crate) fn single_triangle() -> Triangulation {
    let points = vec![
        Point2::new(0.0, 0.0),
        Point2::new(4.0, 0.0),
        Point2::new(0.0, 3.0),
    ];
    Triangulation::from_signed(points, &[0, 1, 2], &[-1, -1, -1])
        .expect("triangle fixture is well-formed")
}

/// Point 0 at the origin surrounded by a unit regular hexagon (points 1..=6).
///
/// Triangle `i` is `[0, i + 1, (i + 1) % 6 + 1]`. Half-edge `3i` (0 -> ring) twins
/// with `3(i - 1) + 2` (ring -> 0) of the previous triangle; the rim half-edges
/// `3i + 1` are boundary. Point 0 is the only interior point.
pub(crate) fn hexagon_fan() -> Triangulation {
    let mut points = vec![Point2::new(0.0, 0.0)];
    for k in 0..6 {
        let angle = std::f64::consts::PI / 3.0 * k as f64;
        points.push(Point2::new(angle.cos(), angle.sin()));
    }

    let mut triangles = Vec::with_capacity(18);
    let mut halfedges = Vec::with_capacity(18);
    for i in 0..6 {
        triangles.extend([0, i + 1, (i + 1) % 6 + 1]);
        halfedges.extend([
            Some(3 * ((i + 5) % 6) + 2),
            None,
            Some(3 * ((i + 1) % 6)),
        ]);
    }
    Triangulation::new(points, triangles, halfedges).expect("hexagon fixture is well-formed")
}

/// Two triangles whose twin links are not mutual: half-edges 1 and 4 both name 3
/// as their twin, so circulating from half-edge 0 never closes nor reaches the
/// boundary.
pub(crate) fn malformed() -> Triangulation {
    let points = vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(0.0, 1.0),
    ];
    Triangulation::from_signed(points, &[0, 1, 2, 0, 2, 3], &[-1, 3, -1, -1, 3, -1])
        .expect("shape is valid even though the twins are not")
}
