//! Standard fixture tilings.
//!
//! Some use integer approximations of regular shapes. Period matrices are
//! `[a, b, c, d]` with lattice vectors `(a, c)` and `(b, d)`.

use tessel_core::TesselationConfig;

/// Unit squares.
pub fn square() -> TesselationConfig {
    TesselationConfig::new([1.0, 0.0, 0.0, 1.0])
        .with_vertex(0, 0.0, 0.0)
        .with_face(0, &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (0, 1, 0)])
}

/// Hexagons, two vertices per period.
pub fn hexagon() -> TesselationConfig {
    TesselationConfig::new([4.0, 2.0, 0.0, 3.0])
        .with_vertex(0, 0.0, 0.0)
        .with_vertex(1, 2.0, -1.0)
        .with_face(
            0,
            &[(0, 0, 0), (0, 0, 1), (1, 0, 0), (0, 1, 1), (0, 1, 0), (-1, 1, 1)],
        )
}

/// Triangles, two faces sharing one vertex per period.
pub fn triangle() -> TesselationConfig {
    TesselationConfig::new([2.0, 1.0, 0.0, 2.0])
        .with_vertex(0, 0.0, 0.0)
        .with_face(0, &[(0, 0, 0), (1, 0, 0), (0, 1, 0)])
        .with_face(1, &[(1, 0, 0), (1, 1, 0), (0, 1, 0)])
}

/// Truncated squares: an octagon and a square per period.
pub fn octagon() -> TesselationConfig {
    TesselationConfig::new([4.0, 2.0, 0.0, 2.0])
        .with_vertex(0, 0.0, 0.0)
        .with_vertex(1, 1.0, -1.0)
        .with_vertex(2, 2.0, -1.0)
        .with_vertex(3, 3.0, 0.0)
        .with_face(
            0,
            &[
                (0, 0, 0),
                (0, 0, 1),
                (0, 0, 2),
                (0, 0, 3),
                (0, 1, 1),
                (0, 1, 0),
                (-1, 1, 3),
                (-1, 1, 2),
            ],
        )
        .with_face(1, &[(0, 0, 3), (1, 0, 0), (0, 1, 2), (0, 1, 1)])
}

/// Parallelograms over a lattice with no zero entries.
pub fn skewed_square() -> TesselationConfig {
    TesselationConfig::new([2.0, 1.0, 1.0, 2.0])
        .with_vertex(0, 0.0, 0.0)
        .with_face(0, &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (0, 1, 0)])
}

/// Unit squares whose base face sits away from the base vertex.
pub fn shifted_square() -> TesselationConfig {
    TesselationConfig::new([1.0, 0.0, 0.0, 1.0])
        .with_vertex(0, 0.0, 0.0)
        .with_face(0, &[(2, 4, 0), (3, 4, 0), (3, 5, 0), (2, 5, 0)])
}

/// Alternating columns of unit squares, so some edges have one face.
pub fn stripe() -> TesselationConfig {
    TesselationConfig::new([2.0, 0.0, 0.0, 1.0])
        .with_vertex(0, 0.0, 0.0)
        .with_vertex(1, 1.0, 0.0)
        .with_face(0, &[(0, 0, 0), (0, 0, 1), (0, 1, 1), (0, 1, 0)])
}
