//! Tesselation invariant checks.
//!
//! Each check walks the base faces at a handful of periods and panics with
//! a descriptive message on the first violation. Reused by the fixture
//! tests below and by the property tests in this crate.

use crate::tesselation::Tesselation;
use tessel_core::{point_in_polygon, EdgeKey, FaceKey, Period, Periodic, Point};

/// Periods every check samples.
const PERIODS: [Period; 5] = [
    Period::new(0, 0),
    Period::new(1, 0),
    Period::new(0, -1),
    Period::new(-3, 2),
    Period::new(7, 5),
];

/// Squared-distance slack when comparing nearest-site answers.
const DISTANCE_TOLERANCE: f64 = 1e-6;

fn sample_faces(t: &Tesselation) -> Vec<FaceKey> {
    let mut faces = Vec::new();
    for period in PERIODS {
        for face in t.face_ids() {
            faces.push(FaceKey { period, face });
        }
    }
    faces
}

/// Every name of every sampled edge, canonical or not.
fn sample_edge_names(t: &Tesselation) -> Vec<EdgeKey> {
    let mut edges = Vec::new();
    for face in sample_faces(t) {
        let n = t.vertices_on_face(face).unwrap().len() as u32;
        for index in 0..n {
            edges.push(EdgeKey {
                period: face.period,
                index,
                face: face.face,
            });
        }
    }
    edges
}

/// `canonical(canonical(e)) == canonical(e)`, and names of one edge agree.
pub fn assert_canonical_idempotent(t: &Tesselation) {
    for edge in sample_edge_names(t) {
        let c = t.canonical_edge(edge).unwrap();
        assert_eq!(
            t.canonical_edge(c).unwrap(),
            c,
            "canonical({edge}) = {c} is not a fixed point"
        );
        assert!(t.is_same_edge(edge, c).unwrap());
        assert_eq!(t.faces_on_edge(edge).unwrap(), t.faces_on_edge(c).unwrap());
    }
}

/// Membership is symmetric across every pair of incidence queries.
pub fn assert_incidence_symmetric(t: &Tesselation) {
    for face in sample_faces(t) {
        for edge in t.edges_on_face(face).unwrap() {
            let faces = t.faces_on_edge(edge).unwrap();
            assert!(
                faces.contains(&face),
                "{face} bounds {edge} but faces_on_edge = {faces:?}"
            );
            for vertex in t.vertices_on_edge(edge).unwrap() {
                let edges = t.edges_on_vertex(vertex).unwrap();
                assert!(
                    edges.contains(&edge),
                    "{vertex} ends {edge} but edges_on_vertex = {edges:?}"
                );
            }
        }
        for vertex in t.vertices_on_face(face).unwrap() {
            let faces = t.faces_on_vertex(vertex).unwrap();
            assert!(
                faces.contains(&face),
                "{vertex} is on {face} but faces_on_vertex = {faces:?}"
            );
        }
    }
}

/// Queries on a shifted key equal the base answers shifted.
pub fn assert_period_shift_consistent(t: &Tesselation) {
    for face in t.face_ids() {
        let base = FaceKey {
            period: Period::ZERO,
            face,
        };
        let base_edges = t.edges_on_face(base).unwrap();
        let base_polygon = t.face_coordinates(base).unwrap();
        for period in PERIODS {
            let shifted: Vec<EdgeKey> = base_edges.iter().map(|e| e.shifted(period)).collect();
            assert_eq!(t.edges_on_face(base.shifted(period)).unwrap(), shifted);

            let offset = t.period_matrix().offset(period);
            let polygon = t.face_coordinates(base.shifted(period)).unwrap();
            for (p, q) in polygon.iter().zip(&base_polygon) {
                assert!((p.x - q.x - offset.x).abs() < 1e-9);
                assert!((p.y - q.y - offset.y).abs() < 1e-9);
            }
        }
    }
}

/// `find_face_at` returns a face whose polygon contains the point.
pub fn assert_face_at(t: &Tesselation, p: Point) {
    let face = t
        .find_face_at(p)
        .unwrap_or_else(|| panic!("no face at ({}, {})", p.x, p.y));
    let polygon = t.face_coordinates(face).unwrap();
    assert!(
        point_in_polygon(p, &polygon),
        "({}, {}) is not inside {face}",
        p.x,
        p.y
    );
}

/// Vertex centroids of the sampled faces locate their own face.
pub fn assert_face_centroids_locate(t: &Tesselation) {
    for face in sample_faces(t) {
        let polygon = t.face_coordinates(face).unwrap();
        let n = polygon.len() as f64;
        let centroid = Point::new(
            polygon.iter().map(|p| p.x).sum::<f64>() / n,
            polygon.iter().map(|p| p.y).sum::<f64>() / n,
        );
        assert_eq!(t.find_face_at(centroid), Some(face), "centroid of {face}");
    }
}

/// No edge surrounding `find_edge_at(p)` has a closer midpoint.
pub fn assert_edge_at_locally_nearest(t: &Tesselation, p: Point) {
    let dist = |e: EdgeKey| {
        let [a, b] = t.edge_coordinates(e).unwrap();
        a.midpoint(b).distance_sq(p)
    };
    let best = t
        .find_edge_at(p)
        .unwrap_or_else(|| panic!("no edge at ({}, {})", p.x, p.y));
    let best_d = dist(best);
    for other in t.surrounding_edges(best).unwrap() {
        let d = dist(other);
        assert!(
            d + DISTANCE_TOLERANCE >= best_d,
            "edge {other} ({d}) is closer than {best} ({best_d})"
        );
    }
}

/// No vertex surrounding `find_vertex_at(p)` is closer.
pub fn assert_vertex_at_locally_nearest(t: &Tesselation, p: Point) {
    let best = t
        .find_vertex_at(p)
        .unwrap_or_else(|| panic!("no vertex at ({}, {})", p.x, p.y));
    let best_d = t.vertex_coordinates(best).unwrap().distance_sq(p);
    for other in t.surrounding_vertices(best).unwrap() {
        let d = t.vertex_coordinates(other).unwrap().distance_sq(p);
        assert!(
            d + DISTANCE_TOLERANCE >= best_d,
            "vertex {other} ({d}) is closer than {best} ({best_d})"
        );
    }
}

/// Every structural check. Point checks need a complete tiling and are
/// run separately.
pub fn run_full_compliance(t: &Tesselation) {
    assert_canonical_idempotent(t);
    assert_incidence_symmetric(t);
    assert_period_shift_consistent(t);
}

mod tests {
    use super::*;
    use proptest::prelude::*;
    use tessel_test_utils::{all_fixtures, complete_fixtures};

    fn build_all(complete_only: bool) -> Vec<(&'static str, Tesselation)> {
        let configs = if complete_only {
            complete_fixtures()
        } else {
            all_fixtures()
        };
        configs
            .into_iter()
            .map(|(name, config)| (name, Tesselation::new(config).unwrap()))
            .collect()
    }

    // ── Structure ──────────────────────────────────────────────

    #[test]
    fn every_fixture_is_compliant() {
        for (name, t) in build_all(false) {
            eprintln!("checking {name}");
            run_full_compliance(&t);
        }
    }

    #[test]
    fn centroids_locate_their_faces() {
        for (name, t) in build_all(true) {
            eprintln!("checking {name}");
            assert_face_centroids_locate(&t);
        }
    }

    // ── Point location ─────────────────────────────────────────

    #[test]
    fn scattered_points_locate() {
        for (_, t) in build_all(true) {
            for (x, y) in tessel_test_utils::scattered_points(200, 1000.0) {
                let p = Point::new(x, y);
                assert_face_at(&t, p);
                assert_edge_at_locally_nearest(&t, p);
                assert_vertex_at_locally_nearest(&t, p);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn located_elements_are_correct(
            which in 0usize..6,
            x in -10_000.0f64..10_000.0,
            y in -10_000.0f64..10_000.0,
        ) {
            let (_, config) = complete_fixtures().swap_remove(which);
            let t = Tesselation::new(config).unwrap();
            let p = Point::new(x, y);
            assert_face_at(&t, p);
            assert_edge_at_locally_nearest(&t, p);
            assert_vertex_at_locally_nearest(&t, p);
        }
    }
}
