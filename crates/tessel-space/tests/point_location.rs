use std::sync::Arc;
use tessel_core::{EdgeKey, FaceKey, Point, VertexKey};
use tessel_space::{FacePatch, Tesselation};
use tessel_test_utils::{complete_fixtures, fixtures, scattered_points};

#[test]
fn unit_square_scenarios() {
    let t = Tesselation::new(fixtures::square()).unwrap();
    assert_eq!(t.edges_on_face(FaceKey::new(0, 0, 0)).unwrap().len(), 4);
    assert_eq!(
        t.faces_on_edge(EdgeKey::new(0, 0, 1, 0)).unwrap().as_slice(),
        &[FaceKey::new(0, 0, 0), FaceKey::new(1, 0, 0)]
    );
    assert_eq!(t.find_face_at(Point::new(1.5, 1.5)), Some(FaceKey::new(1, 1, 0)));
    assert_eq!(t.find_face_at(Point::new(2.9, 4.1)), Some(FaceKey::new(2, 4, 0)));
}

#[test]
fn shifted_square_locates_by_geometry() {
    // The base face sits at (2, 4), so the face found at a point is offset
    // from the point's integer cell by that much.
    let t = Tesselation::new(fixtures::shifted_square()).unwrap();
    assert_eq!(t.find_face_at(Point::new(2.5, 4.5)), Some(FaceKey::new(0, 0, 0)));
    assert_eq!(t.find_face_at(Point::new(0.5, 0.5)), Some(FaceKey::new(-2, -4, 0)));
    assert_eq!(t.find_vertex_at(Point::new(3.1, 3.9)), Some(VertexKey::new(3, 4, 0)));
}

#[test]
fn stripe_gaps_locate_nothing() {
    let t = Tesselation::new(fixtures::stripe()).unwrap();
    for (x, y) in scattered_points(100, 50.0) {
        let p = Point::new(x, y);
        let in_column = x.rem_euclid(2.0) < 1.0;
        match t.find_face_at(p) {
            Some(face) => {
                assert!(in_column, "({x}, {y}) is in a gap but found {face}");
                assert!(tessel_core::point_in_polygon(
                    p,
                    &t.face_coordinates(face).unwrap()
                ));
            }
            None => assert!(!in_column, "({x}, {y}) is in a column but found nothing"),
        }
    }
}

#[test]
fn hexagon_vertices_nearest() {
    let t = Tesselation::new(fixtures::hexagon()).unwrap();
    let v = VertexKey::new(2, 4, 1);
    let at = t.vertex_coordinates(v).unwrap();
    assert_eq!(t.find_vertex_at(Point::new(at.x + 0.2, at.y - 0.1)), Some(v));
}

#[test]
fn edge_found_is_canonical() {
    for (_, config) in complete_fixtures() {
        let t = Tesselation::new(config).unwrap();
        for (x, y) in scattered_points(50, 100.0) {
            let e = t.find_edge_at(Point::new(x, y)).unwrap();
            assert_eq!(t.canonical_edge(e).unwrap(), e);
        }
    }
}

#[test]
fn patch_from_located_faces() {
    let t = Tesselation::new(fixtures::triangle()).unwrap();
    let located: Vec<FaceKey> = [(1.0, 1.0), (3.0, 1.0), (2.0, 3.0)]
        .into_iter()
        .filter_map(|p| t.find_face_at(Point::from(p)))
        .collect();
    assert_eq!(located.len(), 3);
    let patch = FacePatch::new(&t, located.iter().copied()).unwrap();
    assert_eq!(patch.len(), 3);
    let inside = patch.edges().filter(|&e| patch.is_edge_inside(e)).count();
    let border = patch.edges().filter(|&e| patch.is_edge_on_border(e)).count();
    assert_eq!(inside + border, patch.edges().len());
}

// ── Concurrency ────────────────────────────────────────────────

#[test]
fn concurrent_first_use_agrees() {
    let t = Arc::new(Tesselation::new(fixtures::octagon()).unwrap());
    let points = scattered_points(64, 200.0);
    let expected: Vec<_> = {
        let fresh = Tesselation::new(fixtures::octagon()).unwrap();
        points
            .iter()
            .map(|&(x, y)| {
                let p = Point::new(x, y);
                (fresh.find_face_at(p), fresh.find_vertex_at(p))
            })
            .collect()
    };
    std::thread::scope(|s| {
        for _ in 0..4 {
            let t = Arc::clone(&t);
            let points = &points;
            let expected = &expected;
            s.spawn(move || {
                for (i, &(x, y)) in points.iter().enumerate() {
                    let p = Point::new(x, y);
                    assert_eq!((t.find_face_at(p), t.find_vertex_at(p)), expected[i]);
                }
            });
        }
    });
}
