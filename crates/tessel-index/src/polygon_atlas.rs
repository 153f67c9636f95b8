//! Polygon point-location: a [`QuadTree`] of bounding boxes refined by an
//! exact point-in-polygon test.

use crate::quadtree::QuadTree;
use tessel_core::{point_in_polygon, Point, Rect};

/// A static collection of polygons with payloads, queried by point.
///
/// Results come back in registration order.
#[derive(Clone, Debug)]
pub struct PolygonAtlas<T> {
    entries: Vec<(Vec<Point>, T)>,
    tree: QuadTree<usize>,
}

impl<T> PolygonAtlas<T> {
    /// An empty atlas answering queries inside `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self {
            entries: Vec::new(),
            tree: QuadTree::new(bounds),
        }
    }

    /// Build an atlas from `(polygon, payload)` pairs.
    pub fn from_polygons<I>(bounds: Rect, polygons: I) -> Self
    where
        I: IntoIterator<Item = (Vec<Point>, T)>,
    {
        let mut atlas = Self::new(bounds);
        for (polygon, data) in polygons {
            atlas.insert(polygon, data);
        }
        atlas
    }

    /// The rectangle queries are answered in.
    pub fn bounds(&self) -> Rect {
        self.tree.bounds()
    }

    /// Number of registered polygons.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no polygon has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a polygon under its bounding box.
    pub fn insert(&mut self, polygon: Vec<Point>, data: T) {
        let index = self.entries.len();
        if let Some(bb) = Rect::bounding_box(polygon.iter().copied()) {
            self.tree.insert(bb, index);
        }
        self.entries.push((polygon, data));
    }

    /// Polygons whose bounding box contains `p`. No exact test is applied.
    pub fn candidates(&self, p: Point) -> impl Iterator<Item = (&[Point], &T)> + '_ {
        self.tree.query(p).map(move |(_, &i)| {
            let (polygon, data) = &self.entries[i];
            (polygon.as_slice(), data)
        })
    }

    /// Polygons that contain `p`.
    pub fn find(&self, p: Point) -> impl Iterator<Item = (&[Point], &T)> + '_ {
        self.candidates(p)
            .filter(move |(polygon, _)| point_in_polygon(p, polygon))
    }
}
