//! Adaptive rectangle index.
//!
//! Only two operations are needed: add a rectangle and find every
//! rectangle containing a point. A rectangle straddling a split line is
//! stored in every child quadrant it touches, so a query always descends
//! into exactly one leaf.

use tessel_core::{Point, Rect};

/// Entry count above which a fresh leaf splits.
pub const INITIAL_SPLIT_LIMIT: usize = 10;

/// Amount the split limit grows at each deeper level.
///
/// Rectangles overlapping most of a node are copied into all of its
/// children; a growing limit keeps subdivision finite in that case.
pub const SPLIT_LIMIT_INCREMENT: usize = 2;

/// Depth past which leaves no longer split.
pub const MAX_DEPTH: u32 = 16;

#[derive(Clone, Debug)]
struct Node<T> {
    bounds: Rect,
    limit: usize,
    depth: u32,
    kind: NodeKind<T>,
}

#[derive(Clone, Debug)]
enum NodeKind<T> {
    Leaf(Vec<(Rect, T)>),
    Split(Box<[Node<T>; 4]>),
}

impl<T: Clone> Node<T> {
    fn leaf(bounds: Rect, limit: usize, depth: u32) -> Self {
        Self {
            bounds,
            limit,
            depth,
            kind: NodeKind::Leaf(Vec::new()),
        }
    }

    fn insert(&mut self, rect: Rect, data: T) {
        if !rect.intersects(&self.bounds) {
            return;
        }
        match &mut self.kind {
            NodeKind::Split(children) => {
                for child in children.iter_mut() {
                    child.insert(rect, data.clone());
                }
            }
            NodeKind::Leaf(entries) => {
                entries.push((rect, data));
                if entries.len() > self.limit && self.depth < MAX_DEPTH {
                    self.split();
                }
            }
        }
    }

    fn split(&mut self) {
        let quadrants = self.bounds.quadrants();
        if let NodeKind::Leaf(entries) = &self.kind {
            // Every entry would land in every child: splitting cannot help
            // yet. Check again when the next entry arrives.
            let saturated = quadrants
                .iter()
                .all(|q| entries.iter().all(|(r, _)| r.intersects(q)));
            if saturated {
                self.limit = entries.len();
                return;
            }
        }
        let limit = self.limit + SPLIT_LIMIT_INCREMENT;
        let depth = self.depth + 1;
        let [q0, q1, q2, q3] = quadrants;
        let mut children = Box::new([
            Node::leaf(q0, limit, depth),
            Node::leaf(q1, limit, depth),
            Node::leaf(q2, limit, depth),
            Node::leaf(q3, limit, depth),
        ]);
        let old = std::mem::replace(&mut self.kind, NodeKind::Leaf(Vec::new()));
        if let NodeKind::Leaf(entries) = old {
            for (rect, data) in entries {
                for child in children.iter_mut() {
                    child.insert(rect, data.clone());
                }
            }
        }
        self.kind = NodeKind::Split(children);
    }

    fn leaf_for(&self, p: Point) -> &[(Rect, T)] {
        match &self.kind {
            NodeKind::Leaf(entries) => entries,
            NodeKind::Split(children) => children
                .iter()
                .find(|c| c.bounds.contains_point(p))
                .map_or(&[], |c| c.leaf_for(p)),
        }
    }
}

/// A quad tree of rectangles with payloads of type `T`.
///
/// # Examples
///
/// ```
/// use tessel_core::{Point, Rect};
/// use tessel_index::QuadTree;
///
/// let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
/// tree.insert(Rect::new(2.0, 2.0, 14.0, 14.0), "a");
/// tree.insert(Rect::new(12.0, 2.0, 14.0, 14.0), "b");
///
/// let hits: Vec<_> = tree.query(Point::new(14.0, 3.0)).map(|(_, d)| *d).collect();
/// assert_eq!(hits, vec!["a", "b"]);
/// assert_eq!(tree.query(Point::new(1.0, 1.0)).count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct QuadTree<T> {
    root: Node<T>,
    len: usize,
}

impl<T: Clone> QuadTree<T> {
    /// An empty tree over `bounds`. Points outside `bounds` never match.
    pub fn new(bounds: Rect) -> Self {
        Self {
            root: Node::leaf(bounds, INITIAL_SPLIT_LIMIT, 0),
            len: 0,
        }
    }

    /// The containing rectangle.
    pub fn bounds(&self) -> Rect {
        self.root.bounds
    }

    /// Number of rectangles inserted (including ones outside the bounds).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Add a rectangle. Rectangles not touching the bounds are dropped.
    pub fn insert(&mut self, rect: Rect, data: T) {
        self.len += 1;
        self.root.insert(rect, data);
    }

    /// All entries whose rectangle contains `p` (inclusive), in insertion order.
    pub fn query(&self, p: Point) -> impl Iterator<Item = (&Rect, &T)> + '_ {
        let leaf: &[(Rect, T)] = if self.root.bounds.contains_point(p) {
            self.root.leaf_for(p)
        } else {
            &[]
        };
        leaf.iter()
            .filter(move |(r, _)| r.contains_point(p))
            .map(|(r, d)| (r, d))
    }
}

impl<T: Clone> FromIterator<(Rect, T)> for QuadTree<T> {
    /// Builds a tree bounded by the union of all inserted rectangles.
    fn from_iter<I: IntoIterator<Item = (Rect, T)>>(iter: I) -> Self {
        let entries: Vec<(Rect, T)> = iter.into_iter().collect();
        let bounds = entries
            .iter()
            .map(|(r, _)| *r)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        let mut tree = QuadTree::new(bounds);
        for (rect, data) in entries {
            tree.insert(rect, data);
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// 10×10 grid of overlapping 14×14 squares with a pitch of 10.
    fn grid_tree() -> QuadTree<(u32, u32)> {
        let mut t = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        for i in 0..10 {
            for j in 0..10 {
                let r = Rect::new(2.0 + 10.0 * i as f64, 2.0 + 10.0 * j as f64, 14.0, 14.0);
                t.insert(r, (i, j));
            }
        }
        t
    }

    fn hits(t: &QuadTree<(u32, u32)>, x: f64, y: f64) -> Vec<(u32, u32)> {
        let mut v: Vec<_> = t.query(Point::new(x, y)).map(|(_, d)| *d).collect();
        v.sort();
        v
    }

    // ── Queries ────────────────────────────────────────────────

    #[test]
    fn finds_containing_rects() {
        let t = grid_tree();
        assert_eq!(t.len(), 100);
        assert!(hits(&t, 1.0, 1.0).is_empty());
        assert_eq!(hits(&t, 3.0, 3.0), vec![(0, 0)]);
        assert_eq!(hits(&t, 9.0, 99.0), vec![(0, 9)]);
        assert_eq!(hits(&t, 99.0, 99.0), vec![(9, 9)]);
        assert_eq!(hits(&t, 3.0, 17.0), vec![(0, 1)]);
        assert_eq!(hits(&t, 13.0, 37.0), vec![(0, 3), (1, 3)]);
        assert_eq!(hits(&t, 45.0, 55.0), vec![(3, 4), (3, 5), (4, 4), (4, 5)]);
    }

    #[test]
    fn outside_bounds_is_empty() {
        let t = grid_tree();
        assert!(hits(&t, -5.0, 50.0).is_empty());
        assert!(hits(&t, 50.0, 120.0).is_empty());
    }

    #[test]
    fn rect_outside_bounds_is_dropped() {
        let mut t = QuadTree::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        t.insert(Rect::new(20.0, 20.0, 1.0, 1.0), 1);
        assert_eq!(t.len(), 1);
        assert_eq!(t.query(Point::new(20.5, 20.5)).count(), 0);
    }

    // ── Splitting ──────────────────────────────────────────────

    #[test]
    fn many_covering_rects_terminate() {
        let mut t = QuadTree::new(Rect::new(0.0, 0.0, 1.0, 1.0));
        for i in 0..200 {
            t.insert(Rect::new(0.0, 0.0, 1.0, 1.0), i);
        }
        assert_eq!(t.query(Point::new(0.3, 0.7)).count(), 200);
    }

    #[test]
    fn saturated_leaf_splits_once_a_small_rect_arrives() {
        let mut t = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        for i in 0..11 {
            t.insert(Rect::new(0.0, 0.0, 100.0, 100.0), i);
        }
        assert!(matches!(t.root.kind, NodeKind::Leaf(_)));
        t.insert(Rect::new(1.0, 1.0, 2.0, 2.0), 11);
        assert!(matches!(t.root.kind, NodeKind::Split(_)));
        assert_eq!(t.query(Point::new(2.0, 2.0)).count(), 12);
        assert_eq!(t.query(Point::new(90.0, 90.0)).count(), 11);
    }

    #[test]
    fn from_iter_bounds_by_union() {
        let t: QuadTree<u8> = vec![
            (Rect::new(0.0, 0.0, 1.0, 1.0), 0),
            (Rect::new(5.0, -2.0, 1.0, 1.0), 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(t.bounds(), Rect::new(0.0, -2.0, 6.0, 3.0));
        let found: Vec<u8> = t.query(Point::new(5.5, -1.5)).map(|(_, d)| *d).collect();
        assert_eq!(found, vec![1]);
    }

    proptest! {
        #[test]
        fn matches_linear_scan(
            rects in prop::collection::vec((0.0f64..90.0, 0.0f64..90.0, 0.0f64..20.0, 0.0f64..20.0), 0..80),
            px in 0.0f64..100.0,
            py in 0.0f64..100.0,
        ) {
            let mut t = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
            for (i, &(x, y, w, h)) in rects.iter().enumerate() {
                t.insert(Rect::new(x, y, w, h), i);
            }
            let p = Point::new(px, py);
            let mut got: Vec<usize> = t.query(p).map(|(_, d)| *d).collect();
            got.sort();
            let expected: Vec<usize> = rects
                .iter()
                .enumerate()
                .filter(|(_, &(x, y, w, h))| Rect::new(x, y, w, h).contains_point(p))
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(got, expected);
        }
    }
}
