//! Nearest-site lookup through Voronoi cell containment.
//!
//! Cells are built from a Delaunay triangulation: the cell of a site is the
//! bounding rectangle clipped by the perpendicular bisector towards each of
//! its Delaunay neighbours. Each cell is then scaled about its site by
//! [`ENLARGE_FACTOR`] so that rounding cannot leave gaps between adjacent
//! cells, and registered in a [`PolygonAtlas`]. A point very close to a
//! cell boundary may therefore match more than one site.

use crate::error::IndexError;
use crate::polygon_atlas::PolygonAtlas;
use spade::handles::FixedVertexHandle;
use spade::{DelaunayTriangulation, Point2, Triangulation};
use std::collections::HashMap;
use tessel_core::{Point, Rect};

/// Scale applied to every cell about its site.
pub const ENLARGE_FACTOR: f64 = 1.000000001;

/// Padding added around the sites' bounding box, as a fraction of its
/// larger side.
pub const BOUNDS_PADDING: f64 = 0.01;

/// Voronoi atlas over sites carrying payloads of type `T`.
///
/// # Examples
///
/// ```
/// use tessel_core::Point;
/// use tessel_index::VoronoiAtlas;
///
/// let atlas = VoronoiAtlas::build(
///     vec![(Point::new(0.0, 0.0), 'a'), (Point::new(10.0, 0.0), 'b')],
///     None,
/// )
/// .unwrap();
/// assert_eq!(atlas.nearest(Point::new(2.0, 1.0)), Some(&'a'));
/// assert_eq!(atlas.nearest(Point::new(7.0, -1.0)), Some(&'b'));
/// ```
#[derive(Clone, Debug)]
pub struct VoronoiAtlas<T> {
    sites: Vec<(Point, T)>,
    cells: PolygonAtlas<usize>,
}

impl<T> VoronoiAtlas<T> {
    /// Build the atlas.
    ///
    /// Queries are answered inside the sites' bounding box united with
    /// `extra_bounds`, padded by [`BOUNDS_PADDING`]. Sites sharing a
    /// position share one cell.
    pub fn build(sites: Vec<(Point, T)>, extra_bounds: Option<Rect>) -> Result<Self, IndexError> {
        for (index, (p, _)) in sites.iter().enumerate() {
            if !p.is_finite() {
                return Err(IndexError::InvalidSite {
                    index,
                    reason: format!("non-finite coordinates ({}, {})", p.x, p.y),
                });
            }
        }
        let bounds = padded_bounds(sites.iter().map(|(p, _)| *p), extra_bounds);

        let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
        // Sites at the same position come back with the same handle.
        let mut handles = Vec::with_capacity(sites.len());
        for (index, (p, _)) in sites.iter().enumerate() {
            let handle = triangulation
                .insert(Point2::new(p.x, p.y))
                .map_err(|e| IndexError::InvalidSite {
                    index,
                    reason: format!("{e:?}"),
                })?;
            handles.push(handle);
        }

        let mut cell_of: HashMap<FixedVertexHandle, Vec<Point>> = HashMap::new();
        for vertex in triangulation.vertices() {
            let at = vertex.position();
            let site = Point::new(at.x, at.y);
            let mut cell = corners(&bounds);
            for edge in vertex.out_edges() {
                let to = edge.to().position();
                cell = clip_towards(&cell, site, Point::new(to.x, to.y));
            }
            cell_of.insert(vertex.fix(), enlarge(&cell, site, ENLARGE_FACTOR));
        }

        let mut cells = PolygonAtlas::new(bounds);
        for (index, handle) in handles.iter().enumerate() {
            if let Some(cell) = cell_of.get(handle) {
                cells.insert(cell.clone(), index);
            }
        }
        tracing::debug!(
            sites = sites.len(),
            cells = cell_of.len(),
            "built voronoi atlas"
        );
        Ok(Self { sites, cells })
    }

    /// The rectangle queries are answered in.
    pub fn bounds(&self) -> Rect {
        self.cells.bounds()
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Returns `true` if the atlas has no sites.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Every site whose enlarged cell contains `p`, as `(site, payload)`.
    pub fn find(&self, p: Point) -> impl Iterator<Item = (Point, &T)> + '_ {
        self.cells.find(p).map(move |(_, &i)| {
            let (site, data) = &self.sites[i];
            (*site, data)
        })
    }

    /// The payload of the matching site closest to `p`.
    ///
    /// Exact distance ties go to the site registered first.
    pub fn nearest(&self, p: Point) -> Option<&T> {
        let mut best: Option<(f64, &T)> = None;
        for (site, data) in self.find(p) {
            let d = site.distance_sq(p);
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, data));
            }
        }
        best.map(|(_, data)| data)
    }
}

fn padded_bounds<I>(points: I, extra: Option<Rect>) -> Rect
where
    I: IntoIterator<Item = Point>,
{
    let bb = match (Rect::bounding_box(points), extra) {
        (Some(bb), Some(extra)) => bb.union(&extra),
        (Some(bb), None) => bb,
        (None, Some(extra)) => extra,
        (None, None) => Rect::default(),
    };
    let margin = (bb.w.max(bb.h) * BOUNDS_PADDING).max(1.0);
    bb.expand(margin)
}

fn corners(r: &Rect) -> Vec<Point> {
    vec![
        Point::new(r.x, r.y),
        Point::new(r.max_x(), r.y),
        Point::new(r.max_x(), r.max_y()),
        Point::new(r.x, r.max_y()),
    ]
}

/// Clip a convex polygon to the half-plane of points at least as close to
/// `site` as to `other` (one Sutherland–Hodgman pass).
fn clip_towards(polygon: &[Point], site: Point, other: Point) -> Vec<Point> {
    let n = other - site;
    let mid = site.midpoint(other);
    let side = |p: Point| (p.x - mid.x) * n.x + (p.y - mid.y) * n.y;
    let mut out = Vec::with_capacity(polygon.len() + 1);
    for (i, &a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        let sa = side(a);
        let sb = side(b);
        if sa <= 0.0 {
            out.push(a);
        }
        if (sa <= 0.0) != (sb <= 0.0) {
            let t = sa / (sa - sb);
            out.push(Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y)));
        }
    }
    out
}

fn enlarge(polygon: &[Point], about: Point, scale: f64) -> Vec<Point> {
    polygon
        .iter()
        .map(|p| {
            Point::new(
                p.x * scale + about.x * (1.0 - scale),
                p.y * scale + about.y * (1.0 - scale),
            )
        })
        .collect()
}
