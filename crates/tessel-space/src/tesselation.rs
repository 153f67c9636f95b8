//! The tesselation facade: incidence, coordinate and point-location
//! queries over periodic keys.

use crate::face_cover::find_face_cover;
use crate::incidence::Incidence;
use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use std::hash::Hash;
use std::sync::OnceLock;
use tessel_core::{
    point_in_polygon, ConfigError, EdgeKey, FaceId, FaceKey, IncidenceError, Period,
    PeriodMatrix, Periodic, Point, Rect, TesselationConfig, VertexId, VertexKey,
};
use tessel_index::{PolygonAtlas, VoronoiAtlas};

/// Padding of the face locator around the base rectangle, as a fraction of
/// its larger side. Reduced points can land a rounding error outside it.
const LOCATOR_MARGIN: f64 = 0.01;

/// Faces of the base-rectangle cover, indexed by polygon.
#[derive(Debug)]
struct FaceLocator {
    base_rect: Rect,
    atlas: PolygonAtlas<FaceKey>,
}

/// Edge midpoints or vertex positions around the base rectangle.
#[derive(Debug)]
struct NearestLocator<K> {
    base_rect: Rect,
    atlas: VoronoiAtlas<K>,
}

/// A periodic tiling of the plane.
///
/// Built from one fundamental domain of faces and vertices plus a period
/// matrix; every element of the infinite tiling is addressed by a periodic
/// key. The incidence tables and the three point-location indexes are
/// built on first use, once, and are safe to share between threads.
///
/// # Examples
///
/// ```
/// use tessel_core::{FaceKey, Point, TesselationConfig};
/// use tessel_space::Tesselation;
///
/// let config = TesselationConfig::new([1.0, 0.0, 0.0, 1.0])
///     .with_vertex(0, 0.0, 0.0)
///     .with_face(0, &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (0, 1, 0)]);
/// let tess = Tesselation::new(config).unwrap();
///
/// assert_eq!(tess.find_face_at(Point::new(2.9, 4.1)), Some(FaceKey::new(2, 4, 0)));
/// assert_eq!(tess.edges_on_face(FaceKey::new(0, 0, 0)).unwrap().len(), 4);
/// ```
#[derive(Debug)]
pub struct Tesselation {
    matrix: PeriodMatrix,
    faces: IndexMap<FaceId, Vec<VertexKey>>,
    vertices: IndexMap<VertexId, Point>,
    incidence: OnceLock<Incidence>,
    face_locator: OnceLock<FaceLocator>,
    edge_locator: OnceLock<Option<NearestLocator<EdgeKey>>>,
    vertex_locator: OnceLock<Option<NearestLocator<VertexKey>>>,
}

impl Tesselation {
    /// Validate `config` and build an engine over it.
    pub fn new(config: TesselationConfig) -> Result<Self, ConfigError> {
        let matrix = config.validate()?;
        Ok(Self {
            matrix,
            faces: config.faces,
            vertices: config.vertices,
            incidence: OnceLock::new(),
            face_locator: OnceLock::new(),
            edge_locator: OnceLock::new(),
            vertex_locator: OnceLock::new(),
        })
    }

    /// The validated period matrix.
    pub fn period_matrix(&self) -> &PeriodMatrix {
        &self.matrix
    }

    /// Base face ids, in config order.
    pub fn face_ids(&self) -> impl ExactSizeIterator<Item = FaceId> + '_ {
        self.faces.keys().copied()
    }

    /// Base vertex ids, in config order.
    pub fn vertex_ids(&self) -> impl ExactSizeIterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    fn incidence(&self) -> &Incidence {
        self.incidence
            .get_or_init(|| Incidence::build(&self.faces, self.vertices.keys()))
    }

    // ── Incidence ──────────────────────────────────────────────

    /// Canonical edges bounding `face`, in boundary order without repeats.
    pub fn edges_on_face(&self, face: FaceKey) -> Result<Vec<EdgeKey>, IncidenceError> {
        let row = self
            .incidence()
            .faces
            .get(&face.face)
            .ok_or(IncidenceError::UnknownFace { face })?;
        shift_all(&row.edges, face.period)
    }

    /// Boundary vertices of `face`, in boundary order.
    pub fn vertices_on_face(&self, face: FaceKey) -> Result<Vec<VertexKey>, IncidenceError> {
        let boundary = self
            .faces
            .get(&face.face)
            .ok_or(IncidenceError::UnknownFace { face })?;
        shift_all(boundary, face.period)
    }

    /// The one or two faces meeting at `edge`.
    pub fn faces_on_edge(&self, edge: EdgeKey) -> Result<SmallVec<[FaceKey; 2]>, IncidenceError> {
        let (row, i) = self
            .incidence()
            .edge_slot(edge)
            .ok_or(IncidenceError::UnknownEdge { edge })?;
        shift_all(&row.faces_on_edge[i], edge.period)
    }

    /// The two endpoints of `edge`, in the naming face's boundary order.
    pub fn vertices_on_edge(&self, edge: EdgeKey) -> Result<[VertexKey; 2], IncidenceError> {
        let (row, i) = self
            .incidence()
            .edge_slot(edge)
            .ok_or(IncidenceError::UnknownEdge { edge })?;
        let [a, b] = row.edge_vertices(i);
        Ok([shift(a, edge.period)?, shift(b, edge.period)?])
    }

    /// Faces around `vertex`, cyclically ordered for an interior vertex of
    /// a complete tiling.
    pub fn faces_on_vertex(&self, vertex: VertexKey) -> Result<Vec<FaceKey>, IncidenceError> {
        let row = self
            .incidence()
            .vertices
            .get(&vertex.vertex)
            .ok_or(IncidenceError::UnknownVertex { vertex })?;
        shift_all(&row.faces, vertex.period)
    }

    /// Canonical edges around `vertex`, in the same walk order as
    /// [`faces_on_vertex`](Self::faces_on_vertex).
    pub fn edges_on_vertex(&self, vertex: VertexKey) -> Result<Vec<EdgeKey>, IncidenceError> {
        let row = self
            .incidence()
            .vertices
            .get(&vertex.vertex)
            .ok_or(IncidenceError::UnknownVertex { vertex })?;
        shift_all(&row.edges, vertex.period)
    }

    /// The canonical name of `edge`.
    pub fn canonical_edge(&self, edge: EdgeKey) -> Result<EdgeKey, IncidenceError> {
        let incidence = self.incidence();
        if incidence.edge_slot(edge).is_none() {
            return Err(IncidenceError::UnknownEdge { edge });
        }
        incidence
            .canonical(edge)
            .ok_or(IncidenceError::PeriodOverflow {
                period: edge.period,
            })
    }

    /// Whether two edge names denote the same geometric edge.
    pub fn is_same_edge(&self, a: EdgeKey, b: EdgeKey) -> Result<bool, IncidenceError> {
        Ok(self.canonical_edge(a)? == self.canonical_edge(b)?)
    }

    /// The face across `edge` from `face`.
    ///
    /// `None` if `face` is not on `edge` or the edge has no second face.
    pub fn other_face(&self, face: FaceKey, edge: EdgeKey) -> Result<Option<FaceKey>, IncidenceError> {
        let faces = self.faces_on_edge(edge)?;
        Ok(match faces.as_slice() {
            [a, b] if *a == face => Some(*b),
            [a, b] if *b == face => Some(*a),
            _ => None,
        })
    }

    /// The other endpoint of `edge`, or `None` if `vertex` is not on it.
    pub fn other_vertex(
        &self,
        vertex: VertexKey,
        edge: EdgeKey,
    ) -> Result<Option<VertexKey>, IncidenceError> {
        let [a, b] = self.vertices_on_edge(edge)?;
        Ok(if a == vertex {
            Some(b)
        } else if b == vertex {
            Some(a)
        } else {
            None
        })
    }

    // ── Derived neighbourhoods ─────────────────────────────────

    /// Faces sharing an edge with `face`.
    pub fn adjacent_faces(&self, face: FaceKey) -> Result<Vec<FaceKey>, IncidenceError> {
        let groups = self
            .edges_on_face(face)?
            .into_iter()
            .map(|e| self.faces_on_edge(e))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(union_excluding(face, groups))
    }

    /// Faces sharing at least a vertex with `face`.
    pub fn touching_faces(&self, face: FaceKey) -> Result<Vec<FaceKey>, IncidenceError> {
        let groups = self
            .vertices_on_face(face)?
            .into_iter()
            .map(|v| self.faces_on_vertex(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(union_excluding(face, groups))
    }

    /// Edges bounding the faces on either side of `edge`.
    pub fn surrounding_edges(&self, edge: EdgeKey) -> Result<Vec<EdgeKey>, IncidenceError> {
        let pivot = self.canonical_edge(edge)?;
        let groups = self
            .faces_on_edge(edge)?
            .into_iter()
            .map(|f| self.edges_on_face(f))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(union_excluding(pivot, groups))
    }

    /// Edges sharing an endpoint with `edge`.
    pub fn touching_edges(&self, edge: EdgeKey) -> Result<Vec<EdgeKey>, IncidenceError> {
        let pivot = self.canonical_edge(edge)?;
        let groups = self
            .vertices_on_edge(edge)?
            .into_iter()
            .map(|v| self.edges_on_vertex(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(union_excluding(pivot, groups))
    }

    /// Vertices joined to `vertex` by an edge.
    pub fn adjacent_vertices(&self, vertex: VertexKey) -> Result<Vec<VertexKey>, IncidenceError> {
        let groups = self
            .edges_on_vertex(vertex)?
            .into_iter()
            .map(|e| self.vertices_on_edge(e))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(union_excluding(vertex, groups))
    }

    /// Vertices of the faces around `vertex`.
    pub fn surrounding_vertices(&self, vertex: VertexKey) -> Result<Vec<VertexKey>, IncidenceError> {
        let groups = self
            .faces_on_vertex(vertex)?
            .into_iter()
            .map(|f| self.vertices_on_face(f))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(union_excluding(vertex, groups))
    }

    // ── Coordinates ────────────────────────────────────────────

    fn position(&self, vertex: VertexKey) -> Option<Point> {
        let base = self.vertices.get(&vertex.vertex)?;
        Some(*base + self.matrix.offset(vertex.period))
    }

    fn polygon(&self, face: FaceKey) -> Option<Vec<Point>> {
        self.faces
            .get(&face.face)?
            .iter()
            .map(|v| self.position(v.checked_shifted(face.period)?))
            .collect()
    }

    /// Plane position of `vertex`.
    pub fn vertex_coordinates(&self, vertex: VertexKey) -> Result<Point, IncidenceError> {
        self.position(vertex)
            .ok_or(IncidenceError::UnknownVertex { vertex })
    }

    /// Boundary polygon of `face`.
    pub fn face_coordinates(&self, face: FaceKey) -> Result<Vec<Point>, IncidenceError> {
        self.vertices_on_face(face)?
            .into_iter()
            .map(|v| self.position(v).ok_or(IncidenceError::UnknownFace { face }))
            .collect()
    }

    /// Endpoint positions of `edge`.
    pub fn edge_coordinates(&self, edge: EdgeKey) -> Result<[Point; 2], IncidenceError> {
        let [a, b] = self.vertices_on_edge(edge)?;
        match (self.position(a), self.position(b)) {
            (Some(pa), Some(pb)) => Ok([pa, pb]),
            _ => Err(IncidenceError::UnknownEdge { edge }),
        }
    }

    // ── Face cover ─────────────────────────────────────────────

    /// Bounding boxes of the base faces at period `(0, 0)`.
    fn base_face_rects(&self) -> Vec<(FaceId, Rect)> {
        self.faces
            .keys()
            .filter_map(|&face| {
                let polygon = self.polygon(FaceKey {
                    period: Period::ZERO,
                    face,
                })?;
                Some((face, Rect::bounding_box(polygon)?))
            })
            .collect()
    }

    /// The base rectangle: one fundamental-domain-sized rectangle centred
    /// on the first vertex of the first face.
    pub fn base_rect(&self) -> Rect {
        let (w, h) = self.matrix.base_rect_size();
        let anchor = self
            .faces
            .values()
            .next()
            .and_then(|boundary| boundary.first())
            .and_then(|&v| self.position(v))
            .unwrap_or_default();
        Rect::centered(anchor, w, h)
    }

    /// Every periodic face whose bounding box intersects `rect`, with that box.
    ///
    /// `rect` must intersect some face at period `(0, 0)`; the
    /// [`base_rect`](Self::base_rect) always does.
    pub fn face_cover(&self, rect: Rect) -> Vec<(FaceKey, Rect)> {
        let incidence = self.incidence();
        let touching = self.faces.iter().flat_map(|(_, boundary)| {
            boundary.iter().flat_map(move |v| {
                incidence
                    .vertices
                    .get(&v.vertex)
                    .into_iter()
                    .flat_map(move |row| {
                        row.faces
                            .iter()
                            .filter_map(move |f| f.period.checked_add(v.period))
                    })
            })
        });
        find_face_cover(rect, &self.matrix, &self.base_face_rects(), touching)
    }

    // ── Point location ─────────────────────────────────────────

    fn face_locator(&self) -> &FaceLocator {
        self.face_locator.get_or_init(|| {
            let base_rect = self.base_rect();
            let bounds = base_rect.expand(base_rect.w.max(base_rect.h) * LOCATOR_MARGIN);
            let mut atlas = PolygonAtlas::new(bounds);
            for (face, _) in self.face_cover(bounds) {
                if let Some(polygon) = self.polygon(face) {
                    atlas.insert(polygon, face);
                }
            }
            tracing::debug!(faces = atlas.len(), "built face locator");
            FaceLocator { base_rect, atlas }
        })
    }

    /// Sites for every element produced by `elements_of` on the faces
    /// around the base rectangle, wide enough that the nearest site of
    /// any point in the base rectangle is present.
    fn nearest_locator<K, F>(&self, kind: &'static str, elements_of: F) -> Option<NearestLocator<K>>
    where
        K: Copy + Eq + Hash,
        F: Fn(FaceKey) -> Vec<(K, Point)>,
    {
        let base_rect = self.base_rect();
        let reach = self
            .base_face_rects()
            .iter()
            .map(|(_, r)| r.w + r.h)
            .fold(0.0, f64::max);
        let mut sites: IndexMap<K, Point> = IndexMap::new();
        for (face, _) in self.face_cover(base_rect.expand(reach)) {
            for (key, p) in elements_of(face) {
                sites.entry(key).or_insert(p);
            }
        }
        let sites: Vec<(Point, K)> = sites.into_iter().map(|(k, p)| (p, k)).collect();
        match VoronoiAtlas::build(sites, Some(base_rect)) {
            Ok(atlas) => {
                tracing::debug!(kind, sites = atlas.len(), "built nearest-site locator");
                Some(NearestLocator { base_rect, atlas })
            }
            Err(error) => {
                tracing::warn!(kind, %error, "nearest-site locator unavailable");
                None
            }
        }
    }

    fn edge_locator(&self) -> Option<&NearestLocator<EdgeKey>> {
        self.edge_locator
            .get_or_init(|| {
                self.nearest_locator("edge", |face| {
                    self.edges_on_face(face)
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|e| {
                            let [a, b] = self.edge_coordinates(e).ok()?;
                            Some((e, a.midpoint(b)))
                        })
                        .collect()
                })
            })
            .as_ref()
    }

    fn vertex_locator(&self) -> Option<&NearestLocator<VertexKey>> {
        self.vertex_locator
            .get_or_init(|| {
                self.nearest_locator("vertex", |face| {
                    self.vertices_on_face(face)
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|v| Some((v, self.position(v)?)))
                        .collect()
                })
            })
            .as_ref()
    }

    /// The face containing `p`, or `None` if `p` falls in a gap of an
    /// incomplete tiling (or is not finite).
    ///
    /// A point on an edge shared by two faces belongs to exactly one of them.
    pub fn find_face_at(&self, p: Point) -> Option<FaceKey> {
        let locator = self.face_locator();
        let (period, reduced) = self
            .matrix
            .reduce_point_from(p, locator.base_rect.origin())?;
        locator
            .atlas
            .candidates(reduced)
            .filter_map(|(_, face)| face.checked_shifted(period))
            .find(|&face| {
                self.polygon(face)
                    .is_some_and(|polygon| point_in_polygon(p, &polygon))
            })
    }

    /// The canonical edge whose midpoint is nearest to `p`.
    pub fn find_edge_at(&self, p: Point) -> Option<EdgeKey> {
        let locator = self.edge_locator()?;
        let (period, reduced) = self
            .matrix
            .reduce_point_from(p, locator.base_rect.origin())?;
        locator.atlas.nearest(reduced)?.checked_shifted(period)
    }

    /// The vertex nearest to `p`.
    pub fn find_vertex_at(&self, p: Point) -> Option<VertexKey> {
        let locator = self.vertex_locator()?;
        let (period, reduced) = self
            .matrix
            .reduce_point_from(p, locator.base_rect.origin())?;
        locator.atlas.nearest(reduced)?.checked_shifted(period)
    }
}

/// `key` moved by `by`, or an overflow error naming `by`.
fn shift<K: Periodic>(key: K, by: Period) -> Result<K, IncidenceError> {
    key.checked_shifted(by)
        .ok_or(IncidenceError::PeriodOverflow { period: by })
}

/// Every key of a stored row moved by `by`.
fn shift_all<'a, K, C>(row: impl IntoIterator<Item = &'a K>, by: Period) -> Result<C, IncidenceError>
where
    K: Periodic + 'a,
    C: FromIterator<K>,
{
    row.into_iter().map(|&k| shift(k, by)).collect()
}

/// Union of `groups` in first-seen order, without repeats and without `pivot`.
fn union_excluding<K, G>(pivot: K, groups: impl IntoIterator<Item = G>) -> Vec<K>
where
    K: Copy + Eq + Hash,
    G: IntoIterator<Item = K>,
{
    let mut seen = IndexSet::new();
    for group in groups {
        for key in group {
            if key != pivot {
                seen.insert(key);
            }
        }
    }
    seen.into_iter().collect()
}
