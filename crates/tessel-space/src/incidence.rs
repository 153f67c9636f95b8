//! Incidence tables: which edges and vertices bound each face, which faces
//! and vertices meet at each edge, and which faces and edges surround each
//! vertex.
//!
//! Every row is stored for the base copy of an element (period `(0, 0)`);
//! queries shift the row by the period of the queried key.
//!
//! # Canonical edges
//!
//! Edge `i` of a face joins boundary vertices `i` and `i + 1`. Two faces
//! sharing a geometric edge each name it, so the build pairs up names by
//! the period-relative shape of their endpoint pair and keeps the lower
//! claim (in [`EdgeKey`] order) as the canonical name. The other name maps
//! to it through the edge table, together with the period shift between
//! the two naming faces.

use indexmap::{IndexMap, IndexSet};
use smallvec::{smallvec, SmallVec};
use tessel_core::{EdgeKey, FaceId, FaceKey, Period, Periodic, VertexId, VertexKey};

/// Incidence row of one base face.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FaceRow {
    /// Boundary, as given in the config.
    pub(crate) vertices: Vec<VertexKey>,
    /// Canonical name of boundary edge `i`, index-aligned with `vertices`.
    pub(crate) canonical: Vec<EdgeKey>,
    /// `canonical` with repeats removed, first occurrence kept.
    pub(crate) edges: Vec<EdgeKey>,
    /// Faces meeting at boundary edge `i` (one or two).
    pub(crate) faces_on_edge: Vec<SmallVec<[FaceKey; 2]>>,
}

impl FaceRow {
    /// Endpoints of boundary edge `i`.
    pub(crate) fn edge_vertices(&self, i: usize) -> [VertexKey; 2] {
        [self.vertices[i], self.vertices[(i + 1) % self.vertices.len()]]
    }
}

/// Incidence row of one base vertex, in walk order around the vertex.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct VertexRow {
    pub(crate) faces: Vec<FaceKey>,
    pub(crate) edges: Vec<EdgeKey>,
}

/// The memoized incidence tables of a tesselation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Incidence {
    pub(crate) faces: IndexMap<FaceId, FaceRow>,
    pub(crate) vertices: IndexMap<VertexId, VertexRow>,
}

/// Endpoint-pair shape shared by every name of one geometric edge:
/// lower vertex id, upper minus lower period, upper vertex id.
type EdgeShape = (VertexId, Period, VertexId);

impl Incidence {
    /// Build every table from the face boundaries.
    ///
    /// `vertex_ids` lists all base vertices; ones on no face get empty rows.
    pub(crate) fn build<'a, I>(faces: &IndexMap<FaceId, Vec<VertexKey>>, vertex_ids: I) -> Self
    where
        I: IntoIterator<Item = &'a VertexId>,
    {
        // 1. Group provisional edge names by endpoint shape.
        let mut claims: IndexMap<EdgeShape, Vec<EdgeKey>> = IndexMap::new();
        for (&face, boundary) in faces {
            for i in 0..boundary.len() {
                let a = boundary[i];
                let b = boundary[(i + 1) % boundary.len()];
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let shape = (lo.vertex, hi.period - lo.period, hi.vertex);
                let claim = EdgeKey {
                    period: -lo.period,
                    index: i as u32,
                    face,
                };
                claims.entry(shape).or_default().push(claim);
            }
        }

        // 2. Resolve each group into canonical names and incident faces.
        let mut rows: IndexMap<FaceId, FaceRow> = faces
            .iter()
            .map(|(&face, boundary)| {
                let n = boundary.len();
                let row = FaceRow {
                    vertices: boundary.clone(),
                    canonical: (0..n as u32)
                        .map(|index| EdgeKey {
                            period: Period::ZERO,
                            index,
                            face,
                        })
                        .collect(),
                    edges: Vec::with_capacity(n),
                    faces_on_edge: (0..n)
                        .map(|_| smallvec![FaceKey { period: Period::ZERO, face }])
                        .collect(),
                };
                (face, row)
            })
            .collect();

        for (shape, mut group) in claims {
            if group.len() < 2 {
                continue;
            }
            group.sort();
            if group.len() > 2 {
                tracing::warn!(
                    shape = ?shape,
                    claims = group.len(),
                    "edge claimed by more than two faces; pairing the lowest two"
                );
            }
            let (lo, hi) = (group[0], group[1]);
            let lo_face = FaceKey {
                period: Period::ZERO,
                face: lo.face,
            };
            let hi_face = FaceKey {
                period: Period::ZERO,
                face: hi.face,
            };
            let to_hi = hi.period - lo.period;
            if let Some(row) = rows.get_mut(&lo.face) {
                row.faces_on_edge[lo.index as usize] = smallvec![lo_face, hi_face.shifted(to_hi)];
            }
            if let Some(row) = rows.get_mut(&hi.face) {
                let i = hi.index as usize;
                row.canonical[i] = EdgeKey {
                    period: -to_hi,
                    ..lo
                };
                row.faces_on_edge[i] = smallvec![lo_face.shifted(-to_hi), hi_face];
            }
        }

        // 3. Edges on face: canonical names, deduplicated.
        for row in rows.values_mut() {
            let unique: IndexSet<EdgeKey> = row.canonical.iter().copied().collect();
            row.edges = unique.into_iter().collect();
        }

        // 4. Walk around every vertex.
        let mut preliminary: IndexMap<VertexId, Vec<FaceKey>> = IndexMap::new();
        for id in vertex_ids {
            preliminary.entry(*id).or_default();
        }
        for (&face, boundary) in faces {
            for v in boundary {
                preliminary.entry(v.vertex).or_default().push(FaceKey {
                    period: -v.period,
                    face,
                });
            }
        }
        let vertices = preliminary
            .into_iter()
            .map(|(id, start)| (id, walk_around(&rows, id, &start)))
            .collect();

        let incidence = Self {
            faces: rows,
            vertices,
        };
        tracing::debug!(
            faces = incidence.faces.len(),
            edges = incidence.faces.values().map(|r| r.edges.len()).sum::<usize>(),
            vertices = incidence.vertices.len(),
            "built incidence tables"
        );
        incidence
    }

    /// Canonical name of any valid edge name, or `None` if unknown or if
    /// the canonical period overflows.
    pub(crate) fn canonical(&self, edge: EdgeKey) -> Option<EdgeKey> {
        let (row, i) = self.edge_slot(edge)?;
        row.canonical[i].checked_shifted(edge.period)
    }

    /// The slot an edge name refers to: its face row and boundary index.
    pub(crate) fn edge_slot(&self, edge: EdgeKey) -> Option<(&FaceRow, usize)> {
        let row = self.faces.get(&edge.face)?;
        let i = edge.index as usize;
        (i < row.vertices.len()).then_some((row, i))
    }
}

enum Step {
    /// Enter `face` having arrived across `via`.
    Face { face: FaceKey, via: EdgeKey },
    /// Cross `edge` having arrived from `from`.
    Edge { from: FaceKey, edge: EdgeKey },
}

/// Collect faces and edges around base vertex `id` at period `(0, 0)`.
///
/// Alternates between "the other edge at this vertex on the current face"
/// and "the other face across the current edge". Around an interior vertex
/// of a complete tiling this yields the cyclic order; at gaps each start
/// face restarts the walk so every incident element is still found.
fn walk_around(rows: &IndexMap<FaceId, FaceRow>, id: VertexId, start: &[FaceKey]) -> VertexRow {
    let pivot = VertexKey {
        period: Period::ZERO,
        vertex: id,
    };
    let mut faces: IndexSet<FaceKey> = IndexSet::new();
    let mut edges: IndexSet<EdgeKey> = IndexSet::new();

    let run = |mut step: Step, faces: &mut IndexSet<FaceKey>, edges: &mut IndexSet<EdgeKey>| loop {
        step = match step {
            Step::Face { face, via } => {
                if !faces.insert(face) {
                    break;
                }
                match other_edge_at(rows, pivot, face, Some(via)) {
                    Some(edge) => Step::Edge { from: face, edge },
                    None => break,
                }
            }
            Step::Edge { from, edge } => {
                if !edges.insert(edge) {
                    break;
                }
                match other_face_across(rows, from, edge) {
                    Some(face) => Step::Face { face, via: edge },
                    None => break,
                }
            }
        };
    };

    for &face in start {
        let Some(first) = other_edge_at(rows, pivot, face, None) else {
            continue;
        };
        run(Step::Face { face, via: first }, &mut faces, &mut edges);
        run(
            Step::Edge {
                from: face,
                edge: first,
            },
            &mut faces,
            &mut edges,
        );
    }

    VertexRow {
        faces: faces.into_iter().collect(),
        edges: edges.into_iter().collect(),
    }
}

/// The edge of `face` leaving `pivot` that is not `prev`.
///
/// Without `prev` this is the edge starting at `pivot`; if that is `prev`,
/// it is the edge ending at `pivot`.
fn other_edge_at(
    rows: &IndexMap<FaceId, FaceRow>,
    pivot: VertexKey,
    face: FaceKey,
    prev: Option<EdgeKey>,
) -> Option<EdgeKey> {
    let row = rows.get(&face.face)?;
    let k = row
        .vertices
        .iter()
        .position(|v| v.shifted(face.period) == pivot)?;
    let leaving = row.canonical[k].shifted(face.period);
    if prev != Some(leaving) {
        return Some(leaving);
    }
    let n = row.canonical.len();
    Some(row.canonical[(k + n - 1) % n].shifted(face.period))
}

/// The face across canonical `edge` from `face`, if the edge has two faces.
fn other_face_across(rows: &IndexMap<FaceId, FaceRow>, face: FaceKey, edge: EdgeKey) -> Option<FaceKey> {
    let row = rows.get(&edge.face)?;
    let pair = row.faces_on_edge.get(edge.index as usize)?;
    if pair.len() < 2 {
        return None;
    }
    let a = pair[0].shifted(edge.period);
    let b = pair[1].shifted(edge.period);
    Some(if a == face { b } else { a })
}
