//! Finite patches of faces and edge classification against them.

use crate::tesselation::Tesselation;
use indexmap::IndexSet;
use tessel_core::{EdgeKey, FaceKey, IncidenceError, Rect, VertexKey};

/// A finite set of faces of a [`Tesselation`], with the canonical edges and
/// vertices bounding them.
///
/// Every set keeps first-seen order.
#[derive(Clone, Debug)]
pub struct FacePatch<'t> {
    tesselation: &'t Tesselation,
    faces: IndexSet<FaceKey>,
    edges: IndexSet<EdgeKey>,
    vertices: IndexSet<VertexKey>,
}

impl<'t> FacePatch<'t> {
    /// Collect `faces` and everything on their boundaries.
    ///
    /// Fails on the first face unknown to `tesselation`.
    pub fn new<I>(tesselation: &'t Tesselation, faces: I) -> Result<Self, IncidenceError>
    where
        I: IntoIterator<Item = FaceKey>,
    {
        let mut patch = Self {
            tesselation,
            faces: IndexSet::new(),
            edges: IndexSet::new(),
            vertices: IndexSet::new(),
        };
        for face in faces {
            if !patch.faces.insert(face) {
                continue;
            }
            patch.edges.extend(tesselation.edges_on_face(face)?);
            patch.vertices.extend(tesselation.vertices_on_face(face)?);
        }
        Ok(patch)
    }

    /// Number of faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the patch has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The faces of the patch.
    pub fn faces(&self) -> impl ExactSizeIterator<Item = FaceKey> + '_ {
        self.faces.iter().copied()
    }

    /// Canonical edges bounding any face of the patch.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = EdgeKey> + '_ {
        self.edges.iter().copied()
    }

    /// Vertices of any face of the patch.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = VertexKey> + '_ {
        self.vertices.iter().copied()
    }

    /// Whether `face` is in the patch.
    pub fn has_face(&self, face: FaceKey) -> bool {
        self.faces.contains(&face)
    }

    /// Whether `edge`, under any of its names, bounds a face of the patch.
    ///
    /// An unknown edge name is never in the patch.
    pub fn has_edge(&self, edge: EdgeKey) -> bool {
        self.edges.contains(&edge)
            || self
                .tesselation
                .canonical_edge(edge)
                .is_ok_and(|c| self.edges.contains(&c))
    }

    /// Whether `vertex` is on a face of the patch.
    pub fn has_vertex(&self, vertex: VertexKey) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Whether both faces of `edge` are in the patch.
    ///
    /// An edge with a single face is never inside.
    pub fn is_edge_inside(&self, edge: EdgeKey) -> bool {
        match self.tesselation.faces_on_edge(edge) {
            Ok(faces) => faces.len() == 2 && faces.iter().all(|f| self.faces.contains(f)),
            Err(_) => false,
        }
    }

    /// Whether `edge` bounds the patch without being inside it.
    pub fn is_edge_on_border(&self, edge: EdgeKey) -> bool {
        self.has_edge(edge) && !self.is_edge_inside(edge)
    }

    /// Whether `edge` touches no face of the patch.
    pub fn is_edge_outside(&self, edge: EdgeKey) -> bool {
        !self.has_edge(edge)
    }

    /// Bounding box of the patch's vertices, or `None` if empty.
    pub fn bounding_box(&self) -> Option<Rect> {
        Rect::bounding_box(
            self.vertices
                .iter()
                .filter_map(|&v| self.tesselation.vertex_coordinates(v).ok()),
        )
    }
}
