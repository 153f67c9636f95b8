//! Construction input for a tesselation.

use crate::error::ConfigError;
use crate::geom::Point;
use crate::id::{FaceId, VertexId, VertexKey};
use crate::period::PeriodMatrix;
use indexmap::IndexMap;

/// Everything needed to build a tesselation.
///
/// `faces` maps each base face to its boundary, a closed cyclic sequence
/// of vertex keys (implicit closure, no repeated first vertex). The face
/// at period `q` has the boundary shifted by `q`. `vertices` gives the
/// coordinates of each base vertex at period `(0, 0)`.
///
/// Face insertion order is kept and defines the iteration order of every
/// per-face table.
#[derive(Clone, Debug, PartialEq)]
pub struct TesselationConfig {
    /// Period matrix `[a, b, c, d]`; columns are the lattice vectors.
    pub period_matrix: [f64; 4],
    /// Base face boundaries.
    pub faces: IndexMap<FaceId, Vec<VertexKey>>,
    /// Base vertex coordinates.
    pub vertices: IndexMap<VertexId, Point>,
}

impl TesselationConfig {
    /// An empty config over `period_matrix`.
    pub fn new(period_matrix: [f64; 4]) -> Self {
        Self {
            period_matrix,
            faces: IndexMap::new(),
            vertices: IndexMap::new(),
        }
    }

    /// Add (or replace) a base face given as `(dx, dy, vertex)` triples.
    pub fn with_face(mut self, face: u32, boundary: &[(i32, i32, u32)]) -> Self {
        self.faces.insert(
            FaceId(face),
            boundary
                .iter()
                .map(|&(dx, dy, v)| VertexKey::new(dx, dy, v))
                .collect(),
        );
        self
    }

    /// Add (or replace) a base vertex.
    pub fn with_vertex(mut self, vertex: u32, x: f64, y: f64) -> Self {
        self.vertices.insert(VertexId(vertex), Point::new(x, y));
        self
    }

    /// Validate the config, returning the validated period matrix.
    ///
    /// Reports the first problem found.
    pub fn validate(&self) -> Result<PeriodMatrix, ConfigError> {
        // 1. Period matrix must be finite and invertible.
        let matrix = PeriodMatrix::new(self.period_matrix)?;
        // 2. At least one face.
        if self.faces.is_empty() {
            return Err(ConfigError::NoFaces);
        }
        // 3. Vertex coordinates must be finite.
        for (&vertex, p) in &self.vertices {
            if !p.is_finite() {
                return Err(ConfigError::NonFiniteVertex { vertex });
            }
        }
        for (&face, boundary) in &self.faces {
            // 4. Each face is at least a triangle.
            if boundary.len() < 3 {
                return Err(ConfigError::TooFewVertices {
                    face,
                    count: boundary.len(),
                });
            }
            for (position, key) in boundary.iter().enumerate() {
                // 5. Every boundary vertex exists.
                if !self.vertices.contains_key(&key.vertex) {
                    return Err(ConfigError::UnknownVertex {
                        face,
                        position,
                        vertex: key.vertex,
                    });
                }
                // 6. No zero-length edges.
                let next = &boundary[(position + 1) % boundary.len()];
                if key == next {
                    return Err(ConfigError::DegenerateEdge { face, position });
                }
            }
        }
        Ok(matrix)
    }
}
