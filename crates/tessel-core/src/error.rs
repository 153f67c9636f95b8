//! Error types for tesselation construction and incidence queries.

use crate::id::{EdgeKey, FaceId, FaceKey, Period, VertexId, VertexKey};
use std::error::Error;
use std::fmt;

/// Errors detected while validating a [`TesselationConfig`](crate::TesselationConfig).
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The period matrix contains NaN or infinity.
    NonFinitePeriodMatrix {
        /// The offending matrix `[a, b, c, d]`.
        matrix: [f64; 4],
    },
    /// The period matrix does not have an inverse.
    SingularPeriodMatrix {
        /// The offending matrix `[a, b, c, d]`.
        matrix: [f64; 4],
    },
    /// The face table is empty.
    NoFaces,
    /// A face has fewer than three boundary vertices.
    TooFewVertices {
        /// The offending face.
        face: FaceId,
        /// Number of boundary vertices given.
        count: usize,
    },
    /// A face boundary references a vertex missing from the vertex table.
    UnknownVertex {
        /// The face whose boundary holds the reference.
        face: FaceId,
        /// Position of the reference on the boundary.
        position: usize,
        /// The missing base vertex.
        vertex: VertexId,
    },
    /// Two consecutive boundary entries of a face are the same vertex.
    DegenerateEdge {
        /// The offending face.
        face: FaceId,
        /// Index of the zero-length edge.
        position: usize,
    },
    /// A vertex coordinate is NaN or infinite.
    NonFiniteVertex {
        /// The offending base vertex.
        vertex: VertexId,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinitePeriodMatrix { matrix } => {
                write!(f, "period matrix {matrix:?} is not finite")
            }
            Self::SingularPeriodMatrix { matrix } => {
                write!(f, "period matrix {matrix:?} is singular")
            }
            Self::NoFaces => write!(f, "tesselation has no faces"),
            Self::TooFewVertices { face, count } => {
                write!(f, "face {face} has {count} vertices, need at least 3")
            }
            Self::UnknownVertex {
                face,
                position,
                vertex,
            } => write!(
                f,
                "face {face} references unknown vertex {vertex} at position {position}"
            ),
            Self::DegenerateEdge { face, position } => {
                write!(f, "face {face} has a zero-length edge at index {position}")
            }
            Self::NonFiniteVertex { vertex } => {
                write!(f, "vertex {vertex} has non-finite coordinates")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from incidence and coordinate queries on a tesselation.
///
/// Returned when a key names a base face, edge index or base vertex that
/// does not exist, or when an answer would lie in a lattice copy whose
/// period does not fit in `i32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncidenceError {
    /// The key's base face is not part of the tesselation.
    UnknownFace {
        /// The rejected key.
        face: FaceKey,
    },
    /// The key's base face is unknown or its index is past the face's edge count.
    UnknownEdge {
        /// The rejected key.
        edge: EdgeKey,
    },
    /// The key's base vertex is not part of the tesselation.
    UnknownVertex {
        /// The rejected key.
        vertex: VertexKey,
    },
    /// Shifting a stored row to the queried period overflows `i32`.
    PeriodOverflow {
        /// Period of the queried key.
        period: Period,
    },
}

impl fmt::Display for IncidenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFace { face } => write!(f, "unknown face {face}"),
            Self::UnknownEdge { edge } => write!(f, "unknown edge {edge}"),
            Self::UnknownVertex { vertex } => write!(f, "unknown vertex {vertex}"),
            Self::PeriodOverflow { period } => {
                write!(f, "answer at period {period} lies outside the i32 range")
            }
        }
    }
}

impl Error for IncidenceError {}
