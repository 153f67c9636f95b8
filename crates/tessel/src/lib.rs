//! Tessel: periodic tilings of the plane.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Tessel sub-crates. For most users, adding `tessel` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tessel::prelude::*;
//!
//! // Regular triangles approximated on integer coordinates: two faces
//! // sharing one vertex per period.
//! let config = TesselationConfig::new([2.0, 1.0, 0.0, 2.0])
//!     .with_vertex(0, 0.0, 0.0)
//!     .with_face(0, &[(0, 0, 0), (1, 0, 0), (0, 1, 0)])
//!     .with_face(1, &[(1, 0, 0), (1, 1, 0), (0, 1, 0)]);
//! let tess = Tesselation::new(config).unwrap();
//!
//! let face = tess.find_face_at(Point::new(1.0, 1.0)).unwrap();
//! assert_eq!(face, FaceKey::new(0, 0, 0));
//! assert_eq!(tess.adjacent_faces(face).unwrap().len(), 3);
//! assert_eq!(tess.faces_on_vertex(VertexKey::new(0, 0, 0)).unwrap().len(), 6);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tessel-core` | Periodic keys, geometry, period matrix, config, errors |
//! | [`index`] | `tessel-index` | Quad tree, polygon atlas, Voronoi atlas |
//! | [`space`] | `tessel-space` | The tesselation engine, face cover, face patches |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Periodic keys, geometry and lattice math (`tessel-core`).
///
/// Contains [`types::TesselationConfig`], [`types::PeriodMatrix`] and the
/// error types [`types::ConfigError`] and [`types::IncidenceError`].
pub use tessel_core as types;

/// Point-location indexes (`tessel-index`).
///
/// [`index::QuadTree`], [`index::PolygonAtlas`] and
/// [`index::VoronoiAtlas`] are usable on their own.
pub use tessel_index as index;

/// The tesselation engine (`tessel-space`).
///
/// [`space::Tesselation`] answers incidence, coordinate and point-location
/// queries; [`space::FacePatch`] classifies edges against a set of faces.
pub use tessel_space as space;

/// Common imports for typical Tessel usage.
///
/// ```rust
/// use tessel::prelude::*;
/// ```
pub mod prelude {
    // Keys
    pub use tessel_core::{EdgeKey, FaceId, FaceKey, Period, Periodic, VertexId, VertexKey};

    // Geometry and construction
    pub use tessel_core::{Point, Rect, TesselationConfig};

    // Errors
    pub use tessel_core::{ConfigError, IncidenceError};

    // Engine
    pub use tessel_space::{FacePatch, Tesselation};
}
