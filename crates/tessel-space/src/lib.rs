//! Periodic tilings of the plane.
//!
//! A [`Tesselation`] is built from one fundamental domain of faces and
//! vertices plus a period matrix. It answers three kinds of question about
//! the infinite tiling:
//!
//! - **Incidence**: edges and vertices of a face, faces and vertices of an
//!   edge, faces and edges around a vertex, and the derived neighbourhoods.
//! - **Coordinates**: plane positions of vertices, edges and face polygons.
//! - **Point location**: [`Tesselation::find_face_at`],
//!   [`Tesselation::find_edge_at`] and [`Tesselation::find_vertex_at`].
//!
//! [`FacePatch`] groups a finite set of faces and classifies edges as
//! inside, on the border of, or outside the patch.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod face_cover;
mod incidence;
pub mod region;
pub mod tesselation;

#[cfg(test)]
pub(crate) mod compliance;

pub use face_cover::find_face_cover;
pub use region::FacePatch;
pub use tesselation::Tesselation;
