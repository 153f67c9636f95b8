//! Point-location indexes for the Tessel tiling engine.
//!
//! All indexes are built once and never mutated afterwards:
//!
//! - [`QuadTree`]: adaptive rectangle index answering "which rectangles
//!   contain this point".
//! - [`PolygonAtlas`]: polygons registered by bounding box in a quad tree,
//!   refined with an exact point-in-polygon test.
//! - [`VoronoiAtlas`]: nearest-site lookup as cell containment over
//!   slightly enlarged Voronoi cells.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod polygon_atlas;
pub mod quadtree;
pub mod voronoi_atlas;

pub use error::IndexError;
pub use polygon_atlas::PolygonAtlas;
pub use quadtree::QuadTree;
pub use voronoi_atlas::VoronoiAtlas;
