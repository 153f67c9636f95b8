//! Core types for the Tessel periodic tiling engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the periodic element keys, planar geometry primitives, the period
//! lattice math, the construction config and the error types shared by
//! the rest of the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod geom;
pub mod id;
pub mod period;

pub use config::TesselationConfig;
pub use error::{ConfigError, IncidenceError};
pub use geom::{point_in_polygon, Point, Rect};
pub use id::{EdgeKey, FaceId, FaceKey, Period, Periodic, VertexId, VertexKey};
pub use period::PeriodMatrix;
