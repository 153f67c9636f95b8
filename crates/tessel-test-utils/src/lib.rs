//! Test utilities for Tessel development.
//!
//! [`fixtures`] holds the standard tilings used across the workspace's
//! tests and benchmarks. [`complete_fixtures`] lists the ones that cover
//! the whole plane, which is what the point-location checks need.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use tessel_core::TesselationConfig;

/// Every fixture that tiles the whole plane, by name.
pub fn complete_fixtures() -> Vec<(&'static str, TesselationConfig)> {
    vec![
        ("square", fixtures::square()),
        ("hexagon", fixtures::hexagon()),
        ("triangle", fixtures::triangle()),
        ("octagon", fixtures::octagon()),
        ("skewed_square", fixtures::skewed_square()),
        ("shifted_square", fixtures::shifted_square()),
    ]
}

/// Every fixture, complete or not, by name.
pub fn all_fixtures() -> Vec<(&'static str, TesselationConfig)> {
    let mut all = complete_fixtures();
    all.push(("stripe", fixtures::stripe()));
    all
}

/// Deterministic pseudo-random points in `[-extent, extent]²`.
///
/// A multiplicative hash of the index, so benches and tests see the same
/// points on every run.
pub fn scattered_points(count: usize, extent: f64) -> Vec<(f64, f64)> {
    (0..count as u64)
        .map(|i| {
            let hx = i.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 11;
            let hy = (i ^ 0x5555).wrapping_mul(0xC2B2_AE3D_27D4_EB4F) >> 11;
            let scale = (1u64 << 53) as f64;
            let x = (hx as f64 / scale) * 2.0 - 1.0;
            let y = (hy as f64 / scale) * 2.0 - 1.0;
            (x * extent, y * extent)
        })
        .collect()
}
