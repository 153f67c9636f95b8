//! Benchmark profiles for the Tessel tiling engine.
//!
//! - [`grid_profile`]: an `n × n` block of unit squares per period, for
//!   stressing the incidence build and the locators with many base faces.
//! - [`query_points`]: deterministic query points.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tessel_core::{Point, TesselationConfig};

/// `n × n` unit squares per period over an `n`-periodic lattice.
///
/// Vertex `i + n·j` sits at `(i, j)`; faces are numbered the same way by
/// their lower-left vertex.
pub fn grid_profile(n: u32) -> TesselationConfig {
    let side = n as i32;
    let id = |i: i32, j: i32| (i.rem_euclid(side) + side * j.rem_euclid(side)) as u32;
    let key = |i: i32, j: i32| (i.div_euclid(side), j.div_euclid(side), id(i, j));

    let mut config = TesselationConfig::new([f64::from(n), 0.0, 0.0, f64::from(n)]);
    for j in 0..side {
        for i in 0..side {
            config = config.with_vertex(id(i, j), f64::from(i), f64::from(j));
        }
    }
    for j in 0..side {
        for i in 0..side {
            config = config.with_face(
                id(i, j),
                &[key(i, j), key(i + 1, j), key(i + 1, j + 1), key(i, j + 1)],
            );
        }
    }
    config
}

/// `count` deterministic points in `[-extent, extent]²`.
pub fn query_points(count: u64, extent: f64) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let hx = i.wrapping_mul(6364136223846793007) >> 11;
            let hy = i.wrapping_mul(1442695040888963407) >> 11;
            let unit = |h: u64| (h as f64 / (1u64 << 53) as f64) * 2.0 - 1.0;
            Point::new(unit(hx) * extent, unit(hy) * extent)
        })
        .collect()
}
