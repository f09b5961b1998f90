//! Ear-clipping triangulation of polygons with holes.
//!
//! Input is a point buffer split into rings by exclusive end offsets: the
//! first ring is the outer boundary, every later ring a hole. Output is a flat
//! `Vec<u32>` of point indices, three per triangle. Winding of the input does
//! not matter; degenerate input (duplicates, collinear runs, touching or
//! slightly self-intersecting rings) never panics and yields a best-effort
//! result.
//!
//! Stages
//! - `rings`: validate ring ends (the only source of errors).
//! - `build`: one circular node list per ring, canonical winding.
//! - `holes`: bridge holes into the outer ring.
//! - `zorder`: Morton-key index for large inputs.
//! - `clip`: ear clipping plus the recovery cascade.
//!
//! Coordinates may be `f32`, `f64`, `i32` or `i64`; predicates run in a widened
//! type (see [`Coord`]) so integer input is evaluated exactly.
//!
//! ```
//! let points = [
//!     [0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0],
//!     [3.0, 3.0], [7.0, 3.0], [7.0, 7.0], [3.0, 7.0],
//! ];
//! let tri = ringcut::triangulate(&points, &[4u32, 8]).unwrap();
//! assert_eq!(tri.len(), 8 * 3);
//! ```

mod assemble;
mod build;
mod clip;
pub mod coord;
mod earcut;
pub mod error;
mod geom;
mod holes;
mod list;
pub mod quality;
pub mod rings;
pub mod shapes;
mod zorder;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use assemble::triples;
pub use coord::Coord;
pub use earcut::{triangulate, triangulate_flat, triangulate_with, Earcut, EarcutCfg};
pub use error::RingBoundaryError;
pub use quality::{deviation, signed_ring_area, QualityError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::shapes::rand::{draw_radial, RadialCfg, ReplayToken, VertexCount};
    pub use crate::shapes::{regular, square_with_holes, star, Polygon};
    pub use crate::{
        deviation, triangulate, triangulate_flat, triangulate_with, triples, Coord, Earcut,
        EarcutCfg, RingBoundaryError,
    };
}

#[cfg(test)]
mod tests;
