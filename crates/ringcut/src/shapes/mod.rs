//! Sample polygons for tests, benchmarks and the CLI.
//!
//! Purpose
//! - Produce ring-delimited point buffers in the layout `triangulate` takes:
//!   outer ring first, holes after, `ring_ends` as exclusive offsets.
//! - Shapes are simple polygons with known triangle counts, so callers can
//!   check `(n + 2h − 2)` triangles and zero `deviation`.
//!
//! Contents
//! - `Polygon`: owned points plus ring ends, with affine transforms.
//! - `regular`, `star`, `square_with_holes`: closed-form shapes.
//! - `rand`: reproducible random star-shaped polygons (`RadialCfg`, `ReplayToken`).

pub mod rand;

use nalgebra::{Matrix2, Vector2};

use crate::coord::Coord;
use crate::earcut::triangulate;
use crate::error::RingBoundaryError;
use crate::quality::{deviation, QualityError};

/// Polygon with holes as a flat point list plus ring ends.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub points: Vec<[f64; 2]>,
    pub ring_ends: Vec<u32>,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polygon with a single outer ring.
    pub fn from_ring<I: IntoIterator<Item = Vector2<f64>>>(ring: I) -> Self {
        let mut p = Self::new();
        p.push_ring(ring);
        p
    }

    /// Append a ring; the first ring pushed is the outer boundary. Empty rings
    /// are ignored since ring ends must be strictly increasing.
    pub fn push_ring<I: IntoIterator<Item = Vector2<f64>>>(&mut self, ring: I) {
        let before = self.points.len();
        self.points.extend(ring.into_iter().map(|v| [v.x, v.y]));
        if self.points.len() > before {
            self.ring_ends.push(self.points.len() as u32);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of holes.
    pub fn holes(&self) -> usize {
        self.ring_ends.len().saturating_sub(1)
    }

    /// Triangle count of an exact triangulation without Steiner points.
    pub fn expected_triangles(&self) -> usize {
        (self.len() + 2 * self.holes()).saturating_sub(2)
    }

    pub fn triangulate(&self) -> Result<Vec<u32>, RingBoundaryError> {
        triangulate(&self.points, &self.ring_ends)
    }

    pub fn deviation(&self, indices: &[u32]) -> Result<f64, QualityError> {
        deviation(&self.points, &self.ring_ends, indices)
    }

    /// Apply `x ↦ m·x + t` to every point; ring structure is unchanged.
    pub fn transformed(&self, m: &Matrix2<f64>, t: &Vector2<f64>) -> Polygon {
        let points = self
            .points
            .iter()
            .map(|p| {
                let q = m * Vector2::new(p[0], p[1]) + t;
                [q.x, q.y]
            })
            .collect();
        Polygon {
            points,
            ring_ends: self.ring_ends.clone(),
        }
    }

    /// Convert coordinates, e.g. to snap onto an integer grid.
    pub fn map_points<U: Coord, F: Fn(f64) -> U>(&self, f: F) -> Vec<[U; 2]> {
        self.points.iter().map(|p| [f(p[0]), f(p[1])]).collect()
    }
}

/// Unit-spaced angles `2πk/n + phase`.
fn angles(n: usize, phase: f64) -> impl Iterator<Item = f64> {
    let step = 2.0 * std::f64::consts::PI / n as f64;
    (0..n).map(move |k| phase + k as f64 * step)
}

#[inline]
fn polar(r: f64, th: f64) -> Vector2<f64> {
    Vector2::new(r * th.cos(), r * th.sin())
}

/// Regular `n`-gon of circumradius `r` around the origin, counter-clockwise.
pub fn regular(n: usize, r: f64) -> Polygon {
    Polygon::from_ring(angles(n, 0.0).map(|th| polar(r, th)))
}

/// Star with `spikes` outer tips at radius `r_out` and notches at `r_in`.
pub fn star(spikes: usize, r_out: f64, r_in: f64) -> Polygon {
    let half = std::f64::consts::PI / spikes.max(1) as f64;
    Polygon::from_ring(
        angles(spikes, 0.0).flat_map(|th| [polar(r_out, th), polar(r_in, th + half)]),
    )
}

/// Square `[0, size]²` with a `grid × grid` array of square holes, each
/// covering `frac` of its cell's side (clamped to `(0, 0.9]`).
pub fn square_with_holes(size: f64, grid: usize, frac: f64) -> Polygon {
    let mut p = Polygon::from_ring([
        Vector2::new(0.0, 0.0),
        Vector2::new(size, 0.0),
        Vector2::new(size, size),
        Vector2::new(0.0, size),
    ]);
    if grid == 0 {
        return p;
    }
    let cell = size / grid as f64;
    let side = cell * frac.clamp(f64::EPSILON, 0.9);
    let pad = 0.5 * (cell - side);
    for row in 0..grid {
        for col in 0..grid {
            let o = Vector2::new(col as f64 * cell + pad, row as f64 * cell + pad);
            // Holes given clockwise; the engine accepts either winding.
            p.push_ring([
                o,
                o + Vector2::new(0.0, side),
                o + Vector2::new(side, side),
                o + Vector2::new(side, 0.0),
            ]);
        }
    }
    p
}
