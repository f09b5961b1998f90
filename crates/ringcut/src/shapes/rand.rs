//! Random star-shaped polygons for stress tests and benchmarks.
//!
//! Model
//! - Vertex `k` of `n` sits at angle `phase + k·Δ` (Δ = 2π/n) nudged by less
//!   than half a step, so angles stay strictly increasing and every ray from
//!   the origin crosses the ring once: the result is simple and
//!   counter-clockwise, with exactly `n − 2` triangles.
//! - Radii wobble around `radius`, which makes plenty of reflex vertices.
//! - `ReplayToken { seed, index }` picks the random stream, so draw `index` of
//!   a batch can be regenerated on its own.

use std::f64::consts::TAU;

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Polygon;

/// How many vertices a draw gets; never fewer than 3.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    /// Inclusive range.
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn draw(self, rng: &mut StdRng) -> usize {
        match self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let min = min.max(3);
                rng.gen_range(min..=max.max(min))
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Largest angular nudge, in steps Δ. Kept below 0.5 so vertices never
    /// swap order.
    pub angle_jitter: f64,
    /// Relative radius wobble; radii lie in `radius · [1 − w, 1 + w]`, `w < 1`.
    pub radius_jitter: f64,
    pub radius: f64,
    /// Rotate the whole ring by a random angle.
    pub rotate: bool,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter: 0.3,
            radius_jitter: 0.25,
            radius: 1.0,
            rotate: true,
        }
    }
}

/// Address of one draw: a batch seed plus the position inside the batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    fn rng(self) -> StdRng {
        StdRng::seed_from_u64(splitmix64(self.seed ^ splitmix64(self.index)))
    }
}

/// One SplitMix64 step; spreads nearby seeds and indices apart.
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Draw a simple star-shaped polygon around the origin, counter-clockwise.
pub fn draw_radial(cfg: RadialCfg, tok: ReplayToken) -> Polygon {
    let mut rng = tok.rng();
    let n = cfg.vertex_count.draw(&mut rng);
    let step = TAU / n as f64;
    let nudge = cfg.angle_jitter.clamp(0.0, 0.49) * step;
    let wobble = cfg.radius_jitter.clamp(0.0, 0.95);
    let radius = cfg.radius.max(1e-9);
    let phase = if cfg.rotate { rng.gen_range(0.0..TAU) } else { 0.0 };

    let ring: Vec<Vector2<f64>> = (0..n)
        .map(|k| {
            let th = phase + k as f64 * step + rng.gen_range(-1.0..=1.0) * nudge;
            let r = radius * (1.0 + rng.gen_range(-1.0..=1.0) * wobble);
            Vector2::new(r * th.cos(), r * th.sin())
        })
        .collect();
    Polygon::from_ring(ring)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_token_same_polygon() {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Fixed(10),
            ..RadialCfg::default()
        };
        let tok = ReplayToken { seed: 42, index: 7 };
        let p1 = draw_radial(cfg, tok);
        assert_eq!(p1, draw_radial(cfg, tok));
        assert_eq!(p1.len(), 10);
        assert_eq!(p1.ring_ends, vec![10]);
        assert_ne!(p1, draw_radial(cfg, ReplayToken { seed: 42, index: 8 }));
    }

    #[test]
    fn uniform_count_stays_in_range() {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Uniform { min: 1, max: 6 },
            ..RadialCfg::default()
        };
        for index in 0..32 {
            let p = draw_radial(cfg, ReplayToken { seed: 3, index });
            assert!((3..=6).contains(&p.len()));
        }
    }

    #[test]
    fn angles_increase_around_the_origin() {
        for index in 0..16 {
            let p = draw_radial(RadialCfg::default(), ReplayToken { seed: 9, index });
            assert!(crate::quality::signed_ring_area(&p.points) > 0.0);
            let turns: f64 = p
                .points
                .iter()
                .zip(p.points.iter().cycle().skip(1))
                .map(|(a, b)| (a[0] * b[1] - a[1] * b[0]).atan2(a[0] * b[0] + a[1] * b[1]))
                .inspect(|d| assert!(*d > 0.0))
                .sum();
            assert!((turns - TAU).abs() < 1e-9);
        }
    }
}
