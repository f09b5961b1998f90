//! Triangulation entry points.
//!
//! Pipeline per call: validate ring ends → link the outer ring → merge holes
//! → optionally build the Z-order index → clip ears. Each call owns its node
//! arena; `Earcut` keeps the allocation around for repeated use.

use num_traits::PrimInt;

use crate::build::{cycle_len_at_most, link_ring};
use crate::clip::Engine;
use crate::coord::Coord;
use crate::error::RingBoundaryError;
use crate::holes::eliminate_holes;
use crate::list::Arena;
use crate::rings::ring_ranges;
use crate::zorder::ZIndex;

/// Engine tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EarcutCfg {
    /// Build the Z-order index once the merged cycle has more nodes than this.
    pub hash_threshold: usize,
    /// Force-clip when no ear and no diagonal is left, instead of dropping the
    /// rest of the cycle.
    pub recover: bool,
    /// Keep single-point holes as interior vertices.
    pub steiner_points: bool,
}

impl Default for EarcutCfg {
    fn default() -> Self {
        Self {
            hash_threshold: 80,
            recover: true,
            steiner_points: false,
        }
    }
}

/// Reusable triangulator.
///
/// ```
/// use ringcut::Earcut;
///
/// let mut earcut = Earcut::new();
/// let square = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
/// let mut out = Vec::new();
/// earcut.triangulate_into(&square, &[4u32], &mut out).unwrap();
/// assert_eq!(out, vec![2, 3, 0, 0, 1, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct Earcut<T> {
    arena: Arena<T>,
    cfg: EarcutCfg,
}

impl<T: Coord> Default for Earcut<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Coord> Earcut<T> {
    pub fn new() -> Self {
        Self::with_cfg(EarcutCfg::default())
    }

    pub fn with_cfg(cfg: EarcutCfg) -> Self {
        Self {
            arena: Arena::with_capacity(0),
            cfg,
        }
    }

    pub fn cfg(&self) -> &EarcutCfg {
        &self.cfg
    }

    /// Triangulate into `out`, replacing its contents.
    ///
    /// `ring_ends[k]` is the exclusive end offset of ring `k`; ring 0 is the
    /// outer boundary and every later ring a hole. Triangles reference
    /// positions in `points`. On error `out` is left empty.
    pub fn triangulate_into<E>(
        &mut self,
        points: &[[T; 2]],
        ring_ends: &[E],
        out: &mut Vec<u32>,
    ) -> Result<(), RingBoundaryError>
    where
        E: PrimInt,
    {
        out.clear();
        let rings = ring_ranges(points.len(), ring_ends)?;
        let Some((outer, holes)) = rings.split_first() else {
            return Ok(());
        };

        self.arena.reset(points.len() + points.len() / 2);
        let Some(start) = link_ring(&mut self.arena, points, outer.clone(), true) else {
            return Ok(());
        };
        if cycle_len_at_most(&self.arena, start, 3) < 3 {
            tracing::debug!(points = outer.len(), "outer ring collapses; nothing to triangulate");
            return Ok(());
        }

        let start = if holes.is_empty() {
            start
        } else {
            eliminate_holes(
                &mut self.arena,
                points,
                holes,
                start,
                self.cfg.steiner_points,
            )
        };
        let index = ZIndex::for_cycle(&self.arena, start, self.cfg.hash_threshold);
        let hashed = index.is_some();
        out.reserve(3 * points.len());
        let triangles = Engine::new(&mut self.arena, index, self.cfg.recover, out).run(start);
        tracing::debug!(
            points = points.len(),
            holes = holes.len(),
            hashed,
            nodes = self.arena.len(),
            triangles,
            "triangulated"
        );
        Ok(())
    }

    /// Triangulate into a fresh buffer.
    pub fn triangulate<E>(&mut self, points: &[[T; 2]], ring_ends: &[E]) -> Result<Vec<u32>, RingBoundaryError>
    where
        E: PrimInt,
    {
        let mut out = Vec::new();
        self.triangulate_into(points, ring_ends, &mut out)?;
        Ok(out)
    }
}

/// Triangulate a polygon with holes using the default configuration.
///
/// Returns a flat list of point indices, three per triangle.
///
/// ```
/// let tri = ringcut::triangulate(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]], &[3u32]).unwrap();
/// assert_eq!(tri, vec![1, 2, 0]);
/// ```
pub fn triangulate<T, E>(points: &[[T; 2]], ring_ends: &[E]) -> Result<Vec<u32>, RingBoundaryError>
where
    T: Coord,
    E: PrimInt,
{
    Earcut::new().triangulate(points, ring_ends)
}

/// Same as [`triangulate`] with an explicit configuration.
pub fn triangulate_with<T, E>(
    points: &[[T; 2]],
    ring_ends: &[E],
    cfg: EarcutCfg,
) -> Result<Vec<u32>, RingBoundaryError>
where
    T: Coord,
    E: PrimInt,
{
    Earcut::with_cfg(cfg).triangulate(points, ring_ends)
}

/// Triangulate an interleaved `x0, y0, x1, y1, …` buffer.
pub fn triangulate_flat<T, E>(coords: &[T], ring_ends: &[E]) -> Result<Vec<u32>, RingBoundaryError>
where
    T: Coord,
    E: PrimInt,
{
    if coords.len() % 2 != 0 {
        return Err(RingBoundaryError::UnpairedCoordinate { len: coords.len() });
    }
    let points: Vec<[T; 2]> = coords.chunks_exact(2).map(|c| [c[0], c[1]]).collect();
    triangulate(&points, ring_ends)
}
