//! Spatial index: Z-order (Morton) keys and the `prev_z`/`next_z` list.
//!
//! Coordinates are mapped onto a 15-bit grid spanning the bounding box of
//! the merged cycle and interleaved into a 32-bit key. Sorting a cycle by key
//! lets the ear test visit only nodes whose keys fall between the keys of the
//! candidate triangle's bounding-box corners.

use crate::coord::Coord;
use crate::list::{Arena, NodeId};

/// Grid transform for one triangulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ZIndex {
    min_x: f64,
    min_y: f64,
    inv_size: f64,
}

impl ZIndex {
    /// Index for the cycle through `start`, or `None` when it has at most
    /// `threshold` nodes.
    pub(crate) fn for_cycle<T: Coord>(arena: &Arena<T>, start: NodeId, threshold: usize) -> Option<Self> {
        let (x0, y0) = arena[start].xy_f64();
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        let mut count = 0usize;
        let mut p = start;
        loop {
            let (x, y) = arena[p].xy_f64();
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            count += 1;
            p = arena[p].next;
            if p == start {
                break;
            }
        }
        if count <= threshold {
            return None;
        }
        let size = (max_x - min_x).max(max_y - min_y);
        let inv_size = if size > 0.0 { 32767.0 / size } else { 0.0 };
        tracing::trace!(nodes = count, size, "z-order index enabled");
        Some(Self {
            min_x,
            min_y,
            inv_size,
        })
    }

    /// Morton key of a point inside the indexed bounding box.
    pub(crate) fn key(&self, x: f64, y: f64) -> u32 {
        // Float-to-int `as` saturates, and NaN maps to 0.
        let x = ((x - self.min_x) * self.inv_size) as u32;
        let y = ((y - self.min_y) * self.inv_size) as u32;
        spread(x) | (spread(y) << 1)
    }

    /// Key every node of the cycle through `start` (keeping existing keys) and
    /// thread the cycle into a `prev_z`/`next_z` list in ascending key order.
    pub(crate) fn index_curve<T: Coord>(&self, arena: &mut Arena<T>, start: NodeId) {
        let mut ids = arena.cycle(start);
        for &id in &ids {
            if arena[id].z.is_none() {
                let (x, y) = arena[id].xy_f64();
                arena[id].z = Some(self.key(x, y));
            }
        }
        ids.sort_by_key(|&id| arena[id].z);

        let mut prev: Option<NodeId> = None;
        for &id in &ids {
            arena[id].prev_z = prev;
            arena[id].next_z = None;
            if let Some(p) = prev {
                arena[p].next_z = Some(id);
            }
            prev = Some(id);
        }
    }
}

/// Spread the low 16 bits of `v` over the even bit positions.
#[inline]
fn spread(v: u32) -> u32 {
    let mut v = v & 0x0000_FFFF;
    v = (v | (v << 8)) & 0x00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333;
    (v | (v << 1)) & 0x5555_5555
}
