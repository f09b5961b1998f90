//! Hole merger: bridge every hole ring into the outer cycle.
//!
//! Holes are visited in order of their leftmost x. From the leftmost hole
//! point a ray is cast toward decreasing x; the nearest outer edge it hits
//! yields a first candidate, which is then refined to the visible outer node
//! with the smallest angle to the ray. Splicing duplicates both bridge ends,
//! so the merged cycle walks `bridge → hole … hole' → bridge' → …`.
//!
//! The ray intersection runs in `f64` for every coordinate type.

use std::ops::Range;

use crate::build::{cycle_len_at_most, link_ring};
use crate::coord::Coord;
use crate::geom::{locally_inside, point_in_triangle, sector_contains_sector};
use crate::list::{Arena, NodeId};

/// Link the hole rings and splice them into the cycle through `outer`.
///
/// Returns a live node of the merged cycle. Holes that collapse below three
/// nodes are dropped; with `steiner_points` a single-point hole is kept as a
/// pinned interior vertex instead.
pub(crate) fn eliminate_holes<T: Coord>(
    arena: &mut Arena<T>,
    points: &[[T; 2]],
    holes: &[Range<usize>],
    mut outer: NodeId,
    steiner_points: bool,
) -> NodeId {
    let mut queue = Vec::with_capacity(holes.len());
    for (k, range) in holes.iter().enumerate() {
        let Some(list) = link_ring(arena, points, range.clone(), false) else {
            continue;
        };
        match cycle_len_at_most(arena, list, 3) {
            1 if steiner_points => arena[list].steiner = true,
            1 | 2 => {
                tracing::trace!(hole = k + 1, "degenerate hole skipped");
                continue;
            }
            _ => {}
        }
        queue.push(arena.leftmost(list));
    }

    queue.sort_by(|&a, &b| arena[a].x.total_order(&arena[b].x));

    for hole in queue {
        outer = eliminate_hole(arena, hole, outer);
    }
    outer
}

fn eliminate_hole<T: Coord>(arena: &mut Arena<T>, hole: NodeId, outer: NodeId) -> NodeId {
    let Some(bridge) = find_hole_bridge(arena, hole, outer) else {
        tracing::debug!(hole = arena[hole].i, "no bridge to the outer ring; hole skipped");
        return outer;
    };
    let reverse = arena.split(bridge, hole);
    let next = arena[reverse].next;
    arena.filter(reverse, Some(next));
    let next = arena[bridge].next;
    arena.filter(bridge, Some(next))
}

/// Outer node that `hole` (the leftmost point of its ring) can connect to.
pub(crate) fn find_hole_bridge<T: Coord>(
    arena: &Arena<T>,
    hole: NodeId,
    outer: NodeId,
) -> Option<NodeId> {
    let (hx, hy) = arena[hole].xy_f64();
    let mut qx = f64::NEG_INFINITY;
    let mut m: Option<NodeId> = None;

    // Nearest edge crossing the leftward ray; keep its left endpoint.
    let mut p = outer;
    loop {
        let next = arena[p].next;
        let (px, py) = arena[p].xy_f64();
        let (nx, ny) = arena[next].xy_f64();
        if hy <= py && hy >= ny && ny != py {
            let x = px + (hy - py) * (nx - px) / (ny - py);
            if x <= hx && x > qx {
                qx = x;
                let left = if px < nx { p } else { next };
                if x == hx {
                    // The hole touches the outer boundary.
                    return Some(left);
                }
                m = Some(left);
            }
        }
        p = next;
        if p == outer {
            break;
        }
    }
    let mut m = m?;

    // Any outer node inside (hole, ray hit, m) would block the segment to m;
    // pick the one with the smallest angle to the ray instead.
    let stop = m;
    let (mx, my) = arena[m].xy_f64();
    let (a, c) = if hy < my {
        ((hx, hy), (qx, hy))
    } else {
        ((qx, hy), (hx, hy))
    };
    let mut tan_min = f64::INFINITY;
    let mut p = m;
    loop {
        let (px, py) = arena[p].xy_f64();
        if hx >= px && px >= mx && hx != px && point_in_triangle(a, (mx, my), c, (px, py)) {
            let tan = (hy - py).abs() / (hx - px);
            let (cx, _) = arena[m].xy_f64();
            let better = tan < tan_min
                || (tan == tan_min
                    && (px > cx || (px == cx && sector_contains_sector(arena, m, p))));
            if locally_inside(arena, p, hole) && better {
                m = p;
                tan_min = tan;
            }
        }
        p = arena[p].next;
        if p == stop {
            return Some(m);
        }
    }
}
