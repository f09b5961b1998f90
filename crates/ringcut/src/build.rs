//! Vertex list builder: one circular list per ring, in canonical winding.

use std::ops::Range;

use crate::coord::Coord;
use crate::geom::{equals, ring_sum};
use crate::list::{Arena, NodeId};

/// Link `points[range]` into a new cycle and return its last node.
///
/// With `outer == true` the cycle runs counter-clockwise (y-up), otherwise
/// clockwise, reversing the input order when needed. Points equal to the
/// previously linked point are skipped, as is a closing point equal to the
/// first. Returns `None` for an empty range.
pub(crate) fn link_ring<T: Coord>(
    arena: &mut Arena<T>,
    points: &[[T; 2]],
    range: Range<usize>,
    outer: bool,
) -> Option<NodeId> {
    let forward = outer == (ring_sum(&points[range.clone()]) > Default::default());
    let mut last: Option<NodeId> = None;
    let mut link = |arena: &mut Arena<T>, i: usize| {
        let p = points[i];
        if let Some(l) = last {
            if arena[l].x == p[0] && arena[l].y == p[1] {
                return;
            }
        }
        last = Some(arena.insert(i as u32, p, last));
    };
    if forward {
        for i in range {
            link(arena, i);
        }
    } else {
        for i in range.rev() {
            link(arena, i);
        }
    }

    let last = last?;
    let next = arena[last].next;
    if next != last && equals(&arena[last], &arena[next]) {
        arena.remove(last);
        return Some(next);
    }
    Some(last)
}

/// Number of nodes on the cycle through `start`, capped at `cap`.
pub(crate) fn cycle_len_at_most<T: Coord>(arena: &Arena<T>, start: NodeId, cap: usize) -> usize {
    let mut n = 1;
    let mut p = arena[start].next;
    while p != start && n < cap {
        n += 1;
        p = arena[p].next;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(arena: &Arena<f64>, start: NodeId) -> Vec<u32> {
        arena.cycle(start).into_iter().map(|id| arena[id].i).collect()
    }

    const CCW: [[f64; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    #[test]
    fn outer_keeps_ccw_and_reverses_cw() {
        let mut a = Arena::with_capacity(8);
        let last = link_ring(&mut a, &CCW, 0..4, true).unwrap();
        assert_eq!(order(&a, a[last].next), vec![0, 1, 2, 3]);

        let mut cw = CCW;
        cw.reverse();
        let mut b = Arena::with_capacity(8);
        let last = link_ring(&mut b, &cw, 0..4, true).unwrap();
        // Reversed back, so traversal is ccw again: indices run downwards.
        assert_eq!(order(&b, b[last].next), vec![3, 2, 1, 0]);
    }

    #[test]
    fn holes_run_opposite_to_outer() {
        let mut a = Arena::with_capacity(8);
        let last = link_ring(&mut a, &CCW, 0..4, false).unwrap();
        assert_eq!(order(&a, a[last].next), vec![3, 2, 1, 0]);
    }

    #[test]
    fn duplicates_and_closing_point_are_skipped() {
        let pts = [
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
            [0.0, 0.0],
        ];
        let mut a = Arena::with_capacity(8);
        let last = link_ring(&mut a, &pts, 0..6, true).unwrap();
        let mut ids = order(&a, last);
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 3, 4]);
    }

    #[test]
    fn cycle_length_is_capped() {
        let mut a = Arena::with_capacity(8);
        let last = link_ring(&mut a, &CCW, 0..4, true).unwrap();
        assert_eq!(cycle_len_at_most(&a, last, 10), 4);
        assert_eq!(cycle_len_at_most(&a, last, 3), 3);
    }
}
