//! Orientation and containment predicates.
//!
//! All predicates take widened coordinates (`Coord::Wide`), see `crate::coord`,
//! and only look at signs, so they are exact for integer input.
//! Sign convention: `area(p, q, r)` is `Less` for a left turn (counter-clockwise
//! in a y-up frame). The outer ring is linked so that its convex corners are
//! `Less`.

use std::cmp::Ordering;

use crate::coord::{Coord, Exact};
use crate::list::{Arena, Node, NodeId};

/// Sign of twice the signed area of `(p, q, r)`, negated cross product.
#[inline]
pub(crate) fn area<T: Coord>(p: &Node<T>, q: &Node<T>, r: &Node<T>) -> Ordering {
    let (px, py) = p.wide();
    let (qx, qy) = q.wide();
    let (rx, ry) = r.wide();
    T::Wide::cross(qy - py, rx - qx, qx - px, ry - qy)
}

#[inline]
pub(crate) fn equals<T: Coord>(p: &Node<T>, q: &Node<T>) -> bool {
    p.x == q.x && p.y == q.y
}

/// Inclusive point-in-triangle test for a triangle with `Less` area.
#[inline]
pub(crate) fn point_in_triangle<W: Exact>(a: (W, W), b: (W, W), c: (W, W), p: (W, W)) -> bool {
    let (ax, ay) = a;
    let (bx, by) = b;
    let (cx, cy) = c;
    let (px, py) = p;
    W::cross(cx - px, ay - py, ax - px, cy - py).is_ge()
        && W::cross(ax - px, by - py, bx - px, ay - py).is_ge()
        && W::cross(bx - px, cy - py, cx - px, by - py).is_ge()
}

/// For collinear `p, q, r`: does `q` lie within the bounding box of `p r`.
#[inline]
fn on_segment<T: Coord>(p: &Node<T>, q: &Node<T>, r: &Node<T>) -> bool {
    (q.x <= p.x || q.x <= r.x)
        && (q.x >= p.x || q.x >= r.x)
        && (q.y <= p.y || q.y <= r.y)
        && (q.y >= p.y || q.y >= r.y)
}

/// Closed segment intersection of `p1 q1` and `p2 q2`, touching included.
pub(crate) fn intersects<T: Coord>(p1: &Node<T>, q1: &Node<T>, p2: &Node<T>, q2: &Node<T>) -> bool {
    let o1 = area(p1, q1, p2);
    let o2 = area(p1, q1, q2);
    let o3 = area(p2, q2, p1);
    let o4 = area(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1.is_eq() && on_segment(p1, p2, q1))
        || (o2.is_eq() && on_segment(p1, q2, q1))
        || (o3.is_eq() && on_segment(p2, p1, q2))
        || (o4.is_eq() && on_segment(p2, q1, q2))
}

/// Shoelace sum `Σ (x_prev − x_i)(y_i + y_prev)` over a closed ring.
///
/// Positive for counter-clockwise rings in a y-up frame; equals twice the area.
/// Integer rings accumulate in 256 bits, so the sign is exact.
pub(crate) fn ring_sum<T: Coord>(ring: &[[T; 2]]) -> <T::Wide as Exact>::Sum {
    let mut sum = Default::default();
    let Some(last) = ring.last() else {
        return sum;
    };
    let mut prev = last;
    for p in ring {
        let (x, y) = (p[0].widen(), p[1].widen());
        let (xp, yp) = (prev[0].widen(), prev[1].widen());
        sum = sum + T::Wide::product(xp - x, y + yp);
        prev = p;
    }
    sum
}

/// Does the diagonal `a b` leave `a` into the polygon interior.
pub(crate) fn locally_inside<T: Coord>(arena: &Arena<T>, a: NodeId, b: NodeId) -> bool {
    let (na, nb) = (&arena[a], &arena[b]);
    let (prev, next) = (&arena[na.prev], &arena[na.next]);
    if area(prev, na, next).is_lt() {
        area(na, nb, next).is_ge() && area(na, prev, nb).is_ge()
    } else {
        area(na, nb, prev).is_lt() || area(na, next, nb).is_lt()
    }
}

/// Is the midpoint of `a b` inside the cycle through `a` (even-odd rule).
///
/// Works on doubled coordinates so the midpoint stays exact for integers.
pub(crate) fn middle_inside<T: Coord>(arena: &Arena<T>, a: NodeId, b: NodeId) -> bool {
    let (ax, ay) = arena[a].wide();
    let (bx, by) = arena[b].wide();
    let (px2, py2) = (ax + bx, ay + by);
    let mut inside = false;
    let mut p = a;
    loop {
        let (x0, y0) = arena[p].wide();
        let (x1, y1) = arena[arena[p].next].wide();
        if ((y0 + y0 > py2) != (y1 + y1 > py2)) && y1 != y0 {
            let side = T::Wide::cross(px2 - (x0 + x0), y1 - y0, x1 - x0, py2 - (y0 + y0));
            let crossed = if y1 > y0 { side.is_lt() } else { side.is_gt() };
            if crossed {
                inside = !inside;
            }
        }
        p = arena[p].next;
        if p == a {
            return inside;
        }
    }
}

/// Does the wedge at `m` strictly contain the wedge at `p`.
pub(crate) fn sector_contains_sector<T: Coord>(arena: &Arena<T>, m: NodeId, p: NodeId) -> bool {
    let (nm, np) = (&arena[m], &arena[p]);
    area(&arena[nm.prev], nm, &arena[np.prev]).is_lt()
        && area(&arena[np.next], nm, &arena[nm.next]).is_lt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(pts: &[[i32; 2]]) -> Arena<i32> {
        let mut arena = Arena::with_capacity(pts.len());
        let mut last = None;
        for (i, p) in pts.iter().enumerate() {
            last = Some(arena.insert(i as u32, *p, last));
        }
        arena
    }

    #[test]
    fn left_turn_has_negative_area() {
        let a = nodes(&[[0, 0], [1, 0], [1, 1]]);
        let n = a.slots();
        assert_eq!(area(&n[0], &n[1], &n[2]), Ordering::Less);
        assert_eq!(area(&n[2], &n[1], &n[0]), Ordering::Greater);
    }

    #[test]
    fn integer_area_does_not_overflow() {
        let a = nodes(&[[i32::MIN, i32::MIN], [i32::MAX, i32::MIN], [i32::MAX, i32::MAX]]);
        let n = a.slots();
        assert_eq!(area(&n[0], &n[1], &n[2]), Ordering::Less);

        let mut b = Arena::with_capacity(4);
        let mut last = None;
        for (i, p) in [[i64::MIN, i64::MIN], [i64::MAX, i64::MIN], [i64::MAX, i64::MAX], [i64::MIN + 1, i64::MIN + 1]]
            .iter()
            .enumerate()
        {
            last = Some(b.insert(i as u32, *p, last));
        }
        let n = b.slots();
        assert_eq!(area(&n[0], &n[1], &n[2]), Ordering::Less);
        assert_eq!(area(&n[2], &n[1], &n[0]), Ordering::Greater);
        // One unit along the diagonal from its start.
        assert_eq!(area(&n[0], &n[2], &n[3]), Ordering::Equal);
        assert!(intersects(&n[0], &n[2], &n[1], &n[3]));
    }

    #[test]
    fn full_range_ring_sum_keeps_its_sign() {
        let s = 1i64 << 62;
        let ccw = [[-s, -s], [s, -s], [s, s], [-s, s]];
        assert!(ring_sum(&ccw) > Default::default());
        let mut cw = ccw;
        cw.reverse();
        assert!(ring_sum(&cw) < Default::default());
        let edge = [[i64::MIN, i64::MIN], [i64::MAX, i64::MIN], [i64::MAX, i64::MAX]];
        assert_eq!(ring_sum(&edge).signum(), 1);
    }

    #[test]
    fn point_in_triangle_includes_boundary() {
        let (a, b, c) = ((0.0, 2.0), (0.0, 0.0), (2.0, 0.0));
        assert!(point_in_triangle(a, b, c, (0.5, 0.5)));
        assert!(point_in_triangle(a, b, c, (1.0, 1.0)));
        assert!(!point_in_triangle(a, b, c, (1.5, 1.5)));
    }

    #[test]
    fn crossing_and_touching_segments() {
        let a = nodes(&[[0, 0], [4, 4], [0, 4], [4, 0], [2, 2], [6, 6], [5, 0], [6, 0]]);
        let n = a.slots();
        assert!(intersects(&n[0], &n[1], &n[2], &n[3]));
        assert!(intersects(&n[0], &n[1], &n[4], &n[5]));
        assert!(!intersects(&n[0], &n[1], &n[6], &n[7]));
    }

    #[test]
    fn ring_sum_sign_tracks_orientation() {
        let ccw = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
        let cw = [[1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
        assert_eq!(ring_sum(&ccw), 1.0);
        assert_eq!(ring_sum(&cw), -1.0);
        assert_eq!(ring_sum::<f64>(&[]), 0.0);
    }

    #[test]
    fn diagonals_of_an_l_shape() {
        // Reflex corner at index 3.
        let a = nodes(&[[0, 0], [4, 0], [4, 2], [2, 2], [2, 4], [0, 4]]);
        assert!(middle_inside(&a, NodeId(0), NodeId(3)));
        assert!(!middle_inside(&a, NodeId(2), NodeId(4)));
        assert!(locally_inside(&a, NodeId(3), NodeId(0)));
        assert!(locally_inside(&a, NodeId(1), NodeId(3)));
    }
}
