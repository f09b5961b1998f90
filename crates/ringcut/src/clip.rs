//! Ear-clipping engine and its recovery cascade.
//!
//! Purpose
//! - Consume the merged cycle and emit triangles until no cycle has three
//!   nodes left.
//!
//! Control flow
//! - Cycles wait on an explicit worklist tagged with the stage they are in.
//! - A lap around a cycle that clips nothing escalates the stage:
//!   `Fresh` → filter collinear/duplicate nodes → `Filtered` → cure local
//!   self-intersections → `Cured` → split along a valid diagonal (both halves
//!   re-enter as `Fresh`) → force-clip one corner and go back to `Filtered`.
//! - Every forced step removes a node, so the cascade terminates on any input.
//!
//! Ear tests use the Z-order list when the cycle was large enough to be
//! indexed and fall back to a linear scan otherwise.

use crate::assemble::Assembler;
use crate::coord::Coord;
use crate::geom::{area, equals, intersects, locally_inside, middle_inside, point_in_triangle};
use crate::list::{Arena, NodeId};
use crate::zorder::ZIndex;

/// Ear corners `(prev, ear, next)` in widened coordinates.
type Triangle<T> = [(<T as Coord>::Wide, <T as Coord>::Wide); 3];

/// Recovery stage a cycle is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pass {
    /// Newly created cycle; (re)build its Z-order list.
    Fresh,
    /// Collinear and duplicate nodes were filtered.
    Filtered,
    /// Local self-intersections were cured.
    Cured,
}

pub(crate) struct Engine<'a, T> {
    arena: &'a mut Arena<T>,
    index: Option<ZIndex>,
    recover: bool,
    out: Assembler<'a>,
    work: Vec<(NodeId, Pass)>,
}

impl<'a, T: Coord> Engine<'a, T> {
    pub(crate) fn new(
        arena: &'a mut Arena<T>,
        index: Option<ZIndex>,
        recover: bool,
        out: &'a mut Vec<u32>,
    ) -> Self {
        Self {
            arena,
            index,
            recover,
            out: Assembler::new(out),
            work: Vec::new(),
        }
    }

    /// Triangulate the cycle through `start`; returns the number of triangles.
    pub(crate) fn run(mut self, start: NodeId) -> usize {
        self.work.push((start, Pass::Fresh));
        while let Some((ear, pass)) = self.work.pop() {
            self.clip_cycle(ear, pass);
        }
        self.out.triangles()
    }

    fn clip_cycle(&mut self, mut ear: NodeId, pass: Pass) {
        if pass == Pass::Fresh {
            if let Some(index) = self.index {
                index.index_curve(self.arena, ear);
            }
        }

        let mut stop = ear;
        while self.arena[ear].prev != self.arena[ear].next {
            let (prev, next) = (self.arena[ear].prev, self.arena[ear].next);
            if self.is_ear(ear) {
                let a = &self.arena;
                self.out.emit(a[prev].i, a[ear].i, a[next].i);
                self.arena.remove(ear);
                // Skipping one node gives fewer sliver triangles.
                ear = self.arena[next].next;
                stop = ear;
                continue;
            }
            ear = next;
            if ear == stop {
                self.escalate(ear, pass);
                return;
            }
        }
    }

    fn escalate(&mut self, ear: NodeId, pass: Pass) {
        match pass {
            Pass::Fresh => {
                tracing::trace!(node = ear.0, "no ear in a full lap; filtering");
                let ear = self.arena.filter(ear, None);
                self.work.push((ear, Pass::Filtered));
            }
            Pass::Filtered => {
                tracing::trace!(node = ear.0, "no ear after filtering; curing intersections");
                let ear = self.arena.filter(ear, None);
                let ear = self.cure_local_intersections(ear);
                self.work.push((ear, Pass::Cured));
            }
            Pass::Cured => {
                if self.split_at_diagonal(ear) {
                    return;
                }
                if !self.recover {
                    tracing::debug!(node = ear.0, "no valid diagonal; remainder dropped");
                    return;
                }
                tracing::debug!(node = ear.0, "no valid diagonal; forcing a clip");
                self.force_clip(ear);
            }
        }
    }

    fn is_ear(&self, ear: NodeId) -> bool {
        let arena = &*self.arena;
        let (a, c) = (arena[ear].prev, arena[ear].next);
        if area(&arena[a], &arena[ear], &arena[c]).is_ge() {
            return false;
        }
        let tri = [arena[a].wide(), arena[ear].wide(), arena[c].wide()];
        match self.index {
            Some(index) => self.is_ear_hashed(ear, &tri, &index),
            None => {
                let mut p = arena[c].next;
                while p != a {
                    if self.blocks(p, &tri) {
                        return false;
                    }
                    p = arena[p].next;
                }
                true
            }
        }
    }

    /// Ear test restricted to nodes whose Z-order key lies within the key
    /// range of the triangle's bounding box.
    fn is_ear_hashed(&self, ear: NodeId, tri: &Triangle<T>, index: &ZIndex) -> bool {
        let arena = &*self.arena;
        let (a, c) = (arena[ear].prev, arena[ear].next);
        let (ax, ay) = arena[a].xy_f64();
        let (bx, by) = arena[ear].xy_f64();
        let (cx, cy) = arena[c].xy_f64();
        let min_z = index.key(ax.min(bx).min(cx), ay.min(by).min(cy));
        let max_z = index.key(ax.max(bx).max(cx), ay.max(by).max(cy));
        let key = |id: NodeId| arena[id].z.unwrap_or(0);

        let mut p = arena[ear].next_z;
        while let Some(id) = p {
            if key(id) > max_z {
                break;
            }
            if id != a && id != c && self.blocks(id, tri) {
                return false;
            }
            p = arena[id].next_z;
        }
        let mut p = arena[ear].prev_z;
        while let Some(id) = p {
            if key(id) < min_z {
                break;
            }
            if id != a && id != c && self.blocks(id, tri) {
                return false;
            }
            p = arena[id].prev_z;
        }
        true
    }

    /// Does node `p` keep the ear `tri` from being clipped: a reflex or
    /// collinear node inside the triangle. Nodes sitting on its first corner
    /// (bridge duplicates) do not count.
    fn blocks(&self, p: NodeId, tri: &Triangle<T>) -> bool {
        let arena = &*self.arena;
        let node = &arena[p];
        let [a, b, c] = *tri;
        let pw = node.wide();
        pw != a
            && point_in_triangle(a, b, c, pw)
            && area(&arena[node.prev], node, &arena[node.next]).is_ge()
    }

    /// Clip every `a p p.next b` where edge `a p` crosses edge `p.next b`,
    /// emitting `(a, p, b)` and dropping both middle nodes.
    fn cure_local_intersections(&mut self, start: NodeId) -> NodeId {
        let mut start = start;
        let mut p = start;
        loop {
            let a = self.arena[p].prev;
            let pn = self.arena[p].next;
            let b = self.arena[pn].next;
            let arena = &*self.arena;
            if !equals(&arena[a], &arena[b])
                && intersects(&arena[a], &arena[p], &arena[pn], &arena[b])
                && locally_inside(arena, a, b)
                && locally_inside(arena, b, a)
            {
                self.out.emit(arena[a].i, arena[p].i, arena[b].i);
                self.arena.remove(p);
                self.arena.remove(pn);
                p = b;
                start = b;
            }
            p = self.arena[p].next;
            if p == start {
                break;
            }
        }
        self.arena.filter(p, None)
    }

    /// Look for a valid diagonal and queue both halves; false if none exists.
    fn split_at_diagonal(&mut self, start: NodeId) -> bool {
        let mut a = start;
        loop {
            let mut b = self.arena[self.arena[a].next].next;
            while b != self.arena[a].prev {
                if self.arena[a].i != self.arena[b].i && self.is_valid_diagonal(a, b) {
                    let c = self.arena.split(a, b);
                    let next = self.arena[a].next;
                    let a = self.arena.filter(a, Some(next));
                    let next = self.arena[c].next;
                    let c = self.arena.filter(c, Some(next));
                    tracing::trace!(a = a.0, c = c.0, "split along diagonal");
                    // `a` is popped first.
                    self.work.push((c, Pass::Fresh));
                    self.work.push((a, Pass::Fresh));
                    return true;
                }
                b = self.arena[b].next;
            }
            a = self.arena[a].next;
            if a == start {
                return false;
            }
        }
    }

    fn is_valid_diagonal(&self, a: NodeId, b: NodeId) -> bool {
        let arena = &*self.arena;
        let (na, nb) = (&arena[a], &arena[b]);
        if arena[na.next].i == nb.i || arena[na.prev].i == nb.i || self.intersects_polygon(a, b) {
            return false;
        }
        let visible = locally_inside(arena, a, b)
            && locally_inside(arena, b, a)
            && middle_inside(arena, a, b)
            && (area(&arena[na.prev], na, &arena[nb.prev]).is_ne()
                || area(na, &arena[nb.prev], nb).is_ne());
        // Zero-length diagonal between two convex copies of one point.
        let touching = equals(na, nb)
            && area(&arena[na.prev], na, &arena[na.next]).is_gt()
            && area(&arena[nb.prev], nb, &arena[nb.next]).is_gt();
        visible || touching
    }

    /// Does `a b` cross an edge not incident to either endpoint.
    fn intersects_polygon(&self, a: NodeId, b: NodeId) -> bool {
        let arena = &*self.arena;
        let (ai, bi) = (arena[a].i, arena[b].i);
        let mut p = a;
        loop {
            let n = arena[p].next;
            let (pi, ni) = (arena[p].i, arena[n].i);
            if pi != ai
                && ni != ai
                && pi != bi
                && ni != bi
                && intersects(&arena[p], &arena[n], &arena[a], &arena[b])
            {
                return true;
            }
            p = n;
            if p == a {
                return false;
            }
        }
    }

    /// Last resort: clip the first convex corner (or `start`) regardless of
    /// what lies inside its triangle.
    fn force_clip(&mut self, start: NodeId) {
        let ear = self.convex_corner(start).unwrap_or(start);
        let (prev, next) = (self.arena[ear].prev, self.arena[ear].next);
        let a = &self.arena;
        self.out.emit_distinct(a[prev].i, a[ear].i, a[next].i);
        self.arena.remove(ear);
        let next = self.arena.filter(next, None);
        self.work.push((next, Pass::Filtered));
    }

    fn convex_corner(&self, start: NodeId) -> Option<NodeId> {
        let arena = &*self.arena;
        let mut p = start;
        loop {
            let node = &arena[p];
            if area(&arena[node.prev], node, &arena[node.next]).is_lt() {
                return Some(p);
            }
            p = node.next;
            if p == start {
                return None;
            }
        }
    }
}
