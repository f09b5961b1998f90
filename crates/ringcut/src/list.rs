//! Node arena holding the circular boundary lists.
//!
//! Nodes live in one `Vec` and refer to each other by `NodeId`. Two independent
//! link views share the slots:
//! - `prev`/`next`: traversal order, forming one or more cycles.
//! - `prev_z`/`next_z`: ascending Z-order key, an open list (see `crate::zorder`).
//!
//! Unlinking never frees a slot; the arena is cleared in bulk when a
//! triangulation finishes. An unlinked node keeps its stale links, which the
//! engine relies on right after removal (e.g. `remove(p)` then `remove(p.next)`).

use std::ops::{Index, IndexMut};

use crate::coord::Coord;
use crate::geom::{area, equals};

/// Handle of a node slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

/// One boundary vertex.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    /// Index into the caller's point buffer; what the output refers to.
    pub i: u32,
    pub x: T,
    pub y: T,
    pub prev: NodeId,
    pub next: NodeId,
    pub prev_z: Option<NodeId>,
    pub next_z: Option<NodeId>,
    /// Z-order key, unset until the spatial index runs.
    pub z: Option<u32>,
    /// Never removed by `Arena::filter`.
    pub steiner: bool,
}

impl<T: Coord> Node<T> {
    #[inline]
    pub(crate) fn wide(&self) -> (T::Wide, T::Wide) {
        (self.x.widen(), self.y.widen())
    }

    #[inline]
    pub(crate) fn xy_f64(&self) -> (f64, f64) {
        (self.x.as_(), self.y.as_())
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Arena<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = Node<T>;
    #[inline]
    fn index(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }
}

impl<T: Coord> Arena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Drop all nodes, keeping the allocation for the next call.
    pub(crate) fn reset(&mut self, capacity: usize) {
        self.nodes.clear();
        self.nodes.reserve(capacity);
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub(crate) fn slots(&self) -> &[Node<T>] {
        &self.nodes
    }

    fn push(&mut self, i: u32, x: T, y: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            i,
            x,
            y,
            prev: id,
            next: id,
            prev_z: None,
            next_z: None,
            z: None,
            steiner: false,
        });
        id
    }

    /// Create a node after `last` (or a new one-node cycle) and return it.
    pub(crate) fn insert(&mut self, i: u32, p: [T; 2], last: Option<NodeId>) -> NodeId {
        let id = self.push(i, p[0], p[1]);
        if let Some(last) = last {
            let after = self[last].next;
            self[id].next = after;
            self[id].prev = last;
            self[after].prev = id;
            self[last].next = id;
        }
        id
    }

    /// Unlink `p` from both link views.
    pub(crate) fn remove(&mut self, p: NodeId) {
        let Node {
            prev,
            next,
            prev_z,
            next_z,
            ..
        } = self[p];
        self[next].prev = prev;
        self[prev].next = next;
        if let Some(pz) = prev_z {
            self[pz].next_z = next_z;
        }
        if let Some(nz) = next_z {
            self[nz].prev_z = prev_z;
        }
    }

    /// Connect `a` and `b` with a diagonal, splitting their cycle in two.
    ///
    /// Both endpoints are duplicated; the duplicates keep the point index.
    /// `a → b` stays in one cycle, and the returned copy of `b` is in the other
    /// (`b' → a' → a.next`). When `a` and `b` are on different cycles this
    /// merges them instead, which is how holes are bridged in.
    pub(crate) fn split(&mut self, a: NodeId, b: NodeId) -> NodeId {
        let (ai, ax, ay) = (self[a].i, self[a].x, self[a].y);
        let (bi, bx, by) = (self[b].i, self[b].x, self[b].y);
        let a2 = self.push(ai, ax, ay);
        let b2 = self.push(bi, bx, by);
        let an = self[a].next;
        let bp = self[b].prev;

        self[a].next = b;
        self[b].prev = a;

        self[a2].next = an;
        self[an].prev = a2;

        self[b2].next = a2;
        self[a2].prev = b2;

        self[bp].next = b2;
        self[b2].prev = bp;

        b2
    }

    /// Remove duplicate and collinear nodes, walking from `start` until `end`.
    ///
    /// Returns a live node of the remaining cycle.
    pub(crate) fn filter(&mut self, start: NodeId, end: Option<NodeId>) -> NodeId {
        let mut end = end.unwrap_or(start);
        let mut p = start;
        loop {
            let again;
            let node = &self[p];
            let (prev, next) = (&self[node.prev], &self[node.next]);
            if !node.steiner && (equals(node, next) || area(prev, node, next).is_eq()) {
                self.remove(p);
                p = self[p].prev;
                end = p;
                if p == self[p].next {
                    break;
                }
                again = true;
            } else {
                p = node.next;
                again = false;
            }
            if !again && p == end {
                break;
            }
        }
        end
    }

    /// Leftmost node of a cycle (smallest x, then smallest y).
    pub(crate) fn leftmost(&self, start: NodeId) -> NodeId {
        let mut p = start;
        let mut left = start;
        loop {
            let (n, l) = (&self[p], &self[left]);
            if n.x < l.x || (n.x == l.x && n.y < l.y) {
                left = p;
            }
            p = n.next;
            if p == start {
                return left;
            }
        }
    }

    /// Node ids of the cycle through `start`, in traversal order.
    pub(crate) fn cycle(&self, start: NodeId) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut p = start;
        loop {
            ids.push(p);
            p = self[p].next;
            if p == start {
                return ids;
            }
        }
    }
}
