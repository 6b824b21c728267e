// Copyright 2025 Lars Brubaker
// License: MIT
//
// The advancing front: the upper boundary of the mesh built so far, kept as a
// doubly-linked list of nodes ordered by x.
//
// Nodes live in a Vec arena and are linked by index. A node removed from the
// front keeps its own prev/next links, so a walk that starts from a freshly
// removed node still reaches its former neighbors. Nothing is ever freed.

use crate::geom::Real;
use crate::mesh::{PointIdx, TriIdx, INVALID};

/// Index into AdvancingFront::nodes
pub type NodeIdx = u32;

#[derive(Clone, Debug)]
pub struct Node {
    pub point: PointIdx,
    /// x of `point`, cached for lookups.
    pub value: Real,
    /// Triangle lying below the front segment that starts at this node.
    pub triangle: TriIdx,
    pub next: NodeIdx,
    pub prev: NodeIdx,
}

impl Default for Node {
    fn default() -> Self {
        Node {
            point: INVALID,
            value: 0.0,
            triangle: INVALID,
            next: INVALID,
            prev: INVALID,
        }
    }
}

pub struct AdvancingFront {
    pub nodes: Vec<Node>,
    pub head: NodeIdx,
    pub tail: NodeIdx,
    search_node: NodeIdx,
}

impl AdvancingFront {
    /// Build the initial front head -> middle -> tail from the first sweep
    /// triangle.
    pub fn new(
        head: (PointIdx, Real),
        middle: (PointIdx, Real),
        tail: (PointIdx, Real),
        triangle: TriIdx,
    ) -> Self {
        let mut front = AdvancingFront {
            nodes: Vec::new(),
            head: 0,
            tail: 2,
            search_node: 0,
        };
        front.push_node(head.0, head.1, triangle);
        front.push_node(middle.0, middle.1, triangle);
        front.push_node(tail.0, tail.1, INVALID);
        front.nodes[0].next = 1;
        front.nodes[1].prev = 0;
        front.nodes[1].next = 2;
        front.nodes[2].prev = 1;
        front
    }

    fn push_node(&mut self, point: PointIdx, value: Real, triangle: TriIdx) -> NodeIdx {
        let idx = self.nodes.len() as NodeIdx;
        self.nodes.push(Node {
            point,
            value,
            triangle,
            ..Node::default()
        });
        idx
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn next(&self, n: NodeIdx) -> NodeIdx {
        self.nodes[n as usize].next
    }

    #[inline]
    pub fn prev(&self, n: NodeIdx) -> NodeIdx {
        self.nodes[n as usize].prev
    }

    #[inline]
    pub fn point(&self, n: NodeIdx) -> PointIdx {
        self.nodes[n as usize].point
    }

    #[inline]
    pub fn triangle(&self, n: NodeIdx) -> TriIdx {
        self.nodes[n as usize].triangle
    }

    #[inline]
    pub fn set_triangle(&mut self, n: NodeIdx, t: TriIdx) {
        self.nodes[n as usize].triangle = t;
    }

    /// Splice a new node for `point` in right after `node`.
    pub fn insert_after(&mut self, node: NodeIdx, point: PointIdx, value: Real) -> NodeIdx {
        let next = self.next(node);
        let new_idx = self.push_node(point, value, INVALID);
        self.nodes[new_idx as usize].next = next;
        self.nodes[new_idx as usize].prev = node;
        self.nodes[next as usize].prev = new_idx;
        self.nodes[node as usize].next = new_idx;
        new_idx
    }

    /// Unlink `node` from the front. The node keeps its own links.
    pub fn remove(&mut self, node: NodeIdx) {
        let prev = self.prev(node);
        let next = self.next(node);
        self.nodes[prev as usize].next = next;
        self.nodes[next as usize].prev = prev;
    }

    /// Find the node whose segment [node.x, node.next.x) holds `x`, walking
    /// from the node found by the previous search.
    pub fn locate_node(&mut self, x: Real) -> Option<NodeIdx> {
        let mut node = self.search_node;
        if x < self.nodes[node as usize].value {
            loop {
                node = self.prev(node);
                if node == INVALID {
                    return None;
                }
                if x >= self.nodes[node as usize].value {
                    self.search_node = node;
                    return Some(node);
                }
            }
        } else {
            loop {
                node = self.next(node);
                if node == INVALID {
                    return None;
                }
                if x < self.nodes[node as usize].value {
                    let prev = self.prev(node);
                    self.search_node = prev;
                    return Some(prev);
                }
            }
        }
    }

    /// Find the node holding `point` (at abscissa `x`).
    pub fn locate_point(&mut self, point: PointIdx, x: Real) -> Option<NodeIdx> {
        let mut node = self.search_node;
        let nx = self.nodes[node as usize].value;

        if x == nx {
            if point != self.point(node) {
                // Two nodes may briefly share an x value.
                let prev = self.prev(node);
                let next = self.next(node);
                if prev != INVALID && point == self.point(prev) {
                    node = prev;
                } else if next != INVALID && point == self.point(next) {
                    node = next;
                } else {
                    node = self.scan_for_point(point);
                }
            }
        } else if x < nx {
            loop {
                node = self.prev(node);
                if node == INVALID || point == self.point(node) {
                    break;
                }
            }
        } else {
            loop {
                node = self.next(node);
                if node == INVALID || point == self.point(node) {
                    break;
                }
            }
        }

        if node == INVALID {
            return None;
        }
        self.search_node = node;
        Some(node)
    }

    fn scan_for_point(&self, point: PointIdx) -> NodeIdx {
        let mut node = self.head;
        while node != INVALID {
            if self.point(node) == point {
                return node;
            }
            node = self.next(node);
        }
        INVALID
    }

    /// Live nodes from head to tail.
    pub fn iter(&self) -> FrontIter<'_> {
        FrontIter { front: self, node: self.head }
    }
}

impl Default for AdvancingFront {
    fn default() -> Self {
        AdvancingFront {
            nodes: Vec::new(),
            head: INVALID,
            tail: INVALID,
            search_node: INVALID,
        }
    }
}

pub struct FrontIter<'a> {
    front: &'a AdvancingFront,
    node: NodeIdx,
}

impl<'a> Iterator for FrontIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        if self.node == INVALID {
            return None;
        }
        let n = &self.front.nodes[self.node as usize];
        self.node = n.next;
        Some(n)
    }
}
