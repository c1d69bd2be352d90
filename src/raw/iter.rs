use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

// Inline spine capacity; taller trees spill to the heap.
const SPINE: usize = 32;

type Spine = SmallVec<[Handle; SPINE]>;

/// Lazy in-order walk over a tree's keys, from both ends.
///
/// `front` holds the unvisited ancestors of the next smallest key and `back`
/// those of the next largest. `remaining` keeps the two ends from crossing.
pub(crate) struct RawIter<'a, K> {
    nodes: &'a Arena<Node<K>>,
    front: Spine,
    back: Spine,
    remaining: usize,
}

impl<'a, K> RawIter<'a, K> {
    pub(crate) fn new(nodes: &'a Arena<Node<K>>, root: Option<Handle>, len: usize) -> Self {
        let mut iter = Self {
            nodes,
            front: Spine::new(),
            back: Spine::new(),
            remaining: len,
        };
        iter.descend_left(root);
        iter.descend_right(root);
        iter
    }

    fn descend_left(&mut self, mut node: Option<Handle>) {
        while let Some(handle) = node {
            self.front.push(handle);
            node = self.nodes.get(handle).left();
        }
    }

    fn descend_right(&mut self, mut node: Option<Handle>) {
        while let Some(handle) = node {
            self.back.push(handle);
            node = self.nodes.get(handle).right();
        }
    }
}

impl<'a, K> Iterator for RawIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = nodes.get(self.front.pop()?);
        self.descend_left(node.right());
        self.remaining -= 1;
        Some(node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> DoubleEndedIterator for RawIter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = nodes.get(self.back.pop()?);
        self.descend_right(node.left());
        self.remaining -= 1;
        Some(node.key())
    }
}

impl<K> ExactSizeIterator for RawIter<'_, K> {}

impl<K> FusedIterator for RawIter<'_, K> {}

impl<K> Clone for RawIter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K> fmt::Debug for RawIter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawIter").field("remaining", &self.remaining).finish_non_exhaustive()
    }
}
