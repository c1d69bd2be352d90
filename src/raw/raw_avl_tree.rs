use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use super::arena::Arena;
use super::handle::Handle;
use super::iter::RawIter;
use super::node::Node;

/// The AVL tree backing `AvlTree`.
///
/// Every mutation descends recursively and hands the (possibly rotated) subtree
/// root back to its caller, which stores it in its own child slot. Nothing
/// below the root ever needs to know its parent.
#[derive(Clone)]
pub(crate) struct RawAvlTree<K> {
    /// Arena owning every node in the tree.
    nodes: Arena<Node<K>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl<K> RawAvlTree<K> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of keys in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Releases every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Height of the whole tree; 0 when empty.
    pub(crate) fn height(&self) -> u8 {
        self.height_of(self.root)
    }

    #[inline]
    fn key(&self, handle: Handle) -> &K {
        self.nodes.get(handle).key()
    }

    // ─── Height / balance ───────────────────────────────────────────────────

    #[inline]
    fn height_of(&self, node: Option<Handle>) -> u8 {
        node.map_or(0, |handle| self.nodes.get(handle).height())
    }

    /// Left height minus right height; 0 for an absent node.
    fn balance_of(&self, node: Option<Handle>) -> i16 {
        node.map_or(0, |handle| {
            let node = self.nodes.get(handle);
            i16::from(self.height_of(node.left())) - i16::from(self.height_of(node.right()))
        })
    }

    fn update_height(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let height = 1 + self.height_of(node.left()).max(self.height_of(node.right()));
        self.nodes.get_mut(handle).set_height(height);
    }

    fn left_child(&self, handle: Handle) -> Handle {
        self.nodes
            .get(handle)
            .left()
            .expect("`RawAvlTree::left_child()` - left-heavy node has no left child!")
    }

    fn right_child(&self, handle: Handle) -> Handle {
        self.nodes
            .get(handle)
            .right()
            .expect("`RawAvlTree::right_child()` - right-heavy node has no right child!")
    }

    // ─── Rotations ──────────────────────────────────────────────────────────

    //       y           x
    //      / \         / \
    //     x   C  =>   A   y
    //    / \             / \
    //   A   B           B   C
    fn rotate_right(&mut self, y: Handle) -> Handle {
        let x = self.left_child(y);
        let b = self.nodes.get(x).right();
        self.nodes.get_mut(y).set_left(b);
        self.nodes.get_mut(x).set_right(Some(y));
        self.update_height(y);
        self.update_height(x);
        x
    }

    //     x               y
    //    / \             / \
    //   A   y     =>    x   C
    //      / \         / \
    //     B   C       A   B
    fn rotate_left(&mut self, x: Handle) -> Handle {
        let y = self.right_child(x);
        let b = self.nodes.get(y).left();
        self.nodes.get_mut(x).set_right(b);
        self.nodes.get_mut(y).set_left(Some(x));
        self.update_height(x);
        self.update_height(y);
        y
    }

    /// Restores balance at `handle` after a removal below it and returns the new
    /// subtree root. The heavy child's own balance picks single or double rotation.
    fn rebalance_after_remove(&mut self, handle: Handle) -> Handle {
        self.update_height(handle);
        let balance = self.balance_of(Some(handle));

        if balance > 1 {
            let left = self.left_child(handle);
            if self.balance_of(Some(left)) < 0 {
                let left = self.rotate_left(left);
                self.nodes.get_mut(handle).set_left(Some(left));
            }
            return self.rotate_right(handle);
        }

        if balance < -1 {
            let right = self.right_child(handle);
            if self.balance_of(Some(right)) > 0 {
                let right = self.rotate_right(right);
                self.nodes.get_mut(handle).set_right(Some(right));
            }
            return self.rotate_left(handle);
        }

        handle
    }

    // ─── Removal helpers that need no key comparison ────────────────────────

    /// Unlinks the minimum of the subtree at `handle` without freeing it.
    /// Returns `(new_subtree_root, min)`.
    fn detach_min(&mut self, handle: Handle) -> (Option<Handle>, Handle) {
        match self.nodes.get(handle).left() {
            None => (self.nodes.get(handle).right(), handle),
            Some(left) => {
                let (left, min) = self.detach_min(left);
                self.nodes.get_mut(handle).set_left(left);
                (Some(self.rebalance_after_remove(handle)), min)
            }
        }
    }

    /// Mirror of [`detach_min`](Self::detach_min).
    fn detach_max(&mut self, handle: Handle) -> (Option<Handle>, Handle) {
        match self.nodes.get(handle).right() {
            None => (self.nodes.get(handle).left(), handle),
            Some(right) => {
                let (right, max) = self.detach_max(right);
                self.nodes.get_mut(handle).set_right(right);
                (Some(self.rebalance_after_remove(handle)), max)
            }
        }
    }

    /// Frees an already unlinked node and returns its key.
    fn release(&mut self, handle: Handle) -> K {
        let (key, _, _) = self.nodes.take(handle).into_parts();
        key
    }

    pub(crate) fn pop_first(&mut self) -> Option<K> {
        let (root, min) = self.detach_min(self.root?);
        self.root = root;
        Some(self.release(min))
    }

    pub(crate) fn pop_last(&mut self) -> Option<K> {
        let (root, max) = self.detach_max(self.root?);
        self.root = root;
        Some(self.release(max))
    }

    // ─── Read-only access ───────────────────────────────────────────────────

    pub(crate) fn first(&self) -> Option<&K> {
        let mut current = self.root?;
        while let Some(left) = self.nodes.get(current).left() {
            current = left;
        }
        Some(self.key(current))
    }

    pub(crate) fn last(&self) -> Option<&K> {
        let mut current = self.root?;
        while let Some(right) = self.nodes.get(current).right() {
            current = right;
        }
        Some(self.key(current))
    }

    /// Collects every key in ascending order.
    pub(crate) fn in_order(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len());
        self.collect_in_order(self.root, &mut keys);
        keys
    }

    fn collect_in_order<'a>(&'a self, node: Option<Handle>, keys: &mut Vec<&'a K>) {
        if let Some(handle) = node {
            let node = self.nodes.get(handle);
            self.collect_in_order(node.left(), keys);
            keys.push(node.key());
            self.collect_in_order(node.right(), keys);
        }
    }

    /// Lazy ascending walk over the keys.
    pub(crate) fn iter(&self) -> RawIter<'_, K> {
        RawIter::new(&self.nodes, self.root, self.len())
    }

    /// Consumes the tree, moving every key out in ascending order.
    pub(crate) fn into_sorted_vec(mut self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len());
        let root = self.root.take();
        self.drain_in_order(root, &mut keys);
        keys
    }

    fn drain_in_order(&mut self, node: Option<Handle>, keys: &mut Vec<K>) {
        if let Some(handle) = node {
            let (key, left, right) = self.nodes.take(handle).into_parts();
            self.drain_in_order(left, keys);
            keys.push(key);
            self.drain_in_order(right, keys);
        }
    }
}

impl<K: Ord> RawAvlTree<K> {
    /// Finds the node holding `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return Some(handle),
            };
        }
        None
    }

    /// Returns the stored key equal to `key`.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|handle| self.key(handle))
    }

    /// Inserts `key`. Returns `false`, leaving the tree untouched, if an equal
    /// key is already present.
    pub(crate) fn insert(&mut self, key: K) -> bool {
        let (root, inserted) = self.insert_at(self.root, key);
        self.root = Some(root);
        inserted.is_some()
    }

    /// Returns `(new_subtree_root, new_node)`; `new_node` is `None` for a duplicate.
    fn insert_at(&mut self, node: Option<Handle>, key: K) -> (Handle, Option<Handle>) {
        let Some(handle) = node else {
            let leaf = self.nodes.alloc(Node::leaf(key));
            return (leaf, Some(leaf));
        };

        let current = self.nodes.get(handle);
        let (left, right) = (current.left(), current.right());
        let inserted = match key.cmp(current.key()) {
            Less => {
                let (left, inserted) = self.insert_at(left, key);
                self.nodes.get_mut(handle).set_left(Some(left));
                inserted
            }
            Greater => {
                let (right, inserted) = self.insert_at(right, key);
                self.nodes.get_mut(handle).set_right(Some(right));
                inserted
            }
            Equal => None,
        };

        match inserted {
            Some(new_node) => (self.rebalance_after_insert(handle, new_node), inserted),
            // Nothing changed below; heights and balance are as they were.
            None => (handle, None),
        }
    }

    /// Restores balance at `handle` after `new_node` was added below it.
    ///
    /// Which grandchild received the key decides the case: comparing the new key
    /// with the heavy child's key separates LL from LR and RR from RL.
    fn rebalance_after_insert(&mut self, handle: Handle, new_node: Handle) -> Handle {
        self.update_height(handle);
        let balance = self.balance_of(Some(handle));

        if balance > 1 {
            let left = self.left_child(handle);
            if self.key(new_node) > self.key(left) {
                // LR: straighten into LL first.
                let left = self.rotate_left(left);
                self.nodes.get_mut(handle).set_left(Some(left));
            }
            return self.rotate_right(handle);
        }

        if balance < -1 {
            let right = self.right_child(handle);
            if self.key(new_node) < self.key(right) {
                // RL: straighten into RR first.
                let right = self.rotate_right(right);
                self.nodes.get_mut(handle).set_right(Some(right));
            }
            return self.rotate_left(handle);
        }

        handle
    }

    /// Removes `key` and returns it, or `None` if it was absent.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (root, removed) = self.remove_at(self.root, key);
        self.root = root;
        removed.map(|handle| self.release(handle))
    }

    /// Returns `(new_subtree_root, unlinked_node)`. The unlinked node is still
    /// allocated; the caller releases it.
    fn remove_at<Q>(&mut self, node: Option<Handle>, key: &Q) -> (Option<Handle>, Option<Handle>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(handle) = node else {
            return (None, None);
        };

        let current = self.nodes.get(handle);
        let (left, right) = (current.left(), current.right());
        let removed = match key.cmp(current.key().borrow()) {
            Less => {
                let (left, removed) = self.remove_at(left, key);
                self.nodes.get_mut(handle).set_left(left);
                removed
            }
            Greater => {
                let (right, removed) = self.remove_at(right, key);
                self.nodes.get_mut(handle).set_right(right);
                removed
            }
            Equal => {
                let replacement = if let (Some(_), Some(right)) = (left, right) {
                    // The in-order successor takes this node's place.
                    let (right, successor) = self.detach_min(right);
                    let node = self.nodes.get_mut(successor);
                    node.set_left(left);
                    node.set_right(right);
                    Some(self.rebalance_after_remove(successor))
                } else {
                    self.nodes.get(handle).sole_child()
                };
                return (replacement, Some(handle));
            }
        };

        match removed {
            // Every ancestor is re-checked; one rotation may not be enough.
            Some(_) => (Some(self.rebalance_after_remove(handle)), removed),
            None => (Some(handle), None),
        }
    }
}
