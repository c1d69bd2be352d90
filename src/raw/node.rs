use super::handle::Handle;

/// A single tree node. Children are owned through their arena handles.
#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    key: K,
    left: Option<Handle>,
    right: Option<Handle>,
    // Height of the subtree rooted here; a leaf is 1.
    height: u8,
}

impl<K> Node<K> {
    /// Creates a detached leaf.
    pub(crate) const fn leaf(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 1,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    pub(crate) fn set_height(&mut self, height: u8) {
        self.height = height;
    }

    /// Returns the only child, or `None` for a leaf. Panics if both are present.
    pub(crate) fn sole_child(&self) -> Option<Handle> {
        match (self.left, self.right) {
            (Some(_), Some(_)) => panic!("`Node::sole_child()` - node has two children!"),
            (child, None) | (None, child) => child,
        }
    }

    /// Consumes the node, yielding `(key, left, right)`.
    pub(crate) fn into_parts(self) -> (K, Option<Handle>, Option<Handle>) {
        (self.key, self.left, self.right)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_leaf_has_height_one_and_no_children() {
        let node = Node::leaf(7);
        assert_eq!(*node.key(), 7);
        assert_eq!(node.height(), 1);
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), None);
        assert_eq!(node.sole_child(), None);
    }

    #[test]
    fn sole_child_picks_the_present_side() {
        let mut node = Node::leaf(7);
        node.set_right(Some(Handle::from_index(3)));
        assert_eq!(node.sole_child(), Some(Handle::from_index(3)));

        node.set_right(None);
        node.set_left(Some(Handle::from_index(1)));
        assert_eq!(node.sole_child(), Some(Handle::from_index(1)));
    }

    #[test]
    #[should_panic(expected = "`Node::sole_child()` - node has two children!")]
    fn sole_child_rejects_inner_node() {
        let mut node = Node::leaf(7);
        node.set_left(Some(Handle::from_index(0)));
        node.set_right(Some(Handle::from_index(1)));
        let _ = node.sole_child();
    }
}
