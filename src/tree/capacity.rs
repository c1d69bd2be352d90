use super::AvlTree;
use crate::raw::RawAvlTree;

impl<K> AvlTree<K> {
    /// Creates an empty tree with room for at least `capacity` keys before the
    /// node arena reallocates.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<i32> = AvlTree::with_capacity(16);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlTree {
            raw: RawAvlTree::with_capacity(capacity),
        }
    }

    /// Returns how many keys the tree can hold before the node arena reallocates.
    ///
    /// Slots freed by removals are reused, so a tree that shrinks and regrows
    /// does not allocate again.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree: AvlTree<i32> = AvlTree::with_capacity(4);
    /// let capacity = tree.capacity();
    /// tree.extend([1, 2, 3, 4]);
    /// tree.remove(&1);
    /// tree.insert(5);
    /// assert_eq!(tree.capacity(), capacity);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
