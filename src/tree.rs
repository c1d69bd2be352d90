use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{RawAvlTree, RawIter};

mod capacity;

/// An ordered set of unique keys based on an AVL tree.
///
/// Every node's two subtrees differ in height by at most one. Insertions and
/// removals restore that after each call with at most O(log n) rotations, so the
/// tree height stays below `1.44 * log2(n + 2)` and every lookup is O(log n).
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative
/// to any other key, as determined by the [`Ord`] trait, changes while it is in the tree. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `AvlTree` that observed the logic error and not result in undefined behavior. This could
/// include panics, incorrect results, aborts, memory leaks, and non-termination.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use avl_tree::AvlTree;
///
/// let mut ids = AvlTree::new();
///
/// ids.insert(42);
/// ids.insert(7);
/// ids.insert(19);
///
/// // Inserting a key twice is a no-op.
/// assert!(!ids.insert(7));
///
/// if !ids.search(&8) {
///     println!("{} ids, but 8 isn't one.", ids.len());
/// }
///
/// ids.remove(&42);
///
/// for id in &ids {
///     println!("{id}");
/// }
/// assert_eq!(ids.in_order(), [7, 19]);
/// ```
///
/// An `AvlTree` with a known list of keys can be initialized from an array:
///
/// ```
/// use avl_tree::AvlTree;
///
/// let tree = AvlTree::from([3, 1, 2]);
/// assert_eq!(tree.in_order(), [1, 2, 3]);
/// ```
pub struct AvlTree<K> {
    raw: RawAvlTree<K>,
}

/// An iterator over the keys of an `AvlTree`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`AvlTree`].
///
/// # Examples
///
/// ```
/// use avl_tree::AvlTree;
///
/// let tree = AvlTree::from([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: AvlTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K: 'a> {
    inner: RawIter<'a, K>,
}

/// An owning iterator over the keys of an `AvlTree`, in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`AvlTree`]
/// (provided by the [`IntoIterator`] trait).
///
/// # Examples
///
/// ```
/// use avl_tree::AvlTree;
///
/// let tree = AvlTree::from([1, 2, 3]);
/// let mut iter = tree.into_iter();
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.next_back(), Some(3));
/// assert_eq!(iter.next(), Some(2));
/// ```
///
/// [`into_iter`]: AvlTree#method.into_iter
pub struct IntoIter<K> {
    inner: alloc::vec::IntoIter<K>,
}

impl<K> AvlTree<K> {
    /// Makes a new, empty `AvlTree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    ///
    /// // keys can now be inserted into the empty tree
    /// tree.insert(1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> AvlTree<K> {
        AvlTree { raw: RawAvlTree::new() }
    }

    /// Adds a key to the tree.
    ///
    /// Returns whether the key was newly inserted. That is:
    ///
    /// - If the tree did not previously contain an equal key, `true` is returned.
    /// - If the tree already contained an equal key, `false` is returned, and the
    ///   tree is left exactly as it was: the stored key is kept and the new one dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    ///
    /// assert_eq!(tree.insert(2), true);
    /// assert_eq!(tree.insert(2), false);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        self.raw.insert(key)
    }

    /// Removes a key from the tree. Returns whether the key was present.
    ///
    /// Removing an absent key leaves the tree unchanged.
    ///
    /// The key may be any borrowed form of the tree's key type,
    /// but the ordering on the borrowed form *must* match the
    /// ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(2);
    /// assert_eq!(tree.remove(&2), true);
    /// assert_eq!(tree.remove(&2), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key).is_some()
    }

    /// Removes and returns the key in the tree, if any, that is equal to the given one.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([1, 2, 3]);
    /// assert_eq!(tree.take(&2), Some(2));
    /// assert_eq!(tree.take(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }

    /// Returns `true` if the tree contains a key equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([1, 2, 3]);
    /// assert_eq!(tree.search(&1), true);
    /// assert_eq!(tree.search(&4), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn search<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Returns a reference to the stored key equal to `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([String::from("fig")]);
    /// assert_eq!(tree.get("fig"), Some(&String::from("fig")));
    /// assert_eq!(tree.get("kiwi"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns every key, cloned, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// for key in [10, 30, 20] {
    ///     tree.insert(key);
    /// }
    /// assert_eq!(tree.in_order(), [10, 20, 30]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn in_order(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.raw.in_order().into_iter().cloned().collect()
    }

    /// Gets an iterator that visits the keys in ascending order.
    ///
    /// Unlike [`in_order`](Self::in_order), nothing is collected up front and
    /// the keys are borrowed, not cloned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([3, 1, 2]);
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; O(1) amortized per step.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter { inner: self.raw.iter() }
    }

    /// Returns the smallest key in the tree, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.first(), None);
    /// tree.insert(2);
    /// tree.insert(1);
    /// assert_eq!(tree.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.raw.first()
    }

    /// Returns the largest key in the tree, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([1, 2]);
    /// assert_eq!(tree.last(), Some(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.raw.last()
    }

    /// Removes and returns the smallest key in the tree, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([1, 2]);
    /// assert_eq!(tree.pop_first(), Some(1));
    /// assert_eq!(tree.pop_first(), Some(2));
    /// assert_eq!(tree.pop_first(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_first(&mut self) -> Option<K> {
        self.raw.pop_first()
    }

    /// Removes and returns the largest key in the tree, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([1, 2]);
    /// assert_eq!(tree.pop_last(), Some(2));
    /// assert_eq!(tree.pop_last(), Some(1));
    /// assert_eq!(tree.pop_last(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<K> {
        self.raw.pop_last()
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = (0..7).collect();
    /// assert_eq!(tree.height(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.raw.height())
    }

    /// Clears the tree, removing all keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([1]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert!(tree.is_empty());
    /// tree.insert(1);
    /// assert!(!tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl<K: PartialEq> PartialEq for AvlTree<K> {
    /// Two trees are equal when they hold equal keys; their shapes may differ.
    fn eq(&self, other: &AvlTree<K>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for AvlTree<K> {}

impl<K: Clone> Clone for AvlTree<K> {
    fn clone(&self) -> Self {
        AvlTree { raw: self.raw.clone() }
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        AvlTree::new()
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K: 'a + Ord + Copy> Extend<&'a K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for AvlTree<K> {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<K> IntoIterator for AvlTree<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    /// Gets an iterator for moving out the `AvlTree`'s keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = tree.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<K> {
        IntoIter {
            inner: self.raw.into_sorted_vec().into_iter(),
        }
    }
}

impl<'a, K> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn min(mut self) -> Option<&'a K>
    where
        &'a K: Ord,
    {
        self.next()
    }

    fn max(mut self) -> Option<&'a K>
    where
        &'a K: Ord,
    {
        self.next_back()
    }
}

impl<'a, K> DoubleEndedIterator for Iter<'a, K> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for IntoIter<K> {}

impl<K: fmt::Debug> fmt::Debug for IntoIter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K> Default for IntoIter<K> {
    /// Creates an empty `avl_tree::tree::IntoIter`.
    ///
    /// ```
    /// # use avl_tree::tree;
    /// let iter: tree::IntoIter<u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: Vec::new().into_iter(),
        }
    }
}
