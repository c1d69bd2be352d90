//! A height-balanced (AVL) ordered set for Rust.
//!
//! This crate provides [`AvlTree`], an ordered collection of unique keys that keeps
//! itself balanced after every insertion and removal. Every node's left and right
//! subtree heights differ by at most one, so lookups, insertions and removals all
//! run in O(log n) comparisons regardless of the order keys arrive in.
//!
//! # Example
//!
//! ```
//! use avl_tree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for key in [30, 20, 10] {
//!     tree.insert(key);
//! }
//!
//! // The descending run was rotated into a balanced tree of height 2.
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.in_order(), [10, 20, 30]);
//!
//! assert!(tree.search(&20));
//! tree.remove(&20);
//! assert!(!tree.search(&20));
//! assert_eq!(tree.in_order(), [10, 30]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No `unsafe`** - Nodes live in an index arena and link to each other by handle
//! - **`BTreeSet`-style surface** - `iter`, `first`/`last`, `pop_first`/`pop_last`,
//!   `FromIterator`, `Extend` and friends
//!
//! # Implementation
//!
//! Insertion and removal descend recursively and rebalance on the way back up.
//! After an insertion at most one single or double rotation is needed; after a
//! removal every ancestor on the path is re-checked, since each rotation can
//! shorten the subtree it fixes.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod raw;

pub mod tree;

pub use tree::AvlTree;
