//! This crate exposes an ordered Binary Search Tree and a red-black tree built on top of it.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored elements. Every element lives in a vertex,
//! and every vertex has at most two children. The invariant of a BST is:
//!
//! 1. For every vertex, all the vertices in its left subtree hold an element
//!    that compares `<=` to its own element.
//! 2. For every vertex, all the vertices in its right subtree hold an element
//!    that compares `>=` to its own element.
//!
//! > Equal elements are allowed. A new element that ties with an existing one goes left.
//!
//! Searching takes `O(height)` where `height` is the longest path from the root
//! to a leaf. An [`OrderedTree`] does nothing to keep that short, so sorted input
//! turns it into a list. A [`RedBlackTree`] colors each vertex red or black and
//! recolors and rotates after every change so the height stays `O(lg N)`.
//!
//! Both trees hand out read-only [`Vertex`] handles which borrow the tree, and
//! both iterate in ascending order.
//!
//! ```
//! use rbtree::{OrderedTree, RedBlackTree};
//!
//! let list: OrderedTree<_> = (0..100).collect();
//! let balanced: RedBlackTree<_> = (0..100).collect();
//!
//! assert_eq!(list.height(), 99);
//! assert!(balanced.height() < 14);
//! assert!(list.iter().eq(balanced.iter()));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod binary;
mod error;
mod node;
pub mod ordered;
pub mod red_black;
mod vertex;


pub use binary::Iter;
pub use error::{Relation, TreeError};
pub use node::Color;
pub use ordered::OrderedTree;
pub use red_black::RedBlackTree;
pub use vertex::Vertex;
