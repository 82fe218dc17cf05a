//! Read-only handles onto the vertices of a tree.
//!
//! # Examples
//!
//! ```
//! use rbtree::{OrderedTree, Relation, TreeError};
//!
//! let tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
//! let root = tree.root().unwrap();
//!
//! assert_eq!(*root.element(), 2);
//! assert_eq!(*root.left().unwrap().element(), 1);
//! assert_eq!(root.parent(), Err(TreeError::NotFound(Relation::Parent)));
//! ```

use std::fmt;

use crate::node::{Color, Node};
use crate::{Relation, TreeError};

/// A shared view of one vertex of a tree. It borrows the tree, so the tree can't change while a
/// `Vertex` into it is alive.
///
/// Two vertices compare equal when the subtrees hanging from them have the same shape and equal
/// elements in the same positions.
pub struct Vertex<'a, T> {
    node: &'a Node<T>,
}

impl<T> Clone for Vertex<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Vertex<'_, T> {}

impl<'a, T> Vertex<'a, T> {
    pub(crate) fn new(node: &'a Node<T>) -> Self {
        Self { node }
    }

    pub(crate) fn node(&self) -> &'a Node<T> {
        self.node
    }

    pub(crate) fn color(&self) -> Color {
        self.node.color
    }

    /// The element stored in this vertex.
    pub fn element(&self) -> &'a T {
        &self.node.element
    }

    /// Whether this vertex has a parent, i.e. isn't the root.
    pub fn has_parent(&self) -> bool {
        self.node.parent.is_some()
    }

    /// Whether this vertex has a left child.
    pub fn has_left(&self) -> bool {
        self.node.left.is_some()
    }

    /// Whether this vertex has a right child.
    pub fn has_right(&self) -> bool {
        self.node.right.is_some()
    }

    /// The parent of this vertex, or [`TreeError::NotFound`] for the root.
    pub fn parent(&self) -> Result<Self, TreeError> {
        self.node
            .parent()
            .map(Vertex::new)
            .ok_or(TreeError::NotFound(Relation::Parent))
    }

    /// The left child of this vertex, or [`TreeError::NotFound`] if there isn't one.
    pub fn left(&self) -> Result<Self, TreeError> {
        self.node
            .left()
            .map(Vertex::new)
            .ok_or(TreeError::NotFound(Relation::Left))
    }

    /// The right child of this vertex, or [`TreeError::NotFound`] if there isn't one.
    pub fn right(&self) -> Result<Self, TreeError> {
        self.node
            .right()
            .map(Vertex::new)
            .ok_or(TreeError::NotFound(Relation::Right))
    }

    /// Length of the longest path from this vertex down to an absent child. A vertex without
    /// children has height 0.
    pub fn height(&self) -> isize {
        self.node.height()
    }

    /// Number of edges between this vertex and the root. The root has depth 0.
    pub fn depth(&self) -> usize {
        self.node.depth()
    }
}

impl<T: PartialEq> PartialEq for Vertex<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.node.subtree_eq(other.node, |_, _| true)
    }
}

/// Prints the whole subtree, recursing once per level.
impl<T: fmt::Debug> fmt::Debug for Vertex<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertex")
            .field("element", &self.node.element)
            .field("left", &self.node.left().map(Vertex::new))
            .field("right", &self.node.right().map(Vertex::new))
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for Vertex<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.node.element, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::OrderedTree;

    use super::*;

    #[test]
    fn relations_of_a_leaf() {
        let tree: OrderedTree<_> = [5, 3, 8].into_iter().collect();
        let leaf = tree.search(&3).unwrap();

        assert!(leaf.has_parent());
        assert!(!leaf.has_left());
        assert!(!leaf.has_right());
        assert_eq!(leaf.left(), Err(TreeError::NotFound(Relation::Left)));
        assert_eq!(leaf.right(), Err(TreeError::NotFound(Relation::Right)));
        assert_eq!(*leaf.parent().unwrap().element(), 5);
        assert_eq!(leaf.height(), 0);
        assert_eq!(leaf.depth(), 1);
    }

    #[test]
    fn equality_compares_subtrees() {
        let a: OrderedTree<_> = [5, 3, 8].into_iter().collect();
        let b: OrderedTree<_> = [5, 8, 3].into_iter().collect();
        let c: OrderedTree<_> = [3, 5, 8].into_iter().collect();

        assert_eq!(a.root().unwrap(), b.root().unwrap());
        assert_ne!(a.root().unwrap(), c.root().unwrap());

        // Same element, different subtrees.
        assert_ne!(a.search(&5).unwrap(), c.search(&5).unwrap());
        assert_eq!(a.search(&8).unwrap(), c.search(&8).unwrap());
    }

    #[test]
    fn debug_shows_the_subtree() {
        let tree: OrderedTree<_> = [2, 1].into_iter().collect();
        assert_eq!(
            format!("{:?}", tree.root().unwrap()),
            "Vertex { element: 2, left: Some(Vertex { element: 1, left: None, right: None }), \
             right: None }"
        );
    }

    #[test]
    fn display_prints_the_element() {
        let tree: OrderedTree<_> = [42].into_iter().collect();
        assert_eq!(tree.root().unwrap().to_string(), "42");
    }
}
