//! Container mechanics shared by every tree: ownership of the node graph, size tracking, height,
//! structural equality, traversals and rendering. Nothing here knows about ordering; the
//! [`OrderedTree`][crate::OrderedTree] decides where nodes go.

use std::fmt;

use crate::node::{free_subtree, Link, Node};
use crate::{Relation, TreeError, Vertex};

pub(crate) struct BinaryTree<T> {
    pub(crate) root: Link<T>,
    pub(crate) len: usize,
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for BinaryTree<T> {
    fn drop(&mut self) {
        free_subtree(self.root.take());
    }
}

impl<T: Clone> Clone for BinaryTree<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.node().map_or(Link::NONE, Node::clone_subtree),
            len: self.len,
        }
    }
}

impl<T> BinaryTree<T> {
    pub(crate) fn new() -> Self {
        Self {
            root: Link::NONE,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        !self.root.is_some()
    }

    pub(crate) fn height(&self) -> isize {
        self.root.node().map_or(-1, Node::height)
    }

    pub(crate) fn clear(&mut self) {
        free_subtree(self.root.take());
        self.len = 0;
    }

    pub(crate) fn root(&self) -> Result<Vertex<'_, T>, TreeError> {
        self.root
            .node()
            .map(Vertex::new)
            .ok_or(TreeError::NotFound(Relation::Root))
    }

    /// Finds the first vertex, in pre-order, whose element equals `element`. This works for any
    /// shape of tree so it costs `O(n)`.
    pub(crate) fn find_linear(&self, element: &T) -> Option<Vertex<'_, T>>
    where
        T: PartialEq,
    {
        let mut found = None;
        self.pre_order(|v| {
            if found.is_none() && v.element() == element {
                found = Some(v);
            }
        });
        found
    }

    // The traversals keep their path on the heap so that list-shaped trees can't overflow the
    // call stack.

    pub(crate) fn pre_order<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(Vertex<'a, T>),
    {
        let mut stack: Vec<&'a Node<T>> = self.root.node().into_iter().collect();
        while let Some(node) = stack.pop() {
            f(Vertex::new(node));
            stack.extend(node.right());
            stack.extend(node.left());
        }
    }

    pub(crate) fn in_order<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(Vertex<'a, T>),
    {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.node());
        while let Some(node) = iter.next_node() {
            f(Vertex::new(node));
        }
    }

    pub(crate) fn post_order<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(Vertex<'a, T>),
    {
        // The flag says whether the node's children have been pushed already.
        let mut stack: Vec<(&'a Node<T>, bool)> =
            self.root.node().map(|root| (root, false)).into_iter().collect();
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                f(Vertex::new(node));
                continue;
            }
            stack.push((node, true));
            stack.extend(node.right().map(|right| (right, false)));
            stack.extend(node.left().map(|left| (left, false)));
        }
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.node());
        iter
    }

    /// Compares shape and elements. `same` is also consulted at every pair of vertices.
    pub(crate) fn eq_by<F>(&self, other: &Self, same: F) -> bool
    where
        T: PartialEq,
        F: Fn(&Node<T>, &Node<T>) -> bool,
    {
        match (self.root.node(), other.root.node()) {
            (None, None) => true,
            (Some(a), Some(b)) => a.subtree_eq(b, same),
            _ => false,
        }
    }

    /// Draws the tree one vertex per line. A left child hangs off `├─›` when it has a sibling
    /// and `└─›` when it doesn't; a right child always hangs off `└─»`.
    ///
    /// Drawing recurses once per level, so it needs `O(height)` stack.
    pub(crate) fn render<L>(&self, f: &mut fmt::Formatter<'_>, label: L) -> fmt::Result
    where
        L: Fn(&Node<T>, &mut fmt::Formatter<'_>) -> fmt::Result + Copy,
    {
        fn indent(f: &mut fmt::Formatter<'_>, guides: &[bool]) -> fmt::Result {
            for &guide in guides {
                f.write_str(if guide { "│  " } else { "   " })?;
            }
            Ok(())
        }

        fn draw<T, L>(
            node: &Node<T>,
            guides: &mut Vec<bool>,
            f: &mut fmt::Formatter<'_>,
            label: L,
        ) -> fmt::Result
        where
            L: Fn(&Node<T>, &mut fmt::Formatter<'_>) -> fmt::Result + Copy,
        {
            label(node, f)?;
            writeln!(f)?;

            let level = guides.len();
            guides.push(true);
            match (node.left(), node.right()) {
                (Some(left), Some(right)) => {
                    indent(f, &guides[..level])?;
                    f.write_str("├─›")?;
                    draw(left, guides, f, label)?;
                    indent(f, &guides[..level])?;
                    f.write_str("└─»")?;
                    guides[level] = false;
                    draw(right, guides, f, label)?;
                }
                (Some(left), None) => {
                    indent(f, &guides[..level])?;
                    f.write_str("└─›")?;
                    guides[level] = false;
                    draw(left, guides, f, label)?;
                }
                (None, Some(right)) => {
                    indent(f, &guides[..level])?;
                    f.write_str("└─»")?;
                    guides[level] = false;
                    draw(right, guides, f, label)?;
                }
                (None, None) => {}
            }
            guides.pop();
            Ok(())
        }

        match self.root.node() {
            Some(root) => draw(root, &mut Vec::new(), f, label),
            None => Ok(()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BinaryTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root.node().map(Vertex::new))
            .finish()
    }
}

/// An iterator over the elements of a tree in ascending (in-order) order.
///
/// It keeps the path to the next element on an explicit stack instead of recursing, so it only
/// needs `O(height)` memory.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }

    fn next_node(&mut self) -> Option<&'a Node<T>> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(node)
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(|node| &node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
