//! An unbalanced Binary Search Tree. Elements go wherever comparisons send them, so inserting
//! sorted input produces a list-shaped tree. It exposes the two rotation primitives, which
//! reshape the tree locally while keeping its in-order sequence.
//!
//! # Examples
//!
//! ```
//! use rbtree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! tree.insert(2);
//! tree.insert(1);
//! assert!(tree.contains(&1));
//! assert_eq!(tree.height(), 1);
//!
//! // Rotating right around the root lifts its left child up.
//! tree.rotate_right(&2).unwrap();
//! assert_eq!(*tree.root().unwrap().element(), 1);
//!
//! // Deleting returns the removed element.
//! assert_eq!(tree.delete(&1), Some(1));
//! assert_eq!(tree.delete(&1), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ptr::NonNull;

use log::{debug, trace};

use crate::binary::{BinaryTree, Iter};
use crate::node::{Link, Node};
use crate::{Relation, TreeError, Vertex};

/// A Binary Search Tree without any balancing.
///
/// Every element in a vertex's left subtree compares `<=` to it and every element in its right
/// subtree compares `>=` to it. Equal elements are allowed; a new element that ties with an
/// existing one is sent to the left.
pub struct OrderedTree<T> {
    pub(crate) tree: BinaryTree<T>,
}

/// What [`OrderedTree::splice`] leaves behind.
pub(crate) struct Spliced<T> {
    /// The unlinked node. Its child and parent links have been cleared.
    pub(crate) removed: Box<Node<T>>,
    /// The node that took the removed node's place, if any.
    pub(crate) child: Link<T>,
    /// The removed node's former parent, now the parent of `child`.
    pub(crate) parent: Link<T>,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for OrderedTree<T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T> OrderedTree<T> {
    /// Generates a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self {
            tree: BinaryTree::new(),
        }
    }

    /// The number of elements in the tree.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Length of the longest root-to-leaf path, or `-1` for an empty tree.
    pub fn height(&self) -> isize {
        self.tree.height()
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// The topmost vertex, or [`TreeError::NotFound`] when the tree is empty.
    pub fn root(&self) -> Result<Vertex<'_, T>, TreeError> {
        self.tree.root()
    }

    /// Calls `f` on every vertex, parents before their children.
    pub fn pre_order<'a, F>(&'a self, f: F)
    where
        F: FnMut(Vertex<'a, T>),
    {
        self.tree.pre_order(f)
    }

    /// Calls `f` on every vertex in ascending order of elements.
    pub fn in_order<'a, F>(&'a self, f: F)
    where
        F: FnMut(Vertex<'a, T>),
    {
        self.tree.in_order(f)
    }

    /// Calls `f` on every vertex, children before their parents.
    pub fn post_order<'a, F>(&'a self, f: F)
    where
        F: FnMut(Vertex<'a, T>),
    {
        self.tree.post_order(f)
    }

    /// Iterates over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// Finds the first vertex in pre-order holding an element equal to `element`, without using
    /// the ordering. Prefer [`search`][Self::search] when `T: Ord`.
    pub fn find_linear(&self, element: &T) -> Option<Vertex<'_, T>>
    where
        T: PartialEq,
    {
        self.tree.find_linear(element)
    }

    fn vertex(&self, node: NonNull<Node<T>>) -> Vertex<'_, T> {
        // SAFETY: `node` is a live node of this tree and the returned vertex borrows `self`, so
        // the node can't be freed or mutated while the vertex exists.
        Vertex::new(unsafe { &*node.as_ptr() })
    }

    /// Points whichever link of `parent` (or the root) held `old` at `new` instead. Doesn't
    /// touch `new`'s parent link.
    fn replace_child(&mut self, parent: Link<T>, old: NonNull<Node<T>>, new: Link<T>) {
        match parent.0 {
            None => self.tree.root = new,
            // SAFETY: `parent` is a live node of this tree and we hold `&mut self`.
            Some(parent) => unsafe {
                if (*parent.as_ptr()).left.0 == Some(old) {
                    (*parent.as_ptr()).left = new;
                } else {
                    (*parent.as_ptr()).right = new;
                }
            },
        }
    }

    /// Exchanges `node`'s element with its in-order predecessor's when `node` has two children
    /// and returns the node that should be removed, which has at most one child.
    pub(crate) fn swap_with_predecessor(&mut self, node: NonNull<Node<T>>) -> NonNull<Node<T>> {
        // SAFETY: `node` is a live node of this tree and we hold `&mut self`. The predecessor
        // lives in `node`'s left subtree so the two `&mut` to elements never alias.
        unsafe {
            let n = node.as_ptr();
            let (Some(left), true) = ((*n).left.0, (*n).right.is_some()) else {
                return node;
            };
            let mut predecessor = left;
            while let Some(right) = (*predecessor.as_ptr()).right.0 {
                predecessor = right;
            }
            std::mem::swap(&mut (*n).element, &mut (*predecessor.as_ptr()).element);
            predecessor
        }
    }

    /// Unlinks `node`, which must have at most one child, moving that child into its place.
    ///
    /// ## Panics
    ///
    /// In debug builds, when `node` has two children.
    pub(crate) fn splice(&mut self, node: NonNull<Node<T>>) -> Spliced<T> {
        // SAFETY: `node` is a live node of this tree and we hold `&mut self`. After rewiring,
        // neither its parent nor its child points at it anymore, so reclaiming the box is the
        // only remaining reference.
        unsafe {
            let n = node.as_ptr();
            debug_assert!(
                !((*n).left.is_some() && (*n).right.is_some()),
                "Only nodes with at most one child can be spliced"
            );

            let child = if (*n).left.is_some() {
                (*n).left.take()
            } else {
                (*n).right.take()
            };
            let parent = (*n).parent.take();

            self.replace_child(parent, node, child);
            if let Some(child) = child.0 {
                (*child.as_ptr()).parent = parent;
            }
            self.tree.len -= 1;
            debug!(
                "spliced out a node with {} child and {} parent",
                if child.is_some() { "a" } else { "no" },
                if parent.is_some() { "a" } else { "no" },
            );

            Spliced {
                removed: Box::from_raw(n),
                child,
                parent,
            }
        }
    }

    /// Rotates `node` to the left, lifting its right child into its place. Does nothing when
    /// there is no right child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///      Option<parent>            Option<parent>
    ///       /                          /
    ///     node                      pivot
    ///    /    \      rotate ->     /     \
    ///   x    pivot               node     z
    ///        /   \              /    \
    ///       y     z            x      y
    /// ```
    pub(crate) fn rotate_left_at(&mut self, node: NonNull<Node<T>>) {
        // SAFETY: `node` and its relatives are live nodes of this tree and we hold `&mut self`.
        // Only raw place expressions are used so no two references to the same node coexist.
        let pivot = unsafe {
            let n = node.as_ptr();
            let Some(pivot) = (*n).right.0 else {
                return;
            };
            let inner = (*pivot.as_ptr()).left;
            (*n).right = inner;
            if let Some(inner) = inner.0 {
                (*inner.as_ptr()).parent = Link(Some(node));
            }

            let parent = (*n).parent;
            self.replace_child(parent, node, Link(Some(pivot)));
            (*pivot.as_ptr()).parent = parent;

            (*pivot.as_ptr()).left = Link(Some(node));
            (*n).parent = Link(Some(pivot));
            pivot
        };
        trace!("rotated left");
        self.debug_assert_linked(pivot);
    }

    /// Mirror image of [`rotate_left_at`][Self::rotate_left_at]: lifts the left child of `node`
    /// into its place.
    pub(crate) fn rotate_right_at(&mut self, node: NonNull<Node<T>>) {
        // SAFETY: See `rotate_left_at`.
        let pivot = unsafe {
            let n = node.as_ptr();
            let Some(pivot) = (*n).left.0 else {
                return;
            };
            let inner = (*pivot.as_ptr()).right;
            (*n).left = inner;
            if let Some(inner) = inner.0 {
                (*inner.as_ptr()).parent = Link(Some(node));
            }

            let parent = (*n).parent;
            self.replace_child(parent, node, Link(Some(pivot)));
            (*pivot.as_ptr()).parent = parent;

            (*pivot.as_ptr()).right = Link(Some(node));
            (*n).parent = Link(Some(pivot));
            pivot
        };
        trace!("rotated right");
        self.debug_assert_linked(pivot);
    }

    /// Checks that `node` and its parent and children agree on how they're connected.
    fn debug_assert_linked(&self, node: NonNull<Node<T>>) {
        if cfg!(debug_assertions) {
            let n = self.vertex(node).node();
            for child in [n.left(), n.right()].into_iter().flatten() {
                assert_eq!(child.parent.0, Some(node));
            }
            match n.parent() {
                Some(parent) => {
                    assert!(parent.left.0 == Some(node) || parent.right.0 == Some(node));
                }
                None => assert_eq!(self.tree.root.0, Some(node)),
            }
        }
    }
}

impl<T: Ord> OrderedTree<T> {
    /// Inserts `element` and returns the vertex holding it. The vertex borrows the tree, so it's
    /// only usable until the next change.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(5);
    ///
    /// let three = tree.insert(3);
    /// assert_eq!(*three.parent().unwrap().element(), 5);
    /// ```
    pub fn insert(&mut self, element: T) -> Vertex<'_, T> {
        let node = self.attach(element);
        self.vertex(node)
    }

    /// Hangs a new red leaf holding `element` wherever the ordering puts it and returns it.
    /// Ties go left.
    pub(crate) fn attach(&mut self, element: T) -> NonNull<Node<T>> {
        let new = Node::new_boxed(element).into_raw();
        self.tree.len += 1;

        let Some(mut parent) = self.tree.root.0 else {
            self.tree.root = Link(Some(new));
            return new;
        };
        // SAFETY: `parent` always points at a live node of this tree, `new` isn't in the tree
        // yet, and we hold `&mut self`.
        unsafe {
            loop {
                let slot = if (*new.as_ptr()).element <= (*parent.as_ptr()).element {
                    &mut (*parent.as_ptr()).left
                } else {
                    &mut (*parent.as_ptr()).right
                };
                match slot.0 {
                    Some(child) => parent = child,
                    None => {
                        *slot = Link(Some(new));
                        (*new.as_ptr()).parent = Link(Some(parent));
                        return new;
                    }
                }
            }
        }
    }

    /// Finds the vertex holding `element`. When several vertices hold equal elements, the first
    /// one in in-order wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.search(&3).unwrap().depth(), 1);
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, element: &T) -> Option<Vertex<'_, T>> {
        self.locate(element).map(|node| self.vertex(node))
    }

    /// Whether some vertex holds an element equal to `element`.
    pub fn contains(&self, element: &T) -> bool {
        self.locate(element).is_some()
    }

    pub(crate) fn locate(&self, element: &T) -> Option<NonNull<Node<T>>> {
        // Equal elements can sit on either side of a vertex once rotations are involved, so a
        // match doesn't stop the walk: an earlier one may still be in its left subtree.
        // Everything to the left of a vertex is `<=` and everything to the right is `>=`, so
        // this finds the same vertex a full in-order scan would.
        let mut found = None;
        let mut current = self.tree.root.node();
        while let Some(node) = current {
            current = match element.cmp(&node.element) {
                Ordering::Less => node.left(),
                Ordering::Equal => {
                    found = Some(node);
                    node.left()
                }
                Ordering::Greater => node.right(),
            };
        }
        found.map(NonNull::from)
    }

    /// Deletes the vertex [`search`][Self::search] would find for `element` and returns its
    /// element. If the tree does not contain the element, nothing happens.
    ///
    /// A vertex with two children takes its in-order predecessor's element and the predecessor
    /// is unlinked instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.delete(&2), Some(2));
    /// assert_eq!(*tree.root().unwrap().element(), 1);
    /// assert_eq!(tree.delete(&2), None);
    /// ```
    pub fn delete(&mut self, element: &T) -> Option<T> {
        let target = self.locate(element)?;
        let node = self.swap_with_predecessor(target);
        let Node { element, .. } = *self.splice(node).removed;
        Some(element)
    }

    /// Rotates the vertex holding `element` to the left, lifting its right child into its place.
    /// Does nothing if that vertex has no right child.
    ///
    /// Fails with [`TreeError::NotFound`] if no vertex holds `element`.
    pub fn rotate_left(&mut self, element: &T) -> Result<(), TreeError> {
        let node = self
            .locate(element)
            .ok_or(TreeError::NotFound(Relation::Element))?;
        self.rotate_left_at(node);
        Ok(())
    }

    /// Rotates the vertex holding `element` to the right, lifting its left child into its place.
    /// Does nothing if that vertex has no left child.
    ///
    /// Fails with [`TreeError::NotFound`] if no vertex holds `element`.
    pub fn rotate_right(&mut self, element: &T) -> Result<(), TreeError> {
        let node = self
            .locate(element)
            .ok_or(TreeError::NotFound(Relation::Element))?;
        self.rotate_right_at(node);
        Ok(())
    }
}

impl<T: Ord> FromIterator<T> for OrderedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for OrderedTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.attach(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for OrderedTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tree.eq_by(&other.tree, |_, _| true)
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<T: fmt::Display> fmt::Display for OrderedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.render(f, |node, f| fmt::Display::fmt(&node.element, f))
    }
}
