//! A self-balancing Binary Search Tree (specifically, a red-black tree).
//!
//! Every vertex is tagged [`Red`][Color::Red] or [`Black`][Color::Black] and, on top of the
//! ordering invariant of the [`OrderedTree`] it's built on, the tree keeps these invariants
//! after every operation:
//!
//! 1. The root is black.
//! 2. A red vertex has no red children (absent children count as black).
//! 3. Every path from a vertex down to an absent child passes through the same number of black
//!    vertices.
//!
//! Together they bound the height by `2 * lg(n + 1)`. Inserts and deletes go through the
//! [`OrderedTree`] and then run a fixup pass that recolors and rotates its way back up towards
//! the root. Rotations are *not* part of this type's API, since an arbitrary rotation can break
//! invariant 3.
//!
//! # Examples
//!
//! ```
//! use rbtree::{Color, RedBlackTree};
//!
//! let mut tree = RedBlackTree::new();
//!
//! // Sorted input doesn't turn into a list.
//! for x in 1..=7 {
//!     tree.insert(x);
//! }
//! assert!(tree.height() <= 3);
//!
//! let root = tree.root().unwrap();
//! assert_eq!(tree.color_of(&root), Color::Black);
//!
//! assert_eq!(tree.delete(&4), Some(4));
//! assert!(!tree.contains(&4));
//! ```

use std::fmt;
use std::ptr::NonNull;

use log::trace;

use crate::binary::Iter;
use crate::node::{Color, Link, Node};
use crate::ordered::OrderedTree;
use crate::{TreeError, Vertex};

/// A red-black tree. See the [module documentation][self] for the invariants it keeps.
pub struct RedBlackTree<T> {
    tree: OrderedTree<T>,
}

impl<T> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for RedBlackTree<T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T> RedBlackTree<T> {
    /// Generates a new, empty `RedBlackTree`.
    pub fn new() -> Self {
        Self {
            tree: OrderedTree::new(),
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

    /// The color of `vertex`, which must come from this tree.
    pub fn color_of(&self, vertex: &Vertex<'_, T>) -> Color {
        vertex.color()
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
}

impl<T: Ord> RedBlackTree<T> {
    /// Inserts `element` and returns the vertex holding it. Equal elements are kept side by side.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::{Color, RedBlackTree};
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(2);
    ///
    /// let one = tree.insert(1);
    /// assert_eq!(*one.element(), 1);
    /// assert_eq!(tree.color_of(&one), Color::Red);
    /// ```
    pub fn insert(&mut self, element: T) -> Vertex<'_, T> {
        let node = self.tree.attach(element);
        self.insert_fixup(node);
        // SAFETY: `node` is still in the tree (fixups only rotate and recolor) and the vertex
        // borrows `self`.
        Vertex::new(unsafe { &*node.as_ptr() })
    }

    /// Finds the vertex holding `element`. When several vertices hold equal elements, the first
    /// one in in-order wins.
    pub fn search(&self, element: &T) -> Option<Vertex<'_, T>> {
        self.tree.search(element)
    }

    /// Whether some vertex holds an element equal to `element`.
    pub fn contains(&self, element: &T) -> bool {
        self.tree.contains(element)
    }

    /// Deletes the vertex [`search`][Self::search] would find for `element` and returns its
    /// element. If the tree does not contain the element, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::{Color, RedBlackTree};
    ///
    /// let mut tree: RedBlackTree<_> = [10, 5].into_iter().collect();
    ///
    /// assert_eq!(tree.delete(&10), Some(10));
    /// let root = tree.root().unwrap();
    /// assert_eq!(*root.element(), 5);
    /// assert_eq!(tree.color_of(&root), Color::Black);
    /// ```
    pub fn delete(&mut self, element: &T) -> Option<T> {
        let target = self.tree.locate(element)?;
        let node = self.tree.swap_with_predecessor(target);
        let spliced = self.tree.splice(node);

        match (spliced.removed.color, spliced.child.color()) {
            // Removing a red vertex never changes a black-height.
            (Color::Red, _) => {}
            // A red child can take over the removed vertex's black.
            (Color::Black, Color::Red) => {
                if let Some(child) = spliced.child.0 {
                    // SAFETY: `child` was just moved into the tree by `splice` and we hold
                    // `&mut self`.
                    unsafe { (*child.as_ptr()).color = Color::Black };
                }
            }
            (Color::Black, Color::Black) => self.delete_fixup(spliced.child, spliced.parent),
        }

        let Node { element, .. } = *spliced.removed;
        Some(element)
    }

    /// Restores the invariants after `node` was attached as a red leaf. The only thing that can
    /// be wrong is `node` and its parent both being red.
    fn insert_fixup(&mut self, mut node: NonNull<Node<T>>) {
        // SAFETY: Every pointer dereferenced here is a live node of this tree reached through
        // parent links, and we hold `&mut self`. Only raw place expressions are used so no two
        // references to the same node coexist, including across the rotations.
        unsafe {
            loop {
                let Some(mut parent) = (*node.as_ptr()).parent.0 else {
                    trace!("insert fixup: reached the root");
                    (*node.as_ptr()).color = Color::Black;
                    break;
                };
                if (*parent.as_ptr()).color == Color::Black {
                    trace!("insert fixup: black parent");
                    break;
                }

                let grandparent = (*parent.as_ptr())
                    .parent
                    .0
                    .expect("A red vertex is never the root so it has a parent");
                let parent_is_left = (*grandparent.as_ptr()).left.0 == Some(parent);
                let uncle = if parent_is_left {
                    (*grandparent.as_ptr()).right
                } else {
                    (*grandparent.as_ptr()).left
                };

                if let (Some(uncle), Color::Red) = (uncle.0, uncle.color()) {
                    trace!("insert fixup: red uncle");
                    (*parent.as_ptr()).color = Color::Black;
                    (*uncle.as_ptr()).color = Color::Black;
                    (*grandparent.as_ptr()).color = Color::Red;
                    node = grandparent;
                    continue;
                }

                let node_is_left = (*parent.as_ptr()).left.0 == Some(node);
                if node_is_left != parent_is_left {
                    trace!("insert fixup: inner grandchild");
                    //      G             G
                    //     / \           / \
                    //    p   U  -->    n   U
                    //     \           /
                    //      n         p
                    if parent_is_left {
                        self.tree.rotate_left_at(parent);
                    } else {
                        self.tree.rotate_right_at(parent);
                    }
                    // `node` is now the parent of the old parent, on the same side.
                    parent = node;
                }

                trace!("insert fixup: outer grandchild");
                //        G           P
                //       / \         / \
                //      p   U  -->  n   g
                //     /                 \
                //    n                   U
                (*parent.as_ptr()).color = Color::Black;
                (*grandparent.as_ptr()).color = Color::Red;
                if parent_is_left {
                    self.tree.rotate_right_at(grandparent);
                } else {
                    self.tree.rotate_left_at(grandparent);
                }
                break;
            }
        }

        if cfg!(debug_assertions) {
            assert_eq!(self.tree.tree.root.color(), Color::Black);
        }
    }

    /// Restores the invariants after a black vertex was removed from under `parent`. `node` is
    /// whatever took its place, possibly nothing. Every path through `node` is one black short;
    /// absent positions count as black so no placeholder vertex is needed.
    fn delete_fixup(&mut self, mut node: Link<T>, mut parent: Link<T>) {
        // SAFETY: See `insert_fixup`.
        unsafe {
            loop {
                let Some(p) = parent.0 else {
                    trace!("delete fixup: reached the root");
                    if let Some(n) = node.0 {
                        (*n.as_ptr()).color = Color::Black;
                    }
                    break;
                };

                // The vertex that's one black short always has a sibling. When `node` is absent
                // the sibling is therefore the only child, so comparing against `left` works.
                let node_is_left = (*p.as_ptr()).left == node;
                let sibling_of = |p: NonNull<Node<T>>| {
                    let sibling = if node_is_left {
                        (*p.as_ptr()).right
                    } else {
                        (*p.as_ptr()).left
                    };
                    sibling
                        .0
                        .expect("A vertex one black short always has a sibling")
                };
                let mut sibling = sibling_of(p);

                if (*sibling.as_ptr()).color == Color::Red {
                    trace!("delete fixup: red sibling");
                    //     P               S
                    //    / \             / \
                    //   N   s    -->    p   Sr
                    //      / \         / \
                    //     Sl  Sr      N   Sl
                    (*sibling.as_ptr()).color = Color::Black;
                    (*p.as_ptr()).color = Color::Red;
                    if node_is_left {
                        self.tree.rotate_left_at(p);
                    } else {
                        self.tree.rotate_right_at(p);
                    }
                    sibling = sibling_of(p);
                }

                let (inner, outer) = if node_is_left {
                    ((*sibling.as_ptr()).left, (*sibling.as_ptr()).right)
                } else {
                    ((*sibling.as_ptr()).right, (*sibling.as_ptr()).left)
                };

                if inner.color() == Color::Black && outer.color() == Color::Black {
                    (*sibling.as_ptr()).color = Color::Red;
                    if (*p.as_ptr()).color == Color::Black {
                        trace!("delete fixup: black parent, sibling and nephews");
                        // The whole subtree under `p` is now one black short.
                        node = parent;
                        parent = (*p.as_ptr()).parent;
                        continue;
                    }
                    trace!("delete fixup: red parent, black sibling and nephews");
                    (*p.as_ptr()).color = Color::Black;
                    break;
                }

                let outer = if outer.color() == Color::Black {
                    trace!("delete fixup: red inner nephew");
                    //    (p)           (p)
                    //    / \           / \
                    //   N   S    -->  N   Si
                    //      / \             \
                    //     si  So            s
                    //                        \
                    //                         So
                    let inner = inner
                        .0
                        .expect("The inner nephew is red so it isn't absent");
                    (*inner.as_ptr()).color = Color::Black;
                    (*sibling.as_ptr()).color = Color::Red;
                    if node_is_left {
                        self.tree.rotate_right_at(sibling);
                    } else {
                        self.tree.rotate_left_at(sibling);
                    }
                    let outer = Link(Some(sibling));
                    sibling = inner;
                    outer
                } else {
                    outer
                };

                trace!("delete fixup: red outer nephew");
                //     (p)             (s)
                //     / \             / \
                //    N   S     -->   P   So
                //       / \         / \
                //     (si) so      N  (si)
                (*sibling.as_ptr()).color = (*p.as_ptr()).color;
                (*p.as_ptr()).color = Color::Black;
                if let Some(outer) = outer.0 {
                    (*outer.as_ptr()).color = Color::Black;
                }
                if node_is_left {
                    self.tree.rotate_left_at(p);
                } else {
                    self.tree.rotate_right_at(p);
                }
                break;
            }
        }

        if cfg!(debug_assertions) {
            assert_eq!(self.tree.tree.root.color(), Color::Black);
        }
    }
}

impl<T: Ord> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for RedBlackTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two red-black trees are equal when they have the same shape, the same elements and the same
/// colors in the same positions.
impl<T: PartialEq> PartialEq for RedBlackTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tree.tree.eq_by(&other.tree.tree, |a, b| a.color == b.color)
    }
}

impl<T: fmt::Debug> fmt::Debug for RedBlackTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

/// Draws the tree like [`OrderedTree`] does, with red vertices shown as `R{x}` and black ones as
/// `B{x}`.
impl<T: fmt::Display> fmt::Display for RedBlackTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.tree.render(f, |node, f| match node.color {
            Color::Red => write!(f, "R{{{}}}", node.element),
            Color::Black => write!(f, "B{{{}}}", node.element),
        })
    }
}
