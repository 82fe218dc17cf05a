//! The unit of storage shared by every tree in this crate.
//!
//! A [`Node`] is owned by its parent (or by the tree, for the root) through a [`Link`]. The same
//! `Link` type is used for the non-owning `parent` back-reference, so ownership is a property of
//! *which field* a link lives in rather than of its type: `left` and `right` own, `parent` never
//! does.

use std::ptr::NonNull;

/// The color tag carried by every vertex. It only means something in a
/// [`RedBlackTree`][crate::RedBlackTree]; absent children are always considered
/// [`Black`][Color::Black].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// A red vertex. Freshly inserted vertices start out red.
    Red,
    /// A black vertex.
    Black,
}

/// A possibly empty pointer to a [`Node`].
pub(crate) struct Link<T>(pub(crate) Option<NonNull<Node<T>>>);

impl<T> Clone for Link<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Link<T> {}

impl<T> PartialEq for Link<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<T> Eq for Link<T> {}

impl<T> Link<T> {
    pub(crate) const NONE: Self = Link(None);

    /// Leaks the box so the node's address stays put for the parent pointers of its children.
    pub(crate) fn from_box(node: Box<Node<T>>) -> Self {
        Link(Some(node.into_raw()))
    }

    pub(crate) fn node(&self) -> Option<&Node<T>> {
        // SAFETY: A non-empty link always points at a live node that was allocated by
        // `Link::from_box`. Nodes are only freed after being unlinked from the tree, and every
        // path that unlinks a node also clears every link that pointed at it. Shared references
        // handed out here are tied to a borrow of the owning tree so no `&mut` can coexist.
        unsafe { self.0.as_ref().map(|ptr| ptr.as_ref()) }
    }

    pub(crate) fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    pub(crate) fn is_some(&self) -> bool {
        self.0.is_some()
    }

    /// The color of the node behind this link. Empty links are black.
    pub(crate) fn color(&self) -> Color {
        self.node().map_or(Color::Black, |n| n.color)
    }

    /// Reclaims ownership of the node behind this link.
    ///
    /// # Safety
    ///
    /// The caller must ensure nothing else dereferences this pointer afterwards: the node must
    /// already be unlinked from its parent, and its children must either have been freed or be
    /// reachable only through the returned box.
    pub(crate) unsafe fn into_box(self) -> Option<Box<Node<T>>> {
        self.0.map(|ptr| Box::from_raw(ptr.as_ptr()))
    }
}

pub(crate) struct Node<T> {
    pub(crate) element: T,
    pub(crate) color: Color,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) parent: Link<T>,
}

impl<T> Node<T> {
    pub(crate) fn new_boxed(element: T) -> Box<Self> {
        Box::new(Node {
            element,
            color: Color::Red,
            left: Link::NONE,
            right: Link::NONE,
            parent: Link::NONE,
        })
    }

    pub(crate) fn into_raw(self: Box<Self>) -> NonNull<Self> {
        NonNull::from(Box::leak(self))
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.node()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.node()
    }

    pub(crate) fn parent(&self) -> Option<&Self> {
        self.parent.node()
    }

    /// Longest path from this node down to an absent child position. A lone node has height 0.
    pub(crate) fn height(&self) -> isize {
        let mut height = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, level)) = stack.pop() {
            height = height.max(level);
            for child in [node.left(), node.right()].into_iter().flatten() {
                stack.push((child, level + 1));
            }
        }
        height
    }

    /// Number of parent links between this node and the root.
    pub(crate) fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(parent) = current.parent() {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Compares two subtrees by element and shape. `same` gets a chance to compare anything
    /// else a tree variant cares about (e.g. colors) at every pair of nodes.
    pub(crate) fn subtree_eq<F>(&self, other: &Self, same: F) -> bool
    where
        T: PartialEq,
        F: Fn(&Self, &Self) -> bool,
    {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.element != b.element || !same(a, b) {
                return false;
            }
            for pair in [(a.left(), b.left()), (a.right(), b.right())] {
                match pair {
                    (None, None) => {}
                    (Some(a), Some(b)) => stack.push((a, b)),
                    _ => return false,
                }
            }
        }
        true
    }

    /// Deep copies this subtree into freshly allocated nodes, fixing every parent pointer in the
    /// copy. The copy's root has no parent.
    pub(crate) fn clone_subtree(&self) -> Link<T>
    where
        T: Clone,
    {
        let copy = Node::copy_of(self).into_raw();
        let mut stack = vec![(self, copy)];
        while let Some((original, copy)) = stack.pop() {
            if let Some(left) = original.left() {
                let child = Node::copy_of(left).into_raw();
                // SAFETY: `copy` and `child` were allocated by this loop and nothing else points
                // at them yet.
                unsafe {
                    (*copy.as_ptr()).left = Link(Some(child));
                }
                stack.push((left, child));
            }
            if let Some(right) = original.right() {
                let child = Node::copy_of(right).into_raw();
                // SAFETY: See above.
                unsafe {
                    (*copy.as_ptr()).right = Link(Some(child));
                }
                stack.push((right, child));
            }
            // SAFETY: See above.
            unsafe {
                fix_child_parents(copy);
            }
        }
        Link(Some(copy))
    }

    /// A childless, parentless copy of `node`.
    fn copy_of(node: &Self) -> Box<Self>
    where
        T: Clone,
    {
        Box::new(Node {
            element: node.element.clone(),
            color: node.color,
            left: Link::NONE,
            right: Link::NONE,
            parent: Link::NONE,
        })
    }
}

/// Points the parent link of both of `node`'s children back at `node`.
///
/// # Safety
///
/// `node` and its children must be live nodes not currently borrowed elsewhere.
pub(crate) unsafe fn fix_child_parents<T>(node: NonNull<Node<T>>) {
    if let Some(left) = (*node.as_ptr()).left.0 {
        (*left.as_ptr()).parent = Link(Some(node));
    }
    if let Some(right) = (*node.as_ptr()).right.0 {
        (*right.as_ptr()).parent = Link(Some(node));
    }
}

/// Frees every node reachable from `root` with an explicit stack so that degenerate, list-shaped
/// trees can't overflow the call stack.
pub(crate) fn free_subtree<T>(root: Link<T>) {
    let mut stack = vec![root];
    while let Some(link) = stack.pop() {
        // SAFETY: Every link on the stack is an owning link that has been detached from the node
        // that owned it (the caller gives up `root`, and we pop each child off its box before
        // pushing it) so each node is freed exactly once and never read again.
        if let Some(mut node) = unsafe { link.into_box() } {
            stack.push(node.left.take());
            stack.push(node.right.take());
        }
    }
}
