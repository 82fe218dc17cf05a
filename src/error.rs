//! Errors returned by tree and vertex operations.

use std::fmt;

/// A structural relation between a vertex (or a tree) and another vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    /// The vertex above this one.
    Parent,
    /// The left child of a vertex.
    Left,
    /// The right child of a vertex.
    Right,
    /// The topmost vertex of a tree.
    Root,
    /// A vertex holding a given element.
    Element,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parent => "parent",
            Self::Left => "left child",
            Self::Right => "right child",
            Self::Root => "root",
            Self::Element => "vertex with that element",
        };
        f.write_str(name)
    }
}

/// Errors triggered by tree operations.
///
/// Every variant is caused by the caller asking for something that isn't there, so none of them
/// are worth retrying and none of them leave the tree modified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TreeError {
    /// The requested relation does not exist (e.g. the left child of a leaf, the root of an
    /// empty tree or a vertex for an element that was never inserted).
    #[error("no {0} exists")]
    NotFound(Relation),
}
