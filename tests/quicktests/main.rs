//! Property tests for the public API of both trees. Each tree is checked against a sorted `Vec`
//! holding the same elements.

mod ordered;
mod red_black;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<T> {
    /// Insert the element into the tree
    Insert(T),
    /// Delete one copy of the element from the tree
    Delete(T),
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    /// Inserts are picked twice as often as deletes so trees actually grow.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2]).unwrap() {
            0 | 1 => Op::Insert(T::arbitrary(g)),
            2 => Op::Delete(T::arbitrary(g)),
            _ => unreachable!(),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Op::Insert(x) => Box::new(x.shrink().map(Op::Insert)),
            Op::Delete(x) => Box::new(x.shrink().map(Op::Delete)),
        }
    }
}

/// Inserts into a sorted `Vec`, after any elements equal to `x`.
pub fn model_insert<T: Ord>(model: &mut Vec<T>, x: T) {
    let at = model.partition_point(|y| *y <= x);
    model.insert(at, x);
}

/// Removes one element equal to `x` from a sorted `Vec`.
pub fn model_delete<T: Ord>(model: &mut Vec<T>, x: &T) -> Option<T> {
    let at = model.binary_search(x).ok()?;
    Some(model.remove(at))
}
