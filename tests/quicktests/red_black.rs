use rbtree::{Color, RedBlackTree, Vertex};

use crate::{model_delete, model_insert, Op};

/// Checks the ordering, the coloring rules and parent links below `vertex` and returns its
/// black-height.
fn black_height(tree: &RedBlackTree<i8>, vertex: Vertex<'_, i8>) -> usize {
    let color = tree.color_of(&vertex);
    let mut heights = [0, 0];
    for (i, child) in [vertex.left(), vertex.right()].into_iter().enumerate() {
        if let Ok(child) = child {
            assert_eq!(child.parent().unwrap().element(), vertex.element());
            let child_color = tree.color_of(&child);
            if color == Color::Red {
                assert_eq!(child_color, Color::Black, "red vertex with a red child");
            }
            heights[i] = black_height(tree, child) + usize::from(child_color == Color::Black);
        }
    }
    if let Ok(left) = vertex.left() {
        assert!(left.element() <= vertex.element());
    }
    if let Ok(right) = vertex.right() {
        assert!(right.element() >= vertex.element());
    }
    assert_eq!(heights[0], heights[1], "uneven black-height");
    heights[0]
}

fn assert_valid(tree: &RedBlackTree<i8>) {
    if let Ok(root) = tree.root() {
        assert_eq!(tree.color_of(&root), Color::Black);
        assert!(!root.has_parent());
        black_height(tree, root);
    }
    assert_eq!(tree.iter().count(), tree.len());

    let bound = 2.0 * ((tree.len() + 1) as f64).log2();
    assert!(tree.height() as f64 <= bound);
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = RedBlackTree::new();
        let mut model = Vec::new();

        for op in &ops {
            match op {
                Op::Insert(x) => {
                    assert_eq!(tree.insert(*x).element(), x);
                    model_insert(&mut model, *x);
                }
                Op::Delete(x) => {
                    assert_eq!(tree.delete(x), model_delete(&mut model, x));
                }
            }
            assert_valid(&tree);
        }
        tree.iter().eq(model.iter())
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let tree: RedBlackTree<_> = xs.iter().copied().collect();
        xs.iter().all(|x| tree.contains(x))
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: RedBlackTree<_> = xs.iter().copied().collect();
        let mut model = xs;
        model.sort();

        for x in &deletes {
            // Delete every copy we inserted.
            while tree.delete(x).is_some() {}
            model.retain(|y| y != x);
            assert_valid(&tree);
        }
        deletes.iter().all(|x| !tree.contains(x)) && tree.iter().eq(model.iter())
    }
}

quickcheck::quickcheck! {
    fn clones_are_equal_and_independent(xs: Vec<i8>) -> bool {
        let tree: RedBlackTree<_> = xs.iter().copied().collect();
        let mut copy = tree.clone();
        let equal = copy == tree;

        copy.clear();
        equal && copy.is_empty() && tree.len() == xs.len()
    }
}
