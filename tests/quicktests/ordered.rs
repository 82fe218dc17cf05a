use rbtree::{OrderedTree, Vertex};

use crate::{model_delete, model_insert, Op};

/// Walks the tree through its public vertices, checking the ordering and that every child
/// points back at its parent. Returns the number of vertices seen.
fn check(vertex: Vertex<'_, i8>) -> usize {
    let mut count = 1;
    for child in [vertex.left(), vertex.right()].into_iter().flatten() {
        assert_eq!(child.parent().unwrap().element(), vertex.element());
        assert_eq!(child.depth(), vertex.depth() + 1);
        count += check(child);
    }
    if let Ok(left) = vertex.left() {
        assert!(left.element() <= vertex.element());
    }
    if let Ok(right) = vertex.right() {
        assert!(right.element() >= vertex.element());
    }
    count
}

fn is_valid(tree: &OrderedTree<i8>) -> bool {
    let count = tree.root().map_or(0, check);
    count == tree.len() && tree.iter().zip(tree.iter().skip(1)).all(|(a, b)| a <= b)
}

fn do_ops(ops: &[Op<i8>], tree: &mut OrderedTree<i8>, model: &mut Vec<i8>) -> bool {
    for op in ops {
        match op {
            Op::Insert(x) => {
                tree.insert(*x);
                model_insert(model, *x);
            }
            Op::Delete(x) => {
                if tree.delete(x) != model_delete(model, x) {
                    return false;
                }
            }
        }
    }
    is_valid(tree)
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = OrderedTree::new();
        let mut model = Vec::new();

        do_ops(&ops, &mut tree, &mut model) && tree.iter().eq(model.iter())
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: OrderedTree<_> = xs.iter().copied().collect();
        nots.iter()
            .filter(|x| !xs.contains(x))
            .all(|x| !tree.contains(x) && tree.search(x).is_none())
    }
}

quickcheck::quickcheck! {
    fn insert_then_delete_restores_the_tree(xs: Vec<i8>, x: i8) -> bool {
        let mut tree: OrderedTree<_> = xs.into_iter().collect();
        let before = tree.clone();

        tree.insert(x);
        tree.delete(&x) == Some(x) && tree == before
    }
}

quickcheck::quickcheck! {
    fn rotations_keep_the_ordering(xs: Vec<i8>, pivots: Vec<(i8, bool)>) -> bool {
        let mut tree: OrderedTree<_> = xs.iter().copied().collect();
        for (pivot, left) in pivots {
            let result = if left {
                tree.rotate_left(&pivot)
            } else {
                tree.rotate_right(&pivot)
            };
            if result.is_ok() != xs.contains(&pivot) {
                return false;
            }
        }

        let mut sorted = xs;
        sorted.sort();
        is_valid(&tree) && tree.iter().eq(sorted.iter())
    }
}

quickcheck::quickcheck! {
    fn traversals_visit_everything(xs: Vec<i8>) -> bool {
        let tree: OrderedTree<_> = xs.iter().copied().collect();

        let mut pre = Vec::new();
        tree.pre_order(|v| pre.push(*v.element()));
        let mut post = Vec::new();
        tree.post_order(|v| post.push(*v.element()));
        let mut inorder = Vec::new();
        tree.in_order(|v| inorder.push(*v.element()));

        pre.sort();
        post.sort();
        pre == inorder && post == inorder && tree.iter().copied().eq(inorder)
    }
}
