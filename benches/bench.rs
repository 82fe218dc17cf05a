use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rbtree::{OrderedTree, RedBlackTree};

#[derive(Clone)]
enum TreeEnum<T> {
    Ordered(OrderedTree<T>),
    RedBlack(RedBlackTree<T>),
}

impl<T: Ord> TreeEnum<T> {
    fn contains(&self, x: &T) -> bool {
        match self {
            Self::Ordered(t) => t.contains(x),
            Self::RedBlack(t) => t.contains(x),
        }
    }

    fn insert(&mut self, x: T) {
        match self {
            Self::Ordered(t) => {
                t.insert(x);
            }
            Self::RedBlack(t) => {
                t.insert(x);
            }
        }
    }

    fn delete(&mut self, x: &T) -> Option<T> {
        match self {
            Self::Ordered(t) => t.delete(x),
            Self::RedBlack(t) => t.delete(x),
        }
    }
}

/// Helper to bench a function on a BST.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// implementations of BSTs before finishing the group.
///
/// The elements are inserted in a shuffled order so the unbalanced tree isn't just a list. The
/// red-black tree is also benched on sorted input, which is its worst case for rebalancing work
/// and the unbalanced tree's worst case for height.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut TreeEnum<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2i32.pow(num_levels) - 1;
        let largest_element_in_tree = num_nodes - 1;

        // Multiplying by a number coprime with `num_nodes` visits every element once.
        let shuffled: Vec<_> = (0..num_nodes)
            .map(|x| ((x as i64 * 7919) % num_nodes as i64) as i32)
            .collect();

        let tree_tests = [
            ("ordered", TreeEnum::Ordered(shuffled.iter().copied().collect())),
            ("red-black", TreeEnum::RedBlack(shuffled.iter().copied().collect())),
            ("red-black-sorted", TreeEnum::RedBlack((0..num_nodes).collect())),
        ];
        for (name, tree) in tree_tests {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        black_box(tree.contains(&i));
    });
    bench_helper(c, "delete", |tree, i| {
        black_box(tree.delete(&i));
    });

    bench_helper(c, "insert", |tree, i| {
        tree.insert(i + 1);
    });

    bench_helper(c, "find-miss", |tree, i| {
        black_box(tree.contains(&(i + 1)));
    });
    bench_helper(c, "delete-miss", |tree, i| {
        black_box(tree.delete(&(i + 1)));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
