use criterion::{criterion_group, criterion_main, Criterion};
use rbtree_collections::arena::{Handle, TypedArena};

const CHUNK_SIZE: usize = 1024;
const NUM_OF_ALLOCATIONS: usize = 100;

fn bench_arena(c: &mut Criterion) {
    c.bench_function("bench arena", |b| {
        b.iter(|| {
            struct Test {
                pub val: i32,
                pub next: Option<Handle>,
            }

            let mut arena = TypedArena::new(CHUNK_SIZE);
            let mut curr = arena.allocate(Test { val: 0, next: None });
            for _ in 0..NUM_OF_ALLOCATIONS {
                curr = arena.allocate(Test {
                    val: 0,
                    next: Some(curr),
                });
            }
        })
    });
}

fn bench_arena_reuse(c: &mut Criterion) {
    c.bench_function("bench arena reuse", |b| {
        let mut arena = TypedArena::new(CHUNK_SIZE);
        b.iter(|| {
            let handles: Vec<Handle> = (0..NUM_OF_ALLOCATIONS).map(|i| arena.allocate(i)).collect();
            for handle in &handles {
                arena.free(handle);
            }
        })
    });
}

fn bench_box(c: &mut Criterion) {
    c.bench_function("bench box", |b| {
        b.iter(|| {
            struct Test {
                pub val: i32,
                pub next: Option<Box<Test>>,
            }

            let mut curr = Box::new(Test { val: 0, next: None });
            for _ in 0..NUM_OF_ALLOCATIONS {
                curr = Box::new(Test {
                    val: 0,
                    next: Some(curr),
                });
            }
        })
    });
}

criterion_group!(benches, bench_arena, bench_arena_reuse, bench_box);
criterion_main!(benches);
