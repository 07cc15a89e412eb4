use criterion::{black_box, criterion_group, criterion_main, Criterion};
use symdiff::{ExprId, ExprPool};

fn chain(pool: &mut ExprPool, depth: usize) -> ExprId {
    let x = pool.symbol("x").unwrap();
    let mut e = x;
    for _ in 0..depth {
        let term = pool.mul(x, e).unwrap();
        e = pool.add(term, 1).unwrap();
    }
    e
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("differentiate chain 10000", |b| {
        b.iter(|| {
            let mut pool = ExprPool::new();
            let e = chain(&mut pool, 10_000);
            pool.differentiate(black_box(e), "x").unwrap()
        })
    });

    let mut pool = ExprPool::new();
    let coefficients: Vec<f64> = (1..=200).map(f64::from).collect();
    let p = pool.polynomial("x", &coefficients).unwrap();
    let d = pool.differentiate(p, "x").unwrap();
    c.bench_function("render derivative of degree 199", |b| {
        b.iter(|| pool.render(black_box(d)).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
