use criterion::{black_box, criterion_group, criterion_main, Criterion};
use multicost::*;

fn uniform(c: &mut Criterion) {
    let map = CostMap2d::new(500, 500);
    let seeds = [Seed::at(GridCoord::base(0, 0))];
    let config = PropagationConfig::default();
    let mut propagator = Propagator::with_capacity(500 * 4);

    c.bench_function("uniform_500x500", |b| {
        b.iter(|| propagator.run(&map, black_box(&seeds), &config).unwrap());
    });
}

fn two_layers(c: &mut Criterion) {
    let mut map = CostMap2d::new(300, 300);
    for (i, v) in map.layer_mut(Layer::Base).iter_mut().enumerate() {
        *v = 1.0 + (i % 17) as f64 * 0.25;
    }
    for v in map.layer_mut(Layer::Second).iter_mut() {
        *v = 0.2;
    }
    for i in (0..300).step_by(25) {
        map.add_crossover(i, i);
    }
    let seeds = [Seed::at(GridCoord::base(150, 150))];
    let config = PropagationConfig::new().with_resolution(Resolution::new(30.0, 20.0));
    let mut propagator = Propagator::new();

    c.bench_function("crossover_300x300", |b| {
        b.iter(|| propagator.run(&map, black_box(&seeds), &config).unwrap());
    });
}

fn frontier(c: &mut Criterion) {
    let mut frontier = Frontier::with_capacity(10_000);
    c.bench_function("frontier_ties", |b| {
        b.iter(|| {
            for i in 0..10_000u32 {
                frontier.insert((i % 64) as f64, GridCoord::base(i / 100, i % 100));
            }
            while frontier.pop_min().is_some() {}
        });
    });
}

criterion_group!(benches, uniform, two_layers, frontier);
criterion_main!(benches);
