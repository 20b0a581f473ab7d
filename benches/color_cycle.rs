use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};

use triangles::color::{cycle_channel, ColorCycler};

pub fn channel(c: &mut Criterion) {
    c.bench_function("cycle_channel", |b| b.iter(|| cycle_channel(12, 0.37)));
}

pub fn cycler_per_second(c: &mut Criterion) {
    let mut cycler = ColorCycler::new(Some(0));
    let mut second = 0;

    c.bench_function("color_at new second", |b| {
        b.iter(|| {
            second += 1;
            cycler.color_at(Duration::from_secs(second))
        })
    });
}

criterion_group!(benches, channel, cycler_per_second);
criterion_main!(benches);
