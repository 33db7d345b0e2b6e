#![allow(clippy::all)] // Clippy will attempt to remove black_box() internals

use criterion::*;
use gridsample::{bilinear, Bilinear};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random field of `channels` planes, each `gridsize` x `gridsize`
fn gen_field(channels: usize, gridsize: usize) -> (Vec<usize>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(0);
    let n = channels * gridsize * gridsize;
    let vals = (0..n).map(|_| rng.gen::<f64>()).collect();
    let dims = if channels == 1 {
        vec![gridsize, gridsize]
    } else {
        vec![channels, gridsize, gridsize]
    };
    (dims, vals)
}

/// Fractional locations that keep the whole neighborhood inside the grid
fn gen_locations(gridsize: usize, n: usize) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(1);
    let hi = (gridsize - 1) as f64;
    (0..n)
        .map(|_| (rng.gen_range(0.0..hi), rng.gen_range(0.0..hi)))
        .collect()
}

fn bench_sample_many_frames(c: &mut Criterion) {
    // One location, many frames: the intended use of a prebuilt interpolator
    for gridsize in [100, 1000] {
        let mut group = c.benchmark_group(format!("Bilinear_Frames_{gridsize}-grid"));
        for channels in [1, 24, 240].iter() {
            group.throughput(Throughput::Elements(*channels as u64));
            group.bench_with_input(
                BenchmarkId::new("Prebuilt", channels),
                channels,
                |b, &channels| {
                    let (dims, vals) = gen_field(channels, gridsize);
                    let (row, col) = gen_locations(gridsize, 1)[0];
                    let interpolator = Bilinear::new(row, col).unwrap();
                    let mut out = vec![0.0; channels];

                    b.iter(|| black_box(interpolator.interp(&dims, &vals, &mut out).unwrap()));
                },
            );

            group.bench_with_input(
                BenchmarkId::new("Convenience fn", channels),
                channels,
                |b, &channels| {
                    let (dims, vals) = gen_field(channels, gridsize);
                    let (row, col) = gen_locations(gridsize, 1)[0];
                    let mut out = vec![0.0; channels];

                    b.iter(|| {
                        black_box(bilinear::interpn(row, col, &dims, &vals, &mut out).unwrap())
                    });
                },
            );
        }
        group.finish();
    }
}

fn bench_sample_many_locations(c: &mut Criterion) {
    // Many locations on one field, rebuilding the weights each time
    for gridsize in [100, 1000] {
        let mut group = c.benchmark_group(format!("Bilinear_Locations_{gridsize}-grid"));
        for size in [1, 100, 100_000].iter() {
            group.throughput(Throughput::Elements(*size as u64));
            group.bench_with_input(BenchmarkId::new("2D", size), size, |b, &size| {
                let (dims, vals) = gen_field(1, gridsize);
                let locs = gen_locations(gridsize, size);
                let mut out = vec![0.0; size];

                b.iter(|| {
                    black_box({
                        for (i, &(row, col)) in locs.iter().enumerate() {
                            out[i] = Bilinear::new(row, col)
                                .unwrap()
                                .interp_one(&dims, &vals)
                                .unwrap();
                        }
                    })
                });
            });
        }
        group.finish();
    }
}

criterion_group!(benches_frames, bench_sample_many_frames);
criterion_group!(benches_locations, bench_sample_many_locations);
criterion_main!(benches_frames, benches_locations,);
