use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use num_complex::Complex64;
use spectrum_analyzer::spectrum::{dft, fft, WindowType};

fn sine_block(n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            Complex64::new((2.0 * std::f64::consts::PI * 13.0 * t).sin(), 0.0)
        })
        .collect()
}

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");

    for n in [64usize, 256, 1024] {
        let block = sine_block(n);
        let mut out = vec![Complex64::new(0.0, 0.0); n];

        group.bench_with_input(BenchmarkId::new("fft", n), &block, |b, block| {
            b.iter(|| fft(block, &mut out, None).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("fft_hamming", n), &block, |b, block| {
            b.iter(|| fft(block, &mut out, Some(WindowType::Hamming)).unwrap())
        });
    }

    // The O(N²) oracle, small sizes only
    for n in [64usize, 256] {
        let block = sine_block(n);
        let mut out = vec![Complex64::new(0.0, 0.0); n];
        group.bench_with_input(BenchmarkId::new("dft", n), &block, |b, block| {
            b.iter(|| dft(block, &mut out).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transforms);
criterion_main!(benches);
