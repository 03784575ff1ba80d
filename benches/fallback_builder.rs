use criterion::{criterion_group, criterion_main, Criterion};
use seisvol::{
    build_from_source, BuildOptions, Geometry, HeaderField, Result, SegyOptions, TraceSource,
};
use std::hint::black_box;

/// A regular inline-sorted grid held in memory
struct GridTraces {
    inlines: usize,
    crosslines: usize,
    samples: usize,
}

impl TraceSource for GridTraces {
    fn trace_count(&self) -> usize {
        self.inlines * self.crosslines
    }

    fn samples_per_trace(&self) -> usize {
        self.samples
    }

    fn header_field(&mut self, trace: usize, field: HeaderField) -> Result<i32> {
        Ok(match field.byte {
            189 => (trace / self.crosslines) as i32 + 1000,
            193 => (trace % self.crosslines) as i32 + 2000,
            _ => 0,
        })
    }

    fn read_trace(&mut self, trace: usize) -> Result<Vec<f32>> {
        Ok((0..self.samples).map(|d| (trace + d) as f32).collect())
    }
}

fn bench_builders(c: &mut Criterion) {
    let mut source = GridTraces {
        inlines: 64,
        crosslines: 64,
        samples: 256,
    };

    c.bench_function("header_scan_64x64x256", |b| {
        b.iter(|| build_from_source(black_box(&mut source), &BuildOptions::default()).unwrap())
    });

    c.bench_function("fast_path_64x64x256", |b| {
        b.iter(|| {
            let geometry = Geometry::infer(black_box(&mut source), &SegyOptions::default())
                .unwrap()
                .unwrap();
            geometry.read_cube(&mut source).unwrap()
        })
    });
}

criterion_group!(benches, bench_builders);
criterion_main!(benches);
