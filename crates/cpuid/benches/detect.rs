//! Snapshot construction benchmarks.
//!
//! Run: `cargo bench -p cpuid`

use core::hint::black_box;

use cpuid::{CpuInfo, feat};
use criterion::{Criterion, criterion_group, criterion_main};

/// Full uncached snapshot: a handful of CPUID instructions plus the table
/// walk.
fn bench_read(c: &mut Criterion) {
  c.bench_function("detect/read", |b| {
    b.iter(|| black_box(CpuInfo::read()));
  });
}

/// Cached path: the cost callers actually pay after the first query.
fn bench_get(c: &mut Criterion) {
  c.bench_function("detect/get", |b| {
    b.iter(|| black_box(cpuid::get()));
  });
}

/// Predicate check on an in-hand snapshot: a mask compare.
fn bench_supports(c: &mut Criterion) {
  let info = CpuInfo::read();
  c.bench_function("detect/supports", |b| {
    b.iter(|| black_box(info.supports(feat::AVX2 | feat::FMA)));
  });
}

criterion_group!(benches, bench_read, bench_get, bench_supports);
criterion_main!(benches);
