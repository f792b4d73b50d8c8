use std::hint::black_box;

use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use intreap::{Interval, IntervalTreap};

use crate::{populated, STRIDE};

const N_VALUES: usize = 10_000;

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("overlap");
    let t = populated(N_VALUES);

    // Widen the query from a handful of matches to the whole treap.
    for n_matches in [1, 10, 100, 1_000, N_VALUES as u32] {
        let query = Interval::new(1, n_matches * STRIDE).unwrap();
        assert_eq!(t.overlaps(&query).count(), n_matches as usize);

        bench_overlaps(&mut g, &t, &query, n_matches);
        bench_find_overlapping(&mut g, &t, &query, n_matches);
    }
}

/// Generate a benchmark of the overlap query method `$name`, parameterised
/// by the number of intervals the query matches.
///
/// Throughput is reported in matches, so the pruned walk and the full scan
/// converge as the query widens to cover the whole treap.
macro_rules! overlap_bench {
    (
        $name:ident
    ) => {
        paste::paste! {
            fn [<bench_ $name>]<M>(
                g: &mut BenchmarkGroup<'_, M>,
                t: &IntervalTreap<u32>,
                query: &Interval<u32>,
                n_matches: u32,
            )
            where
                M: Measurement,
            {
                g.throughput(Throughput::Elements(n_matches as _));
                g.bench_function(BenchmarkId::new(stringify!($name), n_matches), |b| {
                    b.iter(|| {
                        for v in t.$name(query) {
                            black_box(v);
                        }
                    })
                });
            }
        }
    };
}

overlap_bench!(overlaps);
overlap_bench!(find_overlapping);
