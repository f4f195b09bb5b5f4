// Criterion benchmarks for tropic-fst.
//
// Run:
//   cargo bench -p tropic-fst

use criterion::{Criterion, criterion_group, criterion_main};
use tropic_fst::{Fst, Label, Transducer};

/// A `width`-way ambiguous chain: every input character fans out to
/// `width` outputs, with an optional epsilon insertion after each step.
fn build_ambiguous_chain(length: usize, width: usize) -> Fst {
    let mut fst = Fst::new();
    for i in 0..length {
        let from = i.to_string();
        let to = (i + 1).to_string();
        for w in 0..width {
            let output = char::from(b'a' + w as u8).to_string();
            fst.add_transition(&from, 'x', &output, &to, w as f64);
        }
        let mid = format!("e{i}");
        fst.add_transition(&from, Label::Epsilon, "-", &mid, 0.5);
        fst.add_transition(&mid, 'x', "x", &to, 0.0);
    }
    fst.declare_state(&length.to_string(), true, 0.0);
    fst
}

fn bench_first_result(c: &mut Criterion) {
    let fst = build_ambiguous_chain(12, 3);
    let input = "x".repeat(12);

    c.bench_function("first_result_12x4", |b| {
        b.iter(|| std::hint::black_box(fst.transduce(&input).next()));
    });
}

fn bench_all_results(c: &mut Criterion) {
    let fst = build_ambiguous_chain(8, 3);
    let input = "x".repeat(8);

    c.bench_function("all_results_8x4", |b| {
        b.iter(|| std::hint::black_box(fst.transduce(&input).count()));
    });
}

fn bench_reused_config(c: &mut Criterion) {
    let fst = build_ambiguous_chain(8, 3);
    let input = "x".repeat(8);
    let mut config = fst.new_config();
    let mut output = String::new();

    c.bench_function("all_results_8x4_reused_config", |b| {
        b.iter(|| {
            fst.prepare(&mut config, &input);
            let mut count = 0usize;
            while fst.next(&mut config, &mut output).is_some() {
                count += 1;
            }
            std::hint::black_box(count)
        });
    });
}

fn bench_load(c: &mut Criterion) {
    let mut source = String::new();
    for i in 0..2000 {
        source.push_str(&format!("{} {} a b 0.5\n", i, i + 1));
    }
    source.push_str("2000 1.0\n");

    c.bench_function("load_2000_lines", |b| {
        b.iter(|| std::hint::black_box(tropic_fst::load(&source)));
    });
}

criterion_group!(
    benches,
    bench_first_result,
    bench_all_results,
    bench_reused_config,
    bench_load
);
criterion_main!(benches);
