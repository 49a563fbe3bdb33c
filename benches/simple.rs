use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wordlib::WordLib;

/// Builds a deterministic dictionary of pronounceable nonsense words.
fn synthetic_words() -> Vec<String> {
    let onsets = [
        "b", "br", "c", "ch", "d", "dr", "f", "fl", "g", "gr", "h", "j", "k", "l", "m", "n", "p",
        "pl", "r", "s", "st", "t", "tr", "v", "w",
    ];
    let nuclei = ["a", "e", "i", "o", "u", "ai", "ea", "oo"];
    let codas = ["", "b", "ck", "d", "g", "l", "m", "n", "p", "r", "st", "t"];
    let mut words = Vec::new();
    for onset in onsets {
        for nucleus in nuclei {
            for coda in codas {
                words.push(format!("{onset}{nucleus}{coda}"));
            }
        }
    }
    words
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut c = c.benchmark_group("Simple");
    c.measurement_time(Duration::from_secs(10)).sample_size(100);
    let words = synthetic_words();
    let mut library = WordLib::new();
    for word in &words {
        let _ = library.add(word).unwrap();
    }
    c.bench_function("membership hit and miss", |b| {
        b.iter(|| {
            black_box(library.contains(black_box("stoop")));
            black_box(library.contains(black_box("xylophone")));
        })
    });
    c.bench_function("complete 10 words from a prefix", |b| {
        b.iter(|| black_box(library.complete(black_box("st"), 10)))
    });
    c.bench_function("suggest within distance 2", |b| {
        b.iter(|| black_box(library.suggest(black_box("stoam"), 2, 10).unwrap()))
    });
    let text = "the quick brown fox jumps over the lazy dog while a striped cat naps nearby";
    c.bench_function("check a sentence", |b| {
        b.iter(|| black_box(library.check_text(black_box(text), 100)))
    });
    c.finish();
}
criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
