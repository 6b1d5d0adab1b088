//! Benchmarks: full-document highlighting and incremental re-flow.
//!
//! Run with: cargo bench --package slate-syntax

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use slate_core::LanguageId;
use slate_syntax::{HighlightMap, Registry};

// ── Data generators ──

/// Plain Python without multi-line constructs.
fn gen_python(lines: usize) -> Vec<String> {
    (0..lines)
        .map(|i| match i % 4 {
            0 => format!("def handler_{i}(request, timeout=30):"),
            1 => format!("    value = compute({i}) + 0x{i:x}  # cached"),
            2 => format!("    name = \"item-{i}\""),
            _ => "    return value".to_string(),
        })
        .collect()
}

/// Python where every eighth line toggles a docstring region, forcing
/// carried state through long runs of lines.
fn gen_python_regions(lines: usize) -> Vec<String> {
    (0..lines)
        .map(|i| {
            if i % 8 == 0 {
                "\"\"\"".to_string()
            } else {
                format!("region body line {i}")
            }
        })
        .collect()
}

fn gen_javascript(lines: usize) -> Vec<String> {
    (0..lines)
        .map(|i| match i % 3 {
            0 => format!("const item{i} = lookup({i}); // note"),
            1 => format!("let label = `row-{i}`;"),
            _ => "return item;".to_string(),
        })
        .collect()
}

fn byte_len(lines: &[String]) -> u64 {
    lines.iter().map(|l| l.len() as u64).sum()
}

// ── Benchmarks ──

fn bench_full_document(c: &mut Criterion) {
    let cases: &[(&str, LanguageId, fn(usize) -> Vec<String>)] = &[
        ("python", LanguageId::Python, gen_python),
        ("python_regions", LanguageId::Python, gen_python_regions),
        ("javascript", LanguageId::Javascript, gen_javascript),
    ];

    for &(name, lang, gen) in cases {
        let mut group = c.benchmark_group(format!("full_document/{name}"));
        for &lines in &[100usize, 1_000, 10_000] {
            let doc = gen(lines);
            group.throughput(Throughput::Bytes(byte_len(&doc)));
            group.bench_with_input(BenchmarkId::from_parameter(lines), &doc, |b, doc| {
                let def = Registry::global().get(lang);
                b.iter(|| {
                    let mut map = HighlightMap::new();
                    black_box(map.refresh_all(doc, Some(def)))
                });
            });
        }
        group.finish();
    }
}

fn bench_incremental_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("incremental_edit");
    for &lines in &[1_000usize, 10_000] {
        let doc = gen_python(lines);
        let def = Registry::global().get(LanguageId::Python);
        let mut map = HighlightMap::new();
        map.refresh_all(&doc, Some(def));

        // Re-highlight one mid-document line; the fixed point should stop
        // propagation immediately, independent of document size.
        let edit_line = lines / 2;
        group.bench_with_input(BenchmarkId::from_parameter(lines), &doc, |b, doc| {
            b.iter(|| black_box(map.refresh(doc, Some(def), edit_line..edit_line + 1)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_document, bench_incremental_edit);
criterion_main!(benches);
