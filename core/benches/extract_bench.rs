use criterion::{criterion_group, criterion_main, Criterion};
use keyrank_core::{KeywordExtractor, VocabularyModel};
use std::sync::Arc;

const TEXT: &str = "Rust is a multi-paradigm, general-purpose programming language that emphasizes \
performance, type safety, and concurrency. It enforces memory safety, meaning that all references \
point to valid memory, without a garbage collector. To simultaneously enforce memory safety and \
prevent data races, its borrow checker tracks the object lifetime of all references in a program \
during compilation.";

fn bench_extract(c: &mut Criterion) {
    let terms: Vec<String> = TEXT
        .split_whitespace()
        .map(keyrank_core::tokenizer::normalize)
        .filter(|t| !t.is_empty())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();
    let idf = (0..terms.len()).map(|i| 1.0 + (i % 7) as f64 * 0.5).collect();
    let extractor = KeywordExtractor::new(Arc::new(VocabularyModel::new(terms, idf).unwrap()));
    c.bench_function("extract_paragraph", |b| b.iter(|| extractor.extract(TEXT, 10)));
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
