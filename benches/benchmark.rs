//! Benchmarks for spectral_anchorage

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spectral_anchorage::*;

/// Sample text for benchmarking
const SAMPLE_TEXT: &str = r#"
Machine learning is a subset of artificial intelligence that provides systems
the ability to automatically learn and improve from experience without being explicitly
programmed. Machine learning focuses on the development of computer programs that can
access data and use it to learn for themselves.

The process of learning begins with observations or data, such as examples, direct
experience, or instruction, in order to look for patterns in data and make better
decisions in the future based on the examples that we provide.

Deep learning is a subset of machine learning that uses artificial neural networks
with representation learning. Deep learning has been applied to various fields including
computer vision, speech recognition, natural language processing, and drug design.

Natural language processing is a subfield of linguistics, computer science,
and artificial intelligence concerned with the interactions between computers and
human language. Key applications include sentiment analysis, machine translation,
and text summarization.
"#;

/// Split the sample into sentence-sized passages, repeated `copies` times with
/// a distinguishing token per copy.
fn passages(copies: usize) -> Vec<String> {
    let sentences: Vec<&str> = SAMPLE_TEXT
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    (0..copies)
        .flat_map(|c| sentences.iter().map(move |s| format!("{s} section{c}")))
        .collect()
}

fn benchmark_tokenization(c: &mut Criterion) {
    let tokenizer = Tokenizer::new();

    c.bench_function("content_stems_sample", |b| {
        b.iter(|| tokenizer.content_stems(black_box(SAMPLE_TEXT)))
    });

    let mut group = c.benchmark_group("content_stems_by_size");
    for size in [1, 5, 10, 20].iter() {
        let text = SAMPLE_TEXT.repeat(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| tokenizer.content_stems(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_corpus_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("corpus_build");
    group.sample_size(20);
    for copies in [1, 10, 40].iter() {
        let docs = passages(*copies);
        group.throughput(Throughput::Elements(docs.len() as u64));
        group.bench_with_input(BenchmarkId::new("sequential", docs.len()), &docs, |b, docs| {
            b.iter(|| Corpus::from_passages(black_box(docs)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("parallel", docs.len()), &docs, |b, docs| {
            let options =
                BuildOptions::new().with_config(BuildConfig::default().with_parallel(true));
            b.iter(|| Corpus::build(black_box(docs), options.clone()).unwrap())
        });
    }
    group.finish();
}

fn benchmark_query(c: &mut Criterion) {
    let corpus = Corpus::from_passages(&passages(40)).unwrap();
    let config = QueryConfig::default();

    c.bench_function("query", |b| {
        b.iter(|| {
            corpus
                .query(black_box("deep learning neural networks"), &config)
                .unwrap()
        })
    });

    let queries = [
        "machine learning",
        "natural language processing",
        "computer vision speech",
        "sentiment analysis translation",
    ];
    let mut group = c.benchmark_group("query_batch");
    group.bench_function("sequential", |b| {
        b.iter(|| {
            queries
                .iter()
                .map(|q| corpus.query(black_box(q), &config).unwrap())
                .collect::<Vec<_>>()
        })
    });
    group.bench_function("parallel", |b| {
        b.iter(|| corpus.query_batch(black_box(&queries), &config).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_tokenization,
    benchmark_corpus_build,
    benchmark_query
);
criterion_main!(benches);
