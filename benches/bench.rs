//! Criterion benchmarks for Palaver.
//!
//! Covers text normalization, TF-IDF fitting, model training and replies.

use std::hint::black_box;
use std::path::Path;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use palaver::analysis::analyzer::Analyzer;
use palaver::analysis::analyzer::english::EnglishAnalyzer;
use palaver::analysis::normalizer::Normalizer;
use palaver::chatbot::Chatbot;
use palaver::config::{PalaverConfig, VectorizerConfig};
use palaver::corpus::IntentCorpus;
use palaver::ml::intent_classifier::{self, TfIdfVectorizer};

const QUERIES: &[&str] = &[
    "Hello there, how are you doing today?",
    "Can you tell me a joke please",
    "I need some help planning my monthly budget",
    "What's the weather going to be like tomorrow?",
    "How do I improve my credit score quickly",
    "Thanks a lot, see you later!",
];

fn sample_corpus() -> IntentCorpus {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/intents.json");
    IntentCorpus::from_path(path).unwrap()
}

/// Benchmark text analysis and normalization.
fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    let analyzer = EnglishAnalyzer::new().unwrap();
    let normalizer = Normalizer::english().unwrap();

    group.bench_function("analyze_single_query", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(QUERIES[2])).count()))
    });

    group.throughput(Throughput::Elements(QUERIES.len() as u64));
    group.bench_function("normalize_queries", |b| {
        b.iter(|| {
            for query in QUERIES {
                black_box(normalizer.normalize(black_box(query)));
            }
        })
    });

    group.finish();
}

/// Benchmark feature extraction and model fitting.
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(20);

    let corpus = sample_corpus();
    let normalizer = Normalizer::english().unwrap();
    let documents: Vec<String> = intent_classifier::training_examples(&corpus, &normalizer)
        .into_iter()
        .map(|example| example.text)
        .collect();

    group.bench_function("tfidf_fit", |b| {
        let vectorizer = TfIdfVectorizer::new(VectorizerConfig::default());
        b.iter(|| black_box(vectorizer.fit(black_box(&documents)).unwrap()))
    });

    group.bench_function("train_sample_corpus", |b| {
        let config = PalaverConfig::default();
        b.iter(|| black_box(intent_classifier::train(&corpus, &config).unwrap()))
    });

    group.finish();
}

/// Benchmark end-to-end replies.
fn bench_respond(c: &mut Criterion) {
    let mut group = c.benchmark_group("respond");

    let config = PalaverConfig {
        seed: Some(42),
        ..Default::default()
    };
    let chatbot = Chatbot::train(sample_corpus(), &config).unwrap();

    group.throughput(Throughput::Elements(QUERIES.len() as u64));
    group.bench_function("respond_queries", |b| {
        b.iter(|| {
            for query in QUERIES {
                black_box(chatbot.respond(black_box(query)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_normalization, bench_training, bench_respond);
criterion_main!(benches);
