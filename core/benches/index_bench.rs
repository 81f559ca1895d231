use corpora_core::tokenizer::tokenize;
use corpora_core::{Corpus, DocumentKind, SearchIndex};
use criterion::{criterion_group, criterion_main, Criterion};

const WORDS: &[&str] = &[
    "index", "vector", "cosine", "rust", "python", "corpus", "term", "query", "matrix", "weight", "déjà", "école",
];

fn synthetic_corpus(docs: usize, words_per_doc: usize) -> Corpus {
    let mut corpus = Corpus::new("bench");
    for d in 0..docs {
        let text: Vec<&str> = (0..words_per_doc).map(|w| WORDS[(d * 7 + w * 3) % WORDS.len()]).collect();
        corpus.add_document(format!("doc {d}"), DocumentKind::Generic { author: "bench".into() }, None, None, text.join(" "));
    }
    corpus
}

fn bench_tokenize(c: &mut Criterion) {
    let text = "The Quick brown fox, 42 times!\nDéjà vu at l'école. ".repeat(50);
    c.bench_function("tokenize_paragraph", |b| b.iter(|| tokenize(&text)));
}

fn bench_build_and_search(c: &mut Criterion) {
    let corpus = synthetic_corpus(500, 80);
    c.bench_function("build_index_500_docs", |b| b.iter(|| SearchIndex::build(&corpus).unwrap()));
    let index = SearchIndex::build(&corpus).unwrap();
    c.bench_function("search_500_docs", |b| b.iter(|| index.search("rust cosine matrix", 10)));
}

criterion_group!(benches, bench_tokenize, bench_build_and_search);
criterion_main!(benches);
