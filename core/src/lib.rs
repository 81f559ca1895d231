pub mod concordance;
pub mod config;
pub mod corpus;
pub mod document;
pub mod engine;
pub mod error;
pub mod idf;
pub mod index;
pub mod ingest;
pub mod matrix;
pub mod query;
pub mod similarity;
pub mod tf;
pub mod tfidf;
pub mod tokenizer;
pub mod vocabulary;

pub use concordance::{locate, snippets, ConcordanceLine};
pub use corpus::Corpus;
pub use document::{Document, DocumentKind};
pub use engine::{SearchEngine, SearchHit};
pub use error::{Error, Result};
pub use index::SearchIndex;
pub use similarity::ScoredDocument;
pub use vocabulary::{TermEntry, TermStats, Vocabulary};

pub type TermId = u32;
pub type DocId = u32;
