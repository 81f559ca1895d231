use crate::corpus::Corpus;
use crate::error::Result;
use crate::idf::build_idf;
use crate::query::build_query_vector;
use crate::similarity::{rank, ScoredDocument};
use crate::tf::{build_tf, TfMatrix};
use crate::tfidf::{build_tfidf, TfIdfMatrix};
use crate::vocabulary::{TermEntry, Vocabulary};
use crate::{DocId, TermId};

/// Dense TF-IDF index over one corpus snapshot.
///
/// Read-only once built and safe to share between threads. A corpus that
/// changes needs a fresh [`SearchIndex::build`]; nothing is updated in place.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    vocabulary: Vocabulary,
    tf: TfMatrix,
    idf: Vec<f64>,
    tfidf: TfIdfMatrix,
}

impl SearchIndex {
    pub fn build(corpus: &Corpus) -> Result<Self> {
        let vocabulary = Vocabulary::build(corpus);
        let tf = build_tf(corpus, &vocabulary)?;
        let idf = build_idf(&vocabulary, corpus.len());
        let tfidf = build_tfidf(&tf, &idf);
        Ok(Self { vocabulary, tf, idf, tfidf })
    }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    pub fn tf(&self) -> &TfMatrix { &self.tf }

    pub fn idf(&self) -> &[f64] { &self.idf }

    pub fn tfidf(&self) -> &TfIdfMatrix { &self.tfidf }

    /// Number of documents the index was built over.
    pub fn document_count(&self) -> usize { self.tf.rows() }

    /// Top `k` documents for `query` by cosine similarity, positive scores only.
    pub fn search(&self, query: &str, k: usize) -> Vec<ScoredDocument> {
        let q_vec = build_query_vector(query, &self.vocabulary, &self.idf);
        let hits = rank(&q_vec, &self.tfidf, k);
        tracing::debug!(query, k, hits = hits.len(), "search");
        hits
    }

    /// Per-term occurrence counts, in term id order.
    pub fn vocabulary_stats(&self) -> Vec<TermEntry> {
        self.vocabulary.entries().collect()
    }

    /// The `n` most frequent terms across the corpus. Ties keep term id order.
    pub fn top_terms(&self, n: usize) -> Vec<TermEntry> {
        let mut entries = self.vocabulary_stats();
        entries.sort_by(|a, b| b.stats.total_occurrences.cmp(&a.stats.total_occurrences));
        entries.truncate(n);
        entries
    }

    /// The `n` most frequent terms of one document with their counts. `None`
    /// for an id outside the indexed snapshot.
    pub fn document_top_terms(&self, doc_id: DocId, n: usize) -> Option<Vec<(&str, u32)>> {
        if doc_id as usize >= self.document_count() {
            return None;
        }
        let mut counts: Vec<(&str, u32)> = self
            .tf
            .row(doc_id as usize)
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .filter_map(|(tid, c)| self.vocabulary.term(tid as TermId).map(|t| (t, *c)))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(n);
        Some(counts)
    }
}
