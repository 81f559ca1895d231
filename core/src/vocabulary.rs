use crate::corpus::Corpus;
use crate::tokenizer::tokenize;
use crate::TermId;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TermStats {
    /// Occurrences summed over every document.
    pub total_occurrences: u32,
    /// Number of documents containing the term at least once.
    pub document_occurrences: u32,
}

/// One row of the vocabulary report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermEntry {
    pub term: String,
    pub id: TermId,
    #[serde(flatten)]
    pub stats: TermStats,
}

/// Normalized term -> dense id, plus per-term occurrence counts.
///
/// Ids are handed out in first-seen order while walking the corpus in id
/// order, so they always cover `0..len()` and a rebuild over the same corpus
/// reproduces them exactly. The vocabulary is a snapshot: documents added
/// afterwards are not reflected.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    dictionary: HashMap<String, TermId>,
    terms: Vec<String>,
    stats: Vec<TermStats>,
}

impl Vocabulary {
    pub fn build(corpus: &Corpus) -> Self {
        let mut vocab = Vocabulary::default();
        for doc in corpus {
            let mut seen_in_doc: HashSet<TermId> = HashSet::new();
            for term in tokenize(doc.text()) {
                let tid = vocab.intern(term);
                let stats = &mut vocab.stats[tid as usize];
                stats.total_occurrences += 1;
                if seen_in_doc.insert(tid) {
                    stats.document_occurrences += 1;
                }
            }
        }
        tracing::info!(num_docs = corpus.len(), num_terms = vocab.len(), "vocabulary built");
        vocab
    }

    fn intern(&mut self, term: String) -> TermId {
        if let Some(&tid) = self.dictionary.get(&term) {
            return tid;
        }
        let tid = self.terms.len() as TermId;
        self.terms.push(term.clone());
        self.stats.push(TermStats::default());
        self.dictionary.insert(term, tid);
        tid
    }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn id(&self, term: &str) -> Option<TermId> {
        self.dictionary.get(term).copied()
    }

    pub fn term(&self, id: TermId) -> Option<&str> {
        self.terms.get(id as usize).map(String::as_str)
    }

    pub fn stats(&self, id: TermId) -> Option<TermStats> {
        self.stats.get(id as usize).copied()
    }

    pub fn stats_for(&self, term: &str) -> Option<TermStats> {
        self.id(term).and_then(|tid| self.stats(tid))
    }

    /// Document frequencies indexed by term id.
    pub fn document_frequencies(&self) -> impl Iterator<Item = u32> + '_ {
        self.stats.iter().map(|s| s.document_occurrences)
    }

    /// Every term with its counts, in id order.
    pub fn entries(&self) -> impl Iterator<Item = TermEntry> + '_ {
        self.terms.iter().zip(&self.stats).enumerate().map(|(id, (term, stats))| TermEntry {
            term: term.clone(),
            id: id as TermId,
            stats: *stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentKind;

    fn corpus(texts: &[&str]) -> Corpus {
        let mut c = Corpus::new("test");
        for t in texts {
            c.add_document("", DocumentKind::Generic { author: String::new() }, None, None, *t);
        }
        c
    }

    #[test]
    fn ids_follow_first_seen_order() {
        let v = Vocabulary::build(&corpus(&["the cat sat", "the dog ran"]));
        let terms: Vec<&str> = (0..v.len() as TermId).filter_map(|i| v.term(i)).collect();
        assert_eq!(terms, vec!["the", "cat", "sat", "dog", "ran"]);
        assert_eq!(v.id("dog"), Some(3));
    }

    #[test]
    fn counts_total_and_document_occurrences() {
        let v = Vocabulary::build(&corpus(&["a a a b", "a c"]));
        assert_eq!(v.stats_for("a"), Some(TermStats { total_occurrences: 4, document_occurrences: 2 }));
        assert_eq!(v.stats_for("b"), Some(TermStats { total_occurrences: 1, document_occurrences: 1 }));
        assert_eq!(v.stats_for("zzz"), None);
    }

    #[test]
    fn entries_serialize_flat() {
        let v = Vocabulary::build(&corpus(&["a a"]));
        let entry = v.entries().next().unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({ "term": "a", "id": 0, "total_occurrences": 2, "document_occurrences": 1 }));
    }

    #[test]
    fn empty_corpus_gives_empty_vocabulary() {
        let v = Vocabulary::build(&Corpus::new("empty"));
        assert!(v.is_empty());
        assert_eq!(v.entries().count(), 0);
    }
}
