use corpora_core::tokenizer::{normalize, tokenize};
use corpora_core::{Corpus, DocumentKind, SearchIndex, TermId};
use proptest::prelude::*;

fn corpus(texts: &[String]) -> Corpus {
    let mut c = Corpus::new("prop");
    for t in texts {
        c.add_document("", DocumentKind::Generic { author: String::new() }, None, None, t.clone());
    }
    c
}

fn texts() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-eA-E0-9 ,.\n]{0,40}", 0..8)
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in "\\PC{0,60}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once.clone());
        for token in tokenize(&s) {
            prop_assert_eq!(normalize(&token), token);
        }
    }

    #[test]
    fn vocabulary_ids_are_dense_and_reproducible(docs in texts()) {
        let c = corpus(&docs);
        let a = SearchIndex::build(&c).unwrap();
        let b = SearchIndex::build(&c).unwrap();
        let vocab = a.vocabulary();
        for id in 0..vocab.len() as TermId {
            let term = vocab.term(id).unwrap();
            prop_assert_eq!(vocab.id(term), Some(id));
            prop_assert_eq!(b.vocabulary().term(id), Some(term));
        }
        prop_assert!(vocab.term(vocab.len() as TermId).is_none());
    }

    #[test]
    fn tf_rows_sum_to_token_counts(docs in texts()) {
        let c = corpus(&docs);
        let index = SearchIndex::build(&c).unwrap();
        prop_assert_eq!(index.tf().rows(), c.len());
        for doc in &c {
            let sum: u32 = index.tf().row(doc.id() as usize).iter().sum();
            prop_assert_eq!(sum as usize, tokenize(doc.text()).len());
        }
    }

    #[test]
    fn occurrence_counts_are_bounded(docs in texts()) {
        let c = corpus(&docs);
        let index = SearchIndex::build(&c).unwrap();
        for entry in index.vocabulary_stats() {
            let s = entry.stats;
            prop_assert!(s.document_occurrences as usize <= c.len());
            prop_assert!(s.total_occurrences >= s.document_occurrences);
            let idf = index.idf()[entry.id as usize];
            prop_assert!(idf >= 0.0);
            if s.document_occurrences as usize == c.len() {
                prop_assert_eq!(idf, 0.0);
            }
        }
    }

    #[test]
    fn search_scores_are_positive_and_bounded(docs in texts(), query in "[a-e ]{0,12}", k in 0usize..6) {
        let index = SearchIndex::build(&corpus(&docs)).unwrap();
        let hits = index.search(&query, k);
        prop_assert!(hits.len() <= k);
        for h in &hits {
            prop_assert!(h.score > 0.0 && h.score <= 1.0);
        }
    }
}
