use crate::tokenizer::tokenize;
use crate::vocabulary::Vocabulary;
use std::collections::HashMap;

/// Weight a free-text query in the corpus's vector space.
///
/// Counts are multiplied by the corpus IDF, never by statistics of the query
/// itself. Terms outside the vocabulary are dropped, so a query with no
/// overlap comes back as an all-zero vector of vocabulary length.
pub fn build_query_vector(query: &str, vocab: &Vocabulary, idf: &[f64]) -> Vec<f64> {
    let mut tf_q: HashMap<usize, u32> = HashMap::new();
    for term in tokenize(query) {
        if let Some(tid) = vocab.id(&term) {
            *tf_q.entry(tid as usize).or_insert(0) += 1;
        }
    }
    let mut q_vec = vec![0.0; vocab.len()];
    for (tid, count) in tf_q {
        q_vec[tid] = count as f64 * idf[tid];
    }
    q_vec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use crate::document::DocumentKind;
    use crate::idf::build_idf;

    fn setup() -> (Vocabulary, Vec<f64>) {
        let mut c = Corpus::new("test");
        for t in ["the cat sat", "the dog ran"] {
            c.add_document("", DocumentKind::Generic { author: String::new() }, None, None, t);
        }
        let v = Vocabulary::build(&c);
        let idf = build_idf(&v, c.len());
        (v, idf)
    }

    #[test]
    fn weights_repeated_terms_by_corpus_idf() {
        let (v, idf) = setup();
        let q = build_query_vector("Cat cat", &v, &idf);
        let cat = v.id("cat").unwrap() as usize;
        assert!((q[cat] - 2.0 * 2f64.ln()).abs() < 1e-12);
        assert_eq!(q.iter().filter(|w| **w != 0.0).count(), 1);
    }

    #[test]
    fn out_of_vocabulary_query_is_zero() {
        let (v, idf) = setup();
        let q = build_query_vector("unicorn", &v, &idf);
        assert_eq!(q.len(), v.len());
        assert!(q.iter().all(|w| *w == 0.0));
    }
}
