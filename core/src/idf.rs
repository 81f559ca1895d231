use crate::vocabulary::Vocabulary;

/// `idf[t] = ln(N / df[t])`, or `0.0` when `df[t] == 0`.
///
/// Unsmoothed: a term found in every document weighs exactly zero and never
/// moves a ranking.
pub fn build_idf(vocab: &Vocabulary, num_docs: usize) -> Vec<f64> {
    let n = num_docs as f64;
    let idf: Vec<f64> = vocab
        .document_frequencies()
        .map(|df| if df > 0 { (n / df as f64).ln() } else { 0.0 })
        .collect();
    tracing::info!(num_terms = idf.len(), num_docs, "idf computed");
    idf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use crate::document::DocumentKind;

    #[test]
    fn universal_terms_weigh_zero() {
        let mut c = Corpus::new("test");
        for t in ["the cat", "the dog", "the dog"] {
            c.add_document("", DocumentKind::Generic { author: String::new() }, None, None, t);
        }
        let v = Vocabulary::build(&c);
        let idf = build_idf(&v, c.len());
        assert_eq!(idf[v.id("the").unwrap() as usize], 0.0);
        assert!((idf[v.id("cat").unwrap() as usize] - 3f64.ln()).abs() < 1e-12);
        assert!((idf[v.id("dog").unwrap() as usize] - 1.5f64.ln()).abs() < 1e-12);
    }
}
