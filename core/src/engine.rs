use crate::concordance::{locate, ConcordanceLine};
use crate::corpus::Corpus;
use crate::document::Document;
use crate::error::Result;
use crate::index::SearchIndex;

/// A ranked document with its score.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub document: &'a Document,
    pub score: f64,
}

/// A corpus frozen together with the index built from it.
///
/// Owning both keeps them from drifting apart: there is no way to add a
/// document without building a new engine.
#[derive(Debug)]
pub struct SearchEngine {
    corpus: Corpus,
    index: SearchIndex,
}

impl SearchEngine {
    pub fn new(corpus: Corpus) -> Result<Self> {
        let index = SearchIndex::build(&corpus)?;
        tracing::info!(
            corpus = corpus.name(),
            num_docs = corpus.len(),
            num_terms = index.vocabulary().len(),
            "search engine ready"
        );
        Ok(Self { corpus, index })
    }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    pub fn index(&self) -> &SearchIndex { &self.index }

    pub fn search(&self, query: &str, k: usize) -> Vec<SearchHit<'_>> {
        self.index
            .search(query, k)
            .into_iter()
            .filter_map(|s| self.corpus.get(s.doc_id).map(|document| SearchHit { document, score: s.score }))
            .collect()
    }

    /// Keyword-in-context lines over the whole corpus text.
    pub fn locate(&self, keyword: &str, window: usize) -> Vec<ConcordanceLine> {
        locate(self.corpus.full_text(), keyword, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentKind;

    #[test]
    fn hits_resolve_to_documents() {
        let mut corpus = Corpus::new("test");
        corpus.add_document("Cats", DocumentKind::Generic { author: "a".into() }, None, None, "the cat sat");
        corpus.add_document("Dogs", DocumentKind::Generic { author: "b".into() }, None, None, "the dog ran");
        let engine = SearchEngine::new(corpus).unwrap();

        let hits = engine.search("dog", 3);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document.title(), "Dogs");

        let lines = engine.locate("SAT", 4);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].left, "cat ");
        assert_eq!(lines[0].right, " the");
    }
}
