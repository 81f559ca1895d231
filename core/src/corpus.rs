use crate::document::{Document, DocumentKind};
use crate::DocId;
use std::sync::OnceLock;
use time::Date;

/// An ordered collection of documents with sequential ids starting at 0.
///
/// Built by the caller and passed explicitly to whatever needs it; there is no
/// process-wide instance.
#[derive(Debug, Default)]
pub struct Corpus {
    name: String,
    documents: Vec<Document>,
    // Reset by every mutation, so a materialized text always matches `documents`.
    full_text: OnceLock<String>,
}

impl Corpus {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn name(&self) -> &str { &self.name }

    /// Append a document and return the id it was given.
    pub fn add_document(
        &mut self,
        title: impl Into<String>,
        kind: DocumentKind,
        date: Option<Date>,
        url: Option<String>,
        text: impl Into<String>,
    ) -> DocId {
        let id = self.documents.len() as DocId;
        self.documents.push(Document { id, title: title.into(), kind, date, url, text: text.into() });
        self.full_text = OnceLock::new();
        id
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.documents.get(id as usize)
    }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Document> + '_ {
        self.documents.iter()
    }

    /// All document texts joined by a single space, in id order. Materialized
    /// on first use.
    pub fn full_text(&self) -> &str {
        self.full_text.get_or_init(|| {
            let texts: Vec<&str> = self.documents.iter().map(|d| d.text.as_str()).collect();
            texts.join(" ")
        })
    }

    /// Documents ordered by date, oldest first. Undated documents come last;
    /// equal dates keep id order.
    pub fn by_date(&self) -> Vec<&Document> {
        let mut docs: Vec<&Document> = self.documents.iter().collect();
        docs.sort_by_key(|d| (d.date.is_none(), d.date));
        docs
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn generic(author: &str) -> DocumentKind {
        DocumentKind::Generic { author: author.into() }
    }

    #[test]
    fn ids_are_sequential() {
        let mut c = Corpus::new("test");
        assert_eq!(c.add_document("a", generic("x"), None, None, "one"), 0);
        assert_eq!(c.add_document("b", generic("y"), None, None, "two"), 1);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(1).unwrap().title(), "b");
        assert!(c.get(2).is_none());
    }

    #[test]
    fn full_text_follows_mutation() {
        let mut c = Corpus::new("test");
        c.add_document("a", generic("x"), None, None, "first");
        assert_eq!(c.full_text(), "first");
        c.add_document("b", generic("x"), None, None, "second");
        assert_eq!(c.full_text(), "first second");
    }

    #[test]
    fn by_date_puts_undated_last() {
        let mut c = Corpus::new("test");
        c.add_document("undated", generic("x"), None, None, "");
        c.add_document("new", generic("x"), Some(date!(2024 - 05 - 01)), None, "");
        c.add_document("old", generic("x"), Some(date!(2020 - 01 - 01)), None, "");
        let titles: Vec<&str> = c.by_date().into_iter().map(Document::title).collect();
        assert_eq!(titles, vec!["old", "new", "undated"]);
    }
}
