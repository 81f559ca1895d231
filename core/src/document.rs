use crate::DocId;
use std::fmt;
use time::Date;

/// Source-specific part of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    Reddit { author: String, comment_count: u32 },
    /// `authors[0]` is the primary author.
    Arxiv { authors: Vec<String> },
    Generic { author: String },
}

impl DocumentKind {
    pub fn source_tag(&self) -> &'static str {
        match self {
            DocumentKind::Reddit { .. } => "Reddit",
            DocumentKind::Arxiv { .. } => "Arxiv",
            DocumentKind::Generic { .. } => "Generic",
        }
    }
}

/// A document as held by a [`Corpus`](crate::Corpus). Immutable once added.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) id: DocId,
    pub(crate) title: String,
    pub(crate) kind: DocumentKind,
    pub(crate) date: Option<Date>,
    pub(crate) url: Option<String>,
    pub(crate) text: String,
}

impl Document {
    pub fn id(&self) -> DocId { self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn kind(&self) -> &DocumentKind { &self.kind }
    pub fn date(&self) -> Option<Date> { self.date }
    pub fn url(&self) -> Option<&str> { self.url.as_deref() }
    pub fn text(&self) -> &str { &self.text }
    pub fn source_tag(&self) -> &'static str { self.kind.source_tag() }

    /// Primary author. Empty when an arXiv entry came without authors.
    pub fn author(&self) -> &str {
        match &self.kind {
            DocumentKind::Reddit { author, .. } | DocumentKind::Generic { author } => author,
            DocumentKind::Arxiv { authors } => authors.first().map(String::as_str).unwrap_or(""),
        }
    }

    pub fn authors(&self) -> Vec<&str> {
        match &self.kind {
            DocumentKind::Reddit { author, .. } | DocumentKind::Generic { author } => vec![author.as_str()],
            DocumentKind::Arxiv { authors } => authors.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DocumentKind::Reddit { comment_count, .. } => {
                write!(f, "Reddit: {} ({} comments)", self.title, comment_count)
            }
            DocumentKind::Arxiv { authors } => write!(f, "Arxiv: {} ({} authors)", self.title, authors.len()),
            DocumentKind::Generic { author } => match self.date {
                Some(date) => write!(f, "{} ({}, {})", self.title, author, date),
                None => write!(f, "{} ({})", self.title, author),
            },
        }
    }
}
