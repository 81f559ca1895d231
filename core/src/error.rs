use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A count argument (`k`, window size) arrived negative from a signed source.
    #[error("invalid {field}: {value} (must be >= 0)")]
    Configuration { field: &'static str, value: i64 },

    /// The TF pass met a term the vocabulary never assigned an id to.
    /// Only happens when index stages run out of order or over different corpora.
    #[error("term {term:?} is missing from the vocabulary; index stages built out of order")]
    Consistency { term: String },

    #[error("unknown document source type {0:?}")]
    UnknownSource(String),

    #[error("{path}: expected a JSON object or array of objects")]
    UnexpectedJson { path: String },

    #[error("invalid date {value:?}: {source}")]
    Date {
        value: String,
        #[source]
        source: time::error::Parse,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
