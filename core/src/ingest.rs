//! Turns raw JSON documents into a [`Corpus`].
//!
//! Accepts a single JSON object, a JSON array of objects, or JSONL (one object
//! per line), either as one file or as a directory walked in file-name order.

use crate::corpus::Corpus;
use crate::document::DocumentKind;
use crate::error::{Error, Result};
use crate::DocId;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use time::macros::format_description;
use time::Date;
use walkdir::WalkDir;

#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(alias = "body")]
    pub text: String,
    #[serde(rename = "type", default)]
    pub source: Option<String>,
    #[serde(default)]
    pub comments: Option<u32>,
}

impl RawDocument {
    /// Pick the document kind from the source tag (case-insensitive).
    pub fn kind(&self) -> Result<DocumentKind> {
        let author = || self.author.clone().unwrap_or_else(|| "Unknown".to_string());
        let tag = self.source.as_deref().unwrap_or("generic").to_lowercase();
        match tag.as_str() {
            "reddit" => Ok(DocumentKind::Reddit { author: author(), comment_count: self.comments.unwrap_or(0) }),
            "arxiv" => {
                let authors = if self.authors.is_empty() {
                    // "|"-joined author list in a single field
                    author().split('|').map(str::trim).filter(|a| !a.is_empty()).map(str::to_owned).collect()
                } else {
                    self.authors.clone()
                };
                Ok(DocumentKind::Arxiv { authors })
            }
            "generic" => Ok(DocumentKind::Generic { author: author() }),
            _ => Err(Error::UnknownSource(self.source.clone().unwrap_or_default())),
        }
    }

    pub fn parsed_date(&self) -> Result<Option<Date>> {
        match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            None => Ok(None),
            Some(value) => {
                // datetimes like 2024-01-02T10:00:00Z keep only the date part
                let day = value.get(..10).unwrap_or(value);
                Date::parse(day, format_description!("[year]-[month]-[day]"))
                    .map(Some)
                    .map_err(|source| Error::Date { value: value.to_string(), source })
            }
        }
    }
}

/// Append a raw document to the corpus.
pub fn add_raw(corpus: &mut Corpus, raw: RawDocument) -> Result<DocId> {
    let kind = raw.kind()?;
    let date = raw.parsed_date()?;
    Ok(corpus.add_document(raw.title, kind, date, raw.url, raw.text))
}

/// Read every `.json` / `.jsonl` file under `input` into a new corpus.
pub fn read_corpus<P: AsRef<Path>>(name: &str, input: P) -> Result<Corpus> {
    let mut corpus = Corpus::new(name);
    for file in input_files(input.as_ref()) {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut corpus)?;
        } else {
            read_json(&file, &mut corpus)?;
        }
    }
    tracing::info!(num_docs = corpus.len(), "ingested documents");
    Ok(corpus)
}

fn input_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else {
        files.push(input.to_path_buf());
    }
    files
}

fn read_jsonl(file: &Path, corpus: &mut Corpus) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            tracing::warn!(file = %file.display(), line = lineno + 1, "skipping blank line");
            continue;
        }
        let raw: RawDocument = serde_json::from_str(&line)?;
        add_raw(corpus, raw)?;
    }
    Ok(())
}

fn read_json(file: &Path, corpus: &mut Corpus) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                add_raw(corpus, serde_json::from_value(v)?)?;
            }
        }
        serde_json::Value::Object(_) => {
            add_raw(corpus, serde_json::from_value(json)?)?;
        }
        _ => return Err(Error::UnexpectedJson { path: file.display().to_string() }),
    }
    Ok(())
}
