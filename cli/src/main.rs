use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use corpora_core::config::{non_negative, DEFAULT_TOP_K, DEFAULT_WINDOW};
use corpora_core::ingest::read_corpus;
use corpora_core::{SearchEngine, SearchHit};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "corpora")]
#[command(about = "Search and explore a document corpus with TF-IDF ranking", long_about = None)]
struct Cli {
    /// Input path (JSON/JSONL file or directory)
    #[arg(long, global = true, default_value = "./corpus.jsonl")]
    input: String,
    /// Corpus name shown in logs
    #[arg(long, global = true, default_value = "corpus")]
    name: String,
    /// Print JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank documents against a free-text query
    Search {
        query: String,
        #[arg(short, long, default_value_t = DEFAULT_TOP_K as i64, allow_negative_numbers = true)]
        k: i64,
    },
    /// Keyword-in-context listing over the whole corpus text
    Locate {
        keyword: String,
        /// Characters of context on each side
        #[arg(short, long, default_value_t = DEFAULT_WINDOW as i64, allow_negative_numbers = true)]
        window: i64,
        /// Print left / match / right columns instead of snippets
        #[arg(long, default_value_t = false)]
        table: bool,
    },
    /// Most frequent terms in the corpus
    Stats {
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        top: i64,
    },
    /// Every vocabulary term with its occurrence counts
    Terms,
    /// Show one document and its most frequent terms
    Doc {
        id: u32,
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        top: i64,
    },
    /// List documents by date
    List,
}

#[derive(Serialize)]
struct HitRow<'a> {
    doc_id: u32,
    score: f64,
    source: &'a str,
    title: &'a str,
    author: &'a str,
    date: Option<String>,
    url: Option<&'a str>,
}

impl<'a> From<&SearchHit<'a>> for HitRow<'a> {
    fn from(hit: &SearchHit<'a>) -> Self {
        let d = hit.document;
        HitRow {
            doc_id: d.id(),
            score: hit.score,
            source: d.source_tag(),
            title: d.title(),
            author: d.author(),
            date: d.date().map(|date| date.to_string()),
            url: d.url(),
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let corpus = read_corpus(&cli.name, &cli.input).with_context(|| format!("loading corpus from {}", cli.input))?;
    let engine = SearchEngine::new(corpus)?;

    match cli.command {
        Commands::Search { query, k } => search(&engine, &query, non_negative("k", k)?, cli.json),
        Commands::Locate { keyword, window, table } => locate(&engine, &keyword, non_negative("window", window)?, table, cli.json),
        Commands::Stats { top } => stats(&engine, non_negative("top", top)?, cli.json),
        Commands::Terms => terms(&engine, cli.json),
        Commands::Doc { id, top } => doc(&engine, id, non_negative("top", top)?, cli.json),
        Commands::List => list(&engine, cli.json),
    }
}

fn search(engine: &SearchEngine, query: &str, k: usize, json: bool) -> Result<()> {
    let hits = engine.search(query, k);
    let rows: Vec<HitRow> = hits.iter().map(HitRow::from).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("no results for {query:?}");
    }
    for r in rows {
        println!("{:>8.4}  [{}] {} ({}, {})", r.score, r.source, r.title, r.author, r.date.as_deref().unwrap_or("-"));
    }
    Ok(())
}

fn locate(engine: &SearchEngine, keyword: &str, window: usize, table: bool, json: bool) -> Result<()> {
    let lines = engine.locate(keyword, window);
    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else if table {
        for l in &lines {
            println!("{:>width$} | {} | {}", l.left, l.matched, l.right, width = window);
        }
    } else {
        for l in &lines {
            println!("{}", l.snippet());
        }
    }
    tracing::info!(keyword, matches = lines.len(), "locate");
    Ok(())
}

fn stats(engine: &SearchEngine, top: usize, json: bool) -> Result<()> {
    let entries = engine.index().top_terms(top);
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    println!("{} distinct terms", engine.index().vocabulary().len());
    for e in entries {
        println!("{:>6}  {:>4}  {}", e.stats.total_occurrences, e.stats.document_occurrences, e.term);
    }
    Ok(())
}

fn terms(engine: &SearchEngine, json: bool) -> Result<()> {
    let entries = engine.index().vocabulary_stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for e in entries {
        println!("{}\t{}\t{}\t{}", e.id, e.term, e.stats.total_occurrences, e.stats.document_occurrences);
    }
    Ok(())
}

fn doc(engine: &SearchEngine, id: u32, top: usize, json: bool) -> Result<()> {
    let document = engine.corpus().get(id).with_context(|| format!("no document with id {id}"))?;
    let top_terms = engine.index().document_top_terms(id, top).unwrap_or_default();
    if json {
        let obj = serde_json::json!({
            "doc_id": id,
            "source": document.source_tag(),
            "title": document.title(),
            "authors": document.authors(),
            "date": document.date().map(|d| d.to_string()),
            "url": document.url(),
            "text": document.text(),
            "top_terms": top_terms,
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
        return Ok(());
    }
    println!("[{}] {}", document.source_tag(), document);
    println!("{}", document.text());
    for (term, count) in top_terms {
        println!("{count:>6}  {term}");
    }
    Ok(())
}

fn list(engine: &SearchEngine, json: bool) -> Result<()> {
    let docs = engine.corpus().by_date();
    if json {
        let rows: Vec<serde_json::Value> = docs
            .iter()
            .map(|d| serde_json::json!({ "doc_id": d.id(), "source": d.source_tag(), "title": d.title(), "date": d.date().map(|x| x.to_string()) }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    for d in docs {
        println!("[{}] {}", d.source_tag(), d);
    }
    Ok(())
}
