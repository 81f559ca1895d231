use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use corpora_core::config::{non_negative, DEFAULT_TOP_K, DEFAULT_WINDOW};
use corpora_core::ingest::read_corpus;
use corpora_core::{locate, ConcordanceLine, SearchEngine, TermEntry};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const SNIPPET_WINDOW: usize = 60;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub k: Option<i64>,
}

#[derive(Deserialize)]
pub struct LocateParams {
    pub keyword: String,
    pub window: Option<i64>,
}

#[derive(Deserialize)]
pub struct StatsParams {
    pub top: Option<i64>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHitView>,
}

#[derive(Serialize)]
pub struct SearchHitView {
    pub doc_id: u32,
    pub score: f64,
    pub source: String,
    pub title: String,
    pub author: String,
    pub date: Option<String>,
    pub url: Option<String>,
    pub snippet: Option<String>,
}

#[derive(Serialize)]
pub struct LocateResponse {
    pub keyword: String,
    pub window: usize,
    pub snippets: Vec<String>,
    pub lines: Vec<ConcordanceLine>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub num_docs: usize,
    pub num_terms: usize,
    pub top_terms: Vec<TermEntry>,
}

/// Shared handle to the current engine.
///
/// Queries clone the inner `Arc` and drop the lock straight away; a rebuild
/// builds a complete new engine off to the side and swaps it in, so readers
/// only ever see a fully built index.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<Arc<SearchEngine>>>,
    pub input: PathBuf,
    pub corpus_name: String,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(engine: SearchEngine, input: PathBuf, corpus_name: String, admin_token: Option<String>) -> Self {
        Self { engine: Arc::new(RwLock::new(Arc::new(engine))), input, corpus_name, admin_token }
    }

    fn current(&self) -> Arc<SearchEngine> {
        self.engine.read().clone()
    }
}

pub fn build_app(input: String, corpus_name: String) -> Result<Router> {
    let input = PathBuf::from(input);
    let engine = SearchEngine::new(read_corpus(&corpus_name, &input)?)?;
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    Ok(router(AppState::new(engine, input, corpus_name, admin_token)))
}

pub fn router(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/locate", get(locate_handler))
        .route("/stats", get(stats_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/index/rebuild", post(rebuild_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn bad_request(err: corpora_core::Error) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let k = non_negative("k", params.k.unwrap_or(DEFAULT_TOP_K as i64)).map_err(bad_request)?;
    let engine = state.current();
    let hits = engine.search(&params.q, k);

    // Capture raw query terms for highlighting
    let raw_terms: Vec<&str> = params.q.split_whitespace().collect();
    let results: Vec<SearchHitView> = hits
        .iter()
        .map(|hit| {
            let d = hit.document;
            SearchHitView {
                doc_id: d.id(),
                score: hit.score,
                source: d.source_tag().to_string(),
                title: d.title().to_string(),
                author: d.author().to_string(),
                date: d.date().map(|date| date.to_string()),
                url: d.url().map(str::to_string),
                snippet: snippet(d.text(), &raw_terms),
            }
        })
        .collect();

    let elapsed = start.elapsed();
    Ok(Json(SearchResponse { query: params.q.clone(), took_s: elapsed.as_secs_f64(), total_hits: results.len(), results }))
}

pub async fn locate_handler(State(state): State<AppState>, Query(params): Query<LocateParams>) -> Result<Json<LocateResponse>, (StatusCode, String)> {
    let window = non_negative("window", params.window.unwrap_or(DEFAULT_WINDOW as i64)).map_err(bad_request)?;
    let engine = state.current();
    let lines = engine.locate(&params.keyword, window);
    let snippets = lines.iter().map(ConcordanceLine::snippet).collect();
    Ok(Json(LocateResponse { keyword: params.keyword, window, snippets, lines }))
}

pub async fn stats_handler(State(state): State<AppState>, Query(params): Query<StatsParams>) -> Result<Json<StatsResponse>, (StatusCode, String)> {
    let top = non_negative("top", params.top.unwrap_or(10)).map_err(bad_request)?;
    let engine = state.current();
    let index = engine.index();
    Ok(Json(StatsResponse { num_docs: index.document_count(), num_terms: index.vocabulary().len(), top_terms: index.top_terms(top) }))
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<u32>) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let engine = state.current();
    let d = engine.corpus().get(doc_id).ok_or((StatusCode::NOT_FOUND, format!("no document {doc_id}")))?;
    let top_terms = engine.index().document_top_terms(doc_id, 10).unwrap_or_default();
    Ok(Json(serde_json::json!({
        "doc_id": doc_id,
        "source": d.source_tag(),
        "title": d.title(),
        "authors": d.authors(),
        "date": d.date().map(|date| date.to_string()),
        "url": d.url(),
        "text": d.text(),
        "top_terms": top_terms,
    })))
}

async fn rebuild_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let input = state.input.clone();
    let name = state.corpus_name.clone();
    let built = tokio::task::spawn_blocking(move || read_corpus(&name, &input).and_then(SearchEngine::new))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let num_docs = built.corpus().len();
    let num_terms = built.index().vocabulary().len();
    *state.engine.write() = Arc::new(built);
    tracing::info!(num_docs, num_terms, "index rebuilt and swapped");
    Ok(Json(serde_json::json!({ "num_docs": num_docs, "num_terms": num_terms })))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}

/// Context around the first query term found in `text`, with every query
/// term wrapped in `<em>`.
fn snippet(text: &str, raw_terms: &[&str]) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let first = raw_terms.iter().find_map(|term| locate(text, term, SNIPPET_WINDOW).into_iter().next());
    let snippet = match first {
        Some(line) => format!("{}{}{}", line.left, line.matched, line.right),
        None => text.chars().take(2 * SNIPPET_WINDOW).collect(),
    };
    Some(highlight_terms(&snippet, raw_terms))
}

/// Wrap every occurrence of any term in `<em>`, in a single pass so markup
/// inserted for one term is never matched by another. Longer terms win where
/// terms overlap.
fn highlight_terms(snippet: &str, terms: &[&str]) -> String {
    let mut terms: Vec<&str> = terms.iter().map(|t| t.trim()).filter(|t| !t.is_empty()).collect();
    if terms.is_empty() {
        return snippet.to_string();
    }
    terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    let alternation = terms.iter().map(|t| regex::escape(t)).collect::<Vec<_>>().join("|");
    match regex::RegexBuilder::new(&alternation).case_insensitive(true).build() {
        Ok(pat) => pat.replace_all(snippet, |caps: &regex::Captures| format!("<em>{}</em>", &caps[0])).into_owned(),
        Err(_) => snippet.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_case_insensitively() {
        assert_eq!(highlight_terms("Rust and rust", &["RUST"]), "<em>Rust</em> and <em>rust</em>");
    }

    #[test]
    fn highlighting_never_touches_inserted_markup() {
        assert_eq!(highlight_terms("Rust is fun", &["rust", "em"]), "<em>Rust</em> is fun");
        assert_eq!(highlight_terms("item emblem", &["em", "rust"]), "it<em>em</em> <em>em</em>bl<em>em</em>");
    }

    #[test]
    fn longer_terms_win_overlaps() {
        assert_eq!(highlight_terms("rustacean", &["rust", "rustacean"]), "<em>rustacean</em>");
        assert_eq!(highlight_terms("plain", &["", "  "]), "plain");
    }

    #[test]
    fn snippet_centers_on_first_term() {
        let text = format!("{}needle{}", "a".repeat(100), "b".repeat(100));
        let s = snippet(&text, &["missing", "needle"]).unwrap();
        assert_eq!(s, format!("{}<em>needle</em>{}", "a".repeat(SNIPPET_WINDOW), "b".repeat(SNIPPET_WINDOW)));
        assert_eq!(snippet("", &["x"]), None);
    }
}
