use regex::RegexBuilder;
use serde::Serialize;

/// One keyword-in-context row: left context, the match as written in the
/// text, right context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcordanceLine {
    pub left: String,
    pub matched: String,
    pub right: String,
}

impl ConcordanceLine {
    /// Flat `"...left match right..."` form.
    pub fn snippet(&self) -> String {
        format!("...{}{}{}...", self.left, self.matched, self.right)
    }
}

/// Case-insensitive literal search for `keyword` in `text`, keeping `window`
/// characters of context on each side of every match.
///
/// The keyword is escaped, never interpreted as a pattern. Windows are clipped
/// at the text boundaries and newlines inside them become spaces. An empty
/// keyword matches nothing.
pub fn locate(text: &str, keyword: &str, window: usize) -> Vec<ConcordanceLine> {
    if keyword.is_empty() {
        return Vec::new();
    }
    let spans: Vec<(usize, usize)> = match RegexBuilder::new(&regex::escape(keyword)).case_insensitive(true).build() {
        Ok(pat) => pat.find_iter(text).map(|m| (m.start(), m.end())).collect(),
        Err(err) => {
            // keyword too large for the regex engine
            tracing::debug!(%err, keyword_len = keyword.len(), "falling back to literal scan");
            literal_spans(text, keyword)
        }
    };
    spans
        .into_iter()
        .map(|(start, end)| {
            let left_start = text[..start]
                .char_indices()
                .rev()
                .nth(window.saturating_sub(1))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let left = if window == 0 { "" } else { &text[left_start..start] };
            let right: String = text[end..].chars().take(window).collect();
            ConcordanceLine {
                left: fold_newlines(left),
                matched: fold_newlines(&text[start..end]),
                right: fold_newlines(&right),
            }
        })
        .collect()
}

/// Non-overlapping case-insensitive occurrences of `keyword`, compared char by
/// char with lowercase folding. Byte offsets into `text`.
fn literal_spans(text: &str, keyword: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = keyword.chars().collect();
    let hay: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut i = 0;
    while i + needle.len() <= hay.len() {
        let hit = hay[i..i + needle.len()].iter().zip(&needle).all(|(&(_, h), &n)| fold_eq(h, n));
        if hit {
            let start = hay[i].0;
            let end = hay.get(i + needle.len()).map(|&(b, _)| b).unwrap_or(text.len());
            spans.push((start, end));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    spans
}

fn fold_eq(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// [`locate`] flattened to `"...snippet..."` strings.
pub fn snippets(text: &str, keyword: &str, window: usize) -> Vec<String> {
    locate(text, keyword, window).iter().map(ConcordanceLine::snippet).collect()
}

fn fold_newlines(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}
