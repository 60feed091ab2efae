//! Pure rendering of search state into HTML fragments.
//!
//! External text (queries, titles, links, descriptions) only reaches markup
//! through [`Escaped`], which writes it as text content.

use serde::Serialize;
use std::fmt::{self, Write};

use crate::controller::SearchState;
use crate::data_models::{Query, SearchResult};

pub const WORDS_PER_MINUTE: usize = 200;
pub const SKELETON_CARDS: usize = 5;

/// Rendered markup for the results region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Fragment(String);

impl Fragment {
    pub fn empty() -> Fragment {
        Fragment(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display adapter that writes its text HTML-escaped.
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(pos) = rest.find(['&', '<', '>', '"', '\'']) {
            f.write_str(&rest[..pos])?;
            let entity = match rest.as_bytes()[pos] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&#39;",
            };
            f.write_str(entity)?;
            rest = &rest[pos + 1..];
        }
        f.write_str(rest)
    }
}

pub fn escape_html(text: &str) -> String {
    Escaped(text).to_string()
}

/// Whitespace-separated tokens of the trimmed text. Blank text is a single
/// empty token, so the count never drops below one. U+FEFF separates words
/// too, as it does for browser regex `\s`.
pub fn word_count(text: &str) -> usize {
    text.split(is_word_separator)
        .filter(|token| !token.is_empty())
        .count()
        .max(1)
}

fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

pub fn reading_time_minutes(text: &str) -> usize {
    word_count(text).div_ceil(WORDS_PER_MINUTE).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedMetrics {
    pub word_count: usize,
    pub reading_time_minutes: usize,
}

impl DerivedMetrics {
    pub fn from_description(description: &str) -> DerivedMetrics {
        DerivedMetrics {
            word_count: word_count(description),
            reading_time_minutes: reading_time_minutes(description),
        }
    }
}

/// Maps controller state to the markup of the results region.
pub fn render(state: &SearchState) -> Fragment {
    match state {
        SearchState::Idle => Fragment::empty(),
        SearchState::Loading { .. } => loading_skeletons(),
        SearchState::Results { query, results } => render_results(results, query),
        SearchState::NoResults { query } => no_results_panel(query),
        SearchState::Error { .. } => error_panel(),
    }
}

pub fn loading_skeletons() -> Fragment {
    let mut html = String::from(r#"<div class="results-grid">"#);
    for _ in 0..SKELETON_CARDS {
        html.push_str(concat!(
            r#"<div class="result-card">"#,
            r#"<div class="skeleton skeleton-title"></div>"#,
            r#"<div class="skeleton skeleton-url"></div>"#,
            r#"<div class="skeleton skeleton-text"></div>"#,
            r#"<div class="skeleton skeleton-text" style="width: 80%;"></div>"#,
            r#"<div class="skeleton skeleton-text" style="width: 60%;"></div>"#,
            "</div>",
        ));
    }
    html.push_str("</div>");
    Fragment(html)
}

/// Header plus one card per result, in input order. An empty slice renders
/// the no-results panel instead.
pub fn render_results(results: &[SearchResult], query: &Query) -> Fragment {
    if results.is_empty() {
        return no_results_panel(query);
    }

    let mut html = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"<div class="search-results-header"><p class="results-count">Found <strong>{}</strong> results for "<span class="search-query">{}</span>"</p></div>"#,
        results.len(),
        Escaped(query.as_str()),
    );
    html.push_str(r#"<div class="results-grid">"#);
    for (index, result) in results.iter().enumerate() {
        write_card(&mut html, result, index);
    }
    html.push_str("</div>");
    Fragment(html)
}

fn write_card(html: &mut String, result: &SearchResult, index: usize) {
    let metrics = DerivedMetrics::from_description(&result.description);
    let link = Escaped(&result.link);
    let _ = write!(
        html,
        concat!(
            r#"<article class="result-card" style="animation-delay: {delay:.1}s;">"#,
            r#"<a href="{link}" target="_blank" rel="noopener noreferrer" class="result-title">{title}</a>"#,
            r#"<a href="{link}" target="_blank" rel="noopener noreferrer" class="result-url">{link}</a>"#,
            r#"<p class="result-description">{description}</p>"#,
            r#"<div class="result-meta">"#,
            r#"<span class="reading-time">{minutes} min read</span>"#,
            r#"<span class="word-count">{words} words</span>"#,
            "</div></article>",
        ),
        delay = index as f64 * 0.1,
        link = link,
        title = Escaped(&result.title),
        description = Escaped(&result.description),
        minutes = metrics.reading_time_minutes,
        words = metrics.word_count,
    );
}

pub fn no_results_panel(query: &Query) -> Fragment {
    Fragment(format!(
        concat!(
            r#"<div class="no-results">"#,
            r#"<h3 class="no-results-title">No results found</h3>"#,
            r#"<p class="no-results-description">We couldn't find any articles matching "<strong>{}</strong>". "#,
            "Try searching with different keywords or check your spelling.</p>",
            "</div>",
        ),
        Escaped(query.as_str()),
    ))
}

pub fn error_panel() -> Fragment {
    Fragment(
        concat!(
            r#"<div class="no-results">"#,
            r#"<h3 class="no-results-title">Something went wrong</h3>"#,
            r#"<p class="no-results-description">Unable to search Wikipedia at the moment. "#,
            "Please check your internet connection and try again.</p>",
            "</div>",
        )
        .to_string(),
    )
}

#[test]
fn test_escape_html() {
    assert_eq!(escape_html("plain text"), "plain text");
    assert_eq!(
        escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
    );
    assert_eq!(escape_html("naïve → ünïcode"), "naïve → ünïcode");
}

#[test]
fn test_word_count() {
    assert_eq!(word_count(""), 1);
    assert_eq!(word_count("   \n\t "), 1);
    assert_eq!(word_count("one"), 1);
    assert_eq!(word_count("  two   words "), 2);
    assert_eq!(word_count("tabs\tand\nnew\r\nlines"), 4);
    assert_eq!(word_count("a\u{FEFF}b"), 2);
    assert_eq!(word_count("\u{FEFF}"), 1);
    assert_eq!(word_count("\u{FEFF} lead and trail \u{FEFF}"), 3);
}

#[test]
fn test_reading_time() {
    assert_eq!(reading_time_minutes(""), 1);
    assert_eq!(reading_time_minutes("a few words"), 1);

    let exactly_two_hundred = vec!["word"; 200].join(" ");
    assert_eq!(reading_time_minutes(&exactly_two_hundred), 1);

    let two_hundred_one = vec!["word"; 201].join(" ");
    assert_eq!(reading_time_minutes(&two_hundred_one), 2);
}

#[test]
fn test_idle_renders_nothing() {
    assert!(render(&SearchState::Idle).is_empty());
}
