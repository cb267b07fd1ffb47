//! Enumeration extraction
//!
//! Legal prose frequently carries inline enumerated sub-clauses:
//!
//! ```text
//! You must: (a) do X; (b) do Y; (c) do Z.
//! ```
//!
//! This module splits such text into an ordered sequence of segments,
//! alternating free prose with structured lists. Extraction runs in two
//! phases: a tokenizer finds marker item spans, then a builder groups
//! consecutive items into lists and interleaves the prose between them.
//! A clause with no markers comes back as a single prose segment;
//! extraction never fails.

use crate::marker::{classify_marker, is_alpha_successor, ListScheme};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One enumerated item: the literal marker as captured (lowercased) and
/// its trimmed text. Printed markers are regenerated from the list's
/// scheme, not from `marker`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub marker: String,
    pub text: String,
}

/// A run of content within a clause, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Prose { text: String },
    List { scheme: ListScheme, items: Vec<ListItem> },
}

lazy_static! {
    /// A marker span: parenthesized short token (1-3 letters, or 1-10)
    /// followed by item text running to `;`, `.` or end of input. The
    /// terminator and trailing whitespace belong to the span.
    static ref ITEM_RE: Regex =
        Regex::new(r"(?i)\(\s*([a-z]{1,3}|10|[1-9])\s*\)\s*([^;.\n]+)\s*(?:[;.]?\s*)").unwrap();
}

/// Span produced by the tokenizer phase.
#[derive(Debug)]
struct ItemSpan {
    start: usize,
    end: usize,
    marker: String,
    text: String,
}

fn tokenize(text: &str) -> Vec<ItemSpan> {
    ITEM_RE
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).expect("capture 0 always present");
            ItemSpan {
                start: whole.start(),
                end: whole.end(),
                marker: caps[1].to_lowercase(),
                text: caps[2].trim().to_string(),
            }
        })
        .collect()
}

/// Split clause text into prose and list segments.
pub fn extract_segments(text: &str) -> Vec<Segment> {
    let spans = tokenize(text);

    let mut segments: Vec<Segment> = Vec::new();
    let mut items: Vec<ListItem> = Vec::new();
    let mut scheme: Option<ListScheme> = None;
    let mut last_end = 0usize;

    for span in spans {
        // Prose between the previous span and this one closes any open
        // list before it is emitted.
        let before = &text[last_end..span.start];
        if before.chars().any(|c| !c.is_whitespace()) {
            flush_list(&mut segments, &mut items, &mut scheme);
            push_prose(&mut segments, before);
        }

        let mut item_scheme = classify_marker(&span.marker);

        // Ambiguity carve-out: a lone roman-looking letter that directly
        // succeeds the previous alpha marker continues the alpha run
        // ("(h) ...; (i) ...;" is one list, not alpha-then-roman).
        if item_scheme == ListScheme::Roman && scheme == Some(ListScheme::Alpha) {
            if let Some(prev) = items.last() {
                if is_alpha_successor(&prev.marker, &span.marker) {
                    item_scheme = ListScheme::Alpha;
                }
            }
        }

        // Scheme change terminates the run; mixed schemes in legal text
        // denote hierarchy rather than one list.
        if scheme.is_some() && scheme != Some(item_scheme) {
            flush_list(&mut segments, &mut items, &mut scheme);
        }
        scheme = Some(item_scheme);
        items.push(ListItem {
            marker: span.marker,
            text: span.text,
        });
        last_end = span.end;
    }

    flush_list(&mut segments, &mut items, &mut scheme);

    let tail = &text[last_end..];
    if tail.chars().any(|c| !c.is_whitespace()) {
        push_prose(&mut segments, tail);
    }

    segments
}

fn flush_list(segments: &mut Vec<Segment>, items: &mut Vec<ListItem>, scheme: &mut Option<ListScheme>) {
    if !items.is_empty() {
        segments.push(Segment::List {
            scheme: scheme.unwrap_or(ListScheme::Alpha),
            items: std::mem::take(items),
        });
    }
    *scheme = None;
}

fn push_prose(segments: &mut Vec<Segment>, raw: &str) {
    let cleaned = tidy_prose(raw);
    if !cleaned.is_empty() {
        segments.push(Segment::Prose { text: cleaned });
    }
}

/// Normalize whitespace and collapse separator artifacts left behind by
/// removed list spans ("; .", doubled commas, leading orphans).
pub fn tidy_prose(raw: &str) -> String {
    let mut text = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    for (artifact, repl) in [
        ("; .", "."),
        (";.", "."),
        (", .", "."),
        (",.", "."),
        (";;", ";"),
        (",,", ","),
        (" .", "."),
    ] {
        while text.contains(artifact) {
            text = text.replace(artifact, repl);
        }
    }

    let text = text.trim_start_matches([';', ',', ' ']).trim().to_string();

    // A remnant of pure punctuation is an artifact, not prose.
    if !text.chars().any(|c| c.is_alphanumeric()) {
        return String::new();
    }
    text
}
