//! Whitespace normalization passes.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Pass;
use crate::utilities::number_marker_len;

/// Create the whitespace stage passes
pub fn whitespace_passes() -> Vec<(&'static str, Pass)> {
    vec![
        ("space_before_numbers", Pass::new(collapse_space_before_numbers)),
        ("inline_numbers", Pass::new(break_inline_numbers)),
        ("blank_lines", Pass::new(collapse_blank_lines)),
        ("horizontal_space", Pass::new(collapse_horizontal_space)),
        ("line_edges", Pass::new(trim_line_edges)),
        ("trim", Pass::new(|text| text.trim().to_string())),
    ]
}

pub(crate) fn collapse_space_before_numbers(text: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+([0-9]+\.)").unwrap());
    RE.replace_all(text, " ${1}").into_owned()
}

/// Move every `<n>. ` marker that follows other text onto its own line,
/// separated from that text by one blank line.
pub(crate) fn break_inline_numbers(text: &str) -> String {
    text.split('\n')
        .map(break_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn break_line(line: &str) -> String {
    let mut pieces = Vec::new();
    let mut current = String::with_capacity(line.len());
    let mut rest = line;

    while let Some((at, marker_len, space_len)) = find_marker(rest) {
        current.push_str(&rest[..at]);
        if current.trim().is_empty() {
            // Already leads its line.
            current.push_str(&rest[at..at + marker_len + space_len]);
        } else {
            pieces.push(current.trim_end().to_string());
            current = format!("{} ", &rest[at..at + marker_len]);
        }
        rest = &rest[at + marker_len + space_len..];
    }
    current.push_str(rest);
    pieces.push(current);

    pieces.join("\n\n")
}

/// Find the next `<1-2 digits>.<whitespace>` marker.
/// Returns its byte offset, the marker length and the following whitespace length.
fn find_marker(text: &str) -> Option<(usize, usize, usize)> {
    let mut prev: Option<char> = None;
    for (i, c) in text.char_indices() {
        let starts_run = c.is_ascii_digit() && !prev.is_some_and(|p| p.is_ascii_digit());
        prev = Some(c);
        if !starts_run {
            continue;
        }
        let Some(marker_len) = number_marker_len(&text[i..]) else {
            continue;
        };
        if let Some(space) = text[i + marker_len..].chars().next() {
            if space.is_whitespace() {
                return Some((i, marker_len, space.len_utf8()));
            }
        }
    }
    None
}

pub(crate) fn collapse_blank_lines(text: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
    RE.replace_all(text, "\n\n").into_owned()
}

pub(crate) fn collapse_horizontal_space(text: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());
    RE.replace_all(text, " ").into_owned()
}

pub(crate) fn trim_line_edges(text: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]*\n[ \t]*").unwrap());
    RE.replace_all(text, "\n").into_owned()
}
