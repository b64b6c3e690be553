//! Numbered list passes.
//!
//! Models often run a whole list together on one line ("Intro 1. a 2. b").
//! Each item is moved to its own line with one blank line before it.

use super::Pass;
use crate::utilities::{is_blank, is_numbered_item, number_marker_len};

/// Create the numbering stage passes
pub fn numbering_passes() -> Vec<(&'static str, Pass)> {
    vec![("numbered_items", Pass::new(separate_numbered_items))]
}

pub(crate) fn separate_numbered_items(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if is_blank(line) {
            // Paragraph break: at most one, never leading.
            if lines.last().is_some_and(|last| !last.is_empty()) {
                lines.push("");
            }
            continue;
        }

        for segment in split_segments(line) {
            if is_numbered_item(segment) && lines.last().is_some_and(|last| !last.is_empty()) {
                lines.push("");
            }
            lines.push(segment);
        }
    }

    lines.join("\n")
}

/// Split a line wherever a whitespace run after text is followed by `<1-2 digits>.`
fn split_segments(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut after_text = false;

    for (i, c) in line.char_indices() {
        if !c.is_whitespace() {
            after_text = true;
            continue;
        }
        if !after_text {
            continue;
        }
        after_text = false;

        let run_end = line[i..]
            .find(|ch: char| !ch.is_whitespace())
            .map_or(line.len(), |offset| i + offset);
        if number_marker_len(&line[run_end..]).is_some() {
            segments.push(line[start..i].trim());
            start = run_end;
        }
    }
    segments.push(line[start..].trim());

    segments.retain(|segment| !segment.is_empty());
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_items_split() {
        assert_eq!(
            separate_numbered_items("Intro text 1. first 2. second"),
            "Intro text\n\n1. first\n\n2. second"
        );
    }

    #[test]
    fn test_first_item_gets_no_blank() {
        assert_eq!(separate_numbered_items("1. Hi 2. Bye"), "1. Hi\n\n2. Bye");
    }

    #[test]
    fn test_existing_blank_not_doubled() {
        assert_eq!(
            separate_numbered_items("Points:\n\n1. a\n\n\n2. b"),
            "Points:\n\n1. a\n\n2. b"
        );
    }

    #[test]
    fn test_items_on_separate_lines_get_separated() {
        assert_eq!(separate_numbered_items("1. a\n2. b\n3. c"), "1. a\n\n2. b\n\n3. c");
    }

    #[test]
    fn test_segments_trimmed_and_blank_lines_collapsed() {
        assert_eq!(separate_numbered_items("  a  \n   \n\n  b "), "a\n\nb");
        assert_eq!(separate_numbered_items("\n\n\nlead"), "lead");
    }

    #[test]
    fn test_wide_gap_before_number_still_splits() {
        assert_eq!(separate_numbered_items("see   1. this"), "see\n\n1. this");
    }

    #[test]
    fn test_decimal_split_without_separator() {
        // Splitting only looks for `<digits>.`, so decimals land on their own line.
        assert_eq!(separate_numbered_items("grew 1.5 percent"), "grew\n1.5 percent");
    }

    #[test]
    fn test_prose_number_is_split() {
        // Known heuristic limitation: a sentence ending in a number is treated as an item.
        assert_eq!(
            separate_numbered_items("section 3. is next"),
            "section\n\n3. is next"
        );
    }

    #[test]
    fn test_long_numbers_not_items() {
        assert_eq!(separate_numbered_items("in 2024. we"), "in 2024. we");
    }

    #[test]
    fn test_empty() {
        assert_eq!(separate_numbered_items(""), "");
        assert_eq!(separate_numbered_items("   "), "");
    }
}
