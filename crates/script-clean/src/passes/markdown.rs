//! Markdown artifact passes.
//!
//! Formatting syntax is removed while the text it decorates is kept.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::Pass;

/// Create the markdown stage passes
pub fn markdown_passes() -> Vec<(&'static str, Pass)> {
    vec![
        ("code_fences", code_fence_pass()),
        ("backticks", Pass::replace_literal("`", "")),
        ("emphasis", Pass::new(strip_emphasis)),
        ("headings", Pass::new(strip_headings)),
        ("bullets", Pass::new(normalize_bullets)),
    ]
}

fn code_fence_pass() -> Pass {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
    Pass::new(|text| {
        RE.replace_all(text, |caps: &Captures| caps[0].trim_matches('`').to_string())
            .into_owned()
    })
}

/// Unwrap `*`/`_` runs (1-3 long) around a non-empty span, keeping the span.
pub(crate) fn strip_emphasis(text: &str) -> String {
    static STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*{1,3}([^*]+?)\*{1,3}").unwrap());
    static UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{1,3}([^_]+?)_{1,3}").unwrap());

    let unstarred = unwrap_until_stable(&STAR, text);
    unwrap_until_stable(&UNDERSCORE, &unstarred)
}

// Unwrapping `****a****` exposes `*a*`, so repeat until nothing matches.
// Every replacement shortens the text, which bounds the loop.
fn unwrap_until_stable(re: &Regex, text: &str) -> String {
    let mut current = text.to_string();
    while re.is_match(&current) {
        current = re.replace_all(&current, "${1}").into_owned();
    }
    current
}

pub(crate) fn strip_headings(text: &str) -> String {
    static RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?m)^[^\S\n]*(?:#{1,6}[^\S\n]*)+").unwrap());
    RE.replace_all(text, "").into_owned()
}

pub(crate) fn normalize_bullets(text: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[^\S\n]*[-*][^\S\n]+").unwrap());
    RE.replace_all(text, "- ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::Passes;

    fn markdown(text: &str) -> String {
        let mut passes = Passes::new();
        for (key, pass) in markdown_passes() {
            passes.add(key, pass);
        }
        passes.apply(text)
    }

    #[test]
    fn test_code_fence_keeps_content() {
        assert_eq!(markdown("```x=1```"), "x=1");
        assert_eq!(markdown("before ```let a = 1;``` after"), "before let a = 1; after");
    }

    #[test]
    fn test_multiline_fence() {
        assert_eq!(markdown("```\nline one\nline two\n```"), "\nline one\nline two\n");
    }

    #[test]
    fn test_stray_backticks_removed() {
        assert_eq!(markdown("use `cargo` here"), "use cargo here");
        assert_eq!(markdown("unclosed ``` fence"), "unclosed  fence");
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(strip_emphasis("**bold** and _em_"), "bold and em");
        assert_eq!(strip_emphasis("***both***"), "both");
        assert_eq!(strip_emphasis("__strong__ text"), "strong text");
    }

    #[test]
    fn test_nested_emphasis_fully_unwrapped() {
        assert_eq!(strip_emphasis("****a****"), "a");
        assert_eq!(strip_emphasis("*_mixed_*"), "mixed");
    }

    #[test]
    fn test_unbalanced_markers_survive() {
        assert_eq!(strip_emphasis("2 * 3 = 6"), "2 * 3 = 6");
        assert_eq!(strip_emphasis("**"), "**");
        assert_eq!(strip_emphasis(""), "");
    }

    #[test]
    fn test_headings() {
        assert_eq!(strip_headings("# Title\n## Sub\ntext"), "Title\nSub\ntext");
        assert_eq!(strip_headings("  ### Indented"), "Indented");
        assert_eq!(strip_headings("## # Double"), "Double");
        assert_eq!(strip_headings("a # not heading"), "a # not heading");
    }

    #[test]
    fn test_bullets() {
        assert_eq!(normalize_bullets("-   one\n*\ttwo"), "- one\n- two");
        assert_eq!(normalize_bullets("  - indented"), "- indented");
        assert_eq!(normalize_bullets("-dash"), "-dash");
    }

    #[test]
    fn test_star_bullets_pair_up_as_emphasis() {
        // Two `*` bullets form an emphasis pair before bullet normalization runs.
        assert_eq!(markdown("* one\n* two"), " one\n two");
    }
}
