//! Excerpts around the first match and literal, case-insensitive highlighting.
//!
//! All lengths are in characters, never bytes, so any UTF-8 input is safe to cut.
//! Matches are found with [`fold_case`], the same folding the search filter uses.

use std::ops::Range;

use crate::query::fold_case;

pub const DEFAULT_MAX_LENGTH: usize = 150;
pub const ELLIPSIS: &str = "...";

/// Characters of context kept on each side of the first match.
const CONTEXT_CHARS: usize = 60;

/// Byte ranges in `text` of every non-overlapping case-insensitive occurrence of `term`.
/// A match that starts or ends inside a character's lowercase expansion covers that whole character.
fn match_ranges(text: &str, term: &str) -> Vec<Range<usize>> {
    let needle = fold_case(term);
    if needle.is_empty() { return Vec::new(); }

    // origin[i] is the byte offset in `text` of the character that produced folded byte i.
    let mut folded = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        for lc in c.to_lowercase() {
            folded.push(lc);
            origin.extend(std::iter::repeat(i).take(lc.len_utf8()));
        }
    }

    let mut ranges: Vec<Range<usize>> = Vec::new();
    for (at, _) in folded.match_indices(needle.as_str()) {
        let start = origin[at];
        let last = origin[at + needle.len() - 1];
        let end = last + text[last..].chars().next().map_or(0, char::len_utf8);
        if ranges.last().is_some_and(|r| start < r.end) { continue; }
        ranges.push(start..end);
    }
    ranges
}

/// Excerpt of `content` around the first occurrence of `term`.
///
/// Without a match this is the first `max_length` characters (plus an ellipsis when cut).
/// With a match the window is widened to whole words and marked with an ellipsis on any
/// side that does not reach the end of the content.
pub fn snippet(content: &str, term: &str, max_length: usize) -> String {
    if content.is_empty() { return String::new(); }
    let Some(m) = match_ranges(content, term).into_iter().next() else {
        return head(content, max_length);
    };

    let mut start = chars_back(content, m.start, CONTEXT_CHARS);
    let mut end = chars_forward(content, m.end, CONTEXT_CHARS);

    if start > 0 {
        // The search for a space includes the character at `start` itself.
        let upto = content[start..].chars().next().map_or(start, |c| start + c.len_utf8());
        start = content[..upto].rfind(' ').map_or(0, |p| p + 1);
    }
    if end < content.len() {
        end = content[end..].find(' ').map_or(content.len(), |p| end + p);
    }

    let mut out = String::with_capacity(end - start + 2 * ELLIPSIS.len());
    if start > 0 { out.push_str(ELLIPSIS); }
    out.push_str(&content[start..end]);
    if end < content.len() { out.push_str(ELLIPSIS); }
    out
}

fn head(content: &str, max_length: usize) -> String {
    match content.char_indices().nth(max_length) {
        Some((cut, _)) => format!("{}{}", &content[..cut], ELLIPSIS),
        None => content.to_string(),
    }
}

fn chars_back(s: &str, idx: usize, n: usize) -> usize {
    s[..idx].char_indices().rev().take(n).last().map_or(idx, |(i, _)| i)
}

fn chars_forward(s: &str, idx: usize, n: usize) -> usize {
    s[idx..].char_indices().nth(n).map_or(s.len(), |(i, _)| idx + i)
}

/// Markers placed around each highlighted occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighter {
    pub open: String,
    pub close: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(r#"<span class="site-search-highlight">"#, "</span>")
    }
}

impl Highlighter {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self { open: open.into(), close: close.into() }
    }

    /// Bold/reverse video for terminals.
    pub fn ansi() -> Self { Self::new("\x1b[1;7m", "\x1b[0m") }

    /// Wrap every case-insensitive occurrence of `term`, treated literally, keeping the text's own casing.
    pub fn highlight(&self, text: &str, term: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for r in match_ranges(text, term) {
            out.push_str(&text[last..r.start]);
            out.push_str(&self.open);
            out.push_str(&text[r.clone()]);
            out.push_str(&self.close);
            last = r.end;
        }
        out.push_str(&text[last..]);
        out
    }
}

/// Highlight with the default HTML span marker.
pub fn highlight(text: &str, term: &str) -> String {
    Highlighter::default().highlight(text, term)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_words(n: usize) -> String {
        (0..n).map(|i| format!("word{:02}", i)).collect::<Vec<_>>().join(" ")
    }

    fn inner(s: &str) -> &str {
        let s = s.strip_prefix(ELLIPSIS).unwrap_or(s);
        s.strip_suffix(ELLIPSIS).unwrap_or(s)
    }

    #[test]
    fn short_content_without_match_is_returned_whole() {
        assert_eq!(snippet("Short text", "zzz", 150), "Short text");
        assert_eq!(snippet("", "zzz", 150), "");
    }

    #[test]
    fn long_content_without_match_is_a_prefix() {
        let content = "a".repeat(200);
        let s = snippet(&content, "zzz", 150);
        assert_eq!(s.len(), 153);
        assert!(s.ends_with(ELLIPSIS));
        assert!(content.starts_with(inner(&s)));
    }

    #[test]
    fn window_snaps_to_word_boundaries() {
        let content = numbered_words(60);
        let s = snippet(&content, "word30", DEFAULT_MAX_LENGTH);
        assert!(s.starts_with("...word21 "), "{}", s);
        assert!(s.ends_with(" word39..."), "{}", s);
        assert!(inner(&s).split(' ').all(|w| w.len() == 6 && w.starts_with("word")));
    }

    #[test]
    fn never_splits_a_word_at_either_edge() {
        let content = numbered_words(80);
        for i in (0..80).step_by(7) {
            let term = format!("word{:02}", i);
            let s = snippet(&content, &term, DEFAULT_MAX_LENGTH);
            let body = inner(&s);
            let at = content.find(body).expect("snippet body is a slice of the content");
            let end = at + body.len();
            assert!(at == 0 || content.as_bytes()[at - 1] == b' ', "split at start: {}", s);
            assert!(end == content.len() || content.as_bytes()[end] == b' ', "split at end: {}", s);
            assert_eq!(s.starts_with(ELLIPSIS), at > 0);
            assert_eq!(s.ends_with(ELLIPSIS), end < content.len());
        }
    }

    #[test]
    fn match_near_start_has_no_leading_ellipsis() {
        let content = numbered_words(40);
        let s = snippet(&content, "WORD01", DEFAULT_MAX_LENGTH);
        assert!(s.starts_with("word00 "));
        assert!(s.ends_with(ELLIPSIS));
    }

    #[test]
    fn unbroken_text_widens_to_content_edges() {
        let content = "x".repeat(300) + "needle" + &"y".repeat(300);
        assert_eq!(snippet(&content, "needle", DEFAULT_MAX_LENGTH), content);
    }

    #[test]
    fn multibyte_content_is_cut_on_char_boundaries() {
        let content = "écrire ".repeat(30) + "café crème " + &"naïve ".repeat(30);
        let s = snippet(&content, "CAFÉ", DEFAULT_MAX_LENGTH);
        assert!(s.contains("café"));
        let head = snippet(&"日本語".repeat(100), "none", 10);
        assert_eq!(head.chars().count(), 10 + ELLIPSIS.len());
    }

    #[test]
    fn highlights_every_occurrence_keeping_case() {
        assert_eq!(
            Highlighter::new("[", "]").highlight("Rust and rust and RUST", "rust"),
            "[Rust] and [rust] and [RUST]"
        );
    }

    #[test]
    fn highlight_treats_term_literally() {
        let h = Highlighter::new("<", ">");
        assert_eq!(h.highlight("a.b*c and aXbbc", "a.b*c"), "<a.b*c> and aXbbc");
        assert_eq!(h.highlight("cost (usd) $5", "(usd) $"), "cost <(usd) $>5");
    }

    #[test]
    fn highlight_empty_inputs_are_unchanged() {
        assert_eq!(highlight("text", ""), "text");
        assert_eq!(highlight("", "term"), "");
    }

    #[test]
    fn default_marker_is_html_span() {
        assert_eq!(highlight("Our team", "team"), r#"Our <span class="site-search-highlight">team</span>"#);
    }

    #[test]
    fn highlight_and_snippet_agree_with_the_filter() {
        let h = Highlighter::new("[", "]");
        assert_eq!(h.highlight("İstanbul guide", "İSTANBUL"), "[İstanbul] guide");
        assert_eq!(h.highlight("visit İstanbul", "i̇stanbul"), "visit [İstanbul]");

        let content = "filler ".repeat(40) + "İstanbul guide " + &"more ".repeat(40);
        let s = snippet(&content, "İSTANBUL", DEFAULT_MAX_LENGTH);
        assert!(s.starts_with(ELLIPSIS) && s.contains("İstanbul guide"), "{}", s);
    }
}
