//! Sentence segmentation over whitespace-normalized document text.
//!
//! The boundary rule is deliberately simple: a zero-width split immediately
//! after `.`, `!`, or `?` when followed by whitespace. Abbreviation periods
//! ("Dr.", "e.g.") do split here — the normalizer expands those into spoken
//! forms later, and a conservative over-split costs less than a run-on
//! sentence fed to the classifier.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse all whitespace runs to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Lazy iterator over sentence-like units of `text`, in document order.
///
/// Yields borrowed slices; empty candidates are dropped. The iterator is
/// finite and restartable — calling [`sentences`] again walks the same
/// document from the start.
pub fn sentences(text: &str) -> Sentences<'_> {
    Sentences { rest: text.trim() }
}

/// See [`sentences`].
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if self.rest.is_empty() {
                return None;
            }

            // Scan for terminal punctuation followed by whitespace. Indexing
            // bytes is safe: both the punctuation and the whitespace that
            // triggers the split are ASCII, so the split point is always a
            // UTF-8 boundary.
            let bytes = self.rest.as_bytes();
            let mut split_at = None;
            for i in 0..bytes.len().saturating_sub(1) {
                if matches!(bytes[i], b'.' | b'!' | b'?') && bytes[i + 1].is_ascii_whitespace() {
                    split_at = Some(i + 1);
                    break;
                }
            }

            match split_at {
                Some(pos) => {
                    let (head, tail) = self.rest.split_at(pos);
                    self.rest = tail.trim_start();
                    let head = head.trim();
                    if !head.is_empty() {
                        return Some(head);
                    }
                }
                None => {
                    // Final sentence: runs to end of text, with or without
                    // terminal punctuation.
                    let last = self.rest.trim();
                    self.rest = "";
                    if !last.is_empty() {
                        return Some(last);
                    }
                    return None;
                }
            }
        }
    }
}
