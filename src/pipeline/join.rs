//! Page joining: repair hyphenation and line-wrapped sentences.
//!
//! PDF extractors emit text in layout order, one line per visual line, with
//! words hyphen-split at the right margin. Joining is the first repair pass:
//! a page goes in as broken lines and comes out as running prose, so every
//! later stage can assume sentences are whole.

use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing hyphen immediately followed by a line break: the word was split
/// at the margin. Both are deleted, merging the halves.
static RE_HYPHEN_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"-\r?\n").unwrap());

/// Join one page of raw extracted text into running prose.
///
/// Consecutive non-blank lines accumulate into a buffer; the buffer flushes
/// whenever a line ends in `.`, `!`, or `?` (a complete sentence boundary),
/// and once more at end of page even without terminal punctuation, so a
/// paragraph cut off by the page break is not lost.
///
/// A page with no text contributes nothing.
pub fn join_page(raw: &str) -> String {
    let dehyphenated = RE_HYPHEN_BREAK.replace_all(raw, "");

    let mut flushed: Vec<String> = Vec::new();
    let mut buffer = String::new();

    for line in dehyphenated.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(line);

        if line.ends_with('.') || line.ends_with('!') || line.ends_with('?') {
            flushed.push(std::mem::take(&mut buffer));
        }
    }

    if !buffer.is_empty() {
        flushed.push(buffer);
    }

    flushed.join(" ")
}

/// Join every page and concatenate them (space-separated) into one
/// document string.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parts: Vec<String> = Vec::new();
    for page in pages {
        let joined = join_page(page.as_ref());
        if !joined.is_empty() {
            parts.push(joined);
        }
    }
    parts.join(" ")
}
