//! Rich text tokenizer
//!
//! Splits one line of inline Markdown into [`RichTextSpan`]s. Recognised markers:
//!
//! | Markdown       | Span                          |
//! |----------------|-------------------------------|
//! | `[label](url)` | `text = label`, `link = url`  |
//! | `**text**`     | `bold`                        |
//! | `` `text` ``   | `code`                        |
//!
//! The scan is leftmost first and matches never overlap: once a marker pair
//! is matched its content is emitted as is, without looking for further
//! markers inside it. A marker without its closing half is kept as literal
//! text. Pairs with empty content (`****`, ` `` `, `[](url)`) produce no span.
//!
//! Adjacent plain text is merged, so a line without markers always yields a
//! single span holding the whole line.

use crate::blocks::RichTextSpan;

const BOLD: &str = "**";
const CODE: char = '`';
const LINK_OPEN: char = '[';

/// Tokenize one line of inline Markdown.
///
/// Returns an empty vector for an empty line.
pub fn tokenize(line: &str) -> Vec<RichTextSpan> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = line;

    while !rest.is_empty() {
        if let Some((span, consumed)) = match_marker(rest) {
            if !span.text.is_empty() {
                flush_plain(&mut plain, &mut spans);
                spans.push(span);
            }
            rest = &rest[consumed..];
            continue;
        }

        // Not a complete marker here. Keep at least one character as literal
        // text so an unterminated marker cannot stall the scan.
        let skip = if starts_marker(rest) {
            rest.chars().next().map(char::len_utf8).unwrap_or(1)
        } else {
            0
        };
        let end = next_marker_start(&rest[skip..])
            .map(|pos| pos + skip)
            .unwrap_or(rest.len());
        plain.push_str(&rest[..end]);
        rest = &rest[end..];
    }

    flush_plain(&mut plain, &mut spans);
    spans
}

fn flush_plain(plain: &mut String, spans: &mut Vec<RichTextSpan>) {
    if !plain.is_empty() {
        spans.push(RichTextSpan::plain(std::mem::take(plain)));
    }
}

/// Try every marker at the start of `text`. Returns the span and the number
/// of bytes it consumed.
fn match_marker(text: &str) -> Option<(RichTextSpan, usize)> {
    match_link(text)
        .or_else(|| match_bold(text))
        .or_else(|| match_code(text))
}

fn match_link(text: &str) -> Option<(RichTextSpan, usize)> {
    let inner = text.strip_prefix(LINK_OPEN)?;
    let close_bracket = inner.find(']')?;
    let after = inner[close_bracket + 1..].strip_prefix('(')?;
    let close_paren = after.find(')')?;

    let label = &inner[..close_bracket];
    if label.contains(LINK_OPEN) {
        // `[ a [b](c)`: the link starts at the inner bracket.
        return None;
    }
    let url = &after[..close_paren];
    // '[' + label + "](" + url + ')'
    let consumed = 1 + close_bracket + 2 + close_paren + 1;
    Some((RichTextSpan::link(label, url), consumed))
}

fn match_bold(text: &str) -> Option<(RichTextSpan, usize)> {
    let inner = text.strip_prefix(BOLD)?;
    let close = inner.find(BOLD)?;
    let consumed = BOLD.len() + close + BOLD.len();
    Some((RichTextSpan::bold(&inner[..close]), consumed))
}

fn match_code(text: &str) -> Option<(RichTextSpan, usize)> {
    let inner = text.strip_prefix(CODE)?;
    let close = inner.find(CODE)?;
    let consumed = 1 + close + 1;
    Some((RichTextSpan::code(&inner[..close]), consumed))
}

fn starts_marker(text: &str) -> bool {
    text.starts_with(BOLD) || text.starts_with(CODE) || text.starts_with(LINK_OPEN)
}

/// Byte offset of the earliest position where a marker could open.
fn next_marker_start(text: &str) -> Option<usize> {
    [text.find(BOLD), text.find(CODE), text.find(LINK_OPEN)]
        .into_iter()
        .flatten()
        .min()
}
