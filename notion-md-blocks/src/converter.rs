//! Block converter (Markdown → blocks)
//!
//! Walks the document line by line. Each line is classified by its leading
//! syntax; fences and tables swallow the following lines that belong to them.
//!
//! Pipeline: Markdown string → lines → line groups → [`Block`]s
//!
//! The converter never fails. Malformed input degrades:
//! - an unclosed fence runs to the end of the document,
//! - a pipe line without a separator row is a paragraph,
//! - ragged table rows are padded or truncated (see [`crate::table`]).

use crate::blocks::{Block, CodeBlock};
use crate::inline::tokenize;
use crate::table::{is_separator_row, is_table_line, parse_table};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Language used for fences without an info string.
pub const DEFAULT_CODE_LANGUAGE: &str = "plain text";

const FENCE: &str = "```";

static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s").expect("ordered list pattern is valid"));

/// Knobs for [`convert_with_options`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Language assigned to fences that do not name one.
    pub default_language: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_CODE_LANGUAGE.to_string(),
        }
    }
}

/// Convert a Markdown document with default options.
pub fn convert(source: &str) -> Vec<Block> {
    convert_with_options(source, &ConvertOptions::default())
}

/// Convert a Markdown document into blocks, in document order.
pub fn convert_with_options(source: &str, options: &ConvertOptions) -> Vec<Block> {
    let lines: Vec<&str> = source.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(info) = line.strip_prefix(FENCE) {
            let (block, next) = read_fence(&lines, i + 1, info, options);
            blocks.push(block);
            i = next;
            continue;
        }

        if is_table_line(line) && lines.get(i + 1).is_some_and(|l| is_separator_row(l)) {
            let end = lines[i..]
                .iter()
                .position(|l| !is_table_line(l))
                .map_or(lines.len(), |offset| i + offset);
            trace!(start = i, end, "table run");
            blocks.push(Block::Table(parse_table(&lines[i..end])));
            i = end;
            continue;
        }

        if let Some(block) = classify_line(line) {
            blocks.push(block);
        }
        i += 1;
    }

    blocks
}

/// Collect fence content starting at `start`. Returns the block and the index
/// of the first line after the closing fence.
fn read_fence(
    lines: &[&str],
    start: usize,
    info: &str,
    options: &ConvertOptions,
) -> (Block, usize) {
    let language = match info.trim() {
        "" => options.default_language.clone(),
        lang => lang.to_string(),
    };

    let close = lines[start..]
        .iter()
        .position(|l| l.starts_with(FENCE))
        .map(|offset| start + offset);
    let end = close.unwrap_or(lines.len());
    if close.is_none() {
        trace!(start, "unclosed fence, closing at end of document");
    }

    let block = Block::Code(CodeBlock {
        language,
        text: lines[start..end].join("\n"),
    });
    // Skip the closing fence when there is one.
    (block, close.map_or(end, |c| c + 1))
}

/// Classify a single line that is not part of a fence or table.
fn classify_line(line: &str) -> Option<Block> {
    if line.trim().is_empty() {
        return None;
    }

    let block = if let Some(text) = line.strip_prefix("### ") {
        Block::Heading3(tokenize(text))
    } else if let Some(text) = line.strip_prefix("## ") {
        Block::Heading2(tokenize(text))
    } else if let Some(text) = line.strip_prefix("# ") {
        Block::Heading2(tokenize(text))
    } else if let Some(text) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
    {
        Block::BulletListItem(tokenize(text))
    } else if let Some(marker) = ORDERED_ITEM.find(line) {
        Block::BulletListItem(tokenize(&line[marker.end()..]))
    } else {
        Block::Paragraph(tokenize(line))
    };
    Some(block)
}
