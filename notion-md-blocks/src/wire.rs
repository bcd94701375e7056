//! Notion JSON mapping
//!
//! Turns [`Block`]s into the block objects accepted by
//! `PATCH /v1/blocks/{id}/children`.
//!
//! | Block            | `type`               | Payload                                  |
//! |------------------|----------------------|------------------------------------------|
//! | Heading2         | `heading_2`          | `rich_text`                              |
//! | Heading3         | `heading_3`          | `rich_text`                              |
//! | Paragraph        | `paragraph`          | `rich_text`                              |
//! | BulletListItem   | `bulleted_list_item` | `rich_text`                              |
//! | Code             | `code`               | `rich_text` (unformatted), `language`    |
//! | Table            | `table`              | `table_width`, header flags, `children`  |
//! | TableRow         | `table_row`          | `cells`: one rich text array per cell    |
//!
//! Notion rejects text objects whose content exceeds 2000 characters, so
//! longer spans are split into several objects with the same annotations.
//!
//! Every array in a request is also capped at 100 elements. Tables longer
//! than that are split by [`fit_request_limits`]. Rich text arrays are sent
//! as they are: a line that tokenizes into more than 100 text objects is
//! rejected by Notion.

use crate::blocks::{Block, BlockKind, RichTextSpan, TableRow};
use serde_json::{json, Value};

/// Maximum number of characters in a single rich text object.
pub const MAX_TEXT_LENGTH: usize = 2000;

/// Maximum number of elements in any array of a request body.
pub const MAX_ARRAY_LENGTH: usize = 100;

/// Split tables with more than [`MAX_ARRAY_LENGTH`] rows into consecutive
/// tables that each repeat the header row. Other blocks pass through.
pub fn fit_request_limits(blocks: Vec<Block>) -> Vec<Block> {
    blocks
        .into_iter()
        .flat_map(|block| match block {
            Block::Table(table) => table
                .split_rows(MAX_ARRAY_LENGTH)
                .into_iter()
                .map(Block::Table)
                .collect(),
            other => vec![other],
        })
        .collect()
}

/// Serialize a list of blocks to a JSON array suitable for a `children` field.
pub fn blocks_to_json(blocks: &[Block]) -> Value {
    Value::Array(blocks.iter().map(block_to_json).collect())
}

/// Serialize one block.
pub fn block_to_json(block: &Block) -> Value {
    let payload = match block {
        Block::Heading2(spans)
        | Block::Heading3(spans)
        | Block::Paragraph(spans)
        | Block::BulletListItem(spans) => json!({ "rich_text": rich_text_to_json(spans) }),
        Block::Code(code) => json!({
            "rich_text": rich_text_to_json(&[RichTextSpan::plain(code.text.as_str())]),
            "language": code.language,
        }),
        Block::Table(table) => json!({
            "table_width": table.width,
            "has_column_header": true,
            "has_row_header": false,
            "children": table.rows.iter().map(table_row_to_json).collect::<Vec<_>>(),
        }),
    };
    wrap(block.kind(), payload)
}

fn table_row_to_json(row: &TableRow) -> Value {
    let cells: Vec<Value> = row
        .cells
        .iter()
        .map(|cell| rich_text_to_json(cell))
        .collect();
    wrap(row.kind(), json!({ "cells": cells }))
}

fn wrap(kind: BlockKind, payload: Value) -> Value {
    let tag = kind.notion_type();
    let mut object = serde_json::Map::new();
    object.insert("object".into(), Value::from("block"));
    object.insert("type".into(), Value::from(tag));
    object.insert(tag.into(), payload);
    Value::Object(object)
}

/// Serialize spans to a Notion rich text array.
pub fn rich_text_to_json(spans: &[RichTextSpan]) -> Value {
    Value::Array(
        spans
            .iter()
            .flat_map(|span| {
                split_content(&span.text)
                    .into_iter()
                    .map(move |chunk| text_object(chunk, span))
            })
            .collect(),
    )
}

fn text_object(content: &str, span: &RichTextSpan) -> Value {
    let mut text = json!({ "content": content });
    if let Some(url) = &span.link {
        text["link"] = json!({ "url": url });
    }
    json!({
        "type": "text",
        "text": text,
        "annotations": {
            "bold": span.bold,
            "italic": false,
            "strikethrough": false,
            "underline": false,
            "code": span.code,
            "color": "default",
        },
    })
}

/// Split text into chunks of at most [`MAX_TEXT_LENGTH`] characters.
/// Empty text yields one empty chunk.
fn split_content(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while rest.chars().count() > MAX_TEXT_LENGTH {
        let split_at = rest
            .char_indices()
            .nth(MAX_TEXT_LENGTH)
            .map_or(rest.len(), |(index, _)| index);
        let (head, tail) = rest.split_at(split_at);
        chunks.push(head);
        rest = tail;
    }
    chunks.push(rest);
    chunks
}
