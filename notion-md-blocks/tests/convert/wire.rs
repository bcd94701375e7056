use insta::assert_debug_snapshot;
use notion_md_blocks::convert;
use notion_md_blocks::wire::blocks_to_json;
use serde_json::json;

fn text(content: &str, bold: bool, code: bool) -> serde_json::Value {
    json!({
        "type": "text",
        "text": { "content": content },
        "annotations": {
            "bold": bold,
            "italic": false,
            "strikethrough": false,
            "underline": false,
            "code": code,
            "color": "default",
        },
    })
}

#[test]
fn heading_and_code_model() {
    assert_debug_snapshot!(convert("# Title\n```python\nx=1\n```"), @r#"
    [
        Heading2(
            [
                RichTextSpan {
                    text: "Title",
                    bold: false,
                    code: false,
                    link: None,
                },
            ],
        ),
        Code(
            CodeBlock {
                language: "python",
                text: "x=1",
            },
        ),
    ]
    "#);
}

#[test]
fn document_to_notion_children() {
    let blocks = convert("## Hi **there**\n- `x`\n\n| A | B |\n|---|---|\n| 1 | 2 |");
    let expected = json!([
        {
            "object": "block",
            "type": "heading_2",
            "heading_2": { "rich_text": [text("Hi ", false, false), text("there", true, false)] },
        },
        {
            "object": "block",
            "type": "bulleted_list_item",
            "bulleted_list_item": { "rich_text": [text("x", false, true)] },
        },
        {
            "object": "block",
            "type": "table",
            "table": {
                "table_width": 2,
                "has_column_header": true,
                "has_row_header": false,
                "children": [
                    {
                        "object": "block",
                        "type": "table_row",
                        "table_row": { "cells": [[text("A", false, false)], [text("B", false, false)]] },
                    },
                    {
                        "object": "block",
                        "type": "table_row",
                        "table_row": { "cells": [[text("1", false, false)], [text("2", false, false)]] },
                    },
                ],
            },
        },
    ]);
    assert_eq!(blocks_to_json(&blocks), expected);
}

#[test]
fn code_block_default_language_on_the_wire() {
    let value = blocks_to_json(&convert("```\n**raw**\n```"));
    assert_eq!(
        value[0]["code"],
        json!({
            "rich_text": [text("**raw**", false, false)],
            "language": "plain text",
        })
    );
}
