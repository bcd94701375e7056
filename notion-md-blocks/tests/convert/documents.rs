use notion_md_blocks::{convert, Block, BlockKind, CodeBlock, RichTextSpan, Table, TableRow};

fn plain(text: &str) -> Vec<RichTextSpan> {
    vec![RichTextSpan::plain(text)]
}

fn row(cells: &[&str]) -> TableRow {
    TableRow {
        cells: cells.iter().map(|cell| plain(cell)).collect(),
    }
}

#[test]
fn h1_is_downgraded_to_heading_2() {
    assert_eq!(convert("# Title"), vec![Block::Heading2(plain("Title"))]);
}

#[test]
fn table_drops_separator_row() {
    let md = "| A | B |\n|---|---|\n| 1 | 2 |";
    assert_eq!(
        convert(md),
        vec![Block::Table(Table {
            width: 2,
            rows: vec![row(&["A", "B"]), row(&["1", "2"])],
        })]
    );
}

#[test]
fn table_run_ends_at_first_non_pipe_line() {
    let blocks = convert("| A |\n|---|\n| 1 |\nafter");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].kind(), BlockKind::Table);
    assert_eq!(blocks[1], Block::Paragraph(plain("after")));
}

#[test]
fn pipe_line_without_separator_is_a_paragraph() {
    assert_eq!(
        convert("| not | a table |\n| still | not |"),
        vec![
            Block::Paragraph(plain("| not | a table |")),
            Block::Paragraph(plain("| still | not |")),
        ]
    );
}

#[test]
fn ragged_table_rows_follow_header_width() {
    let blocks = convert("| A | B |\n|---|---|\n| 1 |\n| 1 | 2 | 3 |");
    let Block::Table(table) = &blocks[0] else {
        panic!("expected table, got {:?}", blocks[0]);
    };
    assert_eq!(table.width, 2);
    assert!(table.rows.iter().all(|r| r.cells.len() == 2));
    assert_eq!(table.rows[1].plain_text(), "1 | ");
    assert_eq!(table.rows[2].plain_text(), "1 | 2");
}

#[test]
fn code_fence_is_captured_verbatim() {
    assert_eq!(
        convert("```python\nx=1\n```"),
        vec![Block::Code(CodeBlock {
            language: "python".into(),
            text: "x=1".into(),
        })]
    );
}

#[test]
fn code_fence_keeps_blank_lines_and_markdown() {
    let md = "```md\n# not a heading\n\n- **not** a list\n```\nafter";
    let blocks = convert(md);
    assert_eq!(
        blocks[0],
        Block::Code(CodeBlock {
            language: "md".into(),
            text: "# not a heading\n\n- **not** a list".into(),
        })
    );
    assert_eq!(blocks[1], Block::Paragraph(plain("after")));
}

#[test]
fn unclosed_fence_runs_to_end_of_document() {
    assert_eq!(
        convert("intro\n```rust\nfn main() {}\n\n// trailing"),
        vec![
            Block::Paragraph(plain("intro")),
            Block::Code(CodeBlock {
                language: "rust".into(),
                text: "fn main() {}\n\n// trailing".into(),
            }),
        ]
    );
}

#[test]
fn fence_language_is_trimmed() {
    match &convert("```  bash  \necho hi\n```")[0] {
        Block::Code(code) => assert_eq!(code.language, "bash"),
        other => panic!("expected code block, got {other:?}"),
    }
}

#[test]
fn ordered_list_is_flattened() {
    assert_eq!(
        convert("1. first\n2. second"),
        vec![
            Block::BulletListItem(plain("first")),
            Block::BulletListItem(plain("second")),
        ]
    );
}

#[test]
fn multi_digit_ordinals() {
    assert_eq!(
        convert("10. tenth\n123.\tlast"),
        vec![
            Block::BulletListItem(plain("tenth")),
            Block::BulletListItem(plain("last")),
        ]
    );
}

#[test]
fn both_bullet_markers() {
    assert_eq!(
        convert("- dash\n* star\n*not a bullet*"),
        vec![
            Block::BulletListItem(plain("dash")),
            Block::BulletListItem(plain("star")),
            Block::Paragraph(plain("*not a bullet*")),
        ]
    );
}

#[test]
fn blank_lines_only_separate() {
    let blocks = convert("one\n\n\ntwo\n   \nthree");
    assert_eq!(
        blocks,
        vec![
            Block::Paragraph(plain("one")),
            Block::Paragraph(plain("two")),
            Block::Paragraph(plain("three")),
        ]
    );
}

#[test]
fn mixed_document_keeps_order() {
    let md = "\
# Guide

Intro with **bold**.

## Setup

- install `tool`
- run [docs](https://example.com)

```sh
tool run
```

| Key | Value |
|-----|-------|
| a   | 1     |

### Notes
Done.
";
    let kinds: Vec<BlockKind> = convert(md).iter().map(Block::kind).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::Heading2,
            BlockKind::Paragraph,
            BlockKind::Heading2,
            BlockKind::BulletListItem,
            BlockKind::BulletListItem,
            BlockKind::CodeBlock,
            BlockKind::Table,
            BlockKind::Heading3,
            BlockKind::Paragraph,
        ]
    );
}

#[test]
fn heading_text_is_tokenized() {
    assert_eq!(
        convert("## Use `cargo`"),
        vec![Block::Heading2(vec![
            RichTextSpan::plain("Use "),
            RichTextSpan::code("cargo"),
        ])]
    );
}
