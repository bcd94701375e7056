//! Core data structures for converted documents.
//!
//! A converted document is a flat `Vec<Block>`. Tables are the only block
//! with children; every other variant carries its rich text directly.

/// One structural unit of a Notion page.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading2(Vec<RichTextSpan>),
    Heading3(Vec<RichTextSpan>),
    Paragraph(Vec<RichTextSpan>),
    BulletListItem(Vec<RichTextSpan>),
    Code(CodeBlock),
    Table(Table),
}

/// Discriminant of a block, including the table row kind that only appears
/// nested inside a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading2,
    Heading3,
    Paragraph,
    BulletListItem,
    CodeBlock,
    Table,
    TableRow,
}

impl BlockKind {
    /// The `type` tag Notion uses for this kind.
    pub fn notion_type(self) -> &'static str {
        match self {
            BlockKind::Heading2 => "heading_2",
            BlockKind::Heading3 => "heading_3",
            BlockKind::Paragraph => "paragraph",
            BlockKind::BulletListItem => "bulleted_list_item",
            BlockKind::CodeBlock => "code",
            BlockKind::Table => "table",
            BlockKind::TableRow => "table_row",
        }
    }
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading2(_) => BlockKind::Heading2,
            Block::Heading3(_) => BlockKind::Heading3,
            Block::Paragraph(_) => BlockKind::Paragraph,
            Block::BulletListItem(_) => BlockKind::BulletListItem,
            Block::Code(_) => BlockKind::CodeBlock,
            Block::Table(_) => BlockKind::Table,
        }
    }

    /// Rich text of a text-bearing block. `None` for code blocks and tables.
    pub fn rich_text(&self) -> Option<&[RichTextSpan]> {
        match self {
            Block::Heading2(spans)
            | Block::Heading3(spans)
            | Block::Paragraph(spans)
            | Block::BulletListItem(spans) => Some(spans),
            Block::Code(_) | Block::Table(_) => None,
        }
    }

    /// Concatenated span text, mostly useful in tests and logs.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Code(code) => code.text.clone(),
            Block::Table(table) => table
                .rows
                .iter()
                .map(TableRow::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            other => other
                .rich_text()
                .map(spans_text)
                .unwrap_or_default(),
        }
    }
}

/// A fenced code block. The text is never tokenized.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub language: String,
    pub text: String,
}

/// A table whose rows all hold exactly `width` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub width: usize,
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Split into consecutive tables of at most `max_rows` rows each. Every
    /// piece starts with a copy of the header row.
    pub fn split_rows(self, max_rows: usize) -> Vec<Table> {
        if self.rows.len() <= max_rows {
            return vec![self];
        }
        let width = self.width;
        let mut rows = self.rows.into_iter();
        let Some(header) = rows.next() else {
            return Vec::new();
        };
        let body: Vec<TableRow> = rows.collect();
        body.chunks(max_rows.saturating_sub(1).max(1))
            .map(|chunk| {
                let mut piece = Vec::with_capacity(chunk.len() + 1);
                piece.push(header.clone());
                piece.extend_from_slice(chunk);
                Table { width, rows: piece }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<Vec<RichTextSpan>>,
}

impl TableRow {
    pub fn kind(&self) -> BlockKind {
        BlockKind::TableRow
    }

    /// Cell texts joined with ` | `.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|cell| spans_text(cell))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// A run of inline text sharing the same annotations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichTextSpan {
    pub text: String,
    pub bold: bool,
    pub code: bool,
    pub link: Option<String>,
}

impl RichTextSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            ..Self::default()
        }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            code: true,
            ..Self::default()
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(url.into()),
            ..Self::default()
        }
    }

    /// True when the span carries no annotation at all.
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.code && self.link.is_none()
    }
}

/// Concatenate the text of a span sequence.
pub fn spans_text(spans: &[RichTextSpan]) -> String {
    spans.iter().map(|span| span.text.as_str()).collect()
}
