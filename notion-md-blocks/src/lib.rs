//! Markdown to Notion block conversion
//!
//!     This crate turns Markdown documents into Notion's block representation and uploads
//!     them through the Notion REST API. It is a one way batch uploader: nothing is read back
//!     from the remote page and nothing is diffed.
//!
//! Architecture
//!
//!     The conversion core is two pure functions with no I/O:
//!         - [`inline::tokenize`]: one line of inline Markdown into rich text spans.
//!         - [`converter::convert`]: a whole document into an ordered list of blocks.
//!
//!     Everything that talks to the network sits on top of the block model and never reaches
//!     back into the parser:
//!         - [`wire`] maps blocks onto the JSON objects the Notion API accepts.
//!         - [`api`] holds the HTTP client and the destination resolvers.
//!         - [`publish`] ties it together: resolve a parent, create a page, append blocks.
//!
//!     This is a pure lib, that is, it powers the notion-md-sync binary but is shell agnostic:
//!     no code here reads env vars or prints to stdout. Credentials come in as plain strings.
//!
//!     The file structure :
//!     .
//!     ├── blocks.rs               # Block / RichTextSpan model
//!     ├── inline.rs               # Rich text tokenizer
//!     ├── converter.rs            # Line grouping and block classification
//!     ├── table.rs                # Pipe table rows and separator detection
//!     ├── wire.rs                 # Notion JSON mapping
//!     ├── api
//!     │   ├── mod.rs              # NotionClient
//!     │   └── resolve.rs          # DestinationResolver implementations
//!     ├── publish.rs              # Page creation and chunked upload
//!     └── error.rs
//!
//! Testing
//!     tests
//!     ├── convert                 # converter and tokenizer behaviour
//!     └── api                     # client and publisher against a mock server
//!
//!     Rust does not discover tests in subdirectories by default, so tests/lib.rs includes
//!     them as modules.
//!
//! Supported Markdown
//!
//!     Only a subset is recognised, on purpose:
//!
//!     | Markdown            | Block                | Notes                                  |
//!     |---------------------|----------------------|----------------------------------------|
//!     | `# ` / `## `        | Heading2             | Notion has no level 1 in page bodies   |
//!     | `### `              | Heading3             |                                        |
//!     | ```` ```lang ````   | Code                 | Content kept verbatim                  |
//!     | `\| a \| b \|`      | Table                | Separator row dropped                  |
//!     | `- ` / `* `         | BulletListItem       |                                        |
//!     | `1. `               | BulletListItem       | Numbering is discarded                 |
//!     | anything else       | Paragraph            | Blank lines only separate              |
//!
//!     Inline: `**bold**`, `` `code` `` and `[label](url)`. Markers do not nest.

pub mod api;
pub mod blocks;
pub mod converter;
pub mod error;
pub mod inline;
pub mod publish;
pub mod table;
pub mod wire;

pub use blocks::{Block, BlockKind, CodeBlock, RichTextSpan, Table, TableRow};
pub use converter::{convert, convert_with_options, ConvertOptions, DEFAULT_CODE_LANGUAGE};
pub use error::{ApiError, SyncError};
pub use inline::tokenize;
