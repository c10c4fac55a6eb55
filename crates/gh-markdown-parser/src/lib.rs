//! GitHub Markdown Parser
//!
//! A library for parsing the GitHub-flavored markdown found in pull request
//! descriptions and review comments into a block/inline syntax tree.
//!
//! Supported blocks: ATX headings, fenced code, blockquotes, bullet, numbered
//! and task lists, pipe tables, horizontal rules and `<details>` sections.
//! Supported inlines: bold, italic, bold-italic, strikethrough, code spans,
//! links, images and hard line breaks.
//!
//! # Example
//!
//! ```
//! use gh_markdown_parser::{parse, Block, Inline};
//!
//! let blocks = parse("# Release notes\n\n- [x] **Done**");
//! assert_eq!(blocks.len(), 2);
//!
//! if let Block::Heading { level, children } = &blocks[0] {
//!     assert_eq!(*level, 1);
//!     assert_eq!(children, &vec![Inline::Text("Release notes".to_string())]);
//! }
//! ```

mod block;
mod inline;
mod options;
mod types;

pub use block::MarkdownParser;
pub use options::MarkdownOptions;
pub use types::*;

/// Parse a document with default options
pub fn parse(text: &str) -> Vec<Block> {
    MarkdownParser::default().parse(text)
}

/// Parse a single run of text into inline nodes with default options
pub fn parse_inline(text: &str) -> Vec<Inline> {
    MarkdownParser::default().parse_inline(text)
}
