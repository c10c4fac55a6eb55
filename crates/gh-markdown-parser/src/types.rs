//! Type definitions for the markdown syntax tree

use serde::{Deserialize, Serialize};

/// A block-level element of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// ATX heading: `## Title`
    Heading {
        /// Heading level (1-6)
        level: u8,
        children: Vec<Inline>,
    },

    /// Run of text lines
    Paragraph { children: Vec<Inline> },

    /// Quoted content: `> text`
    Blockquote { children: Vec<Block> },

    /// Fenced code block
    CodeBlock {
        /// Language tag after the opening fence
        language: Option<String>,
        /// Verbatim code, lines joined with `\n`
        code: String,
    },

    /// Bulleted list: `- item`
    UnorderedList { items: Vec<ListItem> },

    /// Numbered list: `1. item`
    OrderedList {
        /// Number of the first item
        start: u64,
        items: Vec<ListItem>,
    },

    /// Pipe table
    Table {
        headers: Vec<TableCell>,
        /// One alignment per separator column
        alignments: Vec<TableAlignment>,
        rows: Vec<Vec<TableCell>>,
    },

    /// Thematic break: `---`
    HorizontalRule,

    /// Collapsible `<details>` section
    Details {
        summary: Vec<Inline>,
        children: Vec<Block>,
    },
}

/// A single list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Item carries a `[ ]` / `[x]` checkbox
    pub is_task: bool,

    /// Checkbox state (only meaningful if `is_task`)
    pub is_checked: bool,

    /// Item content, in practice a single paragraph
    pub children: Vec<Block>,
}

/// Column alignment from a table separator row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableAlignment {
    Left,
    Center,
    Right,
    #[default]
    None,
}

/// Inline content of one table cell
pub type TableCell = Vec<Inline>;

/// A span-level element inside a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Inline {
    /// Plain text
    Text(String),

    /// `**text**`
    Bold(Vec<Inline>),

    /// `*text*`
    Italic(Vec<Inline>),

    /// `***text***`
    BoldItalic(Vec<Inline>),

    /// `~~text~~`
    Strikethrough(Vec<Inline>),

    /// `` `code` ``, kept verbatim
    Code(String),

    /// `[text](url)`
    Link { children: Vec<Inline>, url: String },

    /// `![alt](url)`
    Image { alt: String, url: String },

    /// Hard line break
    LineBreak,
}

impl Block {
    /// Create a paragraph holding a single text node
    pub fn text_paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            children: vec![Inline::Text(text.into())],
        }
    }

    /// Get the visible text of the block without markup
    ///
    /// Nested blocks are separated by newlines, table cells by tabs.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { children, .. } | Block::Paragraph { children } => {
                inlines_plain_text(children)
            }
            Block::Blockquote { children } => blocks_plain_text(children),
            Block::CodeBlock { code, .. } => code.clone(),
            Block::UnorderedList { items } | Block::OrderedList { items, .. } => items
                .iter()
                .map(|item| blocks_plain_text(&item.children))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Table { headers, rows, .. } => std::iter::once(headers)
                .chain(rows.iter())
                .map(|row| {
                    row.iter()
                        .map(|cell| inlines_plain_text(cell))
                        .collect::<Vec<_>>()
                        .join("\t")
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Block::HorizontalRule => String::new(),
            Block::Details { summary, children } => {
                let summary = inlines_plain_text(summary);
                let body = blocks_plain_text(children);
                if body.is_empty() {
                    summary
                } else {
                    format!("{}\n{}", summary, body)
                }
            }
        }
    }
}

impl Inline {
    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(text.into())
    }

    /// Get the visible text of the span without markup
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(text) | Inline::Code(text) => text.clone(),
            Inline::Bold(children)
            | Inline::Italic(children)
            | Inline::BoldItalic(children)
            | Inline::Strikethrough(children)
            | Inline::Link { children, .. } => inlines_plain_text(children),
            Inline::Image { alt, .. } => alt.clone(),
            Inline::LineBreak => "\n".to_string(),
        }
    }
}

/// Concatenate the visible text of a run of inlines
pub fn inlines_plain_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::plain_text).collect()
}

/// Join the visible text of blocks with newlines, skipping empty ones
pub fn blocks_plain_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::plain_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

impl ListItem {
    /// Create a plain (non-task) item
    pub fn new(children: Vec<Block>) -> Self {
        Self {
            is_task: false,
            is_checked: false,
            children,
        }
    }

    /// Create a task item with the given checkbox state
    pub fn task(checked: bool, children: Vec<Block>) -> Self {
        Self {
            is_task: true,
            is_checked: checked,
            children,
        }
    }
}
