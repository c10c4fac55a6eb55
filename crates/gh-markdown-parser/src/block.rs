//! Block-level parsing
//!
//! The document is split into physical lines and handed to [`MarkdownParser::next_block`]
//! repeatedly. Each call recognizes at most one block at the head of the
//! remaining lines and reports how many lines it consumed.

use crate::inline::InlineScanner;
use crate::options::MarkdownOptions;
use crate::types::{Block, Inline, ListItem, TableAlignment, TableCell};

/// Markdown parser with configurable limits
///
/// Parsing never fails; malformed or unterminated constructs degrade to
/// paragraphs or literal text.
#[derive(Debug, Clone, Default)]
pub struct MarkdownParser {
    options: MarkdownOptions,
}

impl MarkdownParser {
    /// Create a parser with the given options
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Parse a document into blocks
    pub fn parse(&self, text: &str) -> Vec<Block> {
        let blocks = self.parse_blocks(text, 0);
        log::debug!("Parsed {} top-level markdown blocks", blocks.len());
        blocks
    }

    /// Parse a single run of text into inline nodes
    pub fn parse_inline(&self, text: &str) -> Vec<Inline> {
        InlineScanner::new(&self.options).scan(text)
    }

    fn parse_blocks(&self, text: &str, depth: usize) -> Vec<Block> {
        let lines: Vec<&str> = text.lines().collect();
        let mut blocks = Vec::new();
        let mut pos = 0;

        while pos < lines.len() {
            let (block, consumed) = self.next_block(&lines[pos..], depth);
            blocks.extend(block);
            pos += consumed.max(1);
        }

        blocks
    }

    /// Parse text nested inside a blockquote or details block
    fn parse_nested(&self, text: &str, depth: usize) -> Vec<Block> {
        if depth >= self.options.max_nesting_depth {
            log::trace!("Block nesting limit reached at depth {}", depth);
            return if text.trim().is_empty() {
                Vec::new()
            } else {
                vec![Block::text_paragraph(text)]
            };
        }
        self.parse_blocks(text, depth + 1)
    }

    /// Recognize one block at the head of `lines`
    fn next_block(&self, lines: &[&str], depth: usize) -> (Option<Block>, usize) {
        let trimmed = lines[0].trim();

        if trimmed.is_empty() {
            return (None, 1);
        }
        if is_details_open(trimmed) {
            return self.parse_details(lines, depth);
        }
        if is_horizontal_rule(trimmed) {
            return (Some(Block::HorizontalRule), 1);
        }
        if let Some((level, content)) = heading(trimmed) {
            let children = self.parse_inline(content);
            return (Some(Block::Heading { level, children }), 1);
        }
        if is_fence(trimmed) {
            return parse_code_block(lines);
        }
        if is_table_start(lines) {
            return self.parse_table(lines);
        }
        if is_blockquote(trimmed) {
            return self.parse_blockquote(lines, depth);
        }
        if unordered_item(trimmed).is_some() {
            return self.parse_unordered_list(lines);
        }
        if ordered_item(trimmed).is_some() {
            return self.parse_ordered_list(lines);
        }

        self.parse_paragraph(lines)
    }

    fn parse_paragraph(&self, lines: &[&str]) -> (Option<Block>, usize) {
        let mut text_lines = vec![lines[0].trim_start()];
        let mut consumed = 1;

        while consumed < lines.len() {
            let rest = &lines[consumed..];
            if rest[0].trim().is_empty() || starts_block(rest) {
                break;
            }
            text_lines.push(rest[0].trim_start());
            consumed += 1;
        }

        let children = self.parse_inline(text_lines.join("\n").trim_end());
        if children.is_empty() {
            return (None, consumed);
        }
        (Some(Block::Paragraph { children }), consumed)
    }

    fn parse_table(&self, lines: &[&str]) -> (Option<Block>, usize) {
        let headers = self.table_cells(lines[0]);
        let alignments = split_row(lines[1]).into_iter().map(alignment).collect();

        let mut rows = Vec::new();
        let mut consumed = 2;
        while let Some(line) = lines.get(consumed) {
            if !line.trim().starts_with('|') {
                break;
            }
            rows.push(self.table_cells(line));
            consumed += 1;
        }

        (
            Some(Block::Table {
                headers,
                alignments,
                rows,
            }),
            consumed,
        )
    }

    fn table_cells(&self, row: &str) -> Vec<TableCell> {
        split_row(row)
            .into_iter()
            .map(|cell| self.parse_inline(cell))
            .collect()
    }

    fn parse_blockquote(&self, lines: &[&str], depth: usize) -> (Option<Block>, usize) {
        let mut quoted = Vec::new();
        let mut consumed = 0;

        while let Some(line) = lines.get(consumed) {
            let line = line.trim_start();
            if let Some(rest) = line.strip_prefix('>') {
                quoted.push(rest.strip_prefix(' ').unwrap_or(rest));
            } else if line.trim().is_empty()
                && lines
                    .get(consumed + 1)
                    .is_some_and(|next| is_blockquote(next.trim()))
            {
                // Lazy continuation across a single blank line
                quoted.push("");
            } else {
                break;
            }
            consumed += 1;
        }

        let children = self.parse_nested(&quoted.join("\n"), depth);
        (Some(Block::Blockquote { children }), consumed)
    }

    fn parse_unordered_list(&self, lines: &[&str]) -> (Option<Block>, usize) {
        let mut items = Vec::new();
        let mut consumed = 0;

        while let Some(line) = lines.get(consumed) {
            let trimmed = line.trim();
            if let Some(content) = unordered_item(trimmed) {
                items.push(self.list_item(content));
            } else if trimmed.is_empty() || !line.starts_with(' ') {
                break;
            }
            // Indented non-item lines stay inside the list but add no content
            consumed += 1;
        }

        (Some(Block::UnorderedList { items }), consumed)
    }

    fn parse_ordered_list(&self, lines: &[&str]) -> (Option<Block>, usize) {
        let entries: Vec<(u64, &str)> = lines
            .iter()
            .map_while(|line| ordered_item(line.trim()))
            .collect();
        let start = entries.first().map(|(number, _)| *number).unwrap_or(1);
        let items: Vec<ListItem> = entries
            .iter()
            .map(|(_, content)| self.list_item(content))
            .collect();
        let consumed = items.len();
        (Some(Block::OrderedList { start, items }), consumed)
    }

    fn list_item(&self, content: &str) -> ListItem {
        let (task, content) = task_marker(content);
        let paragraph = Block::Paragraph {
            children: self.parse_inline(content),
        };
        match task {
            Some(checked) => ListItem::task(checked, vec![paragraph]),
            None => ListItem::new(vec![paragraph]),
        }
    }

    fn parse_details(&self, lines: &[&str], depth: usize) -> (Option<Block>, usize) {
        let mut summary = None;
        let mut body = Vec::new();
        let mut nesting = 0usize;
        let mut consumed = 1;

        while let Some(line) = lines.get(consumed) {
            consumed += 1;
            let trimmed = line.trim();

            if trimmed == "</details>" {
                if nesting == 0 {
                    break;
                }
                nesting -= 1;
            } else if is_details_open(trimmed) {
                nesting += 1;
            } else if nesting == 0 && summary.is_none() {
                if let Some(text) = summary_text(trimmed) {
                    summary = Some(self.parse_inline(text));
                    continue;
                }
            }
            body.push(*line);
        }

        let summary =
            summary.unwrap_or_else(|| vec![Inline::Text(self.options.default_summary.clone())]);
        let children = self.parse_nested(body.join("\n").trim(), depth);
        (Some(Block::Details { summary, children }), consumed)
    }
}

fn parse_code_block(lines: &[&str]) -> (Option<Block>, usize) {
    let info = lines[0].trim().strip_prefix("```").unwrap_or_default().trim();
    let language = (!info.is_empty()).then(|| info.to_string());

    let mut code_lines = Vec::new();
    let mut consumed = 1;
    while let Some(line) = lines.get(consumed) {
        consumed += 1;
        if is_fence(line.trim()) {
            break;
        }
        code_lines.push(*line);
    }

    let code = code_lines.join("\n");
    (Some(Block::CodeBlock { language, code }), consumed)
}

/// Whether `lines` start with anything other than a paragraph
fn starts_block(lines: &[&str]) -> bool {
    let trimmed = lines[0].trim();
    is_details_open(trimmed)
        || is_horizontal_rule(trimmed)
        || heading(trimmed).is_some()
        || is_fence(trimmed)
        || is_table_start(lines)
        || is_blockquote(trimmed)
        || unordered_item(trimmed).is_some()
        || ordered_item(trimmed).is_some()
}

fn is_details_open(trimmed: &str) -> bool {
    trimmed == "<details>" || (trimmed.starts_with("<details ") && trimmed.ends_with('>'))
}

fn summary_text(trimmed: &str) -> Option<&str> {
    trimmed
        .strip_prefix("<summary>")?
        .strip_suffix("</summary>")
        .map(str::trim)
}

fn is_horizontal_rule(trimmed: &str) -> bool {
    let mut chars = trimmed.chars().filter(|c| !c.is_whitespace());
    let Some(first) = chars.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }
    let mut count = 1;
    for c in chars {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

/// Level and content of an ATX heading
fn heading(trimmed: &str) -> Option<(u8, &str)> {
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let content = trimmed[hashes..].strip_prefix(' ')?;
    Some((hashes as u8, content.trim()))
}

fn is_fence(trimmed: &str) -> bool {
    trimmed.starts_with("```")
}

fn is_table_start(lines: &[&str]) -> bool {
    lines[0].trim().starts_with('|') && lines.get(1).is_some_and(|next| is_table_separator(next.trim()))
}

fn is_table_separator(trimmed: &str) -> bool {
    trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | ':' | '-') || c.is_whitespace())
}

/// Cells of a table row, without the empty segments of outer pipes
fn split_row(row: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = row.trim().split('|').map(str::trim).collect();
    if cells.first().is_some_and(|cell| cell.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells
}

fn alignment(cell: &str) -> TableAlignment {
    match (cell.starts_with(':'), cell.ends_with(':')) {
        (true, true) => TableAlignment::Center,
        (false, true) => TableAlignment::Right,
        (true, false) => TableAlignment::Left,
        (false, false) => TableAlignment::None,
    }
}

fn is_blockquote(trimmed: &str) -> bool {
    trimmed.starts_with('>')
}

fn unordered_item(trimmed: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .into_iter()
        .find_map(|marker| trimmed.strip_prefix(marker))
}

fn ordered_item(trimmed: &str) -> Option<(u64, &str)> {
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let content = trimmed[digits..].strip_prefix(". ")?;
    let number = trimmed[..digits].parse().ok()?;
    Some((number, content))
}

/// Strip a task checkbox; returns the checked state if there was one
fn task_marker(content: &str) -> (Option<bool>, &str) {
    if let Some(rest) = content.strip_prefix("[ ] ") {
        return (Some(false), rest);
    }
    if let Some(rest) = content
        .strip_prefix("[x] ")
        .or_else(|| content.strip_prefix("[X] "))
    {
        return (Some(true), rest);
    }
    match content {
        "[ ]" => (Some(false), ""),
        "[x]" | "[X]" => (Some(true), ""),
        _ => (None, content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Vec<Block> {
        MarkdownParser::default().parse(text)
    }

    fn text(s: &str) -> Inline {
        Inline::text(s)
    }

    fn paragraph(s: &str) -> Block {
        Block::text_paragraph(s)
    }

    #[test]
    fn test_heading() {
        assert_eq!(
            parse("# Hello World"),
            vec![Block::Heading {
                level: 1,
                children: vec![text("Hello World")],
            }]
        );
        assert_eq!(
            parse("###### Six"),
            vec![Block::Heading {
                level: 6,
                children: vec![text("Six")],
            }]
        );
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(parse("#NoSpace"), vec![paragraph("#NoSpace")]);
        assert_eq!(parse("####### seven"), vec![paragraph("####### seven")]);
    }

    #[test]
    fn test_blank_input() {
        assert!(parse("").is_empty());
        assert!(parse("   \n\t\n").is_empty());
    }

    #[test]
    fn test_horizontal_rules() {
        for rule in ["---", "***", "___", "- - -", " * * * * "] {
            assert_eq!(parse(rule), vec![Block::HorizontalRule], "{rule:?}");
        }
        assert_eq!(parse("--"), vec![paragraph("--")]);
        assert_eq!(parse("-*-"), vec![paragraph("-*-")]);
    }

    #[test]
    fn test_code_block() {
        assert_eq!(
            parse("```rust\nfn main() {\n\n    **x**\n}\n```\nafter"),
            vec![
                Block::CodeBlock {
                    language: Some("rust".to_string()),
                    code: "fn main() {\n\n    **x**\n}".to_string(),
                },
                paragraph("after"),
            ]
        );
    }

    #[test]
    fn test_code_fence_language_keeps_extra_backticks() {
        assert_eq!(
            parse("````rust\nx\n```"),
            vec![Block::CodeBlock {
                language: Some("`rust".to_string()),
                code: "x".to_string(),
            }]
        );
    }

    #[test]
    fn test_unterminated_code_block() {
        assert_eq!(
            parse("```\nno end"),
            vec![Block::CodeBlock {
                language: None,
                code: "no end".to_string(),
            }]
        );
    }

    #[test]
    fn test_table_alignments() {
        let blocks = parse("| A | B | C |\n|:-----|:------:|------:|\n| 1 | **2** | |");
        assert_eq!(
            blocks,
            vec![Block::Table {
                headers: vec![vec![text("A")], vec![text("B")], vec![text("C")]],
                alignments: vec![
                    TableAlignment::Left,
                    TableAlignment::Center,
                    TableAlignment::Right,
                ],
                rows: vec![vec![
                    vec![text("1")],
                    vec![Inline::Bold(vec![text("2")])],
                    vec![],
                ]],
            }]
        );
    }

    #[test]
    fn test_pipe_line_without_separator_is_paragraph() {
        assert_eq!(parse("| not | a table |"), vec![paragraph("| not | a table |")]);
    }

    #[test]
    fn test_table_ends_at_non_pipe_line() {
        let blocks = parse("|a|b|\n|-|-|\n|1|2|\ntrailing text");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::Table { rows, .. } if rows.len() == 1));
        assert_eq!(blocks[1], paragraph("trailing text"));
    }

    #[test]
    fn test_blockquote_lazy_continuation() {
        assert_eq!(
            parse("> first\n>second\n\n> third\n\nafter"),
            vec![
                Block::Blockquote {
                    children: vec![paragraph("first\nsecond"), paragraph("third")],
                },
                paragraph("after"),
            ]
        );
    }

    #[test]
    fn test_nested_blockquote() {
        assert_eq!(
            parse("> outer\n> > inner"),
            vec![Block::Blockquote {
                children: vec![
                    paragraph("outer"),
                    Block::Blockquote {
                        children: vec![paragraph("inner")],
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_task_list() {
        assert_eq!(
            parse("- [x] Done\n* [ ] Todo\n+ plain"),
            vec![Block::UnorderedList {
                items: vec![
                    ListItem::task(true, vec![paragraph("Done")]),
                    ListItem::task(false, vec![paragraph("Todo")]),
                    ListItem::new(vec![paragraph("plain")]),
                ],
            }]
        );
    }

    #[test]
    fn test_list_ends_at_blank_line() {
        let blocks = parse("- a\n- b\n\n- c");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::UnorderedList { items } if items.len() == 2));
    }

    #[test]
    fn test_indented_line_does_not_end_list() {
        assert_eq!(
            parse("- a\n  continued\n- b\nafter"),
            vec![
                Block::UnorderedList {
                    items: vec![
                        ListItem::new(vec![paragraph("a")]),
                        ListItem::new(vec![paragraph("b")]),
                    ],
                },
                paragraph("after"),
            ]
        );
    }

    #[test]
    fn test_ordered_list_start() {
        assert_eq!(
            parse("3. three\n1. one\n10. [X] ten"),
            vec![Block::OrderedList {
                start: 3,
                items: vec![
                    ListItem::new(vec![paragraph("three")]),
                    ListItem::new(vec![paragraph("one")]),
                    ListItem::task(true, vec![paragraph("ten")]),
                ],
            }]
        );
    }

    #[test]
    fn test_paragraph_stops_before_other_blocks() {
        assert_eq!(
            parse("line one\nline two\n## Next"),
            vec![
                paragraph("line one\nline two"),
                Block::Heading {
                    level: 2,
                    children: vec![text("Next")],
                },
            ]
        );

        let blocks = parse("intro\n| a | b |\n| - | - |");
        assert_eq!(blocks[0], paragraph("intro"));
        assert!(matches!(blocks[1], Block::Table { .. }));
    }

    #[test]
    fn test_paragraph_hard_break() {
        assert_eq!(
            parse("first  \n  second"),
            vec![Block::Paragraph {
                children: vec![text("first"), Inline::LineBreak, text("second")],
            }]
        );
    }

    #[test]
    fn test_details() {
        assert_eq!(
            parse("<details>\n<summary>Logs</summary>\n\n```\nerror\n```\n</details>\nafter"),
            vec![
                Block::Details {
                    summary: vec![text("Logs")],
                    children: vec![Block::CodeBlock {
                        language: None,
                        code: "error".to_string(),
                    }],
                },
                paragraph("after"),
            ]
        );
    }

    #[test]
    fn test_details_default_summary_and_nesting() {
        let blocks = parse("<details open>\nouter\n<details>\n<summary>Inner</summary>\ninner\n</details>\n</details>\nafter");
        assert_eq!(
            blocks,
            vec![
                Block::Details {
                    summary: vec![text("Details")],
                    children: vec![
                        paragraph("outer"),
                        Block::Details {
                            summary: vec![text("Inner")],
                            children: vec![paragraph("inner")],
                        },
                    ],
                },
                paragraph("after"),
            ]
        );
    }

    #[test]
    fn test_unterminated_details() {
        assert_eq!(
            parse("<details>\nbody"),
            vec![Block::Details {
                summary: vec![text("Details")],
                children: vec![paragraph("body")],
            }]
        );
    }

    #[test]
    fn test_block_nesting_limit() {
        let parser = MarkdownParser::new(MarkdownOptions {
            max_nesting_depth: 1,
            ..MarkdownOptions::default()
        });
        assert_eq!(
            parser.parse("> a\n> > b"),
            vec![Block::Blockquote {
                children: vec![
                    paragraph("a"),
                    Block::Blockquote {
                        children: vec![paragraph("b")],
                    },
                ],
            }]
        );
        assert_eq!(
            parser.parse("> > > deep"),
            vec![Block::Blockquote {
                children: vec![Block::Blockquote {
                    children: vec![paragraph("> deep")],
                }],
            }]
        );
    }

    #[test]
    fn test_line_helpers() {
        assert_eq!(heading("## Title "), Some((2, "Title")));
        assert_eq!(heading("#"), None);
        assert_eq!(ordered_item("12. item"), Some((12, "item")));
        assert_eq!(ordered_item("12.item"), None);
        assert_eq!(unordered_item("-item"), None);
        assert_eq!(split_row("| a | | b |"), vec!["a", "", "b"]);
        assert_eq!(split_row("a | b"), vec!["a", "b"]);
        assert_eq!(alignment("---"), TableAlignment::None);
        assert!(is_table_separator("| --- | :-: |"));
        assert!(!is_table_separator("| | |"));
        assert_eq!(task_marker("[ ] open"), (Some(false), "open"));
        assert_eq!(task_marker("[y] other"), (None, "[y] other"));
    }
}
