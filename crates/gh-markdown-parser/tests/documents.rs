//! Whole-document parsing of typical PR descriptions and comments.

use gh_markdown_parser::{
    blocks_plain_text, parse, parse_inline, Block, Inline, ListItem, MarkdownOptions,
    MarkdownParser, TableAlignment,
};
use pretty_assertions::assert_eq;

const PR_DESCRIPTION: &str = r#"## Summary

Adds **retry** support to the _fetch_ layer.
See [issue #42](https://github.com/acme/app/issues/42).

- [x] Unit tests
- [ ] Docs

> Note: this changes
> the default timeout.

---

```toml
retries = 3
```

| Option | Default |
|:-------|--------:|
| `retries` | 3 |
"#;

fn variant(block: &Block) -> &'static str {
    match block {
        Block::Heading { .. } => "heading",
        Block::Paragraph { .. } => "paragraph",
        Block::Blockquote { .. } => "blockquote",
        Block::CodeBlock { .. } => "code_block",
        Block::UnorderedList { .. } => "unordered_list",
        Block::OrderedList { .. } => "ordered_list",
        Block::Table { .. } => "table",
        Block::HorizontalRule => "horizontal_rule",
        Block::Details { .. } => "details",
    }
}

#[test]
fn mixed_document_yields_one_block_per_kind() {
    let blocks = parse(PR_DESCRIPTION);
    let kinds: Vec<&str> = blocks.iter().map(variant).collect();
    assert_eq!(
        kinds,
        vec![
            "heading",
            "paragraph",
            "unordered_list",
            "blockquote",
            "horizontal_rule",
            "code_block",
            "table",
        ]
    );
}

#[test]
fn mixed_document_content() {
    let blocks = parse(PR_DESCRIPTION);

    assert_eq!(
        blocks[1],
        Block::Paragraph {
            children: vec![
                Inline::text("Adds "),
                Inline::Bold(vec![Inline::text("retry")]),
                Inline::text(" support to the "),
                Inline::Italic(vec![Inline::text("fetch")]),
                Inline::text(" layer.\nSee "),
                Inline::Link {
                    children: vec![Inline::text("issue #42")],
                    url: "https://github.com/acme/app/issues/42".to_string(),
                },
                Inline::text("."),
            ],
        }
    );

    assert_eq!(
        blocks[2],
        Block::UnorderedList {
            items: vec![
                ListItem::task(true, vec![Block::text_paragraph("Unit tests")]),
                ListItem::task(false, vec![Block::text_paragraph("Docs")]),
            ],
        }
    );

    assert_eq!(
        blocks[3],
        Block::Blockquote {
            children: vec![Block::text_paragraph(
                "Note: this changes\nthe default timeout."
            )],
        }
    );

    assert_eq!(
        blocks[5],
        Block::CodeBlock {
            language: Some("toml".to_string()),
            code: "retries = 3".to_string(),
        }
    );

    let Block::Table {
        headers,
        alignments,
        rows,
    } = &blocks[6]
    else {
        panic!("expected a table, got {:?}", blocks[6]);
    };
    assert_eq!(headers.len(), 2);
    assert_eq!(alignments, &vec![TableAlignment::Left, TableAlignment::Right]);
    assert_eq!(rows[0][0], vec![Inline::Code("retries".to_string())]);
}

#[test]
fn unclosed_markers_never_fail() {
    let inlines = parse_inline("**unclosed bold");
    assert!(!inlines.is_empty());
    assert_eq!(inlines, vec![Inline::text("**unclosed bold")]);

    let blocks = parse("```\n> [link](\n**");
    assert_eq!(blocks.len(), 1);
}

#[test]
fn syntax_tree_round_trips_through_json() -> anyhow::Result<()> {
    let blocks = parse(PR_DESCRIPTION);
    let json = serde_json::to_string(&blocks)?;
    let restored: Vec<Block> = serde_json::from_str(&json)?;
    assert_eq!(restored, blocks);
    Ok(())
}

#[test]
fn serialized_shape_is_tagged() -> anyhow::Result<()> {
    let blocks = parse("# Hi *there*");
    let value = serde_json::to_value(&blocks)?;
    assert_eq!(
        value,
        serde_json::json!([{
            "type": "heading",
            "level": 1,
            "children": [
                { "type": "text", "value": "Hi " },
                { "type": "italic", "value": [{ "type": "text", "value": "there" }] }
            ]
        }])
    );
    Ok(())
}

#[test]
fn plain_text_flattens_markup() {
    let blocks = parse("# Title\n\nSome **bold** and `code`.\n\n- one\n- two");
    assert_eq!(
        blocks_plain_text(&blocks),
        "Title\nSome bold and code.\none\ntwo"
    );
}

#[test]
fn deep_nesting_is_bounded() {
    let parser = MarkdownParser::new(MarkdownOptions {
        max_nesting_depth: 4,
        ..MarkdownOptions::default()
    });
    let document = format!("{} bottom", ">".repeat(64));
    let blocks = parser.parse(&document);

    let mut depth = 0;
    let mut current = &blocks;
    while let [Block::Blockquote { children }] = current.as_slice() {
        depth += 1;
        current = children;
    }
    assert_eq!(depth, 5);
    assert!(matches!(current.as_slice(), [Block::Paragraph { .. }]));
}

#[test]
fn custom_default_summary() {
    let parser = MarkdownParser::new(MarkdownOptions {
        default_summary: "More".to_string(),
        ..MarkdownOptions::default()
    });
    assert_eq!(
        parser.parse("<details>\nhidden\n</details>"),
        vec![Block::Details {
            summary: vec![Inline::text("More")],
            children: vec![Block::text_paragraph("hidden")],
        }]
    );
}
