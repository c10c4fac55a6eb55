//! Command implementations

use anyhow::{Context, Result};
use gh_markdown_parser::{MarkdownOptions, MarkdownParser};
use gh_patch_parser::{parse_full_file, parse_hunks, ChangedFile};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

use crate::cli::Command;

/// Run a command and return the JSON to print
pub fn run(command: &Command, options: &MarkdownOptions, compact: bool) -> Result<String> {
    match command {
        Command::Hunks { patch } => {
            let patch = read_input(patch)?;
            hunks_json(&patch, compact)
        }
        Command::File { file, content } => {
            let entry = read_input(file)?;
            let content = content.as_deref().map(read_input).transpose()?;
            file_json(&entry, content.as_deref(), compact)
        }
        Command::Markdown { document } => {
            let document = read_input(document)?;
            markdown_json(&document, options, compact)
        }
    }
}

/// Read a file, or stdin for `-`
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    json.context("Failed to serialize result")
}

pub fn hunks_json(patch: &str, compact: bool) -> Result<String> {
    let hunks = parse_hunks(patch);
    log::info!("Parsed {} hunks", hunks.len());
    to_json(&hunks, compact)
}

pub fn file_json(entry: &str, content: Option<&str>, compact: bool) -> Result<String> {
    let file: ChangedFile =
        serde_json::from_str(entry).context("Failed to parse changed-file JSON")?;
    let diff = parse_full_file(&file, content);
    log::info!(
        "Parsed {} ({}) into {} hunks",
        diff.filename,
        diff.status.as_char(),
        diff.hunks.len()
    );
    to_json(&diff, compact)
}

pub fn markdown_json(document: &str, options: &MarkdownOptions, compact: bool) -> Result<String> {
    let blocks = MarkdownParser::new(options.clone()).parse(document);
    log::info!("Parsed {} markdown blocks", blocks.len());
    to_json(&blocks, compact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_markdown_parser::Block;
    use gh_patch_parser::{DiffHunk, FileDiff, LineKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hunks_json() {
        let json = hunks_json("@@ -1 +1 @@\n-a\n+b", true).unwrap();
        let hunks: Vec<DiffHunk> = serde_json::from_str(&json).unwrap();
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].lines[2].kind, LineKind::Addition);
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_file_json_with_content() {
        let entry = r#"{"filename":"a.txt","status":"modified","additions":1,"deletions":1,"patch":"@@ -1 +1 @@\n-old\n+new"}"#;
        let json = file_json(entry, Some("new\nrest"), false).unwrap();
        let diff: FileDiff = serde_json::from_str(&json).unwrap();
        let kinds: Vec<LineKind> = diff.hunks[0].lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::HunkHeader,
                LineKind::Deletion,
                LineKind::Addition,
                LineKind::Context,
            ]
        );
    }

    #[test]
    fn test_file_json_rejects_bad_entry() {
        assert!(file_json("{\"filename\": 3}", None, false).is_err());
    }

    #[test]
    fn test_markdown_json_uses_options() {
        let options = MarkdownOptions {
            default_summary: "Expand".to_string(),
            ..MarkdownOptions::default()
        };
        let json = markdown_json("<details>\nx\n</details>", &options, false).unwrap();
        let blocks: Vec<Block> = serde_json::from_str(&json).unwrap();
        assert!(matches!(&blocks[0], Block::Details { summary, .. } if summary[0].plain_text() == "Expand"));
    }
}
