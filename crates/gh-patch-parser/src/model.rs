//! Diff data structures representing a single changed file.

use serde::{Deserialize, Serialize};

/// A changed file as returned by the "list pull request files" endpoint.
///
/// Only the fields the parser needs are modelled; unknown fields in the
/// API payload are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Path of the file after the change.
    pub filename: String,
    /// Change status reported by the API.
    pub status: FileStatus,
    /// Number of added lines.
    #[serde(default)]
    pub additions: usize,
    /// Number of deleted lines.
    #[serde(default)]
    pub deletions: usize,
    /// Unified diff text; absent for binary files and very large diffs.
    #[serde(default)]
    pub patch: Option<String>,
    /// Previous path for renamed or copied files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_filename: Option<String>,
}

impl ChangedFile {
    /// Create a changed file with the given patch text.
    pub fn new(filename: impl Into<String>, status: FileStatus, patch: Option<String>) -> Self {
        Self {
            filename: filename.into(),
            status,
            additions: 0,
            deletions: 0,
            patch,
            previous_filename: None,
        }
    }

    /// Set the addition/deletion counts reported by the API.
    pub fn with_stats(mut self, additions: usize, deletions: usize) -> Self {
        self.additions = additions;
        self.deletions = deletions;
        self
    }

    /// The patch text, treating an empty string the same as a missing patch.
    pub fn patch_text(&self) -> Option<&str> {
        self.patch.as_deref().filter(|p| !p.is_empty())
    }
}

/// A single file's parsed diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    /// Current file path (after rename if applicable).
    pub filename: String,
    /// Previous file path (if renamed or copied).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_filename: Option<String>,
    /// File status.
    pub status: FileStatus,
    /// Change hunks.
    pub hunks: Vec<DiffHunk>,
    /// Number of added lines, as reported by the source.
    pub additions: usize,
    /// Number of deleted lines, as reported by the source.
    pub deletions: usize,
}

impl FileDiff {
    /// Create a file diff carrying the metadata of `file` and the given hunks.
    pub fn from_changed_file(file: &ChangedFile, hunks: Vec<DiffHunk>) -> Self {
        Self {
            filename: file.filename.clone(),
            previous_filename: file.previous_filename.clone(),
            status: file.status,
            hunks,
            additions: file.additions,
            deletions: file.deletions,
        }
    }

    /// Get the display name for the file (handles renames).
    pub fn display_name(&self) -> String {
        match self.previous_filename {
            Some(ref old) if old != &self.filename => format!("{} → {}", old, self.filename),
            _ => self.filename.clone(),
        }
    }

    /// Get total number of lines across all hunks, headers included.
    pub fn total_lines(&self) -> usize {
        self.hunks.iter().map(|h| h.lines.len()).sum()
    }
}

/// File status as spelled by the GitHub API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Removed,
    Modified,
    Renamed,
    Copied,
    Changed,
    Unchanged,
}

impl FileStatus {
    /// Get a single-character representation.
    pub fn as_char(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Removed => 'D',
            FileStatus::Modified => 'M',
            FileStatus::Renamed => 'R',
            FileStatus::Copied => 'C',
            FileStatus::Changed => 'T',
            FileStatus::Unchanged => ' ',
        }
    }
}

/// A contiguous region of changes (hunk).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffHunk {
    /// Header line (e.g., "@@ -10,5 +10,7 @@ fn example()").
    pub header: String,
    /// Old file starting line.
    pub old_start: u32,
    /// Number of lines in old version.
    pub old_count: u32,
    /// New file starting line.
    pub new_start: u32,
    /// Number of lines in new version.
    pub new_count: u32,
    /// Lines in this hunk; the first one is always the header line.
    pub lines: Vec<DiffLine>,
}

impl DiffHunk {
    /// Create a hunk whose only line is its header.
    pub fn new(
        header: impl Into<String>,
        old_start: u32,
        old_count: u32,
        new_start: u32,
        new_count: u32,
    ) -> Self {
        let header = header.into();
        Self {
            lines: vec![DiffLine::hunk_header(header.clone())],
            header,
            old_start,
            old_count,
            new_start,
            new_count,
        }
    }

    /// Lines after the header.
    pub fn body(&self) -> &[DiffLine] {
        self.lines.get(1..).unwrap_or_default()
    }
}

/// A single line in the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// Line type.
    pub kind: LineKind,
    /// Line content (without leading +/-/ ).
    pub content: String,
    /// Line number in old file (for Context and Deletion).
    pub old_line: Option<u32>,
    /// Line number in new file (for Context and Addition).
    pub new_line: Option<u32>,
}

impl DiffLine {
    /// Create a new context line.
    pub fn context(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    /// Create a new addition line.
    pub fn addition(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: LineKind::Addition,
            content: content.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    /// Create a new deletion line.
    pub fn deletion(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: LineKind::Deletion,
            content: content.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    /// Create a hunk header line.
    pub fn hunk_header(header: impl Into<String>) -> Self {
        Self {
            kind: LineKind::HunkHeader,
            content: header.into(),
            old_line: None,
            new_line: None,
        }
    }

    /// Get the line number to display (prefers new_line, falls back to old_line).
    pub fn display_line_number(&self) -> Option<u32> {
        self.new_line.or(self.old_line)
    }
}

/// Line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Unchanged line (for context).
    Context,
    /// Added line (+).
    Addition,
    /// Removed line (-).
    Deletion,
    /// @@ header line.
    HunkHeader,
}

impl LineKind {
    /// Get the prefix character for this line type.
    pub fn prefix(&self) -> char {
        match self {
            LineKind::Context => ' ',
            LineKind::Addition => '+',
            LineKind::Deletion => '-',
            LineKind::HunkHeader => '@',
        }
    }
}
