//! Parse unified diff patches (as returned by the GitHub API).

mod full_file;

pub use full_file::parse_full_file;

use crate::header::HunkHeader;
use crate::model::{ChangedFile, DiffHunk, DiffLine, FileDiff};

/// A body line of a hunk with its marker removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatchLine<'a> {
    Addition(&'a str),
    Deletion(&'a str),
    Context(&'a str),
}

impl<'a> PatchLine<'a> {
    /// Classify a line following a hunk header.
    ///
    /// `+++` and `---` file markers are never additions or deletions.
    pub(crate) fn classify(line: &'a str) -> Self {
        if line.starts_with('+') && !line.starts_with("+++") {
            PatchLine::Addition(&line[1..])
        } else if line.starts_with('-') && !line.starts_with("---") {
            PatchLine::Deletion(&line[1..])
        } else {
            PatchLine::Context(line.strip_prefix(' ').unwrap_or(line))
        }
    }
}

/// Parse the hunk header on `line`, if it is one.
pub(crate) fn header_of(line: &str) -> Option<HunkHeader> {
    if !line.starts_with("@@") {
        return None;
    }
    match line.parse::<HunkHeader>() {
        Ok(header) => Some(header),
        Err(e) => {
            log::trace!("Ignoring malformed hunk header: {}", e);
            None
        }
    }
}

/// Parse a patch into hunks with old/new line numbers.
///
/// Lines before the first valid header are dropped. Malformed headers are
/// dropped too, and the open hunk keeps collecting the lines after them.
/// Counters saturate at `u32::MAX`. Never fails; an empty patch yields no
/// hunks.
pub fn parse_hunks(patch: &str) -> Vec<DiffHunk> {
    let mut hunks = Vec::new();
    let mut current: Option<DiffHunk> = None;
    let mut old_line = 0u32;
    let mut new_line = 0u32;

    for line in patch.lines() {
        if let Some(header) = header_of(line) {
            if let Some(hunk) = current.take() {
                hunks.push(hunk);
            }
            old_line = header.old_start;
            new_line = header.new_start;
            current = Some(DiffHunk::new(
                line,
                header.old_start,
                header.old_count,
                header.new_start,
                header.new_count,
            ));
            continue;
        }
        if line.starts_with("@@") {
            continue;
        }

        let Some(hunk) = current.as_mut() else {
            continue;
        };

        let parsed = match PatchLine::classify(line) {
            PatchLine::Addition(content) => {
                let parsed = DiffLine::addition(content, new_line);
                new_line = new_line.saturating_add(1);
                parsed
            }
            PatchLine::Deletion(content) => {
                let parsed = DiffLine::deletion(content, old_line);
                old_line = old_line.saturating_add(1);
                parsed
            }
            PatchLine::Context(content) => {
                let parsed = DiffLine::context(content, old_line, new_line);
                old_line = old_line.saturating_add(1);
                new_line = new_line.saturating_add(1);
                parsed
            }
        };
        hunk.lines.push(parsed);
    }

    if let Some(hunk) = current {
        hunks.push(hunk);
    }

    log::debug!("Parsed {} hunks from patch", hunks.len());
    hunks
}

/// Parse a changed file's patch into a [`FileDiff`].
///
/// A missing or empty patch (binary or unchanged files) yields no hunks.
/// File metadata is copied through unchanged.
pub fn parse(file: &ChangedFile) -> FileDiff {
    let hunks = file.patch_text().map(parse_hunks).unwrap_or_default();
    FileDiff::from_changed_file(file, hunks)
}
