//! Reconstruct a whole-file view from a patch and the file's current content.

use std::collections::{BTreeMap, HashSet};

use super::{header_of, parse, PatchLine};
use crate::model::{ChangedFile, DiffHunk, DiffLine, FileDiff};

/// What a patch says about the new version of a file.
#[derive(Debug, Default)]
struct PatchIndex {
    /// New-side line numbers that are additions.
    added: HashSet<u32>,
    /// Deleted lines keyed by the new-side line they precede, in patch order.
    deletions: BTreeMap<u32, Vec<String>>,
    /// Deletions after the last non-deleted line of the patch.
    trailing: Vec<String>,
}

impl PatchIndex {
    fn from_patch(patch: &str) -> Self {
        let mut index = Self::default();
        let mut pending: Vec<String> = Vec::new();
        let mut new_line = 0u32;
        let mut in_hunk = false;

        for line in patch.lines() {
            if let Some(header) = header_of(line) {
                index.flush(new_line, &mut pending);
                new_line = header.new_start;
                in_hunk = true;
                continue;
            }
            if !in_hunk || line.starts_with("@@") {
                continue;
            }

            match PatchLine::classify(line) {
                PatchLine::Deletion(content) => pending.push(content.to_string()),
                PatchLine::Addition(_) => {
                    index.flush(new_line, &mut pending);
                    index.added.insert(new_line);
                    new_line = new_line.saturating_add(1);
                }
                PatchLine::Context(_) => {
                    index.flush(new_line, &mut pending);
                    new_line = new_line.saturating_add(1);
                }
            }
        }

        index.trailing = pending;
        index
    }

    fn flush(&mut self, at: u32, pending: &mut Vec<String>) {
        if !pending.is_empty() {
            self.deletions.entry(at).or_default().append(pending);
        }
    }
}

/// One-based line number of the line at `idx`, saturating at `u32::MAX`.
fn line_number(idx: usize) -> u32 {
    u32::try_from(idx).map_or(u32::MAX, |n| n.saturating_add(1))
}

/// Build a diff that spans the entire current file.
///
/// Every line of `full_content` is emitted as an addition (when the patch
/// added it) or as context, and the patch's deleted lines are interleaved
/// before the line they preceded. The result has a single hunk. Without
/// `full_content` this is the same as [`parse`].
pub fn parse_full_file(file: &ChangedFile, full_content: Option<&str>) -> FileDiff {
    let Some(content) = full_content else {
        return parse(file);
    };

    let mut index = file
        .patch_text()
        .map(PatchIndex::from_patch)
        .unwrap_or_default();

    let lines: Vec<&str> = content.lines().collect();
    let mut body = Vec::with_capacity(lines.len());
    let mut old_line = 1u32;

    for (idx, text) in lines.iter().enumerate() {
        let new_line = line_number(idx);

        if let Some(deleted) = index.deletions.remove(&new_line) {
            for line in deleted {
                body.push(DiffLine::deletion(line, old_line));
                old_line = old_line.saturating_add(1);
            }
        }

        if index.added.contains(&new_line) {
            body.push(DiffLine::addition(*text, new_line));
        } else {
            body.push(DiffLine::context(*text, old_line, new_line));
            old_line = old_line.saturating_add(1);
        }
    }

    // Anything left was keyed beyond the end of the content
    let past_end = line_number(lines.len());
    let trailing = std::mem::take(&mut index.trailing);
    index.deletions.entry(past_end).or_default().extend(trailing);
    for line in index.deletions.into_values().flatten() {
        body.push(DiffLine::deletion(line, old_line));
        old_line = old_line.saturating_add(1);
    }

    let old_count = old_line - 1;
    let new_count = u32::try_from(lines.len()).unwrap_or(u32::MAX);
    let mut hunk = DiffHunk::new(
        format!("@@ -1,{} +1,{} @@", old_count, new_count),
        1,
        old_count,
        1,
        new_count,
    );
    hunk.lines.extend(body);

    log::debug!(
        "Reconstructed {} with {} lines from full content",
        file.filename,
        hunk.lines.len() - 1
    );

    FileDiff::from_changed_file(file, vec![hunk])
}
