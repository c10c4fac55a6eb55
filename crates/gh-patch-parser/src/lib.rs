//! # gh-patch-parser
//!
//! Turns the per-file `patch` field returned by the GitHub API into typed,
//! line-numbered hunks ready for rendering or persisting.
//!
//! ## Design Principles
//!
//! Parsing is **total**: malformed headers are skipped, missing patches yield
//! no hunks, and nothing in the public API returns an error. All types are
//! plain data and serialize losslessly with serde, so a parsed diff can be
//! cached and displayed offline.
//!
//! ## Usage
//!
//! ```rust
//! use gh_patch_parser::{parse, parse_hunks, ChangedFile, FileStatus, LineKind};
//!
//! let hunks = parse_hunks("@@ -1 +1 @@\n-old\n+new");
//! assert_eq!(hunks[0].lines[1].kind, LineKind::Deletion);
//!
//! let file = ChangedFile::new("src/main.rs", FileStatus::Modified, None);
//! assert!(parse(&file).hunks.is_empty());
//! ```

pub mod header;
pub mod model;
pub mod parser;

// Re-export commonly used types
pub use header::{HunkHeader, HunkHeaderError};
pub use model::{ChangedFile, DiffHunk, DiffLine, FileDiff, FileStatus, LineKind};
pub use parser::{parse, parse_full_file, parse_hunks};
