//! Hunk header parsing
//!
//! Parses `@@ -<old>[,<count>] +<new>[,<count>] @@ [section]` lines.

use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors produced when a line is not a valid hunk header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HunkHeaderError {
    #[error("line is not a hunk header: {0:?}")]
    NotAHeader(String),
    #[error("hunk header number out of range: {0}")]
    InvalidNumber(String),
}

/// The ranges and optional section text of a hunk header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunkHeader {
    pub old_start: u32,
    pub old_count: u32,
    pub new_start: u32,
    pub new_count: u32,
    /// Function context after the closing `@@`, if any.
    pub section: Option<String>,
}

impl FromStr for HunkHeader {
    type Err = HunkHeaderError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();

        let re = HEADER_REGEX.get_or_init(|| {
            Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@(.*)$").unwrap()
        });

        let captures = re
            .captures(line)
            .ok_or_else(|| HunkHeaderError::NotAHeader(line.to_string()))?;

        let number = |idx: usize| -> Result<u32, HunkHeaderError> {
            match captures.get(idx) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map_err(|_| HunkHeaderError::InvalidNumber(m.as_str().to_string())),
                // Omitted counts default to a single line
                None => Ok(1),
            }
        };

        let section = captures
            .get(5)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            old_start: number(1)?,
            old_count: number(2)?,
            new_start: number(3)?,
            new_count: number(4)?,
            section,
        })
    }
}
