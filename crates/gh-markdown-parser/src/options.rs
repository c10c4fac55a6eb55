//! Parser options

use serde::{Deserialize, Serialize};

/// Tunables for [`MarkdownParser`](crate::MarkdownParser)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownOptions {
    /// Maximum nesting of blockquotes/details, and of inline formatting.
    ///
    /// Content nested deeper is kept as plain text.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,

    /// Summary text for `<details>` blocks without a `<summary>` line
    #[serde(default = "default_summary")]
    pub default_summary: String,
}

fn default_max_nesting_depth() -> usize {
    32
}

fn default_summary() -> String {
    "Details".to_string()
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: default_max_nesting_depth(),
            default_summary: default_summary(),
        }
    }
}
