//! Inline scanning: emphasis, code spans, links, images and line breaks
//!
//! The scanner walks the text once, left to right. At every position it
//! tries the matchers in [`MATCHERS`] in order; the first one that finds a
//! complete construct wins. Anything unterminated falls back to plain text
//! one character at a time.

use crate::options::MarkdownOptions;
use crate::types::Inline;

/// A matcher returns the node it recognized at `pos` and how many chars it consumed
type Matcher = fn(&InlineScanner<'_>, &[char], usize) -> Option<(Inline, usize)>;

/// Matchers in priority order
const MATCHERS: [Matcher; 8] = [
    match_bold_italic,
    match_bold,
    match_italic,
    match_strikethrough,
    match_code,
    match_image,
    match_link,
    match_line_break,
];

const BREAK_TAGS: [&str; 3] = ["<br>", "<br/>", "<br />"];

/// Scans one run of text into inline nodes
pub(crate) struct InlineScanner<'a> {
    options: &'a MarkdownOptions,
    depth: usize,
}

impl<'a> InlineScanner<'a> {
    pub(crate) fn new(options: &'a MarkdownOptions) -> Self {
        Self { options, depth: 0 }
    }

    pub(crate) fn scan(&self, text: &str) -> Vec<Inline> {
        let chars: Vec<char> = text.chars().collect();
        let mut nodes = Vec::new();
        let mut plain = String::new();
        let mut pos = 0;

        'scan: while pos < chars.len() {
            for matcher in MATCHERS {
                if let Some((node, consumed)) = matcher(self, &chars, pos) {
                    flush_text(&mut plain, &mut nodes);
                    nodes.push(node);
                    pos += consumed;
                    continue 'scan;
                }
            }
            plain.push(chars[pos]);
            pos += 1;
        }

        flush_text(&mut plain, &mut nodes);
        nodes
    }

    /// Scan the content of a matched construct one level deeper
    fn nested(&self, content: &[char]) -> Vec<Inline> {
        let text: String = content.iter().collect();
        if self.depth >= self.options.max_nesting_depth {
            log::trace!("Inline nesting limit reached, keeping {:?} as text", text);
            return if text.is_empty() {
                Vec::new()
            } else {
                vec![Inline::Text(text)]
            };
        }

        InlineScanner {
            options: self.options,
            depth: self.depth + 1,
        }
        .scan(&text)
    }
}

fn flush_text(plain: &mut String, nodes: &mut Vec<Inline>) {
    if !plain.is_empty() {
        nodes.push(Inline::Text(std::mem::take(plain)));
    }
}

fn starts_with(chars: &[char], pos: usize, pattern: &str) -> bool {
    let mut idx = pos;
    for expected in pattern.chars() {
        if chars.get(idx) != Some(&expected) {
            return false;
        }
        idx += 1;
    }
    true
}

fn starts_with_ignore_case(chars: &[char], pos: usize, pattern: &str) -> bool {
    pattern
        .chars()
        .enumerate()
        .all(|(offset, expected)| {
            chars
                .get(pos + offset)
                .is_some_and(|c| c.eq_ignore_ascii_case(&expected))
        })
}

/// Position of the first occurrence of `pattern` at or after `from`
fn find(chars: &[char], from: usize, pattern: &str) -> Option<usize> {
    (from..chars.len()).find(|&idx| starts_with(chars, idx, pattern))
}

fn padded_with_space(content: &[char]) -> bool {
    content.first() == Some(&' ') || content.last() == Some(&' ')
}

/// Closing `]` for the `[` at `open`, honoring nested brackets
fn matching_bracket(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in chars.iter().enumerate().skip(open) {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// `(url)` directly after the `]` at `close`; returns the url and the `)` position
fn link_target(chars: &[char], close: usize) -> Option<(String, usize)> {
    if chars.get(close + 1) != Some(&'(') {
        return None;
    }
    let end = find(chars, close + 2, ")")?;
    let url: String = chars[close + 2..end].iter().collect();
    Some((url.trim().to_string(), end))
}

fn match_bold_italic(scanner: &InlineScanner<'_>, chars: &[char], pos: usize) -> Option<(Inline, usize)> {
    let marker = ["***", "___"]
        .into_iter()
        .find(|m| starts_with(chars, pos, m))?;
    let start = pos + 3;
    let end = find(chars, start, marker)?;
    if end == start {
        return None;
    }
    let children = scanner.nested(&chars[start..end]);
    Some((Inline::BoldItalic(children), end + 3 - pos))
}

fn match_bold(scanner: &InlineScanner<'_>, chars: &[char], pos: usize) -> Option<(Inline, usize)> {
    let marker = ["**", "__"].into_iter().find(|m| starts_with(chars, pos, m))?;
    let start = pos + 2;
    let end = find(chars, start, marker)?;
    let content = &chars[start..end];
    if content.is_empty() || padded_with_space(content) {
        return None;
    }
    Some((Inline::Bold(scanner.nested(content)), end + 2 - pos))
}

fn match_italic(scanner: &InlineScanner<'_>, chars: &[char], pos: usize) -> Option<(Inline, usize)> {
    let marker = chars[pos];
    if marker != '*' && marker != '_' {
        return None;
    }
    // A double marker is bold, never italic
    if chars.get(pos + 1) == Some(&marker) {
        return None;
    }

    let start = pos + 1;
    let mut idx = start;
    let end = loop {
        match chars.get(idx) {
            None => return None,
            Some(&c) if c == marker => {
                if chars.get(idx + 1) == Some(&marker) {
                    idx += 2;
                    continue;
                }
                break idx;
            }
            Some(_) => idx += 1,
        }
    };

    let content = &chars[start..end];
    if content.is_empty() || padded_with_space(content) {
        return None;
    }
    Some((Inline::Italic(scanner.nested(content)), end + 1 - pos))
}

fn match_strikethrough(scanner: &InlineScanner<'_>, chars: &[char], pos: usize) -> Option<(Inline, usize)> {
    if !starts_with(chars, pos, "~~") {
        return None;
    }
    let start = pos + 2;
    let end = find(chars, start, "~~")?;
    if end == start {
        return None;
    }
    let children = scanner.nested(&chars[start..end]);
    Some((Inline::Strikethrough(children), end + 2 - pos))
}

fn match_code(_scanner: &InlineScanner<'_>, chars: &[char], pos: usize) -> Option<(Inline, usize)> {
    if chars[pos] != '`' || starts_with(chars, pos, "```") {
        return None;
    }
    let start = pos + 1;
    let end = find(chars, start, "`")?;
    if end == start {
        return None;
    }
    let code: String = chars[start..end].iter().collect();
    Some((Inline::Code(code), end + 1 - pos))
}

fn match_image(_scanner: &InlineScanner<'_>, chars: &[char], pos: usize) -> Option<(Inline, usize)> {
    if !starts_with(chars, pos, "![") {
        return None;
    }
    let close = matching_bracket(chars, pos + 1)?;
    let (url, end) = link_target(chars, close)?;
    let alt: String = chars[pos + 2..close].iter().collect();
    Some((Inline::Image { alt, url }, end + 1 - pos))
}

fn match_link(scanner: &InlineScanner<'_>, chars: &[char], pos: usize) -> Option<(Inline, usize)> {
    if chars[pos] != '[' {
        return None;
    }
    let close = matching_bracket(chars, pos)?;
    let (url, end) = link_target(chars, close)?;
    let children = scanner.nested(&chars[pos + 1..close]);
    Some((Inline::Link { children, url }, end + 1 - pos))
}

fn match_line_break(_scanner: &InlineScanner<'_>, chars: &[char], pos: usize) -> Option<(Inline, usize)> {
    if chars[pos] == ' ' {
        let spaces = chars[pos..].iter().take_while(|&&c| c == ' ').count();
        if spaces >= 2 && chars.get(pos + spaces) == Some(&'\n') {
            return Some((Inline::LineBreak, spaces + 1));
        }
        return None;
    }

    BREAK_TAGS
        .into_iter()
        .find(|tag| starts_with_ignore_case(chars, pos, tag))
        .map(|tag| (Inline::LineBreak, tag.chars().count()))
}
