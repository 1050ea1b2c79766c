//! Structural rewriter.
//!
//! Each rule is a pure function from old text to new text plus a change log.
//! Both rules are idempotent: applying a rule to its own output matches
//! nothing and reports no change.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use regex::Regex;

use crate::core::{
    data::LineIndex,
    tables::remap_category,
    text::{blank_comments, find_closing, mask_nested},
};

/// One edit made by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    CategoryRenamed {
        line: usize,
        from: String,
        to: String,
    },
    BlockRemoved {
        line: usize,
    },
}

impl Change {
    pub fn line(&self) -> usize {
        match self {
            Change::CategoryRenamed { line, .. } | Change::BlockRemoved { line } => *line,
        }
    }
}

impl std::fmt::Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Change::CategoryRenamed { line, from, to } => {
                write!(f, "line {}: {} -> {}", line, from, to)
            }
            Change::BlockRemoved { line } => write!(f, "line {}: removed block", line),
        }
    }
}

/// Output of a rule applied to one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub changes: Vec<Change>,
}

/// A compiled rule, ready to run over many files.
#[derive(Debug, Clone)]
pub enum RewriteRule {
    /// `category: <namespace>.<old>` → `category: <namespace>.<new>`.
    CategoryRemap { pattern: Regex },
    /// Remove every `<constructor>(...)` block whose `key` attribute matches.
    DeleteField { opener: Regex, key_attr: Regex },
}

impl RewriteRule {
    /// Rename old category names using the compiled-in remap table.
    pub fn category_remap(namespace: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"\bcategory\s*:\s*{}\.(\w+)\b",
            regex::escape(namespace)
        ))
        .with_context(|| format!("Invalid category namespace: {}", namespace))?;
        Ok(RewriteRule::CategoryRemap { pattern })
    }

    /// Remove `constructor(...)` blocks whose `key` attribute is `key`.
    pub fn delete_field(constructor: &str, key: &str) -> Result<Self> {
        let opener = Regex::new(&format!(
            r"(?:\bconst\s+)?\b{}\s*\(",
            regex::escape(constructor)
        ))
        .with_context(|| format!("Invalid field constructor: {}", constructor))?;
        let key_attr = Regex::new(&format!(r#"\bkey\s*:\s*['"]{}['"]"#, regex::escape(key)))
            .with_context(|| format!("Invalid field key: {}", key))?;
        Ok(RewriteRule::DeleteField { opener, key_attr })
    }

    pub fn apply(&self, text: &str) -> Rewrite {
        match self {
            RewriteRule::CategoryRemap { pattern } => remap_categories(text, pattern),
            RewriteRule::DeleteField { opener, key_attr } => {
                delete_field_blocks(text, opener, key_attr)
            }
        }
    }
}

fn remap_categories(text: &str, pattern: &Regex) -> Rewrite {
    let index = LineIndex::new(text);

    let mut content = String::with_capacity(text.len());
    let mut changes = Vec::new();
    let mut last = 0;

    for caps in pattern.captures_iter(text) {
        let Some(name) = caps.get(1) else {
            continue;
        };
        let new = remap_category(name.as_str());
        if new == name.as_str() {
            continue;
        }
        content.push_str(&text[last..name.start()]);
        content.push_str(new);
        last = name.end();
        changes.push(Change::CategoryRenamed {
            line: index.line_of(name.start()),
            from: name.as_str().to_string(),
            to: new.to_string(),
        });
    }
    content.push_str(&text[last..]);

    Rewrite { content, changes }
}

/// The block's end is the bracket that actually closes its opener, so
/// nested calls inside the block are removed with it. The separating comma
/// goes too, and a block that sat on its own lines takes those lines along.
fn delete_field_blocks(text: &str, opener: &Regex, key_attr: &Regex) -> Rewrite {
    let index = LineIndex::new(text);
    // Offsets in `code` are valid in `text`; commented-out blocks never match.
    let code = blank_comments(text);
    let bytes = code.as_bytes();

    let mut removals: Vec<(usize, usize)> = Vec::new();
    let mut changes = Vec::new();
    let mut cursor = 0;

    while let Some(m) = opener.find_at(&code, cursor) {
        let start = m.start();
        let open = m.end() - 1;
        let line_start = code[..start].rfind('\n').map_or(0, |i| i + 1);

        let Some(close) = find_closing(&code, open) else {
            tracing::debug!(offset = start, "unterminated block, leaving as is");
            cursor = m.end();
            continue;
        };
        cursor = close + 1;

        if !key_attr.is_match(&mask_nested(&code[open + 1..close])) {
            continue;
        }

        let floor = removals.last().map_or(0, |&(_, end)| end);
        let after_comma = skip_horizontal(bytes, close + 1);
        let has_comma = bytes.get(after_comma) == Some(&b',');
        let tail = if has_comma {
            skip_horizontal(bytes, after_comma + 1)
        } else {
            after_comma
        };
        let starts_line = line_start >= floor && code[line_start..start].trim().is_empty();

        let range = if starts_line && let Some(eol) = line_end(bytes, tail) {
            (line_start, eol)
        } else if has_comma {
            (start, tail)
        } else {
            match preceding_comma(bytes, start, floor) {
                Some(comma) => (comma, close + 1),
                None => (start, close + 1),
            }
        };

        removals.push(range);
        changes.push(Change::BlockRemoved {
            line: index.line_of(start),
        });
    }

    let mut content = String::with_capacity(text.len());
    let mut last = 0;
    for (from, to) in removals {
        content.push_str(&text[last..from]);
        last = to;
    }
    content.push_str(&text[last..]);

    Rewrite { content, changes }
}

fn skip_horizontal(bytes: &[u8], mut i: usize) -> usize {
    while matches!(bytes.get(i), Some(b' ' | b'\t')) {
        i += 1;
    }
    i
}

/// If only a line break (or the end of text) follows `i`, the index past it.
fn line_end(bytes: &[u8], i: usize) -> Option<usize> {
    match bytes.get(i) {
        None => Some(i),
        Some(b'\n') => Some(i + 1),
        Some(b'\r') if bytes.get(i + 1) == Some(&b'\n') => Some(i + 2),
        _ => None,
    }
}

/// A comma separated from `start` only by whitespace, not before `floor`.
fn preceding_comma(bytes: &[u8], start: usize, floor: usize) -> Option<usize> {
    let mut i = start;
    while i > floor {
        i -= 1;
        match bytes[i] {
            b',' => return Some(i),
            b' ' | b'\t' | b'\n' | b'\r' => {}
            _ => return None,
        }
    }
    None
}

/// Result of running a rule over one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRewrite {
    pub path: PathBuf,
    pub changes: Vec<Change>,
    /// False when nothing changed or writes were suppressed.
    pub written: bool,
}

impl FileRewrite {
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Read `path` whole, apply `rule`, and write it back only if the bytes differ.
pub fn rewrite_file(path: &Path, rule: &RewriteRule, dry_run: bool) -> Result<FileRewrite> {
    let original = fs::read_to_string(path)
        .with_context(|| format!("Failed to read: {}", path.display()))?;
    let rewrite = rule.apply(&original);

    let differs = rewrite.content != original;
    let written = differs && !dry_run;
    if written {
        fs::write(path, &rewrite.content)
            .with_context(|| format!("Failed to write: {}", path.display()))?;
        tracing::debug!(path = %path.display(), changes = rewrite.changes.len(), "rewritten");
    } else if !differs {
        tracing::debug!(path = %path.display(), "unchanged");
    }

    Ok(FileRewrite {
        path: path.to_path_buf(),
        changes: if differs { rewrite.changes } else { Vec::new() },
        written,
    })
}
