use serde::Serialize;

/// Position of a declaration in a source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourceLocation {
    /// Path to the source file as it was scanned.
    #[serde(rename = "file")]
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in characters).
    #[serde(skip)]
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// A location plus the text of the line it points at, for caret output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    // Convenience accessors
    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}

/// Byte offsets of line starts, for O(log n) offset → line lookups.
///
/// Line 1 starts at offset 0, line 2 starts after the first `\n`, etc.
pub struct LineIndex<'a> {
    content: &'a str,
    offsets: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(content: &'a str) -> Self {
        let mut offsets = vec![0];
        for (i, c) in content.char_indices() {
            if c == '\n' {
                offsets.push(i + 1);
            }
        }
        Self { content, offsets }
    }

    /// 1-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Build a `SourceContext` for the byte `offset` in `file_path`.
    pub fn context_at(&self, file_path: &str, offset: usize) -> SourceContext {
        let line = self.line_of(offset);
        let start = self.offsets[line - 1];
        let end = self
            .offsets
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(self.content.len());
        let text = self.content[start..end].trim_end_matches('\r');
        let col = self.content[start..offset].chars().count() + 1;

        SourceContext::new(SourceLocation::new(file_path, line, col), text)
    }
}
