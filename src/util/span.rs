//! Source location tracking
//!
//! Tokens carry a [`Span`] (a shared [`SourceFile`] plus byte offsets).
//! Line and column are only computed when a location is actually needed.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Source position (line, column, and byte offset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, counted in characters)
    pub column: usize,
    /// Byte offset from start of file
    pub offset: usize,
}

impl Position {
    #[inline]
    pub fn with_offset(
        line: usize,
        column: usize,
        offset: usize,
    ) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A resolved, owned location: what diagnostics and errors carry around.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub path: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

/// Source file information
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File name
    pub name: String,
    /// File content
    pub content: String,
    /// Line offsets for fast line lookup
    line_offsets: Vec<usize>,
}

impl SourceFile {
    /// Create a new source file
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let mut line_offsets = vec![0];
        line_offsets.extend(content.match_indices('\n').map(|(i, _)| i + 1));

        Self {
            name: name.into(),
            content,
            line_offsets,
        }
    }

    /// Get position from byte offset
    pub fn position_from_offset(
        &self,
        offset: usize,
    ) -> Position {
        let offset = offset.min(self.content.len());
        let line = self.line_offsets.partition_point(|&o| o <= offset);
        let line_start = self.line_offsets[line.saturating_sub(1)];
        let column = self
            .content
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(0);
        Position::with_offset(line, column + 1, offset)
    }

    /// Text of a 1-indexed line, without its newline
    pub fn line_text(
        &self,
        line: usize,
    ) -> Option<&str> {
        let start = *self.line_offsets.get(line.checked_sub(1)?)?;
        let end = self
            .line_offsets
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(self.content.len());
        self.content
            .get(start..end)
            .map(|text| text.trim_end_matches('\r'))
    }
}

impl fmt::Display for SourceFile {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Byte range inside a shared source file
#[derive(Clone)]
pub struct Span {
    file: Arc<SourceFile>,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(
        file: Arc<SourceFile>,
        start: usize,
        end: usize,
    ) -> Self {
        Self { file, start, end }
    }

    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    pub fn start_position(&self) -> Position {
        self.file.position_from_offset(self.start)
    }

    /// Resolve this span's start into a `path:line:column` location
    pub fn location(&self) -> Location {
        let position = self.start_position();
        Location {
            path: self.file.name.clone(),
            line: position.line,
            column: position.column,
        }
    }

    /// Source text covered by the span
    pub fn text(&self) -> &str {
        self.file.content.get(self.start..self.end).unwrap_or("")
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl PartialEq for Span {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        Arc::ptr_eq(&self.file, &other.file) && self.start == other.start && self.end == other.end
    }
}

impl fmt::Debug for Span {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}@{}..{}", self.file.name, self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_offset() {
        let file = SourceFile::new("test.jay", "ab\ncd\n\nef");
        assert_eq!(file.position_from_offset(0), Position::with_offset(1, 1, 0));
        assert_eq!(file.position_from_offset(1), Position::with_offset(1, 2, 1));
        assert_eq!(file.position_from_offset(3), Position::with_offset(2, 1, 3));
        assert_eq!(file.position_from_offset(7).line, 4);
    }

    #[test]
    fn test_columns_count_characters() {
        let file = SourceFile::new("test.jay", "\"é\" x");
        assert_eq!(file.position_from_offset(5).column, 5);
    }

    #[test]
    fn test_line_text() {
        let file = SourceFile::new("test.jay", "first\r\nsecond\nthird");
        assert_eq!(file.line_text(1), Some("first"));
        assert_eq!(file.line_text(2), Some("second"));
        assert_eq!(file.line_text(3), Some("third"));
        assert_eq!(file.line_text(4), None);
        assert_eq!(file.line_text(0), None);
    }

    #[test]
    fn test_span_location_is_lazy_and_located() {
        let file = Arc::new(SourceFile::new("main.jay", "x <- 1\nwrite: x"));
        let span = Span::new(file, 7, 13);
        assert_eq!(span.text(), "write:");
        assert_eq!(span.location().to_string(), "main.jay:2:1");
    }
}
