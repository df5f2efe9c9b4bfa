//! Source positions for template files.
//!
//! Templates are handled as raw bytes, so positions start life as byte offsets.
//! [`LineIndex`] turns an offset into a 1-based line/column pair for reporting.

/// Pure position information in a template file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
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

/// Position plus the source line it points into, for cargo-style display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    /// The source line content for display.
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

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

/// Byte offset → line lookup table for one buffer.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &[u8]) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .iter()
                .enumerate()
                .filter(|(_, b)| **b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// 1-based line containing `offset`.
    pub fn line(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(idx) => idx,
        }
    }

    /// 1-based (line, column) for `offset`. Columns count characters, not bytes.
    pub fn line_col(&self, source: &[u8], offset: usize) -> (usize, usize) {
        let line = self.line(offset);
        let start = self.line_starts[line - 1];
        let end = offset.min(source.len());
        let col = String::from_utf8_lossy(&source[start..end]).chars().count() + 1;
        (line, col)
    }

    /// Text of the 1-based `line`, without its line terminator.
    pub fn line_text(&self, source: &[u8], line: usize) -> String {
        let Some(&start) = self.line_starts.get(line.saturating_sub(1)) else {
            return String::new();
        };
        let end = self
            .line_starts
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(source.len());
        String::from_utf8_lossy(&source[start..end.max(start)])
            .trim_end_matches('\r')
            .to_string()
    }

    /// Build a [`SourceContext`] for a byte offset in `file_path`.
    pub fn context(&self, file_path: &str, source: &[u8], offset: usize) -> SourceContext {
        let (line, col) = self.line_col(source, offset);
        SourceContext::new(
            SourceLocation::new(file_path, line, col),
            self.line_text(source, line),
        )
    }
}
