use crate::location::Location;

/// A source buffer with a precomputed line index.
///
/// The index is built once by scanning the text for newlines; after that,
/// `line_column` answers in O(log lines) by binary search over the line
/// start offsets.
#[derive(Debug)]
pub struct Source {
    text: String,
    line_starts: Vec<usize>,
}

impl Source {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Source { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The line and 0-based column holding the given byte offset.
    pub fn line_column(&self, offset: usize) -> Location {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        Location::new(line, offset - self.line_starts[line - 1])
    }

    /// The literal text at `offset`, clamped to the end of the buffer.
    pub fn literal(&self, offset: usize, length: usize) -> &str {
        let start = offset.min(self.text.len());
        let end = (offset + length).min(self.text.len());
        &self.text[start..end]
    }

    /// The text of a 1-based line, without its trailing newline. Lines past
    /// the end of the buffer render as empty.
    pub fn line_text(&self, line: usize) -> &str {
        if line == 0 || line > self.line_starts.len() {
            return "";
        }
        let start = self.line_starts[line - 1];
        let end = match self.line_starts.get(line) {
            Some(&next) => next - 1,
            None => self.text.len(),
        };
        &self.text[start..end]
    }
}
