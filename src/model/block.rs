//! Logical blocks: physical lines grouped into one candidate message.

/// One reconstructed unit of input, believed to hold exactly one message.
///
/// The first line is normally a header line; continuation lines are joined
/// with `\n`. A block that opens without a header (input preamble) is kept
/// anyway and is rejected later by extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalBlock {
    text: String,
    first_line: usize,
    line_count: usize,
}

impl LogicalBlock {
    /// Start a block from its first physical line (1-indexed line number).
    #[must_use]
    pub fn new(first_line: usize, line: &str) -> Self {
        Self {
            text: line.to_string(),
            first_line,
            line_count: 1,
        }
    }

    /// Append a continuation line.
    pub fn push_line(&mut self, line: &str) {
        self.text.push('\n');
        self.text.push_str(line);
        self.line_count += 1;
    }

    /// Full block text, continuation lines joined by `\n`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Line number (1-indexed) of the first physical line.
    #[must_use]
    pub const fn first_line(&self) -> usize {
        self.first_line
    }

    /// Number of physical lines in the block.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.line_count
    }

    /// A single-line preview for diagnostics, cut at `max_len` bytes on a
    /// character boundary.
    #[must_use]
    pub fn preview(&self, max_len: usize) -> String {
        let first = self.text.lines().next().unwrap_or_default();
        if first.len() <= max_len {
            return first.to_string();
        }
        let mut end = max_len;
        while end > 0 && !first.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &first[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_line_joins_with_newline() {
        let mut block = LogicalBlock::new(4, "5/1/23, 9:05 - Alice: first");
        block.push_line("second");
        block.push_line("");

        assert_eq!(block.text(), "5/1/23, 9:05 - Alice: first\nsecond\n");
        assert_eq!(block.first_line(), 4);
        assert_eq!(block.line_count(), 3);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let block = LogicalBlock::new(1, "héllo wörld");
        assert_eq!(block.preview(2), "h...");
        assert_eq!(block.preview(100), "héllo wörld");
    }
}
