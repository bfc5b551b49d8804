//! Line reconstruction: physical lines to logical blocks.
//!
//! Exporters do not escape newlines inside a message, so a message that
//! wraps shows up as a header line followed by plain continuation lines.
//! The reconstructor is a two-state machine, with or without an open block,
//! driven by whether the next line matches the header grammar.

use crate::model::LogicalBlock;

use super::header::is_header_line;

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Open(LogicalBlock),
}

/// Accumulates lines into [`LogicalBlock`]s.
///
/// Feed lines in order with [`push_line`](Self::push_line) and call
/// [`finish`](Self::finish) to flush the last open block.
#[derive(Debug, Default)]
pub struct LineReconstructor {
    state: State,
    blocks: Vec<LogicalBlock>,
}

impl LineReconstructor {
    /// Create an idle reconstructor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one physical line.
    ///
    /// A header line closes the open block, if any, and opens a new one.
    /// Any other line is appended to the open block. Lines seen before the
    /// first header open a preamble block that extraction will reject.
    pub fn push_line(&mut self, line_num: usize, line: &str) {
        let header = is_header_line(line);
        match std::mem::take(&mut self.state) {
            State::Idle => {
                self.state = State::Open(LogicalBlock::new(line_num, line));
            }
            State::Open(block) if header => {
                self.blocks.push(block);
                self.state = State::Open(LogicalBlock::new(line_num, line));
            }
            State::Open(mut block) => {
                block.push_line(line);
                self.state = State::Open(block);
            }
        }
    }

    /// Number of blocks completed so far, not counting the open one.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.blocks.len()
    }

    /// Flush the open block and return all blocks in input order.
    #[must_use]
    pub fn finish(mut self) -> Vec<LogicalBlock> {
        if let State::Open(block) = self.state {
            self.blocks.push(block);
        }
        self.blocks
    }
}

/// Reconstruct blocks from numbered lines in one call.
#[must_use]
pub fn reconstruct_blocks<'a, I>(lines: I) -> Vec<LogicalBlock>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut reconstructor = LineReconstructor::new();
    for (line_num, line) in lines {
        reconstructor.push_line(line_num, line);
    }
    reconstructor.finish()
}
