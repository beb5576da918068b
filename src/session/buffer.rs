//! Bounded console history for the session

use std::collections::VecDeque;

use crate::OutputLine;

/// Maximum number of output chunks kept for display
pub const OUTPUT_BUFFER_CAPACITY: usize = 500;

/// Most-recent-last output history, oldest entries are evicted first
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    lines: VecDeque<OutputLine>,
    max_lines: usize,
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new(OUTPUT_BUFFER_CAPACITY)
    }
}

impl OutputBuffer {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(max_lines),
            max_lines,
        }
    }

    /// Append a line, evicting the oldest one when full
    pub fn push(&mut self, line: OutputLine) {
        if self.max_lines == 0 {
            return;
        }
        while self.lines.len() >= self.max_lines {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &OutputLine> + ExactSizeIterator {
        self.lines.iter()
    }

    /// Raw text of every entry, oldest first
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    /// Get the last N lines
    pub fn last_n(&self, n: usize) -> Vec<&OutputLine> {
        let skip = self.lines.len().saturating_sub(n);
        self.lines.iter().skip(skip).collect()
    }

    /// Everything joined as displayed in the console
    pub fn to_display_string(&self) -> String {
        self.lines.iter().map(|l| l.display_text()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_last_500_in_order() {
        let mut buffer = OutputBuffer::default();
        for i in 0..501 {
            buffer.push(OutputLine::stdout(format!("line{}\n", i)));
        }

        assert_eq!(buffer.len(), OUTPUT_BUFFER_CAPACITY);
        let texts = buffer.texts();
        assert_eq!(texts[0], "line1\n");
        assert_eq!(texts[499], "line500\n");
        for (idx, text) in texts.iter().enumerate() {
            assert_eq!(*text, format!("line{}\n", idx + 1));
        }
    }

    #[test]
    fn test_never_exceeds_bound_under_volume() {
        let mut buffer = OutputBuffer::new(3);
        for i in 0..10_000 {
            buffer.push(OutputLine::stderr(i.to_string()));
            assert!(buffer.len() <= 3);
        }
        assert_eq!(buffer.texts(), vec!["9997", "9998", "9999"]);
    }

    #[test]
    fn test_last_n_and_display() {
        let mut buffer = OutputBuffer::default();
        buffer.push(OutputLine::stdout("ok\n"));
        buffer.push(OutputLine::stderr("boom\n"));

        let last: Vec<_> = buffer.last_n(1).iter().map(|l| l.text.clone()).collect();
        assert_eq!(last, vec!["boom\n"]);
        assert_eq!(buffer.last_n(10).len(), 2);
        assert_eq!(buffer.to_display_string(), "ok\nERROR: boom\n");

        buffer.clear();
        assert!(buffer.is_empty());
    }
}
