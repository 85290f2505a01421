//! Word-wrapping line breaker over cell widths

use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cells a tab occupies
pub const TAB_WIDTH: usize = 4;

/// Terminal cells taken by one grapheme cluster
pub fn cell_width(grapheme: &str) -> usize {
    if grapheme == "\t" {
        TAB_WIDTH
    } else if grapheme.chars().all(char::is_control) {
        0
    } else {
        grapheme.width()
    }
}

/// Breaks a single line (no newlines) into rows of at most `max_width` cells
#[derive(Debug, Clone, Copy)]
pub struct LineBreaker {
    max_width: usize,
}

impl LineBreaker {
    pub fn new(max_width: usize) -> Self {
        Self {
            max_width: max_width.max(1),
        }
    }

    /// Byte ranges of each row, covering `text` without gaps
    ///
    /// Rows break after the last whitespace that fits; a word longer than a
    /// row is broken where it overflows. An empty line is one empty row.
    pub fn wrap(&self, text: &str) -> Vec<Range<usize>> {
        let mut rows = Vec::new();
        let mut row_start = 0;
        let mut x = 0;
        let mut last_break: Option<(usize, usize)> = None;

        for (idx, grapheme) in text.grapheme_indices(true) {
            let width = cell_width(grapheme);
            let blank = grapheme.chars().all(char::is_whitespace);

            // Whitespace may hang past the edge; only visible text wraps
            if !blank && x + width > self.max_width && idx > row_start {
                let (break_at, break_x) = last_break.unwrap_or((idx, x));
                rows.push(row_start..break_at);
                row_start = break_at;
                x -= break_x;
                last_break = None;
            }

            x += width;
            if blank {
                last_break = Some((idx + grapheme.len(), x));
            }
        }

        rows.push(row_start..text.len());
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line() {
        assert_eq!(LineBreaker::new(10).wrap(""), vec![0..0]);
    }

    #[test]
    fn test_single_row() {
        assert_eq!(LineBreaker::new(10).wrap("Hello"), vec![0..5]);
    }

    #[test]
    fn test_breaks_after_whitespace() {
        assert_eq!(LineBreaker::new(8).wrap("Hello World"), vec![0..6, 6..11]);
    }

    #[test]
    fn test_long_word_hard_break() {
        assert_eq!(LineBreaker::new(4).wrap("abcdefghij"), vec![0..4, 4..8, 8..10]);
    }

    #[test]
    fn test_trailing_space_stays_on_row() {
        assert_eq!(LineBreaker::new(5).wrap("hello world"), vec![0..6, 6..11]);
    }

    #[test]
    fn test_wide_chars_count_two_cells() {
        assert_eq!(LineBreaker::new(4).wrap("日本語"), vec![0..6, 6..9]);
        assert_eq!(cell_width("\t"), TAB_WIDTH);
    }
}
