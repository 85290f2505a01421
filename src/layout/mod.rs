//! Soft-wrapping of buffer lines into terminal rows

mod line_break;

pub use line_break::{cell_width, LineBreaker, TAB_WIDTH};

use crate::document::Document;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// One screen row of a logical line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualLine {
    /// Logical line index
    pub line: usize,
    /// Byte range in the document, newline excluded
    pub range: Range<usize>,
}

/// Wrap logical lines from `first_line` until `max_rows` rows are produced
pub fn layout_rows(
    document: &Document,
    first_line: usize,
    max_width: usize,
    max_rows: usize,
) -> Vec<VisualLine> {
    let breaker = LineBreaker::new(max_width);
    let mut rows = Vec::with_capacity(max_rows);
    let mut line = first_line;
    while rows.len() < max_rows && line < document.line_count() {
        let start = document.line_start(line);
        let text = document.line_text(line);
        for range in breaker.wrap(&text) {
            if rows.len() == max_rows {
                break;
            }
            rows.push(VisualLine {
                line,
                range: start + range.start..start + range.end,
            });
        }
        line += 1;
    }
    rows
}

/// Rows taken by one logical line
pub fn line_rows(document: &Document, line: usize, max_width: usize) -> usize {
    LineBreaker::new(max_width)
        .wrap(&document.line_text(line))
        .len()
}

/// Row (counted from the first row of its line) and cell column of `offset`
pub fn caret_cell(document: &Document, offset: usize, max_width: usize) -> (usize, usize) {
    let line = document.line_of(offset);
    let start = document.line_start(line);
    let text = document.line_text(line);
    let local = offset - start;

    let segments = LineBreaker::new(max_width).wrap(&text);
    // A caret on a wrap point belongs to the row it starts
    let row = segments
        .iter()
        .rposition(|seg| seg.start <= local)
        .unwrap_or(0);
    let seg_start = segments.get(row).map_or(0, |seg| seg.start);
    let column = text[seg_start..local.min(text.len())]
        .graphemes(true)
        .map(cell_width)
        .sum();
    (row, column)
}
