//! Render-ready runs of uniformly styled text

use crate::document::Document;
use crate::editing::Selection;
use crate::layout::{VisualLine, TAB_WIDTH};
use crate::markers::StyleSet;
use unicode_segmentation::UnicodeSegmentation;

/// A stretch of one row sharing styles and selection state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    /// Text to draw, tabs expanded to spaces
    pub text: String,
    pub styles: StyleSet,
    pub selected: bool,
}

/// Split a row into runs, merging neighbouring graphemes with equal attributes
pub fn row_runs(document: &Document, selection: &Selection, row: &VisualLine) -> Vec<TextRun> {
    let text = document.text_range(row.range.clone());
    let markers = document.markers();
    let mut runs: Vec<TextRun> = Vec::new();

    for (idx, grapheme) in text.grapheme_indices(true) {
        let offset = row.range.start + idx;
        let styles = markers.styles_at(offset);
        let selected = selection.contains(offset);

        let expanded;
        let piece = if grapheme == "\t" {
            expanded = " ".repeat(TAB_WIDTH);
            expanded.as_str()
        } else if grapheme.chars().all(char::is_control) {
            // \r and other controls would move the terminal cursor
            continue;
        } else {
            grapheme
        };

        match runs.last_mut() {
            Some(run) if run.styles == styles && run.selected == selected => run.text.push_str(piece),
            _ => runs.push(TextRun {
                text: piece.to_string(),
                styles,
                selected,
            }),
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::Style;

    fn row(range: std::ops::Range<usize>) -> VisualLine {
        VisualLine { line: 0, range }
    }

    #[test]
    fn test_plain_row_is_one_run() {
        let doc = Document::from_text("hello");
        let runs = row_runs(&doc, &Selection::default(), &row(0..5));
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "hello");
        assert!(runs[0].styles.is_empty());
    }

    #[test]
    fn test_runs_split_on_styles_and_selection() {
        let mut doc = Document::from_text("hello world");
        doc.markers_mut().add(Style::Bold, 0..5);
        doc.markers_mut().add(Style::Underline, 3..8);
        let selection = Selection::new(9, 11);

        let runs = row_runs(&doc, &selection, &row(0..11));
        let texts: Vec<_> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["hel", "lo", " wo", "r", "ld"]);
        assert_eq!(runs[1].styles.as_slice(), &[Style::Bold, Style::Underline]);
        assert!(runs[4].selected);
        assert!(!runs[3].selected);
    }

    #[test]
    fn test_tabs_expand_and_controls_drop() {
        let doc = Document::from_text("a\tb\r");
        let runs = row_runs(&doc, &Selection::default(), &row(0..4));
        assert_eq!(runs[0].text, "a    b");
    }
}
