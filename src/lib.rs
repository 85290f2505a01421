//! Basic text editor with character formatting
//!
//! This crate provides:
//! - A rope-backed document with bold/italic/underline markers that follow edits
//! - Linear undo/redo behind an injectable [`History`]
//! - The [`EditorShell`]: file identity, New/Open/Save/Save As, style toggles
//!   and the live word count, driven against a [`Host`] frontend
//! - A terminal frontend in [`tui`]

pub mod config;
pub mod document;
pub mod editing;
pub mod error;
pub mod layout;
pub mod markers;
pub mod render;
pub mod shell;
pub mod tui;
pub mod undo;

pub use config::{EditorConfig, FileFilter};
pub use document::{count_words, Document};
pub use editing::{EditOp, EditResult, Selection};
pub use error::EditorError;
pub use markers::{Markers, Style, Toggle};
pub use shell::{Command, EditorShell, FileOutcome, Host, Notice, NoticeLevel};
pub use undo::{History, UndoManager};

use unicode_segmentation::UnicodeSegmentation;

/// Caret motions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
}

/// The text buffer with its selection and history
pub struct Editor {
    document: Document,
    selection: Selection,
    history: Box<dyn History>,
    /// Remembered grapheme column for vertical movement
    preferred_column: Option<usize>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_history(Box::new(UndoManager::default()))
    }

    /// Create an editor that records edits into `history`
    pub fn with_history(history: Box<dyn History>) -> Self {
        Self {
            document: Document::new(),
            selection: Selection::default(),
            history,
            preferred_column: None,
        }
    }

    /// Create an editor with initial text content
    pub fn with_text(text: &str) -> Self {
        let mut editor = Self::new();
        editor.document = Document::from_text(text);
        editor
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn text(&self) -> String {
        self.document.text()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Caret offset
    pub fn caret(&self) -> usize {
        self.selection.active
    }

    pub fn word_count(&self) -> usize {
        self.document.word_count()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the whole buffer, forgetting markers, selection and history
    pub fn replace_all(&mut self, text: &str) {
        self.document.replace_all(text);
        self.selection = Selection::default();
        self.preferred_column = None;
        self.history.clear();
    }

    /// Select `anchor..active`, snapping both ends to char boundaries
    pub fn set_selection(&mut self, selection: Selection) {
        let anchor = self.snap(selection.anchor);
        let active = self.snap(selection.active);
        self.place(Selection::new(anchor, active));
    }

    pub fn select_all(&mut self) {
        self.place(Selection::new(0, self.document.len()));
    }

    /// Selected text, `None` when nothing is selected
    pub fn selected_text(&self) -> Option<String> {
        self.selection
            .non_empty_range()
            .map(|range| self.document.text_range(range))
    }

    /// Insert text at the caret, replacing a non-empty selection
    pub fn insert_text(&mut self, text: &str) -> EditResult {
        self.delete_selection();
        let op = EditOp::insert(self.caret(), text);
        self.apply(op)
    }

    /// Delete the selection, or one grapheme before/after the caret
    pub fn delete(&mut self, backward: bool) -> Option<EditResult> {
        if let Some(result) = self.delete_selection() {
            return Some(result);
        }

        let caret = self.caret();
        let (start, end) = if backward {
            (self.document.prev_grapheme_offset(caret), caret)
        } else {
            (caret, self.document.next_grapheme_offset(caret))
        };
        if start == end {
            return None;
        }
        Some(self.apply(EditOp::delete(start, end)))
    }

    /// Remove the selected text and return it
    pub fn cut(&mut self) -> Option<String> {
        let text = self.selected_text()?;
        self.history.record_boundary();
        self.delete_selection();
        self.history.record_boundary();
        Some(text)
    }

    pub fn copy(&self) -> Option<String> {
        self.selected_text()
    }

    /// Insert clipboard text as its own undo unit
    pub fn paste(&mut self, text: &str) -> Option<EditResult> {
        if text.is_empty() {
            return None;
        }
        self.history.record_boundary();
        let result = self.insert_text(text);
        self.history.record_boundary();
        Some(result)
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(&mut self.document) {
            Some(result) => {
                self.restore(result.selection);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(&mut self.document) {
            Some(result) => {
                self.restore(result.selection);
                true
            }
            None => false,
        }
    }

    /// Toggle `style` over the selection
    ///
    /// Returns `None` and changes nothing when the selection is empty.
    pub fn toggle_style(&mut self, style: Style) -> Option<Toggle> {
        let range = self.selection.non_empty_range()?;
        Some(self.document.markers_mut().toggle(style, range))
    }

    /// Move the caret, extending the selection when `extend` is set
    pub fn move_cursor(&mut self, motion: Motion, extend: bool) {
        let caret = self.caret();
        let collapsing = !extend && !self.selection.is_collapsed();

        let target = match motion {
            Motion::Left if collapsing => self.selection.start(),
            Motion::Right if collapsing => self.selection.end(),
            Motion::Left => self.document.prev_grapheme_offset(caret),
            Motion::Right => self.document.next_grapheme_offset(caret),
            Motion::Up | Motion::Down => {
                let line = self.document.line_of(caret);
                let column = match self.preferred_column {
                    Some(column) => column,
                    None => self.column_of(caret),
                };
                let target_line = if motion == Motion::Up {
                    line.checked_sub(1)
                } else {
                    Some(line + 1).filter(|l| *l < self.document.line_count())
                };
                let target = match target_line {
                    Some(l) => self.offset_at_column(l, column),
                    None if motion == Motion::Up => 0,
                    None => self.document.len(),
                };
                self.place(self.moved_to(target, extend));
                self.preferred_column = Some(column);
                return;
            }
            Motion::LineStart => self.document.line_start(self.document.line_of(caret)),
            Motion::LineEnd => self.document.line_end(self.document.line_of(caret)),
            Motion::DocumentStart => 0,
            Motion::DocumentEnd => self.document.len(),
        };

        self.place(self.moved_to(target, extend));
    }

    fn moved_to(&self, target: usize, extend: bool) -> Selection {
        if extend {
            let mut selection = self.selection;
            selection.extend_to(target);
            selection
        } else {
            Selection::collapsed(target)
        }
    }

    /// Grapheme column of `offset` within its line
    pub fn column_of(&self, offset: usize) -> usize {
        let start = self.document.line_start(self.document.line_of(offset));
        self.document
            .text_range(start..offset)
            .graphemes(true)
            .count()
    }

    fn offset_at_column(&self, line: usize, column: usize) -> usize {
        let start = self.document.line_start(line);
        let text = self.document.line_text(line);
        text.grapheme_indices(true)
            .nth(column)
            .map_or(start + text.len(), |(idx, _)| start + idx)
    }

    /// Clamp to the buffer and back off to a char boundary
    fn snap(&self, offset: usize) -> usize {
        let offset = offset.min(self.document.len());
        let line = self.document.line_of(offset);
        let start = self.document.line_start(line);
        let text = self.document.line_text(line);
        let mut local = (offset - start).min(text.len());
        while !text.is_char_boundary(local) {
            local -= 1;
        }
        start + local
    }

    /// Move the selection as a user action, closing the open undo unit
    fn place(&mut self, selection: Selection) {
        if selection != self.selection {
            self.history.record_boundary();
        }
        self.selection = selection;
        self.preferred_column = None;
    }

    fn restore(&mut self, selection: Selection) {
        let len = self.document.len();
        self.selection = Selection::new(selection.anchor.min(len), selection.active.min(len));
        self.preferred_column = None;
    }

    fn delete_selection(&mut self) -> Option<EditResult> {
        let range = self.selection.non_empty_range()?;
        Some(self.apply(EditOp::delete(range.start, range.end)))
    }

    fn apply(&mut self, op: EditOp) -> EditResult {
        let before = self.selection;
        let reverse = self.document.compute_reverse(&op);
        let result = self.document.apply_edit(&op);
        self.history.record(op, reverse, before);
        self.selection = Selection::collapsed(result.new_cursor);
        self.preferred_column = None;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_editor() {
        let editor = Editor::new();
        assert_eq!(editor.text(), "");
        assert_eq!(editor.word_count(), 0);
    }

    #[test]
    fn test_insert_text() {
        let mut editor = Editor::new();
        editor.insert_text("Hello, World!");
        assert_eq!(editor.text(), "Hello, World!");
        assert_eq!(editor.caret(), 13);
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut editor = Editor::with_text("Hello, World!");
        editor.set_selection(Selection::new(7, 12));
        editor.insert_text("Rust");
        assert_eq!(editor.text(), "Hello, Rust!");
    }

    #[test]
    fn test_undo_redo() {
        let mut editor = Editor::new();
        editor.insert_text("Hello");
        assert_eq!(editor.text(), "Hello");

        assert!(editor.undo());
        assert_eq!(editor.text(), "");

        assert!(editor.redo());
        assert_eq!(editor.text(), "Hello");
        assert!(!editor.redo());
    }

    #[test]
    fn test_typed_run_is_one_undo_unit() {
        let mut editor = Editor::new();
        for c in ["h", "i", " ", "y", "o"] {
            editor.insert_text(c);
        }
        editor.move_cursor(Motion::Left, false);
        editor.insert_text("!");
        assert_eq!(editor.text(), "hi y!o");

        editor.undo();
        assert_eq!(editor.text(), "hi yo");
        editor.undo();
        assert_eq!(editor.text(), "");
    }

    #[test]
    fn test_delete_backward_and_forward() {
        let mut editor = Editor::with_text("abc");
        editor.move_cursor(Motion::DocumentEnd, false);
        editor.delete(true);
        assert_eq!(editor.text(), "ab");

        editor.move_cursor(Motion::DocumentStart, false);
        editor.delete(false);
        assert_eq!(editor.text(), "b");

        editor.move_cursor(Motion::DocumentEnd, false);
        assert!(editor.delete(false).is_none());
    }

    #[test]
    fn test_cut_copy_paste() {
        let mut editor = Editor::with_text("one two");
        assert_eq!(editor.copy(), None);

        editor.set_selection(Selection::new(0, 4));
        assert_eq!(editor.copy().as_deref(), Some("one "));
        let cut = editor.cut();
        assert_eq!(cut.as_deref(), Some("one "));
        assert_eq!(editor.text(), "two");

        editor.move_cursor(Motion::DocumentEnd, false);
        editor.paste(" one");
        assert_eq!(editor.text(), "two one");

        editor.undo();
        assert_eq!(editor.text(), "two");
        editor.undo();
        assert_eq!(editor.text(), "one two");
    }

    #[test]
    fn test_vertical_motion_keeps_column() {
        let mut editor = Editor::with_text("abcdef\nxy\nmnopqr");
        editor.set_selection(Selection::collapsed(4));
        editor.move_cursor(Motion::Down, false);
        assert_eq!(editor.caret(), 9);
        editor.move_cursor(Motion::Down, false);
        assert_eq!(editor.caret(), 14);
        editor.move_cursor(Motion::Up, false);
        editor.move_cursor(Motion::Up, false);
        assert_eq!(editor.caret(), 4);
        editor.move_cursor(Motion::Up, false);
        assert_eq!(editor.caret(), 0);
    }

    #[test]
    fn test_shift_motion_extends() {
        let mut editor = Editor::with_text("hello world");
        editor.move_cursor(Motion::LineEnd, true);
        assert_eq!(editor.selected_text().as_deref(), Some("hello world"));
        editor.move_cursor(Motion::Left, false);
        assert!(editor.selection().is_collapsed());
        assert_eq!(editor.caret(), 0);
    }

    #[test]
    fn test_toggle_style_needs_selection() {
        let mut editor = Editor::with_text("hello");
        assert_eq!(editor.toggle_style(Style::Bold), None);
        assert!(editor.document().markers().is_empty());

        editor.select_all();
        assert_eq!(editor.toggle_style(Style::Bold), Some(Toggle::Applied));
        assert_eq!(editor.document().markers().ranges(Style::Bold), &[0..5]);
    }

    #[test]
    fn test_set_selection_snaps_to_char_boundary() {
        let mut editor = Editor::with_text("h€llo");
        editor.set_selection(Selection::new(0, 2));
        assert_eq!(editor.selection(), Selection::new(0, 1));

        let mut editor = Editor::with_text("ab\n\u{20ac}x");
        editor.set_selection(Selection::new(5, 4));
        assert_eq!(editor.selection(), Selection::new(3, 3));
        assert_eq!(editor.selected_text(), None);
    }
}
