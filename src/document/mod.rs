//! Document model: rope-backed text plus style markers

mod rope;

pub use rope::{Chunks, Rope};

use crate::editing::{EditOp, EditResult};
use crate::markers::Markers;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Whitespace plus the ASCII file, group, record and unit separators
fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Count words separated by runs of whitespace
pub fn count_words(text: &str) -> usize {
    text.split(is_word_separator)
        .filter(|word| !word.is_empty())
        .count()
}

/// The editor buffer
///
/// Offsets are byte offsets on `char` boundaries. Style markers live next to
/// the text so every edit moves them in step.
#[derive(Debug, Default)]
pub struct Document {
    content: Rope,
    markers: Markers,
    /// Monotonic version counter
    version: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            content: Rope::from_text(text),
            ..Self::default()
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn text(&self) -> String {
        self.content.to_string()
    }

    pub fn text_range(&self, range: Range<usize>) -> String {
        self.content.slice(range.start, range.end)
    }

    /// Leaf chunks of the text, in order
    pub fn chunks(&self) -> Chunks<'_> {
        self.content.chunks()
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn markers_mut(&mut self) -> &mut Markers {
        &mut self.markers
    }

    /// Replace everything, dropping all markers
    pub fn replace_all(&mut self, text: &str) {
        self.content = Rope::from_text(text);
        self.markers.clear();
        self.version += 1;
    }

    /// Count whitespace-separated words without materializing the text
    pub fn word_count(&self) -> usize {
        let mut words = 0;
        let mut in_word = false;
        for c in self.chunks().flat_map(str::chars) {
            if is_word_separator(c) {
                in_word = false;
            } else if !in_word {
                in_word = true;
                words += 1;
            }
        }
        words
    }

    pub fn line_count(&self) -> usize {
        self.content.newline_count() + 1
    }

    /// Line containing `offset`
    pub fn line_of(&self, offset: usize) -> usize {
        self.content.line_of(offset)
    }

    pub fn line_start(&self, line: usize) -> usize {
        self.content.line_start(line)
    }

    /// Offset of the end of `line`, before its newline
    pub fn line_end(&self, line: usize) -> usize {
        if line + 1 >= self.line_count() {
            self.len()
        } else {
            self.content.line_start(line + 1) - 1
        }
    }

    /// Text of `line` without its newline
    pub fn line_text(&self, line: usize) -> String {
        self.content.slice(self.line_start(line), self.line_end(line))
    }

    /// Offset after the grapheme cluster starting at `offset`
    pub fn next_grapheme_offset(&self, offset: usize) -> usize {
        if offset >= self.len() {
            return self.len();
        }
        let line = self.line_of(offset);
        let (start, end) = (self.line_start(line), self.line_end(line));
        if offset >= end {
            // Step over the newline
            return offset + 1;
        }
        let text = self.content.slice(start, end);
        text.grapheme_indices(true)
            .map(|(idx, g)| start + idx + g.len())
            .find(|next| *next > offset)
            .unwrap_or(end)
    }

    /// Offset of the grapheme cluster ending at `offset`
    pub fn prev_grapheme_offset(&self, offset: usize) -> usize {
        if offset == 0 {
            return 0;
        }
        let offset = offset.min(self.len());
        let line = self.line_of(offset);
        let start = self.line_start(line);
        if offset == start {
            // Step back over the previous line's newline
            return offset - 1;
        }
        let text = self.content.slice(start, offset);
        text.grapheme_indices(true)
            .next_back()
            .map_or(start, |(idx, _)| start + idx)
    }

    /// Apply an edit, moving markers with the text
    pub fn apply_edit(&mut self, op: &EditOp) -> EditResult {
        self.version += 1;

        let new_cursor = match op {
            EditOp::Insert { position, text } => {
                let position = (*position).min(self.len());
                self.content.insert(position, text);
                self.markers.adjust_for_insert(position, text.len());
                position + text.len()
            }
            EditOp::Delete { start, end } => {
                let end = (*end).min(self.len());
                let start = (*start).min(end);
                self.content.delete(start, end);
                self.markers.adjust_for_delete(start..end);
                start
            }
        };

        EditResult {
            version: self.version,
            new_cursor,
        }
    }

    /// Compute the reverse operation for undo
    pub fn compute_reverse(&self, op: &EditOp) -> EditOp {
        match op {
            EditOp::Insert { position, text } => EditOp::delete(*position, position + text.len()),
            EditOp::Delete { start, end } => EditOp::insert(*start, self.text_range(*start..*end)),
        }
    }
}
