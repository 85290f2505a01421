//! Selection over buffer byte offsets

use std::ops::Range;

/// Text selection (anchor + active point)
///
/// The active point is where the caret sits. A collapsed selection is a
/// plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// The fixed end while extending
    pub anchor: usize,
    /// The moving end (caret)
    pub active: usize,
}

impl Selection {
    pub fn new(anchor: usize, active: usize) -> Self {
        Self { anchor, active }
    }

    /// A caret with nothing selected
    pub fn collapsed(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.active
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.active)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.active)
    }

    /// Ordered range covered by the selection
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// The covered range, or `None` when collapsed
    pub fn non_empty_range(&self) -> Option<Range<usize>> {
        (!self.is_collapsed()).then(|| self.range())
    }

    /// Move the active end, keeping the anchor
    pub fn extend_to(&mut self, offset: usize) {
        self.active = offset;
    }

    /// Whether the character starting at `offset` is selected
    pub fn contains(&self, offset: usize) -> bool {
        self.range().contains(&offset)
    }
}
