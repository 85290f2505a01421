//! Character-range style markers (bold, italic, underline)

mod range_set;

pub use range_set::MarkerSet;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Range;

/// A toggleable character style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Style {
    Bold,
    Italic,
    Underline,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Bold, Style::Italic, Style::Underline];

    /// Toolbar label
    pub fn label(self) -> &'static str {
        match self {
            Style::Bold => "Bold",
            Style::Italic => "Italic",
            Style::Underline => "Underline",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Style::Bold => "bold",
            Style::Italic => "italic",
            Style::Underline => "underline",
        })
    }
}

/// Styles present at one offset
pub type StyleSet = SmallVec<[Style; 3]>;

/// What a toggle did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Applied,
    Removed,
}

/// One [`MarkerSet`] per style
#[derive(Debug, Clone, Default)]
pub struct Markers {
    sets: FxHashMap<Style, MarkerSet>,
}

impl Markers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranges currently carrying `style`
    pub fn ranges(&self, style: Style) -> &[Range<usize>] {
        self.sets.get(&style).map(MarkerSet::ranges).unwrap_or(&[])
    }

    pub fn has(&self, style: Style, offset: usize) -> bool {
        self.sets.get(&style).is_some_and(|set| set.contains(offset))
    }

    /// All styles covering `offset`, in [`Style::ALL`] order
    pub fn styles_at(&self, offset: usize) -> StyleSet {
        Style::ALL
            .into_iter()
            .filter(|style| self.has(*style, offset))
            .collect()
    }

    pub fn add(&mut self, style: Style, range: Range<usize>) {
        self.sets.entry(style).or_default().add(range);
    }

    pub fn remove(&mut self, style: Style, range: Range<usize>) {
        if let Some(set) = self.sets.get_mut(&style) {
            set.remove(range);
        }
    }

    /// Toggle `style` over `range`, deciding by the first character only
    ///
    /// If the character at `range.start` already carries the style, the style
    /// is removed from the whole range, otherwise it is added to the whole
    /// range. Interior characters with mixed state follow that decision.
    pub fn toggle(&mut self, style: Style, range: Range<usize>) -> Toggle {
        if self.has(style, range.start) {
            self.remove(style, range);
            Toggle::Removed
        } else {
            self.add(style, range);
            Toggle::Applied
        }
    }

    pub(crate) fn adjust_for_insert(&mut self, at: usize, len: usize) {
        for set in self.sets.values_mut() {
            set.adjust_for_insert(at, len);
        }
    }

    pub(crate) fn adjust_for_delete(&mut self, deleted: Range<usize>) {
        for set in self.sets.values_mut() {
            set.adjust_for_delete(deleted.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sets.values().all(MarkerSet::is_empty)
    }

    pub fn clear(&mut self) {
        self.sets.clear();
    }
}
