//! Edit operations and results

use std::ops::Range;

/// An atomic edit operation over byte offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Insert text at a position
    Insert { position: usize, text: String },
    /// Delete text in a range
    Delete { start: usize, end: usize },
}

impl EditOp {
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self::Insert {
            position,
            text: text.into(),
        }
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self::Delete { start, end }
    }

    /// Range touched by this operation, in post-edit offsets for inserts
    /// and pre-edit offsets for deletes
    pub fn affected_range(&self) -> Range<usize> {
        match self {
            EditOp::Insert { position, text } => *position..position + text.len(),
            EditOp::Delete { start, end } => *start..*end,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, EditOp::Insert { .. })
    }

    /// Whether the operation changes nothing
    pub fn is_noop(&self) -> bool {
        self.affected_range().is_empty()
    }
}

/// Result of applying an edit operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditResult {
    /// Document version after this edit
    pub version: u64,
    /// Where the caret lands after the edit
    pub new_cursor: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_op_insert() {
        let op = EditOp::insert(10, "Hello");
        assert_eq!(op.affected_range(), 10..15);
        assert!(op.is_insert());
    }

    #[test]
    fn test_edit_op_delete() {
        let op = EditOp::delete(5, 15);
        assert_eq!(op.affected_range(), 5..15);
        assert!(!op.is_insert());
        assert!(EditOp::delete(4, 4).is_noop());
    }
}
