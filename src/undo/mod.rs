//! Linear undo/redo history over text edits

use crate::document::Document;
use crate::editing::{EditOp, Selection};
use tracing::trace;

/// Where the caret goes after an undo or redo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoResult {
    pub selection: Selection,
}

/// Undo/redo capability injected into the editor
pub trait History {
    /// Record an applied edit together with its inverse
    fn record(&mut self, forward: EditOp, reverse: EditOp, selection_before: Selection);

    /// Close the current undo unit; the next edit starts a new one
    fn record_boundary(&mut self);

    /// Revert the last undo unit
    fn undo(&mut self, document: &mut Document) -> Option<UndoResult>;

    /// Re-apply the last reverted undo unit
    fn redo(&mut self, document: &mut Document) -> Option<UndoResult>;

    fn can_undo(&self) -> bool;

    fn can_redo(&self) -> bool;

    /// Forget all history
    fn clear(&mut self);
}

/// A group of edits undone and redone together
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Forward operations, in application order
    pub forward_ops: Vec<EditOp>,
    /// Reverse operations, applied last to first on undo
    pub reverse_ops: Vec<EditOp>,
    /// Selection state before the transaction
    pub selection_before: Selection,
    /// Whether new edits may still join this transaction
    open: bool,
}

impl Transaction {
    fn new(forward: EditOp, reverse: EditOp, selection_before: Selection) -> Self {
        Self {
            forward_ops: vec![forward],
            reverse_ops: vec![reverse],
            selection_before,
            open: true,
        }
    }

    /// Whether `op` continues this transaction: same kind of edit, at the
    /// offset where the previous one left the caret
    fn continues_with(&self, op: &EditOp) -> bool {
        if !self.open {
            return false;
        }
        let Some(last) = self.forward_ops.last() else {
            return false;
        };
        match (last, op) {
            (EditOp::Insert { position, text }, EditOp::Insert { position: next, .. }) => {
                *next == position + text.len()
            }
            // Backspace runs end where the last deletion started, forward
            // delete runs start at the same offset
            (EditOp::Delete { start, .. }, EditOp::Delete { start: s, end: e }) => {
                *e == *start || *s == *start
            }
            _ => false,
        }
    }
}

/// Command-stack implementation of [`History`]
pub struct UndoManager {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    /// Maximum number of undo units kept
    max_depth: usize,
}

impl UndoManager {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new(100)
    }
}

impl History for UndoManager {
    fn record(&mut self, forward: EditOp, reverse: EditOp, selection_before: Selection) {
        if forward.is_noop() {
            return;
        }
        self.redo_stack.clear();

        match self.undo_stack.last_mut() {
            Some(last) if last.continues_with(&forward) => {
                last.forward_ops.push(forward);
                last.reverse_ops.push(reverse);
            }
            _ => {
                if let Some(last) = self.undo_stack.last_mut() {
                    last.open = false;
                }
                self.undo_stack
                    .push(Transaction::new(forward, reverse, selection_before));
            }
        }

        if self.undo_stack.len() > self.max_depth {
            let excess = self.undo_stack.len() - self.max_depth;
            self.undo_stack.drain(..excess);
        }
    }

    fn record_boundary(&mut self) {
        if let Some(last) = self.undo_stack.last_mut() {
            last.open = false;
        }
    }

    fn undo(&mut self, document: &mut Document) -> Option<UndoResult> {
        let mut txn = self.undo_stack.pop()?;
        txn.open = false;
        trace!(ops = txn.reverse_ops.len(), "undo");

        for op in txn.reverse_ops.iter().rev() {
            document.apply_edit(op);
        }

        let result = UndoResult {
            selection: txn.selection_before,
        };
        self.redo_stack.push(txn);
        Some(result)
    }

    fn redo(&mut self, document: &mut Document) -> Option<UndoResult> {
        let txn = self.redo_stack.pop()?;
        trace!(ops = txn.forward_ops.len(), "redo");

        let mut caret = txn.selection_before.active;
        for op in &txn.forward_ops {
            caret = document.apply_edit(op).new_cursor;
        }

        self.undo_stack.push(txn);
        Some(UndoResult {
            selection: Selection::collapsed(caret),
        })
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(manager: &mut UndoManager, doc: &mut Document, op: EditOp) {
        let before = Selection::collapsed(0);
        let reverse = doc.compute_reverse(&op);
        doc.apply_edit(&op);
        manager.record(op, reverse, before);
    }

    #[test]
    fn test_undo_manager_creation() {
        let manager = UndoManager::new(100);
        assert!(!manager.can_undo());
        assert!(!manager.can_redo());
    }

    #[test]
    fn test_undo_redo() {
        let mut manager = UndoManager::new(100);
        let mut doc = Document::new();

        apply(&mut manager, &mut doc, EditOp::insert(0, "Hello"));
        assert_eq!(doc.text(), "Hello");

        let result = manager.undo(&mut doc);
        assert!(result.is_some());
        assert_eq!(doc.text(), "");

        let result = manager.redo(&mut doc);
        assert_eq!(doc.text(), "Hello");
        assert_eq!(result.map(|r| r.selection), Some(Selection::collapsed(5)));
    }

    #[test]
    fn test_typing_coalesces_until_boundary() {
        let mut manager = UndoManager::new(100);
        let mut doc = Document::new();

        for (i, c) in "abc".chars().enumerate() {
            apply(&mut manager, &mut doc, EditOp::insert(i, c.to_string()));
        }
        assert_eq!(manager.undo_depth(), 1);

        manager.record_boundary();
        apply(&mut manager, &mut doc, EditOp::insert(3, "d"));
        assert_eq!(manager.undo_depth(), 2);

        manager.undo(&mut doc);
        assert_eq!(doc.text(), "abc");
        manager.undo(&mut doc);
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn test_switching_insert_to_delete_splits() {
        let mut manager = UndoManager::new(100);
        let mut doc = Document::new();

        apply(&mut manager, &mut doc, EditOp::insert(0, "abc"));
        apply(&mut manager, &mut doc, EditOp::delete(2, 3));
        apply(&mut manager, &mut doc, EditOp::delete(1, 2));
        assert_eq!(manager.undo_depth(), 2);

        manager.undo(&mut doc);
        assert_eq!(doc.text(), "abc");
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut manager = UndoManager::new(100);
        let mut doc = Document::new();

        apply(&mut manager, &mut doc, EditOp::insert(0, "a"));
        manager.undo(&mut doc);
        assert!(manager.can_redo());

        apply(&mut manager, &mut doc, EditOp::insert(0, "b"));
        assert!(!manager.can_redo());
    }

    #[test]
    fn test_max_depth() {
        let mut manager = UndoManager::new(3);
        let mut doc = Document::new();

        for _ in 0..5 {
            apply(&mut manager, &mut doc, EditOp::insert(0, "x"));
            manager.record_boundary();
        }

        assert_eq!(manager.undo_depth(), 3);
    }
}
