//! Editing model: selection and edit operations

mod operation;
mod selection;

pub use operation::{EditOp, EditResult};
pub use selection::Selection;
