//! The frontend capabilities the shell drives

use crate::config::FileFilter;
use std::path::PathBuf;

/// Severity of a message dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A modal message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, message)
    }

    fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Dialogs, window chrome and clipboard provided by a frontend
///
/// Every call is synchronous: pickers and notices return once the user has
/// answered or dismissed them.
pub trait Host {
    /// Ask for a file to open; `None` when cancelled
    fn pick_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf>;

    /// Ask for a path to save to; `None` when cancelled
    fn pick_save_path(&mut self, filters: &[FileFilter], default_extension: &str)
        -> Option<PathBuf>;

    fn show_notice(&mut self, notice: Notice);

    fn set_title(&mut self, title: &str);

    fn set_status(&mut self, status: &str);

    fn clipboard_text(&mut self) -> Option<String>;

    fn set_clipboard_text(&mut self, text: String);
}
