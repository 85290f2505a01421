//! The editor shell: file identity, menu and toolbar actions

pub mod files;
mod host;

pub use host::{Host, Notice, NoticeLevel};

use crate::config::EditorConfig;
use crate::markers::{Style, Toggle};
use crate::undo::UndoManager;
use crate::Editor;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Menu and toolbar actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    New,
    Open,
    Save,
    SaveAs,
    Exit,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    ToggleStyle(Style),
}

/// How a file action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Completed,
    Cancelled,
    Failed,
}

/// Owns the buffer and its file identity and drives a [`Host`]
pub struct EditorShell<H: Host> {
    editor: Editor,
    /// Path the buffer was opened from or last saved as
    file_path: Option<PathBuf>,
    title: String,
    config: EditorConfig,
    host: H,
    exit_requested: bool,
}

impl<H: Host> EditorShell<H> {
    pub fn new(config: EditorConfig, mut host: H) -> Self {
        let editor = Editor::with_history(Box::new(UndoManager::new(config.history_depth)));
        let title = config.app_name.clone();
        host.set_title(&title);
        host.set_status(&word_count_label(0));

        Self {
            editor,
            file_path: None,
            title,
            config,
            host,
            exit_requested: false,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Borrow the host mutably alongside the editor, for drawing
    pub fn parts_mut(&mut self) -> (&mut H, &Editor) {
        (&mut self.host, &self.editor)
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Run a menu or toolbar action
    pub fn execute(&mut self, command: Command) {
        debug!(?command, "execute");
        match command {
            Command::New => self.new_file(),
            Command::Open => {
                self.open_file();
            }
            Command::Save => {
                self.save_file();
            }
            Command::SaveAs => {
                self.save_as_file();
            }
            Command::Exit => self.exit(),
            Command::Undo => {
                self.editor.undo();
            }
            Command::Redo => {
                self.editor.redo();
            }
            Command::Cut => self.cut(),
            Command::Copy => self.copy(),
            Command::Paste => self.paste(),
            Command::ToggleStyle(style) => {
                self.toggle_style(style);
            }
        }
    }

    /// Empty the buffer and forget the file identity
    ///
    /// Unsaved changes are discarded without asking.
    pub fn new_file(&mut self) {
        self.editor.replace_all("");
        self.file_path = None;
        let title = self.config.title_for(&self.config.untitled_name);
        self.set_title(title);
        self.update_word_count();
        info!("new document");
    }

    /// Pick a file and load it, replacing the buffer
    pub fn open_file(&mut self) -> FileOutcome {
        let Some(path) = self.host.pick_open_path(&self.config.file_filters) else {
            debug!("open cancelled");
            return FileOutcome::Cancelled;
        };

        match files::read_document(&path) {
            Ok(text) => {
                self.editor.replace_all(&text);
                let title = self.config.title_for(&files::display_name(&path));
                info!(path = %path.display(), bytes = text.len(), "opened");
                self.file_path = Some(path);
                self.set_title(title);
                self.update_word_count();
                FileOutcome::Completed
            }
            Err(err) => {
                warn!(error = %err, "open failed");
                self.host
                    .show_notice(Notice::error("Error", format!("Error opening file: {err}")));
                FileOutcome::Failed
            }
        }
    }

    /// Write the buffer to its file, or ask for one when there is none
    pub fn save_file(&mut self) -> FileOutcome {
        match self.file_path.clone() {
            Some(path) => self.write_to(&path),
            None => self.save_as_file(),
        }
    }

    /// Pick a path and save there; the path becomes the file identity only
    /// once the write succeeded
    pub fn save_as_file(&mut self) -> FileOutcome {
        let Some(picked) = self
            .host
            .pick_save_path(&self.config.file_filters, &self.config.default_extension)
        else {
            debug!("save as cancelled");
            return FileOutcome::Cancelled;
        };
        let path = files::with_default_extension(picked, &self.config.default_extension);

        let outcome = self.write_to(&path);
        if outcome == FileOutcome::Completed {
            let title = self.config.title_for(&files::display_name(&path));
            self.file_path = Some(path);
            self.set_title(title);
        }
        outcome
    }

    fn write_to(&mut self, path: &Path) -> FileOutcome {
        match files::write_document(path, self.editor.document()) {
            Ok(()) => {
                info!(
                    path = %path.display(),
                    version = self.editor.document().version(),
                    "saved"
                );
                self.host
                    .show_notice(Notice::info("Save", "File saved successfully!"));
                FileOutcome::Completed
            }
            Err(err) => {
                warn!(error = %err, "save failed");
                self.host
                    .show_notice(Notice::error("Error", format!("Error saving file: {err}")));
                FileOutcome::Failed
            }
        }
    }

    pub fn exit(&mut self) {
        info!("exit requested");
        self.exit_requested = true;
    }

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    pub fn cut(&mut self) {
        if let Some(text) = self.editor.cut() {
            self.host.set_clipboard_text(text);
        }
    }

    pub fn copy(&mut self) {
        if let Some(text) = self.editor.copy() {
            self.host.set_clipboard_text(text);
        }
    }

    pub fn paste(&mut self) {
        if let Some(text) = self.host.clipboard_text() {
            self.editor.paste(&text);
        }
    }

    /// Toggle a style over the selection, warning when nothing is selected
    pub fn toggle_style(&mut self, style: Style) -> Option<Toggle> {
        let toggled = self.editor.toggle_style(style);
        match toggled {
            Some(toggle) => debug!(%style, ?toggle, "style toggled"),
            None => self.host.show_notice(Notice::warning(
                "Warning",
                "Please select text first to apply formatting.",
            )),
        }
        toggled
    }

    /// Key-release hook: refresh the word count
    pub fn on_key_release(&mut self) {
        self.update_word_count();
    }

    pub fn update_word_count(&mut self) {
        let label = word_count_label(self.editor.word_count());
        self.host.set_status(&label);
    }

    fn set_title(&mut self, title: String) {
        self.host.set_title(&title);
        self.title = title;
    }
}

/// Status bar text
pub fn word_count_label(count: usize) -> String {
    format!("Words: {count}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileFilter;
    use crate::editing::Selection;

    #[derive(Default)]
    struct NullHost {
        status: String,
        notices: Vec<Notice>,
    }

    impl Host for NullHost {
        fn pick_open_path(&mut self, _: &[FileFilter]) -> Option<PathBuf> {
            None
        }

        fn pick_save_path(&mut self, _: &[FileFilter], _: &str) -> Option<PathBuf> {
            None
        }

        fn show_notice(&mut self, notice: Notice) {
            self.notices.push(notice);
        }

        fn set_title(&mut self, _: &str) {}

        fn set_status(&mut self, status: &str) {
            self.status = status.to_string();
        }

        fn clipboard_text(&mut self) -> Option<String> {
            None
        }

        fn set_clipboard_text(&mut self, _: String) {}
    }

    fn shell() -> EditorShell<NullHost> {
        EditorShell::new(EditorConfig::default(), NullHost::default())
    }

    #[test]
    fn test_startup_state() {
        let shell = shell();
        assert_eq!(shell.title(), "Basic Text Editor with Formatting");
        assert_eq!(shell.file_path(), None);
        assert_eq!(shell.host().status, "Words: 0");
    }

    #[test]
    fn test_cancelled_dialogs_change_nothing() {
        let mut shell = shell();
        shell.editor_mut().insert_text("keep me");

        assert_eq!(shell.open_file(), FileOutcome::Cancelled);
        assert_eq!(shell.save_file(), FileOutcome::Cancelled);
        assert_eq!(shell.editor().text(), "keep me");
        assert_eq!(shell.file_path(), None);
        assert!(shell.host().notices.is_empty());
    }

    #[test]
    fn test_key_release_updates_status() {
        let mut shell = shell();
        shell.editor_mut().insert_text("  a   b  ");
        shell.on_key_release();
        assert_eq!(shell.host().status, "Words: 2");
    }

    #[test]
    fn test_execute_toggle_and_exit() {
        let mut shell = shell();
        shell.editor_mut().insert_text("bold");
        shell.editor_mut().set_selection(Selection::new(0, 4));
        shell.execute(Command::ToggleStyle(Style::Bold));
        assert_eq!(shell.editor().document().markers().ranges(Style::Bold), &[0..4]);

        assert!(!shell.exit_requested());
        shell.execute(Command::Exit);
        assert!(shell.exit_requested());
    }
}
