//! Terminal implementation of the shell's [`Host`]

use super::input::KeySource;
use super::view::{self, Screen};
use crate::config::FileFilter;
use crate::shell::{Host, Notice};
use crate::Editor;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Draws the editor and runs modal dialogs on a ratatui terminal
pub struct TerminalHost<B: Backend, K: KeySource> {
    terminal: Terminal<B>,
    keys: K,
    title: String,
    status: String,
    /// System clipboard; can be unavailable in headless sessions
    system_clipboard: Option<arboard::Clipboard>,
    /// Last text cut or copied here, used when the system clipboard fails
    local_clipboard: Option<String>,
    /// Last editor frame, kept so dialogs can be drawn on top of it
    last_frame: Buffer,
    top_line: usize,
}

impl<B: Backend, K: KeySource> TerminalHost<B, K> {
    /// Host using the system clipboard when one can be opened
    pub fn new(terminal: Terminal<B>, keys: K) -> Self {
        let system_clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                warn!(error = %err, "system clipboard unavailable");
                None
            }
        };
        Self::with_clipboard(terminal, keys, system_clipboard)
    }

    /// Host whose clipboard never leaves the process
    pub fn with_local_clipboard(terminal: Terminal<B>, keys: K) -> Self {
        Self::with_clipboard(terminal, keys, None)
    }

    fn with_clipboard(
        terminal: Terminal<B>,
        keys: K,
        system_clipboard: Option<arboard::Clipboard>,
    ) -> Self {
        Self {
            terminal,
            keys,
            title: String::new(),
            status: String::new(),
            system_clipboard,
            local_clipboard: None,
            last_frame: Buffer::empty(Rect::default()),
            top_line: 0,
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn has_system_clipboard(&self) -> bool {
        self.system_clipboard.is_some()
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    pub fn next_key(&mut self) -> io::Result<KeyEvent> {
        self.keys.next_key()
    }

    /// Draw the main screen, scrolling so the caret stays visible
    pub fn draw_editor(&mut self, editor: &Editor) -> io::Result<()> {
        let size = self.terminal.size()?;
        let [_, _, text_area, _, _] = view::screen_areas(Rect::new(0, 0, size.width, size.height));
        self.top_line = view::scroll_to_caret(editor, self.top_line, text_area);

        let screen = Screen {
            editor,
            title: &self.title,
            status: &self.status,
            top_line: self.top_line,
        };
        let frame = self.terminal.draw(|frame| view::render(frame, &screen))?;
        self.last_frame = frame.buffer.clone();
        Ok(())
    }

    /// Draw `overlay` on top of the last editor frame
    fn draw_over_editor(&mut self, overlay: impl FnOnce(&mut ratatui::Frame)) -> io::Result<()> {
        let Self {
            terminal,
            last_frame,
            ..
        } = self;
        terminal.draw(|frame| {
            if frame.area() == last_frame.area {
                frame.buffer_mut().merge(last_frame);
            }
            overlay(frame);
        })?;
        Ok(())
    }

    /// Read a line of text; `None` on Esc
    fn prompt(&mut self, title: &str, label: &str) -> io::Result<Option<String>> {
        let mut input = String::new();
        loop {
            self.draw_over_editor(|frame| view::render_prompt(frame, title, label, &input))?;
            let key = self.keys.next_key()?;
            match key.code {
                KeyCode::Enter => return Ok(Some(input)),
                KeyCode::Esc => return Ok(None),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    input.push(c)
                }
                _ => {}
            }
        }
    }

    fn pick_path(&mut self, title: &str, label: &str) -> Option<PathBuf> {
        match self.prompt(title, label) {
            Ok(Some(input)) if !input.trim().is_empty() => Some(PathBuf::from(input.trim())),
            Ok(_) => None,
            Err(err) => {
                warn!(error = %err, "file prompt failed");
                None
            }
        }
    }

    fn wait_for_dismiss(&mut self, notice: &Notice) -> io::Result<()> {
        loop {
            self.draw_over_editor(|frame| view::render_notice(frame, notice))?;
            let key = self.keys.next_key()?;
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                return Ok(());
            }
        }
    }
}

fn filter_labels(filters: &[FileFilter]) -> String {
    filters
        .iter()
        .map(FileFilter::label)
        .collect::<Vec<_>>()
        .join(", ")
}

impl<B: Backend, K: KeySource> Host for TerminalHost<B, K> {
    fn pick_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf> {
        let label = format!("File to open [{}]:", filter_labels(filters));
        self.pick_path("Open", &label)
    }

    fn pick_save_path(&mut self, filters: &[FileFilter], default_extension: &str) -> Option<PathBuf> {
        let label = format!(
            "Save as [{}], default .{}:",
            filter_labels(filters),
            default_extension
        );
        self.pick_path("Save As", &label)
    }

    fn show_notice(&mut self, notice: Notice) {
        if let Err(err) = self.wait_for_dismiss(&notice) {
            warn!(error = %err, title = %notice.title, "notice dialog failed");
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    fn clipboard_text(&mut self) -> Option<String> {
        if let Some(clipboard) = &mut self.system_clipboard {
            match clipboard.get_text() {
                Ok(text) => return Some(text),
                Err(err) => debug!(error = %err, "reading system clipboard failed"),
            }
        }
        self.local_clipboard.clone()
    }

    fn set_clipboard_text(&mut self, text: String) {
        if let Some(clipboard) = &mut self.system_clipboard {
            if let Err(err) = clipboard.set_text(text.as_str()) {
                warn!(error = %err, "writing system clipboard failed");
            }
        }
        self.local_clipboard = Some(text);
    }
}
