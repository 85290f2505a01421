//! Terminal frontend built on crossterm and ratatui

mod host;
mod input;
mod view;

pub use host::TerminalHost;
pub use input::{map_key, Action, CrosstermKeys, KeySource, ScriptedKeys};
pub use view::{caret_position, render, render_notice, render_prompt, screen_areas, Screen};

use crate::config::EditorConfig;
use crate::error::Result;
use crate::shell::{EditorShell, Host};
use crossterm::cursor::Show;
use crossterm::event::KeyEvent;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io::{self, Write};
use std::panic;
use tracing::{debug, info, warn};

/// Run the editor on the real terminal until Exit
pub fn run(config: EditorConfig) -> Result<()> {
    install_panic_hook();
    enable_raw_mode()?;
    let _guard = TerminalGuard;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let host = TerminalHost::new(terminal, CrosstermKeys);
    let mut shell = EditorShell::new(config, host);
    info!("editor started");

    event_loop(&mut shell)
}

/// Restores the terminal when `run` returns, whether by `?` or normally
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Undo raw mode and the alternate screen; every step runs even if one fails
fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        warn!(error = %err, "disabling raw mode failed");
    }
    if let Err(err) = leave_screen(&mut io::stdout()) {
        warn!(error = %err, "leaving alternate screen failed");
    }
}

fn leave_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, Show)
}

/// Put the terminal back before the default hook prints the panic
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}

/// Draw, read a key, dispatch; until Exit is requested
pub fn event_loop<B: Backend, K: KeySource>(
    shell: &mut EditorShell<TerminalHost<B, K>>,
) -> Result<()> {
    loop {
        let (host, editor) = shell.parts_mut();
        host.draw_editor(editor)?;

        let key = shell.host_mut().next_key()?;
        handle_key(shell, key);
        if shell.exit_requested() {
            info!("editor exiting");
            return Ok(());
        }
    }
}

/// Dispatch one key press, then refresh the word count as on key release
pub fn handle_key<H: Host>(shell: &mut EditorShell<H>, key: KeyEvent) {
    let Some(action) = map_key(key) else {
        debug!(?key, "unbound key");
        return;
    };

    match action {
        Action::Command(command) => shell.execute(command),
        Action::Insert(text) => {
            shell.editor_mut().insert_text(&text);
        }
        Action::DeleteBackward => {
            shell.editor_mut().delete(true);
        }
        Action::DeleteForward => {
            shell.editor_mut().delete(false);
        }
        Action::Move { motion, extend } => shell.editor_mut().move_cursor(motion, extend),
        Action::SelectAll => shell.editor_mut().select_all(),
    }
    shell.on_key_release();
}
