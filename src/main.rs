//! Basic text editor with formatting, in the terminal

use basic_editor::EditorConfig;
use std::fs::File;
use std::sync::Mutex;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The screen belongs to the editor, so logs go to a file
    let log_path = std::env::temp_dir().join("basic-editor.log");
    if let Ok(file) = File::create(&log_path) {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    basic_editor::tui::run(EditorConfig::default())?;
    Ok(())
}
