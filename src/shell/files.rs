//! Plain-text file reading and writing

use crate::document::Document;
use crate::error::{EditorError, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Read a whole file as UTF-8 text
pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| EditorError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the document's text to `path`, replacing any existing content
///
/// Exactly the buffer's bytes are written; markers are never stored.
pub fn write_document(path: &Path, document: &Document) -> Result<()> {
    let wrap = |source| EditorError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut out = BufWriter::new(File::create(path).map_err(wrap)?);
    for chunk in document.chunks() {
        out.write_all(chunk.as_bytes()).map_err(wrap)?;
    }
    out.flush().map_err(wrap)
}

/// Append `.{extension}` when the chosen name has no extension
pub fn with_default_extension(path: PathBuf, extension: &str) -> PathBuf {
    if extension.is_empty() || path.extension().is_some() {
        path
    } else {
        path.with_extension(extension)
    }
}

/// Base name shown in the window title
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
