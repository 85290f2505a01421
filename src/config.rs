//! Editor configuration

/// A file-type filter offered by open/save pickers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    /// Glob pattern, `*` for everything
    pub pattern: String,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    /// `"Text Documents (*.txt)"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.pattern)
    }
}

/// Fixed settings of the editor shell
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Suffix of every window title
    pub app_name: String,
    /// Title prefix for a document created with New
    pub untitled_name: String,
    /// Extension appended to saved names that have none (no dot)
    pub default_extension: String,
    pub file_filters: Vec<FileFilter>,
    /// Undo units kept
    pub history_depth: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            app_name: "Basic Text Editor with Formatting".to_string(),
            untitled_name: "New File".to_string(),
            default_extension: "txt".to_string(),
            file_filters: vec![
                FileFilter::new("Text Documents", "*.txt"),
                FileFilter::new("All Files", "*"),
            ],
            history_depth: 100,
        }
    }
}

impl EditorConfig {
    /// `"<name> - <app name>"`
    pub fn title_for(&self, name: &str) -> String {
        format!("{} - {}", name, self.app_name)
    }
}
