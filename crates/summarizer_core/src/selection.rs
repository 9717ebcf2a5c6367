use std::sync::Arc;

/// One chosen file: its display name and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// The files pending submission, in the order they were chosen.
///
/// Every drop or pick event replaces the whole selection; nothing is merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    files: Vec<SelectedFile>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, files: Vec<SelectedFile>) {
        self.files = files;
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|file| file.name.as_str())
    }

    /// Status label text for a non-empty selection.
    pub fn label(&self) -> Option<String> {
        if self.files.is_empty() {
            return None;
        }
        Some(format!(
            "Selected: {}",
            self.names().collect::<Vec<_>>().join(", ")
        ))
    }
}
