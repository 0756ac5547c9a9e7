use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// One discovered file: the relative name shown to the user and the place
/// its bytes actually live (a temp copy for staged files, the original
/// absolute path for directory files).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub location: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    FilesDiscovered,
    SelectionEditable,
    OutputGenerated,
}

/// Session state for one interactive run. Transitions return a new value
/// rather than mutating in place, so every render step works from an
/// explicit snapshot.
#[derive(Debug, Clone)]
pub struct AppState {
    pub phase: SessionPhase,
    pub files: BTreeMap<String, FileEntry>,
    pub excluded: BTreeSet<String>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            phase: SessionPhase::Idle,
            files: BTreeMap::new(),
            excluded: BTreeSet::new(),
        }
    }

    /// Idle -> FilesDiscovered, unless nothing was discovered.
    pub fn with_files(files: BTreeMap<String, FileEntry>) -> Self {
        let phase = if files.is_empty() {
            SessionPhase::Idle
        } else {
            SessionPhase::FilesDiscovered
        };
        AppState {
            phase,
            files,
            excluded: BTreeSet::new(),
        }
    }

    pub fn editable(mut self) -> Self {
        if self.phase == SessionPhase::FilesDiscovered {
            self.phase = SessionPhase::SelectionEditable;
        }
        self
    }

    /// Flips the inclusion toggle for a discovered file. Unknown names are
    /// ignored so a stale cursor cannot invent entries.
    pub fn toggled(mut self, name: &str) -> Self {
        if self.files.contains_key(name) {
            if !self.excluded.remove(name) {
                self.excluded.insert(name.to_string());
            }
        }
        self
    }

    pub fn include_all(mut self) -> Self {
        self.excluded.clear();
        self
    }

    pub fn exclude_all(mut self) -> Self {
        self.excluded = self.files.keys().cloned().collect();
        self
    }

    pub fn generated(mut self) -> Self {
        self.phase = SessionPhase::OutputGenerated;
        self
    }

    pub fn is_included(&self, name: &str) -> bool {
        self.files.contains_key(name) && !self.excluded.contains(name)
    }

    /// Included entries in lexicographic name order.
    pub fn included(&self) -> impl Iterator<Item = &FileEntry> {
        self.files
            .values()
            .filter(|entry| !self.excluded.contains(&entry.name))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn included_count(&self) -> usize {
        self.included().count()
    }
}

#[derive(Debug, Clone)]
pub struct CombineConfig {
    pub staged_paths: Vec<PathBuf>,
    pub dir_path: Option<String>,
    pub output_path: String,
    pub to_stdout: bool,
    pub to_clipboard: bool,
    pub auto_select: bool,
}
