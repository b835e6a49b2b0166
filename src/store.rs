//! Flat-file persistence for the to-do list and notes.
//!
//! Each store is a JSON array of strings on disk, rewritten whole on every
//! change. Last write wins; there is no locking — the service is the only
//! writer.

use std::fs;
use std::path::PathBuf;
use tracing::{debug, error};

/// A JSON list-of-strings file.
pub struct ListStore {
    path: PathBuf,
}

impl ListStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the list. A missing file yields an empty list; a corrupt file is
    /// reset to `[]` so the next write starts clean.
    pub fn load(&self) -> Vec<String> {
        if !self.path.exists() {
            debug!("No file at {}, starting fresh", self.path.display());
            return Vec::new();
        }
        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str::<Vec<String>>(&contents) {
                Ok(items) => {
                    debug!("Loaded {} item(s) from {}", items.len(), self.path.display());
                    items
                }
                Err(e) => {
                    error!("Corrupt JSON in {}: {e}, resetting", self.path.display());
                    self.save(&[]);
                    Vec::new()
                }
            },
            Err(e) => {
                error!("Failed to read {}: {e}", self.path.display());
                Vec::new()
            }
        }
    }

    /// Rewrite the whole file, creating parent directories as needed.
    pub fn save(&self, items: &[String]) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create {}: {e}", parent.display());
                return;
            }
        }
        match serde_json::to_string_pretty(items) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    error!("Failed to write {}: {e}", self.path.display());
                } else {
                    debug!("Saved {} item(s) to {}", items.len(), self.path.display());
                }
            }
            Err(e) => error!("Failed to serialize items: {e}"),
        }
    }
}

/// To-do list backed by a [`ListStore`].
pub struct TaskStore {
    store: ListStore,
}

impl TaskStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            store: ListStore::new(path),
        }
    }

    pub fn add(&self, task: &str) -> String {
        let mut tasks = self.store.load();
        tasks.push(task.to_string());
        self.store.save(&tasks);
        format!("Task added: {task}")
    }

    pub fn list(&self) -> String {
        let tasks = self.store.load();
        if tasks.is_empty() {
            return "No tasks in the list.".to_string();
        }
        tasks
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}. {t}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn clear(&self) -> String {
        self.store.save(&[]);
        "All tasks cleared.".to_string()
    }
}

/// Notes backed by a [`ListStore`].
///
/// New text is appended to the most recent note rather than always creating
/// a new entry, so dictated fragments accumulate into one running note.
pub struct NoteStore {
    store: ListStore,
}

impl NoteStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            store: ListStore::new(path),
        }
    }

    pub fn write(&self, note: &str) -> String {
        let mut notes = self.store.load();
        let msg = if let Some(last) = notes.last_mut() {
            *last = format!("{}\n{}", last.trim_end(), note.trim_start());
            "Note updated."
        } else {
            notes.push(note.to_string());
            "Note added."
        };
        self.store.save(&notes);
        msg.to_string()
    }

    pub fn show(&self) -> String {
        let notes = self.store.load();
        if notes.is_empty() {
            return "No notes saved.".to_string();
        }
        notes
            .iter()
            .enumerate()
            .map(|(i, n)| format!("{}. {n}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn task_store(dir: &TempDir) -> TaskStore {
        TaskStore::new(dir.path().join("todo.json"))
    }

    fn note_store(dir: &TempDir) -> NoteStore {
        NoteStore::new(dir.path().join("notes.json"))
    }

    #[test]
    fn missing_file_is_empty_list() {
        let dir = TempDir::new().expect("should create tempdir");
        assert_eq!(task_store(&dir).list(), "No tasks in the list.");
    }

    #[test]
    fn add_and_list_tasks() {
        let dir = TempDir::new().expect("should create tempdir");
        let tasks = task_store(&dir);
        assert_eq!(tasks.add("buy milk"), "Task added: buy milk");
        tasks.add("call mum");
        assert_eq!(tasks.list(), "1. buy milk\n2. call mum");
    }

    #[test]
    fn clear_tasks_empties_file() {
        let dir = TempDir::new().expect("should create tempdir");
        let tasks = task_store(&dir);
        tasks.add("one");
        assert_eq!(tasks.clear(), "All tasks cleared.");
        assert_eq!(tasks.list(), "No tasks in the list.");
    }

    #[test]
    fn corrupt_file_resets_to_empty() {
        let dir = TempDir::new().expect("should create tempdir");
        let path = dir.path().join("todo.json");
        std::fs::write(&path, "{not json").expect("should write");
        let tasks = TaskStore::new(path.clone());
        assert_eq!(tasks.list(), "No tasks in the list.");
        let on_disk = std::fs::read_to_string(&path).expect("should read");
        let parsed: Vec<String> = serde_json::from_str(&on_disk).expect("reset file is valid");
        assert!(parsed.is_empty());
    }

    #[test]
    fn first_note_is_created_then_appended() {
        let dir = TempDir::new().expect("should create tempdir");
        let notes = note_store(&dir);
        assert_eq!(notes.write("remember the eggs"), "Note added.");
        assert_eq!(notes.write("and the bread"), "Note updated.");
        assert_eq!(notes.show(), "1. remember the eggs\nand the bread");
    }

    #[test]
    fn note_append_trims_joining_whitespace() {
        let dir = TempDir::new().expect("should create tempdir");
        let notes = note_store(&dir);
        notes.write("first   ");
        notes.write("   second");
        assert_eq!(notes.show(), "1. first\nsecond");
    }
}
