//! Find-and-read: locate a file by name and return its contents.
//!
//! The search directory can be a spoken phrase ("my downloads folder"); it
//! is mapped to a real path before searching. Reading is a two-step
//! operation — the first call reports the match and asks for confirmation,
//! a second call with `confirm` actually reads.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;
use walkdir::WalkDir;

/// Default recursion depth for the file search.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Character cap when displaying file contents.
const MAX_DISPLAY_CHARS: usize = 4000;

/// Bytes probed when deciding whether a file is text.
const PROBE_BYTES: usize = 512;

/// Map common spoken folder phrases to actual paths. Unrecognized input is
/// taken as a literal path.
pub fn infer_path(phrase: &str) -> PathBuf {
    let phrase = phrase.trim().to_lowercase();
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

    let mappings: &[(&str, PathBuf)] = &[
        ("documents", home.join("Documents")),
        ("downloads", home.join("Downloads")),
        ("desktop", home.join("Desktop")),
        ("pictures", home.join("Pictures")),
        ("music", home.join("Music")),
        ("videos", home.join("Videos")),
        ("home", home.clone()),
        ("user folder", home.clone()),
        ("temp", PathBuf::from("/tmp")),
        ("tmp", PathBuf::from("/tmp")),
        ("root", PathBuf::from("/")),
    ];

    for (key, path) in mappings {
        if phrase.contains(key) {
            return path.clone();
        }
    }
    PathBuf::from(phrase)
}

/// Find a file by exact name under `dir`, up to `max_depth` levels down.
pub fn find_file(filename: &str, dir: &Path, max_depth: usize) -> Option<PathBuf> {
    WalkDir::new(dir)
        .max_depth(max_depth + 1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name() == filename)
        .map(|entry| entry.into_path())
}

/// Heuristic text check: no NUL bytes and the first chunk decodes as UTF-8
/// (allowing a split code point at the boundary).
pub fn is_text_file(path: &Path) -> bool {
    let mut chunk = [0u8; PROBE_BYTES];
    let Ok(mut file) = fs::File::open(path) else {
        return false;
    };
    let Ok(n) = file.read(&mut chunk) else {
        return false;
    };
    let chunk = &chunk[..n];
    if chunk.contains(&0) {
        return false;
    }
    match std::str::from_utf8(chunk) {
        Ok(_) => true,
        // A multi-byte char may be cut off at the probe boundary
        Err(e) => e.valid_up_to() + 4 > chunk.len() && e.error_len().is_none(),
    }
}

pub fn find_and_read_file(
    filename: &str,
    search_dir: &str,
    max_depth: usize,
    confirm: bool,
) -> anyhow::Result<String> {
    let resolved = infer_path(search_dir);
    debug!(
        "Searching for '{filename}' under {} (depth {max_depth})",
        resolved.display()
    );

    let Some(path) = find_file(filename, &resolved, max_depth) else {
        return Ok(format!(
            "File '{filename}' not found in '{}' (searched up to depth {max_depth}).",
            resolved.display()
        ));
    };

    if !confirm {
        return Ok(format!(
            "File found: {}\n\nDo you want to read this file? \
             If yes, ask again with confirmation.",
            path.display()
        ));
    }

    if !is_text_file(&path) {
        return Ok(format!(
            "File '{}' appears to be binary. Reading as text is not supported.",
            path.display()
        ));
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("error reading {}", path.display()))?;

    if content.chars().count() > MAX_DISPLAY_CHARS {
        let truncated: String = content.chars().take(MAX_DISPLAY_CHARS).collect();
        return Ok(format!(
            "File '{}' is too large to display in full. \
             Showing first {MAX_DISPLAY_CHARS} characters:\n\n{truncated}",
            path.display()
        ));
    }

    Ok(format!("File found: {}\n\n{content}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn spoken_phrases_map_to_paths() {
        assert_eq!(infer_path("tmp"), PathBuf::from("/tmp"));
        assert_eq!(infer_path("the temp folder"), PathBuf::from("/tmp"));
        let home = dirs::home_dir().expect("test needs a home dir");
        assert_eq!(infer_path("my downloads folder"), home.join("Downloads"));
        assert_eq!(infer_path("/opt/data"), PathBuf::from("/opt/data"));
    }

    #[test]
    fn finds_nested_file_within_depth() {
        let dir = TempDir::new().expect("should create tempdir");
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).expect("should create dirs");
        fs::write(nested.join("target.txt"), "hello").expect("should write");

        let found = find_file("target.txt", dir.path(), 5).expect("should find");
        assert!(found.ends_with("a/b/target.txt"));
        assert!(find_file("target.txt", dir.path(), 1).is_none());
    }

    #[test]
    fn binary_files_are_detected() {
        let dir = TempDir::new().expect("should create tempdir");
        let text = dir.path().join("note.txt");
        let binary = dir.path().join("blob.bin");
        fs::write(&text, "plain text").expect("should write");
        fs::write(&binary, [0u8, 159, 146, 150]).expect("should write");

        assert!(is_text_file(&text));
        assert!(!is_text_file(&binary));
    }

    #[test]
    fn read_requires_confirmation() {
        let dir = TempDir::new().expect("should create tempdir");
        fs::write(dir.path().join("note.txt"), "contents here").expect("should write");
        let dir_str = dir.path().to_string_lossy().to_string();

        let first = find_and_read_file("note.txt", &dir_str, 5, false).expect("should reply");
        assert!(first.contains("Do you want to read this file?"));

        let second = find_and_read_file("note.txt", &dir_str, 5, true).expect("should read");
        assert!(second.contains("contents here"));
    }

    #[test]
    fn long_files_are_truncated() {
        let dir = TempDir::new().expect("should create tempdir");
        fs::write(dir.path().join("big.txt"), "x".repeat(5000)).expect("should write");
        let dir_str = dir.path().to_string_lossy().to_string();

        let reply = find_and_read_file("big.txt", &dir_str, 5, true).expect("should read");
        assert!(reply.contains("too large to display in full"));
    }
}
