//! Corpus enumeration, document reads and atomic writes

use crate::error::{Result, TagMatterError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|s| s == "md" || s == "markdown")
        .unwrap_or(false)
}

/// Expand files and directories into a sorted list of markdown files.
///
/// Files named explicitly are kept whatever their extension. Directories
/// contribute only their own markdown files, not those of subdirectories,
/// since documents are identified by file name alone.
pub fn resolve_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let entries = WalkDir::new(path).min_depth(1).max_depth(1);
            for entry in entries.into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_file() && is_markdown(entry.path()) {
                    files.push(entry.path().to_owned());
                }
            }
        } else {
            log::warn!("Skipping missing path {}", path.display());
        }
    }
    files.sort();
    files.dedup();
    files
}

/// Identifier recorded in the processed set: the document's file name
pub fn document_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TagMatterError::file_not_found(path),
        _ => TagMatterError::Io(e),
    })
}

/// Replace the file at `path` with `content` in one step.
///
/// The content goes to a temporary file next to the target, which is then
/// renamed over it, so readers see either the old or the new file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp_file.path(), metadata.permissions())?;
    }

    temp_file.persist(path).map_err(|e| {
        TagMatterError::Io(std::io::Error::other(format!(
            "Failed to persist temporary file for {}: {}",
            path.display(),
            e
        )))
    })?;

    Ok(())
}

/// Line diff between two versions of a document, `None` when equal
pub fn generate_diff(old_content: &str, new_content: &str, path: &Path) -> Option<String> {
    if old_content == new_content {
        return None;
    }

    let old_lines: Vec<&str> = old_content.lines().collect();
    let new_lines: Vec<&str> = new_content.lines().collect();

    let mut diff_lines = vec![
        format!("--- {}", path.display()),
        format!("+++ {}", path.display()),
    ];

    let common_prefix = old_lines
        .iter()
        .zip(new_lines.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let old_rest = &old_lines[common_prefix..];
    let new_rest = &new_lines[common_prefix..];

    let common_suffix = old_rest
        .iter()
        .rev()
        .zip(new_rest.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let old_middle = &old_rest[..old_rest.len() - common_suffix];
    let new_middle = &new_rest[..new_rest.len() - common_suffix];

    diff_lines.push(format!(
        "@@ -{},{} +{},{} @@",
        common_prefix + 1,
        old_middle.len(),
        common_prefix + 1,
        new_middle.len()
    ));
    diff_lines.extend(old_middle.iter().map(|line| format!("-{line}")));
    diff_lines.extend(new_middle.iter().map(|line| format!("+{line}")));

    Some(diff_lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("b.md"), "").unwrap();
        fs::write(root.join("a.markdown"), "").unwrap();
        fs::write(root.join("c.txt"), "").unwrap();
        fs::create_dir(root.join("subdir")).unwrap();
        fs::write(root.join("subdir/d.md"), "").unwrap();

        let files = resolve_files(&[root.to_path_buf(), root.join("b.md")]);
        let names: Vec<String> = files.iter().map(|f| document_id(f)).collect();
        assert_eq!(names, ["a.markdown", "b.md"]);
    }

    #[test]
    fn test_resolve_files_skips_nested_notes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for folder in ["easy", "hard"] {
            fs::create_dir(root.join(folder)).unwrap();
            fs::write(root.join(folder).join("a.md"), "").unwrap();
        }
        fs::write(root.join("b.md"), "").unwrap();

        assert_eq!(resolve_files(&[root.to_path_buf()]), [root.join("b.md")]);

        let files = resolve_files(&[root.join("easy"), root.join("hard")]);
        assert_eq!(files, [root.join("easy/a.md"), root.join("hard/a.md")]);
    }

    #[test]
    fn test_read_missing_document() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_document(&temp_dir.path().join("nope.md")).unwrap_err();
        assert!(matches!(err, TagMatterError::FileNotFound { .. }));
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("note.md");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new content").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new content");

        let leftovers = fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_diff_generation() {
        let diff = generate_diff(
            "---\ntags: []\n---\nbody",
            "---\ntags:\n  - dp\n---\nbody",
            Path::new("note.md"),
        )
        .unwrap();
        assert_eq!(
            diff,
            "--- note.md\n+++ note.md\n@@ -2,1 +2,2 @@\n-tags: []\n+tags:\n+  - dp"
        );
        assert!(generate_diff("same", "same", Path::new("x")).is_none());
    }
}
