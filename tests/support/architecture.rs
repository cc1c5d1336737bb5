use std::fs;
use std::path::{Path, PathBuf};

/// A matching source line: file relative to the crate root, 1-based line
/// number and the line itself.
pub type Hit = (String, usize, String);

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn relative_path(path: &Path) -> String {
    path.strip_prefix(root())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = fs::read_dir(dir).unwrap_or_else(|e| {
        panic!("failed to read dir {}: {e}", dir.display());
    });
    for entry in entries {
        let path = entry
            .unwrap_or_else(|e| panic!("failed to read dir entry: {e}"))
            .path();
        if path.is_dir() {
            walk(&path, files);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
}

pub fn rs_files(relative_dir: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(&root().join(relative_dir), &mut files);
    files.sort();
    files
}

/// Lines in production code under `relative_dir` containing any pattern.
///
/// Scanning a file stops at its first `#[cfg(test)]`, so unit test modules
/// at the bottom of a file may use whatever they need.
pub fn production_lines_containing(relative_dir: &str, patterns: &[&str]) -> Vec<Hit> {
    let mut hits = Vec::new();
    for file in rs_files(relative_dir) {
        let content = fs::read_to_string(&file)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", file.display()));
        for (idx, line) in content.lines().enumerate() {
            if line.trim_start().starts_with("#[cfg(test)]") {
                break;
            }
            if patterns.iter().any(|p| line.contains(p)) {
                hits.push((relative_path(&file), idx + 1, line.to_string()));
            }
        }
    }
    hits
}

/// Production lines that call `.unwrap()` or `.expect(`.
pub fn panicking_calls(relative_dir: &str) -> Vec<Hit> {
    production_lines_containing(relative_dir, &[".unwrap()", ".expect("])
        .into_iter()
        .filter(|(_, _, line)| !line.trim_start().starts_with("//"))
        .collect()
}

pub fn read_relative(relative_path: &str) -> String {
    fs::read_to_string(root().join(relative_path))
        .unwrap_or_else(|e| panic!("failed to read {relative_path}: {e}"))
}
