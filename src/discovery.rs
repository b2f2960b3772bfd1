//! Input discovery for the driver.
//!
//! Turns the paths given on the command line into a sorted list of source
//! files: files are taken as-is, directories are walked recursively for
//! `*.json` files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::diagnostics::{io_error, ArborError};
use crate::pipeline::SourceUnit;

/// Extension of serialized tagged trees.
pub const TREE_EXTENSION: &str = "json";

/// Expands `paths` into the list of input files, deduplicated and sorted so
/// runs are deterministic.
pub fn discover_inputs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>, ArborError> {
    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if !path.is_dir() {
            files.push(path.to_path_buf());
            continue;
        }
        for entry in WalkDir::new(path) {
            let entry = entry.map_err(|e| {
                let message = format!("failed to walk '{}'", path.display());
                match e.into_io_error() {
                    Some(cause) => io_error(message, cause),
                    None => io_error(message, std::io::Error::other("filesystem loop")),
                }
            })?;
            if entry.file_type().is_file() && has_tree_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Reads one input file into a [`SourceUnit`] named after its path.
pub fn load_unit(path: &Path) -> Result<SourceUnit, ArborError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| io_error(format!("failed to read '{}'", path.display()), e))?;
    Ok(SourceUnit::new(path.display().to_string(), text))
}

fn has_tree_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == TREE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn walks_directories_for_json_only() {
        let scratch = TempDir::new().unwrap();
        let dir = scratch.path();
        let nested = dir.join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.join("b.json"), "[]").unwrap();
        fs::write(nested.join("a.json"), "[]").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();

        let files = discover_inputs(&[dir]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir).unwrap().to_path_buf())
            .collect();
        assert_eq!(names, [PathBuf::from("b.json"), PathBuf::from("nested/a.json")]);
    }

    #[test]
    fn overlapping_inputs_are_deduplicated() {
        let scratch = TempDir::new().unwrap();
        let file = scratch.path().join("a.json");
        fs::write(&file, "[]").unwrap();

        let files = discover_inputs(&[scratch.path(), file.as_path()]).unwrap();
        assert_eq!(files, [file]);
    }

    #[test]
    fn explicit_files_are_kept_even_without_extension() {
        let files = discover_inputs(&["some/tree.txt"]).unwrap();
        assert_eq!(files, [PathBuf::from("some/tree.txt")]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_unit(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.error_type(), crate::diagnostics::ErrorType::Io);
    }
}
