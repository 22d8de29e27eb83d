//! Directory enumeration and extension filtering.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Recursively list every file under `root`, in sorted order.
///
/// There is no ignore list. Symlinked directories are not descended into;
/// symlinks to files are listed like regular files.
pub fn enumerate(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk_recursive(root, &mut files)?;
    Ok(files)
}

fn walk_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("list {}", dir.display())))
    })?;

    let mut children = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("list {}", dir.display())))
        })?;
        let file_type = entry.file_type().map_err(|e| {
            Error::internal_io(
                e.to_string(),
                Some(format!("stat {}", entry.path().display())),
            )
        })?;
        children.push((entry.path(), file_type));
    }
    children.sort_by(|a, b| a.0.cmp(&b.0));

    for (path, file_type) in children {
        if file_type.is_dir() {
            walk_recursive(&path, files)?;
        } else if file_type.is_symlink() {
            if !path.is_dir() {
                files.push(path);
            }
        } else {
            files.push(path);
        }
    }

    Ok(())
}

/// Whether a file name ends with `.<extension>`. Case-sensitive.
pub fn is_eligible(path: &Path, extension: &str) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy();
    let suffix = format!(".{}", extension);
    name.ends_with(&suffix)
}

/// Enumerate `root` and keep only eligible files.
pub fn eligible_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = enumerate(root)?;
    files.retain(|f| is_eligible(f, extension));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn enumerate_descends_every_directory() {
        let dir = TempDir::new().unwrap();
        let deep = dir.path().join("a").join("b").join("c");
        fs::create_dir_all(&deep).unwrap();
        fs::write(dir.path().join("top.java"), "").unwrap();
        fs::write(deep.join("Deep.java"), "").unwrap();
        fs::create_dir_all(dir.path().join("target")).unwrap();
        fs::write(dir.path().join("target").join("Gen.java"), "").unwrap();

        let files = enumerate(dir.path()).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.contains(&deep.join("Deep.java")));
        assert!(files.contains(&dir.path().join("target").join("Gen.java")));
    }

    #[test]
    fn enumerate_is_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["c.java", "a.java", "b.java"] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let files = enumerate(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.java", "b.java", "c.java"]);
    }

    #[test]
    fn enumerate_missing_root_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = enumerate(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn eligibility_is_a_suffix_match() {
        assert!(is_eligible(Path::new("src/Order.java"), "java"));
        assert!(!is_eligible(Path::new("src/Order.JAVA"), "java"));
        assert!(!is_eligible(Path::new("src/Order.java.bak"), "java"));
        assert!(!is_eligible(Path::new("src/Order.kt"), "java"));
        assert!(!is_eligible(Path::new("src/java"), "java"));
    }

    #[test]
    fn eligible_files_skips_other_extensions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("A.java"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = eligible_files(dir.path(), "java").unwrap();
        assert_eq!(files, vec![dir.path().join("A.java")]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real");
        fs::create_dir_all(&real).unwrap();
        fs::write(real.join("A.java"), "").unwrap();
        std::os::unix::fs::symlink(&real, dir.path().join("link")).unwrap();

        let files = enumerate(dir.path()).unwrap();
        assert_eq!(files, vec![real.join("A.java")]);
    }
}
