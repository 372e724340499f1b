use errors::ScanError;
use std::path::{Path, PathBuf};
pub mod errors;

/// What a snapshot entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A recursive snapshot of a directory.
///
/// Children are sorted by name and directory sizes are cumulative, so two
/// snapshots of byte-identical trees compare equal regardless of the order
/// the underlying filesystem yields entries in.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryTree {
    /// Final path component (or the full path when there is none).
    pub name: String,
    /// Full path of the entry as scanned.
    pub path: PathBuf,
    /// File size in bytes; for directories, the sum of all descendants.
    pub size: u64,
    /// Extension including the leading dot (`.js`); `None` for directories
    /// and extension-less files.
    pub extension: Option<String>,
    pub kind: EntryKind,
    /// Child entries, sorted by name. Empty for files.
    pub children: Vec<DirectoryTree>,
}

impl DirectoryTree {
    /// Looks up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&DirectoryTree> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Names of the direct children, in sorted order.
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Takes a snapshot of `path`.
///
/// # Example
/// ```no_run
/// let tree = dirtree::scan(std::path::Path::new(".")).unwrap();
/// assert!(tree.size >= tree.children.iter().map(|c| c.size).sum());
/// ```
pub fn scan(path: &Path) -> Result<DirectoryTree, ScanError> {
    let metadata = std::fs::metadata(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ScanError::NotFound(path.to_path_buf())
        } else {
            ScanError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let name = path
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    if metadata.is_dir() {
        let read_dir = std::fs::read_dir(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut children = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| ScanError::Io {
                path: path.to_path_buf(),
                source,
            })?;

            children.push(scan(&entry.path())?);
        }
        children.sort_by(|a, b| a.name.cmp(&b.name));

        let size = children.iter().map(|c| c.size).sum();

        Ok(DirectoryTree {
            name,
            path: path.to_path_buf(),
            size,
            extension: None,
            kind: EntryKind::Directory,
            children,
        })
    } else {
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()));

        Ok(DirectoryTree {
            name,
            path: path.to_path_buf(),
            size: metadata.len(),
            extension,
            kind: EntryKind::File,
            children: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, contents: &[u8]) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn scans_files_with_sizes_and_extensions() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "app.js", b"hello");
        write(dir.path(), "raw", b"");

        let tree = scan(dir.path()).unwrap();

        assert_eq!(tree.kind, EntryKind::Directory);
        assert_eq!(tree.child_names(), vec!["app.js", "raw"]);
        assert_eq!(tree.size, 5);

        let app = tree.child("app.js").unwrap();
        assert!(app.is_file());
        assert_eq!(app.size, 5);
        assert_eq!(app.extension.as_deref(), Some(".js"));

        let raw = tree.child("raw").unwrap();
        assert_eq!(raw.size, 0);
        assert_eq!(raw.extension, None);
    }

    #[test]
    fn directory_sizes_are_cumulative() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pages/foo.tsx", b"123456");
        write(dir.path(), "pages/nested/bar.tsx", b"1234");
        write(dir.path(), "top", b"12");

        let tree = scan(dir.path()).unwrap();
        assert_eq!(tree.size, 12);

        let pages = tree.child("pages").unwrap();
        assert_eq!(pages.kind, EntryKind::Directory);
        assert_eq!(pages.size, 10);
        assert_eq!(pages.child("nested").unwrap().size, 4);
    }

    #[test]
    fn identical_trees_compare_equal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pages/foo.tsx", b"abc");
        write(dir.path(), "one", b"");

        let first = scan(dir.path()).unwrap();
        let second = scan(dir.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        match scan(&missing) {
            Err(ScanError::NotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
