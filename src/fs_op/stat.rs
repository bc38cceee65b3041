use std::fs;
use std::path::Path;

/// Lightweight classification of a directory entry's kind, taken from link
/// metadata so symlinks are reported as such.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// A symbolic link, whatever it points at.
    Symlink,
    /// Anything else (socket, FIFO, device node, ...).
    Other,
}

impl EntryKind {
    /// Classify a `fs::FileType`.
    pub fn from_file_type(ft: fs::FileType) -> Self {
        if ft.is_symlink() {
            EntryKind::Symlink
        } else if ft.is_dir() {
            EntryKind::Directory
        } else if ft.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// Return `true` if `path` is accessible. Symlinks are followed, so a dangling
/// link reports `false`. Never fails.
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path.as_ref()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn kind_of(path: &Path) -> EntryKind {
        EntryKind::from_file_type(fs::symlink_metadata(path).unwrap().file_type())
    }

    #[test]
    fn kinds_of_file_and_dir() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("a.txt");
        fs::write(&file, b"hello").unwrap();
        assert_eq!(kind_of(&file), EntryKind::File);
        assert!(exists(&file));

        let dir = tmp.path().join("subdir");
        fs::create_dir(&dir).unwrap();
        assert_eq!(kind_of(&dir), EntryKind::Directory);
    }

    #[test]
    fn missing_path() {
        let tmp = tempdir().unwrap();
        let p = tmp.path().join("no_such_file_hopefully");
        assert!(!exists(&p));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_a_symlink_that_does_not_exist() {
        let tmp = tempdir().unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink("nowhere", &link).unwrap();
        assert_eq!(kind_of(&link), EntryKind::Symlink);
        assert!(!exists(&link));
    }
}
