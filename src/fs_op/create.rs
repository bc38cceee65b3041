use std::fs;
use std::io;
use std::path::Path;

/// Create directory and parents. Existing directories are not an error.
pub fn create_dir_all<P: AsRef<Path>>(path: P) -> io::Result<()> {
    fs::create_dir_all(path.as_ref())
}

/// Create exactly one directory. Fails with `AlreadyExists` if `path` is taken
/// and with `NotFound` if its parent is missing.
pub fn create_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
    fs::create_dir(path.as_ref())
}

/// Write `data` to `path`, replacing any existing file. Parent directories are
/// not created.
pub fn write_file<P: AsRef<Path>>(path: P, data: &[u8]) -> io::Result<()> {
    fs::write(path.as_ref(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn create_dir_all_is_idempotent() {
        let td = tempdir().unwrap();
        let dir = td.path().join("a/b");
        create_dir_all(&dir).unwrap();
        create_dir_all(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn create_dir_rejects_existing() {
        let td = tempdir().unwrap();
        let dir = td.path().join("once");
        create_dir(&dir).unwrap();
        let err = create_dir(&dir).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn write_file_does_not_create_parents() {
        let td = tempdir().unwrap();
        let err = write_file(td.path().join("missing/f.txt"), b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        let f = td.path().join("f.txt");
        write_file(&f, b"hello").unwrap();
        assert_eq!(fs::read(&f).unwrap(), b"hello");
    }
}
