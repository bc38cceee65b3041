//! Small utilities for working with symbolic links.
//!
//! These helpers centralize symlink-specific behavior so callers don't need to
//! duplicate platform distinctions. They return `io::Result` and propagate
//! underlying OS errors unchanged.

use std::fs;
use std::io;
use std::path::Path;

/// Kind of link to create on platforms that distinguish them (Windows).
/// Unix ignores the hint.
///
/// `Junction` is accepted but not honoured as a true NTFS junction: on
/// Windows it creates a directory symlink, exactly like `Dir`. Code that
/// relies on junction semantics (no symlink privilege needed, absolute local
/// targets only) must create the junction itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymlinkKind {
    File,
    Dir,
    /// Created as a directory symlink; see the type docs.
    Junction,
}

/// Create a symbolic link at `link` that points to `target`.
///
/// Behaviour:
/// - On Unix this delegates to `std::os::unix::fs::symlink`; `target` is
///   stored verbatim, so relative targets resolve against the link's parent.
/// - On Windows `kind` picks `symlink_dir` or `symlink_file`. Without a hint
///   the target is resolved against the link's parent and a directory link
///   is created when it is an existing directory.
#[cfg_attr(unix, allow(unused_variables))]
pub fn create_symlink(target: &Path, link: &Path, kind: Option<SymlinkKind>) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        use std::os::windows::fs::{symlink_dir, symlink_file};

        let use_dir = match kind {
            Some(SymlinkKind::Dir) | Some(SymlinkKind::Junction) => true,
            Some(SymlinkKind::File) => false,
            None => {
                let resolved = match link.parent() {
                    Some(parent) if target.is_relative() => parent.join(target),
                    _ => target.to_path_buf(),
                };
                resolved.metadata().map(|m| m.is_dir()).unwrap_or(false)
            }
        };
        if use_dir {
            symlink_dir(target, link)
        } else {
            symlink_file(target, link)
        }
    }
}

/// Remove the symbolic link at `path` without touching its target.
pub fn remove_symlink(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        fs::remove_file(path)
    }

    #[cfg(windows)]
    {
        use std::os::windows::fs::FileTypeExt;

        // Directory links must be removed with `remove_dir`.
        if path.symlink_metadata()?.file_type().is_symlink_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    // Windows symlink creation often requires developer privileges, so these
    // run on Unix only.
    #[cfg(unix)]
    #[test]
    fn create_and_remove_file_symlink() -> io::Result<()> {
        let tmp = tempdir()?;
        let file = tmp.path().join("file.txt");
        let mut f = fs::File::create(&file)?;
        writeln!(f, "hello")?;

        let link = tmp.path().join("file.link");
        create_symlink(Path::new("file.txt"), &link, None)?;
        assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
        assert_eq!(fs::read_link(&link)?, Path::new("file.txt"));
        assert_eq!(fs::read_to_string(&link)?, "hello\n");

        remove_symlink(&link)?;
        assert!(!link.exists());
        assert!(file.exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn dir_hint_is_accepted_on_unix() -> io::Result<()> {
        let tmp = tempdir()?;
        let dir = tmp.path().join("somedir");
        fs::create_dir(&dir)?;

        let link = tmp.path().join("dir.link");
        create_symlink(&dir, &link, Some(SymlinkKind::Junction))?;
        assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
        assert!(link.is_dir());
        remove_symlink(&link)?;
        assert!(dir.exists());
        Ok(())
    }

    // Needs symlink privilege (developer mode or elevation) on Windows.
    #[cfg(windows)]
    #[test]
    fn junction_hint_creates_directory_symlink() -> io::Result<()> {
        use std::os::windows::fs::FileTypeExt;

        let tmp = tempdir()?;
        let dir = tmp.path().join("somedir");
        fs::create_dir(&dir)?;

        let link = tmp.path().join("junction.link");
        create_symlink(&dir, &link, Some(SymlinkKind::Junction))?;
        assert!(fs::symlink_metadata(&link)?.file_type().is_symlink_dir());
        remove_symlink(&link)?;
        assert!(dir.exists());
        Ok(())
    }

    #[test]
    fn removing_missing_link_errors() {
        let tmp = tempdir().unwrap();
        let err = remove_symlink(&tmp.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
