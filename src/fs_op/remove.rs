use std::fs;
use std::io;
use std::path::Path;

use crate::fs_op::stat::EntryKind;
use crate::fs_op::symlink::remove_symlink;

/// Remove a file, symlink or directory at `path`.
///
/// Directories are removed recursively. The path is inspected without
/// following links, so a symlink (dangling or pointing at a directory) is
/// unlinked rather than traversed. A path that does not exist is a no-op,
/// so callers can remove without checking first.
pub fn remove_path(path: impl AsRef<Path>) -> io::Result<()> {
    let p = path.as_ref();

    let meta = match fs::symlink_metadata(p) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    let result = match EntryKind::from_file_type(meta.file_type()) {
        EntryKind::Symlink => remove_symlink(p),
        EntryKind::Directory => fs::remove_dir_all(p),
        EntryKind::File | EntryKind::Other => fs::remove_file(p),
    };

    // Another remover may have won the race; that still counts as removed.
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
