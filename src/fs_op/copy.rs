use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fs_extra::file::{copy as fs_extra_copy, CopyOptions};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::fs_op::symlink::create_symlink;

/// Predicate over candidate source paths. Returning `false` skips the path and,
/// for a directory, everything below it.
pub type CopyFilter = dyn Fn(&Path) -> bool + Send + Sync;

enum Planned {
    Dir(PathBuf),
    File { from: PathBuf, to: PathBuf },
    Link { target: PathBuf, to: PathBuf },
}

/// Recursively copy the contents of directory `src` into `dst`.
///
/// `dst` is created if needed. Entries rejected by `filter` are pruned; the
/// filter sees source paths joined onto `src` as given (absolute when `src`
/// is) and is never asked about `src` itself.
/// All directories are created before any file is copied or symlink
/// recreated; the latter two run in parallel. Symlinks are recreated with
/// their original target rather than followed.
pub fn copy_tree(src: &Path, dst: &Path, filter: Option<&CopyFilter>) -> io::Result<()> {
    // Surface a missing or unreadable source with its own error kind.
    let meta = fs::metadata(src)?;
    if !meta.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("copy source is not a directory: {}", src.display()),
        ));
    }
    fs::create_dir_all(dst)?;

    let walker = WalkDir::new(src)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || filter.map_or(true, |f| f(e.path())));

    let mut dirs = Vec::new();
    let mut rest = Vec::new();
    for entry in walker {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let to = dst.join(rel);
        let ft = entry.file_type();
        if ft.is_symlink() {
            let target = fs::read_link(entry.path())?;
            rest.push(Planned::Link { target, to });
        } else if ft.is_dir() {
            dirs.push(Planned::Dir(to));
        } else if ft.is_file() {
            rest.push(Planned::File {
                from: entry.into_path(),
                to,
            });
        } else {
            tracing::debug!("skipping special file {}", entry.path().display());
        }
    }

    dirs.par_iter().try_for_each(apply)?;
    rest.par_iter().try_for_each(apply)
}

fn apply(planned: &Planned) -> io::Result<()> {
    match planned {
        Planned::Dir(path) => fs::create_dir_all(path),
        Planned::File { from, to } => copy_file(from, to).map(|_| ()),
        Planned::Link { target, to } => create_symlink(target, to, None),
    }
}

/// Copy a single file over `dst`, returning the number of bytes copied.
pub fn copy_file(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut options = CopyOptions::new();
    options.overwrite = true;
    // Use a 64 KiB buffer for file copies to balance throughput and memory.
    options.buffer_size = 64 * 1024;
    fs_extra_copy(src, dst, &options).map_err(into_io_error)
}

/// Copy `src` (file or directory) to `dst`. Links in `src` are followed for the
/// top-level entry, so copying a link to a directory copies the directory.
pub fn copy_path(src: &Path, dst: &Path) -> io::Result<()> {
    if fs::metadata(src)?.is_dir() {
        copy_tree(src, dst, None)
    } else {
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        copy_file(src, dst).map(|_| ())
    }
}

// fs_extra returns its own error type; keep the io kind where one exists.
fn into_io_error(e: fs_extra::error::Error) -> io::Error {
    use fs_extra::error::ErrorKind;

    let msg = e.to_string();
    match e.kind {
        ErrorKind::Io(inner) => inner,
        ErrorKind::NotFound => io::Error::new(io::ErrorKind::NotFound, msg),
        ErrorKind::PermissionDenied => io::Error::new(io::ErrorKind::PermissionDenied, msg),
        ErrorKind::AlreadyExists => io::Error::new(io::ErrorKind::AlreadyExists, msg),
        ErrorKind::Interrupted => io::Error::new(io::ErrorKind::Interrupted, msg),
        _ => io::Error::new(io::ErrorKind::Other, msg),
    }
}
