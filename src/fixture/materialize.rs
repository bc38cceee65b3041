//! Realize flattened entries (or a template directory) on disk.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::errors::{FixtureError, Result};
use crate::fixture::flatten::PathEntry;
use crate::fs_op::copy::{copy_tree, CopyFilter};
use crate::fs_op::create::{create_dir_all, write_file};
use crate::fs_op::symlink::create_symlink;

/// Create `entries` below the existing directory `root`.
///
/// Runs in two phases: every directory is created (in parallel, recursively,
/// so ancestors racing each other is harmless), and only once all of them
/// exist are files written and symlinks created, again in parallel. The
/// parents of files and symlinks whose keys contained separators join the
/// directory phase. The first failure aborts; nothing is rolled back.
pub fn materialize(root: &Path, entries: &[PathEntry]) -> Result<()> {
    let (dirs, leaves): (Vec<&PathEntry>, Vec<&PathEntry>) =
        entries.iter().partition(|e| e.is_directory());

    let mut dir_paths: BTreeSet<&Path> = dirs.iter().map(|e| e.path()).collect();
    for leaf in &leaves {
        if let Some(parent) = leaf.path().parent() {
            if parent != root {
                dir_paths.insert(parent);
            }
        }
    }

    tracing::debug!(
        root = %root.display(),
        dirs = dir_paths.len(),
        leaves = leaves.len(),
        "materializing fixture"
    );

    dir_paths.par_iter().try_for_each(|dir| {
        create_dir_all(dir).map_err(|e| FixtureError::io("create_dir", *dir, e))
    })?;

    leaves.par_iter().try_for_each(|entry| create_leaf(entry))
}

fn create_leaf(entry: &PathEntry) -> Result<()> {
    match entry {
        PathEntry::File { path, content } => {
            tracing::trace!("write {}", path.display());
            write_file(path, content.as_bytes()).map_err(|e| FixtureError::io("write", path, e))
        }
        PathEntry::Symlink { path, target, kind } => {
            tracing::trace!("symlink {} -> {}", path.display(), target.display());
            create_symlink(target, path, *kind).map_err(|e| FixtureError::io("symlink", path, e))
        }
        PathEntry::Directory { path } => {
            create_dir_all(path).map_err(|e| FixtureError::io("create_dir", path, e))
        }
    }
}

/// Copy the template directory `template` into `root`, skipping paths the
/// filter rejects.
pub fn copy_template(template: &Path, root: &Path, filter: Option<&CopyFilter>) -> Result<()> {
    tracing::debug!(
        template = %template.display(),
        root = %root.display(),
        filtered = filter.is_some(),
        "copying fixture template"
    );
    copy_tree(template, root, filter).map_err(|e| FixtureError::io("copy", PathBuf::from(template), e))
}
