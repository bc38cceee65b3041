use std::path::{Path, PathBuf};

use crate::fixture::tree::{Symlink, SymlinkKind};
use crate::fs_op::path::join_under;

/// Fields shared by every resolver call of one fixture.
#[derive(Debug)]
pub(crate) struct ContextBase {
    pub(crate) fixture_path: PathBuf,
}

/// Read-only view handed to a resolver.
///
/// The fixture-wide fields are borrowed from one shared base; only
/// `file_path` is specific to the entry being resolved.
#[derive(Debug)]
pub struct ResolveContext<'a> {
    base: &'a ContextBase,
    file_path: PathBuf,
}

impl<'a> ResolveContext<'a> {
    pub(crate) fn new(base: &'a ContextBase, file_path: PathBuf) -> Self {
        ResolveContext { base, file_path }
    }

    /// Absolute root of the fixture being built.
    pub fn fixture_path(&self) -> &Path {
        &self.base.fixture_path
    }

    /// Absolute path the resolved entry will occupy.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Path of `sub` inside the fixture.
    pub fn get_path(&self, sub: impl AsRef<Path>) -> PathBuf {
        join_under(&self.base.fixture_path, sub)
    }

    /// A symlink to `target`, created at this entry's location.
    pub fn symlink(&self, target: impl Into<PathBuf>) -> Symlink {
        Symlink::new(target)
    }

    /// Like [`ResolveContext::symlink`] with an explicit link kind for
    /// platforms that need one. [`SymlinkKind::Junction`] produces a
    /// directory symlink, not an NTFS junction.
    pub fn symlink_with_kind(&self, target: impl Into<PathBuf>, kind: SymlinkKind) -> Symlink {
        Symlink::with_kind(target, kind)
    }
}
