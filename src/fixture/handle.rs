//! The handle returned by fixture creation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{FixtureError, Result};
use crate::fixture::json::{to_json_bytes, JsonIndent};
use crate::fs_op::copy::copy_path;
use crate::fs_op::create::{self, create_dir_all};
use crate::fs_op::mv;
use crate::fs_op::path::{join_under, resolve_copy_target};
use crate::fs_op::remove::remove_path;
use crate::fs_op::stat::{self, EntryKind};

/// A directory entry reported by [`FsFixture::read_directory_with_types`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntryInfo {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntryInfo {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }
}

/// A materialized fixture directory.
///
/// All path arguments are relative to the fixture root; an empty path or
/// `"."` means the root itself. When the handle is dropped the root is
/// deleted, unless [`FsFixture::debug`] was called.
#[derive(Debug)]
pub struct FsFixture {
    path: PathBuf,
    cleanup_enabled: bool,
    closed: bool,
}

impl FsFixture {
    pub(crate) fn new(path: PathBuf) -> Self {
        FsFixture {
            path,
            cleanup_enabled: true,
            closed: false,
        }
    }

    /// Absolute path of the fixture root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path of `sub` inside the fixture.
    pub fn get_path(&self, sub: impl AsRef<Path>) -> PathBuf {
        join_under(&self.path, sub)
    }

    /// Absolute path of several segments joined inside the fixture.
    pub fn join_path<I, S>(&self, segments: I) -> PathBuf
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        segments
            .into_iter()
            .fold(self.path.clone(), |acc, seg| join_under(&acc, seg))
    }

    /// Whether `sub` exists. Any access error counts as "no".
    pub fn exists(&self, sub: impl AsRef<Path>) -> bool {
        stat::exists(self.get_path(sub))
    }

    /// Delete `sub` recursively. Deleting something absent is not an error.
    pub fn remove(&self, sub: impl AsRef<Path>) -> Result<()> {
        let target = self.get_path(sub);
        remove_path(&target).map_err(|e| FixtureError::io("remove", target, e))
    }

    /// Copy an outside file or directory into the fixture and return where it
    /// landed.
    ///
    /// With no `dest` the source's file name is used; a `dest` ending in a
    /// separator is treated as a directory and the file name is appended.
    pub fn copy(&self, source: impl AsRef<Path>, dest: Option<&str>) -> Result<PathBuf> {
        let source = source.as_ref();
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                FixtureError::io(
                    "copy",
                    source,
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, "source has no file name"),
                )
            })?;
        let rel = match dest {
            Some(dest) => resolve_copy_target(dest, &name),
            None => name,
        };
        let target = self.get_path(rel);
        copy_path(source, &target).map_err(|e| FixtureError::io("copy", source, e))?;
        Ok(target)
    }

    /// Create `sub` and any missing parents.
    pub fn make_directory(&self, sub: impl AsRef<Path>) -> Result<()> {
        let target = self.get_path(sub);
        create_dir_all(&target).map_err(|e| FixtureError::io("mkdir", target, e))
    }

    /// Rename `from` to `to`, both inside the fixture.
    pub fn move_path(&self, from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
        let from = self.get_path(from);
        let to = self.get_path(to);
        mv::move_path(&from, &to).map_err(|e| FixtureError::io("rename", from, e))
    }

    /// Read a file as bytes.
    pub fn read_file(&self, sub: impl AsRef<Path>) -> Result<Vec<u8>> {
        let target = self.get_path(sub);
        fs::read(&target).map_err(|e| FixtureError::io("read", target, e))
    }

    /// Read a file as UTF-8 text.
    pub fn read_to_string(&self, sub: impl AsRef<Path>) -> Result<String> {
        let target = self.get_path(sub);
        fs::read_to_string(&target).map_err(|e| FixtureError::io("read", target, e))
    }

    /// Write text or bytes, replacing any existing file.
    pub fn write_file(&self, sub: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Result<()> {
        let target = self.get_path(sub);
        create::write_file(&target, content.as_ref()).map_err(|e| FixtureError::io("write", target, e))
    }

    /// Parse a JSON file.
    pub fn read_json<T: DeserializeOwned>(&self, sub: impl AsRef<Path>) -> Result<T> {
        let target = self.get_path(sub);
        let bytes = fs::read(&target).map_err(|e| FixtureError::io("read", &target, e))?;
        serde_json::from_slice(&bytes).map_err(|source| FixtureError::Json { path: target, source })
    }

    /// Write `value` as JSON indented by two spaces.
    pub fn write_json<T: Serialize + ?Sized>(&self, sub: impl AsRef<Path>, value: &T) -> Result<()> {
        self.write_json_with(sub, value, JsonIndent::default())
    }

    /// Write `value` as JSON with a custom indent.
    pub fn write_json_with<T: Serialize + ?Sized>(
        &self,
        sub: impl AsRef<Path>,
        value: &T,
        indent: impl Into<JsonIndent>,
    ) -> Result<()> {
        let target = self.get_path(sub);
        let bytes = to_json_bytes(value, &indent.into())
            .map_err(|source| FixtureError::Json { path: target.clone(), source })?;
        create::write_file(&target, &bytes).map_err(|e| FixtureError::io("write", target, e))
    }

    /// Names of the entries in directory `sub`, sorted. Non-UTF-8 names are
    /// converted lossily, as in [`FsFixture::read_directory_with_types`].
    pub fn read_directory(&self, sub: impl AsRef<Path>) -> Result<Vec<String>> {
        Ok(self
            .read_directory_with_types(sub)?
            .into_iter()
            .map(|e| e.name)
            .collect())
    }

    /// Entries of directory `sub` with their kinds, sorted by name. Symlinks
    /// are reported as symlinks, not as what they point at.
    ///
    /// Names are converted lossily: bytes that are not valid UTF-8 become
    /// `U+FFFD`, so such a name cannot be fed back into other calls. Use
    /// `std::fs::read_dir` on [`FsFixture::get_path`] when exact names matter.
    pub fn read_directory_with_types(&self, sub: impl AsRef<Path>) -> Result<Vec<DirEntryInfo>> {
        let target = self.get_path(sub);
        let read = fs::read_dir(&target).map_err(|e| FixtureError::io("read_dir", &target, e))?;

        let mut entries = Vec::new();
        for entry in read {
            let entry = entry.map_err(|e| FixtureError::io("read_dir", &target, e))?;
            let ft = entry
                .file_type()
                .map_err(|e| FixtureError::io("stat", entry.path(), e))?;
            entries.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind: EntryKind::from_file_type(ft),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Keep the fixture on disk after the handle goes away, for inspection.
    pub fn debug(&mut self) {
        if self.cleanup_enabled {
            tracing::info!("fixture kept for debugging at {}", self.path.display());
        }
        self.cleanup_enabled = false;
    }

    /// Disable cleanup, then run `f` and hand back whatever it returns.
    ///
    /// Cleanup is disabled before `f` runs, so the fixture survives even if
    /// `f` returns an error or panics.
    pub fn debug_with<R>(&mut self, f: impl FnOnce(&FsFixture) -> R) -> R {
        self.debug();
        f(self)
    }

    /// Whether dropping or closing the handle deletes the root.
    pub fn is_cleanup_enabled(&self) -> bool {
        self.cleanup_enabled
    }

    /// Dispose of the fixture now, reporting removal errors that `Drop`
    /// could only log.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        if !self.cleanup_enabled {
            return Ok(());
        }
        remove_path(&self.path).map_err(|e| FixtureError::io("remove", &self.path, e))?;
        tracing::debug!("removed fixture {}", self.path.display());
        Ok(())
    }
}

impl Drop for FsFixture {
    fn drop(&mut self) {
        if self.closed || !self.cleanup_enabled {
            return;
        }
        match remove_path(&self.path) {
            Ok(()) => tracing::debug!("removed fixture {}", self.path.display()),
            Err(e) => tracing::warn!("failed to remove fixture {}: {}", self.path.display(), e),
        }
    }
}
