//! Unique fixture root paths.
//!
//! Roots are named `<namespace>-<n>`, where the namespace combines the
//! process start time and PID (so parallel test processes and restarted ones
//! never share names) and `n` comes from a process-wide atomic counter (so
//! fixtures created concurrently within one process never share names).

use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;

use crate::errors::{FixtureError, Result};
use crate::fixture::options::TempDirSource;
use crate::fs_op::create::create_dir_all;
use crate::fs_op::path::absolutize;

static NAMESPACE: Lazy<String> = Lazy::new(|| {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("fs-fixture-{}-{}", millis, std::process::id())
});

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Namespace shared by every fixture root of this process.
pub fn namespace() -> &'static str {
    &NAMESPACE
}

/// The directory fixture roots are placed in.
///
/// A caller-supplied directory is made absolute against the current
/// directory and created if missing. Otherwise the OS temp directory is
/// used with symlinks resolved, so fixture paths compare equal to the
/// canonical paths tools report.
pub fn base_dir(source: Option<&TempDirSource>) -> Result<PathBuf> {
    match source {
        Some(source) => {
            let dir = source.as_path();
            let dir = absolutize(dir).map_err(|e| FixtureError::io("current_dir", dir, e))?;
            create_dir_all(&dir).map_err(|e| FixtureError::io("create temp dir", &dir, e))?;
            Ok(dir)
        }
        None => {
            let tmp = env::temp_dir();
            dunce::canonicalize(&tmp).map_err(|e| FixtureError::io("canonicalize", tmp, e))
        }
    }
}

/// A fresh root path under `base`. Nothing is created on disk.
pub fn next_fixture_path(base: &Path) -> PathBuf {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed) + 1;
    base.join(format!("{}-{}", namespace(), id))
}

/// Resolve the base directory and allocate a root path inside it.
pub fn resolve_fixture_root(source: Option<&TempDirSource>) -> Result<PathBuf> {
    let base = base_dir(source)?;
    Ok(next_fixture_path(&base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::tempdir;

    #[test]
    fn namespace_has_prefix_and_pid() {
        let ns = namespace();
        assert!(ns.starts_with("fs-fixture-"));
        assert!(ns.ends_with(&format!("-{}", std::process::id())));
    }

    #[test]
    fn paths_are_unique_across_threads() {
        let base = PathBuf::from("/base");
        let paths: Vec<PathBuf> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| (0..50).map(|_| next_fixture_path(&base)).collect::<Vec<_>>()))
                .collect();
            handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
        });
        let unique: HashSet<_> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
        assert!(paths.iter().all(|p| p.parent() == Some(base.as_path())));
    }

    #[test]
    fn custom_base_is_created() {
        let td = tempdir().unwrap();
        let wanted = td.path().join("nested/base");
        let source = TempDirSource::from(wanted.as_path());
        let root = resolve_fixture_root(Some(&source)).unwrap();
        assert!(wanted.is_dir());
        assert_eq!(root.parent(), Some(wanted.as_path()));
        assert!(!root.exists());
    }

    #[test]
    fn default_base_is_canonical_temp_dir() {
        let base = base_dir(None).unwrap();
        assert!(base.is_absolute());
        assert_eq!(base, dunce::canonicalize(env::temp_dir()).unwrap());
    }
}
