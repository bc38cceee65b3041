//! Caller-facing knobs for fixture creation.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use percent_encoding::percent_decode_str;

use crate::errors::FixtureError;
use crate::fs_op::copy::CopyFilter;

/// Where fixture roots are placed instead of the OS temp directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempDirSource(PathBuf);

impl TempDirSource {
    /// Parse a plain path or a `file://` URL.
    pub fn parse(input: &str) -> Result<Self, FixtureError> {
        match input.strip_prefix("file://") {
            Some(rest) => file_url_path(rest).map(TempDirSource),
            None if input.is_empty() => Err(FixtureError::InvalidTempDir("empty path".into())),
            None => Ok(TempDirSource(PathBuf::from(input))),
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

// `rest` is everything after `file://`: an optional host followed by the path.
fn file_url_path(rest: &str) -> Result<PathBuf, FixtureError> {
    let (host, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    if !host.is_empty() && !host.eq_ignore_ascii_case("localhost") {
        return Err(FixtureError::InvalidTempDir(format!(
            "file URL with remote host `{host}` is not supported"
        )));
    }
    if path.is_empty() {
        return Err(FixtureError::InvalidTempDir("file URL has no path".into()));
    }

    // Drop any query or fragment.
    let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or(path);
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map_err(|e| FixtureError::InvalidTempDir(format!("file URL is not UTF-8: {e}")))?;

    // `/C:/dir` names a drive path on Windows.
    if cfg!(windows) {
        let bytes = decoded.as_bytes();
        if bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':' {
            return Ok(PathBuf::from(&decoded[1..]));
        }
    }
    Ok(PathBuf::from(decoded.into_owned()))
}

impl FromStr for TempDirSource {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TempDirSource::parse(s)
    }
}

impl From<PathBuf> for TempDirSource {
    fn from(p: PathBuf) -> Self {
        TempDirSource(p)
    }
}

impl From<&Path> for TempDirSource {
    fn from(p: &Path) -> Self {
        TempDirSource(p.to_path_buf())
    }
}

/// Options accepted by [`create_fixture_with`](crate::create_fixture_with).
#[derive(Clone, Default)]
pub struct FixtureOptions {
    pub(crate) temp_dir: Option<TempDirSource>,
    pub(crate) template_filter: Option<Arc<CopyFilter>>,
}

impl FixtureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create fixture roots under `dir` (created if missing).
    pub fn temp_dir(mut self, dir: impl Into<TempDirSource>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Only copy template paths for which `filter` returns `true`. Rejecting a
    /// directory skips its whole subtree. Candidates are absolute paths inside
    /// the template, even when the template was given relative to the current
    /// directory. Ignored for tree sources.
    pub fn template_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        let filter: Arc<CopyFilter> = Arc::new(filter);
        self.template_filter = Some(filter);
        self
    }
}

impl fmt::Debug for FixtureOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureOptions")
            .field("temp_dir", &self.temp_dir)
            .field("template_filter", &self.template_filter.as_ref().map(|_| ".."))
            .finish()
    }
}
