use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building a fixture or operating on one.
#[derive(Error, Debug)]
pub enum FixtureError {
    /// An underlying filesystem call failed. `op` names the operation
    /// (`"write"`, `"symlink"`, ...) and `path` the path it targeted.
    #[error("{op} failed for `{}`: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A tree value had a shape that cannot become a file, directory or link.
    #[error("invalid file tree entry at `{}`: {found} is not content, a tree or a resolver", path.display())]
    InvalidNode { path: PathBuf, found: &'static str },

    /// A resolver ran but produced nothing.
    #[error("resolver for `{}` returned no content", path.display())]
    EmptyResolver { path: PathBuf },

    /// A resolver reported its own error.
    #[error("resolver for `{}` failed: {source}", path.display())]
    Resolver {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// JSON (de)serialization of a fixture file failed.
    #[error("JSON error in `{}`: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A caller-supplied temp directory could not be interpreted.
    #[error("invalid temp directory: {0}")]
    InvalidTempDir(String),
}

impl FixtureError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        FixtureError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// The `io::ErrorKind` of the failing filesystem call, if this is an I/O error.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            FixtureError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// `true` for errors caused by a malformed tree rather than the filesystem.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FixtureError::InvalidNode { .. } | FixtureError::EmptyResolver { .. }
        )
    }
}

/// Convenience alias used across the crate.
pub type Result<T, E = FixtureError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_kind_is_preserved() {
        let err = FixtureError::io(
            "read",
            "/nowhere",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        assert!(!err.is_validation());
        assert!(err.to_string().contains("/nowhere"));
    }

    #[test]
    fn validation_errors_are_flagged() {
        let invalid = FixtureError::InvalidNode {
            path: PathBuf::from("a/b"),
            found: "an array",
        };
        let empty = FixtureError::EmptyResolver {
            path: PathBuf::from("c"),
        };
        assert!(invalid.is_validation());
        assert!(empty.is_validation());
        assert_eq!(invalid.io_kind(), None);
    }
}
