//! Fixture creation: flatten a tree (or copy a template) into a fresh,
//! uniquely named directory and wrap it in an [`FsFixture`].

pub mod context;
pub mod flatten;
pub mod handle;
pub mod json;
pub mod materialize;
pub mod options;
pub mod temp_dir;
pub mod tree;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::{FixtureError, Result};
use crate::fs_op::create::create_dir;
use crate::fs_op::path::absolutize;

pub use context::ResolveContext;
pub use flatten::{flatten_file_tree, PathEntry};
pub use handle::{DirEntryInfo, FsFixture};
pub use json::JsonIndent;
pub use options::{FixtureOptions, TempDirSource};
pub use tree::{Content, FileTree, ResolveResult, Resolver, Symlink, SymlinkKind, TreeNode};

/// What a fixture is built from.
#[derive(Debug, Clone, Default)]
pub enum FixtureSource {
    /// An empty root directory.
    #[default]
    Empty,
    /// A directory whose contents are copied in.
    Template(PathBuf),
    /// A declarative tree.
    Tree(FileTree),
}

impl From<FileTree> for FixtureSource {
    fn from(tree: FileTree) -> Self {
        FixtureSource::Tree(tree)
    }
}

impl From<&str> for FixtureSource {
    fn from(path: &str) -> Self {
        FixtureSource::Template(PathBuf::from(path))
    }
}

impl From<String> for FixtureSource {
    fn from(path: String) -> Self {
        FixtureSource::Template(PathBuf::from(path))
    }
}

impl From<PathBuf> for FixtureSource {
    fn from(path: PathBuf) -> Self {
        FixtureSource::Template(path)
    }
}

impl From<&Path> for FixtureSource {
    fn from(path: &Path) -> Self {
        FixtureSource::Template(path.to_path_buf())
    }
}

impl From<Option<FileTree>> for FixtureSource {
    fn from(tree: Option<FileTree>) -> Self {
        tree.map_or(FixtureSource::Empty, FixtureSource::Tree)
    }
}

/// Create a fixture under the OS temp directory.
pub fn create_fixture(source: impl Into<FixtureSource>) -> Result<FsFixture> {
    create_fixture_with(source, &FixtureOptions::default())
}

/// Create a fixture with explicit options.
///
/// A tree is flattened (running its resolvers) before anything is written,
/// so an invalid tree leaves nothing on disk. The root itself is created
/// exclusively; a failure after that point leaves the partial root behind.
pub fn create_fixture_with(source: impl Into<FixtureSource>, options: &FixtureOptions) -> Result<FsFixture> {
    let source = source.into();
    let root = temp_dir::resolve_fixture_root(options.temp_dir.as_ref())?;

    let plan = match source {
        FixtureSource::Tree(tree) => Plan::Entries(flatten_file_tree(&tree, &root, &root)?),
        FixtureSource::Template(template) => Plan::Template(checked_template(&template)?),
        FixtureSource::Empty => Plan::Entries(Vec::new()),
    };

    create_dir(&root).map_err(|e| FixtureError::io("create fixture root", &root, e))?;

    match &plan {
        Plan::Entries(entries) => materialize::materialize(&root, entries)?,
        Plan::Template(template) => {
            materialize::copy_template(template, &root, options.template_filter.as_deref())?
        }
    }

    tracing::debug!("created fixture {}", root.display());
    Ok(FsFixture::new(root))
}

// Everything that can fail without touching disk happens before the root is
// created.
enum Plan {
    Entries(Vec<PathEntry>),
    Template(PathBuf),
}

/// Absolute path of `template`, which must be an existing directory. The
/// template filter sees paths below this one.
fn checked_template(template: &Path) -> Result<PathBuf> {
    let template = absolutize(template).map_err(|e| FixtureError::io("current_dir", template, e))?;
    let meta = fs::metadata(&template).map_err(|e| FixtureError::io("stat", &template, e))?;
    if !meta.is_dir() {
        return Err(FixtureError::io(
            "stat",
            template,
            io::Error::new(io::ErrorKind::InvalidInput, "template is not a directory"),
        ));
    }
    Ok(template)
}
