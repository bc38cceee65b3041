//! Disposable filesystem fixtures for tests.
//!
//! Describe a directory tree (or point at a template directory), get back a
//! uniquely named temporary directory holding it, and let the returned
//! [`FsFixture`] delete it when it goes out of scope.
//!
//! ```no_run
//! use fs_fixture::{create_fixture, FileTree};
//!
//! let fixture = create_fixture(
//!     FileTree::new()
//!         .file("package.json", "{}")
//!         .dir("src", FileTree::new().file("index.js", "export {}"))
//!         .computed("link.js", |ctx| ctx.symlink("src/index.js")),
//! )?;
//! assert!(fixture.exists("src/index.js"));
//! # Ok::<(), fs_fixture::FixtureError>(())
//! ```

pub mod errors;
pub mod fixture;
pub mod fs_op;
pub mod logging;

pub use crate::errors::{FixtureError, Result};
pub use crate::fixture::{
    create_fixture, create_fixture_with, Content, DirEntryInfo, FileTree, FixtureOptions,
    FixtureSource, FsFixture, JsonIndent, PathEntry, ResolveContext, ResolveResult, Symlink,
    SymlinkKind, TempDirSource, TreeNode,
};
pub use crate::fs_op::stat::EntryKind;
