//! Turn a nested [`FileTree`] into a flat list of filesystem entries.

use std::path::{Path, PathBuf};

use crate::errors::{FixtureError, Result};
use crate::fixture::context::{ContextBase, ResolveContext};
use crate::fixture::tree::{Content, FileTree, SymlinkKind, TreeNode};
use crate::fs_op::path::join_under;

/// A planned filesystem node. Paths are always absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathEntry {
    Directory {
        path: PathBuf,
    },
    File {
        path: PathBuf,
        content: Content,
    },
    Symlink {
        path: PathBuf,
        target: PathBuf,
        kind: Option<SymlinkKind>,
    },
}

impl PathEntry {
    pub fn path(&self) -> &Path {
        match self {
            PathEntry::Directory { path }
            | PathEntry::File { path, .. }
            | PathEntry::Symlink { path, .. } => path,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, PathEntry::Directory { .. })
    }
}

/// Flatten `tree` into entries rooted at `prefix`.
///
/// Keys are visited in insertion order. Resolvers are called once each, with
/// a context whose `file_path` is the entry's own path. A directory entry is
/// always emitted before anything inside it, and an empty tree still emits
/// its directory.
pub fn flatten_file_tree(tree: &FileTree, prefix: &Path, fixture_path: &Path) -> Result<Vec<PathEntry>> {
    let base = ContextBase {
        fixture_path: fixture_path.to_path_buf(),
    };
    let mut out = Vec::new();
    flatten_into(tree, prefix, &base, &mut out)?;
    Ok(out)
}

fn flatten_into(
    tree: &FileTree,
    prefix: &Path,
    base: &ContextBase,
    out: &mut Vec<PathEntry>,
) -> Result<()> {
    for (key, node) in tree.iter() {
        let path = join_under(prefix, key);

        let resolved;
        let node = match node {
            TreeNode::Resolver(resolver) => {
                let ctx = ResolveContext::new(base, path.clone());
                resolved = match resolver(&ctx) {
                    Ok(Some(node)) => node,
                    Ok(None) => return Err(FixtureError::EmptyResolver { path }),
                    Err(source) => return Err(FixtureError::Resolver { path, source }),
                };
                &resolved
            }
            other => other,
        };

        match node {
            TreeNode::Content(content) => {
                tracing::trace!("plan file {}", path.display());
                out.push(PathEntry::File {
                    path,
                    content: content.clone(),
                });
            }
            TreeNode::Symlink(link) => {
                tracing::trace!("plan symlink {} -> {}", path.display(), link.target.display());
                out.push(PathEntry::Symlink {
                    path,
                    target: link.target.clone(),
                    kind: link.kind,
                });
            }
            TreeNode::Tree(children) => {
                tracing::trace!("plan dir {}", path.display());
                out.push(PathEntry::Directory { path: path.clone() });
                flatten_into(children, &path, base, out)?;
            }
            // A resolver may not hand back another resolver.
            TreeNode::Resolver(_) => {
                return Err(FixtureError::InvalidNode {
                    path,
                    found: node.describe(),
                })
            }
        }
    }
    Ok(())
}
