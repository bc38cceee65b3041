//! Declarative description of a fixture's contents.
//!
//! A [`FileTree`] maps path segments (which may themselves contain
//! separators, e.g. `"a/b/c"`) to [`TreeNode`] values: literal content, a
//! nested tree, a symlink, or a resolver computed while the tree is
//! flattened.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::{FixtureError, Result};
use crate::fixture::context::ResolveContext;
pub use crate::fs_op::symlink::SymlinkKind;

/// File content: text or raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Bytes(Vec<u8>),
}

impl Content {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Content::Text(s) => s.as_bytes(),
            Content::Bytes(b) => b,
        }
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Text(s)
    }
}

impl From<&[u8]> for Content {
    fn from(b: &[u8]) -> Self {
        Content::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Content {
    fn from(b: Vec<u8>) -> Self {
        Content::Bytes(b)
    }
}

/// A link to create. The location is decided by where the value sits in the
/// tree, not by the value itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symlink {
    pub target: PathBuf,
    pub kind: Option<SymlinkKind>,
}

impl Symlink {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Symlink {
            target: target.into(),
            kind: None,
        }
    }

    pub fn with_kind(target: impl Into<PathBuf>, kind: SymlinkKind) -> Self {
        Symlink {
            target: target.into(),
            kind: Some(kind),
        }
    }
}

/// What a resolver hands back. `Ok(None)` means it produced nothing, which
/// is rejected during flattening.
pub type ResolveResult = anyhow::Result<Option<TreeNode>>;

/// A lazily evaluated tree value.
pub type Resolver = Arc<dyn Fn(&ResolveContext<'_>) -> ResolveResult + Send + Sync>;

/// One value in a [`FileTree`].
#[derive(Clone)]
pub enum TreeNode {
    Content(Content),
    Tree(FileTree),
    Symlink(Symlink),
    Resolver(Resolver),
}

impl TreeNode {
    /// Short description used in validation errors.
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            TreeNode::Content(_) => "content",
            TreeNode::Tree(_) => "a tree",
            TreeNode::Symlink(_) => "a symlink",
            TreeNode::Resolver(_) => "a resolver",
        }
    }
}

impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeNode::Content(c) => f.debug_tuple("Content").field(c).finish(),
            TreeNode::Tree(t) => f.debug_tuple("Tree").field(t).finish(),
            TreeNode::Symlink(s) => f.debug_tuple("Symlink").field(s).finish(),
            TreeNode::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

impl From<Content> for TreeNode {
    fn from(c: Content) -> Self {
        TreeNode::Content(c)
    }
}

impl From<&str> for TreeNode {
    fn from(s: &str) -> Self {
        TreeNode::Content(s.into())
    }
}

impl From<String> for TreeNode {
    fn from(s: String) -> Self {
        TreeNode::Content(s.into())
    }
}

impl From<&[u8]> for TreeNode {
    fn from(b: &[u8]) -> Self {
        TreeNode::Content(b.into())
    }
}

impl From<Vec<u8>> for TreeNode {
    fn from(b: Vec<u8>) -> Self {
        TreeNode::Content(b.into())
    }
}

impl From<FileTree> for TreeNode {
    fn from(t: FileTree) -> Self {
        TreeNode::Tree(t)
    }
}

impl From<Symlink> for TreeNode {
    fn from(s: Symlink) -> Self {
        TreeNode::Symlink(s)
    }
}

/// Insertion-ordered mapping from path segment to [`TreeNode`].
///
/// Inserting a key that is already present replaces its value in place.
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    entries: Vec<(String, TreeNode)>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<TreeNode>) {
        let key = key.into();
        let node = node.into();
        match self.entries.iter_mut().find(|entry| entry.0 == key) {
            Some(slot) => slot.1 = node,
            None => self.entries.push((key, node)),
        }
    }

    /// Add a file with literal content.
    pub fn file(mut self, key: impl Into<String>, content: impl Into<Content>) -> Self {
        self.insert(key, TreeNode::Content(content.into()));
        self
    }

    /// Add a directory. An empty tree still produces the directory.
    pub fn dir(mut self, key: impl Into<String>, tree: FileTree) -> Self {
        self.insert(key, TreeNode::Tree(tree));
        self
    }

    /// Add a symlink whose target is known up front.
    pub fn symlink(mut self, key: impl Into<String>, link: Symlink) -> Self {
        self.insert(key, TreeNode::Symlink(link));
        self
    }

    /// Add a resolver. It may fail or yield nothing; both abort fixture
    /// creation.
    pub fn resolve<F>(mut self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&ResolveContext<'_>) -> ResolveResult + Send + Sync + 'static,
    {
        self.insert(key, TreeNode::Resolver(Arc::new(f)));
        self
    }

    /// Add an infallible resolver.
    pub fn computed<F, N>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&ResolveContext<'_>) -> N + Send + Sync + 'static,
        N: Into<TreeNode>,
    {
        self.resolve(key, move |ctx| Ok(Some(f(ctx).into())))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a tree from a JSON object: strings become files and objects
    /// become directories. Any other value is rejected with the key path
    /// that held it.
    pub fn from_json(value: Value) -> Result<Self> {
        Self::from_json_at(value, PathBuf::new())
    }

    fn from_json_at(value: Value, prefix: PathBuf) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(FixtureError::InvalidNode {
                    path: prefix,
                    found: json_kind(&other),
                })
            }
        };

        let mut tree = FileTree::new();
        for (key, value) in map {
            let path = prefix.join(&key);
            let node = match value {
                Value::String(s) => TreeNode::Content(Content::Text(s)),
                Value::Object(_) => TreeNode::Tree(Self::from_json_at(value, path)?),
                other => {
                    return Err(FixtureError::InvalidNode {
                        path,
                        found: json_kind(&other),
                    })
                }
            };
            tree.insert(key, node);
        }
        Ok(tree)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for FileTree
where
    K: Into<String>,
    V: Into<TreeNode>,
{
    fn from(items: [(K, V); N]) -> Self {
        let mut tree = FileTree::new();
        for (k, v) in items {
            tree.insert(k, v);
        }
        tree
    }
}

impl TryFrom<Value> for FileTree {
    type Error = FixtureError;

    fn try_from(value: Value) -> Result<Self> {
        FileTree::from_json(value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reinserting_a_key_replaces_in_place() {
        let tree = FileTree::new()
            .file("a", "first")
            .file("b", "b")
            .file("a", "second");
        let keys: Vec<_> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        match tree.iter().next() {
            Some((_, TreeNode::Content(c))) => assert_eq!(c.as_bytes(), b"second"),
            other => panic!("unexpected {other:?}"),
        };
    }

    #[test]
    fn from_json_builds_nested_tree() {
        let tree = FileTree::from_json(json!({
            "a.txt": "a",
            "dir": { "b.txt": "b", "empty": {} }
        }))
        .unwrap();
        assert_eq!(tree.len(), 2);
        match tree.iter().nth(1) {
            Some(("dir", TreeNode::Tree(inner))) => assert_eq!(inner.len(), 2),
            other => panic!("unexpected {other:?}"),
        };
    }

    #[test]
    fn from_json_rejects_arrays_with_path() {
        let err = FileTree::from_json(json!({ "dir": { "list": ["x"] } })).unwrap_err();
        assert!(err.is_validation());
        match err {
            FixtureError::InvalidNode { path, found } => {
                assert_eq!(path, PathBuf::from("dir").join("list"));
                assert_eq!(found, "an array");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn from_json_rejects_non_object_root() {
        let err = FileTree::from_json(json!("just text")).unwrap_err();
        assert!(matches!(err, FixtureError::InvalidNode { found: "a string", .. }));
    }

    #[test]
    fn array_literal_conversion() {
        let tree = FileTree::from([("a", "1"), ("b", "2")]);
        assert_eq!(tree.len(), 2);
        assert!(!tree.is_empty());
    }
}
