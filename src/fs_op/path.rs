use std::env;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Join `sub` below `root` the way a string path join would.
///
/// Behaviour:
/// - Root and prefix components of `sub` are dropped, so `"/a"` lands at
///   `root/a` instead of replacing `root`.
/// - `.` components are skipped; an empty `sub` or `"."` yields `root`.
/// - `..` components are kept and resolved by the OS.
pub fn join_under(root: &Path, sub: impl AsRef<Path>) -> PathBuf {
    let mut out = root.to_path_buf();
    for component in sub.as_ref().components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => out.push(".."),
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Make `path` absolute against the current directory. Already absolute
/// paths are returned as given; nothing is canonicalized.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

/// Resolve the destination of a copy: a `dest` ending in a separator names a
/// directory, so the source's file name is appended.
pub fn resolve_copy_target(dest: &str, src_name: &str) -> String {
    if dest.ends_with('/') || (cfg!(windows) && dest.ends_with('\\')) {
        format!("{dest}{src_name}")
    } else {
        dest.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolutize_keeps_absolute_and_anchors_relative() {
        let cwd = env::current_dir().unwrap();
        assert_eq!(absolutize(Path::new("tpl/sub")).unwrap(), cwd.join("tpl/sub"));
        assert_eq!(absolutize(&cwd).unwrap(), cwd);
        assert!(absolutize(Path::new("x")).unwrap().is_absolute());
    }

    #[test]
    fn empty_and_dot_resolve_to_root() {
        let root = Path::new("/tmp/root");
        assert_eq!(join_under(root, ""), root);
        assert_eq!(join_under(root, "."), root);
        assert_eq!(join_under(root, "./"), root);
    }

    #[test]
    fn nested_segments_are_joined() {
        let root = Path::new("/tmp/root");
        assert_eq!(join_under(root, "a/b/c"), Path::new("/tmp/root/a/b/c"));
        assert_eq!(join_under(root, "./a/./b"), Path::new("/tmp/root/a/b"));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_sub_stays_under_root() {
        let root = Path::new("/tmp/root");
        assert_eq!(join_under(root, "/etc/x"), Path::new("/tmp/root/etc/x"));
    }

    #[test]
    fn trailing_separator_appends_source_name() {
        assert_eq!(resolve_copy_target("dir/", "file.txt"), "dir/file.txt");
        assert_eq!(resolve_copy_target("renamed.txt", "file.txt"), "renamed.txt");
    }
}
