use std::fs;
use std::io;
use std::path::Path;

/// Move (rename) `src` to `dest`. Both must live on the same filesystem.
pub fn move_path<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dest: Q) -> io::Result<()> {
    fs::rename(src.as_ref(), dest.as_ref())
}
