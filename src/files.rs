//! Capability-scoped file reads for user-supplied paths.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;

/// Reads a whole file by opening its parent directory as a capability.
///
/// # Errors
///
/// Returns an I/O error when the path has no file name or cannot be read.
pub fn read_bytes(path: &Utf8Path) -> io::Result<Vec<u8>> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read(file_name)
}
