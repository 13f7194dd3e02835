//! Search-path lookup for external commands.

use std::ffi::OsStr;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Owner-execute permission bit.
const OWNER_EXEC: u32 = 0o100;

/// Whether `path` is a regular file with the owner-execute bit set.
pub fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & OWNER_EXEC != 0)
        .unwrap_or(false)
}

/// Non-empty directories of a colon-separated search path, in order.
pub fn search_dirs(search_path: &OsStr) -> impl Iterator<Item = PathBuf> + '_ {
    std::env::split_paths(search_path).filter(|dir| !dir.as_os_str().is_empty())
}

/// Resolve `name` against `search_path`.
///
/// Returns the first `<dir>/<name>` that is a regular executable file, or
/// `None` when nothing matches or no search path is set. Names containing a
/// `/` are not looked up.
pub fn find_executable(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    if name.is_empty() || name.contains('/') {
        return None;
    }
    search_dirs(search_path?)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}
