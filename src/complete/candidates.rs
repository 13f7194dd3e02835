use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::ops::Bound;

use super::path::{is_executable, search_dirs};
use crate::commands::BUILTIN_NAMES;

/// Deduplicated, lexicographically ordered set of completable command names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    names: BTreeSet<String>,
}

impl CandidateSet {
    /// Set holding exactly the given names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Built-in names plus every executable found on `search_path`.
    ///
    /// Directories that cannot be read are skipped.
    pub fn discover(search_path: Option<&OsStr>) -> Self {
        let mut set = Self::from_names(BUILTIN_NAMES);
        if let Some(search_path) = search_path {
            for dir in search_dirs(search_path) {
                let entries = match fs::read_dir(&dir) {
                    Ok(entries) => entries,
                    Err(e) => {
                        log::debug!("skipping unreadable search dir {}: {e}", dir.display());
                        continue;
                    }
                };
                for entry in entries.flatten() {
                    if !is_executable(&entry.path()) {
                        continue;
                    }
                    if let Ok(name) = entry.file_name().into_string() {
                        set.names.insert(name);
                    }
                }
            }
        }
        set
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names starting with `prefix`, in lexicographic order.
    pub fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> {
        self.names
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |name| name.starts_with(prefix))
            .map(String::as_str)
    }
}

/// Supplies the candidate set for each completion attempt.
pub trait CandidateSource {
    /// Build the current candidate set. Called on every tab press.
    fn candidates(&self) -> CandidateSet;
}

impl CandidateSource for CandidateSet {
    fn candidates(&self) -> CandidateSet {
        self.clone()
    }
}

/// Live candidates: built-ins plus executables on the search path, rescanned
/// on every call so new or removed files show up immediately.
#[derive(Debug, Clone, Default)]
pub struct PathCandidates {
    /// Fixed search path; `None` reads `PATH` from the environment at each call.
    search_path: Option<OsString>,
}

impl PathCandidates {
    /// Candidates from the process `PATH`.
    pub fn from_env() -> Self {
        Self { search_path: None }
    }

    /// Candidates from an explicit search path.
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }
}

impl CandidateSource for PathCandidates {
    fn candidates(&self) -> CandidateSet {
        match &self.search_path {
            Some(path) => CandidateSet::discover(Some(path.as_os_str())),
            None => CandidateSet::discover(std::env::var_os("PATH").as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    fn touch(dir: &Path, name: &str, mode: u32) {
        let path = dir.join(name);
        fs::write(&path, "").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn builtins_always_present() {
        let set = CandidateSet::discover(None);
        for name in BUILTIN_NAMES {
            assert!(set.contains(name), "missing builtin {name}");
        }
    }

    #[test]
    fn discovers_executables_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "runme", 0o755);
        touch(dir.path(), "readme", 0o644);

        let set = CandidateSet::discover(Some(dir.path().as_os_str()));
        assert!(set.contains("runme"));
        assert!(!set.contains("readme"));
    }

    #[test]
    fn duplicates_collapse() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        touch(a.path(), "dup", 0o755);
        touch(b.path(), "dup", 0o755);
        touch(a.path(), "echo", 0o755);

        let path = std::env::join_paths([a.path(), b.path()]).unwrap();
        let set = CandidateSet::discover(Some(&path));
        assert_eq!(set.iter().filter(|n| *n == "dup").count(), 1);
        assert_eq!(set.iter().filter(|n| *n == "echo").count(), 1);
    }

    #[test]
    fn unreadable_dir_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "found", 0o755);
        let path = std::env::join_paths([Path::new("/no/such/dir"), dir.path()]).unwrap();

        let set = CandidateSet::discover(Some(&path));
        assert!(set.contains("found"));
    }

    #[test]
    fn matching_is_sorted_prefix_run() {
        let set = CandidateSet::from_names(["foobaz", "bar", "foobar", "fo", "zed"]);
        let got: Vec<&str> = set.matching("foo").collect();
        assert_eq!(got, vec!["foobar", "foobaz"]);
    }

    #[test]
    fn rescans_on_each_call() {
        let dir = tempfile::tempdir().unwrap();
        let source = PathCandidates::with_search_path(dir.path());
        assert!(!source.candidates().contains("late"));

        touch(dir.path(), "late", 0o755);
        assert!(source.candidates().contains("late"));
    }
}
