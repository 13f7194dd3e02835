//! Command-name completion over built-ins and search-path executables.
//!
//! A single tab asks [`complete`] for the longest safe extension of the word
//! typed so far. A second tab on an unchanged line lists every match via
//! [`list_all`].

pub mod candidates;
pub mod path;

pub use candidates::{CandidateSet, CandidateSource, PathCandidates};
pub use path::find_executable;

/// Outcome of a single-tab completion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// No candidate starts with the partial word.
    NoMatch,
    /// Exactly one candidate starts with the partial word.
    Unique(String),
    /// Several candidates match and they share a prefix longer than the partial word.
    CommonPrefix(String),
    /// Several candidates match but nothing can be added to the partial word.
    Ambiguous,
}

/// Complete `partial` against `candidates`.
pub fn complete(partial: &str, candidates: &CandidateSet) -> CompletionResult {
    let matches: Vec<&str> = candidates.matching(partial).collect();
    match matches.as_slice() {
        [] => CompletionResult::NoMatch,
        [only] => CompletionResult::Unique((*only).to_string()),
        several => {
            let prefix = common_prefix(several.iter().copied());
            if prefix.len() > partial.len() {
                CompletionResult::CommonPrefix(prefix.to_string())
            } else {
                CompletionResult::Ambiguous
            }
        }
    }
}

/// Every candidate starting with `partial`, in lexicographic order.
pub fn list_all(partial: &str, candidates: &CandidateSet) -> Vec<String> {
    candidates.matching(partial).map(str::to_string).collect()
}

/// Longest common prefix of `names`, compared character by character.
///
/// Empty when `names` is empty.
pub fn common_prefix<'a>(names: impl IntoIterator<Item = &'a str>) -> &'a str {
    let mut names = names.into_iter();
    let Some(first) = names.next() else {
        return "";
    };

    let mut end = first.len();
    for name in names {
        end = first[..end]
            .char_indices()
            .zip(name.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((i, c), _)| i + c.len_utf8());
    }
    &first[..end]
}
