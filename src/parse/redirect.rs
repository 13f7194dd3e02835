use std::path::PathBuf;

use super::types::{
    RedirectOperator, RedirectTarget, Redirection, STDERR_OPERATORS, STDOUT_OPERATORS,
};
use crate::error::{Result, ShellError};

/// A located operator: byte offset of its leading space and of the first byte after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

/// Find the first occurrence of `op` delimited by a space before it and a space
/// (or end of line) after it, skipping quoted and backslash-escaped text.
fn find_operator(text: &str, op: &RedirectOperator) -> Option<Span> {
    let (mut sq, mut dq, mut esc) = (false, false, false);

    for (i, c) in text.char_indices() {
        if esc {
            esc = false;
            continue;
        }
        if c == '\\' && !sq {
            esc = true;
            continue;
        }
        if c == '\'' && !dq {
            sq = !sq;
            continue;
        }
        if c == '"' && !sq {
            dq = !dq;
            continue;
        }
        if sq || dq || c != ' ' {
            continue;
        }

        let rest = &text[i + 1..];
        if let Some(after) = rest.strip_prefix(op.spelling)
            && (after.is_empty() || after.starts_with(' '))
        {
            return Some(Span {
                start: i,
                end: i + 1 + op.spelling.len(),
            });
        }
    }

    None
}

/// Remove the first clause matching any operator in `table` from `working`.
///
/// Operators are tried in table order; the first one present anywhere in the
/// line wins. The clause (operator plus target file name) is cut out and the
/// text on either side is joined back together.
fn extract_clause(
    working: &mut String,
    table: &[RedirectOperator],
) -> Result<Option<RedirectTarget>> {
    let Some((op, span)) = table
        .iter()
        .find_map(|op| find_operator(working, op).map(|span| (op, span)))
    else {
        return Ok(None);
    };

    let after = &working[span.end..];
    let name_start = span.end + (after.len() - after.trim_start_matches(' ').len());
    let name_len = working[name_start..]
        .find(' ')
        .unwrap_or(working.len() - name_start);
    if name_len == 0 {
        return Err(ShellError::malformed(format!(
            "missing file name after `{}`",
            op.spelling
        )));
    }

    let name_end = name_start + name_len;
    let target = RedirectTarget {
        path: PathBuf::from(&working[name_start..name_end]),
        append: op.append,
    };
    working.replace_range(span.start..name_end, "");

    Ok(Some(target))
}

/// Split a command line into its bare command and its stdout/stderr targets.
///
/// Recognised operators need a space on both sides (the target may follow
/// after any number of spaces): `>>`/`1>>` and `>`/`1>` for stdout, `2>>`
/// and `2>` for stderr. Stdout is resolved first, then stderr is searched in
/// what remains, so the order of the two clauses on the line does not matter.
/// Operators inside quotes or after a backslash are ordinary text.
///
/// # Errors
///
/// Returns [`ShellError::MalformedInput`] when an operator has no file name after it.
pub fn parse_redirection(line: &str) -> Result<Redirection> {
    let mut working = line.to_string();
    let stdout = extract_clause(&mut working, &STDOUT_OPERATORS)?;
    let stderr = extract_clause(&mut working, &STDERR_OPERATORS)?;

    Ok(Redirection {
        command: working,
        stdout,
        stderr,
    })
}
