use crate::error::{Result, ShellError};

/// Quote context the scanner is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Split a command line into words, resolving quotes and backslash escapes.
///
/// An unterminated quote absorbs the rest of the line into the open word.
pub fn tokenize(line: &str) -> Vec<String> {
    split_words(line).0
}

/// Like [`tokenize`], but rejects a line that ends inside a quote.
///
/// # Errors
///
/// Returns [`ShellError::MalformedInput`] naming the unterminated quote.
pub fn try_tokenize(line: &str) -> Result<Vec<String>> {
    match split_words(line) {
        (words, Quote::None) => Ok(words),
        (_, Quote::Single) => Err(ShellError::malformed("unterminated single quote")),
        (_, Quote::Double) => Err(ShellError::malformed("unterminated double quote")),
    }
}

/// Scan `line` left to right. Returns the words and the quote context left open at the end.
fn split_words(line: &str) -> (Vec<String>, Quote) {
    let mut words = Vec::new();
    let mut buf = String::new();
    // A quoted empty string ('' or "") still produces a word.
    let mut in_word = false;

    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    let mut i = 0;
    let mut quote = Quote::None;

    while i < len {
        let c = chars[i];

        match (quote, c) {
            (Quote::Single, '\'') => quote = Quote::None,
            (Quote::Single, _) => buf.push(c),

            (Quote::Double, '"') => quote = Quote::None,
            (Quote::Double, '\\') => {
                if let Some(&next) = chars.get(i + 1) {
                    if !matches!(next, '\\' | '"' | '$') {
                        buf.push('\\');
                    }
                    buf.push(next);
                    i += 1;
                }
            }
            (Quote::Double, _) => buf.push(c),

            (Quote::None, '\'') => {
                quote = Quote::Single;
                in_word = true;
            }
            (Quote::None, '"') => {
                quote = Quote::Double;
                in_word = true;
            }
            (Quote::None, '\\') => {
                if let Some(&next) = chars.get(i + 1) {
                    buf.push(next);
                    in_word = true;
                    i += 1;
                }
            }
            (Quote::None, ' ') => {
                if in_word {
                    words.push(std::mem::take(&mut buf));
                    in_word = false;
                }
            }
            (Quote::None, _) => {
                buf.push(c);
                in_word = true;
            }
        }
        i += 1;
    }

    if in_word {
        words.push(buf);
    }

    (words, quote)
}
