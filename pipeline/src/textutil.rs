use lazy_regex::{regex_find, regex_replace_all};

/// Cleans leading, trailing, and redundant whitespace from a string, in-place.
pub fn clean_text(s: &mut String) {
    let trimmed = s.trim();
    // Skip the copy/realloc if nothing to do.
    if trimmed.len() != s.len() || regex_find!(r"\s{2,}", &trimmed).is_some() {
        let new = regex_replace_all!(r"\s{2,}", trimmed, " ");
        *s = new.to_string();
    }
}

/// Splits `s` at its first line break (either `\n` or `\r`). Returns the text before the break,
/// and whether a break was present.
pub fn first_line(s: &str) -> (&str, bool) {
    match s.split_once(['\n', '\r']) {
        Some((first, _)) => (first, true),
        None => (s, false),
    }
}
