//! Line-oriented matching of `@Tag value` annotations inside doc comment blocks.
//!
//! A vocabulary is an ordered slice of `(prefix, tag)` pairs. Each line is
//! tested against the prefixes top to bottom and yields at most one match, so
//! the order of the slice is the dispatch priority.

/// Strip `tag` from the start of `line` and return the trimmed remainder.
///
/// The match is case-sensitive and the prefix must be followed by at least
/// one whitespace character: `@Title Foo` matches `@Title`, `@TitleFoo` and a
/// bare `@Title` do not.
pub fn trim_tag_prefix<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(tag)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim())
}

/// Whether `line` is the value-less flag `tag`, alone or followed by text.
pub fn is_flag(line: &str, tag: &str) -> bool {
    line.trim_end() == tag || trim_tag_prefix(line, tag).is_some()
}

/// Match one line against `vocabulary`, first prefix wins.
pub fn match_line<'a, T: Copy>(line: &'a str, vocabulary: &[(&str, T)]) -> Option<(T, &'a str)> {
    vocabulary
        .iter()
        .find_map(|(prefix, tag)| trim_tag_prefix(line, prefix).map(|value| (*tag, value)))
}

/// Scan every line of a comment block. Lines matching no prefix are skipped.
pub fn scan_block<'a, T: Copy>(
    block: &'a str,
    vocabulary: &'a [(&'a str, T)],
) -> impl Iterator<Item = (T, &'a str)> + 'a {
    block
        .lines()
        .filter_map(move |line| match_line(line, vocabulary))
}
