//! Tag slugification.

/// Convert a free-form label into the canonical slug used for tag paths.
///
/// Follows the github-slugger rules the site router uses: lowercase, keep
/// letters, digits, combining marks, `-` and `_`, turn every space into a
/// hyphen and drop everything else. Spaces are neither trimmed nor
/// collapsed, so `"C++ & Rust"` becomes `"c--rust"`.
pub fn slugify(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || is_combining_mark(c) || c == '-' || c == '_' {
                Some(c)
            } else if c == ' ' {
                Some('-')
            } else {
                None
            }
        })
        .collect()
}

/// Combining diacritical mark blocks.
fn is_combining_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}
