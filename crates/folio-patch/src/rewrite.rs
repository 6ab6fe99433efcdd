//! Text rewrite of legacy JSON import assertions.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `assert ({ type: 'json' })`
static PARENTHESIZED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bassert\s*\(\s*\{\s*type\s*:\s*(?P<q>['"])json['"]\s*\}\s*\)"#)
        .unwrap()
});

/// `import x from './x.json' assert { type: 'json' }`
static IMPORT_EMBEDDED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<head>\bimport\s[^;]*?\sfrom\s*['"][^'"\n]*['"]\s*)\bassert\s*\{\s*type\s*:\s*(?P<q>['"])json['"]\s*\}"#,
    )
    .unwrap()
});

/// `assert { type: 'json' }`
static BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bassert\s*\{\s*type\s*:\s*(?P<q>['"])json['"]\s*\}"#)
        .unwrap()
});

/// Result of rewriting one file's text.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite<'a> {
    /// Rewritten text; borrowed when nothing matched
    pub text: Cow<'a, str>,

    /// Number of clauses replaced
    pub replacements: usize,
}

impl Rewrite<'_> {
    pub fn changed(&self) -> bool {
        self.replacements > 0
    }
}

/// Replace every legacy `assert { type: 'json' }` clause with `with { type: 'json' }`.
///
/// The quote character of the source clause is kept. All other text is
/// returned verbatim, and already-patched text comes back unchanged.
pub fn rewrite_import_attributes(source: &str) -> Rewrite<'_> {
    let mut replacements = 0;

    let text = apply(Cow::Borrowed(source), &PARENTHESIZED, &mut replacements, |caps| {
        modern_clause(&caps["q"])
    });
    let text = apply(text, &IMPORT_EMBEDDED, &mut replacements, |caps| {
        format!("{}{}", &caps["head"], modern_clause(&caps["q"]))
    });
    let text = apply(text, &BARE, &mut replacements, |caps| {
        modern_clause(&caps["q"])
    });

    Rewrite { text, replacements }
}

fn modern_clause(quote: &str) -> String {
    format!("with {{ type: {quote}json{quote} }}")
}

/// Run one pattern over `text`, allocating only when it matches.
fn apply<'a, F>(text: Cow<'a, str>, pattern: &Regex, count: &mut usize, replace: F) -> Cow<'a, str>
where
    F: Fn(&Captures<'_>) -> String,
{
    let matches = pattern.find_iter(&text).count();
    if matches == 0 {
        return text;
    }

    *count += matches;
    let replaced = pattern.replace_all(&text, |caps: &Captures<'_>| replace(caps)).into_owned();
    Cow::Owned(replaced)
}
