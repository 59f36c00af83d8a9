use glob::{MatchOptions, Pattern};

use crate::entry::Entry;
use crate::error::DirmatchError;
use crate::traits::Matcher;

/// `fnmatch(3)` with no flags except `FNM_NOESCAPE`: case-sensitive, a
/// leading `.` is not special, and `/` never appears in an entry name.
const OPTIONS: MatchOptions = MatchOptions {
    case_sensitive:              true,
    require_literal_separator:   false,
    require_literal_leading_dot: false,
};

/// Matches entry names against a shell-style glob.
///
/// `*` matches any run of characters, `?` exactly one, and `[...]` a
/// character class (`[!...]` or `[^...]` to negate, `[:digit:]` and the other
/// POSIX names for their ASCII sets). Backslash has no special meaning and
/// matches itself.
///
/// ```rust
/// use dirmatch::GlobMatcher;
///
/// let m = GlobMatcher::new("*.txt").unwrap();
/// assert!(m.matches("notes.txt"));
/// assert!(!m.matches("notes.md"));
/// ```
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    source:  String,
    pattern: Pattern,
}

impl GlobMatcher {
    /// Compile `pattern`.
    ///
    /// Patterns the `glob` crate rejects but `fnmatch` accepts are translated
    /// first: repeated `*` collapse and an unclosed `[` is taken literally.
    pub fn new(pattern: &str) -> Result<Self, DirmatchError> {
        Ok(Self {
            source:  pattern.to_owned(),
            pattern: compile(pattern, &translate(pattern))?,
        })
    }

    /// Test a bare name.
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.matches_with(name, OPTIONS)
    }

    /// The pattern as it was given.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Matcher for GlobMatcher {
    /// Names that are not UTF-8 are matched in their lossy form, so each
    /// invalid sequence counts as one character for `?`.
    fn is_match(&self, entry: &Entry) -> bool {
        match entry.name_str() {
            Some(name) => self.matches(name),
            None => self.matches(&entry.name.to_string_lossy()),
        }
    }
}

fn compile(original: &str, translated: &str) -> Result<Pattern, DirmatchError> {
    Pattern::new(translated).map_err(|e| DirmatchError::InvalidPattern {
        pattern: original.to_owned(),
        reason:  e.msg.to_owned(),
    })
}

/// Rewrite a shell glob into the dialect the `glob` crate compiles.
///
/// - Runs of `*` collapse to one `*`. Names hold no separator, so `**` means
///   the same as `*`, but `glob` only accepts it as a whole path component.
/// - A `[` with no closing `]` is a literal `[`.
/// - `[^...]` becomes `[!...]`.
/// - `[:name:]` inside a class expands to its ASCII set (C locale).
///
/// Inside a class the first character is always a member, so `[]]` and
/// `[!]]` match `]`.
pub(crate) fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 2);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                out.push('*');
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
            }
            '[' => match class(&chars, i) {
                Some((class, end)) => {
                    out.push_str(&class);
                    i = end + 1;
                }
                None => {
                    out.push_str("[[]");
                    i += 1;
                }
            },
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Translate the class opened at `open`. Returns it with the index of its
/// closing `]`, or `None` if it is never closed.
///
/// `glob` ends a class at the first `]` after the first member and reads
/// `!` in first place as negation, so `]`, `!` and `-` coming from named
/// sets are emitted where they stay literal: `]` first, `!` and `-` last.
fn class(chars: &[char], open: usize) -> Option<(String, usize)> {
    let mut i = open + 1;
    let negated = matches!(chars.get(i), Some('!' | '^'));
    if negated {
        i += 1;
    }
    let first = i;

    let mut body = String::new();
    let (mut bracket, mut bang, mut dash) = (false, false, false);

    loop {
        match *chars.get(i)? {
            ']' if i == first => {
                bracket = true;
                i += 1;
            }
            ']' => break,
            '[' if chars.get(i + 1) == Some(&':') => match named_class(chars, i) {
                Some((set, next)) => {
                    body.push_str(set.ranges);
                    bracket |= set.bracket;
                    bang |= set.bang;
                    dash |= set.dash;
                    i = next;
                }
                None => {
                    body.push('[');
                    i += 1;
                }
            },
            c => {
                body.push(c);
                i += 1;
            }
        }
    }

    let mut out = String::from("[");
    if negated {
        out.push('!');
    }
    if bracket {
        out.push(']');
    }
    out.push_str(&body);
    if bang {
        out.push('!');
    }
    if dash {
        out.push('-');
    }
    out.push(']');

    Some((out, i))
}

/// ASCII members of a POSIX character class. `ranges` never starts with `!`
/// and never contains `]` or a bare `-`; those are flagged instead.
struct NamedClass {
    ranges:  &'static str,
    bracket: bool,
    bang:    bool,
    dash:    bool,
}

impl NamedClass {
    const fn plain(ranges: &'static str) -> Self {
        Self { ranges, bracket: false, bang: false, dash: false }
    }
}

/// Parse `[:name:]` starting at `at`. Returns the set and the index just past
/// the closing `:]`. Unknown names are not a class.
fn named_class(chars: &[char], at: usize) -> Option<(NamedClass, usize)> {
    let start = at + 2;
    let len = chars[start..]
        .iter()
        .take_while(|c| c.is_ascii_lowercase())
        .count();
    let end = start + len;
    if chars.get(end) != Some(&':') || chars.get(end + 1) != Some(&']') {
        return None;
    }

    let name: String = chars[start..end].iter().collect();
    let set = match name.as_str() {
        "alpha"  => NamedClass::plain("a-zA-Z"),
        "digit"  => NamedClass::plain("0-9"),
        "alnum"  => NamedClass::plain("a-zA-Z0-9"),
        "upper"  => NamedClass::plain("A-Z"),
        "lower"  => NamedClass::plain("a-z"),
        "xdigit" => NamedClass::plain("0-9a-fA-F"),
        "space"  => NamedClass::plain("\t-\r "),
        "blank"  => NamedClass::plain(" \t"),
        "cntrl"  => NamedClass::plain("\u{0}-\u{1f}\u{7f}"),
        "print"  => NamedClass::plain(" -~"),
        "graph"  => NamedClass { bang: true, ..NamedClass::plain("\"-~") },
        "punct"  => NamedClass {
            ranges:  "\"-,.-/:-@[-\\^-`{-~",
            bracket: true,
            bang:    true,
            dash:    true,
        },
        _ => return None,
    };

    Some((set, end + 2))
}
