//! Ignore filter: Shell-glob exclusion on normalized relative paths

use globset::{GlobBuilder, GlobMatcher};
use tracing::warn;

use super::ScanError;

/// Patterns applied when the caller supplies none.
///
/// Matching is done against the whole relative path and `*` crosses `/`,
/// so directory patterns carry a leading `*` to match at any depth.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "*.git/*",
    "*.pyc",
    "*__pycache__/*",
    "*.ipynb_checkpoints/*",
    "*.venv/*",
    "*venv/*",
    "*node_modules/*",
    "*.DS_Store",
    "*.idea/*",
    "*.vscode/*",
    "*.png",
    "*.jpg",
    "*.jpeg",
    "*.gif",
    "*.svg",
    "*.ico",
    "*.pdf",
    "*.zip",
    "*.tar.gz",
    "*.jar",
];

/// Ordered set of compiled ignore patterns
///
/// Patterns follow `fnmatch` rules: backslash is an ordinary character,
/// `[!...]` negates a class while `[^...]` does not, braces are literal and an
/// unclosed `[` matches itself.
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    patterns: Vec<String>,
    /// `None` for a pattern whose class admits no character
    matchers: Vec<Option<GlobMatcher>>,
}

impl IgnoreFilter {
    /// Compile the given patterns, preserving their order
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidPattern`] if the glob engine rejects a
    /// translated pattern. Every `fnmatch` pattern translates to one it accepts.
    pub fn new<I, S>(patterns: I) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let matchers = patterns
            .iter()
            .map(|pattern| compile(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns, matchers })
    }

    /// Whether the normalized path matches any pattern
    #[must_use]
    pub fn should_ignore(&self, path: &str) -> bool {
        self.matchers.iter().flatten().any(|m| m.is_match(path))
    }

    /// The first pattern matching the path, if any
    #[must_use]
    pub fn matching_pattern(&self, path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .zip(&self.matchers)
            .find(|(_, m)| m.as_ref().is_some_and(|m| m.is_match(path)))
            .map(|(pattern, _)| pattern.as_str())
    }

    /// Patterns in evaluation order
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for IgnoreFilter {
    fn default() -> Self {
        let (patterns, matchers) = DEFAULT_IGNORE_PATTERNS
            .iter()
            .filter_map(|pattern| match compile(pattern) {
                Ok(matcher) => Some(((*pattern).to_string(), matcher)),
                Err(e) => {
                    warn!("Dropping default ignore pattern: {}", e);
                    None
                }
            })
            .unzip();
        Self { patterns, matchers }
    }
}

fn compile(pattern: &str) -> Result<Option<GlobMatcher>, ScanError> {
    let Some(glob) = translate(pattern) else {
        return Ok(None);
    };

    GlobBuilder::new(&glob)
        .literal_separator(false)
        .backslash_escape(false)
        .build()
        .map(|glob| Some(glob.compile_matcher()))
        .map_err(|source| ScanError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Rewrite an `fnmatch` pattern in globset syntax.
///
/// Returns `None` when a character class is empty, as in `[z-a]`, so the
/// pattern can never match.
fn translate(pattern: &str) -> Option<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut glob = String::with_capacity(pattern.len());
    let mut i = 0;

    while let Some(&c) = chars.get(i) {
        i += 1;
        match c {
            '*' => {
                while chars.get(i) == Some(&'*') {
                    i += 1;
                }
                glob.push('*');
            }
            '?' => glob.push('?'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&mut glob, &chars[i..end])?;
                    i = end + 1;
                }
                None => push_literal(&mut glob, '['),
            },
            _ => push_literal(&mut glob, c),
        }
    }

    Some(glob)
}

/// Index of the `]` closing a class whose body starts at `start`.
/// A `]` directly after `[` or `[!` belongs to the class.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars
        .get(j..)?
        .iter()
        .position(|&c| c == ']')
        .map(|offset| j + offset)
}

fn push_literal(glob: &mut String, c: char) {
    if matches!(c, '*' | '?' | '[' | ']' | '{' | '}') {
        glob.push('[');
        glob.push(c);
        glob.push(']');
    } else {
        glob.push(c);
    }
}

/// Members of a class body, with the characters globset treats by position
/// (`]`, `-`, `!`, `^`) pulled out so they can be placed where they are literal.
#[derive(Default)]
struct ClassMembers {
    ranges: Vec<(char, char)>,
    bracket: bool,
    dash: bool,
    bang: bool,
    caret: bool,
}

impl ClassMembers {
    fn parse(body: &[char]) -> Self {
        let mut members = Self::default();
        let mut k = 0;
        while k < body.len() {
            if k + 2 < body.len() && body[k + 1] == '-' {
                // reversed ranges are empty
                if body[k] <= body[k + 2] {
                    members.add(body[k], body[k + 2]);
                }
                k += 3;
            } else {
                members.add(body[k], body[k]);
                k += 1;
            }
        }
        members
    }

    fn add(&mut self, mut lo: char, hi: char) {
        loop {
            match lo {
                ']' => self.bracket = true,
                '-' => self.dash = true,
                '!' => self.bang = true,
                '^' => self.caret = true,
                _ => break,
            }
            if lo == hi {
                return;
            }
            match char::from_u32(u32::from(lo) + 1) {
                Some(next) => lo = next,
                None => return,
            }
        }
        self.ranges.push((lo, hi));
    }

    fn is_empty(&self) -> bool {
        self.ranges.is_empty() && !(self.bracket || self.dash || self.bang || self.caret)
    }

    /// Class contents with `]` first and `-` last
    fn render(&self) -> String {
        let mut out = String::new();
        if self.bracket {
            out.push(']');
        }
        for &(lo, hi) in &self.ranges {
            out.push(lo);
            if lo != hi {
                out.push('-');
                out.push(hi);
            }
        }
        if self.bang {
            out.push('!');
        }
        if self.caret {
            out.push('^');
        }
        if self.dash {
            out.push('-');
        }
        out
    }
}

fn push_class(glob: &mut String, body: &[char]) -> Option<()> {
    let (negated, body) = match body.split_first() {
        Some((&'!', rest)) => (true, rest),
        _ => (false, body),
    };
    let members = ClassMembers::parse(body);

    if negated {
        if members.is_empty() {
            glob.push('?');
        } else {
            glob.push_str("[!");
            glob.push_str(&members.render());
            glob.push(']');
        }
        return Some(());
    }

    if members.is_empty() {
        return None;
    }

    if members.bracket || !members.ranges.is_empty() {
        glob.push('[');
        glob.push_str(&members.render());
        glob.push(']');
        return Some(());
    }

    // Only `!`, `^` or `-` remain, none of which may open a class
    let literals: Vec<&str> = [
        (members.bang, "!"),
        (members.caret, "^"),
        (members.dash, "-"),
    ]
    .into_iter()
    .filter_map(|(present, s)| present.then_some(s))
    .collect();
    if let [single] = literals.as_slice() {
        glob.push_str(single);
    } else {
        glob.push('{');
        glob.push_str(&literals.join(","));
        glob.push('}');
    }
    Some(())
}
