//! Directive tag grammar.
//!
//! A tag is a `;`-separated list whose first segment is the external key and
//! whose remaining segments are directives:
//!
//! ```text
//! tag        := key ( ';' directive )*
//! directive  := 'Required' | funcCall
//! funcCall   := name '(' args? ')'
//! args       := arg (',' arg)*
//! ```
//!
//! ```rust,ignore
//! let tag = split_tag("grade; Required; Choices(A, B, C)");
//! assert_eq!(tag.key, "grade");
//! assert_eq!(tag.directives, ["Required", "Choices(A, B, C)"]);
//! ```

use std::sync::LazyLock;

use regex::Regex;

static CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\s*\(([^()]*)\)$").expect("call pattern is a valid regex")
});

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("name pattern is a valid regex"));

/// Name of the reserved presence directive.
pub const REQUIRED: &str = "Required";

/// Name of the reserved default-value directive.
pub const DEFAULT: &str = "Default";

/// A tag split into its key segment and raw directive segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag<'a> {
    /// Trimmed key segment; may be empty.
    pub key: &'a str,
    /// Trimmed directive segments in source order. Empty segments are dropped.
    pub directives: Vec<&'a str>,
}

/// Split a tag on `;` and trim every segment.
#[must_use]
pub fn split_tag(tag: &str) -> RawTag<'_> {
    let mut segments = tag.split(';').map(str::trim);
    let key = segments.next().unwrap_or_default();
    let directives = segments.filter(|s| !s.is_empty()).collect();
    RawTag { key, directives }
}

/// A parsed `Name(arg, ...)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorCall {
    /// Capability name, matched case-sensitively.
    pub name: String,
    /// Raw, trimmed arguments. `Name()` yields no arguments.
    pub args: Vec<String>,
}

impl ValidatorCall {
    /// Build a call from a name and raw arguments.
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parse a single function-call fragment.
///
/// Returns `None` when the fragment does not match the call grammar; the
/// caller decides how to report it.
#[must_use]
pub fn parse_call(fragment: &str) -> Option<ValidatorCall> {
    let captures = CALL_REGEX.captures(fragment.trim())?;
    let name = captures.get(1)?.as_str();
    let raw_args = captures.get(2).map_or("", |m| m.as_str());

    let args = if raw_args.trim().is_empty() {
        Vec::new()
    } else {
        raw_args.split(',').map(|a| a.trim().to_owned()).collect()
    };

    Some(ValidatorCall {
        name: name.to_owned(),
        args,
    })
}

/// Whether `name` is a syntactically valid capability name.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    NAME_REGEX.is_match(name)
}

/// One directive of a field, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// A well-formed validator call.
    Call(ValidatorCall),
    /// A fragment that does not parse as a call. Reported when evaluated.
    Malformed(String),
}

impl Directive {
    /// Parse a directive fragment.
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        match parse_call(fragment) {
            Some(call) => Self::Call(call),
            None => Self::Malformed(fragment.to_owned()),
        }
    }

    /// The source text of a malformed directive, or the call name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Call(call) => &call.name,
            Self::Malformed(raw) => raw,
        }
    }
}

/// Upper-case the first letter of every word.
///
/// A word starts at the beginning of the string or after any character
/// that is neither alphanumeric nor `_`. Other letters keep their case.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_boundary = true;
    for ch in s.chars() {
        if at_boundary {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_boundary = !(ch.is_alphanumeric() || ch == '_');
    }
    out
}

/// Whether the segment is the `Required` marker.
#[must_use]
pub fn is_required(segment: &str) -> bool {
    title_case(segment) == REQUIRED
}

/// Whether the segment is a `Default(...)` directive.
#[must_use]
pub fn is_default(segment: &str) -> bool {
    title_case(segment).starts_with("Default(")
}
