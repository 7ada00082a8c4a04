//! Pattern parsing: splitting registered paths into segments and reading
//! `<name>`, `<name:type>` and `<name:regex>` parameter declarations.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, RouterError};
use crate::types::{TypeRegistry, TypeRule, DEFAULT_TYPE};

// Also decides whether a declared type is a rule name or an inline regex
#[allow(clippy::expect_used)]
static PARAM_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+$").expect("parameter name regex should be valid")
});

/// One delimiter-separated atom of a registered pattern
#[derive(Debug, Clone)]
pub enum Segment {
    /// Literal text, matched by equality
    Static(Arc<str>),
    /// Named, typed parameter
    Dynamic(DynamicSegment),
}

/// A `<name:type>` or `<name:regex>` declaration with its resolved [`TypeRule`]
#[derive(Debug, Clone)]
pub struct DynamicSegment {
    name: Arc<str>,
    rule: Arc<TypeRule>,
    raw: Arc<str>,
}

impl DynamicSegment {
    /// Parameter name, verbatim from the pattern
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    #[must_use]
    pub fn rule(&self) -> &Arc<TypeRule> {
        &self.rule
    }

    /// Declaration as written, e.g. `<id:int>`
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl Segment {
    /// Parse one pattern token
    pub fn parse(token: &str, types: &TypeRegistry) -> Result<Self> {
        if !token.contains(['<', '>']) {
            return Ok(Segment::Static(Arc::from(token)));
        }

        let inner = token
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .ok_or_else(|| RouterError::param(token, "parameters must be written as <name> or <name:type>"))?;

        let (name, type_name) = match inner.split_once(':') {
            Some((name, type_name)) => (name, type_name),
            None => (inner, DEFAULT_TYPE),
        };

        if !PARAM_NAME_REGEX.is_match(name) {
            return Err(RouterError::param(
                token,
                "parameter names may only contain letters, digits and '_'",
            ));
        }

        let rule = match types.get(type_name) {
            Some(rule) => Arc::clone(rule),
            None if type_name.is_empty() || PARAM_NAME_REGEX.is_match(type_name) => {
                return Err(RouterError::param(token, format!("unknown type '{}'", type_name)));
            }
            None => Arc::new(TypeRule::inline(type_name).map_err(|e| match e {
                RouterError::ParamNameError { reason, .. } => RouterError::param(token, reason),
                other => other,
            })?),
        };

        Ok(Segment::Dynamic(DynamicSegment {
            name: Arc::from(name),
            rule,
            raw: Arc::from(token),
        }))
    }

    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Segment::Dynamic(_))
    }

    /// Text of the segment as written in the pattern
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Static(text) => text,
            Segment::Dynamic(d) => d.raw(),
        }
    }

    /// Identity of the segment for signatures: literal text or rule name
    pub(crate) fn key(&self) -> PartKey {
        match self {
            Segment::Static(text) => PartKey::Static(Arc::clone(text)),
            Segment::Dynamic(d) => PartKey::Dynamic(d.rule.name_arc()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Segment identity used by route signatures.
///
/// Parameter names are not part of the key: `<a:int>` and `<b:int>` occupy
/// the same compiled position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartKey {
    Static(Arc<str>),
    Dynamic(Arc<str>),
}

/// Split a registered pattern into raw tokens.
///
/// Strips one leading delimiter, and one trailing delimiter unless `strict`.
/// Delimiters inside `<...>` do not split, so `<day:ymd>` survives a `:`
/// delimiter.
pub(crate) fn split_pattern(path: &str, delimiter: char, strict: bool) -> Vec<&str> {
    let mut trimmed = path.strip_prefix(delimiter).unwrap_or(path);
    if !strict {
        trimmed = trimmed.strip_suffix(delimiter).unwrap_or(trimmed);
    }

    let mut tokens = Vec::with_capacity(trimmed.matches(delimiter).count() + 1);
    let mut depth = 0usize;
    let mut start = 0usize;
    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if c == delimiter && depth == 0 => {
                tokens.push(&trimmed[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    tokens.push(&trimmed[start..]);
    tokens
}

/// Split a concrete path into tokens for resolution
pub(crate) fn split_path(path: &str, delimiter: char) -> Vec<&str> {
    path.strip_prefix(delimiter)
        .unwrap_or(path)
        .split(delimiter)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pattern_strips_delimiters() {
        assert_eq!(split_pattern("/foo/bar", '/', false), vec!["foo", "bar"]);
        assert_eq!(split_pattern("/foo/bar/", '/', false), vec!["foo", "bar"]);
        assert_eq!(split_pattern("/foo/bar/", '/', true), vec!["foo", "bar", ""]);
        assert_eq!(split_pattern("/", '/', false), vec![""]);
        assert_eq!(split_pattern("foo:bar", ':', false), vec!["foo", "bar"]);
    }

    #[test]
    fn test_split_pattern_keeps_typed_params_with_colon_delimiter() {
        assert_eq!(
            split_pattern("day:<when:ymd>:x", ':', false),
            vec!["day", "<when:ymd>", "x"]
        );
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/foo/123/", '/'), vec!["foo", "123", ""]);
        assert_eq!(split_path("/", '/'), vec![""]);
    }

    #[test]
    fn test_parse_param_defaults_to_string() {
        let types = TypeRegistry::builtin();
        let seg = Segment::parse("<fooBar>", &types).unwrap();
        match seg {
            Segment::Dynamic(d) => {
                assert_eq!(d.name(), "fooBar");
                assert_eq!(d.rule().name(), "string");
                assert_eq!(d.raw(), "<fooBar>");
            }
            Segment::Static(_) => panic!("expected dynamic segment"),
        }
    }

    #[test]
    fn test_parse_param_with_alias_type() {
        let types = TypeRegistry::builtin();
        let seg = Segment::parse("<foo_bar:str>", &types).unwrap();
        assert_eq!(seg.key(), PartKey::Dynamic(Arc::from("string")));
        assert_eq!(seg.as_str(), "<foo_bar:str>");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let types = TypeRegistry::builtin();
        for bad in ["<foo", "foo>", "<>", "<foo-bar>", "x<foo>", "<foo:nope>", "<foo:>", "<foo:[a-z>"] {
            assert!(
                matches!(Segment::parse(bad, &types), Err(RouterError::ParamNameError { .. })),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_inline_regex() {
        let types = TypeRegistry::builtin();
        let seg = Segment::parse("<code:[a-z]{3}>", &types).unwrap();
        assert_eq!(seg.key(), PartKey::Dynamic(Arc::from("[a-z]{3}")));
        match seg {
            Segment::Dynamic(d) => {
                assert_eq!(d.name(), "code");
                assert!(d.rule().recognizes("abc"));
                assert!(!d.rule().recognizes("ab1"));
            }
            Segment::Static(_) => panic!("expected dynamic segment"),
        }
        // A colon inside the regex belongs to the regex
        let seg = Segment::parse(r"<t:\d{2}:\d{2}>", &types).unwrap();
        assert_eq!(seg.key(), PartKey::Dynamic(Arc::from(r"\d{2}:\d{2}")));
    }

}
