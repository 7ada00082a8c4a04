use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use super::ParamValue;
use crate::error::{Result, RouterError};

/// Conversion applied to a segment after its pattern matched.
///
/// Returning `None` means the candidate does not match; the resolver moves on
/// to the next dynamic alternative exactly as it would for a pattern miss.
pub type CastFn = Arc<dyn Fn(&str) -> Option<ParamValue> + Send + Sync>;

/// Name of the catch-all rule used when a parameter declares no type
pub const DEFAULT_TYPE: &str = "string";

/// Specificity ranks of the built-in rules. Higher ranks are tried first.
pub mod rank {
    pub const UUID: u16 = 600;
    pub const YMD: u16 = 500;
    pub const INT: u16 = 400;
    pub const NUMBER: u16 = 300;
    pub const ALPHA: u16 = 200;
    pub const SLUG: u16 = 100;
    /// Inline `<name:regex>` declarations
    pub const INLINE: u16 = 50;
    pub const STRING: u16 = 10;
    pub const PATH: u16 = 0;
}

/// A named cast rule: recognition pattern, converter and specificity rank
#[derive(Clone)]
pub struct TypeRule {
    name: Arc<str>,
    pattern: Regex,
    cast: CastFn,
    rank: u16,
    spans_delimiters: bool,
}

impl TypeRule {
    /// Build a rule from a regex source.
    ///
    /// The pattern is anchored automatically when it is not already.
    pub fn new(name: &str, pattern: &str, rank: u16, cast: CastFn) -> Result<Self> {
        let anchored = anchor(pattern);
        let pattern = Regex::new(&anchored)
            .map_err(|e| RouterError::param(name, format!("invalid pattern: {}", e)))?;
        Ok(Self {
            name: Arc::from(name),
            pattern,
            cast,
            rank,
            spans_delimiters: false,
        })
    }

    /// Ad-hoc rule for an inline `<name:regex>` declaration.
    ///
    /// The regex source doubles as the rule name, so two declarations with
    /// the same source share a compiled position.
    pub fn inline(pattern: &str) -> Result<Self> {
        Self::new(pattern, pattern, rank::INLINE, Arc::new(cast_str))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    #[must_use]
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    #[must_use]
    pub fn rank(&self) -> u16 {
        self.rank
    }

    /// `true` when the rule consumes one or more delimiter-separated tokens
    /// (`path`) rather than exactly one
    #[must_use]
    pub fn spans_delimiters(&self) -> bool {
        self.spans_delimiters
    }

    /// `true` when `text` satisfies the recognition pattern
    #[must_use]
    pub fn recognizes(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Recognize and convert `text`; `None` if either step fails
    #[must_use]
    pub fn cast(&self, text: &str) -> Option<ParamValue> {
        if !self.recognizes(text) {
            return None;
        }
        (self.cast)(text)
    }
}

impl fmt::Debug for TypeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("rank", &self.rank)
            .field("spans_delimiters", &self.spans_delimiters)
            .finish()
    }
}

fn anchor(pattern: &str) -> String {
    if pattern.starts_with('^') && pattern.ends_with('$') {
        return pattern.to_string();
    }
    format!("^(?:{})$", pattern)
}

fn cast_str(text: &str) -> Option<ParamValue> {
    Some(ParamValue::Str(text.to_string()))
}

fn cast_int(text: &str) -> Option<ParamValue> {
    if let Ok(value) = text.parse::<i64>() {
        return Some(ParamValue::Int(value));
    }
    // Outside the i64 range: keep the digits without leading zeros
    let (sign, digits) = match text.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", text),
    };
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(ParamValue::BigInt(format!("{}{}", sign, digits)))
}

fn cast_number(text: &str) -> Option<ParamValue> {
    text.parse::<f64>().ok().map(ParamValue::Number)
}

fn cast_ymd(text: &str) -> Option<ParamValue> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(ParamValue::Date)
}

fn cast_uuid(text: &str) -> Option<ParamValue> {
    Uuid::parse_str(text).ok().map(ParamValue::Uuid)
}

/// Built-in rules as (name, pattern, rank, cast, aliases, spans delimiters)
#[allow(clippy::type_complexity)]
const BUILTINS: &[(&str, &str, u16, fn(&str) -> Option<ParamValue>, &[&str], bool)] = &[
    (
        "uuid",
        r"^[A-Fa-f0-9]{8}-[A-Fa-f0-9]{4}-[A-Fa-f0-9]{4}-[A-Fa-f0-9]{4}-[A-Fa-f0-9]{12}$",
        rank::UUID,
        cast_uuid,
        &[],
        false,
    ),
    (
        "ymd",
        r"^[12]\d{3}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$",
        rank::YMD,
        cast_ymd,
        &[],
        false,
    ),
    ("int", r"^-?\d+$", rank::INT, cast_int, &[], false),
    (
        "number",
        r"^-?(?:\d+(?:\.\d*)?|\.\d+)$",
        rank::NUMBER,
        cast_number,
        &["float"],
        false,
    ),
    ("alpha", r"^[A-Za-z]+$", rank::ALPHA, cast_str, &[], false),
    (
        "slug",
        r"^[a-z0-9]+(?:-[a-z0-9]+)*$",
        rank::SLUG,
        cast_str,
        &[],
        false,
    ),
    (DEFAULT_TYPE, r"(?s)^.+$", rank::STRING, cast_str, &["str"], false),
    ("path", r"(?s)^.+$", rank::PATH, cast_str, &[], true),
];

static BUILTIN: Lazy<Arc<TypeRegistry>> = Lazy::new(|| Arc::new(TypeRegistry::with_builtins()));

/// Lookup table from type name to [`TypeRule`].
///
/// The registry is read-only once a router has been built from it; extend a
/// copy with [`TypeRegistry::register`] before constructing the router.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    rules: HashMap<Arc<str>, Arc<TypeRule>>,
}

impl TypeRegistry {
    /// Shared registry holding only the built-in rules
    #[must_use]
    pub fn builtin() -> Arc<TypeRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// An owned registry seeded with the built-in rules, ready to extend
    // Built-in patterns are constants; a failure here is a bug in BUILTINS
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut rules = HashMap::new();
        for (name, pattern, rank, cast, aliases, spans) in BUILTINS {
            let rule = Arc::new(TypeRule {
                name: Arc::from(*name),
                pattern: Regex::new(pattern).expect("built-in type pattern should be valid"),
                cast: Arc::new(*cast),
                rank: *rank,
                spans_delimiters: *spans,
            });
            for alias in aliases.iter() {
                rules.insert(Arc::from(*alias), Arc::clone(&rule));
            }
            rules.insert(Arc::from(*name), rule);
        }
        Self { rules }
    }

    /// Register a custom rule, replacing any rule of the same name.
    ///
    /// Fails with `ParamNameError` when the name cannot appear inside a
    /// `<name:type>` declaration or the pattern does not compile.
    pub fn register<F>(&mut self, name: &str, pattern: &str, rank: u16, cast: F) -> Result<()>
    where
        F: Fn(&str) -> Option<ParamValue> + Send + Sync + 'static,
    {
        if name.is_empty() || name.contains(['<', '>', ':']) {
            return Err(RouterError::param(name, "type names must be non-empty and free of '<', '>' and ':'"));
        }
        let rule = TypeRule::new(name, pattern, rank, Arc::new(cast))?;
        self.rules.insert(Arc::from(name), Arc::new(rule));
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<TypeRule>> {
        self.rules.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    #[must_use]
    pub fn pattern_for(&self, name: &str) -> Option<&Regex> {
        self.get(name).map(|rule| rule.pattern())
    }

    /// Cast `text` with the named rule; `None` on unknown rule or mismatch
    #[must_use]
    pub fn cast(&self, name: &str, text: &str) -> Option<ParamValue> {
        self.get(name).and_then(|rule| rule.cast(text))
    }

    /// Registered names (aliases included), most specific first
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<(&str, u16)> = self
            .rules
            .iter()
            .map(|(name, rule)| (name.as_ref(), rule.rank()))
            .collect();
        names.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        names.into_iter().map(|(name, _)| name).collect()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
