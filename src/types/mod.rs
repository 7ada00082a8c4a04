//! # Types Module
//!
//! Named cast rules for dynamic path segments.
//!
//! A dynamic segment declares its rule by name (`<id:int>`); when the
//! resolver meets a candidate segment it asks the rule to recognize and
//! convert the text. Rules carry a specificity rank: at a tree depth with
//! several dynamic alternatives, higher ranks are tried first, so `/<x:int>`
//! wins over `/<x>` for `111` while `something` still reaches the string
//! variant.
//!
//! Built-in rules, most specific first:
//!
//! | name | matches | value |
//! |---|---|---|
//! | `uuid` | `726a7d33-4bd5-46a3-a02d-37da7b4b029b` | [`ParamValue::Uuid`] |
//! | `ymd` | `2021-03-21` | [`ParamValue::Date`] |
//! | `int` | `-42` | [`ParamValue::Int`] |
//! | `number` (`float`) | `99.99` | [`ParamValue::Number`] |
//! | `alpha` | `ABCxyz` | [`ParamValue::Str`] |
//! | `slug` | `hello-world` | [`ParamValue::Str`] |
//! | `string` (`str`) | anything non-empty | [`ParamValue::Str`] |
//! | `path` | one or more tokens, delimiters included | [`ParamValue::Str`] |
//!
//! `int` values outside the `i64` range come back as [`ParamValue::BigInt`].
//!
//! A declaration whose type is not a registered name and is not a plain
//! identifier is compiled as an inline regex (`<code:[a-z]{3}>`). Inline rules
//! rank between `slug` and `string`.

mod registry;
mod value;

pub use registry::{rank, CastFn, TypeRegistry, TypeRule, DEFAULT_TYPE};
pub use value::ParamValue;
