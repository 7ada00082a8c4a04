use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// A path parameter after it has been cast by its [`TypeRule`](super::TypeRule)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// `string`, `str`, `alpha`, `slug` and most custom rules
    Str(String),
    /// `int`
    Int(i64),
    /// `int` beyond the `i64` range, as canonical decimal digits
    BigInt(String),
    /// `number` / `float`
    Number(f64),
    /// `ymd`
    Date(NaiveDate),
    /// `uuid`
    Uuid(Uuid),
}

impl ParamValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to `f64` so `number` consumers can take either
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::BigInt(digits) => digits.parse().ok(),
            _ => None,
        }
    }

    /// Decimal text of an integer value of any size
    #[must_use]
    pub fn as_int_text(&self) -> Option<String> {
        match self {
            ParamValue::Int(i) => Some(i.to_string()),
            ParamValue::BigInt(digits) => Some(digits.clone()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            ParamValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            ParamValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Short name of the variant, used in logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Str(_) => "str",
            ParamValue::Int(_) | ParamValue::BigInt(_) => "int",
            ParamValue::Number(_) => "number",
            ParamValue::Date(_) => "date",
            ParamValue::Uuid(_) => "uuid",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::BigInt(digits) => f.write_str(digits),
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            ParamValue::Uuid(u) => write!(f, "{}", u),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(d: NaiveDate) -> Self {
        ParamValue::Date(d)
    }
}

impl From<Uuid> for ParamValue {
    fn from(u: Uuid) -> Self {
        ParamValue::Uuid(u)
    }
}
