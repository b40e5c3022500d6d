//! Free-form, typed per-person attributes.
//!
//! Attributes carry data the core model has no field for.  Two keys are
//! understood by the rest of the workspace; everything else is passed through
//! untouched.

use std::collections::BTreeMap;
use std::fmt;

/// Name of the subpopulation a person belongs to.  Selects the scoring
/// parameter set; absent means the default set.
pub const SUBPOPULATION: &str = "subpopulation";

/// Person-specific conversion factor from utils to money.
pub const MARGINAL_UTILITY_OF_MONEY: &str = "marginalUtilityOfMoney";

/// One attribute value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue {
    Str(String),
    Double(f64),
    Int(i64),
    Bool(bool),
}

impl AttributeValue {
    /// Numeric view: doubles as-is, integers widened.  `None` for strings
    /// and booleans.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Double(v) => Some(*v),
            AttributeValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Str(s) => f.write_str(s),
            AttributeValue::Double(v) => write!(f, "{v}"),
            AttributeValue::Int(v) => write!(f, "{v}"),
            AttributeValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Double(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Str(v.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::Str(v)
    }
}

/// Ordered attribute map.  Ordering keeps output and debug dumps stable.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes(BTreeMap<String, AttributeValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`, returning the previous value.
    pub fn insert(
        &mut self,
        key:   impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ── Well-known keys ───────────────────────────────────────────────────

    /// The person's subpopulation, if set to a string value.
    pub fn subpopulation(&self) -> Option<&str> {
        self.get(SUBPOPULATION).and_then(AttributeValue::as_str)
    }
}
