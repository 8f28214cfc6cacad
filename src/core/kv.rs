//! Attribute sets attached to log entries
//!
//! A [`Kv`] is an unordered name to value mapping. Sets are cheap to build per
//! call, merge right-biased, and are never mutated through the copy-on-write
//! helpers. Ordering is only imposed when an entry is built from them.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Value type for attribute fields
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => f.write_str("null"),
        }
    }
}

impl FieldValue {
    /// Capture the `Display` rendering of any value
    pub fn display(value: &impl fmt::Display) -> Self {
        FieldValue::String(value.to_string())
    }

    /// Capture the `Debug` rendering of any value
    pub fn debug(value: &impl fmt::Debug) -> Self {
        FieldValue::String(format!("{:?}", value))
    }

    /// Capture any serializable value as compact JSON
    ///
    /// Values that fail to serialize are recorded as the serializer's error
    /// message so the attribute is never silently lost.
    pub fn json(value: &impl Serialize) -> Self {
        match serde_json::to_string(value) {
            Ok(s) => FieldValue::String(s),
            Err(e) => FieldValue::String(format!("<unserializable: {}>", e)),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::Uint(u)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::Uint(u64::from(u))
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::Uint(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// A set of key/value attributes giving dynamic context to a log entry
///
/// `Clone` is the copy operation: it never touches the source and an empty
/// set is always a valid value.
///
/// # Example
///
/// ```
/// use llog::Kv;
///
/// let base = Kv::new().with("user_id", 42);
/// let request = base.set("path", "/login");
///
/// assert_eq!(base.len(), 1);
/// assert_eq!(request.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kv {
    fields: HashMap<String, FieldValue>,
}

impl Kv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, consuming the set (builder form)
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Return a copy of this set with `key` added or overwritten
    ///
    /// `self` is left unchanged.
    #[must_use]
    pub fn set<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.clone().with(key, value)
    }

    /// Union of all given sets
    ///
    /// For a key present in several sets the rightmost one wins. Merging
    /// nothing yields an empty set.
    ///
    /// ```
    /// use llog::{FieldValue, Kv};
    ///
    /// let a = Kv::new().with("k", "left").with("only_a", 1);
    /// let b = Kv::new().with("k", "right");
    /// let merged = Kv::merge([&a, &b]);
    ///
    /// assert_eq!(merged.get("k"), Some(&FieldValue::from("right")));
    /// assert_eq!(merged.len(), 2);
    /// assert!(Kv::merge([]).is_empty());
    /// ```
    pub fn merge<'a, I>(sets: I) -> Self
    where
        I: IntoIterator<Item = &'a Kv>,
    {
        let mut merged = Kv::new();
        for set in sets {
            merged.extend(set);
        }
        merged
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Pairs sorted by key, the order entries carry them in
    pub fn into_sorted(self) -> Vec<(String, FieldValue)> {
        let mut pairs: Vec<_> = self.fields.into_iter().collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    fn extend(&mut self, other: &Kv) {
        for (k, v) in &other.fields {
            self.fields.insert(k.clone(), v.clone());
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Kv
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
