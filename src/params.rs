//! Value shapes accepted by builder setters and emitted on the wire.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Wire field name to value mapping used for query parameters.
///
/// Only filters that were set end up in here, so an absent key and an unset
/// filter mean the same thing.
pub type Params = BTreeMap<String, Value>;

/// A resource reference that the API accepts either as a numeric id or as a
/// string identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Identifier {
    /// Numeric id.
    Number(u64),
    /// Opaque string identifier.
    Text(String),
}

impl From<u64> for Identifier {
    fn from(id: u64) -> Self {
        Identifier::Number(id)
    }
}

impl From<&str> for Identifier {
    fn from(id: &str) -> Self {
        Identifier::Text(id.to_string())
    }
}

impl From<String> for Identifier {
    fn from(id: String) -> Self {
        Identifier::Text(id)
    }
}

/// One service id or a list of them.
///
/// Serializes as a bare number or as an array, matching what was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Services {
    /// A single service.
    One(u64),
    /// Several services.
    Many(Vec<u64>),
}

impl From<u64> for Services {
    fn from(id: u64) -> Self {
        Services::One(id)
    }
}

impl From<Vec<u64>> for Services {
    fn from(ids: Vec<u64>) -> Self {
        Services::Many(ids)
    }
}

impl From<&[u64]> for Services {
    fn from(ids: &[u64]) -> Self {
        Services::Many(ids.to_vec())
    }
}

impl<const N: usize> From<[u64; N]> for Services {
    fn from(ids: [u64; N]) -> Self {
        Services::Many(ids.to_vec())
    }
}

/// A single value or a sequence of them, normalized to a sequence.
///
/// Setters that accept "one or many" take `impl Into<OneOrMany<T>>`, so both
/// `with(attendee)` and `with(vec![a, b])` read naturally.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOrMany<T>(Vec<T>);

impl<T> OneOrMany<T> {
    /// The normalized sequence.
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        OneOrMany(vec![value])
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        OneOrMany(values)
    }
}

impl<T, const N: usize> From<[T; N]> for OneOrMany<T> {
    fn from(values: [T; N]) -> Self {
        OneOrMany(values.into_iter().collect())
    }
}

/// Converts a serializable value into JSON.
///
/// Every type handed to this function is a plain data type made of strings,
/// numbers, booleans and sequences, which always serialize.
pub(crate) fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Inserts `value` under `key` only when it is present.
pub(crate) fn insert_present<T: Serialize>(params: &mut Params, key: &str, value: Option<&T>) {
    if let Some(value) = value {
        params.insert(key.to_string(), to_value(value));
    }
}
