//! The outbound request a builder produces from its accumulated state.

use crate::params::Params;
use http::Method;
use serde_json::Value;

/// Everything a transport needs to issue one request.
///
/// Read operations carry their state in `query`; write operations carry it
/// in `body`. Builders produce descriptors without doing any I/O, so the
/// serialized form of a chain can be inspected directly.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// The HTTP method (GET, POST or DELETE).
    pub method: Method,

    /// The resource path relative to the API base URL, without a leading slash.
    pub path: String,

    /// Query parameters, keyed by wire field name.
    pub query: Params,

    /// JSON body for write operations.
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// Creates a descriptor with no query parameters and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Params::new(),
            body: None,
        }
    }

    /// A GET request carrying `query`.
    pub fn get(path: impl Into<String>, query: Params) -> Self {
        Self::new(Method::GET, path).with_query(query)
    }

    /// A POST request carrying `body`.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    /// A DELETE request carrying `body`.
    pub fn delete(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::DELETE, path).with_body(body)
    }

    /// Replaces the query parameters.
    pub fn with_query(mut self, query: Params) -> Self {
        self.query = query;
        self
    }

    /// Sets the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Flattens the query parameters into string pairs for a query string.
    ///
    /// Scalars use their plain string form, arrays become repeated `key[]`
    /// pairs and objects become `key[field]` pairs. Nulls are skipped.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        query_pairs(&self.query)
    }
}

pub(crate) fn query_pairs(query: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in query {
        flatten_into(&mut pairs, key.clone(), value);
    }
    pairs
}

fn flatten_into(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => pairs.push((key, flag.to_string())),
        Value::Number(number) => pairs.push((key, number.to_string())),
        Value::String(text) => pairs.push((key, text.clone())),
        Value::Array(items) => {
            for item in items {
                flatten_into(pairs, format!("{}[]", key), item);
            }
        }
        Value::Object(fields) => {
            for (field, item) in fields {
                flatten_into(pairs, format!("{}[{}]", key, field), item);
            }
        }
    }
}
