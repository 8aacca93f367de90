//! Canonical query-string encoding for AirWave API URLs.
//!
//! The appliance treats query strings as significant for caching and
//! report embedding, so every URL this crate produces must be
//! reproducible byte-for-byte. [`QueryParams`] imposes a canonical order
//! (lexicographic by key) before serialization; two semantically equal
//! parameter sets always encode to the identical string.
//!
//! The one deliberate exception is [`id_params`]: the `ap_list` endpoint
//! expects repeated `id=N` pairs in caller order, so those bypass the
//! sorted encoder entirely.

use std::collections::BTreeMap;

use crate::error::{AirWaveError, Result};

/// A single query parameter value.
///
/// The AirWave API has no negative numeric parameters, so integers are
/// unsigned. Values convert via `From`, e.g. `params.insert("id", 42)`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// String parameter (MAC addresses, report titles, graph types)
    Str(String),
    /// Integer parameter (ids, radio indexes)
    Int(u64),
    /// Floating point parameter
    Float(f64),
}

impl ParamValue {
    /// Render the value as its wire string, before percent-encoding.
    fn render(&self) -> std::result::Result<String, &'static str> {
        match self {
            ParamValue::Str(s) => Ok(s.clone()),
            ParamValue::Int(n) => Ok(n.to_string()),
            ParamValue::Float(f) if f.is_finite() => Ok(f.to_string()),
            ParamValue::Float(_) => Err("non-finite float has no query representation"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

/// An order-insensitive parameter set with deterministic serialization.
///
/// Keys are unique; inserting a key twice replaces the earlier value.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: BTreeMap<String, ParamValue>,
}

impl QueryParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(key.into(), value.into());
    }

    /// Number of parameters in the set
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Serialize as `key=value&...`, sorted ascending by key, with keys
    /// and values percent-encoded.
    ///
    /// Fails only when a value has no string representation (a
    /// non-finite float), naming the offending key.
    pub fn encode(&self) -> Result<String> {
        let mut pairs = Vec::with_capacity(self.params.len());
        for (key, value) in &self.params {
            let rendered = value
                .render()
                .map_err(|reason| AirWaveError::encoding(key.clone(), reason))?;
            pairs.push(format!("{}={}", encode_component(key), encode_component(&rendered)));
        }
        Ok(pairs.join("&"))
    }
}

/// Render an Access Point id list as repeated `id=` pairs.
///
/// Emits `id=123&id=124` in the given order: the `ap_list` endpoint
/// expects duplicate keys, which the canonical encoder cannot express.
/// Decimal ids need no percent-encoding.
pub fn id_params(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| format!("id={}", id))
        .collect::<Vec<_>>()
        .join("&")
}

/// Format a seconds-before-now offset in the RRD graph endpoint's signed
/// relative-duration syntax: 3600 becomes `-3600s`, 0 becomes `-0s`.
pub(crate) fn rrd_offset(seconds: u64) -> String {
    format!("-{}s", seconds)
}

/// Percent-encode one key or value (space becomes `+`, `:` becomes `%3A`).
fn encode_component(input: &str) -> String {
    url::form_urlencoded::byte_serialize(input.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_is_order_independent() {
        let mut first = QueryParams::new();
        first.insert("b", 2u64);
        first.insert("a", 1u64);

        let mut second = QueryParams::new();
        second.insert("a", 1u64);
        second.insert("b", 2u64);

        assert_eq!(first.encode().unwrap(), "a=1&b=2");
        assert_eq!(first.encode().unwrap(), second.encode().unwrap());
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let mut params = QueryParams::new();
        params.insert("mac", "12:34:56:78:90:AB");
        assert_eq!(params.encode().unwrap(), "mac=12%3A34%3A56%3A78%3A90%3AAB");

        let mut params = QueryParams::new();
        params.insert("reports_search_title", "Weekly Report");
        params.insert("format", "xml");
        assert_eq!(
            params.encode().unwrap(),
            "format=xml&reports_search_title=Weekly+Report"
        );
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut params = QueryParams::new();
        params.insert("id", 1u64);
        params.insert("id", 2u64);
        assert_eq!(params.len(), 1);
        assert_eq!(params.encode().unwrap(), "id=2");
    }

    #[test]
    fn test_empty_set_encodes_to_empty_string() {
        let params = QueryParams::new();
        assert!(params.is_empty());
        assert_eq!(params.encode().unwrap(), "");
    }

    #[test]
    fn test_finite_floats_encode() {
        let mut params = QueryParams::new();
        params.insert("threshold", 2.5);
        assert_eq!(params.encode().unwrap(), "threshold=2.5");
    }

    #[test]
    fn test_non_finite_float_is_an_encoding_error() {
        let mut params = QueryParams::new();
        params.insert("threshold", f64::NAN);

        match params.encode() {
            Err(AirWaveError::Encoding { key, .. }) => assert_eq!(key, "threshold"),
            other => panic!("expected Encoding error, got {:?}", other),
        }
    }

    #[test]
    fn test_id_params_preserves_caller_order() {
        assert_eq!(id_params(&[123, 124, 125]), "id=123&id=124&id=125");
        assert_eq!(id_params(&[125, 123]), "id=125&id=123");
        assert_eq!(id_params(&[7]), "id=7");
        assert_eq!(id_params(&[]), "");
    }

    #[test]
    fn test_rrd_offset_formatting() {
        assert_eq!(rrd_offset(3600), "-3600s");
        assert_eq!(rrd_offset(259200), "-259200s");
        assert_eq!(rrd_offset(0), "-0s");
    }
}
