// src/model/wire.rs
//! Conversion between wire records and the typed model.
//!
//! Wire records are kept as `serde_json::Value` until a decoder picks the
//! fields it needs. Missing required keys surface as
//! [`AppError::MalformedResponse`] naming the key, so a broken record points
//! at the field that broke it.

use crate::error::{AppError, Result};
use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Builds a typed value from a wire record.
pub trait FromWire: Sized {
    fn from_wire(record: &Value) -> Result<Self>;
}

/// Produces the wire record the API accepts for a typed value.
pub trait ToWire {
    fn to_wire(&self) -> Result<Value>;
}

/// The record as a JSON object.
pub fn object<'a>(record: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    record
        .as_object()
        .ok_or_else(|| AppError::malformed(what, "expected a JSON object"))
}

/// A required key. `null` counts as present.
pub fn field<'a>(record: &'a Value, key: &str) -> Result<&'a Value> {
    record
        .get(key)
        .ok_or_else(|| AppError::malformed(key, "missing required key"))
}

/// A key that may be absent or `null`.
pub fn optional<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|value| !value.is_null())
}

pub fn str_field(record: &Value, key: &str) -> Result<String> {
    field(record, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AppError::malformed(key, "expected a string"))
}

pub fn opt_str(record: &Value, key: &str) -> Option<String> {
    optional(record, key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Boolean flag, `false` when absent.
pub fn flag(record: &Value, key: &str) -> bool {
    optional(record, key)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

pub fn array_field<'a>(record: &'a Value, key: &str) -> Result<&'a Vec<Value>> {
    field(record, key)?
        .as_array()
        .ok_or_else(|| AppError::malformed(key, "expected an array"))
}

/// Decodes every element of a required array, preserving order.
pub fn list_of<T: FromWire>(record: &Value, key: &str) -> Result<Vec<T>> {
    array_field(record, key)?.iter().map(T::from_wire).collect()
}

/// Decodes every element of an array that may be absent.
pub fn opt_list_of<T: FromWire>(record: &Value, key: &str) -> Result<Vec<T>> {
    match optional(record, key) {
        Some(_) => list_of(record, key),
        None => Ok(Vec::new()),
    }
}

/// Decodes a flat record through its serde derive.
pub fn deserialize<T: DeserializeOwned>(record: &Value, what: &str) -> Result<T> {
    T::deserialize(record).map_err(|e| AppError::malformed(what, e))
}

/// Serde field adapter: an explicit `null` reads as the default value.
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn opt_decode<T: FromWire>(record: &Value, key: &str) -> Result<Option<T>> {
    optional(record, key).map(T::from_wire).transpose()
}

pub fn parse_timestamp(raw: &str, key: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .map_err(|e| AppError::malformed(key, format!("invalid timestamp '{}': {}", raw, e)))
}

pub fn timestamp(record: &Value, key: &str) -> Result<DateTime<FixedOffset>> {
    parse_timestamp(&str_field(record, key)?, key)
}

pub fn opt_timestamp(record: &Value, key: &str) -> Result<Option<DateTime<FixedOffset>>> {
    opt_str(record, key)
        .map(|raw| parse_timestamp(&raw, key))
        .transpose()
}

/// The `type` discriminant of a tagged record, empty when absent.
pub fn tag_of(record: &Value) -> &str {
    record.get("type").and_then(Value::as_str).unwrap_or("")
}

pub fn list_to_wire<T: ToWire>(items: &[T]) -> Result<Value> {
    items
        .iter()
        .map(ToWire::to_wire)
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

pub fn opt_to_wire<T: ToWire>(item: Option<&T>) -> Result<Value> {
    item.map(ToWire::to_wire)
        .transpose()
        .map(|value| value.unwrap_or(Value::Null))
}

/// Inserts an optional field, or leaves it out when the library or API
/// cannot write it, which leaves the remote value untouched.
pub fn insert_writable<T: ToWire>(
    record: &mut Map<String, Value>,
    key: &str,
    item: Option<&T>,
) -> Result<()> {
    match opt_to_wire(item) {
        Ok(value) => {
            record.insert(key.to_string(), value);
            Ok(())
        }
        Err(AppError::Unsupported(reason)) => {
            log::debug!("Leaving '{}' out of the update: {}", key, reason);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
