//! JSON decoding that insists on object-shaped input.
//!
//! Derived `Deserialize` impls also accept a JSON array as a struct, filling
//! fields by position. Wire formats here are keyed objects only, so every
//! struct is decoded through a [`Map`] first.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::io::Read;

/// Decode `T` from an already parsed JSON object.
pub fn from_object<T: DeserializeOwned>(map: Map<String, Value>) -> serde_json::Result<T> {
    serde_json::from_value(Value::Object(map))
}

/// Decode `T` from bytes that must hold a JSON object.
pub fn object_from_slice<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    from_object(serde_json::from_slice(bytes)?)
}

/// Decode `T` from a reader that must yield a JSON object.
pub fn object_from_reader<T: DeserializeOwned, R: Read>(reader: R) -> serde_json::Result<T> {
    from_object(serde_json::from_reader(reader)?)
}
