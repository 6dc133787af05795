//! The dynamic wire representation exchanged with the service.
//!
//! [`WireValue`] is a closed union of the value kinds the service emits.
//! Serialization is implemented by hand so any JSON document maps onto it
//! without intermediate `serde_json::Value` allocations.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A wire record: field names mapped to values, ordered by name.
pub type WireRecord = BTreeMap<String, WireValue>;

/// A single value in a wire record.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integral number.
    Integer(i64),
    /// Non-integral number, or an integer beyond `i64`.
    Float(f64),
    /// String.
    String(String),
    /// Ordered list of values.
    List(Vec<WireValue>),
    /// Nested record.
    Record(WireRecord),
}

impl WireValue {
    /// Short name of the value kind, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Record(_) => "record",
        }
    }

    /// Returns `true` for [`WireValue::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string if this is a `String` variant.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the record if this is a `Record` variant.
    #[must_use]
    pub fn as_record(&self) -> Option<&WireRecord> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the list if this is a `List` variant.
    #[must_use]
    pub fn as_list(&self) -> Option<&[WireValue]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Render a scalar as a request parameter value. Returns `None` for
    /// null, lists, and records.
    #[must_use]
    pub fn to_param(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Null | Self::List(_) | Self::Record(_) => None,
        }
    }
}

/// Parse a response body into a [`WireValue`].
pub fn from_slice(body: &[u8]) -> Result<WireValue, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Flatten a record into request parameters.
///
/// Nested records use bracket notation (`events[video_created]`), lists use
/// their index (`files[0]`), and nulls are dropped.
///
/// # Examples
///
/// ```
/// use vidstack_model::wire::{WireRecord, WireValue, flatten};
///
/// let mut events = WireRecord::new();
/// events.insert("video_created".to_owned(), WireValue::Bool(true));
/// let mut record = WireRecord::new();
/// record.insert("events".to_owned(), WireValue::Record(events));
/// record.insert("url".to_owned(), WireValue::from("http://hook"));
///
/// let params = flatten(&record);
/// assert_eq!(params["events[video_created]"], "true");
/// assert_eq!(params["url"], "http://hook");
/// ```
#[must_use]
pub fn flatten(record: &WireRecord) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (key, value) in record {
        flatten_into(key.clone(), value, &mut out);
    }
    out
}

fn flatten_into(prefix: String, value: &WireValue, out: &mut BTreeMap<String, String>) {
    match value {
        WireValue::Record(record) => {
            for (key, nested) in record {
                flatten_into(format!("{prefix}[{key}]"), nested, out);
            }
        }
        WireValue::List(items) => {
            for (index, nested) in items.iter().enumerate() {
                flatten_into(format!("{prefix}[{index}]"), nested, out);
            }
        }
        scalar => {
            if let Some(param) = scalar.to_param() {
                out.insert(prefix, param);
            }
        }
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(l) => write!(f, "[{} items]", l.len()),
            Self::Record(r) => write!(f, "{{{} fields}}", r.len()),
        }
    }
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u8> for WireValue {
    fn from(value: u8) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for WireValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u64> for WireValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::String(value.to_string()), Self::Integer)
    }
}

impl From<f64> for WireValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<Vec<String>> for WireValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value.into_iter().map(Self::String).collect())
    }
}

impl From<WireRecord> for WireValue {
    fn from(value: WireRecord) -> Self {
        Self::Record(value)
    }
}

impl Serialize for WireValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(l) => serializer.collect_seq(l),
            Self::Record(r) => serializer.collect_map(r),
        }
    }
}

impl<'de> Deserialize<'de> for WireValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WireValueVisitor)
    }
}

struct WireValueVisitor;

impl<'de> Visitor<'de> for WireValueVisitor {
    type Value = WireValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(WireValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(WireValue::Integer(v))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(v).map_or(WireValue::Float(v as f64), WireValue::Integer))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(WireValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(WireValue::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(WireValue::String(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(WireValue::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(WireValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        WireValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(WireValue::List(items))
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let mut record = WireRecord::new();
        while let Some((key, value)) = map.next_entry::<String, WireValue>()? {
            record.insert(key, value);
        }
        Ok(WireValue::Record(record))
    }
}
