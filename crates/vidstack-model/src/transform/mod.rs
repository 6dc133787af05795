//! Bidirectional conversion between wire records and entities.
//!
//! Each entity kind has one [`Transformer`]. `from_wire` validates required
//! fields, coerces string-encoded numbers and booleans, and keeps unknown
//! fields in the entity's `extra` bag. `to_wire` is the inverse and omits
//! unset fields.

mod cloud;
mod encoding;
mod notifications;
mod profile;
mod registry;
mod video;

use std::fmt;

pub use cloud::CloudTransformer;
pub use encoding::EncodingTransformer;
pub use notifications::NotificationsTransformer;
pub use profile::ProfileTransformer;
pub use registry::{Entity, TransformerRegistry};
pub use video::VideoTransformer;

use crate::error::MalformedResponse;
use crate::types::{EncodingStatus, EntityKind};
use crate::wire::{WireRecord, WireValue};

/// Fields the service computes and never accepts back.
const COMMON_READ_ONLY: &[&str] = &["id", "created_at", "updated_at"];

/// Converts one entity kind to and from its wire record.
pub trait Transformer: Send + Sync + fmt::Debug {
    /// The entity this transformer produces.
    type Entity;

    /// The kind handled by this transformer.
    fn kind(&self) -> EntityKind;

    /// Parse and validate a single record.
    fn from_wire(&self, record: &WireRecord) -> Result<Self::Entity, MalformedResponse>;

    /// Project an entity back onto its wire record.
    fn to_wire(&self, entity: &Self::Entity) -> WireRecord;

    /// Field holding the items of a wrapped list response.
    fn collection_key(&self) -> &'static str {
        self.kind().collection_key()
    }

    /// Fields stripped by [`Transformer::to_update_wire`].
    fn read_only_fields(&self) -> &'static [&'static str] {
        COMMON_READ_ONLY
    }

    /// The record to send when updating an entity: [`Transformer::to_wire`]
    /// without the read-only fields.
    fn to_update_wire(&self, entity: &Self::Entity) -> WireRecord {
        let mut record = self.to_wire(entity);
        for field in self.read_only_fields() {
            record.remove(*field);
        }
        record
    }

    /// Parse a value that must be a single record.
    fn from_wire_value(&self, value: &WireValue) -> Result<Self::Entity, MalformedResponse> {
        match value {
            WireValue::Record(record) => self.from_wire(record),
            other => Err(MalformedResponse::UnexpectedShape {
                kind: self.kind(),
                expected: "a record",
                found: other.type_name(),
            }),
        }
    }

    /// Parse a list response.
    ///
    /// Accepts a bare list, or a record carrying the items under
    /// [`Transformer::collection_key`] (or under its only list field) next to
    /// count fields such as `total`.
    fn list_from_wire(&self, value: &WireValue) -> Result<Vec<Self::Entity>, MalformedResponse> {
        let items = match value {
            WireValue::List(items) => items.as_slice(),
            WireValue::Record(record) => list_field(record, self.collection_key()).ok_or(
                MalformedResponse::UnexpectedShape {
                    kind: self.kind(),
                    expected: "a list or a record with a list field",
                    found: "record",
                },
            )?,
            other => {
                return Err(MalformedResponse::UnexpectedShape {
                    kind: self.kind(),
                    expected: "a list or a record with a list field",
                    found: other.type_name(),
                });
            }
        };

        items.iter().map(|item| self.from_wire_value(item)).collect()
    }
}

fn list_field<'a>(record: &'a WireRecord, key: &str) -> Option<&'a [WireValue]> {
    if let Some(WireValue::List(items)) = record.get(key) {
        return Some(items);
    }
    let mut lists = record.values().filter_map(WireValue::as_list);
    match (lists.next(), lists.next()) {
        (Some(items), None) => Some(items),
        _ => None,
    }
}

/// Consumes typed fields from a record; whatever is left becomes `extra`.
pub(crate) struct Fields {
    kind: EntityKind,
    rest: WireRecord,
}

impl Fields {
    pub(crate) fn new(kind: EntityKind, record: &WireRecord) -> Self {
        Self {
            kind,
            rest: record.clone(),
        }
    }

    fn take(&mut self, name: &str) -> Option<WireValue> {
        match self.rest.remove(name) {
            None | Some(WireValue::Null) => None,
            Some(value) => Some(value),
        }
    }

    fn missing(&self, name: &str) -> MalformedResponse {
        MalformedResponse::MissingField {
            kind: self.kind,
            field: name.to_owned(),
        }
    }

    fn invalid(&self, name: &str, expected: &'static str, found: &WireValue) -> MalformedResponse {
        MalformedResponse::InvalidField {
            kind: self.kind,
            field: name.to_owned(),
            expected,
            found: found.to_string(),
        }
    }

    pub(crate) fn string(&mut self, name: &str) -> Result<Option<String>, MalformedResponse> {
        match self.take(name) {
            None => Ok(None),
            Some(WireValue::String(s)) => Ok(Some(s)),
            Some(WireValue::Integer(i)) => Ok(Some(i.to_string())),
            Some(other) => Err(self.invalid(name, "a string", &other)),
        }
    }

    pub(crate) fn required_string(&mut self, name: &str) -> Result<String, MalformedResponse> {
        self.string(name)?.ok_or_else(|| self.missing(name))
    }

    pub(crate) fn required_status(
        &mut self,
        name: &str,
    ) -> Result<EncodingStatus, MalformedResponse> {
        self.required_string(name)
            .map(|s| EncodingStatus::from(s.as_str()))
    }

    pub(crate) fn unsigned<T: TryFrom<u64>>(
        &mut self,
        name: &str,
    ) -> Result<Option<T>, MalformedResponse> {
        let Some(value) = self.take(name) else {
            return Ok(None);
        };
        let parsed = match &value {
            WireValue::Integer(i) => u64::try_from(*i).ok(),
            WireValue::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        parsed
            .and_then(|v| T::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| self.invalid(name, "an unsigned integer", &value))
    }

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn float(&mut self, name: &str) -> Result<Option<f64>, MalformedResponse> {
        let Some(value) = self.take(name) else {
            return Ok(None);
        };
        let parsed = match &value {
            WireValue::Float(f) => Some(*f),
            WireValue::Integer(i) => Some(*i as f64),
            WireValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed
            .filter(|f| f.is_finite())
            .map(Some)
            .ok_or_else(|| self.invalid(name, "a finite number", &value))
    }

    pub(crate) fn boolean(&mut self, name: &str) -> Result<Option<bool>, MalformedResponse> {
        let Some(value) = self.take(name) else {
            return Ok(None);
        };
        let parsed = match &value {
            WireValue::Bool(b) => Some(*b),
            WireValue::Integer(0) => Some(false),
            WireValue::Integer(1) => Some(true),
            WireValue::String(s) => match s.as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        };
        parsed
            .map(Some)
            .ok_or_else(|| self.invalid(name, "a boolean", &value))
    }

    pub(crate) fn string_list(&mut self, name: &str) -> Result<Option<Vec<String>>, MalformedResponse> {
        let Some(value) = self.take(name) else {
            return Ok(None);
        };
        let WireValue::List(items) = &value else {
            return Err(self.invalid(name, "a list of strings", &value));
        };
        items
            .iter()
            .map(|item| match item {
                WireValue::String(s) => Ok(s.clone()),
                other => Err(self.invalid(name, "a list of strings", other)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    pub(crate) fn required_record(&mut self, name: &str) -> Result<WireRecord, MalformedResponse> {
        match self.take(name) {
            None => Err(self.missing(name)),
            Some(WireValue::Record(record)) => Ok(record),
            Some(other) => Err(self.invalid(name, "a record", &other)),
        }
    }

    pub(crate) fn finish(self) -> WireRecord {
        self.rest
    }
}

/// Builds a wire record on top of an entity's `extra` bag.
pub(crate) struct WireWriter {
    record: WireRecord,
}

impl WireWriter {
    pub(crate) fn new(extra: &WireRecord) -> Self {
        Self {
            record: extra.clone(),
        }
    }

    pub(crate) fn put(&mut self, name: &str, value: impl Into<WireValue>) -> &mut Self {
        self.record.insert(name.to_owned(), value.into());
        self
    }

    pub(crate) fn put_opt<T: Into<WireValue>>(&mut self, name: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.put(name, value);
        }
        self
    }

    pub(crate) fn finish(self) -> WireRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> WireRecord {
        match crate::wire::from_slice(json.as_bytes()).unwrap() {
            WireValue::Record(r) => r,
            other => panic!("expected record, got {other}"),
        }
    }

    #[test]
    fn test_should_coerce_string_encoded_scalars() {
        let mut fields = Fields::new(
            EntityKind::Video,
            &record(r#"{"w":"640","f":"29.97","b":"true","z":"0"}"#),
        );
        assert_eq!(fields.unsigned::<u32>("w").unwrap(), Some(640));
        assert_eq!(fields.float("f").unwrap(), Some(29.97));
        assert_eq!(fields.boolean("b").unwrap(), Some(true));
        assert_eq!(fields.boolean("z").unwrap(), Some(false));
        assert!(fields.finish().is_empty());
    }

    #[test]
    fn test_should_reject_non_finite_floats() {
        let mut fields = Fields::new(
            EntityKind::Profile,
            &record(r#"{"a":"NaN","b":"inf","c":"-Infinity","d":" 25 "}"#),
        );
        for name in ["a", "b", "c"] {
            match fields.float(name) {
                Err(MalformedResponse::InvalidField { field, expected, .. }) => {
                    assert_eq!(field, name);
                    assert_eq!(expected, "a finite number");
                }
                other => panic!("expected invalid field for {name}, got {other:?}"),
            }
        }
        assert_eq!(fields.float("d").unwrap(), Some(25.0));

        let mut extra = WireRecord::new();
        extra.insert("fps".to_owned(), WireValue::Float(f64::NAN));
        let mut fields = Fields::new(EntityKind::Profile, &extra);
        assert!(fields.float("fps").is_err());
    }

    #[test]
    fn test_should_treat_null_as_absent() {
        let mut fields = Fields::new(EntityKind::Video, &record(r#"{"id":null}"#));
        let err = fields.required_string("id").unwrap_err();
        assert_eq!(err.field(), Some("id"));
    }

    #[test]
    fn test_should_reject_out_of_range_unsigned() {
        let mut fields = Fields::new(EntityKind::Encoding, &record(r#"{"p":300,"n":-1}"#));
        assert!(matches!(
            fields.unsigned::<u8>("p"),
            Err(MalformedResponse::InvalidField { ref field, .. }) if field == "p"
        ));
        assert!(fields.unsigned::<u64>("n").is_err());
    }

    #[test]
    fn test_should_keep_unconsumed_fields() {
        let mut fields = Fields::new(EntityKind::Profile, &record(r#"{"id":"p1","new_field":[1]}"#));
        fields.required_string("id").unwrap();
        let extra = fields.finish();
        assert_eq!(extra.len(), 1);
        assert!(extra.contains_key("new_field"));
    }
}
