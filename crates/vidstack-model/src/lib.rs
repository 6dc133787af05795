//! Wire records, domain entities, and entity transformers for VidStack.
//!
//! Responses are parsed into a [`WireValue`] first. A [`Transformer`] then
//! validates the record against its entity schema, coercing string-encoded
//! numbers and booleans the service sometimes sends, and keeps fields it does
//! not know in the entity's `extra` bag so they survive a round trip.
//!
//! # Examples
//!
//! ```
//! use vidstack_model::{EncodingStatus, Transformer, TransformerRegistry, Video, wire};
//!
//! let registry = TransformerRegistry::default();
//! let body = wire::from_slice(br#"{"id":"v1","status":"queued","width":"640"}"#).unwrap();
//! let video = registry.get::<Video>().from_wire_value(&body).unwrap();
//!
//! assert_eq!(video.id, "v1");
//! assert_eq!(video.status, EncodingStatus::Queued);
//! assert_eq!(video.width, Some(640));
//! ```

pub mod entity;
pub mod error;
pub mod input;
pub mod transform;
pub mod types;
pub mod wire;

pub use entity::{CloudInfo, Encoding, NotificationEvents, Notifications, Profile, Video};
pub use error::MalformedResponse;
pub use input::{
    CloudUpdate, EncodingFilter, FileUpload, NewEncoding, NewProfile, NewVideo, ProfileRef,
    VideoFilter, VideoSource,
};
pub use transform::{
    CloudTransformer, EncodingTransformer, Entity, NotificationsTransformer, ProfileTransformer,
    Transformer, TransformerRegistry, VideoTransformer,
};
pub use types::{EncodingStatus, EntityKind};
pub use wire::{WireRecord, WireValue};
