//! Request dispatching for the VidStack encoding API.
//!
//! A [`Dispatcher`] sends an already-signed [`DispatchRequest`] and returns
//! the [`RawResponse`] untouched. Parameters are encoded with the signer's
//! percent-encoding table, so the bytes on the wire are the bytes that were
//! signed:
//!
//! - `GET` and `DELETE` put them in the query string.
//! - `POST` and `PUT` send an `application/x-www-form-urlencoded` body, or a
//!   `multipart/form-data` body when a [`FilePart`] is attached.
//!
//! Error statuses are not errors at this layer. Only failures to exchange the
//! request at all surface as [`TransportError`].

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod request;

pub use config::{DEFAULT_USER_AGENT, DispatcherConfig};
pub use dispatcher::{Dispatcher, HttpDispatcher};
pub use error::TransportError;
pub use request::{DispatchRequest, FORM_CONTENT_TYPE, FilePart, RawResponse};
