//! Accounts, cloud records, and configuration validation for VidStack.
//!
//! This crate holds the read-only state every VidStack client is built from:
//! named [`Account`] credentials, named cloud records binding a cloud id to an
//! account, and the [`VidStackConfig`] records they are validated from.
//!
//! Validation is eager. A [`VidStackConfig`] either turns into a fully
//! populated [`AccountRegistry`] and [`CloudRegistry`], or fails with a
//! [`ConfigError`] naming the section, the entry, and the offending option.

mod account;
mod cloud;
mod config;
mod error;

pub use account::{Account, AccountRegistry};
pub use cloud::{CloudRecord, CloudRegistry};
pub use config::{AccountConfig, CloudConfig, DEFAULT_API_HOST, DEFAULT_NAME, VidStackConfig};
pub use error::{ConfigError, ConfigResult};
