//! Client for the VidStack video encoding API.
//!
//! A [`VidStack`] is built once from validated configuration. Each configured
//! cloud is exposed as a [`Cloud`] whose operations sign their parameters,
//! send them over HTTP, and return typed entities:
//!
//! ```no_run
//! use vidstack_client::{VidStack, VideoSource};
//! use vidstack_core::VidStackConfig;
//!
//! # async fn run() -> vidstack_client::Result<()> {
//! let stack = VidStack::from_config(&VidStackConfig::from_env())?;
//! let cloud = stack.default_cloud()?;
//!
//! let video = cloud
//!     .encode(VideoSource::url("https://example.com/movie.mp4"), ["h264"])
//!     .await?;
//! println!("{} is {}", video.id, video.status);
//! # Ok(())
//! # }
//! ```
//!
//! Configuration problems surface from [`VidStackBuilder::build`], before any
//! request is made. Afterwards every operation fails with one of the
//! [`Error`] variants.

mod cloud;
mod error;
mod stack;
#[cfg(test)]
mod test_support;

pub use cloud::Cloud;
pub use error::{Error, Result};
pub use stack::{VidStack, VidStackBuilder, get_cloud};

pub use vidstack_model::{
    CloudInfo, CloudUpdate, Encoding, EncodingFilter, EncodingStatus, FileUpload, NewEncoding,
    NewProfile, NewVideo, NotificationEvents, Notifications, Profile, ProfileRef, Video,
    VideoFilter, VideoSource,
};
