//! Domain entities returned by the service.
//!
//! Entities are `#[non_exhaustive]`: other crates can read and modify their
//! fields but can only obtain one from a transformer, so every instance went
//! through schema validation. Fields the schema does not know are kept in
//! `extra` and written back unchanged.

use crate::types::EncodingStatus;
use crate::wire::WireRecord;

/// An uploaded video.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Video {
    /// Video id.
    pub id: String,
    /// Processing state.
    pub status: EncodingStatus,
    /// URL the service fetched the source from.
    pub source_url: Option<String>,
    /// Name of the uploaded file.
    pub original_filename: Option<String>,
    /// File extension, including the dot.
    pub extname: Option<String>,
    /// Storage path without extension.
    pub path: Option<String>,
    /// Detected MIME type.
    pub mime_type: Option<String>,
    /// Duration in milliseconds.
    pub duration: Option<u64>,
    /// Frame width in pixels.
    pub width: Option<u32>,
    /// Frame height in pixels.
    pub height: Option<u32>,
    /// Size in bytes.
    pub file_size: Option<u64>,
    /// Frames per second.
    pub fps: Option<f64>,
    /// Video codec name.
    pub video_codec: Option<String>,
    /// Audio codec name.
    pub audio_codec: Option<String>,
    /// Video bitrate in kbps.
    pub video_bitrate: Option<u32>,
    /// Audio bitrate in kbps.
    pub audio_bitrate: Option<u32>,
    /// Audio sample rate in Hz.
    pub audio_sample_rate: Option<u32>,
    /// Number of audio channels.
    pub audio_channels: Option<u32>,
    /// Opaque caller payload stored with the video.
    pub payload: Option<String>,
    /// Error class when processing failed.
    pub error_class: Option<String>,
    /// Error message when processing failed.
    pub error_message: Option<String>,
    /// Creation time as reported by the service.
    pub created_at: Option<String>,
    /// Last update time as reported by the service.
    pub updated_at: Option<String>,
    /// Fields not covered by the schema.
    pub extra: WireRecord,
}

/// One encoding of a video with one profile.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Encoding {
    /// Encoding id.
    pub id: String,
    /// Id of the source video.
    pub video_id: String,
    /// Processing state.
    pub status: EncodingStatus,
    /// Id of the profile used.
    pub profile_id: Option<String>,
    /// Name of the profile used.
    pub profile_name: Option<String>,
    /// Output file extension.
    pub extname: Option<String>,
    /// Output path without extension.
    pub path: Option<String>,
    /// Progress percentage, 0 to 100.
    pub encoding_progress: Option<u8>,
    /// Time spent encoding, in seconds.
    pub encoding_time: Option<u64>,
    /// When encoding started.
    pub started_encoding_at: Option<String>,
    /// Output width in pixels.
    pub width: Option<u32>,
    /// Output height in pixels.
    pub height: Option<u32>,
    /// Output size in bytes.
    pub file_size: Option<u64>,
    /// Output file URLs or paths.
    pub files: Option<Vec<String>>,
    /// Error class when encoding failed.
    pub error_class: Option<String>,
    /// Error message when encoding failed.
    pub error_message: Option<String>,
    /// Creation time as reported by the service.
    pub created_at: Option<String>,
    /// Last update time as reported by the service.
    pub updated_at: Option<String>,
    /// Fields not covered by the schema.
    pub extra: WireRecord,
}

/// An encoding profile.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Profile {
    /// Profile id.
    pub id: String,
    /// Unique profile name.
    pub name: Option<String>,
    /// Human readable title.
    pub title: Option<String>,
    /// Preset the profile derives from.
    pub preset_name: Option<String>,
    /// Output extension.
    pub extname: Option<String>,
    /// Output width in pixels.
    pub width: Option<u32>,
    /// Output height in pixels.
    pub height: Option<u32>,
    /// Video bitrate in kbps.
    pub video_bitrate: Option<u32>,
    /// Audio bitrate in kbps.
    pub audio_bitrate: Option<u32>,
    /// Aspect handling (`letterbox`, `crop`, ...).
    pub aspect_mode: Option<String>,
    /// Output frames per second.
    pub fps: Option<f64>,
    /// Keyframe interval in frames.
    pub keyframe_interval: Option<u32>,
    /// Whether smaller sources are upscaled.
    pub upscale: Option<bool>,
    /// Custom encoder command.
    pub command: Option<String>,
    /// Creation time as reported by the service.
    pub created_at: Option<String>,
    /// Last update time as reported by the service.
    pub updated_at: Option<String>,
    /// Fields not covered by the schema.
    pub extra: WireRecord,
}

/// Which events trigger a notification.
#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct NotificationEvents {
    /// A video was created.
    pub video_created: bool,
    /// All encodings of a video finished.
    pub video_encoded: bool,
    /// Encoding progress changed.
    pub encoding_progress: bool,
    /// One encoding finished.
    pub encoding_completed: bool,
    /// Event flags not covered by the schema.
    pub extra: WireRecord,
}

/// Notification (webhook) settings of a cloud.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Notifications {
    /// Callback URL. `None` means notifications are disabled.
    pub url: Option<String>,
    /// Delay before delivery, in seconds.
    pub delay: Option<u32>,
    /// Enabled events.
    pub events: NotificationEvents,
    /// Fields not covered by the schema.
    pub extra: WireRecord,
}

/// Settings of a cloud.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct CloudInfo {
    /// Cloud id.
    pub id: String,
    /// Cloud name.
    pub name: Option<String>,
    /// Bucket receiving encoded files.
    pub s3_videos_bucket: Option<String>,
    /// Whether stored files are private.
    pub s3_private_access: Option<bool>,
    /// Public base URL of stored files.
    pub url: Option<String>,
    /// Creation time as reported by the service.
    pub created_at: Option<String>,
    /// Last update time as reported by the service.
    pub updated_at: Option<String>,
    /// Fields not covered by the schema.
    pub extra: WireRecord,
}
