//! Caller-built request records.
//!
//! These are requests rather than entities: they only travel towards the
//! service and are flattened into request parameters with [`crate::wire::flatten`].

use bytes::Bytes;

use crate::types::EncodingStatus;
use crate::wire::{WireRecord, WireValue};

/// Where the service gets a new video from.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoSource {
    /// The service downloads the video from this URL.
    Url(String),
    /// The video is uploaded in the request body.
    File(FileUpload),
}

impl VideoSource {
    /// Source fetched by the service from `url`.
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }
}

impl From<FileUpload> for VideoSource {
    fn from(file: FileUpload) -> Self {
        Self::File(file)
    }
}

/// An in-memory file sent as a multipart part.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    /// File name reported to the service.
    pub file_name: String,
    /// MIME type of the content, if known.
    pub content_type: Option<String>,
    /// File content.
    pub bytes: Bytes,
}

impl FileUpload {
    /// Create an upload without a content type.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Set the MIME type of the content.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Parameters of a new video.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideo {
    /// Where the content comes from.
    pub source: VideoSource,
    /// Profile names to encode with. Empty uses the cloud's defaults.
    pub profiles: Vec<String>,
    /// Storage path template for the encodings.
    pub path_format: Option<String>,
    /// Opaque payload stored with the video.
    pub payload: Option<String>,
}

impl NewVideo {
    /// A video from `source` encoded with `profiles`.
    pub fn new<I, S>(source: VideoSource, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source,
            profiles: profiles.into_iter().map(Into::into).collect(),
            path_format: None,
            payload: None,
        }
    }

    /// The uploaded file, when the source is a file.
    #[must_use]
    pub fn file(&self) -> Option<&FileUpload> {
        match &self.source {
            VideoSource::File(file) => Some(file),
            VideoSource::Url(_) => None,
        }
    }

    /// Request fields, excluding the uploaded file.
    #[must_use]
    pub fn to_wire(&self) -> WireRecord {
        let mut record = WireRecord::new();
        if let VideoSource::Url(url) = &self.source {
            record.insert("source_url".to_owned(), WireValue::from(url.as_str()));
        }
        if !self.profiles.is_empty() {
            record.insert(
                "profiles".to_owned(),
                WireValue::String(self.profiles.join(",")),
            );
        }
        insert_opt(&mut record, "path_format", self.path_format.clone());
        insert_opt(&mut record, "payload", self.payload.clone());
        record
    }
}

/// Which profile an encoding uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileRef {
    /// Profile id.
    Id(String),
    /// Profile name.
    Name(String),
}

/// Parameters of a new encoding for an existing video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEncoding {
    /// Video to encode.
    pub video_id: String,
    /// Profile to encode with.
    pub profile: ProfileRef,
}

impl NewEncoding {
    /// Encode `video_id` with `profile`.
    pub fn new(video_id: impl Into<String>, profile: ProfileRef) -> Self {
        Self {
            video_id: video_id.into(),
            profile,
        }
    }

    /// Request fields.
    #[must_use]
    pub fn to_wire(&self) -> WireRecord {
        let mut record = WireRecord::new();
        record.insert("video_id".to_owned(), WireValue::from(self.video_id.as_str()));
        let (key, value) = match &self.profile {
            ProfileRef::Id(id) => ("profile_id", id),
            ProfileRef::Name(name) => ("profile_name", name),
        };
        record.insert(key.to_owned(), WireValue::from(value.as_str()));
        record
    }
}

/// Parameters of a new profile. Either `preset_name` or the explicit
/// settings should be given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProfile {
    /// Unique profile name.
    pub name: Option<String>,
    /// Display title.
    pub title: Option<String>,
    /// Service preset the profile is based on.
    pub preset_name: Option<String>,
    /// Output file extension, including the dot.
    pub extname: Option<String>,
    /// Output width in pixels.
    pub width: Option<u32>,
    /// Output height in pixels.
    pub height: Option<u32>,
    /// Video bitrate in kbps.
    pub video_bitrate: Option<u32>,
    /// Audio bitrate in kbps.
    pub audio_bitrate: Option<u32>,
    /// How the frame is fitted to the output size.
    pub aspect_mode: Option<String>,
    /// Output frames per second.
    pub fps: Option<f64>,
    /// Frames between keyframes.
    pub keyframe_interval: Option<u32>,
    /// Whether smaller sources are upscaled.
    pub upscale: Option<bool>,
    /// Custom encoder command.
    pub command: Option<String>,
}

impl NewProfile {
    /// A profile based on a service preset.
    pub fn from_preset(name: impl Into<String>, preset_name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            preset_name: Some(preset_name.into()),
            ..Self::default()
        }
    }

    /// Request fields; unset fields are omitted.
    #[must_use]
    pub fn to_wire(&self) -> WireRecord {
        let mut record = WireRecord::new();
        insert_opt(&mut record, "name", self.name.clone());
        insert_opt(&mut record, "title", self.title.clone());
        insert_opt(&mut record, "preset_name", self.preset_name.clone());
        insert_opt(&mut record, "extname", self.extname.clone());
        insert_opt(&mut record, "width", self.width);
        insert_opt(&mut record, "height", self.height);
        insert_opt(&mut record, "video_bitrate", self.video_bitrate);
        insert_opt(&mut record, "audio_bitrate", self.audio_bitrate);
        insert_opt(&mut record, "aspect_mode", self.aspect_mode.clone());
        insert_opt(&mut record, "fps", self.fps);
        insert_opt(&mut record, "keyframe_interval", self.keyframe_interval);
        insert_opt(&mut record, "upscale", self.upscale);
        insert_opt(&mut record, "command", self.command.clone());
        record
    }
}

/// Changes to the cloud settings; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloudUpdate {
    /// Cloud name.
    pub name: Option<String>,
    /// Bucket receiving encoded files.
    pub s3_videos_bucket: Option<String>,
    /// Whether stored files are private.
    pub s3_private_access: Option<bool>,
    /// Access key for the bucket.
    pub aws_access_key: Option<String>,
    /// Secret key for the bucket.
    pub aws_secret_key: Option<String>,
}

impl CloudUpdate {
    /// Request fields.
    #[must_use]
    pub fn to_wire(&self) -> WireRecord {
        let mut record = WireRecord::new();
        insert_opt(&mut record, "name", self.name.clone());
        insert_opt(&mut record, "s3_videos_bucket", self.s3_videos_bucket.clone());
        insert_opt(&mut record, "s3_private_access", self.s3_private_access);
        insert_opt(&mut record, "aws_access_key", self.aws_access_key.clone());
        insert_opt(&mut record, "aws_secret_key", self.aws_secret_key.clone());
        record
    }
}

/// Filter for listing videos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoFilter {
    /// Only videos in this state.
    pub status: Option<EncodingStatus>,
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

impl VideoFilter {
    /// Request fields.
    #[must_use]
    pub fn to_wire(&self) -> WireRecord {
        let mut record = WireRecord::new();
        insert_opt(&mut record, "status", self.status.as_ref().map(EncodingStatus::as_str));
        insert_opt(&mut record, "page", self.page);
        insert_opt(&mut record, "per_page", self.per_page);
        record
    }
}

/// Filter for listing encodings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodingFilter {
    /// Only encodings in this state.
    pub status: Option<EncodingStatus>,
    /// Only encodings with this profile id.
    pub profile_id: Option<String>,
    /// Only encodings with this profile name.
    pub profile_name: Option<String>,
    /// Only encodings of this video.
    pub video_id: Option<String>,
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

impl EncodingFilter {
    /// Request fields.
    #[must_use]
    pub fn to_wire(&self) -> WireRecord {
        let mut record = WireRecord::new();
        insert_opt(&mut record, "status", self.status.as_ref().map(EncodingStatus::as_str));
        insert_opt(&mut record, "profile_id", self.profile_id.clone());
        insert_opt(&mut record, "profile_name", self.profile_name.clone());
        insert_opt(&mut record, "video_id", self.video_id.clone());
        insert_opt(&mut record, "page", self.page);
        insert_opt(&mut record, "per_page", self.per_page);
        record
    }
}

fn insert_opt<T: Into<WireValue>>(record: &mut WireRecord, name: &str, value: Option<T>) {
    if let Some(value) = value {
        record.insert(name.to_owned(), value.into());
    }
}
