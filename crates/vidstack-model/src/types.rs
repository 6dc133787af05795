//! Shared enumerations.

use std::fmt;

/// The entity kinds the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Cloud settings.
    Cloud,
    /// An encoding of a video with one profile.
    Encoding,
    /// Notification (webhook) settings.
    Notifications,
    /// An encoding profile.
    Profile,
    /// An uploaded video.
    Video,
}

impl EntityKind {
    /// Every kind, in registry order.
    pub const ALL: [Self; 5] = [
        Self::Cloud,
        Self::Encoding,
        Self::Notifications,
        Self::Profile,
        Self::Video,
    ];

    /// Lowercase name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::Encoding => "encoding",
            Self::Notifications => "notifications",
            Self::Profile => "profile",
            Self::Video => "video",
        }
    }

    /// Field holding the item list in a wrapped list response.
    #[must_use]
    pub fn collection_key(self) -> &'static str {
        match self {
            Self::Cloud => "clouds",
            Self::Encoding => "encodings",
            Self::Notifications => "notifications",
            Self::Profile => "profiles",
            Self::Video => "videos",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing state of a video or encoding.
///
/// Unknown states are kept verbatim so newer service states survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EncodingStatus {
    /// Accepted, waiting for a worker.
    Queued,
    /// Being processed.
    Processing,
    /// Finished successfully.
    Success,
    /// Failed.
    Fail,
    /// Cancelled by the user.
    Cancelled,
    /// Any other state reported by the service.
    Other(String),
}

impl EncodingStatus {
    /// Wire form of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Success => "success",
            Self::Fail => "fail",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }

    /// Whether the status is final (`success`, `fail`, or `cancelled`).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Fail | Self::Cancelled)
    }
}

impl From<&str> for EncodingStatus {
    fn from(value: &str) -> Self {
        match value {
            "queued" => Self::Queued,
            "processing" => Self::Processing,
            "success" => Self::Success,
            "fail" => Self::Fail,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for EncodingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
