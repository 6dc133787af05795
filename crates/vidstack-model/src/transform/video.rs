//! Video record transformer.

use crate::entity::Video;
use crate::error::MalformedResponse;
use crate::transform::{Fields, Transformer, WireWriter};
use crate::types::EntityKind;
use crate::wire::WireRecord;

/// Transformer for [`Video`] records.
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoTransformer;

impl Transformer for VideoTransformer {
    type Entity = Video;

    fn kind(&self) -> EntityKind {
        EntityKind::Video
    }

    fn from_wire(&self, record: &WireRecord) -> Result<Video, MalformedResponse> {
        let mut f = Fields::new(EntityKind::Video, record);
        Ok(Video {
            id: f.required_string("id")?,
            status: f.required_status("status")?,
            source_url: f.string("source_url")?,
            original_filename: f.string("original_filename")?,
            extname: f.string("extname")?,
            path: f.string("path")?,
            mime_type: f.string("mime_type")?,
            duration: f.unsigned("duration")?,
            width: f.unsigned("width")?,
            height: f.unsigned("height")?,
            file_size: f.unsigned("file_size")?,
            fps: f.float("fps")?,
            video_codec: f.string("video_codec")?,
            audio_codec: f.string("audio_codec")?,
            video_bitrate: f.unsigned("video_bitrate")?,
            audio_bitrate: f.unsigned("audio_bitrate")?,
            audio_sample_rate: f.unsigned("audio_sample_rate")?,
            audio_channels: f.unsigned("audio_channels")?,
            payload: f.string("payload")?,
            error_class: f.string("error_class")?,
            error_message: f.string("error_message")?,
            created_at: f.string("created_at")?,
            updated_at: f.string("updated_at")?,
            extra: f.finish(),
        })
    }

    fn to_wire(&self, video: &Video) -> WireRecord {
        let mut w = WireWriter::new(&video.extra);
        w.put("id", video.id.as_str())
            .put("status", video.status.as_str())
            .put_opt("source_url", video.source_url.clone())
            .put_opt("original_filename", video.original_filename.clone())
            .put_opt("extname", video.extname.clone())
            .put_opt("path", video.path.clone())
            .put_opt("mime_type", video.mime_type.clone())
            .put_opt("duration", video.duration)
            .put_opt("width", video.width)
            .put_opt("height", video.height)
            .put_opt("file_size", video.file_size)
            .put_opt("fps", video.fps)
            .put_opt("video_codec", video.video_codec.clone())
            .put_opt("audio_codec", video.audio_codec.clone())
            .put_opt("video_bitrate", video.video_bitrate)
            .put_opt("audio_bitrate", video.audio_bitrate)
            .put_opt("audio_sample_rate", video.audio_sample_rate)
            .put_opt("audio_channels", video.audio_channels)
            .put_opt("payload", video.payload.clone())
            .put_opt("error_class", video.error_class.clone())
            .put_opt("error_message", video.error_message.clone())
            .put_opt("created_at", video.created_at.clone())
            .put_opt("updated_at", video.updated_at.clone());
        w.finish()
    }

    fn read_only_fields(&self) -> &'static [&'static str] {
        &[
            "id",
            "status",
            "original_filename",
            "extname",
            "mime_type",
            "duration",
            "width",
            "height",
            "file_size",
            "fps",
            "video_codec",
            "audio_codec",
            "video_bitrate",
            "audio_bitrate",
            "audio_sample_rate",
            "audio_channels",
            "error_class",
            "error_message",
            "created_at",
            "updated_at",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EncodingStatus;
    use crate::wire::{WireValue, from_slice};

    fn parse(json: &str) -> Result<Video, MalformedResponse> {
        VideoTransformer.from_wire_value(&from_slice(json.as_bytes()).unwrap())
    }

    #[test]
    fn test_should_parse_minimal_video() {
        let video = parse(r#"{"id":"v1","status":"queued"}"#).unwrap();
        assert_eq!(video.id, "v1");
        assert_eq!(video.status, EncodingStatus::Queued);
        assert_eq!(video.width, None);
        assert!(video.extra.is_empty());
    }

    #[test]
    fn test_should_parse_full_video_with_coercion() {
        let video = parse(
            r#"{"id":"v1","status":"success","source_url":"http://x/a.mp4","original_filename":"a.mp4",
                "duration":"14010","width":300,"height":"240","file_size":805301,"fps":"29","mime_type":"video/mp4",
                "video_codec":"h264","audio_codec":"aac","audio_channels":2,"created_at":"2024/01/02 03:04:05 +0000"}"#,
        )
        .unwrap();

        assert_eq!(video.status, EncodingStatus::Success);
        assert_eq!(video.duration, Some(14010));
        assert_eq!(video.width, Some(300));
        assert_eq!(video.height, Some(240));
        assert_eq!(video.file_size, Some(805_301));
        assert_eq!(video.fps, Some(29.0));
        assert_eq!(video.audio_channels, Some(2));
        assert_eq!(video.created_at.as_deref(), Some("2024/01/02 03:04:05 +0000"));
    }

    #[test]
    fn test_should_require_status() {
        let err = parse(r#"{"id":"v1"}"#).unwrap_err();
        assert_eq!(err.field(), Some("status"));
    }

    #[test]
    fn test_should_round_trip_with_unknown_fields() {
        let video =
            parse(r#"{"id":"v1","status":"processing","width":"640","thumbnail":{"small":"s.jpg"}}"#)
                .unwrap();
        assert!(video.extra.contains_key("thumbnail"));

        let wire = VideoTransformer.to_wire(&video);
        assert_eq!(wire["width"], WireValue::Integer(640));
        assert_eq!(VideoTransformer.from_wire(&wire).unwrap(), video);
    }

    #[test]
    fn test_should_omit_unset_fields() {
        let video = parse(r#"{"id":"v1","status":"queued"}"#).unwrap();
        let wire = VideoTransformer.to_wire(&video);
        assert_eq!(wire.len(), 2);
    }

    #[test]
    fn test_should_strip_read_only_fields_for_update() {
        let video = parse(r#"{"id":"v1","status":"queued","payload":"p","width":1}"#).unwrap();
        let update = VideoTransformer.to_update_wire(&video);
        assert_eq!(update.len(), 1);
        assert_eq!(update["payload"], WireValue::from("p"));
    }
}
