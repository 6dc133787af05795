//! Encoding profile transformer.

use crate::entity::Profile;
use crate::error::MalformedResponse;
use crate::transform::{Fields, Transformer, WireWriter};
use crate::types::EntityKind;
use crate::wire::WireRecord;

/// Transformer for [`Profile`] records.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileTransformer;

impl Transformer for ProfileTransformer {
    type Entity = Profile;

    fn kind(&self) -> EntityKind {
        EntityKind::Profile
    }

    fn from_wire(&self, record: &WireRecord) -> Result<Profile, MalformedResponse> {
        let mut f = Fields::new(EntityKind::Profile, record);
        Ok(Profile {
            id: f.required_string("id")?,
            name: f.string("name")?,
            title: f.string("title")?,
            preset_name: f.string("preset_name")?,
            extname: f.string("extname")?,
            width: f.unsigned("width")?,
            height: f.unsigned("height")?,
            video_bitrate: f.unsigned("video_bitrate")?,
            audio_bitrate: f.unsigned("audio_bitrate")?,
            aspect_mode: f.string("aspect_mode")?,
            fps: f.float("fps")?,
            keyframe_interval: f.unsigned("keyframe_interval")?,
            upscale: f.boolean("upscale")?,
            command: f.string("command")?,
            created_at: f.string("created_at")?,
            updated_at: f.string("updated_at")?,
            extra: f.finish(),
        })
    }

    fn to_wire(&self, profile: &Profile) -> WireRecord {
        let mut w = WireWriter::new(&profile.extra);
        w.put("id", profile.id.as_str())
            .put_opt("name", profile.name.clone())
            .put_opt("title", profile.title.clone())
            .put_opt("preset_name", profile.preset_name.clone())
            .put_opt("extname", profile.extname.clone())
            .put_opt("width", profile.width)
            .put_opt("height", profile.height)
            .put_opt("video_bitrate", profile.video_bitrate)
            .put_opt("audio_bitrate", profile.audio_bitrate)
            .put_opt("aspect_mode", profile.aspect_mode.clone())
            .put_opt("fps", profile.fps)
            .put_opt("keyframe_interval", profile.keyframe_interval)
            .put_opt("upscale", profile.upscale)
            .put_opt("command", profile.command.clone())
            .put_opt("created_at", profile.created_at.clone())
            .put_opt("updated_at", profile.updated_at.clone());
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{WireValue, from_slice};

    #[test]
    fn test_should_round_trip_profile() {
        let value = from_slice(
            br#"{"id":"p1","name":"h264","title":"MP4 (H.264)","extname":".mp4","width":"640","height":480,
                 "video_bitrate":500,"audio_bitrate":"128","fps":29.97,"upscale":"1","aspect_mode":"letterbox"}"#,
        )
        .unwrap();
        let profile = ProfileTransformer.from_wire_value(&value).unwrap();

        assert_eq!(profile.width, Some(640));
        assert_eq!(profile.audio_bitrate, Some(128));
        assert_eq!(profile.upscale, Some(true));

        let wire = ProfileTransformer.to_wire(&profile);
        assert_eq!(wire["upscale"], WireValue::Bool(true));
        assert_eq!(ProfileTransformer.from_wire(&wire).unwrap(), profile);
    }

    #[test]
    fn test_should_reject_nan_fps() {
        let value = from_slice(br#"{"id":"p1","fps":"NaN"}"#).unwrap();
        let err = ProfileTransformer.from_wire_value(&value).unwrap_err();
        assert!(matches!(
            err,
            MalformedResponse::InvalidField { expected: "a finite number", ref field, .. } if field == "fps"
        ));
    }

    #[test]
    fn test_should_reject_non_boolean_upscale() {
        let value = from_slice(br#"{"id":"p1","upscale":"maybe"}"#).unwrap();
        let err = ProfileTransformer.from_wire_value(&value).unwrap_err();
        assert!(matches!(
            err,
            MalformedResponse::InvalidField { expected: "a boolean", ref field, .. } if field == "upscale"
        ));
    }

    #[test]
    fn test_should_strip_id_and_timestamps_for_update() {
        let value =
            from_slice(br#"{"id":"p1","name":"h264","created_at":"t","updated_at":"t"}"#).unwrap();
        let profile = ProfileTransformer.from_wire_value(&value).unwrap();

        let update = ProfileTransformer.to_update_wire(&profile);
        assert_eq!(update.keys().collect::<Vec<_>>(), vec!["name"]);
    }
}
