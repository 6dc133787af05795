//! Encoding record transformer.

use crate::entity::Encoding;
use crate::error::MalformedResponse;
use crate::transform::{Fields, Transformer, WireWriter};
use crate::types::EntityKind;
use crate::wire::WireRecord;

/// Transformer for [`Encoding`] records.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodingTransformer;

impl Transformer for EncodingTransformer {
    type Entity = Encoding;

    fn kind(&self) -> EntityKind {
        EntityKind::Encoding
    }

    fn from_wire(&self, record: &WireRecord) -> Result<Encoding, MalformedResponse> {
        let mut f = Fields::new(EntityKind::Encoding, record);
        Ok(Encoding {
            id: f.required_string("id")?,
            video_id: f.required_string("video_id")?,
            status: f.required_status("status")?,
            profile_id: f.string("profile_id")?,
            profile_name: f.string("profile_name")?,
            extname: f.string("extname")?,
            path: f.string("path")?,
            encoding_progress: f.unsigned("encoding_progress")?,
            encoding_time: f.unsigned("encoding_time")?,
            started_encoding_at: f.string("started_encoding_at")?,
            width: f.unsigned("width")?,
            height: f.unsigned("height")?,
            file_size: f.unsigned("file_size")?,
            files: f.string_list("files")?,
            error_class: f.string("error_class")?,
            error_message: f.string("error_message")?,
            created_at: f.string("created_at")?,
            updated_at: f.string("updated_at")?,
            extra: f.finish(),
        })
    }

    fn to_wire(&self, encoding: &Encoding) -> WireRecord {
        let mut w = WireWriter::new(&encoding.extra);
        w.put("id", encoding.id.as_str())
            .put("video_id", encoding.video_id.as_str())
            .put("status", encoding.status.as_str())
            .put_opt("profile_id", encoding.profile_id.clone())
            .put_opt("profile_name", encoding.profile_name.clone())
            .put_opt("extname", encoding.extname.clone())
            .put_opt("path", encoding.path.clone())
            .put_opt("encoding_progress", encoding.encoding_progress)
            .put_opt("encoding_time", encoding.encoding_time)
            .put_opt("started_encoding_at", encoding.started_encoding_at.clone())
            .put_opt("width", encoding.width)
            .put_opt("height", encoding.height)
            .put_opt("file_size", encoding.file_size)
            .put_opt("files", encoding.files.clone())
            .put_opt("error_class", encoding.error_class.clone())
            .put_opt("error_message", encoding.error_message.clone())
            .put_opt("created_at", encoding.created_at.clone())
            .put_opt("updated_at", encoding.updated_at.clone());
        w.finish()
    }
}
