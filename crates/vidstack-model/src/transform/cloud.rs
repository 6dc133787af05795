//! Cloud settings transformer.

use crate::entity::CloudInfo;
use crate::error::MalformedResponse;
use crate::transform::{Fields, Transformer, WireWriter};
use crate::types::EntityKind;
use crate::wire::WireRecord;

/// Transformer for [`CloudInfo`] records.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloudTransformer;

impl Transformer for CloudTransformer {
    type Entity = CloudInfo;

    fn kind(&self) -> EntityKind {
        EntityKind::Cloud
    }

    fn from_wire(&self, record: &WireRecord) -> Result<CloudInfo, MalformedResponse> {
        let mut f = Fields::new(EntityKind::Cloud, record);
        Ok(CloudInfo {
            id: f.required_string("id")?,
            name: f.string("name")?,
            s3_videos_bucket: f.string("s3_videos_bucket")?,
            s3_private_access: f.boolean("s3_private_access")?,
            url: f.string("url")?,
            created_at: f.string("created_at")?,
            updated_at: f.string("updated_at")?,
            extra: f.finish(),
        })
    }

    fn to_wire(&self, cloud: &CloudInfo) -> WireRecord {
        let mut w = WireWriter::new(&cloud.extra);
        w.put("id", cloud.id.as_str())
            .put_opt("name", cloud.name.clone())
            .put_opt("s3_videos_bucket", cloud.s3_videos_bucket.clone())
            .put_opt("s3_private_access", cloud.s3_private_access)
            .put_opt("url", cloud.url.clone())
            .put_opt("created_at", cloud.created_at.clone())
            .put_opt("updated_at", cloud.updated_at.clone());
        w.finish()
    }

    fn read_only_fields(&self) -> &'static [&'static str] {
        &["id", "url", "created_at", "updated_at"]
    }
}
