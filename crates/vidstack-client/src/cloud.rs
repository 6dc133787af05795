//! The per-cloud facade.

use std::sync::Arc;

use http::Method;
use tracing::{debug, warn};
use vidstack_auth::{Params, RequestSigner, SigningRequest, percent_encode};
use vidstack_core::Account;
use vidstack_http::{DispatchRequest, Dispatcher, FilePart, RawResponse};
use vidstack_model::wire::{self, WireRecord, WireValue};
use vidstack_model::{
    CloudInfo, CloudUpdate, Encoding, EncodingFilter, EncodingStatus, Entity, FileUpload,
    MalformedResponse, NewEncoding, NewProfile, NewVideo, Notifications, Profile, Transformer,
    TransformerRegistry, Video, VideoFilter, VideoSource,
};

use crate::error::{Error, Result};

/// Multipart field carrying an uploaded video.
const FILE_FIELD: &str = "file";

/// One configured cloud: typed operations over the service's REST resources.
///
/// Every operation builds flat parameters, signs them with the cloud's account,
/// dispatches the request, and turns the response into entities. A `Cloud` is
/// cheap to clone and safe to share between tasks.
#[derive(Debug, Clone)]
pub struct Cloud {
    name: String,
    id: String,
    account: Arc<Account>,
    signer: Arc<dyn RequestSigner>,
    dispatcher: Arc<dyn Dispatcher>,
    transformers: Arc<TransformerRegistry>,
}

impl Cloud {
    pub(crate) fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        account: Arc<Account>,
        signer: Arc<dyn RequestSigner>,
        dispatcher: Arc<dyn Dispatcher>,
        transformers: Arc<TransformerRegistry>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            account,
            signer,
            dispatcher,
            transformers,
        }
    }

    /// Configured name of the cloud.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Service-side cloud id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Account the cloud signs with.
    #[must_use]
    pub fn account(&self) -> &Account {
        &self.account
    }

    // Videos

    /// Upload a video from `source` and encode it with the named profiles.
    pub async fn encode<I, S>(&self, source: VideoSource, profile_names: I) -> Result<Video>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.create_video(&NewVideo::new(source, profile_names)).await
    }

    /// Create a video. A file source is sent as a multipart upload.
    pub async fn create_video(&self, video: &NewVideo) -> Result<Video> {
        let file = video.file().map(file_part);
        let value = self
            .call(Method::POST, "videos", &video.to_wire(), file)
            .await?;
        self.parse(&value)
    }

    /// Processing state of a video.
    pub async fn get_status(&self, video_id: &str) -> Result<EncodingStatus> {
        Ok(self.get_video(video_id).await?.status)
    }

    /// Fetch one video.
    pub async fn get_video(&self, id: &str) -> Result<Video> {
        self.fetch(&resource(&["videos", id])).await
    }

    /// List videos.
    pub async fn list_videos(&self, filter: &VideoFilter) -> Result<Vec<Video>> {
        self.fetch_list("videos", &filter.to_wire()).await
    }

    /// Delete a video and its encodings.
    pub async fn delete_video(&self, id: &str) -> Result<()> {
        self.delete(&resource(&["videos", id])).await
    }

    /// Encodings of one video.
    pub async fn video_encodings(&self, video_id: &str) -> Result<Vec<Encoding>> {
        self.fetch_list(&resource(&["videos", video_id, "encodings"]), &WireRecord::new())
            .await
    }

    // Encodings

    /// Encode an existing video with one more profile.
    pub async fn create_encoding(&self, encoding: &NewEncoding) -> Result<Encoding> {
        let value = self
            .call(Method::POST, "encodings", &encoding.to_wire(), None)
            .await?;
        self.parse(&value)
    }

    /// Fetch one encoding.
    pub async fn get_encoding(&self, id: &str) -> Result<Encoding> {
        self.fetch(&resource(&["encodings", id])).await
    }

    /// List encodings.
    pub async fn list_encodings(&self, filter: &EncodingFilter) -> Result<Vec<Encoding>> {
        self.fetch_list("encodings", &filter.to_wire()).await
    }

    /// Delete an encoding.
    pub async fn delete_encoding(&self, id: &str) -> Result<()> {
        self.delete(&resource(&["encodings", id])).await
    }

    /// Restart a failed encoding.
    pub async fn retry_encoding(&self, id: &str) -> Result<()> {
        self.call(
            Method::POST,
            &resource(&["encodings", id, "retry"]),
            &WireRecord::new(),
            None,
        )
        .await?;
        Ok(())
    }

    /// Stop an encoding in progress.
    pub async fn cancel_encoding(&self, id: &str) -> Result<()> {
        self.call(
            Method::POST,
            &resource(&["encodings", id, "cancel"]),
            &WireRecord::new(),
            None,
        )
        .await?;
        Ok(())
    }

    // Profiles

    /// Create an encoding profile.
    pub async fn create_profile(&self, profile: &NewProfile) -> Result<Profile> {
        let value = self
            .call(Method::POST, "profiles", &profile.to_wire(), None)
            .await?;
        self.parse(&value)
    }

    /// Fetch a profile by id or by name.
    pub async fn get_profile(&self, id_or_name: &str) -> Result<Profile> {
        self.fetch(&resource(&["profiles", id_or_name])).await
    }

    /// List the cloud's profiles.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.fetch_list("profiles", &WireRecord::new()).await
    }

    /// Save changes to a profile. Read-only fields are not sent.
    pub async fn update_profile(&self, profile: &Profile) -> Result<Profile> {
        let record = self.transformers.get::<Profile>().to_update_wire(profile);
        let value = self
            .call(Method::PUT, &resource(&["profiles", &profile.id]), &record, None)
            .await?;
        self.parse(&value)
    }

    /// Delete a profile.
    pub async fn delete_profile(&self, id: &str) -> Result<()> {
        self.delete(&resource(&["profiles", id])).await
    }

    // Cloud settings

    /// Notification settings.
    pub async fn notifications(&self) -> Result<Notifications> {
        self.fetch("notifications").await
    }

    /// Replace the notification settings.
    pub async fn update_notifications(&self, notifications: &Notifications) -> Result<Notifications> {
        let record = self
            .transformers
            .get::<Notifications>()
            .to_update_wire(notifications);
        let value = self
            .call(Method::PUT, "notifications", &record, None)
            .await?;
        self.parse(&value)
    }

    /// Cloud settings.
    pub async fn info(&self) -> Result<CloudInfo> {
        self.fetch("cloud").await
    }

    /// Change cloud settings.
    pub async fn update_info(&self, update: &CloudUpdate) -> Result<CloudInfo> {
        let value = self
            .call(Method::PUT, "cloud", &update.to_wire(), None)
            .await?;
        self.parse(&value)
    }

    /// Sign `params` for a request the caller sends itself, such as a browser
    /// upload form posting straight to the service.
    ///
    /// `resource` is relative to the cloud, e.g. `videos`. The result holds
    /// the caller's params, the signing metadata, and `signature`.
    pub fn signed_params(&self, method: &Method, resource: &str, params: &Params) -> Result<Params> {
        let path = self.path(resource);
        let request = SigningRequest::new(method, &path, params);
        Ok(self.signer.sign(&self.account, &self.id, &request)?.params)
    }

    /// Request path for `resource`.
    fn path(&self, resource: &str) -> String {
        format!("/v2/{}/{resource}.json", percent_encode(&self.id))
    }

    async fn fetch<E: Entity>(&self, resource: &str) -> Result<E> {
        let value = self
            .call(Method::GET, resource, &WireRecord::new(), None)
            .await?;
        self.parse(&value)
    }

    async fn fetch_list<E: Entity>(&self, resource: &str, query: &WireRecord) -> Result<Vec<E>> {
        let value = self.call(Method::GET, resource, query, None).await?;
        Ok(self.transformers.get::<E>().list_from_wire(&value)?)
    }

    async fn delete(&self, resource: &str) -> Result<()> {
        self.call(Method::DELETE, resource, &WireRecord::new(), None)
            .await?;
        Ok(())
    }

    fn parse<E: Entity>(&self, value: &WireValue) -> Result<E> {
        Ok(self.transformers.get::<E>().from_wire_value(value)?)
    }

    async fn call(
        &self,
        method: Method,
        resource: &str,
        record: &WireRecord,
        file: Option<FilePart>,
    ) -> Result<WireValue> {
        let path = self.path(resource);
        let params = wire::flatten(record);
        let signed = self.signer.sign(
            &self.account,
            &self.id,
            &SigningRequest::new(&method, &path, &params),
        )?;

        debug!(cloud = %self.name, %method, %path, "calling service");

        let mut request = DispatchRequest::new(method, self.account.api_host(), path, signed.params);
        if let Some(file) = file {
            request = request.with_file(file);
        }
        let response = self.dispatcher.execute(request).await?;

        if !response.is_success() {
            let status = response.status.as_u16();
            let message = error_message(&response);
            warn!(cloud = %self.name, status, %message, "service returned an error");
            return Err(Error::Api { status, message });
        }

        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(WireValue::Null);
        }
        wire::from_slice(&response.body).map_err(|e| MalformedResponse::from(e).into())
    }
}

/// Join path segments, escaping each one.
fn resource(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| percent_encode(s))
        .collect::<Vec<_>>()
        .join("/")
}

fn file_part(upload: &FileUpload) -> FilePart {
    FilePart {
        field: FILE_FIELD.to_owned(),
        file_name: upload.file_name.clone(),
        content_type: upload.content_type.clone(),
        bytes: upload.bytes.clone(),
    }
}

/// The message of an error response: its `message` or `error` field when the
/// body is a JSON record, else the body text, else the status reason.
fn error_message(response: &RawResponse) -> String {
    if let Ok(WireValue::Record(record)) = wire::from_slice(&response.body) {
        let field = ["message", "error"]
            .iter()
            .find_map(|key| record.get(*key).and_then(WireValue::as_str))
            .filter(|m| !m.is_empty());
        if let Some(message) = field {
            return message.to_owned();
        }
    }

    let text = response.body_text();
    let text = text.trim();
    if text.is_empty() {
        response
            .status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_owned()
    } else {
        text.to_owned()
    }
}
