//! Video creation integration tests.

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::json;
    use vidstack_client::{EncodingStatus, FileUpload, NewVideo, VideoSource};

    use crate::{CLOUD_ID, TestServer};

    #[tokio::test]
    async fn test_should_encode_from_url_with_one_signed_post() {
        let server = TestServer::start().await.unwrap();
        server.respond_json(200, &json!({"id": "v1", "status": "queued"}));
        let cloud = server.cloud().unwrap();

        let video = cloud
            .encode(VideoSource::url("http://example.com/a.mp4"), ["h264"])
            .await
            .unwrap();

        assert_eq!(video.id, "v1");
        assert_eq!(video.status, EncodingStatus::Queued);

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, format!("/v2/{CLOUD_ID}/videos.json"));
        assert!(request.verified);
        assert_eq!(request.raw_query, None);
        assert_eq!(request.params["access_key"], "AK");
        assert_eq!(request.params["profiles"], "h264");
        assert_eq!(request.params["signature_version"], "2");
        assert!(request.params.contains_key("signature"));
        assert_eq!(
            request.content_type.as_deref(),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[tokio::test]
    async fn test_should_upload_file_as_multipart() {
        let server = TestServer::start().await.unwrap();
        server.respond_json(
            201,
            &json!({"id": "v2", "status": "processing", "original_filename": "clip.mp4"}),
        );
        let cloud = server.cloud().unwrap();

        let mut video = NewVideo::new(
            FileUpload::new("clip.mp4", &b"not really a movie"[..])
                .with_content_type("video/mp4")
                .into(),
            ["h264", "webm"],
        );
        video.payload = Some("order-42".to_owned());

        let created = cloud.create_video(&video).await.unwrap();
        assert_eq!(created.original_filename.as_deref(), Some("clip.mp4"));

        let request = &server.requests()[0];
        assert!(request.verified, "multipart text fields must carry a valid signature");
        assert!(
            request
                .content_type
                .as_deref()
                .unwrap()
                .starts_with("multipart/form-data")
        );
        assert_eq!(request.params["profiles"], "h264,webm");
        assert_eq!(request.params["payload"], "order-42");
        assert!(!request.params.contains_key("file"));

        assert_eq!(request.files.len(), 1);
        let file = &request.files[0];
        assert_eq!(file.field, "file");
        assert_eq!(file.file_name, "clip.mp4");
        assert_eq!(file.content, "not really a movie");
    }

    #[tokio::test]
    async fn test_should_poll_status_until_terminal() {
        let server = TestServer::start().await.unwrap();
        server.respond_json(200, &json!({"id": "v1", "status": "processing"}));
        server.respond_json(200, &json!({"id": "v1", "status": "success", "duration": "14010"}));
        let cloud = server.cloud().unwrap();

        let mut polls = 0;
        let status = loop {
            polls += 1;
            let status = cloud.get_status("v1").await.unwrap();
            if status.is_terminal() {
                break status;
            }
        };

        assert_eq!(status, EncodingStatus::Success);
        assert_eq!(polls, 2);
        assert!(server.requests().iter().all(|r| r.method == Method::GET && r.verified));
    }
}
