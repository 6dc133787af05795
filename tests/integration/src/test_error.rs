//! Error handling integration tests.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use vidstack_client::{Error, VideoFilter};
    use vidstack_core::{AccountConfig, CloudConfig, VidStackConfig};

    use crate::{TestServer, cloud_for};

    #[tokio::test]
    async fn test_should_map_not_found_to_api_error() {
        let server = TestServer::start().await.unwrap();
        server.respond_json(
            404,
            &json!({"error": "RecordNotFound", "message": "Couldn't find Video with ID=v9"}),
        );
        let cloud = server.cloud().unwrap();

        let err = cloud.get_video("v9").await.unwrap_err();
        assert!(err.is_not_found());
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Couldn't find Video with ID=v9");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_should_surface_rejected_signature() {
        let server = TestServer::start().await.unwrap();
        let cloud = cloud_for(server.config_with_secret("wrong-secret")).unwrap();

        let err = cloud.list_videos(&VideoFilter::default()).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("signature does not match"));
        assert!(!server.requests()[0].verified);
    }

    #[tokio::test]
    async fn test_should_report_transport_error_when_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let host = listener.local_addr().unwrap().to_string();
        drop(listener);

        let config = VidStackConfig::new()
            .with_account("default", AccountConfig::new("AK", "SK", host))
            .with_cloud("default", CloudConfig::new("c1", "default"));
        let cloud = cloud_for(config).unwrap();

        let err = cloud.info().await.unwrap_err();
        match err {
            Error::Transport(transport) => assert!(transport.is_connect()),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_should_report_malformed_success_body() {
        let server = TestServer::start().await.unwrap();
        server.respond(200, "<html>maintenance</html>");
        server.respond_json(200, &json!({"video_id": "v1", "status": "queued"}));
        let cloud = server.cloud().unwrap();

        let err = cloud.get_encoding("e1").await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));

        let err = cloud.get_encoding("e1").await.unwrap_err();
        let Error::MalformedResponse(malformed) = err else {
            panic!("expected malformed response, got {err:?}");
        };
        assert_eq!(malformed.field(), Some("id"));
    }

    #[test]
    fn test_should_reject_cloud_with_unknown_account() {
        let config = VidStackConfig::new()
            .with_account("default", AccountConfig::new("AK", "SK", "api.example.com"))
            .with_cloud("default", CloudConfig::new("c1", "missing"));

        let err = cloud_for(config).unwrap_err();
        let err = err.downcast::<Error>().unwrap();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        assert!(err.to_string().contains("missing"));
    }
}
