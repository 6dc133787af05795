//! Parameter encoding and response shape integration tests.

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::json;
    use vidstack_client::{EncodingFilter, EncodingStatus};

    use crate::TestServer;

    #[tokio::test]
    async fn test_should_percent_encode_query_values() {
        let server = TestServer::start().await.unwrap();
        server.respond_json(200, &json!([]));
        let cloud = server.cloud().unwrap();

        let filter = EncodingFilter {
            profile_name: Some("a b&c".to_owned()),
            status: Some(EncodingStatus::Other("on hold".to_owned())),
            ..EncodingFilter::default()
        };
        let encodings = cloud.list_encodings(&filter).await.unwrap();
        assert!(encodings.is_empty());

        let request = &server.requests()[0];
        assert_eq!(request.method, Method::GET);
        assert!(request.verified);
        let query = request.raw_query.as_deref().unwrap();
        assert!(query.contains("profile_name=a%20b%26c"), "query was {query}");
        assert!(query.contains("status=on%20hold"));
        assert!(!query.contains('+'));
        assert_eq!(request.params["profile_name"], "a b&c");
    }

    #[tokio::test]
    async fn test_should_normalize_bare_and_wrapped_lists() {
        let first = json!({"id": "e1", "video_id": "v1", "status": "success"});
        let second = json!({"id": "e2", "video_id": "v1", "status": "processing", "encoding_progress": "40"});

        let server = TestServer::start().await.unwrap();
        server.respond_json(200, &json!([first, second]));
        server.respond_json(200, &json!({"total": 2, "encodings": [first, second]}));
        let cloud = server.cloud().unwrap();

        let bare = cloud.video_encodings("v1").await.unwrap();
        let wrapped = cloud.list_encodings(&EncodingFilter::default()).await.unwrap();

        assert_eq!(bare.len(), 2);
        assert_eq!(bare, wrapped);
        assert_eq!(bare[1].encoding_progress, Some(40));
    }

    #[tokio::test]
    async fn test_should_send_nested_records_as_bracketed_form_fields() {
        let server = TestServer::start().await.unwrap();
        server.respond_json(
            200,
            &json!({"url": "http://hook", "delay": 5, "events": {"video_created": true}}),
        );
        server.respond_json(
            200,
            &json!({"url": "http://hook", "delay": 5, "events": {"video_created": true, "encoding_completed": true}}),
        );
        let cloud = server.cloud().unwrap();

        let mut notifications = cloud.notifications().await.unwrap();
        notifications.events.encoding_completed = true;
        let updated = cloud.update_notifications(&notifications).await.unwrap();
        assert!(updated.events.encoding_completed);

        let request = &server.requests()[1];
        assert_eq!(request.method, Method::PUT);
        assert!(request.verified);
        let body = String::from_utf8_lossy(&request.body);
        assert!(body.contains("events%5Bencoding_completed%5D=true"), "body was {body}");
        assert_eq!(request.params["events[video_created]"], "true");
        assert_eq!(request.params["url"], "http://hook");
    }

    #[tokio::test]
    async fn test_should_escape_ids_in_path() {
        let server = TestServer::start().await.unwrap();
        server.respond(200, "");
        let cloud = server.cloud().unwrap();

        cloud.delete_profile("p 1").await.unwrap();

        let request = &server.requests()[0];
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "/v2/c1/profiles/p%201.json");
        assert!(request.verified);
    }
}
