use jawbone_client::http_client::ReqwestJawboneClient;
use jawbone_client::{Credentials, Endpoint, JawboneApi, JawboneError};
use secrecy::SecretString;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(uri: &str) -> ReqwestJawboneClient {
    let credentials = Credentials::new("cid", SecretString::new("s".into()))
        .with_token(SecretString::new("tok".into()), "Bearer");
    ReqwestJawboneClient::new(uri, credentials).expect("client")
}

#[tokio::test]
async fn every_endpoint_requests_base_plus_template() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {}})))
        .mount(&server)
        .await;

    let client = client(&server.uri());
    let args_pool = ["a0", "a1"];
    for endpoint in Endpoint::ALL {
        let args = &args_pool[..endpoint.arity()];
        client.resolve(*endpoint, args).await.expect("resolve");
    }

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), Endpoint::ALL.len());
    for (endpoint, request) in Endpoint::ALL.iter().zip(received.iter()) {
        let args = &args_pool[..endpoint.arity()];
        let expected = format!("{}{}", server.uri(), endpoint.format(args).unwrap());
        assert_eq!(request.url.as_str(), expected, "endpoint {endpoint}");
        assert_eq!(
            client.request_url(*endpoint, args).unwrap(),
            expected,
            "endpoint {endpoint}"
        );
    }
}

#[tokio::test]
async fn named_dispatch_resolves_table_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nudge/api/v.1.0/users/@me/sleeps"))
        .and(query_param("start_time", "10"))
        .and(query_param("end_time", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "meta": {"code": 200},
            "data": {"items": [{"xid": "s1", "date": 20140101}], "size": 1}
        })))
        .mount(&server)
        .await;

    let client = client(&server.uri());
    let data = client
        .resolve_named("sleep_list", &["10", "20"])
        .await
        .expect("sleep_list");
    assert_eq!(data["items"][0]["xid"], "s1");
}

#[tokio::test]
async fn unknown_name_fails_without_request() {
    let server = MockServer::start().await;
    let client = client(&server.uri());

    let err = client.resolve_named("workout_snapshots", &["x"]).await.unwrap_err();
    assert!(err.is_endpoint());
    let err = client.resolve_named("meal_snapshot", &["x"]).await.unwrap_err();
    assert!(matches!(err, JawboneError::Endpoint(ref name) if name == "meal_snapshot"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn wrong_argument_count_fails_without_request() {
    let server = MockServer::start().await;
    let client = client(&server.uri());
    let err = client.resolve(Endpoint::MovesList, &["1"]).await.unwrap_err();
    assert!(matches!(err, JawboneError::Format { expected: 2, got: 1, .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_json_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nudge/api/v.1.0/moves/m1/image"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]),
        )
        .mount(&server)
        .await;

    let client = client(&server.uri());
    let err = client.move_image("m1").await.unwrap_err();
    assert!(matches!(err, JawboneError::UnexpectedContentType(ref ct) if ct == "image/png"));
}

#[tokio::test]
async fn json_with_charset_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nudge/api/v.1.0/users/@me/trends"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"data": {"data": [[20140101, {"weight": 70}]]}}"#, "application/json; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let client = client(&server.uri());
    let trends = client.trends().await.expect("trends");
    assert_eq!(trends["data"][0][0], 20140101);
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nudge/api/v.1.0/workouts/w1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such workout"))
        .mount(&server)
        .await;

    let client = client(&server.uri());
    match client.workout("w1").await {
        Err(JawboneError::Status { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such workout");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_envelope_data_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nudge/api/v.1.0/users/@me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"meta": {"code": 200}})))
        .mount(&server)
        .await;

    let client = client(&server.uri());
    assert!(matches!(client.me().await, Err(JawboneError::Envelope(_))));
}

#[tokio::test]
async fn raw_get_follows_absolute_urls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nudge/api/v.1.0/users/@me/moves"))
        .and(query_param("page_token", "123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {"items": []}})))
        .mount(&server)
        .await;

    let client = client(&server.uri());
    let next = format!("{}/nudge/api/v.1.0/users/@me/moves?page_token=123", server.uri());
    let page = client.raw_get(&next).await.expect("page");
    assert_eq!(page["items"], serde_json::json!([]));
}
