use std::time::Duration;

use assert_matches::assert_matches;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use shared_backend::{ApiResource, ResourceClient, ResourceError};

const TOKEN: &str = "access-token-123";

#[tokio::test]
async fn test_get_sends_raw_token_and_parses_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/patients/"))
        .and(header("Authorization", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "patient_id": "42", "name": "J. Doe" }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ResourceClient::with_base_url(&mock_server.uri());
    let patients: Vec<Value> = client.get(&ApiResource::Patients, TOKEN).await.unwrap();

    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0]["name"], "J. Doe");
}

#[tokio::test]
async fn test_get_carries_no_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/settings/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = ResourceClient::with_base_url(&mock_server.uri());
    client.request(Method::GET, &ApiResource::Settings, TOKEN, None).await.unwrap();

    let received: Vec<Request> = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("content-type").is_none());
}

#[tokio::test]
async fn test_post_sets_json_content_type() {
    let mock_server = MockServer::start().await;
    let body = json!({ "name": "prior_period", "value": "30" });

    Mock::given(method("POST"))
        .and(path("/api/settings/prior_period"))
        .and(header("Authorization", TOKEN))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ResourceClient::with_base_url(&mock_server.uri());
    let echoed = client
        .post(&ApiResource::Setting("prior_period".into()), TOKEN, &body)
        .await
        .unwrap();

    assert_eq!(echoed, body);
}

#[tokio::test]
async fn test_put_accepts_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/appointments/a-1"))
        .and(header_exists("Content-Type"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = ResourceClient::with_base_url(&mock_server.uri());
    let result = client
        .put(&ApiResource::Appointment("a-1".into()), TOKEN, &json!({ "id": "a-1" }))
        .await
        .unwrap();

    assert_eq!(result, Value::Null);
}

#[tokio::test]
async fn test_delete_succeeds_only_on_204() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/appointments/gone"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/appointments/ok-but-200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = ResourceClient::with_base_url(&mock_server.uri());

    assert!(client.delete(&ApiResource::Appointment("gone".into()), TOKEN).await.is_ok());
    assert_matches!(
        client.delete(&ApiResource::Appointment("ok-but-200".into()), TOKEN).await,
        Err(ResourceError::Status(StatusCode::OK))
    );
}

#[tokio::test]
async fn test_non_200_is_uniform_failure_without_body_parsing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/appointments/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Forbidden" })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/patients/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = ResourceClient::with_base_url(&mock_server.uri());

    assert_matches!(
        client.get::<Value>(&ApiResource::Appointments, TOKEN).await,
        Err(ResourceError::Status(StatusCode::FORBIDDEN))
    );
    assert_matches!(
        client.get::<Value>(&ApiResource::Dashboard, TOKEN).await,
        Err(ResourceError::Status(StatusCode::INTERNAL_SERVER_ERROR))
    );
    assert_matches!(
        client.get::<Value>(&ApiResource::Patients, TOKEN).await,
        Err(ResourceError::Status(StatusCode::CREATED))
    );
}

#[tokio::test]
async fn test_invalid_json_is_decode_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/patients/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let client = ResourceClient::with_base_url(&mock_server.uri());
    assert_matches!(
        client.get::<Value>(&ApiResource::Patients, TOKEN).await,
        Err(ResourceError::Decode(_))
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_failure() {
    let client = ResourceClient::with_base_url("http://127.0.0.1:1");
    assert_matches!(
        client.get::<Value>(&ApiResource::Patients, TOKEN).await,
        Err(ResourceError::Transport(_))
    );
}

// The client has no timeout of its own; a slow backend is simply waited on.
#[tokio::test]
async fn test_slow_response_is_awaited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let client = ResourceClient::with_base_url(&format!("{}/", mock_server.uri()));
    let rows: Vec<Value> = client.get(&ApiResource::Dashboard, TOKEN).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_token_with_newline_is_rejected_locally() {
    let client = ResourceClient::with_base_url("http://127.0.0.1:1");
    assert_matches!(
        client.get::<Value>(&ApiResource::Patients, "bad\ntoken").await,
        Err(ResourceError::InvalidToken)
    );
}
