//! Integration tests for `HubSpotClient` against a mocked CRM objects API.

use hubspot::HubSpotClient;
use records::{GatewayConfig, RecordFields, RecordGateway, UpstreamError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OBJECT_TYPE: &str = "2-4455";
const TOKEN: &str = "pat-test-token";
const OBJECTS_PATH: &str = "/crm/v3/objects/2-4455";

fn client_for(server: &MockServer) -> HubSpotClient {
    let config = GatewayConfig::from_raw(&server.uri(), TOKEN, OBJECT_TYPE)
        .expect("test config should be valid");
    HubSpotClient::new(config).expect("client should build")
}

fn record_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "properties": {
            "name": name,
            "venue": "Blue Room",
            "date": "2024-05-01",
            "genre": "Jazz",
            "hs_object_id": id
        },
        "createdAt": "2024-04-01T10:00:00.000Z",
        "updatedAt": "2024-04-01T10:00:00.000Z",
        "archived": false
    })
}

// ---------------------------------------------------------------------------
// list_records
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_records_requests_four_properties_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .and(query_param("properties", "name,venue,date,genre"))
        .and(header("authorization", "Bearer pat-test-token"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let records = client_for(&server).list_records().await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_list_records_returns_results_in_received_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                record_json("3", "Charlie"),
                record_json("1", "Alpha"),
                record_json("2", "Bravo")
            ],
            "paging": { "next": { "after": "3" } }
        })))
        .mount(&server)
        .await;

    let records = client_for(&server).list_records().await.unwrap();

    let ids: Vec<_> = records
        .iter()
        .map(|r| r.id.as_ref().unwrap().as_str())
        .collect();
    assert_eq!(ids, ["3", "1", "2"]);
    assert_eq!(records[0].properties.name.as_deref(), Some("Charlie"));
    assert_eq!(records[0].properties.venue.as_deref(), Some("Blue Room"));
}

#[tokio::test]
async fn test_list_records_tolerates_unreadable_timestamp() {
    let server = MockServer::start().await;
    let mut odd = record_json("2", "Bravo");
    odd["createdAt"] = json!("not a date");
    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [record_json("1", "Alpha"), odd]
        })))
        .mount(&server)
        .await;

    let records = client_for(&server).list_records().await.unwrap();

    assert_eq!(records.len(), 2);
    assert!(records[0].created_at.is_some());
    assert_eq!(records[1].created_at, None);
    assert!(records[1].updated_at.is_some());
}

#[tokio::test]
async fn test_list_records_server_error_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{"status":"error","message":"boom"}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).list_records().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.body(), Some(r#"{"status":"error","message":"boom"}"#));
}

#[tokio::test]
async fn test_list_records_unauthorised_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server).list_records().await.unwrap_err();

    assert_eq!(
        err,
        UpstreamError::Status {
            status: 401,
            body: None
        }
    );
}

#[tokio::test]
async fn test_list_records_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBJECTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_records().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Decode { .. }), "got {err:?}");
    assert_eq!(err.body(), Some("not json"));
}

#[tokio::test]
async fn test_list_records_unreachable_host_is_transport_error() {
    // Bind then release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let config = GatewayConfig::from_raw(&uri, TOKEN, OBJECT_TYPE).unwrap();
    let err = HubSpotClient::new(config)
        .unwrap()
        .list_records()
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::Transport { .. }), "got {err:?}");
}

// ---------------------------------------------------------------------------
// create_record
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_record_posts_properties_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OBJECTS_PATH))
        .and(header("authorization", "Bearer pat-test-token"))
        .and(body_json(json!({
            "properties": {
                "name": "Jazz Night",
                "venue": "Blue Room",
                "date": "2024-05-01",
                "genre": "Jazz"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(record_json("77", "Jazz Night")))
        .expect(1)
        .mount(&server)
        .await;

    let fields = RecordFields::new("Jazz Night", "Blue Room", "2024-05-01", "Jazz");
    client_for(&server).create_record(fields).await.unwrap();
}

#[tokio::test]
async fn test_create_record_forwards_empty_name_unmodified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OBJECTS_PATH))
        .and(body_json(json!({
            "properties": { "name": "", "venue": "Hall", "date": "", "genre": "Rock" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(record_json("78", "")))
        .expect(1)
        .mount(&server)
        .await;

    let fields = RecordFields::new("", "Hall", "", "Rock");
    client_for(&server).create_record(fields).await.unwrap();
}

#[tokio::test]
async fn test_create_record_rejection_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OBJECTS_PATH))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"category":"VALIDATION_ERROR","message":"Property values were not valid"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_record(RecordFields::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(err.body().unwrap().contains("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_create_record_succeeds_even_if_response_body_is_unreadable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OBJECTS_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .mount(&server)
        .await;

    let fields = RecordFields::new("a", "b", "c", "d");
    assert!(client_for(&server).create_record(fields).await.is_ok());
}
