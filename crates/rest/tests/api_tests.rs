//! End-to-end tests of the HTTP API over an in-memory SQLite backend.

use axum_test::TestServer;
use petstore_persistence::SqliteBackend;
use petstore_rest::{ServerConfig, create_app_with_config};
use serde_json::{Value, json};

fn test_server() -> TestServer {
    let backend = SqliteBackend::in_memory().unwrap();
    let app = create_app_with_config(backend, ServerConfig::for_testing());
    TestServer::new(app).unwrap()
}

async fn create_pet(server: &TestServer, name: &str, tag: Option<&str>) -> Value {
    let mut body = json!({ "name": name });
    if let Some(tag) = tag {
        body["tag"] = json!(tag);
    }
    let response = server.post("/pets").json(&body).await;
    response.assert_status(http::StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = test_server();
    let response = server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "sqlite");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let server = test_server();
    let response = server.get("/openapi.json").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["openapi"], "3.0.3");
    assert!(body["paths"]["/pets"]["get"].is_object());
}

#[tokio::test]
async fn test_create_returns_201_with_location_and_links() {
    let server = test_server();
    let response = server
        .post("/pets")
        .json(&json!({
            "name": "Rex",
            "tag": "dog",
            "vaccinations": [{ "name": "rabies" }]
        }))
        .await;

    response.assert_status(http::StatusCode::CREATED);

    let body = response.json::<Value>();
    let id = body["id"].as_str().unwrap();
    assert!(!id.is_empty());
    assert_eq!(body["name"], "Rex");
    assert_eq!(body["tag"], "dog");
    assert_eq!(body["vaccinations"][0]["name"], "rabies");
    assert!(body["createdAt"].is_string());
    assert!(body.get("updatedAt").is_none());

    let expected_href = format!("/pets/{id}");
    assert_eq!(body["_links"]["read"]["href"], expected_href.as_str());
    assert_eq!(body["_links"]["read"]["method"], "GET");
    assert_eq!(body["_links"]["update"]["method"], "PUT");
    assert_eq!(body["_links"]["delete"]["method"], "DELETE");

    let location = response.header("location");
    let location = location.to_str().unwrap();
    assert!(location.ends_with(&expected_href));
}

#[tokio::test]
async fn test_create_with_empty_name_is_400() {
    let server = test_server();
    let response = server.post("/pets").json(&json!({ "name": "  " })).await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "invalid");
    assert_eq!(body["error"]["fields"][0]["field"], "name");
}

#[tokio::test]
async fn test_create_with_empty_vaccination_name_is_400() {
    let server = test_server();
    let response = server
        .post("/pets")
        .json(&json!({
            "name": "Rex",
            "vaccinations": [{ "name": "rabies" }, { "name": "" }]
        }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["fields"][0]["field"], "vaccinations[1].name");
}

#[tokio::test]
async fn test_read_round_trip() {
    let server = test_server();
    let created = create_pet(&server, "Rex", Some("dog")).await;
    let id = created["id"].as_str().unwrap();

    let response = server.get(&format!("/pets/{id}")).await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["name"], "Rex");
    assert_eq!(body["_links"]["read"]["href"], format!("/pets/{id}").as_str());
}

#[tokio::test]
async fn test_read_missing_is_404() {
    let server = test_server();
    let response = server.get("/pets/no-such-id").await;

    response.assert_status_not_found();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "not-found");
}

#[tokio::test]
async fn test_update_replaces_state_and_stamps_updated_at() {
    let server = test_server();
    let created = create_pet(&server, "Rex", Some("dog")).await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .put(&format!("/pets/{id}"))
        .json(&json!({ "name": "Rexford" }))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["name"], "Rexford");
    // Full replacement: the tag from the create is gone.
    assert!(body.get("tag").is_none());
    assert_eq!(body["createdAt"], created["createdAt"]);
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn test_update_missing_is_404() {
    let server = test_server();
    let response = server
        .put("/pets/no-such-id")
        .json(&json!({ "name": "Rex" }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_update_invalid_body_is_400() {
    let server = test_server();
    let created = create_pet(&server, "Rex", None).await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .put(&format!("/pets/{id}"))
        .json(&json!({ "name": "" }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_delete_then_read_is_404() {
    let server = test_server();
    let created = create_pet(&server, "Rex", None).await;
    let id = created["id"].as_str().unwrap();

    let response = server.delete(&format!("/pets/{id}")).await;
    response.assert_status(http::StatusCode::NO_CONTENT);

    server.get(&format!("/pets/{id}")).await.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_missing_is_404() {
    let server = test_server();
    server.delete("/pets/no-such-id").await.assert_status_not_found();
}

#[tokio::test]
async fn test_list_envelope_echoes_query() {
    let server = test_server();
    create_pet(&server, "Rex", Some("dog")).await;
    create_pet(&server, "Buddy", Some("dog")).await;
    create_pet(&server, "Whiskers", Some("cat")).await;

    let response = server
        .get("/pets?offset=1&limit=1&filters[tag]=dog&sort[name]=asc")
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["offset"], 1);
    assert_eq!(body["limit"], 1);
    assert_eq!(body["filters"]["tag"], "dog");
    assert_eq!(body["sort"]["name"], "asc");
    assert_eq!(body["count"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["name"], "Rex");
}

#[tokio::test]
async fn test_list_items_carry_their_own_links() {
    let server = test_server();
    let created = create_pet(&server, "Rex", None).await;
    let id = created["id"].as_str().unwrap();

    let body = server.get("/pets").await.json::<Value>();
    assert_eq!(
        body["items"][0]["_links"]["read"]["href"],
        format!("/pets/{id}").as_str()
    );
    assert_eq!(body["_links"]["create"]["href"], "/pets");
    assert_eq!(body["_links"]["create"]["method"], "POST");
}

#[tokio::test]
async fn test_empty_list_still_carries_create_link() {
    let server = test_server();
    let body = server.get("/pets").await.json::<Value>();

    assert_eq!(body["count"], 0);
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
    assert_eq!(body["_links"]["create"]["href"], "/pets");
}

#[tokio::test]
async fn test_list_count_survives_pagination_past_the_end() {
    let server = test_server();
    create_pet(&server, "Rex", None).await;
    create_pet(&server, "Buddy", None).await;

    let body = server.get("/pets?offset=50").await.json::<Value>();
    assert_eq!(body["count"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
    assert_eq!(body["offset"], 50);
}

#[tokio::test]
async fn test_list_multi_key_sort() {
    let server = test_server();
    create_pet(&server, "Rex", Some("dog")).await;
    create_pet(&server, "Whiskers", Some("cat")).await;
    create_pet(&server, "Buddy", Some("dog")).await;

    let body = server
        .get("/pets?sort[tag]=asc&sort[name]=asc")
        .await
        .json::<Value>();
    let names: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Whiskers", "Buddy", "Rex"]);
}

#[tokio::test]
async fn test_list_unknown_filter_field_is_400_naming_the_key() {
    let server = test_server();
    let response = server.get("/pets?filters[color]=brown").await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "invalid");
    assert_eq!(body["error"]["fields"][0]["field"], "filters[color]");
}

#[tokio::test]
async fn test_list_unknown_sort_field_is_400_naming_the_key() {
    let server = test_server();
    let response = server.get("/pets?sort[weight]=asc").await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["fields"][0]["field"], "sort[weight]");
}

#[tokio::test]
async fn test_list_bad_sort_direction_is_400() {
    let server = test_server();
    let response = server.get("/pets?sort[name]=sideways").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_absent_optionals_never_rendered_as_null() {
    let server = test_server();
    create_pet(&server, "Rex", None).await;

    let body = server.get("/pets").await.json::<Value>();
    let item = &body["items"][0];
    assert!(item.get("tag").is_none());
    assert!(item.get("updatedAt").is_none());
    assert!(item.get("vaccinations").is_none());
}
