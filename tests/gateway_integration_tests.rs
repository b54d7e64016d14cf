use std::time::Duration;

use menagerie::core::entity::{Animal, Keeper};
use menagerie::gateway::{
    ApiPayload, ApiRequest, EntityGateway, GatewayError, HttpGateway, TriFilter, execute,
};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn gateway_for(server: &MockServer) -> HttpGateway {
    HttpGateway::new(server.uri(), Some(Duration::from_secs(5)))
}

fn lion_json() -> serde_json::Value {
    json!({
        "id": 1,
        "name": "Leo",
        "weight": 190.5,
        "birthDateTime": "2019-03-15T10:30:00",
        "isWild": true,
        "habitatId": 1001,
        "keeperId": null
    })
}

fn keeper_json() -> serde_json::Value {
    json!({
        "id": 5,
        "firstName": "Ana",
        "lastName": "Ruiz",
        "email": "ana@zoo.test",
        "hireDate": "2015-09-01",
        "specialization": "Mammals",
        "isActive": true,
        "yearsOfExperience": 8
    })
}

// ============================================================================
// Listing and filters
// ============================================================================

#[tokio::test]
async fn test_list_animals_sends_wild_filter() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/animals"))
        .and(query_param("is_wild", "wild"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([lion_json()])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let animals = assert_ok!(gateway_for(&mock_server).list_animals(TriFilter::Only).await);
    assert_eq!(animals.len(), 1);
    assert_eq!(animals[0].name, "Leo");
    assert_eq!(animals[0].habitat_id, Some(1001));
    assert_eq!(animals[0].keeper_id, None);
}

#[tokio::test]
async fn test_list_habitats_covered_filter() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/habitats"))
        .and(query_param("is_covered", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let habitats =
        assert_ok!(gateway_for(&mock_server).list_habitats(TriFilter::Without).await);
    assert!(habitats.is_empty());
}

#[tokio::test]
async fn test_list_keepers_active_filter_through_execute() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keepers"))
        .and(query_param("is_active", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([keeper_json()])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);
    let payload = assert_ok!(execute(&gateway, ApiRequest::ListKeepers(TriFilter::Only)).await);
    match payload {
        ApiPayload::Keepers(keepers) => assert_eq!(keepers[0].full_name(), "Ana Ruiz"),
        other => panic!("unexpected payload {other:?}"),
    }
}

// ============================================================================
// Searches
// ============================================================================

#[tokio::test]
async fn test_search_query_parameters() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/animals/search/by-weight"))
        .and(query_param("min_weight", "100.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([lion_json()])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/animals/search/by-name"))
        .and(query_param("name", "Le"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([lion_json()])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/keepers/search/by-experience"))
        .and(query_param("min_years", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([keeper_json()])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);
    assert_eq!(assert_ok!(gateway.animals_by_weight(100.5).await).len(), 1);
    assert_eq!(assert_ok!(gateway.animals_by_name("Le").await).len(), 1);
    assert_eq!(assert_ok!(gateway.keepers_by_experience(5).await).len(), 1);
}

#[tokio::test]
async fn test_minute_precision_datetime_accepted() {
    let mock_server = MockServer::start().await;
    let mut body = lion_json();
    body["birthDateTime"] = json!("2019-03-15T10:30");
    Mock::given(method("GET"))
        .and(path("/animals/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let animal: Animal = assert_ok!(gateway_for(&mock_server).get_animal(1).await);
    assert_eq!(
        animal.birth_date_time.format("%Y-%m-%d %H:%M").to_string(),
        "2019-03-15 10:30"
    );
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_create_keeper_posts_camel_case_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/keepers"))
        .and(body_json(keeper_json()))
        .respond_with(ResponseTemplate::new(201).set_body_json(keeper_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let keeper: Keeper = serde_json::from_value(keeper_json()).unwrap();
    let created = assert_ok!(gateway_for(&mock_server).create_keeper(&keeper).await);
    assert_eq!(created, keeper);
}

#[tokio::test]
async fn test_assign_keeper_sends_keeper_id() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/animals/1/assign-keeper"))
        .and(body_json(json!({ "keeperId": 5 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert_ok!(gateway_for(&mock_server).assign_keeper(1, 5).await);
}

#[tokio::test]
async fn test_delete_returns_done_payload() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/habitats/1001"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);
    let payload = assert_ok!(
        execute(
            &gateway,
            ApiRequest::delete(menagerie::core::entity::EntityKind::Habitat, 1001)
        )
        .await
    );
    assert_eq!(payload, ApiPayload::Done);
}

// ============================================================================
// Error mapping
// ============================================================================

#[tokio::test]
async fn test_missing_entity_is_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keepers/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = assert_err!(gateway_for(&mock_server).get_keeper(99).await);
    assert_eq!(err, GatewayError::NotFound);
}

#[tokio::test]
async fn test_conflict_carries_server_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/habitats/1001"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Cannot delete habitat: it still has animals assigned"
        })))
        .mount(&mock_server)
        .await;

    let err = assert_err!(gateway_for(&mock_server).delete_habitat(1001).await);
    assert_eq!(
        err,
        GatewayError::conflict("Cannot delete habitat: it still has animals assigned")
    );
}

#[tokio::test]
async fn test_conflict_without_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/animals"))
        .respond_with(ResponseTemplate::new(409).set_body_string("duplicate"))
        .mount(&mock_server)
        .await;

    let animal: Animal = serde_json::from_value(lion_json()).unwrap();
    let err = assert_err!(gateway_for(&mock_server).create_animal(&animal).await);
    assert_eq!(err, GatewayError::Conflict { message: None });
}

#[tokio::test]
async fn test_server_error_keeps_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/animals/with-keepers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let err = assert_err!(gateway_for(&mock_server).animals_with_keepers().await);
    assert_eq!(
        err,
        GatewayError::Status {
            status: 500,
            message: "boom".to_string()
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/habitats/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "not a number" })))
        .mount(&mock_server)
        .await;

    let err = assert_err!(gateway_for(&mock_server).get_habitat(1).await);
    assert!(matches!(err, GatewayError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Nothing listens on the discard port
    let gateway = HttpGateway::new("http://127.0.0.1:9", Some(Duration::from_secs(2)));
    let err = assert_err!(gateway.health().await);
    assert!(matches!(err, GatewayError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn test_health_ok() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "UP" })))
        .mount(&mock_server)
        .await;

    let payload = assert_ok!(execute(&gateway_for(&mock_server), ApiRequest::Health).await);
    assert_eq!(payload, ApiPayload::Healthy);
}
