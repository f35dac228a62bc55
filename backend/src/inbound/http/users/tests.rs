//! Tests for users API handlers.

use super::*;
use crate::domain::ports::{MockCounterCache, MockUserRepository, UserRepository};
use crate::inbound::http::test_utils::test_app;
use crate::outbound::memory::{InMemoryCounterCache, InMemoryUserRepository};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;

#[fixture]
fn memory_state() -> HttpState {
    HttpState::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryCounterCache::new()),
    )
}

fn mock_state(users: MockUserRepository, mode: CreateUserErrorMode) -> HttpState {
    HttpState::new(Arc::new(users), Arc::new(MockCounterCache::new()))
        .with_create_user_errors(mode)
}

async fn send(state: HttpState, request: actix_test::TestRequest) -> ServiceResponse {
    let app = actix_test::init_service(test_app(state)).await;
    actix_test::call_service(&app, request.to_request()).await
}

fn post_users(body: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post().uri("/users").set_json(body)
}

fn violation_fields(body: &Value) -> Vec<&str> {
    body["detail"]
        .as_array()
        .expect("detail is an array of violations")
        .iter()
        .filter_map(|entry| entry["field"].as_str())
        .collect()
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_user(memory_state: HttpState) {
    let res = send(
        memory_state,
        post_users(json!({"email": "ada@example.com", "name": "Ada Lovelace"})),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({"id": 1, "email": "ada@example.com", "name": "Ada Lovelace"})
    );
}

#[rstest]
#[actix_web::test]
async fn create_accepts_internationalised_addresses(memory_state: HttpState) {
    let res = send(
        memory_state,
        post_users(json!({"email": "jörg@example.de", "name": "Jörg"})),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["email"], "jörg@example.de");
}

#[rstest]
#[actix_web::test]
async fn created_users_are_listed(memory_state: HttpState) {
    let app = actix_test::init_service(test_app(memory_state)).await;
    let create = post_users(json!({"email": "ada@example.com", "name": "Ada"})).to_request();
    let created: Value = actix_test::call_and_read_body_json(&app, create).await;

    let list = actix_test::TestRequest::get().uri("/users").to_request();
    let listed: Value = actix_test::call_and_read_body_json(&app, list).await;

    let listed = listed.as_array().expect("list is an array");
    assert!(listed.contains(&created));
}

#[rstest]
#[actix_web::test]
async fn list_is_empty_without_users(memory_state: HttpState) {
    let res = send(memory_state, actix_test::TestRequest::get().uri("/users")).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!([]));
}

#[rstest]
#[case(json!({"name": "Ada"}), &["email"])]
#[case(json!({"email": "ada@example.com"}), &["name"])]
#[case(json!({}), &["email", "name"])]
#[case(json!({"email": "invalid-email", "name": "Ada"}), &["email"])]
#[case(json!({"email": "ada@example.com", "name": "   "}), &["name"])]
#[case(json!({"email": "invalid-email", "name": ""}), &["email", "name"])]
#[case(json!({"name": ""}), &["email", "name"])]
#[actix_web::test]
async fn invalid_payloads_are_unprocessable(#[case] payload: Value, #[case] fields: &[&str]) {
    // No expectations: any repository call fails the test.
    let state = mock_state(MockUserRepository::new(), CreateUserErrorMode::Collapsed);

    let res = send(state, post_users(payload)).await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(violation_fields(&body), fields);
}

#[rstest]
#[case("not json")]
#[case("{\"email\": 42, \"name\": \"Ada\"}")]
#[case("\"just a string\"")]
#[actix_web::test]
async fn malformed_bodies_are_unprocessable(#[case] raw: &'static str) {
    let state = mock_state(MockUserRepository::new(), CreateUserErrorMode::Collapsed);
    let request = actix_test::TestRequest::post()
        .uri("/users")
        .insert_header(("content-type", "application/json"))
        .set_payload(raw);

    let res = send(state, request).await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(violation_fields(&body), ["body"]);
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_rejected_in_memory(memory_state: HttpState) {
    let app = actix_test::init_service(test_app(memory_state)).await;
    let payload = json!({"email": "dup@example.com", "name": "First"});
    let first = actix_test::call_service(&app, post_users(payload.clone()).to_request()).await;
    let second = actix_test::call_service(&app, post_users(payload).to_request()).await;

    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(body, json!({"detail": CREATE_USER_FAILED}));
}

#[rstest]
#[case::duplicate_collapsed(
    UserPersistenceError::duplicate_email("dup@example.com"),
    CreateUserErrorMode::Collapsed,
    StatusCode::BAD_REQUEST,
    CREATE_USER_FAILED
)]
#[case::connection_collapsed(
    UserPersistenceError::connection("refused"),
    CreateUserErrorMode::Collapsed,
    StatusCode::BAD_REQUEST,
    CREATE_USER_FAILED
)]
#[case::duplicate_distinct(
    UserPersistenceError::duplicate_email("dup@example.com"),
    CreateUserErrorMode::Distinct,
    StatusCode::CONFLICT,
    "A user with this email already exists"
)]
#[case::connection_distinct(
    UserPersistenceError::connection("refused"),
    CreateUserErrorMode::Distinct,
    StatusCode::SERVICE_UNAVAILABLE,
    "User store unavailable"
)]
#[case::query_distinct(
    UserPersistenceError::query("syntax error"),
    CreateUserErrorMode::Distinct,
    StatusCode::INTERNAL_SERVER_ERROR,
    "Internal server error"
)]
#[actix_web::test]
async fn create_failures_follow_error_mode(
    #[case] failure: UserPersistenceError,
    #[case] mode: CreateUserErrorMode,
    #[case] status: StatusCode,
    #[case] detail: &str,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .withf(|new_user| new_user.email().as_ref() == "dup@example.com")
        .times(1)
        .return_once(move |_| Err(failure));

    let res = send(
        mock_state(users, mode),
        post_users(json!({"email": "dup@example.com", "name": "Dup"})),
    )
    .await;

    assert_eq!(res.status(), status);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"detail": detail}));
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(UserPersistenceError::query("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn list_failures_map_to_status(
    #[case] failure: UserPersistenceError,
    #[case] status: StatusCode,
) {
    let mut users = MockUserRepository::new();
    users.expect_list().return_once(move || Err(failure));

    let res = send(
        mock_state(users, CreateUserErrorMode::Collapsed),
        actix_test::TestRequest::get().uri("/users"),
    )
    .await;

    assert_eq!(res.status(), status);
    let body: Value = actix_test::read_body_json(res).await;
    assert!(body["detail"].is_string());
}

#[rstest]
#[actix_web::test]
async fn create_trims_email_and_keeps_name() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let state = HttpState::new(repo.clone(), Arc::new(InMemoryCounterCache::new()));

    let res = send(
        state,
        post_users(json!({"email": "  Ada@Example.com ", "name": " Ada "})),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let stored = repo.list().await.expect("list users");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].email().as_ref(), "Ada@Example.com");
    assert_eq!(stored[0].name().as_ref(), " Ada ");
}

#[rstest]
#[actix_web::test]
async fn unknown_routes_are_not_found(memory_state: HttpState) {
    let res = send(memory_state, actix_test::TestRequest::get().uri("/nope")).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"detail": "Not Found"}));
}

#[rstest]
#[case("collapsed", CreateUserErrorMode::Collapsed)]
#[case("distinct", CreateUserErrorMode::Distinct)]
#[case(" Distinct ", CreateUserErrorMode::Distinct)]
fn error_mode_parses(#[case] raw: &str, #[case] expected: CreateUserErrorMode) {
    assert_eq!(raw.parse::<CreateUserErrorMode>(), Ok(expected));
}

#[rstest]
fn error_mode_rejects_unknown_values() {
    assert!("strict".parse::<CreateUserErrorMode>().is_err());
    assert_eq!(CreateUserErrorMode::default(), CreateUserErrorMode::Collapsed);
}
