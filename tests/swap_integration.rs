//! Integration tests for the app-swap flow.
//!
//! These tests drive the swap flow against a mock control plane, covering
//! the clean path, the 412-confirm-retry path, and the decline path.

use std::io::Cursor;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tsuru_client::api::{ApiClient, ApiError};
use tsuru_client::cli::commands::{swap_flow, SwapOutcome};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::with_base(server.uri(), "test-token")
}

#[tokio::test]
async fn swap_succeeds_on_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/swap"))
        .and(query_param("app1", "blue"))
        .and(query_param("app2", "green"))
        .and(query_param("force", "false"))
        .and(query_param("cnameOnly", "false"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut input = Cursor::new(Vec::new());
    let outcome = swap_flow(&client, "blue", "green", false, false, true, &mut input)
        .await
        .unwrap();
    assert_eq!(outcome, SwapOutcome::Swapped);
}

#[tokio::test]
async fn swap_sends_flags_in_the_query() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/swap"))
        .and(query_param("force", "true"))
        .and(query_param("cnameOnly", "true"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut input = Cursor::new(Vec::new());
    swap_flow(&client, "a", "b", true, true, true, &mut input)
        .await
        .unwrap();
}

#[tokio::test]
async fn precondition_failed_with_yes_retries_with_force() {
    let server = MockServer::start().await;
    // Unforced attempt is refused.
    Mock::given(method("PUT"))
        .and(path("/swap"))
        .and(query_param("force", "false"))
        .respond_with(ResponseTemplate::new(412).set_body_string("different units"))
        .expect(1)
        .mount(&server)
        .await;
    // Forced retry goes through.
    Mock::given(method("PUT"))
        .and(path("/swap"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut input = Cursor::new(b"yes\n".to_vec());
    let outcome = swap_flow(&client, "a", "b", false, false, true, &mut input)
        .await
        .unwrap();
    assert_eq!(outcome, SwapOutcome::Swapped);
}

#[tokio::test]
async fn precondition_failed_with_decline_aborts_without_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/swap"))
        .respond_with(ResponseTemplate::new(412).set_body_string("different units"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut input = Cursor::new(b"n\n".to_vec());
    let outcome = swap_flow(&client, "a", "b", false, false, true, &mut input)
        .await
        .unwrap();
    assert_eq!(outcome, SwapOutcome::Aborted);
}

#[tokio::test]
async fn precondition_failed_non_interactive_is_a_hard_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/swap"))
        .respond_with(ResponseTemplate::new(412).set_body_string("different units"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut input = Cursor::new(b"yes\n".to_vec());
    let err = swap_flow(&client, "a", "b", false, false, false, &mut input)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("confirmation"));
}

#[tokio::test]
async fn other_http_errors_surface_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/swap"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut input = Cursor::new(Vec::new());
    let err = swap_flow(&client, "a", "b", false, false, true, &mut input)
        .await
        .unwrap_err();
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Api { status, message }) => {
            assert_eq!(*status, 500);
            assert_eq!(message, "internal error");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn json_error_bodies_are_unwrapped() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/swap"))
        .respond_with(
            ResponseTemplate::new(412).set_body_string(r#"{"Message": "different units"}"#),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.swap("a", "b", false, false).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::PreconditionFailed { message } if message == "different units"
    ));
}
