//! Webhook end-to-end handler tests

use std::sync::Arc;

use actix_http::StatusCode;
use actix_web::{
    dev::ServiceResponse,
    test,
    web::{self, Data},
    App, HttpResponse,
};
use hmac::{Mac, SimpleHmac};
use mergewatch_config::Config;
use mergewatch_ghapi_interface::{
    types::{GhChangedFile, GhPullRequest},
    ApiError, MockApiService,
};
use mergewatch_secrets_interface::{MockSecretsService, SecretsError, SecretsService};
use pretty_assertions::assert_eq;
use sha2::Sha256;

use super::fixtures;
use crate::{
    constants::{GITHUB_EVENT_HEADER, GITHUB_SIGNATURE_HEADER},
    middlewares::VerifySignature,
    server::AppContext,
    webhook::configure_webhook_handlers,
};

const WEBHOOK_SECRET_ID: &str = "github-webhook-secret";
const WEBHOOK_SECRET: &str = "iAmAsEcReTkEy";

fn arrange_config() -> Config {
    let mut config = Config::from_env_no_version();
    config.server.disable_webhook_signature = false;
    config.secrets.webhook_secret_id = WEBHOOK_SECRET_ID.into();
    config
}

fn arrange_secrets_service() -> MockSecretsService {
    let mut secrets_service = MockSecretsService::new();
    secrets_service
        .expect_secret_get()
        .withf(|id| id == WEBHOOK_SECRET_ID)
        .returning(|_| Ok(WEBHOOK_SECRET.into()));
    secrets_service
}

fn signature_for(body: &str) -> String {
    let mut hmac = SimpleHmac::<Sha256>::new_from_slice(WEBHOOK_SECRET.as_bytes()).unwrap();
    hmac.update(body.as_bytes());
    format!("sha256={}", hex::encode(hmac.finalize().into_bytes()))
}

async fn send_event(
    api_service: MockApiService,
    secrets_service: MockSecretsService,
    event_type: Option<&str>,
    body: &str,
    signature: Option<String>,
) -> (StatusCode, serde_json::Value) {
    let config = arrange_config();
    let secrets_service: Arc<dyn SecretsService> = Arc::new(secrets_service);
    let context = Data::new(AppContext::new_with_adapters(
        config.clone(),
        secrets_service.clone(),
        Box::new(api_service),
    ));

    let app = test::init_service(
        App::new().app_data(context).service(
            web::scope("/webhook")
                .wrap(VerifySignature::new(&config, secrets_service))
                .configure(configure_webhook_handlers),
        ),
    )
    .await;

    let mut request = test::TestRequest::post()
        .uri("/webhook")
        .set_payload(body.to_owned());
    if let Some(event_type) = event_type {
        request = request.insert_header((GITHUB_EVENT_HEADER, event_type));
    }
    if let Some(signature) = signature {
        request = request.insert_header((GITHUB_SIGNATURE_HEADER, signature));
    }

    let response = match test::try_call_service(&app, request.to_request()).await {
        Ok(response) => response.map_into_boxed_body(),
        // Middleware failures surface as service errors; render them the way
        // the HTTP layer would.
        Err(error) => ServiceResponse::new(
            test::TestRequest::default().to_http_request(),
            HttpResponse::from_error(error),
        ),
    };

    let status = response.status();
    let body: serde_json::Value = test::read_body_json(response).await;
    (status, body)
}

#[actix_rt::test]
async fn test_ping_event() {
    let signature = signature_for(fixtures::PING_EVENT_DATA);
    let (status, body) = send_event(
        MockApiService::new(),
        arrange_secrets_service(),
        Some("ping"),
        fixtures::PING_EVENT_DATA,
        Some(signature),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"message": "pong"}));
}

#[actix_rt::test]
async fn test_ping_event_with_arbitrary_body() {
    let body_data = r#"{"anything": true}"#;
    let signature = signature_for(body_data);
    let (status, body) = send_event(
        MockApiService::new(),
        arrange_secrets_service(),
        Some("ping"),
        body_data,
        Some(signature),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"message": "pong"}));
}

#[actix_rt::test]
async fn test_ping_event_with_unprefixed_signature() {
    let signature = signature_for(fixtures::PING_EVENT_DATA);
    let unprefixed = signature.trim_start_matches("sha256=").to_owned();
    let (status, body) = send_event(
        MockApiService::new(),
        arrange_secrets_service(),
        Some("ping"),
        fixtures::PING_EVENT_DATA,
        Some(unprefixed),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"message": "pong"}));
}

#[actix_rt::test]
async fn test_invalid_signature() {
    let signature = format!("{}0", signature_for(fixtures::PING_EVENT_DATA));
    let (status, body) = send_event(
        MockApiService::new(),
        arrange_secrets_service(),
        Some("ping"),
        fixtures::PING_EVENT_DATA,
        Some(signature),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, serde_json::json!({"Error": "Unauthorized attempt"}));
}

#[actix_rt::test]
async fn test_invalid_signature_stops_processing() {
    // A flipped digit in an otherwise valid signature must reject the merged
    // event without any API-service or token-store call.
    let mut signature = signature_for(fixtures::PULL_REQUEST_MERGED_DATA);
    let last = if signature.ends_with('0') { "1" } else { "0" };
    signature.replace_range(signature.len() - 1.., last);

    let (status, body) = send_event(
        MockApiService::new(),
        arrange_secrets_service(),
        Some("pull_request"),
        fixtures::PULL_REQUEST_MERGED_DATA,
        Some(signature),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, serde_json::json!({"Error": "Unauthorized attempt"}));
}

#[actix_rt::test]
async fn test_missing_signature() {
    let (status, body) = send_event(
        MockApiService::new(),
        MockSecretsService::new(),
        Some("ping"),
        fixtures::PING_EVENT_DATA,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"Error": "Internal server error"}));
}

#[actix_rt::test]
async fn test_secret_resolution_failure() {
    let mut secrets_service = MockSecretsService::new();
    secrets_service
        .expect_secret_get()
        .times(1)
        .returning(|id| {
            Err(SecretsError::MissingSecret {
                id: id.to_string(),
            })
        });

    let signature = signature_for(fixtures::PING_EVENT_DATA);
    let (status, body) = send_event(
        MockApiService::new(),
        secrets_service,
        Some("ping"),
        fixtures::PING_EVENT_DATA,
        Some(signature),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"Error": "Internal server error"}));
}

#[actix_rt::test]
async fn test_pull_request_merged_event() {
    let mut api_service = MockApiService::new();
    api_service
        .expect_pulls_get()
        .times(1)
        .withf(|owner, name, number| owner == "Example" && name == "test-repo" && *number == 1214)
        .returning(|_, _, number| {
            Ok(GhPullRequest {
                number,
                merged: Some(true),
                ..Default::default()
            })
        });
    api_service
        .expect_pulls_files_list()
        .times(1)
        .withf(|owner, name, number| owner == "Example" && name == "test-repo" && *number == 1214)
        .returning(|_, _, _| {
            Ok(vec![
                GhChangedFile {
                    filename: "src/lib.rs".into(),
                    ..Default::default()
                },
                GhChangedFile {
                    filename: "README.md".into(),
                    ..Default::default()
                },
            ])
        });

    let signature = signature_for(fixtures::PULL_REQUEST_MERGED_DATA);
    let (status, body) = send_event(
        api_service,
        arrange_secrets_service(),
        Some("pull_request"),
        fixtures::PULL_REQUEST_MERGED_DATA,
        Some(signature),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"message": "The webhook was successfully received"})
    );
}

#[actix_rt::test]
async fn test_pull_request_opened_event() {
    // No API-service expectation is registered: any call would fail the test.
    let signature = signature_for(fixtures::PULL_REQUEST_OPENED_DATA);
    let (status, body) = send_event(
        MockApiService::new(),
        arrange_secrets_service(),
        Some("pull_request"),
        fixtures::PULL_REQUEST_OPENED_DATA,
        Some(signature),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"message": "Not merged event"}));
}

#[actix_rt::test]
async fn test_pull_request_api_failure() {
    let mut api_service = MockApiService::new();
    api_service
        .expect_pulls_get()
        .times(1)
        .returning(|_, _, number| {
            Err(ApiError::PullRequestNotFound {
                pr_number: number,
                repository_path: "Example/test-repo".into(),
            })
        });

    let signature = signature_for(fixtures::PULL_REQUEST_MERGED_DATA);
    let (status, body) = send_event(
        api_service,
        arrange_secrets_service(),
        Some("pull_request"),
        fixtures::PULL_REQUEST_MERGED_DATA,
        Some(signature),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"Error": "Internal server error"}));
}

#[actix_rt::test]
async fn test_unsupported_event() {
    let body_data = r#"{"action": "completed"}"#;
    let signature = signature_for(body_data);
    let (status, body) = send_event(
        MockApiService::new(),
        arrange_secrets_service(),
        Some("check_suite"),
        body_data,
        Some(signature),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"Error": "Internal server error"}));
}

#[actix_rt::test]
async fn test_missing_event_header() {
    let signature = signature_for(fixtures::PING_EVENT_DATA);
    let (status, body) = send_event(
        MockApiService::new(),
        arrange_secrets_service(),
        None,
        fixtures::PING_EVENT_DATA,
        Some(signature),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"Error": "Internal server error"}));
}

#[actix_rt::test]
async fn test_malformed_pull_request_payload() {
    let body_data = r#"{"zen": "Anything added dilutes everything else."}"#;
    let signature = signature_for(body_data);
    let (status, body) = send_event(
        MockApiService::new(),
        arrange_secrets_service(),
        Some("pull_request"),
        body_data,
        Some(signature),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"Error": "Internal server error"}));
}
