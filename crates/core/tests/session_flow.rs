//! End-to-end session and mutation flows against a mock Moltbook server.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use moltpass_common::{CredentialStore, MemoryBackend};
use moltpass_core::{AppContext, Session, SessionController, VoteState, VoteTarget};
use moltpass_domain::VoteDirection;
use moltpass_infra::{ApiConfig, MoltbookClient};

fn memory_store() -> Arc<CredentialStore> {
    Arc::new(CredentialStore::new(vec![Box::new(MemoryBackend::new())]))
}

fn context_for(server: &MockServer) -> AppContext {
    AppContext::with_parts(
        ApiConfig { base_url: server.uri(), ..ApiConfig::default() },
        memory_store(),
    )
}

#[tokio::test]
async fn register_then_poll_until_claimed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agents/register"))
        .and(body_json(serde_json::json!({
            "name": "feedbot",
            "description": "test agent"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "agent": {
                "api_key": "k-reg",
                "verification_code": "CODE-7",
                "claim_url": "https://moltbook.test/claim/7"
            }
        })))
        .mount(&server)
        .await;

    // Pending twice, then claimed. Status calls must carry the key from
    // registration.
    Mock::given(method("GET"))
        .and(path("/agents/status"))
        .and(header("Authorization", "Bearer k-reg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "pending_claim"
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/agents/status"))
        .and(header("Authorization", "Bearer k-reg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "claimed"
        })))
        .mount(&server)
        .await;

    let store = memory_store();
    let api = Arc::new(MoltbookClient::new(ApiConfig {
        base_url: server.uri(),
        ..ApiConfig::default()
    }));
    let controller = SessionController::new(
        Arc::clone(&api),
        Arc::clone(&store),
        moltpass_common::NotificationSurface::new(),
    )
    .with_poll_settings(Duration::from_millis(10), 10);

    let credential = controller.register("feedbot", "test agent").await.unwrap();
    assert_eq!(credential.verification_code, "CODE-7");
    assert!(matches!(controller.session().await, Session::PendingClaim { .. }));

    controller.poll_verification(&CancellationToken::new()).await.unwrap();
    assert_eq!(controller.session().await, Session::Authenticated);

    // Credential survives for the next launch
    assert_eq!(store.retrieve("api_key").as_deref(), Some("k-reg"));
}

#[tokio::test]
async fn restart_with_stored_credential_resumes_authenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agents/status"))
        .and(header("Authorization", "Bearer k-stored"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "claimed"
        })))
        .mount(&server)
        .await;

    let store = memory_store();
    store.save("api_key", "k-stored").unwrap();
    store.save("verification_code", "CODE-1").unwrap();

    let context = AppContext::with_parts(
        ApiConfig { base_url: server.uri(), ..ApiConfig::default() },
        store,
    );

    assert_eq!(context.session.check_status().await, Session::Authenticated);
    assert!(context.api.is_authenticated());
}

#[tokio::test]
async fn failed_vote_rolls_back_and_surfaces_a_notification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/p1/vote"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": "rate_limited",
            "retry_after_minutes": 2
        })))
        .mount(&server)
        .await;

    let context = context_for(&server);
    context.api.set_api_key("k1");

    let state = VoteState::new(7, 1);
    let error = context
        .mutations
        .apply_optimistic_vote(&VoteTarget::Post("p1".to_string()), &state, VoteDirection::Up)
        .await
        .unwrap_err();

    assert_eq!(state.upvotes(), 7);
    assert_eq!(state.downvotes(), 1);

    // The caller decides to surface it, mirroring the app's error path
    context.notifications.show(error.user_message());
    assert!(context.notifications.message().unwrap().contains("2 minutes"));
}

#[tokio::test]
async fn sign_out_then_check_status_makes_no_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agents/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "claimed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = memory_store();
    store.save("api_key", "k1").unwrap();

    let context = AppContext::with_parts(
        ApiConfig { base_url: server.uri(), ..ApiConfig::default() },
        store,
    );

    assert_eq!(context.session.check_status().await, Session::Authenticated);

    context.session.sign_out().await;
    assert_eq!(context.session.check_status().await, Session::Unauthenticated);
    // The mock's expect(1) verifies on drop that only the first check hit
    // the network.
}
