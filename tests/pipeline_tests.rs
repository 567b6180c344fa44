//! Integration tests for the request pipeline.
//!
//! These tests drive [`HttpClient::execute`] against a mock server and
//! verify retry behavior, idempotency key reuse, error normalization and
//! rate limiting end to end.

use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yookassa_api::clients::{
    ApiResult, ErrorKind, HttpClient, HttpMethod, IdempotencyKey, RequestDescriptor,
    CANCELLED_CODE,
};
use yookassa_api::{ClientRegistry, Endpoint, SecretKey, ShopId, YookassaConfig};

fn config_for(server: &MockServer, retries: u32, max_rps: u32) -> YookassaConfig {
    YookassaConfig::builder()
        .shop_id(ShopId::new("123456").unwrap())
        .secret_key(SecretKey::new("test_secret").unwrap())
        .endpoint(Endpoint::new(server.uri()).unwrap())
        .retries(retries)
        .max_rps(max_rps)
        .retry_base_delay(Duration::from_millis(10))
        .build()
        .unwrap()
}

fn client_for(server: &MockServer, retries: u32) -> HttpClient {
    HttpClient::new(&config_for(server, retries, 100)).unwrap()
}

fn get_payment(key: Option<&str>) -> RequestDescriptor {
    RequestDescriptor::builder(HttpMethod::Get, "/payments/{payment_id}")
        .path_param("payment_id", "p-1")
        .maybe_idempotency_key(key.map(|k| IdempotencyKey::new(k).unwrap()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_transient_failures_are_retried_with_the_same_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/p-1"))
        .and(header("Idempotence-Key", "stable-key"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/payments/p-1"))
        .and(header("Idempotence-Key", "stable-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server, 5)
        .execute(get_payment(Some("stable-key")))
        .await;

    match result {
        ApiResult::Ok { data, request_id } => {
            assert_eq!(data["id"], "p-1");
            assert_eq!(request_id.as_ref(), "stable-key");
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_generated_key_is_sent_and_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header_exists("Idempotence-Key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server, 0).execute(get_payment(None)).await;

    assert!(result.is_ok());
    assert!(!result.request_id().as_ref().is_empty());
}

#[tokio::test]
async fn test_exhausted_503_synthesizes_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(4)
        .mount(&server)
        .await;

    let result = client_for(&server, 3)
        .execute(get_payment(Some("k-503")))
        .await;

    match result {
        ApiResult::Err {
            error,
            kind,
            request_id,
        } => {
            assert_eq!(kind, ErrorKind::Http);
            assert_eq!(error.code, "service_unavailable");
            assert_eq!(error.id, "k-503");
            assert_eq!(request_id.as_ref(), "k-503");
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_structured_429_is_retried_then_returned_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "type": "error",
            "id": "e-429",
            "code": "too_many_requests",
            "description": "Wait and retry"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let result = client_for(&server, 1).execute(get_payment(None)).await;

    let error = result.into_result().unwrap_err();
    assert_eq!(error.kind, ErrorKind::Api);
    assert_eq!(error.id, "e-429");
    assert_eq!(error.description, "Wait and retry");
}

#[tokio::test]
async fn test_structured_client_error_returns_after_one_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "error",
            "id": "e-401",
            "code": "invalid_credentials",
            "description": "Basic authentication failed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server, 5).execute(get_payment(None)).await;

    assert_eq!(result.error().unwrap().code, "invalid_credentials");
}

#[tokio::test]
async fn test_client_error_without_envelope_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("<html>Bad Gateway Proxy</html>"))
        .expect(3)
        .mount(&server)
        .await;

    let result = client_for(&server, 2).execute(get_payment(None)).await;

    match result {
        ApiResult::Err { error, kind, .. } => {
            assert_eq!(kind, ErrorKind::Http);
            assert_eq!(error.code, "invalid_request");
            assert!(error.description.contains("<html>"));
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_host_synthesizes_network_error() {
    let config = YookassaConfig::builder()
        .shop_id(ShopId::new("123456").unwrap())
        .secret_key(SecretKey::new("test_secret").unwrap())
        .endpoint(Endpoint::new("http://127.0.0.1:1").unwrap())
        .retries(1)
        .retry_base_delay(Duration::from_millis(10))
        .build()
        .unwrap();

    let result = HttpClient::new(&config)
        .unwrap()
        .execute(get_payment(None))
        .await;

    match result {
        ApiResult::Err { error, kind, .. } => {
            assert_eq!(kind, ErrorKind::Network);
            assert!(
                error.code == "connection_error" || error.code == "network_error",
                "unexpected code {}",
                error.code
            );
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_attempt_timeout_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let config = YookassaConfig::builder()
        .shop_id(ShopId::new("123456").unwrap())
        .secret_key(SecretKey::new("test_secret").unwrap())
        .endpoint(Endpoint::new(server.uri()).unwrap())
        .retries(1)
        .timeout(Duration::from_millis(50))
        .retry_base_delay(Duration::from_millis(10))
        .build()
        .unwrap();

    let result = HttpClient::new(&config)
        .unwrap()
        .execute(get_payment(None))
        .await;

    assert_eq!(result.error().unwrap().code, "request_timeout");
}

#[tokio::test]
async fn test_requests_over_max_rps_are_delayed_not_dropped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(4)
        .mount(&server)
        .await;

    let client = Arc::new(HttpClient::new(&config_for(&server, 0, 3)).unwrap());
    let start = Instant::now();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                let result = client.execute(get_payment(None)).await;
                (result.is_ok(), start.elapsed())
            })
        })
        .collect();

    let mut finished = Vec::new();
    for handle in handles {
        let (ok, elapsed) = handle.await.unwrap();
        assert!(ok);
        finished.push(elapsed);
    }
    finished.sort();

    // Slots open every 1/3 s, so the fourth call lands in the next second.
    assert!(finished[3] >= Duration::from_millis(950), "{finished:?}");
}

#[tokio::test]
async fn test_cancellation_abandons_pending_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let result = client
        .execute_with_cancellation(get_payment(Some("k-cancel")), &token)
        .await;

    assert!(start.elapsed() < Duration::from_secs(1));
    match result {
        ApiResult::Err {
            error,
            kind,
            request_id,
        } => {
            assert_eq!(kind, ErrorKind::Cancelled);
            assert_eq!(error.code, CANCELLED_CODE);
            assert_eq!(request_id.as_ref(), "k-cancel");
        }
        other => panic!("expected cancellation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_registry_clients_share_one_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let registry = ClientRegistry::new();
    let config = config_for(&server, 0, 2);
    let start = Instant::now();

    for _ in 0..3 {
        let client = registry.get_or_create(&config).unwrap();
        assert_eq!(client.rate_limiter().max_rps(), 2);
        assert_eq!(
            client.retry_policy().backoff_delay(1),
            Duration::from_millis(20)
        );
        assert!(client.execute(get_payment(None)).await.is_ok());
    }

    // One shared limiter: the third call waits a full second after the first.
    assert!(start.elapsed() >= Duration::from_millis(950));
    assert_eq!(registry.len(), 1);
}
