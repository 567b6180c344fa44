//! Integration tests for the refund and receipt resources.

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yookassa_api::clients::HttpClient;
use yookassa_api::rest::resources::{
    Amount, CreateReceiptParams, CreateRefundParams, Receipt, ReceiptCustomer, ReceiptItem,
    ReceiptListParams, ReceiptStatus, ReceiptType, Refund, RefundListParams, RefundStatus,
    Settlement,
};
use yookassa_api::rest::RestResource;
use yookassa_api::{Endpoint, SecretKey, ShopId, YookassaConfig};

const PAYMENT_ID: &str = "216749da-000f-50be-b000-096747fad91e";
const REFUND_ID: &str = "216749f7-0016-50be-b000-078d43a63ae4";
const RECEIPT_ID: &str = "rt-216749da-000f-50be-b000-096747fad91e";

fn client_for(server: &MockServer) -> HttpClient {
    let config = YookassaConfig::builder()
        .shop_id(ShopId::new("123456").unwrap())
        .secret_key(SecretKey::new("test_secret").unwrap())
        .endpoint(Endpoint::new(server.uri()).unwrap())
        .retries(1)
        .retry_base_delay(Duration::from_millis(10))
        .max_rps(100)
        .build()
        .unwrap();
    HttpClient::new(&config).unwrap()
}

fn refund_json() -> serde_json::Value {
    json!({
        "id": REFUND_ID,
        "payment_id": PAYMENT_ID,
        "status": "succeeded",
        "amount": {"value": "1.00", "currency": "RUB"},
        "created_at": "2024-04-10T09:49:35.138Z",
        "description": "Damaged item"
    })
}

fn receipt_json() -> serde_json::Value {
    json!({
        "id": RECEIPT_ID,
        "type": "payment",
        "payment_id": PAYMENT_ID,
        "status": "pending",
        "items": [{
            "description": "Coffee",
            "quantity": "1.000",
            "amount": {"value": "250.00", "currency": "RUB"},
            "vat_code": 2,
            "payment_subject": "commodity",
            "payment_mode": "full_payment"
        }],
        "settlements": [{"type": "cashless", "amount": {"value": "250.00", "currency": "RUB"}}]
    })
}

// ============================================================================
// Refunds
// ============================================================================

#[tokio::test]
async fn test_create_refund() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/refunds"))
        .and(header_exists("Idempotence-Key"))
        .and(body_json(json!({
            "payment_id": PAYMENT_ID,
            "amount": {"value": "1.00", "currency": "RUB"},
            "description": "Damaged item"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(refund_json()))
        .expect(1)
        .mount(&server)
        .await;

    let params = CreateRefundParams {
        description: Some("Damaged item".to_string()),
        ..CreateRefundParams::new(PAYMENT_ID, Amount::rub("1.00"))
    };
    let refund = Refund::create(&client_for(&server), &params, None)
        .await
        .unwrap();

    assert_eq!(refund.id, REFUND_ID);
    assert_eq!(refund.status, RefundStatus::Succeeded);
}

#[tokio::test]
async fn test_list_refunds_for_payment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/refunds"))
        .and(query_param("payment_id", PAYMENT_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "list",
            "items": [refund_json()]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = Refund::list(
        &client_for(&server),
        Some(RefundListParams {
            payment_id: Some(PAYMENT_ID.to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();

    assert_eq!(page.items.len(), 1);
    assert!(!page.has_next_page());
}

#[tokio::test]
async fn test_refund_info() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/refunds/{REFUND_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(refund_json()))
        .expect(1)
        .mount(&server)
        .await;

    let refund = Refund::info(&client_for(&server), REFUND_ID).await.unwrap();

    assert_eq!(refund.payment_id, PAYMENT_ID);
    assert_eq!(refund.description.as_deref(), Some("Damaged item"));
}

// ============================================================================
// Receipts
// ============================================================================

#[tokio::test]
async fn test_create_receipt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/receipts"))
        .and(header_exists("Idempotence-Key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt_json()))
        .expect(1)
        .mount(&server)
        .await;

    let params = CreateReceiptParams {
        receipt_type: ReceiptType::Payment,
        payment_id: Some(PAYMENT_ID.to_string()),
        refund_id: None,
        customer: ReceiptCustomer {
            email: Some("buyer@example.com".to_string()),
            ..Default::default()
        },
        items: vec![ReceiptItem {
            description: "Coffee".to_string(),
            quantity: json!("1.000"),
            amount: Amount::rub("250.00"),
            vat_code: 2,
            payment_subject: Some("commodity".to_string()),
            payment_mode: Some("full_payment".to_string()),
        }],
        send: true,
        settlements: vec![Settlement {
            settlement_type: "cashless".to_string(),
            amount: Amount::rub("250.00"),
        }],
        tax_system_code: None,
    };

    let receipt = Receipt::create(&client_for(&server), &params, None)
        .await
        .unwrap();

    assert_eq!(receipt.id, RECEIPT_ID);
    assert_eq!(receipt.status, ReceiptStatus::Pending);
    assert_eq!(receipt.items[0].quantity, json!("1.000"));
}

#[tokio::test]
async fn test_list_receipts_for_payment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/receipts"))
        .and(query_param("payment_id", PAYMENT_ID))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "list",
            "items": [receipt_json()],
            "next_cursor": "next"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = Receipt::list(
        &client_for(&server),
        Some(ReceiptListParams {
            payment_id: Some(PAYMENT_ID.to_string()),
            limit: Some(10),
            ..Default::default()
        }),
    )
    .await
    .unwrap();

    assert_eq!(page.items[0].receipt_type, ReceiptType::Payment);
    assert!(page.has_next_page());
}

#[tokio::test]
async fn test_receipt_info() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/receipts/{RECEIPT_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt_json()))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = Receipt::info(&client_for(&server), RECEIPT_ID).await.unwrap();

    assert_eq!(receipt.payment_id.as_deref(), Some(PAYMENT_ID));
    assert_eq!(receipt.settlements.len(), 1);
}
