#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

mod common;

use std::{str::FromStr, sync::Arc};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{orders, spawn_mock_processor, BROKEN_COMPANY_ID, TEST_TOKEN};
use common_utils::Method;
use connector_integration::{access_token::TokenClient, connectors::Shurjopay};
use domain_types::{
    connector_types::{
        BuildProcessRequest, CallbackParams, ClientRecord, ContactInfo, ContactLocation,
        ContactNumber, ContactNumberType, InvoiceRef, TransactionStatus,
    },
    errors::ConnectorError,
    router_response_types::RedirectForm,
};
use gateway_server::{app, http::AppState};
use http_body_util::BodyExt;
use hyperswitch_masking::{PeekInterface, Secret};
use interfaces::{api::ConnectorCommon, connector_types::NonmerchantGateway};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

const VERIFICATION_USER_AGENT: &str = "Mozilla/0 (Windows; U; Windows NT 0; zh-CN; rv:3)";

fn build_request() -> BuildProcessRequest {
    BuildProcessRequest {
        contact_info: ContactInfo {
            client_id: Some("42".to_string()),
            first_name: Some("Rahim".to_string()),
            last_name: Some("Uddin".to_string()),
        },
        client: ClientRecord {
            id: Some("42".to_string()),
            email: Some("rahim@example.test".to_string()),
            address1: Some("House 7, Road 3".to_string()),
            city: Some("Dhaka".to_string()),
            country: Some("Bangladesh".to_string()),
            contact_numbers: vec![ContactNumber {
                number: "+880 1711-000000".to_string(),
                number_type: ContactNumberType::Phone,
                location: ContactLocation::Mobile,
            }],
            ..Default::default()
        },
        amount: Decimal::from_str("10.1").unwrap(),
        currency: "BDT".to_string(),
        invoices: vec![InvoiceRef::new("10", "5.00"), InvoiceRef::new("11", "5.10")],
        return_url: Some("https://billing.test/gateway/return?client_id=42&gateway=shurjopay".to_string()),
        client_ip: Some("203.0.113.9".to_string()),
    }
}

fn callback(order_id: &str) -> CallbackParams {
    CallbackParams {
        order_id: Some(order_id.to_string()),
        client_id: Some("42".to_string()),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---- token ----

#[tokio::test]
async fn test_token_is_issued_for_valid_credentials() {
    let mock = spawn_mock_processor().await;
    let ctx = mock.context();
    let base_url = Shurjopay::new().base_url(&ctx.connectors, true);

    let token = TokenClient::new(&ctx)
        .fetch_token(&ctx.settings, &base_url)
        .await
        .unwrap();

    assert_eq!(token.token.peek(), TEST_TOKEN);
    assert_eq!(token.store_id.as_deref(), Some("1"));
    let recorded = mock.recorded();
    assert_eq!(recorded.token_requests.len(), 1);
    assert_eq!(recorded.token_requests[0]["username"], "sp_sandbox");
    assert_eq!(recorded.token_requests[0]["password"], "pyyk97hu&6u6");
}

#[tokio::test]
async fn test_rejected_credentials_are_an_auth_error() {
    let mock = spawn_mock_processor().await;
    let mut settings = mock.settings();
    settings.store_password = Secret::new("wrong".to_string());
    let ctx = mock.context_with(settings, "7");

    let error = Shurjopay::new()
        .build_process(&ctx, build_request())
        .await
        .unwrap_err();

    assert_eq!(error.current_context(), &ConnectorError::AuthError);
    assert!(mock.recorded().checkout_requests.is_empty());
}

#[tokio::test]
async fn test_blank_credentials_fail_before_any_call() {
    let mock = spawn_mock_processor().await;
    let mut settings = mock.settings();
    settings.store_id = Secret::new("  ".to_string());
    let ctx = mock.context_with(settings, "7");

    let error = Shurjopay::new()
        .build_process(&ctx, build_request())
        .await
        .unwrap_err();

    assert_eq!(
        error.current_context(),
        &ConnectorError::ConfigError {
            field_name: "store_id"
        }
    );
    assert!(mock.recorded().token_requests.is_empty());
}

#[tokio::test]
async fn test_unreachable_processor_is_an_api_error() {
    let mock = spawn_mock_processor().await;
    let mut ctx = mock.context();
    ctx.connectors.shurjopay.sandbox_base_url = "http://127.0.0.1:9/".to_string();

    let error = Shurjopay::new()
        .validate(&ctx, callback(orders::APPROVED))
        .await
        .unwrap_err();

    assert!(matches!(
        error.current_context(),
        ConnectorError::ApiError {
            status_code: None,
            ..
        }
    ));
}

// ---- checkout ----

#[tokio::test]
async fn test_build_process_returns_checkout_redirect() {
    let mock = spawn_mock_processor().await;
    let ctx = mock.context();

    let form = Shurjopay::new()
        .build_process(&ctx, build_request())
        .await
        .unwrap();

    let RedirectForm::Form {
        endpoint,
        method,
        form_fields,
    } = form;
    assert_eq!(endpoint, format!("{}/spaycheckout/", mock.base_url));
    assert_eq!(method, Method::Get);
    assert_eq!(form_fields[0], ("token".to_string(), "checkout-abc".to_string()));

    let recorded = mock.recorded();
    assert_eq!(recorded.token_requests.len(), 1);
    assert_eq!(recorded.checkout_authorization, vec![format!("Bearer {TEST_TOKEN}")]);

    let body = &recorded.checkout_requests[0];
    let order_id = body["order_id"].as_str().unwrap();
    assert!(order_id.starts_with("SP"));
    assert_eq!(form_fields[1], ("order_id".to_string(), order_id.to_string()));
    assert_eq!(body["token"], TEST_TOKEN);
    assert_eq!(body["store_id"], "1");
    assert_eq!(body["amount"], "10.10");
    assert_eq!(body["currency"], "BDT");
    assert_eq!(
        body["return_url"],
        "https://billing.test/gateway/return?gateway=shurjopay"
    );
    assert_eq!(body["cancel_url"], body["return_url"]);
    assert_eq!(body["prefix"], "SP");
    assert_eq!(body["discsount_amount"], 0);
    assert_eq!(body["disc_percent"], 0);
    assert_eq!(body["client_ip"], "203.0.113.9");
    assert_eq!(body["customer_name"], "Rahim Uddin");
    assert_eq!(body["customer_phone"], "8801711000000");
    assert_eq!(body["customer_email"], "rahim@example.test");
    assert_eq!(body["customer_address"], "House 7, Road 3");
    assert_eq!(body["customer_city"], "Dhaka");
    assert_eq!(body["customer_state"], "no state");
    assert_eq!(body["customer_postcode"], "no zip");
    assert_eq!(body["customer_country"], "Bangladesh");
    assert_eq!(body["value1"], "10=5.00|11=5.10");
    assert_eq!(body["value2"], "42");
    assert_eq!(body["value3"], "value3");
    assert_eq!(body["value4"], "value4");
}

#[tokio::test]
async fn test_every_checkout_gets_a_fresh_token_and_order_id() {
    let mock = spawn_mock_processor().await;
    let ctx = mock.context();
    let connector = Shurjopay::new();

    connector.build_process(&ctx, build_request()).await.unwrap();
    connector.build_process(&ctx, build_request()).await.unwrap();

    let recorded = mock.recorded();
    assert_eq!(recorded.token_requests.len(), 2);
    assert_ne!(
        recorded.checkout_requests[0]["order_id"],
        recorded.checkout_requests[1]["order_id"]
    );
}

#[tokio::test]
async fn test_missing_return_url_is_rejected_locally() {
    let mock = spawn_mock_processor().await;
    let mut request = build_request();
    request.return_url = None;

    let error = Shurjopay::new()
        .build_process(&mock.context(), request)
        .await
        .unwrap_err();

    assert_eq!(
        error.current_context(),
        &ConnectorError::MissingRequiredField {
            field_name: "return_url"
        }
    );
    assert!(mock.recorded().token_requests.is_empty());
}

// ---- verification ----

#[tokio::test]
async fn test_validate_approved_payment() {
    let mock = spawn_mock_processor().await;

    let result = Shurjopay::new()
        .validate(&mock.context(), callback(orders::APPROVED))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(result.status, TransactionStatus::Approved);
    assert_eq!(result.client_id.as_deref(), Some("42"));
    assert_eq!(result.amount.as_deref(), Some("10.10"));
    assert_eq!(result.currency.as_deref(), Some("BDT"));
    assert_eq!(result.reference_id.as_deref(), Some("BTX-77"));
    assert_eq!(result.transaction_id.as_deref(), Some(orders::APPROVED));
    assert_eq!(
        result.invoices,
        vec![InvoiceRef::new("10", "5.00"), InvoiceRef::new("11", "5.10")]
    );

    let recorded = mock.recorded();
    assert_eq!(recorded.verification_requests, vec![json!({"order_id": orders::APPROVED})]);
    assert_eq!(recorded.verification_user_agents, vec![VERIFICATION_USER_AGENT]);
    assert!(recorded.notifications.is_empty());
}

#[tokio::test]
async fn test_validate_canceled_and_failed_payments() {
    let mock = spawn_mock_processor().await;
    let ctx = mock.context();
    let connector = Shurjopay::new();

    for (order_id, expected) in [
        (orders::CANCELED, ConnectorError::PaymentCanceled),
        (orders::CANCELED_BY_CUSTOMER, ConnectorError::PaymentCanceled),
        (orders::FAILED, ConnectorError::PaymentFailed),
    ] {
        let error = connector
            .validate(&ctx, callback(order_id))
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &expected, "order {order_id}");
    }
}

#[tokio::test]
async fn test_validate_without_outcome_yields_nothing() {
    let mock = spawn_mock_processor().await;
    let ctx = mock.context();
    let connector = Shurjopay::new();

    assert!(connector
        .validate(&ctx, callback(orders::PENDING))
        .await
        .unwrap()
        .is_none());
    assert!(connector
        .validate(&ctx, callback("SP-UNKNOWN"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_validate_rejects_non_array_verification() {
    let mock = spawn_mock_processor().await;

    let error = Shurjopay::new()
        .validate(&mock.context(), callback(orders::NOT_AN_ARRAY))
        .await
        .unwrap_err();

    assert!(matches!(
        error.current_context(),
        ConnectorError::ApiError {
            status_code: Some(200),
            ..
        }
    ));
}

#[tokio::test]
async fn test_validate_requires_order_id() {
    let mock = spawn_mock_processor().await;

    let error = Shurjopay::new()
        .validate(&mock.context(), CallbackParams::default())
        .await
        .unwrap_err();

    assert_eq!(
        error.current_context(),
        &ConnectorError::MissingRequiredField {
            field_name: "order_id"
        }
    );
    assert!(mock.recorded().token_requests.is_empty());
}

// ---- success and notification ----

#[tokio::test]
async fn test_success_notifies_host_once_approved() {
    let mock = spawn_mock_processor().await;

    let result = Shurjopay::new()
        .success(&mock.context(), callback(orders::APPROVED))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(result.status, TransactionStatus::Approved);
    let recorded = mock.recorded();
    assert_eq!(
        recorded.notifications,
        vec![("7".to_string(), Some(orders::APPROVED.to_string()))]
    );
    assert!(recorded.notification_user_agents[0].starts_with("Mozilla/5.0"));
}

#[tokio::test]
async fn test_success_does_not_notify_for_canceled_payment() {
    let mock = spawn_mock_processor().await;

    let error = Shurjopay::new()
        .success(&mock.context(), callback(orders::CANCELED))
        .await
        .unwrap_err();

    assert_eq!(error.current_context(), &ConnectorError::PaymentCanceled);
    assert!(mock.recorded().notifications.is_empty());
}

#[tokio::test]
async fn test_failed_notification_does_not_fail_success() {
    let mock = spawn_mock_processor().await;
    let ctx = mock.context_with(mock.settings(), BROKEN_COMPANY_ID);

    let result = Shurjopay::new()
        .success(&ctx, callback(orders::APPROVED))
        .await
        .unwrap();

    assert!(result.is_some());
    assert_eq!(mock.recorded().notifications.len(), 1);
}

#[tokio::test]
async fn test_success_with_unconfigured_host_is_a_config_error() {
    let mock = spawn_mock_processor().await;
    let ctx = mock.context_with(mock.settings(), "");

    let error = Shurjopay::new()
        .success(&ctx, callback(orders::APPROVED))
        .await
        .unwrap_err();

    assert_eq!(
        error.current_context(),
        &ConnectorError::ConfigError {
            field_name: "company_id"
        }
    );
    assert!(mock.recorded().notifications.is_empty());
}

// ---- http routes ----

#[tokio::test]
async fn test_http_routes() {
    let mock = spawn_mock_processor().await;
    let router = app::router(AppState::new(Arc::new(mock.context())));

    let response = router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(body_json(response).await["gateway"], "shurjopay");

    let response = router
        .clone()
        .oneshot(
            Request::post("/payments/build_process")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&build_request()).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let page = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(page.to_vec()).unwrap();
    assert!(page.contains("Pay with shurjoPay"));
    assert!(page.contains(r#"name="token" value="checkout-abc""#));

    let response = router
        .clone()
        .oneshot(
            Request::get(format!("/payments/validate?order_id={}", orders::PENDING))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .clone()
        .oneshot(
            Request::post("/payments/success")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(format!("order_id={}&client_id=42", orders::APPROVED)))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "approved");

    let response = router
        .clone()
        .oneshot(
            Request::get(format!("/payments/validate?order_id={}", orders::FAILED))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "PAYMENT_FAILED");

    let response = router
        .clone()
        .oneshot(
            Request::post("/payments/refund")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"transaction_id": "SP-APPROVED", "amount": "5.00"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body_json(response).await["error"]["code"], "NOT_SUPPORTED");
}

#[tokio::test]
async fn test_settings_routes() {
    let mock = spawn_mock_processor().await;
    let router = app::router(AppState::new(Arc::new(mock.context())));

    let response = router
        .clone()
        .oneshot(
            Request::post("/settings/validate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"store_id": " ", "store_prefix": "SP"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "INVALID_SETTINGS");
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 2);

    let response = router
        .clone()
        .oneshot(
            Request::post("/settings/validate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"store_id": "sp_sandbox", "store_password": "secret", "store_prefix": "SP", "dev_mode": "1"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["dev_mode"], true);
    assert_eq!(body["store_prefix"], "SP");
    assert!(body.get("store_password").is_none());

    let response = router
        .oneshot(
            Request::get("/settings/encryptable_fields")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        body_json(response).await,
        json!(["store_id", "store_password"])
    );
}
