#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use domain_types::types::{
    ConnectorParams, Connectors, GatewayContext, GatewaySettings, HostConfig, HttpClientConfig,
    Proxy,
};
use hyperswitch_masking::Secret;
use serde_json::{json, Value};

pub const TEST_TOKEN: &str = "mock-token-1";
pub const TEST_STORE_ID: &str = "sp_sandbox";
pub const BROKEN_COMPANY_ID: &str = "broken";

/// Order ids the mock verification endpoint knows about
pub mod orders {
    pub const APPROVED: &str = "SP-APPROVED";
    pub const CANCELED: &str = "SP-CANCELED";
    pub const CANCELED_BY_CUSTOMER: &str = "SP-CANCELED-BY-CUSTOMER";
    pub const FAILED: &str = "SP-FAILED";
    pub const PENDING: &str = "SP-PENDING";
    pub const NOT_AN_ARRAY: &str = "SP-NOT-AN-ARRAY";
}

/// Everything the mock processor and host saw
#[derive(Debug, Default)]
pub struct Recorded {
    pub base_url: String,
    pub token_requests: Vec<Value>,
    pub checkout_requests: Vec<Value>,
    pub checkout_authorization: Vec<String>,
    pub verification_requests: Vec<Value>,
    pub verification_user_agents: Vec<String>,
    pub notifications: Vec<(String, Option<String>)>,
    pub notification_user_agents: Vec<String>,
}

pub type Shared = Arc<Mutex<Recorded>>;

pub struct MockProcessor {
    pub base_url: String,
    pub recorded: Shared,
}

fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn get_token(State(recorded): State<Shared>, Json(body): Json<Value>) -> Response {
    recorded.lock().unwrap().token_requests.push(body.clone());
    if body["username"] == TEST_STORE_ID && body["password"] != "wrong" {
        Json(json!({
            "token": TEST_TOKEN,
            "store_id": 1,
            "execute_url": "https://sandbox.test/api/secret-pay",
            "token_type": "Bearer",
            "sp_code": "200",
            "message": "Ok",
        }))
        .into_response()
    } else {
        // The processor rejects bad credentials with a body and no token
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"sp_code": "1064", "message": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn secret_pay(
    State(recorded): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut recorded = recorded.lock().unwrap();
    recorded
        .checkout_authorization
        .push(header_value(&headers, "authorization"));
    recorded.checkout_requests.push(body.clone());

    if body["token"] != TEST_TOKEN {
        return (StatusCode::UNAUTHORIZED, "token mismatch").into_response();
    }
    let order_id = body["order_id"].as_str().unwrap_or_default();
    Json(json!({
        "checkout_url": format!(
            "{}/spaycheckout/?token=checkout-abc&order_id={order_id}",
            recorded.base_url
        ),
        "sp_order_id": order_id,
        "customer_order_id": order_id,
    }))
    .into_response()
}

async fn verification(
    State(recorded): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut recorded = recorded.lock().unwrap();
    recorded
        .verification_user_agents
        .push(header_value(&headers, "user-agent"));
    recorded.verification_requests.push(body.clone());

    let order_id = body["order_id"].as_str().unwrap_or_default().to_string();
    let record = |sp_code: Value| {
        json!([{
            "sp_code": sp_code,
            "sp_message": "Success",
            "order_id": order_id,
            "bank_trx_id": "BTX-77",
            "amount": "10.10",
            "currency": "BDT",
            "value1": "10=5.00|11=5.10",
            "value2": "42",
        }])
    };
    let body = match order_id.as_str() {
        orders::APPROVED => record(json!(1000)),
        orders::CANCELED => record(json!("1002")),
        orders::CANCELED_BY_CUSTOMER => record(json!("1068")),
        orders::FAILED => record(json!("1001")),
        orders::PENDING => json!([]),
        orders::NOT_AN_ARRAY => json!({"message": "Unauthorized"}),
        _ => record(Value::Null),
    };
    Json(body).into_response()
}

#[derive(serde::Deserialize)]
struct NotificationQuery {
    order_id: Option<String>,
}

async fn host_callback(
    State(recorded): State<Shared>,
    Path(company_id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<NotificationQuery>,
) -> StatusCode {
    let mut recorded = recorded.lock().unwrap();
    recorded
        .notification_user_agents
        .push(header_value(&headers, "user-agent"));
    recorded
        .notifications
        .push((company_id.clone(), query.order_id));
    if company_id == BROKEN_COMPANY_ID {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}

/// Starts the processor and host mock on an ephemeral port.
pub async fn spawn_mock_processor() -> MockProcessor {
    let recorded = Shared::default();
    let router = Router::new()
        .route("/api/get_token", post(get_token))
        .route("/api/secret-pay", post(secret_pay))
        .route("/api/verification/", post(verification))
        .route(
            "/callback/{company_id}/shurjopay/",
            get(host_callback),
        )
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    recorded.lock().unwrap().base_url = base_url.clone();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockProcessor { base_url, recorded }
}

impl MockProcessor {
    pub fn settings(&self) -> GatewaySettings {
        GatewaySettings {
            store_id: Secret::new(TEST_STORE_ID.to_string()),
            store_password: Secret::new("pyyk97hu&6u6".to_string()),
            store_prefix: "SP".to_string(),
            dev_mode: true,
        }
    }

    pub fn context(&self) -> GatewayContext {
        self.context_with(self.settings(), "7")
    }

    pub fn context_with(&self, settings: GatewaySettings, company_id: &str) -> GatewayContext {
        GatewayContext {
            settings,
            connectors: Connectors {
                shurjopay: ConnectorParams {
                    base_url: format!("{}/", self.base_url),
                    sandbox_base_url: format!("{}/", self.base_url),
                },
            },
            host: HostConfig {
                gw_callback_url: format!("{}/callback", self.base_url),
                company_id: company_id.to_string(),
            },
            proxy: Proxy::default(),
            http_client: HttpClientConfig::default(),
        }
    }

    pub fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap()
    }
}
