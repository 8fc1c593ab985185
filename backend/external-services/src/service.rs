use std::{str::FromStr, time::Duration};

use common_utils::{
    errors::CustomResult,
    request::{Headers, Method, Request, RequestContent},
};
use domain_types::{
    errors::{ApiClientError, ConnectorError},
    router_response_types::Response,
    types::{HttpClientConfig, Proxy},
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{ErasedMaskSerialize, Maskable};
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::field::Empty;

/// Sends one outbound call and records the golden log line for it.
///
/// Transport failures become `ConnectorError::ApiError` without a status code;
/// non-success responses are handed back as `Ok(Err(response))` so each flow
/// can decide how to read the body.
#[tracing::instrument(
    name = "execute_connector_processing_step",
    skip_all,
    fields(
        connector = %connector_name,
        flow = %flow_name,
        request.headers = Empty,
        request.body = Empty,
        request.url = Empty,
        request.method = Empty,
        response.body = Empty,
        response.status_code = Empty,
        message_ = "Golden Log Line (outgoing)",
        latency = Empty,
    )
)]
pub async fn execute_connector_processing_step(
    proxy: &Proxy,
    http_client: &HttpClientConfig,
    request: Request,
    connector_name: &str,
    flow_name: &str,
) -> CustomResult<Result<Response, Response>, ConnectorError> {
    let start = tokio::time::Instant::now();

    let masked_headers = request
        .headers
        .iter()
        .fold(serde_json::Map::new(), |mut acc, (k, v)| {
            let value = match v {
                Maskable::Masked(_) => Value::String("*** alloc::string::String ***".to_string()),
                Maskable::Normal(iv) => Value::String(iv.to_owned()),
            };
            acc.insert(k.clone(), value);
            acc
        });
    let span = tracing::Span::current();
    span.record(
        "request.headers",
        tracing::field::display(Value::Object(masked_headers)),
    );

    let masked_request = request
        .body
        .as_ref()
        .map(RequestContent::masked_value)
        .unwrap_or(Value::Null);
    span.record("request.body", tracing::field::display(&masked_request));
    span.record("request.url", tracing::field::display(&request.url));
    span.record("request.method", tracing::field::display(request.method));
    info_log(
        Tag::InitiatedToConnector.as_ref(),
        &json!({ "connector": connector_name, "flow": flow_name, "url": request.url }),
    );

    let response = call_connector_api(proxy, http_client, request).await;
    let latency = start.elapsed().as_millis();
    span.record("latency", latency);

    let result = match response {
        Ok(body) => {
            let (status_code, raw) = match &body {
                Ok(response) | Err(response) => (response.status_code, &response.response),
            };
            span.record("response.status_code", status_code);
            if let Ok(parsed) = parse_json_with_bom_handling(raw) {
                span.record(
                    "response.body",
                    tracing::field::display(parsed.masked_serialize().unwrap_or(
                        json!({ "error": "failed to mask serialize connector response"}),
                    )),
                );
            }
            if body.is_err() {
                warn_log(
                    Tag::IncomingApi.as_ref(),
                    &json!({ "connector": connector_name, "flow": flow_name, "status_code": status_code }),
                );
            }
            Ok(body)
        }
        Err(err) => {
            error_log(
                "NETWORK_ERROR",
                &json!(format!(
                    "Failed getting response from connector. Error: {:?}",
                    err
                )),
            );
            let message = err.current_context().to_string();
            Err(err.change_context(ConnectorError::ApiError {
                status_code: None,
                response: message,
            }))
        }
    };

    tracing::info!(tag = ?Tag::OutgoingApi, log_type = "api", "Outgoing Request completed");
    result
}

pub async fn call_connector_api(
    proxy: &Proxy,
    http_client: &HttpClientConfig,
    request: Request,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let url =
        reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;
    let client = get_base_client(proxy, http_client, proxy.should_bypass(url.as_str()))?;
    let headers = request.headers.construct_header_map()?;

    let outgoing = match (request.method, request.body) {
        (Method::Get, _) => client.get(url),
        (Method::Post, Some(RequestContent::Json(payload))) => client.post(url).json(&payload),
        (Method::Post, None) => client.post(url),
    }
    .headers(headers);

    let response = outgoing.send().await.map_err(|error| {
        info_log(
            "REQUEST_FAILURE",
            &json!("Unable to send request to connector."),
        );
        if error.is_timeout() {
            report!(ApiClientError::RequestTimeoutReceived)
        } else {
            report!(ApiClientError::RequestNotSent(error.to_string()))
        }
    });

    handle_response(response).await
}

static NON_PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();
static PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();

/// One cached client per proxy mode; the configuration is read on first use only.
fn get_base_client(
    proxy_config: &Proxy,
    http_client: &HttpClientConfig,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    let cell = match proxy_config.cache_key(should_bypass_proxy) {
        Some(_) => &PROXIED_CLIENT,
        None => &NON_PROXIED_CLIENT,
    };
    cell.get_or_try_init(|| {
        build_client(proxy_config, http_client, should_bypass_proxy).inspect_err(|err| {
            error_log(
                "CLIENT_CONSTRUCTION_FAILED",
                &json!(format!("Failed to construct base client. Error: {err:?}")),
            );
        })
    })
    .cloned()
}

fn build_client(
    proxy_config: &Proxy,
    http_client: &HttpClientConfig,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    let builder = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(http_client.total_timeout_secs))
        .connect_timeout(Duration::from_secs(http_client.connect_timeout_secs))
        .pool_idle_timeout(Duration::from_secs(
            proxy_config
                .idle_pool_connection_timeout
                .unwrap_or_default(),
        ));

    let proxies = if should_bypass_proxy {
        Vec::new()
    } else {
        [
            (proxy_config.https_url.as_deref(), true),
            (proxy_config.http_url.as_deref(), false),
        ]
        .into_iter()
        .filter_map(|(url, https)| url.map(|url| proxy_for(url, https)))
        .collect::<CustomResult<Vec<_>, _>>()?
    };

    proxies
        .into_iter()
        .fold(builder, reqwest::ClientBuilder::proxy)
        .build()
        .change_context(ApiClientError::ClientConstructionFailed)
}

/// Proxy for https or plain http traffic only, never both
fn proxy_for(url: &str, https: bool) -> CustomResult<reqwest::Proxy, ApiClientError> {
    if https {
        reqwest::Proxy::https(url)
    } else {
        reqwest::Proxy::http(url)
    }
    .change_context(ApiClientError::InvalidProxyConfiguration)
    .attach_printable_lazy(|| format!("proxy url {url} is not usable"))
}

async fn handle_response(
    response: CustomResult<reqwest::Response, ApiClientError>,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let resp = response?;
    let status_code = resp.status().as_u16();
    let headers = Some(resp.headers().to_owned());
    match status_code {
        200..=299 => {
            let response = resp
                .bytes()
                .await
                .change_context(ApiClientError::ResponseDecodingFailed)?;
            Ok(Ok(Response {
                headers,
                response,
                status_code,
            }))
        }
        300..=599 => {
            let bytes = resp.bytes().await.map_err(|error| {
                report!(error).change_context(ApiClientError::ResponseDecodingFailed)
            })?;

            Ok(Err(Response {
                headers,
                response: bytes,
                status_code,
            }))
        }
        _ => {
            info_log(
                "UNEXPECTED_RESPONSE",
                &json!("Unexpected response from server."),
            );
            Err(report!(ApiClientError::UnexpectedServerResponse))
        }
    }
}

/// Helper function to parse JSON from response bytes with BOM handling
fn parse_json_with_bom_handling(response_bytes: &[u8]) -> Result<Value, serde_json::Error> {
    let cleaned_response = response_bytes
        .strip_prefix(&[0xEF, 0xBB, 0xBF])
        .unwrap_or(response_bytes);
    serde_json::from_slice::<Value>(cleaned_response)
}

pub(super) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for Headers {
    /// Masked values are unwrapped here, the only place they reach the wire.
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        use reqwest::header::{HeaderName, HeaderValue};

        self.into_iter()
            .map(|(name, value)| -> CustomResult<_, ApiClientError> {
                let name = HeaderName::from_str(&name)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)
                    .attach_printable_lazy(|| format!("invalid header name {name}"))?;
                let value = HeaderValue::from_str(&value.into_inner())
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                Ok((name, value))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Tag {
    /// Call initiated to connector.
    InitiatedToConnector,
    /// Incoming response
    IncomingApi,
    /// Api Outgoing Request
    OutgoingApi,
}

#[inline]
pub fn info_log(action: &str, message: &Value) {
    tracing::info!(tags = %action, json_value= %message);
}

#[inline]
pub fn error_log(action: &str, message: &Value) {
    tracing::error!(tags = %action, json_value= %message);
}

#[inline]
pub fn warn_log(action: &str, message: &Value) {
    tracing::warn!(tags = %action, json_value= %message);
}
