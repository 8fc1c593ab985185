//! Best-effort callback telling the host a payment went through.

use common_utils::{errors::CustomResult, Method, RequestBuilder};
use domain_types::{
    errors::ConnectorError,
    types::{GatewayContext, HostConfig},
};
use error_stack::{report, ResultExt};
use external_services::{execute_connector_processing_step, warn_log};
use serde_json::json;

use crate::{connectors::shurjopay::constants, utils};

/// Builds `{base}/{company_id}/shurjopay/?order_id={order_id}`.
///
/// A missing order id is sent as the literal `order_id=null`.
pub fn build_notification_url(
    host: &HostConfig,
    order_id: Option<&str>,
) -> CustomResult<url::Url, ConnectorError> {
    let base_url = host.gw_callback_url.trim();
    if base_url.is_empty() {
        return Err(report!(ConnectorError::ConfigError {
            field_name: "gw_callback_url"
        }));
    }
    let company_id = host.company_id.trim();
    if utils::is_unset(Some(company_id)) {
        return Err(report!(ConnectorError::ConfigError {
            field_name: "company_id"
        }));
    }

    let query = match order_id {
        Some(order_id) if !utils::is_unset(Some(order_id)) => {
            url::form_urlencoded::Serializer::new(String::new())
                .append_pair("order_id", order_id)
                .finish()
        }
        _ => "order_id=null".to_string(),
    };
    let notification_url = format!(
        "{}/{}/{}/?{}",
        base_url.trim_end_matches('/'),
        company_id,
        constants::CONNECTOR_NAME,
        query
    );

    if notification_url
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(report!(ConnectorError::UrlError)).attach_printable(format!(
            "notification url {notification_url:?} contains whitespace"
        ));
    }
    let url = url::Url::parse(&notification_url)
        .change_context(ConnectorError::UrlError)
        .attach_printable_lazy(|| format!("invalid notification url {notification_url}"))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(report!(ConnectorError::UrlError))
            .attach_printable(format!("notification url {notification_url} is not http(s)"));
    }
    // The parser percent-encodes or normalises what it would otherwise reject
    if url.as_str() != notification_url {
        return Err(report!(ConnectorError::UrlError)).attach_printable(format!(
            "notification url {notification_url} is not well formed, parsed as {url}"
        ));
    }
    Ok(url)
}

/// Fires the notification GET. Failures are logged and never propagated.
pub async fn dispatch(ctx: &GatewayContext, url: url::Url) {
    let request = RequestBuilder::new()
        .method(Method::Get)
        .url(url.as_str())
        .header(
            constants::headers::USER_AGENT,
            constants::NOTIFICATION_USER_AGENT,
        )
        .build();

    let outcome = execute_connector_processing_step(
        &ctx.proxy,
        &ctx.http_client,
        request,
        constants::CONNECTOR_NAME,
        "notify_host",
    )
    .await;

    match outcome {
        Ok(Ok(response)) => tracing::info!(
            status_code = response.status_code,
            "host notified of approved payment"
        ),
        Ok(Err(response)) => warn_log(
            "NOTIFICATION_REJECTED",
            &json!({ "url": url.as_str(), "status_code": response.status_code }),
        ),
        Err(error) => warn_log(
            "NOTIFICATION_FAILED",
            &json!({ "url": url.as_str(), "error": format!("{error:?}") }),
        ),
    }
}

/// Builds the callback url from the host config and dispatches it.
///
/// Configuration problems surface as errors before anything is sent.
pub async fn notify(
    ctx: &GatewayContext,
    order_id: Option<&str>,
) -> CustomResult<(), ConnectorError> {
    let url = build_notification_url(&ctx.host, order_id)?;
    dispatch(ctx, url).await;
    Ok(())
}
