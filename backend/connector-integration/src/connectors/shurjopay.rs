pub mod constants;
pub mod transformers;


use common_utils::{
    errors::CustomResult, ext_traits::ByteSliceExt, Method, Request, RequestBuilder,
    RequestContent,
};
use domain_types::{
    connector_types::{
        BearerToken, BuildProcessRequest, CallbackParams, TransactionRef, TransactionStatus,
        VerificationResult,
    },
    errors,
    router_response_types::{RedirectForm, Response},
    types::{
        ConnectorParams, Connectors, GatewayContext, GatewaySettings, SettingsMeta,
        SettingsValidationError,
    },
};
use error_stack::{report, Report, ResultExt};
use external_services::execute_connector_processing_step;
use interfaces::{api::ConnectorCommon, connector_types::NonmerchantGateway};
use transformers::{
    self as shurjopay, ShurjopayCheckoutData, ShurjopayPaymentsRequest, ShurjopayPaymentsResponse,
    ShurjopayRouterData, ShurjopayVerificationRequest, ShurjopayVerificationResponse,
};

use crate::{access_token::TokenClient, notification, utils};

#[derive(Debug, Clone)]
pub struct Shurjopay;

impl Shurjopay {
    pub const fn new() -> &'static Self {
        &Self
    }

    fn build_request(
        &self,
        url: String,
        token: &BearerToken,
        body: RequestContent,
        user_agent: Option<&str>,
    ) -> CustomResult<Request, errors::ConnectorError> {
        let mut builder = RequestBuilder::new()
            .method(Method::Post)
            .url(&url)
            .header(
                constants::headers::CONTENT_TYPE,
                self.common_get_content_type(),
            )
            .headers(self.get_auth_header(token)?)
            .set_body(body);
        if let Some(user_agent) = user_agent {
            builder = builder.header(constants::headers::USER_AGENT, user_agent);
        }
        Ok(builder.build())
    }

    /// Posts the checkout payload and returns the hosted page as a redirect form.
    pub async fn initiate_checkout(
        &self,
        ctx: &GatewayContext,
        token: &BearerToken,
        checkout: ShurjopayCheckoutData,
    ) -> CustomResult<RedirectForm, errors::ConnectorError> {
        let base_url = self.base_url(&ctx.connectors, ctx.settings.dev_mode);
        let payload = ShurjopayPaymentsRequest::from(ShurjopayRouterData {
            settings: &ctx.settings,
            token,
            checkout,
        });
        tracing::info!(order_id = %payload.order_id, "initiating shurjoPay checkout");

        let request = self.build_request(
            format!("{base_url}{}", constants::CHECKOUT_ENDPOINT),
            token,
            RequestContent::Json(Box::new(payload)),
            None,
        )?;
        let response = execute_connector_processing_step(
            &ctx.proxy,
            &ctx.http_client,
            request,
            self.id(),
            "secret_pay",
        )
        .await?
        .map_err(|res| self.build_error_response(res))?;

        let checkout: ShurjopayPaymentsResponse = response
            .response
            .parse_struct("ShurjopayPaymentsResponse")
            .map_err(|_| utils::api_error_from_response(&response))?;
        let checkout_url = checkout
            .checkout_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| utils::api_error_from_response(&response))
            .attach_printable("checkout_url missing from response")?;
        let checkout_url = url::Url::parse(checkout_url)
            .map_err(|_| utils::api_error_from_response(&response))
            .attach_printable("checkout_url is not a valid url")?;
        tracing::info!(sp_order_id = ?checkout.sp_order_id, "shurjoPay checkout created");

        Ok(RedirectForm::from((checkout_url, Method::Get)))
    }

    /// Asks the processor how an order ended. `None` when it has no outcome yet.
    pub async fn verify_transaction(
        &self,
        ctx: &GatewayContext,
        token: &BearerToken,
        order_id: &str,
    ) -> CustomResult<Option<VerificationResult>, errors::ConnectorError> {
        let base_url = self.base_url(&ctx.connectors, ctx.settings.dev_mode);
        let request = self.build_request(
            format!("{base_url}{}", constants::VERIFICATION_ENDPOINT),
            token,
            RequestContent::Json(Box::new(ShurjopayVerificationRequest {
                order_id: order_id.to_string(),
            })),
            Some(constants::VERIFICATION_USER_AGENT),
        )?;
        let response = execute_connector_processing_step(
            &ctx.proxy,
            &ctx.http_client,
            request,
            self.id(),
            "verification",
        )
        .await?
        .map_err(|res| self.build_error_response(res))?;

        let records: Vec<ShurjopayVerificationResponse> = response
            .response
            .parse_struct("Vec<ShurjopayVerificationResponse>")
            .map_err(|_| utils::api_error_from_response(&response))
            .attach_printable("verification response is not an array")?;

        let result = shurjopay::verification_result(records);
        tracing::info!(
            order_id,
            status = ?result.as_ref().map(|result| result.status),
            "shurjoPay verification completed"
        );
        Ok(result)
    }

    /// Fetches a token and verifies the order named by the callback.
    async fn verify_callback(
        &self,
        ctx: &GatewayContext,
        params: &CallbackParams,
    ) -> CustomResult<Option<VerificationResult>, errors::ConnectorError> {
        let order_id = params
            .order_id
            .as_deref()
            .filter(|order_id| !order_id.trim().is_empty())
            .ok_or_else(utils::missing_field_err("order_id"))?;

        let base_url = self.base_url(&ctx.connectors, ctx.settings.dev_mode);
        let token = TokenClient::new(ctx)
            .fetch_token(&ctx.settings, &base_url)
            .await?;
        self.verify_transaction(ctx, &token, order_id).await
    }
}

/// Approved results pass through, canceled and failed ones become errors.
fn approved_or_error(
    result: VerificationResult,
) -> CustomResult<VerificationResult, errors::ConnectorError> {
    match result.status {
        TransactionStatus::Approved => Ok(result),
        TransactionStatus::Canceled => Err(report!(errors::ConnectorError::PaymentCanceled))
            .attach_printable(format!("order {:?} canceled", result.transaction_id)),
        TransactionStatus::Failed => Err(report!(errors::ConnectorError::PaymentFailed))
            .attach_printable(format!("order {:?} failed", result.transaction_id)),
    }
}

impl ConnectorCommon for Shurjopay {
    fn id(&self) -> &'static str {
        constants::CONNECTOR_NAME
    }

    fn connector_params<'a>(&self, connectors: &'a Connectors) -> &'a ConnectorParams {
        &connectors.shurjopay
    }

    fn base_url(&self, connectors: &Connectors, dev_mode: bool) -> String {
        let params = self.connector_params(connectors);
        let configured = if dev_mode {
            &params.sandbox_base_url
        } else {
            &params.base_url
        };
        if configured.trim().is_empty() {
            if dev_mode {
                constants::SANDBOX_BASE_URL
            } else {
                constants::PROD_BASE_URL
            }
            .to_string()
        } else {
            params.base_url_for(dev_mode)
        }
    }

    fn build_error_response(&self, res: Response) -> Report<errors::ConnectorError> {
        tracing::warn!(
            connector = self.id(),
            status_code = res.status_code,
            "shurjoPay returned an error response"
        );
        utils::api_error_from_response(&res)
    }
}

#[async_trait::async_trait]
impl NonmerchantGateway for Shurjopay {
    async fn build_process(
        &self,
        ctx: &GatewayContext,
        request: BuildProcessRequest,
    ) -> CustomResult<RedirectForm, errors::ConnectorError> {
        // Everything that can be rejected locally is checked before any call
        let checkout = ShurjopayCheckoutData::try_from(&request)?;

        let base_url = self.base_url(&ctx.connectors, ctx.settings.dev_mode);
        let token = TokenClient::new(ctx)
            .fetch_token(&ctx.settings, &base_url)
            .await?;
        self.initiate_checkout(ctx, &token, checkout).await
    }

    async fn validate(
        &self,
        ctx: &GatewayContext,
        params: CallbackParams,
    ) -> CustomResult<Option<VerificationResult>, errors::ConnectorError> {
        self.verify_callback(ctx, &params)
            .await?
            .map(approved_or_error)
            .transpose()
    }

    async fn success(
        &self,
        ctx: &GatewayContext,
        params: CallbackParams,
    ) -> CustomResult<Option<VerificationResult>, errors::ConnectorError> {
        let Some(result) = self.verify_callback(ctx, &params).await? else {
            return Ok(None);
        };
        let result = approved_or_error(result)?;
        notification::notify(ctx, params.order_id.as_deref()).await?;
        Ok(Some(result))
    }

    fn capture(&self, _transaction: &TransactionRef) -> CustomResult<(), errors::ConnectorError> {
        Err(report!(errors::ConnectorError::NotSupported { flow: "Capture" }))
    }

    fn void(&self, _transaction: &TransactionRef) -> CustomResult<(), errors::ConnectorError> {
        Err(report!(errors::ConnectorError::NotSupported { flow: "Void" }))
    }

    fn refund(&self, _transaction: &TransactionRef) -> CustomResult<(), errors::ConnectorError> {
        Err(report!(errors::ConnectorError::NotSupported { flow: "Refund" }))
    }

    fn validate_settings(
        &self,
        meta: SettingsMeta,
    ) -> Result<GatewaySettings, Report<SettingsValidationError>> {
        meta.validate()
    }

    fn encryptable_fields(&self) -> Vec<&'static str> {
        GatewaySettings::encryptable_fields()
    }
}
