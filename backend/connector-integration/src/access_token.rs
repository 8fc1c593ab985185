use common_utils::{
    consts, errors::CustomResult, ext_traits::ByteSliceExt, Method, RequestBuilder,
    RequestContent,
};
use domain_types::{
    connector_types::BearerToken,
    errors::ConnectorError,
    types::{GatewayContext, GatewaySettings, HttpClientConfig, Proxy},
};
use error_stack::ResultExt;
use external_services::execute_connector_processing_step;

use crate::connectors::shurjopay::{
    constants,
    transformers::{ShurjopayTokenRequest, ShurjopayTokenResponse},
};

/// Exchanges store credentials for a bearer token.
///
/// Tokens are fetched fresh for every operation; nothing is cached.
pub struct TokenClient<'a> {
    proxy: &'a Proxy,
    http_client: &'a HttpClientConfig,
}

impl<'a> TokenClient<'a> {
    pub fn new(ctx: &'a GatewayContext) -> Self {
        Self {
            proxy: &ctx.proxy,
            http_client: &ctx.http_client,
        }
    }

    /// `base_url` must end with `/`
    pub async fn fetch_token(
        &self,
        settings: &GatewaySettings,
        base_url: &str,
    ) -> CustomResult<BearerToken, ConnectorError> {
        settings.ensure_credentials()?;

        let request = RequestBuilder::new()
            .method(Method::Post)
            .url(&format!("{base_url}{}", constants::TOKEN_ENDPOINT))
            .header(constants::headers::CONTENT_TYPE, consts::APPLICATION_JSON)
            .set_body(RequestContent::Json(Box::new(ShurjopayTokenRequest::from(
                settings,
            ))))
            .build();

        let response = execute_connector_processing_step(
            self.proxy,
            self.http_client,
            request,
            constants::CONNECTOR_NAME,
            "get_token",
        )
        .await?;

        // The body decides, whatever the status code
        let (Ok(response) | Err(response)) = response;
        let token_response: ShurjopayTokenResponse = response
            .response
            .parse_struct("ShurjopayTokenResponse")
            .change_context(ConnectorError::AuthError)
            .attach_printable_lazy(|| format!("token status code {}", response.status_code))?;

        let token = BearerToken::try_from(token_response)?;
        tracing::info!(
            connector = constants::CONNECTOR_NAME,
            "Successfully generated access token"
        );
        Ok(token)
    }
}
