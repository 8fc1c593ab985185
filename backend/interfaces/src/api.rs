use common_utils::{consts, errors::CustomResult};
use domain_types::{
    connector_types::BearerToken,
    errors::ConnectorError,
    router_response_types::Response,
    types::{ConnectorParams, Connectors},
};
use error_stack::Report;
use hyperswitch_masking::{Mask, Maskable, PeekInterface};

pub trait ConnectorCommon {
    /// Name of the connector, used in logs and error payloads
    fn id(&self) -> &'static str;

    fn common_get_content_type(&self) -> &'static str {
        consts::APPLICATION_JSON
    }

    fn connector_params<'a>(&self, connectors: &'a Connectors) -> &'a ConnectorParams;

    /// Base url for the selected mode, always ending with `/`
    fn base_url(&self, connectors: &Connectors, dev_mode: bool) -> String {
        self.connector_params(connectors).base_url_for(dev_mode)
    }

    fn get_auth_header(
        &self,
        token: &BearerToken,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(vec![(
            "Authorization".to_string(),
            format!("Bearer {}", token.token.peek()).into_masked(),
        )])
    }

    /// Turns a non-success response into the connector's error
    fn build_error_response(&self, res: Response) -> Report<ConnectorError>;
}
