use common_utils::errors::CustomResult;
use domain_types::{
    connector_types::{BuildProcessRequest, CallbackParams, TransactionRef, VerificationResult},
    errors::ConnectorError,
    router_response_types::RedirectForm,
    types::{GatewayContext, GatewaySettings, SettingsMeta, SettingsValidationError},
};
use error_stack::Report;

use crate::api::ConnectorCommon;

/// A gateway that takes the payer to the processor's hosted page and learns
/// the outcome through callbacks.
#[async_trait::async_trait]
pub trait NonmerchantGateway: ConnectorCommon + Send + Sync {
    /// Starts a hosted checkout and returns the form that sends the payer there.
    async fn build_process(
        &self,
        ctx: &GatewayContext,
        request: BuildProcessRequest,
    ) -> CustomResult<RedirectForm, ConnectorError>;

    /// Server to server callback. `None` when the processor has no outcome yet.
    async fn validate(
        &self,
        ctx: &GatewayContext,
        params: CallbackParams,
    ) -> CustomResult<Option<VerificationResult>, ConnectorError>;

    /// Payer returning from the hosted page. Notifies the host once approved.
    async fn success(
        &self,
        ctx: &GatewayContext,
        params: CallbackParams,
    ) -> CustomResult<Option<VerificationResult>, ConnectorError>;

    fn capture(&self, transaction: &TransactionRef) -> CustomResult<(), ConnectorError>;

    fn void(&self, transaction: &TransactionRef) -> CustomResult<(), ConnectorError>;

    fn refund(&self, transaction: &TransactionRef) -> CustomResult<(), ConnectorError>;

    fn validate_settings(
        &self,
        meta: SettingsMeta,
    ) -> Result<GatewaySettings, Report<SettingsValidationError>>;

    fn encryptable_fields(&self) -> Vec<&'static str>;
}
