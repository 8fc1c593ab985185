use std::sync::Arc;

use connector_integration::connectors::Shurjopay;
use domain_types::types::GatewayContext;
use interfaces::connector_types::NonmerchantGateway;

#[derive(Clone)]
pub struct AppState {
    pub context: Arc<GatewayContext>,
    pub gateway: &'static dyn NonmerchantGateway,
}

impl AppState {
    pub fn new(context: Arc<GatewayContext>) -> Self {
        Self {
            context,
            gateway: Shurjopay::new(),
        }
    }
}
