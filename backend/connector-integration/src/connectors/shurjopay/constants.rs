// Base URLs
pub const PROD_BASE_URL: &str = "https://www.engine.shurjopayment.com/";
pub const SANDBOX_BASE_URL: &str = "https://www.sandbox.shurjopayment.com/";

// API endpoints, relative to the base url
pub const TOKEN_ENDPOINT: &str = "api/get_token";
pub const CHECKOUT_ENDPOINT: &str = "api/secret-pay";
pub const VERIFICATION_ENDPOINT: &str = "api/verification/";

// sp_code values
pub const SP_CODE_SUCCESS: &str = "1000";
pub const SP_CODE_CANCELED: &str = "1002";
pub const SP_CODE_CANCELED_BY_CUSTOMER: &str = "1068";

// The processor filters requests on these exact agents
pub const VERIFICATION_USER_AGENT: &str = "Mozilla/0 (Windows; U; Windows NT 0; zh-CN; rv:3)";
pub const NOTIFICATION_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:103.0) Gecko/20100101 Firefox/103.0";

// Customer fallbacks
pub const DEFAULT_CITY: &str = "no city";
pub const DEFAULT_STATE: &str = "no state";
pub const DEFAULT_POSTCODE: &str = "no zip";
pub const DEFAULT_COUNTRY: &str = "no country";

// Reserved passthrough fields
pub const VALUE3: &str = "value3";
pub const VALUE4: &str = "value4";

/// Connector id, also the path segment the host routes gateway callbacks by
pub const CONNECTOR_NAME: &str = "shurjopay";

pub mod headers {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const USER_AGENT: &str = "User-Agent";
}
