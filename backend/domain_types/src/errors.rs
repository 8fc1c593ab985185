/// Errors raised while talking to the processor or building its requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectorError {
    #[error("Gateway configuration is incomplete: {field_name}")]
    ConfigError { field_name: &'static str },
    #[error("Failed to obtain an access token from the processor")]
    AuthError,
    #[error("Processor API call failed")]
    ApiError {
        status_code: Option<u16>,
        response: String,
    },
    #[error("Failed to build a valid url")]
    UrlError,
    #[error("The payment has been canceled. Please visit the client dashboard to reattempt payment on the invoice.")]
    PaymentCanceled,
    #[error("The payment has failed to be processed. Please visit the client dashboard to reattempt payment on the invoice.")]
    PaymentFailed,
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Failed to encode connector request: {0}")]
    RequestEncodingFailedWithReason(String),
    #[error("{flow} is not supported by shurjoPay")]
    NotSupported { flow: &'static str },
}

impl ConnectorError {
    /// Short machine readable code, stable across message wording changes
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigError { .. } => "CONFIG_ERROR",
            Self::AuthError => "AUTH_ERROR",
            Self::ApiError { .. } => "API_ERROR",
            Self::UrlError => "URL_ERROR",
            Self::PaymentCanceled => "PAYMENT_CANCELED",
            Self::PaymentFailed => "PAYMENT_FAILED",
            Self::MissingRequiredField { .. } => "MISSING_REQUIRED_FIELD",
            Self::RequestEncodingFailedWithReason(_) => "REQUEST_ENCODING_FAILED",
            Self::NotSupported { .. } => "NOT_SUPPORTED",
        }
    }
}

/// Transport level failures of the outbound http client
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiClientError {
    #[error("Header map construction failed")]
    HeaderMapConstructionFailed,
    #[error("Invalid proxy configuration")]
    InvalidProxyConfiguration,
    #[error("Client construction failed")]
    ClientConstructionFailed,
    #[error("URL encoding of request payload failed")]
    UrlEncodingFailed,
    #[error("Failed to send request to connector {0}")]
    RequestNotSent(String),
    #[error("Failed to decode response")]
    ResponseDecodingFailed,
    #[error("Server responded with Request Timeout")]
    RequestTimeoutReceived,
    #[error("Server responded with unexpected response")]
    UnexpectedServerResponse,
}
