use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain_types::{errors::ConnectorError, types::SettingsValidationError};
use error_stack::Report;
use serde::Serialize;

use crate::logger;

#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub details: Vec<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    message: String,
    code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl HttpError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: Vec::new(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: ErrorDetail {
                message: self.message,
                code: self.code,
                details: self.details,
            },
        });
        (self.status, body).into_response()
    }
}

pub fn status_for(error: &ConnectorError) -> StatusCode {
    match error {
        ConnectorError::ConfigError { .. }
        | ConnectorError::UrlError
        | ConnectorError::RequestEncodingFailedWithReason(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ConnectorError::AuthError | ConnectorError::ApiError { .. } => StatusCode::BAD_GATEWAY,
        ConnectorError::PaymentCanceled
        | ConnectorError::PaymentFailed
        | ConnectorError::MissingRequiredField { .. } => StatusCode::BAD_REQUEST,
        ConnectorError::NotSupported { .. } => StatusCode::NOT_IMPLEMENTED,
    }
}

impl From<Report<ConnectorError>> for HttpError {
    fn from(report: Report<ConnectorError>) -> Self {
        let error = report.current_context();
        let status = status_for(error);
        if status.is_server_error() {
            logger::error!(error = ?report, "gateway operation failed");
        } else {
            logger::warn!(error = ?report, "gateway operation rejected");
        }

        Self {
            status,
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: Vec::new(),
        }
    }
}

impl From<Report<SettingsValidationError>> for HttpError {
    fn from(report: Report<SettingsValidationError>) -> Self {
        let details: Vec<String> = report
            .frames()
            .filter_map(|frame| frame.downcast_ref::<SettingsValidationError>())
            .map(ToString::to_string)
            .collect();
        logger::warn!(?details, "settings rejected");

        Self {
            status: StatusCode::BAD_REQUEST,
            code: "INVALID_SETTINGS".to_string(),
            message: details.join(" "),
            details,
        }
    }
}
