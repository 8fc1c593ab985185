use domain_types::{errors, router_response_types::Response};
use error_stack::Report;

pub type Error = Report<errors::ConnectorError>;

pub fn missing_field_err(
    message: &'static str,
) -> Box<dyn Fn() -> Report<errors::ConnectorError> + 'static> {
    Box::new(move || {
        errors::ConnectorError::MissingRequiredField {
            field_name: message,
        }
        .into()
    })
}

/// Values the processor and the host use to mean "not set": absent, empty or `"0"`
pub fn is_unset(value: Option<&str>) -> bool {
    value.map_or(true, |value| value.is_empty() || value == "0")
}

/// Keeps only the decimal digits of a phone number
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Raw response body as text, for error payloads
pub(crate) fn response_body_text(res: &Response) -> String {
    String::from_utf8_lossy(&res.response).into_owned()
}

/// `ApiError` carrying the status and raw body of a processor response
pub(crate) fn api_error_from_response(res: &Response) -> Error {
    errors::ConnectorError::ApiError {
        status_code: Some(res.status_code),
        response: response_body_text(res),
    }
    .into()
}
