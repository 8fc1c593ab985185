use axum::{
    extract::{FromRequest, Request},
    response::{Html, IntoResponse, Response},
    Json,
};
use domain_types::router_response_types::RedirectForm;
use html_escape::encode_double_quoted_attribute;
use serde::de::DeserializeOwned;

use super::error::HttpError;

/// Custom JSON extractor that converts 422 errors to 400 with original error messages
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(HttpError::bad_request(rejection.body_text()).into_response()),
        }
    }
}

/// Label of the button shown while the form auto-submits
const PAY_BUTTON_LABEL: &str = "Pay with shurjoPay";

/// Renders the redirect form as a page that submits itself on load.
pub fn render_redirect_form(form: &RedirectForm) -> Html<String> {
    let RedirectForm::Form {
        endpoint,
        method,
        form_fields,
    } = form;

    let inputs: String = form_fields
        .iter()
        .map(|(name, value)| {
            format!(
                r#"<input type="hidden" name="{}" value="{}">"#,
                encode_double_quoted_attribute(name),
                encode_double_quoted_attribute(value)
            )
        })
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<body onload="document.forms['shurjopay_payment'].submit()">
<form name="shurjopay_payment" action="{action}" method="{method}">{inputs}<button type="submit">{label}</button></form>
</body>
</html>"#,
        action = encode_double_quoted_attribute(endpoint),
        method = method.to_string().to_lowercase(),
        label = PAY_BUTTON_LABEL,
    ))
}
