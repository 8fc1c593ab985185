use common_utils::Method;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug)]
pub struct Response {
    /// headers
    pub headers: Option<http::HeaderMap>,
    /// response
    pub response: bytes::Bytes,
    /// status code
    pub status_code: u16,
}

#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
pub enum RedirectForm {
    Form {
        endpoint: String,
        method: Method,
        /// Query pairs of the redirect url, in order and with duplicates
        form_fields: Vec<(String, String)>,
    },
}

impl From<(url::Url, Method)> for RedirectForm {
    fn from((mut redirect_url, method): (url::Url, Method)) -> Self {
        let form_fields = redirect_url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        // Do not include query params in the endpoint
        redirect_url.set_query(None);

        Self::Form {
            endpoint: redirect_url.to_string(),
            method,
            form_fields,
        }
    }
}
