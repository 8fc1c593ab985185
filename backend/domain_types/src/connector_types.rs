use common_utils::custom_serde;
use hyperswitch_masking::Secret;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Type of a stored contact number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactNumberType {
    Phone,
    Fax,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactLocation {
    Home,
    Work,
    Mobile,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactNumber {
    pub number: String,
    #[serde(rename = "type")]
    pub number_type: ContactNumberType,
    pub location: ContactLocation,
}

/// Contact paying the invoices
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactInfo {
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub client_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Client record the host resolved for the contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientRecord {
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub contact_numbers: Vec<ContactNumber>,
}

/// An invoice and the amount of the payment applied to it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InvoiceRef {
    #[serde(with = "custom_serde::string_or_number")]
    pub id: String,
    #[serde(with = "custom_serde::string_or_number")]
    pub amount: String,
}

impl InvoiceRef {
    pub fn new(id: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            amount: amount.into(),
        }
    }
}

/// Everything needed to start a hosted checkout
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildProcessRequest {
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub client: ClientRecord,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub invoices: Vec<InvoiceRef>,
    #[serde(default)]
    pub return_url: Option<String>,
    /// Address of the paying browser, as seen by the host
    #[serde(default)]
    pub client_ip: Option<String>,
}

/// Query or form parameters of a validate or success callback
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CallbackParams {
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub order_id: Option<String>,
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub client_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransactionStatus {
    Approved,
    Canceled,
    Failed,
}

/// Outcome of a verification call, mapped into the host's transaction shape
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationResult {
    pub status: TransactionStatus,
    pub client_id: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub reference_id: Option<String>,
    pub transaction_id: Option<String>,
    pub invoices: Vec<InvoiceRef>,
}

/// Reference to an earlier transaction, used by capture, void and refund
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TransactionRef {
    #[serde(default)]
    pub reference_id: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Access token issued by the processor, never cached
#[derive(Debug, Clone, Deserialize)]
pub struct BearerToken {
    pub token: Secret<String>,
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub store_id: Option<String>,
}
