use common_utils::{consts, custom_serde, generate_time_ordered_id, types::StringMajorUnit};
use domain_types::{
    connector_types::{
        BearerToken, BuildProcessRequest, ClientRecord, ContactInfo, ContactLocation,
        ContactNumberType, InvoiceRef, TransactionStatus, VerificationResult,
    },
    errors,
    types::GatewaySettings,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use super::constants;
use crate::utils::{self, Error};

// ---- token ----

#[derive(Debug, Serialize)]
pub struct ShurjopayTokenRequest {
    pub username: Secret<String>,
    pub password: Secret<String>,
}

impl From<&GatewaySettings> for ShurjopayTokenRequest {
    fn from(settings: &GatewaySettings) -> Self {
        Self {
            username: settings.store_id.clone(),
            password: settings.store_password.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ShurjopayTokenResponse {
    #[serde(default)]
    pub token: Option<Secret<String>>,
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub store_id: Option<String>,
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub sp_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl TryFrom<ShurjopayTokenResponse> for BearerToken {
    type Error = Error;

    fn try_from(response: ShurjopayTokenResponse) -> Result<Self, Self::Error> {
        match response.token {
            Some(token) if !token.peek().is_empty() => Ok(Self {
                token,
                store_id: response.store_id,
            }),
            _ => Err(report!(errors::ConnectorError::AuthError)).attach_printable(format!(
                "token missing from response, sp_code: {:?}, message: {:?}",
                response.sp_code, response.message
            )),
        }
    }
}

// ---- invoices ----

/// Packs the invoices a payment covers into the processor's free text field.
pub struct InvoiceCodec;

impl InvoiceCodec {
    const PAIR_SEPARATOR: char = '|';
    const KEY_VALUE_SEPARATOR: char = '=';

    /// Joins `id=amount` pairs with `|`; ids or amounts containing either
    /// separator are rejected since they could not be decoded again.
    pub fn encode(invoices: &[InvoiceRef]) -> Result<String, Error> {
        if let Some(invoice) = invoices.iter().find(|invoice| {
            [&invoice.id, &invoice.amount].iter().any(|value| {
                value.contains([Self::PAIR_SEPARATOR, Self::KEY_VALUE_SEPARATOR])
            })
        }) {
            return Err(report!(
                errors::ConnectorError::RequestEncodingFailedWithReason(format!(
                    "invoice {} cannot contain '|' or '='",
                    invoice.id
                ))
            ));
        }

        Ok(invoices
            .iter()
            .map(|invoice| {
                format!(
                    "{}{}{}",
                    invoice.id,
                    Self::KEY_VALUE_SEPARATOR,
                    invoice.amount
                )
            })
            .collect::<Vec<_>>()
            .join(&Self::PAIR_SEPARATOR.to_string()))
    }

    /// Splits on `|`, then each pair on its first `=`; malformed pairs are dropped.
    pub fn decode(encoded: &str) -> Vec<InvoiceRef> {
        encoded
            .split(Self::PAIR_SEPARATOR)
            .filter_map(|pair| pair.split_once(Self::KEY_VALUE_SEPARATOR))
            .map(|(id, amount)| InvoiceRef::new(id, amount))
            .collect()
    }
}

// ---- checkout ----

/// Strips every `client_id` query parameter, keeping the others in order
/// along with the fragment.
pub fn sanitize_return_url(return_url: &str) -> Result<String, Error> {
    let mut url = url::Url::parse(return_url.trim())
        .change_context(errors::ConnectorError::UrlError)
        .attach_printable("return url is not an absolute url")?;
    if url.cannot_be_a_base() {
        return Err(report!(errors::ConnectorError::UrlError))
            .attach_printable("return url has no host");
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| *key != "client_id")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }

    Ok(url.to_string())
}

/// Customer fields sent with a checkout, resolved from the host's records
#[derive(Debug, Clone)]
pub struct ShurjopayCustomer {
    pub name: String,
    pub phone: Secret<String>,
    pub email: Option<Secret<String>>,
    pub address: Option<String>,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

/// The last phone number at a home, work or mobile location wins
pub fn select_phone(client: &ClientRecord) -> String {
    client
        .contact_numbers
        .iter()
        .filter(|number| number.number_type == ContactNumberType::Phone)
        .filter(|number| {
            matches!(
                number.location,
                ContactLocation::Home | ContactLocation::Work | ContactLocation::Mobile
            )
        })
        .last()
        .map(|number| utils::digits_only(&number.number))
        .unwrap_or_default()
}

fn customer_name(contact: &ContactInfo) -> String {
    [non_blank(&contact.first_name), non_blank(&contact.last_name)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}

impl From<(&ContactInfo, &ClientRecord)> for ShurjopayCustomer {
    fn from((contact, client): (&ContactInfo, &ClientRecord)) -> Self {
        let or_default =
            |value: &Option<String>, default: &str| non_blank(value).unwrap_or(default).to_string();

        Self {
            name: customer_name(contact),
            phone: Secret::new(select_phone(client)),
            email: non_blank(&client.email).map(|email| Secret::new(email.to_string())),
            address: non_blank(&client.address1)
                .or_else(|| non_blank(&client.address2))
                .map(str::to_string),
            city: or_default(&client.city, constants::DEFAULT_CITY),
            state: or_default(&client.state, constants::DEFAULT_STATE),
            postcode: or_default(&client.zip, constants::DEFAULT_POSTCODE),
            country: or_default(&client.country, constants::DEFAULT_COUNTRY),
        }
    }
}

/// Everything a checkout needs that can be checked before talking to the processor
#[derive(Debug, Clone)]
pub struct ShurjopayCheckoutData {
    pub amount: StringMajorUnit,
    pub currency: String,
    pub return_url: String,
    pub invoices: Option<String>,
    pub client_id: Option<String>,
    pub client_ip: String,
    pub customer: ShurjopayCustomer,
}

impl TryFrom<&BuildProcessRequest> for ShurjopayCheckoutData {
    type Error = Error;

    fn try_from(request: &BuildProcessRequest) -> Result<Self, Self::Error> {
        let return_url = request
            .return_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(utils::missing_field_err("return_url"))
            .and_then(sanitize_return_url)?;
        let invoices = if request.invoices.is_empty() {
            None
        } else {
            Some(InvoiceCodec::encode(&request.invoices)?)
        };

        Ok(Self {
            amount: StringMajorUnit::from_decimal(request.amount),
            currency: request.currency.clone(),
            return_url,
            invoices,
            client_id: request
                .client
                .id
                .clone()
                .or_else(|| request.contact_info.client_id.clone()),
            client_ip: non_blank(&request.client_ip)
                .unwrap_or(consts::DEFAULT_CLIENT_IP)
                .to_string(),
            customer: ShurjopayCustomer::from((&request.contact_info, &request.client)),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ShurjopayPaymentsRequest {
    pub token: Secret<String>,
    pub store_id: Option<String>,
    pub currency: String,
    pub return_url: String,
    pub cancel_url: String,
    pub amount: StringMajorUnit,
    pub prefix: String,
    pub order_id: String,
    /// Field name as the processor spells it
    pub discsount_amount: u8,
    pub disc_percent: u8,
    pub client_ip: String,
    pub customer_name: String,
    pub customer_phone: Secret<String>,
    pub customer_email: Option<Secret<String>>,
    pub customer_address: Option<String>,
    pub customer_city: String,
    pub customer_state: String,
    pub customer_postcode: String,
    pub customer_country: String,
    pub value1: Option<String>,
    pub value2: Option<String>,
    pub value3: &'static str,
    pub value4: &'static str,
}

pub struct ShurjopayRouterData<'a> {
    pub settings: &'a GatewaySettings,
    pub token: &'a BearerToken,
    pub checkout: ShurjopayCheckoutData,
}

impl From<ShurjopayRouterData<'_>> for ShurjopayPaymentsRequest {
    fn from(item: ShurjopayRouterData<'_>) -> Self {
        let ShurjopayCheckoutData {
            amount,
            currency,
            return_url,
            invoices,
            client_id,
            client_ip,
            customer,
        } = item.checkout;

        Self {
            token: item.token.token.clone(),
            store_id: item.token.store_id.clone(),
            currency,
            cancel_url: return_url.clone(),
            return_url,
            amount,
            prefix: item.settings.store_prefix.clone(),
            order_id: generate_time_ordered_id(&item.settings.store_prefix),
            discsount_amount: 0,
            disc_percent: 0,
            client_ip,
            customer_name: customer.name,
            customer_phone: customer.phone,
            customer_email: customer.email,
            customer_address: customer.address,
            customer_city: customer.city,
            customer_state: customer.state,
            customer_postcode: customer.postcode,
            customer_country: customer.country,
            value1: invoices,
            value2: client_id,
            value3: constants::VALUE3,
            value4: constants::VALUE4,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ShurjopayPaymentsResponse {
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub sp_order_id: Option<String>,
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub customer_order_id: Option<String>,
}

// ---- verification ----

#[derive(Debug, Serialize)]
pub struct ShurjopayVerificationRequest {
    pub order_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShurjopayVerificationResponse {
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub sp_code: Option<String>,
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub sp_message: Option<String>,
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub order_id: Option<String>,
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub bank_trx_id: Option<String>,
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub amount: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub value1: Option<String>,
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub value2: Option<String>,
}

/// Maps an `sp_code` to a transaction status; unset codes carry no outcome.
pub fn get_transaction_status(sp_code: Option<&str>) -> Option<TransactionStatus> {
    if utils::is_unset(sp_code) {
        return None;
    }
    Some(match sp_code {
        Some(constants::SP_CODE_SUCCESS) => TransactionStatus::Approved,
        Some(constants::SP_CODE_CANCELED | constants::SP_CODE_CANCELED_BY_CUSTOMER) => {
            TransactionStatus::Canceled
        }
        _ => TransactionStatus::Failed,
    })
}

impl ShurjopayVerificationResponse {
    fn into_verification_result(self, status: TransactionStatus) -> VerificationResult {
        VerificationResult {
            status,
            client_id: self.value2,
            amount: self.amount,
            currency: self.currency,
            reference_id: self.bank_trx_id,
            transaction_id: self.order_id,
            invoices: self
                .value1
                .as_deref()
                .map(InvoiceCodec::decode)
                .unwrap_or_default(),
        }
    }
}

/// Reads the first verification record; `None` when it carries no outcome.
pub fn verification_result(
    records: Vec<ShurjopayVerificationResponse>,
) -> Option<VerificationResult> {
    let record = records.into_iter().next()?;
    let status = get_transaction_status(record.sp_code.as_deref())?;
    Some(record.into_verification_result(status))
}
