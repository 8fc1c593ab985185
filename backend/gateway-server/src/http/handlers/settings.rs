use axum::{extract::State, Json};
use domain_types::types::SettingsMeta;
use interfaces::connector_types::NonmerchantGateway;
use serde::Serialize;

use crate::http::{error::HttpError, state::AppState, utils::ValidatedJson};

/// Accepted settings, credentials left out
#[derive(Debug, Serialize)]
pub struct SettingsSummary {
    pub store_prefix: String,
    pub dev_mode: bool,
    pub encryptable_fields: Vec<&'static str>,
}

pub async fn validate(
    State(state): State<AppState>,
    ValidatedJson(meta): ValidatedJson<SettingsMeta>,
) -> Result<Json<SettingsSummary>, HttpError> {
    let settings = state.gateway.validate_settings(meta)?;
    Ok(Json(SettingsSummary {
        store_prefix: settings.store_prefix,
        dev_mode: settings.dev_mode,
        encryptable_fields: state.gateway.encryptable_fields(),
    }))
}

pub async fn encryptable_fields(State(state): State<AppState>) -> Json<Vec<&'static str>> {
    Json(state.gateway.encryptable_fields())
}
